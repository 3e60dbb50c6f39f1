/// Structured planning endpoint and the static service descriptors.
///
/// Every response on this surface is HTTP 200; failures are reported in
/// the envelope (`success:false`), never as error statuses.

use std::sync::Arc;

use axum::extract::{Json, State};
use serde::Serialize;
use serde_json::{json, Value};

use travel_core::{render, TripRequest, AGENT_NAMES};
use travel_crew::{run_pipeline, CrewError};

use crate::AppState;

/// Response envelope for /plan-surprise-trip. `None` fields are omitted
/// from the payload.
#[derive(Debug, Serialize)]
pub struct TravelResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents_used: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn success_envelope(trip: &TripRequest, itinerary: Value) -> TravelResponse {
    TravelResponse {
        success: true,
        message: format!(
            "✅ AI Travel Team created amazing {} itinerary for {}!",
            trip.trip_duration, trip.destination
        ),
        itinerary: Some(itinerary),
        agents_used: Some(AGENT_NAMES.iter().map(|s| s.to_string()).collect()),
        error: None,
    }
}

fn failure_envelope(error: &CrewError) -> TravelResponse {
    TravelResponse {
        success: false,
        message: "❌ AI Travel Team encountered an issue".to_string(),
        itinerary: None,
        agents_used: None,
        error: Some(error.to_string()),
    }
}

/// POST /plan-surprise-trip
///
/// Extracts trip parameters from the body (aliases and defaults apply),
/// runs the live pipeline when configured and falls back to the
/// deterministic itinerary otherwise.
pub async fn plan_surprise_trip(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Json<TravelResponse> {
    let trip = TripRequest::from_fields(&body);
    tracing::info!(
        "Planning {} trip to {} (origin {})",
        trip.trip_duration,
        trip.destination,
        trip.origin
    );

    let envelope = match &state.crew {
        Some(config) => match run_pipeline(&state.client, config, &trip).await {
            Ok(result) => success_envelope(&trip, render::parse_crew_itinerary(&result)),
            Err(e) => {
                tracing::warn!("Pipeline failed, reporting fallback envelope: {}", e);
                failure_envelope(&e)
            }
        },
        None => {
            let itinerary = render::placeholder_itinerary(&trip);
            success_envelope(
                &trip,
                serde_json::to_value(itinerary).expect("itinerary serializes"),
            )
        }
    };

    Json(envelope)
}

/// GET / — service descriptor
pub async fn home() -> Json<Value> {
    Json(json!({
        "service": "🎪 AI Travel Planning Team",
        "description": "Collaborative AI agents for surprise travel planning",
        "agents": [
            "🎯 Activity Planner - Finds unique experiences and cultural events",
            "🍽️ Restaurant Scout - Discovers amazing dining and scenic locations",
            "📋 Itinerary Compiler - Creates comprehensive travel plans with logistics"
        ],
        "endpoints": {
            "plan_trip": "/plan-surprise-trip",
            "chat_completions": "/chat/completions",
            "agents": "/agents",
            "health": "/health"
        },
        "status": "ready"
    }))
}

/// GET /health — liveness descriptor
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "AI Travel Planning Team",
        "agents_ready": true
    }))
}

/// GET /agents — the three roles and their capabilities
pub async fn agents() -> Json<Value> {
    Json(json!({
        "team": "AI Travel Planning Specialists",
        "agents": [
            {
                "name": "Activity Planner",
                "role": "🎯 Research and find unique activities and experiences",
                "capabilities": [
                    "Event discovery",
                    "Cultural research",
                    "Age-appropriate recommendations"
                ]
            },
            {
                "name": "Restaurant Scout",
                "role": "🍽️ Find highly-rated restaurants and dining experiences",
                "capabilities": [
                    "Restaurant reviews",
                    "Cuisine analysis",
                    "Scenic location scouting"
                ]
            },
            {
                "name": "Itinerary Compiler",
                "role": "📋 Create comprehensive travel plans with logistics",
                "capabilities": [
                    "Hotel recommendations",
                    "Schedule optimization",
                    "Day-by-day planning"
                ]
            }
        ],
        "collaboration": "The agents run as a sequential pipeline: activity research and dining research feed the final compilation"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> TripRequest {
        TripRequest::from_fields(&json!({
            "destination": "Tokyo",
            "trip_duration": "5 days",
        }))
    }

    #[test]
    fn test_success_envelope_shape() {
        let trip = sample_trip();
        let envelope = success_envelope(&trip, json!({"name": "Trip"}));

        assert!(envelope.success);
        assert_eq!(
            envelope.message,
            "✅ AI Travel Team created amazing 5 days itinerary for Tokyo!"
        );
        assert_eq!(
            envelope.agents_used.as_deref(),
            Some(&["Activity Planner".to_string(),
                   "Restaurant Scout".to_string(),
                   "Itinerary Compiler".to_string()][..])
        );
        assert!(envelope.error.is_none());
    }

    #[test]
    fn test_failure_envelope_omits_none_fields() {
        let envelope = failure_envelope(&CrewError::EmptyCompletion);
        assert!(!envelope.success);
        assert!(envelope.itinerary.is_none());
        assert!(envelope.agents_used.is_none());

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(!json.contains("\"itinerary\""));
        assert!(!json.contains("\"agents_used\""));
        assert!(json.contains("\"error\":\"provider returned an empty completion\""));
    }

    #[test]
    fn test_success_envelope_serializes_without_error_field() {
        let envelope = success_envelope(&sample_trip(), json!({}));
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("\"error\""));
    }
}
