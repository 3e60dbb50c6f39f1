/// Itinerary rendering.
///
/// Two paths, matching the two response styles the service supports:
/// - `placeholder_itinerary` builds a fully deterministic structured
///   itinerary from fixed day-plan skeletons (demo / fallback path).
/// - `team_summary` and `wrap_crew_result` produce the multi-section
///   text block, optionally wrapping a live pipeline result.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

use crate::trip::{Activity, DayPlan, Itinerary, TripRequest};
use crate::AGENT_NAMES;

/// Activity skeletons cycled across days. Name/description/justification
/// are interpolated with the destination and interests.
const ACTIVITY_SKELETONS: [(&str, &str, &str, f64); 4] = [
    (
        "Explore {destination} highlights",
        "A guided walk through the landmarks that define {destination}.",
        "sightseeing",
        4.8,
    ),
    (
        "Hidden corners of {destination}",
        "Off the beaten path neighborhoods only locals know.",
        "local experience",
        4.6,
    ),
    (
        "{destination} market morning",
        "Browse stalls, sample snacks and watch the city wake up.",
        "markets",
        4.5,
    ),
    (
        "Evening views over {destination}",
        "The best vantage point in town for sunset photos.",
        "scenery",
        4.9,
    ),
];

/// Restaurant name skeletons cycled across days.
const RESTAURANT_SKELETONS: [&str; 3] = [
    "A top-rated bistro in central {destination}",
    "A local favorite near the {destination} old town",
    "A hidden gem recommended by {destination} residents",
];

lazy_static! {
    static ref LEADING_NUMBER_RE: Regex = Regex::new(r"(\d+)").unwrap();
}

/// Number of day plans to generate for a free-text duration. The first
/// integer wins; "weeks" multiplies by 7; the result is clamped to 1..=14.
/// No number at all means the 3-day default.
pub fn day_count(trip_duration: &str) -> usize {
    let lower = trip_duration.to_lowercase();
    let n = LEADING_NUMBER_RE
        .captures(&lower)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .unwrap_or(3);
    let n = if lower.contains("week") { n * 7 } else { n };
    n.clamp(1, 14)
}

/// Stars plus a one-decimal score: 4.9 → "⭐⭐⭐⭐ 4.9/5.0".
pub fn format_rating(rating: f64) -> String {
    let stars = "⭐".repeat(rating.floor() as usize);
    format!("{} {:.1}/5.0", stars, rating)
}

fn fill(template: &str, trip: &TripRequest) -> String {
    template
        .replace("{destination}", &trip.destination)
        .replace("{interests}", &trip.interests)
}

/// Path (a): a deterministic structured itinerary interpolating the trip
/// parameters into fixed skeletons. Identical input yields byte-identical
/// output.
pub fn placeholder_itinerary(trip: &TripRequest) -> Itinerary {
    let days = day_count(&trip.trip_duration);
    let accommodation = format!("{} hotel in {}", trip.hotel_preference, trip.destination);

    let day_plans = (0..days)
        .map(|d| {
            let first = &ACTIVITY_SKELETONS[d % ACTIVITY_SKELETONS.len()];
            let second = &ACTIVITY_SKELETONS[(d + 1) % ACTIVITY_SKELETONS.len()];
            let activities = [first, second]
                .iter()
                .map(|(name, description, category, rating)| Activity {
                    name: fill(name, trip),
                    description: fill(description, trip),
                    category: category.to_string(),
                    rating: *rating,
                    why_suitable: format!("Matches your interest in {}", trip.interests),
                })
                .collect();

            DayPlan {
                date: format!("Day {}", d + 1),
                activities,
                restaurants: vec![
                    fill(RESTAURANT_SKELETONS[d % RESTAURANT_SKELETONS.len()], trip),
                    fill(
                        RESTAURANT_SKELETONS[(d + 1) % RESTAURANT_SKELETONS.len()],
                        trip,
                    ),
                ],
                accommodation: accommodation.clone(),
            }
        })
        .collect();

    Itinerary {
        name: format!("Surprise Trip to {}", trip.destination),
        destination: trip.destination.clone(),
        duration: trip.trip_duration.clone(),
        budget: trip.budget.clone(),
        day_plans,
        total_estimated_cost: trip.budget.clone(),
        agents_used: AGENT_NAMES.iter().map(|s| s.to_string()).collect(),
    }
}

/// Path (b): the fixed multi-section team summary.
pub fn team_summary(trip: &TripRequest) -> String {
    format!(
        "🎪 **AI Travel Team Results**\n\n\
         Your {duration} adventure from {origin} to {destination} is ready!\n\n\
         **🤖 Agent Collaboration:**\n\
         • **Activity Planner**: Discovered amazing local experiences and attractions\n\
         • **Restaurant Scout**: Found top-rated dining spots matching your tastes\n\
         • **Itinerary Compiler**: Organized your perfect day-by-day schedule\n\n\
         **📋 Trip Summary:**\n\
         • Destination: {destination}\n\
         • Duration: {duration}\n\
         • Budget: {budget}\n\
         • Interests: {interests}\n\
         • Hotel Preference: {hotel}\n\n\
         **🚀 Next Steps:**\n\
         Your personalized itinerary includes handpicked activities, restaurant \
         reservations, and optimal travel times. The team has coordinated everything \
         for your perfect trip!\n\n\
         Ready for your adventure? 🌟",
        duration = trip.trip_duration,
        origin = trip.origin,
        destination = trip.destination,
        budget = trip.budget,
        interests = trip.interests,
        hotel = trip.hotel_preference,
    )
}

/// Path (b) around a live pipeline result: fixed header and footer, the
/// opaque result text in between.
pub fn wrap_crew_result(trip: &TripRequest, result: &str) -> String {
    format!(
        "🎪 **AI Travel Team Results**\n\n\
         Your {duration} adventure from {origin} to {destination} is ready!\n\n\
         {result}\n\n\
         **🤖 Compiled by:** Activity Planner, Restaurant Scout, Itinerary Compiler\n\
         **💰 Budget:** {budget} • **✨ Interests:** {interests}",
        duration = trip.trip_duration,
        origin = trip.origin,
        destination = trip.destination,
        result = result.trim(),
        budget = trip.budget,
        interests = trip.interests,
    )
}

/// Interpret a pipeline result as a structured itinerary; anything that
/// is not valid JSON degrades to `{"raw_result": <text>}`.
pub fn parse_crew_itinerary(result: &str) -> Value {
    serde_json::from_str(result).unwrap_or_else(|_| json!({ "raw_result": result }))
}

/// Console rendering with section headers, per-day separators, activity
/// ratings and a dining list.
pub fn format_itinerary(itinerary: &Itinerary) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!("🎪 {}\n", itinerary.name.to_uppercase()));
    out.push_str(&format!("{}\n", rule));

    if let Some(first) = itinerary.day_plans.first() {
        out.push_str("\n🏨 ACCOMMODATION\n");
        out.push_str(&format!("   {}\n", first.accommodation));
    }

    let total = itinerary.day_plans.len();
    for (i, day) in itinerary.day_plans.iter().enumerate() {
        out.push_str(&format!("\n📅 DAY {}: {}\n", i + 1, day.date.to_uppercase()));
        out.push_str(&format!("{}\n", "-".repeat(60)));

        for activity in &day.activities {
            out.push_str(&format!("🎯 {}\n", activity.name));
            out.push_str(&format!("   📝 {}\n", activity.description));
            out.push_str(&format!("   {}\n", format_rating(activity.rating)));
            out.push_str(&format!("   💡 {}\n\n", activity.why_suitable));
        }

        if !day.restaurants.is_empty() {
            out.push_str("🍽️  DINING OPTIONS:\n");
            for restaurant in &day.restaurants {
                out.push_str(&format!("   • {}\n", restaurant));
            }
        }

        if i + 1 < total {
            out.push_str(&format!("{}\n", "─".repeat(60)));
        }
    }

    out.push_str(&format!(
        "\n💰 Estimated total: {} • Planned by: {}\n",
        itinerary.total_estimated_cost,
        itinerary.agents_used.join(", ")
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> TripRequest {
        TripRequest {
            origin: "Boston".to_string(),
            destination: "Tokyo".to_string(),
            age: "25".to_string(),
            interests: "food and dining".to_string(),
            budget: "$3000".to_string(),
            dates: "flexible".to_string(),
            trip_duration: "5 days".to_string(),
            hotel_preference: "boutique".to_string(),
        }
    }

    #[test]
    fn test_day_count_parsing() {
        assert_eq!(day_count("5 days"), 5);
        assert_eq!(day_count("2 weeks"), 14);
        assert_eq!(day_count("a while"), 3);
        assert_eq!(day_count("30 days"), 14);
        assert_eq!(day_count("0 days"), 1);
    }

    #[test]
    fn test_format_rating_floors_stars() {
        assert_eq!(format_rating(4.9), "⭐⭐⭐⭐ 4.9/5.0");
        assert_eq!(format_rating(5.0), "⭐⭐⭐⭐⭐ 5.0/5.0");
        assert_eq!(format_rating(4.8), "⭐⭐⭐⭐ 4.8/5.0");
    }

    #[test]
    fn test_placeholder_itinerary_is_deterministic() {
        let trip = sample_trip();
        let a = serde_json::to_vec(&placeholder_itinerary(&trip)).unwrap();
        let b = serde_json::to_vec(&placeholder_itinerary(&trip)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_placeholder_itinerary_shape() {
        let trip = sample_trip();
        let itinerary = placeholder_itinerary(&trip);

        assert_eq!(itinerary.name, "Surprise Trip to Tokyo");
        assert_eq!(itinerary.day_plans.len(), 5);
        assert_eq!(itinerary.total_estimated_cost, "$3000");
        assert_eq!(itinerary.agents_used.len(), 3);

        let day = &itinerary.day_plans[0];
        assert_eq!(day.date, "Day 1");
        assert_eq!(day.activities.len(), 2);
        assert_eq!(day.accommodation, "boutique hotel in Tokyo");
        assert!(day.activities[0].name.contains("Tokyo"));
        assert!(day.activities[0]
            .why_suitable
            .contains("food and dining"));
        for activity in &day.activities {
            assert!(activity.rating >= 0.0 && activity.rating <= 5.0);
        }
    }

    #[test]
    fn test_team_summary_interpolates_fields() {
        let text = team_summary(&sample_trip());
        assert!(text.contains("Your 5 days adventure from Boston to Tokyo is ready!"));
        assert!(text.contains("• Budget: $3000"));
        assert!(text.contains("• Hotel Preference: boutique"));
        assert!(text.contains("Activity Planner"));
        assert!(text.contains("Restaurant Scout"));
        assert!(text.contains("Itinerary Compiler"));
    }

    #[test]
    fn test_wrap_crew_result_keeps_payload() {
        let text = wrap_crew_result(&sample_trip(), "  Day 1: arrive and explore.  ");
        assert!(text.contains("Day 1: arrive and explore."));
        assert!(text.starts_with("🎪 **AI Travel Team Results**"));
        assert!(text.contains("Itinerary Compiler"));
    }

    #[test]
    fn test_parse_crew_itinerary_valid_json() {
        let value = parse_crew_itinerary(r#"{"name": "Trip", "day_plans": []}"#);
        assert_eq!(value["name"], "Trip");
    }

    #[test]
    fn test_parse_crew_itinerary_degrades_to_raw() {
        let value = parse_crew_itinerary("Day 1: museums. Day 2: food.");
        assert_eq!(value["raw_result"], "Day 1: museums. Day 2: food.");
    }

    #[test]
    fn test_format_itinerary_sections() {
        let text = format_itinerary(&placeholder_itinerary(&sample_trip()));
        assert!(text.contains("SURPRISE TRIP TO TOKYO"));
        assert!(text.contains("🏨 ACCOMMODATION"));
        assert!(text.contains("📅 DAY 1: DAY 1"));
        assert!(text.contains("🍽️  DINING OPTIONS:"));
        assert!(text.contains("4.8/5.0"));
        assert!(text.contains("Planned by: Activity Planner, Restaurant Scout, Itinerary Compiler"));
    }
}
