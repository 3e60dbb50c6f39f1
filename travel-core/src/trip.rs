use serde::{Deserialize, Serialize};

/// Message role in a chat-completion conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Message in a chat-completion conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Normalized trip parameters. Every field is populated after extraction;
/// missing or empty inputs fall back to the defaults in FIELD_SPECS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub age: String,
    pub interests: String,
    pub budget: String,
    pub dates: String,
    pub trip_duration: String,
    pub hotel_preference: String,
}

/// One entry of the field alias table: canonical name, accepted aliases
/// in lookup order, and the default used when nothing matches.
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub default: &'static str,
}

/// Ordered alias table for structured request bodies. The canonical name
/// is tried first, then each alias, then the default. Empty strings count
/// as absent.
pub const FIELD_SPECS: [FieldSpec; 8] = [
    FieldSpec {
        name: "origin",
        aliases: &["from"],
        default: "Boston",
    },
    FieldSpec {
        name: "destination",
        aliases: &["to"],
        default: "Unknown",
    },
    FieldSpec {
        name: "age",
        aliases: &[],
        default: "25",
    },
    FieldSpec {
        name: "interests",
        aliases: &[],
        default: "general travel",
    },
    FieldSpec {
        name: "budget",
        aliases: &[],
        default: "$2000",
    },
    FieldSpec {
        name: "dates",
        aliases: &["travel_dates"],
        default: "flexible",
    },
    FieldSpec {
        name: "trip_duration",
        aliases: &["duration"],
        default: "3 days",
    },
    FieldSpec {
        name: "hotel_preference",
        aliases: &["hotel"],
        default: "standard",
    },
];

/// A single planned activity with its rating and justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub category: String,
    pub rating: f64,
    pub why_suitable: String,
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: String,
    pub activities: Vec<Activity>,
    pub restaurants: Vec<String>,
    pub accommodation: String,
}

/// The assembled trip plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub name: String,
    pub destination: String,
    pub duration: String,
    pub budget: String,
    pub day_plans: Vec<DayPlan>,
    pub total_estimated_cost: String,
    pub agents_used: Vec<String>,
}
