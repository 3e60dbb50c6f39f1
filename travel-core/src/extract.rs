/// Best-effort extraction of trip parameters.
///
/// Two entry points:
/// - `TripRequest::from_fields` resolves a structured JSON body through
///   the ordered alias table in `trip::FIELD_SPECS`.
/// - `TripRequest::from_messages` mines a chat transcript with keyword
///   and regex matching.
///
/// Both are pure and infallible: anything unmatched keeps its default.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::trip::{ChatMessage, Role, TripRequest, FIELD_SPECS};

/// Destination gazetteer: lowercase keyword → canonical city.
/// First match wins, in this enumeration order.
pub const GAZETTEER: [(&str, &str); 12] = [
    ("tokyo", "Tokyo"),
    ("japan", "Tokyo"),
    ("paris", "Paris"),
    ("france", "Paris"),
    ("london", "London"),
    ("england", "London"),
    ("new york", "New York"),
    ("nyc", "New York"),
    ("rome", "Rome"),
    ("italy", "Rome"),
    ("barcelona", "Barcelona"),
    ("spain", "Barcelona"),
];

/// Origin substrings, checked in order.
const ORIGINS: [(&str, &str); 4] = [
    ("from boston", "Boston"),
    ("from new york", "New York"),
    ("from chicago", "Chicago"),
    ("from san francisco", "San Francisco"),
];

/// Interest keyword buckets, checked in order; first bucket with any
/// matching keyword wins.
const INTEREST_BUCKETS: [(&[&str], &str); 5] = [
    (&["food", "restaurant", "cuisine"], "food and dining"),
    (&["museum", "art", "culture"], "culture and museums"),
    (&["technology", "tech"], "technology and innovation"),
    (&["shopping"], "shopping and fashion"),
    (&["business"], "business and networking"),
];

lazy_static! {
    static ref BUDGET_RE: Regex = Regex::new(r"\$(\d+,?\d*)").unwrap();
    // Day patterns take priority over the week pattern: "10 days, about
    // 2 weeks" resolves to "10 days".
    static ref DURATION_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(\d+)\s*days?").unwrap(), "days"),
        (Regex::new(r"(\d+)\s*day\s*trip").unwrap(), "days"),
        (Regex::new(r"(\d+)\s*weeks?").unwrap(), "weeks"),
    ];
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        // Numeric ages and budgets arrive as JSON numbers from some callers
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Look one field up through the alias table: canonical name, then each
/// alias, then the documented default.
fn resolve_field(body: &Value, name: &str, aliases: &[&str], default: &str) -> String {
    if let Some(v) = non_empty(body.get(name)) {
        return v;
    }
    for alias in aliases {
        if let Some(v) = non_empty(body.get(alias)) {
            return v;
        }
    }
    default.to_string()
}

impl TripRequest {
    /// A request with every field at its documented default.
    pub fn defaults() -> Self {
        Self::from_fields(&Value::Null)
    }

    /// Resolve a structured request body through the alias table.
    /// Unknown shapes (non-objects) produce the all-defaults request.
    pub fn from_fields(body: &Value) -> Self {
        let get = |name: &str| {
            let spec = FIELD_SPECS
                .iter()
                .find(|s| s.name == name)
                .expect("field name present in FIELD_SPECS");
            resolve_field(body, spec.name, spec.aliases, spec.default)
        };

        Self {
            origin: get("origin"),
            destination: get("destination"),
            age: get("age"),
            interests: get("interests"),
            budget: get("budget"),
            dates: get("dates"),
            trip_duration: get("trip_duration"),
            hotel_preference: get("hotel_preference"),
        }
    }

    /// Mine a chat transcript for trip parameters. All user-role messages
    /// are concatenated and lowercased, then matched field by field; any
    /// field without a match keeps its default.
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let mut details = Self::defaults();

        let blob = messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        for (keyword, city) in GAZETTEER {
            if blob.contains(keyword) {
                details.destination = city.to_string();
                break;
            }
        }

        for (needle, city) in ORIGINS {
            if blob.contains(needle) {
                details.origin = city.to_string();
                break;
            }
        }

        if let Some(caps) = BUDGET_RE.captures(&blob) {
            details.budget = format!("${}", &caps[1]);
        }

        for (pattern, unit) in DURATION_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(&blob) {
                details.trip_duration = format!("{} {}", &caps[1], unit);
                break;
            }
        }

        for (keywords, label) in INTEREST_BUCKETS {
            if keywords.iter().any(|k| blob.contains(k)) {
                details.interests = label.to_string();
                break;
            }
        }

        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_all_populated(trip: &TripRequest) {
        assert!(!trip.origin.is_empty());
        assert!(!trip.destination.is_empty());
        assert!(!trip.age.is_empty());
        assert!(!trip.interests.is_empty());
        assert!(!trip.budget.is_empty());
        assert!(!trip.dates.is_empty());
        assert!(!trip.trip_duration.is_empty());
        assert!(!trip.hotel_preference.is_empty());
    }

    #[test]
    fn test_empty_body_uses_defaults() {
        let trip = TripRequest::from_fields(&json!({}));
        assert_eq!(trip.origin, "Boston");
        assert_eq!(trip.destination, "Unknown");
        assert_eq!(trip.budget, "$2000");
        assert_eq!(trip.trip_duration, "3 days");
        assert_eq!(trip.hotel_preference, "standard");
        assert_all_populated(&trip);
    }

    #[test]
    fn test_canonical_name_beats_alias() {
        let trip = TripRequest::from_fields(&json!({
            "destination": "Tokyo",
            "to": "Paris",
        }));
        assert_eq!(trip.destination, "Tokyo");
    }

    #[test]
    fn test_alias_resolution() {
        let trip = TripRequest::from_fields(&json!({
            "from": "Chicago",
            "to": "Rome",
            "duration": "5 days",
            "hotel": "luxury",
        }));
        assert_eq!(trip.origin, "Chicago");
        assert_eq!(trip.destination, "Rome");
        assert_eq!(trip.trip_duration, "5 days");
        assert_eq!(trip.hotel_preference, "luxury");
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        let trip = TripRequest::from_fields(&json!({
            "destination": "",
            "to": "London",
        }));
        assert_eq!(trip.destination, "London");

        let trip = TripRequest::from_fields(&json!({ "budget": "  " }));
        assert_eq!(trip.budget, "$2000");
    }

    #[test]
    fn test_numeric_age_accepted() {
        let trip = TripRequest::from_fields(&json!({ "age": 42 }));
        assert_eq!(trip.age, "42");
    }

    #[test]
    fn test_messages_never_leave_a_field_empty() {
        let trip = TripRequest::from_messages(&[]);
        assert_all_populated(&trip);

        let trip = TripRequest::from_messages(&[ChatMessage::user("hello")]);
        assert_all_populated(&trip);
        assert_eq!(trip.destination, "Unknown");
        assert_eq!(trip.interests, "general travel");
    }

    #[test]
    fn test_gazetteer_first_match_wins() {
        // "tokyo" is enumerated before "paris"
        let trip =
            TripRequest::from_messages(&[ChatMessage::user("Paris or Tokyo, can't decide")]);
        assert_eq!(trip.destination, "Tokyo");
    }

    #[test]
    fn test_gazetteer_case_insensitive() {
        let trip = TripRequest::from_messages(&[ChatMessage::user("I want to visit PARIS")]);
        assert_eq!(trip.destination, "Paris");
    }

    #[test]
    fn test_country_keyword_maps_to_city() {
        let trip = TripRequest::from_messages(&[ChatMessage::user("somewhere in italy")]);
        assert_eq!(trip.destination, "Rome");
    }

    #[test]
    fn test_origin_substring() {
        let trip =
            TripRequest::from_messages(&[ChatMessage::user("a trip from san francisco to japan")]);
        assert_eq!(trip.origin, "San Francisco");
        assert_eq!(trip.destination, "Tokyo");
    }

    #[test]
    fn test_assistant_messages_ignored() {
        let trip = TripRequest::from_messages(&[
            ChatMessage::assistant("How about London?"),
            ChatMessage::user("no ideas yet"),
        ]);
        assert_eq!(trip.destination, "Unknown");
    }

    #[test]
    fn test_budget_with_comma() {
        let trip = TripRequest::from_messages(&[ChatMessage::user("my budget is $3,000 total")]);
        assert_eq!(trip.budget, "$3,000");

        let trip = TripRequest::from_messages(&[ChatMessage::user("around $450")]);
        assert_eq!(trip.budget, "$450");
    }

    #[test]
    fn test_duration_day_pattern_beats_week_pattern() {
        let trip = TripRequest::from_messages(&[ChatMessage::user("10 days, about 2 weeks")]);
        assert_eq!(trip.trip_duration, "10 days");
    }

    #[test]
    fn test_duration_weeks() {
        let trip = TripRequest::from_messages(&[ChatMessage::user("gone for 2 weeks")]);
        assert_eq!(trip.trip_duration, "2 weeks");
    }

    #[test]
    fn test_duration_day_trip() {
        let trip = TripRequest::from_messages(&[ChatMessage::user("just a 4 day trip")]);
        assert_eq!(trip.trip_duration, "4 days");
    }

    #[test]
    fn test_interest_buckets_in_order() {
        let trip = TripRequest::from_messages(&[ChatMessage::user("great food and museums")]);
        assert_eq!(trip.interests, "food and dining");

        let trip = TripRequest::from_messages(&[ChatMessage::user("art galleries please")]);
        assert_eq!(trip.interests, "culture and museums");

        let trip = TripRequest::from_messages(&[ChatMessage::user("tech conferences")]);
        assert_eq!(trip.interests, "technology and innovation");

        let trip = TripRequest::from_messages(&[ChatMessage::user("shopping districts")]);
        assert_eq!(trip.interests, "shopping and fashion");

        let trip = TripRequest::from_messages(&[ChatMessage::user("a business trip")]);
        assert_eq!(trip.interests, "business and networking");
    }

    #[test]
    fn test_full_sentence() {
        let trip = TripRequest::from_messages(&[ChatMessage::user(
            "Plan me a 5 day trip to Paris with a $3000 budget",
        )]);
        assert_eq!(trip.destination, "Paris");
        assert_eq!(trip.trip_duration, "5 days");
        assert_eq!(trip.budget, "$3000");
        assert_eq!(trip.origin, "Boston");
    }
}
