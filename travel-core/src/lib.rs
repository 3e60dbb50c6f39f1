/// Surprise Travel core library
///
/// Pure request/response logic shared by the HTTP server and the CLI:
/// - trip: the trip-parameter model and chat message types
/// - extract: best-effort field extraction from request bodies and chat
///   transcripts (never fails, never leaves a field empty)
/// - render: deterministic itinerary skeletons and text formatting

pub mod extract;
pub mod render;
pub mod trip;

pub use trip::{Activity, ChatMessage, DayPlan, Itinerary, Role, TripRequest};

/// The three agent roles, in pipeline order.
pub const AGENT_NAMES: [&str; 3] = [
    "Activity Planner",
    "Restaurant Scout",
    "Itinerary Compiler",
];
