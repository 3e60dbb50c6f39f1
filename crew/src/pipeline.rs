/// The three-stage travel planning pipeline.
///
/// Stage order is fixed: activity research → restaurant research →
/// itinerary compilation. The compile stage declares both research stages
/// as context, so their outputs are embedded in its prompt. Each stage is
/// one chat-completion call; the whole run is synchronous from the
/// caller's perspective.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use travel_core::TripRequest;

/// Stage identifiers, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Spots,
    Food,
    Compile,
}

/// A named agent role with an interpolated goal and backstory.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSpec {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

/// One unit of pipeline work, bound to an agent. `context` names the
/// stages whose outputs must be available before this one runs.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub stage: Stage,
    pub agent: usize,
    pub description: String,
    pub expected_output: String,
    pub context: Vec<Stage>,
}

/// Failures at the pipeline boundary. Callers match on this and branch
/// to the deterministic fallback; nothing here reaches an HTTP client.
#[derive(Debug, Error)]
pub enum CrewError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("provider returned an empty completion")]
    EmptyCompletion,
}

/// The three agent roles for a given trip.
pub fn build_agents(trip: &TripRequest) -> [AgentSpec; 3] {
    [
        AgentSpec {
            name: "Activity Planner".to_string(),
            role: "Personalized activity researcher".to_string(),
            goal: format!(
                "Research unique activities and experiences in {} suited to a traveler \
                 interested in {}",
                trip.destination, trip.interests
            ),
            backstory: format!(
                "You are an expert at discovering events and hidden experiences. You are \
                 planning a {} trip with a {} budget and tailor every suggestion to the \
                 traveler's interests.",
                trip.trip_duration, trip.budget
            ),
        },
        AgentSpec {
            name: "Restaurant Scout".to_string(),
            role: "Dining and scenery researcher".to_string(),
            goal: format!(
                "Find highly-rated restaurants and memorable dining experiences in {}",
                trip.destination
            ),
            backstory: format!(
                "You know where locals actually eat. You balance ambiance, reviews and a \
                 {} budget, favoring spots that match an interest in {}.",
                trip.budget, trip.interests
            ),
        },
        AgentSpec {
            name: "Itinerary Compiler".to_string(),
            role: "Itinerary compilation expert".to_string(),
            goal: format!(
                "Compile the research into a coherent day-by-day {} itinerary for {}",
                trip.trip_duration, trip.destination
            ),
            backstory: format!(
                "You turn raw research into a polished plan with logistics, pacing and a \
                 running budget against {}.",
                trip.budget
            ),
        },
    ]
}

/// The three tasks in strict sequential order. The compile task requires
/// both research outputs as context.
pub fn build_tasks(trip: &TripRequest) -> [TaskSpec; 3] {
    [
        TaskSpec {
            stage: Stage::Spots,
            agent: 0,
            description: format!(
                "Research standout activities and experiences in {} for a {} stay. The \
                 traveler is {} years old and interested in {}. List each with a short \
                 description, a category and why it suits them.",
                trip.destination, trip.trip_duration, trip.age, trip.interests
            ),
            expected_output: "A list of activities with descriptions, categories, ratings \
                              and suitability notes"
                .to_string(),
            context: vec![],
        },
        TaskSpec {
            stage: Stage::Food,
            agent: 1,
            description: format!(
                "Scout restaurants and dining experiences in {} that fit a {} budget and \
                 an interest in {}. Include a mix of well-known and local spots.",
                trip.destination, trip.budget, trip.interests
            ),
            expected_output: "A list of restaurant recommendations with one-line reasons".to_string(),
            context: vec![],
        },
        TaskSpec {
            stage: Stage::Compile,
            agent: 2,
            description: format!(
                "Using the activity research and the restaurant research, compile a \
                 day-by-day {} itinerary for {} departing from {} on {}. Stay within {} \
                 and include a {} hotel recommendation.",
                trip.trip_duration,
                trip.destination,
                trip.origin,
                trip.dates,
                trip.budget,
                trip.hotel_preference
            ),
            expected_output: "A complete day-by-day itinerary as JSON with name, \
                              destination, duration, budget, day_plans and total cost"
                .to_string(),
            context: vec![Stage::Spots, Stage::Food],
        },
    ]
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: String,
}

/// One chat-completion call for one stage.
async fn run_stage(
    client: &reqwest::Client,
    config: &crate::CrewConfig,
    agent: &AgentSpec,
    prompt: &str,
) -> Result<String, CrewError> {
    let mut body = json!({
        "model": config.model_id,
        "messages": [
            {
                "role": "system",
                "content": format!(
                    "You are {}, {}.\nGoal: {}\nBackstory: {}",
                    agent.name, agent.role, agent.goal, agent.backstory
                ),
            },
            { "role": "user", "content": prompt },
        ],
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
    });
    if let Some(project_id) = &config.project_id {
        body["project_id"] = json!(project_id);
    }

    let response = client
        .post(format!("{}/chat/completions", config.api_url))
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(CrewError::Provider { status, body });
    }

    let completion: CompletionResponse = response.json().await?;
    let content = completion
        .choices
        .first()
        .map(|c| c.message.content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(CrewError::EmptyCompletion);
    }
    Ok(content)
}

/// Run the full pipeline for one trip and return the compile stage's
/// output. Stages run strictly in order; a failure at any stage aborts
/// the run and surfaces as a `CrewError` for the caller to branch on.
pub async fn run_pipeline(
    client: &reqwest::Client,
    config: &crate::CrewConfig,
    trip: &TripRequest,
) -> Result<String, CrewError> {
    let agents = build_agents(trip);
    let tasks = build_tasks(trip);

    let mut outputs: Vec<(Stage, String)> = Vec::with_capacity(tasks.len());

    for task in &tasks {
        let agent = &agents[task.agent];
        tracing::info!("→ Running stage {:?} with {}", task.stage, agent.name);

        let mut prompt = task.description.clone();
        for stage in &task.context {
            let (_, prior) = outputs
                .iter()
                .find(|(s, _)| s == stage)
                .expect("context stages run before their dependents");
            prompt.push_str(&format!("\n\n[{:?} research]\n{}", stage, prior));
        }
        prompt.push_str(&format!("\n\nExpected output: {}", task.expected_output));

        let output = run_stage(client, config, agent, &prompt).await?;
        tracing::debug!("✓ Stage {:?} produced {} chars", task.stage, output.len());
        outputs.push((task.stage, output));
    }

    let (_, compiled) = outputs.pop().expect("pipeline has three stages");
    Ok(compiled)
}
