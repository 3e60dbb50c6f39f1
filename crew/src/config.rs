/// Provider configuration, loaded from the environment.
///
/// Only the API key is required; everything else has a documented
/// default. A missing key is how deployments opt out of the live
/// pipeline, so callers treat `Err` here as "use the deterministic path".

#[derive(Debug, Clone)]
pub struct CrewConfig {
    pub api_key: String,
    pub api_url: String,
    pub model_id: String,
    pub project_id: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub min_tokens: u32,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl CrewConfig {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("TRAVEL_API_KEY")?;

        Ok(Self {
            api_key,
            api_url: env_or("TRAVEL_API_URL", "https://api.openai.com/v1"),
            model_id: env_or("TRAVEL_MODEL_ID", "gpt-4o-mini"),
            project_id: std::env::var("TRAVEL_PROJECT_ID").ok(),
            temperature: env_or("TRAVEL_TEMPERATURE", "0.7").parse().unwrap_or(0.7),
            max_tokens: env_or("TRAVEL_MAX_TOKENS", "1000").parse().unwrap_or(1000),
            min_tokens: env_or("TRAVEL_MIN_TOKENS", "1").parse().unwrap_or(1),
        })
    }

    /// Configuration for tests and offline use.
    pub fn for_testing(api_url: impl Into<String>) -> Self {
        Self {
            api_key: "test-key".to_string(),
            api_url: api_url.into(),
            model_id: "travel-agent".to_string(),
            project_id: None,
            temperature: 0.7,
            max_tokens: 1000,
            min_tokens: 1,
        }
    }
}
