/// Agent pipeline adapter.
///
/// Configures the three travel-planning agent roles and drives the
/// three-stage research → dining → compile pipeline against an external
/// OpenAI-compatible chat-completion provider. The provider's internals
/// (tool use, retries, scheduling) are not this crate's concern; callers
/// get an opaque result string or an explicit error to branch on.

pub mod config;
pub mod pipeline;

pub use config::CrewConfig;
pub use pipeline::{build_agents, build_tasks, run_pipeline, AgentSpec, CrewError, Stage, TaskSpec};
