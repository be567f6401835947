//! Assistant core
//!
//! Function registry, nested agents, summarization, and the orchestrator
//! tying them together.

use thiserror::Error;

pub mod agent;
pub mod context;
pub mod functions;
pub mod orchestrator;
pub mod summarizer;

pub use agent::{Agent, Resolution};
pub use context::ContextBuilder;
pub use functions::{BoundArguments, FunctionHandler, FunctionRegistry};
pub use orchestrator::{Orchestrator, Outcome};
pub use summarizer::Summarizer;

/// Assistant errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Please provide a prompt.")]
    EmptyPrompt,

    #[error("Function {0} is not defined.")]
    UnknownFunction(String),

    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },

    #[error("no spoken reply could be produced for the result of {function}")]
    Unsummarizable { function: String },

    #[error("completion request failed: {0}")]
    Provider(#[from] vox_provider::ProviderError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
