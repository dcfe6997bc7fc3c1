pub mod state;
pub mod parser;
pub mod cortex;
pub mod agent;

use serde::{Deserialize, Serialize};

/// One row of social chatter. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Output schema the model is asked to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// `selected` / `rejected` / `golden_candidate`
    #[default]
    Selection,
    /// `decision_trace` / `golden_candidate`
    Trace,
    /// `accepted` / `rejected` / `golden_candidate`
    Verdict,
}
