// Common types for the line-oriented todo store

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Todo state - pending or done, nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    #[default]
    Pending,
    Done,
}

impl TodoState {
    /// Single-character marker used in list output
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Pending => "-",
            Self::Done => "x",
        }
    }
}

impl std::fmt::Display for TodoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Status filter for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Todo,
    Done,
    All,
}

impl StatusFilter {
    pub fn matches(&self, state: TodoState) -> bool {
        match self {
            Self::Todo => state == TodoState::Pending,
            Self::Done => state == TodoState::Done,
            Self::All => true,
        }
    }
}
