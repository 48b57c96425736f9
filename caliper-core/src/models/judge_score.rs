use serde::{Deserialize, Serialize};

use crate::gestalt::Gestalt;

/// The authoritative verdict from the expensive judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeScore {
    pub gestalt: Gestalt,
    pub rationale: String,
}

impl JudgeScore {
    pub fn new(gestalt: impl Into<Gestalt>, rationale: impl Into<String>) -> Self {
        Self {
            gestalt: gestalt.into(),
            rationale: rationale.into(),
        }
    }
}
