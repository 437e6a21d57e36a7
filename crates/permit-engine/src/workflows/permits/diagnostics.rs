use serde::{Deserialize, Serialize};

use super::domain::{Agency, ImprovementType, PermitKind, WorkflowTrack};

/// Fatal problems with the input or the rule catalogue. No summary is
/// produced when one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("workflow track is required")]
    MissingTrack,
    #[error("unrecognized workflow track '{0}' (expected waterfront, solar, or adu)")]
    UnrecognizedTrack(String),
    #[error("estimated cost '{0}' is not a non-negative dollar amount")]
    InvalidCost(String),
    #[error("rule '{rule}' assigns {permit} to {agency:?}, which is not its registered agency")]
    UnregisteredAgency {
        rule: String,
        permit: PermitKind,
        agency: Agency,
    },
    #[error("rule id '{0}' is declared more than once")]
    DuplicateRule(String),
    #[error("no base rule declared for the {0} track")]
    MissingBaseRule(WorkflowTrack),
}

/// Recoverable notes about facts the engine ignored while matching rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InconsistentFactsWarning {
    ImprovementOutsideTrack {
        improvement: ImprovementType,
        track: WorkflowTrack,
    },
    UnrecognizedImprovement {
        value: String,
    },
    UnrecognizedCategory {
        value: String,
    },
}

impl InconsistentFactsWarning {
    pub fn summary(&self) -> String {
        match self {
            Self::ImprovementOutsideTrack { improvement, track } => format!(
                "improvement '{}' does not apply to the {} track and was ignored",
                improvement,
                track.label()
            ),
            Self::UnrecognizedImprovement { value } => {
                format!("unrecognized improvement '{value}' was ignored")
            }
            Self::UnrecognizedCategory { value } => {
                format!("unrecognized category '{value}', treated as new construction")
            }
        }
    }
}
