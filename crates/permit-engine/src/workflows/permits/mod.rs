//! Permit determination: normalize project facts, apply the rule catalogue,
//! and partition the result for presentation and document selection.
//!
//! Everything up to [`Summary`] is a pure function of its input. The
//! [`PermitDeterminationService`] is the integration layer that decides
//! whether a recomputed summary is worth persisting.

pub mod diagnostics;
pub mod domain;
pub mod evaluation;
pub mod facts;
pub mod repository;
pub mod router;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use diagnostics::{ConfigurationError, InconsistentFactsWarning};
pub use domain::{Agency, Confidence, ImprovementType, PermitKind, ProjectCategory, WorkflowTrack};
pub use evaluation::{
    EvaluationResult, Evaluator, PermitRequirement, PermitThresholds, Rule, RuleSet,
    FEDERAL_LARGESCALE_MIN_CENTS, SHORELINE_EXEMPTION_MAX_CENTS,
};
pub use facts::{normalize, FactModel, NormalizedFacts, RawProjectDetails};
pub use repository::{PermitRecord, PermitStore, ProjectId, StoreError};
pub use router::permit_router;
pub use service::{DeterminationOutcome, DeterminationServiceError, PermitDeterminationService};
pub use summary::{explain, summarize, AgencyGroup, Summary, HIGH_WATER_ELEVATION_FEET};

use serde::{Deserialize, Serialize};

/// Boundary result handed to the UI: the summary plus any non-fatal notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Determination {
    pub summary: Summary,
    /// Every merged requirement in rule-declaration order, across all tiers.
    pub requirements: Vec<PermitRequirement>,
    pub diagnostics: Vec<InconsistentFactsWarning>,
}

/// Normalizer, evaluator, and summary builder bundled behind one call.
#[derive(Debug, Default)]
pub struct PermitEngine {
    evaluator: Evaluator,
}

impl PermitEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            evaluator: Evaluator::new(rules),
        }
    }

    pub fn standard() -> Self {
        Self::new(RuleSet::standard())
    }

    pub fn with_thresholds(thresholds: PermitThresholds) -> Self {
        Self::new(RuleSet::with_thresholds(thresholds))
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn evaluate(&self, raw: &RawProjectDetails) -> Result<Determination, ConfigurationError> {
        let NormalizedFacts {
            facts,
            mut diagnostics,
        } = normalize(raw)?;

        let mut result = self.evaluator.evaluate(&facts);
        diagnostics.append(&mut result.diagnostics);
        result.diagnostics = diagnostics;

        Ok(Determination {
            summary: summarize(&result),
            requirements: result.requirements,
            diagnostics: result.diagnostics,
        })
    }
}

/// Evaluate a raw project record against the standard rule catalogue.
pub fn evaluate(raw: &RawProjectDetails) -> Result<Determination, ConfigurationError> {
    PermitEngine::standard().evaluate(raw)
}
