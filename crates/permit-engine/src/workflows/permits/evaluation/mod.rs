mod config;
mod rules;

pub use config::{
    PermitThresholds, FEDERAL_LARGESCALE_MIN_CENTS, SHORELINE_EXEMPTION_MAX_CENTS,
};
pub use rules::{Rule, RuleSet};

use super::diagnostics::InconsistentFactsWarning;
use super::domain::{Agency, Confidence, PermitKind, WorkflowTrack};
use super::facts::FactModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Stateless evaluator that applies a rule catalogue to a fact snapshot.
#[derive(Debug)]
pub struct Evaluator {
    rules: RuleSet,
}

impl Evaluator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn evaluate(&self, facts: &FactModel) -> EvaluationResult {
        let (consistent, diagnostics) = restrict_to_track(facts);

        let mut requirements: Vec<PermitRequirement> = Vec::new();
        let mut fired = 0usize;

        for rule in self.rules.rules() {
            if !rule.applies(&consistent) {
                continue;
            }
            fired += 1;

            match requirements
                .iter_mut()
                .find(|requirement| requirement.permit == rule.permit)
            {
                Some(existing) => existing.absorb(rule),
                None => requirements.push(PermitRequirement::from_rule(rule)),
            }
        }

        let base_permit = facts.track.base_permit();
        if !requirements
            .iter()
            .any(|requirement| requirement.permit == base_permit)
        {
            requirements.insert(0, PermitRequirement::base(facts.track));
        }

        debug!(
            track = %facts.track,
            fired,
            permits = requirements.len(),
            warnings = diagnostics.len(),
            "permit rules evaluated"
        );

        EvaluationResult {
            track: facts.track,
            base_permit,
            requirements,
            diagnostics,
            elevation_feet: facts.elevation_feet,
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(RuleSet::standard())
    }
}

/// Drops improvement tags that belong to another track so no rule can match
/// on them, reporting each one.
fn restrict_to_track(facts: &FactModel) -> (FactModel, Vec<InconsistentFactsWarning>) {
    let mut consistent = facts.clone();
    let mut diagnostics = Vec::new();

    consistent.improvement_types.retain(|improvement| {
        if improvement.track() == facts.track {
            return true;
        }
        warn!(
            track = %facts.track,
            %improvement,
            "ignoring improvement inconsistent with workflow track"
        );
        diagnostics.push(InconsistentFactsWarning::ImprovementOutsideTrack {
            improvement: *improvement,
            track: facts.track,
        });
        false
    });

    (consistent, diagnostics)
}

/// A permit the project needs, merged across every rule that called for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitRequirement {
    pub permit: PermitKind,
    pub confidence: Confidence,
    pub rationale: String,
    pub agency: Agency,
    pub rule_ids: Vec<String>,
}

impl PermitRequirement {
    fn from_rule(rule: &Rule) -> Self {
        Self {
            permit: rule.permit,
            confidence: rule.confidence,
            rationale: rule.rationale.clone(),
            agency: rule.agency,
            rule_ids: vec![rule.id.to_string()],
        }
    }

    fn base(track: WorkflowTrack) -> Self {
        let permit = track.base_permit();
        Self {
            permit,
            confidence: Confidence::Definite,
            rationale: format!("{} is required for every {} project", permit.label(), track.id()),
            agency: permit.agency(),
            rule_ids: Vec::new(),
        }
    }

    fn absorb(&mut self, rule: &Rule) {
        self.confidence = self.confidence.max(rule.confidence);
        if !self.rationale.is_empty() {
            self.rationale.push_str("; ");
        }
        self.rationale.push_str(&rule.rationale);
        self.rule_ids.push(rule.id.to_string());
    }
}

/// Deduplicated evaluator output in rule-declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub track: WorkflowTrack,
    pub base_permit: PermitKind,
    pub requirements: Vec<PermitRequirement>,
    pub diagnostics: Vec<InconsistentFactsWarning>,
    pub elevation_feet: Option<f64>,
}

impl EvaluationResult {
    pub fn requirement(&self, permit: PermitKind) -> Option<&PermitRequirement> {
        self.requirements
            .iter()
            .find(|requirement| requirement.permit == permit)
    }
}
