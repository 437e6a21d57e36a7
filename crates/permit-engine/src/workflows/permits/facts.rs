use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::diagnostics::{ConfigurationError, InconsistentFactsWarning};
use super::domain::{ImprovementType, ProjectCategory, WorkflowTrack};

/// Project details as the form layer hands them over: every field optional,
/// text where the user typed text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProjectDetails {
    #[serde(alias = "workflowTrack")]
    pub workflow_track: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "improvementTypes")]
    pub improvement_types: Vec<String>,
    /// Dollar text such as `"$7,047.00"`.
    #[serde(alias = "estimatedCost")]
    pub estimated_cost: Option<String>,
    #[serde(alias = "estimatedCostCents")]
    pub estimated_cost_cents: Option<u64>,
    #[serde(alias = "inWater")]
    pub in_water: Option<bool>,
    #[serde(alias = "belowHighWaterLine")]
    pub below_high_water_line: Option<bool>,
    #[serde(alias = "withinShorelineJurisdiction")]
    pub within_shoreline_jurisdiction: Option<bool>,
    #[serde(alias = "nearShoreline")]
    pub near_shoreline: Option<bool>,
    #[serde(alias = "onSewer")]
    pub on_sewer: Option<bool>,
    #[serde(alias = "hasExistingADU", alias = "hasExistingAdu")]
    pub has_existing_adu: Option<bool>,
    #[serde(alias = "elevationFeet")]
    pub elevation_feet: Option<f64>,
}

/// Validated, fully defaulted facts for a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactModel {
    pub track: WorkflowTrack,
    pub category: ProjectCategory,
    pub improvement_types: BTreeSet<ImprovementType>,
    pub estimated_cost_cents: u64,
    pub in_water: bool,
    pub below_high_water_line: bool,
    pub within_shoreline_jurisdiction: bool,
    pub near_shoreline: bool,
    pub on_sewer: bool,
    pub has_existing_adu: bool,
    pub elevation_feet: Option<f64>,
}

impl FactModel {
    pub fn new(track: WorkflowTrack) -> Self {
        Self {
            track,
            category: ProjectCategory::default(),
            improvement_types: BTreeSet::new(),
            estimated_cost_cents: 0,
            in_water: false,
            below_high_water_line: false,
            within_shoreline_jurisdiction: false,
            near_shoreline: false,
            on_sewer: false,
            has_existing_adu: false,
            elevation_feet: None,
        }
    }

    pub fn with_category(mut self, category: ProjectCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_improvements<I>(mut self, improvements: I) -> Self
    where
        I: IntoIterator<Item = ImprovementType>,
    {
        self.improvement_types.extend(improvements);
        self
    }

    pub fn with_cost_cents(mut self, cents: u64) -> Self {
        self.estimated_cost_cents = cents;
        self
    }

    pub fn in_water(mut self, value: bool) -> Self {
        self.in_water = value;
        self
    }

    pub fn below_high_water_line(mut self, value: bool) -> Self {
        self.below_high_water_line = value;
        self
    }

    pub fn within_shoreline_jurisdiction(mut self, value: bool) -> Self {
        self.within_shoreline_jurisdiction = value;
        self
    }

    pub fn near_shoreline(mut self, value: bool) -> Self {
        self.near_shoreline = value;
        self
    }

    pub fn on_sewer(mut self, value: bool) -> Self {
        self.on_sewer = value;
        self
    }

    pub fn has_existing_adu(mut self, value: bool) -> Self {
        self.has_existing_adu = value;
        self
    }

    pub fn with_elevation_feet(mut self, feet: f64) -> Self {
        self.elevation_feet = Some(feet);
        self
    }

    pub fn has_improvement(&self, improvement: ImprovementType) -> bool {
        self.improvement_types.contains(&improvement)
    }
}

/// Normalizer output: the facts plus any input that had to be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFacts {
    pub facts: FactModel,
    pub diagnostics: Vec<InconsistentFactsWarning>,
}

/// Convert a raw form record into a [`FactModel`], defaulting missing fields.
pub fn normalize(raw: &RawProjectDetails) -> Result<NormalizedFacts, ConfigurationError> {
    let track = match raw.workflow_track.as_deref().map(str::trim) {
        None | Some("") => return Err(ConfigurationError::MissingTrack),
        Some(value) => WorkflowTrack::parse(value)
            .ok_or_else(|| ConfigurationError::UnrecognizedTrack(value.to_string()))?,
    };

    let estimated_cost_cents = match (raw.estimated_cost_cents, raw.estimated_cost.as_deref()) {
        (Some(cents), _) => cents,
        (None, Some(text)) if !text.trim().is_empty() => parse_dollars_to_cents(text)
            .ok_or_else(|| ConfigurationError::InvalidCost(text.to_string()))?,
        (None, _) => 0,
    };

    let mut diagnostics = Vec::new();

    let category = match raw.category.as_deref().map(str::trim) {
        None | Some("") => ProjectCategory::default(),
        Some(value) => ProjectCategory::parse(value).unwrap_or_else(|| {
            diagnostics.push(InconsistentFactsWarning::UnrecognizedCategory {
                value: value.to_string(),
            });
            ProjectCategory::default()
        }),
    };

    let mut improvement_types = BTreeSet::new();
    for tag in &raw.improvement_types {
        if tag.trim().is_empty() {
            continue;
        }
        match ImprovementType::parse(tag) {
            Some(improvement) => {
                improvement_types.insert(improvement);
            }
            None => diagnostics.push(InconsistentFactsWarning::UnrecognizedImprovement {
                value: tag.trim().to_string(),
            }),
        }
    }

    let facts = FactModel {
        track,
        category,
        improvement_types,
        estimated_cost_cents,
        in_water: raw.in_water.unwrap_or(false),
        below_high_water_line: raw.below_high_water_line.unwrap_or(false),
        within_shoreline_jurisdiction: raw.within_shoreline_jurisdiction.unwrap_or(false),
        near_shoreline: raw.near_shoreline.unwrap_or(false),
        on_sewer: raw.on_sewer.unwrap_or(false),
        has_existing_adu: raw.has_existing_adu.unwrap_or(false),
        elevation_feet: raw.elevation_feet.filter(|feet| feet.is_finite()),
    };

    Ok(NormalizedFacts { facts, diagnostics })
}

/// Parses `"$7,047.00"`-style text into cents without going through floats.
/// Thousands separators are optional but must sit between groups of three.
pub(crate) fn parse_dollars_to_cents(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

    let (grouped, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    let whole = strip_thousands_separators(grouped)?;
    if whole.is_empty() || !whole.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > 2 || !fraction.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    let dollars: u64 = whole.parse().ok()?;
    let cents: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    dollars.checked_mul(100)?.checked_add(cents)
}

fn strip_thousands_separators(grouped: &str) -> Option<String> {
    if !grouped.contains(',') {
        return Some(grouped.to_string());
    }

    let mut groups = grouped.split(',');
    let leading = groups.next()?;
    if leading.is_empty() || leading.len() > 3 {
        return None;
    }

    let mut whole = leading.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        whole.push_str(group);
    }
    Some(whole)
}
