use serde::{Deserialize, Serialize};

use super::domain::{Agency, Confidence, PermitKind, WorkflowTrack};
use super::evaluation::{EvaluationResult, PermitRequirement};

/// Ordinary high-water elevation of the reservoir, in feet.
pub const HIGH_WATER_ELEVATION_FEET: f64 = 544.0;

/// Permits partitioned for presentation and template selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub track: WorkflowTrack,
    pub definitely_required: Vec<PermitRequirement>,
    pub likely_required: Vec<PermitRequirement>,
    pub conditional: Vec<PermitRequirement>,
    /// Base permit first, then every other permit in first-seen rule order.
    pub all_permits: Vec<PermitKind>,
    pub by_agency: Vec<AgencyGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub site_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyGroup {
    pub agency: Agency,
    pub agency_name: String,
    pub permits: Vec<PermitKind>,
}

impl Summary {
    pub fn requirement(&self, permit: PermitKind) -> Option<&PermitRequirement> {
        self.definitely_required
            .iter()
            .chain(&self.likely_required)
            .chain(&self.conditional)
            .find(|requirement| requirement.permit == permit)
    }

    pub fn contains(&self, permit: PermitKind) -> bool {
        self.all_permits.contains(&permit)
    }

    pub fn confidence_of(&self, permit: PermitKind) -> Option<Confidence> {
        self.requirement(permit)
            .map(|requirement| requirement.confidence)
    }
}

pub fn summarize(result: &EvaluationResult) -> Summary {
    let mut definitely_required = Vec::new();
    let mut likely_required = Vec::new();
    let mut conditional = Vec::new();

    for requirement in &result.requirements {
        let bucket = match requirement.confidence {
            Confidence::Definite => &mut definitely_required,
            Confidence::Likely => &mut likely_required,
            Confidence::Conditional => &mut conditional,
        };
        bucket.push(requirement.clone());
    }

    let mut all_permits = vec![result.base_permit];
    for requirement in &result.requirements {
        if !all_permits.contains(&requirement.permit) {
            all_permits.push(requirement.permit);
        }
    }

    let mut by_agency: Vec<AgencyGroup> = Vec::new();
    for permit in &all_permits {
        let agency = permit.agency();
        match by_agency.iter_mut().find(|group| group.agency == agency) {
            Some(group) => group.permits.push(*permit),
            None => by_agency.push(AgencyGroup {
                agency,
                agency_name: agency.name().to_string(),
                permits: vec![*permit],
            }),
        }
    }

    Summary {
        track: result.track,
        definitely_required,
        likely_required,
        conditional,
        all_permits,
        by_agency,
        site_notes: site_notes(result),
    }
}

fn site_notes(result: &EvaluationResult) -> Vec<String> {
    let Some(elevation) = result.elevation_feet else {
        return Vec::new();
    };
    if result.track != WorkflowTrack::Waterfront {
        return Vec::new();
    }

    let relation = if elevation <= HIGH_WATER_ELEVATION_FEET {
        "at or below"
    } else {
        "above"
    };
    vec![format!(
        "Site elevation {elevation:.1} ft is {relation} the {HIGH_WATER_ELEVATION_FEET:.0} ft ordinary high-water mark"
    )]
}

/// Rationale text for a permit in the summary, if the permit is present.
pub fn explain(permit: PermitKind, summary: &Summary) -> Option<&str> {
    summary
        .requirement(permit)
        .map(|requirement| requirement.rationale.as_str())
}
