use std::collections::HashSet;
use std::fmt;

use super::super::diagnostics::ConfigurationError;
use super::super::domain::{Agency, Confidence, ImprovementType, PermitKind, WorkflowTrack};
use super::super::facts::FactModel;
use super::config::PermitThresholds;

type Predicate = Box<dyn Fn(&FactModel) -> bool + Send + Sync>;

/// One declarative permitting rule. A rule only ever looks at the facts it
/// is given; it never sees another rule's output.
pub struct Rule {
    pub id: &'static str,
    pub track: WorkflowTrack,
    pub permit: PermitKind,
    pub confidence: Confidence,
    pub rationale: String,
    pub agency: Agency,
    predicate: Predicate,
}

impl Rule {
    /// Builds a rule owned by the permit's registered agency.
    pub fn new<P>(
        id: &'static str,
        track: WorkflowTrack,
        permit: PermitKind,
        confidence: Confidence,
        rationale: impl Into<String>,
        predicate: P,
    ) -> Self
    where
        P: Fn(&FactModel) -> bool + Send + Sync + 'static,
    {
        Self {
            id,
            track,
            permit,
            confidence,
            rationale: rationale.into(),
            agency: permit.agency(),
            predicate: Box::new(predicate),
        }
    }

    pub fn with_agency(mut self, agency: Agency) -> Self {
        self.agency = agency;
        self
    }

    pub fn applies(&self, facts: &FactModel) -> bool {
        facts.track == self.track && (self.predicate)(facts)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("track", &self.track)
            .field("permit", &self.permit)
            .field("confidence", &self.confidence)
            .field("agency", &self.agency)
            .finish_non_exhaustive()
    }
}

/// Ordered rule catalogue. Declaration order is the order permits are
/// reported in.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validates a custom catalogue against the permit/agency registry.
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigurationError> {
        validate(&rules)?;
        Ok(Self { rules })
    }

    pub fn standard() -> Self {
        Self::with_thresholds(PermitThresholds::default())
    }

    pub fn with_thresholds(thresholds: PermitThresholds) -> Self {
        Self {
            rules: standard_rules(thresholds),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn validate(rules: &[Rule]) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.id) {
            return Err(ConfigurationError::DuplicateRule(rule.id.to_string()));
        }
        if rule.agency != rule.permit.agency() {
            return Err(ConfigurationError::UnregisteredAgency {
                rule: rule.id.to_string(),
                permit: rule.permit,
                agency: rule.agency,
            });
        }
    }

    for track in WorkflowTrack::ordered() {
        let has_base = rules
            .iter()
            .any(|rule| rule.track == track && rule.permit == track.base_permit());
        if !has_base {
            return Err(ConfigurationError::MissingBaseRule(track));
        }
    }

    Ok(())
}

pub(crate) fn format_cents(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}.{:02}", cents % 100)
}

fn standard_rules(thresholds: PermitThresholds) -> Vec<Rule> {
    use Confidence::{Conditional, Definite, Likely};
    use WorkflowTrack::{Adu, Solar, Waterfront};

    let exemption_max = thresholds.shoreline_exemption_max_cents;
    let federal_min = thresholds.federal_largescale_min_cents;

    vec![
        Rule::new(
            "base-license",
            Waterfront,
            PermitKind::CwaLicense,
            Definite,
            "all reservoir shoreline work requires a Cascade Water Alliance license",
            |_| true,
        ),
        Rule::new(
            "shoreline-exempt",
            Waterfront,
            PermitKind::ShorelineExemption,
            Definite,
            format!(
                "estimated cost at or below {} qualifies for a shoreline exemption",
                format_cents(exemption_max)
            ),
            move |facts| facts.estimated_cost_cents <= exemption_max,
        ),
        Rule::new(
            "shoreline-substantial",
            Waterfront,
            PermitKind::ShorelineSubstantial,
            Definite,
            format!(
                "estimated cost above {} requires a substantial development permit",
                format_cents(exemption_max)
            ),
            move |facts| facts.estimated_cost_cents > exemption_max,
        ),
        Rule::new(
            "hpa-required",
            Waterfront,
            PermitKind::Hpa,
            Definite,
            "work in the water or below the ordinary high-water line needs hydraulic project approval",
            |facts| facts.in_water || facts.below_high_water_line,
        ),
        Rule::new(
            "federal-mooring",
            Waterfront,
            PermitKind::Section10,
            Likely,
            "mooring piles are structures in navigable waters",
            |facts| facts.has_improvement(ImprovementType::MooringPile),
        ),
        Rule::new(
            "federal-largescale",
            Waterfront,
            PermitKind::Section10,
            Likely,
            format!(
                "in-water work above {} typically triggers federal review",
                format_cents(federal_min)
            ),
            move |facts| facts.in_water && facts.estimated_cost_cents > federal_min,
        ),
        Rule::new(
            "federal-fill",
            Waterfront,
            PermitKind::Section404,
            Likely,
            "bulkhead work in the water places fill below the high-water mark",
            |facts| facts.in_water && facts.has_improvement(ImprovementType::Bulkhead),
        ),
        Rule::new(
            "federal-fill-shoreline",
            Waterfront,
            PermitKind::Section404,
            Conditional,
            "bulkheads within shoreline jurisdiction may involve regulated fill",
            |facts| {
                facts.within_shoreline_jurisdiction
                    && facts.has_improvement(ImprovementType::Bulkhead)
            },
        ),
        Rule::new(
            "solar-base",
            Solar,
            PermitKind::SolarBuildingPermit,
            Definite,
            "solar installations require a building permit",
            |_| true,
        ),
        Rule::new(
            "solar-electrical",
            Solar,
            PermitKind::ElectricalPermit,
            Definite,
            "grid-tied solar requires an electrical permit and inspection",
            |_| true,
        ),
        Rule::new(
            "solar-battery",
            Solar,
            PermitKind::FireCodeReview,
            Likely,
            "battery energy storage is reviewed against the fire code",
            |facts| facts.has_improvement(ImprovementType::BatteryStorage),
        ),
        Rule::new(
            "solar-ground-shoreline",
            Solar,
            PermitKind::ShorelineExemption,
            Conditional,
            "ground-mounted arrays within shoreline jurisdiction may need a shoreline exemption",
            |facts| {
                facts.within_shoreline_jurisdiction
                    && facts.has_improvement(ImprovementType::GroundMount)
            },
        ),
        Rule::new(
            "adu-base",
            Adu,
            PermitKind::AduBuildingPermit,
            Definite,
            "accessory dwelling units require a building permit",
            |_| true,
        ),
        Rule::new(
            "adu-septic",
            Adu,
            PermitKind::SepticPermit,
            Definite,
            "properties not on sewer need an on-site septic permit for the new unit",
            |facts| !facts.on_sewer,
        ),
        Rule::new(
            "adu-shoreline",
            Adu,
            PermitKind::AduShorelinePermit,
            Definite,
            "ADUs near the shoreline require shoreline review",
            |facts| facts.near_shoreline,
        ),
        Rule::new(
            "adu-existing",
            Adu,
            PermitKind::AduConditionalUse,
            Conditional,
            "a second ADU on the lot may require conditional use approval",
            |facts| facts.has_existing_adu,
        ),
    ]
}
