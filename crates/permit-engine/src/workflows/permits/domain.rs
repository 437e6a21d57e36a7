use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level project category selecting which permitting rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowTrack {
    Waterfront,
    Solar,
    Adu,
}

impl WorkflowTrack {
    pub const fn ordered() -> [WorkflowTrack; 3] {
        [Self::Waterfront, Self::Solar, Self::Adu]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Waterfront => "waterfront",
            Self::Solar => "solar",
            Self::Adu => "adu",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Waterfront => "Waterfront",
            Self::Solar => "Solar",
            Self::Adu => "Accessory Dwelling Unit",
        }
    }

    /// Permit every project on this track needs regardless of its attributes.
    pub const fn base_permit(self) -> PermitKind {
        match self {
            Self::Waterfront => PermitKind::CwaLicense,
            Self::Solar => PermitKind::SolarBuildingPermit,
            Self::Adu => PermitKind::AduBuildingPermit,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_tag(value).as_str() {
            "waterfront" => Some(Self::Waterfront),
            "solar" => Some(Self::Solar),
            "adu" | "accessory_dwelling_unit" => Some(Self::Adu),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    #[default]
    NewConstruction,
    Modification,
    RepairMaintenance,
    ReplaceStructure,
}

impl ProjectCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewConstruction => "New construction",
            Self::Modification => "Modification",
            Self::RepairMaintenance => "Repair / maintenance",
            Self::ReplaceStructure => "Replace structure",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_tag(value).as_str() {
            "new_construction" | "new" => Some(Self::NewConstruction),
            "modification" => Some(Self::Modification),
            "repair_maintenance" | "repair" | "maintenance" => Some(Self::RepairMaintenance),
            "replace_structure" | "replacement" => Some(Self::ReplaceStructure),
            _ => None,
        }
    }
}

/// Improvement tags captured on the project details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementType {
    Dock,
    Pier,
    Float,
    BoatLift,
    MooringPile,
    MooringBuoy,
    Bulkhead,
    Boathouse,
    Ramp,
    RooftopArray,
    GroundMount,
    BatteryStorage,
    DetachedAdu,
    AttachedAdu,
    GarageConversion,
    InteriorConversion,
}

impl ImprovementType {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dock => "dock",
            Self::Pier => "pier",
            Self::Float => "float",
            Self::BoatLift => "boat_lift",
            Self::MooringPile => "mooring_pile",
            Self::MooringBuoy => "mooring_buoy",
            Self::Bulkhead => "bulkhead",
            Self::Boathouse => "boathouse",
            Self::Ramp => "ramp",
            Self::RooftopArray => "rooftop_array",
            Self::GroundMount => "ground_mount",
            Self::BatteryStorage => "battery_storage",
            Self::DetachedAdu => "detached_adu",
            Self::AttachedAdu => "attached_adu",
            Self::GarageConversion => "garage_conversion",
            Self::InteriorConversion => "interior_conversion",
        }
    }

    /// The only track on which this improvement is meaningful.
    pub const fn track(self) -> WorkflowTrack {
        match self {
            Self::Dock
            | Self::Pier
            | Self::Float
            | Self::BoatLift
            | Self::MooringPile
            | Self::MooringBuoy
            | Self::Bulkhead
            | Self::Boathouse
            | Self::Ramp => WorkflowTrack::Waterfront,
            Self::RooftopArray | Self::GroundMount | Self::BatteryStorage => WorkflowTrack::Solar,
            Self::DetachedAdu
            | Self::AttachedAdu
            | Self::GarageConversion
            | Self::InteriorConversion => WorkflowTrack::Adu,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = normalize_tag(value);
        Self::all()
            .into_iter()
            .find(|improvement| improvement.id() == normalized)
    }

    pub const fn all() -> [ImprovementType; 16] {
        [
            Self::Dock,
            Self::Pier,
            Self::Float,
            Self::BoatLift,
            Self::MooringPile,
            Self::MooringBuoy,
            Self::Bulkhead,
            Self::Boathouse,
            Self::Ramp,
            Self::RooftopArray,
            Self::GroundMount,
            Self::BatteryStorage,
            Self::DetachedAdu,
            Self::AttachedAdu,
            Self::GarageConversion,
            Self::InteriorConversion,
        ]
    }
}

impl fmt::Display for ImprovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Agencies that own at least one permit in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agency {
    CascadeWaterAlliance,
    CityPlanning,
    FishAndWildlife,
    ArmyCorps,
    CityBuilding,
    LaborAndIndustries,
    FireMarshal,
    CountyHealth,
}

impl Agency {
    pub const fn id(self) -> &'static str {
        match self {
            Self::CascadeWaterAlliance => "cascade_water_alliance",
            Self::CityPlanning => "city_planning",
            Self::FishAndWildlife => "fish_and_wildlife",
            Self::ArmyCorps => "army_corps",
            Self::CityBuilding => "city_building",
            Self::LaborAndIndustries => "labor_and_industries",
            Self::FireMarshal => "fire_marshal",
            Self::CountyHealth => "county_health",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::CascadeWaterAlliance => "CWA",
            Self::CityPlanning => "PCD",
            Self::FishAndWildlife => "WDFW",
            Self::ArmyCorps => "USACE",
            Self::CityBuilding => "BLD",
            Self::LaborAndIndustries => "L&I",
            Self::FireMarshal => "FM",
            Self::CountyHealth => "HEALTH",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::CascadeWaterAlliance => "Cascade Water Alliance",
            Self::CityPlanning => "City Planning & Community Development",
            Self::FishAndWildlife => "Washington Department of Fish & Wildlife",
            Self::ArmyCorps => "U.S. Army Corps of Engineers",
            Self::CityBuilding => "City Building Department",
            Self::LaborAndIndustries => "Washington Department of Labor & Industries",
            Self::FireMarshal => "Fire Marshal",
            Self::CountyHealth => "County Health Department",
        }
    }
}

/// Canonical permit enumeration shared by the rule set, summaries, and any
/// template selection downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitKind {
    CwaLicense,
    ShorelineExemption,
    ShorelineSubstantial,
    Hpa,
    #[serde(rename = "section_10")]
    Section10,
    #[serde(rename = "section_404")]
    Section404,
    SolarBuildingPermit,
    ElectricalPermit,
    FireCodeReview,
    AduBuildingPermit,
    SepticPermit,
    AduShorelinePermit,
    AduConditionalUse,
}

impl PermitKind {
    pub const fn all() -> [PermitKind; 13] {
        [
            Self::CwaLicense,
            Self::ShorelineExemption,
            Self::ShorelineSubstantial,
            Self::Hpa,
            Self::Section10,
            Self::Section404,
            Self::SolarBuildingPermit,
            Self::ElectricalPermit,
            Self::FireCodeReview,
            Self::AduBuildingPermit,
            Self::SepticPermit,
            Self::AduShorelinePermit,
            Self::AduConditionalUse,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::CwaLicense => "cwa_license",
            Self::ShorelineExemption => "shoreline_exemption",
            Self::ShorelineSubstantial => "shoreline_substantial",
            Self::Hpa => "hpa",
            Self::Section10 => "section_10",
            Self::Section404 => "section_404",
            Self::SolarBuildingPermit => "solar_building_permit",
            Self::ElectricalPermit => "electrical_permit",
            Self::FireCodeReview => "fire_code_review",
            Self::AduBuildingPermit => "adu_building_permit",
            Self::SepticPermit => "septic_permit",
            Self::AduShorelinePermit => "adu_shoreline_permit",
            Self::AduConditionalUse => "adu_conditional_use",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CwaLicense => "CWA Reservoir License",
            Self::ShorelineExemption => "Shoreline Exemption",
            Self::ShorelineSubstantial => "Shoreline Substantial Development Permit",
            Self::Hpa => "Hydraulic Project Approval",
            Self::Section10 => "Section 10 (Rivers and Harbors Act)",
            Self::Section404 => "Section 404 (Clean Water Act)",
            Self::SolarBuildingPermit => "Solar Building Permit",
            Self::ElectricalPermit => "Electrical Permit",
            Self::FireCodeReview => "Energy Storage Fire Code Review",
            Self::AduBuildingPermit => "ADU Building Permit",
            Self::SepticPermit => "On-Site Septic Permit",
            Self::AduShorelinePermit => "ADU Shoreline Permit",
            Self::AduConditionalUse => "ADU Conditional Use Review",
        }
    }

    /// Registered owning agency; rules must agree with this entry.
    pub const fn agency(self) -> Agency {
        match self {
            Self::CwaLicense => Agency::CascadeWaterAlliance,
            Self::ShorelineExemption
            | Self::ShorelineSubstantial
            | Self::AduShorelinePermit
            | Self::AduConditionalUse => Agency::CityPlanning,
            Self::Hpa => Agency::FishAndWildlife,
            Self::Section10 | Self::Section404 => Agency::ArmyCorps,
            Self::SolarBuildingPermit | Self::AduBuildingPermit => Agency::CityBuilding,
            Self::ElectricalPermit => Agency::LaborAndIndustries,
            Self::FireCodeReview => Agency::FireMarshal,
            Self::SepticPermit => Agency::CountyHealth,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = normalize_tag(value);
        Self::all().into_iter().find(|permit| permit.id() == normalized)
    }
}

impl fmt::Display for PermitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How certain the engine is that a permit applies. Ordered so that
/// `Definite` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Conditional,
    Likely,
    Definite,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Definite => "Definitely required",
            Self::Likely => "Likely required",
            Self::Conditional => "Conditional",
        }
    }
}

/// Lowercases, collapses whitespace, and folds spaces and dashes to `_` so
/// form labels such as "Mooring Pile" match registry ids.
pub(crate) fn normalize_tag(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    collapsed.replace('-', "_").to_ascii_lowercase()
}
