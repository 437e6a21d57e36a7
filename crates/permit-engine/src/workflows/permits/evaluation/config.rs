use serde::{Deserialize, Serialize};

/// Highest project cost, in cents, that still qualifies for a shoreline
/// exemption ($7,047.00). Costs equal to this value are exempt.
pub const SHORELINE_EXEMPTION_MAX_CENTS: u64 = 704_700;

/// In-water project cost, in cents, above which a federal Section 10 review
/// is likely ($50,000.00).
pub const FEDERAL_LARGESCALE_MIN_CENTS: u64 = 5_000_000;

/// Cost thresholds the rule catalogue is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitThresholds {
    pub shoreline_exemption_max_cents: u64,
    pub federal_largescale_min_cents: u64,
}

impl Default for PermitThresholds {
    fn default() -> Self {
        Self {
            shoreline_exemption_max_cents: SHORELINE_EXEMPTION_MAX_CENTS,
            federal_largescale_min_cents: FEDERAL_LARGESCALE_MIN_CENTS,
        }
    }
}
