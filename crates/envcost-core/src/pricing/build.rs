//! Build-service pricing: per-second billing against an average build
//! duration given in minutes.

use super::PricingRates;
use crate::breakdown::CostBreakdown;
use crate::params::EnvironmentParameters;

pub const BUILD_LABEL: &str = "CodeBuild";

pub(crate) fn price(
    params: &EnvironmentParameters,
    rates: &PricingRates,
    breakdown: &mut CostBreakdown,
) {
    let build_seconds = params.build_duration_minutes * 60.0;
    breakdown.insert(
        BUILD_LABEL,
        params.builds_per_month * build_seconds * rates.build_second_rate,
    );
}
