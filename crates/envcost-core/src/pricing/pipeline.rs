//! Pipeline-orchestration pricing: metered stage transitions and execution
//! minutes, with a monthly free-minute allowance.

use super::{over_free_tier, PricingRates};
use crate::breakdown::CostBreakdown;
use crate::params::EnvironmentParameters;

pub const TRANSITIONS_LABEL: &str = "CodePipeline - Transitions";
pub const MINUTES_LABEL: &str = "CodePipeline - Minutes";

pub(crate) fn price(
    params: &EnvironmentParameters,
    rates: &PricingRates,
    breakdown: &mut CostBreakdown,
) {
    // Monthly executions assume a 30-day billing month.
    let executions = params.pipelines * params.executions_per_day * 30.0;
    let transitions = executions * params.transitions_per_execution;
    let minutes = executions * params.minutes_per_execution;

    breakdown.insert(TRANSITIONS_LABEL, transitions * rates.transition_rate);
    breakdown.insert(
        MINUTES_LABEL,
        over_free_tier(minutes, rates.free_minutes) * rates.minute_rate,
    );
}
