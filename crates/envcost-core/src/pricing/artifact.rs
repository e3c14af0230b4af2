//! Artifact-repository pricing: storage and requests past their free tiers,
//! transfer in and out, and a flat monthly base fee.

use super::{over_free_tier, PricingRates};
use crate::breakdown::CostBreakdown;
use crate::params::EnvironmentParameters;

pub const STORAGE_LABEL: &str = "CodeArtifact - Storage";
pub const REQUESTS_LABEL: &str = "CodeArtifact - Requests";
pub const TRANSFER_LABEL: &str = "CodeArtifact - Transfer";
pub const BASE_FEE_LABEL: &str = "CodeArtifact - Base Fee";

pub(crate) fn price(
    params: &EnvironmentParameters,
    rates: &PricingRates,
    breakdown: &mut CostBreakdown,
) {
    breakdown.insert(
        STORAGE_LABEL,
        over_free_tier(params.artifact_storage_gb, rates.free_storage_gb) * rates.storage_rate,
    );
    breakdown.insert(
        REQUESTS_LABEL,
        over_free_tier(params.artifact_requests, rates.free_requests) * rates.request_rate,
    );
    breakdown.insert(
        TRANSFER_LABEL,
        params.artifact_intra_gb * rates.intra_transfer_rate
            + params.artifact_outbound_gb * rates.outbound_transfer_rate,
    );
    breakdown.insert(BASE_FEE_LABEL, rates.artifact_base_fee);
}
