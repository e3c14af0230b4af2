//! Configuration: the environment roster with its default usage parameters,
//! the fixed annual items, and any rate overrides.
//!
//! Loaded once at startup from `envcost.toml` and passed explicitly; the
//! engine itself never reads ambient state.

use crate::params::EnvironmentParameters;
use crate::pricing::{default_fixed_annual, CostModel, PricingRates};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Cost comparison configuration, as read from `envcost.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// The environment that carries the fixed annual items.
    pub distinguished_environment: String,

    /// Environment roster, in display order.
    pub environments: Vec<EnvironmentConfig>,

    /// Fixed annual items: label -> annual USD.
    pub fixed_annual: BTreeMap<String, f64>,

    /// Unit-rate overrides.
    pub rates: PricingRates,
}

/// One named environment and its default usage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub name: String,
    #[serde(flatten)]
    pub parameters: EnvironmentParameters,
}

impl Default for CostConfig {
    fn default() -> Self {
        // The stock roster: identical pipeline and artifact usage, with
        // build and request volume varying by environment.
        let environments = [
            ("Production", 25_000.0),
            ("Development", 100_000.0),
            ("Testing", 25_000.0),
            ("QA", 50_000.0),
        ]
        .into_iter()
        .map(|(name, volume)| EnvironmentConfig {
            name: name.to_string(),
            parameters: EnvironmentParameters {
                pipelines: 300.0,
                executions_per_day: 10.0,
                minutes_per_execution: 5.0,
                transitions_per_execution: 2.0,
                builds_per_month: volume,
                build_duration_minutes: 5.0,
                artifact_storage_gb: 100.0,
                artifact_requests: volume,
                artifact_intra_gb: 0.0,
                artifact_outbound_gb: 100.0,
            },
        })
        .collect();

        Self {
            distinguished_environment: "Production".to_string(),
            environments,
            fixed_annual: default_fixed_annual(),
            rates: PricingRates::default(),
        }
    }
}

impl CostConfig {
    /// The cost model this configuration describes.
    pub fn cost_model(&self) -> CostModel {
        CostModel::new(self.rates.clone(), self.fixed_annual.clone())
    }

    /// Look an environment up by name.
    pub fn environment(&self, name: &str) -> Option<&EnvironmentConfig> {
        self.environments.iter().find(|env| env.name == name)
    }

    /// Environment names in roster order.
    pub fn environment_names(&self) -> Vec<String> {
        self.environments.iter().map(|env| env.name.clone()).collect()
    }

    pub fn is_distinguished(&self, name: &str) -> bool {
        self.distinguished_environment == name
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<CostConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: CostConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Generate a starter configuration file.
pub fn generate_default_config() -> String {
    r#"# envcost configuration
# Rates default to the published US East (N. Virginia) prices; override any
# of them under [rates].

distinguished_environment = "Production"

# Fixed annual items, applied to the distinguished environment only.
[fixed_annual]
GitLab = 73350.0
CheckMarx = 26265.5
Sonarqube = 32643.78

[[environments]]
name = "Production"
pipelines = 300
executions_per_day = 10
minutes_per_execution = 5
transitions_per_execution = 2
builds_per_month = 25000
build_duration_minutes = 5
artifact_storage_gb = 100
artifact_requests = 25000
artifact_intra_gb = 0.0
artifact_outbound_gb = 100.0

[[environments]]
name = "Development"
pipelines = 300
executions_per_day = 10
minutes_per_execution = 5
transitions_per_execution = 2
builds_per_month = 100000
build_duration_minutes = 5
artifact_storage_gb = 100
artifact_requests = 100000
artifact_intra_gb = 0.0
artifact_outbound_gb = 100.0

[[environments]]
name = "Testing"
pipelines = 300
executions_per_day = 10
minutes_per_execution = 5
transitions_per_execution = 2
builds_per_month = 25000
build_duration_minutes = 5
artifact_storage_gb = 100
artifact_requests = 25000
artifact_intra_gb = 0.0
artifact_outbound_gb = 100.0

[[environments]]
name = "QA"
pipelines = 300
executions_per_day = 10
minutes_per_execution = 5
transitions_per_execution = 2
builds_per_month = 50000
build_duration_minutes = 5
artifact_storage_gb = 100
artifact_requests = 50000
artifact_intra_gb = 0.0
artifact_outbound_gb = 100.0

# [rates]
# transition_rate = 0.002
# minute_rate = 0.002
# free_minutes = 100.0
# build_second_rate = 0.00002
# storage_rate = 0.05
# free_storage_gb = 2.0
# request_rate = 0.000005
# free_requests = 100000.0
# intra_transfer_rate = 0.02
# outbound_transfer_rate = 0.09
# artifact_base_fee = 0.60
"#
    .to_string()
}
