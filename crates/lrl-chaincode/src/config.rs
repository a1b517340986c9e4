use std::path::Path;

use lrl_gate::GateConfig;
use lrl_types::KeyPolicy;
use serde::{Deserialize, Serialize};

use crate::error::{ChaincodeError, ChaincodeResult};

/// Contract configuration, loadable from TOML.
///
/// ```toml
/// key_policy = "reject-separator"
///
/// [gate]
/// owner_matching = "bijective"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaincodeConfig {
    /// Treatment of separator-bearing key components.
    pub key_policy: KeyPolicy,
    /// Reservation gate settings.
    pub gate: GateConfig,
}

impl ChaincodeConfig {
    /// Configuration reproducing the unchecked legacy behavior: raw key
    /// concatenation and cross-product owner matching.
    pub fn legacy() -> Self {
        Self {
            key_policy: KeyPolicy::Permissive,
            gate: GateConfig::cross_product(),
        }
    }

    pub fn from_toml_str(text: &str) -> ChaincodeResult<Self> {
        toml::from_str(text).map_err(|e| ChaincodeError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> ChaincodeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChaincodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ChaincodeResult<String> {
        toml::to_string(self).map_err(|e| ChaincodeError::Config(e.to_string()))
    }
}
