use serde::{Deserialize, Serialize};

/// How owner lists are matched between a stored record and a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnerMatching {
    /// Owner lists must be equal as sets keyed by identity number: same
    /// length, no duplicate identity numbers, every owner matched exactly
    /// once with equal fields.
    #[default]
    Bijective,
    /// Equal length, and every pair sharing an identity number must agree.
    /// Owners present on only one side are not detected.
    CrossProduct,
}

/// Configuration for the reservation gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Owner matching strategy used by the owners stage.
    pub owner_matching: OwnerMatching,
}

impl GateConfig {
    /// Configuration reproducing the legacy cross-product owner match.
    pub fn cross_product() -> Self {
        Self {
            owner_matching: OwnerMatching::CrossProduct,
        }
    }
}
