use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Separator placed between the four components of a composite key.
pub const KEY_SEPARATOR: char = '-';

/// How key derivation treats components that would make a key ambiguous.
///
/// The raw scheme concatenates components with [`KEY_SEPARATOR`] and performs
/// no escaping, so `("a-b", "c")` and `("a", "b-c")` collide. The default
/// policy refuses such components instead of storing under an ambiguous key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyPolicy {
    /// Reject empty components and components containing the separator.
    #[default]
    RejectSeparator,
    /// Plain concatenation, ambiguity included.
    Permissive,
}

/// Composite key under which a land register is stored.
///
/// Built from `objectType`, `districtCourt`, `registryDistrict` and
/// `sheetNumber`, in that order. Deriving a key from a retrieved document's
/// own fields reproduces the key it was stored under.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Derive the composite key for the given components.
    pub fn derive(
        object_type: &str,
        district_court: &str,
        registry_district: &str,
        sheet_number: &str,
        policy: KeyPolicy,
    ) -> Result<Self, TypeError> {
        let components = [
            ("objectType", object_type),
            ("districtCourt", district_court),
            ("registryDistrict", registry_district),
            ("sheetNumber", sheet_number),
        ];

        if policy == KeyPolicy::RejectSeparator {
            for (component, value) in components {
                if value.is_empty() {
                    return Err(TypeError::EmptyKeyComponent { component });
                }
                if value.contains(KEY_SEPARATOR) {
                    return Err(TypeError::SeparatorInKeyComponent {
                        component,
                        separator: KEY_SEPARATOR,
                        value: value.to_string(),
                    });
                }
            }
        }

        let mut key = String::with_capacity(
            components.iter().map(|(_, v)| v.len() + 1).sum::<usize>(),
        );
        for (i, (_, value)) in components.iter().enumerate() {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(value);
        }
        Ok(Self(key))
    }

    /// Wrap a caller-supplied key without validation (lookups by id).
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordKey({})", self.0)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
