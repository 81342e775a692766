use core::fmt;

use serde::{Deserialize, Serialize};

/// A single requested parameter mutation: set `key` in `subspace` to `value`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParamChange {
    pub subspace: String,
    pub key: String,
    pub value: String,
}

impl ParamChange {
    pub fn new(
        subspace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            subspace: subspace.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn subspace(&self) -> &str {
        &self.subspace
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value as uppercase hex.
    ///
    /// Values that are already hex strings are shown as the bytes they encode,
    /// so `"0a"` renders as `0A`. Anything else is shown as the hex of its raw
    /// bytes. This departs from printing the raw bytes of every value (which
    /// would render `"0a"` as `3061`), and the mapping is not injective: `"0a"`,
    /// `"0A"` and `"\n"` all render as `0A`.
    pub fn value_hex(&self) -> String {
        match hex::decode(&self.value) {
            Ok(bytes) => hex::encode_upper(bytes),
            Err(_) => hex::encode_upper(self.value.as_bytes()),
        }
    }
}

/// Renders the change as TOML (`subspace = "..."` and so on), not the YAML
/// used by other implementations of this proposal type.
impl fmt::Display for ParamChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out = toml::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&out)
    }
}
