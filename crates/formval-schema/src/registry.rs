//! Recognized-property registry.
//!
//! An ordered, append-only list of constraint keyword names. It is exposed
//! for callers to extend and query; matching and extraction do not consult
//! it.

/// Keywords recognized out of the box.
pub const DEFAULT_VALID_PROPERTIES: [&str; 3] = ["minLength", "maxLength", "format"];

/// Ordered list of recognized keyword names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProperties {
    names: Vec<String>,
}

impl Default for ValidProperties {
    fn default() -> Self {
        Self {
            names: DEFAULT_VALID_PROPERTIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ValidProperties {
    /// Read-only view of the current names, in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append names in order. Duplicates are kept.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if self.contains(&name) {
                tracing::debug!(%name, "appending already-recognized property");
            }
            self.names.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}
