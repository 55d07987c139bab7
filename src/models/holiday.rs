//! Public holidays

use serde::{Deserialize, Serialize};

/// A public holiday as listed by the holiday provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    /// ISO date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// Name in the country's language
    pub local_name: Option<String>,
    /// English name
    pub name: Option<String>,
    pub country_code: Option<String>,
    /// Whether the holiday applies to the whole country
    pub global: Option<bool>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl Holiday {
    pub fn new<D: Into<String>, N: Into<String>>(date: D, local_name: N) -> Self {
        Self {
            date: date.into(),
            local_name: Some(local_name.into()),
            ..Self::default()
        }
    }

    /// Local name, then English name, then a placeholder
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.local_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unnamed holiday")
    }
}
