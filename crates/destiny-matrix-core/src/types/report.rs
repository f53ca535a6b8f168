//! Narrative report sections returned by the external generator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The narrative collaborator's output: named sections of generated text.
///
/// This core never calls the generator itself; it only formats the prompt
/// the generator consumes and audits the sections it returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeReport {
    /// Section name to generated text.
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
}

impl NarrativeReport {
    /// Create a report from section pairs.
    pub fn from_sections<I, K, V>(sections: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            sections: sections
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether the report carries no sections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sections() {
        let report = NarrativeReport::from_sections([("overview", "text")]);
        assert_eq!(report.sections.len(), 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(NarrativeReport::default().is_empty());
    }
}
