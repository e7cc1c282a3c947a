//! Histochemical stain configuration.
//!
//! A [`StainConfig`] maps each site to the special stains routinely run on its biopsies. A site
//! without an entry has no routine stains. Two gastric stains are tied to a finding and are only
//! reported for biopsies where that finding was evaluated (see [`SpecialStain`]).

use crate::constants::{HP_STAIN_NAME, IM_STAIN_NAME};
use crate::severity::FindingKind;
use crate::BiopsyLocation;
use report_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stain names offered as shortcuts in the stain settings form.
pub const STAIN_NAME_SHORTCUTS: &[&str] = &[
    HP_STAIN_NAME,
    IM_STAIN_NAME,
    "PAS",
    "Giemsa",
    "Masson trikrom",
    "Kongo kırmızısı",
    "Retikülin",
    "Demir (Perls)",
];

/// One configured stain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StainEntry {
    pub name: NonEmptyText,
    /// Purpose phrase placed before the name, e.g. "Helicobacter pylori için".
    pub description: NonEmptyText,
}

impl StainEntry {
    pub fn new(name: impl AsRef<str>, description: impl AsRef<str>) -> Option<Self> {
        Some(Self {
            name: NonEmptyText::new(name).ok()?,
            description: NonEmptyText::new(description).ok()?,
        })
    }

    pub fn special(&self) -> Option<SpecialStain> {
        SpecialStain::from_name(self.name.as_str())
    }
}

/// Gastric stains that are only reported where their finding was evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialStain {
    /// Warthin-Starry, tied to the HP evaluation.
    HelicobacterPylori,
    /// PAS+AB, tied to the intestinal metaplasia evaluation.
    IntestinalMetaplasia,
}

impl SpecialStain {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case(HP_STAIN_NAME) {
            Some(SpecialStain::HelicobacterPylori)
        } else if name.eq_ignore_ascii_case(IM_STAIN_NAME) {
            Some(SpecialStain::IntestinalMetaplasia)
        } else {
            None
        }
    }

    pub fn finding(self) -> FindingKind {
        match self {
            SpecialStain::HelicobacterPylori => FindingKind::Hp,
            SpecialStain::IntestinalMetaplasia => FindingKind::IntestinalMetaplasia,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StainConfig {
    entries: BTreeMap<BiopsyLocation, Vec<StainEntry>>,
}

impl Default for StainConfig {
    /// Built-in defaults: the two finding-linked gastric stains and PAS for oesophageal fungi.
    fn default() -> Self {
        let mut config = Self::empty();
        config.add(BiopsyLocation::Esophagus, "PAS", "fungal etkenler için");
        config.add(BiopsyLocation::Stomach, HP_STAIN_NAME, "Helicobacter pylori için");
        config.add(BiopsyLocation::Stomach, IM_STAIN_NAME, "intestinal metaplazi için");
        config
    }
}

impl StainConfig {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Stains configured for `location`; empty when the site has no entry.
    pub fn stains_for(&self, location: BiopsyLocation) -> &[StainEntry] {
        self.entries
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Appends a stain. Blank name or description is ignored. Duplicates are allowed.
    pub fn add(&mut self, location: BiopsyLocation, name: &str, description: &str) -> bool {
        match StainEntry::new(name, description) {
            Some(entry) => {
                self.entries.entry(location).or_default().push(entry);
                true
            }
            None => {
                tracing::debug!(
                    location = %location,
                    "ignored stain with blank name or description"
                );
                false
            }
        }
    }

    /// Removes the stain at `index` of a site's list. Out-of-range indexes are ignored.
    pub fn remove(&mut self, location: BiopsyLocation, index: usize) -> bool {
        let Some(list) = self.entries.get_mut(&location) else {
            return false;
        };
        if index >= list.len() {
            return false;
        }
        list.remove(index);
        if list.is_empty() {
            self.entries.remove(&location);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (BiopsyLocation, &[StainEntry])> {
        self.entries.iter().map(|(loc, list)| (*loc, list.as_slice()))
    }
}

/// Input state of the stain settings form.
///
/// Shortcuts only fill in the name; nothing checks for an existing stain of the same name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StainDraft {
    pub name: String,
    pub description: String,
}

impl StainDraft {
    pub fn apply_shortcut(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Adds the draft to `config`. The inputs are cleared only when the stain was added.
    pub fn submit(&mut self, config: &mut StainConfig, location: BiopsyLocation) -> bool {
        let added = config.add(location, &self.name, &self.description);
        if added {
            *self = Self::default();
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_contains_gastric_special_stains() {
        let config = StainConfig::default();
        let specials: Vec<_> = config
            .stains_for(BiopsyLocation::Stomach)
            .iter()
            .filter_map(StainEntry::special)
            .collect();
        assert_eq!(
            specials,
            vec![SpecialStain::HelicobacterPylori, SpecialStain::IntestinalMetaplasia]
        );
        assert!(config.stains_for(BiopsyLocation::Colon).is_empty());
    }

    #[test]
    fn add_rejects_blank_fields_and_allows_duplicates() {
        let mut config = StainConfig::empty();
        assert!(!config.add(BiopsyLocation::Colon, " ", "amiloid için"));
        assert!(!config.add(BiopsyLocation::Colon, "Kongo kırmızısı", ""));
        assert!(config.add(BiopsyLocation::Colon, "Kongo kırmızısı", "amiloid için"));
        assert!(config.add(BiopsyLocation::Colon, "Kongo kırmızısı", "amiloid için"));
        assert_eq!(config.stains_for(BiopsyLocation::Colon).len(), 2);
    }

    #[test]
    fn remove_by_index() {
        let mut config = StainConfig::default();
        assert!(!config.remove(BiopsyLocation::Stomach, 7));
        assert!(config.remove(BiopsyLocation::Stomach, 0));
        let names: Vec<_> = config
            .stains_for(BiopsyLocation::Stomach)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec![IM_STAIN_NAME]);
        assert!(config.remove(BiopsyLocation::Esophagus, 0));
        assert!(!config.remove(BiopsyLocation::Esophagus, 0));
    }

    #[test]
    fn special_stain_names_match_case_insensitively() {
        assert_eq!(
            SpecialStain::from_name(" warthin-starry "),
            Some(SpecialStain::HelicobacterPylori)
        );
        assert_eq!(SpecialStain::from_name("pas+ab"), Some(SpecialStain::IntestinalMetaplasia));
        assert_eq!(SpecialStain::from_name("PAS"), None);
    }

    #[test]
    fn draft_clears_only_on_success() {
        let mut config = StainConfig::empty();
        let mut draft = StainDraft::default();
        draft.apply_shortcut("Giemsa");
        assert!(!draft.submit(&mut config, BiopsyLocation::Stomach));
        assert_eq!(draft.name, "Giemsa");

        draft.description = "Helicobacter pylori için".into();
        assert!(draft.submit(&mut config, BiopsyLocation::Stomach));
        assert_eq!(draft, StainDraft::default());
        assert_eq!(config.stains_for(BiopsyLocation::Stomach).len(), 1);
    }

    #[test]
    fn yaml_shape_is_a_location_map() {
        let yaml = "stomach:\n  - name: Giemsa\n    description: HP için\n";
        let config: StainConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.stains_for(BiopsyLocation::Stomach)[0].name.as_str(), "Giemsa");
    }
}
