//! Biopsy sites.

use serde::{Deserialize, Serialize};

/// Anatomical site a biopsy was taken from.
///
/// The site decides which diagnosis, note and sub-location lists apply and which structured
/// findings the report prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiopsyLocation {
    Esophagus,
    Stomach,
    Duodenum,
    Ileum,
    Colon,
}

impl BiopsyLocation {
    pub const ALL: [BiopsyLocation; 5] = [
        BiopsyLocation::Esophagus,
        BiopsyLocation::Stomach,
        BiopsyLocation::Duodenum,
        BiopsyLocation::Ileum,
        BiopsyLocation::Colon,
    ];

    /// Turkish display name of the site.
    pub fn label(self) -> &'static str {
        match self {
            BiopsyLocation::Esophagus => "Özofagus",
            BiopsyLocation::Stomach => "Mide",
            BiopsyLocation::Duodenum => "Duodenum",
            BiopsyLocation::Ileum => "İleum",
            BiopsyLocation::Colon => "Kolon",
        }
    }

    /// Stable key used in configuration and session files.
    pub fn key(self) -> &'static str {
        match self {
            BiopsyLocation::Esophagus => "esophagus",
            BiopsyLocation::Stomach => "stomach",
            BiopsyLocation::Duodenum => "duodenum",
            BiopsyLocation::Ileum => "ileum",
            BiopsyLocation::Colon => "colon",
        }
    }
}

impl std::fmt::Display for BiopsyLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for BiopsyLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BiopsyLocation::ALL
            .into_iter()
            .find(|location| {
                location.key().eq_ignore_ascii_case(needle) || location.label() == needle
            })
            .ok_or_else(|| format!("unknown biopsy location '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_labels() {
        assert_eq!("stomach".parse(), Ok(BiopsyLocation::Stomach));
        assert_eq!("COLON".parse(), Ok(BiopsyLocation::Colon));
        assert_eq!("Özofagus".parse(), Ok(BiopsyLocation::Esophagus));
        assert!("rectum".parse::<BiopsyLocation>().is_err());
    }

    #[test]
    fn key_round_trips_through_display() {
        for location in BiopsyLocation::ALL {
            assert_eq!(location.to_string().parse(), Ok(location));
        }
    }
}
