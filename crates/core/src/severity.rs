//! Graded clinical findings.
//!
//! Stomach biopsies carry five graded observations. Each observation is either graded on the
//! usual semi-quantitative scale or explicitly marked as not evaluated.

use serde::{Deserialize, Serialize};

/// A graded finding value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Absent (`-`).
    #[default]
    #[serde(rename = "-")]
    Absent,
    /// Mild (`+`).
    #[serde(rename = "+")]
    Mild,
    /// Moderate (`++`).
    #[serde(rename = "++")]
    Moderate,
    /// Marked (`+++`).
    #[serde(rename = "+++")]
    Marked,
    /// Not evaluated (`Yapılmadı`).
    #[serde(rename = "Yapılmadı")]
    NotDone,
}

impl Severity {
    /// Every value in the order the form offers them.
    pub const ALL: [Severity; 5] = [
        Severity::Absent,
        Severity::Mild,
        Severity::Moderate,
        Severity::Marked,
        Severity::NotDone,
    ];

    /// Report symbol for this value.
    pub fn symbol(self) -> &'static str {
        match self {
            Severity::Absent => "-",
            Severity::Mild => "+",
            Severity::Moderate => "++",
            Severity::Marked => "+++",
            Severity::NotDone => "Yapılmadı",
        }
    }

    /// True for `+`, `++` and `+++`.
    pub fn is_graded(self) -> bool {
        matches!(self, Severity::Mild | Severity::Moderate | Severity::Marked)
    }

    pub fn is_evaluated(self) -> bool {
        self != Severity::NotDone
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.symbol() == s.trim())
            .ok_or_else(|| format!("unknown severity '{s}'"))
    }
}

/// The five graded observations of a gastric biopsy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Inflammation,
    Activation,
    Atrophy,
    Hp,
    IntestinalMetaplasia,
}

impl FindingKind {
    /// Report order of the findings.
    pub const ALL: [FindingKind; 5] = [
        FindingKind::Inflammation,
        FindingKind::Activation,
        FindingKind::Atrophy,
        FindingKind::Hp,
        FindingKind::IntestinalMetaplasia,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FindingKind::Inflammation => "İnflamasyon",
            FindingKind::Activation => "Aktivasyon",
            FindingKind::Atrophy => "Atrofi",
            FindingKind::Hp => "HP",
            FindingKind::IntestinalMetaplasia => "İntestinal metaplazi",
        }
    }
}

/// Graded findings of one biopsy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Findings {
    #[serde(default)]
    pub inflammation: Severity,
    #[serde(default)]
    pub activation: Severity,
    #[serde(default)]
    pub atrophy: Severity,
    #[serde(default)]
    pub hp: Severity,
    #[serde(default)]
    pub intestinal_metaplasia: Severity,
}

impl Findings {
    /// Findings with HP and intestinal metaplasia marked as not evaluated.
    pub fn without_special_evaluations() -> Self {
        Self {
            hp: Severity::NotDone,
            intestinal_metaplasia: Severity::NotDone,
            ..Self::default()
        }
    }

    pub fn get(&self, kind: FindingKind) -> Severity {
        match kind {
            FindingKind::Inflammation => self.inflammation,
            FindingKind::Activation => self.activation,
            FindingKind::Atrophy => self.atrophy,
            FindingKind::Hp => self.hp,
            FindingKind::IntestinalMetaplasia => self.intestinal_metaplasia,
        }
    }

    pub fn set(&mut self, kind: FindingKind, value: Severity) {
        let slot = match kind {
            FindingKind::Inflammation => &mut self.inflammation,
            FindingKind::Activation => &mut self.activation,
            FindingKind::Atrophy => &mut self.atrophy,
            FindingKind::Hp => &mut self.hp,
            FindingKind::IntestinalMetaplasia => &mut self.intestinal_metaplasia,
        };
        *slot = value;
    }

    /// True when inflammation or activation carries a grade.
    pub fn has_active_gastritis(&self) -> bool {
        self.inflammation.is_graded() || self.activation.is_graded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plus_grades_count_as_graded() {
        assert!(!Severity::Absent.is_graded());
        assert!(Severity::Mild.is_graded());
        assert!(Severity::Moderate.is_graded());
        assert!(Severity::Marked.is_graded());
        assert!(!Severity::NotDone.is_graded());
    }

    #[test]
    fn parses_symbols() {
        assert_eq!("++".parse::<Severity>(), Ok(Severity::Moderate));
        assert_eq!("Yapılmadı".parse::<Severity>(), Ok(Severity::NotDone));
        assert!("++++".parse::<Severity>().is_err());
    }

    #[test]
    fn serialises_as_report_symbols() {
        let yaml = serde_yaml::to_string(&Severity::NotDone).expect("serialise");
        assert_eq!(yaml.trim(), "Yapılmadı");
        let parsed: Severity = serde_yaml::from_str("'+++'").expect("parse");
        assert_eq!(parsed, Severity::Marked);
    }

    #[test]
    fn set_and_get_address_the_same_field() {
        let mut findings = Findings::default();
        for kind in FindingKind::ALL {
            findings.set(kind, Severity::Moderate);
            assert_eq!(findings.get(kind), Severity::Moderate);
        }
    }

    #[test]
    fn active_gastritis_requires_inflammation_or_activation() {
        let mut findings = Findings::default();
        findings.atrophy = Severity::Marked;
        assert!(!findings.has_active_gastritis());
        findings.activation = Severity::Mild;
        assert!(findings.has_active_gastritis());
    }
}
