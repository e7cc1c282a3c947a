//! Biopsy records.
//!
//! A [`Biopsy`] is one physical specimen in the report. Records are created with site-specific
//! defaults and are then changed only through [`crate::editor::BiopsyEdit`] values dispatched by
//! the session.

use crate::catalog;
use crate::derivation::derive_diagnosis;
use crate::location::BiopsyLocation;
use crate::severity::Findings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Opaque identifier of a biopsy record, stable for the lifetime of the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiopsyId(Uuid);

impl BiopsyId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BiopsyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BiopsyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

// ============================================================================
// Location feature bags
// ============================================================================

/// Canned oesophageal observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EsophagusFeature {
    BasalCellHyperplasia,
    PapillaryElongation,
    DilatedIntercellularSpaces,
    IntraepithelialEosinophils,
    GobletCells,
}

impl EsophagusFeature {
    pub const ALL: [EsophagusFeature; 5] = [
        EsophagusFeature::BasalCellHyperplasia,
        EsophagusFeature::PapillaryElongation,
        EsophagusFeature::DilatedIntercellularSpaces,
        EsophagusFeature::IntraepithelialEosinophils,
        EsophagusFeature::GobletCells,
    ];

    pub fn phrase(self) -> &'static str {
        match self {
            EsophagusFeature::BasalCellHyperplasia => "Bazal hücre hiperplazisi",
            EsophagusFeature::PapillaryElongation => "Papiller uzama",
            EsophagusFeature::DilatedIntercellularSpaces => "Hücreler arası aralıklarda genişleme",
            EsophagusFeature::IntraepithelialEosinophils => "İntraepitelyal eozinofiller",
            EsophagusFeature::GobletCells => "Goblet hücreleri",
        }
    }
}

/// Canned gastric observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StomachFeature {
    FoveolarHyperplasia,
    LymphoidFollicles,
    SurfaceErosion,
    EdemaAndCongestion,
}

impl StomachFeature {
    pub const ALL: [StomachFeature; 4] = [
        StomachFeature::FoveolarHyperplasia,
        StomachFeature::LymphoidFollicles,
        StomachFeature::SurfaceErosion,
        StomachFeature::EdemaAndCongestion,
    ];

    pub fn phrase(self) -> &'static str {
        match self {
            StomachFeature::FoveolarHyperplasia => "Foveolar hiperplazi",
            StomachFeature::LymphoidFollicles => "Lenfoid folikül oluşumu",
            StomachFeature::SurfaceErosion => "Yüzey epitelinde erozyon",
            StomachFeature::EdemaAndCongestion => "Lamina propriada ödem ve konjesyon",
        }
    }
}

/// Endocrine cell pattern seen on synaptophysin immunostaining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynaptophysinPattern {
    NoHyperplasia,
    Linear,
    Micronodular,
}

impl SynaptophysinPattern {
    pub fn phrase(self) -> &'static str {
        match self {
            SynaptophysinPattern::NoHyperplasia => {
                "Sinaptofizin ile endokrin hücre hiperplazisi izlenmemiştir"
            }
            SynaptophysinPattern::Linear => "Sinaptofizin ile lineer endokrin hücre hiperplazisi",
            SynaptophysinPattern::Micronodular => {
                "Sinaptofizin ile mikronodüler endokrin hücre hiperplazisi"
            }
        }
    }
}

/// Duodenal observations.
///
/// These have no structured report line of their own: a duodenal feature is "on" exactly when
/// its phrase is present in the record's notes, so toggling it toggles the note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuodenumFeature {
    BrunnerGlandHyperplasia,
    GastricMetaplasia,
    IntraepithelialLymphocytosis,
}

impl DuodenumFeature {
    pub const ALL: [DuodenumFeature; 3] = [
        DuodenumFeature::BrunnerGlandHyperplasia,
        DuodenumFeature::GastricMetaplasia,
        DuodenumFeature::IntraepithelialLymphocytosis,
    ];

    pub fn phrase(self) -> &'static str {
        match self {
            DuodenumFeature::BrunnerGlandHyperplasia => "Brunner bezi hiperplazisi",
            DuodenumFeature::GastricMetaplasia => "Yüzey epitelinde gastrik foveolar metaplazi",
            DuodenumFeature::IntraepithelialLymphocytosis => "Artmış intraepitelyal lenfositler",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EsophagusFeatures {
    pub enabled: BTreeSet<EsophagusFeature>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StomachFeatures {
    pub enabled: BTreeSet<StomachFeature>,
    pub synaptophysin: Option<SynaptophysinPattern>,
}

/// Site-specific feature bag of a record. Sites without structured features carry `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationFeatures {
    Esophagus(EsophagusFeatures),
    Stomach(StomachFeatures),
    None,
}

impl LocationFeatures {
    pub fn for_location(location: BiopsyLocation) -> Self {
        match location {
            BiopsyLocation::Esophagus => LocationFeatures::Esophagus(EsophagusFeatures::default()),
            BiopsyLocation::Stomach => LocationFeatures::Stomach(StomachFeatures::default()),
            BiopsyLocation::Duodenum | BiopsyLocation::Ileum | BiopsyLocation::Colon => {
                LocationFeatures::None
            }
        }
    }
}

// ============================================================================
// Biopsy
// ============================================================================

/// One structured specimen entry of the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Biopsy {
    pub id: BiopsyId,
    pub location: BiopsyLocation,
    /// Ordered sub-site labels. The first entry is the main location used for grouping.
    pub sub_locations: Vec<String>,
    /// 1-based position at creation time. Display numbering uses list order instead.
    pub sequence: usize,
    pub findings: Findings,
    pub diagnosis: String,
    pub notes: Vec<String>,
    /// Ad-hoc stains for this specimen only.
    pub custom_stains: Vec<String>,
    pub eosinophil_count: String,
    pub features: LocationFeatures,
}

impl Biopsy {
    /// Creates a record with the defaults of its site.
    ///
    /// The derivation rules run once on the fresh record so a new gastric biopsy already reads
    /// as normal mucosa.
    pub fn new(location: BiopsyLocation, sequence: usize) -> Self {
        let findings = match location {
            BiopsyLocation::Stomach => Findings::default(),
            _ => Findings::without_special_evaluations(),
        };

        derive_diagnosis(Self {
            id: BiopsyId::new(),
            location,
            sub_locations: vec![catalog::default_sub_location(location).to_string()],
            sequence,
            findings,
            diagnosis: catalog::default_diagnosis(location)
                .map(str::to_string)
                .unwrap_or_default(),
            notes: Vec::new(),
            custom_stains: Vec::new(),
            eosinophil_count: String::new(),
            features: LocationFeatures::for_location(location),
        })
    }

    /// First sub-location, trimmed, or an empty string when none is set.
    pub fn main_location(&self) -> &str {
        self.sub_locations
            .first()
            .map(|s| s.trim())
            .unwrap_or_default()
    }

    /// Sub-locations after the main one.
    pub fn additional_locations(&self) -> &[String] {
        self.sub_locations.get(1..).unwrap_or_default()
    }

    /// Grouping key used for "(i/N)" numbering.
    pub fn group_key(&self) -> (BiopsyLocation, &str) {
        (self.location, self.main_location())
    }

    pub fn has_duodenum_feature(&self, feature: DuodenumFeature) -> bool {
        self.location == BiopsyLocation::Duodenum
            && self.notes.iter().any(|note| note == feature.phrase())
    }
}
