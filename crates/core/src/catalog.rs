//! Static option tables consumed by the editor and the derivation rules.
//!
//! Nothing here is user-editable. Users may still type diagnoses, notes and sub-locations that
//! do not appear in these lists.

use crate::constants::{
    BULB_LABEL, DX_ACTIVE_CHRONIC_GASTRITIS, DX_CHRONIC_GASTRITIS, DX_NORMAL_GASTRIC,
};
use crate::location::BiopsyLocation;

/// Canonical report wording for a duodenal (sub-location, diagnosis) selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuodenumMapping {
    pub sub_location: &'static str,
    pub diagnosis: &'static str,
    pub report_diagnosis: &'static str,
    pub notes: &'static [&'static str],
}

const DUODENUM_MAPPINGS: &[DuodenumMapping] = &[
    DuodenumMapping {
        sub_location: BULB_LABEL,
        diagnosis: "Normal",
        report_diagnosis: "Özellik göstermeyen bulbus mukozası",
        notes: &["Villus yapısı korunmuştur"],
    },
    DuodenumMapping {
        sub_location: BULB_LABEL,
        diagnosis: "Peptik duodenit",
        report_diagnosis: "Peptik duodenit ile uyumlu bulgular",
        notes: &[
            "Yüzey epitelinde gastrik foveolar metaplazi",
            "Lamina propriada artmış mononükleer iltihabi hücreler",
        ],
    },
    DuodenumMapping {
        sub_location: BULB_LABEL,
        diagnosis: "Aktif duodenit",
        report_diagnosis: "Kronik aktif duodenit (bulbit)",
        notes: &[
            "Yüzey ve kript epitelinde nötrofil infiltrasyonu",
            "Brunner bezi hiperplazisi",
        ],
    },
    DuodenumMapping {
        sub_location: "Duodenum",
        diagnosis: "Normal",
        report_diagnosis: "Özellik göstermeyen duodenum mukozası",
        notes: &[
            "Villus/kript oranı normaldir",
            "İntraepitelyal lenfosit sayısı normal sınırlardadır",
        ],
    },
    DuodenumMapping {
        sub_location: "Duodenum",
        diagnosis: "Marsh 1",
        report_diagnosis: "Artmış intraepitelyal lenfositler (Marsh tip 1)",
        notes: &[
            "Villus yapısı korunmuştur",
            "100 epitel hücresinde 25'in üzerinde intraepitelyal lenfosit izlenmiştir",
            "Klinik ve serolojik korelasyon önerilir",
        ],
    },
    DuodenumMapping {
        sub_location: "Duodenum",
        diagnosis: "Marsh 3a",
        report_diagnosis: "Hafif villöz atrofi ile birlikte artmış intraepitelyal lenfositler (Marsh tip 3a)",
        notes: &[
            "Kript hiperplazisi",
            "100 epitel hücresinde 25'in üzerinde intraepitelyal lenfosit izlenmiştir",
            "Klinik ve serolojik korelasyon önerilir",
        ],
    },
    DuodenumMapping {
        sub_location: "Duodenum",
        diagnosis: "Marsh 3c",
        report_diagnosis: "Total villöz atrofi ile birlikte artmış intraepitelyal lenfositler (Marsh tip 3c)",
        notes: &[
            "Kript hiperplazisi",
            "100 epitel hücresinde 25'in üzerinde intraepitelyal lenfosit izlenmiştir",
            "Klinik ve serolojik korelasyon önerilir",
        ],
    },
];

/// Looks up the canonical wording for a duodenal selection.
///
/// `sub_location` is compared against the main (first) sub-location of the biopsy.
pub fn duodenum_mapping(sub_location: &str, diagnosis: &str) -> Option<&'static DuodenumMapping> {
    let sub_location = sub_location.trim();
    let diagnosis = diagnosis.trim();
    DUODENUM_MAPPINGS
        .iter()
        .find(|m| m.sub_location == sub_location && m.diagnosis == diagnosis)
}

pub fn duodenum_mappings() -> &'static [DuodenumMapping] {
    DUODENUM_MAPPINGS
}

/// Sub-location labels offered for a site; the first one is the creation default.
pub fn sub_location_options(location: BiopsyLocation) -> &'static [&'static str] {
    match location {
        BiopsyLocation::Esophagus => &[
            "Distal özofagus",
            "Orta özofagus",
            "Proksimal özofagus",
            "Gastroözofageal bileşke",
        ],
        BiopsyLocation::Stomach => &[
            "Antrum",
            "Korpus",
            "Fundus",
            "Kardiya",
            "İnsisura angularis",
            "Pilor",
        ],
        BiopsyLocation::Duodenum => &["Duodenum", BULB_LABEL, "Duodenum 2. kıta"],
        BiopsyLocation::Ileum => &["Terminal ileum", "İleoçekal valv"],
        BiopsyLocation::Colon => &[
            "Çekum",
            "Çıkan kolon",
            "Transvers kolon",
            "İnen kolon",
            "Sigmoid kolon",
            "Rektum",
        ],
    }
}

pub fn default_sub_location(location: BiopsyLocation) -> &'static str {
    sub_location_options(location)[0]
}

/// Diagnosis choices offered for a site.
///
/// For the duodenum the choices are the keys of the mapping table, so picking one rewrites the
/// record to the canonical wording.
pub fn diagnosis_options(location: BiopsyLocation) -> Vec<&'static str> {
    match location {
        BiopsyLocation::Esophagus => vec![
            "Özellik göstermeyen skuamöz epitel",
            "Reflü özofajit ile uyumlu bulgular",
            "Eozinofilik özofajit ile uyumlu bulgular",
            "Barrett özofagusu (intestinal metaplazi)",
            "Kandida özofajiti",
            "Skuamöz papillom",
        ],
        BiopsyLocation::Stomach => vec![
            DX_NORMAL_GASTRIC,
            DX_CHRONIC_GASTRITIS,
            DX_ACTIVE_CHRONIC_GASTRITIS,
            "Kronik atrofik gastrit",
            "Reaktif (kimyasal) gastropati",
            "Hiperplastik polip",
            "Fundik gland polibi",
        ],
        BiopsyLocation::Duodenum => {
            let mut options: Vec<&'static str> = Vec::new();
            for mapping in DUODENUM_MAPPINGS {
                if !options.contains(&mapping.diagnosis) {
                    options.push(mapping.diagnosis);
                }
            }
            options
        }
        BiopsyLocation::Ileum => vec![
            "Özellik göstermeyen ileum mukozası",
            "Lenfoid hiperplazi",
            "Kronik aktif ileit",
        ],
        BiopsyLocation::Colon => vec![
            "Özellik göstermeyen kolon mukozası",
            "Hiperplastik polip",
            "Tübüler adenom, düşük dereceli displazi",
            "Kronik aktif kolit",
            "Lenfositik kolit",
            "Kollajenöz kolit",
        ],
    }
}

/// Diagnosis placed on a freshly created record when the site is usually normal.
///
/// Stomach records start without a diagnosis; the auto rule fills it in.
pub fn default_diagnosis(location: BiopsyLocation) -> Option<&'static str> {
    match location {
        BiopsyLocation::Esophagus | BiopsyLocation::Stomach => None,
        BiopsyLocation::Duodenum => Some("Özellik göstermeyen duodenum mukozası"),
        BiopsyLocation::Ileum => Some("Özellik göstermeyen ileum mukozası"),
        BiopsyLocation::Colon => Some("Özellik göstermeyen kolon mukozası"),
    }
}

/// Predefined note lines for a site; selecting one toggles its membership in the notes list.
pub fn note_options(location: BiopsyLocation) -> &'static [&'static str] {
    match location {
        BiopsyLocation::Esophagus => &[
            "Örneklerde yalnızca skuamöz epitel izlenmiştir",
            "Kolumnar epitel izlenmemiştir",
            "Fungal etken izlenmemiştir",
        ],
        BiopsyLocation::Stomach => &[
            "Lamina propriada lenfoid agregat",
            "Displazi izlenmemiştir",
            "Kesitlerde yüzeyel mukoza izlenmiştir",
        ],
        BiopsyLocation::Duodenum => &[
            "Villus yapısı korunmuştur",
            "Brunner bezi hiperplazisi",
            "Giardia izlenmemiştir",
        ],
        BiopsyLocation::Ileum => &[
            "Granülom izlenmemiştir",
            "Lenfoid folikül hiperplazisi",
        ],
        BiopsyLocation::Colon => &[
            "Kript distorsiyonu izlenmemiştir",
            "Granülom izlenmemiştir",
            "Displazi izlenmemiştir",
            "Subepitelyal kollajen bant kalınlığı normaldir",
        ],
    }
}
