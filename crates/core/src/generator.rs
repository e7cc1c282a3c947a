//! Report text generation.
//!
//! [`ReportGenerator::generate`] turns the ordered biopsy list and the stain configuration into
//! a [`Report`]: a sequence of lines, each remembering which form fields produced it. The
//! generator never mutates its inputs and has no state of its own, so the same inputs always
//! give byte-identical text.
//!
//! Report layout:
//!
//! ```text
//! 1- Mide, Antrum (1/2), endoskopik biyopsi: Kronik gastrit
//!      - İnflamasyon: (+)
//!      - ...
//!
//! 2- Mide, Antrum (2/2), endoskopik biyopsi: Normal görünümde mide mukozası
//!      - HP: (-)
//!
//! Histokimyasal yöntemle:
//! 1, 2 nolu örnekte Helicobacter pylori için Warthin-Starry boyası yapılmıştır.
//! ```

use crate::biopsy::LocationFeatures;
use crate::constants::{
    BULB_LABEL, BULLET_INDENT, BULLET_PREFIX, ENDOSCOPIC_BIOPSY, STAINS_HEADING, STAINS_TRAILER,
    STAIN_INDEX_SUFFIX, STOMACH_LABEL,
};
use crate::editor::{FocusedField, FormField};
use crate::severity::FindingKind;
use crate::stains::StainConfig;
use crate::{Biopsy, BiopsyId, BiopsyLocation};
use std::collections::HashMap;

/// Where a report line came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineOrigin {
    pub biopsy: BiopsyId,
    pub fields: Vec<FormField>,
}

/// One line of generated report text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLine {
    pub text: String,
    pub origin: Option<LineOrigin>,
    /// True when the line belongs to the currently focused form field.
    pub highlighted: bool,
}

impl ReportLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: None,
            highlighted: false,
        }
    }

    fn from_fields(text: impl Into<String>, biopsy: BiopsyId, fields: Vec<FormField>) -> Self {
        Self {
            text: text.into(),
            origin: Some(LineOrigin { biopsy, fields }),
            highlighted: false,
        }
    }

    fn matches(&self, focus: &FocusedField) -> bool {
        self.origin
            .as_ref()
            .is_some_and(|o| o.biopsy == focus.biopsy && o.fields.contains(&focus.field))
    }
}

/// Generated report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The report as plain text, lines joined with `\n`. This is what gets copied.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Stateless report generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates the report for `records` in list order.
    ///
    /// Lines produced by the `focus` field are marked as highlighted. An empty record list
    /// gives an empty report.
    pub fn generate(
        &self,
        records: &[Biopsy],
        stains: &StainConfig,
        focus: Option<&FocusedField>,
    ) -> Report {
        let mut totals: HashMap<(BiopsyLocation, &str), usize> = HashMap::new();
        for biopsy in records {
            *totals.entry(biopsy.group_key()).or_default() += 1;
        }

        let mut running: HashMap<(BiopsyLocation, &str), usize> = HashMap::new();
        let mut lines = Vec::new();

        for (position, biopsy) in records.iter().enumerate() {
            let key = biopsy.group_key();
            let current = running.entry(key).or_default();
            *current += 1;
            let total = totals.get(&key).copied().unwrap_or(1);
            let group_position = (total > 1).then_some((*current, total));

            if position > 0 {
                lines.push(ReportLine::plain(""));
            }
            lines.extend(self.biopsy_lines(position + 1, biopsy, group_position));
        }

        lines.extend(self.stain_section(records, stains));

        if let Some(focus) = focus {
            for line in &mut lines {
                line.highlighted = line.matches(focus);
            }
        }

        Report { lines }
    }

    fn biopsy_lines(
        &self,
        index: usize,
        biopsy: &Biopsy,
        group_position: Option<(usize, usize)>,
    ) -> Vec<ReportLine> {
        let id = biopsy.id;
        let diagnosis = biopsy.diagnosis.trim();

        let mut title = format!(
            "{index}- {}, {ENDOSCOPIC_BIOPSY}:",
            location_label(biopsy, group_position)
        );
        if !diagnosis.is_empty() {
            title.push(' ');
            title.push_str(diagnosis);
        }

        let mut lines = vec![ReportLine::from_fields(
            title,
            id,
            vec![FormField::SubLocation, FormField::Diagnosis],
        )];

        match &biopsy.features {
            LocationFeatures::Esophagus(features) => {
                for feature in &features.enabled {
                    let phrase = feature.phrase();
                    if !diagnosis.contains(phrase) {
                        lines.push(bullet(phrase, id, FormField::Features));
                    }
                }
            }
            LocationFeatures::Stomach(features) if biopsy.location == BiopsyLocation::Stomach => {
                let shown: &[FindingKind] = if biopsy.findings.has_active_gastritis() {
                    &FindingKind::ALL
                } else {
                    &[FindingKind::Hp, FindingKind::IntestinalMetaplasia]
                };
                for kind in shown {
                    let value = biopsy.findings.get(*kind);
                    if value.is_evaluated() {
                        lines.push(bullet(
                            format!("{}: ({value})", kind.label()),
                            id,
                            FormField::Finding(*kind),
                        ));
                    }
                }
                for feature in &features.enabled {
                    lines.push(bullet(feature.phrase(), id, FormField::Features));
                }
                if let Some(pattern) = features.synaptophysin {
                    lines.push(bullet(pattern.phrase(), id, FormField::Features));
                }
            }
            _ => {}
        }

        for note in biopsy.notes.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let text = if note.ends_with('.') {
                note.to_string()
            } else {
                format!("{note}.")
            };
            lines.push(bullet(text, id, FormField::Notes));
        }

        let eosinophils = biopsy.eosinophil_count.trim();
        if !eosinophils.is_empty() {
            lines.push(bullet(eosinophils, id, FormField::EosinophilCount));
        }

        lines
    }

    fn stain_section(&self, records: &[Biopsy], stains: &StainConfig) -> Vec<ReportLine> {
        let mut locations: Vec<BiopsyLocation> = Vec::new();
        for biopsy in records {
            if !locations.contains(&biopsy.location) {
                locations.push(biopsy.location);
            }
        }

        let mut body: Vec<ReportLine> = Vec::new();

        for location in locations {
            for entry in stains.stains_for(location) {
                let special = match location {
                    BiopsyLocation::Stomach => entry.special(),
                    _ => None,
                };

                let mut indices: Vec<usize> = records
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.location == location)
                    .filter(|(_, b)| match special {
                        Some(special) => b.findings.get(special.finding()).is_evaluated(),
                        None => true,
                    })
                    .map(|(i, _)| i + 1)
                    .collect();

                if indices.is_empty() {
                    continue;
                }
                indices.sort_unstable();

                let numbers = indices
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                body.push(ReportLine::plain(format!(
                    "{numbers} {STAIN_INDEX_SUFFIX} {} {}",
                    entry.description, entry.name
                )));
            }
        }

        for (position, biopsy) in records.iter().enumerate() {
            for stain in biopsy.custom_stains.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
                body.push(ReportLine::from_fields(
                    format!("{}- no {stain}", position + 1),
                    biopsy.id,
                    vec![FormField::CustomStains],
                ));
            }
        }

        let Some(last) = body.last_mut() else {
            return Vec::new();
        };
        last.text.push_str(STAINS_TRAILER);

        let mut section = vec![ReportLine::plain(""), ReportLine::plain(STAINS_HEADING)];
        section.extend(body);
        section
    }
}

fn bullet(text: impl AsRef<str>, biopsy: BiopsyId, field: FormField) -> ReportLine {
    ReportLine::from_fields(
        format!("{BULLET_INDENT}{BULLET_PREFIX}{}", text.as_ref()),
        biopsy,
        vec![field],
    )
}

fn location_label(biopsy: &Biopsy, group_position: Option<(usize, usize)>) -> String {
    let main = biopsy.main_location();
    let mut label = match biopsy.location {
        BiopsyLocation::Stomach => format!("{STOMACH_LABEL}, {main}"),
        BiopsyLocation::Duodenum if main == BULB_LABEL => {
            format!("{}, {main}", BiopsyLocation::Duodenum.label())
        }
        _ => main.to_string(),
    };

    if let Some((current, total)) = group_position {
        label.push_str(&format!(" ({current}/{total})"));
    }

    let additional = biopsy.additional_locations();
    if !additional.is_empty() {
        label.push_str(", ");
        label.push_str(&additional.join(", "));
    }

    label
}
