//! Per-record form edits.
//!
//! Every interaction with the biopsy form is expressed as a [`BiopsyEdit`]. Applying an edit is
//! pure: it takes the current record and returns the edited copy, which the session then runs
//! through the derivation rules and stores. Each edit also names the [`FormField`] it touched so
//! the preview can highlight the matching report line.

use crate::biopsy::{
    DuodenumFeature, EsophagusFeature, LocationFeatures, StomachFeature, SynaptophysinPattern,
};
use crate::severity::{FindingKind, Severity};
use crate::{Biopsy, BiopsyId};
use report_types::NonEmptyText;

/// A form field of one biopsy record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    SubLocation,
    Diagnosis,
    Finding(FindingKind),
    Features,
    Notes,
    EosinophilCount,
    CustomStains,
}

impl std::str::FromStr for FormField {
    type Err = String;

    /// Parses the snake_case field names used on the command line, e.g. `diagnosis` or `hp`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "sub_location" => FormField::SubLocation,
            "diagnosis" => FormField::Diagnosis,
            "inflammation" => FormField::Finding(FindingKind::Inflammation),
            "activation" => FormField::Finding(FindingKind::Activation),
            "atrophy" => FormField::Finding(FindingKind::Atrophy),
            "hp" => FormField::Finding(FindingKind::Hp),
            "intestinal_metaplasia" => FormField::Finding(FindingKind::IntestinalMetaplasia),
            "features" => FormField::Features,
            "notes" => FormField::Notes,
            "eosinophil_count" => FormField::EosinophilCount,
            "custom_stains" => FormField::CustomStains,
            other => return Err(format!("unknown form field '{other}'")),
        };
        Ok(field)
    }
}

/// The field currently focused in the form, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FocusedField {
    pub biopsy: BiopsyId,
    pub field: FormField,
}

/// One mutation of a biopsy record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BiopsyEdit {
    /// Replaces the sub-location list. Blank entries are dropped; order is kept.
    SetSubLocations(Vec<String>),
    /// Selects or deselects a predefined sub-location.
    ToggleSubLocation(String),
    /// Appends a typed sub-location unless blank or already present.
    AddCustomSubLocation(String),
    SetDiagnosis(String),
    SetFinding(FindingKind, Severity),
    /// Selects or deselects a predefined note.
    TogglePredefinedNote(String),
    /// Appends a typed note unless blank.
    AddCustomNote(String),
    MoveNoteUp(usize),
    MoveNoteDown(usize),
    RemoveNote(usize),
    AddCustomStain(String),
    RemoveCustomStain(usize),
    SetEosinophilCount(String),
    SetEsophagusFeature(EsophagusFeature, bool),
    SetStomachFeature(StomachFeature, bool),
    SetSynaptophysin(Option<SynaptophysinPattern>),
    SetDuodenumFeature(DuodenumFeature, bool),
}

impl BiopsyEdit {
    /// Form field this edit belongs to.
    pub fn field(&self) -> FormField {
        match self {
            BiopsyEdit::SetSubLocations(_)
            | BiopsyEdit::ToggleSubLocation(_)
            | BiopsyEdit::AddCustomSubLocation(_) => FormField::SubLocation,
            BiopsyEdit::SetDiagnosis(_) => FormField::Diagnosis,
            BiopsyEdit::SetFinding(kind, _) => FormField::Finding(*kind),
            BiopsyEdit::TogglePredefinedNote(_)
            | BiopsyEdit::AddCustomNote(_)
            | BiopsyEdit::MoveNoteUp(_)
            | BiopsyEdit::MoveNoteDown(_)
            | BiopsyEdit::RemoveNote(_)
            | BiopsyEdit::SetDuodenumFeature(..) => FormField::Notes,
            BiopsyEdit::AddCustomStain(_) | BiopsyEdit::RemoveCustomStain(_) => {
                FormField::CustomStains
            }
            BiopsyEdit::SetEosinophilCount(_) => FormField::EosinophilCount,
            BiopsyEdit::SetEsophagusFeature(..)
            | BiopsyEdit::SetStomachFeature(..)
            | BiopsyEdit::SetSynaptophysin(_) => FormField::Features,
        }
    }

    /// Returns a copy of `biopsy` with this edit applied.
    ///
    /// Edits that do not apply (blank text, out-of-range index, a feature of another site)
    /// return the record unchanged.
    pub fn apply(&self, biopsy: &Biopsy) -> Biopsy {
        let mut next = biopsy.clone();
        match self {
            BiopsyEdit::SetSubLocations(labels) => {
                next.sub_locations = labels
                    .iter()
                    .filter_map(|label| NonEmptyText::new(label).ok())
                    .map(NonEmptyText::into_string)
                    .collect();
            }
            BiopsyEdit::ToggleSubLocation(label) => {
                if let Ok(label) = NonEmptyText::new(label) {
                    toggle_membership(&mut next.sub_locations, label.into_string());
                }
            }
            BiopsyEdit::AddCustomSubLocation(label) => match NonEmptyText::new(label) {
                Ok(label) => {
                    if !next.sub_locations.iter().any(|s| s == label.as_str()) {
                        next.sub_locations.push(label.into_string());
                    }
                }
                Err(_) => tracing::debug!(biopsy = %biopsy.id, "ignored blank sub-location"),
            },
            BiopsyEdit::SetDiagnosis(diagnosis) => {
                next.diagnosis = diagnosis.clone();
            }
            BiopsyEdit::SetFinding(kind, value) => {
                next.findings.set(*kind, *value);
            }
            BiopsyEdit::TogglePredefinedNote(note) => {
                if let Ok(note) = NonEmptyText::new(note) {
                    toggle_membership(&mut next.notes, note.into_string());
                }
            }
            BiopsyEdit::AddCustomNote(note) => match NonEmptyText::new(note) {
                Ok(note) => next.notes.push(note.into_string()),
                Err(_) => tracing::debug!(biopsy = %biopsy.id, "ignored blank note"),
            },
            BiopsyEdit::MoveNoteUp(index) => {
                if *index > 0 && *index < next.notes.len() {
                    next.notes.swap(*index - 1, *index);
                }
            }
            BiopsyEdit::MoveNoteDown(index) => {
                if index + 1 < next.notes.len() {
                    next.notes.swap(*index, index + 1);
                }
            }
            BiopsyEdit::RemoveNote(index) => {
                if *index < next.notes.len() {
                    next.notes.remove(*index);
                }
            }
            BiopsyEdit::AddCustomStain(stain) => match NonEmptyText::new(stain) {
                Ok(stain) => next.custom_stains.push(stain.into_string()),
                Err(_) => tracing::debug!(biopsy = %biopsy.id, "ignored blank custom stain"),
            },
            BiopsyEdit::RemoveCustomStain(index) => {
                if *index < next.custom_stains.len() {
                    next.custom_stains.remove(*index);
                }
            }
            BiopsyEdit::SetEosinophilCount(count) => {
                next.eosinophil_count = count.clone();
            }
            BiopsyEdit::SetEsophagusFeature(feature, on) => match &mut next.features {
                LocationFeatures::Esophagus(features) => {
                    set_membership(&mut features.enabled, *feature, *on);
                }
                _ => {
                    tracing::debug!(
                        biopsy = %biopsy.id,
                        "ignored oesophageal feature on another site"
                    )
                }
            },
            BiopsyEdit::SetStomachFeature(feature, on) => match &mut next.features {
                LocationFeatures::Stomach(features) => {
                    set_membership(&mut features.enabled, *feature, *on);
                }
                _ => {
                    tracing::debug!(biopsy = %biopsy.id, "ignored gastric feature on another site")
                }
            },
            BiopsyEdit::SetSynaptophysin(pattern) => match &mut next.features {
                LocationFeatures::Stomach(features) => features.synaptophysin = *pattern,
                _ => tracing::debug!(biopsy = %biopsy.id, "ignored synaptophysin on another site"),
            },
            BiopsyEdit::SetDuodenumFeature(feature, on) => {
                if biopsy.location == crate::BiopsyLocation::Duodenum {
                    let phrase = feature.phrase();
                    let present = next.notes.iter().any(|n| n == phrase);
                    if *on && !present {
                        next.notes.push(phrase.to_string());
                    } else if !*on && present {
                        next.notes.retain(|n| n != phrase);
                    }
                } else {
                    tracing::debug!(
                        biopsy = %biopsy.id,
                        "ignored duodenal feature on another site"
                    );
                }
            }
        }
        next
    }
}

fn toggle_membership(list: &mut Vec<String>, value: String) {
    if let Some(pos) = list.iter().position(|item| *item == value) {
        list.remove(pos);
    } else {
        list.push(value);
    }
}

fn set_membership<T: Ord>(set: &mut std::collections::BTreeSet<T>, value: T, on: bool) {
    if on {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BiopsyLocation;

    fn with_notes(notes: &[&str]) -> Biopsy {
        let mut biopsy = Biopsy::new(BiopsyLocation::Colon, 1);
        biopsy.notes = notes.iter().map(|n| n.to_string()).collect();
        biopsy
    }

    #[test]
    fn predefined_note_toggles_membership() {
        let biopsy = with_notes(&[]);
        let edit = BiopsyEdit::TogglePredefinedNote("Granülom izlenmemiştir".into());
        let on = edit.apply(&biopsy);
        assert_eq!(on.notes, vec!["Granülom izlenmemiştir"]);
        let off = edit.apply(&on);
        assert!(off.notes.is_empty());
    }

    #[test]
    fn custom_note_appends_and_blank_is_ignored() {
        let biopsy = with_notes(&["A"]);
        let biopsy = BiopsyEdit::AddCustomNote("  B ".into()).apply(&biopsy);
        assert_eq!(biopsy.notes, vec!["A", "B"]);
        let unchanged = BiopsyEdit::AddCustomNote("   ".into()).apply(&biopsy);
        assert_eq!(unchanged, biopsy);
    }

    #[test]
    fn notes_move_and_remove_by_index() {
        let biopsy = with_notes(&["A", "B", "C"]);
        let moved = BiopsyEdit::MoveNoteUp(2).apply(&biopsy);
        assert_eq!(moved.notes, vec!["A", "C", "B"]);
        let moved = BiopsyEdit::MoveNoteDown(0).apply(&moved);
        assert_eq!(moved.notes, vec!["C", "A", "B"]);
        let removed = BiopsyEdit::RemoveNote(1).apply(&moved);
        assert_eq!(removed.notes, vec!["C", "B"]);
    }

    #[test]
    fn out_of_range_note_moves_are_noops() {
        let biopsy = with_notes(&["A", "B"]);
        assert_eq!(BiopsyEdit::MoveNoteUp(0).apply(&biopsy), biopsy);
        assert_eq!(BiopsyEdit::MoveNoteDown(1).apply(&biopsy), biopsy);
        assert_eq!(BiopsyEdit::RemoveNote(5).apply(&biopsy), biopsy);
    }

    #[test]
    fn sub_locations_keep_order_and_drop_blanks() {
        let biopsy = Biopsy::new(BiopsyLocation::Stomach, 1);
        let edited = BiopsyEdit::SetSubLocations(vec!["Korpus".into(), " ".into(), "Antrum".into()])
            .apply(&biopsy);
        assert_eq!(edited.sub_locations, vec!["Korpus", "Antrum"]);

        let edited = BiopsyEdit::ToggleSubLocation("Korpus".into()).apply(&edited);
        assert_eq!(edited.sub_locations, vec!["Antrum"]);

        let edited = BiopsyEdit::AddCustomSubLocation("Ön duvar".into()).apply(&edited);
        let edited = BiopsyEdit::AddCustomSubLocation("Ön duvar".into()).apply(&edited);
        assert_eq!(edited.sub_locations, vec!["Antrum", "Ön duvar"]);
    }

    #[test]
    fn feature_of_another_site_is_ignored() {
        let biopsy = Biopsy::new(BiopsyLocation::Esophagus, 1);
        let edited =
            BiopsyEdit::SetStomachFeature(StomachFeature::FoveolarHyperplasia, true).apply(&biopsy);
        assert_eq!(edited, biopsy);

        let edited = BiopsyEdit::SetEsophagusFeature(EsophagusFeature::PapillaryElongation, true)
            .apply(&biopsy);
        match edited.features {
            LocationFeatures::Esophagus(features) => {
                assert!(features.enabled.contains(&EsophagusFeature::PapillaryElongation))
            }
            other => panic!("unexpected features: {other:?}"),
        }
    }

    #[test]
    fn duodenum_feature_is_backed_by_notes() {
        let biopsy = Biopsy::new(BiopsyLocation::Duodenum, 1);
        let feature = DuodenumFeature::BrunnerGlandHyperplasia;
        let on = BiopsyEdit::SetDuodenumFeature(feature, true).apply(&biopsy);
        assert!(on.has_duodenum_feature(feature));
        let twice = BiopsyEdit::SetDuodenumFeature(feature, true).apply(&on);
        assert_eq!(twice.notes.len(), 1);
        let off = BiopsyEdit::SetDuodenumFeature(feature, false).apply(&twice);
        assert!(!off.has_duodenum_feature(feature));
    }

    #[test]
    fn custom_stains_append_and_remove() {
        let biopsy = Biopsy::new(BiopsyLocation::Colon, 1);
        let biopsy = BiopsyEdit::AddCustomStain("Kongo kırmızısı".into()).apply(&biopsy);
        let biopsy = BiopsyEdit::AddCustomStain("".into()).apply(&biopsy);
        assert_eq!(biopsy.custom_stains, vec!["Kongo kırmızısı"]);
        let biopsy = BiopsyEdit::RemoveCustomStain(0).apply(&biopsy);
        assert!(biopsy.custom_stains.is_empty());
    }

    #[test]
    fn form_fields_parse_from_snake_case() {
        assert_eq!("hp".parse(), Ok(FormField::Finding(FindingKind::Hp)));
        assert_eq!(" notes ".parse(), Ok(FormField::Notes));
        assert!("colour".parse::<FormField>().is_err());
    }

    #[test]
    fn edits_report_their_field() {
        assert_eq!(
            BiopsyEdit::SetFinding(FindingKind::Hp, Severity::Mild).field(),
            FormField::Finding(FindingKind::Hp)
        );
        assert_eq!(BiopsyEdit::MoveNoteUp(1).field(), FormField::Notes);
        assert_eq!(
            BiopsyEdit::SetSynaptophysin(Some(SynaptophysinPattern::Linear)).field(),
            FormField::Features
        );
    }
}
