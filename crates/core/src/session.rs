//! Report session.
//!
//! [`ReportSession`] owns everything the report form can change: the ordered biopsy list, the
//! stain configuration and the focused field. All mutations go through it; the generator and
//! the preview only ever see shared references.

use crate::config::ReportConfig;
use crate::derivation::derive_diagnosis;
use crate::editor::{BiopsyEdit, FocusedField, FormField};
use crate::error::ReportResult;
use crate::generator::{Report, ReportGenerator};
use crate::preview::{Clipboard, HighlightMarkup, Preview};
use crate::stains::StainConfig;
use crate::store::BiopsyStore;
use crate::{Biopsy, BiopsyId, BiopsyLocation};

#[derive(Clone, Debug, Default)]
pub struct ReportSession {
    store: BiopsyStore,
    stains: StainConfig,
    markup: HighlightMarkup,
    focus: Option<FocusedField>,
    generator: ReportGenerator,
}

impl ReportSession {
    /// Creates an empty session seeded from `config`.
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            store: BiopsyStore::new(),
            stains: config.stain_config().clone(),
            markup: config.markup().clone(),
            focus: None,
            generator: ReportGenerator::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    /// Appends a new record for `location` and makes it active. Any field highlight is dropped.
    pub fn add(&mut self, location: BiopsyLocation) -> BiopsyId {
        self.focus = None;
        self.store.add(location)
    }

    /// Stores `biopsy` after running the derivation rules. Unknown ids are ignored.
    pub fn update(&mut self, biopsy: Biopsy) -> bool {
        self.store.replace(derive_diagnosis(biopsy))
    }

    /// Applies a form edit to the record `id` and focuses the edited field.
    pub fn apply(&mut self, id: BiopsyId, edit: &BiopsyEdit) -> bool {
        let Some(current) = self.store.get(id) else {
            tracing::debug!(biopsy = %id, "ignored edit of unknown biopsy");
            return false;
        };
        let next = edit.apply(current);
        self.focus = Some(FocusedField {
            biopsy: id,
            field: edit.field(),
        });
        self.store.set_active(id);
        self.update(next)
    }

    /// Removes the record `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: BiopsyId) -> bool {
        let removed = self.store.remove(id);
        if removed && self.focus.is_some_and(|f| f.biopsy == id) {
            self.focus = None;
        }
        removed
    }

    pub fn records(&self) -> &[Biopsy] {
        self.store.records()
    }

    pub fn get(&self, id: BiopsyId) -> Option<&Biopsy> {
        self.store.get(id)
    }

    pub fn active(&self) -> Option<BiopsyId> {
        self.store.active()
    }

    // ------------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------------

    /// Focuses a form field. Ignored when the record does not exist.
    pub fn focus(&mut self, id: BiopsyId, field: FormField) -> bool {
        if self.store.set_active(id) {
            self.focus = Some(FocusedField { biopsy: id, field });
            true
        } else {
            false
        }
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    pub fn focused(&self) -> Option<FocusedField> {
        self.focus
    }

    // ------------------------------------------------------------------------
    // Stains
    // ------------------------------------------------------------------------

    pub fn stain_config(&self) -> &StainConfig {
        &self.stains
    }

    pub fn add_stain(&mut self, location: BiopsyLocation, name: &str, description: &str) -> bool {
        self.stains.add(location, name, description)
    }

    pub fn remove_stain(&mut self, location: BiopsyLocation, index: usize) -> bool {
        self.stains.remove(location, index)
    }

    /// Mutable access for the stain settings form.
    pub fn stain_config_mut(&mut self) -> &mut StainConfig {
        &mut self.stains
    }

    pub(crate) fn replace_stain_config(&mut self, stains: StainConfig) {
        self.stains = stains;
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    /// Generates the report from the current state.
    pub fn report(&self) -> Report {
        self.generator
            .generate(self.store.records(), &self.stains, self.focus.as_ref())
    }

    pub fn preview(&self) -> Preview {
        Preview::new(self.report(), self.markup.clone())
    }

    /// Copies the plain report text to `clipboard`.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> ReportResult<()> {
        self.preview().copy_to(clipboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DX_ACTIVE_CHRONIC_GASTRITIS, DX_CHRONIC_GASTRITIS};
    use crate::preview::MemoryClipboard;
    use crate::severity::{FindingKind, Severity};

    fn session() -> ReportSession {
        ReportSession::new(&ReportConfig::default())
    }

    #[test]
    fn single_stomach_biopsy_report() {
        let mut session = session();
        let id = session.add(BiopsyLocation::Stomach);
        session.apply(id, &BiopsyEdit::SetFinding(FindingKind::Inflammation, Severity::Mild));

        let text = session.report().plain_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1- Mide, Antrum, endoskopik biyopsi: Kronik gastrit");
        assert_eq!(
            &lines[1..6],
            [
                "     - İnflamasyon: (+)",
                "     - Aktivasyon: (-)",
                "     - Atrofi: (-)",
                "     - HP: (-)",
                "     - İntestinal metaplazi: (-)",
            ]
        );
        assert!(text.ends_with(
            "Histokimyasal yöntemle:\n\
             1 nolu örnekte Helicobacter pylori için Warthin-Starry\n\
             1 nolu örnekte intestinal metaplazi için PAS+AB boyası yapılmıştır."
        ));
    }

    #[test]
    fn manual_gastric_diagnosis_survives_finding_edits() {
        let mut session = session();
        let id = session.add(BiopsyLocation::Stomach);
        session.apply(id, &BiopsyEdit::SetFinding(FindingKind::Inflammation, Severity::Mild));
        assert_eq!(session.get(id).map(|b| b.diagnosis.as_str()), Some(DX_CHRONIC_GASTRITIS));

        session.apply(id, &BiopsyEdit::SetDiagnosis("Kronik atrofik gastrit".into()));
        session.apply(id, &BiopsyEdit::SetFinding(FindingKind::Activation, Severity::Marked));
        session.apply(id, &BiopsyEdit::SetFinding(FindingKind::Inflammation, Severity::Absent));
        assert_eq!(
            session.get(id).map(|b| b.diagnosis.as_str()),
            Some("Kronik atrofik gastrit")
        );
    }

    #[test]
    fn choosing_an_auto_phrase_hands_control_back_to_the_rule() {
        let mut session = session();
        let id = session.add(BiopsyLocation::Stomach);
        session.apply(id, &BiopsyEdit::SetFinding(FindingKind::Activation, Severity::Mild));
        session.apply(id, &BiopsyEdit::SetDiagnosis(DX_CHRONIC_GASTRITIS.into()));
        assert_eq!(
            session.get(id).map(|b| b.diagnosis.as_str()),
            Some(DX_ACTIVE_CHRONIC_GASTRITIS)
        );
    }

    #[test]
    fn duodenum_table_discards_custom_notes() {
        let mut session = session();
        let id = session.add(BiopsyLocation::Duodenum);
        session.apply(id, &BiopsyEdit::AddCustomNote("Elle yazılmış not".into()));
        session.apply(id, &BiopsyEdit::SetSubLocations(vec!["Bulbus".into()]));
        session.apply(id, &BiopsyEdit::SetDiagnosis("Aktif duodenit".into()));

        let biopsy = session.get(id).expect("record");
        assert_eq!(biopsy.diagnosis, "Kronik aktif duodenit (bulbit)");
        assert_eq!(
            biopsy.notes,
            vec![
                "Yüzey ve kript epitelinde nötrofil infiltrasyonu",
                "Brunner bezi hiperplazisi",
            ]
        );

        session.apply(id, &BiopsyEdit::AddCustomNote("Sonradan eklenen".into()));
        assert_eq!(session.get(id).map(|b| b.notes.len()), Some(3));
    }

    #[test]
    fn sub_location_change_can_trigger_duodenum_table() {
        let mut session = session();
        let id = session.add(BiopsyLocation::Duodenum);
        session.apply(id, &BiopsyEdit::SetDiagnosis("Normal".into()));
        assert_eq!(
            session.get(id).map(|b| b.diagnosis.as_str()),
            Some("Özellik göstermeyen duodenum mukozası")
        );

        let mut session = self::session();
        let id = session.add(BiopsyLocation::Duodenum);
        session.apply(id, &BiopsyEdit::SetSubLocations(vec!["Duodenum 2. kıta".into()]));
        session.apply(id, &BiopsyEdit::SetDiagnosis("Normal".into()));
        assert_eq!(session.get(id).map(|b| b.diagnosis.as_str()), Some("Normal"));
        session.apply(id, &BiopsyEdit::SetSubLocations(vec!["Bulbus".into()]));
        assert_eq!(
            session.get(id).map(|b| b.diagnosis.as_str()),
            Some("Özellik göstermeyen bulbus mukozası")
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut session = session();
        session.add(BiopsyLocation::Colon);
        let stranger = Biopsy::new(BiopsyLocation::Colon, 5);

        assert!(!session.update(stranger.clone()));
        assert!(!session.apply(stranger.id, &BiopsyEdit::SetDiagnosis("x".into())));
        assert!(!session.remove(stranger.id));
        assert!(!session.focus(stranger.id, FormField::Diagnosis));
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn edits_focus_the_touched_field() {
        let mut session = session();
        let id = session.add(BiopsyLocation::Stomach);
        session.apply(id, &BiopsyEdit::SetFinding(FindingKind::Hp, Severity::Moderate));
        assert_eq!(
            session.focused(),
            Some(FocusedField {
                biopsy: id,
                field: FormField::Finding(FindingKind::Hp)
            })
        );

        let preview = session.preview();
        assert!(preview.display_text().contains("<mark>     - HP: (++)</mark>"));
        assert!(!preview.clipboard_text().contains("<mark>"));

        session.remove(id);
        assert_eq!(session.focused(), None);
    }

    #[test]
    fn adding_a_record_moves_activity_off_the_highlighted_one() {
        let mut session = session();
        let first = session.add(BiopsyLocation::Stomach);
        session.apply(first, &BiopsyEdit::SetFinding(FindingKind::Hp, Severity::Mild));
        assert!(session.focused().is_some());

        let second = session.add(BiopsyLocation::Colon);
        assert_eq!(session.active(), Some(second));
        assert_eq!(session.focused(), None);
        assert!(!session.preview().display_text().contains("<mark>"));
    }

    #[test]
    fn copy_sends_plain_text() {
        let mut session = session();
        let id = session.add(BiopsyLocation::Stomach);
        session.focus(id, FormField::Diagnosis);
        let mut clipboard = MemoryClipboard::new();
        session.copy_to(&mut clipboard).expect("copy");
        let copied = clipboard.contents().expect("copied");
        assert!(copied.starts_with("1- Mide, Antrum, endoskopik biyopsi:"));
        assert!(!copied.contains("<mark>"));
    }

    #[test]
    fn stain_edits_change_the_report() {
        let mut session = session();
        session.add(BiopsyLocation::Colon);
        assert!(!session.report().plain_text().contains("Histokimyasal"));

        assert!(!session.add_stain(BiopsyLocation::Colon, "", "amiloid için"));
        assert!(session.add_stain(BiopsyLocation::Colon, "Kongo kırmızısı", "amiloid için"));
        assert!(session
            .report()
            .plain_text()
            .ends_with("1 nolu örnekte amiloid için Kongo kırmızısı boyası yapılmıştır."));

        assert!(session.remove_stain(BiopsyLocation::Colon, 0));
        assert!(!session.report().plain_text().contains("Histokimyasal"));
    }

    #[test]
    fn removal_renumbers_on_next_render() {
        let mut session = session();
        let a = session.add(BiopsyLocation::Stomach);
        session.add(BiopsyLocation::Stomach);
        session.add(BiopsyLocation::Stomach);

        assert!(session.report().plain_text().contains("(3/3)"));
        session.remove(a);
        let text = session.report().plain_text();
        assert!(text.starts_with("1- Mide, Antrum (1/2)"));
        assert!(text.contains("2- Mide, Antrum (2/2)"));
    }
}
