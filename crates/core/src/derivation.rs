//! Diagnosis derivation rules.
//!
//! [`derive_diagnosis`] is applied to every record before it is stored. It is a pure function
//! of the record, so it gives the same answer whichever field the last edit touched.
//!
//! - Stomach: while the diagnosis is empty or one of the auto phrases, it follows the graded
//!   findings. Any other diagnosis is a deliberate choice and is left alone.
//! - Duodenum: a (main sub-location, diagnosis) pair found in the mapping table is replaced by
//!   the table's report wording and notes. Existing notes are discarded.
//! - Other sites: untouched.

use crate::catalog::duodenum_mapping;
use crate::constants::{
    DX_ACTIVE_CHRONIC_GASTRITIS, DX_CHRONIC_GASTRITIS, DX_NORMAL_GASTRIC, STOMACH_AUTO_DIAGNOSES,
};
use crate::location::BiopsyLocation;
use crate::severity::Findings;
use crate::Biopsy;

/// Returns the record with its site's derivation rules applied.
pub fn derive_diagnosis(mut biopsy: Biopsy) -> Biopsy {
    match biopsy.location {
        BiopsyLocation::Stomach => {
            if is_auto_diagnosis(&biopsy.diagnosis) {
                let derived = stomach_auto_diagnosis(&biopsy.findings);
                if biopsy.diagnosis != derived {
                    tracing::debug!(
                        biopsy = %biopsy.id,
                        diagnosis = derived,
                        "derived gastric diagnosis"
                    );
                    biopsy.diagnosis = derived.to_string();
                }
            }
        }
        BiopsyLocation::Duodenum => {
            if let Some(mapping) = duodenum_mapping(biopsy.main_location(), &biopsy.diagnosis) {
                tracing::debug!(
                    biopsy = %biopsy.id,
                    diagnosis = mapping.report_diagnosis,
                    "applied duodenum mapping"
                );
                biopsy.diagnosis = mapping.report_diagnosis.to_string();
                biopsy.notes = mapping.notes.iter().map(|n| n.to_string()).collect();
            }
        }
        BiopsyLocation::Esophagus | BiopsyLocation::Ileum | BiopsyLocation::Colon => {}
    }
    biopsy
}

/// True when a gastric diagnosis is machine-derived and may be recomputed.
pub fn is_auto_diagnosis(diagnosis: &str) -> bool {
    let diagnosis = diagnosis.trim();
    diagnosis.is_empty() || STOMACH_AUTO_DIAGNOSES.contains(&diagnosis)
}

pub fn stomach_auto_diagnosis(findings: &Findings) -> &'static str {
    if findings.activation.is_graded() {
        DX_ACTIVE_CHRONIC_GASTRITIS
    } else if findings.inflammation.is_graded() {
        DX_CHRONIC_GASTRITIS
    } else {
        DX_NORMAL_GASTRIC
    }
}
