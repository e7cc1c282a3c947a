//! Session files.
//!
//! A session (ordered biopsy list plus stain configuration) can be saved as YAML and loaded
//! again. Loading replays every record through the normal add/update path so the derivation
//! rules hold for imported records. Record ids are not stored; fresh ones are assigned.
//!
//! ```yaml
//! biopsies:
//!   - location: stomach
//!     sub_locations: [Antrum]
//!     findings: { inflammation: "+", activation: "-" }
//!     notes: [Displazi izlenmemiştir]
//! stains:
//!   stomach:
//!     - name: Warthin-Starry
//!       description: Helicobacter pylori için
//! ```

use crate::biopsy::{EsophagusFeature, LocationFeatures, StomachFeature, SynaptophysinPattern};
use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::session::ReportSession;
use crate::severity::Findings;
use crate::stains::StainConfig;
use crate::{Biopsy, BiopsyLocation};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct SessionWire {
    #[serde(default)]
    biopsies: Vec<BiopsyWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stains: Option<StainConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct BiopsyWire {
    location: BiopsyLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    findings: Option<Findings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    custom_stains: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    eosinophil_count: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    esophagus_features: Vec<EsophagusFeature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    stomach_features: Vec<StomachFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    synaptophysin: Option<SynaptophysinPattern>,
}

// ============================================================================
// Public operations
// ============================================================================

/// Parse a session from YAML text.
///
/// Omitted record fields keep the defaults of a freshly added record. When the file has no
/// `stains` section the stain configuration comes from `config`.
///
/// # Errors
///
/// Returns `ReportError::Translation` with the failing path when the YAML does not match the
/// schema.
pub fn parse_session(yaml_text: &str, config: &ReportConfig) -> ReportResult<ReportSession> {
    let wire: SessionWire = if yaml_text.trim().is_empty() {
        SessionWire::default()
    } else {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        match serde_path_to_error::deserialize(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() { "<root>" } else { path.as_str() };
                return Err(ReportError::Translation(format!(
                    "session schema mismatch at {path}: {source}"
                )));
            }
        }
    };

    let mut session = ReportSession::new(config);
    if let Some(stains) = wire.stains {
        session.replace_stain_config(stains);
    }

    for record in wire.biopsies {
        let id = session.add(record.location);
        let Some(fresh) = session.get(id).cloned() else {
            continue;
        };
        session.update(wire_to_domain(record, fresh));
    }

    tracing::debug!(records = session.records().len(), "parsed session");
    Ok(session)
}

/// Render a session as YAML text.
pub fn render_session(session: &ReportSession) -> ReportResult<String> {
    let wire = SessionWire {
        biopsies: session.records().iter().map(domain_to_wire).collect(),
        stains: Some(session.stain_config().clone()),
    };
    Ok(serde_yaml::to_string(&wire)?)
}

pub fn load_session_file(path: &Path, config: &ReportConfig) -> ReportResult<ReportSession> {
    let text = std::fs::read_to_string(path).map_err(ReportError::FileRead)?;
    parse_session(&text, config)
}

pub fn save_session_file(path: &Path, session: &ReportSession) -> ReportResult<()> {
    let yaml = render_session(session)?;
    std::fs::write(path, yaml).map_err(ReportError::FileWrite)
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: BiopsyWire, mut biopsy: Biopsy) -> Biopsy {
    if let Some(sub_locations) = wire.sub_locations {
        biopsy.sub_locations = sub_locations
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(findings) = wire.findings {
        biopsy.findings = findings;
    }
    if let Some(diagnosis) = wire.diagnosis {
        biopsy.diagnosis = diagnosis;
    }
    biopsy.notes = wire.notes;
    biopsy.custom_stains = wire.custom_stains;
    biopsy.eosinophil_count = wire.eosinophil_count;

    match &mut biopsy.features {
        LocationFeatures::Esophagus(features) => {
            features.enabled = wire.esophagus_features.into_iter().collect();
        }
        LocationFeatures::Stomach(features) => {
            features.enabled = wire.stomach_features.into_iter().collect();
            features.synaptophysin = wire.synaptophysin;
        }
        LocationFeatures::None => {}
    }

    biopsy
}

fn domain_to_wire(biopsy: &Biopsy) -> BiopsyWire {
    let (esophagus_features, stomach_features, synaptophysin) = match &biopsy.features {
        LocationFeatures::Esophagus(f) => (f.enabled.iter().copied().collect(), Vec::new(), None),
        LocationFeatures::Stomach(f) => (
            Vec::new(),
            f.enabled.iter().copied().collect(),
            f.synaptophysin,
        ),
        LocationFeatures::None => (Vec::new(), Vec::new(), None),
    };

    BiopsyWire {
        location: biopsy.location,
        sub_locations: Some(biopsy.sub_locations.clone()),
        findings: Some(biopsy.findings),
        diagnosis: Some(biopsy.diagnosis.clone()),
        notes: biopsy.notes.clone(),
        custom_stains: biopsy.custom_stains.clone(),
        eosinophil_count: biopsy.eosinophil_count.clone(),
        esophagus_features,
        stomach_features,
        synaptophysin,
    }
}
