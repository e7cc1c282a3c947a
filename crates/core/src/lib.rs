//! # Report Core
//!
//! Structured endoscopic biopsy reporting.
//!
//! This crate turns an ordered list of biopsy records into the free-text pathology report a
//! pathologist pastes into the hospital system:
//! - Biopsy records with site-specific defaults, findings and feature flags
//! - Diagnosis derivation rules applied before a record is stored
//! - Report text generation with repeated-site numbering and a histochemical stains section
//! - Preview highlighting and plain-text clipboard output
//!
//! **No UI concerns**: form rendering and the command-line front end live in `report-cli`.

pub mod biopsy;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod derivation;
pub mod editor;
pub mod error;
pub mod generator;
pub mod location;
pub mod preview;
pub mod session;
pub mod session_file;
pub mod severity;
pub mod stains;
pub mod store;

pub use biopsy::{Biopsy, BiopsyId};
pub use config::{resolve_config, ReportConfig};
pub use editor::{BiopsyEdit, FocusedField, FormField};
pub use error::{ReportError, ReportResult};
pub use generator::{Report, ReportGenerator, ReportLine};
pub use location::BiopsyLocation;
pub use preview::{Clipboard, FileClipboard, HighlightMarkup, MemoryClipboard, Preview};
pub use session::ReportSession;
pub use session_file::{load_session_file, parse_session, render_session, save_session_file};
pub use severity::{FindingKind, Findings, Severity};
pub use stains::{StainConfig, StainEntry};

// Re-export the validated text type used across the public API.
pub use report_types::{NonEmptyText, TextError};
