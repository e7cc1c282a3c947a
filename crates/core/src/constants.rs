//! Constants used throughout the report core crate.
//!
//! Report phrasing is Turkish clinical text; keeping every literal here means the generator and
//! the derivation rules can never drift apart on spelling.

/// Title line text between the location label and the diagnosis.
pub const ENDOSCOPIC_BIOPSY: &str = "endoskopik biyopsi";

/// Indentation placed before every bullet line.
pub const BULLET_INDENT: &str = "     ";

/// Prefix of every bullet line after the indentation.
pub const BULLET_PREFIX: &str = "- ";

/// Heading line of the histochemical stains section.
pub const STAINS_HEADING: &str = "Histokimyasal yöntemle:";

/// Sentence appended to the last line of the histochemical stains section.
pub const STAINS_TRAILER: &str = " boyası yapılmıştır.";

/// Text between the biopsy numbers and the stain description in a stain line.
pub const STAIN_INDEX_SUFFIX: &str = "nolu örnekte";

/// Stomach label used in front of the main location.
pub const STOMACH_LABEL: &str = "Mide";

/// Literal sub-location label for the duodenal bulb.
pub const BULB_LABEL: &str = "Bulbus";

/// Stain evaluated only when Helicobacter pylori was assessed.
pub const HP_STAIN_NAME: &str = "Warthin-Starry";

/// Stain evaluated only when intestinal metaplasia was assessed.
pub const IM_STAIN_NAME: &str = "PAS+AB";

/// Auto diagnosis: no inflammation or activation graded.
pub const DX_NORMAL_GASTRIC: &str = "Normal görünümde mide mukozası";

/// Auto diagnosis: inflammation graded, activation not.
pub const DX_CHRONIC_GASTRITIS: &str = "Kronik gastrit";

/// Auto diagnosis: activation graded.
pub const DX_ACTIVE_CHRONIC_GASTRITIS: &str = "Aktivasyon gösteren kronik gastrit";

/// Stomach diagnoses considered machine-derived and therefore safe to overwrite.
pub const STOMACH_AUTO_DIAGNOSES: [&str; 3] = [
    DX_NORMAL_GASTRIC,
    DX_CHRONIC_GASTRITIS,
    DX_ACTIVE_CHRONIC_GASTRITIS,
];

/// Default highlight markup tokens used by the preview surface.
pub const DEFAULT_HIGHLIGHT_OPEN: &str = "<mark>";
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "</mark>";

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "BIOPSY_REPORT_CONFIG";
