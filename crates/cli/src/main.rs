use anyhow::Context;
use clap::{Parser, Subcommand};
use report_core::{
    catalog, constants::CONFIG_PATH_ENV, load_session_file, render_session, resolve_config,
    BiopsyLocation, FileClipboard, FormField, ReportSession,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "biopsy-report")]
#[command(about = "Endoscopic biopsy pathology report generator")]
struct Cli {
    /// YAML configuration file (falls back to BIOPSY_REPORT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report for a session file
    Render {
        /// Session YAML file
        session: PathBuf,
        /// Highlight a field, as <biopsy number>:<field> (e.g. 2:hp)
        #[arg(long)]
        highlight: Option<String>,
        /// Show highlight markup in the printed report
        #[arg(long)]
        markup: bool,
        /// Also write the plain report text to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List sub-location, diagnosis and note options for a site
    Options {
        /// Biopsy site (esophagus, stomach, duodenum, ileum, colon)
        location: BiopsyLocation,
    },
    /// List the effective stain configuration
    Stains,
    /// Print a session file with fresh default records for the given sites
    Template {
        /// Biopsy sites in report order
        #[arg(required = true)]
        locations: Vec<BiopsyLocation>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let config = resolve_config(config_path.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Some(Commands::Render {
            session,
            highlight,
            markup,
            out,
        }) => {
            let mut report_session = load_session_file(&session, &config)
                .with_context(|| format!("failed to load session {}", session.display()))?;

            if let Some(target) = highlight {
                focus_target(&mut report_session, &target)?;
            }

            let preview = report_session.preview();
            if markup {
                println!("{}", preview.display_text());
            } else {
                println!("{}", preview.clipboard_text());
            }

            if let Some(path) = out {
                preview
                    .copy_to(&mut FileClipboard::new(&path))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("wrote report to {}", path.display());
            }
        }
        Some(Commands::Options { location }) => {
            println!("Sub-locations:");
            for option in catalog::sub_location_options(location) {
                println!("  {option}");
            }
            println!("Diagnoses:");
            for option in catalog::diagnosis_options(location) {
                println!("  {option}");
            }
            println!("Notes:");
            for option in catalog::note_options(location) {
                println!("  {option}");
            }
        }
        Some(Commands::Stains) => {
            let mut any = false;
            for (location, entries) in config.stain_config().iter() {
                for (index, entry) in entries.iter().enumerate() {
                    any = true;
                    println!(
                        "{location} [{index}]: {} ({})",
                        entry.name, entry.description
                    );
                }
            }
            if !any {
                println!("No stains configured.");
            }
        }
        Some(Commands::Template { locations }) => {
            let mut report_session = ReportSession::new(&config);
            for location in locations {
                report_session.add(location);
            }
            print!("{}", render_session(&report_session)?);
        }
        None => {
            println!("Use 'biopsy-report --help' for commands");
        }
    }

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "biopsy_report=info,report_core=info";

/// Uses `RUST_LOG` as given, falling back to info for this binary and the core.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Focuses `<biopsy number>:<field>` in the session.
fn focus_target(session: &mut ReportSession, target: &str) -> anyhow::Result<()> {
    let (number, field) = target
        .split_once(':')
        .context("highlight must look like <biopsy number>:<field>")?;
    let number: usize = number
        .trim()
        .parse()
        .with_context(|| format!("invalid biopsy number '{number}'"))?;
    let field: FormField = field.parse().map_err(anyhow::Error::msg)?;

    let id = number
        .checked_sub(1)
        .and_then(|i| session.records().get(i))
        .map(|b| b.id)
        .with_context(|| format!("no biopsy number {number}"))?;
    session.focus(id, field);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_directive_for_core_is_kept() {
        let filter = log_filter(Some("report_core=debug")).to_string();
        assert!(filter.contains("report_core=debug"), "{filter}");
        assert!(!filter.contains("report_core=info"), "{filter}");
    }

    #[test]
    fn missing_rust_log_falls_back_to_info() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("biopsy_report=info"), "{filter}");
        assert!(filter.contains("report_core=info"), "{filter}");
    }

    #[test]
    fn unparsable_rust_log_falls_back_to_info() {
        let filter = log_filter(Some("report_core=loudest")).to_string();
        assert!(filter.contains("report_core=info"), "{filter}");
    }

    #[test]
    fn highlight_target_must_name_a_field() {
        let config = report_core::ReportConfig::default();
        let mut session = ReportSession::new(&config);
        session.add(BiopsyLocation::Stomach);
        assert!(focus_target(&mut session, "1").is_err());
        assert!(focus_target(&mut session, "2:diagnosis").is_err());
        focus_target(&mut session, "1:diagnosis").expect("focus");
        assert!(session.focused().is_some());
    }
}
