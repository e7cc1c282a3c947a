use report_types::TextError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
    #[error("translation error: {0}")]
    Translation(String),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("invalid text: {0}")]
    Text(#[from] TextError),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
