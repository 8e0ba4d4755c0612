use crate::domain::model::Domain;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("No {domain} record with id {id}")]
    RecordNotFound { domain: Domain, id: u32 },

    #[error("No {domain} rows to export")]
    EmptyExport { domain: Domain },
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning only; the command still counts as successful.
    Low,
    /// The request could not be honored; the user can retry with new input.
    Medium,
    /// Bad configuration; nothing ran.
    High,
    /// Underlying system failure (disk, encoding).
    Critical,
}

impl PortalError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PortalError::EmptyExport { .. } => ErrorSeverity::Low,
            PortalError::Validation { .. } | PortalError::RecordNotFound { .. } => {
                ErrorSeverity::Medium
            }
            PortalError::ConfigValidation { .. } | PortalError::InvalidConfigValue { .. } => {
                ErrorSeverity::High
            }
            PortalError::Csv(_) | PortalError::Io(_) | PortalError::Serialization(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortalError::EmptyExport { domain } => {
                format!("Tidak ada data untuk diekspor ({domain})")
            }
            PortalError::RecordNotFound { domain, id } => {
                format!("Record #{id} tidak ditemukan di {domain}")
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortalError::Csv(_) => "Check the record for unusual characters and retry",
            PortalError::Io(_) => "Check file permissions and free disk space",
            PortalError::Serialization(_) => {
                "The snapshot file may be corrupted; restore it or move it aside"
            }
            PortalError::ConfigValidation { .. } | PortalError::InvalidConfigValue { .. } => {
                "Fix the configuration file and run again"
            }
            PortalError::Validation { .. } => "Correct the input value and retry",
            PortalError::RecordNotFound { .. } => "List the domain to see the available ids",
            PortalError::EmptyExport { .. } => {
                "Add records or relax the search filter before exporting"
            }
        }
    }
}
