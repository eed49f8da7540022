use thiserror::Error;

/// Roster boundary errors. Bad level values are never errors (coerced to 0).
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Missing required column: {column} (roster needs name, sb_level, mag_level)")]
    MissingColumn { column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Energy cap out of range: {value} (allowed {min}..={max})")]
    EnergyCapOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Unknown bracket: {0}")]
    UnknownBracket(String),

    #[error("Unknown assignment strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to flush CSV buffer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PlanError {
    /// Whether the user can fix the input and simply run again
    pub fn is_recoverable(&self) -> bool {
        match self {
            PlanError::Roster(_) => true,
            PlanError::Config(_) => true,
            PlanError::Export(ExportError::Io(_)) => true,
            PlanError::Export(_) => false,
        }
    }

    /// Stable error code for API envelopes
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::Roster(RosterError::MissingColumn { .. }) => "MISSING_COLUMN",
            PlanError::Roster(RosterError::Csv(_)) => "INVALID_ROSTER",
            PlanError::Config(_) => "INVALID_CONFIG",
            PlanError::Export(_) => "EXPORT_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
