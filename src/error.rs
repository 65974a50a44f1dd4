use thiserror::Error;

/// Failures reported by the analytics engine.
///
/// Every variant is recoverable: the caller picks a different input and tries
/// again. None of them is ever folded into a numeric sentinel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    #[error("invalid year range: {min} > {max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("correlation needs exactly two indicators, got {0}")]
    InvalidArity(usize),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("indicator not present in aligned series: {0}")]
    UnknownIndicator(String),
}

impl AnalyticsError {
    /// Short tag for tables and exports.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsError::InvalidRange { .. } => "InvalidRange",
            AnalyticsError::InvalidArity(_) => "InvalidArity",
            AnalyticsError::InsufficientData(_) => "InsufficientData",
            AnalyticsError::DegenerateInput(_) => "DegenerateInput",
            AnalyticsError::UnknownIndicator(_) => "UnknownIndicator",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
    reported: bool,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
            reported: false,
        }
    }

    /// Mark the error as already shown to the user (e.g. inside a report).
    pub fn reported(mut self) -> Self {
        self.reported = true;
        self
    }

    pub fn is_reported(&self) -> bool {
        self.reported
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        let exit_code = match err {
            AnalyticsError::InvalidRange { .. }
            | AnalyticsError::InvalidArity(_)
            | AnalyticsError::UnknownIndicator(_) => 2,
            AnalyticsError::InsufficientData(_) => 3,
            AnalyticsError::DegenerateInput(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .field("reported", &self.reported)
            .finish()
    }
}

impl std::error::Error for AppError {}
