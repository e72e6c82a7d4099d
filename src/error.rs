use std::path::PathBuf;

/// Main pipeline error type
#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("Translation not found for {language}: {}", .path.display())]
    MissingInput { language: String, path: PathBuf },

    #[error("Translation for {language} is empty: {}", .path.display())]
    EmptyInput { language: String, path: PathBuf },

    #[error("Synthesis failed for {language} section {section_index}: {message}")]
    Synthesis {
        language: String,
        section_index: usize,
        message: String,
    },

    #[error("Concatenation failed for {language}: {message}")]
    Concatenation { language: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NarrationError {
    /// Short machine-friendly kind, used in logs and run reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "missing_input",
            Self::EmptyInput { .. } => "empty_input",
            Self::Synthesis { .. } => "synthesis",
            Self::Concatenation { .. } => "concatenation",
            Self::Io(_) => "io",
        }
    }

    /// Missing or empty translations skip the language instead of failing it
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::MissingInput { .. } | Self::EmptyInput { .. })
    }
}

/// Custom result type for the pipeline
pub type NarrationResult<T> = Result<T, NarrationError>;
