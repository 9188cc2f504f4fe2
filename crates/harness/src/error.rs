//! Harness error types.

/// Error type for manifest loading, process execution and reporting.
#[derive(Debug)]
pub enum HarnessError {
    /// An I/O operation failed; `context` says which one
    Io {
        context: String,
        source: std::io::Error,
    },
    /// The manifest parsed but is not usable
    Manifest(String),
    /// The manifest is not valid TOML for the expected shape
    Toml(toml::de::Error),
    /// The report could not be encoded
    Json(serde_json::Error),
    /// `--only` named a language the manifest does not define
    UnknownLanguage(String),
}

impl HarnessError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        HarnessError::Io {
            context: context.into(),
            source,
        }
    }
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Io { context, source } => write!(f, "{}: {}", context, source),
            HarnessError::Manifest(msg) => write!(f, "Invalid manifest: {}", msg),
            HarnessError::Toml(e) => write!(f, "Failed to parse manifest: {}", e),
            HarnessError::Json(e) => write!(f, "Failed to encode report: {}", e),
            HarnessError::UnknownLanguage(name) => {
                write!(f, "Unknown language '{}' (see `fibench list`)", name)
            }
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Io { source, .. } => Some(source),
            HarnessError::Toml(e) => Some(e),
            HarnessError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for HarnessError {
    fn from(e: toml::de::Error) -> Self {
        HarnessError::Toml(e)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::Json(e)
    }
}
