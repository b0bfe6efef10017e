use std::fmt;

#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file could not be read
    Io { path: String, source: std::io::Error },

    /// JSON snapshot failed to parse
    Json { context: String, source: serde_json::Error },

    /// YAML snapshot failed to parse
    Yaml { context: String, source: serde_yaml::Error },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io { path, source } => {
                write!(f, "Failed to read snapshot '{}': {}", path, source)
            }
            SnapshotError::Json { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            SnapshotError::Yaml { context, source } => {
                write!(f, "YAML parse error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io { source, .. } => Some(source),
            SnapshotError::Json { source, .. } => Some(source),
            SnapshotError::Yaml { source, .. } => Some(source),
        }
    }
}
