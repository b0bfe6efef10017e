use std::fmt;

/// Failures around the external map widget.
///
/// Clone so a failed load can be cached in the session and handed to every
/// caller that shared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Bootstrap URL could not be built from the configured base
    InvalidUrl { url: String, reason: String },

    /// Map options are out of range
    InvalidOptions(String),

    /// The widget script could not be fetched
    ScriptLoad { url: String, reason: String },

    /// Library asked for after the one-time load had already started
    LibraryNotLoaded { library: String },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidUrl { url, reason } => {
                write!(f, "Invalid map script URL '{}': {}", url, reason)
            }
            MapError::InvalidOptions(msg) => {
                write!(f, "Invalid map options: {}", msg)
            }
            MapError::ScriptLoad { url, reason } => {
                write!(
                    f,
                    "The Google Maps JavaScript API could not load from {}: {}",
                    url, reason
                )
            }
            MapError::LibraryNotLoaded { library } => {
                write!(
                    f,
                    "Map library '{}' was requested after the widget started loading",
                    library
                )
            }
        }
    }
}

impl std::error::Error for MapError {}
