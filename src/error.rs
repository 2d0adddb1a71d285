use thiserror::Error;

/// Errors produced while ranking or while loading a ranking configuration
#[derive(Error, Debug)]
pub enum Error {
    /// A score was greater than the score before it.
    ///
    /// Raised lazily, at the point of iteration, because input is only
    /// inspected as it is consumed. `position` is the 0-based index of the
    /// element that broke the non-increasing order.
    #[error("not sorted by score: element {position} scores higher than its predecessor")]
    OrderingViolation { position: usize },

    #[error("unknown ranking strategy: {0}")]
    UnknownStrategy(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("TOML: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("YAML: {}", err))
    }
}
