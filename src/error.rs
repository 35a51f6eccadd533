use thiserror::Error;

/// Errors from configuring a sweeper or loading points.
///
/// Triangulation itself never fails, degenerate input only yields fewer
/// triangles.
#[derive(Debug, Error)]
pub enum Error {
    /// A builder setting is out of range.
    #[error("invalid {name}: {value}")]
    InvalidConfig {
        /// setting name
        name: &'static str,
        value: f64,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be read as two coordinates.
    #[error("line {line}: cannot parse point from {content:?}")]
    Parse { line: usize, content: String },

    /// A coordinate parsed but is NaN or infinite.
    #[error("line {line}: coordinate is not finite")]
    NonFiniteCoordinate { line: usize },
}
