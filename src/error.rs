use std::fmt::{self, Display, Formatter};

/// Errors raised at construction boundaries. Nothing in the per-sample
/// estimation path returns a `Result` — degenerate paths are absorbed as
/// zero-contribution returns instead (see `integrator` module docs).
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// A `RenderConfig` or `Sensor` was constructed with an invalid value,
    /// e.g. `max_samples < 1` or a zero-sized image.
    InvalidConfig(String),
    /// A `Scene` was built with no primitives or no emitters, which makes
    /// `random_emitter` impossible to define.
    EmptyScene(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
            Error::EmptyScene(message) => write!(f, "empty scene: {message}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
