use std::fmt;

/// Every failure the network, the training loop or the data loaders can raise.
///
/// None of these is recoverable mid-training: a run that hits one is aborted
/// and has to be restarted from scratch.
#[derive(Debug)]
pub enum Error {
    /// Operand shapes of a matrix operation are incompatible.
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// The dataset could not supply the requested example.
    DatasetAccess(String),
    /// A parameter or gradient buffer could not be allocated.
    ResourceUnavailable(String),
    InvalidConfig(String),
    InvalidData(String),
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { op, left, right } => write!(
                f,
                "dimension mismatch in {op}: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Error::DatasetAccess(msg) => write!(f, "dataset access failure: {msg}"),
            Error::ResourceUnavailable(msg) => write!(f, "resource unavailable: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
