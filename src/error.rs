use crate::diagnostic::MissingSymbol;
use std::fmt::{self, Debug, Display, Formatter};

/// An error resolving an OpenGL entry point
#[derive(Clone, thiserror::Error)]
pub enum Error {
    /// The dynamic loader could not open the library or process image
    #[error("Failed to open {library}: {reason}")]
    LibraryOpenFailed { library: String, reason: String },

    /// None of the candidate get-proc-address functions could be found
    #[error("No get-proc-address function found (tried {})", .candidates.join(", "))]
    IndirectionMissing { candidates: Vec<&'static str> },

    /// The requested entry point doesn't exist
    #[error("{0}")]
    SymbolNotFound(MissingSymbol),

    /// The symbol name can't be passed to the dynamic loader
    #[error("Invalid symbol name {name:?}: contains a NUL byte")]
    InvalidName { name: &'static str },

    /// No resolver exists for this platform
    #[error("OpenGL symbol resolution is not implemented for this OS (unsupported OS)")]
    UnsupportedPlatform,
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

/// An OpenGL symbol resolution result type
pub type Result<T> = std::result::Result<T, Error>;
