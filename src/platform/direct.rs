use super::Resolver;
use crate::loader::{DynamicLoader, SystemLoader};
use crate::{Error, Result};
use libc::c_void;
use once_cell::sync::OnceCell;
use std::ffi::{CStr, OsStr};
use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

/// The system OpenGL framework on macOS
pub const OPENGL_FRAMEWORK_PATH: &str =
    "/System/Library/Frameworks/OpenGL.framework/Versions/Current/OpenGL";

/// A resolver that looks entry points up directly in the symbol table of a
/// single library, opened on first use.
pub struct DirectResolver<L: DynamicLoader = SystemLoader> {
    loader: L,
    path: &'static str,
    library: OnceCell<Result<L::Library>>,
}

impl Default for DirectResolver {
    fn default() -> Self {
        Self::new(SystemLoader, OPENGL_FRAMEWORK_PATH)
    }
}

impl<L: DynamicLoader> Debug for DirectResolver<L> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DirectResolver")
            .field("path", &self.path)
            .field("loaded", &self.library.get().map(Result::is_ok))
            .finish()
    }
}

impl<L: DynamicLoader> DirectResolver<L> {
    /// Create a resolver for the library at `path`. The library isn't opened
    /// until it's first needed.
    pub fn new(loader: L, path: &'static str) -> Self {
        Self {
            loader,
            path,
            library: OnceCell::new(),
        }
    }

    /// The path of the backing library
    pub fn path(&self) -> &'static str {
        self.path
    }

    fn library(&self) -> Result<&L::Library> {
        self.library
            .get_or_init(|| match self.loader.open(OsStr::new(self.path)) {
                Ok(lib) => {
                    log::debug!("Opened OpenGL library {}", self.path);
                    Ok(lib)
                }
                Err(e) => {
                    log::warn!("Error opening OpenGL library {}: {}", self.path, e);
                    Err(Error::LibraryOpenFailed {
                        library: self.path.to_owned(),
                        reason: e.to_string(),
                    })
                }
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl<L: DynamicLoader> Resolver for DirectResolver<L> {
    fn load(&self) -> Result<()> {
        self.library().map(|_| ())
    }

    fn lookup(&self, name: &CStr) -> Result<Option<NonNull<c_void>>> {
        let library = self.library()?;
        Ok(unsafe { self.loader.symbol(library, name) })
    }
}
