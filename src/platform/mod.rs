//! Platform resolvers
//!
//! Each supported platform has its own strategy for turning an OpenGL entry
//! point name into an address. The strategy used by `get_proc_address` is
//! chosen at build time and exposed as `NativeResolver`.

mod direct;
mod indirect;
mod unsupported;

use crate::Result;
use libc::c_void;
use std::ffi::CStr;
use std::ptr::NonNull;

pub use direct::*;
pub use indirect::*;
pub use unsupported::*;

/// A strategy for resolving OpenGL entry points on one platform.
pub trait Resolver: Send + Sync {
    /// Open the backing library, if not already open.
    ///
    /// The outcome of the first attempt is cached, so this never opens the
    /// library more than once.
    fn load(&self) -> Result<()>;

    /// Look up an entry point by name, loading the backing library first if
    /// necessary. Returns `Ok(None)` if the library doesn't provide it.
    fn lookup(&self, name: &CStr) -> Result<Option<NonNull<c_void>>>;
}

/// The resolver for the platform this crate was built for
#[cfg(target_os = "macos")]
pub type NativeResolver = DirectResolver;

/// The resolver for the platform this crate was built for
#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
))]
pub type NativeResolver = IndirectResolver;

/// The resolver for the platform this crate was built for
#[cfg(not(any(
    target_os = "macos",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
pub type NativeResolver = Unsupported;
