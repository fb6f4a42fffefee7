//! Access to the operating system's dynamic loader
//!
//! Resolvers only talk to the OS through the `DynamicLoader` trait, so the
//! lookup strategies can be exercised against an in-process loader in tests.

use dlopen::raw::Library;
use libc::c_void;
use std::ffi::{CStr, OsStr};
use std::ptr::NonNull;

/// The subset of the OS dynamic-loading API used by resolvers.
pub trait DynamicLoader: Send + Sync {
    /// An open library handle
    type Library: Send + Sync;

    /// Open a library by path
    fn open(&self, path: &OsStr) -> Result<Self::Library, dlopen::Error>;

    /// Open the symbol table of the running process
    fn open_self(&self) -> Result<Self::Library, dlopen::Error>;

    /// Look up an exported symbol, returning `None` if it doesn't exist.
    ///
    /// # Safety
    ///
    /// `library` must have been returned by this loader.
    unsafe fn symbol(&self, library: &Self::Library, name: &CStr) -> Option<NonNull<c_void>>;
}

/// The native dynamic loader (`dlopen`/`dlsym` or `LoadLibrary`/
/// `GetProcAddress`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLoader;

impl DynamicLoader for SystemLoader {
    type Library = Library;

    fn open(&self, path: &OsStr) -> Result<Library, dlopen::Error> {
        Library::open(path)
    }

    fn open_self(&self) -> Result<Library, dlopen::Error> {
        Library::open_self()
    }

    unsafe fn symbol(&self, library: &Library, name: &CStr) -> Option<NonNull<c_void>> {
        match library.symbol_cstr::<*mut c_void>(name) {
            Ok(ptr) => NonNull::new(ptr),
            Err(e) => {
                log::trace!("Symbol {:?} not exported: {}", name, e);
                None
            }
        }
    }
}
