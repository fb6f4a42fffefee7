use super::Resolver;
use crate::{Error, Result};
use libc::c_void;
use std::ffi::CStr;
use std::ptr::NonNull;

/// The resolver for platforms without OpenGL symbol resolution. Every call
/// fails with `Error::UnsupportedPlatform`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl Resolver for Unsupported {
    fn load(&self) -> Result<()> {
        Err(Error::UnsupportedPlatform)
    }

    fn lookup(&self, _: &CStr) -> Result<Option<NonNull<c_void>>> {
        Err(Error::UnsupportedPlatform)
    }
}
