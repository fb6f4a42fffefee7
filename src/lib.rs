//! Dynamically-resolved OpenGL entry points
//!
//! This crate answers one question: where in memory is a given OpenGL
//! function? Entry points are described by a `SymbolDescriptor` and resolved
//! through the platform's native dynamic loader. If a symbol can't be found,
//! the returned error renders a diagnostic listing the OpenGL versions and
//! extensions that provide it.

pub extern crate dlopen;

#[macro_use]
mod macros;

mod address;
mod descriptor;
pub mod diagnostic;
mod error;
pub mod loader;
pub mod platform;
pub mod symbols;

pub use address::ResolvedAddress;
pub use descriptor::*;
pub use error::*;

use lazy_static::lazy_static;
use platform::{NativeResolver, Resolver};
use std::ffi::CString;

lazy_static! {
    static ref NATIVE: NativeResolver = NativeResolver::default();
}

/// Get the process-wide resolver for this platform.
pub fn native_resolver() -> &'static NativeResolver {
    &NATIVE
}

/// Attempt to load the system OpenGL library, if not already loaded.
pub fn load_gl() -> Result<()> {
    NATIVE.load()
}

/// Resolve an entry point using the native resolver for this platform.
pub fn get_proc_address(descriptor: &SymbolDescriptor) -> Result<ResolvedAddress> {
    resolve_with(native_resolver(), descriptor)
}

/// Resolve an entry point and cast it to the function pointer type `F`.
///
/// # Safety
///
/// `F` must match the signature and calling convention of the entry point.
pub unsafe fn get_proc<F: Copy>(descriptor: &SymbolDescriptor) -> Result<F> {
    get_proc_address(descriptor).map(|addr| addr.cast())
}

/// Resolve an entry point using the native resolver, aborting the process
/// with a diagnostic if it can't be found.
pub fn require(descriptor: &SymbolDescriptor) -> ResolvedAddress {
    require_with(native_resolver(), descriptor)
}

/// Resolve an entry point using the given resolver.
pub fn resolve_with<R: Resolver + ?Sized>(
    resolver: &R,
    descriptor: &SymbolDescriptor,
) -> Result<ResolvedAddress> {
    let name = CString::new(descriptor.name()).map_err(|_| Error::InvalidName {
        name: descriptor.name(),
    })?;

    match resolver.lookup(&name)? {
        Some(ptr) => {
            log::trace!("Resolved {} at {:p}", descriptor.name(), ptr);
            Ok(ResolvedAddress::new(ptr))
        }
        None => Err(Error::SymbolNotFound(diagnostic::MissingSymbol::new(
            *descriptor,
        ))),
    }
}

/// Resolve an entry point using the given resolver, aborting the process with
/// a diagnostic if it can't be found.
pub fn require_with<R: Resolver + ?Sized>(
    resolver: &R,
    descriptor: &SymbolDescriptor,
) -> ResolvedAddress {
    match resolve_with(resolver, descriptor) {
        Ok(addr) => addr,
        Err(e) => fatal(&e),
    }
}

fn fatal(error: &Error) -> ! {
    if log::log_enabled!(log::Level::Error) {
        log::error!("{}", error);
        log::logger().flush();
    } else {
        eprintln!("{}", error);
    }

    std::process::abort()
}
