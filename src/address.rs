use libc::c_void;
use std::fmt::{self, Debug, Formatter};
use std::mem::{size_of, transmute_copy};
use std::ptr::NonNull;

/// The address of a resolved entry point.
///
/// The address is never null and stays valid for as long as the library it
/// was resolved from remains loaded, which for the built-in resolvers is the
/// rest of the process lifetime. It carries no type information.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedAddress(NonNull<c_void>);

unsafe impl Send for ResolvedAddress {}
unsafe impl Sync for ResolvedAddress {}

impl Debug for ResolvedAddress {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ResolvedAddress({:p})", self.0)
    }
}

impl ResolvedAddress {
    pub(crate) fn new(ptr: NonNull<c_void>) -> Self {
        Self(ptr)
    }

    /// Get the raw address
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// Reinterpret this address as a function pointer (or any other
    /// pointer-sized value).
    ///
    /// # Panics
    ///
    /// Panics if `F` isn't the size of a pointer.
    ///
    /// # Safety
    ///
    /// `F` must match the signature and calling convention of the resolved
    /// entry point. Calling through a mismatched type is undefined behavior.
    pub unsafe fn cast<F: Copy>(self) -> F {
        assert_eq!(
            size_of::<F>(),
            size_of::<*mut c_void>(),
            "resolved addresses can only be cast to pointer-sized types"
        );

        transmute_copy(&self.0)
    }
}
