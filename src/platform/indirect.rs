use super::Resolver;
use crate::loader::{DynamicLoader, SystemLoader};
use crate::{Error, Result};
use const_cstr::{const_cstr, ConstCStr};
use libc::{c_char, c_void};
use once_cell::sync::OnceCell;
use std::ffi::CStr;
use std::fmt::{self, Debug, Formatter};
use std::mem::transmute;
use std::ptr::NonNull;

const_cstr! {
    pub GLX_GET_PROC_ADDRESS = "glXGetProcAddress";
    pub GLX_GET_PROC_ADDRESS_ARB = "glXGetProcAddressARB";
}

/// The GLX get-proc-address functions, in the order they're tried
pub const GLX_GET_PROC_ADDRESS_CANDIDATES: &[ConstCStr] =
    &[GLX_GET_PROC_ADDRESS, GLX_GET_PROC_ADDRESS_ARB];

type GetProcAddress = unsafe extern "C" fn(*const c_char) -> *const c_void;

/// A resolver that routes every lookup through a get-proc-address function
/// (such as `glXGetProcAddress`) found in the running process.
///
/// Extension and versioned entry points often aren't exported as ordinary
/// symbols, so the windowing system's resolver has to be asked for them.
/// Note that GLX may return a non-null address even for names the driver
/// doesn't implement.
///
/// Only a found get-proc-address function is cached. If none is exported
/// yet, the next lookup searches the process again, so GL can be loaded
/// after the first failed attempt.
pub struct IndirectResolver<L: DynamicLoader = SystemLoader> {
    loader: L,
    candidates: &'static [ConstCStr],
    process: OnceCell<Result<L::Library>>,
    get_proc_address: OnceCell<GetProcAddress>,
}

impl Default for IndirectResolver {
    fn default() -> Self {
        Self::new(SystemLoader, GLX_GET_PROC_ADDRESS_CANDIDATES)
    }
}

impl<L: DynamicLoader> Debug for IndirectResolver<L> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("IndirectResolver")
            .field("candidates", &self.candidate_names())
            .field("loaded", &self.process.get().map(Result::is_ok))
            .field(
                "get_proc_address",
                &self.get_proc_address.get().map(|&f| f as *const c_void),
            )
            .finish()
    }
}

impl<L: DynamicLoader> IndirectResolver<L> {
    /// Create a resolver that uses the first of `candidates` exported by the
    /// running process. Nothing is opened until it's first needed.
    pub fn new(loader: L, candidates: &'static [ConstCStr]) -> Self {
        Self {
            loader,
            candidates,
            process: OnceCell::new(),
            get_proc_address: OnceCell::new(),
        }
    }

    fn candidate_names(&self) -> Vec<&'static str> {
        self.candidates.iter().map(|c| c.to_str()).collect()
    }

    fn process(&self) -> Result<&L::Library> {
        self.process
            .get_or_init(|| match self.loader.open_self() {
                Ok(lib) => {
                    log::debug!("Opened process symbol table");
                    Ok(lib)
                }
                Err(e) => {
                    log::warn!("Error opening process symbol table: {}", e);
                    Err(Error::LibraryOpenFailed {
                        library: "process image".to_owned(),
                        reason: e.to_string(),
                    })
                }
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn get_proc_address(&self) -> Result<GetProcAddress> {
        let process = self.process()?;

        self.get_proc_address
            .get_or_try_init(|| {
                for candidate in self.candidates {
                    log::trace!("Trying {}", candidate.to_str());

                    let ptr = unsafe { self.loader.symbol(process, candidate.as_cstr()) };

                    if let Some(ptr) = ptr {
                        log::debug!("Using {} at {:p}", candidate.to_str(), ptr);
                        return Ok(unsafe {
                            transmute::<*mut c_void, GetProcAddress>(ptr.as_ptr())
                        });
                    }
                }

                Err(Error::IndirectionMissing {
                    candidates: self.candidate_names(),
                })
            })
            .copied()
    }
}

impl<L: DynamicLoader> Resolver for IndirectResolver<L> {
    fn load(&self) -> Result<()> {
        self.get_proc_address().map(|_| ())
    }

    fn lookup(&self, name: &CStr) -> Result<Option<NonNull<c_void>>> {
        let get_proc_address = self.get_proc_address()?;
        Ok(NonNull::new(unsafe { get_proc_address(name.as_ptr()) } as *mut c_void))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        GetProcAddress, IndirectResolver, GLX_GET_PROC_ADDRESS, GLX_GET_PROC_ADDRESS_ARB,
        GLX_GET_PROC_ADDRESS_CANDIDATES,
    };
    use crate::loader::mock::MockLoader;
    use crate::platform::Resolver;
    use crate::Error;
    use libc::{c_char, c_void};
    use std::ffi::{CStr, CString};
    use std::ptr::null;
    use std::sync::Barrier;
    use std::thread;

    static GEN_VERTEX_ARRAYS: u8 = 1;
    static DEBUG_MESSAGE_CALLBACK: u8 = 2;
    static EXPORTED: u8 = 3;

    unsafe extern "C" fn fake_get_proc_address(name: *const c_char) -> *const c_void {
        match CStr::from_ptr(name).to_bytes() {
            b"glGenVertexArrays" => &GEN_VERTEX_ARRAYS as *const u8 as _,
            b"glDebugMessageCallback" => &DEBUG_MESSAGE_CALLBACK as *const u8 as _,
            _ => null(),
        }
    }

    fn fake() -> *const c_void {
        fake_get_proc_address as GetProcAddress as *const c_void
    }

    fn lookup(resolver: &IndirectResolver<MockLoader>, name: &str) -> Option<*const u8> {
        let name = CString::new(name).unwrap();
        resolver
            .lookup(&name)
            .unwrap()
            .map(|p| p.as_ptr() as *const u8)
    }

    #[test]
    fn test_primary_candidate() {
        let loader = MockLoader::new(None)
            .export("glXGetProcAddress", fake())
            .export("glGenVertexArrays", &EXPORTED as *const u8 as _);
        let resolver = IndirectResolver::new(loader, GLX_GET_PROC_ADDRESS_CANDIDATES);

        assert_eq!(
            lookup(&resolver, "glGenVertexArrays"),
            Some(&GEN_VERTEX_ARRAYS as *const u8)
        );
        assert_eq!(lookup(&resolver, "glBegin"), None);
    }

    #[test]
    fn test_fallback_candidate() {
        let loader = MockLoader::new(None).export("glXGetProcAddressARB", fake());
        let resolver = IndirectResolver::new(loader, GLX_GET_PROC_ADDRESS_CANDIDATES);

        assert_eq!(
            lookup(&resolver, "glGenVertexArrays"),
            Some(&GEN_VERTEX_ARRAYS as *const u8)
        );
        assert_eq!(
            lookup(&resolver, "glDebugMessageCallback"),
            Some(&DEBUG_MESSAGE_CALLBACK as *const u8)
        );
        assert!(format!("{:?}", resolver).contains("glXGetProcAddressARB"));
        assert_eq!(resolver.loader.opens(), 1);
    }

    #[test]
    fn test_no_candidates() {
        let loader = MockLoader::new(None).export("glGenVertexArrays", fake());
        let resolver = IndirectResolver::new(loader, GLX_GET_PROC_ADDRESS_CANDIDATES);
        let name = CString::new("glGenVertexArrays").unwrap();

        match resolver.lookup(&name) {
            Err(Error::IndirectionMissing { candidates }) => {
                assert_eq!(candidates, ["glXGetProcAddress", "glXGetProcAddressARB"])
            }
            other => panic!("unexpected result {:?}", other),
        }

        assert!(resolver.load().is_err());
        assert_eq!(resolver.loader.opens(), 1);
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(GLX_GET_PROC_ADDRESS.to_str(), "glXGetProcAddress");
        assert_eq!(GLX_GET_PROC_ADDRESS_ARB.to_str(), "glXGetProcAddressARB");
        assert_eq!(GLX_GET_PROC_ADDRESS_CANDIDATES.len(), 2);
    }

    #[test]
    fn test_retries_after_missing_candidates() {
        let loader = MockLoader::new(None);
        let resolver = IndirectResolver::new(loader, GLX_GET_PROC_ADDRESS_CANDIDATES);

        assert!(matches!(
            resolver.load(),
            Err(Error::IndirectionMissing { .. })
        ));

        resolver.loader.add_export("glXGetProcAddressARB", fake());

        resolver.load().unwrap();
        assert_eq!(
            lookup(&resolver, "glGenVertexArrays"),
            Some(&GEN_VERTEX_ARRAYS as *const u8)
        );
        assert_eq!(resolver.loader.opens(), 1);
    }

    #[test]
    fn test_concurrent_first_lookup() {
        const THREADS: usize = 8;

        let loader = MockLoader::new(None).export("glXGetProcAddress", fake());
        let resolver = IndirectResolver::new(loader, GLX_GET_PROC_ADDRESS_CANDIDATES);
        let barrier = Barrier::new(THREADS);

        let (resolver, barrier) = (&resolver, &barrier);

        let addrs: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(move |_| {
                    s.spawn(move || {
                        barrier.wait();
                        lookup(&resolver, "glGenVertexArrays").map(|p| p as usize)
                    })
                })
                .collect();

            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let expected = &GEN_VERTEX_ARRAYS as *const u8 as usize;
        assert!(addrs.iter().all(|&addr| addr == Some(expected)));
        assert_eq!(resolver.loader.opens(), 1);
        assert_eq!(
            resolver.get_proc_address.get().map(|&f| f as *const c_void),
            Some(fake())
        );
    }

    #[test]
    fn test_process_open_failure() {
        let loader = MockLoader::new(Some("/not/the/process"));
        let resolver = IndirectResolver::new(loader, GLX_GET_PROC_ADDRESS_CANDIDATES);

        for _ in 0..2 {
            assert!(matches!(
                resolver.load(),
                Err(Error::LibraryOpenFailed { .. })
            ));
        }

        assert_eq!(resolver.loader.opens(), 1);
    }
}
