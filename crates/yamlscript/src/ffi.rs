//! Raw C ABI surface of libys.
//!
//! libys is a GraalVM native image. Besides its own entry point
//! (`load_ys_to_json`) it exports the standard GraalVM isolate API used to
//! create an isolate and to attach/detach OS threads to it.
//!
//! # Safety
//!
//! Every function pointer in [`Api`] is called across the C ABI. The pointers
//! must come from a library (or an in-process table) whose signatures match
//! the declarations below exactly.

use crate::error::{Error, Result};
use libc::{c_char, c_int, c_longlong, c_void};
use libloading::Library;
use std::path::Path;
use tracing::debug;

/// Opaque `graal_isolate_t`
#[repr(C)]
pub struct GraalIsolate {
    _private: [u8; 0],
}

/// Opaque `graal_isolatethread_t`
#[repr(C)]
pub struct GraalIsolateThread {
    _private: [u8; 0],
}

pub type CreateIsolateFn = unsafe extern "C" fn(
    params: *mut c_void,
    isolate: *mut *mut GraalIsolate,
    thread: *mut *mut GraalIsolateThread,
) -> c_int;

pub type AttachThreadFn = unsafe extern "C" fn(
    isolate: *mut GraalIsolate,
    thread: *mut *mut GraalIsolateThread,
) -> c_int;

pub type DetachThreadFn = unsafe extern "C" fn(thread: *mut GraalIsolateThread) -> c_int;

/// libys takes the isolate thread as a `long long`
pub type LoadYsToJsonFn =
    unsafe extern "C" fn(thread: c_longlong, input: *const c_char) -> *const c_char;

/// Symbol table for one libys instance
#[derive(Clone, Copy, Debug)]
pub struct Api {
    pub create_isolate: CreateIsolateFn,
    pub attach_thread: AttachThreadFn,
    pub detach_thread: DetachThreadFn,
    pub load_ys_to_json: LoadYsToJsonFn,
}

/// A dynamically loaded libys together with its symbol table
pub struct NativeLibrary {
    library: Library,
    api: Api,
}

impl NativeLibrary {
    /// Load libys from `path` and resolve all required symbols
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading libys");

        // SAFETY: loading libys runs its initialisers, which have no
        // preconditions beyond being loaded once per path.
        let library = unsafe { Library::new(path) }?;

        // SAFETY: the function types above mirror libys' exported header.
        let api = unsafe {
            Api {
                create_isolate: symbol(&library, "graal_create_isolate")?,
                attach_thread: symbol(&library, "graal_attach_thread")?,
                detach_thread: symbol(&library, "graal_detach_thread")?,
                load_ys_to_json: symbol(&library, "load_ys_to_json")?,
            }
        };

        Ok(NativeLibrary { library, api })
    }

    /// Give up the library handle and keep only the symbol table.
    ///
    /// The library stays mapped for the rest of the process: an isolate
    /// created from `api` has no teardown here and its native threads keep
    /// running code from the image.
    pub(crate) fn into_api(self) -> Api {
        keep_loaded(self.library);
        self.api
    }
}

/// Leak the handle so the library is never unloaded
fn keep_loaded(library: Library) {
    std::mem::forget(library);
}

/// Look up `name` and copy the function pointer out of the symbol
///
/// # Safety
///
/// `T` must be the exact function pointer type of the exported symbol.
unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T> {
    let mut bytes = Vec::with_capacity(name.len() + 1);
    bytes.extend_from_slice(name.as_bytes());
    bytes.push(0);

    let sym = unsafe { library.get::<T>(&bytes) }
        .map_err(|source| Error::MissingSymbol { name, source })?;
    Ok(*sym)
}
