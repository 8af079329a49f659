//! The libys runtime: one isolate, one attached thread per call.
//!
//! A [`Runtime`] owns a GraalVM isolate created once and never torn down.
//! Every call to [`Runtime::load`] attaches the calling OS thread to that
//! isolate, invokes `load_ys_to_json`, copies the response out and detaches
//! again before returning. Different OS threads can call concurrently; each
//! gets its own attached context.

use crate::config::LibraryConfig;
use crate::envelope;
use crate::error::{Error, Result};
use crate::ffi::{Api, GraalIsolate, GraalIsolateThread, NativeLibrary};
use libc::c_longlong;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

/// Process-wide runtime. A failed open is kept as its message.
static GLOBAL: OnceLock<std::result::Result<Runtime, String>> = OnceLock::new();

pub struct Runtime {
    api: Api,
    isolate: *mut GraalIsolate,
    // Opened through `NativeLibrary`, which is never unloaded
    dynamic: bool,
}

// SAFETY: a GraalVM isolate may be entered from any OS thread once that
// thread is attached, which `load_json` does for every call.
unsafe impl Send for Runtime {}
unsafe impl Sync for Runtime {}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("isolate", &self.isolate)
            .field("dynamic", &self.dynamic)
            .finish()
    }
}

impl Runtime {
    /// Resolve and load libys as described by `config`, then create the isolate
    pub fn open(config: &LibraryConfig) -> Result<Self> {
        let path = config.resolve()?;
        let api = NativeLibrary::open(&path)?.into_api();
        let mut runtime = Self::from_api(api)?;
        runtime.dynamic = true;
        Ok(runtime)
    }

    /// Create an isolate using an already resolved symbol table.
    ///
    /// Useful when libys is linked statically or the symbols come from
    /// somewhere other than [`NativeLibrary`]. The functions in `api` must
    /// stay callable for as long as the runtime is alive.
    pub fn from_api(api: Api) -> Result<Self> {
        let mut isolate: *mut GraalIsolate = ptr::null_mut();

        // No initial thread is created; threads are attached per call.
        // SAFETY: null params select the defaults; the isolate out pointer
        // is valid for the duration of the call.
        let code = unsafe { (api.create_isolate)(ptr::null_mut(), &mut isolate, ptr::null_mut()) };
        if code != 0 || isolate.is_null() {
            return Err(Error::IsolateCreation { code });
        }

        debug!(isolate = ?isolate, "created libys isolate");
        Ok(Runtime {
            api,
            isolate,
            dynamic: false,
        })
    }

    /// Compile and evaluate `input`, returning the evaluated data
    pub fn load(&self, input: &str) -> Result<Value> {
        envelope::decode(&self.load_json(input)?)
    }

    /// Like [`Runtime::load`], deserializing the data into `T`
    pub fn load_as<T: DeserializeOwned>(&self, input: &str) -> Result<T> {
        Ok(serde_json::from_value(self.load(input)?)?)
    }

    /// Run `load_ys_to_json` and return the undecoded response envelope
    pub fn load_json(&self, input: &str) -> Result<String> {
        let input = CString::new(input)?;
        let thread = self.attach()?;

        // SAFETY: `thread` is attached to our isolate and `input` is a valid
        // NUL-terminated string that outlives the call.
        let response = unsafe { (self.api.load_ys_to_json)(thread.as_handle(), input.as_ptr()) };
        if response.is_null() {
            return Err(Error::NullResponse);
        }

        // The response belongs to the isolate; copy it before detaching.
        // SAFETY: non-null and NUL-terminated per the libys contract.
        let json = unsafe { CStr::from_ptr(response) }.to_str()?.to_owned();
        trace!(bytes = json.len(), "libys response received");

        Ok(json)
    }

    fn attach(&self) -> Result<AttachedThread<'_>> {
        let mut thread: *mut GraalIsolateThread = ptr::null_mut();

        // SAFETY: the isolate was created by `from_api` and is never torn down.
        let code = unsafe { (self.api.attach_thread)(self.isolate, &mut thread) };
        if code != 0 || thread.is_null() {
            return Err(Error::ThreadAttach { code });
        }

        trace!(thread = ?thread, "attached thread");
        Ok(AttachedThread {
            api: &self.api,
            thread,
        })
    }
}

/// A thread attached to the isolate, detached again on drop
struct AttachedThread<'a> {
    api: &'a Api,
    thread: *mut GraalIsolateThread,
}

impl AttachedThread<'_> {
    fn as_handle(&self) -> c_longlong {
        self.thread as usize as c_longlong
    }
}

impl Drop for AttachedThread<'_> {
    fn drop(&mut self) {
        // SAFETY: `thread` came from a successful attach and is detached once.
        let code = unsafe { (self.api.detach_thread)(self.thread) };
        if code != 0 {
            warn!(code, "failed to detach thread");
        } else {
            trace!(thread = ?self.thread, "detached thread");
        }
    }
}

/// The process-wide runtime, opened on first use from [`LibraryConfig::from_env`].
///
/// If opening fails, the first caller receives the underlying error and every
/// later caller gets [`Error::RuntimeUnavailable`].
pub fn global() -> Result<&'static Runtime> {
    let mut first_error = None;
    let slot = GLOBAL.get_or_init(|| {
        Runtime::open(&LibraryConfig::from_env()).map_err(|e| {
            let message = e.to_string();
            first_error = Some(e);
            message
        })
    });

    match first_error {
        Some(e) => Err(e),
        None => stored(slot),
    }
}

/// Open the process-wide runtime with an explicit config.
///
/// Must run before anything else touches the global runtime.
pub fn init(config: &LibraryConfig) -> Result<&'static Runtime> {
    if GLOBAL.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }

    match Runtime::open(config) {
        Ok(runtime) => {
            GLOBAL
                .set(Ok(runtime))
                .map_err(|_| Error::AlreadyInitialized)?;
            GLOBAL.get().map_or(Err(Error::AlreadyInitialized), stored)
        }
        Err(e) => {
            let _ = GLOBAL.set(Err(e.to_string()));
            Err(e)
        }
    }
}

fn stored(slot: &'static std::result::Result<Runtime, String>) -> Result<&'static Runtime> {
    slot.as_ref()
        .map_err(|message| Error::RuntimeUnavailable(message.clone()))
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod runtime_tests;
