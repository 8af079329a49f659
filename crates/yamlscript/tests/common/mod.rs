// Mock libys shared by the integration tests

use libc::{c_char, c_int, c_longlong, c_void};
use serde_json::json;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::ptr::NonNull;
use yamlscript::ffi::{Api, GraalIsolate, GraalIsolateThread};

thread_local! {
    // Keeps the last response alive until the next call on this thread
    static RESPONSE: RefCell<CString> = RefCell::new(CString::default());
}

unsafe extern "C" fn create_isolate(
    _params: *mut c_void,
    isolate: *mut *mut GraalIsolate,
    _thread: *mut *mut GraalIsolateThread,
) -> c_int {
    unsafe { *isolate = NonNull::dangling().as_ptr() };
    0
}

unsafe extern "C" fn attach_thread(
    _isolate: *mut GraalIsolate,
    thread: *mut *mut GraalIsolateThread,
) -> c_int {
    unsafe { *thread = NonNull::dangling().as_ptr() };
    0
}

unsafe extern "C" fn detach_thread(_thread: *mut GraalIsolateThread) -> c_int {
    0
}

/// Echoes the input back as string data, or reports `error: <cause>` inputs
/// as evaluation errors
unsafe extern "C" fn load_ys_to_json(_thread: c_longlong, input: *const c_char) -> *const c_char {
    let input = unsafe { CStr::from_ptr(input) }.to_string_lossy().into_owned();

    let envelope = match input.strip_prefix("error: ") {
        Some(cause) => json!({"error": {"cause": cause, "type": "mock"}}),
        None => match serde_json::from_str::<serde_json::Value>(&input) {
            Ok(data) => json!({"data": data}),
            Err(_) => json!({"data": input}),
        },
    };

    let response = CString::new(envelope.to_string()).unwrap_or_default();
    RESPONSE.with(|slot| {
        *slot.borrow_mut() = response;
        slot.borrow().as_ptr()
    })
}

/// Symbol table whose evaluator treats JSON input as already evaluated data
pub fn echo_api() -> Api {
    Api {
        create_isolate,
        attach_thread,
        detach_thread,
        load_ys_to_json,
    }
}
