//! Load YAMLScript documents through the `libys` shared library.
//!
//! All compilation and evaluation happens inside libys, a GraalVM native
//! image. This crate finds and loads the library, keeps one isolate alive
//! for the whole process and decodes the JSON it answers with.
//!
//! ```no_run
//! let data = yamlscript::load("!yamlscript/v0\nsay: inc(41)")?;
//! println!("{data}");
//! # Ok::<(), yamlscript::Error>(())
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod ffi;
pub mod runtime;

pub use config::{LIBYS_VERSION, LibraryConfig};
pub use error::{Error, Result};
pub use runtime::{Runtime, global, init};
pub use serde_json::Value;

use serde::de::DeserializeOwned;

/// Compile and evaluate a YAMLScript string with the process-wide runtime
pub fn load(input: &str) -> Result<Value> {
    global()?.load(input)
}

/// Compile and evaluate a YAMLScript string, deserializing the result into `T`
pub fn load_as<T: DeserializeOwned>(input: &str) -> Result<T> {
    global()?.load_as(input)
}
