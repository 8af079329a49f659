//! Loading a document and printing the result

use crate::utils::{read_source, render_json};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use yamlscript::{LibraryConfig, Runtime};

pub struct LoadOptions {
    pub file: String,
    pub library: Option<PathBuf>,
    pub compact: bool,
    pub raw: bool,
}

/// Build the library config from the environment plus any `--library` override
pub fn library_config(library: Option<&PathBuf>) -> LibraryConfig {
    let config = LibraryConfig::from_env();
    match library {
        Some(path) => config.with_path(path),
        None => config,
    }
}

/// Read the document, describing a failure in the form printed after `Error: `
pub fn read_input(file: &str) -> Result<String, String> {
    read_source(file).map_err(|err| format!("cannot read '{file}': {err}"))
}

/// Load a YAMLScript file and print its data as JSON
pub fn handle_load(options: &LoadOptions) {
    let file = &options.file;
    let source = match read_input(file) {
        Ok(content) => content,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    };

    let config = library_config(options.library.as_ref());
    let runtime = match Runtime::open(&config) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    debug!(file = %file, bytes = source.len(), "loading document");

    let output = if options.raw {
        runtime.load_json(&source).map_err(|e| e.to_string())
    } else {
        runtime
            .load(&source)
            .map_err(|e| e.to_string())
            .and_then(|value| render_json(&value, options.compact).map_err(|e| e.to_string()))
    };

    match output {
        Ok(text) => println!("{text}"),
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    }
}
