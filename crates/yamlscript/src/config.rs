//! Locating the libys shared library on disk

use crate::error::{Error, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Version of libys this binding is built against
pub const LIBYS_VERSION: &str = "0.2.5";

/// Environment variable naming the exact library file to load
pub const LIBYS_PATH_ENV: &str = "LIBYS_PATH";

#[cfg(target_os = "macos")]
const LIBRARY_PATH_ENV: &str = "DYLD_LIBRARY_PATH";
#[cfg(windows)]
const LIBRARY_PATH_ENV: &str = "PATH";
#[cfg(not(any(target_os = "macos", windows)))]
const LIBRARY_PATH_ENV: &str = "LD_LIBRARY_PATH";

/// File name of the versioned libys library for the current platform
pub fn library_file_name() -> String {
    if cfg!(target_os = "macos") {
        format!("libys.{LIBYS_VERSION}.dylib")
    } else if cfg!(windows) {
        format!("ys.{LIBYS_VERSION}.dll")
    } else {
        format!("libys.so.{LIBYS_VERSION}")
    }
}

/// Where to look for libys.
///
/// An explicit `path` always wins. Otherwise each entry of `search_dirs` is
/// checked in order for [`library_file_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub path: Option<PathBuf>,
    pub search_dirs: Vec<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig {
            path: None,
            search_dirs: standard_dirs(env::var_os("HOME")),
        }
    }
}

impl LibraryConfig {
    /// Build a config from `LIBYS_PATH` and the platform library path variable
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var_os(LIBYS_PATH_ENV),
            env::var_os(LIBRARY_PATH_ENV),
            env::var_os("HOME"),
        )
    }

    fn from_vars(
        libys_path: Option<OsString>,
        library_path: Option<OsString>,
        home: Option<OsString>,
    ) -> Self {
        let path = libys_path
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let mut search_dirs: Vec<PathBuf> = library_path
            .as_deref()
            .map(|dirs| {
                env::split_paths(dirs)
                    .filter(|d| !d.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        search_dirs.extend(standard_dirs(home));

        LibraryConfig { path, search_dirs }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a directory to search ahead of the existing ones
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.insert(0, dir.into());
        self
    }

    /// Find the library file this config points at
    pub fn resolve(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            if path.is_file() {
                return Ok(path.clone());
            }
            return Err(Error::LibraryNotFound {
                searched: vec![path.clone()],
            });
        }

        let file_name = library_file_name();
        self.search_dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| Error::LibraryNotFound {
                searched: self.search_dirs.clone(),
            })
    }
}

fn standard_dirs(home: Option<OsString>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if cfg!(unix) {
        dirs.push(PathBuf::from("/usr/local/lib"));
        dirs.push(PathBuf::from("/usr/lib"));
    }
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        dirs.push(Path::new(&home).join(".local").join("lib"));
    }
    dirs
}
