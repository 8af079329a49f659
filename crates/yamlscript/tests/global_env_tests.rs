// Opens the global runtime lazily from the environment; one test per binary
// because the runtime is process-wide.

use yamlscript::Error;
use yamlscript::config::LIBYS_PATH_ENV;

#[test]
fn test_first_load_reports_cause_then_runtime_unavailable() {
    let missing = "/nonexistent/yamlscript/env/libys.so";
    // SAFETY: single-threaded; no other test in this binary reads the environment.
    unsafe { std::env::set_var(LIBYS_PATH_ENV, missing) };

    match yamlscript::load("a: 1").unwrap_err() {
        Error::LibraryNotFound { searched } => {
            assert_eq!(searched, vec![std::path::PathBuf::from(missing)]);
        }
        other => panic!("Expected LibraryNotFound, got {other:?}"),
    }

    match yamlscript::load("a: 1").unwrap_err() {
        Error::RuntimeUnavailable(message) => assert!(message.contains(missing)),
        other => panic!("Expected RuntimeUnavailable, got {other:?}"),
    }
}
