//! Tests for CLI utilities

#[cfg(test)]
mod tests {
    use super::super::load::{library_config, read_input};
    use super::super::utils::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_read_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.ys");
        let content = "!yamlscript/v0\nsay: 42";
        fs::write(&path, content).unwrap();

        let result = read_source(path.to_str().unwrap());
        assert_eq!(result.unwrap(), content);
    }

    #[test]
    fn test_read_source_nonexistent_file() {
        let result = read_source("/nonexistent/file/path.ys");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_source_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.ys");
        fs::write(&path, "").unwrap();

        let result = read_source(path.to_str().unwrap());
        assert_eq!(result.unwrap(), "");
    }

    #[test]
    fn test_render_json_compact() {
        let value = json!({"a": [1, 2]});
        assert_eq!(render_json(&value, true).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_render_json_pretty() {
        let value = json!({"a": 1});
        assert_eq!(render_json(&value, false).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_library_flag_overrides_env() {
        let path = PathBuf::from("/opt/ys/libys.so.0.2.5");
        let config = library_config(Some(&path));
        assert_eq!(config.path, Some(path));
    }

    #[test]
    fn test_read_input_error_names_file() {
        let message = read_input("/nonexistent/file/path.ys").unwrap_err();
        assert!(message.starts_with("cannot read '/nonexistent/file/path.ys': "));
    }
}
