//! Integration tests for readmark-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge -> validate.

// Integration tests are not inside a cfg(test) module.
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use readmark_config::{
    CONFIG_FILENAME, Config, ConfigError, ConfigWarning, OffsetUnit, ScrollBehavior, ScrollBlock,
};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    /// Owned temporary directory.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a config file in `rel_dir` and returns its path.
    fn create_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let dir = self.create_dir(rel_dir);
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_from_no_files_returns_default() {
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_root_config_ignores_parents() {
    let env = TestEnv::new();
    env.create_config("", "[highlight]\nclass = \"outer\"\n");
    env.create_config("book", "root = true\n[highlight]\ntag = \"span\"\n");
    let cwd = env.create_dir("book/chapters");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.highlight.tag, "span");
    assert_eq!(config.highlight.class, "readmark-highlight");
    assert_eq!(config.config_root, Some(env.path().join("book")));
}

#[test]
fn test_load_layers_nested_configs() {
    let env = TestEnv::new();
    env.create_config(
        "book",
        "root = true\n[scan]\noffset_unit = \"utf16\"\nskip_editable = false\n[scroll]\nblock = \"start\"\n",
    );
    env.create_config("book/part1", "[scan]\noffset_unit = \"byte\"\n");
    let cwd = env.create_dir("book/part1/ch1");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.scan.offset_unit, OffsetUnit::Byte);
    assert!(!config.scan.skip_editable);
    assert_eq!(config.scroll.block, ScrollBlock::Start);
    assert_eq!(config.scroll.behavior, ScrollBehavior::Smooth);
    assert_eq!(config.config_root, Some(env.path().join("book/part1")));
}

#[test]
fn test_parse_error_names_file() {
    let env = TestEnv::new();
    let bad = env.create_config("book", "root = true\n[scan\n");

    let err = Config::load(&env.path().join("book")).unwrap_err();

    assert!(matches!(err, ConfigError::ParseToml { ref path, .. } if *path == bad));
    assert!(err.to_string().contains(CONFIG_FILENAME));
}

#[test]
fn test_validate_reports_loaded_problems() {
    let env = TestEnv::new();
    env.create_config(
        "book",
        "root = true\n[highlight]\ntag = \"\"\n[scan]\nskip_tags = []\n",
    );

    let config = Config::load(&env.path().join("book")).unwrap();
    let warnings = config.validate();

    assert!(warnings.contains(&ConfigWarning::EmptyMarkerTag {
        section: "highlight"
    }));
    assert!(warnings.contains(&ConfigWarning::EmptySkipList));
}

#[test]
fn test_effective_settings_round_trip_through_file() {
    let env = TestEnv::new();
    env.create_config(
        "book",
        "root = true\n[marks]\nvalidate_before_clear = true\n[scan]\nskip_tags = \"aside\"\n",
    );
    let config = Config::load(&env.path().join("book")).unwrap();

    let written = env.create_config("copy", &format!("root = true\n{}", config.settings_to_toml()));
    let reloaded = Config::load_from_files(&[written]).unwrap();

    assert!(reloaded.marks.validate_before_clear);
    assert_eq!(reloaded.scan.skip_tags, vec!["aside"]);
    assert_eq!(reloaded.highlight, config.highlight);
}
