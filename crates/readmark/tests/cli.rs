//! CLI integration tests for readmark commands.
//!
//! These tests focus on exit codes, JSON output and the text that survives rendering,
//! not on terminal styling which may change.

// Integration tests are not inside a cfg(test) module.
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// A short story with a script block that must never be searched.
const STORY: &str = "# The Cat

The cat sat on the mat.

The cat sat again.

<script>var cat = 1;</script>
";

/// An HTML page mixing readable, hidden and editable text.
const PAGE: &str = r#"<div>
<p>Visible text</p>
<script>hidden()</script>
<div contenteditable="true">draft</div>
<textarea>typed</textarea>
</div>
"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to create a temp directory holding `story.md` and `page.html`.
fn fixture_dir() -> tempfile::TempDir {
    let dir = temp_dir();
    fs::write(dir.path().join("story.md"), STORY).unwrap();
    fs::write(dir.path().join("page.html"), PAGE).unwrap();
    dir
}

/// Helper to get a readmark command with HOME isolated to the provided directory.
fn readmark(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("readmark").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG").current_dir(home);
    cmd
}

/// Runs a command expected to print JSON and parses stdout.
fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Runs a command expected to succeed and returns its stdout without styling.
fn plain_stdout(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    strip_ansi(&String::from_utf8(output).unwrap())
}

mod count {
    use super::*;

    #[test]
    fn counts_visible_occurrences() {
        let dir = fixture_dir();
        readmark(dir.path())
            .args(["count", "story.md", "cat"])
            .assert()
            .success()
            .stdout("2\n");
    }

    #[test]
    fn counts_overlapping_occurrences() {
        let dir = temp_dir();
        fs::write(dir.path().join("a.txt"), "aaaa\n").unwrap();
        readmark(dir.path())
            .args(["count", "a.txt", "aa"])
            .assert()
            .success()
            .stdout("3\n");
    }

    #[test]
    fn json_output() {
        let dir = fixture_dir();
        let json = super::json_output(readmark(dir.path()).args([
            "count", "story.md", "sat", "--json",
        ]));
        assert_eq!(json["text"], "sat");
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn hidden_text_is_not_counted() {
        let dir = fixture_dir();
        readmark(dir.path())
            .args(["count", "page.html", "hidden"])
            .assert()
            .success()
            .stdout("0\n");
        readmark(dir.path())
            .args(["count", "page.html", "draft"])
            .assert()
            .success()
            .stdout("0\n");
    }

    #[test]
    fn missing_file_fails() {
        let dir = temp_dir();
        readmark(dir.path())
            .args(["count", "nope.md", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn unsupported_file_type_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("doc.pdf"), "x").unwrap();
        readmark(dir.path())
            .args(["count", "doc.pdf", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

mod highlight {
    use super::*;

    #[test]
    fn renders_document_with_summary() {
        let dir = fixture_dir();
        let stdout = plain_stdout(readmark(dir.path()).args(["highlight", "story.md", "cat"]));
        assert!(stdout.contains("The cat sat on the mat."));
        assert!(stdout.contains("occurrence 1 of 2"));
        assert!(!stdout.contains("var cat"));
    }

    #[test]
    fn json_reports_highlight() {
        let dir = fixture_dir();
        let json = json_output(readmark(dir.path()).args([
            "highlight", "story.md", "cat", "-i", "1", "--json",
        ]));
        let info = &json["highlight"];
        assert_eq!(info["search_text"], "cat");
        assert_eq!(info["index"], 1);
        assert_eq!(info["start"], 4);
        assert_eq!(info["end"], 7);
        assert_eq!(info["unit"], "char");
        assert_eq!(info["marker_text"], "cat");
        assert!(info["sub_mark"].is_null());
        assert_eq!(json["total_matches"], 2);
        let markup = json["markup"].as_str().unwrap();
        assert!(markup.contains(
            "<p>The <mark class=\"readmark-highlight\">cat</mark> sat again.</p>"
        ));
    }

    #[test]
    fn missing_occurrence_fails() {
        let dir = fixture_dir();
        readmark(dir.path())
            .args(["highlight", "story.md", "cat", "-i", "5"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"))
            .stderr(predicate::str::contains("2 occurrence(s)"));
    }

    #[test]
    fn empty_text_fails() {
        let dir = fixture_dir();
        readmark(dir.path())
            .args(["highlight", "story.md", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid argument"));
    }

    #[test]
    fn negative_index_is_rejected() {
        let dir = fixture_dir();
        readmark(dir.path())
            .args(["highlight", "story.md", "cat", "-i", "-1"])
            .assert()
            .failure();
    }

    #[test]
    fn mark_nests_inside_highlight() {
        let dir = fixture_dir();
        let json = json_output(readmark(dir.path()).args([
            "highlight", "story.md", "sat", "--mark", "1:2", "--json",
        ]));
        assert_eq!(json["highlight"]["sub_mark"]["start"], 1);
        assert_eq!(json["highlight"]["sub_mark"]["length"], 2);
        assert_eq!(json["marks"][0]["applied"], true);
        let markup = json["markup"].as_str().unwrap();
        assert!(markup.contains(
            "<mark class=\"readmark-highlight\">s<mark class=\"readmark-mark\">at</mark></mark>"
        ));
    }

    #[test]
    fn later_mark_replaces_earlier() {
        let dir = fixture_dir();
        let json = json_output(readmark(dir.path()).args([
            "highlight", "story.md", "sat on", "-m", "0:3", "-m", "4:2", "--json",
        ]));
        let markup = json["markup"].as_str().unwrap();
        assert_eq!(markup.matches("readmark-mark").count(), 1);
        assert!(markup.contains("sat <mark class=\"readmark-mark\">on</mark>"));
    }

    #[test]
    fn out_of_range_mark_fails_but_keeps_highlight() {
        let dir = fixture_dir();
        let mut cmd = readmark(dir.path());
        cmd.args(["highlight", "story.md", "cat", "--mark", "0:10", "--json"]);
        cmd.assert().failure();
        let json = json_output(&mut cmd);
        assert_eq!(json["marks"][0]["applied"], false);
        assert!(
            json["marks"][0]["error"]
                .as_str()
                .unwrap()
                .contains("exceeds")
        );
        assert_eq!(json["highlight"]["marker_text"], "cat");
    }

    #[test]
    fn markup_output() {
        let dir = fixture_dir();
        let stdout = plain_stdout(readmark(dir.path()).args([
            "highlight", "story.md", "mat", "--markup",
        ]));
        assert!(stdout.contains("<mark class=\"readmark-highlight\">mat</mark>"));
    }

    #[test]
    fn marker_class_comes_from_config() {
        let dir = fixture_dir();
        fs::write(
            dir.path().join(".readmark.toml"),
            "[highlight]\ntag = \"span\"\nclass = \"spoken\"\n",
        )
        .unwrap();
        let json = json_output(readmark(dir.path()).args([
            "highlight", "story.md", "mat", "--json",
        ]));
        let markup = json["markup"].as_str().unwrap();
        assert!(markup.contains("<span class=\"spoken\">mat</span>"));
    }

    #[test]
    fn verbose_logs_diagnostics() {
        let dir = fixture_dir();
        readmark(dir.path())
            .args(["-v", "highlight", "story.md", "cat"])
            .assert()
            .success()
            .stderr(predicate::str::contains("highlighted occurrence"));
    }

    #[test]
    fn quiet_by_default() {
        let dir = fixture_dir();
        readmark(dir.path())
            .args(["highlight", "story.md", "cat"])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }
}

mod segments {
    use super::*;

    #[test]
    fn lists_visible_segments_in_order() {
        let dir = fixture_dir();
        let json = json_output(readmark(dir.path()).args(["segments", "story.md", "--json"]));
        let texts: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["text"].as_str().unwrap())
            .collect();
        assert_eq!(
            texts,
            vec!["The Cat", "The cat sat on the mat.", "The cat sat again."]
        );
        assert_eq!(json[0]["parent"], "h1");
        assert_eq!(json[1]["index"], 1);
    }

    #[test]
    fn skips_hidden_and_editable_text() {
        let dir = fixture_dir();
        let json = json_output(readmark(dir.path()).args(["segments", "page.html", "--json"]));
        let segments = json.as_array().unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0]["text"], "Visible text");
        assert_eq!(segments[0]["parent"], "p");
    }

    #[test]
    fn table_output() {
        let dir = fixture_dir();
        let stdout = plain_stdout(readmark(dir.path()).args(["segments", "story.md"]));
        assert!(stdout.contains("The cat sat again."));
        assert!(stdout.contains("Parent"));
    }

    #[test]
    fn empty_document() {
        let dir = temp_dir();
        fs::write(dir.path().join("empty.md"), "").unwrap();
        let stdout = plain_stdout(readmark(dir.path()).args(["segments", "empty.md"]));
        assert!(stdout.contains("(no visible text)"));
    }
}

mod narrate {
    use super::*;

    #[test]
    fn highlights_every_fragment() {
        let dir = fixture_dir();
        let json = json_output(readmark(dir.path()).args(["narrate", "story.md", "--json"]));
        assert_eq!(json["total"], 3);
        assert_eq!(json["highlighted"], 3);
        assert_eq!(json["fragments"][1]["text"], "The cat sat on the mat.");
        assert_eq!(json["fragments"][1]["highlighted"], true);
    }

    #[test]
    fn repeated_lines_use_later_occurrences() {
        let dir = temp_dir();
        fs::write(dir.path().join("notes.txt"), "Hello\nworld\nHello\n").unwrap();
        let json = json_output(readmark(dir.path()).args(["narrate", "notes.txt", "--json"]));
        let occurrences: Vec<u64> = json["fragments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["occurrence"].as_u64().unwrap())
            .collect();
        assert_eq!(occurrences, vec![0, 0, 1]);
        assert_eq!(json["highlighted"], 3);
    }

    #[test]
    fn marks_each_word() {
        let dir = fixture_dir();
        let json = json_output(readmark(dir.path()).args([
            "narrate", "story.md", "--marks", "--json",
        ]));
        let fragment = &json["fragments"][1];
        assert_eq!(fragment["marks_requested"], 6);
        assert_eq!(fragment["marks_applied"], 6);
    }

    #[test]
    fn table_output() {
        let dir = fixture_dir();
        let stdout = plain_stdout(readmark(dir.path()).args(["narrate", "story.md"]));
        assert!(stdout.contains("The cat sat again."));
        assert!(stdout.contains("3/3 fragments highlighted"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let home = temp_dir();
        let project = home.path().join("project");
        fs::create_dir(&project).unwrap();

        readmark(home.path())
            .current_dir(&project)
            .arg("init")
            .assert()
            .success();

        let contents = fs::read_to_string(project.join(".readmark.toml")).unwrap();
        assert!(contents.contains("[highlight]"));
        assert!(contents.contains("root = false"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".readmark.toml"), "existing").unwrap();

        readmark(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        let contents = fs::read_to_string(dir.path().join(".readmark.toml")).unwrap();
        assert_eq!(contents, "existing");
    }

    #[test]
    fn force_overwrites_broken_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".readmark.toml"), "not = [valid").unwrap();

        readmark(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".readmark.toml")).unwrap();
        assert!(contents.contains("[scan]"));
    }

    #[test]
    fn global_writes_to_home() {
        let home = temp_dir();
        let project = home.path().join("project");
        fs::create_dir(&project).unwrap();

        readmark(home.path())
            .current_dir(&project)
            .args(["init", "--global"])
            .assert()
            .success();

        assert!(home.path().join(".readmark.toml").exists());
        assert!(!project.join(".readmark.toml").exists());
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_defaults() {
        let dir = temp_dir();
        let stdout = plain_stdout(readmark(dir.path()).arg("config"));
        assert!(stdout.contains("[highlight]"));
        assert!(stdout.contains("class = \"readmark-highlight\""));
        assert!(stdout.contains("offset_unit = \"char\""));
    }

    #[test]
    fn reflects_local_overrides() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".readmark.toml"),
            "[scan]\noffset_unit = \"utf16\"\n",
        )
        .unwrap();
        let stdout = plain_stdout(readmark(dir.path()).arg("config"));
        assert!(stdout.contains("offset_unit = \"utf16\""));
    }

    #[test]
    fn warns_about_invalid_settings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".readmark.toml"),
            "[marks]\ntag = \"not a tag\"\n",
        )
        .unwrap();
        readmark(dir.path())
            .arg("config")
            .assert()
            .success()
            .stderr(predicate::str::contains("not a valid element name"));
    }

    #[test]
    fn invalid_toml_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".readmark.toml"), "not = [valid").unwrap();
        readmark(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}
