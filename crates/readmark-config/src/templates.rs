//! Starter files written by `readmark init`.
//!
//! The templates under `templates/` are live TOML listing every setting at its default, so
//! tests can check them against [`Config::default`](crate::Config). They are handed out
//! with every setting commented out: a fresh file changes nothing until edited.

/// Project-level template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Per-user template.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Template for a `.readmark.toml` next to a set of documents.
pub fn local_template() -> String {
    commented(LOCAL_TEMPLATE)
}

/// Template for `~/.readmark.toml`.
pub fn global_template() -> String {
    commented(GLOBAL_TEMPLATE)
}

/// Prefixes every setting and section line with `# `, keeping comments and blank lines.
fn commented(template: &str) -> String {
    template
        .lines()
        .map(|line| match line {
            "" => String::new(),
            comment if comment.starts_with('#') => comment.to_string(),
            setting => format!("# {setting}"),
        })
        .map(|line| line + "\n")
        .collect()
}
