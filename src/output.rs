// src/output.rs
// =============================================================================
// Writes the final report as pretty-printed JSON (2-space indent).
//
// With a path the report goes to that file, parent directories created as
// needed. Without one it goes to stdout.
// =============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::report::Report;

pub fn write_report(report: &Report, path: Option<&Path>) -> Result<()> {
    let json = render(report)?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), entities = report.total(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .context("failed to write report to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    Ok(())
}

// serde_json's pretty printer already indents with two spaces
pub fn render(report: &Report) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report {
            emails: vec!["a@b.com".into()],
            phone_numbers: vec!["(555) 123-4567".into()],
            ..Report::default()
        }
    }

    #[test]
    fn test_render_is_indented_with_two_spaces() {
        let json = render(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"emails\": [\n    \"a@b.com\"\n  ],"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_empty_report_keeps_every_key() {
        let json = render(&Report::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert!(object.values().all(|v| v.as_array().is_some_and(|a| a.is_empty())));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/report.json");

        write_report(&sample(), Some(&path)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["emails"][0], "a@b.com");
        assert_eq!(value["phone_numbers"][0], "(555) 123-4567");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, "stale").unwrap();

        write_report(&Report::default(), Some(&path)).unwrap();

        assert!(fs::read_to_string(&path).unwrap().starts_with('{'));
    }

    #[test]
    fn test_write_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = write_report(&sample(), Some(&blocker.join("report.json")));
        assert!(result.is_err());
    }
}
