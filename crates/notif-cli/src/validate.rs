//! # Validate Subcommand
//!
//! Decodes a command or result document and reports every violation with
//! its path. Malformed JSON is reported separately from shape errors.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use notif_core::{DecodeError, Validate, Violation};
use notif_protocol::{NotificationCommand, NotificationCommandResult};

/// Arguments for the `notif validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document to validate, or `-` for standard input.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Which union the document should be.
    #[arg(long, value_enum, default_value_t = DocumentKind::Command)]
    pub kind: DocumentKind,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Top-level union a document is checked against.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A request body, `NotificationCommand`.
    Command,
    /// A response body, `NotificationCommandResult`.
    Result,
}

/// Outcome of checking one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub kind: DocumentKind,
    pub valid: bool,
    /// Tag of the decoded value when the document is valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Parser message when the document is not JSON at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_error: Option<String>,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    fn from_decode<T>(
        kind: DocumentKind,
        decoded: Result<T, DecodeError>,
        tag: impl FnOnce(&T) -> String,
    ) -> Self {
        match decoded {
            Ok(value) => Self {
                kind,
                valid: true,
                tag: Some(tag(&value)),
                syntax_error: None,
                violations: Vec::new(),
            },
            Err(DecodeError::Syntax(e)) => Self {
                kind,
                valid: false,
                tag: None,
                syntax_error: Some(e.to_string()),
                violations: Vec::new(),
            },
            Err(DecodeError::Invalid(e)) => Self {
                kind,
                valid: false,
                tag: None,
                syntax_error: None,
                violations: e.violations(),
            },
        }
    }

    /// Text rendering: `valid (<tag>)`, or one line per problem.
    pub fn render_text(&self) -> String {
        if self.valid {
            return match self.tag {
                Some(ref tag) => format!("valid ({tag})"),
                None => "valid".to_string(),
            };
        }
        let mut lines = Vec::new();
        if let Some(ref e) = self.syntax_error {
            lines.push(format!("malformed JSON: {e}"));
        }
        lines.extend(self.violations.iter().map(|v| v.to_string()));
        lines.join("\n")
    }
}

/// Check `text` as a document of the given kind.
pub fn check_document(kind: DocumentKind, text: &str) -> ValidationReport {
    match kind {
        DocumentKind::Command => {
            ValidationReport::from_decode(kind, NotificationCommand::decode(text), |c| {
                c.tag().to_string()
            })
        }
        DocumentKind::Result => {
            ValidationReport::from_decode(kind, NotificationCommandResult::decode(text), |r| {
                match r {
                    NotificationCommandResult::CommandSuccess(s) => format!("{}/{}", r.tag(), s.tag()),
                    NotificationCommandResult::CommandFailure(f) => format!("{}/{}", r.tag(), f.tag()),
                }
            })
        }
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document is valid, 2 when it is not.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let text = crate::read_input(&args.input)?;
    let report = check_document(args.kind, &text);

    tracing::info!(
        input = %args.input.display(),
        valid = report.valid,
        violations = report.violations.len(),
        "checked document"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render_text());
    }

    Ok(if report.valid { 0 } else { 2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_command_reports_tag() {
        let report = check_document(
            DocumentKind::Command,
            r#"{"type":"GetNotifications","data":0}"#,
        );
        assert!(report.valid);
        assert_eq!(report.render_text(), "valid (GetNotifications)");
    }

    #[test]
    fn valid_result_reports_both_tags() {
        let report = check_document(
            DocumentKind::Result,
            r#"{"type":"CommandFailure","data":{"type":"InvalidCommand","data":"x"}}"#,
        );
        assert_eq!(report.tag.as_deref(), Some("CommandFailure/InvalidCommand"));
    }

    #[test]
    fn every_violation_is_listed() {
        let report = check_document(
            DocumentKind::Command,
            r#"{"type":"NotifyUser","data":{"id":"zero","expiration":{"type":"Later"}}}"#,
        );
        assert!(!report.valid);
        let text = report.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "data.id: expected non-negative integer, found string");
        assert_eq!(lines[1], "data.message: missing field");
        assert!(lines[2].starts_with("data.expiration: unknown tag \"Later\""));
    }

    #[test]
    fn syntax_error_is_separate_from_violations() {
        let report = check_document(DocumentKind::Result, "{\"type\":");
        assert!(!report.valid);
        assert!(report.syntax_error.is_some());
        assert!(report.violations.is_empty());
        assert!(report.render_text().starts_with("malformed JSON: "));
    }

    #[test]
    fn json_report_shape() {
        let report = check_document(DocumentKind::Command, r#"{"type":"Nope"}"#);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "command");
        assert_eq!(json["valid"], false);
        assert_eq!(json["violations"][0]["path"], "");
        assert!(json.get("tag").is_none());
    }

    #[test]
    fn run_validate_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"type":"ClearAllNotifications"}"#).unwrap();
        std::fs::write(&bad, r#"{"type":"ClearNotifications"}"#).unwrap();

        let args = |input: PathBuf| ValidateArgs {
            input,
            kind: DocumentKind::Command,
            json: false,
        };
        assert_eq!(run_validate(&args(good)).unwrap(), 0);
        assert_eq!(run_validate(&args(bad)).unwrap(), 2);
        assert!(run_validate(&args(dir.path().join("absent.json"))).is_err());
    }
}
