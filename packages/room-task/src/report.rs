//! Final process report: one JSON object on stdout, exit code 0 or 1.

use serde::Serialize;
use serde_json::Value;

use crate::runner::RunReport;

/// Payload when no step failed. `content` is the last response body.
#[derive(Debug, Serialize)]
pub struct SuccessReport {
    pub changed: bool,
    pub content: Value,
}

/// Payload when at least one step failed. `msg` carries the diagnostic
/// body of the last response.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub failed: bool,
    pub msg: Value,
}

/// Render the final JSON line and the matching process exit code.
pub fn render(report: &RunReport) -> (String, i32) {
    if report.failed {
        let payload = FailureReport {
            failed: true,
            msg: report.last_body.clone(),
        };
        let line = serde_json::to_string(&payload)
            .unwrap_or_else(|_| r#"{"failed":true,"msg":null}"#.to_string());
        (line, 1)
    } else {
        let payload = SuccessReport {
            changed: report.changed,
            content: report.last_body.clone(),
        };
        let line = serde_json::to_string(&payload)
            .unwrap_or_else(|_| r#"{"changed":false,"content":null}"#.to_string());
        (line, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_success() {
        let report = RunReport {
            changed: true,
            failed: false,
            last_body: json!({"id": "abc123"}),
            steps: Vec::new(),
        };
        let (line, code) = render(&report);
        assert_eq!(code, 0);
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value, json!({"changed": true, "content": {"id": "abc123"}}));
    }

    #[test]
    fn test_render_failure() {
        let report = RunReport {
            changed: false,
            failed: true,
            last_body: json!("503 Service Unavailable"),
            steps: Vec::new(),
        };
        let (line, code) = render(&report);
        assert_eq!(code, 1);
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value, json!({"failed": true, "msg": "503 Service Unavailable"}));
    }

    #[test]
    fn test_render_no_change_success() {
        let report = RunReport::default();
        let (line, code) = render(&report);
        assert_eq!(code, 0);
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value, json!({"changed": false, "content": null}));
    }
}
