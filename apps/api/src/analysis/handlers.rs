use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{error, info};

use crate::analysis::facts::FactSheet;
use crate::analysis::prompts::{QUALITY_PROMPT_TEMPLATE, SAFETY_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::factlog::FactLogStore;
use crate::state::AppState;

/// Response for both analysis endpoints.
///
/// Logging is secondary to the operator's immediate goal of obtaining the
/// prompt text: when the append fails the prompt is still returned,
/// `logged` is false and `log_error` carries the diagnostic for the UI
/// banner. The operator may retry after closing the file elsewhere.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub prompt: String,
    pub logged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

/// POST /api/v1/analysis/quality
pub async fn handle_quality_analysis(
    State(state): State<AppState>,
    Json(sheet): Json<FactSheet>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    sheet.validate()?;
    let facts = sheet.quality_facts();
    let fields = [("line", sheet.location.as_str())];
    Ok(Json(log_and_render(
        &state.quality_log,
        &facts,
        &fields,
        QUALITY_PROMPT_TEMPLATE,
    )))
}

/// POST /api/v1/analysis/safety
pub async fn handle_safety_analysis(
    State(state): State<AppState>,
    Json(sheet): Json<FactSheet>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    sheet.validate()?;
    let facts = sheet.safety_facts();
    let fields = [("location", sheet.location.as_str())];
    Ok(Json(log_and_render(
        &state.safety_log,
        &facts,
        &fields,
        SAFETY_PROMPT_TEMPLATE,
    )))
}

/// Appends the facts block to the category log and fills the prompt
/// template. A failed append degrades the response instead of failing the
/// request.
fn log_and_render(
    store: &FactLogStore,
    facts: &str,
    fields: &[(&str, &str)],
    template: &str,
) -> AnalyzeResponse {
    let prompt = template.replace("{facts}", facts);
    match store.append(facts, fields) {
        Ok(receipt) => {
            info!(case_id = %receipt.case_id, "fact record logged");
            AnalyzeResponse {
                prompt,
                logged: true,
                case_id: Some(receipt.case_id),
                timestamp: Some(receipt.timestamp),
                log_error: None,
            }
        }
        Err(e) => {
            error!("fact log append failed: {e}");
            AnalyzeResponse {
                prompt,
                logged: false,
                case_id: None,
                timestamp: None,
                log_error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_fact_sheet_deserialization() {
        let json = serde_json::json!({
            "what": "A00-00000 bracket",
            "how": "missing from the shipped lot",
            "occurred_on": "2026-04-01",
            "time_detail": "around 15:00",
            "location": "inspection line",
            "person": "T.K",
            "details": "5 units reached the customer."
        });
        let sheet: FactSheet = serde_json::from_value(json).unwrap();
        assert!(sheet.validate().is_ok());
        assert_eq!(sheet.location, "inspection line");
    }

    #[test]
    fn test_log_and_render_success_returns_case_id_and_appends() {
        let dir = tempdir().unwrap();
        let store = FactLogStore::new(dir.path(), "quality_fact_log.csv");

        let response = log_and_render(
            &store,
            "- one observed fact",
            &[("line", "Line 3")],
            QUALITY_PROMPT_TEMPLATE,
        );

        assert!(response.logged);
        assert!(response.case_id.is_some());
        assert!(response.log_error.is_none());
        assert!(response.prompt.contains("- one observed fact"));
        assert!(store.path().exists());
    }

    #[test]
    fn test_log_and_render_still_returns_prompt_when_append_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file in the way").unwrap();
        let store = FactLogStore::new(blocker.join("data"), "quality_fact_log.csv");

        let response = log_and_render(
            &store,
            "- one observed fact",
            &[],
            QUALITY_PROMPT_TEMPLATE,
        );

        assert!(!response.logged);
        assert!(response.case_id.is_none());
        assert!(response.log_error.is_some());
        // The prompt is the operator's primary goal and must survive.
        assert!(response.prompt.contains("- one observed fact"));
    }
}
