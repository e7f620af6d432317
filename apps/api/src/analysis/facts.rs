//! Fact sheet assembly: turns the form's labeled inputs into the single
//! facts block that is logged and substituted into a prompt template.

use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::errors::AppError;

/// One submitted fact sheet. `what` and `how` are required; everything
/// else may be left blank by the operator. The sheet is treated as opaque
/// text once assembled; nothing here is parsed back out.
#[derive(Debug, Clone, Deserialize)]
pub struct FactSheet {
    /// Subject of the report (part number, hazard type, ...).
    pub what: String,
    /// Observed phenomenon (what happened to it).
    pub how: String,
    /// Occurrence date; defaults to today when omitted.
    #[serde(default)]
    pub occurred_on: Option<NaiveDate>,
    /// Time of day or shift detail ("night shift", "around 15:00").
    #[serde(default)]
    pub time_detail: String,
    /// Process, line, or place ("machining line 1", "loading bay").
    #[serde(default)]
    pub location: String,
    /// Operator descriptor, initials only. Never a full name.
    #[serde(default)]
    pub person: String,
    /// Free-text findings, one observed fact per line.
    #[serde(default)]
    pub details: String,
}

impl FactSheet {
    /// Rejects sheets missing the two required inputs.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.what.trim().is_empty() || self.how.trim().is_empty() {
            return Err(AppError::Validation(
                "'what' and 'how' are required fields".to_string(),
            ));
        }
        Ok(())
    }

    fn occurrence_date(&self) -> NaiveDate {
        self.occurred_on.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Facts block for a quality-defect sheet.
    pub fn quality_facts(&self) -> String {
        format!(
            "[Facts reported by the customer]\n\
             - Subject: {}\n\
             - Phenomenon: {}\n\
             \n\
             [Facts established by the investigation]\n\
             - Date of occurrence: {}\n\
             - Time of day: {}\n\
             - Location: {}\n\
             - Operator: {}\n\
             \n\
             [Detailed facts, findings and 4M observations]\n\
             {}\n",
            self.what,
            self.how,
            self.occurrence_date(),
            self.time_detail,
            self.location,
            self.person,
            self.details
        )
    }

    /// Facts block for a safety-incident sheet.
    pub fn safety_facts(&self) -> String {
        format!(
            "[Incident summary]\n\
             - Incident type: {}\n\
             - Event: {}\n\
             \n\
             [Facts established by the investigation]\n\
             - Date of occurrence: {}\n\
             - Time of day: {}\n\
             - Location: {}\n\
             - Person involved: {}\n\
             \n\
             [Detailed facts, findings and observed contributing factors]\n\
             {}\n",
            self.what,
            self.how,
            self.occurrence_date(),
            self.time_detail,
            self.location,
            self.person,
            self.details
        )
    }
}
