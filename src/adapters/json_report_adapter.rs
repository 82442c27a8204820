//! JSON report adapter.
//!
//! Writes the computed record set in the shape the dashboard consumes:
//! a base date plus the full calculated-theme list. The presentation layer
//! only sorts by the precomputed ranks and formats.

use crate::domain::error::ThemarankError;
use crate::domain::metrics::CalculatedTheme;
use crate::ports::report_port::ReportPort;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub struct JsonReportAdapter;

#[derive(Serialize)]
struct ReportPayload<'a> {
    base_date: NaiveDate,
    themes: &'a [CalculatedTheme],
}

impl ReportPort for JsonReportAdapter {
    fn write(
        &self,
        themes: &[CalculatedTheme],
        base_date: NaiveDate,
        output_path: &Path,
    ) -> Result<(), ThemarankError> {
        let payload = ReportPayload { base_date, themes };
        let json =
            serde_json::to_string_pretty(&payload).map_err(|e| ThemarankError::ReportWrite {
                file: output_path.display().to_string(),
                reason: e.to_string(),
            })?;
        fs::write(output_path, json).map_err(|e| ThemarankError::ReportWrite {
            file: output_path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
