//! Report generation port trait.

use crate::domain::error::ThemarankError;
use crate::domain::metrics::CalculatedTheme;
use chrono::NaiveDate;
use std::path::Path;

/// Port for writing the computed record set for an external presentation
/// layer.
pub trait ReportPort {
    fn write(
        &self,
        themes: &[CalculatedTheme],
        base_date: NaiveDate,
        output_path: &Path,
    ) -> Result<(), ThemarankError>;
}
