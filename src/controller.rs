//! Reactive derivations of the dashboard.
//!
//! The page has two outputs driven by the dropdowns: the enabled state of the
//! year dropdown and the chart area. Each is a pure function of the current
//! selection so the web layer can call them independently on every change.

use crate::chart::{recession_charts, yearly_charts};
use crate::dataset::Dataset;
use crate::layout::{DashboardOutput, compose};
use crate::selection::{ReportType, Selection, Year};
use crate::views::{recession_view, yearly_view};

/// Whether the year dropdown is inert for this report type
///
/// Only the yearly report reads the year; every other state disables it.
pub fn compute_year_disabled(report_type: Option<ReportType>) -> bool {
    report_type != Some(ReportType::YearlyStatistics)
}

/// Chart rows to show for the given dropdown values
///
/// Returns an empty output when no report is selected, or when the yearly
/// report has no year yet. The recession report ignores `year`.
pub fn compute_output(
    dataset: &Dataset,
    report_type: Option<ReportType>,
    year: Option<Year>,
) -> DashboardOutput {
    match (report_type, year) {
        (Some(ReportType::RecessionPeriodStatistics), _) => {
            compose(recession_charts(recession_view(dataset)))
        }
        (Some(ReportType::YearlyStatistics), Some(year)) => {
            compose(yearly_charts(yearly_view(dataset, year), year))
        }
        (Some(ReportType::YearlyStatistics), None) | (None, _) => DashboardOutput::empty(),
    }
}

/// [`compute_output`] for a whole selection
pub fn output_for(dataset: &Dataset, selection: &Selection) -> DashboardOutput {
    compute_output(dataset, selection.report_type, selection.year)
}
