use serde::Serialize;
use std::ops::RangeInclusive;

/// Years offered by the year dropdown
pub const YEAR_RANGE: RangeInclusive<i32> = 1980..=2023;

/// Report types offered by the statistics dropdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ReportType {
    #[serde(rename = "Yearly Statistics")]
    YearlyStatistics,
    #[serde(rename = "Recession Period Statistics")]
    RecessionPeriodStatistics,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [
        ReportType::YearlyStatistics,
        ReportType::RecessionPeriodStatistics,
    ];

    /// Dropdown label, which doubles as the option value
    pub fn label(self) -> &'static str {
        match self {
            ReportType::YearlyStatistics => "Yearly Statistics",
            ReportType::RecessionPeriodStatistics => "Recession Period Statistics",
        }
    }

    /// Matches an exact dropdown value; anything else counts as no selection
    pub fn from_label(value: &str) -> Option<Self> {
        ReportType::ALL
            .into_iter()
            .find(|report| report.label() == value)
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A year the dashboard can report on, always within [`YEAR_RANGE`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Year(i32);

impl Year {
    pub fn new(value: i32) -> Option<Self> {
        YEAR_RANGE.contains(&value).then_some(Year(value))
    }

    /// Parses a dropdown value; non-numeric or out-of-range input is no selection
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<i32>().ok().and_then(Year::new)
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// Every selectable year, oldest first
    pub fn all() -> impl Iterator<Item = Year> {
        YEAR_RANGE.map(Year)
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current values of the two dropdowns
///
/// `None` stands for the placeholder state of a dropdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub report_type: Option<ReportType>,
    pub year: Option<Year>,
}

impl Selection {
    pub fn new(report_type: Option<ReportType>, year: Option<Year>) -> Self {
        Self { report_type, year }
    }

    /// Validates raw dropdown values at the boundary
    ///
    /// # Examples
    /// ```
    /// use autostats::selection::{ReportType, Selection};
    ///
    /// let selection = Selection::from_raw(Some("Yearly Statistics"), Some("1995"));
    /// assert_eq!(selection.report_type, Some(ReportType::YearlyStatistics));
    /// assert_eq!(selection.year.map(|y| y.get()), Some(1995));
    ///
    /// let placeholder = Selection::from_raw(Some("Select Statistics"), Some("Select-year"));
    /// assert_eq!(placeholder, Selection::default());
    /// ```
    pub fn from_raw(report_type: Option<&str>, year: Option<&str>) -> Self {
        Self {
            report_type: report_type.and_then(ReportType::from_label),
            year: year.and_then(Year::parse),
        }
    }
}
