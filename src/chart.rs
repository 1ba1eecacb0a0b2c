use crate::aggregate::SummaryTable;
use crate::dataset::Column;
use crate::selection::Year;
use crate::views::ViewTables;
use serde::Serialize;

pub const RECESSION_TREND_TITLE: &str = "Average Automobile Sales fluctuation over Recession Period";
pub const RECESSION_BY_TYPE_TITLE: &str = "Average Vehicles Sold by Vehicle Type During Recession";
pub const RECESSION_EXPENDITURE_TITLE: &str =
    "Total Advertising Expenditure by Vehicle Type During Recession";
pub const RECESSION_UNEMPLOYMENT_TITLE: &str = "Effect of Unemployment Rate on Vehicle Type and Sales";

pub const YEARLY_TREND_TITLE: &str = "Yearly Automobile Sales";
pub const YEARLY_MONTHLY_TITLE: &str = "Total Monthly Automobile Sales";
pub const YEARLY_EXPENDITURE_TITLE: &str = "Total Advertisement Expenditure by Vehicle Type";

/// Title of the per-type bar chart for the selected year
pub fn yearly_by_type_title(year: Year) -> String {
    format!("Average Vehicles Sold by Vehicle Type in {}", year)
}

/// Available chart types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Points joined in table order
    Line,
    /// One bar per row, optionally coloured by a category
    Bar,
    /// One slice per row, sized by its share of the total
    Pie,
}

impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

/// Mapping of table columns onto visual channels
///
/// For pie charts `x` names the slices and `y` sizes them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Encoding {
    pub x: Column,
    pub y: Column,
    pub color: Option<Column>,
    pub x_label: String,
    pub y_label: String,
}

impl Encoding {
    /// Axis labels default to the column headers
    pub fn new(x: Column, y: Column) -> Self {
        Self {
            x,
            y,
            color: None,
            x_label: x.header().to_string(),
            y_label: y.header().to_string(),
        }
    }

    pub fn with_color(mut self, color: Column) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }
}

/// A chart ready to be drawn: what to draw, from which table, under which title
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub encoding: Encoding,
    pub data: SummaryTable,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, data: SummaryTable, encoding: Encoding, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            encoding,
            data,
        }
    }

    pub fn line(data: SummaryTable, encoding: Encoding, title: impl Into<String>) -> Self {
        Self::new(ChartKind::Line, data, encoding, title)
    }

    pub fn bar(data: SummaryTable, encoding: Encoding, title: impl Into<String>) -> Self {
        Self::new(ChartKind::Bar, data, encoding, title)
    }

    pub fn pie(data: SummaryTable, encoding: Encoding, title: impl Into<String>) -> Self {
        Self::new(ChartKind::Pie, data, encoding, title)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Charts of the recession report, in layout order
pub fn recession_charts(tables: ViewTables) -> [ChartSpec; 4] {
    let [trend, by_type, expenditure, unemployment] = tables;

    [
        ChartSpec::line(
            trend,
            Encoding::new(Column::Year, Column::AutomobileSales),
            RECESSION_TREND_TITLE,
        ),
        ChartSpec::bar(
            by_type,
            Encoding::new(Column::VehicleType, Column::AutomobileSales),
            RECESSION_BY_TYPE_TITLE,
        ),
        ChartSpec::pie(
            expenditure,
            Encoding::new(Column::VehicleType, Column::AdvertisingExpenditure),
            RECESSION_EXPENDITURE_TITLE,
        ),
        ChartSpec::bar(
            unemployment,
            Encoding::new(Column::UnemploymentRate, Column::AutomobileSales)
                .with_color(Column::VehicleType)
                .with_labels("Unemployment Rate", "Average Automobile Sales"),
            RECESSION_UNEMPLOYMENT_TITLE,
        ),
    ]
}

/// Charts of the yearly report for `year`, in layout order
pub fn yearly_charts(tables: ViewTables, year: Year) -> [ChartSpec; 4] {
    let [trend, monthly, by_type, expenditure] = tables;

    [
        ChartSpec::line(
            trend,
            Encoding::new(Column::Year, Column::AutomobileSales),
            YEARLY_TREND_TITLE,
        ),
        ChartSpec::line(
            monthly,
            Encoding::new(Column::Month, Column::AutomobileSales),
            YEARLY_MONTHLY_TITLE,
        ),
        ChartSpec::bar(
            by_type,
            Encoding::new(Column::VehicleType, Column::AutomobileSales),
            yearly_by_type_title(year),
        ),
        ChartSpec::pie(
            expenditure,
            Encoding::new(Column::VehicleType, Column::AdvertisingExpenditure),
            YEARLY_EXPENDITURE_TITLE,
        ),
    ]
}
