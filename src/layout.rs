use crate::chart::ChartSpec;
use serde::Serialize;

/// Inline style of a chart row: two figures side by side
pub const ROW_STYLE: &str = "display: flex; justify-content: space-around;";

/// Two charts shown side by side
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutRow {
    pub charts: [ChartSpec; 2],
}

/// Content of the output container
///
/// Either empty (nothing selected yet) or two rows of two charts.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardOutput {
    pub rows: Vec<LayoutRow>,
}

impl DashboardOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All charts in reading order
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.rows.iter().flat_map(|row| row.charts.iter())
    }

    pub fn chart_count(&self) -> usize {
        self.rows.len() * 2
    }
}

/// Lays out four charts as `[first, second]` over `[third, fourth]`
pub fn compose(charts: [ChartSpec; 4]) -> DashboardOutput {
    let [first, second, third, fourth] = charts;
    DashboardOutput {
        rows: vec![
            LayoutRow {
                charts: [first, second],
            },
            LayoutRow {
                charts: [third, fourth],
            },
        ],
    }
}
