//! Summary tables behind the two dashboard reports.
//!
//! Each report produces exactly four tables, in the order the charts are laid
//! out: top-left, top-right, bottom-left, bottom-right.

use crate::aggregate::SummaryTable;
use crate::dataset::{Column, Dataset};
use crate::selection::Year;

/// The four summary tables of one report
pub type ViewTables = [SummaryTable; 4];

/// Tables of the "Recession Period Statistics" report
///
/// Every table is computed over the recession rows only:
/// 1. mean sales per year
/// 2. mean sales per vehicle type
/// 3. total advertising expenditure per vehicle type
/// 4. mean sales per (unemployment rate, vehicle type)
pub fn recession_view(dataset: &Dataset) -> ViewTables {
    let recession = dataset.recession_rows();

    [
        recession
            .group_by(&[Column::Year])
            .mean(Column::AutomobileSales),
        recession
            .group_by(&[Column::VehicleType])
            .mean(Column::AutomobileSales),
        recession
            .group_by(&[Column::VehicleType])
            .sum(Column::AdvertisingExpenditure),
        recession
            .group_by(&[Column::UnemploymentRate, Column::VehicleType])
            .mean(Column::AutomobileSales),
    ]
}

/// Tables of the "Yearly Statistics" report for `year`
///
/// The first two tables always span the full history so the selected year
/// can be read against the long-run trend. The last two only cover `year`.
pub fn yearly_view(dataset: &Dataset, year: Year) -> ViewTables {
    let history = dataset.view();
    let selected = dataset.year_rows(year.get());

    [
        history
            .group_by(&[Column::Year])
            .mean(Column::AutomobileSales),
        history
            .group_by(&[Column::Month])
            .sum(Column::AutomobileSales),
        selected
            .group_by(&[Column::VehicleType])
            .mean(Column::AutomobileSales),
        selected
            .group_by(&[Column::VehicleType])
            .sum(Column::AdvertisingExpenditure),
    ]
}
