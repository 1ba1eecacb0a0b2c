mod common;

use autostats::chart::{
    ChartKind, RECESSION_BY_TYPE_TITLE, RECESSION_EXPENDITURE_TITLE, RECESSION_TREND_TITLE,
    RECESSION_UNEMPLOYMENT_TITLE, YEARLY_EXPENDITURE_TITLE, YEARLY_MONTHLY_TITLE,
    YEARLY_TREND_TITLE,
};
use autostats::controller::{compute_output, compute_year_disabled, output_for};
use autostats::dataset::{Column, Dataset};
use autostats::selection::{ReportType, Selection, Year};
use autostats::views::{recession_view, yearly_view};
use common::{assert_close, record, sample_dataset};

fn year(value: i32) -> Year {
    Year::new(value).expect("year in range")
}

fn titles(output: &autostats::layout::DashboardOutput) -> Vec<String> {
    output.charts().map(|chart| chart.title.clone()).collect()
}

#[test]
fn year_dropdown_follows_the_report_type() {
    assert!(!compute_year_disabled(Some(ReportType::YearlyStatistics)));
    assert!(compute_year_disabled(Some(ReportType::RecessionPeriodStatistics)));
    assert!(compute_year_disabled(None));
    println!("✓ Year dropdown enabled only for yearly statistics");
}

#[test]
fn nothing_selected_shows_no_charts() {
    let data = sample_dataset();

    let output = compute_output(&data, None, None);
    assert!(output.is_empty());
    assert_eq!(output.charts().count(), 0);

    let output = compute_output(&data, None, Some(year(1980)));
    assert!(output.is_empty());
}

#[test]
fn yearly_report_without_a_year_shows_no_charts() {
    let data = sample_dataset();
    let output = compute_output(&data, Some(ReportType::YearlyStatistics), None);
    assert!(output.is_empty());
    assert_eq!(output.chart_count(), 0);
}

#[test]
fn placeholder_dropdown_values_show_no_charts() {
    let data = sample_dataset();
    let selection = Selection::from_raw(Some("Select Statistics"), Some("Select-year"));
    assert!(output_for(&data, &selection).is_empty());

    let selection = Selection::from_raw(Some("Yearly Statistics"), Some("1979"));
    assert!(output_for(&data, &selection).is_empty());
}

#[test]
fn yearly_view_has_four_tables_for_every_year() {
    let data = sample_dataset();
    for selected in Year::all() {
        let tables = yearly_view(&data, selected);
        assert_eq!(tables.len(), 4);

        let rows = data.year_rows(selected.get());
        let expected_types = rows.group_by(&[Column::VehicleType]).mean(Column::AutomobileSales);
        assert_eq!(tables[2], expected_types);
        let expected_spend = rows
            .group_by(&[Column::VehicleType])
            .sum(Column::AdvertisingExpenditure);
        assert_eq!(tables[3], expected_spend);

        if rows.is_empty() {
            assert!(tables[2].is_empty() && tables[3].is_empty());
        }
    }
    println!("✓ Yearly view checked for all {} years", Year::all().count());
}

#[test]
fn yearly_view_breaks_down_the_selected_year_only() {
    let data = sample_dataset();
    let [trend, monthly, by_type, spend] = yearly_view(&data, year(1981));

    assert_eq!(trend.len(), 3, "trend covers the full history");
    assert_eq!(monthly.len(), 3, "monthly totals cover the full history");

    assert_eq!(by_type.len(), 2);
    assert_close(by_type.get_one("Sports").unwrap(), 400.0);
    assert_close(by_type.get_one("Supperminicar").unwrap(), 500.0);
    assert_eq!(by_type.get_one("Mediumfamilycar"), None);

    assert_close(spend.get_one("Sports").unwrap(), 3000.0);
    assert_close(spend.get_one("Supperminicar").unwrap(), 2500.0);
}

#[test]
fn yearly_history_ignores_the_selected_year() {
    let data = sample_dataset();
    let early = yearly_view(&data, year(1980));
    let late = yearly_view(&data, year(2023));
    assert_eq!(early[0], late[0]);
    assert_eq!(early[1], late[1]);
}

#[test]
fn recession_output_ignores_the_year() {
    let data = sample_dataset();
    let baseline = compute_output(&data, Some(ReportType::RecessionPeriodStatistics), None);
    assert_eq!(baseline.chart_count(), 4);

    for selected in Year::all() {
        let output = compute_output(
            &data,
            Some(ReportType::RecessionPeriodStatistics),
            Some(selected),
        );
        assert_eq!(output, baseline);
    }
}

#[test]
fn recession_view_aggregates_recession_rows() {
    let data = sample_dataset();
    let [trend, by_type, spend, unemployment] = recession_view(&data);

    assert_close(trend.get_one(1980).unwrap(), 150.0);
    assert_close(trend.get_one(1981).unwrap(), 500.0);
    assert_close(trend.get_one(1982).unwrap(), 50.0);

    assert_close(by_type.get_one("Mediumfamilycar").unwrap(), 125.0);
    assert_close(by_type.get_one("Supperminicar").unwrap(), 300.0);
    assert_eq!(by_type.get_one("Sports"), None);

    assert_close(spend.total(), 6000.0);
    assert_eq!(unemployment.keys, vec![Column::UnemploymentRate, Column::VehicleType]);
    assert_eq!(unemployment.len(), 4);
}

#[test]
fn recession_pie_slices_sum_to_recession_expenditure() {
    let data = sample_dataset();
    let output = compute_output(&data, Some(ReportType::RecessionPeriodStatistics), None);
    let pie = &output.rows[1].charts[0];

    assert_eq!(pie.kind, ChartKind::Pie);
    assert_close(
        pie.data.total(),
        data.recession_rows().total(Column::AdvertisingExpenditure),
    );
}

#[test]
fn recession_and_yearly_means_differ_on_mixed_rows() {
    let data = Dataset::from_records(vec![
        record(2000, "Supperminicar", 10.0, true),
        record(2000, "Supperminicar", 20.0, false),
    ]);

    let recession = compute_output(&data, Some(ReportType::RecessionPeriodStatistics), None);
    let trend = &recession.rows[0].charts[0];
    assert_close(trend.data.get_one(2000).unwrap(), 10.0);

    let yearly = compute_output(&data, Some(ReportType::YearlyStatistics), Some(year(2000)));
    let trend = &yearly.rows[0].charts[0];
    assert_close(trend.data.get_one(2000).unwrap(), 15.0);
}

#[test]
fn recession_charts_keep_titles_and_layout() {
    let data = sample_dataset();
    let output = compute_output(&data, Some(ReportType::RecessionPeriodStatistics), None);

    assert_eq!(output.rows.len(), 2);
    assert_eq!(
        titles(&output),
        vec![
            RECESSION_TREND_TITLE,
            RECESSION_BY_TYPE_TITLE,
            RECESSION_EXPENDITURE_TITLE,
            RECESSION_UNEMPLOYMENT_TITLE,
        ]
    );

    let kinds: Vec<ChartKind> = output.charts().map(|chart| chart.kind).collect();
    assert_eq!(
        kinds,
        vec![ChartKind::Line, ChartKind::Bar, ChartKind::Pie, ChartKind::Bar]
    );

    let unemployment = &output.rows[1].charts[1];
    assert_eq!(unemployment.encoding.x, Column::UnemploymentRate);
    assert_eq!(unemployment.encoding.y, Column::AutomobileSales);
    assert_eq!(unemployment.encoding.color, Some(Column::VehicleType));
    assert_eq!(unemployment.encoding.x_label, "Unemployment Rate");
    assert_eq!(unemployment.encoding.y_label, "Average Automobile Sales");
}

#[test]
fn yearly_charts_keep_titles_and_layout() {
    let data = sample_dataset();
    let output = compute_output(&data, Some(ReportType::YearlyStatistics), Some(year(1995)));

    assert_eq!(
        titles(&output),
        vec![
            YEARLY_TREND_TITLE.to_string(),
            YEARLY_MONTHLY_TITLE.to_string(),
            "Average Vehicles Sold by Vehicle Type in 1995".to_string(),
            YEARLY_EXPENDITURE_TITLE.to_string(),
        ]
    );

    let trend = &output.rows[0].charts[0];
    assert_eq!(trend.kind, ChartKind::Line);
    assert_eq!(trend.encoding.x_label, "Year");
    assert_eq!(trend.encoding.y_label, "Automobile_Sales");

    let spend = &output.rows[1].charts[1];
    assert_eq!(spend.kind, ChartKind::Pie);
    assert_eq!(spend.encoding.x, Column::VehicleType);
    assert_eq!(spend.encoding.y, Column::AdvertisingExpenditure);
    assert!(spend.is_empty(), "no rows for 1995 in the sample");
}

#[test]
fn empty_dataset_still_lays_out_four_empty_charts() {
    let data = Dataset::from_reader("Year,Automobile_Sales,Recession\n".as_bytes()).unwrap();
    let output = compute_output(&data, Some(ReportType::RecessionPeriodStatistics), None);

    assert_eq!(output.chart_count(), 4);
    assert!(output.charts().all(|chart| chart.is_empty()));
}
