#![allow(dead_code)]

use autostats::{Dataset, SalesRecord};

/// Six rows over three years, two of them outside recessions
///
/// Expected aggregates used across the test files:
/// - recession mean sales by year: 1980 = 150, 1981 = 500, 1982 = 50
/// - full-history mean sales by year: 1980 = 200, 1981 = 450, 1982 = 50
/// - recession advertising total: 6000
pub const SAMPLE_CSV: &str = "\
Year,Month,Recession,Automobile_Sales,Advertising_Expenditure,unemployment_rate,Vehicle_Type,City
1980,Jan,1,100.0,1000,5.0,Supperminicar,Georgia
1980,Feb,1,200.0,2000,5.0,Mediumfamilycar,New York
1980,Mar,0,300.0,1500,4.5,Supperminicar,Illinois
1981,Jan,0,400.0,3000,4.0,Sports,California
1981,Feb,1,500.0,2500,6.0,Supperminicar,Georgia
1982,Mar,1,50.0,500,6.0,Mediumfamilycar,Illinois
";

pub fn sample_dataset() -> Dataset {
    Dataset::from_reader(SAMPLE_CSV.as_bytes()).expect("sample CSV should parse")
}

pub fn record(year: i32, vehicle_type: &str, sales: f64, recession: bool) -> SalesRecord {
    SalesRecord {
        year,
        month: Some("Jan".to_string()),
        vehicle_type: Some(vehicle_type.to_string()),
        automobile_sales: sales,
        advertising_expenditure: Some(sales * 10.0),
        unemployment_rate: Some(5.0),
        recession: Some(recession),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
