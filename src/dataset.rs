use crate::config::DataSource;
use crate::error::{DashboardError, Result};
use csv::{ReaderBuilder, Trim};
use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns of the sales dataset the dashboard knows about
///
/// Serialized with the exact header names used by the CSV source, so chart
/// encodings read the same as the dataset they were computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Column {
    #[serde(rename = "Year")]
    Year,
    #[serde(rename = "Month")]
    Month,
    #[serde(rename = "Vehicle_Type")]
    VehicleType,
    #[serde(rename = "Automobile_Sales")]
    AutomobileSales,
    #[serde(rename = "Advertising_Expenditure")]
    AdvertisingExpenditure,
    #[serde(rename = "unemployment_rate")]
    UnemploymentRate,
    #[serde(rename = "Recession")]
    Recession,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Year,
        Column::Month,
        Column::VehicleType,
        Column::AutomobileSales,
        Column::AdvertisingExpenditure,
        Column::UnemploymentRate,
        Column::Recession,
    ];

    /// Columns without which a file is not a sales dataset
    pub const REQUIRED: [Column; 2] = [Column::Year, Column::AutomobileSales];

    /// Header name of the column in the CSV source
    pub fn header(self) -> &'static str {
        match self {
            Column::Year => "Year",
            Column::Month => "Month",
            Column::VehicleType => "Vehicle_Type",
            Column::AutomobileSales => "Automobile_Sales",
            Column::AdvertisingExpenditure => "Advertising_Expenditure",
            Column::UnemploymentRate => "unemployment_rate",
            Column::Recession => "Recession",
        }
    }

    pub fn from_header(name: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|column| column.header() == name)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the historical automobile sales dataset
///
/// Optional fields are `None` when the column is absent from the file or the
/// cell is blank. Any other column of the source (Date, GDP, City, ...) is
/// ignored while loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Month", default)]
    pub month: Option<String>,

    #[serde(rename = "Vehicle_Type", default)]
    pub vehicle_type: Option<String>,

    #[serde(rename = "Automobile_Sales")]
    pub automobile_sales: f64,

    #[serde(rename = "Advertising_Expenditure", default)]
    pub advertising_expenditure: Option<f64>,

    #[serde(rename = "unemployment_rate", default)]
    pub unemployment_rate: Option<f64>,

    #[serde(rename = "Recession", default, deserialize_with = "deserialize_flag")]
    pub recession: Option<bool>,
}

/// Accepts the 0/1 encoding used by the source as well as true/false
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("1") | Some("1.0") => Ok(Some(true)),
        Some("0") | Some("0.0") => Ok(Some(false)),
        Some(other) if other.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(other) if other.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid Recession flag `{}`",
            other
        ))),
    }
}

impl SalesRecord {
    /// Numeric reading of a column, `None` when the cell is missing or not numeric
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Year => Some(self.year as f64),
            Column::AutomobileSales => Some(self.automobile_sales),
            Column::AdvertisingExpenditure => self.advertising_expenditure,
            Column::UnemploymentRate => self.unemployment_rate,
            Column::Recession => self.recession.map(|flag| if flag { 1.0 } else { 0.0 }),
            Column::Month | Column::VehicleType => None,
        }
    }

    pub fn is_recession(&self) -> bool {
        self.recession == Some(true)
    }
}

/// Immutable in-memory table of sales records
///
/// Built once at startup and shared read-only by every request for the rest
/// of the process lifetime.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    columns: BTreeSet<Column>,
}

impl Dataset {
    /// Wraps already-parsed records, treating every known column as present
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self {
            records,
            columns: Column::ALL.into_iter().collect(),
        }
    }

    /// Loads the dataset from its configured source
    ///
    /// # Errors
    /// * Any fetch, read or parse failure. These are fatal at startup.
    pub fn load(source: &DataSource) -> Result<Self> {
        let dataset = match source {
            DataSource::Url(url) => Self::fetch(url)?,
            DataSource::File(path) => Self::from_path(path)?,
        };
        info!(
            "Loaded {} sales records from {}",
            dataset.len(),
            source
        );
        Ok(dataset)
    }

    /// Downloads the CSV at `url` and parses it
    ///
    /// Uses the blocking `reqwest` client; call it from a blocking thread when
    /// running inside an async runtime.
    pub fn fetch(url: &str) -> Result<Self> {
        let fetch_error = |source| DashboardError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = reqwest::blocking::Client::new()
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;
        let body = response.bytes().map_err(fetch_error)?;

        Self::from_reader(body.as_ref())
    }

    /// Reads the dataset from a CSV file on disk
    ///
    /// # Examples
    /// ```no_run
    /// use autostats::dataset::Dataset;
    ///
    /// match Dataset::from_path("historical_automobile_sales.csv") {
    ///     Ok(data) => println!("Loaded {} records", data.len()),
    ///     Err(e) => eprintln!("Error loading CSV: {}", e),
    /// }
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses CSV content with a header row
    ///
    /// # Errors
    /// * `MissingColumn` when `Year` or `Automobile_Sales` is not in the header
    /// * `Csv` when the header is absent or a value fails to parse
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(DashboardError::MissingColumn(Column::Year.header()));
        }
        let columns: BTreeSet<Column> = headers.iter().filter_map(Column::from_header).collect();
        if let Some(missing) = Column::REQUIRED
            .iter()
            .find(|column| !columns.contains(column))
        {
            return Err(DashboardError::MissingColumn(missing.header()));
        }

        let records = reader
            .deserialize::<SalesRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { records, columns })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source header carried `column`
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// View over every record
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            dataset: self,
            rows: self.records.iter().collect(),
        }
    }

    /// View over the records matching `predicate`
    pub fn filter<F>(&self, predicate: F) -> DatasetView<'_>
    where
        F: Fn(&SalesRecord) -> bool,
    {
        DatasetView {
            dataset: self,
            rows: self.records.iter().filter(|record| predicate(*record)).collect(),
        }
    }

    /// Records flagged as falling in a recession period
    pub fn recession_rows(&self) -> DatasetView<'_> {
        self.filter(SalesRecord::is_recession)
    }

    /// Records of a single year
    pub fn year_rows(&self, year: i32) -> DatasetView<'_> {
        self.filter(|record| record.year == year)
    }
}

/// Borrowed, possibly filtered subset of a [`Dataset`]
#[derive(Clone, Debug)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    rows: Vec<&'a SalesRecord>,
}

impl<'a> DatasetView<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn rows(&self) -> &[&'a SalesRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of `column` over the rows of this view, skipping missing cells
    pub fn total(&self, column: Column) -> f64 {
        self.rows.iter().filter_map(|record| record.value(column)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_round_trip_through_column_names() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("GDP"), None);
    }

    #[test]
    fn recession_flag_accepts_numeric_and_boolean_text() {
        let csv = "Year,Automobile_Sales,Recession\n1980,1.0,1\n1981,2.0,0\n1982,3.0,true\n1983,4.0,\n";
        let data = Dataset::from_reader(csv.as_bytes()).unwrap();
        let flags: Vec<Option<bool>> = data.records().iter().map(|r| r.recession).collect();
        assert_eq!(flags, vec![Some(true), Some(false), Some(true), None]);
    }
}
