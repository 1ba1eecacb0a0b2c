use std::path::PathBuf;

/// Location of the historical automobile sales CSV used by the course dashboard
pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

/// Address the dashboard listens on
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8055";

/// Where the dataset is read from at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// Remote CSV fetched over HTTP(S)
    Url(String),
    /// CSV file on the local filesystem
    File(PathBuf),
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Size of a single rendered figure in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

/// Compiled-in settings of the dashboard process
///
/// The dashboard takes no flags and reads no environment: every field is
/// fixed here, and the dataset is fetched again on each start.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub bind_addr: String,
    pub figure: FigureSize,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Url(DEFAULT_DATASET_URL.to_string()),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            figure: FigureSize::default(),
            title: "Automobile Statistics Dashboard".to_string(),
        }
    }
}
