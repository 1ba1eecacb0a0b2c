use thiserror::Error;

/// Errors raised while loading the dataset or producing dashboard output
///
/// Only loading errors are fatal: they abort server startup. Drawing and
/// template errors are reported per request.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The remote dataset could not be downloaded
    #[error("failed to fetch dataset from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The local dataset file could not be read
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV content could not be parsed into sales records
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    /// A column every record needs is absent from the header row
    #[error("malformed dataset: missing required column `{0}`")]
    MissingColumn(&'static str),

    /// Plotters failed to draw a figure
    #[error("failed to draw chart `{title}`: {message}")]
    Draw { title: String, message: String },

    /// A page or fragment template failed to render
    #[cfg(feature = "web")]
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// A page or fragment template failed to compile
    #[cfg(feature = "web")]
    #[error("template error: {0}")]
    TemplateSource(#[from] handlebars::TemplateError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
