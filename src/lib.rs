/*!
# Automobile Statistics Dashboard

A single-page dashboard over historical automobile sales, served by a Rust
web server.

## Overview

The server downloads the historical automobile sales CSV once at startup and
keeps it in memory for the lifetime of the process. A page with two dropdowns
lets the user pick a report:

- **Yearly Statistics** - full-history sales trends plus a breakdown by vehicle
  type for one selected year (1980 to 2023)
- **Recession Period Statistics** - sales, vehicle types, advertising and
  unemployment restricted to recession periods

Every dropdown change re-queries the server, which aggregates the dataset and
returns four charts laid out as two rows of two.

## Architecture

### Data Layer
- **dataset**: CSV loading (remote URL or local file) into an immutable table
- **aggregate**: group-by with mean/sum into ordered summary tables

### Reporting Layer
- **views**: the four summary tables of each report
- **chart**: chart specifications (kind, encoding, literal titles)
- **layout**: two rows of two charts
- **controller**: the two reactive derivations, year-dropdown state and chart output
- **graph**: SVG figures drawn with plotters

### Web Layer (`web` feature)
- **app**: axum routes, handlebars templates and request tracing

## REST API Endpoints

- `/` - The dashboard page
- `/api/year-disabled?report_type=..` - Whether the year dropdown is disabled
- `/api/output?report_type=..&year=..` - HTML fragment with the chart rows
- `/api/charts?report_type=..&year=..` - Chart specifications as JSON
*/

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod layout;
pub mod selection;
pub mod views;

#[cfg(feature = "web")]
pub mod app;

pub use controller::{compute_output, compute_year_disabled};
pub use dataset::{Column, Dataset, SalesRecord};
pub use error::DashboardError;
pub use selection::{ReportType, Selection, Year};
