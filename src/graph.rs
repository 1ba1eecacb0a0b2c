use crate::aggregate::GroupKey;
use crate::chart::{ChartKind, ChartSpec};
use crate::config::FigureSize;
use crate::error::{DashboardError, Result};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::error::Error;

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// Series colours, cycled when a chart has more categories than entries
const PALETTE: [RGBColor; 10] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
    RGBColor(255, 102, 146),
    RGBColor(182, 232, 128),
    RGBColor(255, 151, 255),
    RGBColor(254, 203, 82),
];

fn palette(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Configuration options for figure generation
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Width of the figure in pixels
    pub width: u32,

    /// Height of the figure in pixels
    pub height: u32,

    /// Font family used for captions and tick labels
    pub font: &'static str,
}

impl Default for GraphOptions {
    fn default() -> Self {
        FigureSize::default().into()
    }
}

impl From<FigureSize> for GraphOptions {
    fn from(size: FigureSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            font: "sans-serif",
        }
    }
}

/// Draws a chart specification as an SVG document
///
/// An empty table produces a blank white figure rather than an error, so a
/// filter that matched nothing still leaves its slot in the layout filled.
///
/// # Arguments
/// * `chart` - Chart to draw
/// * `options` - Figure size and font
///
/// # Returns
/// * The SVG markup, or `DashboardError::Draw` if plotters failed
///
/// # Examples
/// ```
/// use autostats::aggregate::{Aggregate, SummaryTable};
/// use autostats::chart::{ChartSpec, Encoding};
/// use autostats::dataset::Column;
/// use autostats::graph::{GraphOptions, create_graph};
///
/// let empty = SummaryTable::empty(&[Column::Year], Column::AutomobileSales, Aggregate::Mean);
/// let chart = ChartSpec::line(empty, Encoding::new(Column::Year, Column::AutomobileSales), "Nothing");
/// let svg = create_graph(&chart, &GraphOptions::default()).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn create_graph(chart: &ChartSpec, options: &GraphOptions) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        draw_chart(&root, chart, options).map_err(|e| DashboardError::Draw {
            title: chart.title.clone(),
            message: e.to_string(),
        })?;
    }
    Ok(buffer)
}

fn draw_chart(root: &SvgArea<'_>, chart: &ChartSpec, options: &GraphOptions) -> DrawResult {
    root.fill(&WHITE)?;

    if !chart.is_empty() {
        match (chart.kind, chart.encoding.color) {
            (ChartKind::Line, _) => draw_line(root, chart, options)?,
            (ChartKind::Bar, None) => draw_bar(root, chart, options)?,
            (ChartKind::Bar, Some(_)) => draw_grouped_bar(root, chart, options)?,
            (ChartKind::Pie, _) => draw_pie(root, chart, options)?,
        }
    }

    root.present()?;
    Ok(())
}

/// Axis range covering `values`, widened when all values coincide
fn span(values: impl Iterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let (mut low, mut high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        low = low.min(0.0);
        high = high.max(0.0);
    }
    if (high - low).abs() < f64::EPSILON {
        low -= 1.0;
        high += 1.0;
    }
    let pad = (high - low) * 0.05;
    let low = if include_zero && low >= 0.0 { low } else { low - pad };
    (low, high + pad)
}

/// Tick label for a category axis where each category sits on an integer position
fn category_label(labels: &[String], position: f64) -> String {
    let nearest = position.round();
    if (position - nearest).abs() > 0.01 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

fn first_key_labels(chart: &ChartSpec) -> Vec<String> {
    chart
        .data
        .rows
        .iter()
        .map(|row| row.key.first().map(GroupKey::to_string).unwrap_or_default())
        .collect()
}

/// Line chart in table order
///
/// Numeric keys (years) are placed on a continuous axis; text keys (months)
/// are placed one per position and labelled.
fn draw_line(root: &SvgArea<'_>, chart: &ChartSpec, options: &GraphOptions) -> DrawResult {
    let rows = &chart.data.rows;
    let numeric = rows
        .iter()
        .all(|row| row.key.first().and_then(GroupKey::as_f64).is_some());
    let labels = first_key_labels(chart);

    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let x = if numeric {
                row.key.first().and_then(GroupKey::as_f64).unwrap_or(i as f64)
            } else {
                i as f64
            };
            (x, row.value)
        })
        .collect();

    let (x0, x1) = span(points.iter().map(|&(x, _)| x), false);
    let (y0, y1) = span(points.iter().map(|&(_, y)| y), false);

    let mut plot = ChartBuilder::on(root)
        .caption(&chart.title, (options.font, 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let format_x = |v: &f64| {
        if numeric {
            format!("{:.0}", v)
        } else {
            category_label(&labels, *v)
        }
    };

    plot.configure_mesh()
        .x_desc(&chart.encoding.x_label)
        .y_desc(&chart.encoding.y_label)
        .x_label_formatter(&format_x)
        .draw()?;

    let color = palette(0);
    plot.draw_series(LineSeries::new(points.iter().copied(), &color))?;
    plot.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
    )?;

    Ok(())
}

/// One bar per row, categories along the x axis
fn draw_bar(root: &SvgArea<'_>, chart: &ChartSpec, options: &GraphOptions) -> DrawResult {
    let labels = first_key_labels(chart);
    let count = labels.len() as f64;
    let (y0, y1) = span(chart.data.rows.iter().map(|row| row.value), true);

    let mut plot = ChartBuilder::on(root)
        .caption(&chart.title, (options.font, 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..count - 0.5, y0..y1)?;

    let format_x = |v: &f64| category_label(&labels, *v);
    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(2))
        .x_desc(&chart.encoding.x_label)
        .y_desc(&chart.encoding.y_label)
        .x_label_formatter(&format_x)
        .draw()?;

    let color = palette(0);
    plot.draw_series(chart.data.rows.iter().enumerate().map(|(i, row)| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, row.value)], color.filled())
    }))?;

    Ok(())
}

/// Bars grouped by the x key, one colour per value of the colour key
fn draw_grouped_bar(root: &SvgArea<'_>, chart: &ChartSpec, options: &GraphOptions) -> DrawResult {
    let table = &chart.data;
    let (Some(x_index), Some(color_index)) = (
        table.key_index(chart.encoding.x),
        chart.encoding.color.and_then(|c| table.key_index(c)),
    ) else {
        return draw_bar(root, chart, options);
    };

    let categories = table.distinct(chart.encoding.x);
    let series = chart
        .encoding
        .color
        .map(|c| table.distinct(c))
        .unwrap_or_default();
    let labels: Vec<String> = categories.iter().map(GroupKey::to_string).collect();
    let slot = 0.8 / series.len().max(1) as f64;
    let (y0, y1) = span(table.rows.iter().map(|row| row.value), true);

    let mut plot = ChartBuilder::on(root)
        .caption(&chart.title, (options.font, 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..categories.len() as f64 - 0.5, y0..y1)?;

    let format_x = |v: &f64| category_label(&labels, *v);
    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(2))
        .x_desc(&chart.encoding.x_label)
        .y_desc(&chart.encoding.y_label)
        .x_label_formatter(&format_x)
        .draw()?;

    for (s, name) in series.iter().enumerate() {
        let color = palette(s);
        let bars = table
            .rows
            .iter()
            .filter(|row| &row.key[color_index] == name)
            .filter_map(|row| {
                let position = categories.iter().position(|c| *c == row.key[x_index])?;
                let left = position as f64 - 0.4 + s as f64 * slot;
                Some(Rectangle::new(
                    [(left, 0.0), (left + slot, row.value)],
                    color.filled(),
                ))
            });
        plot.draw_series(bars)?
            .label(name.to_string())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    plot.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

/// One slice per positive row value, labelled by the key
fn draw_pie(root: &SvgArea<'_>, chart: &ChartSpec, options: &GraphOptions) -> DrawResult {
    let slices: Vec<(String, f64)> = chart
        .data
        .rows
        .iter()
        .filter(|row| row.value > 0.0)
        .map(|row| {
            let name = row.key.first().map(GroupKey::to_string).unwrap_or_default();
            (name, row.value)
        })
        .collect();
    if slices.is_empty() {
        return Ok(());
    }

    let area = root.titled(&chart.title, (options.font, 18).into_font())?;
    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = width.min(height) as f64 * 0.35;

    let sizes: Vec<f64> = slices.iter().map(|(_, value)| *value).collect();
    let labels: Vec<String> = slices.iter().map(|(name, _)| name.clone()).collect();
    let colors: Vec<RGBColor> = (0..slices.len()).map(palette).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style((options.font, 12).into_font().color(&BLACK));
    pie.percentages((options.font, 11).into_font().color(&WHITE));
    area.draw(&pie)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_widens_degenerate_ranges() {
        let (low, high) = span([5.0].into_iter(), false);
        assert!((low - 3.9).abs() < 1e-9);
        assert!((high - 6.1).abs() < 1e-9);
        assert_eq!(span(std::iter::empty(), true), (0.0, 1.0));
    }

    #[test]
    fn span_anchors_bars_at_zero() {
        let (low, high) = span([10.0, 20.0].into_iter(), true);
        assert_eq!(low, 0.0);
        assert!(high > 20.0);
    }

    #[test]
    fn category_labels_only_on_integer_positions() {
        let labels = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(category_label(&labels, 1.0), "Feb");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 7.0), "");
    }
}
