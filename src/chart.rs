use crate::error::{Error, Result};
use crate::utils::*;
use crate::Series;
use plotly::common::{Marker, Mode, Title};
use plotly::layout::{Axis, AxisType, DragMode, HoverMode};
use plotly::{Layout, Plot, Scatter};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_WIDTH: usize = 800;
pub const DEFAULT_HEIGHT: usize = 500;
pub const DEFAULT_MARKER_SIZE: usize = 5;
pub const DEFAULT_COLOR: &str = "#CD5C5C";
pub const DEFAULT_TITLE: &str = "Daily steps";
pub const BAND_WIDTH: u64 = 5000;
pub const BANDS: usize = 20;

/// Hover text, exact date and grouped step count of the nearest point.
pub const HOVER_TEMPLATE: &str = "Date: %{x|%Y-%m-%d}<br>Steps: %{y:,}<extra></extra>";

/// Size, colors and axis options of the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: usize,
    pub height: usize,
    pub marker_size: usize,
    pub color: String,
    pub title: String,
    /// Color each point by its 5000-step band instead of a single color.
    pub banded: bool,
    /// Zero-inclusive scale hint for the date axis, accepted but without effect.
    pub include_zero: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            marker_size: DEFAULT_MARKER_SIZE,
            color: DEFAULT_COLOR.to_string(),
            title: DEFAULT_TITLE.to_string(),
            banded: false,
            include_zero: true,
        }
    }
}

/// The rendered chart, a standalone html document and the figure it came from.
pub struct Artifact {
    pub html: String,
    pub points: usize,
    plot: Plot,
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("points", &self.points)
            .field("html_len", &self.html.len())
            .finish()
    }
}

impl Artifact {
    /// The figure behind the html.
    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Open the chart in the system browser.
    pub fn show(&self) {
        self.plot.show();
    }

    pub fn write<P>(&self, fout: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = fout.as_ref();
        std::fs::write(path, &self.html).map_err(|source| Error::WriteArtifact {
            path: path.to_path_buf(),
            source,
        })?;
        info!("saved chart with {} points to {}", self.points, path.display());
        Ok(())
    }
}

fn marker(series: &Series, config: &ChartConfig) -> Marker {
    let marker = Marker::new().size(config.marker_size);
    if config.banded {
        let limits = make_band_limits(BAND_WIDTH, BANDS);
        let palette = band_colors(&config.color, BANDS);
        let colors: Vec<String> = series
            .steps
            .iter()
            .map(|s| palette[step_band(*s, &limits)].clone())
            .collect();
        marker.color_array(colors)
    } else {
        marker.color(config.color.clone())
    }
}

/// Build the plotly figure: dates on x, steps on y, point markers only,
/// no grid and no axis lines, zoom and pan with closest-point hover.
pub fn build_plot(series: &Series, config: &ChartConfig) -> Result<Plot> {
    let summary = series.summary().ok_or(Error::EmptySeries)?;
    info!("{}", summary);
    if config.include_zero {
        debug!("zero-inclusive scale has no meaning on the date axis, ignored");
    }
    let xfmt = suitable_xfmt(summary.last - summary.first);
    debug!("date axis tick format {}", xfmt);

    let dates: Vec<String> = series
        .date
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let trace = Scatter::new(dates, series.steps.clone())
        .name("steps")
        .mode(Mode::Markers)
        .marker(marker(series, config))
        .hover_template(HOVER_TEMPLATE);

    let x_axis = Axis::new()
        .title(Title::new("Date"))
        .type_(AxisType::Date)
        .tick_format(xfmt)
        .show_grid(false)
        .show_line(false)
        .zero_line(false);
    let y_axis = Axis::new()
        .title(Title::new("Steps"))
        .type_(AxisType::Linear)
        .show_grid(false)
        .show_line(false)
        .zero_line(false);
    let layout = Layout::new()
        .title(Title::new(&config.title))
        .width(config.width)
        .height(config.height)
        .show_legend(false)
        .hover_mode(HoverMode::Closest)
        .drag_mode(DragMode::Zoom)
        .x_axis(x_axis)
        .y_axis(y_axis);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    Ok(plot)
}

/// Build the figure and serialize it to a standalone html document.
pub fn render(series: &Series, config: &ChartConfig) -> Result<Artifact> {
    let plot = build_plot(series, config)?;
    Ok(Artifact {
        html: plot.to_html(),
        points: series.len(),
        plot,
    })
}
