use crate::error::{Result, ScholarError};
use crate::extract::{ProfileIdentity, SummaryStats};
use crate::series::CitationSeries;
use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 720;
const HEADER_HEIGHT: i32 = 100;
const FOOTER_HEIGHT: i32 = 36;
const BAR_MARGIN: u32 = 14;
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

const AVERAGE_MIN_YEARS: usize = 6;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub font_family: String,
    pub math_rendering: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "serif".to_string(),
            math_rendering: true,
        }
    }
}

pub struct RenderRequest<'a> {
    pub series: &'a CitationSeries,
    pub identity: &'a ProfileIdentity,
    pub summary: &'a SummaryStats,
    pub source: &'a str,
    pub fetched_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailingAverage {
    pub first_year: i32,
    pub last_year: i32,
    pub mean: f64,
}

// Mean of the five years before the latest one
pub fn trailing_average(series: &CitationSeries) -> Option<TrailingAverage> {
    let n = series.len();
    if n < AVERAGE_MIN_YEARS {
        return None;
    }

    let window = &series.counts()[n - 6..n - 1];
    let total: f64 = window.iter().map(|&count| f64::from(count)).sum();
    Some(TrailingAverage {
        first_year: series.years()[n - 6],
        last_year: series.years()[n - 2],
        mean: total / window.len() as f64,
    })
}

pub fn title_lines(request: &RenderRequest<'_>) -> [String; 3] {
    let average = trailing_average(request.series)
        .map(|avg| {
            format!(
                " (average of last 5 years, {}/{}: {:.2})",
                avg.first_year, avg.last_year, avg.mean
            )
        })
        .unwrap_or_default();

    [
        format!("Citations per year{}", average),
        format!(
            "Scholar: {} ({})",
            request.identity.name, request.identity.affiliation
        ),
        format!(
            "[all] Citations: {}; h-index: {}; i10-index: {}",
            request.summary.citations(),
            request.summary.h_index(),
            request.summary.i10_index()
        ),
    ]
}

pub fn source_caption(source: &str, fetched_on: NaiveDate) -> String {
    format!(
        "(data source: {}; fetched on {})",
        source,
        fetched_on.format("%d %b, %Y")
    )
}

pub fn render_svg(request: &RenderRequest<'_>, config: &RenderConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw(&root, request, config).map_err(|e| ScholarError::Render(e.to_string()))?;
    }
    debug!(bytes = svg.len(), "chart rendered");
    Ok(svg)
}

// Rendered fully in memory before the single write
pub fn render(path: &Path, request: &RenderRequest<'_>, config: &RenderConfig) -> Result<()> {
    let svg = render_svg(request, config)?;
    fs::write(path, svg).map_err(|source| ScholarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    request: &RenderRequest<'_>,
    config: &RenderConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<std::io::Error>> {
    let font = |size: f64, style: FontStyle| {
        FontDesc::new(FontFamily::from(config.font_family.as_str()), size, style)
    };
    let (headline_style, scholar_style) = if config.math_rendering {
        (FontStyle::Bold, FontStyle::Italic)
    } else {
        (FontStyle::Normal, FontStyle::Normal)
    };
    let centered_top = Pos::new(HPos::Center, VPos::Top);
    let center_x = WIDTH as i32 / 2;

    root.fill(&WHITE)?;
    let (header, rest) = root.split_vertically(HEADER_HEIGHT);
    let (plot, footer) = rest.split_vertically(HEIGHT as i32 - HEADER_HEIGHT - FOOTER_HEIGHT);

    let line_styles = [
        font(20.0, headline_style),
        font(16.0, scholar_style),
        font(16.0, FontStyle::Normal),
    ];
    for (i, (line, style)) in title_lines(request).iter().zip(line_styles).enumerate() {
        header.draw(&Text::new(
            line.clone(),
            (center_x, 12 + 28 * i as i32),
            TextStyle::from(style).pos(centered_top),
        ))?;
    }

    let years = request.series.years();
    let counts = request.series.counts();
    let n = years.len();
    let peak = counts.iter().copied().max().unwrap_or(0);
    let y_top = peak + peak / 8 + 1;

    // Segmented usize ranges include their end, so 0..n-1 yields n slots.
    let mut chart = ChartBuilder::on(&plot)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d((0..n.saturating_sub(1).max(1)).into_segmented(), 0u32..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => years.get(*i).map(ToString::to_string).unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Years")
        .y_desc("Citations")
        .label_style(font(13.0, FontStyle::Normal))
        .axis_desc_style(font(16.0, FontStyle::Normal))
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), count)],
            BAR_COLOR.filled(),
        );
        bar.set_margin(0, 0, BAR_MARGIN, BAR_MARGIN);
        bar
    }))?;

    let value_style = TextStyle::from(font(12.0, FontStyle::Normal))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        EmptyElement::at((SegmentValue::CenterOf(i), count))
            + Text::new(count.to_string(), (0, -4), value_style.clone())
    }))?;

    footer.draw(&Text::new(
        source_caption(request.source, request.fetched_on),
        (center_x, 6),
        TextStyle::from(font(13.0, FontStyle::Normal)).pos(centered_top),
    ))?;

    root.present()?;
    Ok(())
}
