//! SVG distribution plots
//!
//! Each column becomes `histogram-<name>.svg`: a histogram normalized to unit
//! area with the normal density of the column's mean and standard deviation
//! drawn over it.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tabstat_stats::{histogram::Histogram, normal::normal_curve};
use tabstat_summary::{Distribution, DistributionPlotter};

const NUM_BINS: usize = 16;
const SIZE: f64 = 400.0;
const MARGIN: f64 = 50.0;
/// Horizontal padding around the data, in standard deviations.
const SIGMA_PADDING: f64 = 1.5;
const MAX_CURVE_POINTS: usize = 2000;

/// Writes one SVG file per distribution into a directory.
#[derive(Debug)]
pub(crate) struct SvgPlotter {
    dir: PathBuf,
}

impl SvgPlotter {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl DistributionPlotter for SvgPlotter {
    type Error = anyhow::Error;

    fn plot(&mut self, distribution: &Distribution<'_>) -> anyhow::Result<()> {
        let path = self.dir.join(file_name(distribution.name));
        let svg = render(distribution).context("Failed to render plot")?;
        fs::write(&path, svg)
            .with_context(|| format!("Failed to write plot: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote plot");
        Ok(())
    }
}

/// Deterministic file name for a column's plot.
fn file_name(column: &str) -> String {
    let name = column
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();
    format!("histogram-{name}.svg")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Maps data coordinates onto the drawing area.
struct Frame {
    x: (f64, f64),
    y_max: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        MARGIN + (x - self.x.0) / (self.x.1 - self.x.0) * (SIZE - 2.0 * MARGIN)
    }

    fn py(&self, y: f64) -> f64 {
        SIZE - MARGIN - y / self.y_max * (SIZE - 2.0 * MARGIN)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render(distribution: &Distribution<'_>) -> Result<String, std::fmt::Error> {
    let Distribution {
        name,
        samples,
        mean,
        std_dev,
        min,
        max,
    } = *distribution;

    let mut x = (min - SIGMA_PADDING * std_dev, max + SIGMA_PADDING * std_dev);
    if x.1 - x.0 <= 0.0 {
        x = (x.0 - 0.5, x.1 + 0.5);
    }

    let histogram = Histogram::new(samples.iter().copied(), NUM_BINS);
    let num_points = ((x.1 - x.0) as usize).saturating_add(100).min(MAX_CURVE_POINTS);
    let curve = normal_curve(x.0..=x.1, num_points, mean, std_dev).unwrap_or_default();

    let curve_max = curve.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let y_max = histogram.max_density().max(curve_max);
    let frame = Frame {
        x,
        y_max: if y_max > 0.0 { y_max * 1.05 } else { 1.0 },
    };

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SIZE}" height="{SIZE}" viewBox="0 0 {SIZE} {SIZE}">"#
    )?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="14">Histogram for {}</text>"#,
        SIZE / 2.0,
        MARGIN / 2.0,
        escape(name)
    )?;

    for bin in &histogram.bins {
        let left = frame.px(bin.range.start);
        let right = frame.px(bin.range.end);
        let top = frame.py(histogram.density(bin));
        writeln!(
            svg,
            r##"<rect x="{left:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="#9bbbd4" stroke="black" stroke-width="0.5"/>"##,
            right - left,
            frame.py(0.0) - top
        )?;
    }

    if !curve.is_empty() {
        let points = curve
            .iter()
            .map(|&(x, y)| format!("{:.2},{:.2}", frame.px(x), frame.py(y)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            svg,
            r#"<polyline points="{points}" fill="none" stroke="red" stroke-width="2"/>"#
        )?;
    }

    let (left, bottom) = (MARGIN, SIZE - MARGIN);
    writeln!(
        svg,
        r#"<line x1="{left}" y1="{bottom}" x2="{}" y2="{bottom}" stroke="black"/>"#,
        SIZE - MARGIN
    )?;
    writeln!(
        svg,
        r#"<line x1="{left}" y1="{MARGIN}" x2="{left}" y2="{bottom}" stroke="black"/>"#
    )?;
    for (value, anchor, pos) in [(x.0, "start", left), (x.1, "end", SIZE - MARGIN)] {
        writeln!(
            svg,
            r#"<text x="{pos}" y="{}" text-anchor="{anchor}" font-family="sans-serif" font-size="10">{value:.3}</text>"#,
            bottom + 15.0
        )?;
    }
    writeln!(
        svg,
        r#"<text x="{}" y="{MARGIN}" text-anchor="end" font-family="sans-serif" font-size="10">{:.3}</text>"#,
        left - 4.0,
        frame.y_max
    )?;
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Directory plots go to when none is configured.
pub(crate) fn default_dir() -> &'static Path {
    Path::new(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution<'a>(name: &'a str, samples: &'a [f64]) -> Distribution<'a> {
        Distribution {
            name,
            samples,
            mean: 2.0,
            std_dev: 1.0,
            min: 1.0,
            max: 3.0,
        }
    }

    #[test]
    fn test_file_name_is_sanitized() {
        assert_eq!(file_name("price"), "histogram-price.svg");
        assert_eq!(file_name("a b/c"), "histogram-a_b_c.svg");
        assert_eq!(file_name("x.y-z_1"), "histogram-x.y-z_1.svg");
        assert_eq!(file_name("größe"), "histogram-gr__e.svg");
    }

    #[test]
    fn test_render_contains_histogram_and_curve() {
        let svg = render(&distribution("a<b", &[1.0, 2.0, 2.0, 3.0])).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Histogram for a&lt;b"));
        assert_eq!(svg.matches("fill=\"#9bbbd4\"").count(), NUM_BINS);
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_render_without_spread_omits_curve() {
        let dist = Distribution {
            std_dev: 0.0,
            min: 5.0,
            max: 5.0,
            mean: 5.0,
            ..distribution("c", &[5.0, 5.0])
        };
        let svg = render(&dist).unwrap();
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_plotter_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut plotter = SvgPlotter::new(dir.path().to_owned());
        plotter.plot(&distribution("first", &[1.0, 3.0])).unwrap();
        plotter.plot(&distribution("second", &[2.0])).unwrap();

        assert!(dir.path().join("histogram-second.svg").is_file());
        let content = fs::read_to_string(dir.path().join("histogram-first.svg")).unwrap();
        assert!(content.contains("Histogram for first"));
    }
}
