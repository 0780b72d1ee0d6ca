//! SVG chart rendering.
//!
//! Renderers are pure functions of a [`Series`] and a [`ChartStyle`]. They know nothing
//! about articles or topics and return markup ready to embed in a page.

use super::html::escape;

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 1000;

/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 600;

/// Text color for titles, axes and labels.
pub const TEXT_COLOR: &str = "#000000";

/// Fill for every bar.
pub const BAR_COLOR: &str = "#2e8b57";

/// Six-step green gradient, cycled over pie slices.
pub const PIE_PALETTE: [&str; 6] =
    ["#00441b", "#006d2c", "#238b45", "#41ab5d", "#74c476", "#a1d99b"];

const FONT: &str = "font-family=\"Helvetica, Arial, sans-serif\"";

/// Labels and counts, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl Series {
    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len().min(self.counts.len())
    }

    /// Returns true if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().copied().fold(0, u64::saturating_add)
    }

    /// Largest count, or 0.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels.iter().map(String::as_str).zip(self.counts.iter().copied())
    }
}

impl From<Vec<(String, u64)>> for Series {
    fn from(pairs: Vec<(String, u64)>) -> Self {
        let (labels, counts) = pairs.into_iter().unzip();
        Self { labels, counts }
    }
}

/// Presentation settings for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub text_color: &'static str,
    pub palette: &'static [&'static str],
}

impl ChartStyle {
    /// Bar chart style: single green fill, labelled axes.
    #[must_use]
    pub fn bar(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            text_color: TEXT_COLOR,
            palette: &[BAR_COLOR],
        }
    }

    /// Pie chart style: green gradient, legend instead of axes.
    #[must_use]
    pub fn pie(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            text_color: TEXT_COLOR,
            palette: &PIE_PALETTE,
        }
    }

    /// Fill for the `index`-th category.
    #[must_use]
    pub fn color(&self, index: usize) -> &'static str {
        if self.palette.is_empty() { BAR_COLOR } else { self.palette[index % self.palette.len()] }
    }
}

/// Render a vertical bar chart, one bar per label in series order.
#[must_use]
pub fn render_bar_chart(series: &Series, style: &ChartStyle) -> String {
    const LEFT: f64 = 80.0;
    const RIGHT: f64 = 40.0;
    const TOP: f64 = 70.0;
    const BOTTOM: f64 = 110.0;
    const TICKS: u64 = 5;

    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let plot_w = width - LEFT - RIGHT;
    let plot_h = height - TOP - BOTTOM;
    let baseline = TOP + plot_h;

    let step = series.max().div_ceil(TICKS).max(1);
    let y_max = (step * TICKS) as f64;

    let mut output = open_svg(style, "bar");

    // Gridlines and y ticks
    for tick in 0..=TICKS {
        let value = step * tick;
        let y = baseline - value as f64 / y_max * plot_h;
        output.push_str(&format!(
            "<line x1=\"{LEFT:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"#e0e0e0\"/>",
            LEFT + plot_w
        ));
        output.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"12\">{value}</text>",
            LEFT - 8.0,
            y + 4.0
        ));
    }

    // Axes
    output.push_str(&format!(
        "<line x1=\"{LEFT:.2}\" y1=\"{TOP:.2}\" x2=\"{LEFT:.2}\" y2=\"{baseline:.2}\" stroke=\"{0}\"/>\
         <line x1=\"{LEFT:.2}\" y1=\"{baseline:.2}\" x2=\"{1:.2}\" y2=\"{baseline:.2}\" stroke=\"{0}\"/>",
        style.text_color,
        LEFT + plot_w
    ));

    if !series.is_empty() {
        let slot = plot_w / series.len() as f64;
        let bar_w = slot * 0.7;
        let rotate = series.len() > 12;

        for (i, (label, count)) in series.points().enumerate() {
            let x = LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
            let center = x + bar_w / 2.0;
            let bar_h = count as f64 / y_max * plot_h;
            let y = baseline - bar_h;
            let label = escape(label);

            output.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bar_w:.2}\" height=\"{bar_h:.2}\" fill=\"{}\"><title>{label}: {count}</title></rect>",
                style.color(i)
            ));
            output.push_str(&format!(
                "<text x=\"{center:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"12\">{count}</text>",
                y - 6.0
            ));

            let label_y = baseline + 18.0;
            if rotate {
                output.push_str(&format!(
                    "<text x=\"{center:.2}\" y=\"{label_y:.2}\" text-anchor=\"end\" font-size=\"12\" transform=\"rotate(-45 {center:.2} {label_y:.2})\">{label}</text>"
                ));
            } else {
                output.push_str(&format!(
                    "<text x=\"{center:.2}\" y=\"{label_y:.2}\" text-anchor=\"middle\" font-size=\"12\">{label}</text>"
                ));
            }
        }
    }

    // Axis titles
    output.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"14\">{}</text>",
        LEFT + plot_w / 2.0,
        height - 20.0,
        escape(&style.x_label)
    ));
    let y_title_y = TOP + plot_h / 2.0;
    output.push_str(&format!(
        "<text x=\"20\" y=\"{y_title_y:.2}\" text-anchor=\"middle\" font-size=\"14\" transform=\"rotate(-90 20 {y_title_y:.2})\">{}</text>",
        escape(&style.y_label)
    ));

    close_svg(output)
}

/// Render a pie chart with a legend, slices clockwise from twelve o'clock in series order.
#[must_use]
pub fn render_pie_chart(series: &Series, style: &ChartStyle) -> String {
    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let cx = width * 0.36;
    let cy = height / 2.0 + 20.0;
    let radius = (height - 140.0) / 2.0;

    let mut output = open_svg(style, "pie");
    let total = series.total();

    if total > 0 {
        let mut start = -std::f64::consts::FRAC_PI_2;

        for (i, (label, count)) in series.points().enumerate() {
            let share = count as f64 / total as f64;
            let sweep = share * std::f64::consts::TAU;
            let end = start + sweep;
            let label = escape(label);
            let fill = style.color(i);

            if count == total {
                output.push_str(&format!(
                    "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{radius:.2}\" fill=\"{fill}\" stroke=\"#ffffff\"><title>{label}: {count}</title></circle>"
                ));
            } else if count > 0 {
                let (x1, y1) = polar(cx, cy, radius, start);
                let (x2, y2) = polar(cx, cy, radius, end);
                let large_arc = u8::from(sweep > std::f64::consts::PI);
                output.push_str(&format!(
                    "<path d=\"M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z\" fill=\"{fill}\" stroke=\"#ffffff\"><title>{label}: {count}</title></path>"
                ));
            }

            if share >= 0.03 {
                let (lx, ly) = polar(cx, cy, radius * 0.65, start + sweep / 2.0);
                output.push_str(&format!(
                    "<text x=\"{lx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"12\" fill=\"#ffffff\">{:.1}%</text>",
                    ly + 4.0,
                    share * 100.0
                ));
            }

            start = end;
        }
    }

    // Legend
    let legend_x = width * 0.68;
    let legend_top = 90.0;
    for (i, (label, count)) in series.points().enumerate() {
        let y = legend_top + 24.0 * i as f64;
        output.push_str(&format!(
            "<rect x=\"{legend_x:.2}\" y=\"{y:.2}\" width=\"14\" height=\"14\" fill=\"{}\"/>\
             <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"13\">{} ({count})</text>",
            style.color(i),
            legend_x + 22.0,
            y + 12.0,
            escape(label)
        ));
    }

    close_svg(output)
}

fn open_svg(style: &ChartStyle, kind: &str) -> String {
    let mut output = format!(
        "<div class=\"chart chart-{kind}\"><svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\" {FONT} fill=\"{2}\">",
        style.width, style.height, style.text_color
    );
    output.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");
    output.push_str(&format!(
        "<text x=\"{:.2}\" y=\"36\" text-anchor=\"middle\" font-size=\"20\">{}</text>",
        f64::from(style.width) / 2.0,
        escape(&style.title)
    ));
    output
}

fn close_svg(mut output: String) -> String {
    output.push_str("</svg></div>");
    output
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}
