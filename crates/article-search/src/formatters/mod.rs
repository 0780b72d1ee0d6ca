//! Output formatting: SVG charts and the HTML pages that carry them.

pub mod chart;
pub mod html;

pub use chart::{ChartStyle, Series, render_bar_chart, render_pie_chart};
pub use html::{chart_page, escape};
