#![no_main]

use article_search::formatters::{ChartStyle, Series, render_bar_chart, render_pie_chart};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<(String, u64)>| {
    let series = Series::from(data);

    let bar = render_bar_chart(&series, &ChartStyle::bar("t", "x", "y"));
    let pie = render_pie_chart(&series, &ChartStyle::pie("t"));

    // Labels are escaped, so no raw markup leaks into the SVG
    assert!(!bar.contains("<script"));
    assert!(!pie.contains("<script"));
});
