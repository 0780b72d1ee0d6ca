//! HTML page output.

use std::borrow::Cow;

/// Escape text for use in HTML/SVG content and attribute values.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Wrap an embeddable chart fragment into a standalone HTML document.
#[must_use]
pub fn chart_page(title: &str, fragment: &str) -> String {
    let title = escape(title);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>body {{ margin: 0; padding: 24px; background: #ffffff; color: #000000; }}</style>\n\
         </head>\n\
         <body>\n\
         {fragment}\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_borrows_clean_text() {
        assert!(matches!(escape("Physics"), Cow::Borrowed("Physics")));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_chart_page_embeds_fragment() {
        let page = chart_page("Topic <1>", "<div class=\"chart\"></div>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Topic &lt;1&gt;</title>"));
        assert!(page.contains("<div class=\"chart\"></div>"));
    }
}
