//! Compact number formatting for legend and tooltip labels.

/// Abbreviate a value for legend labels.
///
/// `>= 1e6` renders as millions with one decimal (a trailing `.0` is dropped), `>= 1e3`
/// as whole thousands, anything else as the plain number.
pub fn abbreviate(value: f64) -> String {
    if value >= 1e6 {
        let millions = (value / 1e6 * 10.0).round() / 10.0;
        let text = format!("{millions:.1}");
        let text = text.strip_suffix(".0").unwrap_or(&text);
        format!("{text}M")
    } else if value >= 1e3 {
        format!("{}k", (value / 1e3).round())
    } else {
        value.to_string()
    }
}

/// `low–high` with both ends abbreviated.
pub fn range_label(low: f64, high: f64) -> String {
    format!("{}–{}", abbreviate(low), abbreviate(high))
}

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Pixel size with at most two decimals and no trailing zeros.
pub(crate) fn px(value: f64) -> String {
    ((value * 100.0).round() / 100.0).to_string()
}
