//! Display helpers for amounts and token icons.



/// Base URL pattern for token icons, keyed by symbol.
const ICON_BASE: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/";

/// Inline gray-circle SVG for renderers whose icon fetch fails.
pub const PLACEHOLDER_ICON: &str = concat!("data:image/svg+xml;utf8,",
    "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 32 32\">",
    "<circle cx=\"16\" cy=\"16\" r=\"15\" fill=\"%23ccc\"/></svg>"
);



/// Format an amount with thousands separators and at most `max_frac`
/// fraction digits, trailing zeros trimmed. Non-finite input renders as
/// an em dash, never as "NaN" or "inf".
pub fn format_amount(n: f64, max_frac: usize) -> String {
    if !n.is_finite() {
        return "—".to_string()
    }

    let fixed = format!("{:.*}", max_frac, n);

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    // Group the integer digits in threes from the right.
    let mut grouped = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(c);
    }

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    }
    else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}



/// Percent-encode one symbol for use as a URL path segment. Unreserved
/// characters pass through, everything else is encoded byte-wise.
fn encode_symbol(symbol: &str) -> String {
    let mut out = String::with_capacity(symbol.len());

    for b in symbol.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9'
            | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }

            _ => {
                out.push_str(&format!("%{:02X}", b));
            }
        }
    }

    out
}



/// Icon URL for one token symbol.
pub fn icon_url(symbol: &str) -> String {
    format!("{}{}.svg", ICON_BASE, encode_symbol(symbol))
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_amount(1234567.0, 6), "1,234,567");
        assert_eq!(format_amount(1234.5, 6), "1,234.5");
        assert_eq!(format_amount(530.45, 6), "530.45");
        assert_eq!(format_amount(0.789, 6), "0.789");
    }

    /// Trailing fraction zeros are trimmed, and the fraction is capped at
    /// the requested number of digits.
    #[test]
    fn test_fraction_trimming_and_cap() {
        assert_eq!(format_amount(50.0, 6), "50");
        assert_eq!(format_amount(49.750000, 6), "49.75");
        assert_eq!(format_amount(0.123456789, 6), "0.123457");
        assert_eq!(format_amount(0.5, 8), "0.5");
    }

    #[test]
    fn test_non_finite_renders_dash() {
        assert_eq!(format_amount(f64::NAN, 6), "—");
        assert_eq!(format_amount(f64::INFINITY, 6), "—");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("SWTH"),
            concat!("https://raw.githubusercontent.com/Switcheo/",
                "token-icons/main/tokens/SWTH.svg"
            ),
        );
    }

    /// Symbols with reserved characters are percent-encoded rather than
    /// pasted into the path verbatim.
    #[test]
    fn test_icon_url_encodes_symbol() {
        let url = icon_url("A/B C");
        assert!(url.ends_with("/A%2FB%20C.svg"));

        // Mixed-case symbols like bNEO pass through untouched.
        assert!(icon_url("bNEO").ends_with("/bNEO.svg"));
    }

    /// The fallback icon is an inline data URI, never another network
    /// fetch that could fail the same way.
    #[test]
    fn test_placeholder_is_data_uri() {
        assert!(PLACEHOLDER_ICON.starts_with("data:image/svg+xml"));
    }
}
