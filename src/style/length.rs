//! Numeric helpers shared by the style value parsers.
//!
//! Computed style strings are read the way a browser script would read them:
//! a leading number is taken and anything after it is ignored.

/// Read the leading decimal number of a style string (`"16px"` → 16, `"normal"` → None).
pub fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let (len, _) = scan_number(s)?;
    s[..len].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the leading integer of a style string (`"700"` → 700, `"bold"` → None).
pub fn parse_integer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Parse a single `<number>px` token, keeping its sign.
pub fn parse_px(token: &str) -> Option<f64> {
    let token = token.trim();
    let number = token.strip_suffix("px")?;
    let (len, _) = scan_number(number)?;
    if len != number.len() {
        return None;
    }
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Find the first unsigned `<number>px` length anywhere in the input.
pub fn first_px_length(input: &str) -> Option<f64> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() || bytes[i] == b'.' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            if input[i..].starts_with("px") {
                if let Ok(value) = input[start..i].parse::<f64>() {
                    return Some(value);
                }
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Corner radius: the first length of a `border-radius` value, 0 when absent.
pub fn parse_corner_radius(input: &str) -> f64 {
    first_px_length(input).unwrap_or(0.0)
}

/// Returns the byte length of the number at the start of `s` and whether it had a fraction.
fn scan_number(s: &str) -> Option<(usize, bool)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    let mut fraction = false;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start {
            fraction = true;
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    Some((i, fraction))
}

/// Split a function argument list on commas that are not nested in parentheses.
pub fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(input[start..idx].trim());
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(input[start..].trim());
    parts
}
