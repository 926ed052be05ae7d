use chrono::prelude::*;

/// If longer than two years, keep only year and month;
/// if not, but longer than two months, add the day but drop the year.
/// Otherwise, shorter than two months, keep also the weekday.
pub fn suitable_xfmt(d: chrono::Duration) -> &'static str {
    if d > chrono::Duration::days(730) {
        "%Y-%m"
    } else if d > chrono::Duration::days(60) {
        "%b %d"
    } else {
        "%a %d %b"
    }
}

/// Smallest and largest element, None for an empty iterator.
pub fn min_and_max<'a, I, T>(mut s: I) -> Option<(T, T)>
where
    I: Iterator<Item = &'a T>,
    T: 'a + std::cmp::PartialOrd + Clone,
{
    let (mut min, mut max) = match s.next() {
        Some(v) => (v, v),
        None => return None,
    };
    for es in s {
        if es > max {
            max = es
        } else if es < min {
            min = es
        }
    }
    Some((min.clone(), max.clone()))
}

/// Upper limits of the step bands: band i holds the counts up to (i + 1) * width.
pub fn make_band_limits(width: u64, bands: usize) -> Vec<u64> {
    (1..=bands as u64).map(|n| n * width).collect()
}

/// Index of the first band whose limit is not exceeded,
/// counts above the last limit fall in the last band.
pub fn step_band(steps: u64, limits: &[u64]) -> usize {
    limits
        .iter()
        .position(|limit| steps <= *limit)
        .unwrap_or(limits.len().saturating_sub(1))
}

/// Parse a `#RRGGBB` color.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Linear shades from a light tint of the base color (mixed with white) to the base color.
/// Falls back to repeating the base color when it is not a `#RRGGBB` literal.
pub fn band_colors(base: &str, n: usize) -> Vec<String> {
    let (r, g, b) = match parse_hex_color(base) {
        Some(rgb) => rgb,
        None => return vec![base.to_string(); n],
    };
    let tint = 0.85;
    let lerp = |c: u8, t: f64| {
        let light = c as f64 + (255. - c as f64) * tint;
        (light + (c as f64 - light) * t).round() as u8
    };
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 1. };
            format!("#{:02X}{:02X}{:02X}", lerp(r, t), lerp(g, t), lerp(b, t))
        })
        .collect()
}

/// Group the digits in thousands, 12345 -> "12,345".
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Calendar date from `%Y-%m-%d`, or from an RFC 3339 - ISO 8601 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Non-negative integer count; floats are accepted only without fractional part.
pub fn parse_steps(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0. && f.fract() == 0. && f <= u64::MAX as f64 => {
            Some(f as u64)
        }
        _ => None,
    }
}
