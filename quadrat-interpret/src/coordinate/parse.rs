//! Text to number parsing for coordinates.
//!
//! Plain decimals are tried first. Anything else must be a degree, minute,
//! second expression with an optional hemisphere letter on either side.

use once_cell::sync::Lazy;
use regex::Regex;

/// Degrees with optional minutes and seconds, hemisphere already stripped
static DMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        ^(?P<deg>\d{1,3}(?:[.,]\d+)?)
        (?:
            (?:\s*[°º:d]\s*|\s+)
            (?P<min>\d{1,2}(?:[.,]\d+)?)
            (?:
                (?:\s*['′’:m]\s*|\s+)
                (?P<sec>\d{1,2}(?:[.,]\d+)?)
            )?
            \s*(?:''|["″”'′’ms])?
          | \s*[°º]
        )?$"#,
    )
    .expect("DMS pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn hemisphere_sign(&self, letter: char) -> Option<f64> {
        match (self, letter.to_ascii_uppercase()) {
            (Axis::Latitude, 'N') | (Axis::Longitude, 'E') => Some(1.0),
            (Axis::Latitude, 'S') | (Axis::Longitude, 'W') => Some(-1.0),
            _ => None,
        }
    }
}

/// Plain decimal, accepting a single comma as the decimal separator
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    let value = match text.parse::<f64>() {
        Ok(v) => v,
        Err(_) if text.matches(',').count() == 1 && !text.contains('.') => {
            text.replace(',', ".").parse::<f64>().ok()?
        }
        Err(_) => return None,
    };
    value.is_finite().then_some(value)
}

fn number(text: &str) -> Option<f64> {
    text.replace(',', ".").parse::<f64>().ok()
}

/// Degrees, minutes and seconds with hemisphere letters or a leading sign
pub fn parse_dms(text: &str, axis: Axis) -> Option<f64> {
    let mut rest = text.trim();
    let mut sign: f64 = 1.0;

    if let Some(first) = rest.chars().next().filter(char::is_ascii_alphabetic) {
        sign = axis.hemisphere_sign(first)?;
        rest = rest[first.len_utf8()..].trim_start();
    } else if let Some(last) = rest.chars().last().filter(char::is_ascii_uppercase) {
        // lowercase trailing letters are minute or second markers
        if let Some(s) = axis.hemisphere_sign(last) {
            sign = s;
            rest = rest[..rest.len() - last.len_utf8()].trim_end();
        }
    }
    if let Some(unsigned) = rest.strip_prefix('-') {
        sign = -sign.abs();
        rest = unsigned.trim_start();
    }

    let caps = DMS.captures(rest)?;
    let degrees = number(&caps["deg"])?;
    let minutes = match caps.name("min") {
        Some(m) => number(m.as_str())?,
        None => 0.0,
    };
    let seconds = match caps.name("sec") {
        Some(s) => number(s.as_str())?,
        None => 0.0,
    };
    if minutes >= 60.0 || seconds >= 60.0 {
        return None;
    }
    if degrees.fract() != 0.0 && caps.name("min").is_some() {
        return None;
    }

    Some(sign * (degrees + minutes / 60.0 + seconds / 3600.0))
}

/// Any supported coordinate text for one axis
pub fn parse_coordinate(text: &str, axis: Axis) -> Option<f64> {
    parse_decimal(text).or_else(|| parse_dms(text, axis))
}

/// Round half away from zero to a number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Whether a stated geodetic datum is WGS84
pub fn is_wgs84(datum: &str) -> bool {
    let key: String = datum
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ':')
        .collect::<String>()
        .to_ascii_uppercase();
    matches!(
        key.as_str(),
        "WGS84" | "EPSG:4326" | "EPSG4326" | "WORLDGEODETICSYSTEM1984"
    )
}

/// Split a combined coordinate string into latitude and longitude text
pub fn split_verbatim(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let pair = if let Some(pair) = text.split_once(';') {
        pair
    } else if let Some(pair) = text.split_once(", ") {
        pair
    } else if text.matches(',').count() == 1 {
        text.split_once(',')?
    } else if let Some(pair) = split_on_hemisphere(text) {
        pair
    } else {
        let mut tokens = text.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(lat), Some(lng), None) => (lat, lng),
            _ => return None,
        }
    };

    let (lat, lng) = (pair.0.trim(), pair.1.trim());
    (!lat.is_empty() && !lng.is_empty()).then_some((lat, lng))
}

/// "43°39'N 79°24'W" splits after the N, "N43.6 W79.4" before the W
fn split_on_hemisphere(text: &str) -> Option<(&str, &str)> {
    let leading = text.starts_with(&['N', 'S', 'n', 's'][..]);
    if leading {
        let idx = text[1..].find(&['E', 'W', 'e', 'w'][..])? + 1;
        return Some((&text[..idx], &text[idx..]));
    }
    let idx = text.find(&['N', 'S'][..])?;
    let (lat, lng) = text.split_at(idx + 1);
    (!lng.trim().is_empty()).then_some((lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-6).unwrap_or(false)
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_decimal("43.65"), Some(43.65));
        assert_eq!(parse_decimal(" -79.4 "), Some(-79.4));
        assert_eq!(parse_decimal("43,65"), Some(43.65));
        assert_eq!(parse_decimal("1,234.5"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("asdf"), None);
    }

    #[test]
    fn test_dms_forms() {
        assert!(close(parse_coordinate("43°39'N", Axis::Latitude), 43.65));
        assert!(close(parse_coordinate("79°24'W", Axis::Longitude), -79.4));
        assert!(close(parse_coordinate("S 37 46 48", Axis::Latitude), -37.78));
        assert!(close(parse_coordinate("-37°46'48\"", Axis::Latitude), -37.78));
        assert!(close(parse_coordinate("12.5E", Axis::Longitude), 12.5));
        assert!(close(parse_coordinate("55°", Axis::Latitude), 55.0));
    }

    #[test]
    fn test_dms_rejects() {
        assert_eq!(parse_coordinate("43°75'N", Axis::Latitude), None);
        assert_eq!(parse_coordinate("43°39'E", Axis::Latitude), None);
        assert_eq!(parse_coordinate("12.5°30'", Axis::Latitude), None);
        assert_eq!(parse_coordinate("4339", Axis::Latitude), Some(4339.0));
        assert_eq!(parse_coordinate("north", Axis::Latitude), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(43.6512345, 5), 43.65123);
        assert_eq!(round_to(-79.4056789, 5), -79.40568);
        assert_eq!(round_to(43.65, 5), 43.65);
    }

    #[test]
    fn test_wgs84_aliases() {
        assert!(is_wgs84("WGS84"));
        assert!(is_wgs84("wgs 84"));
        assert!(is_wgs84("EPSG:4326"));
        assert!(is_wgs84("World Geodetic System 1984"));
        assert!(!is_wgs84("NAD27"));
        assert!(!is_wgs84("ED50"));
    }

    #[test]
    fn test_split_verbatim() {
        assert_eq!(split_verbatim("43.65; -79.4"), Some(("43.65", "-79.4")));
        assert_eq!(split_verbatim("43.65, -79.4"), Some(("43.65", "-79.4")));
        assert_eq!(split_verbatim("43.65,-79.4"), Some(("43.65", "-79.4")));
        assert_eq!(split_verbatim("43°39'N 79°24'W"), Some(("43°39'N", "79°24'W")));
        assert_eq!(split_verbatim("N43.65 W79.4"), Some(("N43.65", "W79.4")));
        assert_eq!(split_verbatim("43.65 -79.4"), Some(("43.65", "-79.4")));
        assert_eq!(split_verbatim("43.65"), None);
        assert_eq!(split_verbatim("  "), None);
    }
}
