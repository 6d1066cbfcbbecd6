//! Human-readable byte sizes driven by printf-like templates.
//!
//! A template carries one float placeholder (`%.3F`, `%10.1f`, ...) and one
//! unit placeholder: `U` for an uppercase unit, `u` for lowercase. A
//! trailing `i` switches to 1024-based units (`KiB`, `MiB`, ...).
//!
//! Examples for 631_900 bytes:
//! - `"%.0F Ui"` → `617 KiB`
//! - `"%.3F U"`  → `631.900 KB`
//! - `"%.1F u"`  → `631.9 kb`

use crate::error::SizeFormatError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Unit ladder, smallest first.
pub const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

static FLOAT_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%([-+ 0]*)(\d+)?(?:\.(\d+))?[Ff]").expect("valid placeholder regex"));

/// Format `bytes` with `template`, optionally pinned to `default_unit`.
///
/// An empty or unknown `default_unit` picks the largest unit not exceeding
/// the value. Negative byte counts are treated as zero.
pub fn format_size(template: &str, bytes: i64, default_unit: &str) -> Result<String, SizeFormatError> {
    let bytes = bytes.max(0) as u64;
    let (template, multiplier) = match template.strip_suffix('i') {
        Some(t) => (t, 1024u64),
        None => (template, 1000u64),
    };

    let requested = default_unit.trim().to_ascii_uppercase();
    let level = UNITS
        .iter()
        .position(|u| *u == requested)
        .unwrap_or_else(|| auto_level(bytes, multiplier));

    let value = bytes as f64 / (multiplier as f64).powi(level as i32);
    let unit = unit_name(level, multiplier);

    let caps = FLOAT_PLACEHOLDER
        .captures(template)
        .ok_or_else(|| SizeFormatError::MissingPlaceholder(template.to_string()))?;
    let whole = caps.get(0).expect("capture 0 is the whole match");
    let flags = caps.get(1).map_or("", |m| m.as_str());
    let width = caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok());
    let precision = caps
        .get(3)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .unwrap_or(6);

    let lowercase = template.contains('u');
    let with_unit = |s: &str| {
        if lowercase {
            s.replace('u', &unit.to_lowercase())
        } else {
            s.replace('U', &unit)
        }
    };

    Ok(format!(
        "{}{}{}",
        with_unit(&template[..whole.start()]),
        format_float(value, flags, width, precision),
        with_unit(&template[whole.end()..])
    ))
}

/// Largest level `p` with `multiplier^p <= bytes`, capped at the top unit.
fn auto_level(bytes: u64, multiplier: u64) -> usize {
    let bytes = u128::from(bytes);
    let mut level = 0;
    let mut threshold = u128::from(multiplier);
    while level < UNITS.len() - 1 && bytes >= threshold {
        level += 1;
        threshold *= u128::from(multiplier);
    }
    level
}

fn unit_name(level: usize, multiplier: u64) -> String {
    let unit = UNITS[level];
    if multiplier == 1024 && unit.len() == 2 {
        format!("{}iB", &unit[..1])
    } else {
        unit.to_string()
    }
}

fn format_float(value: f64, flags: &str, width: Option<usize>, precision: usize) -> String {
    let mut digits = format!("{:.*}", precision, value);
    if flags.contains('+') {
        digits.insert(0, '+');
    } else if flags.contains(' ') {
        digits.insert(0, ' ');
    }
    let Some(width) = width else {
        return digits;
    };
    if digits.len() >= width {
        return digits;
    }
    let pad = width - digits.len();
    if flags.contains('-') {
        format!("{digits}{}", " ".repeat(pad))
    } else if flags.contains('0') {
        let sign_len = usize::from(digits.starts_with(|c| c == '+' || c == ' '));
        let (sign, rest) = digits.split_at(sign_len);
        format!("{sign}{}{rest}", "0".repeat(pad))
    } else {
        format!("{}{digits}", " ".repeat(pad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_gigabyte() {
        assert_eq!(format_size("%.3F Ui", 1_073_741_824, "").unwrap(), "1.000 GiB");
    }

    #[test]
    fn test_below_first_step_stays_bytes() {
        assert_eq!(format_size("%.0F U", 999, "").unwrap(), "999 B");
        assert_eq!(format_size("%.0F Ui", 1023, "").unwrap(), "1023 B");
    }

    #[test]
    fn test_zero_and_negative_are_bytes() {
        assert_eq!(format_size("%.1F U", 0, "").unwrap(), "0.0 B");
        assert_eq!(format_size("%.1F U", -42, "").unwrap(), "0.0 B");
    }

    #[test]
    fn test_decimal_and_lowercase_units() {
        assert_eq!(format_size("%.3F U", 632_096, "").unwrap(), "632.096 KB");
        assert_eq!(format_size("%.1F u", 631_900, "").unwrap(), "631.9 kb");
        assert_eq!(format_size("%.0F ui", 631_900, "").unwrap(), "617 kib");
    }

    #[test]
    fn test_pinned_unit_ignores_magnitude() {
        assert_eq!(format_size("%.3F U", 2_500_000, "mb").unwrap(), "2.500 MB");
        assert_eq!(format_size("%.3F U", 600, "MB").unwrap(), "0.001 MB");
        // unknown pinned unit falls back to automatic selection
        assert_eq!(format_size("%.0F U", 2_000, "XB").unwrap(), "2 KB");
    }

    #[test]
    fn test_width_and_flags() {
        assert_eq!(format_size("%10.3F Ui", 631_900, "").unwrap(), "   617.090 KiB");
        assert_eq!(format_size("%-8.1F|U", 1_500, "").unwrap(), "1.5     |KB");
        assert_eq!(format_size("%08.2F U", 1_500, "").unwrap(), "00001.50 KB");
    }

    #[test]
    fn test_missing_placeholder_is_rejected() {
        assert_eq!(
            format_size("U", 10, ""),
            Err(SizeFormatError::MissingPlaceholder("U".into()))
        );
    }

    #[test]
    fn test_level_bounds_hold_for_both_bases() {
        for base in [1000u64, 1024] {
            let mut samples = vec![0u64, 1, base - 1, base, base + 1, u64::MAX];
            let mut p = base;
            while let Some(next) = p.checked_mul(base) {
                samples.extend([p - 1, p, p + 1]);
                p = next;
            }
            for b in samples {
                let level = auto_level(b, base) as u32;
                let lower = u128::from(base).pow(level);
                let upper = u128::from(base).pow(level + 1);
                if b == 0 {
                    assert_eq!(level, 0);
                } else {
                    assert!(lower <= u128::from(b) && u128::from(b) < upper, "b={b} base={base}");
                }
            }
        }
    }
}
