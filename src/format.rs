/*!
Numeric label formatting for legends

Formatted values always carry thousands separators, matching how the host
application renders numbers. The fraction digit count adapts to the value
range so that narrow ranges stay distinguishable without drowning wide ones
in decimals.
*/

use serde::{Deserialize, Serialize};

// =============================================================================
// NumberFormat
// =============================================================================

/// How numeric legend labels are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Round to the nearest integer.
    Rounded,
    /// A fixed fraction digit count.
    Digits(u32),
    /// A printf-style format specifier, e.g. `"%.2f"`.
    Spec(String),
}

impl NumberFormat {
    /// Picks a fraction digit count from the magnitude of a value range:
    /// `clamp(ceil(log10(20 / |maximum - minimum|)), 0, 5)`.
    pub fn auto_for_range(minimum: f64, maximum: f64) -> NumberFormat {
        let range = (maximum - minimum).abs();
        if range == 0.0 || !range.is_finite() {
            return NumberFormat::Rounded;
        }
        let digits = (20.0 / range).log10().ceil().clamp(0.0, 5.0);
        NumberFormat::Digits(digits as u32)
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            NumberFormat::Rounded => {
                let rounded = value.round();
                // Normalize negative zero so "-0" never shows up in a label.
                let rounded = if rounded == 0.0 { 0.0 } else { rounded };
                group_thousands(&format!("{:.0}", rounded))
            }
            NumberFormat::Digits(digits) => {
                group_thousands(&format!("{:.*}", *digits as usize, value))
            }
            NumberFormat::Spec(spec) => {
                sprintf::sprintf!(spec.as_str(), value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

/// Resolves the label format for a column: an explicit printf spec wins,
/// otherwise fraction digits are chosen from the effective value range.
pub fn label_format(spec: Option<&str>, minimum: Option<f64>, maximum: Option<f64>) -> NumberFormat {
    if let Some(spec) = spec {
        return NumberFormat::Spec(spec.to_string());
    }
    match (minimum, maximum) {
        (Some(minimum), Some(maximum)) if minimum != maximum => {
            NumberFormat::auto_for_range(minimum, maximum)
        }
        _ => NumberFormat::Rounded,
    }
}

/// Inserts `,` separators into the integer part of an already formatted
/// number.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(unsigned) => ("-", unsigned),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac_part) => format!("{sign}{grouped}.{frac_part}"),
        None => format!("{sign}{grouped}"),
    }
}

// =============================================================================
// Tests
// =============================================================================
