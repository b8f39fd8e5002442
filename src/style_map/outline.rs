/*!
Outline stroke styling
*/

use serde::{Deserialize, Serialize};

use crate::color::Color;

use super::SymbolStyle;

/// Stroke drawn around a polygon or point, or along a line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutlineSymbol {
    pub color: Option<Color>,

    /// Stroke width in pixels.
    pub width: Option<f64>,

    /// Dash pattern as alternating on/off lengths in pixels.
    pub dash: Option<Vec<f64>>,
}

impl SymbolStyle for OutlineSymbol {
    fn merged_over(&self, base: &OutlineSymbol) -> OutlineSymbol {
        OutlineSymbol {
            color: self.color.or(base.color),
            width: self.width.or(base.width),
            dash: self.dash.clone().or_else(|| base.dash.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_over() {
        let base = OutlineSymbol {
            color: Some(Color::rgb(0, 0, 0)),
            width: Some(1.0),
            dash: None,
        };
        let over = OutlineSymbol {
            color: None,
            width: Some(3.0),
            dash: Some(vec![4.0, 2.0]),
        };
        let merged = over.merged_over(&base);
        assert_eq!(merged.color, Some(Color::rgb(0, 0, 0)));
        assert_eq!(merged.width, Some(3.0));
        assert_eq!(merged.dash, Some(vec![4.0, 2.0]));
    }

    #[test]
    fn test_serde_camel_case() {
        let symbol: OutlineSymbol =
            serde_json::from_str(r##"{ "color": "#ff0000", "width": 2.5 }"##).unwrap();
        assert_eq!(symbol.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(symbol.width, Some(2.5));
        assert_eq!(symbol.dash, None);
    }
}
