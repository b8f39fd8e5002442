/*!
Named color palettes and gradient sampling

Palettes come in three kinds, matching how they are applied to data:

- **Categorical** palettes assign one color per distinct value and are never
  interpolated.
- **Sequential** palettes order a single hue ramp from low to high.
- **Diverging** palettes place a neutral midpoint between two hue ramps and
  suit ranges that straddle zero.

Gradient sampling interpolates in Oklab space. Perceptual interpolation
avoids the muddy midpoints that linear RGB blending produces.
*/

use palette::{FromColor, Mix, Oklab, Srgb};
use serde::{Deserialize, Serialize};

use crate::color::Color;

// =============================================================================
// Palette definitions
// =============================================================================

/// How a palette is meant to be applied to data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    Categorical,
    Sequential,
    Diverging,
}

/// A named, fixed list of CSS color stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub kind: PaletteKind,
    pub colors: &'static [&'static str],
}

macro_rules! palette {
    ($name:literal, $kind:ident, $colors:expr) => {
        Palette {
            name: $name,
            kind: PaletteKind::$kind,
            colors: $colors,
        }
    };
}

// Categorical

pub const HIGH_CONTRAST: Palette = palette!(
    "HighContrast",
    Categorical,
    &[
        "#3366cc", "#dc3912", "#ff9900", "#109618", "#990099", "#0099c6", "#dd4477", "#66aa00",
        "#b82e2e", "#316395", "#994499", "#22aa99", "#aaaa11", "#6633cc", "#e67300", "#8b0707",
        "#651067", "#329262", "#5574a6", "#3b3eac",
    ]
);

pub const TABLEAU10: Palette = palette!(
    "Tableau10",
    Categorical,
    &[
        "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
        "#9c755f", "#bab0ab",
    ]
);

pub const CATEGORY10: Palette = palette!(
    "Category10",
    Categorical,
    &[
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ]
);

pub const SET1: Palette = palette!(
    "Set1",
    Categorical,
    &[
        "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
        "#999999",
    ]
);

pub const SET2: Palette = palette!(
    "Set2",
    Categorical,
    &[
        "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
    ]
);

pub const DARK2: Palette = palette!(
    "Dark2",
    Categorical,
    &[
        "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
    ]
);

pub const PAIRED: Palette = palette!(
    "Paired",
    Categorical,
    &[
        "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
        "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
    ]
);

pub const ACCENT: Palette = palette!(
    "Accent",
    Categorical,
    &[
        "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
    ]
);

// Sequential

pub const VIRIDIS: Palette = palette!(
    "Viridis",
    Sequential,
    &[
        "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
        "#b5de2b", "#fde725",
    ]
);

pub const PLASMA: Palette = palette!(
    "Plasma",
    Sequential,
    &[
        "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
        "#fdca26", "#f0f921",
    ]
);

pub const MAGMA: Palette = palette!(
    "Magma",
    Sequential,
    &[
        "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f", "#cd4071", "#f1605d", "#fd9668",
        "#feca8d", "#fcfdbf",
    ]
);

pub const INFERNO: Palette = palette!(
    "Inferno",
    Sequential,
    &[
        "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925", "#fb9b06",
        "#f7d03c", "#fcffa4",
    ]
);

pub const CIVIDIS: Palette = palette!(
    "Cividis",
    Sequential,
    &[
        "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74", "#c3b369",
        "#e1cc55", "#fee838",
    ]
);

pub const BLUES: Palette = palette!(
    "Blues",
    Sequential,
    &[
        "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
        "#08306b",
    ]
);

pub const GREENS: Palette = palette!(
    "Greens",
    Sequential,
    &[
        "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
        "#00441b",
    ]
);

pub const ORANGES: Palette = palette!(
    "Oranges",
    Sequential,
    &[
        "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#a63603",
        "#7f2704",
    ]
);

pub const REDS: Palette = palette!(
    "Reds",
    Sequential,
    &[
        "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
        "#67000d",
    ]
);

pub const PURPLES: Palette = palette!(
    "Purples",
    Sequential,
    &[
        "#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f",
        "#3f007d",
    ]
);

// Diverging

pub const PUOR: Palette = palette!(
    "PuOr",
    Diverging,
    &[
        "#7f3b08", "#b35806", "#e08214", "#fdb863", "#fee0b6", "#f7f7f7", "#d8daeb", "#b2abd2",
        "#8073ac", "#542788", "#2d004b",
    ]
);

pub const RDBU: Palette = palette!(
    "RdBu",
    Diverging,
    &[
        "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de",
        "#4393c3", "#2166ac", "#053061",
    ]
);

pub const RDYLBU: Palette = palette!(
    "RdYlBu",
    Diverging,
    &[
        "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9",
        "#74add1", "#4575b4", "#313695",
    ]
);

pub const RDYLGN: Palette = palette!(
    "RdYlGn",
    Diverging,
    &[
        "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a",
        "#66bd63", "#1a9850", "#006837",
    ]
);

pub const SPECTRAL: Palette = palette!(
    "Spectral",
    Diverging,
    &[
        "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4",
        "#66c2a5", "#3288bd", "#5e4fa2",
    ]
);

pub const BRBG: Palette = palette!(
    "BrBG",
    Diverging,
    &[
        "#543005", "#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#f5f5f5", "#c7eae5", "#80cdc1",
        "#35978f", "#01665e", "#003c30",
    ]
);

pub const PRGN: Palette = palette!(
    "PRGn",
    Diverging,
    &[
        "#40004b", "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#f7f7f7", "#d9f0d3", "#a6dba0",
        "#5aae61", "#1b7837", "#00441b",
    ]
);

pub const PIYG: Palette = palette!(
    "PiYG",
    Diverging,
    &[
        "#8e0152", "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#f7f7f7", "#e6f5d0", "#b8e186",
        "#7fbc41", "#4d9221", "#276419",
    ]
);

/// Every palette known by name.
pub const PALETTES: &[Palette] = &[
    HIGH_CONTRAST,
    TABLEAU10,
    CATEGORY10,
    SET1,
    SET2,
    DARK2,
    PAIRED,
    ACCENT,
    VIRIDIS,
    PLASMA,
    MAGMA,
    INFERNO,
    CIVIDIS,
    BLUES,
    GREENS,
    ORANGES,
    REDS,
    PURPLES,
    PUOR,
    RDBU,
    RDYLBU,
    RDYLGN,
    SPECTRAL,
    BRBG,
    PRGN,
    PIYG,
];

/// Looks up a palette by name, case-insensitively.
pub fn find_palette(name: &str) -> Option<&'static Palette> {
    let needle = name.to_lowercase();
    PALETTES
        .iter()
        .find(|palette| palette.name.to_lowercase() == needle)
}

// =============================================================================
// Palette application
// =============================================================================

/// The first `count` palette colors, without repetition. Returns fewer than
/// `count` colors when the palette is exhausted.
pub fn categorical_colors(palette: &Palette, count: usize) -> Vec<Color> {
    palette
        .colors
        .iter()
        .take(count)
        .filter_map(|css| Color::from_css(css))
        .collect()
}

/// Exactly `count` colors for a binned scale: evenly spaced gradient samples
/// for sequential and diverging palettes, cycled table colors for
/// categorical ones.
pub fn bin_palette_colors(palette: &Palette, count: usize) -> Vec<Color> {
    match palette.kind {
        PaletteKind::Categorical => {
            let colors = categorical_colors(palette, palette.colors.len());
            if colors.is_empty() {
                return vec![Color::TRANSPARENT; count];
            }
            (0..count).map(|i| colors[i % colors.len()]).collect()
        }
        PaletteKind::Sequential | PaletteKind::Diverging => {
            Gradient::from_palette(palette).samples(count)
        }
    }
}

// =============================================================================
// Gradient
// =============================================================================

/// A continuous color scale over fixed stops, sampled in Oklab space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    stops: Vec<Color>,
}

impl Gradient {
    pub fn new(stops: Vec<Color>) -> Gradient {
        Gradient { stops }
    }

    pub fn from_palette(palette: &Palette) -> Gradient {
        Gradient::new(
            palette
                .colors
                .iter()
                .filter_map(|css| Color::from_css(css))
                .collect(),
        )
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Samples the gradient at `t`, clamped to `[0, 1]`. The endpoints
    /// return the first and last stop exactly.
    pub fn sample(&self, t: f64) -> Color {
        let Some(&first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        let Some(&last) = self.stops.last() else {
            return Color::TRANSPARENT;
        };
        if self.stops.len() == 1 || t <= 0.0 {
            return first;
        }
        if t >= 1.0 {
            return last;
        }

        let num_segments = self.stops.len() - 1;
        let segment_float = t as f32 * num_segments as f32;
        let segment = (segment_float.floor() as usize).min(num_segments - 1);
        let segment_t = segment_float - segment as f32;

        let start = to_oklab(self.stops[segment]);
        let end = to_oklab(self.stops[segment + 1]);
        from_oklab(start.mix(end, segment_t))
    }

    /// `count` evenly spaced samples from start to end.
    pub fn samples(&self, count: usize) -> Vec<Color> {
        if count == 0 {
            return Vec::new();
        }
        if count == 1 {
            return vec![self.sample(1.0)];
        }
        (0..count)
            .map(|i| self.sample(i as f64 / (count - 1) as f64))
            .collect()
    }
}

fn to_oklab(color: Color) -> Oklab {
    Oklab::from_color(Srgb::new(
        color.red as f32 / 255.0,
        color.green as f32 / 255.0,
        color.blue as f32 / 255.0,
    ))
}

fn from_oklab(oklab: Oklab) -> Color {
    let srgb: Srgb = Srgb::from_color(oklab);
    Color::rgb(
        channel_to_u8(srgb.red),
        channel_to_u8(srgb.green),
        channel_to_u8(srgb.blue),
    )
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// =============================================================================
// Tests
// =============================================================================
