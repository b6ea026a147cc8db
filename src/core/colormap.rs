use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Maps a normalized scale position to a color.
///
/// Implementations clamp inputs outside `[0, 1]` to the ramp ends. NaN maps
/// to a transparent color.
pub trait Colormap {
    fn sample(&self, t: f64) -> Color;
}

impl<F> Colormap for F
where
    F: Fn(f64) -> Color,
{
    fn sample(&self, t: f64) -> Color {
        self(t)
    }
}

/// Piecewise-linear ramp through evenly spaced color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSegmentedColormap {
    name: String,
    stops: Vec<Color>,
}

impl LinearSegmentedColormap {
    pub fn from_list(name: impl Into<String>, stops: Vec<Color>) -> ChartResult<Self> {
        let name = name.into();
        if stops.len() < 2 {
            return Err(ChartError::InvalidColormap(format!(
                "colormap `{name}` needs at least two color stops"
            )));
        }
        for stop in &stops {
            stop.validate()
                .map_err(|err| ChartError::InvalidColormap(format!("colormap `{name}`: {err}")))?;
        }
        Ok(Self { name, stops })
    }

    /// Builds a ramp from hex/CSS color strings.
    pub fn from_hex_list<S>(name: impl Into<String>, stops: &[S]) -> ChartResult<Self>
    where
        S: AsRef<str>,
    {
        let name = name.into();
        let colors = stops
            .iter()
            .map(|stop| {
                Color::parse(stop.as_ref())
                    .map_err(|err| ChartError::InvalidColormap(format!("colormap `{name}`: {err}")))
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Self::from_list(name, colors)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Same stops in reverse order, named with an `_r` suffix.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut stops = self.stops.clone();
        stops.reverse();
        Self {
            name: format!("{}_r", self.name),
            stops,
        }
    }
}

impl Colormap for LinearSegmentedColormap {
    fn sample(&self, t: f64) -> Color {
        if t.is_nan() {
            return Color::TRANSPARENT;
        }
        let t = t.clamp(0.0, 1.0);
        if t == 1.0 {
            return self.stops[self.stops.len() - 1];
        }
        let segments = self.stops.len() - 1;
        let position = t * segments as f64;
        let index = (position.floor() as usize).min(segments - 1);
        self.stops[index].lerp(self.stops[index + 1], position - index as f64)
    }
}

/// Serializable reference to a colormap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColormapSpec {
    /// Registered ramp name; a trailing `_r` reverses it.
    Named(String),
    /// Ad-hoc ramp through the listed colors.
    Colors(Vec<String>),
}

impl Default for ColormapSpec {
    fn default() -> Self {
        Self::Named("Greens".to_owned())
    }
}

impl ColormapSpec {
    pub fn resolve(&self) -> ChartResult<LinearSegmentedColormap> {
        match self {
            Self::Named(name) => named_colormap(name),
            Self::Colors(colors) => LinearSegmentedColormap::from_hex_list("custom", colors),
        }
    }
}

const GREENS_STOPS: &[&str] = &[
    "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
    "#00441b",
];

const BLUES_STOPS: &[&str] = &[
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];

const REDS_STOPS: &[&str] = &[
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
    "#67000d",
];

const ORANGES_STOPS: &[&str] = &[
    "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#a63603",
    "#7f2704",
];

const PURPLES_STOPS: &[&str] = &[
    "#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f",
    "#3f007d",
];

const GREYS_STOPS: &[&str] = &[
    "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525",
    "#000000",
];

const RDBU_STOPS: &[&str] = &[
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de",
    "#4393c3", "#2166ac", "#053061",
];

const RDYLGN_STOPS: &[&str] = &[
    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a",
    "#66bd63", "#1a9850", "#006837",
];

const PIYG_STOPS: &[&str] = &[
    "#8e0152", "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#f7f7f7", "#e6f5d0", "#b8e186",
    "#7fbc41", "#4d9221", "#276419",
];

const GITHUB_STOPS: &[&str] = &["#151b23", "#033a16", "#196c2e", "#2ea043", "#56d364"];

fn colormap_registry() -> IndexMap<&'static str, &'static [&'static str]> {
    IndexMap::from([
        ("Greens", GREENS_STOPS),
        ("Blues", BLUES_STOPS),
        ("Reds", REDS_STOPS),
        ("Oranges", ORANGES_STOPS),
        ("Purples", PURPLES_STOPS),
        ("Greys", GREYS_STOPS),
        ("RdBu", RDBU_STOPS),
        ("RdYlGn", RDYLGN_STOPS),
        ("PiYG", PIYG_STOPS),
        ("github", GITHUB_STOPS),
    ])
}

/// Names accepted by [`named_colormap`], in registry order.
#[must_use]
pub fn available_colormaps() -> Vec<&'static str> {
    colormap_registry().keys().copied().collect()
}

/// Looks up a bundled ramp by name; `<name>_r` returns it reversed.
pub fn named_colormap(name: &str) -> ChartResult<LinearSegmentedColormap> {
    let registry = colormap_registry();
    let (base, reversed) = match name.strip_suffix("_r") {
        Some(base) => (base, true),
        None => (name, false),
    };
    let stops = registry.get(base).ok_or_else(|| {
        ChartError::InvalidColormap(format!(
            "unknown colormap `{name}`, expected one of: {}",
            available_colormaps().join(", ")
        ))
    })?;
    let colormap = LinearSegmentedColormap::from_hex_list(base, stops)?;
    Ok(if reversed {
        colormap.reversed()
    } else {
        colormap
    })
}
