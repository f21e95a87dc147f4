//! SVG colours and stroke widths, plus resolution of named overrides.

use tracing::warn;

/// Number of per-column palette entries.
pub const PALETTE_SIZE: usize = 9;

/// colorbrewer2.org qualitative scheme, 9 classes, not colourblind-safe.
pub const QUALITATIVE: [&str; PALETTE_SIZE] = [
    "#377eb8", "#e41a1c", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

/// colorbrewer2.org diverging scheme, 9 classes, colourblind-safe.
pub const COLORBLIND_SAFE: [&str; PALETTE_SIZE] = [
    "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#f7f7f7", "#d9f0d3", "#a6dba0", "#5aae61",
    "#1b7837",
];

const DEFAULT_BG: &str = "black";
const DEFAULT_BORDER: &str = "black";
const DEFAULT_AXIS: &str = "lightgray";
const DEFAULT_WIDTH: u8 = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Palette {
    #[default]
    Qualitative,
    ColorblindSafe,
}

impl Palette {
    #[inline]
    #[must_use]
    pub const fn colors(self) -> &'static [&'static str; PALETTE_SIZE] {
        match self {
            Self::Qualitative => &QUALITATIVE,
            Self::ColorblindSafe => &COLORBLIND_SAFE,
        }
    }
}

/// Fully resolved SVG styling.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub bg_color: String,
    pub border_color: String,
    pub axis_color: String,
    pub colors: [String; PALETTE_SIZE],
    pub line_width: u8,
    pub axis_width: u8,
    pub border_width: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self::resolve(Palette::default(), |_| None)
    }
}

impl Theme {
    /// Build a theme from `palette`, letting `lookup` override any entry by
    /// name (`BG_COLOR`, `COLOR0`..`COLOR8`, `LINE_WIDTH`, ...).
    ///
    /// String values are cut at the first `"` so they cannot escape the
    /// SVG attribute they land in. Unparsable widths keep their default.
    pub fn resolve<F>(palette: Palette, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let color = |name: &str, default: &str| -> String {
            lookup(name).map_or_else(|| default.to_owned(), sanitize)
        };
        let width = |name: &str| -> u8 {
            match lookup(name) {
                None => DEFAULT_WIDTH,
                Some(v) => {
                    let v = sanitize(v);
                    v.trim().parse().unwrap_or_else(|_| {
                        warn!(key = name, value = %v, "invalid width, using default");
                        DEFAULT_WIDTH
                    })
                }
            }
        };

        let defaults = palette.colors();
        Self {
            bg_color: color("BG_COLOR", DEFAULT_BG),
            border_color: color("BORDER_COLOR", DEFAULT_BORDER),
            axis_color: color("AXIS_COLOR", DEFAULT_AXIS),
            colors: std::array::from_fn(|i| color(&format!("COLOR{i}"), defaults[i])),
            border_width: width("BORDER_WIDTH"),
            line_width: width("LINE_WIDTH"),
            axis_width: width("AXIS_WIDTH"),
        }
    }

    /// Colour for column `c`; columns past the palette reuse its last entry.
    #[inline]
    #[must_use]
    pub fn column_color(&self, c: usize) -> &str {
        &self.colors[c.min(PALETTE_SIZE - 1)]
    }
}

#[inline]
fn sanitize(mut v: String) -> String {
    if let Some(q) = v.find('"') {
        v.truncate(q);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults() {
        let t = Theme::default();
        assert_eq!(t.bg_color, "black");
        assert_eq!(t.border_color, "black");
        assert_eq!(t.axis_color, "lightgray");
        assert_eq!(t.colors[0], "#377eb8");
        assert_eq!((t.line_width, t.axis_width, t.border_width), (2, 2, 2));
    }

    #[test]
    fn colorblind_palette() {
        let t = Theme::resolve(Palette::ColorblindSafe, |_| None);
        assert_eq!(t.colors[0], "#762a83");
        assert_eq!(t.colors[8], "#1b7837");
    }

    #[test]
    fn overrides_apply_by_name() {
        let t = Theme::resolve(
            Palette::Qualitative,
            lookup(&[("BG_COLOR", "white"), ("COLOR3", "red"), ("AXIS_WIDTH", "5")]),
        );
        assert_eq!(t.bg_color, "white");
        assert_eq!(t.colors[3], "red");
        assert_eq!(t.colors[4], "#ff7f00");
        assert_eq!(t.axis_width, 5);
    }

    #[test]
    fn quotes_are_cut() {
        let t = Theme::resolve(
            Palette::Qualitative,
            lookup(&[("BORDER_COLOR", "blue\" onload=\"x")]),
        );
        assert_eq!(t.border_color, "blue");
    }

    #[test]
    fn bad_width_falls_back() {
        let t = Theme::resolve(Palette::Qualitative, lookup(&[("LINE_WIDTH", "wide")]));
        assert_eq!(t.line_width, 2);
    }

    #[test]
    fn palette_wraps_to_last_entry() {
        let t = Theme::default();
        assert_eq!(t.column_color(8), "#999999");
        assert_eq!(t.column_color(40), "#999999");
        assert_eq!(t.column_color(1), "#e41a1c");
    }
}
