//! Self-contained SVG document: frame, axes with ticks, one mark set per
//! column and optional regression lines.

use std::io::Write;

use tracing::debug;

use crate::{
    core::{
        config::{Config, Mode},
        constants::{REGRESSION_LINE_WIDTH, SVG_DASH, SVG_POINT_SIZE},
        data::{Dataset, Point},
        error::PlotError,
        regression::fit,
        scale::PlotState,
        theme::Theme,
    },
    render::Renderer,
};

/// Pixel distance between ticks: about 5–10 ticks across `range`.
#[must_use]
pub fn tick_spacing(size: usize, range: f64) -> f64 {
    let rounded = 10f64.powf(range.log10().ceil());
    let step = rounded / if range < rounded / 2.0 { 20.0 } else { 10.0 };
    #[allow(clippy::cast_precision_loss)]
    let size = size as f64;
    size * (step / range)
}

/// Tick offsets walking out from `origin`: upwards while below `limit`,
/// then downwards while above zero. Each step truncates to a whole pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn tick_offsets(origin: usize, spacing: f64, limit: usize) -> Vec<i64> {
    let mut ticks = Vec::new();
    // sub-pixel spacing would never advance
    if spacing.is_nan() || spacing < 1.0 {
        return ticks;
    }
    let limit = limit as f64;

    let mut at = (origin as f64 + spacing).trunc();
    while at < limit {
        ticks.push(at as i64);
        at = (at + spacing).trunc();
    }
    let mut at = (origin as f64 - spacing).trunc();
    while at > 0.0 {
        ticks.push(at as i64);
        at = (at - spacing).trunc();
    }
    ticks
}

#[derive(Clone, Debug)]
pub struct SvgRenderer {
    theme: Theme,
    mode: Mode,
    log_count: bool,
    regression: bool,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(cfg: &Config) -> Self {
        Self {
            theme: cfg.theme.clone(),
            mode: cfg.mode,
            log_count: cfg.log_count,
            regression: cfg.regression,
        }
    }

    fn header(&self, out: &mut Vec<u8>, w: usize, h: usize) -> Result<(), PlotError> {
        let t = &self.theme;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" version="1.1">"#
        )?;
        writeln!(
            out,
            "<!-- Generator: {} {} -->",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(out, r#"<rect x="0" y="0" width="{w}" height="{h}""#)?;
        writeln!(
            out,
            r#"    fill="{}" stroke-width="{}" stroke="{}" />"#,
            t.bg_color, t.border_width, t.border_color
        )?;
        Ok(())
    }

    fn tick(&self, out: &mut Vec<u8>, x1: i64, y1: i64, x2: i64, y2: i64) -> Result<(), PlotError> {
        writeln!(
            out,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="1" />"#,
            self.theme.axis_color
        )?;
        Ok(())
    }

    #[allow(clippy::cast_possible_wrap)]
    fn axes(&self, out: &mut Vec<u8>, state: &PlotState) -> Result<(), PlotError> {
        let Some(axis) = state.axis else {
            return Ok(());
        };
        let t = &self.theme;
        let dash = |real: bool| {
            if real {
                String::new()
            } else {
                format!(r#"stroke-dasharray="{SVG_DASH}" "#)
            }
        };
        let tick_len = 3 * i64::from(t.axis_width);
        let (ax, ay) = (axis.x as i64, axis.y as i64);

        writeln!(
            out,
            r#"<line x1="{ax}" y1="0" x2="{ax}" y2="{}" stroke="{}" stroke-width="{}" {}/>"#,
            state.height,
            t.axis_color,
            t.axis_width,
            dash(axis.draw_y_axis)
        )?;

        if axis.draw_x_axis {
            let spacing = tick_spacing(state.width, state.bounds.range_x);
            for x in tick_offsets(axis.x, spacing, state.width) {
                self.tick(out, x, ay - tick_len, x, ay + tick_len)?;
            }
        }

        writeln!(
            out,
            r#"<line x1="0" y1="{ay}" x2="{}" y2="{ay}" stroke="{}" stroke-width="{}" {}/>"#,
            state.width,
            t.axis_color,
            t.axis_width,
            dash(axis.draw_x_axis)
        )?;

        if axis.draw_y_axis {
            let x0 = (ax - tick_len).max(0);
            let spacing = tick_spacing(state.height, state.bounds.range_y);
            for y in tick_offsets(axis.y, spacing, state.height) {
                self.tick(out, x0, y, ax + tick_len, y)?;
            }
        }
        Ok(())
    }

    /// One `<circle>` per non-empty point, sized by count in count mode.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    fn circles(
        &self,
        out: &mut Vec<u8>,
        state: &PlotState,
        c: usize,
        column: &[Point],
    ) -> Result<(), PlotError> {
        let color = self.theme.column_color(c);
        for p in column.iter().filter(|p| !p.is_empty()) {
            let sp = state.project(*p)?;
            let r = match state.count_at(c, sp) {
                Some(n) if self.log_count => SVG_POINT_SIZE + (n as f64).ln() as usize,
                Some(n) => SVG_POINT_SIZE + n,
                None => SVG_POINT_SIZE,
            };
            writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{r}" stroke="{color}" />"#,
                sp.x, sp.y
            )?;
        }
        Ok(())
    }

    /// One `<polyline>` per run of consecutive non-empty points.
    fn polylines(
        &self,
        out: &mut Vec<u8>,
        state: &PlotState,
        c: usize,
        column: &[Point],
    ) -> Result<(), PlotError> {
        let color = self.theme.column_color(c);
        let close = |out: &mut Vec<u8>| -> Result<(), PlotError> {
            writeln!(
                out,
                r#"" stroke="{color}" stroke-width="{}" fill="none" />"#,
                self.theme.line_width
            )?;
            Ok(())
        };

        let mut open = false;
        for p in column {
            if p.is_empty() {
                if open {
                    close(out)?;
                    open = false;
                }
                continue;
            }
            if !open {
                writeln!(out, r#"<polyline points=""#)?;
                open = true;
            }
            let sp = state.project(*p)?;
            writeln!(out, "    {},{}", sp.x, sp.y)?;
        }
        if open {
            close(out)?;
        }
        Ok(())
    }

    /// Dashed least-squares line across the x range. Fitted in transformed
    /// space, so the endpoints are scaled as they are.
    fn regression_line(
        &self,
        out: &mut Vec<u8>,
        state: &PlotState,
        c: usize,
        column: &[Point],
    ) -> Result<(), PlotError> {
        let Some(f) = fit(column, state.transform)? else {
            return Ok(());
        };
        if !f.slope.is_finite() || !f.intercept.is_finite() {
            debug!(column = c, "degenerate fit, no regression line");
            return Ok(());
        }
        let b = &state.bounds;
        let p0 = state.scale(Point::new(b.min_x, f.at(b.min_x)));
        let p1 = state.scale(Point::new(b.max_x, f.at(b.max_x)));
        debug!(column = c, x1 = p0.x, y1 = p0.y, x2 = p1.x, y2 = p1.y, "regression line");
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{REGRESSION_LINE_WIDTH}" stroke-dasharray="{SVG_DASH}" />"#,
            p0.x,
            p0.y,
            p1.x,
            p1.y,
            self.theme.column_color(c)
        )?;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, state: &PlotState, ds: &Dataset) -> Result<Vec<u8>, PlotError> {
        let mut out = Vec::new();
        self.header(&mut out, state.width, state.height)?;
        self.axes(&mut out, state)?;

        for (c, column) in ds.columns().iter().enumerate() {
            match self.mode {
                Mode::Line => self.polylines(&mut out, state, c, column)?,
                Mode::Dot | Mode::Count => self.circles(&mut out, state, c, column)?,
            }
            if self.regression {
                self.regression_line(&mut out, state, c, column)?;
            }
        }

        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OutputKind, data::EMPTY};
    use crate::render::draw;

    fn series(ys: &[f64]) -> Vec<Point> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| Point::new(i as f64, y))
            .collect()
    }

    fn svg(cfg: &Config, columns: Vec<Vec<Point>>) -> String {
        String::from_utf8(draw(cfg, &Dataset::from_columns(columns)).unwrap()).unwrap()
    }

    fn cfg() -> crate::core::ConfigBuilder {
        Config::builder(OutputKind::Svg)
    }

    #[test]
    fn tick_spacing_targets_whole_steps() {
        assert!((tick_spacing(320, 10.0) - 32.0).abs() < 1e-9);
        // range under half the rounded power of ten → twenty steps
        assert!((tick_spacing(200, 40.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_walk_both_ways() {
        assert_eq!(tick_offsets(50, 20.0, 100), vec![70, 90, 30, 10]);
        assert_eq!(tick_offsets(0, 32.5, 100), vec![32, 64, 96]);
    }

    #[test]
    fn sub_pixel_spacing_has_no_ticks() {
        assert!(tick_offsets(10, 0.4, 100).is_empty());
        assert!(tick_offsets(10, f64::NAN, 100).is_empty());
    }

    #[test]
    fn document_frame() {
        let out = svg(&cfg().build().unwrap(), vec![series(&[1.0, 2.0])]);
        assert!(out.starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"320\" height=\"200\" version=\"1.1\">\n"
        ));
        assert!(out.contains(&format!("<!-- Generator: plotgrid {} -->", env!("CARGO_PKG_VERSION"))));
        assert!(out.contains(
            "<rect x=\"0\" y=\"0\" width=\"320\" height=\"200\"\n    fill=\"black\" stroke-width=\"2\" stroke=\"black\" />\n"
        ));
        assert!(out.ends_with("</svg>\n"));
        assert_eq!(out.matches("<circle").count(), 2);
    }

    #[test]
    fn polyline_runs_split_on_empty_points() {
        let out = svg(
            &cfg().mode(Mode::Line).build().unwrap(),
            vec![series(&[1.0, 2.0, EMPTY, 3.0, 4.0, EMPTY, EMPTY])],
        );
        assert_eq!(out.matches("<polyline points=\"\n").count(), 2);
        assert_eq!(out.matches("fill=\"none\" />").count(), 2);
        assert!(!out.contains("<circle"));
    }

    #[test]
    fn substituted_axis_is_dashed() {
        let pts = vec![Point::new(1000.0, -1.0), Point::new(1040.0, 1.0)];
        let out = svg(&cfg().build().unwrap(), vec![pts]);
        let dashed: Vec<&str> = out
            .lines()
            .filter(|l| l.contains("stroke-dasharray=\"2,5\""))
            .collect();
        assert_eq!(dashed.len(), 1);
        assert!(dashed[0].contains("y1=\"0\""));
        // only the real x axis gets ticks
        assert!(out.contains("stroke-width=\"1\""));
    }

    #[test]
    fn no_axis_no_lines() {
        let out = svg(&cfg().axis(false).build().unwrap(), vec![series(&[1.0, 2.0])]);
        assert!(!out.contains("<line"));
    }

    #[test]
    fn regression_line_spans_x_range() {
        let out = svg(
            &cfg().axis(false).regression(true).build().unwrap(),
            vec![series(&[10.0, 15.0, 20.0, 25.0, 30.0])],
        );
        assert!(out.contains(
            "<line x1=\"0\" y1=\"133\" x2=\"318\" y2=\"1\" stroke=\"#377eb8\" stroke-width=\"2\" stroke-dasharray=\"2,5\" />"
        ), "{out}");
    }

    #[test]
    fn vertical_data_has_no_regression_line() {
        let pts = vec![Point::new(3.0, 1.0), Point::new(3.0, 5.0)];
        let out = svg(&cfg().axis(false).regression(true).build().unwrap(), vec![pts]);
        assert!(!out.contains("<line"));
    }

    #[test]
    fn palette_wraps_past_nine_columns() {
        let columns: Vec<_> = (0..11).map(|c| series(&[f64::from(c)])).collect();
        let out = svg(&cfg().build().unwrap(), columns);
        assert_eq!(out.matches("stroke=\"#999999\" />").count(), 3);
    }

    #[test]
    fn count_mode_grows_circles() {
        let pts = vec![Point::new(1.0, 1.0); 3];
        let out = svg(&cfg().mode(Mode::Count).build().unwrap(), vec![pts.clone()]);
        assert_eq!(out.matches("r=\"5\"").count(), 3);

        let out = svg(
            &cfg().mode(Mode::Count).log_count(true).build().unwrap(),
            vec![pts],
        );
        assert_eq!(out.matches("r=\"3\"").count(), 3);
    }

    #[test]
    fn theme_reaches_the_document() {
        let theme = Theme::resolve(crate::core::Palette::Qualitative, |k| {
            (k == "BG_COLOR").then(|| "white".to_owned())
        });
        let out = svg(&cfg().theme(theme).build().unwrap(), vec![series(&[1.0])]);
        assert!(out.contains("fill=\"white\""));
    }
}
