use crate::math::{self, Sample};
use crate::state::AppState;

/// Character grid width
pub const WIDTH: usize = 80;
/// Character grid height
pub const HEIGHT: usize = 22;
/// Total number of grid cells
pub const CELLS: usize = WIDTH * HEIGHT;

/// Glyphs from dimmest to brightest
const LUMINANCE_RAMP: &[u8; 12] = b".,-~:;=!*#$@";

/// Step of the outer sweep around the tube
const TUBE_STEP: f64 = 0.07;
/// Step of the inner sweep over the tube cross-section
const CROSS_STEP: f64 = 0.02;
/// Upper bound of both surface sweeps
const SWEEP_END: f64 = 6.28;

/// One rendered animation frame: a glyph per grid cell, plus the depth
/// values that chose the glyphs.
pub struct Frame {
    glyphs: [u8; CELLS],
    depth: [f64; CELLS],
}

impl Frame {
    /// Creates a blank frame: every depth 0, every glyph a space.
    fn new() -> Self {
        Frame {
            glyphs: [b' '; CELLS],
            depth: [0.0; CELLS],
        }
    }

    /// Writes one sample into the grid if it lands inside the drawable
    /// region and is nearer than what its cell already holds.
    ///
    /// The bounds are exclusive on all sides: row 0 is never drawn, and
    /// column 0 is reserved as the row separator by `to_text`.
    fn plot(&mut self, sample: &Sample) {
        let Sample { x, y, depth, level } = *sample;
        if y > 0 && y < HEIGHT as i32 && x > 0 && x < WIDTH as i32 {
            let o = x as usize + WIDTH * y as usize;
            if depth > self.depth[o] {
                self.depth[o] = depth;
                // Negative levels render as the dimmest glyph; levels past
                // the ramp stick to the brightest.
                let level = (level.max(0) as usize).min(LUMINANCE_RAMP.len() - 1);
                self.glyphs[o] = LUMINANCE_RAMP[level];
            }
        }
    }

    /// Serializes the grid for display.
    ///
    /// Every index that is a multiple of 80 emits a newline instead of its
    /// glyph, so the block opens with a blank line and each of the 22 rows
    /// carries 79 visible columns. This is the classic donut layout and is
    /// load-bearing: the separator column doubles as cell 0 of each row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(CELLS);
        for (o, &glyph) in self.glyphs.iter().enumerate() {
            if o % WIDTH == 0 {
                out.push('\n');
            } else {
                out.push(glyph as char);
            }
        }
        out
    }
}

/// Renders one frame of the torus at the state's current rotation angles.
///
/// Pure function of the two angles: identical angles produce identical
/// frames. Both sweeps accumulate their floating-point step up to the
/// literal 6.28 bound, so the sample count is whatever the accumulation
/// yields rather than a fixed iteration count.
pub fn render_frame(state: &AppState) -> Frame {
    let mut frame = Frame::new();

    let mut j = 0.0;
    while j < SWEEP_END {
        let mut i = 0.0;
        while i < SWEEP_END {
            frame.plot(&math::sample_torus(i, j, state.angle_a, state.angle_b));
            i += CROSS_STEP;
        }
        j += TUBE_STEP;
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(angle_a: f64, angle_b: f64) -> AppState {
        let mut state = AppState::new(false);
        state.angle_a = angle_a;
        state.angle_b = angle_b;
        state
    }

    #[test]
    fn blank_frame_has_zero_depth_everywhere() {
        let frame = Frame::new();
        assert!(frame.glyphs.iter().all(|&g| g == b' '));
        assert!(frame.depth.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn rendering_is_deterministic() {
        let state = state_at(1.3, 0.7);
        assert_eq!(
            render_frame(&state).to_text(),
            render_frame(&state).to_text()
        );
    }

    #[test]
    fn separator_column_and_top_row_stay_blank() {
        let frame = render_frame(&state_at(2.1, 4.4));
        for row in 0..HEIGHT {
            assert_eq!(frame.glyphs[row * WIDTH], b' ');
        }
        for col in 0..WIDTH {
            assert_eq!(frame.glyphs[col], b' ');
        }
    }

    #[test]
    fn depth_test_keeps_the_nearest_sample() {
        let mut frame = Frame::new();
        let o = 5 + WIDTH * 5;

        frame.plot(&Sample { x: 5, y: 5, depth: 0.4, level: 3 });
        assert_eq!(frame.depth[o], 0.4);
        assert_eq!(frame.glyphs[o], LUMINANCE_RAMP[3]);

        // A farther sample must not overwrite the cell
        frame.plot(&Sample { x: 5, y: 5, depth: 0.2, level: 9 });
        assert_eq!(frame.depth[o], 0.4);
        assert_eq!(frame.glyphs[o], LUMINANCE_RAMP[3]);

        // A nearer one must
        frame.plot(&Sample { x: 5, y: 5, depth: 0.9, level: 9 });
        assert_eq!(frame.depth[o], 0.9);
        assert_eq!(frame.glyphs[o], LUMINANCE_RAMP[9]);
    }

    #[test]
    fn samples_off_the_grid_are_dropped() {
        let mut frame = Frame::new();
        for sample in [
            Sample { x: 0, y: 5, depth: 0.5, level: 1 },
            Sample { x: 80, y: 5, depth: 0.5, level: 1 },
            Sample { x: 5, y: 0, depth: 0.5, level: 1 },
            Sample { x: 5, y: 22, depth: 0.5, level: 1 },
            Sample { x: -3, y: -1, depth: 0.5, level: 1 },
        ] {
            frame.plot(&sample);
        }
        assert!(frame.glyphs.iter().all(|&g| g == b' '));
    }

    #[test]
    fn luminance_levels_clamp_to_the_ramp() {
        let mut frame = Frame::new();
        frame.plot(&Sample { x: 1, y: 1, depth: 0.1, level: -7 });
        assert_eq!(frame.glyphs[1 + WIDTH], b'.');
        frame.plot(&Sample { x: 2, y: 1, depth: 0.1, level: 40 });
        assert_eq!(frame.glyphs[2 + WIDTH], b'@');
    }

    #[test]
    fn first_frame_layout() {
        let text = render_frame(&AppState::new(false)).to_text();

        let rows: Vec<&str> = text.split('\n').collect();
        assert_eq!(rows.len(), HEIGHT + 1);
        assert!(rows[0].is_empty());
        for row in &rows[1..] {
            assert_eq!(row.len(), WIDTH - 1);
        }

        let allowed: &[u8] = b" .,-~:;=!*#$@";
        assert!(text
            .bytes()
            .filter(|&b| b != b'\n')
            .all(|b| allowed.contains(&b)));

        // The torus itself must actually show up
        assert!(text.bytes().any(|b| b != b' ' && b != b'\n'));
    }

    #[test]
    fn torus_rotates_over_time() {
        let mut state = AppState::new(false);
        let first = render_frame(&state);
        for _ in 0..25 {
            state.advance();
        }
        let later = render_frame(&state);

        let changed = first
            .glyphs
            .iter()
            .zip(later.glyphs.iter())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > CELLS / 20, "only {changed} cells changed");
    }
}
