//! Read-only presentation of a run
//!
//! Hosts draw from a [`RunView`] or the text renderer; neither touches
//! simulation state.

use serde::Serialize;

use crate::sim::{Aabb, ObstacleKind, RunState};

/// One obstacle as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub bounds: Aabb,
    pub radius: f32,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunView {
    pub player: Aabb,
    pub airborne: bool,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub speed: f32,
    pub ended: bool,
    pub elapsed_secs: f32,
}

impl From<&RunState> for RunView {
    fn from(state: &RunState) -> Self {
        Self {
            player: state.player.aabb(),
            airborne: state.player.airborne,
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    bounds: o.aabb(),
                    radius: o.radius,
                })
                .collect(),
            score: state.score,
            speed: state.scroll_speed(),
            ended: state.is_ended(),
            elapsed_secs: state.elapsed_secs(),
        }
    }
}

impl RunView {
    /// HUD line shown above the lane
    pub fn hud(&self) -> String {
        let mut hud = format!(
            "Score: {}  Speed: {}  Time: {:.1}s",
            self.score, self.speed, self.elapsed_secs
        );
        if self.ended {
            hud.push_str("  GAME OVER");
        }
        hud
    }
}

/// Draw the visible part of the lane into a `cols` x `rows` character grid
///
/// `@` player, `O` hazard, `$` collectible, `=` ground.
pub fn render_text(state: &RunState, cols: usize, rows: usize) -> String {
    let view = RunView::from(state);
    let mut out = view.hud();
    if cols == 0 || rows < 2 {
        return out;
    }

    let mut grid = vec![vec![' '; cols]; rows];
    grid[rows - 1].fill('=');

    let sx = cols as f32 / state.tuning.screen_width;
    let sy = (rows - 1) as f32 / state.tuning.ground_line();

    for obstacle in &view.obstacles {
        let glyph = match obstacle.kind {
            ObstacleKind::Hazard => 'O',
            ObstacleKind::Collectible => '$',
        };
        fill_box(&mut grid, &obstacle.bounds, sx, sy, glyph);
    }
    fill_box(&mut grid, &view.player, sx, sy, '@');

    for row in grid {
        out.push('\n');
        out.extend(row);
    }
    out
}

fn fill_box(grid: &mut [Vec<char>], bounds: &Aabb, sx: f32, sy: f32, glyph: char) {
    // Ground row stays intact
    let rows = grid.len() - 1;
    let cols = grid.first().map(Vec::len).unwrap_or(0);

    let span = |min: f32, max: f32, scale: f32, limit: usize| {
        let lo = ((min * scale).floor().max(0.0) as usize).min(limit);
        let hi = ((max * scale).ceil().max(0.0) as usize).min(limit);
        lo..hi
    };
    let xs = span(bounds.min.x, bounds.max.x, sx, cols);
    let ys = span(bounds.min.y, bounds.max.y, sy, rows);
    if xs.is_empty() || ys.is_empty() {
        return;
    }

    for row in &mut grid[ys] {
        row[xs.clone()].fill(glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::RunTuning;

    #[test]
    fn test_view_mirrors_state() {
        let state = RunState::new(RunTuning::classic(), 4);
        let view = RunView::from(&state);
        assert_eq!(view.obstacles.len(), 3);
        assert_eq!(view.player, state.player.aabb());
        assert_eq!(view.speed, 6.0);
        assert!(!view.ended);
        assert!(view.hud().starts_with("Score: 0"));
    }

    #[test]
    fn test_render_shows_player_and_ground() {
        let mut state = RunState::new(RunTuning::classic(), 4);
        state.obstacles.clear();
        let preset = state.tuning.hazard_presets[0];
        state.push_hazard(400.0, preset);

        let text = render_text(&state, 80, 11);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[11].chars().all(|c| c == '='));

        // Player and boulder stand on the row above the ground
        let standing = lines[10];
        assert!(standing.contains('@'));
        assert!(standing.contains('O'));
        assert!(standing.find('@') < standing.find('O'));
    }

    #[test]
    fn test_offscreen_obstacles_are_clipped() {
        let state = RunState::new(RunTuning::classic(), 4);
        // Seeds start at or beyond the right edge
        let text = render_text(&state, 40, 6);
        assert!(!text.contains('O'));
    }

    #[test]
    fn test_tiny_grid_only_hud() {
        let state = RunState::new(RunTuning::classic(), 4);
        assert_eq!(render_text(&state, 0, 0), RunView::from(&state).hud());
    }

    #[test]
    fn test_view_serializes() {
        let state = RunState::new(RunTuning::boulder_runner(), 4);
        let json = serde_json::to_value(RunView::from(&state)).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["ended"], false);
    }
}
