use crate::astar::astar_search;
use crate::error::{Error, OpResult};
use crate::grid::MazeGrid;
use crate::math::{is_unset, UNSET};
use crate::qlearn::{q_search, q_search_with_rng};
use crate::render::PathRenderConfig;
use crate::viewport::Viewport;
use bevy_math::{IVec2, Vec2};
use rand::Rng;
use tracing::debug;

/// The pathfinding facade. Owns the maze and the current `(start, end,
/// path)` triple, re-searches whenever an endpoint changes, and projects the
/// result into viewport geometry on demand.
///
/// Endpoints are logical cells; the stored path is in doubled coordinates,
/// ordered from the end back to the start. After every public call the
/// triple is consistent: a failed search restores the endpoint it was about
/// to change and leaves the path untouched.
#[derive(Debug, Clone, Default)]
pub struct MazeEngine {
    grid: MazeGrid,
    start: IVec2,
    end: IVec2,
    path: Vec<IVec2>,
}

impl MazeEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: MazeGrid::new(),
            start: UNSET,
            end: UNSET,
            path: Vec::new(),
        }
    }

    /// Take ownership of a new maze, resetting both endpoints and the path.
    pub fn set_maze(&mut self, grid: MazeGrid) {
        debug!(rows = grid.rows(), cols = grid.cols(), "maze replaced");
        self.grid = grid;
        self.start = UNSET;
        self.end = UNSET;
        self.path.clear();
    }

    /// Get the maze currently owned by the engine.
    #[inline]
    #[must_use]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Get the logical start cell, or the unset sentinel.
    #[inline]
    #[must_use]
    pub fn start(&self) -> IVec2 {
        self.start
    }

    /// Get the logical end cell, or the unset sentinel.
    #[inline]
    #[must_use]
    pub fn end(&self) -> IVec2 {
        self.end
    }

    /// Get the current path in doubled coordinates, end-first. Empty when
    /// either endpoint is unset.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &[IVec2] {
        &self.path
    }

    /// Determine if both endpoints have been chosen.
    #[inline]
    #[must_use]
    pub fn has_endpoints(&self) -> bool {
        !is_unset(self.start) && !is_unset(self.end)
    }

    /// Choose the start cell from a viewport point, dividing by the given
    /// pixels-per-cell ratios, then re-search if the end is already set.
    ///
    /// On [Error::PathNotFound] the previous start is restored and the error
    /// re-surfaced. A call on an empty maze is a silent no-op.
    pub fn set_start(&mut self, point: Vec2, w_ratio: f32, h_ratio: f32) -> Result<(), Error> {
        if self.maze_is_empty() {
            return Ok(());
        }
        let previous = self.start;
        self.start = self.point_to_cell(point, w_ratio, h_ratio);
        if let Err(error) = self.refresh_path() {
            self.start = previous;
            return Err(error);
        }
        Ok(())
    }

    /// Choose the end cell from a viewport point. Symmetric to [set_start].
    ///
    /// [set_start]: MazeEngine::set_start
    pub fn set_end(&mut self, point: Vec2, w_ratio: f32, h_ratio: f32) -> Result<(), Error> {
        if self.maze_is_empty() {
            return Ok(());
        }
        let previous = self.end;
        self.end = self.point_to_cell(point, w_ratio, h_ratio);
        if let Err(error) = self.refresh_path() {
            self.end = previous;
            return Err(error);
        }
        Ok(())
    }

    /// Find a path with the Q-Learning strategy instead of A*. Both cells
    /// are logical; on success they become the engine's endpoints and the
    /// extracted path replaces the current one. On failure the engine state
    /// is unchanged.
    pub fn q_find(&mut self, start: IVec2, goal: IVec2) -> OpResult {
        self.store_q_result(start, goal, q_search(&self.grid, start, goal))
    }

    /// [q_find] with an injected exploration generator, for reproducible
    /// training runs.
    ///
    /// [q_find]: MazeEngine::q_find
    pub fn q_find_with_rng<R: Rng>(&mut self, start: IVec2, goal: IVec2, rng: &mut R) -> OpResult {
        self.store_q_result(start, goal, q_search_with_rng(&self.grid, start, goal, rng))
    }

    fn store_q_result(
        &mut self,
        start: IVec2,
        goal: IVec2,
        result: Result<Vec<IVec2>, Error>,
    ) -> OpResult {
        match result {
            Ok(path) => {
                self.start = start;
                self.end = goal;
                self.path = path;
                OpResult::success()
            }
            Err(error) => OpResult::failure(error),
        }
    }

    /// Project the current endpoints and path onto a viewport of the given
    /// pixel size. Returns an empty config for an empty maze or when either
    /// endpoint exceeds the logical bounds; an unset endpoint is simply
    /// skipped.
    #[must_use]
    pub fn render(&self, area_size: Vec2) -> PathRenderConfig {
        let mut config = PathRenderConfig::default();
        if self.maze_is_empty() {
            return config;
        }

        let cols = self.grid.logical_cols();
        let rows = self.grid.logical_rows();
        if self.exceeds_bounds(self.start) || self.exceeds_bounds(self.end) {
            return config;
        }

        let viewport = Viewport::new(area_size, cols, rows);
        config.points.extend(viewport.marker(self.start));
        config.points.extend(viewport.marker(self.end));
        for pair in self.path.windows(2) {
            config.path.push(viewport.segment(pair[0], pair[1]));
        }
        config
    }

    /// A grid with no full logical cell in either dimension is treated as
    /// absent.
    #[inline]
    fn maze_is_empty(&self) -> bool {
        self.grid.logical_cols() == 0 || self.grid.logical_rows() == 0
    }

    #[inline]
    fn exceeds_bounds(&self, cell: IVec2) -> bool {
        cell.x >= self.grid.logical_cols() as i32 || cell.y >= self.grid.logical_rows() as i32
    }

    fn point_to_cell(&self, point: Vec2, w_ratio: f32, h_ratio: f32) -> IVec2 {
        let col = (point.x / w_ratio).floor() as i32;
        let row = (point.y / h_ratio).floor() as i32;
        IVec2::new(
            col.clamp(0, self.grid.logical_cols() as i32 - 1),
            row.clamp(0, self.grid.logical_rows() as i32 - 1),
        )
    }

    fn refresh_path(&mut self) -> Result<(), Error> {
        if !self.has_endpoints() {
            return Ok(());
        }
        self.path = astar_search(&self.grid, self.start, self.end)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::PASSAGE;
    use bevy_math::{ivec2, vec2};
    use rand_xoshiro::rand_core::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn open_grid(logical_rows: usize, logical_cols: usize) -> MazeGrid {
        MazeGrid::from_rows(vec![vec![PASSAGE; logical_cols * 2]; logical_rows * 2])
    }

    /// Ratios for clicking logical cells directly on a `size`-pixel viewport.
    fn ratios(grid: &MazeGrid, size: Vec2) -> (f32, f32) {
        (
            size.x / grid.logical_cols() as f32,
            size.y / grid.logical_rows() as f32,
        )
    }

    fn click(cell: IVec2, w_ratio: f32, h_ratio: f32) -> Vec2 {
        vec2(
            (cell.x as f32 + 0.5) * w_ratio,
            (cell.y as f32 + 0.5) * h_ratio,
        )
    }

    #[test]
    fn test_set_maze_resets_state() {
        let mut engine = MazeEngine::new();
        let grid = open_grid(3, 3);
        let (w, h) = ratios(&grid, vec2(300., 300.));
        engine.set_maze(grid);

        engine.set_start(click(ivec2(0, 0), w, h), w, h).unwrap();
        engine.set_end(click(ivec2(2, 2), w, h), w, h).unwrap();
        assert!(!engine.path().is_empty());

        engine.set_maze(open_grid(2, 2));
        assert_eq!(engine.start(), UNSET);
        assert_eq!(engine.end(), UNSET);
        assert!(engine.path().is_empty());
    }

    #[test]
    fn test_astar_on_both_endpoints() {
        let mut engine = MazeEngine::new();
        let grid = open_grid(3, 3);
        let (w, h) = ratios(&grid, vec2(300., 300.));
        engine.set_maze(grid);

        engine.set_start(click(ivec2(0, 0), w, h), w, h).unwrap();
        assert!(engine.path().is_empty());

        engine.set_end(click(ivec2(2, 2), w, h), w, h).unwrap();
        assert_eq!(engine.start(), ivec2(0, 0));
        assert_eq!(engine.end(), ivec2(2, 2));
        assert_eq!(engine.path().first(), Some(&ivec2(4, 4)));
        assert_eq!(engine.path().last(), Some(&ivec2(0, 0)));
    }

    #[test]
    fn test_endpoint_restored_on_failure() {
        // Logical column 2 is sealed off by a wall column.
        let mut rows = vec![vec![PASSAGE; 6]; 6];
        for row in &mut rows {
            row[3] = '1';
        }
        let grid = MazeGrid::from_rows(rows);
        let (w, h) = ratios(&grid, vec2(300., 300.));

        let mut engine = MazeEngine::new();
        engine.set_maze(grid);
        engine.set_start(click(ivec2(0, 0), w, h), w, h).unwrap();
        engine.set_end(click(ivec2(1, 0), w, h), w, h).unwrap();
        let path_before = engine.path().to_vec();

        let err = engine.set_end(click(ivec2(2, 0), w, h), w, h).unwrap_err();
        assert_eq!(err, Error::PathNotFound);
        assert_eq!(engine.end(), ivec2(1, 0));
        assert_eq!(engine.path(), path_before.as_slice());

        // The restored pair still renders.
        let config = engine.render(vec2(300., 300.));
        assert_eq!(config.points.len(), 2);
    }

    #[test]
    fn test_empty_maze_is_noop() {
        let mut engine = MazeEngine::new();
        engine.set_start(vec2(10., 10.), 1., 1.).unwrap();
        assert_eq!(engine.start(), UNSET);
        assert!(engine.render(vec2(100., 100.)).is_empty());
    }

    #[test]
    fn test_render_single_marker_without_end() {
        let mut engine = MazeEngine::new();
        let grid = open_grid(3, 3);
        let (w, h) = ratios(&grid, vec2(300., 300.));
        engine.set_maze(grid);
        engine.set_start(click(ivec2(1, 1), w, h), w, h).unwrap();

        let config = engine.render(vec2(300., 300.));
        assert_eq!(config.points.len(), 1);
        assert!(config.path.is_empty());
    }

    #[test]
    fn test_render_polyline() {
        let mut engine = MazeEngine::new();
        let grid = open_grid(3, 3);
        let (w, h) = ratios(&grid, vec2(300., 300.));
        engine.set_maze(grid);
        engine.set_start(click(ivec2(0, 0), w, h), w, h).unwrap();
        engine.set_end(click(ivec2(2, 2), w, h), w, h).unwrap();

        let config = engine.render(vec2(300., 300.));
        assert_eq!(config.points.len(), 2);
        assert_eq!(config.path.len(), engine.path().len() - 1);
    }

    #[test]
    fn test_q_find_updates_state() {
        let mut engine = MazeEngine::new();
        engine.set_maze(open_grid(2, 2));

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let result = engine.q_find_with_rng(ivec2(0, 0), ivec2(1, 1), &mut rng);
        assert!(result.ok);
        assert!(result.message.is_empty());
        assert_eq!(engine.start(), ivec2(0, 0));
        assert_eq!(engine.end(), ivec2(1, 1));
        assert_eq!(engine.path().first(), Some(&ivec2(2, 2)));
        assert_eq!(engine.path().last(), Some(&ivec2(0, 0)));
    }

    #[test]
    fn test_q_find_incorrect_point_leaves_state() {
        let mut engine = MazeEngine::new();
        engine.set_maze(open_grid(2, 2));

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let result = engine.q_find_with_rng(ivec2(0, 0), ivec2(2, 0), &mut rng);
        assert!(!result.ok);
        assert_eq!(result.message, "Incorrect point");
        assert_eq!(engine.start(), UNSET);
        assert_eq!(engine.end(), UNSET);
        assert!(engine.path().is_empty());
    }
}
