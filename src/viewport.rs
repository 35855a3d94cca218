use crate::math::{is_unset, to_logical};
use crate::render::Line;
use bevy_math::{vec2, IVec2, Rect, Vec2};

/// Projects logical and doubled maze cells into a pixel viewport.
///
/// The grid is fitted into the viewport with square cells of
/// `min(W / C, H / R)` pixels, then stretched per-axis back to the full
/// viewport size, so cell centers are evenly distributed across both
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    base_cell_size: f32,
    square_size: f32,
    scale: Vec2,
}

impl Viewport {
    /// Create a projection of a `logical_cols x logical_rows` maze onto a
    /// viewport of the given pixel size.
    #[must_use]
    pub fn new(size: Vec2, logical_cols: usize, logical_rows: usize) -> Self {
        let cols = logical_cols as f32;
        let rows = logical_rows as f32;
        let base_cell_size = f32::min(size.x / cols, size.y / rows);
        Self {
            base_cell_size,
            square_size: base_cell_size / 4.,
            scale: vec2(
                size.x / (base_cell_size * cols),
                size.y / (base_cell_size * rows),
            ),
        }
    }

    /// Get the unscaled cell edge length, in pixels.
    #[inline]
    #[must_use]
    pub fn base_cell_size(&self) -> f32 {
        self.base_cell_size
    }

    /// Get the marker square edge length, in pixels.
    #[inline]
    #[must_use]
    pub fn square_size(&self) -> f32 {
        self.square_size
    }

    /// Get the viewport center of a logical cell.
    #[inline]
    #[must_use]
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        vec2(
            (cell.x as f32 + 0.5) * self.base_cell_size * self.scale.x,
            (cell.y as f32 + 0.5) * self.base_cell_size * self.scale.y,
        )
    }

    /// Get the marker square centered on a logical cell, or `None` for a
    /// cell carrying the unset sentinel.
    #[inline]
    #[must_use]
    pub fn marker(&self, cell: IVec2) -> Option<Rect> {
        if is_unset(cell) {
            return None;
        }
        let center = self.cell_center(cell);
        let half = Vec2::splat(self.square_size / 2.);
        Some(Rect::from_corners(center - half, center + half))
    }

    /// Get the segment between the centers of two doubled cells. A doubled
    /// cell projects through the logical cell it halves into, so wall cells
    /// collapse onto adjacent logical centers and successive doubled-grid
    /// moves produce a continuous polyline.
    #[inline]
    #[must_use]
    pub fn segment(&self, a: IVec2, b: IVec2) -> Line {
        Line::new(
            self.cell_center(to_logical(a)),
            self.cell_center(to_logical(b)),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bevy_math::ivec2;

    #[test]
    fn test_cell_sizes() {
        let viewport = Viewport::new(vec2(400., 300.), 4, 3);
        assert_eq!(viewport.base_cell_size(), 100.);
        assert_eq!(viewport.square_size(), 25.);

        let viewport = Viewport::new(vec2(500., 300.), 4, 3);
        assert_eq!(viewport.base_cell_size(), 100.);
    }

    #[test]
    fn test_cell_center_spans_viewport() {
        let viewport = Viewport::new(vec2(500., 300.), 4, 3);
        assert_eq!(viewport.cell_center(ivec2(0, 0)), vec2(62.5, 50.));
        assert_eq!(viewport.cell_center(ivec2(3, 2)), vec2(437.5, 250.));
    }

    #[test]
    fn test_projection_inverts_by_ratio() {
        let (w, h) = (640., 480.);
        let (cols, rows) = (7usize, 5usize);
        let viewport = Viewport::new(vec2(w, h), cols, rows);
        let w_ratio = w / cols as f32;
        let h_ratio = h / rows as f32;

        for col in 0..cols {
            for row in 0..rows {
                let center = viewport.cell_center(ivec2(col as i32, row as i32));
                assert_eq!((center.x / w_ratio).floor() as usize, col);
                assert_eq!((center.y / h_ratio).floor() as usize, row);
            }
        }
    }

    #[test]
    fn test_marker() {
        let viewport = Viewport::new(vec2(400., 300.), 4, 3);
        let marker = viewport.marker(ivec2(0, 0)).unwrap();
        assert_eq!(marker.width(), viewport.square_size());
        assert_eq!(marker.height(), viewport.square_size());
        assert_eq!(marker.center(), viewport.cell_center(ivec2(0, 0)));

        assert_eq!(viewport.marker(crate::UNSET), None);
        assert_eq!(viewport.marker(ivec2(-1, 2)), None);
    }

    #[test]
    fn test_segment_collapses_walls() {
        let viewport = Viewport::new(vec2(400., 300.), 4, 3);

        // A doubled move from a logical cell onto its wall cell stays within
        // the same pair of logical centers.
        let segment = viewport.segment(ivec2(2, 0), ivec2(3, 0));
        assert_eq!(segment.start(), viewport.cell_center(ivec2(1, 0)));
        assert_eq!(segment.end(), viewport.cell_center(ivec2(1, 0)));

        let segment = viewport.segment(ivec2(3, 0), ivec2(4, 0));
        assert_eq!(segment.start(), viewport.cell_center(ivec2(1, 0)));
        assert_eq!(segment.end(), viewport.cell_center(ivec2(2, 0)));
    }
}
