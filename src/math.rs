use bevy_math::IVec2;

/// Sentinel for an endpoint that has not been chosen yet.
pub const UNSET: IVec2 = IVec2 { x: -1, y: -1 };

/// Determine if the given cell carries the unset sentinel.
#[inline]
#[must_use]
pub fn is_unset(cell: IVec2) -> bool {
    cell.x < 0 || cell.y < 0
}

/// Find the Manhattan distance between two cells.
#[inline]
#[must_use]
pub fn manhattan_distance(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Convert a logical cell to its doubled-grid coordinate.
#[inline]
#[must_use]
pub fn to_doubled(cell: IVec2) -> IVec2 {
    cell * 2
}

/// Convert a doubled-grid coordinate to the logical cell it belongs to.
/// Odd coordinates (wall cells) collapse onto the adjacent logical cell.
#[inline]
#[must_use]
pub fn to_logical(cell: IVec2) -> IVec2 {
    IVec2::new(cell.x / 2, cell.y / 2)
}
