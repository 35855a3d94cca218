use bevy_math::IVec2;

/// The character denoting a traversable cell in the doubled grid.
/// Any other character is a wall.
pub const PASSAGE: char = '0';

/// A maze stored in doubled form: a `2R x 2C` character grid in which logical
/// cells occupy even coordinates and the walls between them occupy the
/// intermediate odd rows and columns. Moving between two logical cells
/// therefore takes two unit steps, with the intermediate wall cell required
/// to be a passage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MazeGrid {
    cells: Vec<char>,
    cols: usize,
}

impl MazeGrid {
    /// Create an empty grid with no cells.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from doubled-form rows, taking ownership of the data.
    /// All rows are expected to have the length of the first.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<char>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            debug_assert_eq!(row.len(), cols);
            cells.extend(row);
        }
        Self { cells, cols }
    }

    /// Get the number of rows in the doubled grid.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.cells.len() / self.cols
        }
    }

    /// Get the number of columns in the doubled grid.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the number of logical (undoubled) rows.
    #[inline]
    #[must_use]
    pub fn logical_rows(&self) -> usize {
        self.rows() / 2
    }

    /// Get the number of logical (undoubled) columns.
    #[inline]
    #[must_use]
    pub fn logical_cols(&self) -> usize {
        self.cols() / 2
    }

    /// Determine if this grid holds no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Determine if the given doubled coordinate is an in-range passage.
    /// Out-of-range coordinates are treated as walls.
    #[inline]
    #[must_use]
    pub fn is_passage<P>(&self, cell: P) -> bool
    where
        P: Into<IVec2>,
    {
        let cell = cell.into();
        if cell.x < 0 || cell.y < 0 {
            return false;
        }
        let (col, row) = (cell.x as usize, cell.y as usize);
        if col >= self.cols || row >= self.rows() {
            return false;
        }
        self.cells[row * self.cols + col] == PASSAGE
    }
}
