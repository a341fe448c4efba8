use crate::{
    grid::{Grid, Point},
    hex_code::HexCode,
};

/// The unit of the grid from which the next code must be picked.
///
/// Picks alternate: a pick from a row activates that cell's column, a pick
/// from a column activates that cell's row. Play starts on the top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Active {
    Row(usize),
    Column(usize),
}

impl Default for Active {
    fn default() -> Self {
        Self::Row(0)
    }
}

impl Active {
    /// Return the new active set if the specified point is valid, or `Error::NotActive` otherwise.
    pub fn toggle(self, x: usize, y: usize) -> Result<Self, Error> {
        let err = Err(Error::NotActive { x, y, active: self });
        match self {
            Active::Row(row) => {
                if y != row {
                    err
                } else {
                    Ok(Active::Column(x))
                }
            }
            Active::Column(column) => {
                if x != column {
                    err
                } else {
                    Ok(Active::Row(y))
                }
            }
        }
    }

    /// The unit activated by picking `(x, y)`, which must lie in this unit.
    pub fn advance(self, (x, y): Point) -> Self {
        match self {
            Active::Row(_) => Active::Column(x),
            Active::Column(_) => Active::Row(y),
        }
    }

    /// Every point in this unit of `grid`.
    pub fn points<T>(self, grid: &Grid<T>) -> impl Iterator<Item = Point> {
        let (row, column) = match self {
            Active::Row(y) => (Some(grid.row(y)), None),
            Active::Column(x) => (None, Some(grid.column(x))),
        };
        row.into_iter().flatten().chain(column.into_iter().flatten())
    }
}

/// The code matrix in the middle of play: which cells have been picked, and in what order.
#[derive(Debug, Clone)]
pub struct Matrix<'a> {
    values: &'a Grid<HexCode>,
    chosen: Grid<bool>,
    selections: Vec<Point>,
    active: Active,
}

impl<'a> Matrix<'a> {
    pub fn new(values: &'a Grid<HexCode>) -> Self {
        Self {
            values,
            chosen: Grid::new(values.size()),
            selections: Vec::new(),
            active: Active::default(),
        }
    }

    /// Play `path` from the start, failing at the first illegal pick.
    pub fn replay(values: &'a Grid<HexCode>, path: &[Point]) -> Result<Self, Error> {
        let mut matrix = Self::new(values);
        for &(x, y) in path {
            matrix.select(x, y)?;
        }
        Ok(matrix)
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), Error> {
        let size = self.values.size();
        if x < size && y < size {
            Ok(())
        } else {
            Err(Error::OutOfBounds { x, y, size })
        }
    }

    /// Select the point at the given coordinates if it is legal to do so.
    pub fn select(&mut self, x: usize, y: usize) -> Result<(), Error> {
        self.check_bounds(x, y)?;
        if self.chosen[(x, y)] {
            return Err(Error::AlreadySelected { x, y });
        }
        // the following line modifies self, so we can't fail past that point
        self.active = self.active.toggle(x, y)?;
        self.chosen[(x, y)] = true;

        self.selections.push((x, y));

        Ok(())
    }

    /// Deselect the most recent point selected.
    ///
    /// If the selection queue is empty, silently do nothing.
    pub fn deselect(&mut self) {
        if let Some((x, y)) = self.selections.pop() {
            debug_assert!(self.chosen[(x, y)], "point must already have been selected");
            self.chosen[(x, y)] = false;
            self.active = self
                .active
                .toggle(x, y)
                .expect("toggle must be valid at this point");
        }
    }

    pub fn active(&self) -> Active {
        self.active
    }

    /// Points which may legally be selected next.
    pub fn available(&self) -> Vec<Point> {
        self.active
            .points(self.values)
            .filter(|&point| !self.chosen[point])
            .collect()
    }

    pub fn selections(&self) -> &[Point] {
        &self.selections
    }

    /// Iterate over the selected values
    pub fn selected_values(&self) -> impl Iterator<Item = HexCode> + '_ {
        self.selections.iter().map(|&point| self.values[point])
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the point `({x}, {y})` is out of bounds. size: `{size}`")]
    OutOfBounds { x: usize, y: usize, size: usize },
    #[error("the point `({x}, {y})` is not a member of the active set: {active:?}")]
    NotActive { x: usize, y: usize, active: Active },
    #[error("the point `({x}, {y})` has already been selected")]
    AlreadySelected { x: usize, y: usize },
}
