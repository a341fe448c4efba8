use std::ops::{Index, IndexMut};

/// A coordinate pair `(x, y)`: `x` counts columns and `y` counts rows.
pub type Point = (usize, usize);

/// A representation of a square 2d grid.
///
/// For indexing operations on this grid, `(0, 0)` is the top left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T> Grid<T>
where
    T: Default + Clone,
{
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![T::default(); size * size],
        }
    }
}

impl<T> Grid<T> {
    /// Wrap row-major `cells` as a grid with sides of `size`.
    ///
    /// Returns `None` unless there are exactly `size * size` cells.
    pub fn from_cells(size: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == size * size).then_some(Grid { size, cells })
    }

    /// Length of one side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    pub fn idx(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then_some((y * self.size) + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.idx(x, y).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.idx(x, y).map(|idx| &mut self.cells[idx])
    }

    pub fn row(&self, y: usize) -> impl Iterator<Item = Point> {
        let size = if y < self.size { self.size } else { 0 };
        (0..size).map(move |x| (x, y))
    }

    pub fn column(&self, x: usize) -> impl Iterator<Item = Point> {
        let size = if x < self.size { self.size } else { 0 };
        (0..size).map(move |y| (x, y))
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): Point) -> &Self::Output {
        self.get(x, y).unwrap()
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, (x, y): Point) -> &mut Self::Output {
        self.get_mut(x, y).unwrap()
    }
}
