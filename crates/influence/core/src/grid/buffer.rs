use super::{Cell, GridDimensions};

/// Dense per-cell storage, row-major, sized `width * height`.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGrid<T> {
    dims: GridDimensions,
    values: Vec<T>,
}

impl<T: Copy> CellGrid<T> {
    pub fn new(dims: GridDimensions, fill: T) -> Self {
        Self {
            dims,
            values: vec![fill; dims.len()],
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<T> {
        self.dims.index(cell).map(|index| self.values[index])
    }

    #[inline]
    pub fn at(&self, index: usize) -> T {
        self.values[index]
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}
