//! Tab-stop map: a boolean matrix parallel to the *visible* grid only
//! (`rows x cols`), marking the trailing cell of each logical tab expansion
//! so backspace can retract a whole tab instead of one space. Unlike the
//! scrollback, this map is not carried into history — scrolled-off rows
//! simply lose their tab markers, which is fine because backspace only ever
//! acts on the current row.

use super::raw_buffer::RawBuffer;

pub struct TabMap {
    cells: RawBuffer<bool>,
    rows: usize,
    cols: usize,
}

impl TabMap {
    pub fn new(rows: usize, cols: usize) -> Option<Self> {
        let cells = RawBuffer::new_zeroed(rows * cols)?;
        Some(Self { cells, rows, cols })
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells.as_slice()[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        let idx = self.index(row, col);
        self.cells.as_mut_slice()[idx] = value;
    }

    /// Clear every tab marker. Used by erase-in-display mode 3.
    pub fn clear_all(&mut self) {
        for v in self.cells.as_mut_slice() {
            *v = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        let map = TabMap::new(3, 10).unwrap();
        for r in 0..3 {
            for c in 0..10 {
                assert!(!map.get(r, c));
            }
        }
    }

    #[test]
    fn set_and_clear_all() {
        let mut map = TabMap::new(3, 10).unwrap();
        map.set(1, 8, true);
        assert!(map.get(1, 8));
        map.clear_all();
        assert!(!map.get(1, 8));
    }
}
