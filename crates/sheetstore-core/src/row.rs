//! Row iteration view

use crate::cell::CellValue;

/// A row's stored cells, produced during sheet iteration
///
/// Cells are in ascending column order. Only stored (non-empty) cells
/// appear, so a row can be shorter than others in the same sheet.
#[derive(Debug)]
pub struct RowCells<'a> {
    /// Row index (0-based)
    pub index: u32,
    /// Cells in this row
    pub cells: Vec<(u16, &'a CellValue)>,
}

impl<'a> RowCells<'a> {
    /// Create a new row view
    pub fn new(index: u32, cells: Vec<(u16, &'a CellValue)>) -> Self {
        Self { index, cells }
    }

    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(c, _)| *c == col)
            .map(|(_, value)| *value)
    }

    /// Check if row has any cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells in row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
