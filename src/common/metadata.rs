use std::{fmt::Display, ops::Deref};

// Global constants
//------------------------------------------------------------------------------

/// Side of each square corner marker block, in cells.
pub const MARKER_SIZE: usize = 3;

/// Side of each cell on the rendered canvas, in pixels.
pub const CELL_PIXELS: u32 = 8;

/// Bits carried by one cell.
pub const SYMBOL_BITS: usize = 3;

/// Fixed size of the frame header, in bytes.
pub const HEADER_LEN: usize = 13;

// Cell kind
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CellKind {
    Marker(Corner),
    Data,
}

// Grid size
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct GridSize(usize);

impl Deref for GridSize {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

impl GridSize {
    pub const MIN: GridSize = GridSize(2 * MARKER_SIZE);

    pub const fn new(width: usize) -> Self {
        debug_assert!(width >= 2 * MARKER_SIZE, "Grid is smaller than its markers");
        Self(width)
    }

    /// Smallest grid whose data cells can hold `symbol_count` symbols.
    pub fn compute(symbol_count: usize) -> Self {
        let mut size = Self::MIN;
        while size.data_cell_count() < symbol_count {
            size.0 += 1;
        }
        size
    }

    pub const fn width(self) -> usize {
        self.0
    }

    pub const fn cell_count(self) -> usize {
        self.0 * self.0
    }

    pub const fn data_cell_count(self) -> usize {
        self.cell_count() - 4 * MARKER_SIZE * MARKER_SIZE
    }

    pub const fn canvas_width(self) -> u32 {
        self.0 as u32 * CELL_PIXELS
    }

    pub const fn classify(self, c: usize, r: usize) -> CellKind {
        let m = MARKER_SIZE;
        let far = self.0 - m;
        match (c < m, c >= far, r < m, r >= far) {
            (true, _, true, _) => CellKind::Marker(Corner::TopLeft),
            (_, true, true, _) => CellKind::Marker(Corner::TopRight),
            (true, _, _, true) => CellKind::Marker(Corner::BottomLeft),
            (_, true, _, true) => CellKind::Marker(Corner::BottomRight),
            _ => CellKind::Data,
        }
    }

    pub const fn is_marker(self, c: usize, r: usize) -> bool {
        matches!(self.classify(c, r), CellKind::Marker(_))
    }
}
