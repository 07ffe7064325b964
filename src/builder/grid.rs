use std::ops::Deref;

use image::RgbImage;
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use crate::common::{
    frame::Header,
    iter::DataRegionIter,
    marker::marker_color,
    metadata::{GridSize, CELL_PIXELS, SYMBOL_BITS},
    palette::{color_to_symbol, symbol_to_color, Color},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Cell {
    Empty,
    Marker(Color),
    Data(Color),
}

impl Deref for Cell {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Cell::Empty => &Color::BLACK,
            Cell::Marker(c) => c,
            Cell::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    size: GridSize,
    header: Header,
    symbol_count: usize,
}

// Grid type for builder
//------------------------------------------------------------------------------

impl Grid {
    pub fn new(size: GridSize, header: Header) -> Self {
        Self { cells: vec![Cell::Empty; size.cell_count()], size, header, symbol_count: 0 }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    fn coord_to_index(&self, c: usize, r: usize) -> usize {
        let w = self.size.width();
        debug_assert!(c < w, "Column {c} out of bounds for width {w}");
        debug_assert!(r < w, "Row {r} out of bounds for width {w}");
        r * w + c
    }

    pub fn get(&self, c: usize, r: usize) -> Cell {
        self.cells[self.coord_to_index(c, r)]
    }

    pub fn set(&mut self, c: usize, r: usize, cell: Cell) {
        let index = self.coord_to_index(c, r);
        self.cells[index] = cell;
    }

    /// Symbols in placement order, as read back off the painted cells.
    pub fn data_symbols(&self) -> Vec<u8> {
        DataRegionIter::new(self.size)
            .take(self.symbol_count)
            .map(|(c, r)| color_to_symbol(*self.get(c, r)))
            .collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.size.width();
        let mut res = String::with_capacity(w * (w + 1) + 1);
        res.push('\n');
        for r in 0..w {
            for c in 0..w {
                let ch = match self.get(c, r) {
                    Cell::Empty => '.',
                    Cell::Marker(Color::WHITE) => 'W',
                    Cell::Marker(_) => 'B',
                    Cell::Data(clr) => (b'0' + color_to_symbol(clr)) as char,
                };
                res.push(ch);
            }
            res.push('\n');
        }
        res
    }
}

// Markers & data
//------------------------------------------------------------------------------

impl Grid {
    pub fn draw_markers(&mut self) {
        let w = self.size.width();
        for r in 0..w {
            for c in 0..w {
                if let Some(clr) = marker_color(self.size, c, r) {
                    self.set(c, r, Cell::Marker(clr));
                }
            }
        }
    }

    pub fn draw_payload(&mut self, symbols: &[u8]) {
        debug_assert!(
            symbols.len() <= self.size.data_cell_count(),
            "Grid {} can't hold {} symbols",
            self.size,
            symbols.len()
        );

        let mut coords = DataRegionIter::new(self.size);
        for (&s, (c, r)) in symbols.iter().zip(coords.by_ref()) {
            self.set(c, r, Cell::Data(symbol_to_color(s)));
        }
        self.symbol_count = symbols.len().min(self.size.data_cell_count());

        // Cells past the last symbol stay black
        for (c, r) in coords {
            self.set(c, r, Cell::Data(Color::BLACK));
        }

        debug_assert!(!self.cells.contains(&Cell::Empty), "Empty cell left after drawing");
    }
}


// Render
//------------------------------------------------------------------------------

impl Grid {
    pub fn to_image(&self) -> RgbImage {
        let w = self.size.canvas_width();
        let mut canvas = RgbImage::new(w, w);
        let cells = self.size.width();
        for r in 0..cells {
            for c in 0..cells {
                paint_cell(&mut canvas, c, r, *self.get(c, r));
            }
        }
        canvas
    }
}

pub fn paint_cell(canvas: &mut RgbImage, c: usize, r: usize, clr: Color) {
    let (x, y) = (c as u32 * CELL_PIXELS, r as u32 * CELL_PIXELS);
    let rect = Rect::at(x as i32, y as i32).of_size(CELL_PIXELS, CELL_PIXELS);
    draw_filled_rect_mut(canvas, rect, clr.into());
}


// Encode report
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeReport {
    pub grid_width: usize,
    pub resolution: u32,
    pub data_cells: usize,
    pub fill_percent: f64,
    pub bits_per_cell: f64,
}

impl Grid {
    pub fn report(&self) -> EncodeReport {
        let fill_percent = 100.0 * self.symbol_count as f64 / self.size.cell_count() as f64;
        let bits_per_cell = if self.symbol_count == 0 {
            0.0
        } else {
            (self.header.raw_len as f64 * 8.0) / self.symbol_count as f64
        };
        EncodeReport {
            grid_width: self.size.width(),
            resolution: self.size.canvas_width(),
            data_cells: self.symbol_count,
            fill_percent,
            bits_per_cell,
        }
    }
}

impl std::fmt::Display for EncodeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid: {0}x{0} ({1:.1}% data)", self.grid_width, self.fill_percent)?;
        writeln!(f, "Resolution: {0}x{0} pixels", self.resolution)?;
        write!(f, "Efficiency: {:.2} bits/cell (max {SYMBOL_BITS})", self.bits_per_cell)
    }
}

#[cfg(test)]
mod report_tests {
    use crate::builder::UdcBuilder;

    #[test]
    fn test_report() {
        let grid = UdcBuilder::new(b"ABCDE").compress(false).build().unwrap();
        let report = grid.report();
        assert_eq!(report.grid_width, 10);
        assert_eq!(report.resolution, 80);
        assert_eq!(report.data_cells, 48);
        assert!((report.fill_percent - 48.0).abs() < 1e-9);
        assert!((report.bits_per_cell - 40.0 / 48.0).abs() < 1e-9);
        assert_eq!(
            report.to_string(),
            "Grid: 10x10 (48.0% data)\nResolution: 80x80 pixels\nEfficiency: 0.83 bits/cell (max 3)"
        );
    }
}
