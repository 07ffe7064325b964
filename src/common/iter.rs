use super::metadata::GridSize;

// Iterator over data cells of the grid in placement order
//------------------------------------------------------------------------------

// Row major, rows top to bottom and columns left to right, skipping markers.
// Encoder and decoder must share this order.
pub struct DataRegionIter {
    size: GridSize,
    c: usize,
    r: usize,
}

impl DataRegionIter {
    pub const fn new(size: GridSize) -> Self {
        Self { size, c: 0, r: 0 }
    }
}

impl Iterator for DataRegionIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        let w = self.size.width();
        while self.r < w {
            let res = (self.c, self.r);
            self.c += 1;
            if self.c == w {
                self.c = 0;
                self.r += 1;
            }
            if !self.size.is_marker(res.0, res.1) {
                return Some(res);
            }
        }
        None
    }
}
