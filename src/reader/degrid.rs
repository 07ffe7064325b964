use image::RgbImage;

use crate::common::{
    error::{UdcError, UdcResult},
    iter::DataRegionIter,
    metadata::{GridSize, CELL_PIXELS, MARKER_SIZE},
    palette::{color_to_symbol, Color},
};

// Grid sampled from a canvas
//------------------------------------------------------------------------------

pub struct DeGrid<'a> {
    img: &'a RgbImage,
    size: GridSize,
}

impl<'a> DeGrid<'a> {
    pub fn from_image(img: &'a RgbImage) -> UdcResult<Self> {
        let (w, h) = img.dimensions();
        if w != h {
            return Err(UdcError::MalformedImage(format!("image is not square: {w}x{h}")));
        }
        if w % CELL_PIXELS != 0 {
            return Err(UdcError::MalformedImage(format!(
                "width {w} is not a multiple of {CELL_PIXELS} pixel cells"
            )));
        }
        let width = (w / CELL_PIXELS) as usize;
        if width < 2 * MARKER_SIZE {
            return Err(UdcError::MalformedImage(format!(
                "{width} cells across can't fit the corner markers"
            )));
        }
        Ok(Self { img, size: GridSize::new(width) })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn sample(&self, c: usize, r: usize) -> Color {
        let half = CELL_PIXELS / 2;
        let x = c as u32 * CELL_PIXELS + half;
        let y = r as u32 * CELL_PIXELS + half;
        (*self.img.get_pixel(x, y)).into()
    }

    /// First `n` data symbols in placement order. Cells past `n` aren't read.
    pub fn symbols(&self, n: usize) -> Vec<u8> {
        DataRegionIter::new(self.size)
            .take(n)
            .map(|(c, r)| color_to_symbol(self.sample(c, r)))
            .collect()
    }
}
