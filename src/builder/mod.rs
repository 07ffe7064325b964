mod grid;

pub use grid::{paint_cell, Cell, EncodeReport, Grid};

use tracing::{debug, info};

use crate::common::{
    compress::{Compressor, Zlib},
    error::UdcResult,
    frame::build_frame,
    metadata::GridSize,
    packer::pack,
};

pub struct UdcBuilder<'a> {
    data: &'a [u8],
    compress: bool,
    level: u32,
}

impl<'a> UdcBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, compress: true, level: Zlib::default().level() }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn compress(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    /// Zlib level, 0 to 9. Ignored when compression is off.
    pub fn compression_level(&mut self, level: u32) -> &mut Self {
        self.level = level.min(9);
        self
    }

    pub fn metadata(&self) -> String {
        if self.compress {
            format!("{{ Size: {}, Compress: zlib level {} }}", self.data.len(), self.level)
        } else {
            format!("{{ Size: {}, Compress: off }}", self.data.len())
        }
    }
}


impl UdcBuilder<'_> {
    pub fn build(&self) -> UdcResult<Grid> {
        let zlib = Zlib::new(self.level);
        let compressor: Option<&dyn Compressor> = if self.compress { Some(&zlib) } else { None };
        self.build_frame_with(compressor)
    }

    /// Compresses with a caller supplied transform instead of zlib.
    pub fn build_with(&self, compressor: &dyn Compressor) -> UdcResult<Grid> {
        self.build_frame_with(Some(compressor))
    }

    fn build_frame_with(&self, compressor: Option<&dyn Compressor>) -> UdcResult<Grid> {
        debug!("Generating grid {}...", self.metadata());

        let frame = build_frame(self.data, compressor)?;
        let hdr = frame.header();
        if hdr.compressed && !self.data.is_empty() {
            info!(
                "Compression: {} -> {} bytes ({:.1}%)",
                hdr.raw_len,
                hdr.body_len,
                100.0 * hdr.body_len as f64 / hdr.raw_len as f64
            );
        }

        debug!("Packing frame {hdr} into symbols...");
        let symbols = pack(&frame.to_bytes());

        let size = GridSize::compute(symbols.len());
        debug!("Constructing {size} grid for {} symbols...", symbols.len());
        let mut grid = Grid::new(size, *hdr);

        debug!("Drawing markers...");
        grid.draw_markers();

        debug!("Drawing payload...");
        grid.draw_payload(&symbols);

        Ok(grid)
    }
}
