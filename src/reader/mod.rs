mod degrid;

pub use degrid::DeGrid;

use std::fmt::{Display, Formatter};

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::common::{
    compress::{Compressor, Zlib},
    error::{UdcError, UdcResult},
    frame::{parse_frame, Frame, Header},
    metadata::{CELL_PIXELS, HEADER_LEN, SYMBOL_BITS},
    packer::{symbols_for_bytes, unpack},
};

// Decoded payload
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Decoded {
    data: Vec<u8>,
    header: Header,
    actual_checksum: u32,
}

impl Decoded {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn checksum_ok(&self) -> bool {
        self.actual_checksum == self.header.checksum
    }

    /// Fails with [`UdcError::ChecksumMismatch`] if the body was damaged.
    /// The data is still available either way.
    pub fn verify(&self) -> UdcResult<()> {
        if !self.checksum_ok() {
            return Err(UdcError::ChecksumMismatch {
                expected: self.header.checksum,
                actual: self.actual_checksum,
            });
        }
        Ok(())
    }
}

// Reader
//------------------------------------------------------------------------------

pub struct UdcReader();

impl UdcReader {
    pub fn read(img: &RgbImage) -> UdcResult<Decoded> {
        Self::read_with(img, &Zlib::default())
    }

    /// Decodes with `compressor` undoing the body transform of compressed frames.
    pub fn read_with(img: &RgbImage, compressor: &dyn Compressor) -> UdcResult<Decoded> {
        debug!("Reading grid...");
        let degrid = DeGrid::from_image(img)?;
        let size = degrid.size();
        debug!("Decoding grid: {size}");

        let frame = read_frame(&degrid)?;
        let header = *frame.header();
        let actual_checksum = frame.actual_checksum();
        if let Err(e) = frame.verify() {
            warn!("{e}, data may be corrupted");
        }

        let data = if header.compressed {
            let data = compressor.decompress(frame.body())?;
            debug!("Decompressed: {} -> {} bytes", header.body_len, data.len());
            data
        } else {
            frame.into_body()
        };

        info!("Decoded {} bytes from {size} grid", data.len());
        Ok(Decoded { data, header, actual_checksum })
    }
}

fn read_header(degrid: &DeGrid) -> UdcResult<Header> {
    let available = degrid.size().data_cell_count();
    let hdr_symbols = symbols_for_bytes(HEADER_LEN);
    if available < hdr_symbols {
        return Err(UdcError::MalformedImage(format!(
            "{available} data cells can't hold a {HEADER_LEN} byte header"
        )));
    }
    Header::from_bytes(&unpack(&degrid.symbols(hdr_symbols)))
}

// Reads the header first so only the cells that belong to the frame get sampled
fn read_frame(degrid: &DeGrid) -> UdcResult<Frame> {
    debug!("Reading header...");
    let header = read_header(degrid)?;
    debug!("Header: {header}");

    let available = degrid.size().data_cell_count();
    let needed = symbols_for_bytes(header.frame_len());
    if needed > available {
        // Whole bytes left for the body once the header is taken out
        let body_room = (available * SYMBOL_BITS / 8).saturating_sub(HEADER_LEN);
        return Err(UdcError::TruncatedBody {
            expected: header.body_len as usize,
            available: body_room,
        });
    }

    debug!("Extracting {needed} symbols...");
    parse_frame(&unpack(&degrid.symbols(needed)))
}

#[cfg(test)]
mod reader_tests {
    use image::{Rgb, RgbImage};

    use super::UdcReader;
    use crate::{
        builder::{paint_cell, Grid, UdcBuilder},
        common::{
            compress::Zlib,
            error::UdcError,
            frame::{build_frame, parse_frame},
            metadata::GridSize,
            packer::pack,
            palette::PALETTE,
        },
    };

    #[test]
    fn test_reader_abcde() {
        let img = UdcBuilder::new(b"ABCDE").compress(false).build().unwrap().to_image();
        let decoded = UdcReader::read(&img).unwrap();
        assert_eq!(decoded.data(), b"ABCDE");
        assert_eq!(decoded.header().body_len, 5);
        assert_eq!(decoded.header().raw_len, 5);
        assert!(!decoded.header().compressed);
        assert!(decoded.verify().is_ok());
    }

    #[test]
    fn test_reader_compressed() {
        let data = "compress me please ".repeat(30);
        let img = UdcBuilder::new(data.as_bytes()).build().unwrap().to_image();
        let decoded = UdcReader::read(&img).unwrap();
        assert!(decoded.header().compressed);
        assert_eq!(decoded.into_data(), data.as_bytes());
    }

    #[test]
    fn test_reader_empty() {
        for compress in [false, true] {
            let img = UdcBuilder::new(&[]).compress(compress).build().unwrap().to_image();
            let decoded = UdcReader::read(&img).unwrap();
            assert!(decoded.data().is_empty());
            assert_eq!(decoded.header().body_len == 0, !compress);
        }
    }

    #[test]
    fn test_reader_corrupted_body() {
        let mut img = UdcBuilder::new(b"ABCDE").compress(false).build().unwrap().to_image();
        // Data cell 40 carries body bits, it sits at column 8 of row 5
        let Rgb([r, g, b]) = *img.get_pixel(8 * 8 + 4, 5 * 8 + 4);
        let flipped = if (r, g, b) == (0, 0, 0) { PALETTE[7] } else { PALETTE[0] };
        paint_cell(&mut img, 8, 5, flipped);

        let decoded = UdcReader::read(&img).unwrap();
        assert_eq!(decoded.data().len(), 5);
        assert_ne!(decoded.data(), b"ABCDE");
        assert!(!decoded.checksum_ok());
        assert!(matches!(decoded.verify(), Err(UdcError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_reader_bad_compressed_body() {
        // Flag says compressed but the body isn't zlib
        let mut bytes = build_frame(b"plain text", None).unwrap().to_bytes();
        bytes[12] = 1;
        let symbols = pack(&bytes);
        let frame = parse_frame(&bytes).unwrap();
        let mut grid = Grid::new(GridSize::compute(symbols.len()), *frame.header());
        grid.draw_markers();
        grid.draw_payload(&symbols);

        let err = UdcReader::read(&grid.to_image()).unwrap_err();
        assert!(matches!(err, UdcError::DecompressionFailed(_)));
    }

    #[test]
    fn test_reader_truncated_body() {
        // Claim a body far larger than the grid can carry
        let mut frame = build_frame(b"short", None).unwrap().to_bytes();
        frame[..4].copy_from_slice(&1000u32.to_be_bytes());
        let symbols = pack(&frame);
        let hdr = *build_frame(b"short", None).unwrap().header();
        let mut grid = Grid::new(GridSize::compute(symbols.len()), hdr);
        grid.draw_markers();
        grid.draw_payload(&symbols);

        let err = UdcReader::read(&grid.to_image()).unwrap_err();
        assert!(matches!(err, UdcError::TruncatedBody { expected: 1000, .. }));
    }

    #[test]
    fn test_reader_too_small_for_header() {
        // 7x7 grid has 13 data cells, a header needs 35
        let img = RgbImage::new(56, 56);
        let err = UdcReader::read(&img).unwrap_err();
        assert!(matches!(err, UdcError::MalformedImage(_)));
    }

    #[test]
    fn test_reader_custom_level() {
        let data = vec![7u8; 500];
        let img = UdcBuilder::new(&data).compression_level(1).build().unwrap().to_image();
        let decoded = UdcReader::read_with(&img, &Zlib::new(1)).unwrap();
        assert_eq!(decoded.data(), &data[..]);
    }
}

// Header only
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    /// Canvas size in pixels.
    pub resolution: (u32, u32),
    /// Canvas size in whole cells.
    pub cells: (u32, u32),
    /// `None` when the canvas isn't a valid grid or has no room for a header.
    pub header: Option<Header>,
}

/// Reads just the header cells, skipping the body and its checks. The canvas
/// dimensions are reported even when no header can be read.
pub fn read_info(img: &RgbImage) -> Info {
    let (w, h) = img.dimensions();
    let header = match DeGrid::from_image(img).and_then(|degrid| read_header(&degrid)) {
        Ok(hdr) => Some(hdr),
        Err(e) => {
            debug!("No header: {e}");
            None
        }
    };
    Info { resolution: (w, h), cells: (w / CELL_PIXELS, h / CELL_PIXELS), header }
}

impl Display for Info {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.resolution;
        let (cw, ch) = self.cells;
        write!(f, "Resolution: {w}x{h} pixels\nGrid: {cw}x{ch} cells")?;
        let Some(hdr) = &self.header else { return Ok(()) };

        write!(f, "\nOriginal size: {} bytes", hdr.raw_len)?;
        write!(f, "\nCompressed: {}", if hdr.compressed { "Yes" } else { "No" })?;
        if hdr.compressed && hdr.raw_len > 0 {
            write!(
                f,
                "\nCompressed size: {} bytes ({:.1}%)",
                hdr.body_len,
                100.0 * hdr.body_len as f64 / hdr.raw_len as f64
            )?;
        }
        write!(f, "\nCRC32: {:08x}", hdr.checksum)
    }
}
