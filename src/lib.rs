//! # udcode
//!
//! Converts arbitrary bytes into a dense, camera-scannable square image and back.
//! Every cell of the image carries 3 bits as one of 8 high contrast colors, the four
//! corners carry black and white alignment markers, and a CRC-32 in the header flags
//! damaged payloads.
//!
//! ## Features
//!
//! - **Square grids**: the smallest square that fits the payload, 1:1 aspect ratio
//! - **8-color palette**: black, red, green, blue, yellow, magenta, cyan and white
//! - **Built-in zlib compression**: on by default, pluggable through [`Compressor`]
//! - **Noise tolerant decoding**: sampled colors snap to the nearest palette entry
//! - **Error detection**: CRC-32 over the payload, reported without aborting decode
//!
//! ## Quick Start
//!
//! ### Encoding
//!
//! ```rust,no_run
//! use udcode::UdcBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = UdcBuilder::new(b"Hello, World!").build()?;
//!
//! let img = grid.to_image(); // 8x8 pixels per cell
//! img.save("hello.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Decoding
//!
//! ```rust,no_run
//! use udcode::UdcReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("hello.png")?.to_rgb8();
//! let decoded = UdcReader::read(&img)?;
//! if let Err(e) = decoded.verify() {
//!     eprintln!("{e}");
//! }
//! println!("{}", String::from_utf8_lossy(decoded.data()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! The payload is framed by a 13 byte big-endian header
//! (`body length`, `raw length`, `CRC-32`, `compressed flag`), split into 3-bit
//! symbols and laid out row by row, skipping the 3x3 marker blocks in each corner.
//! Cells past the last symbol are painted black.
//!
//! ```text
//! WBW....BWB      W/B  marker cells
//! BWB....BWB      .    data cells, filled row by row
//! WBW....BWB
//! ..........      top left: checkerboard
//! ..........      top right: vertical stripes
//! ..........      bottom left: horizontal stripes
//! ..........      bottom right: rings
//! BBB....BBB
//! WWW....BWB
//! BBB....BBB
//! ```

pub mod builder;
pub(crate) mod common;
pub mod reader;

pub use builder::{paint_cell, Cell, EncodeReport, Grid, UdcBuilder};
pub use common::bitstream::BitStream;
pub use common::compress::{Compressor, Zlib};
pub use common::error::{UdcError, UdcResult};
pub use common::frame::{build_frame, parse_frame, Frame, Header};
pub use common::iter::DataRegionIter;
pub use common::marker::marker_color;
pub use common::metadata::{
    CellKind, Corner, GridSize, CELL_PIXELS, HEADER_LEN, MARKER_SIZE, SYMBOL_BITS,
};
pub use common::packer::{pack, symbols_for_bytes, unpack};
pub use common::palette::{color_to_symbol, symbol_to_color, Color, PALETTE};
pub use reader::{read_info, DeGrid, Decoded, Info, UdcReader};
