use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use super::error::{UdcError, UdcResult};

// Byte transform applied to the payload before framing
//------------------------------------------------------------------------------

pub trait Compressor {
    fn compress(&self, data: &[u8]) -> UdcResult<Vec<u8>>;
    fn decompress(&self, data: &[u8]) -> UdcResult<Vec<u8>>;
}

// Zlib
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Zlib {
    level: u32,
}

impl Zlib {
    pub const fn new(level: u32) -> Self {
        Self { level }
    }

    pub const fn level(&self) -> u32 {
        self.level
    }
}

impl Default for Zlib {
    fn default() -> Self {
        Self::new(9)
    }
}

impl Compressor for Zlib {
    fn compress(&self, data: &[u8]) -> UdcResult<Vec<u8>> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::new(self.level.min(9)));
        enc.write_all(data)?;
        Ok(enc.finish()?)
    }

    fn decompress(&self, data: &[u8]) -> UdcResult<Vec<u8>> {
        let mut out = Vec::new();
        ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| UdcError::DecompressionFailed(e.to_string()))?;
        Ok(out)
    }
}
