use std::fmt::{Display, Formatter};

use super::{
    compress::Compressor,
    error::{UdcError, UdcResult},
    metadata::HEADER_LEN,
};

// Header
//------------------------------------------------------------------------------

/// Fixed 13 byte big-endian prefix of every frame:
/// `body_len: u32, raw_len: u32, checksum: u32, compressed: u8`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    pub body_len: u32,
    pub raw_len: u32,
    pub checksum: u32,
    pub compressed: bool,
}

impl Header {
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut res = [0; HEADER_LEN];
        res[0..4].copy_from_slice(&self.body_len.to_be_bytes());
        res[4..8].copy_from_slice(&self.raw_len.to_be_bytes());
        res[8..12].copy_from_slice(&self.checksum.to_be_bytes());
        res[12] = self.compressed as u8;
        res
    }

    pub fn from_bytes(bytes: &[u8]) -> UdcResult<Self> {
        let Some(hdr) = bytes.get(..HEADER_LEN) else {
            return Err(UdcError::TruncatedHeader { len: bytes.len() });
        };
        let word = |i: usize| u32::from_be_bytes([hdr[i], hdr[i + 1], hdr[i + 2], hdr[i + 3]]);
        Ok(Self {
            body_len: word(0),
            raw_len: word(4),
            checksum: word(8),
            // Any nonzero flag counts as compressed
            compressed: hdr[12] != 0,
        })
    }

    pub fn frame_len(&self) -> usize {
        HEADER_LEN + self.body_len as usize
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ Body: {}, Raw: {}, CRC32: {:08x}, Compressed: {} }}",
            self.body_len, self.raw_len, self.checksum, self.compressed
        )
    }
}

// Frame
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Frame {
    header: Header,
    body: Vec<u8>,
}

impl Frame {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.header.frame_len());
        res.extend_from_slice(&self.header.to_bytes());
        res.extend_from_slice(&self.body);
        res
    }

    /// CRC-32 of the body as it is now, which may differ from the header's.
    pub fn actual_checksum(&self) -> u32 {
        crc32fast::hash(&self.body)
    }

    pub fn verify(&self) -> UdcResult<()> {
        let actual = self.actual_checksum();
        if actual != self.header.checksum {
            return Err(UdcError::ChecksumMismatch { expected: self.header.checksum, actual });
        }
        Ok(())
    }
}

/// Frames `raw` as is, or through `compressor` when one is given.
pub fn build_frame(raw: &[u8], compressor: Option<&dyn Compressor>) -> UdcResult<Frame> {
    let body = match compressor {
        Some(c) => c.compress(raw)?,
        None => raw.to_vec(),
    };
    let header = Header {
        body_len: len_field(body.len())?,
        raw_len: len_field(raw.len())?,
        checksum: crc32fast::hash(&body),
        compressed: compressor.is_some(),
    };
    Ok(Frame { header, body })
}

// Length fields are u32 on the wire
fn len_field(len: usize) -> UdcResult<u32> {
    u32::try_from(len).map_err(|_| UdcError::PayloadTooLarge { len })
}

/// Reads a frame off the front of `bytes`. Anything past the declared body is
/// ignored. The checksum isn't checked here, see [`Frame::verify`].
pub fn parse_frame(bytes: &[u8]) -> UdcResult<Frame> {
    let header = Header::from_bytes(bytes)?;
    let expected = header.body_len as usize;
    let available = bytes.len() - HEADER_LEN;
    if available < expected {
        return Err(UdcError::TruncatedBody { expected, available });
    }
    let body = bytes[HEADER_LEN..HEADER_LEN + expected].to_vec();
    Ok(Frame { header, body })
}
