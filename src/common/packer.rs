use super::{bitstream::BitStream, metadata::SYMBOL_BITS};

// Symbol packing
//------------------------------------------------------------------------------

/// Number of symbols needed to carry `len` bytes.
pub const fn symbols_for_bytes(len: usize) -> usize {
    (len * 8).div_ceil(SYMBOL_BITS)
}

/// Splits bytes into 3-bit symbols, MSB first. The last symbol is zero padded.
pub fn pack(data: &[u8]) -> Vec<u8> {
    let mut bs = BitStream::from(data);
    let mut symbols = Vec::with_capacity(symbols_for_bytes(data.len()));
    while bs.remaining() >= SYMBOL_BITS {
        symbols.extend(bs.take_bits(SYMBOL_BITS).map(|s| s as u8));
    }
    let tail = bs.remaining();
    if tail > 0 {
        let bits = bs.take_bits(tail).unwrap_or_default() as u8;
        symbols.push(bits << (SYMBOL_BITS - tail));
    }
    symbols
}

/// Joins 3-bit symbols back into bytes. Bits left over after the last full
/// byte are dropped; the frame header knows the true length.
pub fn unpack(symbols: &[u8]) -> Vec<u8> {
    let mut bs = BitStream::new(symbols.len() * SYMBOL_BITS);
    for &s in symbols {
        debug_assert!(s < 8, "Symbol out of range: {s}");
        bs.push_bits(s & 0b111, SYMBOL_BITS);
    }
    bs.into_bytes()
}
