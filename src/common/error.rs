use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum UdcError {
    // Frame
    #[error("Truncated header: {len} bytes available, 13 required")]
    TruncatedHeader { len: usize },
    #[error("Truncated body: {expected} bytes declared, {available} available")]
    TruncatedBody { expected: usize, available: usize },
    #[error("Checksum mismatch: expected {expected:08x}, computed {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    #[error("Payload too large: {len} bytes, at most {} fit a frame", u32::MAX)]
    PayloadTooLarge { len: usize },
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    // Reader
    #[error("Malformed image: {0}")]
    MalformedImage(String),

    // Collaborators
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type UdcResult<T> = Result<T, UdcError>;

#[cfg(test)]
mod error_tests {
    use super::UdcError;

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_display() {
        let err = UdcError::ChecksumMismatch { expected: 0xdeadbeef, actual: 0x1 };
        assert_eq!(err.to_string(), "Checksum mismatch: expected deadbeef, computed 00000001");
        let err = UdcError::TruncatedBody { expected: 10, available: 4 };
        assert_eq!(err.to_string(), "Truncated body: 10 bytes declared, 4 available");
        let err = UdcError::PayloadTooLarge { len: 5_000_000_000 };
        assert_eq!(
            err.to_string(),
            "Payload too large: 5000000000 bytes, at most 4294967295 fit a frame"
        );
    }
}
