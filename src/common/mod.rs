pub mod bitstream;
pub mod compress;
pub mod error;
pub mod frame;
pub mod iter;
pub mod marker;
pub mod metadata;
pub mod packer;
pub mod palette;
