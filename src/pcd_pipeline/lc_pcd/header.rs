//! Header block codec.
//!
//! The first 256 bytes of a container are XOR-ed with a single-byte key. The key is
//! self-inverse, so the same routine both hides and reveals the block.

use tracing::debug;

use crate::pcd_pipeline::common::error::{PcdError, Result};
use crate::pcd_pipeline::lc_pcd::types::{
    ColorMode, ContainerHeader, HEADER_FIELDS_SIZE, HEADER_SIZE, RESERVED_SIZE,
};

/// Key applied to every header byte.
pub const XOR_KEY: u8 = 0x9C;

/// XOR every byte of `block` with [`XOR_KEY`].
pub fn xor_in_place(block: &mut [u8]) {
    for byte in block.iter_mut() {
        *byte ^= XOR_KEY;
    }
}

/// Read a little-endian u32 from a byte buffer
#[inline]
fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    let slice = buf
        .get(offset..offset + 4)
        .ok_or_else(|| PcdError::FormatError("header truncated".to_string()))?;
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(slice);
    Ok(u32::from_le_bytes(bytes))
}

/// Decodes the header block at the start of `bytes`.
///
/// Only the first [`HEADER_SIZE`] bytes are looked at; anything after them is the
/// point body and is left alone.
///
/// # Errors
///
/// Returns `PcdError::FormatError` if fewer than [`HEADER_SIZE`] bytes are given.
pub fn decode_header(bytes: &[u8]) -> Result<ContainerHeader> {
    if bytes.len() < HEADER_SIZE {
        return Err(PcdError::FormatError("header truncated".to_string()));
    }

    let mut block = [0u8; HEADER_SIZE];
    block.copy_from_slice(&bytes[..HEADER_SIZE]);
    xor_in_place(&mut block);

    let version = read_u32(&block, 0)?;
    let point_count = read_u32(&block, 4)?;
    let data_size = read_u32(&block, 8)?;
    let width = read_u32(&block, 12)?;
    let height = read_u32(&block, 16)?;
    let color_flag = read_u32(&block, 20)?;
    let ratio = read_u32(&block, 24)?;

    let mut reserved = [0u8; RESERVED_SIZE];
    reserved.copy_from_slice(&block[HEADER_FIELDS_SIZE..]);

    debug!(
        version,
        point_count,
        data_size,
        width,
        height,
        color_flag,
        ratio,
        "Decoded lc_pcd header"
    );

    Ok(ContainerHeader {
        version,
        point_count,
        data_size,
        width,
        height,
        color_mode: ColorMode::from_flag(color_flag),
        ratio,
        reserved,
    })
}
