//! lc_pcd container types

use std::fmt;

/// Size of the obfuscated header block at the start of every container.
pub const HEADER_SIZE: usize = 256;

/// Number of header bytes carrying typed fields (seven little-endian u32).
pub const HEADER_FIELDS_SIZE: usize = 28;

/// Opaque tail of the header block, kept byte-for-byte.
pub const RESERVED_SIZE: usize = HEADER_SIZE - HEADER_FIELDS_SIZE;

/// Size of one encoded point record in the container body.
pub const POINT_RECORD_SIZE: usize = 13;

/// Sensor color mode stored in the header as a u32 flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Grayscale,
    Color,
}

impl ColorMode {
    pub fn from_flag(flag: u32) -> Self {
        if flag == 0 {
            ColorMode::Grayscale
        } else {
            ColorMode::Color
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Grayscale => write!(f, "GRAY"),
            ColorMode::Color => write!(f, "COLOR"),
        }
    }
}

/// Decoded container header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u32,
    /// Number of point records following the header
    pub point_count: u32,
    pub data_size: u32,
    /// Width of the source image in pixels
    pub width: u32,
    /// Height of the source image in pixels
    pub height: u32,
    pub color_mode: ColorMode,
    pub ratio: u32,
    /// Decrypted bytes 28..256 of the header block, no defined structure
    pub reserved: [u8; RESERVED_SIZE],
}

impl ContainerHeader {
    /// Body length implied by `point_count`.
    pub fn expected_body_len(&self) -> Option<usize> {
        (self.point_count as usize).checked_mul(POINT_RECORD_SIZE)
    }
}

/// One decoded point.
///
/// `x`, `y` and `z` are in millimeters. `w_pos` and `h_pos` are the column and row
/// of the source image pixel this point was reconstructed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w_pos: i16,
    pub h_pos: i16,
}

impl PointRecord {
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn color(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A fully decoded container: header plus points in file order
#[derive(Debug, Clone)]
pub struct LcPcdData {
    pub header: ContainerHeader,
    pub points: Vec<PointRecord>,
}
