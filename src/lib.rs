//! Library for converting a single image into a multi-resolution Apple Icon
//! Image (.icns) file, and for reading such files back.
//!
//! An ICNS file is an eight byte header (the magic literal `icns` followed by
//! the big-endian total file length) and then a sequence of icon elements.
//! Each element is a four byte OSType, a big-endian length that includes the
//! element's own eight byte header, and the payload.  Every icon this crate
//! writes is a PNG payload, under one of the types listed in [`SIZE_TABLE`].
//!
//! See https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the file format.
//!
//! # Example
//!
//! ```no_run
//! use png2icns::{encode, IconFamily, Image, LanczosResampler};
//!
//! let source = Image::open("logo.png")?;
//! let report = encode(&source, &LanczosResampler::default())?;
//! std::fs::write("logo.icns", report.family.to_bytes())?;
//!
//! let family = IconFamily::decode(&std::fs::read("logo.icns")?)?;
//! for element in family.elements() {
//!     println!("{}: {} bytes", element.ostype(), element.data().len());
//! }
//! # Ok::<(), png2icns::Error>(())
//! ```

#![warn(missing_docs)]

mod convert;
mod element;
mod encode;
mod family;
mod icontype;
mod image;
mod pngio;
mod resample;

use std::path::PathBuf;

pub use self::convert::{convert, inspect, ConvertOptions, ConvertSummary,
                        Inspection, InspectedElement};
pub use self::element::IconElement;
pub use self::encode::{check_source_size, encode, EncodeReport,
                       RECOMMENDED_SOURCE_DIMENSION};
pub use self::family::{FamilyBuilder, IconFamily};
pub use self::icontype::{entries_up_to, label_for, lookup, smallest_dimension,
                         OSType, SizeEntry, INSPECT_ONLY_TABLE, SIZE_TABLE,
                         UNKNOWN_LABEL};
pub use self::image::{Image, PixelFormat};
pub use self::resample::{LanczosResampler, ResampleFilter, Resampler,
                         ResamplerError};

/// Result type for png2icns operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while converting or reading icon files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The source image is too small for even the smallest icon size.
    #[error("source image is {width}x{height}, smaller than the smallest \
             icon size ({smallest}x{smallest}); nothing to encode")]
    EmptySource {
        /// Source width, in pixels.
        width: u32,
        /// Source height, in pixels.
        height: u32,
        /// The smallest dimension in the size table.
        smallest: u32,
    },

    /// The source image is smaller than recommended.  Encoding still
    /// proceeds; this is only ever reported as a warning.
    #[error("source image is {width}x{height}, smaller than \
             {recommended}x{recommended}; quality may be reduced")]
    SourceTooSmall {
        /// Source width, in pixels.
        width: u32,
        /// Source height, in pixels.
        height: u32,
        /// The recommended minimum dimension.
        recommended: u32,
    },

    /// The file header is missing, has the wrong magic literal, or declares
    /// a length that does not fit the data.
    #[error("malformed icns header: {0}")]
    MalformedHeader(String),

    /// The data ends in the middle of an element.
    #[error("truncated '{ostype}' element at offset {offset}: needs {needed} \
             bytes, only {available} remain")]
    TruncatedChunk {
        /// The element's type, or `????` if the type itself was cut off.
        ostype: OSType,
        /// Byte offset of the element within the file.
        offset: usize,
        /// Bytes the element needs from `offset` onward.
        needed: usize,
        /// Bytes actually left from `offset` onward.
        available: usize,
    },

    /// The elements end somewhere other than the declared file length.
    #[error("elements end at offset {end}, but the header declares a length \
             of {declared}")]
    TrailingBytes {
        /// Where the last element ended.
        end: usize,
        /// The length declared in the file header.
        declared: usize,
    },

    /// An element declares a length smaller than its own header.
    #[error("invalid length {length} for '{ostype}' element at offset \
             {offset}")]
    InvalidChunkLength {
        /// The element's type.
        ostype: OSType,
        /// Byte offset of the element within the file.
        offset: usize,
        /// The length field as read.
        length: u32,
    },

    /// The encoded family would not fit in the 32-bit length field.
    #[error("icon family is too large to encode ({0} bytes)")]
    ContainerTooLarge(u64),

    /// The resampler failed, or returned an image of the wrong size.
    #[error("resampler failed: {0}")]
    ResamplerFailure(#[source] ResamplerError),

    /// Pixel data does not match the declared format and dimensions.
    #[error("pixel data is {actual} bytes, expected {expected}")]
    PixelDataLength {
        /// Bytes required by the format and dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// A PNG decoded to a layout this crate does not handle.
    #[error("unsupported PNG layout: {0}")]
    UnsupportedPng(String),

    /// A PNG payload could not be decoded.
    #[error("PNG decoding failed: {0}")]
    PngDecode(#[from] png::DecodingError),

    /// A PNG payload could not be encoded.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),

    /// The source image could not be loaded.
    #[error("failed to load image: {0}")]
    ImageLoad(#[from] ::image::ImageError),

    /// An I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_empty_icon_family() {
        let family = IconFamily::default();
        assert!(family.is_empty());
        assert_eq!(b"icns\0\0\0\x08", &family.to_bytes() as &[u8]);
    }

    #[test]
    fn error_messages() {
        let error = Error::EmptySource { width: 8, height: 8, smallest: 16 };
        assert_eq!(error.to_string(),
                   "source image is 8x8, smaller than the smallest icon size \
                    (16x16); nothing to encode");
        let error = Error::InvalidChunkLength {
            ostype: OSType(*b"ic07"),
            offset: 8,
            length: 3,
        };
        assert_eq!(error.to_string(),
                   "invalid length 3 for 'ic07' element at offset 8");
    }
}
