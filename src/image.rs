use std::path::Path;

use super::{Error, Result};

/// A decoded bitmap, either a source image or one resampled icon size.
#[derive(Clone)]
pub struct Image {
    format: PixelFormat,
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl Image {
    /// Creates a new image with all pixel data set to zero.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Image {
        let data_bytes = format.data_length(width, height);
        Image {
            format: format,
            width: width,
            height: height,
            data: vec![0u8; data_bytes].into_boxed_slice(),
        }
    }

    /// Creates a new image using the given pixel data.  Returns an error if
    /// the data array is not the correct length.
    pub fn from_data(format: PixelFormat,
                     width: u32,
                     height: u32,
                     data: Vec<u8>)
                     -> Result<Image> {
        let expected = format.data_length(width, height);
        if data.len() != expected {
            return Err(Error::PixelDataLength {
                expected: expected,
                actual: data.len(),
            });
        }
        Ok(Image {
            format: format,
            width: width,
            height: height,
            data: data.into_boxed_slice(),
        })
    }

    /// Loads an image from a file in any format the `image` crate
    /// understands, keeping grayscale and alpha-less sources in their
    /// narrower formats.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Image> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
        let decoded = ::image::open(path)?;
        let (width, height) = (decoded.width(), decoded.height());
        let color = decoded.color();
        let (format, data) = match (color.has_color(), color.has_alpha()) {
            (true, true) => (PixelFormat::RGBA, decoded.into_rgba8().into_raw()),
            (true, false) => (PixelFormat::RGB, decoded.into_rgb8().into_raw()),
            (false, true) => {
                (PixelFormat::GrayAlpha, decoded.into_luma_alpha8().into_raw())
            }
            (false, false) => (PixelFormat::Gray, decoded.into_luma8().into_raw()),
        };
        Image::from_data(format, width, height, data)
    }

    /// Creates a copy of this image using the RGBA pixel format (that is,
    /// `foo.to_rgba().pixel_format()` will always return `PixelFormat::RGBA`).
    /// Formats without alpha get a fully opaque alpha channel.  If the source
    /// image is already in RGBA format, this is equivalent to simply calling
    /// `clone()`.
    pub fn to_rgba(&self) -> Image {
        let rgba_data = match self.format {
            PixelFormat::RGBA => self.data.clone(),
            PixelFormat::RGB => rgb_to_rgba(&self.data),
            PixelFormat::GrayAlpha => gray_alpha_to_rgba(&self.data),
            PixelFormat::Gray => gray_to_rgba(&self.data),
        };
        Image {
            format: PixelFormat::RGBA,
            width: self.width,
            height: self.height,
            data: rgba_data,
        }
    }

    /// Returns the format in which this image's pixel data is stored.
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the image's pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the image's pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image, returning its pixel data.
    pub fn into_data(self) -> Vec<u8> {
        self.data.into_vec()
    }
}

/// A format for storing pixel data in an image.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    /// 32-bit color with alpha channel.
    RGBA,
    /// 24-bit color with no alpha.
    RGB,
    /// 16-bit grayscale-with-alpha.
    GrayAlpha,
    /// 8-bit grayscale with no alpha.
    Gray,
}

impl PixelFormat {
    /// Returns the number of bits needed to store a single pixel in this
    /// format.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::RGBA => 32,
            PixelFormat::RGB => 24,
            PixelFormat::GrayAlpha => 16,
            PixelFormat::Gray => 8,
        }
    }

    /// Returns true if this format carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        match self {
            PixelFormat::RGBA | PixelFormat::GrayAlpha => true,
            PixelFormat::RGB | PixelFormat::Gray => false,
        }
    }

    /// Returns the number of bytes needed to store an image of the given size
    /// in this format.
    pub(crate) fn data_length(self, width: u32, height: u32) -> usize {
        let bytes_per_pixel = (self.bits_per_pixel() / 8) as usize;
        bytes_per_pixel * (width as usize) * (height as usize)
    }
}

/// Converts RGB image data into RGBA.
fn rgb_to_rgba(rgb: &[u8]) -> Box<[u8]> {
    debug_assert_eq!(rgb.len() % 3, 0);
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba.into_boxed_slice()
}

/// Converts grayscale-with-alpha image data into RGBA.
fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Box<[u8]> {
    debug_assert_eq!(gray_alpha.len() % 2, 0);
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba.into_boxed_slice()
}

/// Converts grayscale image data into RGBA.
fn gray_to_rgba(gray: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba.into_boxed_slice()
}
