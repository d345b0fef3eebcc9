use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::image::{Image, PixelFormat};

/// The error a [`Resampler`] reports.  The encoder wraps it in
/// `Error::ResamplerFailure` without looking inside.
pub type ResamplerError = Box<dyn std::error::Error + Send + Sync>;

/// Rescales a bitmap to new pixel dimensions.
pub trait Resampler {
    /// Returns a copy of `source` scaled to exactly `width` by `height`
    /// pixels.  Implementations must preserve the alpha channel.
    fn resample(&self,
                source: &Image,
                width: u32,
                height: u32)
                -> Result<Image, ResamplerError>;
}

impl<'a, R: Resampler + ?Sized> Resampler for &'a R {
    fn resample(&self,
                source: &Image,
                width: u32,
                height: u32)
                -> Result<Image, ResamplerError> {
        (**self).resample(source, width, height)
    }
}

/// The resampling filters suitable for icons.  Both keep small sizes sharp;
/// nearest-neighbour and bilinear filtering are deliberately not offered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResampleFilter {
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
    /// Catmull-Rom cubic.
    CatmullRom,
}

impl ResampleFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
        }
    }
}

/// The default [`Resampler`], backed by `image::imageops::resize`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LanczosResampler {
    filter: ResampleFilter,
}

impl LanczosResampler {
    /// Creates a resampler that uses the given filter.
    pub fn new(filter: ResampleFilter) -> LanczosResampler {
        LanczosResampler { filter: filter }
    }

    /// Returns the filter this resampler uses.
    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }
}

impl Resampler for LanczosResampler {
    fn resample(&self,
                source: &Image,
                width: u32,
                height: u32)
                -> Result<Image, ResamplerError> {
        let rgba = if source.pixel_format() == PixelFormat::RGBA {
            source.clone()
        } else {
            source.to_rgba()
        };
        let (source_width, source_height) = (rgba.width(), rgba.height());
        let buffer = RgbaImage::from_raw(source_width,
                                         source_height,
                                         rgba.into_data())
            .ok_or("pixel buffer does not match image dimensions")?;
        let resized = if source_width == width && source_height == height {
            buffer
        } else {
            imageops::resize(&buffer, width, height, self.filter.filter_type())
        };
        Ok(Image::from_data(PixelFormat::RGBA, width, height, resized.into_raw())?)
    }
}
