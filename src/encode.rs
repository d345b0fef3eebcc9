use std::borrow::Cow;
use std::cmp;

use tracing::{debug, warn};

use super::family::{FamilyBuilder, IconFamily};
use super::icontype::{entries_up_to, smallest_dimension};
use super::image::{Image, PixelFormat};
use super::resample::Resampler;
use super::{Error, Result};

/// Sources smaller than this in both dimensions still encode, but with a
/// warning, since the largest icons will be missing or upscaled.
pub const RECOMMENDED_SOURCE_DIMENSION: u32 = 512;

/// The result of a successful [`encode`].
#[derive(Debug)]
pub struct EncodeReport {
    /// The encoded icon family, one element per size in table order.
    pub family: IconFamily,
    /// Non-fatal problems noticed while encoding (currently only
    /// [`Error::SourceTooSmall`]).  Each one has already been logged.
    pub warnings: Vec<Error>,
}

/// Returns `Error::SourceTooSmall` if both dimensions are below
/// [`RECOMMENDED_SOURCE_DIMENSION`].  This is advisory; [`encode`] reports it
/// as a warning and carries on.
pub fn check_source_size(width: u32, height: u32) -> Result<()> {
    if width < RECOMMENDED_SOURCE_DIMENSION &&
       height < RECOMMENDED_SOURCE_DIMENSION {
        return Err(Error::SourceTooSmall {
            width: width,
            height: height,
            recommended: RECOMMENDED_SOURCE_DIMENSION,
        });
    }
    Ok(())
}

/// Encodes `source` into an icon family containing every icon size from the
/// size table that is no larger than the source's larger dimension.
///
/// Each size is produced by `resampler` and stored as a PNG payload.  Sources
/// without an alpha channel are given an opaque one first.  Non-square
/// sources are stretched to square.
///
/// Fails with [`Error::EmptySource`] if the source is too small for any icon
/// size, and with [`Error::ResamplerFailure`] if the resampler fails or
/// returns an image of the wrong size.
pub fn encode<R: Resampler + ?Sized>(source: &Image,
                                     resampler: &R)
                                     -> Result<EncodeReport> {
    let (width, height) = (source.width(), source.height());
    let mut warnings = Vec::new();
    if let Err(warning) = check_source_size(width, height) {
        warn!("{}", warning);
        warnings.push(warning);
    }

    let max_dimension = cmp::max(width, height);
    let mut entries = entries_up_to(max_dimension).peekable();
    if entries.peek().is_none() {
        return Err(Error::EmptySource {
            width: width,
            height: height,
            smallest: smallest_dimension(),
        });
    }
    if width != height {
        warn!("source image is {}x{}; icons will be stretched to square",
              width,
              height);
    }

    let source: Cow<Image> = if source.pixel_format() == PixelFormat::RGBA {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(source.to_rgba())
    };
    let mut builder = FamilyBuilder::new();
    for entry in entries {
        let size = entry.dimension;
        let mut icon = resampler.resample(&source, size, size)
            .map_err(Error::ResamplerFailure)?;
        if icon.width() != size || icon.height() != size {
            let msg = format!("asked for {}x{} but got {}x{}",
                              size,
                              size,
                              icon.width(),
                              icon.height());
            return Err(Error::ResamplerFailure(msg.into()));
        }
        if !icon.pixel_format().has_alpha() {
            icon = icon.to_rgba();
        }
        let payload = icon.encode_png()?;
        debug!(ostype = %entry.ostype, bytes = payload.len(), "added {}", entry.label);
        builder.push(entry.ostype, payload);
    }
    Ok(EncodeReport {
        family: builder.finish()?,
        warnings: warnings,
    })
}
