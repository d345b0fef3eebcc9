use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::element::IconElement;
use super::encode::encode;
use super::family::IconFamily;
use super::icontype::{OSType, SizeEntry};
use super::image::Image;
use super::resample::{LanczosResampler, ResampleFilter};
use super::{Error, Result};

/// Settings for [`convert`].
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Where to write the ICNS file.  Defaults to the input path with its
    /// extension replaced by `.icns`.
    pub output: Option<PathBuf>,
    /// The filter used to produce each icon size.
    pub filter: ResampleFilter,
}

impl ConvertOptions {
    /// Returns the path the ICNS file will be written to for `input`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match self.output {
            Some(ref output) => output.clone(),
            None => input.with_extension("icns"),
        }
    }
}

/// What [`convert`] did.
#[derive(Debug)]
pub struct ConvertSummary {
    /// The ICNS file that was written.
    pub output: PathBuf,
    /// Width of the source image, in pixels.
    pub source_width: u32,
    /// Height of the source image, in pixels.
    pub source_height: u32,
    /// The sizes written, in file order.
    pub added: Vec<&'static SizeEntry>,
    /// Length of the written file, in bytes.
    pub file_size: u64,
    /// Non-fatal problems, already logged.
    pub warnings: Vec<Error>,
}

/// Converts the image at `input` into an ICNS file.
///
/// The output file is only created once every icon size has been encoded, so
/// a failed conversion leaves nothing behind.
pub fn convert<P: AsRef<Path>>(input: P,
                               options: &ConvertOptions)
                               -> Result<ConvertSummary> {
    let input = input.as_ref();
    let output = options.output_path(input);
    let source = Image::open(input)?;
    debug!("loaded {} ({}x{}, {:?})",
           input.display(),
           source.width(),
           source.height(),
           source.pixel_format());

    let resampler = LanczosResampler::new(options.filter);
    let report = encode(&source, &resampler)?;
    let added = report.family
        .elements()
        .iter()
        .filter_map(IconElement::size_entry)
        .collect();
    let bytes = report.family.to_bytes();
    fs::write(&output, &bytes)?;
    info!("created {} ({} bytes)", output.display(), bytes.len());

    Ok(ConvertSummary {
        output: output,
        source_width: source.width(),
        source_height: source.height(),
        added: added,
        file_size: bytes.len() as u64,
        warnings: report.warnings,
    })
}

/// One element of an inspected ICNS file.
#[derive(Clone, Debug)]
pub struct InspectedElement {
    /// The element's type.
    pub ostype: OSType,
    /// The size table label, or `"unknown"`.
    pub label: &'static str,
    /// Length of the payload, in bytes.
    pub payload_length: usize,
    /// When verifying, a description of what is wrong with the payload.
    pub problem: Option<String>,
}

/// The contents of an ICNS file, as reported by [`inspect`].
#[derive(Clone, Debug)]
pub struct Inspection {
    /// The inspected file.
    pub path: PathBuf,
    /// One entry per element, in file order.
    pub elements: Vec<InspectedElement>,
}

impl Inspection {
    /// Returns the number of elements with a verification problem.
    pub fn num_problems(&self) -> usize {
        self.elements.iter().filter(|el| el.problem.is_some()).count()
    }
}

/// Reads the ICNS file at `path` and lists its elements.
///
/// With `verify` set, each payload of a known type is also decoded as a PNG
/// and its dimensions checked against the size table.  Verification problems
/// are reported per element rather than failing the whole inspection.
pub fn inspect<P: AsRef<Path>>(path: P, verify: bool) -> Result<Inspection> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let family = IconFamily::decode(&fs::read(path)?)?;
    let elements = family.elements()
        .iter()
        .map(|element| {
            InspectedElement {
                ostype: element.ostype(),
                label: element.label(),
                payload_length: element.data().len(),
                problem: if verify { verify_element(element) } else { None },
            }
        })
        .collect();
    Ok(Inspection {
        path: path.to_path_buf(),
        elements: elements,
    })
}

fn verify_element(element: &IconElement) -> Option<String> {
    let entry = element.size_entry()?;
    match element.decode_image() {
        Err(error) => Some(format!("payload is not a readable PNG: {}", error)),
        Ok(image) => {
            if image.width() != entry.dimension ||
               image.height() != entry.dimension {
                Some(format!("payload is {}x{}, expected {}x{}",
                             image.width(),
                             image.height(),
                             entry.dimension,
                             entry.dimension))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::family::FamilyBuilder;
    use super::super::image::PixelFormat;

    #[test]
    fn default_output_path() {
        let options = ConvertOptions::default();
        assert_eq!(options.output_path(Path::new("art/logo.png")),
                   PathBuf::from("art/logo.icns"));
        let options = ConvertOptions {
            output: Some(PathBuf::from("out.icns")),
            ..ConvertOptions::default()
        };
        assert_eq!(options.output_path(Path::new("art/logo.png")),
                   PathBuf::from("out.icns"));
    }

    #[test]
    fn verify_checks_dimensions() {
        let good = Image::new(PixelFormat::RGBA, 16, 16).encode_png().unwrap();
        let bad = Image::new(PixelFormat::RGBA, 20, 20).encode_png().unwrap();
        let mut builder = FamilyBuilder::new();
        builder.push(OSType(*b"icp4"), good)
            .push(OSType(*b"icp5"), bad)
            .push(OSType(*b"ic07"), b"not a png".to_vec())
            .push(OSType(*b"zzzz"), b"opaque".to_vec());
        let family = builder.finish().unwrap();
        let problems: Vec<Option<String>> =
            family.elements().iter().map(verify_element).collect();
        assert_eq!(problems[0], None);
        assert_eq!(problems[1],
                   Some("payload is 20x20, expected 32x32".to_string()));
        assert!(problems[2].is_some());
        assert_eq!(problems[3], None);
    }

    #[test]
    fn inspect_missing_file() {
        match inspect("/no/such/file.icns", false) {
            Err(Error::InputNotFound(_)) => {}
            _ => panic!("expected InputNotFound"),
        }
    }
}
