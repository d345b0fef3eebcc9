use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::{self, Write};

use super::icontype::{self, OSType, SizeEntry};
use super::image::Image;
use super::{Error, Result};

/// The length of an icon element header, in bytes:
pub(crate) const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

/// Placeholder type reported when an element is cut off before its OSType.
const TRUNCATED_OSTYPE: OSType = OSType(*b"????");

/// One entry in an ICNS file: an OSType tag and an opaque data payload.  For
/// the icon types this crate writes, the payload is a PNG file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconElement {
    ostype: OSType,
    data: Vec<u8>,
}

impl IconElement {
    /// Creates an icon element with the given OSType and data payload.
    pub fn new(ostype: OSType, data: Vec<u8>) -> IconElement {
        IconElement {
            ostype: ostype,
            data: data,
        }
    }

    /// Returns the OSType for this element (e.g. `ic07` or `icp4`).
    pub fn ostype(&self) -> OSType {
        self.ostype
    }

    /// Returns the size table entry for this element's type, or `None` if
    /// the type is not one this crate knows.
    pub fn size_entry(&self) -> Option<&'static SizeEntry> {
        icontype::lookup(self.ostype)
    }

    /// Returns the report label for this element's type (`"unknown"` for
    /// types outside the size table).
    pub fn label(&self) -> &'static str {
        icontype::label_for(self.ostype)
    }

    /// Returns the encoded data for this element.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the element, returning its data payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the encoded length of the element, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u64 {
        u64::from(ICON_ELEMENT_HEADER_LENGTH) + (self.data.len() as u64)
    }

    /// Decodes the payload as a PNG image.  Returns an error if the data is
    /// not a valid PNG.
    pub fn decode_image(&self) -> Result<Image> {
        Image::decode_png(&self.data)
    }

    /// Parses the element starting at `offset` within `input`, returning it
    /// along with the offset just past its end.
    pub(crate) fn parse(input: &[u8], offset: usize)
                        -> Result<(IconElement, usize)> {
        let remaining = &input[offset..];
        let header_length = ICON_ELEMENT_HEADER_LENGTH as usize;
        if remaining.len() < header_length {
            let ostype = if remaining.len() >= 4 {
                OSType([remaining[0], remaining[1], remaining[2], remaining[3]])
            } else {
                TRUNCATED_OSTYPE
            };
            return Err(Error::TruncatedChunk {
                ostype: ostype,
                offset: offset,
                needed: header_length,
                available: remaining.len(),
            });
        }
        let ostype =
            OSType([remaining[0], remaining[1], remaining[2], remaining[3]]);
        let element_length = BigEndian::read_u32(&remaining[4..8]);
        if element_length < ICON_ELEMENT_HEADER_LENGTH {
            return Err(Error::InvalidChunkLength {
                ostype: ostype,
                offset: offset,
                length: element_length,
            });
        }
        let element_length = element_length as usize;
        if remaining.len() < element_length {
            return Err(Error::TruncatedChunk {
                ostype: ostype,
                offset: offset,
                needed: element_length,
                available: remaining.len(),
            });
        }
        let data = remaining[header_length..element_length].to_vec();
        Ok((IconElement::new(ostype, data), offset + element_length))
    }

    /// Writes the icon element to within an ICNS file.  The caller is
    /// responsible for ensuring the length fits in 32 bits.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let OSType(ref raw_ostype) = self.ostype;
        writer.write_all(raw_ostype)?;
        writer.write_u32::<BigEndian>(self.total_length() as u32)?;
        writer.write_all(&self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_element() {
        let element = IconElement::new(OSType(*b"quux"), b"foobar".to_vec());
        assert_eq!(element.total_length(), 14);
        let mut output = Vec::new();
        element.write(&mut output).expect("write failed");
        assert_eq!(b"quux\0\0\0\x0efoobar", &output as &[u8]);
    }

    #[test]
    fn parse_element() {
        let input = b"icnsquux\0\0\0\x0efoobarbaz!";
        let (element, end) = IconElement::parse(input, 4).expect("parse failed");
        assert_eq!(element.ostype(), OSType(*b"quux"));
        assert_eq!(element.data(), b"foobar");
        assert_eq!(end, 18);
    }

    #[test]
    fn parse_empty_payload() {
        let (element, end) = IconElement::parse(b"ic07\0\0\0\x08", 0).unwrap();
        assert!(element.data().is_empty());
        assert_eq!(end, 8);
    }

    #[test]
    fn parse_truncated_payload() {
        match IconElement::parse(b"quux\0\0\0\x0efooba", 0) {
            Err(Error::TruncatedChunk { ostype, needed: 14, available: 13, .. }) => {
                assert_eq!(ostype, OSType(*b"quux"));
            }
            _ => panic!("expected TruncatedChunk"),
        }
    }

    #[test]
    fn parse_truncated_header() {
        match IconElement::parse(b"qu", 0) {
            Err(Error::TruncatedChunk { ostype, needed: 8, available: 2, .. }) => {
                assert_eq!(ostype, TRUNCATED_OSTYPE);
            }
            _ => panic!("expected TruncatedChunk"),
        }
    }

    #[test]
    fn parse_short_length() {
        match IconElement::parse(b"quux\0\0\0\x07foobar", 0) {
            Err(Error::InvalidChunkLength { length: 7, .. }) => {}
            _ => panic!("expected InvalidChunkLength"),
        }
    }

    #[test]
    fn labels_come_from_size_table() {
        let element = IconElement::new(OSType(*b"ic09"), Vec::new());
        assert_eq!(element.label(), "512x512");
        assert_eq!(element.size_entry().map(|entry| entry.dimension), Some(512));
        let element = IconElement::new(OSType(*b"abcd"), Vec::new());
        assert_eq!(element.label(), "unknown");
        assert!(element.size_entry().is_none());
    }
}
