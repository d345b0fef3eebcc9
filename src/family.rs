use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::{self, Read, Write};

use super::element::IconElement;
use super::icontype::OSType;
use super::{Error, Result};

/// The first four bytes of an ICNS file:
const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of an icon family header, in bytes:
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;

/// A set of icons stored in a single ICNS file.
///
/// A family is never modified once built: create one with a
/// [`FamilyBuilder`], or by decoding an existing file.  Elements keep the
/// order they were added (or appeared in the file) in, and duplicate OSTypes
/// are all kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IconFamily {
    elements: Vec<IconElement>,
}

impl IconFamily {
    /// Returns the icon elements, in file order.
    pub fn elements(&self) -> &[IconElement] {
        &self.elements
    }

    /// Consumes the family, returning its elements.
    pub fn into_elements(self) -> Vec<IconElement> {
        self.elements
    }

    /// Returns the number of elements in the family.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the icon family contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns every element with the given OSType, in file order.
    pub fn elements_with_type(&self, ostype: OSType)
                              -> impl Iterator<Item = &IconElement> {
        self.elements.iter().filter(move |el| el.ostype() == ostype)
    }

    /// Returns the OSTypes of all elements, in file order.
    pub fn ostypes(&self) -> Vec<OSType> {
        self.elements.iter().map(IconElement::ostype).collect()
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        // FamilyBuilder::finish and decode both reject families that would
        // overflow the header's length field.
        encoded_length(&self.elements) as u32
    }

    /// Decodes an icon family from the complete contents of an ICNS file.
    ///
    /// The payloads are not inspected.  Fails if the header is malformed or
    /// the elements do not exactly fill the length the header declares.
    pub fn decode(input: &[u8]) -> Result<IconFamily> {
        let header_length = ICON_FAMILY_HEADER_LENGTH as usize;
        if input.len() < header_length {
            let msg = format!("file is only {} bytes long", input.len());
            return Err(Error::MalformedHeader(msg));
        }
        if input[0..4] != *ICNS_MAGIC_LITERAL {
            let msg = "not an icns file (wrong magic literal)".to_string();
            return Err(Error::MalformedHeader(msg));
        }
        let declared_length = BigEndian::read_u32(&input[4..8]) as usize;
        if declared_length < header_length {
            let msg = format!("declared length {} is shorter than the header",
                              declared_length);
            return Err(Error::MalformedHeader(msg));
        }

        let mut elements = Vec::new();
        let mut position = header_length;
        while position < declared_length {
            let (element, next) = IconElement::parse(input, position)?;
            elements.push(element);
            position = next;
        }
        if position != declared_length {
            return Err(Error::TrailingBytes {
                end: position,
                declared: declared_length,
            });
        }
        if input.len() != declared_length {
            let msg = format!("header declares {} bytes, but the file is {} \
                               bytes long",
                              declared_length,
                              input.len());
            return Err(Error::MalformedHeader(msg));
        }
        Ok(IconFamily { elements: elements })
    }

    /// Reads an icon family from an ICNS file (or other reader), consuming
    /// the reader to its end.
    pub fn read<R: Read>(mut reader: R) -> Result<IconFamily> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        IconFamily::decode(&input)
    }

    /// Writes the icon family to an ICNS file (or other writer).
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(ICNS_MAGIC_LITERAL)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        for element in &self.elements {
            element.write(writer.by_ref())?;
        }
        Ok(())
    }

    /// Encodes the icon family into a new byte buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.total_length() as usize);
        // Writing into a Vec cannot fail.
        let _ = self.write(&mut output);
        output
    }
}

/// Accumulates icon elements for a new [`IconFamily`].
///
/// Nothing is encoded until [`finish`](#method.finish), so an error partway
/// through building simply drops the builder.
#[derive(Debug, Default)]
pub struct FamilyBuilder {
    elements: Vec<IconElement>,
}

impl FamilyBuilder {
    /// Creates a builder with no elements.
    pub fn new() -> FamilyBuilder {
        FamilyBuilder::default()
    }

    /// Appends an element with the given type and payload.
    pub fn push(&mut self, ostype: OSType, data: Vec<u8>) -> &mut Self {
        self.elements.push(IconElement::new(ostype, data));
        self
    }

    /// Returns the number of elements added so far.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if no elements have been added.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Builds the family.  Fails if the encoded file would be too long for
    /// the 32-bit length in the ICNS header.
    pub fn finish(self) -> Result<IconFamily> {
        let length = encoded_length(&self.elements);
        if length > u64::from(u32::MAX) {
            return Err(Error::ContainerTooLarge(length));
        }
        Ok(IconFamily { elements: self.elements })
    }
}

fn encoded_length(elements: &[IconElement]) -> u64 {
    let mut length = u64::from(ICON_FAMILY_HEADER_LENGTH);
    for element in elements {
        length += element.total_length();
    }
    length
}
