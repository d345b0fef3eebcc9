use std::fmt;
use std::str::FromStr;

/// The label reported for an OSType that appears in neither size table.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each icon element.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OSType(pub [u8; 4]);

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        let &OSType(raw) = self;
        for &byte in &raw {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for OSType {
    type Err = String;

    fn from_str(input: &str) -> Result<OSType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 {
            Err(format!("OSType string must be 4 bytes (was {})", bytes.len()))
        } else {
            let mut raw = [0u8; 4];
            raw.clone_from_slice(bytes);
            Ok(OSType(raw))
        }
    }
}

/// One row of the size table: the element type an icon is stored under, the
/// square pixel dimension its payload must have, and a label for reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeEntry {
    /// The OSType of the icon element.
    pub ostype: OSType,
    /// Width and height of the payload image, in pixels.
    pub dimension: u32,
    /// Human-readable description, e.g. `"1024x1024 (512@2x)"`.
    pub label: &'static str,
}

const fn entry(ostype: &[u8; 4], dimension: u32, label: &'static str)
               -> SizeEntry {
    SizeEntry {
        ostype: OSType(*ostype),
        dimension: dimension,
        label: label,
    }
}

/// The icon types produced when converting an image, smallest first.  All of
/// them carry a PNG payload.
pub static SIZE_TABLE: [SizeEntry; 7] = [
    entry(b"icp4", 16, "16x16"),
    entry(b"icp5", 32, "32x32"),
    entry(b"icp6", 64, "64x64"),
    entry(b"ic07", 128, "128x128"),
    entry(b"ic08", 256, "256x256"),
    entry(b"ic09", 512, "512x512"),
    entry(b"ic10", 1024, "1024x1024 (512@2x)"),
];

/// Retina icon types that are recognized when inspecting a file, but never
/// written by the encoder.
pub static INSPECT_ONLY_TABLE: [SizeEntry; 4] = [
    entry(b"ic11", 32, "32x32 (16@2x)"),
    entry(b"ic12", 64, "64x64 (32@2x)"),
    entry(b"ic13", 256, "256x256 (128@2x)"),
    entry(b"ic14", 512, "512x512 (256@2x)"),
];

/// Returns every encodable entry whose dimension is at most `max_dimension`,
/// in table order.
///
/// # Examples
/// ```
/// use png2icns::entries_up_to;
/// let labels: Vec<&str> = entries_up_to(64).map(|e| e.label).collect();
/// assert_eq!(labels, ["16x16", "32x32", "64x64"]);
/// assert_eq!(entries_up_to(15).count(), 0);
/// ```
pub fn entries_up_to(max_dimension: u32)
                     -> impl Iterator<Item = &'static SizeEntry> {
    SIZE_TABLE.iter().filter(move |entry| entry.dimension <= max_dimension)
}

/// Finds the table entry for `ostype`, looking at the encodable types first
/// and then at the inspect-only ones.
pub fn lookup(ostype: OSType) -> Option<&'static SizeEntry> {
    SIZE_TABLE
        .iter()
        .chain(INSPECT_ONLY_TABLE.iter())
        .find(|entry| entry.ostype == ostype)
}

/// Returns the label for `ostype`, or [`UNKNOWN_LABEL`] if the type is not in
/// either table.
///
/// # Examples
/// ```
/// use png2icns::{label_for, OSType};
/// assert_eq!(label_for(OSType(*b"ic07")), "128x128");
/// assert_eq!(label_for(OSType(*b"zzzz")), "unknown");
/// ```
pub fn label_for(ostype: OSType) -> &'static str {
    lookup(ostype).map_or(UNKNOWN_LABEL, |entry| entry.label)
}

/// Returns the smallest dimension the encoder can produce.  Sources smaller
/// than this in both directions yield no icons at all.
pub fn smallest_dimension() -> u32 {
    SIZE_TABLE[0].dimension
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ostype_to_and_from_str() {
        let ostype = OSType::from_str("abcd").expect("failed to parse OSType");
        assert_eq!(ostype.to_string(), "abcd".to_string());
    }

    #[test]
    fn ostype_from_str_failure() {
        assert_eq!(OSType::from_str("abc"),
                   Err("OSType string must be 4 bytes (was 3)".to_string()));
        assert_eq!(OSType::from_str("abcde"),
                   Err("OSType string must be 4 bytes (was 5)".to_string()));
    }

    #[test]
    fn size_table_is_sorted_and_unique() {
        for pair in SIZE_TABLE.windows(2) {
            assert!(pair[0].dimension < pair[1].dimension);
        }
        let all: Vec<OSType> = SIZE_TABLE.iter()
            .chain(INSPECT_ONLY_TABLE.iter())
            .map(|entry| entry.ostype)
            .collect();
        for (index, ostype) in all.iter().enumerate() {
            assert!(!all[index + 1..].contains(ostype), "duplicate {}", ostype);
        }
    }

    #[test]
    fn entries_up_to_is_monotonic() {
        let probes = [0, 1, 15, 16, 17, 100, 128, 511, 512, 1023, 1024, 4096];
        for &small in &probes {
            for &large in probes.iter().filter(|&&large| large >= small) {
                let smaller: Vec<_> = entries_up_to(small).collect();
                let larger: Vec<_> = entries_up_to(large).collect();
                assert!(smaller.iter().all(|entry| larger.contains(entry)));
            }
            let expected = SIZE_TABLE.iter()
                .filter(|entry| entry.dimension <= small)
                .count();
            assert_eq!(entries_up_to(small).count(), expected);
        }
    }

    #[test]
    fn entries_up_to_boundaries() {
        assert_eq!(entries_up_to(15).count(), 0);
        assert_eq!(entries_up_to(16).count(), 1);
        assert_eq!(entries_up_to(512).count(), 6);
        assert_eq!(entries_up_to(1024).count(), 7);
        assert_eq!(entries_up_to(u32::MAX).count(), 7);
        assert_eq!(smallest_dimension(), 16);
    }

    #[test]
    fn labels() {
        assert_eq!(label_for(OSType(*b"ic07")), "128x128");
        assert_eq!(label_for(OSType(*b"ic10")), "1024x1024 (512@2x)");
        assert_eq!(label_for(OSType(*b"ic13")), "256x256 (128@2x)");
        assert_eq!(label_for(OSType(*b"zzzz")), UNKNOWN_LABEL);
        assert_eq!(label_for(OSType(*b"is32")), UNKNOWN_LABEL);
    }

    #[test]
    fn inspect_only_types_are_not_encoded() {
        for entry in &INSPECT_ONLY_TABLE {
            assert!(entries_up_to(u32::MAX).all(|e| e.ostype != entry.ostype));
            assert_eq!(lookup(entry.ostype), Some(entry));
        }
    }
}
