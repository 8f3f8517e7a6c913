//! Baseline TIFF 6.0 tags.

use crate::registry::TagSet;

use super::tag_set;

pub const SET_NAME: &str = "Baseline";

/// Locked set of the baseline tags.
pub fn tags() -> TagSet {
    tag_set(SET_NAME, 1, 64999, TAGS, true)
}

const TAGS: &[(u16, &str)] = &[
    (254, "NewSubfileType"),
    (255, "SubfileType"),
    (256, "ImageWidth"),
    (257, "ImageLength"),
    (258, "BitsPerSample"),
    (259, "Compression"),
    (262, "PhotometricInterpretation"),
    (263, "Threshholding"),
    (264, "CellWidth"),
    (265, "CellLength"),
    (266, "FillOrder"),
    (270, "ImageDescription"),
    (271, "Make"),
    (272, "Model"),
    (273, "StripOffsets"),
    (274, "Orientation"),
    (277, "SamplesPerPixel"),
    (278, "RowsPerStrip"),
    (279, "StripByteCounts"),
    (280, "MinSampleValue"),
    (281, "MaxSampleValue"),
    (282, "XResolution"),
    (283, "YResolution"),
    (284, "PlanarConfiguration"),
    (288, "FreeOffsets"),
    (289, "FreeByteCounts"),
    (290, "GrayResponseUnit"),
    (291, "GrayResponseCurve"),
    (296, "ResolutionUnit"),
    (305, "Software"),
    (306, "DateTime"),
    (315, "Artist"),
    (316, "HostComputer"),
    (320, "ColorMap"),
    (338, "ExtraSamples"),
    (33432, "Copyright"),
];
