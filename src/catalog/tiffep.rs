//! TIFF/EP (ISO 12234-2) tags.

use crate::registry::TagSet;

use super::tag_set;

pub const SET_NAME: &str = "TIFF/EP";

pub fn tags() -> TagSet {
    tag_set(SET_NAME, 32768, 65535, TAGS, true)
}

const TAGS: &[(u16, &str)] = &[
    (33421, "CFARepeatPatternDim"),
    (33422, "CFAPattern"),
    (34859, "SelfTimeMode"),
    (37390, "FocalPlaneXResolution"),
    (37391, "FocalPlaneYResolution"),
    (37392, "FocalPlaneResolutionUnit"),
    (37398, "TIFF/EPStandardID"),
    (37399, "SensingMethod"),
];
