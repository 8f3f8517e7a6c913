//! GeoTIFF tags.

use crate::registry::TagSet;

use super::tag_set;

pub const SET_NAME: &str = "GeoTIFF";

pub fn tags() -> TagSet {
    tag_set(SET_NAME, 32768, 65535, TAGS, true)
}

const TAGS: &[(u16, &str)] = &[
    (33550, "ModelPixelScaleTag"),
    (34264, "ModelTransformationTag"),
    (33922, "ModelTiepointTag"),
    (34735, "GeoKeyDirectoryTag"),
    (34736, "GeoDoubleParamsTag"),
    (34737, "GeoAsciiParamsTag"),
    (33920, "IntergraphIrasBMatrixTag"),
];
