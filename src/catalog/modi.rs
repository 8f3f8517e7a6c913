//! Microsoft Office Document Imaging tags.

use crate::registry::TagSet;

use super::tag_set;

pub const SET_NAME: &str = "MODI";

pub fn tags() -> TagSet {
    tag_set(SET_NAME, 32768, 65535, TAGS, true)
}

const TAGS: &[(u16, &str)] = &[
    (37679, "MODIText"),
    (37680, "MODIOLEPropertySetStorage"),
    (37681, "MODIPositioning"),
];
