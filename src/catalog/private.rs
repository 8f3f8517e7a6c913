//! Registered private tags (32768 and up).
//!
//! This set is never locked. Vendor code adds its own tags to it through
//! [`Registry::private_tags`](crate::Registry::private_tags).

use crate::registry::{Tag, TagSet};

use super::exif::{EXIF_IFD_TAG, GPS_IFD_TAG, INTEROP_IFD_TAG};

pub const SET_NAME: &str = "Private";

pub fn tags() -> TagSet {
    // The Exif, GPS and Interoperability pointers live here as well
    let pointers = [
        (EXIF_IFD_TAG, "ExifIFD"),
        (GPS_IFD_TAG, "GPS IFD"),
        (INTEROP_IFD_TAG, "InteroperabilityIFD"),
    ];
    let all = TAGS
        .iter()
        .copied()
        .chain(pointers)
        .map(|(id, name)| Tag::new(id, name, None));
    TagSet::preloaded(SET_NAME, 32768..=65535, all, false)
}

const TAGS: &[(u16, &str)] = &[
    (32932, "Wang Annotation"),
    (33445, "MD FileTag"),
    (33446, "MD ScalePixel"),
    (33447, "MD ColorTable"),
    (33448, "MD LabName"),
    (33449, "MD SampleInfo"),
    (33450, "MD PrepDate"),
    (33451, "MD PrepTime"),
    (33452, "MD FileUnits"),
    (33723, "IPTC"),
    (33918, "INGR Packet Data Tag"),
    (33919, "INGR Flag Registers"),
    (34377, "Photoshop"),
    (34675, "ICC Profile"),
    (34908, "HylaFAX FaxRecvParams"),
    (34909, "HylaFAX FaxSubAddress"),
    (34910, "HylaFAX FaxRecvTime"),
    (37724, "ImageSourceData"),
    (42112, "GDAL_METADATA"),
    (42113, "GDAL_NODATA"),
    (50215, "Oce Scanjob Description"),
    (50216, "Oce Application Selector"),
    (50217, "Oce Identification Number"),
    (50218, "Oce ImageLogic Characteristics"),
    (50341, "EpsonPrintImageMatching"),
    (50784, "Alias Layer Metadata"),
];
