//! Exif, GPS and Interoperability tags.
//!
//! The Exif set is merged into the default space and also forms the "Exif"
//! space together with Baseline and Extended. GPS and Interoperability tags
//! reuse small ids, so they only live in their own spaces.

use crate::format::tiff::{Field, Value};
use crate::registry::{Tag, TagSet};

use super::tag_set;

pub const EXIF_SET: &str = "Exif";
pub const GPS_SET: &str = "GPS";
pub const INTEROP_SET: &str = "Interoperability";

pub const EXIF_SPACE: &str = "Exif";
pub const GPS_SPACE: &str = "GPS";
pub const INTEROP_SPACE: &str = "Interoperability";

/// Pointer to the Exif IFD.
pub const EXIF_IFD_TAG: u16 = 34665;
/// Pointer to the GPS IFD.
pub const GPS_IFD_TAG: u16 = 34853;
/// Pointer to the Interoperability IFD.
pub const INTEROP_IFD_TAG: u16 = 40965;

pub const EXPOSURE_TIME_TAG: u16 = 33434;
pub const F_NUMBER_TAG: u16 = 33437;
pub const EXPOSURE_PROGRAM_TAG: u16 = 34850;

pub fn exif_tags() -> TagSet {
    let interpreted = [
        Tag::new(EXPOSURE_TIME_TAG, "ExposureTime", Some(exposure_time)),
        Tag::new(F_NUMBER_TAG, "FNumber", Some(f_number)),
        Tag::new(EXPOSURE_PROGRAM_TAG, "ExposureProgram", Some(exposure_program)),
        Tag::new(EXIF_IFD_TAG, "ExifIFD", None),
        Tag::new(GPS_IFD_TAG, "GPS IFD", None),
        Tag::new(INTEROP_IFD_TAG, "InteroperabilityIFD", None),
    ];
    let all = EXIF_TAGS
        .iter()
        .map(|&(id, name)| Tag::new(id, name, None))
        .chain(interpreted);
    TagSet::preloaded(EXIF_SET, 0..=u16::MAX, all, true)
}

pub fn gps_tags() -> TagSet {
    tag_set(GPS_SET, 0, u16::MAX, GPS_TAGS, true)
}

pub fn interop_tags() -> TagSet {
    tag_set(INTEROP_SET, 0, u16::MAX, INTEROP_TAGS, true)
}

// =============================================================================
// Interpreters
// =============================================================================

/// Exposure time as a reduced fraction, e.g. "1/250".
fn exposure_time(field: &Field) -> String {
    match field.value() {
        Value::Rational(r) if !r.is_empty() => r[0].reduced().to_string(),
        _ => field.values_repr().join(", "),
    }
}

/// F-stop as "f/N" with up to two decimals: 2.80 becomes "f/2.8", 4.00 "f/4".
fn f_number(field: &Field) -> String {
    let Some(value) = field.value().as_f64_vec().and_then(|v| v.first().copied()) else {
        return String::new();
    };
    let formatted = format!("{value:.2}");
    format!("f/{}", formatted.trim_end_matches('0').trim_end_matches('.'))
}

const EXPOSURE_PROGRAMS: [&str; 9] = [
    "Not defined",
    "Manual",
    "Normal program",
    "Aperture priority",
    "Shutter priority",
    "Creative program",
    "Action program",
    "Portrait mode",
    "Landscape mode",
];

fn exposure_program(field: &Field) -> String {
    field
        .value()
        .first_u64()
        .and_then(|p| EXPOSURE_PROGRAMS.get(p as usize))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

const GPS_TAGS: &[(u16, &str)] = &[
    (0, "GPSVersionID"),
    (1, "GPSLatitudeRef"),
    (2, "GPSLatitude"),
    (3, "GPSLongitudeRef"),
    (4, "GPSLongitude"),
    (5, "GPSAltitudeRef"),
    (6, "GPSAltitude"),
    (7, "GPSTimeStamp"),
    (8, "GPSSatellites"),
    (9, "GPSStatus"),
    (10, "GPSMeasureMode"),
    (11, "GPSDOP"),
    (12, "GPSSpeedRef"),
    (13, "GPSSpeed"),
    (14, "GPSTrackRef"),
    (15, "GPSTrack"),
    (16, "GPSImgDirectionRef"),
    (17, "GPSImgDirection"),
    (18, "GPSMapDatum"),
    (19, "GPSDestLatitudeRef"),
    (20, "GPSDestLatitude"),
    (21, "GPSDestLongitudeRef"),
    (22, "GPSDestLongitude"),
    (23, "GPSDestBearingRef"),
    (24, "GPSDestBearing"),
    (25, "GPSDestDistanceRef"),
    (26, "GPSDestDistance"),
    (27, "GPSProcessingMethod"),
    (28, "GPSAreaInformation"),
    (29, "GPSDateStamp"),
    (30, "GPSDifferential"),
];

const INTEROP_TAGS: &[(u16, &str)] = &[
    (1, "InteroperabilityIndex"),
    (2, "InteroperabilityVersion"),
    (4096, "RelatedImageFileFormat"),
    (4097, "RelatedImageWidth"),
    (4098, "RelatedImageLength"),
];

const EXIF_TAGS: &[(u16, &str)] = &[
    (34852, "SpectralSensitivity"),
    (34855, "ISOSpeedRatings"),
    (34856, "OECF"),
    (34864, "SensitivityType"),
    (34866, "RecommendedExposureIndex"),
    (36864, "ExifVersion"),
    (36867, "DateTimeOriginal"),
    (36868, "DateTimeDigitized"),
    (37121, "ComponentsConfiguration"),
    (37122, "CompressedBitsPerPixel"),
    (37377, "ShutterSpeedValue"),
    (37378, "ApertureValue"),
    (37379, "BrightnessValue"),
    (37380, "ExposureBiasValue"),
    (37381, "MaxApertureValue"),
    (37382, "SubjectDistance"),
    (37383, "MeteringMode"),
    (37384, "LightSource"),
    (37385, "Flash"),
    (37386, "FocalLength"),
    (37396, "SubjectArea"),
    (37500, "MakerNote"),
    (37510, "UserComment"),
    (37520, "SubsecTime"),
    (37521, "SubsecTimeOriginal"),
    (37522, "SubsecTimeDigitized"),
    (40960, "FlashpixVersion"),
    (40961, "ColorSpace"),
    (40962, "PixelXDimension"),
    (40963, "PixelYDimension"),
    (40964, "RelatedSoundFile"),
    (41483, "FlashEnergy"),
    (41484, "SpatialFrequencyResponse"),
    (41486, "FocalPlaneXResolution"),
    (41487, "FocalPlaneYResolution"),
    (41488, "FocalPlaneResolutionUnit"),
    (41492, "SubjectLocation"),
    (41493, "ExposureIndex"),
    (41495, "SensingMethod"),
    (41728, "FileSource"),
    (41729, "SceneType"),
    (41730, "CFAPattern"),
    (41985, "CustomRendered"),
    (41986, "ExposureMode"),
    (41987, "WhiteBalance"),
    (41988, "DigitalZoomRatio"),
    (41989, "FocalLengthIn35mmFilm"),
    (41990, "SceneCaptureType"),
    (41991, "GainControl"),
    (41992, "Contrast"),
    (41993, "Saturation"),
    (41994, "Sharpness"),
    (41995, "DeviceSettingDescription"),
    (41996, "SubjectDistanceRange"),
    (42016, "ImageUniqueID"),
    (42032, "CameraOwnerName"),
    (42033, "BodySerialNumber"),
    (42034, "LensSpecification"),
    (42035, "LensMake"),
    (42036, "LensModel"),
    (42037, "LensSerialNumber"),
    (18246, "Rating"),
];
