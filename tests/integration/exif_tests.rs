//! Exif and sub-directory integration tests.

use tiffwalk::{parse_exif, ByteOrder, Container, TiffError, TiffTag};

use super::test_utils::{IfdBuilder, TiffBuilder};

/// IFD0 -> Exif IFD -> GPS and Interoperability IFDs.
fn camera_file(order: ByteOrder, big: bool) -> Vec<u8> {
    TiffBuilder::new()
        .with_byte_order(order)
        .with_bigtiff(big)
        .add_ifd(
            IfdBuilder::new()
                .ascii(271, "Acme")
                .ascii(272, "Model 1")
                .pointer(34665, 1),
        )
        .add_ifd(
            IfdBuilder::new()
                .rational(33434, &[(10, 2500)])
                .rational(33437, &[(28, 10)])
                .short(34850, &[2])
                .pointer(34853, 2)
                .pointer(40965, 3)
                .detached(),
        )
        .add_ifd(
            IfdBuilder::new()
                .ascii(1, "N")
                .rational(2, &[(52, 1), (31, 1), (0, 1)])
                .detached(),
        )
        .add_ifd(IfdBuilder::new().ascii(1, "R98").detached())
        .build()
}

#[test]
fn test_exif_directories() {
    for big in [false, true] {
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            let container = Container::from_bytes(camera_file(order, big)).unwrap();
            // Detached directories stay out of the main chain
            assert_eq!(container.directories().len(), 1);

            let exif = parse_exif(&container).unwrap();

            let exposure = exif.exif.get_field(33434).unwrap();
            assert_eq!(exposure.tag().name(), "ExposureTime");
            assert_eq!(exposure.interpret().as_deref(), Some("1/250"));

            let f_number = exif.exif.get_field(33437).unwrap();
            assert_eq!(f_number.interpret().as_deref(), Some("f/2.8"));

            let program = exif.exif.get_field(34850).unwrap();
            assert_eq!(program.interpret().as_deref(), Some("Normal program"));

            let gps = exif.gps.expect("GPS IFD");
            assert_eq!(gps.get_field(1).unwrap().tag().name(), "GPSLatitudeRef");
            assert_eq!(gps.require::<String>(1).unwrap(), "N");
            assert_eq!(gps.get_field(2).unwrap().tag().name(), "GPSLatitude");
            assert_eq!(gps.get_field(2).unwrap().count(), 3);

            let interop = exif.interop.expect("Interoperability IFD");
            assert_eq!(
                interop.get_field(1).unwrap().tag().name(),
                "InteroperabilityIndex"
            );
            assert_eq!(interop.require::<String>(1).unwrap(), "R98");
        }
    }
}

#[test]
fn test_gps_pointer_in_ifd0() {
    let data = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .pointer(34665, 1)
                .pointer(34853, 2),
        )
        .add_ifd(IfdBuilder::new().short(34850, &[1]).detached())
        .add_ifd(IfdBuilder::new().ascii(1, "S").detached())
        .build();

    let container = Container::from_bytes(data).unwrap();
    let exif = parse_exif(&container).unwrap();
    assert_eq!(exif.gps.unwrap().require::<String>(1).unwrap(), "S");
    assert!(exif.interop.is_none());
}

#[test]
fn test_gps_pointer_beside_exif_pointer_in_ifd1() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(256, &[8]))
        .add_ifd(
            IfdBuilder::new()
                .short(256, &[4])
                .pointer(34665, 2)
                .pointer(34853, 3),
        )
        .add_ifd(IfdBuilder::new().short(34850, &[2]).detached())
        .add_ifd(IfdBuilder::new().ascii(1, "N").detached())
        .build();

    let container = Container::from_bytes(data).unwrap();
    assert_eq!(container.directories().len(), 2);
    assert!(!container.directories()[0].has_field(34853));

    let exif = parse_exif(&container).unwrap();
    assert_eq!(exif.exif.require::<u16>(34850).unwrap(), 2);
    assert_eq!(exif.gps.expect("GPS IFD").require::<String>(1).unwrap(), "N");
    assert!(exif.interop.is_none());
}

#[test]
fn test_broken_gps_pointer_is_skipped() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().pointer(34665, 1))
        .add_ifd(
            IfdBuilder::new()
                .short(34850, &[1])
                .long(34853, &[50_000])
                .detached(),
        )
        .build();

    let container = Container::from_bytes(data).unwrap();
    let exif = parse_exif(&container).unwrap();
    assert!(exif.gps.is_none());
    assert_eq!(
        exif.exif.get_field(34850).unwrap().interpret().as_deref(),
        Some("Manual")
    );
}

#[test]
fn test_broken_exif_pointer() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().long(34665, &[50_000]))
        .build();
    let container = Container::from_bytes(data).unwrap();
    assert!(parse_exif(&container).is_err());
}

#[test]
fn test_sub_ifds() {
    let data = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .short(256, &[1024])
                .pointers(TiffTag::SubIfds.as_u16(), &[Some(1), None, Some(2)]),
        )
        .add_ifd(IfdBuilder::new().short(256, &[512]).detached())
        .add_ifd(IfdBuilder::new().short(256, &[256]).detached())
        .build();

    let container = Container::from_bytes(data).unwrap();
    let ifd0 = &container.directories()[0];
    let subs = container
        .sub_directories(ifd0, TiffTag::SubIfds.as_u16(), container.registry().tags())
        .unwrap();

    let widths: Vec<u16> = subs.iter().map(|d| d.require(256).unwrap()).collect();
    assert_eq!(widths, vec![512, 256]);

    let none = container
        .sub_directories(ifd0, 34665, container.registry().tags())
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_sub_directory_does_not_follow_next() {
    let builder = TiffBuilder::new()
        .add_ifd(IfdBuilder::new())
        .add_ifd(IfdBuilder::new().short(256, &[1]).next_ifd(1).detached());
    let offsets = builder.offsets();
    let container = Container::from_bytes(builder.build()).unwrap();

    // The detached directory links to itself, but only it is parsed
    let sub = container
        .sub_directory(offsets[1], container.registry().tags())
        .unwrap();
    assert_eq!(sub.next_offset(), offsets[1]);
    assert!(matches!(
        sub.require::<u16>(257),
        Err(TiffError::MissingTag(257))
    ));
}
