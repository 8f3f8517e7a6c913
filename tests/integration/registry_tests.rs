//! Registry integration tests.
//!
//! Tests verify:
//! - Field type re-registration rules
//! - Locked sets refuse registrations without changing
//! - Unknown ids resolve to placeholders
//! - Caller-registered tags show up in parsed files
//! - Lookups stay consistent while a set is being extended

use std::sync::Arc;

use tiffwalk::catalog::field_types;
use tiffwalk::{
    ByteOrder, ByteReader, Container, FieldType, FieldTypeSet, FieldTypeSpace, ParseOptions,
    Registry, RegistryError, RegistryOptions, Tag, TagSet, TagSpace, Value,
};

use super::test_utils::{IfdBuilder, TiffBuilder};

fn decode_raw(bytes: &[u8], _: ByteOrder) -> Value {
    Value::Raw(bytes.to_vec())
}

fn repr_len(element: &[u8], _: ByteOrder) -> String {
    format!("<{} bytes>", element.len())
}

fn repr_dec(element: &[u8], _: ByteOrder) -> String {
    element.iter().map(u8::to_string).collect::<Vec<_>>().join(".")
}

// =============================================================================
// Field types
// =============================================================================

#[test]
fn test_field_type_size_conflict() {
    let set = Arc::new(FieldTypeSet::new("Vendor"));
    set.register(FieldType::new(200, "PAIR", 2, false, decode_raw, repr_len))
        .unwrap();

    let err = set
        .register(FieldType::new(200, "PAIR", 4, false, decode_raw, repr_len))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::FieldTypeConflict {
            id: 200,
            existing_size: 2,
            size: 4,
            ..
        }
    ));

    let space = FieldTypeSpace::new("Test");
    space.register_set(set);
    let pair = space.get_field_type(200);
    assert_eq!(pair.name(), "PAIR");
    assert_eq!(pair.size(), 2);
}

#[test]
fn test_identical_reregistration_swaps_formatter() {
    let set = Arc::new(FieldTypeSet::new("Vendor"));
    set.register(FieldType::new(200, "PAIR", 2, false, decode_raw, repr_len))
        .unwrap();
    let space = FieldTypeSpace::new("Test");
    space.register_set(Arc::clone(&set));
    assert_eq!(space.get_field_type(200).repr(&[1, 2], ByteOrder::LittleEndian), "<2 bytes>");

    set.register(FieldType::new(200, "PAIR", 2, false, decode_raw, repr_dec))
        .unwrap();
    assert_eq!(space.get_field_type(200).repr(&[1, 2], ByteOrder::LittleEndian), "1.2");
}

#[test]
fn test_vendor_field_type_in_file() {
    let registry = Registry::default();
    let vendor = Arc::new(FieldTypeSet::new("Vendor"));
    vendor
        .register(FieldType::new(200, "PAIR", 2, false, decode_raw, repr_dec))
        .unwrap();
    registry.field_types().register_set(vendor);

    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().raw(40000, 200, 3, vec![1, 2, 3, 4, 5, 6]))
        .build();
    let container = Container::parse(
        ByteReader::from_bytes(data),
        &registry,
        &ParseOptions::default(),
    )
    .unwrap();

    let field = container.directories()[0].get_field(40000).unwrap();
    assert_eq!(field.field_type().name(), "PAIR");
    assert_eq!(field.bytes().len(), 6);
    assert_ne!(field.offset(), 0);
    assert_eq!(field.values_repr(), vec!["1.2", "3.4", "5.6"]);
}

#[test]
fn test_provisional_sizes() {
    let registry = Registry::with_options(&RegistryOptions {
        unicode_size: 4,
        complex_size: 16,
    });
    let types = registry.field_types();
    assert_eq!(types.get_field_type(field_types::UNICODE).size(), 4);
    assert_eq!(types.get_field_type(field_types::COMPLEX).size(), 16);

    let default = Registry::default();
    assert_eq!(
        default.field_types().get_field_type(field_types::UNICODE).size(),
        2
    );
}

#[test]
fn test_standard_field_types() {
    let registry = Registry::default();
    let expected = [
        (1, "BYTE", 1),
        (2, "ASCII", 1),
        (3, "SHORT", 2),
        (4, "LONG", 4),
        (5, "RATIONAL", 8),
        (6, "SBYTE", 1),
        (7, "UNDEFINED", 1),
        (8, "SSHORT", 2),
        (9, "SLONG", 4),
        (10, "SRATIONAL", 8),
        (11, "FLOAT", 4),
        (12, "DOUBLE", 8),
        (13, "IFD", 4),
        (16, "LONG8", 8),
        (17, "SLONG8", 8),
        (18, "IFD8", 8),
    ];
    for (id, name, size) in expected {
        let ft = registry.field_types().get_field_type(id);
        assert_eq!((ft.id(), ft.name(), ft.size()), (id, name, size));
    }
}

// =============================================================================
// Locking and placeholders
// =============================================================================

#[test]
fn test_locked_set_is_unchanged() {
    let set = TagSet::new("Vendor", 50000, 50100);
    set.register(Tag::new(50001, "VendorA", None)).unwrap();
    set.lock();

    assert!(matches!(
        set.register(Tag::new(50002, "VendorB", None)),
        Err(RegistryError::Locked { .. })
    ));
    assert!(matches!(
        set.register(Tag::new(50001, "VendorA", None)),
        Err(RegistryError::Locked { .. })
    ));
    assert_eq!(set.ids(), vec![50001]);
    assert_eq!(set.get(50001).unwrap().name(), "VendorA");
}

#[test]
fn test_out_of_range_registration() {
    let set = TagSet::new("Vendor", 50000, 50100);
    assert!(matches!(
        set.register(Tag::new(49999, "TooLow", None)),
        Err(RegistryError::OutOfRange { id: 49999, .. })
    ));
    assert!(set.is_empty());
}

#[test]
fn test_placeholders_match_query() {
    let registry = Registry::default();
    for id in [0u16, 19, 999, 65535] {
        let ft = registry.field_types().get_field_type(id);
        assert_eq!(ft.id(), id);
        assert_eq!(ft.name(), format!("UNKNOWN_FIELDTYPE_{}", id));
    }

    let tags = TagSpace::new("Empty");
    for id in [1u16, 256, 65535] {
        let tag = tags.get_tag(id);
        assert_eq!(tag.id(), id);
        assert_eq!(tag.name(), format!("UNKNOWN_TAG_{}", id));
    }
}

// =============================================================================
// Spaces
// =============================================================================

#[test]
fn test_conflicting_sets_last_registered_wins() {
    let a = TagSet::new("A", 60000, 60010);
    a.register(Tag::new(60000, "FromA", None)).unwrap();
    let b = TagSet::new("B", 60000, 60010);
    b.register(Tag::new(60000, "FromB", None)).unwrap();

    let space = TagSpace::new("Merged");
    space.register_set(Arc::new(a));
    space.register_set(Arc::new(b));
    assert_eq!(space.get_tag(60000).name(), "FromB");
    assert_eq!(space.tag_set_name_for(60000).as_deref(), Some("B"));
    assert_eq!(space.tag_set_names(), vec!["A", "B"]);
}

#[test]
fn test_private_tag_visible_after_parse_setup() {
    let registry = Registry::default();
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(65100, &[1]))
        .build();

    let before = Container::parse(
        ByteReader::from_bytes(data.clone()),
        &registry,
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(
        before.directories()[0].get_field(65100).unwrap().tag().name(),
        "UNKNOWN_TAG_65100"
    );

    registry
        .private_tags()
        .register(Tag::new(65100, "AcmeCalibration", None))
        .unwrap();
    let after = Container::parse(
        ByteReader::from_bytes(data),
        &registry,
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(
        after.directories()[0].get_field(65100).unwrap().tag().name(),
        "AcmeCalibration"
    );
}

#[test]
fn test_builtin_tag_spaces() {
    let registry = Registry::default();
    assert_eq!(
        registry.tag_space_names(),
        vec!["Default", "Exif", "GPS", "Interoperability"]
    );

    let gps = registry.tag_space("GPS").unwrap();
    assert_eq!(gps.get_tag(2).name(), "GPSLatitude");
    assert_eq!(registry.tags().get_tag(256).name(), "ImageWidth");
    assert_eq!(registry.tags().get_tag(33437).name(), "FNumber");
}

#[test]
fn test_custom_default_space() {
    let set = TagSet::new("Mini", 0, 65535);
    set.register(Tag::new(256, "Width", None)).unwrap();
    let space = TagSpace::new("Mini");
    space.register_set(Arc::new(set));

    let registry = Registry::default().with_tags(Arc::new(space));
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(256, &[1]).short(257, &[1]))
        .build();
    let container = Container::parse(
        ByteReader::from_bytes(data),
        &registry,
        &ParseOptions::default(),
    )
    .unwrap();

    let ifd0 = &container.directories()[0];
    assert_eq!(ifd0.get_field(256).unwrap().tag().name(), "Width");
    assert_eq!(ifd0.get_field(257).unwrap().tag().name(), "UNKNOWN_TAG_257");
}

#[test]
fn test_lookups_while_registering() {
    const FIRST: u16 = 60000;
    const COUNT: u16 = 64;

    let registry = Registry::default();
    let tags = registry.tags();
    let types = registry.field_types();

    std::thread::scope(|s| {
        s.spawn(|| {
            for id in FIRST..FIRST + COUNT {
                registry
                    .private_tags()
                    .register(Tag::new(id, format!("Vendor{id}"), None))
                    .unwrap();
            }
        });

        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    for id in FIRST..FIRST + COUNT {
                        let tag = tags.get_tag(id);
                        assert_eq!(tag.id(), id);
                        let name = tag.name();
                        assert!(
                            name == format!("UNKNOWN_TAG_{id}") || name == format!("Vendor{id}"),
                            "unexpected name {name}"
                        );
                        assert_eq!(types.get_field_type(3).name(), "SHORT");
                    }
                }
            });
        }
    });

    for id in FIRST..FIRST + COUNT {
        assert_eq!(tags.get_tag(id).name(), format!("Vendor{id}"));
        assert_eq!(tags.tag_set_name_for(id).as_deref(), Some("Private"));
    }
}
