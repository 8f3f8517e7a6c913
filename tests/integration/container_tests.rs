//! Container parsing integration tests.
//!
//! Tests verify:
//! - Classic and BigTIFF files in both byte orders walk to the same model
//! - Inline and out-of-line values resolve to the bytes in the file
//! - Malformed chains end in errors instead of hangs
//! - Streamed and seekable sources parse identically

use std::io::{Seek, SeekFrom, Write};
use std::sync::Arc;

use tiffwalk::{
    ByteOrder, ByteReader, ClassicDialect, Container, ParseOptions, Registry, TiffError, Value,
};

use super::test_utils::{is_tiff_magic, IfdBuilder, TiffBuilder};

fn parse(data: Vec<u8>) -> Result<Container, TiffError> {
    Container::from_bytes(data)
}

// =============================================================================
// Basic files
// =============================================================================

#[test]
fn test_empty_directory_little_endian() {
    let data = TiffBuilder::new().add_ifd(IfdBuilder::new()).build();
    assert_eq!(
        data,
        vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, 0, 0, 0, 0, 0, 0]
    );

    let container = parse(data).unwrap();
    assert_eq!(container.byte_order(), ByteOrder::LittleEndian);
    assert_eq!(container.directories().len(), 1);
    assert!(container.directories()[0].fields().is_empty());
    assert_eq!(container.directories()[0].next_offset(), 0);
}

#[test]
fn test_inline_short_big_endian() {
    let data = TiffBuilder::new()
        .with_byte_order(ByteOrder::BigEndian)
        .add_ifd(IfdBuilder::new().short(256, &[100]))
        .build();
    assert_eq!(&data[..4], b"MM\x00\x2A");
    assert!(is_tiff_magic(&data));

    let container = parse(data).unwrap();
    let field = container.directories()[0].get_field(256).unwrap();
    assert_eq!(field.tag().id(), 256);
    assert_eq!(field.tag().name(), "ImageWidth");
    assert_eq!(field.get::<u16>().unwrap(), 100);
    assert_eq!(field.offset(), 0);
    assert_eq!(field.bytes().as_ref(), &[0x00, 0x64]);
}

#[test]
fn test_bigtiff_out_of_line_value() {
    let values = [1u64, 2, 3];
    let data = TiffBuilder::new()
        .with_bigtiff(true)
        .add_ifd(IfdBuilder::new().long8(324, &values))
        .build();

    let container = parse(data.clone()).unwrap();
    assert!(container.header().is_bigtiff());
    assert_eq!(container.header().first_ifd_offset, 16);

    let field = container.directories()[0].get_field(324).unwrap();
    assert_eq!(field.count(), 3);

    // The pointer in the entry's value slot
    let slot = 16 + 8 + 12;
    let pointer = u64::from_le_bytes(data[slot..slot + 8].try_into().unwrap());
    assert_eq!(field.offset(), pointer);

    let start = pointer as usize;
    assert_eq!(field.bytes().as_ref(), &data[start..start + 24]);
    assert_eq!(field.get::<Vec<u64>>().unwrap(), values.to_vec());
}

#[test]
fn test_same_model_across_layouts() {
    let ifd = || {
        IfdBuilder::new()
            .short(256, &[640])
            .long(257, &[480])
            .ascii(270, "a test image")
            .rational(282, &[(300, 1)])
    };

    let mut parsed = Vec::new();
    for big in [false, true] {
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            let data = TiffBuilder::new()
                .with_byte_order(order)
                .with_bigtiff(big)
                .add_ifd(ifd())
                .build();
            parsed.push(parse(data).unwrap());
        }
    }

    for container in &parsed {
        let ifd0 = &container.directories()[0];
        assert_eq!(ifd0.tag_ids(), vec![256, 257, 270, 282]);
        assert_eq!(ifd0.require::<u32>(256).unwrap(), 640);
        assert_eq!(ifd0.require::<u32>(257).unwrap(), 480);
        assert_eq!(ifd0.require::<String>(270).unwrap(), "a test image");
        assert_eq!(ifd0.get_field(282).unwrap().values_repr(), vec!["300/1"]);
    }
}

#[test]
fn test_three_directory_chain() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(256, &[1]))
        .add_ifd(IfdBuilder::new().short(256, &[2]))
        .add_ifd(IfdBuilder::new().short(256, &[3]))
        .build();

    let container = parse(data).unwrap();
    let widths: Vec<u16> = container
        .directories()
        .iter()
        .map(|d| d.require(256).unwrap())
        .collect();
    assert_eq!(widths, vec![1, 2, 3]);
    assert_eq!(container.directories()[2].next_offset(), 0);
}

#[test]
fn test_unknown_tag_and_type() {
    let data = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .raw(9999, 9999, 3, vec![7, 8, 9])
                .short(65000, &[5]),
        )
        .build();

    let container = parse(data).unwrap();
    let ifd0 = &container.directories()[0];

    let odd = ifd0.get_field(9999).unwrap();
    assert_eq!(odd.tag().name(), "UNKNOWN_TAG_9999");
    assert_eq!(odd.field_type().name(), "UNKNOWN_FIELDTYPE_9999");
    assert_eq!(odd.field_type().size(), 1);
    assert_eq!(odd.bytes().as_ref(), &[7, 8, 9]);
    assert_eq!(odd.value(), &Value::Raw(vec![7, 8, 9]));

    assert_eq!(ifd0.get_field(65000).unwrap().as_u64(), Some(5));
}

#[test]
fn test_display_lines() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(256, &[100]).ascii(271, "Acme"))
        .build();
    let container = parse(data).unwrap();
    let fields = container.directories()[0].fields();

    assert_eq!(
        fields[0].to_string(),
        "<Tag: (0x0100/00256) ImageWidth\tType: (03) SHORT\tCount: 1\tOffset: 0\tValue: 100>"
    );
    assert!(fields[1].to_string().contains("Value: \"Acme\">"));
}

// =============================================================================
// Structural properties
// =============================================================================

#[test]
fn test_directory_byte_span() {
    let builder = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(256, &[1]).short(257, &[2]))
        .add_ifd(IfdBuilder::new().ascii(270, "second directory"));
    let offsets = builder.offsets();
    let container = parse(builder.build()).unwrap();

    let first = &container.directories()[0];
    assert_eq!(first.byte_span(), 2 + 2 * 12 + 4);
    // No out-of-line data, so the second directory follows immediately
    assert_eq!(first.offset() + first.byte_span(), offsets[1]);

    let big = TiffBuilder::new()
        .with_bigtiff(true)
        .add_ifd(IfdBuilder::new().short(256, &[1]))
        .build();
    let container = parse(big).unwrap();
    assert_eq!(container.directories()[0].byte_span(), 8 + 20 + 8);
}

#[test]
fn test_resolved_lengths_match_type_size() {
    let data = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .short(258, &[8, 8, 8])
                .long(273, &[8, 16])
                .rational(282, &[(72, 1)])
                .ascii(305, "tiffwalk")
                .raw(33723, 7, 5, vec![1, 2, 3, 4, 5]),
        )
        .build();
    let size = data.len() as u64;
    let container = parse(data).unwrap();

    for field in container.directories()[0].fields() {
        let expected = field.count() * field.field_type().size();
        assert_eq!(field.bytes().len() as u64, expected, "{}", field);
        if expected <= 4 {
            assert_eq!(field.offset(), 0);
        } else {
            assert!(field.offset() + expected <= size);
        }
    }
}

#[test]
fn test_duplicate_tags_last_wins() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(256, &[1]).short(256, &[2]))
        .build();
    let container = parse(data).unwrap();
    let ifd0 = &container.directories()[0];
    assert_eq!(ifd0.fields().len(), 2);
    assert_eq!(ifd0.require::<u16>(256).unwrap(), 2);
}

// =============================================================================
// Malformed chains
// =============================================================================

#[test]
fn test_self_referencing_directory() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(256, &[1]).next_ifd(0))
        .build();
    match parse(data) {
        Err(TiffError::CircularDirectoryChain { offset, index }) => {
            assert_eq!(offset, 8);
            assert_eq!(index, 0);
        }
        other => panic!("expected a circular chain, got {:?}", other),
    }
}

#[test]
fn test_cycle_through_later_directory() {
    let builder = TiffBuilder::new()
        .with_bigtiff(true)
        .add_ifd(IfdBuilder::new())
        .add_ifd(IfdBuilder::new())
        .add_ifd(IfdBuilder::new().next_ifd(1));
    let offsets = builder.offsets();
    match parse(builder.build()) {
        Err(TiffError::CircularDirectoryChain { offset, index }) => {
            assert_eq!(offset, offsets[1]);
            assert_eq!(index, 2);
        }
        other => panic!("expected a circular chain, got {:?}", other),
    }
}

#[test]
fn test_next_offset_past_end() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().next_offset(10_000))
        .build();
    let err = parse(data).unwrap_err();
    assert!(matches!(
        err,
        TiffError::Directory {
            index: 1,
            offset: 10_000,
            ..
        }
    ));
}

#[test]
fn test_directory_limit() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new())
        .add_ifd(IfdBuilder::new())
        .add_ifd(IfdBuilder::new())
        .build();
    let options = ParseOptions {
        max_directories: 2,
        ..ParseOptions::default()
    };
    let err = Container::parse(ByteReader::from_bytes(data), &Registry::default(), &options)
        .unwrap_err();
    assert!(matches!(err, TiffError::TooManyDirectories { limit: 2 }));
}

#[test]
fn test_value_pointer_out_of_bounds() {
    let mut data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().ascii(270, "out of line text"))
        .build();
    // Point the value at the end of the file
    let slot = 8 + 2 + 8;
    let end = data.len() as u32;
    data[slot..slot + 4].copy_from_slice(&end.to_le_bytes());

    match parse(data) {
        Err(TiffError::Directory { index: 0, source, .. }) => {
            assert!(matches!(*source, TiffError::ValueRead { tag: 270, .. }));
        }
        other => panic!("expected a value read error, got {:?}", other),
    }
}

#[test]
fn test_bad_headers() {
    assert!(matches!(
        parse(b"XX\x2A\x00\x08\x00\x00\x00".to_vec()),
        Err(TiffError::InvalidByteOrder(_))
    ));
    assert!(matches!(
        parse(b"II\x2C\x00\x08\x00\x00\x00".to_vec()),
        Err(TiffError::UnsupportedVersion(44))
    ));
    assert!(matches!(
        parse(b"II\x2A\x00\x04\x00\x00\x00".to_vec()),
        Err(TiffError::MalformedHeader { .. })
    ));
    assert!(matches!(
        parse(b"II\x2B\x00\x04\x00\x00\x00\x10\x00\x00\x00\x00\x00\x00\x00".to_vec()),
        Err(TiffError::MalformedHeader { .. })
    ));
    assert!(matches!(
        parse(b"II\x2A".to_vec()),
        Err(TiffError::TruncatedRead { .. }) | Err(TiffError::Io(_))
    ));
}

// =============================================================================
// Dialects
// =============================================================================

#[test]
fn test_tiff85_needs_registration() {
    let data = TiffBuilder::new()
        .with_version(0x55)
        .add_ifd(IfdBuilder::new().short(256, &[9]))
        .build();

    assert!(matches!(
        parse(data.clone()),
        Err(TiffError::UnsupportedVersion(0x55))
    ));

    let registry = Registry::default();
    registry
        .versions()
        .register(Arc::new(ClassicDialect::tiff85()));
    let container = Container::parse(
        ByteReader::from_bytes(data),
        &registry,
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(container.header().version, 0x55);
    assert_eq!(container.directories()[0].require::<u16>(256).unwrap(), 9);
}

// =============================================================================
// Sources
// =============================================================================

fn chain_file() -> Vec<u8> {
    TiffBuilder::new()
        .with_byte_order(ByteOrder::BigEndian)
        .add_ifd(IfdBuilder::new().short(256, &[1]).ascii(270, "first"))
        .add_ifd(IfdBuilder::new().short(256, &[2]).ascii(270, "second"))
        .build()
}

fn summary(container: &Container) -> Vec<String> {
    container
        .directories()
        .iter()
        .flat_map(|d| d.fields().iter().map(|f| f.to_string()))
        .collect()
}

#[test]
fn test_stream_matches_memory() {
    let data = chain_file();
    let from_memory = parse(data.clone()).unwrap();

    let reader = ByteReader::from_stream(std::io::Cursor::new(data));
    let from_stream =
        Container::parse(reader, &Registry::default(), &ParseOptions::default()).unwrap();

    assert_eq!(summary(&from_memory), summary(&from_stream));
}

#[test]
fn test_file_matches_memory() {
    let data = chain_file();
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&data).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let reader = ByteReader::from_seekable(file).unwrap();
    let from_file =
        Container::parse(reader, &Registry::default(), &ParseOptions::default()).unwrap();
    assert_eq!(summary(&from_file), summary(&parse(data).unwrap()));
}

#[test]
fn test_open_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&chain_file()).unwrap();
    file.flush().unwrap();

    let container = Container::open(file.path()).unwrap();
    assert_eq!(container.directories().len(), 2);
    assert!(container
        .reader()
        .identifier()
        .contains(&*file.path().display().to_string()));

    let missing = Container::open(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(TiffError::Io(_))));
}
