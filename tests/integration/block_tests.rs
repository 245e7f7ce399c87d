//! Block integration tests.
//!
//! Tests verify:
//! - Tags resolve by name or number, and ambiguity is reported
//! - Writes are validated before anything is stored
//! - Fields loaded from disk decode with the right type
//! - Removal is idempotent

use metainfo::model::exif::{EXIF_RECORD, IMAGE_RECORD, THUMBNAIL_RECORD};
use metainfo::model::iptc::{APPLICATION_RECORD, ENVELOPE_RECORD};
use metainfo::{
    Block, BlockConfig, ByteOrder, CodecError, CountConstraint, DataType, Rational, RecordRef,
    SRational, TagError, TagRef, TagWrite, Value,
};

use super::test_utils::{camera_exif, init_tracing, BYTE_ORDERS};

// =============================================================================
// Write Then Read
// =============================================================================

#[test]
fn test_model_write_then_read() {
    init_tracing();

    for order in BYTE_ORDERS {
        let mut block = Block::exif(&BlockConfig::new(order));
        block
            .set_tag(272u32, Some(IMAGE_RECORD.into()), TagWrite::payload("Canon"))
            .unwrap();
        assert_eq!(
            block.get_tag(272u32, Some(IMAGE_RECORD.into()), None).unwrap(),
            Some(Value::Ascii(vec!["Canon".to_string()]))
        );
        assert_eq!(
            block.get_tag("Model", None, None).unwrap(),
            Some(Value::Ascii(vec!["Canon".to_string()]))
        );
    }
}

#[test]
fn test_multi_type_tag_keeps_written_type() {
    let mut block = Block::exif(&BlockConfig::default());
    block
        .set_tag(
            "PixelXDimension",
            None,
            TagWrite::payload(100_000u32).with_type(DataType::Long),
        )
        .unwrap();
    assert_eq!(
        block.get_tag("PixelXDimension", None, None).unwrap(),
        Some(Value::Long(vec![100_000]))
    );

    // Primary type is SHORT, which cannot hold the value.
    let err = block
        .set_tag("PixelYDimension", None, TagWrite::payload(100_000u32))
        .unwrap_err();
    assert!(matches!(
        err,
        TagError::Codec(CodecError::EncodingRange { data_type: DataType::Short, .. })
    ));
}

#[test]
fn test_signed_rational_field() {
    let mut block = Block::exif(&BlockConfig::new(ByteOrder::LittleEndian));
    block
        .set_tag("ExposureBiasValue", None, TagWrite::payload(SRational::new(-2, 3)))
        .unwrap();
    assert_eq!(
        block.get_tag("ExposureBiasValue", None, None).unwrap(),
        Some(Value::SRational(vec![SRational::new(-2, 3)]))
    );
}

#[test]
fn test_field_bytes_follow_byte_order() {
    let little = camera_exif(ByteOrder::LittleEndian);
    let big = camera_exif(ByteOrder::BigEndian);

    let width = |block: &Block| {
        block
            .record(&RecordRef::Number(IMAGE_RECORD))
            .unwrap()
            .raw_field(256)
            .unwrap()
            .data
            .to_vec()
    };
    // 4368 = 0x1110
    assert_eq!(width(&little), vec![0x10, 0x11]);
    assert_eq!(width(&big), vec![0x11, 0x10]);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_count_violation_leaves_block_unchanged() {
    let mut block = Block::exif(&BlockConfig::default());
    let err = block
        .set_tag("Orientation", Some(IMAGE_RECORD.into()), TagWrite::payload(vec![1u16, 2]))
        .unwrap_err();
    assert_eq!(
        err,
        TagError::CountMismatch {
            tag: 274,
            count: 2,
            expected: CountConstraint::Exact(1),
        }
    );
    assert!(!block.has_tags());
    assert_eq!(block.get_tag(272u32, Some(IMAGE_RECORD.into()), None), Ok(None));
}

#[test]
fn test_failed_overwrite_keeps_old_value() {
    let mut block = camera_exif(ByteOrder::BigEndian);
    let err = block
        .set_tag("Model", None, TagWrite::payload(vec![1u16]))
        .unwrap_err();
    assert!(matches!(err, TagError::Codec(CodecError::InvalidInput { .. })));
    assert_eq!(
        block.get_tag("Model", None, None).unwrap(),
        Some(Value::Ascii(vec!["Canon EOS 5D".to_string()]))
    );
}

#[test]
fn test_type_not_allowed() {
    let mut block = Block::exif(&BlockConfig::default());
    let err = block
        .set_tag(
            "XResolution",
            Some("Image".into()),
            TagWrite::payload(72u16).with_type(DataType::Short),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        TagError::TypeMismatch { tag: 282, data_type: DataType::Short, .. }
    ));
}

#[test]
fn test_declared_count_checked() {
    let mut block = Block::exif(&BlockConfig::default());
    let resolution = Rational::new(300, 1);
    block
        .set_tag("XResolution", Some("Image".into()), TagWrite::payload(resolution).with_count(1))
        .unwrap();
    let err = block
        .set_tag("YResolution", Some("Image".into()), TagWrite::payload(resolution).with_count(2))
        .unwrap_err();
    assert!(matches!(err, TagError::CountMismatch { tag: 283, count: 1, .. }));
}

#[test]
fn test_ascii_count_includes_terminator() {
    let mut block = Block::exif(&BlockConfig::default());
    block
        .set_tag("DateTime", None, TagWrite::payload("2024:01:31 12:00:00"))
        .unwrap();
    let err = block
        .set_tag("DateTime", None, TagWrite::payload("2024:01:31"))
        .unwrap_err();
    assert!(matches!(err, TagError::CountMismatch { count: 11, .. }));
}

#[test]
fn test_raw_write_is_validated() {
    let mut block = Block::exif(&BlockConfig::default());
    block
        .set_tag("ExifVersion", None, TagWrite::raw(&b"0232"[..]))
        .unwrap();
    assert_eq!(
        block.get_tag("ExifVersion", None, None).unwrap(),
        Some(Value::Undefined(b"0232".to_vec()))
    );

    let err = block
        .set_tag("ExifVersion", None, TagWrite::raw(&b"02320"[..]))
        .unwrap_err();
    assert!(matches!(err, TagError::CountMismatch { count: 5, .. }));
}

#[test]
fn test_payload_and_raw_are_exclusive() {
    let mut block = Block::exif(&BlockConfig::default());
    let both = TagWrite {
        raw_data: Some(bytes::Bytes::from_static(b"x\0")),
        ..TagWrite::payload("x")
    };
    assert!(matches!(
        block.set_tag("Make", None, both),
        Err(TagError::InvalidArgument(_))
    ));
    assert!(matches!(
        block.set_tag("Make", None, TagWrite::default()),
        Err(TagError::InvalidArgument(_))
    ));
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_ambiguous_lookup_is_surfaced() {
    let mut block = Block::iptc();
    assert_eq!(
        block.locate(5u32, None),
        Err(TagError::AmbiguousTag {
            tag: TagRef::Number(5),
            records: vec![ENVELOPE_RECORD, APPLICATION_RECORD],
        })
    );
    assert_eq!(block.locate(5u32, Some(ENVELOPE_RECORD.into())), Ok((1, 5)));

    assert!(matches!(
        block.set_tag(5u32, None, TagWrite::payload("x")),
        Err(TagError::AmbiguousTag { .. })
    ));
    assert!(!block.has_tags());
}

#[test]
fn test_unknown_record() {
    let block = Block::exif(&BlockConfig::default());
    assert_eq!(
        block.get_tag("Model", Some("MakerNotes".into()), None),
        Err(TagError::UnknownRecord(RecordRef::Name("MakerNotes".to_string())))
    );
}

#[test]
fn test_tag_scoped_to_record() {
    let mut block = camera_exif(ByteOrder::BigEndian);
    block
        .set_tag("ImageWidth", Some(THUMBNAIL_RECORD.into()), TagWrite::payload(160u16))
        .unwrap();
    assert_eq!(
        block
            .get_tag("ImageWidth", Some("Thumbnail".into()), None)
            .unwrap()
            .and_then(|v| v.get_uint(0)),
        Some(160)
    );
    assert_eq!(
        block
            .get_tag("ImageWidth", Some("Image".into()), None)
            .unwrap()
            .and_then(|v| v.get_uint(0)),
        Some(4368)
    );
}

// =============================================================================
// Unchecked and Loaded Fields
// =============================================================================

#[test]
fn test_unchecked_vendor_tag() {
    let mut block = Block::exif(&BlockConfig::default());
    let write = TagWrite::payload(vec![1u16, 2, 3]).with_type(DataType::Short);
    block.set_tag(50000u32, Some(EXIF_RECORD.into()), write).unwrap();
    assert_eq!(
        block.get_tag(50000u32, Some(EXIF_RECORD.into()), None).unwrap(),
        Some(Value::Short(vec![1, 2, 3]))
    );

    // Defined tags never take the unchecked path.
    let err = block
        .set_tag(
            "Orientation",
            Some(IMAGE_RECORD.into()),
            TagWrite::payload(1u32).with_type(DataType::Long).unchecked(),
        )
        .unwrap_err();
    assert!(matches!(err, TagError::InvalidArgument(_)));
}

#[test]
fn test_loaded_fields() {
    let mut block = Block::iptc();
    let record = block.record_mut(&APPLICATION_RECORD.into()).unwrap();
    record.load_field(25, &b"sky\0sea\0"[..], None);
    record.load_field(200, vec![0x00u8, 0x2a], None);

    // Defined: decoded with the definition's type.
    assert_eq!(
        block.get_tag("Keywords", None, None).unwrap(),
        Some(Value::Ascii(vec!["sky".to_string(), "sea".to_string()]))
    );

    // Undefined: needs a type from the caller.
    let application = Some(RecordRef::Number(APPLICATION_RECORD));
    assert!(matches!(
        block.get_tag(200u32, application.clone(), None),
        Err(TagError::InvalidArgument(_))
    ));
    assert_eq!(
        block
            .get_tag(200u32, application.clone(), Some(DataType::Short))
            .unwrap(),
        Some(Value::Short(vec![42]))
    );
}

#[test]
fn test_malformed_loaded_field() {
    let mut block = Block::exif(&BlockConfig::default());
    block
        .record_mut(&RecordRef::Number(IMAGE_RECORD))
        .unwrap()
        .load_field(282, vec![0u8; 7], Some(DataType::Rational));
    assert!(matches!(
        block.get_tag("XResolution", Some("Image".into()), None),
        Err(TagError::Codec(CodecError::MalformedPayload { len: 7, .. }))
    ));
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn test_remove_is_idempotent() {
    let mut block = camera_exif(ByteOrder::LittleEndian);
    block.remove_tag(272u32, Some(IMAGE_RECORD.into())).unwrap();
    block.remove_tag(272u32, Some(IMAGE_RECORD.into())).unwrap();
    assert_eq!(block.get_tag("Model", None, None), Ok(None));
    assert_eq!(
        block.record(&RecordRef::Number(IMAGE_RECORD)).unwrap().tag_nums(),
        vec![256, 271]
    );
}
