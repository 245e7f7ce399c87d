//! MetaInfoFile integration tests.
//!
//! Tests verify:
//! - Unknown or unset tags read as absent through the facade
//! - Exif and IPTC operations reach the right block
//! - Files without blocks accept every operation as a no-op

use metainfo::model::iptc::APPLICATION_RECORD;
use metainfo::{Block, DataType, MetaInfoFile, RecordRef, TagError, TagWrite, Value};

use super::test_utils::{camera_file, init_tracing};

#[test]
fn test_unknown_tag_is_absent() {
    init_tracing();

    let file = camera_file();
    assert_eq!(file.get_exif_tag("NoSuchTag", None), Ok(None));
    assert_eq!(file.get_exif_tag("Artist", None), Ok(None));
    assert_eq!(file.get_iptc_tag("NoSuchDataset", None, None), Ok(None));
}

#[test]
fn test_ambiguity_is_still_an_error() {
    let file = camera_file();
    assert!(matches!(
        file.get_exif_tag("ImageWidth", None),
        Err(TagError::AmbiguousTag { .. })
    ));
    assert!(matches!(
        file.get_iptc_tag(0u32, None, None),
        Err(TagError::AmbiguousTag { .. })
    ));
}

#[test]
fn test_exif_round_trip() {
    let mut file = camera_file();
    file.set_exif_tag("Artist", None, TagWrite::payload("J. Doe"))
        .unwrap();
    assert_eq!(
        file.get_exif_tag(315u32, Some("Image".into())).unwrap(),
        Some(Value::Ascii(vec!["J. Doe".to_string()]))
    );

    file.del_exif_tag("Artist", None).unwrap();
    file.del_exif_tag("Artist", None).unwrap();
    assert_eq!(file.get_exif_tag("Artist", None), Ok(None));
    assert_eq!(
        file.get_exif_tag("Make", None).unwrap(),
        Some(Value::Ascii(vec!["Canon".to_string()]))
    );
}

#[test]
fn test_iptc_keywords() {
    let mut file = camera_file();
    file.set_iptc_tag("ObjectName", None, TagWrite::payload("Harbour"))
        .unwrap();
    for keyword in ["boats", "dusk"] {
        file.append_iptc_tag("Keywords", None, keyword).unwrap();
    }

    assert_eq!(
        file.get_iptc_tag("Keywords", None, None)
            .unwrap()
            .as_ref()
            .and_then(Value::as_strings),
        Some(&["boats".to_string(), "dusk".to_string()][..])
    );
    assert_eq!(
        file.get_iptc_tag(5u32, Some("Application".into()), None)
            .unwrap(),
        Some(Value::Ascii(vec!["Harbour".to_string()]))
    );

    file.del_iptc_tag("Keywords", None).unwrap();
    assert_eq!(file.get_iptc_tag("Keywords", None, None), Ok(None));
}

#[test]
fn test_iptc_loaded_dataset_with_type() {
    let mut file = MetaInfoFile::new();
    let mut iptc = Block::iptc();
    iptc.record_mut(&RecordRef::Number(APPLICATION_RECORD))
        .unwrap()
        .load_field(150, vec![0x00u8, 0x01, 0x00, 0x02], None);
    file.set_iptc(iptc);

    assert_eq!(
        file.get_iptc_tag(150u32, Some(APPLICATION_RECORD.into()), Some(DataType::Short))
            .unwrap(),
        Some(Value::Short(vec![1, 2]))
    );
}

#[test]
fn test_blocks_are_independent() {
    let mut file = camera_file();
    assert!(file.exif().is_some_and(Block::has_tags));
    assert!(!file.iptc().is_some_and(Block::has_tags));

    file.take_exif();
    assert_eq!(file.get_exif_tag("Make", None), Ok(None));
    file.set_exif_tag("Make", None, TagWrite::payload("Nikon"))
        .unwrap();
    assert!(file.exif().is_none());
}

#[test]
fn test_iptc_latin1_text_survives_rewrite() {
    let mut file = MetaInfoFile::new();
    let mut iptc = Block::iptc();
    iptc.record_mut(&RecordRef::Number(APPLICATION_RECORD))
        .unwrap()
        .load_field(90, &b"Caf\xe9\0"[..], None);
    file.set_iptc(iptc);

    let city = file.get_iptc_tag("City", None, None).unwrap().unwrap();
    assert_eq!(city, Value::Ascii(vec!["Caf\u{e9}".to_string()]));

    file.set_iptc_tag("City", None, TagWrite::payload(city)).unwrap();
    let stored = file
        .iptc()
        .unwrap()
        .record(&RecordRef::Number(APPLICATION_RECORD))
        .unwrap()
        .raw_field(90)
        .unwrap()
        .data
        .clone();
    assert_eq!(&stored[..], b"Caf\xe9\0");
}
