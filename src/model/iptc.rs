//! IPTC block layout.
//!
//! IPTC IIM datasets are addressed as record:dataset. Only the Envelope
//! (1) and Application (2) records are defined here. Both start their
//! numbering at 0, so datasets such as 0 and 5 exist in both and need a
//! record when looked up by number.
//!
//! IIM is always big-endian. Text datasets use the ASCII codec, so their
//! counts include the terminating null; repeatable datasets (keywords,
//! categories) are built with `append_tag`, one piece per repetition.

use super::tag::CountConstraint::{Exact, Range};
use super::{Block, Record, TagDefinition};
use crate::codec::ByteOrder;

/// Envelope record
pub const ENVELOPE_RECORD: u32 = 1;

/// Application record
pub const APPLICATION_RECORD: u32 = 2;

static ENVELOPE_TAGS: &[TagDefinition] = tag_table! {
    0 => "ModelVersion", [Short], Exact(1);
    5 => "Destination", [Ascii], Range(2, 1025);
    20 => "FileFormat", [Short], Exact(1);
    22 => "FileFormatVersion", [Short], Exact(1);
    30 => "ServiceIdentifier", [Ascii], Range(2, 11);
    40 => "EnvelopeNumber", [Ascii], Exact(9);
    50 => "ProductID", [Ascii], Range(2, 33);
    60 => "EnvelopePriority", [Ascii], Exact(2);
    70 => "DateSent", [Ascii], Exact(9);
    80 => "TimeSent", [Ascii], Exact(12);
    90 => "CodedCharacterSet", [Undefined], Range(1, 32);
    100 => "UNO", [Ascii], Range(15, 81);
};

static APPLICATION_TAGS: &[TagDefinition] = tag_table! {
    0 => "RecordVersion", [Short], Exact(1);
    5 => "ObjectName", [Ascii], Range(2, 65);
    7 => "EditStatus", [Ascii], Range(2, 65);
    10 => "Urgency", [Ascii], Exact(2);
    15 => "Category", [Ascii], Range(2, 4);
    20 => "SupplementalCategory", [Ascii], Range(2, 33);
    25 => "Keywords", [Ascii], Range(2, 65);
    40 => "SpecialInstructions", [Ascii], Range(2, 257);
    55 => "DateCreated", [Ascii], Exact(9);
    60 => "TimeCreated", [Ascii], Exact(12);
    65 => "OriginatingProgram", [Ascii], Range(2, 33);
    80 => "By-line", [Ascii], Range(2, 33);
    85 => "By-lineTitle", [Ascii], Range(2, 33);
    90 => "City", [Ascii], Range(2, 33);
    95 => "Province-State", [Ascii], Range(2, 33);
    100 => "Country-PrimaryLocationCode", [Ascii], Exact(4);
    101 => "Country-PrimaryLocationName", [Ascii], Range(2, 65);
    103 => "OriginalTransmissionReference", [Ascii], Range(2, 33);
    105 => "Headline", [Ascii], Range(2, 257);
    110 => "Credit", [Ascii], Range(2, 33);
    115 => "Source", [Ascii], Range(2, 33);
    116 => "CopyrightNotice", [Ascii], Range(2, 129);
    120 => "Caption-Abstract", [Ascii], Range(2, 2001);
    122 => "Writer-Editor", [Ascii], Range(2, 33);
};

impl Block {
    /// An empty IPTC block.
    pub fn iptc() -> Self {
        Block::new(
            "IPTC",
            ByteOrder::BigEndian,
            vec![
                Record::new(ENVELOPE_RECORD, "Envelope", ENVELOPE_TAGS),
                Record::new(APPLICATION_RECORD, "Application", APPLICATION_TAGS),
            ],
        )
    }
}
