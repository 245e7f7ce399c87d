//! Record/block tag model.
//!
//! - A [`Record`] owns the static tag definitions of one IFD or IPTC record
//!   and the fields set in it, keyed by tag number.
//! - A [`Block`] owns the records of one metadata kind and resolves tags
//!   given by name or number to their owning record.
//!
//! The Exif and IPTC layouts are provided by [`Block::exif`] and
//! [`Block::iptc`].

/// Build a static tag definition table.
///
/// ```ignore
/// static TAGS: &[TagDefinition] = tag_table! {
///     272 => "Model", [Ascii], Unbounded;
/// };
/// ```
macro_rules! tag_table {
    ($($number:literal => $name:literal, [$($ty:ident),+], $count:expr;)*) => {
        &[$(
            $crate::model::TagDefinition::new(
                $number,
                $name,
                &[$($crate::codec::DataType::$ty),+],
                $count,
            ),
        )*]
    };
}

mod block;
pub mod exif;
pub mod iptc;
mod record;
mod tag;

pub use block::Block;
pub use record::{RawField, Record, TagWrite};
pub use tag::{CountConstraint, RecordRef, TagDefinition, TagRef};
