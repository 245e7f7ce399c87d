//! Test utilities for integration tests.
//!
//! Helpers for building blocks and files with a few fields already set, and
//! for routing `tracing` output through the test harness.

use metainfo::{Block, BlockConfig, ByteOrder, MetaInfoFile, TagWrite};
use tracing_subscriber::EnvFilter;

/// Install a subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Both byte orders, for tests that must hold in either.
pub const BYTE_ORDERS: [ByteOrder; 2] = [ByteOrder::LittleEndian, ByteOrder::BigEndian];

/// An Exif block with camera make, model and an image width set.
pub fn camera_exif(byte_order: ByteOrder) -> Block {
    let mut block = Block::exif(&BlockConfig::new(byte_order));
    block
        .set_tag("Make", None, TagWrite::payload("Canon"))
        .unwrap();
    block
        .set_tag("Model", None, TagWrite::payload("Canon EOS 5D"))
        .unwrap();
    block
        .set_tag("ImageWidth", Some("Image".into()), TagWrite::payload(4368u16))
        .unwrap();
    block
}

/// A file with a populated Exif block and an empty IPTC block.
pub fn camera_file() -> MetaInfoFile {
    let mut file = MetaInfoFile::new();
    file.set_exif(camera_exif(ByteOrder::BigEndian));
    file.set_iptc(Block::iptc());
    file
}
