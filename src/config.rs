//! Configuration for newly created metadata blocks.
//!
//! Blocks parsed from a file take their byte order from the file. Blocks
//! created from scratch (adding Exif to an image that has none) need one
//! chosen up front. `BlockConfig` carries that choice and deserializes with
//! serde, so an application can keep it in its own configuration file:
//!
//! ```
//! # use metainfo::{BlockConfig, ByteOrder};
//! let config: BlockConfig = serde_json::from_str(r#"{ "byte_order": "II" }"#).unwrap();
//! assert_eq!(config.byte_order, ByteOrder::LittleEndian);
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::ByteOrder;

/// Default byte order for new Exif blocks ("MM").
pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::BigEndian;

/// Settings for building a new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Byte order of multi-byte words in the block.
    pub byte_order: ByteOrder,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            byte_order: DEFAULT_BYTE_ORDER,
        }
    }
}

impl BlockConfig {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }
}
