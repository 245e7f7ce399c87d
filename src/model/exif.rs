//! Exif block layout.
//!
//! Five records: the primary image IFD (IFD0), the thumbnail IFD (IFD1),
//! and the Exif, GPS and Interoperability sub-IFDs. The sub-IFDs are
//! numbered by the IFD0/Exif pointer tag that locates them in a file.
//!
//! IFD0 and IFD1 share most of their tags, and GPS and Interop share tag
//! numbers 1 and 2, so those tags must be addressed with a record.

use super::tag::CountConstraint::{Exact, Unbounded};
use super::{Block, Record, TagDefinition};
use crate::config::BlockConfig;

// =============================================================================
// Record numbers
// =============================================================================

/// Primary image (IFD0)
pub const IMAGE_RECORD: u32 = 0;

/// Thumbnail image (IFD1)
pub const THUMBNAIL_RECORD: u32 = 1;

/// Exif sub-IFD, numbered by its pointer tag
pub const EXIF_RECORD: u32 = 34665;

/// GPS sub-IFD, numbered by its pointer tag
pub const GPS_RECORD: u32 = 34853;

/// Interoperability sub-IFD, numbered by its pointer tag
pub const INTEROP_RECORD: u32 = 40965;

// =============================================================================
// Tag tables
// =============================================================================

static IMAGE_TAGS: &[TagDefinition] = tag_table! {
    256 => "ImageWidth", [Short, Long], Exact(1);
    257 => "ImageLength", [Short, Long], Exact(1);
    258 => "BitsPerSample", [Short], Exact(3);
    259 => "Compression", [Short], Exact(1);
    262 => "PhotometricInterpretation", [Short], Exact(1);
    270 => "ImageDescription", [Ascii], Unbounded;
    271 => "Make", [Ascii], Unbounded;
    272 => "Model", [Ascii], Unbounded;
    273 => "StripOffsets", [Long, Short], Unbounded;
    274 => "Orientation", [Short], Exact(1);
    277 => "SamplesPerPixel", [Short], Exact(1);
    278 => "RowsPerStrip", [Long, Short], Exact(1);
    279 => "StripByteCounts", [Long, Short], Unbounded;
    282 => "XResolution", [Rational], Exact(1);
    283 => "YResolution", [Rational], Exact(1);
    284 => "PlanarConfiguration", [Short], Exact(1);
    296 => "ResolutionUnit", [Short], Exact(1);
    301 => "TransferFunction", [Short], Exact(768);
    305 => "Software", [Ascii], Unbounded;
    306 => "DateTime", [Ascii], Exact(20);
    315 => "Artist", [Ascii], Unbounded;
    318 => "WhitePoint", [Rational], Exact(2);
    319 => "PrimaryChromaticities", [Rational], Exact(6);
    529 => "YCbCrCoefficients", [Rational], Exact(3);
    530 => "YCbCrSubSampling", [Short], Exact(2);
    531 => "YCbCrPositioning", [Short], Exact(1);
    532 => "ReferenceBlackWhite", [Rational], Exact(6);
    33432 => "Copyright", [Ascii], Unbounded;
    34665 => "ExifIFDPointer", [Long], Exact(1);
    34853 => "GPSInfoIFDPointer", [Long], Exact(1);
};

static THUMBNAIL_TAGS: &[TagDefinition] = tag_table! {
    256 => "ImageWidth", [Short, Long], Exact(1);
    257 => "ImageLength", [Short, Long], Exact(1);
    259 => "Compression", [Short], Exact(1);
    262 => "PhotometricInterpretation", [Short], Exact(1);
    274 => "Orientation", [Short], Exact(1);
    282 => "XResolution", [Rational], Exact(1);
    283 => "YResolution", [Rational], Exact(1);
    296 => "ResolutionUnit", [Short], Exact(1);
    513 => "JPEGInterchangeFormat", [Long], Exact(1);
    514 => "JPEGInterchangeFormatLength", [Long], Exact(1);
    531 => "YCbCrPositioning", [Short], Exact(1);
};

static EXIF_TAGS: &[TagDefinition] = tag_table! {
    33434 => "ExposureTime", [Rational], Exact(1);
    33437 => "FNumber", [Rational], Exact(1);
    34850 => "ExposureProgram", [Short], Exact(1);
    34852 => "SpectralSensitivity", [Ascii], Unbounded;
    34855 => "ISOSpeedRatings", [Short], Unbounded;
    36864 => "ExifVersion", [Undefined], Exact(4);
    36867 => "DateTimeOriginal", [Ascii], Exact(20);
    36868 => "DateTimeDigitized", [Ascii], Exact(20);
    37121 => "ComponentsConfiguration", [Undefined], Exact(4);
    37122 => "CompressedBitsPerPixel", [Rational], Exact(1);
    37377 => "ShutterSpeedValue", [SRational], Exact(1);
    37378 => "ApertureValue", [Rational], Exact(1);
    37379 => "BrightnessValue", [SRational], Exact(1);
    37380 => "ExposureBiasValue", [SRational], Exact(1);
    37381 => "MaxApertureValue", [Rational], Exact(1);
    37382 => "SubjectDistance", [Rational], Exact(1);
    37383 => "MeteringMode", [Short], Exact(1);
    37384 => "LightSource", [Short], Exact(1);
    37385 => "Flash", [Short], Exact(1);
    37386 => "FocalLength", [Rational], Exact(1);
    37500 => "MakerNote", [Undefined], Unbounded;
    37510 => "UserComment", [Undefined], Unbounded;
    37520 => "SubSecTime", [Ascii], Unbounded;
    37521 => "SubSecTimeOriginal", [Ascii], Unbounded;
    37522 => "SubSecTimeDigitized", [Ascii], Unbounded;
    40960 => "FlashpixVersion", [Undefined], Exact(4);
    40961 => "ColorSpace", [Short], Exact(1);
    40962 => "PixelXDimension", [Short, Long], Exact(1);
    40963 => "PixelYDimension", [Short, Long], Exact(1);
    40964 => "RelatedSoundFile", [Ascii], Exact(13);
    40965 => "InteroperabilityIFDPointer", [Long], Exact(1);
    41486 => "FocalPlaneXResolution", [Rational], Exact(1);
    41487 => "FocalPlaneYResolution", [Rational], Exact(1);
    41488 => "FocalPlaneResolutionUnit", [Short], Exact(1);
    41495 => "SensingMethod", [Short], Exact(1);
    41728 => "FileSource", [Undefined], Exact(1);
    41729 => "SceneType", [Undefined], Exact(1);
    41985 => "CustomRendered", [Short], Exact(1);
    41986 => "ExposureMode", [Short], Exact(1);
    41987 => "WhiteBalance", [Short], Exact(1);
    41988 => "DigitalZoomRatio", [Rational], Exact(1);
    41989 => "FocalLengthIn35mmFilm", [Short], Exact(1);
    41990 => "SceneCaptureType", [Short], Exact(1);
    42016 => "ImageUniqueID", [Ascii], Exact(33);
    42033 => "BodySerialNumber", [Ascii], Unbounded;
    42036 => "LensModel", [Ascii], Unbounded;
};

static GPS_TAGS: &[TagDefinition] = tag_table! {
    0 => "GPSVersionID", [Byte], Exact(4);
    1 => "GPSLatitudeRef", [Ascii], Exact(2);
    2 => "GPSLatitude", [Rational], Exact(3);
    3 => "GPSLongitudeRef", [Ascii], Exact(2);
    4 => "GPSLongitude", [Rational], Exact(3);
    5 => "GPSAltitudeRef", [Byte], Exact(1);
    6 => "GPSAltitude", [Rational], Exact(1);
    7 => "GPSTimeStamp", [Rational], Exact(3);
    8 => "GPSSatellites", [Ascii], Unbounded;
    9 => "GPSStatus", [Ascii], Exact(2);
    10 => "GPSMeasureMode", [Ascii], Exact(2);
    12 => "GPSSpeedRef", [Ascii], Exact(2);
    13 => "GPSSpeed", [Rational], Exact(1);
    16 => "GPSImgDirectionRef", [Ascii], Exact(2);
    17 => "GPSImgDirection", [Rational], Exact(1);
    18 => "GPSMapDatum", [Ascii], Unbounded;
    27 => "GPSProcessingMethod", [Undefined], Unbounded;
    29 => "GPSDateStamp", [Ascii], Exact(11);
};

static INTEROP_TAGS: &[TagDefinition] = tag_table! {
    1 => "InteroperabilityIndex", [Ascii], Unbounded;
    2 => "InteroperabilityVersion", [Undefined], Exact(4);
};

// =============================================================================
// Block constructor
// =============================================================================

impl Block {
    /// An empty Exif block in the configured byte order.
    pub fn exif(config: &BlockConfig) -> Self {
        Block::new(
            "Exif",
            config.byte_order,
            vec![
                Record::new(IMAGE_RECORD, "Image", IMAGE_TAGS),
                Record::new(THUMBNAIL_RECORD, "Thumbnail", THUMBNAIL_TAGS),
                Record::new(EXIF_RECORD, "Exif", EXIF_TAGS),
                Record::new(GPS_RECORD, "GPS", GPS_TAGS),
                Record::new(INTEROP_RECORD, "Interop", INTEROP_TAGS),
            ],
        )
    }
}
