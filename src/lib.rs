//! Decoder and type-model extractor for packaged ledger application modules.
//!
//! [`archive::ArchiveDecoder`] unwraps an archive envelope, dispatches the
//! payload to the decoder for its IR generation and walks every module into
//! a [`darlens_common::Package`]. Anything the walker cannot describe is
//! skipped and recorded as a diagnostic rather than failing the decode.

pub mod archive;
pub mod config;
pub mod error;
pub mod intern;
pub mod ir;
pub mod key;
pub mod lf1;
pub mod lf2;
pub mod normalize;
pub mod types;
pub mod walker;

pub use archive::{ArchiveDecoder, DecodedArchive, Generation, PackageDecoder, decode_archive};
pub use config::{ConfigError, DecoderConfig};
pub use error::DecodeError;
