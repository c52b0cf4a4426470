//! Wire-level vocabulary shared by the keymint workspace: tags, typed
//! parameter values, and the error taxonomy.
//!
//! Cryptographic primitives are never represented here — only the
//! identifiers and typed values a Keymaster/KeyMint-style service uses to
//! describe keys and operations to itself.

pub mod enums;
pub mod error;
pub mod param;
pub mod tag;

pub use enums::{
    Algorithm, BlockMode, Digest, HardwareAuthenticatorType, KeyFormat, KmVersion, PaddingMode,
    Purpose,
};
pub use error::{KmError, Result};
pub use param::{KeyParameter, ParamValue};
pub use tag::{Tag, TagType, UNDEFINED_EXPIRATION_DATE_TIME};
