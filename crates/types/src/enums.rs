//! Enumerations the core dispatcher reasons about directly. Everything else
//! (curve parameters, mgf digests, and so on) belongs to the key-factory
//! collaborators, not the core.

/// Cryptographic algorithm family. The core never interprets the material,
/// only uses this to pick a [`KeyFactory`](crate) / `OperationFactory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Algorithm {
    Rsa,
    Ec,
    Aes,
    TripleDes,
    Hmac,
}

/// What an operation intends to do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Purpose {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    WrapKey,
    AgreeKey,
    AttestKey,
}

impl Default for Purpose {
    fn default() -> Self {
        Purpose::Encrypt
    }
}

/// Symmetric block cipher mode, reported by `OperationFactory::supported_block_modes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BlockMode {
    Ecb,
    Cbc,
    Ctr,
    Gcm,
}

/// Padding scheme, reported by `OperationFactory::supported_padding_modes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PaddingMode {
    None,
    Pkcs7,
    RsaOaep,
    RsaPss,
    RsaPkcs1_1_5Encrypt,
    RsaPkcs1_1_5Sign,
}

/// Digest algorithm, reported by `OperationFactory::supported_digests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Digest {
    None,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

/// On-the-wire key material encoding for import/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyFormat {
    X509,
    Pkcs8,
    Raw,
}

impl Default for KeyFormat {
    fn default() -> Self {
        KeyFormat::Raw
    }
}

/// Which generation of the Keymaster/KeyMint contract the context implements.
/// Mirrors the `KmVersion` comparisons in `original_source/android_keymaster.cpp`
/// (`context_->GetKmVersion() >= KmVersion::KEYMINT_1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KmVersion {
    Keymaster1,
    Keymaster2,
    Keymaster3,
    Keymaster4,
    KeyMint1,
    KeyMint2,
    KeyMint3,
}

/// Bitmask values carried in the authenticator-type mask during
/// `ImportWrappedKey`'s SID rewrite (spec.md §6, §4.7).
pub struct HardwareAuthenticatorType;

impl HardwareAuthenticatorType {
    pub const PASSWORD: u8 = 1 << 0;
    pub const FINGERPRINT: u8 = 1 << 1;
}
