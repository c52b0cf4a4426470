//! Tag identifiers and the typed-value discriminant they carry.
//!
//! Mirrors `keymaster_tag_t` / `keymaster_tag_get_type` from
//! `original_source/android_keymaster.cpp`'s collaborators: the tag's type is
//! baked into its top bits so `Tag::tag_type` never needs an external table.

/// Discriminant for the typed union a [`KeyParameter`](crate::KeyParameter)
/// carries. `*Rep` variants may legally repeat within an `AuthorizationSet`
/// (see spec.md §3: purpose, digest, padding, secure-user-id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Invalid,
    Enum,
    EnumRep,
    Uint,
    UintRep,
    Ulong,
    UlongRep,
    Date,
    Bool,
    Bignum,
    Bytes,
}

impl TagType {
    /// Whether tags of this type are allowed to appear more than once in an
    /// `AuthorizationSet` (spec.md §3: "Some tags are *repeatable*").
    pub fn is_repeatable(self) -> bool {
        matches!(self, TagType::EnumRep | TagType::UintRep | TagType::UlongRep)
    }
}

const TYPE_SHIFT: u32 = 28;

fn decode_type(raw: u32) -> TagType {
    match raw >> TYPE_SHIFT {
        1 => TagType::Enum,
        2 => TagType::EnumRep,
        3 => TagType::Uint,
        4 => TagType::UintRep,
        5 => TagType::Ulong,
        6 => TagType::Date,
        7 => TagType::Bool,
        8 => TagType::Bignum,
        9 => TagType::Bytes,
        10 => TagType::UlongRep,
        _ => TagType::Invalid,
    }
}

/// A 32-bit tag identifier with its type folded into the top bits
/// (spec.md §3: "A 32-bit identifier encoding both an opaque tag id and a
/// *type*").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl Tag {
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn tag_type(self) -> TagType {
        decode_type(self.0)
    }

    const fn new(id: u32, ty_bits: u32) -> Tag {
        Tag((ty_bits << TYPE_SHIFT) | id)
    }
}

macro_rules! define_tags {
    ($($(#[$doc:meta])* $name:ident = $id:expr, $ty:ident, $bits:expr;)*) => {
        $(
            $(#[$doc])*
            pub const $name: Tag = Tag::new($id, $bits);
        )*

        #[cfg(test)]
        mod generated_tests {
            use super::*;

            #[test]
            fn every_defined_tag_round_trips_its_type() {
                $(
                    assert_eq!($name.tag_type(), TagType::$ty, stringify!($name));
                )*
            }
        }
    };
}

// Bit values match `decode_type`'s discriminant table above.
define_tags! {
    /// Key's cryptographic algorithm.
    TAG_ALGORITHM = 1, Enum, 1;
    /// Permitted uses of the key; repeatable.
    TAG_PURPOSE = 2, EnumRep, 2;
    /// Permitted digests; repeatable.
    TAG_DIGEST = 3, EnumRep, 2;
    /// Permitted paddings; repeatable.
    TAG_PADDING = 4, EnumRep, 2;
    /// Permitted block modes; repeatable.
    TAG_BLOCK_MODE = 5, EnumRep, 2;
    /// Key size in bits.
    TAG_KEY_SIZE = 6, Uint, 3;
    /// Caller-supplied nonce/IV allowed.
    TAG_CALLER_NONCE = 7, Bool, 7;
    /// Patch level of the OS the key was generated/last upgraded under.
    TAG_OS_PATCHLEVEL = 8, Uint, 3;
    /// Key may only be generated/used before `EarlyBootEnded`.
    TAG_EARLY_BOOT_ONLY = 9, Bool, 7;
    /// Number of times a key may be used before it must be deleted.
    TAG_USAGE_COUNT_LIMIT = 10, Uint, 3;
    /// Secure user id(s) authorized to use the key; repeatable.
    TAG_USER_SECURE_ID = 11, UlongRep, 10;
    /// Opaque client-supplied application id bound to the key.
    TAG_APPLICATION_ID = 12, Bytes, 9;
    /// Opaque client-supplied application data bound to the key.
    TAG_APPLICATION_DATA = 13, Bytes, 9;
    /// Attestation application id to embed in a generated certificate.
    TAG_ATTESTATION_APPLICATION_ID = 14, Bytes, 9;
    /// Certificate `notBefore`, set during `ImportWrappedKey`'s SID rewrite.
    TAG_CERTIFICATE_NOT_BEFORE = 15, Date, 6;
    /// Certificate `notAfter`, set during `ImportWrappedKey`'s SID rewrite.
    TAG_CERTIFICATE_NOT_AFTER = 16, Date, 6;
    /// RSA public exponent.
    TAG_RSA_PUBLIC_EXPONENT = 17, Ulong, 5;
}

/// `TAG_CERTIFICATE_NOT_AFTER`'s sentinel "no expiration" value
/// (spec.md §4.7: `kUndefinedExpirationDateTime`).
pub const UNDEFINED_EXPIRATION_DATE_TIME: u64 = 253_402_300_799_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeatable_tags_are_flagged() {
        assert!(TAG_PURPOSE.tag_type().is_repeatable());
        assert!(TAG_USER_SECURE_ID.tag_type().is_repeatable());
        assert!(!TAG_ALGORITHM.tag_type().is_repeatable());
    }

    #[test]
    fn distinct_tags_with_same_type_do_not_collide() {
        assert_ne!(TAG_PURPOSE, TAG_DIGEST);
        assert_ne!(TAG_PURPOSE.raw(), TAG_DIGEST.raw());
    }
}
