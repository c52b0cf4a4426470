//! The typed value half of a tagged key parameter.

use crate::tag::{Tag, TagType};
use zeroize::Zeroize;

/// The type-qualified value a [`KeyParameter`] carries. Only one variant is
/// ever valid for a given [`Tag`] (`tag.tag_type()` determines which).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Enum(i32),
    UInt(u32),
    ULong(u64),
    Date(u64),
    Bool,
    Bignum(Vec<u8>),
    Bytes(Vec<u8>),
}

impl ParamValue {
    /// Whether this value matches the type a tag declares
    /// (spec.md §4.1: `GetTagValue` "returns true iff ... its value matches
    /// the tag's declared type").
    pub fn matches_tag_type(&self, ty: TagType) -> bool {
        matches!(
            (self, ty),
            (ParamValue::Enum(_), TagType::Enum | TagType::EnumRep)
                | (ParamValue::UInt(_), TagType::Uint | TagType::UintRep)
                | (ParamValue::ULong(_), TagType::Ulong | TagType::UlongRep)
                | (ParamValue::Date(_), TagType::Date)
                | (ParamValue::Bool, TagType::Bool)
                | (ParamValue::Bignum(_), TagType::Bignum)
                | (ParamValue::Bytes(_), TagType::Bytes)
        )
    }
}

impl Drop for ParamValue {
    fn drop(&mut self) {
        // Secrets hygiene (spec.md §5): byte-valued parameters may carry
        // application data or key-derivation material, so they get
        // zeroized like any other secret buffer.
        match self {
            ParamValue::Bignum(bytes) | ParamValue::Bytes(bytes) => bytes.zeroize(),
            _ => {}
        }
    }
}

/// A single tagged, typed key/operation parameter
/// (spec.md §3: "Pair of Tag and typed value").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParameter {
    pub tag: Tag,
    pub value: ParamValue,
}

impl KeyParameter {
    pub fn new(tag: Tag, value: ParamValue) -> Self {
        KeyParameter { tag, value }
    }

    pub fn enum_value(tag: Tag, value: i32) -> Self {
        KeyParameter::new(tag, ParamValue::Enum(value))
    }

    pub fn uint(tag: Tag, value: u32) -> Self {
        KeyParameter::new(tag, ParamValue::UInt(value))
    }

    pub fn ulong(tag: Tag, value: u64) -> Self {
        KeyParameter::new(tag, ParamValue::ULong(value))
    }

    pub fn date(tag: Tag, value: u64) -> Self {
        KeyParameter::new(tag, ParamValue::Date(value))
    }

    pub fn boolean(tag: Tag) -> Self {
        KeyParameter::new(tag, ParamValue::Bool)
    }

    pub fn bytes(tag: Tag, value: impl Into<Vec<u8>>) -> Self {
        KeyParameter::new(tag, ParamValue::Bytes(value.into()))
    }
}
