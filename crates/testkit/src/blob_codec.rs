//! A deliberately crude, in-process key-blob encoding.
//!
//! spec.md §1 scopes the real key-blob wire codec out of the core entirely
//! ("encryption of blobs with device-bound keys" is an external
//! collaborator's job). [`keymint_testkit`](crate)'s factories still need
//! *some* way to round-trip a [`Key`](keymint_core::Key) through an opaque
//! [`KeyBlob`](keymint_core::KeyBlob) so the dispatcher tests have something
//! concrete to exercise — this module is that something. It is a fixture
//! format, not a design to imitate: no encryption, no authentication, just
//! enough structure for `InMemoryContext::parse_key_blob` to reconstruct
//! what `ToyKeyFactory::generate_key`/`import_key` wrote.

use keymint_core::{AuthorizationSet, KeyBlob};
use keymint_types::{Algorithm, KeyFormat, KeyParameter, ParamValue, Tag};

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    push_u32(out, bytes.len() as u32);
    out.extend_from_slice(bytes);
}

fn take_u32(input: &[u8], cursor: &mut usize) -> Option<u32> {
    let bytes = input.get(*cursor..*cursor + 4)?;
    *cursor += 4;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

fn take_bytes<'a>(input: &'a [u8], cursor: &mut usize) -> Option<&'a [u8]> {
    let len = take_u32(input, cursor)? as usize;
    let bytes = input.get(*cursor..*cursor + len)?;
    *cursor += len;
    Some(bytes)
}

fn encode_param(out: &mut Vec<u8>, param: &KeyParameter) {
    push_u32(out, param.tag.raw());
    match &param.value {
        ParamValue::Enum(v) => {
            out.push(0);
            out.extend_from_slice(&v.to_le_bytes());
        }
        ParamValue::UInt(v) => {
            out.push(1);
            out.extend_from_slice(&v.to_le_bytes());
        }
        ParamValue::ULong(v) => {
            out.push(2);
            out.extend_from_slice(&v.to_le_bytes());
        }
        ParamValue::Date(v) => {
            out.push(3);
            out.extend_from_slice(&v.to_le_bytes());
        }
        ParamValue::Bool => {
            out.push(4);
        }
        ParamValue::Bignum(bytes) => {
            out.push(5);
            push_bytes(out, bytes);
        }
        ParamValue::Bytes(bytes) => {
            out.push(6);
            push_bytes(out, bytes);
        }
    }
}

fn decode_param(input: &[u8], cursor: &mut usize) -> Option<KeyParameter> {
    let tag = Tag(take_u32(input, cursor)?);
    let discriminant = *input.get(*cursor)?;
    *cursor += 1;
    let value = match discriminant {
        0 => ParamValue::Enum(i32::from_le_bytes(
            input.get(*cursor..*cursor + 4)?.try_into().ok()?,
        )),
        1 => ParamValue::UInt(u32::from_le_bytes(
            input.get(*cursor..*cursor + 4)?.try_into().ok()?,
        )),
        2 => ParamValue::ULong(u64::from_le_bytes(
            input.get(*cursor..*cursor + 8)?.try_into().ok()?,
        )),
        3 => ParamValue::Date(u64::from_le_bytes(
            input.get(*cursor..*cursor + 8)?.try_into().ok()?,
        )),
        4 => ParamValue::Bool,
        5 => ParamValue::Bignum(take_bytes(input, cursor)?.to_vec()),
        6 => ParamValue::Bytes(take_bytes(input, cursor)?.to_vec()),
        _ => return None,
    };
    match discriminant {
        0 => *cursor += 4,
        1 => *cursor += 4,
        2 => *cursor += 8,
        3 => *cursor += 8,
        _ => {}
    }
    Some(KeyParameter::new(tag, value))
}

fn encode_set(out: &mut Vec<u8>, set: &AuthorizationSet) {
    push_u32(out, set.len() as u32);
    for param in set.iter() {
        encode_param(out, param);
    }
}

fn decode_set(input: &[u8], cursor: &mut usize) -> Option<AuthorizationSet> {
    let count = take_u32(input, cursor)?;
    let mut set = AuthorizationSet::new();
    for _ in 0..count {
        set.push_back(decode_param(input, cursor)?);
    }
    Some(set)
}

fn algorithm_to_u8(algorithm: Algorithm) -> u8 {
    match algorithm {
        Algorithm::Rsa => 0,
        Algorithm::Ec => 1,
        Algorithm::Aes => 2,
        Algorithm::TripleDes => 3,
        Algorithm::Hmac => 4,
    }
}

fn algorithm_from_u8(value: u8) -> Option<Algorithm> {
    match value {
        0 => Some(Algorithm::Rsa),
        1 => Some(Algorithm::Ec),
        2 => Some(Algorithm::Aes),
        3 => Some(Algorithm::TripleDes),
        4 => Some(Algorithm::Hmac),
        _ => None,
    }
}

/// A decoded blob: everything `ToyKeyFactory::generate_key`/`import_key`
/// wrote, before it is reassembled into a `Key`.
pub struct DecodedBlob {
    pub algorithm: Algorithm,
    pub material: Vec<u8>,
    pub hw_enforced: AuthorizationSet,
    pub sw_enforced: AuthorizationSet,
}

pub fn encode(
    algorithm: Algorithm,
    material: &[u8],
    hw_enforced: &AuthorizationSet,
    sw_enforced: &AuthorizationSet,
) -> KeyBlob {
    let mut out = Vec::new();
    out.push(algorithm_to_u8(algorithm));
    push_bytes(&mut out, material);
    encode_set(&mut out, hw_enforced);
    encode_set(&mut out, sw_enforced);
    KeyBlob::new(out)
}

pub fn decode(blob: &KeyBlob) -> Option<DecodedBlob> {
    let input = blob.as_bytes();
    let mut cursor = 0usize;
    let algorithm = algorithm_from_u8(*input.get(cursor)?)?;
    cursor += 1;
    let material = take_bytes(input, &mut cursor)?.to_vec();
    let hw_enforced = decode_set(input, &mut cursor)?;
    let sw_enforced = decode_set(input, &mut cursor)?;
    Some(DecodedBlob {
        algorithm,
        material,
        hw_enforced,
        sw_enforced,
    })
}

fn key_format_to_u8(format: KeyFormat) -> u8 {
    match format {
        KeyFormat::X509 => 0,
        KeyFormat::Pkcs8 => 1,
        KeyFormat::Raw => 2,
    }
}

fn key_format_from_u8(value: u8) -> Option<KeyFormat> {
    match value {
        0 => Some(KeyFormat::X509),
        1 => Some(KeyFormat::Pkcs8),
        2 => Some(KeyFormat::Raw),
        _ => None,
    }
}

/// A decoded `ImportWrappedKey` payload: the description, wire format, and
/// raw secret that `Context::unwrap_key` hands back (spec.md §4.5).
pub struct DecodedWrapped {
    pub key_format: KeyFormat,
    pub key_description: AuthorizationSet,
    pub secret_key: Vec<u8>,
}

/// Encodes what a real wrapping scheme would protect with `wrapping_key`
/// and `masking_key` — here it's written in the clear, since the wrapping
/// cryptography itself is an external collaborator's concern.
pub fn encode_wrapped(
    key_format: KeyFormat,
    key_description: &AuthorizationSet,
    secret_key: &[u8],
) -> KeyBlob {
    let mut out = Vec::new();
    out.push(key_format_to_u8(key_format));
    encode_set(&mut out, key_description);
    push_bytes(&mut out, secret_key);
    KeyBlob::new(out)
}

pub fn decode_wrapped(blob: &KeyBlob) -> Option<DecodedWrapped> {
    let input = blob.as_bytes();
    let mut cursor = 0usize;
    let key_format = key_format_from_u8(*input.get(cursor)?)?;
    cursor += 1;
    let key_description = decode_set(input, &mut cursor)?;
    let secret_key = take_bytes(input, &mut cursor)?.to_vec();
    Some(DecodedWrapped {
        key_format,
        key_description,
        secret_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keymint_types::tag::{TAG_ALGORITHM, TAG_OS_PATCHLEVEL};

    #[test]
    fn round_trips_algorithm_material_and_both_lists() {
        let mut hw = AuthorizationSet::new();
        hw.push_back(KeyParameter::enum_value(TAG_ALGORITHM, 2));
        hw.push_back(KeyParameter::uint(TAG_OS_PATCHLEVEL, 202401));
        let mut sw = AuthorizationSet::new();
        sw.push_back(KeyParameter::bytes(
            keymint_types::tag::TAG_APPLICATION_ID,
            vec![1, 2, 3],
        ));

        let blob = encode(Algorithm::Aes, &[0xAAu8; 16], &hw, &sw);
        let decoded = decode(&blob).expect("decodes");

        assert_eq!(decoded.algorithm, Algorithm::Aes);
        assert_eq!(decoded.material, vec![0xAAu8; 16]);
        assert_eq!(decoded.hw_enforced, hw);
        assert_eq!(decoded.sw_enforced, sw);
    }
}
