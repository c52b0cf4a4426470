//! End-to-end dispatcher scenarios from spec.md §8, driven entirely through
//! `Dispatcher<InMemoryContext>` against the `keymint_testkit` fixtures —
//! no internal crate access, the way a real client would only ever see the
//! request/response surface.

use std::sync::Arc;

use keymint_api_decl::{
    AbortOperationRequest, AddRngEntropyRequest, BeginOperationRequest, ComputeSharedHmacRequest,
    ConfigureRequest, FinishOperationRequest, GenerateKeyRequest, GetKeyCharacteristicsRequest,
    GetVersion2Request, ImportWrappedKeyRequest, UpdateOperationRequest,
};
use keymint_api_server::Dispatcher;
use keymint_config::SystemVersion;
use keymint_core::{AuthorizationSet, EnforcementPolicy};
use keymint_testkit::{InMemoryContext, InMemoryPolicy};
use keymint_types::tag::{
    TAG_ALGORITHM, TAG_CERTIFICATE_NOT_BEFORE, TAG_EARLY_BOOT_ONLY, TAG_USAGE_COUNT_LIMIT,
    TAG_USER_SECURE_ID,
};
use keymint_types::{HardwareAuthenticatorType, KeyFormat, KeyParameter, KmError, ParamValue, Purpose};

const AES_ALGORITHM: i32 = 2; // matches keymint_core::key::algorithm_from_raw / blob_codec.

fn aes_description() -> AuthorizationSet {
    let mut set = AuthorizationSet::new();
    set.push_back(KeyParameter::enum_value(TAG_ALGORITHM, AES_ALGORITHM));
    set
}

fn dispatcher(capacity: usize) -> Dispatcher<InMemoryContext> {
    Dispatcher::new(InMemoryContext::new(SystemVersion::new(1, 100)), capacity)
}

fn dispatcher_with_policy(capacity: usize) -> (Dispatcher<InMemoryContext>, Arc<InMemoryPolicy>) {
    let policy = Arc::new(InMemoryPolicy::new());
    let context = InMemoryContext::new(SystemVersion::new(1, 100)).with_policy(policy.clone());
    (Dispatcher::new(context, capacity), policy)
}

fn generate_aes_key(dispatcher: &Dispatcher<InMemoryContext>, description: AuthorizationSet) -> keymint_core::KeyBlob {
    dispatcher
        .generate_key(GenerateKeyRequest {
            key_description: description,
            attestation_key: None,
        })
        .expect("generate_key succeeds")
        .key_blob
}

/// S1 — Handle lifecycle.
#[test]
fn s1_handle_lifecycle() {
    let dispatcher = dispatcher(4);
    let key_blob = generate_aes_key(&dispatcher, aes_description());

    let begin = dispatcher
        .begin_operation(BeginOperationRequest {
            purpose: Purpose::Encrypt,
            key_blob: key_blob.clone(),
            in_params: AuthorizationSet::new(),
        })
        .expect("begin succeeds");
    assert_ne!(begin.challenge, 0, "handle must be nonzero");
    let handle = begin.challenge;

    let update = dispatcher
        .update_operation(UpdateOperationRequest {
            op_handle: handle,
            input: vec![0u8; 16],
            in_params: AuthorizationSet::new(),
        })
        .expect("update succeeds");
    assert_eq!(update.output.len(), 16);
    assert_eq!(update.input_consumed, 16);

    dispatcher
        .finish_operation(FinishOperationRequest {
            op_handle: handle,
            input: Vec::new(),
            signature: Vec::new(),
            in_params: AuthorizationSet::new(),
        })
        .expect("finish succeeds");

    // Finish always evicts; the handle is now dead.
    let result = dispatcher.abort_operation(AbortOperationRequest { op_handle: handle });
    assert_eq!(result.unwrap_err(), KmError::InvalidOperationHandle);
}

/// S2 — Error eviction: an `Update` error removes the operation from the
/// table, so a subsequent call on the same handle reports
/// `INVALID_OPERATION_HANDLE` rather than resuming or re-failing the same
/// way (spec.md §8 invariant 2, 3).
#[test]
fn s2_error_eviction() {
    let dispatcher = dispatcher(4);
    // Importing an empty key forces the fixture cipher's `Update` to fail
    // (`ToyCipherOperation::update` rejects empty key material), exercising
    // the same evict-on-error path spec.md's own INVALID_INPUT_LENGTH
    // example exercises.
    let key_blob = dispatcher
        .import_key(keymint_api_decl::ImportKeyRequest {
            key_description: aes_description(),
            key_format: keymint_types::KeyFormat::Raw,
            key_data: Vec::new(),
            attestation_key: None,
        })
        .expect("import_key succeeds")
        .key_blob;

    let begin = dispatcher
        .begin_operation(BeginOperationRequest {
            purpose: Purpose::Encrypt,
            key_blob,
            in_params: AuthorizationSet::new(),
        })
        .expect("begin succeeds");
    let handle = begin.challenge;

    let first_update = dispatcher.update_operation(UpdateOperationRequest {
        op_handle: handle,
        input: vec![0u8; 16],
        in_params: AuthorizationSet::new(),
    });
    assert!(first_update.is_err(), "empty key material must fail update");

    let second_update = dispatcher.update_operation(UpdateOperationRequest {
        op_handle: handle,
        input: vec![0u8; 16],
        in_params: AuthorizationSet::new(),
    });
    assert_eq!(second_update.unwrap_err(), KmError::InvalidOperationHandle);
}

/// S3 — Patch-level downgrade/upgrade comparison (spec.md §8 invariant 4).
/// Each system version is modeled as its own context, since
/// `InMemoryContext::set_system_version` (like the spec's own Context)
/// refuses a second reconfiguration — the scenario's three `Configure`
/// calls are three independently-booted devices comparing against the same
/// key blob.
#[test]
fn s3_patch_level_comparison() {
    fn characteristics_result(system_patchlevel: u32) -> keymint_types::Result<()> {
        let dispatcher = Dispatcher::new(
            InMemoryContext::new(SystemVersion::new(1, system_patchlevel)),
            4,
        );
        let mut description = aes_description();
        description.push_back(KeyParameter::uint(
            keymint_types::tag::TAG_OS_PATCHLEVEL,
            202_401,
        ));
        let key_blob = generate_aes_key(&dispatcher, description);
        dispatcher
            .get_key_characteristics(GetKeyCharacteristicsRequest {
                key_blob,
                additional_params: AuthorizationSet::new(),
            })
            .map(|_| ())
    }

    assert_eq!(
        characteristics_result(202_312),
        Err(KmError::InvalidKeyBlob)
    );
    assert_eq!(characteristics_result(202_401), Ok(()));
    assert_eq!(
        characteristics_result(202_402),
        Err(KmError::KeyRequiresUpgrade)
    );
}

/// S4 — Early boot gate (spec.md §8 invariant 5).
#[test]
fn s4_early_boot_gate() {
    let (dispatcher, policy) = dispatcher_with_policy(4);
    let mut description = aes_description();
    description.push_back(KeyParameter::boolean(TAG_EARLY_BOOT_ONLY));

    assert!(dispatcher
        .generate_key(GenerateKeyRequest {
            key_description: description.clone(),
            attestation_key: None,
        })
        .is_ok());

    policy.early_boot_ended();

    let result = dispatcher.generate_key(GenerateKeyRequest {
        key_description: description,
        attestation_key: None,
    });
    assert_eq!(result.unwrap_err(), KmError::EarlyBootEnded);
}

/// S5 — Single-use deletion (spec.md §8 invariant 6).
#[test]
fn s5_single_use_key_is_deleted_after_finish() {
    let (dispatcher, _policy) = dispatcher_with_policy(4);
    let mut description = aes_description();
    description.push_back(KeyParameter::uint(TAG_USAGE_COUNT_LIMIT, 1));
    let key_blob = generate_aes_key(&dispatcher, description);

    let begin = dispatcher
        .begin_operation(BeginOperationRequest {
            purpose: Purpose::Encrypt,
            key_blob: key_blob.clone(),
            in_params: AuthorizationSet::new(),
        })
        .expect("begin succeeds");

    dispatcher
        .update_operation(UpdateOperationRequest {
            op_handle: begin.challenge,
            input: vec![0u8; 16],
            in_params: AuthorizationSet::new(),
        })
        .expect("update succeeds");

    dispatcher
        .finish_operation(FinishOperationRequest {
            op_handle: begin.challenge,
            input: Vec::new(),
            signature: Vec::new(),
            in_params: AuthorizationSet::new(),
        })
        .expect("finish succeeds");

    // The key's blob doubles as its policy-scoped id in this fixture, so a
    // second use of the very same blob is now rejected.
    let reuse = dispatcher.begin_operation(BeginOperationRequest {
        purpose: Purpose::Encrypt,
        key_blob,
        in_params: AuthorizationSet::new(),
    });
    assert_eq!(reuse.unwrap_err(), KmError::InvalidKeyBlob);
}

/// S6 — Capacity eviction (spec.md §8 invariant 1, §4.4).
#[test]
fn s6_capacity_eviction_is_oldest_first() {
    let dispatcher = dispatcher(4);
    let key_blob = generate_aes_key(&dispatcher, aes_description());

    let mut handles = Vec::new();
    for _ in 0..4 {
        let begin = dispatcher
            .begin_operation(BeginOperationRequest {
                purpose: Purpose::Encrypt,
                key_blob: key_blob.clone(),
                in_params: AuthorizationSet::new(),
            })
            .expect("begin succeeds");
        handles.push(begin.challenge);
    }

    let fifth = dispatcher
        .begin_operation(BeginOperationRequest {
            purpose: Purpose::Encrypt,
            key_blob,
            in_params: AuthorizationSet::new(),
        })
        .expect("fifth begin succeeds by evicting the oldest entry");
    assert_ne!(fifth.challenge, 0);

    let oldest = handles[0];
    let result = dispatcher.abort_operation(AbortOperationRequest { op_handle: oldest });
    assert_eq!(result.unwrap_err(), KmError::InvalidOperationHandle);

    for &handle in &handles[1..] {
        assert!(dispatcher
            .abort_operation(AbortOperationRequest { op_handle: handle })
            .is_ok());
    }
}

/// Version negotiation (spec.md §4.7, §6): `GetVersion2` stores
/// `min(client_max, server_max)`.
#[test]
fn get_version2_negotiates_the_lower_message_version() {
    let dispatcher = dispatcher(4);
    assert_eq!(
        dispatcher.message_version(),
        keymint_api_server::SERVER_MAX_MESSAGE_VERSION
    );

    let response = dispatcher.get_version_2(GetVersion2Request {
        max_message_version: 1,
    });
    assert_eq!(response.max_message_version, keymint_api_server::SERVER_MAX_MESSAGE_VERSION);
    assert_eq!(dispatcher.message_version(), 1);
}

/// `GetVersion` (v1) never touches `message_version_` (spec.md §9 open
/// question, resolved as "no").
#[test]
fn get_version_v1_does_not_touch_message_version() {
    let dispatcher = dispatcher(4);
    dispatcher.get_version_2(GetVersion2Request {
        max_message_version: 1,
    });
    assert_eq!(dispatcher.message_version(), 1);
    let _ = dispatcher.get_version();
    assert_eq!(dispatcher.message_version(), 1);
}

/// An unsupported algorithm is reported distinctly from an unsupported
/// purpose (spec.md §4.7).
#[test]
fn unsupported_algorithm_and_purpose_are_distinguished() {
    let dispatcher = dispatcher(4);
    let key_blob = generate_aes_key(&dispatcher, aes_description());

    let begin = dispatcher.begin_operation(BeginOperationRequest {
        purpose: Purpose::Sign,
        key_blob,
        in_params: AuthorizationSet::new(),
    });
    assert_eq!(begin.unwrap_err(), KmError::UnsupportedPurpose);

    let mut unsupported_algorithm_description = AuthorizationSet::new();
    unsupported_algorithm_description.push_back(KeyParameter::enum_value(TAG_ALGORITHM, 0)); // RSA, no factory installed
    let result = dispatcher.generate_key(GenerateKeyRequest {
        key_description: unsupported_algorithm_description,
        attestation_key: None,
    });
    assert_eq!(result.unwrap_err(), KmError::UnsupportedAlgorithm);
}

/// A null `EnforcementPolicy` degrades HMAC/timestamp/verify calls to
/// `UNIMPLEMENTED` rather than failing closed or panicking (spec.md §4.5,
/// §7).
#[test]
fn null_policy_degrades_policy_calls_to_unimplemented() {
    let dispatcher = dispatcher(4);
    let result = dispatcher.compute_shared_hmac(ComputeSharedHmacRequest { params: Vec::new() });
    assert_eq!(result.unwrap_err(), KmError::Unimplemented);
}

/// `Configure` rejects a second call, and `AddRngEntropy` is forwarded
/// byte-for-byte (spec.md §4.7, §5).
#[test]
fn configure_rejects_reconfiguration_and_rng_entropy_is_forwarded() {
    let dispatcher = dispatcher(4);
    assert!(dispatcher
        .configure(ConfigureRequest {
            system_version: SystemVersion::new(1, 101),
        })
        .is_ok());
    assert!(dispatcher
        .configure(ConfigureRequest {
            system_version: SystemVersion::new(1, 102),
        })
        .is_err());

    let request = AddRngEntropyRequest { data: vec![1, 2, 3] };
    dispatcher.add_rng_entropy(&request.data).expect("entropy is accepted");
    assert_eq!(dispatcher.context().rng_entropy_log(), vec![1, 2, 3]);
}

fn secure_ids(hw_enforced: &AuthorizationSet) -> Vec<u64> {
    hw_enforced
        .iter()
        .filter(|param| param.tag == TAG_USER_SECURE_ID)
        .map(|param| match param.value {
            ParamValue::ULong(value) => value,
            _ => panic!("USER_SECURE_ID must carry a ULong value"),
        })
        .collect()
}

/// ImportWrappedKey rewrites the unwrapped description's `USER_SECURE_ID`
/// authenticator-type mask into one entry per asserted bit, in
/// password-then-fingerprint order, and adds the KeyMint1+
/// certificate-validity tags in the same pass (spec.md §4.7, §8 invariant 7).
#[test]
fn import_wrapped_key_rewrites_secure_ids_in_password_then_fingerprint_order() {
    let dispatcher = dispatcher(4);
    let wrapping_key_blob = generate_aes_key(&dispatcher, aes_description());

    let mut unwrapped_description = aes_description();
    let mask = HardwareAuthenticatorType::PASSWORD | HardwareAuthenticatorType::FINGERPRINT;
    unwrapped_description.push_back(KeyParameter::ulong(TAG_USER_SECURE_ID, mask as u64));
    let wrapped_key_data = keymint_testkit::blob_codec::encode_wrapped(
        KeyFormat::Raw,
        &unwrapped_description,
        &[0u8; 16],
    );

    let response = dispatcher
        .import_wrapped_key(ImportWrappedKeyRequest {
            wrapped_key_data,
            wrapping_key_blob,
            masking_key: Vec::new(),
            unwrapping_params: AuthorizationSet::new(),
            password_sid: 42,
            biometric_sid: 99,
        })
        .expect("import_wrapped_key succeeds");

    assert_eq!(secure_ids(&response.characteristics.hw_enforced), vec![42, 99]);
    assert!(response
        .characteristics
        .hw_enforced
        .contains_tag(TAG_CERTIFICATE_NOT_BEFORE));
}

/// When the unwrapped description carries no `USER_SECURE_ID` at all, the
/// SID rewrite is a no-op and the certificate-validity tags must not be
/// injected either — both are gated on the same mask being present
/// (spec.md §4.7; `original_source/android_keymaster.cpp`'s
/// `if (sid_idx != -1)` covers both).
#[test]
fn import_wrapped_key_without_secure_id_adds_no_certificate_tags() {
    let dispatcher = dispatcher(4);
    let wrapping_key_blob = generate_aes_key(&dispatcher, aes_description());

    let wrapped_key_data =
        keymint_testkit::blob_codec::encode_wrapped(KeyFormat::Raw, &aes_description(), &[0u8; 16]);

    let response = dispatcher
        .import_wrapped_key(ImportWrappedKeyRequest {
            wrapped_key_data,
            wrapping_key_blob,
            masking_key: Vec::new(),
            unwrapping_params: AuthorizationSet::new(),
            password_sid: 42,
            biometric_sid: 99,
        })
        .expect("import_wrapped_key succeeds");

    assert!(secure_ids(&response.characteristics.hw_enforced).is_empty());
    assert!(!response
        .characteristics
        .hw_enforced
        .contains_tag(TAG_CERTIFICATE_NOT_BEFORE));
}
