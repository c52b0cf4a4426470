//! `GetKeyCharacteristics` / `ExportKey` / `AttestKey` / `UpgradeKey` /
//! `DeleteKey` / `DeleteAllKeys` (spec.md §4.7).

use keymint_types::{KeyParameter, Result};

use keymint_api_decl::{
    AttestKeyRequest, AttestKeyResponse, DeleteAllKeysResponse, DeleteKeyRequest,
    DeleteKeyResponse, ExportKeyRequest, ExportKeyResponse, GetKeyCharacteristicsRequest,
    GetKeyCharacteristicsResponse, KeyCharacteristics, UpgradeKeyRequest, UpgradeKeyResponse,
};

use super::Dispatcher;
use keymint_core::Context;

impl<C: Context> Dispatcher<C> {
    /// spec.md §4.7: parses the blob (applying the version check via
    /// `load_key`) and scavenges both authorization lists into the
    /// response.
    pub fn get_key_characteristics(
        &self,
        request: GetKeyCharacteristicsRequest,
    ) -> Result<GetKeyCharacteristicsResponse> {
        let key = self.load_key(&request.key_blob, &request.additional_params)?;
        Ok(GetKeyCharacteristicsResponse {
            characteristics: KeyCharacteristics {
                hw_enforced: key.hw_enforced().clone(),
                sw_enforced: key.sw_enforced().clone(),
            },
        })
    }

    /// spec.md §4.7: "ownership of the returned bytes transfers to the
    /// response" — the factory formats the key's own material for export;
    /// the core never interprets it.
    pub fn export_key(&self, request: ExportKeyRequest) -> Result<ExportKeyResponse> {
        let key = self.load_key(&request.key_blob, &request.additional_params)?;
        let factory = key.factory().clone();
        if !factory.supported_export_formats().contains(&request.key_format) {
            return Err(keymint_types::KmError::UnsupportedKeyFormat);
        }
        Ok(ExportKeyResponse {
            exported_keymaterial: key.material().to_vec(),
        })
    }

    /// spec.md §4.7: loads the key (applying the version check), attaches
    /// `ATTESTATION_APPLICATION_ID` to `sw_enforced` if the caller supplied
    /// one, then asks the `Context` to build the certificate chain.
    pub fn attest_key(&self, request: AttestKeyRequest) -> Result<AttestKeyResponse> {
        let key = self.load_key(&request.key_blob, &keymint_core::AuthorizationSet::new())?;

        let attested_key = match request
            .attest_params
            .get_tag_value(keymint_types::tag::TAG_ATTESTATION_APPLICATION_ID)
            .cloned()
        {
            Some(app_id) => {
                let mut sw_enforced = key.sw_enforced().clone();
                sw_enforced.push_back(KeyParameter::new(
                    keymint_types::tag::TAG_ATTESTATION_APPLICATION_ID,
                    app_id,
                ));
                keymint_core::key::Key::new(
                    key.material().to_vec(),
                    key.hw_enforced().clone(),
                    sw_enforced,
                    key.factory().clone(),
                )
            }
            None => key,
        };

        let cert_chain = self.context().generate_attestation(
            &attested_key,
            &request.attest_params,
            None,
            request.issuer_subject.as_deref(),
        )?;
        Ok(AttestKeyResponse {
            certificate_chain: cert_chain,
        })
    }

    pub fn upgrade_key(&self, request: UpgradeKeyRequest) -> Result<UpgradeKeyResponse> {
        let upgraded = self
            .context()
            .upgrade_key_blob(&request.key_blob_to_upgrade, &request.upgrade_params)?;
        Ok(UpgradeKeyResponse {
            upgraded_key_blob: upgraded,
        })
    }

    pub fn delete_key(&self, request: DeleteKeyRequest) -> Result<DeleteKeyResponse> {
        self.context().delete_key(&request.key_blob)?;
        Ok(DeleteKeyResponse)
    }

    pub fn delete_all_keys(&self) -> Result<DeleteAllKeysResponse> {
        self.context().delete_all_keys()?;
        Ok(DeleteAllKeysResponse)
    }
}
