use super::schema::Config;
use crate::security::SecretStore;
use anyhow::Result;

impl Config {
    pub fn secret_store(&self) -> SecretStore {
        SecretStore::new(&self.config_dir, self.secrets.encrypt)
    }

    /// Decrypt secrets loaded from disk. Returns `true` when the file still
    /// holds a plaintext secret that should be re-saved encrypted.
    pub(super) fn decrypt_config_secrets_in_place(&mut self) -> Result<bool> {
        let Some(current) = self.api_key.as_deref().map(str::trim) else {
            return Ok(false);
        };
        if current.is_empty() {
            self.api_key = None;
            return Ok(false);
        }

        let needs_persist = self.secrets.encrypt && !SecretStore::is_encrypted(current);
        let decrypted = self.secret_store().decrypt(current)?;
        self.api_key = Some(decrypted);
        Ok(needs_persist)
    }

    pub(super) fn config_for_persistence(&self) -> Result<Self> {
        let mut persisted = self.clone();
        if self.secrets.encrypt {
            persisted.api_key = self.secret_store().encrypt_opt(self.api_key.as_deref())?;
        }
        Ok(persisted)
    }
}
