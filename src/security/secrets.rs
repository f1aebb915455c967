//! At-rest encryption for the Gemini API key and calendar tokens.
//!
//! Values are sealed with ChaCha20-Poly1305 under a 32-byte key kept in
//! `<root>/.secret_key` (owner-only on unix) and stored as
//! `ENC:<hex(nonce || ciphertext)>`. Anything without the prefix is treated
//! as plaintext so hand-edited config files keep working.

use anyhow::{Context, Result};
use chacha20poly1305::{
    ChaCha20Poly1305, KeyInit, Nonce,
    aead::{Aead, OsRng, rand_core::RngCore},
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const KEY_FILE: &str = ".secret_key";
const ENC_PREFIX: &str = "ENC:";
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

pub struct SecretStore {
    key_path: PathBuf,
    encrypt: bool,
}

impl SecretStore {
    pub fn new(root: &Path, encrypt: bool) -> Self {
        Self {
            key_path: root.join(KEY_FILE),
            encrypt,
        }
    }

    #[must_use]
    pub fn is_encrypted(value: &str) -> bool {
        value.starts_with(ENC_PREFIX)
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if !self.encrypt || plaintext.is_empty() || Self::is_encrypted(plaintext) {
            return Ok(plaintext.to_string());
        }

        let cipher = self.cipher()?;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| anyhow::anyhow!("encryption failed: {e}"))?;

        let mut sealed = nonce_bytes.to_vec();
        sealed.extend_from_slice(&ciphertext);
        Ok(format!("{ENC_PREFIX}{}", hex::encode(sealed)))
    }

    pub fn decrypt(&self, value: &str) -> Result<String> {
        let Some(hex_str) = value.strip_prefix(ENC_PREFIX) else {
            return Ok(value.to_string());
        };

        let sealed = hex::decode(hex_str).context("invalid hex in encrypted value")?;
        if sealed.len() < NONCE_LEN {
            anyhow::bail!("encrypted value too short");
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);

        let plaintext = self
            .cipher()?
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| anyhow::anyhow!("decryption failed: {e}"))?;

        String::from_utf8(plaintext).context("decrypted value is not valid UTF-8")
    }

    /// Encrypt an optional value, leaving `None` alone.
    pub fn encrypt_opt(&self, value: Option<&str>) -> Result<Option<String>> {
        value.map(|v| self.encrypt(v)).transpose()
    }

    pub fn decrypt_opt(&self, value: Option<&str>) -> Result<Option<String>> {
        value.map(|v| self.decrypt(v)).transpose()
    }

    fn cipher(&self) -> Result<ChaCha20Poly1305> {
        let key = self.load_or_create_key()?;
        ChaCha20Poly1305::new_from_slice(&key).context("invalid key length")
    }

    fn read_key(&self) -> Result<Zeroizing<Vec<u8>>> {
        let hex_key = Zeroizing::new(
            fs::read_to_string(&self.key_path).context("failed to read key file")?,
        );
        let key = Zeroizing::new(hex::decode(hex_key.trim()).context("invalid hex in key file")?);
        if key.len() != KEY_LEN {
            anyhow::bail!("key file has invalid length (expected {KEY_LEN} bytes)");
        }
        Ok(key)
    }

    fn write_key(&self, key: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.key_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.key_path)?;
        file.write_all(hex::encode(key).as_bytes())?;
        file.sync_all()
    }

    fn restrict_permissions(&self) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.key_path, fs::Permissions::from_mode(0o600))
                .context("failed to set key file permissions")?;
        }
        Ok(())
    }

    fn load_or_create_key(&self) -> Result<Zeroizing<Vec<u8>>> {
        if self.key_path.exists() {
            self.restrict_permissions()?;
            return self.read_key();
        }

        let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut key);
        match self.write_key(&key) {
            Ok(()) => {
                tracing::debug!(path = %self.key_path.display(), "created secret key");
                Ok(key)
            }
            // Another process won the race; use its key.
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                self.restrict_permissions()?;
                self.read_key()
            }
            Err(e) => Err(e).context("failed to create key file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn api_key_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = SecretStore::new(dir.path(), true);

        let sealed = store.encrypt("AIzaSyExample").unwrap();
        assert!(SecretStore::is_encrypted(&sealed));
        assert!(!sealed.contains("AIzaSyExample"));
        assert_eq!(store.decrypt(&sealed).unwrap(), "AIzaSyExample");
    }

    #[test]
    fn same_value_seals_differently() {
        let dir = TempDir::new().unwrap();
        let store = SecretStore::new(dir.path(), true);
        assert_ne!(store.encrypt("token").unwrap(), store.encrypt("token").unwrap());
    }

    #[test]
    fn key_survives_new_store_instances() {
        let dir = TempDir::new().unwrap();
        let sealed = SecretStore::new(dir.path(), true).encrypt("ya29.token").unwrap();
        let reopened = SecretStore::new(dir.path(), true);
        assert_eq!(reopened.decrypt(&sealed).unwrap(), "ya29.token");
    }

    #[test]
    fn tampered_value_fails() {
        let dir = TempDir::new().unwrap();
        let store = SecretStore::new(dir.path(), true);
        let mut sealed = store.encrypt("secret").unwrap();
        let last = sealed.pop().unwrap();
        sealed.push(if last == '0' { '1' } else { '0' });
        assert!(store.decrypt(&sealed).is_err());
    }

    #[test]
    fn disabled_store_and_plaintext_pass_through() {
        let dir = TempDir::new().unwrap();
        let store = SecretStore::new(dir.path(), false);
        assert_eq!(store.encrypt("plain").unwrap(), "plain");
        assert_eq!(store.decrypt("plain").unwrap(), "plain");
        assert!(!dir.path().join(KEY_FILE).exists());
    }

    #[test]
    fn optional_values() {
        let dir = TempDir::new().unwrap();
        let store = SecretStore::new(dir.path(), true);
        assert_eq!(store.encrypt_opt(None).unwrap(), None);
        let sealed = store.encrypt_opt(Some("x")).unwrap();
        assert_eq!(store.decrypt_opt(sealed.as_deref()).unwrap().as_deref(), Some("x"));
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        SecretStore::new(dir.path(), true).encrypt("x").unwrap();
        let mode = fs::metadata(dir.path().join(KEY_FILE)).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
