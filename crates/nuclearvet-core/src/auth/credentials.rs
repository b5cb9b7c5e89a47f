use anyhow::{bail, Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "nuclearvet-console";

/// Remembered login passwords, kept in the OS keychain keyed by email.
pub struct CredentialStore;

impl CredentialStore {
    fn entry(email: &str) -> Result<Entry> {
        let email = email.trim();
        if email.is_empty() {
            bail!("A remembered password needs an email address");
        }
        Entry::new(SERVICE_NAME, email)
            .with_context(|| format!("Failed to open keychain entry for {}", email))
    }

    /// Remember `password` for the next login as `email`
    pub fn store(email: &str, password: &str) -> Result<()> {
        Self::entry(email)?
            .set_password(password)
            .with_context(|| format!("Failed to save password for {} in keychain", email))
    }

    pub fn get_password(email: &str) -> Result<String> {
        match Self::entry(email)?.get_password() {
            Ok(password) => Ok(password),
            Err(keyring::Error::NoEntry) => bail!("No remembered password for {}", email),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read password for {} from keychain", email))
            }
        }
    }

    /// Forget the remembered password for `email`. Forgetting nothing is fine.
    pub fn delete(email: &str) -> Result<()> {
        match Self::entry(email)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove password for {} from keychain", email))
            }
        }
    }

    pub fn has_credentials(email: &str) -> bool {
        Self::entry(email)
            .ok()
            .is_some_and(|entry| entry.get_password().is_ok())
    }
}
