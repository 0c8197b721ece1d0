use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::secrets_provider::SecretsProvider;

#[derive(Debug, Error)]
#[error("resolving file secret: {0}")]
pub struct FileSecretProviderError(String);

/// A secrets provider that retrieves secrets from the local filesystem.
///
/// Secret contents are trimmed, token files usually carry a trailing newline.
#[derive(Default)]
pub struct FileSecretProvider;

impl FileSecretProvider {
    pub fn new() -> Self {
        FileSecretProvider
    }
}

impl SecretsProvider for FileSecretProvider {
    type Error = FileSecretProviderError;

    fn get_secret(&self, secret_path: &Path) -> Result<String, Self::Error> {
        fs::read_to_string(secret_path)
            .map(|content| content.trim().to_string())
            .map_err(|err| {
                FileSecretProviderError(format!(
                    "reading '{}' secret: {err}",
                    secret_path.display()
                ))
            })
    }
}
