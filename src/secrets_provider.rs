use std::path::Path;

pub mod file;

/// Trait for operating with secrets providers.
///
/// The ingest token is retrieved through this seam so the configuration
/// loader can be exercised against fixture files in tests.
pub trait SecretsProvider {
    type Error: std::error::Error;

    fn get_secret(&self, secret_path: &Path) -> Result<String, Self::Error>;
}
