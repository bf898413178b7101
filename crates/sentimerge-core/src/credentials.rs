use std::path::Path;

use crate::ConfigError;

/// Static AWS access key pair used to sign Comprehend requests.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[redacted]")
            .finish()
    }
}

/// Load AWS credentials from a key file.
///
/// The first line is the access key id, the second the secret access key.
/// Anything after the second line is ignored.
///
/// # Errors
///
/// Returns [`ConfigError::KeyFile`] if the file cannot be read or has fewer
/// than two non-empty lines.
pub fn load_aws_credentials(path: &Path) -> Result<AwsCredentials, ConfigError> {
    let key_file_error = |reason: String| ConfigError::KeyFile {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| key_file_error(e.to_string()))?;
    parse_aws_credentials(&contents).ok_or_else(|| {
        key_file_error("expected access key id and secret access key on the first two lines".to_string())
    })
}

fn parse_aws_credentials(contents: &str) -> Option<AwsCredentials> {
    let mut lines = contents.lines().map(str::trim);
    let access_key_id = lines.next().filter(|l| !l.is_empty())?;
    let secret_access_key = lines.next().filter(|l| !l.is_empty())?;
    Some(AwsCredentials {
        access_key_id: access_key_id.to_string(),
        secret_access_key: secret_access_key.to_string(),
    })
}
