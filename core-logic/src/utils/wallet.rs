use crate::error::WalletError;
use std::fs;
use std::path::Path;
use zeroize::Zeroizing;

/// Read a raw signing key from a local file.
///
/// Accepts surrounding whitespace and an optional `0x` prefix; anything
/// that is not a 32-byte hex string is rejected. The key stays in
/// zeroizing memory from the moment it is read.
pub fn load_private_key(path: &Path) -> Result<Zeroizing<String>, WalletError> {
    if !path.exists() {
        return Err(WalletError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let contents = Zeroizing::new(fs::read_to_string(path).map_err(|e| WalletError::Io {
        path: path.display().to_string(),
        msg: e.to_string(),
    })?);

    let trimmed = contents.trim();
    let key = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    if key.len() != 64 {
        return Err(WalletError::InvalidKeyLength { length: key.len() });
    }
    if hex::decode(key).is_err() {
        return Err(WalletError::InvalidKeyFormat);
    }

    Ok(Zeroizing::new(key.to_string()))
}
