//! OpenSSH public key files
//!
//! A public key line is `<algorithm> <base64 blob> [comment]`, where the blob is
//! the SSH wire format: a big-endian u32 length followed by the algorithm name,
//! then the key material.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// Read a public key file and return the trimmed key line
pub fn read_public_key<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read key file {}", path.display()))?;
    let key = content.trim();
    validate_public_key(key)
        .with_context(|| format!("{} is not an OpenSSH public key", path.display()))?;
    Ok(key.to_string())
}

/// Check that a key line is structurally an OpenSSH public key
pub fn validate_public_key(key: &str) -> Result<()> {
    if key.starts_with("-----BEGIN") {
        anyhow::bail!("file contains a private key; pass the .pub file instead");
    }

    let mut parts = key.split_whitespace();
    let (Some(algorithm), Some(blob)) = (parts.next(), parts.next()) else {
        anyhow::bail!("expected `<algorithm> <base64 key> [comment]`");
    };

    let wire = STANDARD
        .decode(blob)
        .context("key data is not valid base64")?;
    let encoded = wire_algorithm(&wire).context("key data is truncated")?;
    if encoded != algorithm.as_bytes() {
        anyhow::bail!(
            "key type {} does not match encoded type {}",
            algorithm,
            String::from_utf8_lossy(encoded)
        );
    }

    Ok(())
}

fn wire_algorithm(wire: &[u8]) -> Option<&[u8]> {
    let len: [u8; 4] = wire.get(..4)?.try_into().ok()?;
    let len = u32::from_be_bytes(len) as usize;
    wire.get(4..4 + len)
}
