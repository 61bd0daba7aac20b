//! SHA-256 content digests for asset files.
//!
//! A digest names an asset's bytes. Digest-addressed asset stores fan
//! files out into subdirectories keyed by the digest's first two
//! characters, so digest strings are validated up front and `prefix` is
//! part of the contract.

use std::{
    path::Path,
    fmt::{self, Formatter, Display},
};
use anyhow::{
    Result,
    ensure,
};
use tokio::fs;


const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";


/// Pre-validated lowercase hex SHA-256 digest string.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Digest(String);

impl Digest {
    pub fn try_new(s: String) -> Result<Self> {
        validate_digest(&s)?;
        Ok(Digest(s))
    }

    /// First two characters.
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_digest(digest: &str) -> Result<()> {
    ensure!(digest.len() == 64, "digest {:?} wrong len", digest);
    for c in digest.chars() {
        ensure!(
            matches!(c, '0'..='9' | 'a'..='f'),
            "digest {:?} has illegal char {}",
            digest,
            c,
        )
    }
    Ok(())
}

/// SHA-256 digest of a byte string.
pub fn digest_bytes(data: &[u8]) -> Digest {
    let mut hex = String::with_capacity(64);
    for byte in hmac_sha256::Hash::hash(data) {
        hex.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        hex.push(HEX_DIGITS[(byte & 0xf) as usize] as char);
    }
    Digest(hex)
}

/// SHA-256 digest of a file's contents.
pub async fn digest_file<P: AsRef<Path>>(path: P) -> Result<Digest> {
    Ok(digest_bytes(&fs::read(path).await?))
}


#[test]
fn digests_known_vectors() {
    assert_eq!(
        digest_bytes(b"").as_ref(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    );
    assert_eq!(
        digest_bytes(b"abc").as_ref(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    );
}

#[test]
fn try_new_validates() {
    let good = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    assert!(Digest::try_new(good.to_owned()).is_ok());
    // wrong length
    assert!(Digest::try_new(good[..40].to_owned()).is_err());
    assert!(Digest::try_new(format!("{}00", good)).is_err());
    assert!(Digest::try_new(String::new()).is_err());
    // case and charset
    assert!(Digest::try_new(good.to_uppercase()).is_err());
    assert!(Digest::try_new(good.replace('e', "g")).is_err());
}

#[test]
fn prefix_is_first_two_chars() {
    let digest = digest_bytes(b"abc");
    assert_eq!(digest.prefix(), "ba");
    assert_eq!(format!("{}", digest), digest.as_ref());
}

#[tokio::test]
async fn digest_file_matches_digest_bytes() {
    let path = std::env::temp_dir()
        .join(format!("digest_file_test_{}.bin", std::process::id()));
    tokio::fs::write(&path, b"abc").await.unwrap();
    let digest = digest_file(&path).await.unwrap();
    assert_eq!(digest, digest_bytes(b"abc"));
    tokio::fs::remove_file(&path).await.ok();

    assert!(digest_file("/definitely/not/a/real/path.bin").await.is_err());
}
