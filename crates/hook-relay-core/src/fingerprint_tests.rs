//! Tests for fingerprint derivation.

use super::*;

fn secret(bytes: &[u8]) -> Secret {
    Secret::new(bytes.to_vec())
}

/// Identical inputs always derive the identical fingerprint.
#[test]
fn test_derivation_is_deterministic() {
    let a = Fingerprint::derive(SourceKind::GitHub, &secret(b"shared-key"));
    let b = Fingerprint::derive(SourceKind::GitHub, &secret(b"shared-key"));

    assert_eq!(a, b);
    assert_eq!(a.as_str(), b.as_str());
}

/// Different secrets yield different fingerprints.
#[test]
fn test_different_secrets_diverge() {
    let a = Fingerprint::derive(SourceKind::DockerHub, &secret(b"key-one"));
    let b = Fingerprint::derive(SourceKind::DockerHub, &secret(b"key-two"));

    assert_ne!(a, b);
}

/// The same secret registered under two provider kinds yields two distinct
/// hook URLs.
#[test]
fn test_provider_kind_separates_fingerprints() {
    let s = secret(b"shared-key");
    let github = Fingerprint::derive(SourceKind::GitHub, &s);
    let gitlab = Fingerprint::derive(SourceKind::GitLab, &s);

    assert_ne!(github, gitlab);
}

/// The token is lowercase hex of a SHA-256 digest.
#[test]
fn test_fingerprint_is_hex_sha256() {
    let fp = Fingerprint::derive(SourceKind::BitbucketCloud, &secret(b"k"));

    assert_eq!(fp.as_str().len(), 64);
    assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
}

/// Display and Debug never reveal the full token.
#[test]
fn test_display_and_debug_truncate() {
    let fp = Fingerprint::derive(SourceKind::GitLab, &secret(b"k"));

    let shown = format!("{fp}");
    let debugged = format!("{fp:?}");
    assert!(!shown.contains(fp.as_str()));
    assert!(!debugged.contains(fp.as_str()));
    assert!(shown.starts_with(&fp.as_str()[..8]));
}
