//! Shared `X-Hub-Signature` verification.
//!
//! GitHub and Bitbucket Server use the same scheme: the header carries
//! `sha512=` followed by the hex HMAC-SHA512 of the raw request body keyed
//! by the endpoint's secret.

use crate::secrets::Secret;
use crate::sources::SourceError;
use hmac::{Hmac, Mac};
use sha2::Sha512;

/// Header carrying the body signature.
pub(crate) const HUB_SIGNATURE_HEADER: &str = "x-hub-signature";

/// Verify an `X-Hub-Signature` header value against the raw body bytes.
///
/// Every defect (missing header, wrong prefix, non-hex digest, digest
/// mismatch) collapses to [`SourceError::AuthenticationFailed`]; the
/// caller has no legitimate reason to distinguish them, and the response
/// must not help an attacker probe the scheme.
///
/// The digest comparison goes through [`Mac::verify_slice`], which is
/// constant-time.
pub(crate) fn verify_hub_signature(
    header: Option<&str>,
    body: &[u8],
    secret: &Secret,
) -> Result<(), SourceError> {
    type HmacSha512 = Hmac<Sha512>;

    let hex_digest = header
        .and_then(|value| value.strip_prefix("sha512="))
        .ok_or(SourceError::AuthenticationFailed)?;
    let digest = hex::decode(hex_digest).map_err(|_| SourceError::AuthenticationFailed)?;

    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|_| SourceError::AuthenticationFailed)?;
    mac.update(body);
    mac.verify_slice(&digest)
        .map_err(|_| SourceError::AuthenticationFailed)
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
