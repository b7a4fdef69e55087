//! GitHub push hook adapter.
//!
//! GitHub signs the raw request body with HMAC-SHA512 and delivers it as
//! either `application/json` or a form-encoded body whose `payload` field
//! carries the JSON document. The signature always covers the raw bytes
//! actually sent, so verification happens before any form decoding.

use crate::secrets::Secret;
use crate::sources::signature::{verify_hub_signature, HUB_SIGNATURE_HEADER};
use crate::sources::{HookRequest, SourceError};
use crate::update::Update;
use serde::Deserialize;
use std::borrow::Cow;

/// Header naming the event kind of the delivery.
pub const EVENT_HEADER: &str = "x-github-event";

const PUSH_EVENT: &str = "push";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct Repository {
    ssh_url: String,
}

/// Authenticate a GitHub delivery and extract its git update.
///
/// # Errors
///
/// - [`SourceError::AuthenticationFailed`] when `X-Hub-Signature` is
///   missing or does not match the raw body.
/// - [`SourceError::UnsupportedEvent`] for any event kind other than
///   `push`.
/// - [`SourceError::MalformedPayload`] when the (possibly form-wrapped)
///   JSON does not parse as a push payload.
pub(super) fn normalize(request: &HookRequest, secret: &Secret) -> Result<Update, SourceError> {
    verify_hub_signature(request.header(HUB_SIGNATURE_HEADER), request.body(), secret)?;

    match request.header(EVENT_HEADER) {
        Some(PUSH_EVENT) => {}
        other => {
            return Err(SourceError::UnsupportedEvent {
                event: other.unwrap_or_default().to_string(),
            });
        }
    }

    let document = payload_document(request)?;
    let payload: PushPayload = serde_json::from_slice(&document)?;
    Ok(Update::git(payload.repository.ssh_url, &payload.git_ref))
}

/// Unwrap the JSON document from the delivery body.
///
/// For form-encoded deliveries the document sits in the form's `payload`
/// field; otherwise the body is the document itself.
fn payload_document(request: &HookRequest) -> Result<Cow<'_, [u8]>, SourceError> {
    let is_form = request
        .header("content-type")
        .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));

    if !is_form {
        return Ok(Cow::Borrowed(request.body()));
    }

    url::form_urlencoded::parse(request.body())
        .find(|(name, _)| name == "payload")
        .map(|(_, value)| Cow::Owned(value.into_owned().into_bytes()))
        .ok_or_else(|| SourceError::MalformedPayload {
            message: "form body has no payload field".to_string(),
        })
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
