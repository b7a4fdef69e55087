//! Canonical update model forwarded to the downstream notification API.
//!
//! Every provider payload is reduced to one of two shapes before it leaves
//! the gateway: an image push or a git push. The serialized field names and
//! their ordering are part of the wire contract consumed by the downstream
//! system and must not change:
//!
//! ```text
//! {"Kind":"image","Source":{"Name":{"Domain":"","Image":"<owner>/<repo>"}}}
//! {"Kind":"git","Source":{"URL":"<ssh-url>","Branch":"<branch-or-ref>"}}
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Update
// ============================================================================

/// A provider-independent change event.
///
/// Serialized with `Kind` as the discriminant and the variant payload under
/// `Source`, matching the downstream wire contract exactly.
///
/// # Examples
///
/// ```rust
/// use hook_relay_core::Update;
///
/// let update = Update::image("svendowideit/testhook");
/// assert_eq!(
///     serde_json::to_string(&update).unwrap(),
///     r#"{"Kind":"image","Source":{"Name":{"Domain":"","Image":"svendowideit/testhook"}}}"#,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Kind", content = "Source")]
pub enum Update {
    /// A container image was pushed to a registry.
    #[serde(rename = "image")]
    Image {
        #[serde(rename = "Name")]
        name: ImageName,
    },

    /// A git ref was pushed to a repository.
    #[serde(rename = "git")]
    Git {
        #[serde(rename = "URL")]
        url: String,
        #[serde(rename = "Branch")]
        branch: String,
    },
}

/// Registry-qualified image name.
///
/// `domain` is the empty string when the provider supplies no registry
/// domain, which downstream interprets as the default registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageName {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Image")]
    pub image: String,
}

impl Update {
    /// Build an image update for the default registry (empty domain).
    pub fn image(image: impl Into<String>) -> Self {
        Self::Image {
            name: ImageName {
                domain: String::new(),
                image: image.into(),
            },
        }
    }

    /// Build a git update from a repository URL and a pushed ref.
    ///
    /// The ref is shortened with [`short_ref`], so `refs/heads/master`
    /// becomes `master` while tag refs pass through unstripped.
    pub fn git(url: impl Into<String>, git_ref: &str) -> Self {
        Self::Git {
            url: url.into(),
            branch: short_ref(git_ref).to_string(),
        }
    }
}

// ============================================================================
// Ref handling
// ============================================================================

/// Strip a leading `refs/heads/` from a pushed ref.
///
/// Branch refs come out in short form; anything else (notably
/// `refs/tags/...`) is returned unchanged so that tag-vs-branch ambiguity
/// is preserved for the downstream consumer.
pub fn short_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref)
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
