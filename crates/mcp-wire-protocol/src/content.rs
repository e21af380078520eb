//! Content blocks and the tool-call result envelope.
//!
//! Per the adopted contract, `tools/call` never produces a JSON-RPC error:
//! executor failures and "tool not found" are both reported by setting
//! `is_error` on the envelope, so a client can always read `result.content`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A base64-encoded blob, kept as a distinct type so callers don't confuse
/// it with arbitrary text.
pub type Base64String = String;

/// A MIME type string, e.g. `"image/png"`.
pub type MimeType = String;

/// A resource URI, e.g. `"file:///tmp/a.txt"`.
pub type Uri = String;

/// Display hints attached to a content block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    /// Intended audience roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<String>>,
    /// Relative priority, 0.0-1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

/// A block of plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// The text itself.
    pub text: String,
    /// Optional display hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl TextContent {
    /// Build a bare text block with no annotations or metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: None,
            meta: None,
        }
    }
}

/// A block of base64-encoded image data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageContent {
    /// Base64-encoded bytes.
    pub data: Base64String,
    /// The image's MIME type.
    #[serde(rename = "mimeType")]
    pub mime_type: MimeType,
    /// Optional display hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// A block of base64-encoded audio data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioContent {
    /// Base64-encoded bytes.
    pub data: Base64String,
    /// The audio's MIME type.
    #[serde(rename = "mimeType")]
    pub mime_type: MimeType,
    /// Optional display hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// A pointer to a resource, without embedding its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Programmatic name.
    pub name: String,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The resource's URI.
    pub uri: Uri,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type of the referenced resource.
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<MimeType>,
    /// Optional display hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    /// Size in bytes, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Text contents of an embedded resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextResourceContents {
    /// The resource's URI.
    pub uri: Uri,
    /// MIME type, if known.
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<MimeType>,
    /// The text itself.
    pub text: String,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Binary contents of an embedded resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobResourceContents {
    /// The resource's URI.
    pub uri: Uri,
    /// MIME type, if known.
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<MimeType>,
    /// Base64-encoded bytes.
    pub blob: Base64String,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Either text or binary resource contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceContent {
    /// Text contents.
    Text(TextResourceContents),
    /// Binary contents.
    Blob(BlobResourceContents),
}

/// A resource embedded inline rather than referenced by link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedResource {
    /// The embedded contents.
    pub resource: ResourceContent,
    /// Optional display hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// One block of tool/prompt/resource output, tagged by `"type"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Plain text.
    #[serde(rename = "text")]
    Text(TextContent),
    /// Base64 image.
    #[serde(rename = "image")]
    Image(ImageContent),
    /// Base64 audio.
    #[serde(rename = "audio")]
    Audio(AudioContent),
    /// Pointer to a resource.
    #[serde(rename = "resource_link")]
    ResourceLink(ResourceLink),
    /// Inline resource contents.
    #[serde(rename = "resource")]
    Resource(EmbeddedResource),
}

impl ContentBlock {
    /// Build a plain text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextContent::new(text))
    }
}

/// The `{content, isError}` envelope every `tools/call` result carries.
///
/// Never constructed as a JSON-RPC error: a tool that fails to run still
/// produces this shape, with `is_error` set and a descriptive text block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Output content blocks.
    pub content: Vec<ContentBlock>,
    /// Whether the tool invocation failed. Always serialized, even when
    /// `false` — a successful result's wire body is `{content,"isError":false}`.
    #[serde(rename = "isError", default)]
    pub is_error: bool,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl CallToolResult {
    /// A successful result carrying the given content blocks.
    #[must_use]
    pub fn success(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            is_error: false,
            meta: None,
        }
    }

    /// A failed result: `is_error` set, with a single text block describing
    /// the failure. Used for both "tool not found" and handler errors, per
    /// the adopted contract that `tools/call` never surfaces a JSON-RPC
    /// error.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(message)],
            is_error: true,
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_is_error_false_on_the_wire() {
        let result = CallToolResult::success(vec![ContentBlock::text("ok")]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isError"], false);
    }

    #[test]
    fn failure_sets_is_error_true() {
        let result = CallToolResult::failure("boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isError"], true);
    }

    #[test]
    fn content_block_tags_by_type() {
        let block = ContentBlock::text("hi");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn resource_content_is_untagged_text_or_blob() {
        let text = ResourceContent::Text(TextResourceContents {
            uri: "file:///a".to_string(),
            mime_type: None,
            text: "hello".to_string(),
            meta: None,
        });
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["text"], "hello");
        assert!(json.get("blob").is_none());
    }
}
