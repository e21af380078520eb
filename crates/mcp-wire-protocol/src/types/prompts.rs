//! Prompt descriptors and the `prompts/*` request/result shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::content::ContentBlock;

/// One named argument a prompt template accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    /// Argument name, referenced as `{{name}}` in template text.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether callers must supply this argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// A prompt template the server exposes, as advertised via `prompts/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique programmatic name.
    pub name: String,
    /// Human-readable title, if distinct from `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Arguments the prompt accepts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<PromptArgument>>,
}

/// `prompts/list` result: a page of prompts plus an opaque cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPromptsResult {
    /// The prompts in this page.
    pub prompts: Vec<Prompt>,
    /// Opaque cursor to pass as `cursor` to fetch the next page, if any.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// One message in a rendered prompt conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Who the message is attributed to.
    pub role: String,
    /// The message content.
    pub content: ContentBlock,
}

/// `prompts/get` request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptRequest {
    /// The prompt's name.
    pub name: String,
    /// Arguments to substitute into the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<HashMap<String, String>>,
}

/// `prompts/get` result: the rendered message sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptResult {
    /// Human-readable description of the rendered prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The rendered messages.
    pub messages: Vec<PromptMessage>,
}

/// Substitute `{{name}}` placeholders in `text` from `arguments`, leaving
/// any placeholder with no matching argument untouched. Non-recursive: a
/// substituted value is never itself re-scanned for placeholders.
#[must_use]
pub fn render_template(text: &str, arguments: &HashMap<String, String>) -> String {
    let mut rendered = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let Some(end) = rest[start..].find("}}") else {
            rendered.push_str(rest);
            return rendered;
        };
        let end = start + end;
        rendered.push_str(&rest[..start]);
        let name = rest[start + 2..end].trim();
        match arguments.get(name) {
            Some(value) => rendered.push_str(value),
            None => rendered.push_str(&rest[start..end + 2]),
        }
        rest = &rest[end + 2..];
    }
    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_argument() {
        let mut args = HashMap::new();
        args.insert("name".to_string(), "world".to_string());
        assert_eq!(render_template("hello {{name}}", &args), "hello world");
    }

    #[test]
    fn leaves_unknown_placeholder_untouched() {
        let args = HashMap::new();
        assert_eq!(render_template("hello {{name}}", &args), "hello {{name}}");
    }

    #[test]
    fn handles_multiple_placeholders() {
        let mut args = HashMap::new();
        args.insert("a".to_string(), "1".to_string());
        args.insert("b".to_string(), "2".to_string());
        assert_eq!(render_template("{{a}}-{{b}}", &args), "1-2");
    }

    #[test]
    fn plain_text_with_no_placeholders_is_unchanged() {
        let args = HashMap::new();
        assert_eq!(render_template("no templates here", &args), "no templates here");
    }
}
