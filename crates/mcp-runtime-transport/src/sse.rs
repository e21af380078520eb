//! Server-Sent Events framing: encoding outbound events and incrementally
//! parsing inbound ones.

use std::fmt::Write as _;

/// One SSE event: an optional id (for `Last-Event-ID` resumption), an
/// optional named event type, and a data payload that may itself contain
/// embedded newlines (each becomes its own `data:` line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event id, echoed back by a reconnecting client as `Last-Event-ID`.
    pub id: Option<String>,
    /// Named event type, e.g. `"endpoint"`. Unnamed frames carry `None`.
    pub event: Option<String>,
    /// The payload, already serialized to a string (JSON or plain text).
    pub data: String,
    /// Reconnection delay in milliseconds, rarely set.
    pub retry: Option<u64>,
}

/// Builds an [`SseEvent`] field by field.
#[derive(Debug, Default)]
pub struct SseEventBuilder {
    id: Option<String>,
    event: Option<String>,
    data: Option<String>,
    retry: Option<u64>,
}

impl SseEventBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the named event type.
    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Set the raw data payload.
    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the data payload by serializing a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` fails to serialize.
    pub fn json_data<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.data = Some(serde_json::to_string(value)?);
        Ok(self)
    }

    /// Set the reconnection delay.
    #[must_use]
    pub fn retry(mut self, retry_ms: u64) -> Self {
        self.retry = Some(retry_ms);
        self
    }

    /// Finish, defaulting to an empty data payload if none was set.
    #[must_use]
    pub fn build(self) -> SseEvent {
        SseEvent {
            id: self.id,
            event: self.event,
            data: self.data.unwrap_or_default(),
            retry: self.retry,
        }
    }
}

/// Encodes [`SseEvent`]s to the wire format: `id:`/`event:`/`retry:` lines,
/// one or more `data:` lines (one per line of the payload), and a blank
/// line terminator.
pub struct SseEncoder;

impl SseEncoder {
    /// Encode one event to its wire representation.
    #[must_use]
    pub fn encode(event: &SseEvent) -> String {
        let mut out = String::new();
        if let Some(id) = &event.id {
            let _ = writeln!(out, "id: {id}");
        }
        if let Some(kind) = &event.event {
            let _ = writeln!(out, "event: {kind}");
        }
        if let Some(retry) = event.retry {
            let _ = writeln!(out, "retry: {retry}");
        }
        if event.data.is_empty() {
            out.push_str("data: \n");
        } else {
            for line in event.data.split('\n') {
                let _ = writeln!(out, "data: {line}");
            }
        }
        out.push('\n');
        out
    }

    /// Encode a plain string payload with no id/event/retry.
    #[must_use]
    pub fn encode_string(data: impl Into<String>) -> String {
        Self::encode(&SseEventBuilder::new().data(data).build())
    }

    /// Encode a keepalive: a comment line, ignored by clients but enough
    /// to keep intermediaries from timing out the connection.
    #[must_use]
    pub fn encode_keepalive() -> String {
        ": keepalive\n\n".to_string()
    }

    /// Encode a bare comment line.
    #[must_use]
    pub fn encode_comment(text: &str) -> String {
        format!(": {text}\n\n")
    }
}

/// Incrementally parses a byte stream into [`SseEvent`]s, tolerating
/// arbitrary chunk boundaries.
#[derive(Default)]
pub struct SseParser {
    buffer: String,
    current_id: Option<String>,
    current_event: Option<String>,
    current_data: Vec<String>,
    current_retry: Option<u64>,
    last_event_id: Option<String>,
}

impl SseParser {
    /// A fresh parser with no buffered state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent event id seen, for resumption via `Last-Event-ID`.
    #[must_use]
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    /// Feed more bytes, returning every complete event they produced.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));
        let mut events = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line = self.buffer[..newline].trim_end_matches('\r').to_string();
            self.buffer.drain(..=newline);
            if line.is_empty() {
                if let Some(event) = self.emit_event() {
                    events.push(event);
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }
            let (field, value) = line.split_once(':').unwrap_or((line.as_str(), ""));
            let value = value.strip_prefix(' ').unwrap_or(value);
            match field {
                "id" => self.current_id = Some(value.to_string()),
                "event" => self.current_event = Some(value.to_string()),
                "data" => self.current_data.push(value.to_string()),
                "retry" => self.current_retry = value.parse().ok(),
                _ => {}
            }
        }
        events
    }

    fn emit_event(&mut self) -> Option<SseEvent> {
        if self.current_id.is_none() && self.current_event.is_none() && self.current_data.is_empty() {
            return None;
        }
        let event = SseEvent {
            id: self.current_id.take(),
            event: self.current_event.take(),
            data: self.current_data.join("\n"),
            retry: self.current_retry.take(),
        };
        if let Some(id) = &event.id {
            self.last_event_id = Some(id.clone());
        }
        self.current_data.clear();
        Some(event)
    }
}

/// Generate a monotonically distinguishable event id from a sequence
/// number, used when a feature executor doesn't supply its own.
#[must_use]
pub fn generate_event_id(sequence: u64) -> String {
    format!("{sequence}-{:08x}", fastrand::u32(..))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_parse_round_trips_a_named_event() {
        let event = SseEventBuilder::new()
            .id("1")
            .event("endpoint")
            .data("/messages?session=abc")
            .build();
        let encoded = SseEncoder::encode(&event);
        let mut parser = SseParser::new();
        let parsed = parser.feed(encoded.as_bytes());
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], event);
    }

    #[test]
    fn multiline_data_becomes_multiple_data_lines() {
        let event = SseEventBuilder::new().data("line one\nline two").build();
        let encoded = SseEncoder::encode(&event);
        assert_eq!(encoded.matches("data: ").count(), 2);
    }

    #[test]
    fn parser_tolerates_arbitrary_chunk_boundaries() {
        let encoded = SseEncoder::encode(&SseEventBuilder::new().event("ping").data("{}").build());
        let mut parser = SseParser::new();
        let mut events = Vec::new();
        for byte in encoded.as_bytes() {
            events.extend(parser.feed(&[*byte]));
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.as_deref(), Some("ping"));
    }

    #[test]
    fn comment_lines_are_ignored() {
        let mut parser = SseParser::new();
        let events = parser.feed(SseEncoder::encode_keepalive().as_bytes());
        assert!(events.is_empty());
    }

    #[test]
    fn last_event_id_tracks_most_recent() {
        let mut parser = SseParser::new();
        parser.feed(SseEncoder::encode(&SseEventBuilder::new().id("5").data("x").build()).as_bytes());
        assert_eq!(parser.last_event_id(), Some("5"));
    }

    #[test]
    fn generated_ids_embed_the_sequence_number() {
        let id = generate_event_id(42);
        assert!(id.starts_with("42-"));
    }
}
