//! Conversion of arbitrary values into display text
//!
//! A [`Message`] captures a value once, in every form a [`FormatMode`] may ask
//! for: the text itself or its JSON tree, a single-line debug form and a
//! multi-line debug dump. Rendering never fails; when structured
//! serialization is impossible the dump is used instead.

use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::debug;

use crate::domain::DomainError;

const INDENT: &[u8] = b"    ";

/// How a message is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatMode {
    /// Containers as indented JSON, JSON-looking text re-indented, anything else as-is.
    #[default]
    Auto,
    /// Text unchanged, other values in their single-line debug form.
    Raw,
    /// Forced JSON serialization.
    Json,
    /// Multi-line debug dump.
    Pretty,
}

impl FormatMode {
    pub fn name(self) -> &'static str {
        match self {
            FormatMode::Auto => "auto",
            FormatMode::Raw => "raw",
            FormatMode::Json => "json",
            FormatMode::Pretty => "pretty",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(FormatMode::Auto),
            "raw" => Ok(FormatMode::Raw),
            "json" => Ok(FormatMode::Json),
            "pretty" | "pprint" => Ok(FormatMode::Pretty),
            _ => Err(DomainError::InvalidFormatMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for FormatMode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatMode> for String {
    fn from(mode: FormatMode) -> Self {
        mode.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Text(String),
    Data(Value),
    Opaque,
}

/// A value prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    payload: Payload,
    repr: String,
    dump: String,
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let repr = format!("{text:?}");
        Self {
            payload: Payload::Text(text),
            dump: repr.clone(),
            repr,
        }
    }

    /// Capture a serializable value. A value that serializes to a JSON string
    /// is treated as text; one that fails to serialize becomes opaque.
    pub fn data<T>(value: &T) -> Self
    where
        T: Serialize + Debug + ?Sized,
    {
        let payload = match serde_json::to_value(value) {
            Ok(Value::String(text)) => Payload::Text(text),
            Ok(tree) => Payload::Data(tree),
            Err(e) => {
                debug!("value is not serializable, using debug dump: {}", e);
                Payload::Opaque
            }
        };
        Self {
            payload,
            repr: format!("{value:?}"),
            dump: format!("{value:#?}"),
        }
    }

    /// Capture a value that can only be shown through its `Debug` form.
    pub fn opaque<T: Debug + ?Sized>(value: &T) -> Self {
        Self {
            payload: Payload::Opaque,
            repr: format!("{value:?}"),
            dump: format!("{value:#?}"),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.payload, Payload::Text(_))
    }

    /// Render according to `mode`.
    pub fn render(&self, mode: FormatMode) -> String {
        match mode {
            FormatMode::Auto => self.render_auto(),
            FormatMode::Raw => match &self.payload {
                Payload::Text(text) => text.clone(),
                _ => self.repr.clone(),
            },
            FormatMode::Json => match &self.payload {
                Payload::Text(text) => {
                    to_pretty_json(&Value::String(text.clone())).unwrap_or_else(|| self.dump.clone())
                }
                Payload::Data(tree) => to_pretty_json(tree).unwrap_or_else(|| self.dump.clone()),
                Payload::Opaque => self.dump.clone(),
            },
            FormatMode::Pretty => self.dump.clone(),
        }
    }

    fn render_auto(&self) -> String {
        match &self.payload {
            Payload::Data(tree @ (Value::Object(_) | Value::Array(_))) => {
                to_pretty_json(tree).unwrap_or_else(|| self.dump.clone())
            }
            Payload::Text(text) => match serde_json::from_str::<Value>(text) {
                Ok(tree) => to_pretty_json(&tree).unwrap_or_else(|| text.clone()),
                Err(_) => text.clone(),
            },
            Payload::Data(_) | Payload::Opaque => self.dump.clone(),
        }
    }
}

/// Serialize with a 4-space indent; non-ASCII characters stay unescaped.
fn to_pretty_json(value: &Value) -> Option<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    match value.serialize(&mut ser) {
        Ok(()) => Some(String::from_utf8_lossy(&buf).into_owned()),
        Err(e) => {
            debug!("json serialization failed: {}", e);
            None
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::text(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::text(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Message::text(text.as_str())
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Message::text(text),
            tree @ (Value::Object(_) | Value::Array(_)) => Self {
                repr: format!("{tree:?}"),
                dump: format!("{tree:#?}"),
                payload: Payload::Data(tree),
            },
            scalar => Self {
                repr: scalar.to_string(),
                dump: scalar.to_string(),
                payload: Payload::Data(scalar),
            },
        }
    }
}

impl From<&Value> for Message {
    fn from(value: &Value) -> Self {
        Message::from(value.clone())
    }
}

impl From<&Message> for Message {
    fn from(message: &Message) -> Self {
        message.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn given_mode_names_when_parsing_then_accepts_aliases() {
        assert_eq!("AUTO".parse::<FormatMode>().unwrap(), FormatMode::Auto);
        assert_eq!("pprint".parse::<FormatMode>().unwrap(), FormatMode::Pretty);
        assert!(matches!(
            "yaml".parse::<FormatMode>(),
            Err(DomainError::InvalidFormatMode(_))
        ));
    }

    #[test]
    fn given_plain_text_when_auto_then_unchanged() {
        let msg = Message::from("hello world");
        assert_eq!(msg.render(FormatMode::Auto), "hello world");
    }

    #[test]
    fn given_json_text_when_auto_then_reindented() {
        let msg = Message::from(r#"{"hello":"world","list":[1,2]}"#);
        assert_eq!(
            msg.render(FormatMode::Auto),
            "{\n    \"hello\": \"world\",\n    \"list\": [\n        1,\n        2\n    ]\n}"
        );
    }

    #[test]
    fn given_map_when_auto_then_indented_json_without_ascii_escaping() {
        let mut map = BTreeMap::new();
        map.insert("name", "Grüße");
        let msg = Message::data(&map);
        assert_eq!(msg.render(FormatMode::Auto), "{\n    \"name\": \"Grüße\"\n}");
    }

    #[test]
    fn given_number_when_auto_then_debug_dump() {
        assert_eq!(Message::data(&42).render(FormatMode::Auto), "42");
        assert_eq!(Message::from(json!(1.5)).render(FormatMode::Auto), "1.5");
    }

    #[test]
    fn given_text_when_raw_then_unchanged_and_data_uses_debug() {
        assert_eq!(Message::from("{\"a\":1}").render(FormatMode::Raw), "{\"a\":1}");
        assert_eq!(Message::data(&vec![1, 2]).render(FormatMode::Raw), "[1, 2]");
    }

    #[test]
    fn given_text_when_json_then_quoted() {
        assert_eq!(Message::from("x").render(FormatMode::Json), "\"x\"");
    }

    #[test]
    fn given_text_when_pretty_then_debug_quoted() {
        assert_eq!(Message::from("x").render(FormatMode::Pretty), "\"x\"");
    }

    #[test]
    fn given_non_string_map_keys_when_serializing_then_falls_back_to_dump() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");
        let msg = Message::data(&map);
        let dump = format!("{map:#?}");
        assert_eq!(msg.render(FormatMode::Auto), dump);
        assert_eq!(msg.render(FormatMode::Json), dump);
    }

    #[test]
    fn given_opaque_value_when_rendering_then_debug_forms() {
        #[derive(Debug)]
        struct Point {
            x: i32,
        }
        let msg = Message::opaque(&Point { x: 3 });
        assert_eq!(msg.render(FormatMode::Raw), "Point { x: 3 }");
        assert_eq!(msg.render(FormatMode::Auto), "Point {\n    x: 3,\n}");
    }
}
