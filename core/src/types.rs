//! Domain DTOs for the joke API.
//!
//! # Design
//! `Joke` mirrors the JSON object served by the Official Joke API. Every
//! field is required and decoded as-is: serde rejects a quoted `id` or a
//! numeric `setup` instead of coercing them. Fields the API adds beyond these
//! four are ignored. The mock-server crate defines its own copy of the shape;
//! integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

/// A single joke returned by `/random_joke`.
///
/// Built fresh on every successful fetch and replaced wholesale by the next
/// one. The `id` is the API's opaque identifier and is not stable across
/// requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Joke {
    pub id: i64,
    #[serde(rename = "type")]
    pub joke_type: String,
    pub setup: String,
    pub punchline: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_uses_wire_name() {
        let joke = Joke {
            id: 7,
            joke_type: "programming".to_string(),
            setup: "s".to_string(),
            punchline: "p".to_string(),
        };
        let json = serde_json::to_value(&joke).unwrap();
        assert_eq!(json["type"], "programming");
        assert!(json.get("joke_type").is_none());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let joke: Joke = serde_json::from_str(
            r#"{"id":3,"type":"general","setup":"a","punchline":"b","rating":5}"#,
        )
        .unwrap();
        assert_eq!(joke.id, 3);
        assert_eq!(joke.punchline, "b");
    }

    #[test]
    fn quoted_id_is_rejected() {
        let result: Result<Joke, _> =
            serde_json::from_str(r#"{"id":"3","type":"general","setup":"a","punchline":"b"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn fractional_id_is_rejected() {
        let result: Result<Joke, _> =
            serde_json::from_str(r#"{"id":3.5,"type":"general","setup":"a","punchline":"b"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn whitespace_is_preserved() {
        let joke: Joke = serde_json::from_str(
            r#"{"id":1,"type":" general ","setup":"  Knock knock.","punchline":"Who's there?\n"}"#,
        )
        .unwrap();
        assert_eq!(joke.joke_type, " general ");
        assert_eq!(joke.setup, "  Knock knock.");
        assert_eq!(joke.punchline, "Who's there?\n");
    }
}
