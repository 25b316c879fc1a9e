//! Question record and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::{Error, Result};

/// One quiz entry: a prompt worth full points, two progressively revealing
/// hints worth fewer, and the expected answer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub hint1: Option<String>,
    pub hint2: Option<String>,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or fully replacing a question. Identifier and
/// timestamps are always store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewQuestion {
    #[validate(length(min = 3, message = "text must be at least 3 characters long"))]
    pub text: String,
    pub hint1: Option<String>,
    pub hint2: Option<String>,
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub answer: String,
}

/// Flatten validation failures into a single deterministic message.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => parts.push(message.to_string()),
                None => parts.push(format!("{field} is invalid")),
            }
        }
    }
    parts.sort();
    parts.join("; ")
}

/// Columns eligible for search filtering and sorting. A closed enumeration:
/// SQL only ever sees [`SearchField::column`] output, never raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Text,
    Hint1,
    Hint2,
    Answer,
}

impl SearchField {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(SearchField::Text),
            "hint1" => Ok(SearchField::Hint1),
            "hint2" => Ok(SearchField::Hint2),
            "answer" => Ok(SearchField::Answer),
            other => Err(Error::InvalidField(other.to_string())),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SearchField::Text => "text",
            SearchField::Hint1 => "hint1",
            SearchField::Hint2 => "hint2",
            SearchField::Answer => "answer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

impl OrderDir {
    /// Lenient parse: anything that is not asc/desc degrades to ascending.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "DESC" => OrderDir::Desc,
            _ => OrderDir::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }
}

/// Coerce a requested result limit into (0, 100]; out-of-range values fall
/// back to the default page size of 10.
pub fn clamp_limit(limit: i64) -> i64 {
    if limit <= 0 || limit > 100 {
        10
    } else {
        limit
    }
}

/// Raw search request as received from the client. Field and direction are
/// plain strings here; [`SearchQuery::from_request`] validates them.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_text: String,
    pub field: String,
    #[serde(default)]
    pub order_dir: String,
    #[serde(default)]
    pub limit: i64,
}

/// Validated, normalized search parameters.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub field: SearchField,
    pub order_dir: OrderDir,
    pub search_text: String,
    pub limit: i64,
}

impl SearchQuery {
    /// Validate the field against the whitelist and normalize direction and
    /// limit. Rejects before any query construction happens.
    pub fn from_request(request: SearchRequest) -> Result<Self> {
        let field = SearchField::parse(&request.field)?;
        Ok(Self {
            field,
            order_dir: OrderDir::parse(&request.order_dir),
            search_text: request.search_text,
            limit: clamp_limit(request.limit),
        })
    }

    pub fn like_pattern(&self) -> String {
        format!("%{}%", self.search_text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub csv_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_whitelisted_field() {
        assert_eq!(SearchField::parse("text").unwrap(), SearchField::Text);
        assert_eq!(SearchField::parse("hint1").unwrap(), SearchField::Hint1);
        assert_eq!(SearchField::parse("hint2").unwrap(), SearchField::Hint2);
        assert_eq!(SearchField::parse("answer").unwrap(), SearchField::Answer);
    }

    #[test]
    fn rejects_unknown_field() {
        let err = SearchField::parse("id").unwrap_err();
        assert!(matches!(err, Error::InvalidField(f) if f == "id"));

        // Column names from other tables must not pass the whitelist either.
        assert!(SearchField::parse("created_at; DROP TABLE questions").is_err());
        assert!(SearchField::parse("").is_err());
    }

    #[test]
    fn order_dir_is_lenient() {
        assert_eq!(OrderDir::parse("asc"), OrderDir::Asc);
        assert_eq!(OrderDir::parse("ASC"), OrderDir::Asc);
        assert_eq!(OrderDir::parse("desc"), OrderDir::Desc);
        assert_eq!(OrderDir::parse("Desc"), OrderDir::Desc);
        assert_eq!(OrderDir::parse("sideways"), OrderDir::Asc);
        assert_eq!(OrderDir::parse(""), OrderDir::Asc);
    }

    #[test]
    fn limit_is_clamped_to_default_outside_range() {
        assert_eq!(clamp_limit(0), 10);
        assert_eq!(clamp_limit(-5), 10);
        assert_eq!(clamp_limit(101), 10);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(37), 37);
    }

    #[test]
    fn from_request_normalizes_everything() {
        let query = SearchQuery::from_request(SearchRequest {
            search_text: "capital".into(),
            field: "hint2".into(),
            order_dir: "DESC".into(),
            limit: 500,
        })
        .unwrap();

        assert_eq!(query.field, SearchField::Hint2);
        assert_eq!(query.order_dir, OrderDir::Desc);
        assert_eq!(query.limit, 10);
        assert_eq!(query.like_pattern(), "%capital%");
    }

    #[test]
    fn from_request_rejects_invalid_field_before_anything_else() {
        let err = SearchQuery::from_request(SearchRequest {
            search_text: String::new(),
            field: "hint3".into(),
            order_dir: String::new(),
            limit: 0,
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidField(_)));
    }

    #[test]
    fn validation_enforces_text_and_answer_rules() {
        let valid = NewQuestion {
            text: "What is the capital of Poland?".into(),
            hint1: Some("It is on the Vistula".into()),
            hint2: None,
            answer: "Warsaw".into(),
        };
        assert!(valid.validate().is_ok());

        let short_text = NewQuestion {
            text: "ab".into(),
            hint1: None,
            hint2: None,
            answer: "x".into(),
        };
        let errors = short_text.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "text must be at least 3 characters long"
        );

        let empty_answer = NewQuestion {
            text: "abc".into(),
            hint1: None,
            hint2: None,
            answer: String::new(),
        };
        let errors = empty_answer.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "answer must not be empty");
    }

    #[test]
    fn validation_message_is_deterministic_for_multiple_failures() {
        let invalid = NewQuestion {
            text: "ab".into(),
            hint1: None,
            hint2: None,
            answer: String::new(),
        };
        let errors = invalid.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "answer must not be empty; text must be at least 3 characters long"
        );
    }
}
