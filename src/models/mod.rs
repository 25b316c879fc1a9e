//! Domain types shared between the API and database layers

pub mod question;

pub use question::{
    clamp_limit, validation_message, ImportRequest, NewQuestion, OrderDir, Question, SearchField,
    SearchQuery, SearchRequest,
};
