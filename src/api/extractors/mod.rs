//! Custom extractors for request handling.

mod validated_json;

pub use validated_json::ValidatedJson;
