//! Custom request extractors.

mod path_id;
mod requester;
mod validated_json;

pub use path_id::UserIdPath;
pub use requester::Requester;
pub use validated_json::ValidatedJson;
