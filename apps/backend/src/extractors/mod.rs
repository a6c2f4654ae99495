pub mod validated_json;
pub mod visitor_id;

pub use validated_json::ValidatedJson;
pub use visitor_id::{VisitorId, VISITOR_COOKIE};
