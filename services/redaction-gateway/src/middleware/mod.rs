mod redact;
mod request_id;

pub use redact::redact_request_body;
pub use request_id::{set_request_id, RequestId, REQUEST_ID_HEADER};
