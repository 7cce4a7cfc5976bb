//! HTTP request handlers for the upload server.

mod status;
mod upload;

pub use status::{api_status, index};
pub use upload::{upload, UPLOAD_FIELD};
