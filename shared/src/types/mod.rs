//! Type definitions shared by every layer
//!
//! - `response` - the `{ code, data, message }` REST envelope

pub mod response;

pub use response::RestResponse;
