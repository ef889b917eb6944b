//! Request middleware.
//!
//! - [`request_log::log_requests`] -- one log line per request with status,
//!   duration and the error message carried by the response.

pub mod request_log;
