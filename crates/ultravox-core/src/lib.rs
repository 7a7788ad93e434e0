mod error;

pub use error::{HttpError, error_body};
