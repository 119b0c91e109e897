//! Classification of reqwest failures.

use crate::Error;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::RequestConstruction {
                message: "HTTP client rejected the request".to_owned(),
                source: Some(Box::new(err)),
            }
        } else {
            Error::transport(err)
        }
    }
}
