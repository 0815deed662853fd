//! HTTP transport for the form controller.
//!
//! # Invariants
//! - One controller call issues exactly one HTTP request.
//! - Any non-2xx status is reported as `TransportError::Status`.
//! - No retries; the client's default timeout applies.

use feedback_core::{
    FeedbackRecord, FeedbackTransport, NewFeedback, TransportError, LIST_FEEDBACKS_PATH,
    SUBMIT_FEEDBACK_PATH,
};
use reqwest::blocking::{Client, Response};

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl FeedbackTransport for HttpTransport {
    fn post_feedback(&self, feedback: &NewFeedback) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.url(SUBMIT_FEEDBACK_PATH))
            .json(feedback)
            .send()
            .map_err(network_error)?;

        check_status(response).map(|_| ())
    }

    fn fetch_feedbacks(&self) -> Result<Vec<FeedbackRecord>, TransportError> {
        let response = self
            .client
            .get(self.url(LIST_FEEDBACKS_PATH))
            .send()
            .map_err(network_error)?;

        check_status(response)?
            .json::<Vec<FeedbackRecord>>()
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}

fn network_error(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(TransportError::Status {
        code: status.as_u16(),
        body: response.text().unwrap_or_default(),
    })
}
