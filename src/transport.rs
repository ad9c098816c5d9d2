//! Request execution.
//!
//! The engine composes requests; a [`Transport`] carries them out. The
//! blocking HTTP executor lives behind the `remote` feature, so the engine
//! itself stays transport-agnostic and testable.

use serde_json::Value;

use crate::error::InteractionError;
use crate::request::ThingRequest;

/// Status code and raw payload of an executed request.
#[derive(Debug, Clone)]
pub struct ThingResponse {
    pub status: u16,
    pub payload: Option<Value>,
}

/// Executes composed requests against the remote Thing.
///
/// Implementations return the response verbatim, including non-2xx status
/// codes; the status check belongs to the caller. Only I/O failures are
/// errors here.
pub trait Transport {
    fn execute(&self, request: &ThingRequest) -> Result<ThingResponse, InteractionError>;
}

/// Blocking HTTP transport.
#[cfg(feature = "remote")]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl HttpTransport {
    /// Build a transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns a network error if the underlying client cannot be built.
    pub fn new() -> Result<Self, InteractionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(crate::loader::HTTP_TIMEOUT)
            .build()
            .map_err(|source| InteractionError::Network {
                url: String::new(),
                source,
            })?;
        Ok(HttpTransport { client })
    }
}

#[cfg(feature = "remote")]
impl Transport for HttpTransport {
    fn execute(&self, request: &ThingRequest) -> Result<ThingResponse, InteractionError> {
        let method: reqwest::Method = request
            .method
            .parse()
            .unwrap_or(reqwest::Method::GET);

        let mut builder = self.client.request(method, &request.target);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|source| InteractionError::Network {
            url: request.target.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|source| InteractionError::Network {
            url: request.target.clone(),
            source,
        })?;

        // Bodies that are not JSON are carried as strings.
        let payload = if text.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };

        Ok(ThingResponse { status, payload })
    }
}
