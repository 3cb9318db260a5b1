use std::time::Duration;

use crate::error::NotifierError;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

/// HTTP client shared by every SMS gateway request.
#[derive(Clone)]
pub struct HttpGateway {
    pub client: ClientWithMiddleware,
}

impl HttpGateway {
    pub fn new(request_timeout: Duration) -> Result<Self, NotifierError> {
        let client = ClientBuilder::new(
            Client::builder()
                .timeout(request_timeout)
                .connect_timeout(request_timeout)
                .build()
                .map_err(|error| NotifierError::HttpClient(error.to_string()))?,
        )
        .build();

        Ok(Self { client })
    }
}
