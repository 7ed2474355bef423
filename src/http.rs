//! Blocking HTTP transport used by the token exchanger and the report client

use crate::error::TransportError;

/// Status and body text of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport {
    /// GET a fully built URL
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    /// POST an `application/x-www-form-urlencoded` body
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;
}

pub(crate) struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub(crate) fn new() -> Self {
        // Error statuses still carry JSON bodies worth reading
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

fn transport_error(url: &str, err: ureq::Error) -> TransportError {
    TransportError {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn read_response(
    url: &str,
    response: ureq::http::Response<ureq::Body>,
) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();
    let body = body
        .read_to_string()
        .map_err(|e| transport_error(url, e))?;
    Ok(HttpResponse { status, body })
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| transport_error(url, e))?;
        read_response(url, response)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let response = self
            .agent
            .post(url)
            .send_form(form.iter().copied())
            .map_err(|e| transport_error(url, e))?;
        read_response(url, response)
    }
}
