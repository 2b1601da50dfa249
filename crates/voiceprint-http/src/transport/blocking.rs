//! Blocking transport over `reqwest::blocking::Client`.
//!
//! The blocking client runs its own runtime internally and panics when used
//! from inside an async runtime thread.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::COOKIE;
use tracing::trace;

use voiceprint_core::auth::SessionCookies;
use voiceprint_core::error::TransportError;
use voiceprint_core::transport::{
    BlockingTransport, FormPart, HttpRequest, HttpResponse, Method, MultipartForm, RequestBody,
};

use super::{USER_AGENT, build_error, transport_error};

/// Blocking transport.
#[derive(Debug, Clone)]
pub struct BlockingReqwestTransport {
    client: reqwest::blocking::Client,
}

impl BlockingReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(build_error)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn form(form: MultipartForm) -> Result<Form, TransportError> {
        let mut out = Form::new();
        for part in form.into_parts() {
            out = match part {
                FormPart::Text { name, value } => out.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    bytes,
                    mime,
                } => {
                    let part = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&mime)
                        .map_err(|e| TransportError::Request {
                            message: e.to_string(),
                        })?;
                    out.part(name, part)
                }
            };
        }
        Ok(out)
    }
}

impl BlockingTransport for BlockingReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let timeout = request.timeout;
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        }
        .timeout(timeout);

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = request.cookies.header_value() {
            builder = builder.header(COOKIE, cookie);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(Self::form(form)?),
        };

        let response = builder.send().map_err(|e| transport_error(e, timeout))?;

        let status = response.status().as_u16();
        let cookies: SessionCookies = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let body = response.text().map_err(|e| transport_error(e, timeout))?;
        trace!(status, len = body.len(), "HTTP response");

        Ok(HttpResponse {
            status,
            body,
            cookies,
        })
    }
}
