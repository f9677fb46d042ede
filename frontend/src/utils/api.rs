use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_net::Error as GlooError;
use web_sys::RequestCredentials;

use crate::config;

/// Request builder bound to the backend origin.
pub struct Api;

/// Request wrapper that prefixes the backend URL and sends cookies along
pub struct RequestWrapper {
    request: RequestBuilder,
    path: String,
}

impl RequestWrapper {
    fn new(request: fn(&str) -> RequestBuilder, path: &str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        Self {
            request: request(&full_url).credentials(RequestCredentials::Include),
            path: path.to_string(),
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    pub async fn send(self) -> Result<Response, GlooError> {
        log::debug!("Sending request to {}", self.path);
        self.request.send().await
    }
}

impl Api {
    /// Create a POST request with credentials and backend URL
    pub fn post(path: &str) -> RequestWrapper {
        RequestWrapper::new(Request::post, path)
    }
}
