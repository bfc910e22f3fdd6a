//! Configured HTTP client shared by every backend call.
//!
//! One `reqwest::Client` lives behind a `OnceLock` for the whole process.
//! Requests carry the browser's session cookies (`include` credentials on
//! WASM, a cookie store on native builds) and every response is logged and
//! triaged here: 401 outside the auth endpoints forces navigation back to
//! the login route, 403/404 are logged and left to the caller, 5xx is logged
//! as a server error. Error statuses surface as [`ApiError::Status`] with
//! whatever message the body carried.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::flatten_field_errors;

/// Path roots observed in the backend's routing. Reads and auth live under
/// the versioned prefix; the teacher mutations live one level up, and the
/// blob download sits at the site root. The asymmetry is part of the backend
/// contract and is preserved as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_v1: &'static str,
    pub api_root: &'static str,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_v1: "/api/v1/",
            api_root: "/api/",
        }
    }
}

fn config() -> &'static ClientConfig {
    static CONFIG: OnceLock<ClientConfig> = OnceLock::new();
    CONFIG.get_or_init(ClientConfig::default)
}

/// Origin the paths are resolved against: the page's own origin in the
/// browser, an overridable localhost default elsewhere (tests, tooling).
fn origin() -> &'static str {
    static ORIGIN: OnceLock<String> = OnceLock::new();
    ORIGIN.get_or_init(|| {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_else(|| "http://localhost:8080".to_string())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::env::var("BACKEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:8000".to_string())
        }
    })
}

fn http() -> &'static Client {
    static HTTP: OnceLock<Client> = OnceLock::new();
    HTTP.get_or_init(|| {
        #[cfg(target_arch = "wasm32")]
        {
            Client::new()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Client::builder()
                .cookie_store(true)
                .build()
                .expect("http client")
        }
    })
}

/// URL under the versioned prefix: `v1("auth/me/")` -> `/api/v1/auth/me/`.
pub(crate) fn v1(path: &str) -> String {
    format!("{}{}{path}", origin(), config().api_v1)
}

/// URL under the unversioned prefix used by the teacher mutations.
pub(crate) fn api(path: &str) -> String {
    format!("{}{}{path}", origin(), config().api_root)
}

/// URL at the site root, used by the blob download fallback.
pub(crate) fn site(path: &str) -> String {
    format!("{}/{path}", origin())
}

/// Error body shapes the backend uses: a plain message or a per-field map.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        if let Some(error) = self.error {
            return Some(error);
        }
        self.errors
            .filter(|errors| !errors.is_empty())
            .map(|errors| flatten_field_errors(&errors))
    }
}

/// The 401 interceptor must not fire on the auth endpoints themselves: a
/// failed login is a 401 the login form handles inline.
fn is_auth_endpoint(url: &str) -> bool {
    url.contains("auth/login") || url.contains("auth/signup")
}

fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("login redirect skipped outside the browser");
    }
}

fn request(method: Method, url: &str) -> RequestBuilder {
    tracing::debug!("{} {}", method, url);
    let builder = http().request(method, url);
    #[cfg(target_arch = "wasm32")]
    let builder = builder.fetch_credentials_include();
    builder
}

/// Send the request and triage the response status.
async fn execute(builder: RequestBuilder, url: &str) -> Result<Response, ApiError> {
    let response = builder.send().await.map_err(|e| {
        tracing::error!("no response from {}: {}", url, e);
        ApiError::Transport(e)
    })?;

    let status = response.status();
    tracing::debug!("{} {}", status.as_u16(), url);
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message);

    match status.as_u16() {
        401 => {
            tracing::warn!("unauthorized: {}", url);
            if !is_auth_endpoint(url) {
                redirect_to_login();
            }
        }
        403 => tracing::warn!("forbidden: {}", url),
        404 => tracing::warn!("not found: {}", url),
        s if s >= 500 => tracing::error!("server error {} on {}", s, url),
        s => tracing::warn!("error {} on {}", s, url),
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

pub(crate) async fn get(url: String) -> Result<Response, ApiError> {
    execute(request(Method::GET, &url), &url).await
}

pub(crate) async fn get_json<T: DeserializeOwned>(url: String) -> Result<T, ApiError> {
    get(url).await?.json().await.map_err(ApiError::Decode)
}

pub(crate) async fn get_bytes(url: String) -> Result<Vec<u8>, ApiError> {
    let response = get(url).await?;
    let bytes = response.bytes().await.map_err(ApiError::Decode)?;
    Ok(bytes.to_vec())
}

pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    url: String,
    body: &B,
) -> Result<T, ApiError> {
    let response = execute(request(Method::POST, &url).json(body), &url).await?;
    response.json().await.map_err(ApiError::Decode)
}

pub(crate) async fn post_empty(url: String) -> Result<Response, ApiError> {
    execute(request(Method::POST, &url), &url).await
}

/// Multipart POST. The content type is left to the encoder so the boundary
/// parameter is always present and correct.
pub(crate) async fn post_multipart<T: DeserializeOwned>(
    url: String,
    form: reqwest::multipart::Form,
) -> Result<T, ApiError> {
    let response = execute(request(Method::POST, &url).multipart(form), &url).await?;
    response.json().await.map_err(ApiError::Decode)
}

pub(crate) async fn delete(url: String) -> Result<(), ApiError> {
    execute(request(Method::DELETE, &url), &url).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_builders_keep_the_observed_path_split() {
        assert!(v1("auth/me/").ends_with("/api/v1/auth/me/"));
        assert!(api("create-unit/").ends_with("/api/create-unit/"));
        assert!(!api("create-unit/").contains("/v1/"));
        assert!(site("download-file/9/").ends_with("/download-file/9/"));
        assert!(!site("download-file/9/").contains("/api/"));
    }

    #[test]
    fn auth_endpoints_are_exempt_from_the_401_redirect() {
        assert!(is_auth_endpoint(&v1("auth/login/")));
        assert!(is_auth_endpoint(&v1("auth/signup/")));
        assert!(!is_auth_endpoint(&v1("auth/me/")));
        assert!(!is_auth_endpoint(&v1("teachers/")));
    }

    #[test]
    fn error_body_prefers_plain_message_then_flattens_fields() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Unit exists"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Unit exists"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"errors": {"email": ["invalid"]}}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("email: invalid"));

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.into_message().is_none());
    }
}
