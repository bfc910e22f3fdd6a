//! # API crate — typed HTTP surface of the course-sharing backend
//!
//! Everything the views know about the backend lives here: the configured
//! HTTP client, the wire records, the error taxonomy, and one async function
//! per backend call. The backend itself is a separate service; this crate is
//! purely a client.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `client` | Shared `reqwest` client, path roots, logging, status triage |
//! | [`error`] | [`ApiError`] — transport / status / decode |
//! | [`models`] | Wire records and reply envelopes with boundary defaults |
//!
//! ## Calls exposed here
//!
//! - **Auth**: [`fetch_csrf`], [`current_user`], [`login`], [`signup`], [`logout`]
//! - **Listing**: [`list_teachers`]
//! - **Teacher mutations**: [`create_unit`], [`upload_files`], [`publish_files`],
//!   [`delete_file`], [`delete_unit`]
//! - **Downloads**: [`download_file`] (blob fallback), [`download_href`] (anchor)
//!
//! Mutating auth calls require the CSRF cookie; [`login`] and [`signup`] fetch
//! it themselves before posting.

use reqwest::multipart::{Form, Part};

mod client;
pub mod error;
pub mod models;

pub use client::ClientConfig;
pub use error::ApiError;
pub use models::{
    FileInfo, FileTag, LoginReply, LoginRequest, Role, SignupReply, SignupRequest, SkippedFile,
    TeacherUnits, UnitInfo, UploadReply, UserInfo,
};

/// Obtain the CSRF cookie. The response body is irrelevant; the cookie it
/// sets is consumed implicitly by subsequent requests.
pub async fn fetch_csrf() -> Result<(), ApiError> {
    client::get(client::v1("auth/csrf/")).await?;
    tracing::debug!("csrf token obtained");
    Ok(())
}

/// Current session user, or `None` when no session is active.
pub async fn current_user() -> Result<Option<UserInfo>, ApiError> {
    let reply: models::MeReply = client::get_json(client::v1("auth/me/")).await?;
    if let Some(error) = &reply.error {
        tracing::debug!("no session: {}", error);
    }
    Ok(reply.user)
}

/// Authenticate with email, password and the chosen role.
pub async fn login(request: &LoginRequest) -> Result<LoginReply, ApiError> {
    fetch_csrf().await?;
    client::post_json(client::v1("auth/login/"), request).await
}

/// Create an account. A successful signup does not authenticate the caller;
/// the user logs in separately afterwards.
pub async fn signup(request: &SignupRequest) -> Result<SignupReply, ApiError> {
    fetch_csrf().await?;
    client::post_json(client::v1("auth/signup/"), request).await
}

/// End the backend session.
pub async fn logout() -> Result<(), ApiError> {
    client::post_empty(client::v1("auth/logout/")).await?;
    Ok(())
}

/// The full teacher/unit/file listing.
pub async fn list_teachers() -> Result<Vec<TeacherUnits>, ApiError> {
    let reply: models::TeachersReply = client::get_json(client::v1("teachers/")).await?;
    Ok(reply.teachers)
}

/// Create a unit owned by the current teacher.
pub async fn create_unit(name: &str) -> Result<models::CreateUnitReply, ApiError> {
    let form = Form::new().text("name", name.to_string());
    client::post_multipart(client::api("create-unit/"), form).await
}

/// A file picked in the browser, ready to upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Upload one or more files into a unit under a single tag.
pub async fn upload_files(
    unit_id: i64,
    tag: FileTag,
    files: Vec<UploadFile>,
) -> Result<UploadReply, ApiError> {
    let mut form = Form::new();
    for file in files {
        form = form.part("files", Part::bytes(file.bytes).file_name(file.name));
    }
    form = form
        .text("unit_id", unit_id.to_string())
        .text("tag", tag.slug());
    client::post_multipart(client::api("upload-file/"), form).await
}

/// Mark every unpublished file of a unit as published.
pub async fn publish_files(unit_id: i64) -> Result<models::PublishReply, ApiError> {
    let form = Form::new().text("unit_id", unit_id.to_string());
    client::post_multipart(client::api("publish-files/"), form).await
}

/// Delete a single file.
pub async fn delete_file(file_id: i64) -> Result<(), ApiError> {
    client::delete(client::api(&format!("delete-file/{file_id}/"))).await
}

/// Delete a unit and everything in it.
pub async fn delete_unit(unit_id: i64) -> Result<(), ApiError> {
    client::delete(client::api(&format!("delete-unit/{unit_id}/"))).await
}

/// Fetch a file body through the authenticated endpoint. Used when a record
/// carries no direct URL.
pub async fn download_file(file_id: i64) -> Result<Vec<u8>, ApiError> {
    client::get_bytes(client::site(&format!("download-file/{file_id}/"))).await
}

/// Anchor href for the teacher view's per-file download link. This endpoint
/// sits under `/api/` rather than the site root; both spellings are part of
/// the backend contract.
pub fn download_href(file_id: i64) -> String {
    format!("/api/download-file/{file_id}/")
}
