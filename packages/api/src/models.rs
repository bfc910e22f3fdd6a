//! Wire records and reply envelopes.
//!
//! Every payload the backend sends is deserialized into one of these types at
//! the HTTP boundary. Optional fields are `Option` or `#[serde(default)]` so
//! a sparse record degrades to sensible defaults instead of failing the whole
//! response; nothing downstream touches raw JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Account role. The backend only ever issues these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    /// Route of the dashboard this role lands on.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Student => "/student",
            Role::Teacher => "/teacher",
        }
    }
}

/// Category attached to an uploaded file.
///
/// `Other` absorbs tags this client does not know about so a new backend
/// category cannot take down the listing; such files are only reachable
/// through the free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileTag {
    StudyMaterial,
    Assignment,
    PersonalNote,
    QuestionBank,
    #[serde(other)]
    Other,
}

impl Default for FileTag {
    fn default() -> Self {
        FileTag::Other
    }
}

impl FileTag {
    /// The four tags a teacher can assign when uploading.
    pub const ALL: [FileTag; 4] = [
        FileTag::StudyMaterial,
        FileTag::Assignment,
        FileTag::PersonalNote,
        FileTag::QuestionBank,
    ];

    /// Wire value, also used as a CSS class suffix.
    pub fn slug(&self) -> &'static str {
        match self {
            FileTag::StudyMaterial => "study_material",
            FileTag::Assignment => "assignment",
            FileTag::PersonalNote => "personal_note",
            FileTag::QuestionBank => "question_bank",
            FileTag::Other => "other",
        }
    }

    /// Humanized form for display: "study_material" -> "Study Material".
    pub fn label(&self) -> &'static str {
        match self {
            FileTag::StudyMaterial => "Study Material",
            FileTag::Assignment => "Assignment",
            FileTag::PersonalNote => "Personal Note",
            FileTag::QuestionBank => "Question Bank",
            FileTag::Other => "Other",
        }
    }

    /// Inverse of [`FileTag::slug`] for the known tags.
    pub fn parse(slug: &str) -> Option<FileTag> {
        match slug {
            "study_material" => Some(FileTag::StudyMaterial),
            "assignment" => Some(FileTag::Assignment),
            "personal_note" => Some(FileTag::PersonalNote),
            "question_bank" => Some(FileTag::QuestionBank),
            _ => None,
        }
    }
}

/// Session user snapshot, received on login or session check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub subject: Option<String>,
}

impl UserInfo {
    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }

    /// Subject with empty strings treated as absent.
    pub fn subject_or_none(&self) -> Option<&str> {
        self.subject.as_deref().filter(|s| !s.is_empty())
    }
}

/// One entry of the course listing: a teacher and their units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherUnits {
    pub teacher: UserInfo,
    #[serde(default)]
    pub units: Vec<UnitInfo>,
}

/// A named grouping of files created by a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub files: Vec<FileInfo>,
}

impl UnitInfo {
    pub fn published_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_published).count()
    }

    pub fn has_unpublished(&self) -> bool {
        self.files.iter().any(|f| !f.is_published)
    }
}

/// An uploaded file as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: i64,
    pub original_name: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub tag: FileTag,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default, rename = "get_file_size_display")]
    pub size_display: Option<String>,
}

/// Credentials for `auth/login/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Fields for `auth/signup/`. `subject` is sent empty for students.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub subject: String,
    pub agreed: bool,
}

/// `auth/me/` either returns a user object, `null`, an empty object, or no
/// `user` field at all; everything but a populated object means "no session".
fn user_or_empty<'de, D>(deserializer: D) -> Result<Option<UserInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Reply of `auth/me/`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeReply {
    #[serde(default, deserialize_with = "user_or_empty")]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `auth/login/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `auth/signup/`. Validation failures arrive per-field in `errors`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl SignupReply {
    /// Error text for display: the per-field map flattened to one line per
    /// field, or the plain `error` string.
    pub fn flatten_errors(&self) -> Option<String> {
        if let Some(errors) = &self.errors {
            if !errors.is_empty() {
                return Some(flatten_field_errors(errors));
            }
        }
        self.error.clone()
    }
}

/// "field: message, message" with one field per line.
pub fn flatten_field_errors(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reply of `teachers/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeachersReply {
    #[serde(default)]
    pub teachers: Vec<TeacherUnits>,
}

/// Reply of `create-unit/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUnitReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// A file the backend refused during upload, with its reason.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

/// Reply of `upload-file/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub files: Vec<FileInfo>,
    #[serde(default)]
    pub skipped_files: Vec<SkippedFile>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadReply {
    /// The pending selection is cleared only when at least one file was
    /// accepted; an all-skipped upload keeps it so the user can retry.
    pub fn clears_selection(&self) -> bool {
        self.success && !self.files.is_empty()
    }

    /// Compose the user-facing result message, listing per-file skip reasons.
    pub fn summary(&self) -> String {
        let mut message = if self.files.is_empty() {
            String::from("No files were uploaded.")
        } else {
            format!("{} file(s) uploaded successfully!", self.files.len())
        };
        if !self.skipped_files.is_empty() {
            if self.files.is_empty() {
                message.push_str("\n\nAll files were skipped:\n");
            } else {
                message.push_str(&format!(
                    "\n\n{} file(s) were skipped:\n",
                    self.skipped_files.len()
                ));
            }
            for file in &self.skipped_files {
                message.push_str(&format!("\n- {}: {}", file.name, file.reason));
            }
        } else if self.files.is_empty() {
            message.push_str("\n\nCheck the server logs for details.");
        }
        message
    }
}

/// Reply of `publish-files/`.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_defaults_fill_missing_fields() {
        let file: FileInfo =
            serde_json::from_str(r#"{"id": 3, "original_name": "a.pdf"}"#).unwrap();
        assert_eq!(file.tag, FileTag::Other);
        assert!(!file.is_published);
        assert!(file.file_size.is_none());
        assert!(file.file_url.is_none());
        assert!(file.size_display.is_none());
    }

    #[test]
    fn unknown_tag_degrades_to_other() {
        let file: FileInfo = serde_json::from_str(
            r#"{"id": 1, "original_name": "a.pdf", "tag": "syllabus", "is_published": true}"#,
        )
        .unwrap();
        assert_eq!(file.tag, FileTag::Other);
        assert!(file.is_published);
    }

    #[test]
    fn tag_slug_roundtrip() {
        for tag in FileTag::ALL {
            assert_eq!(FileTag::parse(tag.slug()), Some(tag));
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.slug()));
        }
        assert_eq!(FileTag::parse("other"), None);
        assert_eq!(FileTag::StudyMaterial.label(), "Study Material");
    }

    #[test]
    fn me_reply_treats_empty_user_as_anonymous() {
        let populated = r#"{"user": {"id": 1, "full_name": "A", "email": "a@b.c", "role": "student"}}"#;
        let reply: MeReply = serde_json::from_str(populated).unwrap();
        assert_eq!(reply.user.as_ref().map(|u| u.id), Some(1));

        for body in [
            r#"{"user": null, "error": "No user session found"}"#,
            r#"{"user": {}}"#,
            r#"{}"#,
        ] {
            let reply: MeReply = serde_json::from_str(body).unwrap();
            assert!(reply.user.is_none(), "expected no user for {body}");
        }
    }

    #[test]
    fn login_reply_parses_both_outcomes() {
        let ok: LoginReply = serde_json::from_str(
            r#"{"success": true, "user": {"id": 7, "full_name": "T", "email": "t@s.e", "role": "teacher", "subject": "Math"}}"#,
        )
        .unwrap();
        assert!(ok.success);
        assert_eq!(ok.user.as_ref().and_then(|u| u.subject_or_none()), Some("Math"));
        assert_eq!(ok.user.unwrap().role.dashboard_path(), "/teacher");

        let failed: LoginReply =
            serde_json::from_str(r#"{"success": false, "error": "Invalid credentials"}"#).unwrap();
        assert!(!failed.success);
        assert!(failed.user.is_none());
        assert_eq!(failed.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn signup_errors_flatten_per_field() {
        let reply: SignupReply = serde_json::from_str(
            r#"{"success": false, "errors": {"email": ["already taken"], "password": ["too short", "too common"]}}"#,
        )
        .unwrap();
        assert_eq!(
            reply.flatten_errors().as_deref(),
            Some("email: already taken\npassword: too short, too common")
        );

        let plain: SignupReply =
            serde_json::from_str(r#"{"success": false, "error": "Signup disabled"}"#).unwrap();
        assert_eq!(plain.flatten_errors().as_deref(), Some("Signup disabled"));
    }

    #[test]
    fn upload_reply_with_accepted_files_clears_selection() {
        let reply: UploadReply = serde_json::from_str(
            r#"{"success": true,
                "files": [{"id": 9, "original_name": "notes.pdf", "tag": "study_material"}],
                "skipped_files": [{"name": "x.exe", "reason": "disallowed type"}]}"#,
        )
        .unwrap();
        assert!(reply.clears_selection());
        let summary = reply.summary();
        assert!(summary.starts_with("1 file(s) uploaded successfully!"));
        assert!(summary.contains("1 file(s) were skipped:"));
        assert!(summary.contains("- x.exe: disallowed type"));
    }

    #[test]
    fn upload_reply_with_all_files_skipped_keeps_selection() {
        let reply: UploadReply = serde_json::from_str(
            r#"{"success": true, "files": [],
                "skipped_files": [{"name": "x.exe", "reason": "disallowed type"}]}"#,
        )
        .unwrap();
        assert!(!reply.clears_selection());
        let summary = reply.summary();
        assert!(summary.starts_with("No files were uploaded."));
        assert!(summary.contains("All files were skipped:"));
        assert!(summary.contains("- x.exe: disallowed type"));
    }

    #[test]
    fn upload_reply_with_nothing_at_all_points_at_logs() {
        let reply: UploadReply =
            serde_json::from_str(r#"{"success": true, "files": []}"#).unwrap();
        assert!(!reply.clears_selection());
        assert!(reply.summary().contains("Check the server logs"));
    }

    #[test]
    fn listing_defaults_missing_collections() {
        let reply: TeachersReply = serde_json::from_str(
            r#"{"teachers": [
                {"teacher": {"id": 1, "full_name": "A", "email": "a@b.c", "role": "teacher"}},
                {"teacher": {"id": 2, "full_name": "B", "email": "b@b.c", "role": "teacher", "subject": ""},
                 "units": [{"id": 4, "name": "U1"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(reply.teachers.len(), 2);
        assert!(reply.teachers[0].units.is_empty());
        assert!(reply.teachers[0].teacher.subject_or_none().is_none());
        assert!(reply.teachers[1].teacher.subject_or_none().is_none());
        assert!(reply.teachers[1].units[0].files.is_empty());
    }
}
