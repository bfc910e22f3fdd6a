//! Teacher dashboard: manage units, upload and publish files.
//!
//! The listing endpoint returns every teacher; the view keeps only the record
//! belonging to the session user. Every mutation is followed by a full
//! refetch — there is no optimistic update, the backend's answer is the only
//! truth the view trusts.

use std::collections::{HashMap, HashSet};

use api::models::{FileTag, Role, UnitInfo};
use api::UploadFile;
use dioxus::prelude::*;
use ui::{browser, format, use_session, CreateUnitDialog, RequireRole, UserMenu};

#[component]
pub fn TeacherDashboard() -> Element {
    rsx! {
        RequireRole { role: Role::Teacher, TeacherHome {} }
    }
}

/// Refetch the listing and keep the units of the current teacher. Records of
/// other teachers are dropped here even if the backend were to return them.
async fn load_units(
    user_id: i64,
    mut units: Signal<Vec<UnitInfo>>,
    mut error: Signal<Option<String>>,
) {
    match api::list_teachers().await {
        Ok(listing) => {
            let mine = listing
                .into_iter()
                .find(|entry| entry.teacher.id == user_id)
                .map(|entry| entry.units)
                .unwrap_or_default();
            units.set(mine);
            error.set(None);
        }
        Err(err) => {
            tracing::error!("failed to load units: {}", err);
            error.set(Some(
                "Failed to load units. Please refresh the page.".to_string(),
            ));
        }
    }
}

#[component]
fn TeacherHome() -> Element {
    let session = use_session();
    let user = session.user();
    let user_id = user.as_ref().map(|u| u.id).unwrap_or_default();

    let units = use_signal(Vec::<UnitInfo>::new);
    let mut loading = use_signal(|| true);
    let error = use_signal(|| Option::<String>::None);
    let mut show_create = use_signal(|| false);
    let mut creating = use_signal(|| false);
    let mut selected = use_signal(HashMap::<i64, Vec<UploadFile>>::new);
    let mut tags = use_signal(HashMap::<i64, FileTag>::new);
    let mut uploading = use_signal(HashSet::<i64>::new);
    let mut expanded_unit = use_signal(|| Option::<i64>::None);

    let _loader = use_resource(move || async move {
        loading.set(true);
        load_units(user_id, units, error).await;
        loading.set(false);
    });

    let handle_create = move |name: String| {
        spawn(async move {
            if name.is_empty() {
                browser::alert("Please enter a unit name");
                return;
            }
            creating.set(true);
            match api::create_unit(&name).await {
                Ok(reply) if reply.success => {
                    load_units(user_id, units, error).await;
                    show_create.set(false);
                    browser::alert("Unit created successfully!");
                }
                Ok(reply) => {
                    browser::alert(reply.error.as_deref().unwrap_or("Failed to create unit"));
                }
                Err(err) => {
                    tracing::error!("create unit failed: {}", err);
                    browser::alert(err.backend_message().unwrap_or("Failed to create unit"));
                }
            }
            creating.set(false);
        });
    };

    let handle_select = move |(unit_id, files): (i64, Vec<UploadFile>)| {
        selected.write().insert(unit_id, files);
        // First selection for a unit defaults its tag.
        tags.write().entry(unit_id).or_insert(FileTag::StudyMaterial);
    };

    let handle_tag_change = move |(unit_id, tag): (i64, FileTag)| {
        tags.write().insert(unit_id, tag);
    };

    let handle_upload = move |unit_id: i64| {
        spawn(async move {
            let files = selected.read().get(&unit_id).cloned().unwrap_or_default();
            if files.is_empty() {
                browser::alert("Please select files to upload");
                return;
            }
            uploading.write().insert(unit_id);
            let tag = tags
                .read()
                .get(&unit_id)
                .copied()
                .unwrap_or(FileTag::StudyMaterial);
            match api::upload_files(unit_id, tag, files).await {
                Ok(reply) if reply.success => {
                    // The selection survives an all-skipped upload so the
                    // user can retry without re-picking.
                    if reply.clears_selection() {
                        load_units(user_id, units, error).await;
                        selected.write().remove(&unit_id);
                    }
                    browser::alert(&reply.summary());
                }
                Ok(reply) => {
                    browser::alert(&format!(
                        "Upload failed: {}",
                        reply.error.as_deref().unwrap_or("Unknown error")
                    ));
                }
                Err(err) => {
                    tracing::error!("upload failed: {}", err);
                    browser::alert(&format!(
                        "Upload failed: {}",
                        err.backend_message().unwrap_or("Failed to upload files")
                    ));
                }
            }
            uploading.write().remove(&unit_id);
        });
    };

    let handle_publish = move |unit_id: i64| {
        if !browser::confirm("Publish all unpublished files in this unit?") {
            return;
        }
        spawn(async move {
            match api::publish_files(unit_id).await {
                Ok(reply) if reply.success => {
                    load_units(user_id, units, error).await;
                    browser::alert(reply.message.as_deref().unwrap_or("Files published"));
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!("publish failed: {}", err);
                    browser::alert("Failed to publish files");
                }
            }
        });
    };

    let handle_delete_file = move |file_id: i64| {
        if !browser::confirm("Are you sure you want to delete this file?") {
            return;
        }
        spawn(async move {
            match api::delete_file(file_id).await {
                Ok(()) => {
                    load_units(user_id, units, error).await;
                    browser::alert("File deleted successfully");
                }
                Err(err) => {
                    tracing::error!("delete file failed: {}", err);
                    browser::alert("Failed to delete file");
                }
            }
        });
    };

    let handle_delete_unit = move |unit_id: i64| {
        if !browser::confirm("Are you sure you want to delete this unit? All files will be deleted.")
        {
            return;
        }
        spawn(async move {
            match api::delete_unit(unit_id).await {
                Ok(()) => {
                    load_units(user_id, units, error).await;
                    browser::alert("Unit deleted successfully");
                }
                Err(err) => {
                    tracing::error!("delete unit failed: {}", err);
                    browser::alert("Failed to delete unit");
                }
            }
        });
    };

    let handle_toggle = move |unit_id: i64| {
        expanded_unit.set(if expanded_unit() == Some(unit_id) {
            None
        } else {
            Some(unit_id)
        });
    };

    if loading() {
        return rsx! {
            div { class: "loading-screen",
                i { class: "fas fa-spinner fa-spin" }
                " Loading dashboard..."
            }
        };
    }

    let unit_list = units();
    let unit_count = unit_list.len();
    let file_count: usize = unit_list.iter().map(|unit| unit.files.len()).sum();

    rsx! {
        div { class: "teacher-dashboard",
            header { class: "dashboard-header",
                div { class: "header-left",
                    i { class: "fas fa-graduation-cap logo-icon" }
                    span { class: "logo-text",
                        "cloud"
                        span { class: "highlight", "ED" }
                    }
                    span { class: "user-badge",
                        i { class: "fas fa-chalkboard-teacher" }
                        " Teacher"
                    }
                }
                div { class: "header-right",
                    if let Some(user) = user {
                        UserMenu { user }
                    }
                }
            }

            div { class: "dashboard-content",
                aside { class: "dashboard-sidebar",
                    div { class: "sidebar-section",
                        h2 {
                            i { class: "fas fa-chalkboard-teacher" }
                            " Teacher Portal"
                        }
                        p { "Manage your course units and materials." }
                    }

                    div { class: "sidebar-section",
                        div { class: "stats-grid",
                            div { class: "stat-item",
                                i { class: "fas fa-folder" }
                                div {
                                    p { class: "stat-value", "{unit_count}" }
                                    p { class: "stat-label", "Total Units" }
                                }
                            }
                            div { class: "stat-item",
                                i { class: "fas fa-file" }
                                div {
                                    p { class: "stat-value", "{file_count}" }
                                    p { class: "stat-label", "Total Files" }
                                }
                            }
                        }
                    }

                    button {
                        class: "create-unit-btn",
                        onclick: move |_| show_create.set(true),
                        i { class: "fas fa-plus" }
                        " Create New Unit"
                    }
                }

                main { class: "dashboard-main",
                    h1 { "Your Course Units" }

                    if let Some(message) = error() {
                        div { class: "alert error",
                            i { class: "fas fa-exclamation-circle" }
                            " {message}"
                        }
                    }

                    if unit_list.is_empty() {
                        div { class: "empty-state",
                            i { class: "fas fa-folder-open" }
                            h3 { "No units yet" }
                            p { "Create your first course unit to get started" }
                            button {
                                class: "btn-primary",
                                onclick: move |_| show_create.set(true),
                                i { class: "fas fa-plus" }
                                " Create Unit"
                            }
                        }
                    } else {
                        div { class: "units-grid",
                            for unit in unit_list {
                                UnitPanel {
                                    key: "{unit.id}",
                                    expanded: expanded_unit() == Some(unit.id),
                                    selected_count: selected.read().get(&unit.id).map(Vec::len).unwrap_or(0),
                                    tag: tags.read().get(&unit.id).copied().unwrap_or(FileTag::StudyMaterial),
                                    uploading: uploading.read().contains(&unit.id),
                                    on_toggle: handle_toggle,
                                    on_select: handle_select,
                                    on_tag_change: handle_tag_change,
                                    on_upload: handle_upload,
                                    on_publish: handle_publish,
                                    on_delete_file: handle_delete_file,
                                    on_delete_unit: handle_delete_unit,
                                    unit,
                                }
                            }
                        }
                    }
                }
            }

            if show_create() {
                CreateUnitDialog {
                    creating: creating(),
                    on_create: handle_create,
                    on_cancel: move |_| show_create.set(false),
                }
            }
        }
    }
}

#[component]
fn UnitPanel(
    unit: UnitInfo,
    expanded: bool,
    selected_count: usize,
    tag: FileTag,
    uploading: bool,
    on_toggle: EventHandler<i64>,
    on_select: EventHandler<(i64, Vec<UploadFile>)>,
    on_tag_change: EventHandler<(i64, FileTag)>,
    on_upload: EventHandler<i64>,
    on_publish: EventHandler<i64>,
    on_delete_file: EventHandler<i64>,
    on_delete_unit: EventHandler<i64>,
) -> Element {
    let unit_id = unit.id;
    let file_count = unit.files.len();
    let published_count = unit.published_count();
    let chevron = if expanded { "up" } else { "down" };
    let expanded_class = if expanded { "unit-card expanded" } else { "unit-card" };

    let handle_files_picked = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        spawn(async move {
            let mut picked = Vec::new();
            for name in engine.files() {
                if let Some(bytes) = engine.read_file(&name).await {
                    picked.push(UploadFile { name, bytes });
                }
            }
            on_select.call((unit_id, picked));
        });
    };

    rsx! {
        div { class: "{expanded_class}",
            div { class: "unit-header", onclick: move |_| on_toggle.call(unit_id),
                div {
                    h3 {
                        i { class: "fas fa-folder" }
                        " {unit.name}"
                    }
                    p { class: "unit-meta",
                        "{file_count} file(s) \u{2022} {published_count} published"
                    }
                }
                i { class: "fas fa-chevron-{chevron}" }
            }

            if expanded {
                div { class: "unit-body",
                    div { class: "upload-section",
                        h4 {
                            i { class: "fas fa-cloud-upload-alt" }
                            " Upload Files"
                        }

                        div { class: "file-upload-form",
                            label { class: "file-select-label",
                                i { class: "fas fa-paperclip" }
                                if selected_count > 0 {
                                    " {selected_count} file(s) selected"
                                } else {
                                    " Choose files"
                                }
                                input {
                                    r#type: "file",
                                    multiple: true,
                                    style: "display: none;",
                                    onchange: handle_files_picked,
                                }
                            }

                            select {
                                class: "tag-select",
                                value: tag.slug(),
                                onchange: move |evt| {
                                    if let Some(tag) = FileTag::parse(&evt.value()) {
                                        on_tag_change.call((unit_id, tag));
                                    }
                                },
                                for option in FileTag::ALL {
                                    option { key: "{option.slug()}", value: "{option.slug()}", "{option.label()}" }
                                }
                            }

                            button {
                                class: "upload-btn",
                                disabled: uploading || selected_count == 0,
                                onclick: move |_| on_upload.call(unit_id),
                                if uploading {
                                    i { class: "fas fa-spinner fa-spin" }
                                    " Uploading..."
                                } else {
                                    i { class: "fas fa-upload" }
                                    " Upload"
                                }
                            }
                        }
                    }

                    div { class: "files-section",
                        div { class: "files-section-header",
                            h4 {
                                i { class: "fas fa-file-alt" }
                                " Files ({file_count})"
                            }
                            if unit.has_unpublished() {
                                button {
                                    class: "publish-all-btn",
                                    onclick: move |_| on_publish.call(unit_id),
                                    i { class: "fas fa-eye" }
                                    " Publish All"
                                }
                            }
                        }

                        if unit.files.is_empty() {
                            p { class: "no-files", "No files uploaded yet" }
                        } else {
                            div { class: "files-list",
                                for file in unit.files.clone() {
                                    div { key: "{file.id}", class: "file-item",
                                        div { class: "file-info",
                                            i { class: "fas {format::file_icon(&file.original_name)}" }
                                            div {
                                                h5 { "{file.original_name}" }
                                                p { class: "file-meta",
                                                    "{format::format_file_size(file.file_size.unwrap_or(0))} \u{2022} "
                                                    span { class: "tag tag-{file.tag.slug()}", "{file.tag.label()}" }
                                                }
                                            }
                                        }

                                        div { class: "file-actions",
                                            if file.is_published {
                                                span { class: "publish-status published", "Published" }
                                            } else {
                                                span { class: "publish-status unpublished", "Draft" }
                                            }

                                            a {
                                                class: "download-btn",
                                                href: api::download_href(file.id),
                                                target: "_blank",
                                                rel: "noopener noreferrer",
                                                title: "Download",
                                                i { class: "fas fa-download" }
                                            }

                                            button {
                                                class: "delete-btn",
                                                title: "Delete",
                                                onclick: move |_| on_delete_file.call(file.id),
                                                i { class: "fas fa-trash" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div { class: "unit-actions",
                        button {
                            class: "delete-unit-btn",
                            onclick: move |_| on_delete_unit.call(unit_id),
                            i { class: "fas fa-trash-alt" }
                            " Delete Unit"
                        }
                    }
                }
            }
        }
    }
}
