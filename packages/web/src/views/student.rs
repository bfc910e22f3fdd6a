//! Student dashboard: browse teachers, filter the course library and
//! download published files.
//!
//! The listing is fetched once on mount. Everything derived from it — option
//! sets, the filtered tree, the file total — is recomputed from the snapshot
//! through the pure functions in `ui::filters`.

use std::collections::HashSet;

use api::models::{FileInfo, FileTag, Role, TeacherUnits, UnitInfo};
use dioxus::prelude::*;
use ui::{browser, filters, format, use_session, CatalogFilter, RequireRole, UserMenu};

#[component]
pub fn StudentDashboard() -> Element {
    rsx! {
        RequireRole { role: Role::Student, StudentHome {} }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[component]
fn StudentHome() -> Element {
    let session = use_session();
    let mut listing = use_signal(Vec::<TeacherUnits>::new);
    let mut loading = use_signal(|| true);
    let mut filter = use_signal(CatalogFilter::default);
    let mut expanded_teacher = use_signal(|| Option::<i64>::None);
    let expanded_units = use_signal(HashSet::<i64>::new);

    let _loader = use_resource(move || async move {
        match api::list_teachers().await {
            Ok(teachers) => listing.set(teachers),
            Err(err) => tracing::error!("failed to load teachers: {}", err),
        }
        loading.set(false);
    });

    let subjects = use_memo(move || filters::subject_options(&listing.read()));
    let tags = use_memo(move || filters::tag_options(&listing.read()));
    let unit_names = use_memo(move || filters::unit_options(&listing.read()));
    let filtered = use_memo(move || filters::filter_catalog(&listing.read(), &filter.read()));
    let total_files = use_memo(move || filters::published_total(&filtered.read()));

    let handle_download = move |file: FileInfo| {
        spawn(async move {
            if let Some(url) = file.file_url.clone() {
                // Direct link, e.g. object storage.
                browser::download_url(&url, &file.original_name);
                return;
            }
            match api::download_file(file.id).await {
                Ok(bytes) => browser::download_bytes(&bytes, &file.original_name),
                Err(err) => {
                    tracing::error!("download failed: {}", err);
                    browser::alert("Failed to download file. Please try again.");
                }
            }
        });
    };

    let handle_toggle_teacher = move |id: i64| {
        expanded_teacher.set(if expanded_teacher() == Some(id) {
            None
        } else {
            Some(id)
        });
    };

    if loading() {
        return rsx! {
            div { class: "loading-screen",
                i { class: "fas fa-spinner fa-spin" }
                p { "Loading your courses..." }
            }
        };
    }

    let user = session.user();
    let user_name = user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "Student".to_string());
    let filtered_list = filtered();
    let teacher_count = filtered_list.len();
    let unit_count: usize = filtered_list.iter().map(|entry| entry.units.len()).sum();
    let file_count = total_files();
    let active_filters = filter.read().active_labels();

    rsx! {
        div { class: "student-dashboard",
            header { class: "dashboard-header",
                div { class: "header-left",
                    i { class: "fas fa-graduation-cap logo-icon" }
                    span { class: "logo-text",
                        "cloud"
                        span { class: "highlight", "ED" }
                    }
                    span { class: "user-badge",
                        i { class: "fas fa-user-graduate" }
                        " Student"
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
                    div { class: "sidebar-section welcome-card",
                        h3 { "Welcome Back!" }
                        p { "{user_name}" }
                    }

                    div { class: "sidebar-section",
                        h4 {
                            i { class: "fas fa-chart-bar" }
                            " Quick Stats"
                        }
                        div { class: "stats-grid",
                            div { class: "stat-item",
                                i { class: "fas fa-chalkboard-teacher" }
                                div {
                                    p { class: "stat-value", "{teacher_count}" }
                                    p { class: "stat-label", "Teachers" }
                                }
                            }
                            div { class: "stat-item",
                                i { class: "fas fa-folder" }
                                div {
                                    p { class: "stat-value", "{unit_count}" }
                                    p { class: "stat-label", "Units" }
                                }
                            }
                            div { class: "stat-item",
                                i { class: "fas fa-file-alt" }
                                div {
                                    p { class: "stat-value", "{file_count}" }
                                    p { class: "stat-label", "Files" }
                                }
                            }
                        }
                    }
                }

                main { class: "dashboard-main",
                    div { class: "filter-panel",
                        div { class: "filter-header",
                            h2 {
                                i { class: "fas fa-book-reader" }
                                " Course Library"
                            }
                            p { class: "filter-subtitle",
                                "Showing {teacher_count} teacher{plural(teacher_count)} \u{2022} {file_count} file{plural(file_count)} available"
                            }
                        }

                        div { class: "filter-controls",
                            div { class: "search-box",
                                i { class: "fas fa-search" }
                                input {
                                    r#type: "text",
                                    placeholder: "Search teachers, subjects, or units...",
                                    value: filter.read().query.clone(),
                                    oninput: move |evt| filter.write().query = evt.value(),
                                }
                                if !filter.read().query.is_empty() {
                                    i {
                                        class: "fas fa-times clear-icon",
                                        onclick: move |_| filter.write().query.clear(),
                                    }
                                }
                            }

                            div { class: "filter-dropdowns",
                                select {
                                    value: filter.read().subject.clone(),
                                    onchange: move |evt| filter.write().subject = evt.value(),
                                    option { value: "", "All Subjects" }
                                    for subject in subjects() {
                                        option { key: "{subject}", value: "{subject}", "{subject}" }
                                    }
                                }

                                select {
                                    value: filter.read().tag.map(|t| t.slug()).unwrap_or(""),
                                    onchange: move |evt| {
                                        filter.write().tag = FileTag::parse(&evt.value());
                                    },
                                    option { value: "", "All Tags" }
                                    for tag in tags() {
                                        option { key: "{tag.slug()}", value: "{tag.slug()}", "{tag.label()}" }
                                    }
                                }

                                select {
                                    value: filter.read().unit.clone(),
                                    onchange: move |evt| filter.write().unit = evt.value(),
                                    option { value: "", "All Units" }
                                    for name in unit_names() {
                                        option { key: "{name}", value: "{name}", "{name}" }
                                    }
                                }

                                button {
                                    class: "clear-filters-btn",
                                    onclick: move |_| filter.set(CatalogFilter::default()),
                                    i { class: "fas fa-redo-alt" }
                                    " Reset"
                                }
                            }

                            if !active_filters.is_empty() {
                                div { class: "active-filters",
                                    span { "Active filters:" }
                                    for label in active_filters {
                                        span { key: "{label}", class: "filter-tag", "{label}" }
                                    }
                                }
                            }
                        }
                    }

                    div { class: "teachers-grid",
                        if filtered_list.is_empty() {
                            div { class: "no-results",
                                i { class: "fas fa-search" }
                                h3 { "No courses found" }
                                p { "Try adjusting your filters or search query" }
                                button {
                                    class: "btn-primary",
                                    onclick: move |_| filter.set(CatalogFilter::default()),
                                    i { class: "fas fa-redo-alt" }
                                    " Clear Filters"
                                }
                            }
                        }

                        for entry in filtered_list {
                            TeacherCard {
                                key: "{entry.teacher.id}",
                                expanded: expanded_teacher() == Some(entry.teacher.id),
                                expanded_units,
                                on_toggle: handle_toggle_teacher,
                                on_download: handle_download,
                                entry,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TeacherCard(
    entry: TeacherUnits,
    expanded: bool,
    expanded_units: Signal<HashSet<i64>>,
    on_toggle: EventHandler<i64>,
    on_download: EventHandler<FileInfo>,
) -> Element {
    let teacher_id = entry.teacher.id;
    let unit_count = entry.units.len();
    let published_count: usize = entry.units.iter().map(UnitInfo::published_count).sum();
    let subject = entry
        .teacher
        .subject_or_none()
        .unwrap_or("General Course")
        .to_string();
    let chevron = if expanded { "up" } else { "down" };

    rsx! {
        div { class: "teacher-card",
            div {
                class: "teacher-card-header",
                onclick: move |_| on_toggle.call(teacher_id),
                div { class: "teacher-avatar",
                    i { class: "fas fa-user-tie" }
                }
                div { class: "teacher-info",
                    h3 { class: "teacher-name", "{entry.teacher.full_name}" }
                    p { class: "teacher-subject",
                        i { class: "fas fa-graduation-cap" }
                        " {subject}"
                    }
                    div { class: "teacher-meta",
                        span {
                            i { class: "fas fa-folder" }
                            " {unit_count} unit{plural(unit_count)}"
                        }
                        span {
                            i { class: "fas fa-file" }
                            " {published_count} file{plural(published_count)}"
                        }
                    }
                }
                i { class: "fas fa-chevron-{chevron} expand-icon" }
            }

            if expanded && !entry.units.is_empty() {
                div { class: "units-container",
                    for unit in entry.units.clone() {
                        UnitCard {
                            key: "{unit.id}",
                            expanded: expanded_units.read().contains(&unit.id),
                            expanded_units,
                            on_download,
                            unit,
                        }
                    }
                }
            }

            if expanded && entry.units.is_empty() {
                div { class: "no-units",
                    i { class: "fas fa-inbox" }
                    p { "No units available" }
                }
            }
        }
    }
}

#[component]
fn UnitCard(
    unit: UnitInfo,
    expanded: bool,
    mut expanded_units: Signal<HashSet<i64>>,
    on_download: EventHandler<FileInfo>,
) -> Element {
    let published: Vec<FileInfo> = unit
        .files
        .iter()
        .filter(|file| file.is_published)
        .cloned()
        .collect();
    // Units with nothing published are hidden from students entirely.
    if published.is_empty() {
        return rsx! {};
    }

    let unit_id = unit.id;
    let file_count = published.len();
    let chevron = if expanded { "up" } else { "down" };

    let toggle = move |_| {
        let mut open = expanded_units.write();
        if !open.remove(&unit_id) {
            open.insert(unit_id);
        }
    };

    rsx! {
        div { class: "unit-card",
            div { class: "unit-header", onclick: toggle,
                div { class: "unit-icon",
                    i { class: "fas fa-book" }
                }
                div { class: "unit-details",
                    h4 { "{unit.name}" }
                    span { class: "file-count", "{file_count} file{plural(file_count)}" }
                }
                i { class: "fas fa-chevron-{chevron} unit-expand-icon" }
            }

            if expanded {
                div { class: "files-list",
                    for file in published {
                        FileRow { key: "{file.id}", on_download, file }
                    }
                }
            }
        }
    }
}

#[component]
fn FileRow(file: FileInfo, on_download: EventHandler<FileInfo>) -> Element {
    let icon = format::file_icon(&file.original_name);
    let size = file.size_display.clone().unwrap_or_default();
    let clicked = file.clone();

    rsx! {
        div {
            class: "file-item",
            onclick: move |_| on_download.call(clicked.clone()),
            i { class: "fas {icon} file-icon" }
            div { class: "file-info",
                span { class: "file-name", "{file.original_name}" }
                span { class: "file-meta", "{size}" }
            }
            span { class: "file-tag-badge tag-{file.tag.slug()}", "{file.tag.label()}" }
            i { class: "fas fa-download download-icon" }
        }
    }
}
