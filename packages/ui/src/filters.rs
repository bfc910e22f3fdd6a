//! Pure derivations over the fetched teacher listing.
//!
//! The student dashboard never mutates its snapshot; option sets and the
//! filtered view are recomputed from `(listing, filter)` whenever either
//! changes. Unit-level constraints run first, then the teacher-level ones,
//! so the free-text query sees only the units that survived.

use std::collections::BTreeSet;

use api::models::{FileTag, TeacherUnits, UnitInfo};

/// Current filter inputs of the student dashboard. Empty string / `None`
/// means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Case-insensitive substring over teacher name, subject and unit names.
    pub query: String,
    /// Exact teacher subject.
    pub subject: String,
    /// Keep only units containing at least one file with this tag.
    pub tag: Option<FileTag>,
    /// Exact unit name.
    pub unit: String,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.subject.is_empty()
            && self.tag.is_none()
            && self.unit.is_empty()
    }

    /// Chip labels for the active-filters row.
    pub fn active_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        let query = self.query.trim();
        if !query.is_empty() {
            labels.push(format!("\"{query}\""));
        }
        if !self.subject.is_empty() {
            labels.push(self.subject.clone());
        }
        if let Some(tag) = self.tag {
            labels.push(tag.label().to_string());
        }
        if !self.unit.is_empty() {
            labels.push(self.unit.clone());
        }
        labels
    }
}

/// Sorted unique teacher subjects present in the listing.
pub fn subject_options(listing: &[TeacherUnits]) -> Vec<String> {
    listing
        .iter()
        .filter_map(|entry| entry.teacher.subject_or_none())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Known tags present across all files, sorted by their wire value.
pub fn tag_options(listing: &[TeacherUnits]) -> Vec<FileTag> {
    let mut tags: Vec<FileTag> = listing
        .iter()
        .flat_map(|entry| &entry.units)
        .flat_map(|unit| &unit.files)
        .map(|file| file.tag)
        .filter(|tag| *tag != FileTag::Other)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    tags.sort_by_key(FileTag::slug);
    tags
}

/// Sorted unique unit names present in the listing.
pub fn unit_options(listing: &[TeacherUnits]) -> Vec<String> {
    listing
        .iter()
        .flat_map(|entry| &entry.units)
        .map(|unit| unit.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn unit_matches(unit: &UnitInfo, filter: &CatalogFilter) -> bool {
    if !filter.unit.is_empty() && unit.name != filter.unit {
        return false;
    }
    if let Some(tag) = filter.tag {
        if !unit.files.iter().any(|file| file.tag == tag) {
            return false;
        }
    }
    true
}

/// Apply the filter: units are constrained first, then teachers are kept only
/// when subject and query match and, if a unit-level filter is active, at
/// least one unit survived.
pub fn filter_catalog(listing: &[TeacherUnits], filter: &CatalogFilter) -> Vec<TeacherUnits> {
    let query = filter.query.trim().to_lowercase();

    listing
        .iter()
        .filter_map(|entry| {
            let units: Vec<UnitInfo> = entry
                .units
                .iter()
                .filter(|unit| unit_matches(unit, filter))
                .cloned()
                .collect();

            if !filter.subject.is_empty()
                && entry.teacher.subject_or_none() != Some(filter.subject.as_str())
            {
                return None;
            }

            if !query.is_empty() {
                let match_name = entry.teacher.full_name.to_lowercase().contains(&query);
                let match_subject = entry
                    .teacher
                    .subject_or_none()
                    .is_some_and(|subject| subject.to_lowercase().contains(&query));
                let match_unit = units
                    .iter()
                    .any(|unit| unit.name.to_lowercase().contains(&query));
                if !(match_name || match_subject || match_unit) {
                    return None;
                }
            }

            if (!filter.unit.is_empty() || filter.tag.is_some()) && units.is_empty() {
                return None;
            }

            Some(TeacherUnits {
                teacher: entry.teacher.clone(),
                units,
            })
        })
        .collect()
}

/// Published files across the (already filtered) tree.
pub fn published_total(listing: &[TeacherUnits]) -> usize {
    listing
        .iter()
        .flat_map(|entry| &entry.units)
        .map(UnitInfo::published_count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::{FileInfo, Role, UserInfo};

    fn file(id: i64, tag: FileTag, is_published: bool) -> FileInfo {
        FileInfo {
            id,
            original_name: format!("f{id}.pdf"),
            file_size: Some(1024),
            tag,
            is_published,
            file_url: None,
            size_display: None,
        }
    }

    fn teacher(id: i64, name: &str, subject: Option<&str>, units: Vec<UnitInfo>) -> TeacherUnits {
        TeacherUnits {
            teacher: UserInfo {
                id,
                full_name: name.to_string(),
                email: format!("t{id}@school.example"),
                role: Role::Teacher,
                subject: subject.map(str::to_string),
            },
            units,
        }
    }

    fn sample() -> Vec<TeacherUnits> {
        vec![
            teacher(
                1,
                "A",
                Some("Math"),
                vec![UnitInfo {
                    id: 1,
                    name: "U1".to_string(),
                    files: vec![file(1, FileTag::Assignment, true)],
                }],
            ),
            teacher(
                2,
                "B",
                Some("Physics"),
                vec![
                    UnitInfo {
                        id: 2,
                        name: "Waves".to_string(),
                        files: vec![
                            file(2, FileTag::StudyMaterial, true),
                            file(3, FileTag::QuestionBank, false),
                        ],
                    },
                    UnitInfo {
                        id: 3,
                        name: "Optics".to_string(),
                        files: vec![],
                    },
                ],
            ),
            teacher(3, "C", None, vec![]),
        ]
    }

    #[test]
    fn empty_filter_returns_the_listing_exactly() {
        let listing = sample();
        let filter = CatalogFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter_catalog(&listing, &filter), listing);
    }

    #[test]
    fn tag_filter_keeps_only_teachers_with_a_surviving_unit() {
        let listing = sample();

        let filter = CatalogFilter {
            tag: Some(FileTag::Assignment),
            ..Default::default()
        };
        let filtered = filter_catalog(&listing, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].teacher.id, 1);
        assert_eq!(filtered[0].units.len(), 1);
        assert_eq!(filtered[0].units[0].id, 1);

        // Nobody has a study_material file under teacher 1; it is excluded
        // because zero units survive.
        let filter = CatalogFilter {
            tag: Some(FileTag::StudyMaterial),
            ..Default::default()
        };
        let filtered = filter_catalog(&listing, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].teacher.id, 2);
        assert_eq!(filtered[0].units.len(), 1);
        assert_eq!(filtered[0].units[0].name, "Waves");
    }

    #[test]
    fn unit_name_filter_constrains_units_and_teachers() {
        let listing = sample();
        let filter = CatalogFilter {
            unit: "Waves".to_string(),
            ..Default::default()
        };
        let filtered = filter_catalog(&listing, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].teacher.id, 2);
        assert_eq!(filtered[0].units.len(), 1);
    }

    #[test]
    fn subject_filter_is_exact() {
        let listing = sample();
        let filter = CatalogFilter {
            subject: "Math".to_string(),
            ..Default::default()
        };
        let filtered = filter_catalog(&listing, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].teacher.id, 1);
    }

    #[test]
    fn query_matches_name_subject_or_unit_case_insensitively() {
        let listing = sample();
        for query in ["physics", "WAVES", "b"] {
            let filter = CatalogFilter {
                query: query.to_string(),
                ..Default::default()
            };
            let filtered = filter_catalog(&listing, &filter);
            assert!(
                filtered.iter().any(|entry| entry.teacher.id == 2),
                "query {query} should match teacher 2"
            );
        }

        // A query alone keeps teachers with zero units if their own fields match.
        let filter = CatalogFilter {
            query: "c".to_string(),
            ..Default::default()
        };
        assert!(filter_catalog(&listing, &filter)
            .iter()
            .any(|entry| entry.teacher.id == 3));
    }

    #[test]
    fn query_only_sees_surviving_units() {
        let listing = sample();
        // "Optics" matches a unit of teacher 2, but that unit is removed by
        // the tag filter first, and neither name nor subject matches.
        let filter = CatalogFilter {
            query: "optics".to_string(),
            tag: Some(FileTag::StudyMaterial),
            ..Default::default()
        };
        assert!(filter_catalog(&listing, &filter).is_empty());
    }

    #[test]
    fn published_total_counts_only_published_files_of_the_filtered_view() {
        let listing = sample();
        assert_eq!(published_total(&listing), 2);

        let filter = CatalogFilter {
            tag: Some(FileTag::StudyMaterial),
            ..Default::default()
        };
        let filtered = filter_catalog(&listing, &filter);
        assert_eq!(published_total(&filtered), 1);
    }

    #[test]
    fn option_sets_are_sorted_and_deduplicated() {
        let mut listing = sample();
        listing.push(teacher(4, "D", Some("Math"), vec![]));

        assert_eq!(subject_options(&listing), vec!["Math", "Physics"]);
        assert_eq!(
            tag_options(&listing),
            vec![FileTag::Assignment, FileTag::QuestionBank, FileTag::StudyMaterial]
        );
        assert_eq!(unit_options(&listing), vec!["Optics", "U1", "Waves"]);
    }

    #[test]
    fn unknown_tags_are_not_offered_as_options() {
        let listing = vec![teacher(
            1,
            "A",
            None,
            vec![UnitInfo {
                id: 1,
                name: "U1".to_string(),
                files: vec![file(1, FileTag::Other, true)],
            }],
        )];
        assert!(tag_options(&listing).is_empty());
    }

    #[test]
    fn active_labels_reflect_each_input() {
        let filter = CatalogFilter {
            query: " graphs ".to_string(),
            subject: "Math".to_string(),
            tag: Some(FileTag::QuestionBank),
            unit: "U1".to_string(),
        };
        assert_eq!(
            filter.active_labels(),
            vec!["\"graphs\"", "Math", "Question Bank", "U1"]
        );
        assert!(CatalogFilter::default().active_labels().is_empty());
    }
}
