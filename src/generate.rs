//! Page generation from data collections.
//!
//! For every entity in the `people`, `sessions` and `program` collections
//! (and every talk nested inside a session) a [`GeneratedPage`] is
//! synthesized, unless a page already exists in the entity's directory.
//!
//! ## Kinds
//!
//! | Kind | Collection | Identifier | Output | Layout |
//! |------|------------|------------|--------|--------|
//! | person | `people` | mapping key | `<people_dir>/<id>/index.wiki` | `person` |
//! | session | `sessions` | mapping key | `<session_dir>/<id>/index.wiki` | `session` |
//! | talk | `sessions[*].talks[*]` | `<session>/<id or speaker>` | `<session_dir>/<id>/index.wiki` | `talk` |
//! | day program | `program` | `<prefix><n>` | `<day_program_dir>/<id>/index.html` | `day_program` |
//!
//! A kind whose guard layout is missing generates nothing. Talks are guarded
//! by the `session` layout.
//!
//! Mapping keys and talk ids become single path segments: they must be
//! non-empty, must not contain `/`, and must not be `.` or `..`.
//!
//! ## Idempotence
//!
//! Generated pages carry the same URL a hand-written page at that location
//! would have, so running [`generate_all`] on a site that already contains
//! its output produces no new pages.

use crate::site::Site;
use crate::types::{GeneratedPage, Page, PageKind};
use crate::urls;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid existing-page pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Data collection '{collection}' must be {expected}")]
    CollectionShape {
        collection: String,
        expected: &'static str,
    },
    #[error("Duplicate {kind} identifier '{id}'")]
    DuplicateId { kind: PageKind, id: String },
    #[error("Talk {position} of session '{session}' has neither an id nor a speaker")]
    MissingTalkId { session: String, position: usize },
    #[error("Invalid {kind} identifier '{id}': each segment must be a non-empty name without '/'")]
    InvalidId { kind: PageKind, id: String },
}

/// One entity to (possibly) generate a page for.
#[derive(Debug)]
pub struct Entity<'a> {
    pub id: String,
    pub record: &'a Value,
}

/// Number of pages generated per kind by one [`generate_all`] run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerateReport {
    pub counts: Vec<(PageKind, usize)>,
}

impl GenerateReport {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn count(&self, kind: PageKind) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Run every kind in order, appending the generated pages to `site.pages`.
///
/// Each kind sees the pages appended by the kinds before it.
pub fn generate_all(site: &mut Site) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport::default();
    for kind in PageKind::ALL {
        let pages = synthesize(site, kind)?;
        report.counts.push((kind, pages.len()));
        site.pages.extend(pages.into_iter().map(Page::Generated));
    }
    Ok(report)
}

/// Build the pages of one kind that are not yet declared in `site`.
pub fn synthesize(site: &Site, kind: PageKind) -> Result<Vec<GeneratedPage>, GenerateError> {
    if !site.has_layout(kind.guard_layout()) {
        return Ok(Vec::new());
    }

    let base_dir = base_dir(site, kind);
    let existing = urls::existing_ids(&site.pages, base_dir, kind.id_segments())?;
    let entities = entities(site, kind)?;

    let mut seen = HashSet::new();
    let mut pages = Vec::new();
    for entity in entities {
        if !seen.insert(entity.id.clone()) {
            return Err(GenerateError::DuplicateId {
                kind,
                id: entity.id,
            });
        }
        if !existing.contains(&entity.id) {
            pages.push(describe(kind, &entity, base_dir));
        }
    }
    Ok(pages)
}

/// Configured base directory for a kind. Talks share the session directory.
pub fn base_dir(site: &Site, kind: PageKind) -> &str {
    match kind {
        PageKind::Person => &site.config.people_dir,
        PageKind::Session | PageKind::Talk => &site.config.session_dir,
        PageKind::DayProgram => &site.config.day_program_dir,
    }
}

/// Enumerate the entities of a kind in collection order.
///
/// A missing collection has no entities.
pub fn entities<'a>(site: &'a Site, kind: PageKind) -> Result<Vec<Entity<'a>>, GenerateError> {
    let collection = match site.data.get(kind.collection()) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };

    match kind {
        PageKind::Person | PageKind::Session => {
            let map = collection
                .as_object()
                .ok_or_else(|| shape_error(kind.collection(), "a mapping"))?;
            let mut entities = Vec::with_capacity(map.len());
            for (id, record) in map {
                check_segment(kind, id, id)?;
                entities.push(Entity {
                    id: id.clone(),
                    record,
                });
            }
            Ok(entities)
        }
        PageKind::Talk => {
            let sessions = collection
                .as_object()
                .ok_or_else(|| shape_error(kind.collection(), "a mapping"))?;
            let mut talks = Vec::new();
            for (session_id, session) in sessions {
                check_segment(PageKind::Session, session_id, session_id)?;
                let session_talks = match session.get("talks") {
                    None | Some(Value::Null) => continue,
                    Some(Value::Array(items)) => items,
                    Some(_) => {
                        return Err(shape_error(
                            &format!("sessions.{session_id}.talks"),
                            "a sequence",
                        ));
                    }
                };
                for (index, talk) in session_talks.iter().enumerate() {
                    let talk_id = ["id", "speaker"]
                        .iter()
                        .find_map(|field| talk.get(*field).and_then(scalar_string))
                        .ok_or_else(|| GenerateError::MissingTalkId {
                            session: session_id.clone(),
                            position: index + 1,
                        })?;
                    let id = format!("{session_id}/{talk_id}");
                    check_segment(kind, &talk_id, &id)?;
                    talks.push(Entity { id, record: talk });
                }
            }
            Ok(talks)
        }
        PageKind::DayProgram => {
            let days = collection
                .as_array()
                .ok_or_else(|| shape_error(kind.collection(), "a sequence"))?;
            let prefix = &site.config.day_program_prefix;
            Ok(days
                .iter()
                .enumerate()
                .map(|(index, record)| Entity {
                    id: format!("{prefix}{}", index + 1),
                    record,
                })
                .collect())
        }
    }
}

/// Build the page descriptor for one entity.
pub fn describe(kind: PageKind, entity: &Entity<'_>, base_dir: &str) -> GeneratedPage {
    let title = entity.record.get(kind.title_field()).and_then(scalar_string);
    let day = (kind == PageKind::DayProgram).then(|| entity.record.clone());

    GeneratedPage {
        kind,
        id: entity.id.clone(),
        dir: format!("{}/{}", base_dir, entity.id),
        name: kind.filename().to_string(),
        layout: kind.layout().to_string(),
        title,
        day,
    }
}

/// String form of a scalar field; `None` for null, mappings and sequences.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reject a segment that would not map to exactly one directory.
fn check_segment(kind: PageKind, segment: &str, id: &str) -> Result<(), GenerateError> {
    if segment.is_empty() || segment.contains('/') || segment == "." || segment == ".." {
        return Err(GenerateError::InvalidId {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

fn shape_error(collection: &str, expected: &'static str) -> GenerateError {
    GenerateError::CollectionShape {
        collection: collection.to_string(),
        expected,
    }
}
