//! Page URL derivation and the existing-page scan.
//!
//! ## URL Rule
//!
//! Markup sources render to `.html`, and `index` pages are addressed by their
//! directory:
//! - `people/alice/index.wiki` → `/people/alice/`
//! - `people/alice/bio.md` → `/people/alice/bio.html`
//! - `program/day1/index.html` → `/program/day1/`
//! - `assets/site.css` → `/assets/site.css`
//!
//! ## Existing Identifiers
//!
//! A page "covers" an entity when its URL sits directly inside the entity's
//! directory: `^/<dir>/<id>/[^/]*$`. Talk identifiers span two segments
//! (`<session>/<talk>`), so the capture width is configurable.

use crate::types::Page;
use regex::Regex;
use std::collections::HashSet;

/// Extensions treated as page sources; they all render to `.html`.
pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm", "md", "markdown", "wiki"];

pub fn is_markup(extension: &str) -> bool {
    MARKUP_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(extension))
}

/// URL of a page named `name` in directory `dir` (relative, `/`-separated).
pub fn page_url(dir: &str, name: &str) -> String {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    let out_ext = match ext {
        Some(ext) if is_markup(ext) => ".html".to_string(),
        Some(ext) => format!(".{ext}"),
        None => String::new(),
    };

    let dir = dir.trim_matches('/');
    let prefix = if dir.is_empty() {
        "/".to_string()
    } else {
        format!("/{dir}/")
    };

    if stem == "index" && out_ext == ".html" {
        prefix
    } else {
        format!("{prefix}{stem}{out_ext}")
    }
}

/// Build the pattern matching pages directly inside `<dir>/<id>`, where the
/// id spans `segments` path segments.
pub fn id_pattern(dir: &str, segments: usize) -> Result<Regex, regex::Error> {
    let capture = vec!["[^/]+"; segments.max(1)].join("/");
    Regex::new(&format!(
        "^/{}/({})/[^/]*$",
        regex::escape(dir.trim_matches('/')),
        capture
    ))
}

/// Collect the identifiers already covered by declared pages.
pub fn existing_ids<'a>(
    pages: impl IntoIterator<Item = &'a Page>,
    dir: &str,
    segments: usize,
) -> Result<HashSet<String>, regex::Error> {
    let pattern = id_pattern(dir, segments)?;
    Ok(pages
        .into_iter()
        .filter_map(|page| {
            pattern
                .captures(&page.url())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
        .collect())
}
