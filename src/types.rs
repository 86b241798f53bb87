//! Shared page types.
//!
//! A site's page collection mixes pages found in the source tree with pages
//! synthesized from data collections. Both expose a URL, which is all the
//! existing-page scan needs.

use crate::urls;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The four kinds of synthesized pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Person,
    Session,
    Talk,
    DayProgram,
}

impl PageKind {
    /// Run order used by [`crate::generate::generate_all`].
    pub const ALL: [PageKind; 4] = [
        PageKind::Person,
        PageKind::Session,
        PageKind::Talk,
        PageKind::DayProgram,
    ];

    /// Data collection the entities come from.
    pub fn collection(self) -> &'static str {
        match self {
            PageKind::Person => "people",
            PageKind::Session | PageKind::Talk => "sessions",
            PageKind::DayProgram => "program",
        }
    }

    /// Layout the generated page is rendered with.
    pub fn layout(self) -> &'static str {
        match self {
            PageKind::Person => "person",
            PageKind::Session => "session",
            PageKind::Talk => "talk",
            PageKind::DayProgram => "day_program",
        }
    }

    /// Layout that must exist for this kind to generate anything.
    ///
    /// Talks are gated on the session layout, not their own.
    pub fn guard_layout(self) -> &'static str {
        match self {
            PageKind::Talk => "session",
            other => other.layout(),
        }
    }

    /// Output filename of every page of this kind.
    pub fn filename(self) -> &'static str {
        match self {
            PageKind::DayProgram => "index.html",
            _ => "index.wiki",
        }
    }

    /// Record field the page title is copied from.
    pub fn title_field(self) -> &'static str {
        match self {
            PageKind::Person => "name",
            _ => "title",
        }
    }

    /// Number of URL path segments that make up an identifier.
    pub fn id_segments(self) -> usize {
        match self {
            PageKind::Talk => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PageKind::Person => "person",
            PageKind::Session => "session",
            PageKind::Talk => "talk",
            PageKind::DayProgram => "day program",
        };
        f.write_str(label)
    }
}

/// A page that exists as a file in the site source tree.
#[derive(Debug, Clone, Serialize)]
pub struct SourcePage {
    /// Path relative to the site root, `/`-separated.
    pub path: String,
    pub url: String,
}

/// A page synthesized from one entity record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPage {
    pub kind: PageKind,
    /// Entity identifier (`alice`, `s1/bob`, `day2`).
    pub id: String,
    /// Output directory relative to the site root: `<base>/<id>`.
    pub dir: String,
    pub name: String,
    pub layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Full day record, only set for day program pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Value>,
}

impl GeneratedPage {
    pub fn url(&self) -> String {
        urls::page_url(&self.dir, &self.name)
    }

    /// Output path relative to the destination directory.
    pub fn output_path(&self) -> String {
        format!("{}/{}", self.dir, self.name)
    }
}

/// One entry of the site's page collection.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Page {
    Source(SourcePage),
    Generated(GeneratedPage),
}

impl Page {
    pub fn url(&self) -> String {
        match self {
            Page::Source(page) => page.url.clone(),
            Page::Generated(page) => page.url(),
        }
    }

    pub fn as_generated(&self) -> Option<&GeneratedPage> {
        match self {
            Page::Generated(page) => Some(page),
            Page::Source(_) => None,
        }
    }
}
