//! Site loading.
//!
//! Builds the [`Site`] context the page generators read from: declared pages,
//! data collections, and layouts, all discovered under one source root.
//!
//! ## Directory Structure
//!
//! ```text
//! site/
//! ├── config.toml                 # Site configuration (optional)
//! ├── _data/
//! │   ├── people.yml              # mapping: person id → record
//! │   ├── sessions.yml            # mapping: session id → record (with talks)
//! │   └── program.yml             # sequence of day records
//! ├── _layouts/
//! │   ├── person.wiki             # layout "person"
//! │   ├── session.wiki
//! │   ├── talk.wiki
//! │   └── day_program.html
//! ├── people/
//! │   └── alice/index.wiki        # hand-written: no page generated for alice
//! └── index.md
//! ```
//!
//! ## Conventions
//!
//! - Entries starting with `_` or `.` are not pages, nor is anything inside
//!   the destination directory.
//! - Only files with a markup extension (see [`urls::MARKUP_EXTENSIONS`]) are
//!   pages; other files are static assets and never cover an entity.
//! - Data collections and layouts are addressed by file stem.

use crate::config::SiteConfig;
use crate::types::{Page, SourcePage};
use crate::urls;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("YAML error in {0}: {1}")]
    Yaml(PathBuf, serde_yaml::Error),
    #[error("JSON error in {0}: {1}")]
    Json(PathBuf, serde_json::Error),
    #[error("TOML error in {0}: {1}")]
    Toml(PathBuf, toml::de::Error),
    #[error("Data collection '{0}' is defined by more than one file")]
    DuplicateData(String),
    #[error("Layout '{0}' is defined by more than one file")]
    DuplicateLayout(String),
}

const DATA_EXTENSIONS: &[&str] = &["yml", "yaml", "json", "toml"];

/// A template body and the file it was read from.
#[derive(Debug, Clone)]
pub struct Layout {
    pub path: PathBuf,
    pub content: String,
}

/// Everything the page generators and the renderer need to know about a site.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    /// Declared pages; generators append to this.
    pub pages: Vec<Page>,
    /// Data collections by name, in file-name order.
    pub data: Map<String, Value>,
    pub layouts: BTreeMap<String, Layout>,
}

impl Site {
    /// Empty site; useful for assembling sites in memory.
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            data: Map::new(),
            layouts: BTreeMap::new(),
        }
    }

    pub fn has_layout(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    /// Pages synthesized during this run, in generation order.
    pub fn generated_pages(&self) -> impl Iterator<Item = &crate::types::GeneratedPage> {
        self.pages.iter().filter_map(Page::as_generated)
    }
}

/// Load a site from its source root using an already-resolved config.
pub fn load(root: &Path, config: SiteConfig) -> Result<Site, SiteError> {
    let pages = scan_pages(root, &config)?;
    let data = load_data(&root.join(&config.data_dir))?;
    let layouts = load_layouts(&root.join(&config.layouts_dir))?;

    Ok(Site {
        config,
        pages,
        data,
        layouts,
    })
}

/// Find all page sources below `root`, sorted by relative path.
fn scan_pages(root: &Path, config: &SiteConfig) -> Result<Vec<Page>, SiteError> {
    let destination = root.join(&config.destination);
    let mut pages = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // The root itself may be named anything, e.g. a `.tmpXXXX` temp dir
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('_') && !name.starts_with('.') && e.path() != destination
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_page = path
            .extension()
            .map(|e| urls::is_markup(&e.to_string_lossy()))
            .unwrap_or(false);
        if !is_page {
            continue;
        }

        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let rel_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let (dir, name) = match rel_path.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => ("", rel_path.as_str()),
        };
        let url = urls::page_url(dir, name);

        pages.push(Page::Source(SourcePage {
            path: rel_path,
            url,
        }));
    }

    Ok(pages)
}

/// Load every data file directly inside `data_dir` as a named collection.
///
/// A missing directory yields no collections.
pub fn load_data(data_dir: &Path) -> Result<Map<String, Value>, SiteError> {
    let mut data = Map::new();
    for path in sorted_files(data_dir)? {
        let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
            continue;
        };
        if !DATA_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        let name = file_stem(&path);
        if data.contains_key(&name) {
            return Err(SiteError::DuplicateData(name));
        }
        let content = fs::read_to_string(&path)?;
        let value = parse_data(&path, &ext, &content)?;
        data.insert(name, value);
    }
    Ok(data)
}

fn parse_data(path: &Path, ext: &str, content: &str) -> Result<Value, SiteError> {
    match ext {
        "json" => {
            serde_json::from_str(content).map_err(|e| SiteError::Json(path.to_path_buf(), e))
        }
        "toml" => toml::from_str(content).map_err(|e| SiteError::Toml(path.to_path_buf(), e)),
        _ => {
            // An empty YAML document is an empty collection, not an error
            if content.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_yaml::from_str(content).map_err(|e| SiteError::Yaml(path.to_path_buf(), e))
        }
    }
}

/// Load every file directly inside `layouts_dir` as a layout named by stem.
pub fn load_layouts(layouts_dir: &Path) -> Result<BTreeMap<String, Layout>, SiteError> {
    let mut layouts = BTreeMap::new();
    for path in sorted_files(layouts_dir)? {
        let name = file_stem(&path);
        if layouts.contains_key(&name) {
            return Err(SiteError::DuplicateLayout(name));
        }
        let content = fs::read_to_string(&path)?;
        layouts.insert(name, Layout { path, content });
    }
    Ok(layouts)
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && !p
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with('.'))
                    .unwrap_or(true)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
