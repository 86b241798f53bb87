//! Shared test utilities for the conference-pages test suite.
//!
//! Provides fixture setup plus small builders for in-memory sites.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let mut site = load_fixture_site(tmp.path());
//! generate_all(&mut site).unwrap();
//! assert!(generated_urls(&site).contains(&"/people/bob/".to_string()));
//!
//! let mut site = site_with_layouts(&["person"]);
//! add_source_page(&mut site, "people/alice/index.wiki");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{self, SiteConfig};
use crate::site::{self, Layout, Site};
use crate::types::{Page, SourcePage};
use crate::urls;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load a fixture copy with its own `config.toml`. Panics on any error.
pub fn load_fixture_site(root: &Path) -> Site {
    let config = config::load_config(root).unwrap();
    site::load(root, config).unwrap()
}

// =========================================================================
// In-memory sites
// =========================================================================

/// A site with default config, no data, and empty layouts with the given names.
pub fn site_with_layouts(names: &[&str]) -> Site {
    let mut site = Site::new(SiteConfig::default());
    for name in names {
        add_layout(&mut site, name, "");
    }
    site
}

pub fn add_layout(site: &mut Site, name: &str, content: &str) {
    site.layouts.insert(
        name.to_string(),
        Layout {
            path: PathBuf::from(format!("_layouts/{name}")),
            content: content.to_string(),
        },
    );
}

/// Declare a hand-written page at `path` (relative, `/`-separated).
pub fn add_source_page(site: &mut Site, path: &str) {
    let (dir, name) = path.rsplit_once('/').unwrap_or(("", path));
    site.pages.push(Page::Source(SourcePage {
        path: path.to_string(),
        url: urls::page_url(dir, name),
    }));
}

// =========================================================================
// Extractors
// =========================================================================

/// URLs of all generated pages, in generation order.
pub fn generated_urls(site: &Site) -> Vec<String> {
    site.generated_pages().map(|p| p.url()).collect()
}
