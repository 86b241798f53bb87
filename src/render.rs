//! Rendering of generated pages.
//!
//! Layouts are Tera templates addressed by file stem, so a layout can extend
//! another (`{% extends "base" %}`). Each generated page is rendered with its
//! layout and written to `<destination>/<dir>/<name>`. Further conversion of
//! the output (wiki markup, Markdown) is left to the site's own toolchain.
//!
//! ## Template Context
//!
//! | Variable | Content |
//! |----------|---------|
//! | `page.id` | entity identifier (`alice`, `s1/bob`, `day1`) |
//! | `page.kind` | `person`, `session`, `talk`, `day_program` |
//! | `page.title` | copied from the record's `name` / `title`, absent if missing |
//! | `page.day` | full day record (day program pages only) |
//! | `page.url` | URL the page will be served at |
//! | `site.data` | every data collection |
//! | `site.config` | the resolved site configuration |
//!
//! The `select` and `having` filters from [`crate::filters`] are registered.

use crate::filters;
use crate::site::Site;
use crate::types::GeneratedPage;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Layout '{layout}' required by {url} does not exist")]
    MissingLayout { layout: String, url: String },
}

/// A page written to disk.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: String,
    /// Path relative to the destination directory.
    pub output_path: String,
}

/// Compile every site layout into one Tera instance with the filters
/// registered.
pub fn build_engine(site: &Site) -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    filters::register(&mut tera);
    tera.add_raw_templates(
        site.layouts
            .iter()
            .map(|(name, layout)| (name.as_str(), layout.content.as_str())),
    )?;
    Ok(tera)
}

/// Build the context a single page is rendered with.
pub fn page_context(site: &Site, page: &GeneratedPage) -> Result<Context, RenderError> {
    let mut page_value = serde_json::to_value(page).map_err(tera::Error::json)?;
    if let Some(fields) = page_value.as_object_mut() {
        fields.insert("url".to_string(), page.url().into());
    }
    let site_value = serde_json::json!({
        "data": site.data,
        "config": site.config,
    });

    let mut context = Context::new();
    context.insert("page", &page_value);
    context.insert("site", &site_value);
    Ok(context)
}

/// Render one page with its layout.
pub fn render_page(tera: &Tera, site: &Site, page: &GeneratedPage) -> Result<String, RenderError> {
    if !site.has_layout(&page.layout) {
        return Err(RenderError::MissingLayout {
            layout: page.layout.clone(),
            url: page.url(),
        });
    }
    let context = page_context(site, page)?;
    Ok(tera.render(&page.layout, &context)?)
}

/// Render every generated page of `site` into `destination`.
pub fn render_generated(site: &Site, destination: &Path) -> Result<Vec<RenderedPage>, RenderError> {
    let tera = build_engine(site)?;
    let mut rendered = Vec::new();

    for page in site.generated_pages() {
        let html = render_page(&tera, site, page)?;
        let path: PathBuf = destination.join(&page.dir).join(&page.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        rendered.push(RenderedPage {
            url: page.url(),
            output_path: page.output_path(),
        });
    }

    Ok(rendered)
}
