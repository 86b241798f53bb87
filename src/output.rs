//! CLI output formatting for all commands.
//!
//! Output is **entity-first**: every generated page leads with its kind and
//! identifier, with the output path and title as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 /people/alice/
//!     Source: people/alice/index.wiki
//!
//! Data
//!     people (3 entries)
//!     program (2 items)
//!
//! Layouts
//!     person
//!     session
//! ```
//!
//! ## Generate
//!
//! ```text
//! person
//! 001 bob → people/bob/index.wiki
//!     Title: Bob Brown
//! session (no session layout)
//! talk (no session layout)
//! day program
//!
//! Generated 1 page (person 1, session 0, talk 0, day program 0)
//! ```
//!
//! ## Check
//!
//! ```text
//! Session 's1' talk 2: speaker 'xu' is not in people
//! 1 issue found
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::render::RenderedPage;
use crate::site::Site;
use crate::types::{Page, PageKind};
use crate::validate::Issue;
use serde_json::Value;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Short size description of a data collection.
fn collection_summary(value: &Value) -> String {
    match value {
        Value::Object(map) => count(map.len(), "entry", "entries"),
        Value::Array(items) => count(items.len(), "item", "items"),
        Value::Null => "empty".to_string(),
        _ => "scalar".to_string(),
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format the discovered site: declared pages, data collections, layouts.
pub fn format_scan_output(site: &Site) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, page) in site.pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.url()));
        if let Page::Source(source) = page {
            lines.push(format!("{}Source: {}", indent(1), source.path));
        }
    }

    lines.push(String::new());
    lines.push("Data".to_string());
    for (name, value) in &site.data {
        lines.push(format!("{}{} ({})", indent(1), name, collection_summary(value)));
    }

    lines.push(String::new());
    lines.push("Layouts".to_string());
    for (name, layout) in &site.layouts {
        let file = layout
            .path
            .file_name()
            .map(|f| f.to_string_lossy())
            .unwrap_or_default();
        lines.push(format!("{}{} ({})", indent(1), name, file));
    }

    lines
}

pub fn print_scan_output(site: &Site) {
    for line in format_scan_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format the pages generated in this run, grouped by kind.
///
/// Kinds whose guard layout is missing are flagged so an empty group is not
/// mistaken for "everything already exists".
pub fn format_generate_output(site: &Site, report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for kind in PageKind::ALL {
        if !site.has_layout(kind.guard_layout()) {
            lines.push(format!("{} (no {} layout)", kind, kind.guard_layout()));
            continue;
        }
        lines.push(kind.to_string());
        let pages = site.generated_pages().filter(|p| p.kind == kind);
        for (i, page) in pages.enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                page.id,
                page.output_path()
            ));
            if let Some(title) = &page.title {
                lines.push(format!("{}Title: {}", indent(1), title));
            }
        }
    }

    let breakdown = report
        .counts
        .iter()
        .map(|(kind, n)| format!("{kind} {n}"))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(String::new());
    lines.push(format!(
        "Generated {} ({})",
        count(report.total(), "page", "pages"),
        breakdown
    ));

    lines
}

pub fn print_generate_output(site: &Site, report: &GenerateReport) {
    for line in format_generate_output(site, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(rendered: &[RenderedPage]) -> Vec<String> {
    let mut lines: Vec<String> = rendered
        .iter()
        .map(|page| format!("{} → {}", page.url, page.output_path))
        .collect();
    lines.push(format!("Rendered {}", count(rendered.len(), "page", "pages")));
    lines
}

pub fn print_build_output(rendered: &[RenderedPage]) {
    for line in format_build_output(rendered) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(issues: &[Issue]) -> Vec<String> {
    let mut lines: Vec<String> = issues.iter().map(Issue::to_string).collect();
    if issues.is_empty() {
        lines.push("Data is valid".to_string());
    } else {
        lines.push(format!("{} found", count(issues.len(), "issue", "issues")));
    }
    lines
}

pub fn print_check_output(issues: &[Issue]) {
    for line in format_check_output(issues) {
        println!("{}", line);
    }
}
