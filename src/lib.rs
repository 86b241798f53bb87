//! # Conference Pages
//!
//! Generates the detail pages of a data-driven conference site. Person,
//! session, talk and day pages are synthesized from the `people`, `sessions`
//! and `program` data collections, but only where no hand-written page
//! already exists. Two template filters, `select` and `having`, make the same
//! collections easy to query from layouts.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      site/            →  Site          (pages, data, layouts, config)
//! 2. Generate  Site             →  Site.pages++  (missing entity pages)
//! 3. Render    generated pages  →  _site/        (layouts via Tera)
//! ```
//!
//! Generation is pure with respect to the filesystem: it reads the loaded
//! [`site::Site`] and appends page descriptors. Only rendering writes files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading over stock defaults, validation |
//! | [`site`] | Loads declared pages, data collections, and layouts from the source tree |
//! | [`generate`] | Per-kind page synthesis and the [`generate::generate_all`] driver |
//! | [`filters`] | `select` / `having` collection queries and their Tera registration |
//! | [`render`] | Renders generated pages through their layouts |
//! | [`validate`] | Type and cross-reference checks over the data collections |
//! | [`types`] | Shared page types (`Page`, `GeneratedPage`, `PageKind`) |
//! | [`urls`] | Page URL rule and the existing-page pattern scan |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Hand-Written Pages Win
//!
//! A page is generated for an entity only if no declared page sits directly
//! inside the entity's directory. Writing `people/alice/index.wiki` by hand
//! is how a site overrides the generated version; nothing else needs to be
//! configured. The check is on URLs, so generated output fed back into a
//! second run is recognised too, and repeated runs are idempotent.
//!
//! ## Identifiers Must Be Unique
//!
//! Talk identifiers are derived from a talk's `id` or its speaker, so two
//! talks by the same speaker in one session collide. Rather than let one
//! silently shadow the other, generation stops with
//! [`generate::GenerateError::DuplicateId`].
//!
//! ## Schema-Less Records
//!
//! Records are `serde_json::Value`s with insertion-ordered maps. Only a
//! handful of fields (`name`, `title`, `id`, `speaker`, `talks`) drive
//! generation; everything else passes through to layouts untouched.

pub mod config;
pub mod filters;
pub mod generate;
pub mod output;
pub mod render;
pub mod site;
pub mod types;
pub mod urls;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
