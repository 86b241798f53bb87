//! End-to-end tests of the load → generate → render pipeline.
//!
//! Sites are written into a temp directory from inline strings so each test
//! states exactly the data it depends on.

use conference_pages::generate::{GenerateError, generate_all};
use conference_pages::render::render_generated;
use conference_pages::types::PageKind;
use conference_pages::{config, site, validate};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn load(root: &Path) -> site::Site {
    let site_config = config::load_config(root).unwrap();
    site::load(root, site_config).unwrap()
}

fn conference_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "_data/people.yml",
        "alice:\n  name: Alice\nbob:\n  name: Bob\n",
    );
    write(
        root,
        "_data/sessions.yml",
        "s1:\n  title: Storage\n  chair: alice\n  talks:\n    - speaker: bob\n      title: Tape is back\n",
    );
    write(
        root,
        "_data/program.yml",
        "- title: Monday\n  slots:\n    \"09:00\": session s1\n",
    );
    write(root, "_layouts/person.wiki", "= {{ page.title }} =\n");
    write(root, "_layouts/session.wiki", "= {{ page.title }} =\n");
    write(root, "_layouts/talk.wiki", "= {{ page.title }} =\n");
    write(
        root,
        "_layouts/day_program.html",
        "<h1>{{ page.title }}</h1>{% for t, a in page.day.slots %}{{ t }} {{ a }}{% endfor %}",
    );
    write(root, "people/alice/index.wiki", "= Alice, by hand =\n");
    tmp
}

fn generated_ids(site: &site::Site, kind: PageKind) -> Vec<String> {
    site.generated_pages()
        .filter(|p| p.kind == kind)
        .map(|p| p.id.clone())
        .collect()
}

#[test]
fn hand_written_person_page_is_kept() {
    let tmp = conference_site();
    let mut site = load(tmp.path());
    generate_all(&mut site).unwrap();

    assert_eq!(generated_ids(&site, PageKind::Person), vec!["bob"]);
    assert_eq!(generated_ids(&site, PageKind::Session), vec!["s1"]);
    assert_eq!(generated_ids(&site, PageKind::Talk), vec!["s1/bob"]);
    assert_eq!(generated_ids(&site, PageKind::DayProgram), vec!["day1"]);
}

#[test]
fn build_writes_rendered_pages() {
    let tmp = conference_site();
    let mut site = load(tmp.path());
    generate_all(&mut site).unwrap();
    let destination = tmp.path().join("_site");

    let rendered = render_generated(&site, &destination).unwrap();

    assert_eq!(rendered.len(), 4);
    let talk = fs::read_to_string(destination.join("sessions/s1/bob/index.wiki")).unwrap();
    assert_eq!(talk.trim_end(), "= Tape is back =");
    assert_eq!(
        fs::read_to_string(destination.join("program/day1/index.html")).unwrap(),
        "<h1>Monday</h1>09:00 session s1"
    );
}

#[test]
fn committed_output_makes_next_run_a_no_op() {
    let tmp = conference_site();
    let mut site = load(tmp.path());
    generate_all(&mut site).unwrap();

    // Check the rendered pages into the source tree, as a site author would
    for page in site.generated_pages() {
        write(tmp.path(), &page.output_path(), "checked in\n");
    }

    let mut site = load(tmp.path());
    let report = generate_all(&mut site).unwrap();
    assert_eq!(report.total(), 0);
}

#[test]
fn custom_dirs_and_prefix() {
    let tmp = conference_site();
    write(
        tmp.path(),
        "config.toml",
        "people_dir = \"speakers\"\nday_program_dir = \"days\"\nday_program_prefix = \"d\"\n",
    );
    let mut site = load(tmp.path());
    generate_all(&mut site).unwrap();

    // people/alice no longer covers alice: the base directory moved
    assert_eq!(generated_ids(&site, PageKind::Person), vec!["alice", "bob"]);
    let urls: Vec<String> = site.generated_pages().map(|p| p.url()).collect();
    assert!(urls.contains(&"/speakers/bob/".to_string()));
    assert!(urls.contains(&"/days/d1/".to_string()));
}

#[test]
fn removing_layout_disables_kind() {
    let tmp = conference_site();
    fs::remove_file(tmp.path().join("_layouts/session.wiki")).unwrap();
    let mut site = load(tmp.path());
    let report = generate_all(&mut site).unwrap();

    assert_eq!(report.count(PageKind::Session), 0);
    assert_eq!(report.count(PageKind::Talk), 0);
    assert_eq!(report.count(PageKind::Person), 1);
}

#[test]
fn duplicate_speaker_in_session_fails() {
    let tmp = conference_site();
    write(
        tmp.path(),
        "_data/sessions.yml",
        "s1:\n  talks:\n    - speaker: bob\n    - speaker: bob\n",
    );
    let mut site = load(tmp.path());
    let err = generate_all(&mut site).unwrap_err();
    assert!(matches!(err, GenerateError::DuplicateId { .. }));
    assert_eq!(err.to_string(), "Duplicate talk identifier 's1/bob'");
}

#[test]
fn validation_reports_dangling_speaker() {
    let tmp = conference_site();
    write(
        tmp.path(),
        "_data/sessions.yml",
        "s1:\n  title: Storage\n  talks:\n    - speaker: zed\n",
    );
    let site = load(tmp.path());
    let issues = validate::validate(&site.data);
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].to_string(),
        "Session 's1' talk 1: speaker 'zed' is not in people"
    );
}

#[test]
fn talk_that_would_overwrite_session_page_fails() {
    let tmp = conference_site();
    write(
        tmp.path(),
        "_data/sessions.yml",
        "s1:\n  title: S\n  talks:\n    - speaker: \"\"\n",
    );
    let mut site = load(tmp.path());
    let err = generate_all(&mut site).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidId { kind: PageKind::Talk, .. }));
    assert!(err.to_string().starts_with("Invalid talk identifier 's1/'"));
}
