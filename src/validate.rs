//! Data collection checks.
//!
//! Catches typos and dangling references in `people`, `sessions` and
//! `program` before pages are generated from them. All issues are collected;
//! nothing stops at the first problem.
//!
//! ## Rules
//!
//! - **people**: mapping of person records. `name` is required; `area`,
//!   `name`, `home`, `role`, `size`, `email` are strings; `arrival` and
//!   `departure` are strings or integers; `shuttle` is a boolean.
//! - **sessions**: mapping of session records. `chair`, `title`, `room` are
//!   strings; `abstract`, `plenary` are booleans; `talks` is a sequence of
//!   talk records with string `speaker` / `title`, boolean `abstract`, and
//!   `slides` / `panel` given as a string or a sequence of strings.
//! - **program**: sequence of day records with a string `title` and a
//!   `slots` mapping of time → activity string.
//! - **references**: chairs, speakers and panel members must exist in
//!   `people`; a slot activity `session a b` must name existing sessions.
//!
//! Blank fields (null, `false`, `0`, `""`, empty sequences and mappings)
//! are treated as absent and never type-checked. A missing collection is
//! skipped.

use serde_json::{Map, Value};
use std::fmt;

/// One problem found in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// What the issue is about, e.g. `Session 's1' talk 2`.
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Expect {
    String,
    Bool,
    StringOrInteger,
    Sequence,
    Mapping,
    StringOrStringSequence,
}

impl Expect {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Expect::String => value.is_string(),
            Expect::Bool => value.is_boolean(),
            Expect::StringOrInteger => value.is_string() || value.is_i64() || value.is_u64(),
            Expect::Sequence => value.is_array(),
            Expect::Mapping => value.is_object(),
            Expect::StringOrStringSequence => {
                value.is_string()
                    || value
                        .as_array()
                        .is_some_and(|items| items.iter().all(Value::is_string))
            }
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expect::String => "a string",
            Expect::Bool => "a boolean",
            Expect::StringOrInteger => "a string or integer",
            Expect::Sequence => "a sequence",
            Expect::Mapping => "a mapping",
            Expect::StringOrStringSequence => "a string or a sequence of strings",
        }
    }
}

#[derive(Default)]
struct Checker {
    issues: Vec<Issue>,
}

impl Checker {
    fn issue(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            subject: subject.into(),
            message: message.into(),
        });
    }

    /// Check the type of each present, non-blank field.
    fn fields(&mut self, subject: &str, record: &Map<String, Value>, expect: Expect, keys: &[&str]) {
        for key in keys {
            match record.get(*key) {
                None => {}
                Some(value) if is_blank(value) || expect.accepts(value) => {}
                Some(value) => self.issue(
                    subject,
                    format!("{key} {value} must be {}", expect.describe()),
                ),
            }
        }
    }

    /// Return the record as a mapping, or report it.
    fn mapping<'a>(&mut self, subject: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        let map = value.as_object();
        if map.is_none() {
            self.issue(subject, "must be a mapping");
        }
        map
    }
}

/// Run every check over the loaded data collections.
pub fn validate(data: &Map<String, Value>) -> Vec<Issue> {
    let mut checker = Checker::default();
    let people = present(data, "people");
    let sessions = present(data, "sessions");
    let program = present(data, "program");

    if let Some(people) = people {
        validate_people(&mut checker, people);
    }
    if let Some(sessions) = sessions {
        validate_sessions(&mut checker, sessions);
    }
    if let Some(program) = program {
        validate_program(&mut checker, program);
    }

    let person_ids = people.and_then(Value::as_object);
    let session_map = sessions.and_then(Value::as_object);
    if let (Some(sessions), Some(people)) = (session_map, person_ids) {
        check_session_people(&mut checker, sessions, people);
    }
    if let (Some(Value::Array(days)), Some(sessions)) = (program, session_map) {
        check_program_sessions(&mut checker, days, sessions);
    }

    checker.issues
}

fn present<'a>(data: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    data.get(name).filter(|v| !v.is_null())
}

// ============================================================================
// Per-collection checks
// ============================================================================

fn validate_people(checker: &mut Checker, people: &Value) {
    let Some(people) = checker.mapping("People", people) else {
        return;
    };
    for (id, person) in people {
        let subject = format!("Person '{id}'");
        let Some(person) = checker.mapping(&subject, person) else {
            continue;
        };
        checker.fields(
            &subject,
            person,
            Expect::String,
            &["area", "name", "home", "role", "size", "email"],
        );
        checker.fields(&subject, person, Expect::StringOrInteger, &["arrival", "departure"]);
        checker.fields(&subject, person, Expect::Bool, &["shuttle"]);

        if person.get("name").is_none_or(is_blank) {
            checker.issue(&subject, "has no name");
        }
    }
}

fn validate_sessions(checker: &mut Checker, sessions: &Value) {
    let Some(sessions) = checker.mapping("Sessions", sessions) else {
        return;
    };
    for (id, session) in sessions {
        let subject = format!("Session '{id}'");
        let Some(session) = checker.mapping(&subject, session) else {
            continue;
        };
        checker.fields(&subject, session, Expect::String, &["chair", "title", "room"]);
        checker.fields(&subject, session, Expect::Bool, &["abstract", "plenary"]);
        checker.fields(&subject, session, Expect::Sequence, &["talks"]);

        for (index, talk) in talks(session).iter().enumerate() {
            let talk_subject = format!("{subject} talk {}", index + 1);
            let Some(talk) = checker.mapping(&talk_subject, talk) else {
                continue;
            };
            checker.fields(&talk_subject, talk, Expect::String, &["speaker", "title"]);
            checker.fields(&talk_subject, talk, Expect::Bool, &["abstract"]);
            checker.fields(
                &talk_subject,
                talk,
                Expect::StringOrStringSequence,
                &["slides", "panel"],
            );
        }
    }
}

fn validate_program(checker: &mut Checker, program: &Value) {
    let Some(days) = program.as_array() else {
        checker.issue("Program", "must be a sequence of days");
        return;
    };
    for (index, day) in days.iter().enumerate() {
        let subject = format!("Program day {}", index + 1);
        let Some(day) = checker.mapping(&subject, day) else {
            continue;
        };
        checker.fields(&subject, day, Expect::String, &["title"]);
        checker.fields(&subject, day, Expect::Mapping, &["slots"]);
        if let Some(Value::Object(slots)) = day.get("slots") {
            let keys: Vec<&str> = slots.keys().map(String::as_str).collect();
            checker.fields(&format!("{subject} slots"), slots, Expect::String, &keys);
        }
    }
}

// ============================================================================
// Cross-collection references
// ============================================================================

fn check_session_people(
    checker: &mut Checker,
    sessions: &Map<String, Value>,
    people: &Map<String, Value>,
) {
    for (id, session) in sessions {
        let Some(session) = session.as_object() else {
            continue;
        };
        if let Some(chair) = session.get("chair").and_then(Value::as_str) {
            if !people.contains_key(chair) {
                checker.issue(
                    format!("Session '{id}'"),
                    format!("chair '{chair}' is not in people"),
                );
            }
        }
        for (index, talk) in talks(session).iter().enumerate() {
            let subject = format!("Session '{id}' talk {}", index + 1);
            if let Some(speaker) = talk.get("speaker").and_then(Value::as_str) {
                if !people.contains_key(speaker) {
                    checker.issue(&subject, format!("speaker '{speaker}' is not in people"));
                }
            }
            let panel = talk
                .get("panel")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for (member_index, member) in panel.iter().enumerate() {
                if let Some(member) = member.as_str() {
                    if !people.contains_key(member) {
                        checker.issue(
                            &subject,
                            format!(
                                "panel member {} '{member}' is not in people",
                                member_index + 1
                            ),
                        );
                    }
                }
            }
        }
    }
}

fn check_program_sessions(checker: &mut Checker, days: &[Value], sessions: &Map<String, Value>) {
    for (index, day) in days.iter().enumerate() {
        let Some(slots) = day.get("slots").and_then(Value::as_object) else {
            continue;
        };
        for (slot, activity) in slots {
            let Some(activity) = activity.as_str() else {
                continue;
            };
            if !activity.to_lowercase().starts_with("session") {
                continue;
            }
            for id in activity.split_whitespace().skip(1) {
                if !sessions.contains_key(id) {
                    checker.issue(
                        format!("Program day {}", index + 1),
                        format!("slot '{slot}' session '{id}' is not in sessions"),
                    );
                }
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn talks(session: &Map<String, Value>) -> &[Value] {
    session
        .get("talks")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn messages(issues: &[Issue]) -> Vec<String> {
        issues.iter().map(Issue::to_string).collect()
    }

    #[test]
    fn fixture_data_is_valid() {
        let tmp = setup_fixtures();
        let site = load_fixture_site(tmp.path());
        assert_eq!(messages(&validate(&site.data)), Vec::<String>::new());
    }

    #[test]
    fn empty_data_is_valid() {
        assert!(validate(&Map::new()).is_empty());
    }

    #[test]
    fn person_without_name() {
        let issues = validate(&data(json!({"people": {"alice": {"role": "chair"}, "bob": {"name": ""}}})));
        assert_eq!(
            messages(&issues),
            vec!["Person 'alice': has no name", "Person 'bob': has no name"]
        );
    }

    #[test]
    fn person_field_types() {
        let issues = validate(&data(json!({"people": {"alice": {
            "name": "Alice",
            "email": 3,
            "arrival": 12,
            "departure": true,
            "shuttle": "yes"
        }}})));
        assert_eq!(
            messages(&issues),
            vec![
                "Person 'alice': email 3 must be a string",
                "Person 'alice': departure true must be a string or integer",
                "Person 'alice': shuttle \"yes\" must be a boolean",
            ]
        );
    }

    #[test]
    fn null_fields_are_absent() {
        let issues = validate(&data(json!({"people": {"alice": {"name": "Alice", "email": null}}})));
        assert!(issues.is_empty());
    }

    #[test]
    fn blank_fields_skip_type_checks() {
        let issues = validate(&data(json!({
            "people": {"alice": {"name": "Alice", "email": 0, "shuttle": "", "arrival": false}},
            "sessions": {"s1": {"title": [], "plenary": 0, "talks": {}}}
        })));
        assert!(issues.is_empty(), "{:?}", messages(&issues));
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let issues = validate(&data(json!({"people": {"alice": {"name": 0}}})));
        assert_eq!(messages(&issues), vec!["Person 'alice': has no name"]);
    }

    #[test]
    fn people_must_be_mapping() {
        let issues = validate(&data(json!({"people": ["alice"]})));
        assert_eq!(messages(&issues), vec!["People: must be a mapping"]);
    }

    #[test]
    fn talk_field_types() {
        let issues = validate(&data(json!({"sessions": {"s1": {"talks": [
            {"speaker": "bob", "slides": ["a.pdf", 2]},
            "not a talk",
            {"title": 5, "abstract": true, "panel": "x"}
        ]}}})));
        assert_eq!(
            messages(&issues),
            vec![
                "Session 's1' talk 1: slides [\"a.pdf\",2] must be a string or a sequence of strings",
                "Session 's1' talk 2: must be a mapping",
                "Session 's1' talk 3: title 5 must be a string",
            ]
        );
    }

    #[test]
    fn session_talks_must_be_sequence() {
        let issues = validate(&data(json!({"sessions": {"s1": {"talks": {"a": 1}}}})));
        assert_eq!(messages(&issues), vec!["Session 's1': talks {\"a\":1} must be a sequence"]);
    }

    #[test]
    fn unknown_speaker_chair_and_panel() {
        let issues = validate(&data(json!({
            "people": {"alice": {"name": "Alice"}},
            "sessions": {"s1": {"chair": "zed", "talks": [
                {"speaker": "alice", "panel": ["alice", "yan"]},
                {"speaker": "xu"}
            ]}}
        })));
        assert_eq!(
            messages(&issues),
            vec![
                "Session 's1': chair 'zed' is not in people",
                "Session 's1' talk 1: panel member 2 'yan' is not in people",
                "Session 's1' talk 2: speaker 'xu' is not in people",
            ]
        );
    }

    #[test]
    fn program_shape_and_slots() {
        let issues = validate(&data(json!({"program": [
            {"title": "Monday", "slots": {"09:00": "Coffee", "10:00": 4}},
            "Tuesday",
            {"slots": ["a"]}
        ]})));
        assert_eq!(
            messages(&issues),
            vec![
                "Program day 1 slots: 10:00 4 must be a string",
                "Program day 2: must be a mapping",
                "Program day 3: slots [\"a\"] must be a mapping",
            ]
        );
    }

    #[test]
    fn program_must_be_sequence() {
        let issues = validate(&data(json!({"program": {"day1": {}}})));
        assert_eq!(messages(&issues), vec!["Program: must be a sequence of days"]);
    }

    #[test]
    fn program_slot_references_sessions() {
        let issues = validate(&data(json!({
            "sessions": {"s1": {}, "s2": {}},
            "program": [{"slots": {
                "09:00": "Session s1 s3",
                "11:00": "Lunch",
                "13:00": "sessions s2"
            }}]
        })));
        assert_eq!(
            messages(&issues),
            vec!["Program day 1: slot '09:00' session 's3' is not in sessions"]
        );
    }
}
