//! On-disk transcript persistence.
//!
//! The history file is a single JSON array.  Current files hold
//! `{"role", "content"}` records; older files hold `{"user", "model"}` pairs,
//! which are split into two entries on load.  Loading never fails: a missing,
//! unreadable, or malformed file is an empty transcript, and records of an
//! unknown shape are dropped.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, to_writer_pretty};

use crate::error::{Error, Result};
use crate::observability::{
    HISTORY_DROPPED_RECORDS, HISTORY_LOAD_FALLBACKS, HISTORY_LOADS, HISTORY_SAVES,
};
use crate::types::{Role, TranscriptEntry};

/// Default location of the history file, relative to the working directory.
pub const DEFAULT_HISTORY_PATH: &str = "chat_memory.json";

/// Reads and writes the transcript at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Creates a store for the file at `path`.  Nothing is read until [`Self::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The history file's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and normalizes the transcript.
    pub fn load(&self) -> Vec<TranscriptEntry> {
        HISTORY_LOADS.click();
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(_) => {
                HISTORY_LOAD_FALLBACKS.click();
                return Vec::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => normalize_records(value),
            Err(_) => {
                HISTORY_LOAD_FALLBACKS.click();
                Vec::new()
            }
        }
    }

    /// Overwrites the file with exactly `entries`.
    ///
    /// Callers pass the complete transcript every time; nothing is appended.
    pub fn save(&self, entries: &[TranscriptEntry]) -> Result<()> {
        let file = File::create(&self.path)
            .map_err(|err| Error::io("failed to create history file", err))?;
        let mut writer = BufWriter::new(file);
        to_writer_pretty(&mut writer, entries).map_err(|err| {
            Error::serialization("failed to serialize history", Some(Box::new(err)))
        })?;
        writer
            .flush()
            .map_err(|err| Error::io("failed to write history file", err))?;
        HISTORY_SAVES.click();
        Ok(())
    }

    /// Persists an empty transcript.
    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }
}

/// Normalizes a parsed history document into transcript entries.
///
/// Anything other than a top-level array yields an empty transcript.
pub fn normalize_records(value: Value) -> Vec<TranscriptEntry> {
    let Value::Array(records) = value else {
        HISTORY_LOAD_FALLBACKS.click();
        return Vec::new();
    };
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let before = entries.len();
        if let Value::Object(record) = &record {
            normalize_record(record, &mut entries);
        }
        if entries.len() == before {
            HISTORY_DROPPED_RECORDS.click();
        }
    }
    entries
}

fn normalize_record(record: &Map<String, Value>, entries: &mut Vec<TranscriptEntry>) {
    if let (Some(role), Some(content)) = (record.get("role"), record.get("content")) {
        if let Some(role) = role.as_str().and_then(|r| r.parse::<Role>().ok()) {
            entries.push(TranscriptEntry::new(role, coerce_text(content)));
        }
        return;
    }
    if let Some(user) = record.get("user") {
        entries.push(TranscriptEntry::user(coerce_text(user)));
    }
    if let Some(model) = record.get("model") {
        entries.push(TranscriptEntry::assistant(coerce_text(model)));
    }
}

/// Strings pass through, `null` is empty, everything else is compact JSON.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_records_pass_through() {
        let entries = normalize_records(json!([
            {"role": "user", "content": "hello"},
            {"role": "assistant", "content": "hi there"}
        ]));
        assert_eq!(
            entries,
            vec![
                TranscriptEntry::user("hello"),
                TranscriptEntry::assistant("hi there")
            ]
        );
    }

    #[test]
    fn legacy_record_splits_in_order() {
        let entries = normalize_records(json!([{"user": "u", "model": "m"}]));
        assert_eq!(
            entries,
            vec![TranscriptEntry::user("u"), TranscriptEntry::assistant("m")]
        );
    }

    #[test]
    fn legacy_record_with_one_side() {
        let entries = normalize_records(json!([{"user": "only"}, {"model": "reply"}]));
        assert_eq!(
            entries,
            vec![
                TranscriptEntry::user("only"),
                TranscriptEntry::assistant("reply")
            ]
        );
    }

    #[test]
    fn legacy_values_are_coerced() {
        let entries = normalize_records(json!([{"user": 42, "model": null}]));
        assert_eq!(
            entries,
            vec![TranscriptEntry::user("42"), TranscriptEntry::assistant("")]
        );
        let entries = normalize_records(json!([{"role": "user", "content": ["a", 1]}]));
        assert_eq!(entries, vec![TranscriptEntry::user(r#"["a",1]"#)]);
    }

    #[test]
    fn unknown_shapes_are_dropped() {
        let entries = normalize_records(json!([
            "text",
            7,
            null,
            {"speaker": "x"},
            {"role": "system", "content": "nope"},
            {"role": "user", "content": "kept"}
        ]));
        assert_eq!(entries, vec![TranscriptEntry::user("kept")]);
    }

    #[test]
    fn canonical_shape_wins_over_legacy_fields() {
        let entries = normalize_records(json!([
            {"role": "assistant", "content": "c", "user": "u", "model": "m"}
        ]));
        assert_eq!(entries, vec![TranscriptEntry::assistant("c")]);
    }

    #[test]
    fn non_array_documents_are_empty() {
        assert!(normalize_records(json!({"role": "user", "content": "x"})).is_empty());
        assert!(normalize_records(json!("hello")).is_empty());
        assert!(normalize_records(json!(null)).is_empty());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_memory.json");
        for body in ["", "{not json", "[1, 2", "{\"a\": 1}", "\"str\""] {
            fs::write(&path, body).unwrap();
            assert!(HistoryStore::new(&path).load().is_empty(), "body: {body:?}");
        }
    }

    #[test]
    fn directory_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(HistoryStore::new(dir.path()).load().is_empty());
    }

    #[test]
    fn save_is_pretty_and_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("chat_memory.json"));
        store
            .save(&[TranscriptEntry::user("héllo 日本")])
            .unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            raw,
            "[\n  {\n    \"role\": \"user\",\n    \"content\": \"héllo 日本\"\n  }\n]"
        );
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("chat_memory.json"));
        store
            .save(&[TranscriptEntry::user("a"), TranscriptEntry::assistant("b")])
            .unwrap();
        store.save(&[TranscriptEntry::user("c")]).unwrap();
        assert_eq!(store.load(), vec![TranscriptEntry::user("c")]);
    }

    #[test]
    fn clear_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("chat_memory.json"));
        store.save(&[TranscriptEntry::user("a")]).unwrap();
        store.clear().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.load().is_empty());
    }

    #[test]
    fn round_trip_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("chat_memory.json"));
        let entries = vec![
            TranscriptEntry::user("first"),
            TranscriptEntry::assistant("second\nline"),
            TranscriptEntry::user("ünïcödé"),
        ];
        store.save(&entries).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();
        store.save(&store.load()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.load(), entries);
    }

    #[test]
    fn legacy_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_memory.json");
        fs::write(
            &path,
            r#"[
    {"user": "hello", "model": "hi there"},
    {"user": "bye", "model": "see you"}
]"#,
        )
        .unwrap();
        assert_eq!(
            HistoryStore::new(&path).load(),
            vec![
                TranscriptEntry::user("hello"),
                TranscriptEntry::assistant("hi there"),
                TranscriptEntry::user("bye"),
                TranscriptEntry::assistant("see you"),
            ]
        );
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("no/such/dir/chat.json"));
        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
