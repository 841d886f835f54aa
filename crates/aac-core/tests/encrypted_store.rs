use std::fs;
use std::path::Path;

use aac_core::crypto::{decode, derive_key, encode, IV_LENGTH};
use aac_core::storage::{DocumentStore, EncryptedFileStore};
use aac_core::AacError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::tempdir;

const SECRET: &str = "test-secret-secure-123";

fn open(dir: &Path) -> EncryptedFileStore {
    EncryptedFileStore::with_secret(dir, SECRET)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Household {
    members: Vec<String>,
    notes: Option<String>,
    visits_per_week: u32,
}

#[test]
fn test_round_trip_assorted_values() {
    let values = vec![
        json!(null),
        json!([]),
        json!({}),
        json!(["alice", "bob"]),
        json!({"1": "I like music", "2": "Speak slowly"}),
        json!({"unicode": "Grüße, 你好, 🙂", "nested": {"list": [1, 2.5, false]}}),
        json!("x".repeat(10_000)),
    ];

    for secret in ["k", "a much longer household secret with spaces", "🙂"] {
        let key = derive_key(secret);
        for value in &values {
            let plain = serde_json::to_vec(value).unwrap();
            let opened = decode(&encode(&plain, &key), &key).unwrap();
            let back: serde_json::Value = serde_json::from_slice(&opened).unwrap();
            assert_eq!(&back, value);
        }
    }
}

#[test]
fn test_typed_document_round_trip() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let household = Household {
        members: vec!["Sam".into(), "Ali".into()],
        notes: Some("Prefers mornings".into()),
        visits_per_week: 3,
    };

    store.write("household.json", &household).unwrap();

    let back: Option<Household> = store.read("household.json").unwrap();
    assert_eq!(back, Some(household));
}

#[test]
fn test_identical_writes_differ_on_disk() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let path = dir.path().join("people.json");

    store.write("people.json", &json!(["alice", "bob"])).unwrap();
    let first = fs::read(&path).unwrap();
    store.write("people.json", &json!(["alice", "bob"])).unwrap();
    let second = fs::read(&path).unwrap();

    assert_ne!(first, second);
    assert_ne!(hex::encode(&first[..IV_LENGTH]), hex::encode(&second[..IV_LENGTH]));
}

#[test]
fn test_wrong_secret_is_corrupt_not_empty() {
    let dir = tempdir().unwrap();
    EncryptedFileStore::with_secret(dir.path(), "correct-secret-123")
        .write("people.json", &json!(["alice", "bob"]))
        .unwrap();

    let other = EncryptedFileStore::with_secret(dir.path(), "wrong-secret-456");
    let err = other.read::<Vec<String>>("people.json").unwrap_err();
    assert!(err.is_corrupt(), "unexpected error: {err}");
}

#[test]
fn test_missing_is_none_but_truncated_is_corrupt() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    assert!(store.read::<Vec<String>>("people.json").unwrap().is_none());

    store.write("people.json", &json!(["alice", "bob"])).unwrap();
    let path = dir.path().join("people.json");
    let sealed = fs::read(&path).unwrap();

    fs::write(&path, &sealed[..sealed.len() - 1]).unwrap();
    assert!(store.read::<Vec<String>>("people.json").unwrap_err().is_corrupt());

    fs::write(&path, &sealed[..IV_LENGTH - 4]).unwrap();
    assert!(store.read::<Vec<String>>("people.json").unwrap_err().is_corrupt());

    fs::write(&path, b"").unwrap();
    assert!(store.read::<Vec<String>>("people.json").unwrap_err().is_corrupt());
}

#[test]
fn test_mutated_bytes_are_corrupt() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.write("people.json", &json!(["alice", "bob"])).unwrap();
    let path = dir.path().join("people.json");
    let sealed = fs::read(&path).unwrap();

    // Flipping the first IV byte turns '[' into an invalid UTF-8 lead byte
    let mut iv_flipped = sealed.clone();
    iv_flipped[0] ^= 0xFF;
    fs::write(&path, &iv_flipped).unwrap();
    assert!(store.read::<Vec<String>>("people.json").unwrap_err().is_corrupt());

    // Damaging the only ciphertext block garbles both body and padding
    let mut body_flipped = sealed;
    body_flipped[IV_LENGTH + 3] ^= 0x5A;
    fs::write(&path, &body_flipped).unwrap();
    assert!(store.read::<Vec<String>>("people.json").unwrap_err().is_corrupt());
}

#[test]
fn test_update_observes_previous_write() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    let v1 = store
        .update("log.json", |old: Option<Vec<String>>| {
            assert_eq!(old, None);
            vec!["first".to_string()]
        })
        .unwrap();

    let seen = std::cell::RefCell::new(None);
    store
        .update("log.json", |old: Option<Vec<String>>| {
            *seen.borrow_mut() = old.clone();
            let mut next = old.unwrap_or_default();
            next.push("second".to_string());
            next
        })
        .unwrap();

    assert_eq!(seen.into_inner(), Some(v1));
    let stored: Option<Vec<String>> = store.read("log.json").unwrap();
    assert_eq!(stored, Some(vec!["first".to_string(), "second".to_string()]));
}

#[test]
fn test_whole_replace_drops_old_content() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    store
        .write("profile.json", &json!({"name": "Sam", "notes": "long notes", "tags": [1, 2, 3]}))
        .unwrap();
    store.write("profile.json", &json!({"name": "Sam"})).unwrap();

    let back: Option<serde_json::Value> = store.read("profile.json").unwrap();
    assert_eq!(back, Some(json!({"name": "Sam"})));
}

#[test]
fn test_empty_array_is_not_none() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    store.write("people.json", &json!(["alice", "bob"])).unwrap();
    store.write("people.json", &json!([])).unwrap();

    let back: Option<Vec<String>> = store.read("people.json").unwrap();
    assert_eq!(back, Some(Vec::new()));
}

#[test]
fn test_concurrent_updates_lose_nothing() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let store = &store;
            scope.spawn(move || {
                for i in 0..25 {
                    store
                        .update("events.json", |old: Option<Vec<String>>| {
                            let mut events = old.unwrap_or_default();
                            events.push(format!("{worker}-{i}"));
                            events
                        })
                        .unwrap();
                }
            });
        }
    });

    let events: Vec<String> = store.read("events.json").unwrap().unwrap();
    assert_eq!(events.len(), 200);
    assert_eq!(store.list_documents().unwrap(), vec!["events.json".to_string()]);
}

#[test]
fn test_documents_are_independent() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    store.write("people.json", &json!(["alice"])).unwrap();
    store.write("places.json", &json!(["home"])).unwrap();
    fs::write(dir.path().join("places.json"), b"garbage").unwrap();

    let people: Option<Vec<String>> = store.read("people.json").unwrap();
    assert_eq!(people, Some(vec!["alice".to_string()]));
    assert!(store.read::<Vec<String>>("places.json").unwrap_err().is_corrupt());
}

#[test]
fn test_on_disk_bytes_hide_personal_data() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    store
        .write("people.json", &json!([{"name": "PLAINTEXT_MARKER_123"}]))
        .unwrap();

    let on_disk = fs::read(dir.path().join("people.json")).unwrap();
    assert!(!String::from_utf8_lossy(&on_disk).contains("PLAINTEXT_MARKER_123"));
}

#[test]
fn test_write_into_regular_file_is_io_error() {
    let dir = tempdir().unwrap();
    let not_a_dir = dir.path().join("notadir");
    fs::write(&not_a_dir, b"plain file").unwrap();
    let store = open(&not_a_dir);

    let err = store.write("people.json", &json!([])).unwrap_err();

    assert!(matches!(err, AacError::Io { .. }), "got {:?}", err);
    assert!(!err.is_corrupt());
    assert_eq!(fs::read(&not_a_dir).unwrap(), b"plain file");
}

#[test]
fn test_unreadable_document_is_io_error_not_missing() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("people.json")).unwrap();
    let store = open(dir.path());

    let err = store.read::<serde_json::Value>("people.json").unwrap_err();

    match err {
        AacError::Io { path, .. } => assert_eq!(path, dir.path().join("people.json")),
        other => panic!("expected Io, got {:?}", other),
    }
}
