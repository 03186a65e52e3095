use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use notevault_core::crypto::KdfParams;
use notevault_core::fs::AtomicWrite;
use notevault_core::vault;
use notevault_core::{
    create_vault, open_vault, NoteUpdate, SessionState, VaultError, VaultOptions,
};

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_nanos();
        let dirname = format!("{}_{}_{}", prefix, std::process::id(), nanos);
        let path = std::env::temp_dir().join(dirname);
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn vault_path(&self) -> PathBuf {
        self.path.join("notes.vault")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn options(password: &str, timeout: u64) -> VaultOptions {
    VaultOptions::new()
        .password(password)
        .timeout_seconds(timeout)
        .kdf(KdfParams::new(1024, 1, 1))
}

#[test]
fn test_protected_note_survives_reopen() {
    let temp = TempDir::new("notevault_reopen");
    let path = temp.vault_path();

    let mut session = create_vault(&path, options("hunter2", 60)).expect("create should succeed");
    let id = session
        .create_note("Bank PIN 4321", "hello")
        .expect("create note should succeed");
    session.save().expect("save should succeed");
    drop(session);

    let on_disk = fs::read_to_string(&path).expect("read should succeed");
    assert!(!on_disk.contains("hello"));
    assert!(!on_disk.contains("Bank PIN"));
    assert!(!on_disk.contains("hunter2"));

    let mut session = open_vault(&path).expect("open should succeed");
    assert_eq!(session.state(), SessionState::Locked);
    session.unlock("hunter2").expect("unlock should succeed");

    let reopened = session.note(&id).expect("note should exist");
    assert_eq!(reopened.title, "Bank PIN 4321");
    assert_eq!(reopened.body, "hello");
}

#[test]
fn test_wrong_password_reveals_nothing() {
    let temp = TempDir::new("notevault_wrong_password");
    let path = temp.vault_path();

    let mut session = create_vault(&path, options("hunter2", 60)).expect("create should succeed");
    session.create_note("A", "hello").expect("create note should succeed");
    session.lock().expect("lock should succeed");

    let mut session = open_vault(&path).expect("open should succeed");
    let result = session.unlock("wrong");

    assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    assert!(session.is_locked());
    assert!(matches!(session.list_notes(), Err(VaultError::Locked)));
}

#[test]
fn test_inactivity_timeout_locks_session() {
    let temp = TempDir::new("notevault_timeout");
    let path = temp.vault_path();

    let mut session = create_vault(&path, options("hunter2", 5)).expect("create should succeed");
    session.create_note("A", "hello").expect("create note should succeed");
    let last_edit = Instant::now();

    let locked = session
        .check_timeout_at(last_edit + Duration::from_secs(6))
        .expect("timeout check should succeed");

    assert!(locked);
    assert!(session.is_locked());
    assert!(matches!(session.list_notes(), Err(VaultError::Locked)));

    // Unsaved edit was flushed before locking.
    session.unlock("hunter2").expect("unlock should succeed");
    assert_eq!(session.list_notes().expect("list should succeed").count(), 1);
}

#[test]
fn test_interrupted_save_keeps_previous_vault() {
    let temp = TempDir::new("notevault_interrupted");
    let path = temp.vault_path();

    let mut session = create_vault(&path, options("hunter2", 60)).expect("create should succeed");
    session.create_note("A", "hello").expect("create note should succeed");
    session.save().expect("save should succeed");
    let before = fs::read(&path).expect("read should succeed");

    let mut write = AtomicWrite::begin(&path).expect("begin should succeed");
    write
        .write_all(b"{\"password_protected\": tr")
        .expect("partial write should succeed");
    let temp_path = write.temp_path().to_path_buf();
    // Simulate a crash: the temp file is never committed or cleaned up.
    std::mem::forget(write);

    assert_eq!(fs::read(&path).expect("read should succeed"), before);
    let loaded = vault::load(&path).expect("previous vault should still load");
    assert_eq!(loaded.notes.len(), 1);

    let mut session = open_vault(&path).expect("open should succeed");
    session.unlock("hunter2").expect("unlock should succeed");
    assert_eq!(session.list_notes().expect("list should succeed").count(), 1);

    let _ = fs::remove_file(temp_path);
}

#[test]
fn test_many_notes_keep_fields_across_save() {
    let temp = TempDir::new("notevault_many");
    let path = temp.vault_path();

    let mut session = create_vault(&path, options("hunter2", 60)).expect("create should succeed");
    let mut ids = Vec::new();
    for i in 0..25 {
        ids.push(
            session
                .create_note(format!("Title {}", i), format!("Body {}\nline two", i))
                .expect("create note should succeed"),
        );
    }
    let created: Vec<_> = ids
        .iter()
        .map(|id| session.note(id).expect("note should exist").clone())
        .collect();
    session
        .set_read_only(&created[3].id, true)
        .expect("read-only should succeed");
    session.lock().expect("lock should succeed");

    let mut session = open_vault(&path).expect("open should succeed");
    session.unlock("hunter2").expect("unlock should succeed");

    assert_eq!(session.list_notes().expect("list should succeed").count(), 25);
    for original in &created {
        let loaded = session.note(&original.id).expect("note should exist");
        assert_eq!(loaded.title, original.title);
        assert_eq!(loaded.body, original.body);
        assert_eq!(loaded.created_at, original.created_at);
        assert_eq!(loaded.modified_at, original.modified_at);
        assert!(loaded.encrypted);
    }
    assert!(session.note(&created[3].id).unwrap().read_only);

    let result = session.update_note(&created[3].id, NoteUpdate::new().body("changed"));
    assert!(matches!(result, Err(VaultError::ReadOnly(_))));
}

#[test]
fn test_edit_updates_modified_time_only() {
    let temp = TempDir::new("notevault_edit");
    let path = temp.vault_path();

    let mut session = create_vault(&path, options("hunter2", 60)).expect("create should succeed");
    let id = session.create_note("A", "hello").expect("create note should succeed");
    let note = session.note(&id).expect("note should exist").clone();
    std::thread::sleep(Duration::from_millis(10));

    session
        .update_note(&note.id, NoteUpdate::new().body("hello again"))
        .expect("update should succeed");
    session.save().expect("save should succeed");

    let edited = session.note(&note.id).expect("note should exist");
    assert_eq!(edited.created_at, note.created_at);
    assert!(edited.modified_at > note.modified_at);
    assert_eq!(edited.body, "hello again");
}

#[test]
fn test_tampered_ciphertext_fails_unlock() {
    let temp = TempDir::new("notevault_tampered");
    let path = temp.vault_path();

    let mut session = create_vault(&path, options("hunter2", 60)).expect("create should succeed");
    session.create_note("A", "hello").expect("create note should succeed");
    session.lock().expect("lock should succeed");

    let contents = fs::read_to_string(&path).expect("read should succeed");
    let mut value: serde_json::Value = serde_json::from_str(&contents).expect("valid JSON");
    let cipher = value["notes"][0]["body_cipher"]["ciphertext"]
        .as_str()
        .expect("ciphertext should be a string")
        .to_string();
    let flipped = if cipher.starts_with('A') {
        format!("B{}", &cipher[1..])
    } else {
        format!("A{}", &cipher[1..])
    };
    value["notes"][0]["body_cipher"]["ciphertext"] = serde_json::Value::String(flipped);
    fs::write(&path, value.to_string()).expect("write should succeed");

    let mut session = open_vault(&path).expect("structure is still valid");
    let result = session.unlock("hunter2");

    assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    assert!(session.is_locked());
}

#[test]
fn test_tampered_kdf_params_are_corrupt() {
    let temp = TempDir::new("notevault_kdf");
    let path = temp.vault_path();

    let session = create_vault(&path, options("hunter2", 60)).expect("create should succeed");
    drop(session);

    let contents = fs::read_to_string(&path).expect("read should succeed");
    let mut value: serde_json::Value = serde_json::from_str(&contents).expect("valid JSON");
    value["kdf"]["parallelism"] = serde_json::json!(0);
    fs::write(&path, value.to_string()).expect("write should succeed");

    let result = open_vault(&path);
    assert!(matches!(result, Err(VaultError::Corrupt(_))));
}

#[test]
fn test_garbage_file_is_corrupt() {
    let temp = TempDir::new("notevault_garbage");
    let path = temp.vault_path();
    fs::write(&path, b"not a vault").expect("write should succeed");

    let result = open_vault(&path);
    assert!(matches!(result, Err(VaultError::Corrupt(_))));
}

#[test]
fn test_open_missing_file() {
    let temp = TempDir::new("notevault_missing");

    let result = open_vault(temp.vault_path());
    assert!(matches!(result, Err(VaultError::FileMissing(_))));
}
