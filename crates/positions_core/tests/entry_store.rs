use positions_core::db::open_db_in_memory;
use positions_core::{
    check_unique, parse_iso_date, seed_entries, ConflictError, DocumentRepository, Entry,
    EntryStore, SqliteDocumentRepository, StoreError, STORE_KEY,
};
use rusqlite::Connection;

fn entry(date: &str, number: u16) -> Entry {
    Entry::new(parse_iso_date(date).unwrap(), number)
}

fn persisted_body(conn: &Connection) -> Option<String> {
    SqliteDocumentRepository::try_new(conn)
        .unwrap()
        .read_document(STORE_KEY)
        .unwrap()
}

#[test]
fn first_load_installs_and_persists_seed() {
    let conn = open_db_in_memory().unwrap();
    let store = EntryStore::open(SqliteDocumentRepository::try_new(&conn).unwrap()).unwrap();

    assert_eq!(store.entries(), seed_entries().as_slice());
    let body = persisted_body(&conn).unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["entries"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["entries"][0]["date"], "2025-10-19");
}

#[test]
fn corrupt_documents_are_reseeded() {
    for corrupt in ["not json", r#"{"entries":{}}"#, r#"{"items":[]}"#] {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
        repo.write_document(STORE_KEY, corrupt).unwrap();

        let store = EntryStore::open(&repo).unwrap();
        assert_eq!(store.entries(), seed_entries().as_slice(), "input: {corrupt}");
        assert_ne!(persisted_body(&conn).as_deref(), Some(corrupt));
    }
}

#[test]
fn malformed_items_are_skipped_and_valid_picks_survive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    let body = r#"{"entries":[{"date":"2024-01-01","number":1},{"date":"2024-01-02","number":2},{"date":"2024-01-03","number":"3"}]}"#;
    repo.write_document(STORE_KEY, body).unwrap();

    let mut store = EntryStore::open(&repo).unwrap();
    assert_eq!(
        store.entries(),
        [entry("2024-01-01", 1), entry("2024-01-02", 2)].as_slice()
    );
    assert_eq!(store.skipped_items(), 1);
    assert_eq!(persisted_body(&conn).as_deref(), Some(body));

    store.append(entry("2024-01-03", 3)).unwrap();
    let reopened = EntryStore::open(&repo).unwrap();
    assert_eq!(reopened.entries().len(), 3);
    assert_eq!(reopened.skipped_items(), 0);
}

#[test]
fn empty_entries_document_is_respected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    repo.write_document(STORE_KEY, r#"{"entries":[]}"#).unwrap();

    let store = EntryStore::open(&repo).unwrap();
    assert!(store.entries().is_empty());
}

#[test]
fn append_persists_and_survives_reload() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    let mut store = EntryStore::open(&repo).unwrap();

    store.append(entry("2025-10-26", 1)).unwrap();
    assert_eq!(store.entries().len(), 8);

    let reopened = EntryStore::open(&repo).unwrap();
    assert_eq!(reopened.entries().last(), Some(&entry("2025-10-26", 1)));
    check_unique(reopened.entries()).unwrap();
}

#[test]
fn append_refuses_conflicts_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    let mut store = EntryStore::open(&repo).unwrap();
    let before = persisted_body(&conn);

    let err = store.append(entry("2025-12-01", 213)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Conflict(ConflictError::DuplicateNumber { number: 213, .. })
    ));

    let err = store.append(entry("2025-10-19", 1)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Conflict(ConflictError::DuplicateDate { number: 213, .. })
    ));

    assert_eq!(store.entries().len(), 7);
    assert_eq!(persisted_body(&conn), before);
}

#[test]
fn replace_all_refuses_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    let mut store = EntryStore::open(&repo).unwrap();

    let err = store
        .replace_all(vec![entry("2025-01-01", 5), entry("2025-01-02", 5)])
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
    assert_eq!(store.entries(), seed_entries().as_slice());

    store
        .replace_all(vec![entry("2025-01-01", 5), entry("2025-01-02", 6)])
        .unwrap();
    assert_eq!(EntryStore::open(&repo).unwrap().entries().len(), 2);
}

#[test]
fn reset_then_fresh_load_reproduces_seed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    let mut store = EntryStore::open(&repo).unwrap();

    store.append(entry("2025-10-26", 1)).unwrap();
    store.reset().unwrap();
    assert!(store.entries().is_empty());
    assert!(EntryStore::open(&repo).unwrap().entries().is_empty());

    conn.execute("DELETE FROM documents;", []).unwrap();
    let reloaded = EntryStore::open(&repo).unwrap();
    assert_eq!(reloaded.entries(), seed_entries().as_slice());
}

#[test]
fn duplicate_persisted_entries_load_and_index_first_wins() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    repo.write_document(
        STORE_KEY,
        r#"{"entries":[{"date":"2025-01-01","number":5},{"date":"2025-01-02","number":5}]}"#,
    )
    .unwrap();

    let store = EntryStore::open(&repo).unwrap();
    assert_eq!(store.entries().len(), 2);
    let indices = store.indices();
    assert_eq!(indices.anomalies, 1);
    assert_eq!(indices.date_for(5), parse_iso_date("2025-01-01"));
}
