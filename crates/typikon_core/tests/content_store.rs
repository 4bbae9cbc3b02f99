use std::fs;
use std::path::Path;
use typikon_core::db::{open_db, open_db_in_memory};
use typikon_core::{
    ContentStore, FsContentStore, Library, MemoryContentStore, SqliteContentStore, StoreError,
};

fn write(root: &Path, path: &str, text: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, text).unwrap();
}

fn layered_store() -> MemoryContentStore {
    MemoryContentStore::new()
        .with_document("xml/01/05.xml", "base")
        .with_document("cu/xml/01/05.xml", "cu")
        .with_document("cu/ru/xml/01/05.xml", "cu/ru")
        .with_document("xml/lives/9208.xml", "base life")
        .with_document("cu/ru/xml/lives/9208.xml", "ru life")
        .with_document("cu/xml/02/01.xml", "cu only")
}

#[test]
fn bottom_up_prefers_most_specific_language() {
    let store = layered_store();
    let library = Library::new(&store, "cu/ru").unwrap();
    assert_eq!(library.find_bottom_up("xml/01/05.xml").unwrap(), "cu/ru/xml/01/05.xml");
    assert_eq!(library.menaion(1, 5).unwrap().text, "cu/ru");
    assert_eq!(library.menaion(2, 1).unwrap().path, "cu/xml/02/01.xml");

    let general = Library::new(&store, "cu").unwrap();
    assert_eq!(general.menaion(1, 5).unwrap().text, "cu");
    let bare = Library::new(&store, "").unwrap();
    assert_eq!(bare.menaion(1, 5).unwrap().text, "base");
}

#[test]
fn bottom_up_reports_requested_path_when_nothing_matches() {
    let store = layered_store();
    let library = Library::new(&store, "cu/ru").unwrap();
    match library.menaion(3, 1) {
        Err(StoreError::NotFound { path }) => assert_eq!(path, "xml/03/01.xml"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn top_down_lists_every_layer_general_first() {
    let store = layered_store();
    let library = Library::new(&store, "cu/ru").unwrap();
    assert_eq!(
        library.find_top_down("xml/01/05.xml").unwrap(),
        vec!["xml/01/05.xml", "cu/xml/01/05.xml", "cu/ru/xml/01/05.xml"]
    );

    let lives: Vec<String> = library
        .lives("9208")
        .unwrap()
        .into_iter()
        .map(|document| document.text)
        .collect();
    assert_eq!(lives, vec!["base life", "ru life"]);
    assert!(library.lives("4000").unwrap().is_empty());
}

#[test]
fn json_bundle_loads_into_memory_store() {
    let store = MemoryContentStore::from_json(
        r#"{"xml/Commands/Fasting.xml": "<FASTING/>", "en/xml/01/01.xml": "<DAY/>"}"#,
    )
    .unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.has("en/xml/01/01.xml").unwrap());
    assert_eq!(store.get("xml/Commands/Fasting.xml").unwrap(), "<FASTING/>");
    assert!(matches!(store.get("xml/01/02.xml"), Err(StoreError::NotFound { .. })));

    assert!(matches!(
        MemoryContentStore::from_json("[1, 2]"),
        Err(StoreError::InvalidBundle(_))
    ));
}

#[test]
fn fs_store_requires_marker_document() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        FsContentStore::open(dir.path()),
        Err(StoreError::InvalidRoot { .. })
    ));

    write(dir.path(), "xml/Commands/Fasting.xml", "<FASTING/>");
    write(dir.path(), "en/xml/01/05.xml", "<DAY/>");
    let store = FsContentStore::open(dir.path()).unwrap();
    assert_eq!(store.root(), dir.path());

    assert!(store.has("en/xml/01/05.xml").unwrap());
    assert!(!store.has("en/xml").unwrap());
    assert_eq!(store.get("en/xml/01/05.xml").unwrap(), "<DAY/>");
    assert!(matches!(store.get("xml/01/05.xml"), Err(StoreError::NotFound { .. })));

    let library = Library::new(&store, "en").unwrap();
    assert_eq!(library.fasting().unwrap().len(), 1);
    assert_eq!(library.menaion(1, 5).unwrap().path, "en/xml/01/05.xml");
}

#[test]
fn sqlite_store_reads_documents_table() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContentStore::try_new(&conn).unwrap();
    assert_eq!(store.document_count().unwrap(), 0);

    store.put_document("xml/01/05.xml", "first").unwrap();
    store.put_document("xml/01/05.xml", "second").unwrap();
    assert_eq!(store.document_count().unwrap(), 1);
    assert!(store.has("xml/01/05.xml").unwrap());
    assert_eq!(store.get("xml/01/05.xml").unwrap(), "second");
    assert!(!store.has("xml/01/06.xml").unwrap());
    assert!(matches!(store.get("xml/01/06.xml"), Err(StoreError::NotFound { .. })));
}

#[test]
fn sqlite_failures_are_not_reported_as_missing_documents() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContentStore::try_new(&conn).unwrap();
    store.put_document("xml/01/05.xml", "<DAY/>").unwrap();
    conn.execute("DROP TABLE documents;", []).unwrap();

    assert!(matches!(store.has("xml/01/05.xml"), Err(StoreError::Db(_))));
    let library = Library::new(&store, "en").unwrap();
    assert!(matches!(library.menaion(1, 5), Err(StoreError::Db(_))));
    assert!(matches!(library.lives("501"), Err(StoreError::Db(_))));
}

#[test]
fn sqlite_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.sqlite3");
    {
        let conn = open_db(&path).unwrap();
        let store = SqliteContentStore::try_new(&conn).unwrap();
        store.put_document("en/xml/Commands/DivineLiturgy.xml", "<DATA/>").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteContentStore::try_new(&conn).unwrap();
    let library = Library::new(&store, "en").unwrap();
    assert_eq!(library.divine_liturgy().unwrap().text, "<DATA/>");
}

#[test]
fn sqlite_store_rejects_unmigrated_database() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteContentStore::try_new(&conn),
        Err(StoreError::InvalidBundle(_))
    ));
}
