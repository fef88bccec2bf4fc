use gradebook_core::db::open_db_in_memory;
use gradebook_core::{
    CourseStorage, Gradebook, GradebookError, ImportError, KeyValueStore, Prompt,
    SqliteKeyValueStore, STORAGE_KEY,
};

fn triples(gradebook: &Gradebook<'_>) -> Vec<(String, f64, f64)> {
    gradebook
        .records()
        .iter()
        .map(|record| (record.name.clone(), record.credits, record.grade))
        .collect()
}

#[test]
fn export_then_import_reproduces_triples() {
    let mut source = Gradebook::new();
    source.add("Calculus", 6.0, 4.5).unwrap();
    source.add("Γραμμική Άλγεβρα", 7.5, 8.25).unwrap();
    source.add("", 0.0, 0.0).unwrap();
    let exported = source.export().unwrap();

    let mut target = Gradebook::new();
    target.add("Old", 1.0, 1.0).unwrap();
    let replaced = target.import(&exported, &mut |_: Prompt| true).unwrap();

    assert_eq!(replaced, Some(3));
    assert_eq!(triples(&target), triples(&source));
    for (imported, original) in target.records().iter().zip(source.records()) {
        assert_ne!(imported.id, original.id);
    }
}

#[test]
fn non_array_import_leaves_collection_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut gradebook = Gradebook::open(CourseStorage::new(SqliteKeyValueStore::new(&conn)));
    gradebook.add("Calculus", 6.0, 4.5).unwrap();
    let before = gradebook.records().to_vec();
    let stored_before = SqliteKeyValueStore::new(&conn).get(STORAGE_KEY).unwrap();

    let mut asked = false;
    let err = gradebook
        .import(r#"{"name": "Physics", "ects": 6}"#, &mut |_: Prompt| {
            asked = true;
            true
        })
        .unwrap_err();

    assert!(matches!(
        err,
        GradebookError::Import(ImportError::NotAnArray { .. })
    ));
    assert!(err.to_string().contains("expected a list of courses"));
    assert!(!asked, "confirmation must not be requested for invalid input");
    assert_eq!(gradebook.records(), before.as_slice());
    assert_eq!(
        SqliteKeyValueStore::new(&conn).get(STORAGE_KEY).unwrap(),
        stored_before
    );
}

#[test]
fn malformed_import_is_reported() {
    let mut gradebook = Gradebook::new();
    let err = gradebook
        .import("[{\"name\": ", &mut |_: Prompt| true)
        .unwrap_err();
    assert!(matches!(err, GradebookError::Import(ImportError::Malformed(_))));
}

#[test]
fn declined_import_keeps_existing_courses() {
    let mut gradebook = Gradebook::new();
    gradebook.add("Existing", 6.0, 6.0).unwrap();

    let mut prompts = Vec::new();
    let outcome = gradebook
        .import(r#"[{"name": "New"}, {"name": "Other"}]"#, &mut |prompt: Prompt| {
            prompts.push(prompt);
            false
        })
        .unwrap();

    assert_eq!(outcome, None);
    assert_eq!(prompts, vec![Prompt::ReplaceWithImport { incoming: 2 }]);
    assert_eq!(gradebook.records().len(), 1);
    assert_eq!(gradebook.records()[0].name, "Existing");
}

#[test]
fn import_defaults_missing_and_invalid_fields() {
    let mut gradebook = Gradebook::new();
    gradebook
        .import(
            r#"[{"name": " Logic ", "ects": "abc", "grade": "7,5"}, {}]"#,
            &mut |_: Prompt| true,
        )
        .unwrap();

    assert_eq!(
        triples(&gradebook),
        vec![("Logic".to_string(), 0.0, 7.5), (String::new(), 0.0, 0.0)]
    );
}
