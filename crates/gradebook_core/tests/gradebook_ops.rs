use gradebook_core::db::open_db_in_memory;
use gradebook_core::{
    Change, CourseField, CourseRecord, CourseStorage, Gradebook, GradebookObserver,
    GradebookView, KeyValueStore, ObserverError, Prompt, SortDirection, SqliteKeyValueStore,
    MAX_CREDITS, MAX_GRADE, STORAGE_KEY,
};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Clone, Default)]
struct Recorder {
    seen: Rc<RefCell<Vec<(Change, Vec<String>)>>>,
}

impl GradebookObserver for Recorder {
    fn on_change(&mut self, change: &Change, view: &GradebookView<'_>) -> Result<(), ObserverError> {
        let rows = view.rows.iter().map(|record| record.name.clone()).collect();
        self.seen.borrow_mut().push((change.clone(), rows));
        Ok(())
    }
}

fn approve(_: Prompt) -> bool {
    true
}

fn decline(_: Prompt) -> bool {
    false
}

fn find<'a>(gradebook: &'a Gradebook<'_>, name: &str) -> &'a CourseRecord {
    gradebook
        .records()
        .iter()
        .find(|record| record.name == name)
        .unwrap()
}

#[test]
fn calculus_physics_statistics() {
    let mut gradebook = Gradebook::new();
    gradebook.add("Calculus", 6.0, 4.5).unwrap();
    gradebook.add("Physics", 6.0, 9.0).unwrap();

    let stats = gradebook.stats();
    assert_eq!(stats.total_credits, 12.0);
    assert_eq!(stats.weighted_average, Some(6.75));
    assert_eq!(stats.passed_count, 1);
    assert_eq!(stats.total_count, 2);
    assert_eq!(gradebook.stats(), stats);
}

#[test]
fn comma_decimal_edit_updates_grade() {
    let mut gradebook = Gradebook::new();
    let id = gradebook.add("Calculus", 6.0, 4.5).unwrap();

    assert!(gradebook.update(id, CourseField::Grade, "8,5").unwrap());
    assert_eq!(gradebook.get(id).unwrap().grade, 8.5);
}

#[test]
fn non_numeric_edit_keeps_previous_credits() {
    let mut gradebook = Gradebook::new();
    let recorder = Recorder::default();
    gradebook.subscribe(recorder.clone());
    let id = gradebook.add("Physics", 6.0, 9.0).unwrap();

    assert!(gradebook.update(id, CourseField::Credits, "abc").unwrap());
    assert_eq!(gradebook.get(id).unwrap().credits, 6.0);

    let seen = recorder.seen.borrow();
    assert_eq!(
        seen.last().unwrap().0,
        Change::Updated {
            id,
            field: CourseField::Credits,
            applied: false
        }
    );
}

#[test]
fn edits_never_escape_ranges() {
    let mut gradebook = Gradebook::new();
    let a = gradebook.add("a", 120.0, 15.0).unwrap();
    let b = gradebook.add("b", -1.0, f64::NAN).unwrap();
    gradebook.update(a, CourseField::Credits, "61").unwrap();
    gradebook.update(a, CourseField::Grade, "-0,5").unwrap();
    gradebook.update(b, CourseField::Grade, "1e3").unwrap();
    gradebook.delete(Uuid::new_v4()).unwrap();
    gradebook.add("c", 59.5, 9.9).unwrap();

    for record in gradebook.records() {
        assert!((0.0..=MAX_CREDITS).contains(&record.credits));
        assert!((0.0..=MAX_GRADE).contains(&record.grade));
    }
    assert_eq!(find(&gradebook, "a").credits, 60.0);
    assert_eq!(find(&gradebook, "a").grade, 0.0);
    assert_eq!(find(&gradebook, "b").grade, 10.0);
}

#[test]
fn name_edit_trims_and_id_stays_fixed() {
    let mut gradebook = Gradebook::new();
    let id = gradebook.add("Draft", 5.0, 5.0).unwrap();
    gradebook.update(id, CourseField::Name, "  Algorithms  ").unwrap();

    let record = gradebook.get(id).unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.name, "Algorithms");
}

#[test]
fn zero_credit_total_has_no_average() {
    let mut gradebook = Gradebook::new();
    assert_eq!(gradebook.stats().weighted_average, None);

    gradebook.add("Audit", 0.0, 8.0).unwrap();
    assert_eq!(gradebook.stats().weighted_average, None);
    assert_eq!(gradebook.stats().total_count, 1);
}

#[test]
fn delete_removes_only_matching_record() {
    let mut gradebook = Gradebook::new();
    let keep = gradebook.add("Keep", 6.0, 6.0).unwrap();
    let drop = gradebook.add("Drop", 6.0, 6.0).unwrap();

    assert!(gradebook.delete(drop).unwrap());
    assert!(!gradebook.delete(drop).unwrap());
    assert_eq!(gradebook.records().len(), 1);
    assert_eq!(gradebook.records()[0].id, keep);
}

#[test]
fn clear_requires_confirmation() {
    let mut gradebook = Gradebook::new();
    gradebook.add("One", 6.0, 6.0).unwrap();

    assert!(!gradebook.clear(&mut decline).unwrap());
    assert_eq!(gradebook.records().len(), 1);

    assert!(gradebook.clear(&mut approve).unwrap());
    assert!(gradebook.records().is_empty());
}

#[test]
fn repeated_sort_key_toggles_direction() {
    let mut gradebook = Gradebook::new();
    gradebook.add("Low", 6.0, 3.0).unwrap();
    gradebook.add("High", 6.0, 9.0).unwrap();
    gradebook.add("Mid", 6.0, 6.0).unwrap();

    let names = |gradebook: &Gradebook<'_>| {
        gradebook
            .view()
            .rows
            .iter()
            .map(|record| record.name.clone())
            .collect::<Vec<_>>()
    };

    let state = gradebook.select_sort(CourseField::Grade).unwrap();
    assert_eq!(state.direction, SortDirection::Ascending);
    assert_eq!(names(&gradebook), vec!["Low", "Mid", "High"]);

    let state = gradebook.select_sort(CourseField::Grade).unwrap();
    assert_eq!(state.direction, SortDirection::Descending);
    assert_eq!(names(&gradebook), vec!["High", "Mid", "Low"]);

    let state = gradebook.select_sort(CourseField::Grade).unwrap();
    assert_eq!(state.direction, SortDirection::Ascending);

    // Display order never leaks into storage order.
    let stored: Vec<_> = gradebook.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(stored, vec!["Low", "High", "Mid"]);
}

#[test]
fn greek_names_sort_case_insensitively() {
    let mut gradebook = Gradebook::new();
    gradebook.add("βήτα", 6.0, 6.0).unwrap();
    gradebook.add("Άλφα", 6.0, 6.0).unwrap();
    gradebook.add("ΓΆΜΜΑ", 6.0, 6.0).unwrap();

    let rows: Vec<_> = gradebook.view().rows.iter().map(|r| r.name.clone()).collect();
    assert_eq!(rows, vec!["Άλφα", "βήτα", "ΓΆΜΜΑ"]);
}

#[test]
fn injected_collator_controls_name_order() {
    let mut gradebook = Gradebook::new().with_collator(|a: &str, b: &str| b.len().cmp(&a.len()));
    gradebook.add("ab", 1.0, 1.0).unwrap();
    gradebook.add("abcd", 1.0, 1.0).unwrap();

    assert_eq!(gradebook.view().rows[0].name, "abcd");
}

#[test]
fn observers_see_sorted_view_after_each_change() {
    let mut gradebook = Gradebook::new();
    let recorder = Recorder::default();
    gradebook.subscribe(recorder.clone());

    gradebook.add("Zeta", 6.0, 6.0).unwrap();
    gradebook.add("alpha", 6.0, 6.0).unwrap();
    gradebook.select_sort(CourseField::Name).unwrap();

    let seen = recorder.seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[1].1, vec!["alpha", "Zeta"]);
    assert!(matches!(seen[2].0, Change::Resorted { .. }));
    assert!(!seen[2].0.is_mutation());
    assert_eq!(seen[2].1, vec!["Zeta", "alpha"]);
}

#[test]
fn validation_failure_publishes_nothing() {
    let mut gradebook = Gradebook::new();
    let recorder = Recorder::default();
    gradebook.subscribe(recorder.clone());

    assert!(gradebook.submit("  ", "6", "7").is_err());
    assert!(gradebook.submit("Logic", "6", "").is_err());
    assert!(recorder.seen.borrow().is_empty());
}

#[test]
fn declined_demo_leaves_records_and_storage_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut gradebook = Gradebook::open(CourseStorage::new(SqliteKeyValueStore::new(&conn)));
    gradebook.add("Existing", 6.0, 6.0).unwrap();

    let before_records = gradebook.records().to_vec();
    let before_stored = SqliteKeyValueStore::new(&conn).get(STORAGE_KEY).unwrap();

    let mut prompts = Vec::new();
    let outcome = gradebook
        .load_demo(&mut |prompt: Prompt| {
            prompts.push(prompt);
            false
        })
        .unwrap();

    assert_eq!(outcome, None);
    assert_eq!(prompts, vec![Prompt::AppendDemo]);
    assert_eq!(gradebook.records(), before_records.as_slice());
    assert_eq!(
        SqliteKeyValueStore::new(&conn).get(STORAGE_KEY).unwrap(),
        before_stored
    );
}

#[test]
fn replace_prompt_counts_records_after_duplicate_ids_are_dropped() {
    let mut gradebook = Gradebook::new();
    let first = CourseRecord::new("Algebra", 6.0, 7.0);
    let incoming = vec![
        first.clone(),
        first,
        CourseRecord::new("Geometry", 5.0, 8.0),
    ];

    let mut prompts = Vec::new();
    let outcome = gradebook
        .replace_all(incoming, &mut |prompt: Prompt| {
            prompts.push(prompt);
            true
        })
        .unwrap();

    assert_eq!(prompts, vec![Prompt::ReplaceWithImport { incoming: 2 }]);
    assert_eq!(outcome, Some(2));
    assert_eq!(gradebook.records().len(), 2);
}
