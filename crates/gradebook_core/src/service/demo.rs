//! Fixed sample courses for first-run exploration.

/// `(name, credits, grade)` triples appended by `Gradebook::load_demo`.
pub const DEMO_COURSES: &[(&str, f64, f64)] = &[
    ("Γραμμική Άλγεβρα", 6.0, 7.5),
    ("Δομές Δεδομένων", 6.0, 8.0),
    ("Λειτουργικά Συστήματα", 6.0, 6.0),
    ("Ανάλυση ΙΙ", 5.0, 4.5),
    ("Βάσεις Δεδομένων", 6.0, 9.3),
];
