//! Table rendering observer.
//!
//! Every published change redraws the frame; the binary prints the last
//! frame once the command finishes.

use comfy_table::{Cell, CellAlignment, Table};
use gradebook_core::{
    format_decimal, Change, CourseField, GradebookObserver, GradebookView, ObserverError,
    SortDirection, SortState,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct FrameRenderer {
    frame: Rc<RefCell<String>>,
}

impl FrameRenderer {
    /// Most recently rendered frame, empty before the first change.
    pub fn frame(&self) -> String {
        self.frame.borrow().clone()
    }
}

impl GradebookObserver for FrameRenderer {
    fn on_change(&mut self, _change: &Change, view: &GradebookView<'_>) -> Result<(), ObserverError> {
        *self.frame.borrow_mut() = render_frame(view);
        Ok(())
    }
}

pub fn render_frame(view: &GradebookView<'_>) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new(header_label("Course", CourseField::Name, view.sort)),
        Cell::new(header_label("Credits", CourseField::Credits, view.sort)),
        Cell::new(header_label("Grade", CourseField::Grade, view.sort)),
        Cell::new("Status"),
    ]);

    for record in &view.rows {
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(&record.name),
            Cell::new(format_decimal(Some(record.credits), 1)).set_alignment(CellAlignment::Right),
            Cell::new(format_decimal(Some(record.grade), 2)).set_alignment(CellAlignment::Right),
            Cell::new(if record.passed() { "passed" } else { "failed" }),
        ]);
    }

    let stats = &view.stats;
    format!(
        "{table}\nWeighted average: {}\nTotal credits: {}\nPassed: {} / {}\n",
        format_decimal(stats.weighted_average, 2),
        format_decimal(Some(stats.total_credits), 1),
        stats.passed_count,
        stats.total_count
    )
}

fn header_label(label: &str, field: CourseField, sort: SortState) -> String {
    if sort.key != field {
        return label.to_string();
    }
    match sort.direction {
        SortDirection::Ascending => format!("{label} ▲"),
        SortDirection::Descending => format!("{label} ▼"),
    }
}
