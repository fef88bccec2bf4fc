//! Blocking yes/no confirmation seam for destructive or bulk operations.

/// Operations that require an explicit user decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Delete every course.
    ClearAll,
    /// Replace every course with the contents of an import file.
    ReplaceWithImport { incoming: usize },
    /// Append the demo courses to the existing ones.
    AppendDemo,
}

impl Prompt {
    /// Question shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::ClearAll => "Delete ALL courses?".to_string(),
            Self::ReplaceWithImport { incoming } => format!(
                "Replace the current courses with the {incoming} course(s) from the file?"
            ),
            Self::AppendDemo => {
                "Load example courses? (They will be added to the existing ones)".to_string()
            }
        }
    }
}

/// Synchronous confirmation provider.
pub trait Confirmer {
    fn confirm(&mut self, prompt: Prompt) -> bool;
}

impl<F> Confirmer for F
where
    F: FnMut(Prompt) -> bool,
{
    fn confirm(&mut self, prompt: Prompt) -> bool {
        self(prompt)
    }
}
