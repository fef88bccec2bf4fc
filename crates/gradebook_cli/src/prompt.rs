//! Terminal confirmation prompts.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use gradebook_core::{Confirmer, Prompt};
use log::warn;

/// Asks on the terminal, or approves everything when `--yes` was given.
///
/// A prompt that cannot be shown (no TTY) counts as declined.
pub struct TerminalConfirmer {
    assume_yes: bool,
}

impl TerminalConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, prompt: Prompt) -> bool {
        if self.assume_yes {
            return true;
        }
        match Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.message())
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(err) => {
                warn!("event=confirm_prompt module=cli status=error error={}", err);
                eprintln!("Cannot ask for confirmation ({err}); pass --yes to proceed.");
                false
            }
        }
    }
}
