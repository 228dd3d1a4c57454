use dialoguer::Confirm;
use groupcal_core::error::{GroupCalError, GroupCalResult};
use groupcal_core::interaction::{Interaction, Notice};
use owo_colors::OwoColorize;

/// Confirmation prompts and notices on the terminal.
pub struct Terminal {
    /// Answer every confirmation with yes (--yes)
    assume_yes: bool,
}

impl Terminal {
    pub fn new(assume_yes: bool) -> Self {
        Terminal { assume_yes }
    }
}

impl Interaction for Terminal {
    fn confirm(&self, prompt: &str) -> GroupCalResult<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| GroupCalError::Io(std::io::Error::other(e)))
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(message) => println!("{}", message.green()),
            Notice::Failure(message) => eprintln!("{}", message.red()),
        }
    }
}
