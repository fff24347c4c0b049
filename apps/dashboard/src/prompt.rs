use std::io::{self, Write};

use dashboard_core::ConfirmPrompt;
use tracing::warn;

/// Asks on the terminal and blocks until the user answers. Anything other
/// than `y`/`yes` is a no.
pub struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if let Err(err) = io::stdout().flush() {
            warn!("prompt: failed to flush stdout error={err}");
        }

        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                warn!("prompt: failed to read answer error={err}");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
