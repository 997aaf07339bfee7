// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::shared::error::{AzError, Result};
use std::io::{self, BufRead, IsTerminal, Write};

const DEFAULT_CONFIRMATION: &str = "Are you sure you want to perform this operation?";

/// Yes/no question to the operator.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Prompt on stderr, answer on stdin.
pub struct StdinPrompt;

impl ConfirmationPrompt for StdinPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Err(AzError::invalid_argument(
                "Unable to prompt for confirmation as no tty available. Use --yes.",
            ));
        }

        let mut stderr = io::stderr();
        write!(stderr, "{} (y/n): ", message)?;
        stderr.flush()?;

        let mut answer = String::new();
        stdin.lock().read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Ask unless `yes` was given; a declined prompt is `AzError::Cancelled`.
pub fn user_confirmation(prompt: &dyn ConfirmationPrompt, message: Option<&str>, yes: bool) -> Result<()> {
    if yes {
        return Ok(());
    }
    if prompt.confirm(message.unwrap_or(DEFAULT_CONFIRMATION))? {
        Ok(())
    } else {
        Err(AzError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        answer: bool,
        asked: AtomicUsize,
    }

    impl ConfirmationPrompt for Scripted {
        fn confirm(&self, _message: &str) -> Result<bool> {
            self.asked.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer)
        }
    }

    #[test]
    fn test_yes_skips_prompt() {
        let prompt = Scripted { answer: false, asked: AtomicUsize::new(0) };
        user_confirmation(&prompt, None, true).unwrap();
        assert_eq!(prompt.asked.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_declined_is_cancelled() {
        let prompt = Scripted { answer: false, asked: AtomicUsize::new(0) };
        let err = user_confirmation(&prompt, Some("Proceed?"), false).unwrap_err();
        assert!(matches!(err, AzError::Cancelled));
        assert_eq!(prompt.asked.load(Ordering::SeqCst), 1);
    }
}
