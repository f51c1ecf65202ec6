//! Blocking terminal prompts.

use dialoguer::{Input, Select};

/// User prompts the flows block on.
pub trait Prompt {
    /// Ask for the API key. `None` when cancelled or left empty.
    fn input_api_key(&self) -> Option<String>;

    /// Pick one of `options`. `None` when the selection is cancelled.
    fn select(&self, title: &str, options: &[String]) -> Option<usize>;
}

pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input_api_key(&self) -> Option<String> {
        let entered: String = Input::new()
            .with_prompt("Introdu cheia ta API de la Subs.ro")
            .allow_empty(true)
            .interact_text()
            .ok()?;

        let trimmed = entered.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    fn select(&self, title: &str, options: &[String]) -> Option<usize> {
        Select::new()
            .with_prompt(title)
            .items(options)
            .default(0)
            .interact_opt()
            .ok()
            .flatten()
    }
}
