//! Non-interactive UI for pipes, CI and scripted use.

use std::collections::HashMap;

use crate::error::{Error, Result};

use super::{NoopSpinner, OutputMode, Prompt, PromptResult, SpinnerHandle, UserInterface};

/// Environment prefix for answering prompts without a terminal.
pub const PROMPT_ENV_PREFIX: &str = "DEPLOYINFO_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `DEPLOYINFO_PROMPT_<KEY>` variables, then
/// from the prompt default. Warnings and errors go to stderr.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_decorations() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(PromptResult::String(value.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(PromptResult::String(default.clone()));
        }

        Err(Error::Other(anyhow::anyhow!(
            "Cannot prompt for '{}' in non-interactive mode (set {})",
            prompt.key,
            env_key
        )))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_decorations() {
            println!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_decorations() {
            println!("\n── {} ──\n", title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_prompt(default: Option<&str>) -> Prompt {
        Prompt {
            key: "update".to_string(),
            question: "Update now?".to_string(),
            default: default.map(String::from),
        }
    }

    #[test]
    fn uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("DEPLOYINFO_PROMPT_UPDATE".to_string(), "u".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);

        let result = ui.prompt(&update_prompt(Some("no"))).unwrap();
        assert!(result.is_yes());
    }

    #[test]
    fn falls_back_to_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let result = ui.prompt(&update_prompt(Some("no"))).unwrap();
        assert!(!result.is_yes());
    }

    #[test]
    fn errors_without_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let err = ui.prompt(&update_prompt(None)).unwrap_err();
        assert!(err.to_string().contains("DEPLOYINFO_PROMPT_UPDATE"));
    }

    #[test]
    fn reports_configured_mode() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
