//! Native Bestätigungs- und Hinweisdialoge.

use crate::core::Prompt;

/// `Prompt` über native Message-Boxen (`rfd`). Blockiert bis zur Antwort.
#[derive(Debug, Clone)]
pub struct RfdPrompt {
    title: String,
}

impl RfdPrompt {
    /// Erstellt einen Prompt mit Fenstertitel.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Prompt for RfdPrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        let result = rfd::MessageDialog::new()
            .set_title(&self.title)
            .set_description(prompt)
            .set_level(rfd::MessageLevel::Warning)
            .set_buttons(rfd::MessageButtons::OkCancel)
            .show();
        matches!(
            result,
            rfd::MessageDialogResult::Ok | rfd::MessageDialogResult::Yes
        )
    }

    fn notify(&mut self, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_title(&self.title)
            .set_description(message)
            .set_level(rfd::MessageLevel::Info)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
