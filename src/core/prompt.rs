//! Capabilities des Hosts: Bestätigungsdialoge, Hinweise und Uhrzeit.

use std::collections::VecDeque;

/// Bestätigungs- und Hinweisdialoge des Hosts.
pub trait Prompt {
    /// Stellt eine Ja/Nein-Frage. `true` = bestätigt.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Zeigt eine Hinweismeldung an.
    fn notify(&mut self, message: &str);
}

/// Zeitquelle für Klick-Zeitstempel (Millisekunden seit Unix-Epoche).
pub trait Clock: Send + Sync {
    /// Aktueller Zeitpunkt in Millisekunden.
    fn now_millis(&self) -> i64;
}

/// Systemuhr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Vorab geskriptete Antworten, für Tests und Headless-Betrieb.
///
/// Ist die Antwortliste leer, wird `default_answer` verwendet.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    default_answer: bool,
    /// Alle gestellten Fragen in Reihenfolge
    pub asked: Vec<String>,
    /// Alle angezeigten Hinweise in Reihenfolge
    pub notices: Vec<String>,
}

impl ScriptedPrompt {
    /// Beantwortet jede Frage mit `answer`.
    pub fn always(answer: bool) -> Self {
        Self {
            default_answer: answer,
            ..Self::default()
        }
    }

    /// Beantwortet die Fragen der Reihe nach, danach mit `false`.
    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
