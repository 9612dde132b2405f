use std::fmt;

use regex::Regex;
use serde::Deserialize;

use super::mention::{BotAccount, InboundMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerMode {
    StrictPrefix,
    Anywhere,
    MentionGated,
}

impl TriggerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrictPrefix => "strict-prefix",
            Self::Anywhere => "anywhere",
            Self::MentionGated => "mention-gated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCode(String);

impl DeckCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TriggerDetector {
    mode: TriggerMode,
    command_prefix: String,
    prefixed_pattern: Regex,
    code_pattern: Regex,
    account: BotAccount,
}

impl TriggerDetector {
    pub fn new(
        mode: TriggerMode,
        command_prefix: &str,
        code_pattern: &str,
        account: BotAccount,
    ) -> Result<Self, regex::Error> {
        let code_regex = Regex::new(code_pattern)?;
        // Group 1 is the code itself; the prefix is anchored at the start of the message.
        let prefixed_regex = Regex::new(&format!(
            "^{}({})",
            regex::escape(command_prefix),
            code_pattern
        ))?;

        Ok(Self {
            mode,
            command_prefix: command_prefix.to_string(),
            prefixed_pattern: prefixed_regex,
            code_pattern: code_regex,
            account,
        })
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }

    pub fn account(&self) -> &BotAccount {
        &self.account
    }

    pub fn detect(&self, message: &str, mentioned: Option<bool>) -> Option<DeckCode> {
        match self.mode {
            TriggerMode::StrictPrefix => self
                .prefixed_pattern
                .captures(message.trim())
                .and_then(|captures| captures.get(1))
                .filter(|code| !code.is_empty())
                .map(|code| DeckCode::new(code.as_str())),
            TriggerMode::Anywhere => self.extract_code(message),
            TriggerMode::MentionGated => {
                if mentioned != Some(true) {
                    return None;
                }
                self.extract_code(message)
            }
        }
    }

    pub fn detect_inbound(&self, inbound: &InboundMessage) -> Option<DeckCode> {
        let mentioned = match self.mode {
            TriggerMode::MentionGated => Some(self.account.is_mentioned(inbound)),
            TriggerMode::StrictPrefix | TriggerMode::Anywhere => None,
        };
        self.detect(&inbound.text, mentioned)
    }

    pub fn extract_code(&self, text: &str) -> Option<DeckCode> {
        self.code_pattern
            .find_iter(text)
            .find(|code| !code.is_empty())
            .map(|code| DeckCode::new(code.as_str()))
    }
}
