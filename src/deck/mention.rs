use teloxide::types::{Message, MessageEntityKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
    pub mentions: Vec<String>,
}

impl InboundMessage {
    #[cfg(test)]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mentions: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_mentions(mut self, mentions: Vec<String>) -> Self {
        self.mentions = mentions;
        self
    }

    pub fn from_message(msg: &Message) -> Self {
        let text = msg.text().or_else(|| msg.caption()).unwrap_or_default();
        let entities = msg
            .parse_entities()
            .or_else(|| msg.parse_caption_entities())
            .unwrap_or_default();

        let mut mentions = Vec::new();
        for entity in entities {
            match entity.kind() {
                MessageEntityKind::Mention => {
                    mentions.push(entity.text().trim_start_matches('@').to_string());
                }
                MessageEntityKind::TextMention { user } => {
                    mentions.push(user.id.0.to_string());
                    if let Some(username) = &user.username {
                        mentions.push(username.clone());
                    }
                }
                _ => {}
            }
        }

        Self {
            text: text.to_string(),
            mentions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotAccount {
    username: Option<String>,
    user_id: Option<u64>,
}

impl BotAccount {
    pub fn new(username: Option<String>, user_id: Option<u64>) -> Self {
        let username = username
            .map(|name| normalize_handle(&name))
            .filter(|name| !name.is_empty());
        Self { username, user_id }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    pub fn is_mentioned(&self, inbound: &InboundMessage) -> bool {
        let listed = inbound.mentions.iter().any(|mention| {
            let mention = normalize_handle(mention);
            self.username.as_deref() == Some(mention.as_str())
                || self
                    .user_id
                    .is_some_and(|user_id| mention == user_id.to_string())
        });
        if listed {
            return true;
        }

        // Entity parsing can miss mentions (forwarded text, edited captions).
        self.username
            .as_deref()
            .is_some_and(|username| contains_handle(&inbound.text, username))
    }
}

fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_lowercase()
}

fn contains_handle(text: &str, username: &str) -> bool {
    let haystack = text.to_lowercase();
    let needle = format!("@{}", username);
    haystack.match_indices(&needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        before.is_none_or(|ch| !is_handle_char(ch)) && after.is_none_or(|ch| !is_handle_char(ch))
    })
}

fn is_handle_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
