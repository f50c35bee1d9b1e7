//! External command bridge
//!
//! Code outside the key handling (a suggestion click, a remove button, a
//! script) changes the tags by sending a [`Command`]. Each controller owns
//! its own [`CommandChannel`]; messages are stamped with the channel's id
//! and anything stamped for another channel is dropped, so independent
//! inputs never act on each other's commands.

use crate::model::TagId;
use serde::Deserialize;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use uuid::Uuid;

/// Which tag a remove command refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// Synthetic id of the entry
    Id(TagId),
    /// Rendered element id (`{list_id}_{n}`)
    Element(String),
    /// First entry with this value
    Value(String),
}

/// A request to change the tags from outside the key handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add one or more delimiter-separated tags
    Add(String),
    /// Remove one entry
    Remove(RemoveTarget),
}

/// Loosely-typed payload as sent by markup actions
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawCommand {
    action: Option<String>,
    item_id: Option<String>,
    tag: Option<String>,
}

impl Command {
    /// Parse a JSON payload such as `{"action":"add","tag":"x"}` or
    /// `{"action":"remove","itemId":"tagsList_3"}`.
    ///
    /// Returns `None` for anything malformed or missing the fields its
    /// action needs.
    #[must_use]
    pub fn from_json(payload: &str) -> Option<Self> {
        let raw: RawCommand = match serde_json::from_str(payload) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "dropping unparsable command payload");
                return None;
            }
        };

        match raw.action.as_deref()? {
            "add" => raw.tag.map(Self::Add),
            "remove" => raw
                .item_id
                .filter(|id| !id.is_empty())
                .map(|id| Self::Remove(RemoveTarget::Element(id)))
                .or_else(|| raw.tag.map(|tag| Self::Remove(RemoveTarget::Value(tag)))),
            other => {
                tracing::debug!(action = other, "dropping command with unknown action");
                None
            }
        }
    }
}

/// Instance-unique name of a command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(Uuid);

impl ChannelId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__taginput_{}", self.0.simple())
    }
}

/// A command stamped with the channel it is meant for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub channel: ChannelId,
    pub command: Command,
}

/// Receiving side, owned by one controller
#[derive(Debug)]
pub struct CommandChannel {
    id: ChannelId,
    tx: Sender<Envelope>,
    rx: Receiver<Envelope>,
}

impl CommandChannel {
    /// Create a channel with a freshly generated id
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            id: ChannelId::generate(),
            tx,
            rx,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ChannelId {
        self.id
    }

    /// New sending handle for this channel
    #[must_use]
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            channel: self.id,
            tx: self.tx.clone(),
        }
    }

    /// Take every pending command addressed to this channel, in arrival order
    pub fn drain(&self) -> Vec<Command> {
        self.rx
            .try_iter()
            .filter_map(|envelope| {
                if envelope.channel == self.id {
                    Some(envelope.command)
                } else {
                    tracing::debug!(channel = %envelope.channel, "dropping command for another channel");
                    None
                }
            })
            .collect()
    }
}

impl Default for CommandChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable sending handle
#[derive(Debug, Clone)]
pub struct CommandSender {
    channel: ChannelId,
    tx: Sender<Envelope>,
}

impl CommandSender {
    #[must_use]
    pub const fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Queue a command; `false` if the controller is gone
    pub fn send(&self, command: Command) -> bool {
        self.send_envelope(Envelope {
            channel: self.channel,
            command,
        })
    }

    /// Queue an already-stamped envelope; `false` if the controller is gone
    pub fn send_envelope(&self, envelope: Envelope) -> bool {
        self.tx.send(envelope).is_ok()
    }

    pub fn add(&self, value: impl Into<String>) -> bool {
        self.send(Command::Add(value.into()))
    }

    pub fn remove(&self, target: RemoveTarget) -> bool {
        self.send(Command::Remove(target))
    }

    /// Parse and queue a JSON payload; malformed payloads are dropped
    /// (returns `false`)
    pub fn send_json(&self, payload: &str) -> bool {
        Command::from_json(payload).is_some_and(|command| self.send(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_add_and_remove() {
        assert_eq!(
            Command::from_json(r#"{"action":"add","tag":"rust"}"#),
            Some(Command::Add("rust".into()))
        );
        assert_eq!(
            Command::from_json(r#"{"action":"remove","itemId":"tags_2","tag":""}"#),
            Some(Command::Remove(RemoveTarget::Element("tags_2".into())))
        );
        assert_eq!(
            Command::from_json(r#"{"action":"remove","tag":"rust"}"#),
            Some(Command::Remove(RemoveTarget::Value("rust".into())))
        );
    }

    #[test]
    fn test_from_json_malformed_is_none() {
        assert_eq!(Command::from_json("not json"), None);
        assert_eq!(Command::from_json("{}"), None);
        assert_eq!(Command::from_json(r#"{"action":"add"}"#), None);
        assert_eq!(Command::from_json(r#"{"action":"remove"}"#), None);
        assert_eq!(Command::from_json(r#"{"action":"explode","tag":"x"}"#), None);
        assert_eq!(Command::from_json(r#"{"action":42}"#), None);
    }

    #[test]
    fn test_channel_ids_are_unique() {
        let a = CommandChannel::new();
        let b = CommandChannel::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id().to_string().starts_with("__taginput_"));
    }

    #[test]
    fn test_drain_keeps_order_and_drops_foreign() {
        let channel = CommandChannel::new();
        let other = CommandChannel::new();
        let sender = channel.sender();

        assert!(sender.add("a"));
        assert!(sender.send_envelope(Envelope {
            channel: other.id(),
            command: Command::Add("foreign".into()),
        }));
        assert!(sender.remove(RemoveTarget::Value("a".into())));
        assert!(!sender.send_json("{"));

        assert_eq!(
            channel.drain(),
            vec![
                Command::Add("a".into()),
                Command::Remove(RemoveTarget::Value("a".into())),
            ]
        );
        assert!(channel.drain().is_empty());
        assert!(other.drain().is_empty());
    }

    #[test]
    fn test_send_after_drop_reports_false() {
        let channel = CommandChannel::new();
        let sender = channel.sender();
        drop(channel);
        assert!(!sender.add("late"));
    }
}
