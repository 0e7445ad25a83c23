//! Interaction Wire Types
//!
//! Inbound interaction payloads and outbound responses. The numeric enums
//! here are shared by request parsing, response building and the manifest so
//! the wire values are defined exactly once.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Kind of inbound interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum InteractionType {
    /// Liveness probe from the platform.
    Ping,
    /// Slash command invocation.
    ApplicationCommand,
    /// Any type this server does not handle.
    Other(u64),
}

impl From<u64> for InteractionType {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            other => Self::Other(other),
        }
    }
}

impl From<InteractionType> for u64 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::Other(other) => other,
        }
    }
}

/// Kind of response sent back for an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum InteractionResponseType {
    /// Answer to [`InteractionType::Ping`].
    Pong,
    /// Reply with a channel message.
    ChannelMessageWithSource,
}

impl From<InteractionResponseType> for u8 {
    fn from(value: InteractionResponseType) -> Self {
        match value {
            InteractionResponseType::Pong => 1,
            InteractionResponseType::ChannelMessageWithSource => 4,
        }
    }
}

/// Application command kind advertised in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ApplicationCommandType {
    /// Slash command typed in the chat input.
    ChatInput,
}

impl From<ApplicationCommandType> for u8 {
    fn from(value: ApplicationCommandType) -> Self {
        match value {
            ApplicationCommandType::ChatInput => 1,
        }
    }
}

/// Command option value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum CommandOptionType {
    String,
    Other(u64),
}

impl From<u64> for CommandOptionType {
    fn from(value: u64) -> Self {
        match value {
            3 => Self::String,
            other => Self::Other(other),
        }
    }
}

impl From<CommandOptionType> for u64 {
    fn from(value: CommandOptionType) -> Self {
        match value {
            CommandOptionType::String => 3,
            CommandOptionType::Other(other) => other,
        }
    }
}

bitflags! {
    /// Message flags, serialized as the raw bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u64 {
        /// Only the invoking user can see the message.
        const EPHEMERAL = 1 << 6;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

/// Inbound interaction payload.
///
/// Every field is optional so a payload missing keys still decodes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Interaction {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<InteractionType>,
    pub data: Option<InteractionData>,
    pub action_context: Option<ActionContext>,
}

/// Command invocation details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InteractionData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub options: Option<Vec<InteractionOption>>,
}

/// One name/value argument of a command invocation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InteractionOption {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<CommandOptionType>,
    pub value: Option<Value>,
}

/// Platform context attached to the interaction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionContext {
    pub callback_url: Option<String>,
    pub guild_id: Option<String>,
    pub channel_id: Option<String>,
}

impl Interaction {
    /// Invoked command name, if any.
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref()?.name.as_deref()
    }

    /// Callback URL for the asynchronous reply, if any.
    pub fn callback_url(&self) -> Option<&str> {
        self.action_context.as_ref()?.callback_url.as_deref()
    }
}

/// Response body, used for both the acknowledgment and the callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionResponseData>,
}

/// Message carried by an [`InteractionResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponseData {
    pub content: String,
    pub flags: MessageFlags,
}

impl InteractionResponse {
    /// Channel message visible only to the invoking user.
    pub fn ephemeral_message(content: impl Into<String>) -> Self {
        Self {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(InteractionResponseData {
                content: content.into(),
                flags: MessageFlags::EPHEMERAL,
            }),
        }
    }

    /// Reply to a ping.
    pub const fn pong() -> Self {
        Self {
            kind: InteractionResponseType::Pong,
            data: None,
        }
    }

    /// Message text, if this response carries one.
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.content.as_str())
    }
}
