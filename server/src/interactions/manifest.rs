//! Action Manifest
//!
//! Static description of the `/token-tracker` command served at
//! `GET /token-tracker/metadata`.

use serde::Serialize;

use super::types::{ApplicationCommandType, CommandOptionType, InteractionType};

/// Command name registered with the platform.
pub const COMMAND_NAME: &str = "token-tracker";

/// Name of the single command option.
pub const TOKEN_NAME_OPTION: &str = "token-name";

/// Top-level metadata document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub manifest: Manifest,
    pub supported_interactions: Vec<SupportedInteraction>,
    pub application_commands: Vec<ApplicationCommand>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub app_id: &'static str,
    pub developer: &'static str,
    pub name: &'static str,
    pub platforms: Vec<&'static str>,
    pub short_name: &'static str,
    pub version: ManifestVersion,
    pub website: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestVersion {
    pub name: &'static str,
}

/// Interaction types and command names the action accepts.
#[derive(Debug, Clone, Serialize)]
pub struct SupportedInteraction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub names: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCommand {
    pub metadata: CommandMetadata,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ApplicationCommandType,
    pub description: &'static str,
    pub options: Vec<ApplicationCommandOption>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMetadata {
    pub name: &'static str,
    pub short_name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationCommandOption {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    pub required: bool,
}

/// Build the manifest for the token tracker action.
pub fn token_tracker_metadata() -> Metadata {
    Metadata {
        manifest: Manifest {
            app_id: COMMAND_NAME,
            developer: "collab.land",
            name: "tokenTracker",
            platforms: vec!["discord"],
            short_name: COMMAND_NAME,
            version: ManifestVersion { name: "0.0.1" },
            website: "https://collab.land",
            description: "Look up live market data for a crypto token",
        },
        supported_interactions: vec![SupportedInteraction {
            kind: InteractionType::ApplicationCommand,
            names: vec![COMMAND_NAME],
        }],
        application_commands: vec![ApplicationCommand {
            metadata: CommandMetadata {
                name: "tokenTracker",
                short_name: COMMAND_NAME,
            },
            name: COMMAND_NAME,
            kind: ApplicationCommandType::ChatInput,
            description: "/token-tracker",
            options: vec![ApplicationCommandOption {
                name: TOKEN_NAME_OPTION,
                description: "Name, symbol or id of the token",
                kind: CommandOptionType::String,
                required: true,
            }],
        }],
    }
}
