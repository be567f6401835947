//! Spotify domain: a sub-agent over a fixed set of player actions.
//!
//! The player itself is not wired up; every action answers with canned data.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use vox_provider::{FunctionSpec, ParameterSpec, Provider};

use super::{BoundArguments, FunctionHandler, FunctionRegistry};
use crate::agent::{Agent, Resolution};
use crate::context::ContextBuilder;
use crate::{AgentError, Result};

struct Track {
    name: &'static str,
    artist: &'static str,
    album: &'static str,
}

impl Track {
    fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "artist": self.artist,
            "album": self.album,
        })
    }
}

const CURRENT_TRACK: Track = Track {
    name: "Song name",
    artist: "Artist name",
    album: "Album name",
};

const NEXT_TRACK: Track = Track {
    name: "Next song name",
    artist: "Next artist name",
    album: "Next album name",
};

const PREVIOUS_TRACK: Track = Track {
    name: "Previous song name",
    artist: "Previous artist name",
    album: "Previous album name",
};

/// Player actions the sub-agent may select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotifyAction {
    Play,
    Pause,
    Next,
    Previous,
    GetCurrentTrack,
}

impl SpotifyAction {
    pub const ALL: [SpotifyAction; 5] = [
        SpotifyAction::Play,
        SpotifyAction::Pause,
        SpotifyAction::Next,
        SpotifyAction::Previous,
        SpotifyAction::GetCurrentTrack,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpotifyAction::Play => "play",
            SpotifyAction::Pause => "pause",
            SpotifyAction::Next => "next",
            SpotifyAction::Previous => "previous",
            SpotifyAction::GetCurrentTrack => "getCurrentTrack",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SpotifyAction::Play => "Start playing the current track",
            SpotifyAction::Pause => "Pause the current track",
            SpotifyAction::Next => "Play the next track",
            SpotifyAction::Previous => "Play the previous track",
            SpotifyAction::GetCurrentTrack => "Get the current track",
        }
    }

    /// Canned payload for this action
    pub fn result(self) -> Value {
        let track = match self {
            SpotifyAction::Play | SpotifyAction::GetCurrentTrack => Some(&CURRENT_TRACK),
            SpotifyAction::Next => Some(&NEXT_TRACK),
            SpotifyAction::Previous => Some(&PREVIOUS_TRACK),
            SpotifyAction::Pause => None,
        };

        let mut result = json!({
            "function": self.name(),
            "status": "done",
        });
        if let Some(track) = track {
            result["currentTrack"] = track.to_value();
        }
        result
    }
}

/// Registry entry for one player action
pub struct SpotifyActionHandler(pub SpotifyAction);

#[async_trait]
impl FunctionHandler for SpotifyActionHandler {
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::new(self.0.name(), self.0.description())
    }

    async fn call(&self, _args: BoundArguments) -> Result<Option<Value>> {
        Ok(Some(self.0.result()))
    }
}

/// Registry holding every player action
pub fn action_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    for action in SpotifyAction::ALL {
        registry.register(SpotifyActionHandler(action));
    }
    registry
}

/// The `spotify` function offered to the top-level agent. Delegates the
/// request to its own agent restricted to the player actions.
pub struct SpotifyModule<P: Provider> {
    agent: Agent<P>,
}

impl<P: Provider> SpotifyModule<P> {
    pub const NAME: &'static str = "spotify";

    pub fn new(provider: Arc<P>, model: impl Into<String>, context: &ContextBuilder) -> Self {
        Self {
            agent: Agent::new(
                Self::NAME,
                provider,
                model,
                context.spotify_prompt(),
                action_registry(),
            ),
        }
    }

    pub fn agent(&self) -> &Agent<P> {
        &self.agent
    }
}

#[async_trait]
impl<P: Provider + 'static> FunctionHandler for SpotifyModule<P> {
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::new(
            Self::NAME,
            "Spotify assistant used to control the music, get information about the current track and more.",
        )
        .with_parameter(ParameterSpec::string("prompt", "The user request"))
    }

    async fn call(&self, args: BoundArguments) -> Result<Option<Value>> {
        let prompt = args
            .str("prompt")
            .ok_or_else(|| AgentError::InvalidArguments {
                function: Self::NAME.to_string(),
                reason: "'prompt' must be a string".to_string(),
            })?;

        match self.agent.resolve(prompt).await? {
            Resolution::Dispatched { result, .. } => Ok(result),
            Resolution::Answered(text) => {
                // Nothing was done; the summarizer gets an absent result.
                info!("◆ [spotify] no action taken: {}", text);
                Ok(None)
            }
        }
    }
}
