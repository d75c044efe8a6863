//! JSON payloads accepted by the `render` and `boot` commands.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Message shown by `boot` when the payload does not carry one
pub const DEFAULT_BOOT_MESSAGE: &str = "Booting...";

/// Everything the homepage shows
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Payload {
    /// Host the settings page is served from
    pub hostname: String,
    /// Preformatted clock text
    pub time: String,
    /// Todo items in display order
    pub todos: Vec<Todo>,
    /// Photo for the right pane; takes priority over `rss`
    pub image: Option<PathBuf>,
    /// News excerpt for the right pane
    pub rss: Option<RssItem>,
}

/// One todo entry
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Todo {
    /// Item text
    pub text: String,
    /// Completed items are struck through
    #[serde(default)]
    pub done: bool,
}

/// One news story
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RssItem {
    /// Headline
    pub title: String,
    /// Excerpt
    pub text: String,
}

/// What the right half of the homepage shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RightPane<'a> {
    /// A photo, dithered to fit
    Image(&'a Path),
    /// A news story
    News(&'a RssItem),
    /// Nothing
    Blank,
}

impl Payload {
    /// Parses the `render` payload
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The image wins when both an image and a story are present. An empty
    /// image path counts as no image.
    pub fn right_pane(&self) -> RightPane<'_> {
        match (&self.image, &self.rss) {
            (Some(path), _) if !path.as_os_str().is_empty() => RightPane::Image(path),
            (_, Some(item)) => RightPane::News(item),
            _ => RightPane::Blank,
        }
    }
}

/// The `boot` payload
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BootPayload {
    /// Text to center on the panel
    pub message: Option<String>,
}

impl BootPayload {
    /// Parses the `boot` payload
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The message, or [`DEFAULT_BOOT_MESSAGE`]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_BOOT_MESSAGE)
    }
}
