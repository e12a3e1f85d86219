//! Video embed markers.

use std::fmt;
use std::str::FromStr;

use kirbytext_dom::{Document, Filter, NodeId};

use super::replace_with_text;
use crate::utilities::non_empty;
use crate::{ConvertError, Result};

/// Video hosts whose `<iframe>` embeds are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProvider {
    YouTube,
    Vimeo,
}

impl VideoProvider {
    pub const ALL: [VideoProvider; 2] = [VideoProvider::YouTube, VideoProvider::Vimeo];

    /// Name used both in the annotation and to match the embed's `src`
    pub fn as_str(self) -> &'static str {
        match self {
            VideoProvider::YouTube => "youtube",
            VideoProvider::Vimeo => "vimeo",
        }
    }

    /// `youtube or vimeo`
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|provider| provider.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl fmt::Display for VideoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoProvider {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| ConvertError::UnsupportedProvider {
                provider: s.to_string(),
                allowed: Self::allowed(),
            })
    }
}

/// Replace every `<iframe>` whose `src` mentions `provider` with a
/// `(<provider>: <src>)` annotation.
///
/// Fails before touching the document when `provider` is not one of
/// [`VideoProvider::ALL`].
pub fn mark_video_embeds(document: &mut Document, provider: &str) -> Result<()> {
    let provider: VideoProvider = provider.parse()?;
    let filter = Filter::attr_contains("iframe", "src", provider.as_str());
    for embed in document.find_all(&filter) {
        if !document.is_attached(embed) {
            continue;
        }
        let annotation = embed_annotation(document, embed, provider);
        replace_with_text(document, embed, &annotation)?;
    }
    Ok(())
}

fn embed_annotation(document: &Document, embed: NodeId, provider: VideoProvider) -> String {
    let mut result = vec![format!(
        "({provider}: {}",
        document.attr(embed, "src").unwrap_or_default()
    )];
    if let Some(width) = non_empty(document.attr(embed, "width")) {
        result.push(format!("width: {width}"));
    }
    if let Some(height) = non_empty(document.attr(embed, "height")) {
        result.push(format!("height: {height}"));
    }
    format!("{})", result.join(" "))
}
