//! Ordered stage list for a conversion.

use indexmap::IndexMap;
use kirbytext_dom::Document;

use crate::service::ConvertOptions;
use crate::transforms::{
    mark_bold, mark_code_blocks, mark_headlines, mark_images, mark_inline_code, mark_italic,
    mark_links, mark_lists, mark_quotes, mark_ruler, mark_video_embeds, normalize_empty_lines,
    normalize_whitespace, remove_elements, remove_leading_whitespace, LinkKind, ListKind,
    TextExtraction,
};
use crate::Result;

/// Type alias for stage functions
pub type TransformFn = Box<dyn Fn(&mut Document) -> Result<()> + Send + Sync>;

/// Name of the stage that runs the caller's transform
pub const CUSTOM_STAGE: &str = "custom";

/// Named stages run in insertion order, followed by the text flattening.
pub struct Pipeline {
    stages: IndexMap<String, TransformFn>,
    text_extraction: TextExtraction,
}

impl Pipeline {
    /// A pipeline with no stages
    pub fn empty(text_extraction: TextExtraction) -> Self {
        Self {
            stages: IndexMap::new(),
            text_extraction,
        }
    }

    /// The standard stage order with an identity custom stage
    pub fn standard(options: &ConvertOptions) -> Self {
        let mut pipeline = Self::empty(options.text_extraction);

        let sanitize_tags = options.sanitize_tags.clone();
        pipeline.push("sanitize", move |doc| remove_elements(doc, &sanitize_tags));
        pipeline.push("remove-leading-whitespace", remove_leading_whitespace);
        pipeline.push(CUSTOM_STAGE, |_| Ok(()));
        pipeline.push("normalize-whitespace", normalize_whitespace);

        pipeline.push("mark-headlines", mark_headlines);
        pipeline.push("mark-images", mark_images);
        pipeline.push("mark-bold", mark_bold);
        pipeline.push("mark-italic", mark_italic);
        pipeline.push("mark-ruler", mark_ruler);
        pipeline.push("mark-quotes", mark_quotes);
        pipeline.push("mark-code-blocks", mark_code_blocks);
        pipeline.push("mark-inline-code", mark_inline_code);

        for kind in [ListKind::Unordered, ListKind::Ordered] {
            pipeline.push(format!("mark-lists:{}", kind.tag_name()), move |doc| {
                mark_lists(doc, kind)
            });
        }

        // Scheme-specific anchors first; the generic pass takes what is left.
        for kind in [LinkKind::Mail, LinkKind::Tel, LinkKind::Link] {
            let filter = kind.filter();
            pipeline.push(format!("mark-links:{}", kind.name()), move |doc| {
                mark_links(doc, &filter, kind.name())
            });
        }

        for provider in &options.video_providers {
            let provider = provider.clone();
            pipeline.push(format!("mark-video-embeds:{provider}"), move |doc| {
                mark_video_embeds(doc, &provider)
            });
        }

        pipeline
    }

    /// Append a stage, or replace the stage of the same name in place
    pub fn push<F>(&mut self, name: impl Into<String>, stage: F) -> &mut Self
    where
        F: Fn(&mut Document) -> Result<()> + Send + Sync + 'static,
    {
        self.stages.insert(name.into(), Box::new(stage));
        self
    }

    /// Install the caller's transform at the fixed custom position
    pub fn set_custom<F>(&mut self, stage: F) -> &mut Self
    where
        F: Fn(&mut Document) -> Result<()> + Send + Sync + 'static,
    {
        self.push(CUSTOM_STAGE, stage)
    }

    /// Stage names in run order
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    /// Run every stage against `document`, then flatten it to text
    pub fn run(&self, mut document: Document) -> Result<String> {
        for (name, stage) in &self.stages {
            log::debug!("running stage `{name}`");
            stage(&mut document)?;
        }
        Ok(normalize_empty_lines(&document, self.text_extraction))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.keys().collect::<Vec<_>>())
            .field("text_extraction", &self.text_extraction)
            .finish()
    }
}
