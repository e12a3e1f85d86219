//! Html2Kirbytext - the main entry point for HTML to Kirbytext conversion.

use kirbytext_dom::Document;

use crate::pipeline::Pipeline;
use crate::transforms::TextExtraction;
use crate::Result;

/// Options for Html2Kirbytext
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Elements removed before anything else runs
    pub sanitize_tags: Vec<String>,

    /// Video providers to mark, in order. Names are validated when the
    /// embed stage runs.
    pub video_providers: Vec<String>,

    /// How the final text is read from the body
    pub text_extraction: TextExtraction,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sanitize_tags: vec!["script".to_string()],
            video_providers: vec!["youtube".to_string(), "vimeo".to_string()],
            text_extraction: TextExtraction::Blocks,
        }
    }
}

/// The main service for converting documents to Kirbytext
#[derive(Debug)]
pub struct Html2Kirbytext {
    options: ConvertOptions,
    pipeline: Pipeline,
}

impl Html2Kirbytext {
    /// Create a new Html2Kirbytext with default options
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    /// Create an Html2Kirbytext with custom options
    pub fn with_options(options: ConvertOptions) -> Self {
        let pipeline = Pipeline::standard(&options);
        Self { options, pipeline }
    }

    /// Run `transform` after leading whitespace is stripped and before any
    /// block normalization or marking
    pub fn custom_transform<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(&mut Document) -> Result<()> + Send + Sync + 'static,
    {
        self.pipeline.set_custom(transform);
        self
    }

    /// Convert a parsed document to Kirbytext
    pub fn convert(&self, document: Document) -> Result<String> {
        self.pipeline.run(document)
    }

    /// Parse an HTML string and convert it to Kirbytext
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        let document = crate::html::parse_html(html)?;
        self.convert(document)
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl Default for Html2Kirbytext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertError;

    fn sample() -> Document {
        let mut doc = Document::with_body();
        let body = doc.body();
        let h1 = doc.create_element("h1");
        let title = doc.create_text("Title");
        doc.append_child(body, h1).unwrap();
        doc.append_child(h1, title).unwrap();

        let p = doc.create_element("p");
        let hello = doc.create_text("Hello ");
        let b = doc.create_element("b");
        let world = doc.create_text("world");
        doc.append_child(body, p).unwrap();
        doc.append_child(p, hello).unwrap();
        doc.append_child(p, b).unwrap();
        doc.append_child(b, world).unwrap();
        doc
    }

    #[test]
    fn test_simple_document() {
        let service = Html2Kirbytext::new();
        let result = service.convert(sample()).unwrap();
        assert_eq!(result, "# Title\nHello **world**");
    }

    #[test]
    fn test_raw_text_extraction() {
        let options = ConvertOptions {
            text_extraction: TextExtraction::Raw,
            ..Default::default()
        };
        let service = Html2Kirbytext::with_options(options);
        let result = service.convert(sample()).unwrap();
        assert_eq!(result, "# TitleHello **world**");
    }

    #[test]
    fn test_custom_transform_runs_before_markers() {
        let mut service = Html2Kirbytext::new();
        service.custom_transform(|doc| {
            for b in doc.elements_by_tag("b") {
                let em = doc.create_element("em");
                for child in doc.children(b).to_vec() {
                    doc.append_child(em, child)?;
                }
                doc.replace(b, em)?;
            }
            Ok(())
        });
        let result = service.convert(sample()).unwrap();
        assert_eq!(result, "# Title\nHello _world_");
    }

    #[test]
    fn test_custom_transform_errors_abort() {
        let mut service = Html2Kirbytext::new();
        service.custom_transform(|doc| {
            let orphan = doc.create_element("p");
            let text = doc.create_text("x");
            doc.replace(orphan, text)?;
            Ok(())
        });
        assert!(matches!(
            service.convert(sample()),
            Err(ConvertError::Dom(_))
        ));
    }

    #[test]
    fn test_unsupported_provider_in_options() {
        let options = ConvertOptions {
            video_providers: vec!["myvideo".to_string()],
            ..Default::default()
        };
        let service = Html2Kirbytext::with_options(options);
        let err = service.convert(sample()).unwrap_err();
        assert!(err.to_string().starts_with("myvideo is not"));
    }

    #[test]
    fn test_extra_sanitized_tags() {
        let mut doc = sample();
        let body = doc.body();
        let style = doc.create_element("style");
        let css = doc.create_text("b { color: red }");
        doc.append_child(body, style).unwrap();
        doc.append_child(style, css).unwrap();

        let options = ConvertOptions {
            sanitize_tags: vec!["script".to_string(), "style".to_string()],
            ..Default::default()
        };
        let result = Html2Kirbytext::with_options(options).convert(doc).unwrap();
        assert_eq!(result, "# Title\nHello **world**");
    }
}
