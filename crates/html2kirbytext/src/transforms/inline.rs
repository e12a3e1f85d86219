//! Inline markers: emphasis, inline code and images.

use kirbytext_dom::{Document, Filter, NodeId};

use super::{replace_with_text, wrap_content};
use crate::utilities::non_empty;
use crate::Result;

/// Wrap `<b>` and `<strong>` content in `**`.
pub fn mark_bold(document: &mut Document) -> Result<()> {
    for id in document.find_all(&Filter::tags(&["b", "strong"])) {
        wrap_content(document, id, "**", "**")?;
    }
    Ok(())
}

/// Wrap `<i>` and `<em>` content in `_`.
pub fn mark_italic(document: &mut Document) -> Result<()> {
    for id in document.find_all(&Filter::tags(&["i", "em"])) {
        wrap_content(document, id, "_", "_")?;
    }
    Ok(())
}

/// Wrap every remaining `<code>` in backticks.
pub fn mark_inline_code(document: &mut Document) -> Result<()> {
    for id in document.elements_by_tag("code") {
        wrap_content(document, id, "`", "`")?;
    }
    Ok(())
}

/// Tags an image wrapper may never be, even next to a stray `figcaption`
const PAGE_CONTAINERS: &[&str] = &["body", "html"];

/// Replace every `<img>` with an `(image: ...)` annotation.
///
/// A linking `<a>` or a captioned wrapper is replaced together with the
/// image. Images inside a wrapper that an earlier image already replaced
/// are skipped.
pub fn mark_images(document: &mut Document) -> Result<()> {
    for img in document.elements_by_tag("img") {
        if !document.is_attached(img) {
            continue;
        }
        let Some(parent) = document.parent(img) else {
            continue;
        };

        let (annotation, wraps) = image_annotation(document, img, parent);
        let target = if wraps { parent } else { img };
        replace_with_text(document, target, &annotation)?;
    }
    Ok(())
}

/// Build the annotation and report whether the parent should be replaced.
fn image_annotation(document: &Document, img: NodeId, parent: NodeId) -> (String, bool) {
    let is_linked = document.has_tag(parent, "a");
    let caption = figcaption_text(document, img, parent);

    let mut result = vec![format!(
        "(image: {} alt: {}",
        document.attr(img, "src").unwrap_or_default(),
        document.attr(img, "alt").unwrap_or_default()
    )];
    if let Some(width) = non_empty(document.attr(img, "width")) {
        result.push(format!("width: {width}"));
    }
    if let Some(height) = non_empty(document.attr(img, "height")) {
        result.push(format!("height: {height}"));
    }
    if let Some(class) = non_empty(document.attr(img, "class")) {
        result.push(format!("class: {}", class.trim()));
    }
    if is_linked {
        result.push(format!(
            "link: {}",
            document.attr(parent, "href").unwrap_or_default()
        ));
    }
    let has_caption = caption.is_some();
    if let Some(caption) = caption {
        result.push(format!("caption: {caption}"));
    }

    let wraps = is_linked
        || (has_caption
            && document.is_element(parent)
            && !PAGE_CONTAINERS
                .iter()
                .any(|tag| document.has_tag(parent, tag)));
    (format!("{})", result.join(" ")), wraps)
}

/// Text of the first `<figcaption>` sibling of `img`, if it has any
fn figcaption_text(document: &Document, img: NodeId, parent: NodeId) -> Option<String> {
    document
        .element_children(parent)
        .find(|&sibling| sibling != img && document.has_tag(sibling, "figcaption"))
        .map(|caption| document.text_content(caption))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::test_support::*;

    const SRC: &str = "./path/to/img.jpg";
    const ALT: &str = "The alt text";

    fn image(doc: &mut Document, parent: NodeId, extra: &[(&str, &str)]) -> NodeId {
        let mut attrs = vec![("src", SRC), ("alt", ALT)];
        attrs.extend_from_slice(extra);
        let img = doc.create_element_with_attrs("img", &attrs);
        doc.append_child(parent, img).unwrap();
        img
    }

    fn marked_body(doc: &mut Document) -> String {
        mark_images(doc).unwrap();
        doc.inner_html(doc.body())
    }

    #[test]
    fn test_mark_bold() {
        let mut doc = Document::with_body();
        let body = doc.body();
        let b = child(&mut doc, body, "b", "lorem");
        let strong = child(&mut doc, body, "strong", "ipsum");
        mark_bold(&mut doc).unwrap();
        assert_eq!(doc.text_content(b), "**lorem**");
        assert_eq!(doc.text_content(strong), "**ipsum**");
    }

    #[test]
    fn test_mark_italic() {
        let (mut doc, em) = element_with_texts("em", &["lorem ipsum"]);
        mark_italic(&mut doc).unwrap();
        assert_eq!(doc.text_content(em), "_lorem ipsum_");
    }

    #[test]
    fn test_nested_emphasis_keeps_all_markers() {
        let (mut doc, b) = element_with_texts("b", &["a"]);
        let inner = child(&mut doc, b, "strong", "c");
        let i = child(&mut doc, inner, "i", "d");

        mark_bold(&mut doc).unwrap();
        mark_italic(&mut doc).unwrap();

        assert_eq!(doc.text_content(i), "_d_");
        assert_eq!(doc.text_content(b), "**a**c_d_****");
    }

    #[test]
    fn test_empty_emphasis() {
        let (mut doc, b) = element_with_texts("b", &[]);
        mark_bold(&mut doc).unwrap();
        assert_eq!(doc.text_content(b), "****");
    }

    #[test]
    fn test_mark_inline_code() {
        let (mut doc, code) = element_with_texts("code", &["an inline-code snippet"]);
        mark_inline_code(&mut doc).unwrap();
        assert_eq!(doc.text_content(code), "`an inline-code snippet`");
    }

    #[test]
    fn test_basic_image() {
        let mut doc = Document::with_body();
        let body = doc.body();
        image(&mut doc, body, &[]);
        assert_eq!(marked_body(&mut doc), format!("(image: {SRC} alt: {ALT})"));
    }

    #[test]
    fn test_image_with_dimensions() {
        let mut doc = Document::with_body();
        let body = doc.body();
        image(&mut doc, body, &[("width", "500"), ("height", "300")]);
        assert_eq!(
            marked_body(&mut doc),
            format!("(image: {SRC} alt: {ALT} width: 500 height: 300)")
        );
    }

    #[test]
    fn test_image_with_class() {
        let mut doc = Document::with_body();
        let body = doc.body();
        image(&mut doc, body, &[("class", " awesome-picture ")]);
        assert_eq!(
            marked_body(&mut doc),
            format!("(image: {SRC} alt: {ALT} class: awesome-picture)")
        );
    }

    #[test]
    fn test_image_without_attributes() {
        let mut doc = Document::with_body();
        let body = doc.body();
        let img = doc.create_element("img");
        doc.append_child(body, img).unwrap();
        assert_eq!(marked_body(&mut doc), "(image:  alt: )");
    }

    #[test]
    fn test_linked_image_replaces_anchor() {
        let (mut doc, a) = element_with_texts("a", &["\n  "]);
        doc.set_attr(a, "href", "http://foo.com/big-img.jpg").unwrap();
        image(&mut doc, a, &[]);

        assert_eq!(
            marked_body(&mut doc),
            format!("(image: {SRC} alt: {ALT} link: http://foo.com/big-img.jpg)")
        );
        assert!(!doc.is_attached(a));
    }

    #[test]
    fn test_captioned_image_replaces_figure() {
        let (mut doc, figure) = element_with_texts("figure", &[]);
        image(&mut doc, figure, &[]);
        child(&mut doc, figure, "figcaption", "This image is awesomesauce!");

        assert_eq!(
            marked_body(&mut doc),
            format!("(image: {SRC} alt: {ALT} caption: This image is awesomesauce!)")
        );
    }

    #[test]
    fn test_empty_caption_replaces_only_image() {
        let (mut doc, figure) = element_with_texts("figure", &[]);
        image(&mut doc, figure, &[]);
        child(&mut doc, figure, "figcaption", "");

        mark_images(&mut doc).unwrap();

        assert!(doc.is_attached(figure));
        assert_eq!(
            doc.inner_html(figure),
            format!("(image: {SRC} alt: {ALT})<figcaption></figcaption>")
        );
    }

    #[test]
    fn test_linked_and_captioned_image() {
        let (mut doc, figure) = element_with_texts("figure", &[]);
        let a = doc.create_element_with_attrs("a", &[("href", "/big.jpg")]);
        doc.append_child(figure, a).unwrap();
        image(&mut doc, a, &[]);
        child(&mut doc, figure, "figcaption", "Caption");

        mark_images(&mut doc).unwrap();

        // the caption is not a sibling of the image, so only the link applies
        assert_eq!(
            doc.inner_html(figure),
            format!("(image: {SRC} alt: {ALT} link: /big.jpg)<figcaption>Caption</figcaption>")
        );
    }

    #[test]
    fn test_captioned_link_carries_both_fragments() {
        let (mut doc, a) = element_with_texts("a", &[]);
        doc.set_attr(a, "href", "/big.jpg").unwrap();
        image(&mut doc, a, &[]);
        child(&mut doc, a, "figcaption", "Caption");

        assert_eq!(
            marked_body(&mut doc),
            format!("(image: {SRC} alt: {ALT} link: /big.jpg caption: Caption)")
        );
    }

    #[test]
    fn test_second_image_in_replaced_anchor_is_skipped() {
        let (mut doc, a) = element_with_texts("a", &[]);
        doc.set_attr(a, "href", "/gallery").unwrap();
        image(&mut doc, a, &[]);
        image(&mut doc, a, &[("alt", "ignored")]);

        assert_eq!(
            marked_body(&mut doc),
            format!("(image: {SRC} alt: {ALT} link: /gallery)")
        );
    }

    #[test]
    fn test_stray_caption_never_replaces_body() {
        let mut doc = Document::with_body();
        let body = doc.body();
        image(&mut doc, body, &[]);
        child(&mut doc, body, "figcaption", "Stray");

        assert_eq!(
            marked_body(&mut doc),
            format!("(image: {SRC} alt: {ALT} caption: Stray)<figcaption>Stray</figcaption>")
        );
    }

    #[test]
    fn test_stray_caption_under_document_root() {
        let mut doc = Document::new();
        let root = doc.root();
        image(&mut doc, root, &[]);
        child(&mut doc, root, "figcaption", "Stray");

        mark_images(&mut doc).unwrap();

        assert_eq!(
            doc.inner_html(root),
            format!("(image: {SRC} alt: {ALT} caption: Stray)<figcaption>Stray</figcaption>")
        );
    }

    #[test]
    fn test_only_first_figcaption_counts() {
        let (mut doc, figure) = element_with_texts("figure", &[]);
        image(&mut doc, figure, &[]);
        child(&mut doc, figure, "figcaption", "");
        child(&mut doc, figure, "figcaption", "Later");

        mark_images(&mut doc).unwrap();

        assert!(doc.is_attached(figure));
        assert_eq!(
            doc.inner_html(figure),
            format!("(image: {SRC} alt: {ALT})<figcaption></figcaption><figcaption>Later</figcaption>")
        );
    }
}
