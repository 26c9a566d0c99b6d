// src/services/content.rs

//! Rich-content flattening.
//!
//! Converts a post body into linear text: plain text, line breaks, and
//! references to images, smilies, videos, and links survive; formatting
//! does not. Identical markup always yields identical output.

use scraper::ElementRef;
use scraper::node::Node;

/// Flatten a post body element to normalized plain text.
pub fn content_to_text(root: ElementRef<'_>) -> String {
    render_children(root).concat()
}

/// Text fragments emitted for an element's children, in document order.
fn render_children(element: ElementRef<'_>) -> Vec<String> {
    let mut fragments = Vec::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.text.trim();
                if !trimmed.is_empty() {
                    fragments.push(format!("{trimmed} "));
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    fragments.extend(render_element(child_el));
                }
            }
            _ => {}
        }
    }
    fragments
}

fn render_element(element: ElementRef<'_>) -> Vec<String> {
    let el = element.value();
    match el.name() {
        "br" => vec!["\n".to_string()],
        "img" => {
            let alt = el.attr("alt").unwrap_or("");
            if el.classes().any(|c| c == "smilies") {
                vec![format!("smiley:{alt} ")]
            } else {
                vec![format!("img:{alt} ")]
            }
        }
        "iframe" => vec![format!("video:{} ", el.attr("src").unwrap_or(""))],
        // Link text is discarded; only the target survives.
        "a" => vec![format!("{} ", el.attr("href").unwrap_or(""))],
        "div" if el.classes().any(|c| c == "video-container") => embedded_video_src(element)
            .map(|src| vec![format!("video:{src} ")])
            .unwrap_or_default(),
        _ => render_children(element),
    }
}

/// Source URL of the first iframe below a video wrapper, if any.
fn embedded_video_src(element: ElementRef<'_>) -> Option<String> {
    element.descendants().find_map(|node| match node.value() {
        Node::Element(el) if el.name() == "iframe" => {
            Some(el.attr("src").unwrap_or("").to_string())
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn convert(body: &str) -> String {
        let html = Html::parse_fragment(body);
        let sel = Selector::parse("div.content").unwrap();
        let root = html.select(&sel).next().expect("content div");
        content_to_text(root)
    }

    #[test]
    fn test_text_break_and_smiley() {
        let out = convert(
            r#"<div class="content">Hello<br/>World <img class="smilies" alt=":)"/></div>"#,
        );
        assert_eq!(out, "Hello \nWorld smiley:) ");
    }

    #[test]
    fn test_plain_image_alt() {
        let out = convert(r#"<div class="content"><img src="/x.png" alt="a cat"/></div>"#);
        assert_eq!(out, "img:a cat ");
    }

    #[test]
    fn test_link_keeps_href_only() {
        let out = convert(
            r#"<div class="content">see <a href="https://example.com/page">this page</a></div>"#,
        );
        assert_eq!(out, "see https://example.com/page ");
    }

    #[test]
    fn test_iframe_becomes_video() {
        let out = convert(
            r#"<div class="content"><iframe src="https://video.example/v/1"></iframe></div>"#,
        );
        assert_eq!(out, "video:https://video.example/v/1 ");
    }

    #[test]
    fn test_video_container_supersedes_recursion() {
        let out = convert(
            r#"<div class="content"><div class="video-container"><p>wrapper text</p><iframe src="https://video.example/v/2"></iframe></div></div>"#,
        );
        assert_eq!(out, "video:https://video.example/v/2 ");
    }

    #[test]
    fn test_video_container_without_iframe_emits_nothing() {
        let out = convert(
            r#"<div class="content"><div class="video-container"><p>broken embed</p></div>tail</div>"#,
        );
        assert_eq!(out, "tail ");
    }

    #[test]
    fn test_formatting_is_discarded_but_text_survives() {
        let out = convert(
            r#"<div class="content"><span style="color:red"><strong>bold red</strong></span> plain</div>"#,
        );
        assert_eq!(out, "bold red plain ");
    }

    #[test]
    fn test_deterministic_output() {
        let body = r#"<div class="content">Mix <img alt="pic"/><br/><a href="/l">link</a> <div class="video-container"><iframe src="v"></iframe></div></div>"#;
        assert_eq!(convert(body), convert(body));
        assert_eq!(convert(body), "Mix img:pic \n/l video:v ");
    }
}
