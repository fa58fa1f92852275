//! Markup-preserving translation of rich text answers.
//!
//! Answers are HTML fragments. The fragment is parsed with html5ever, its
//! text nodes are translated and written back, and the tree is serialized
//! again. Tags, attributes, comments and `<script>`/`<style>` bodies are
//! kept as they are.

use futures::future::try_join_all;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{LocalName, ParseOpts, QualName, namespace_url, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use super::{TranslateError, Translator};

/// Elements whose content is not human-readable text.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Parse `html` as the content of a `<body>` element.
fn parse(html: &str) -> RcDom {
    let context = QualName::new(None, ns!(html), LocalName::from("body"));
    parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![]).one(html)
}

/// Synthetic root whose children are the fragment's nodes.
///
/// Only valid while `dom` is alive: dropping the document detaches
/// every descendant.
fn fragment_root(dom: &RcDom) -> Option<Handle> {
    dom.document.children.borrow().first().cloned()
}

/// Walk the tree in document order and collect every translatable text node.
fn collect_text_nodes(node: &Handle, out: &mut Vec<Handle>) {
    match node.data {
        NodeData::Text { ref contents } => {
            if !contents.borrow().trim().is_empty() {
                out.push(node.clone());
            }
        }
        NodeData::Element { ref name, .. } => {
            if RAW_TEXT_ELEMENTS.contains(&name.local.as_ref()) {
                return;
            }
            for child in node.children.borrow().iter() {
                collect_text_nodes(child, out);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                collect_text_nodes(child, out);
            }
        }
    }
}

fn text_nodes(root: &Handle) -> Vec<Handle> {
    let mut nodes = Vec::new();
    collect_text_nodes(root, &mut nodes);
    nodes
}

fn text_of(node: &Handle) -> String {
    match node.data {
        NodeData::Text { ref contents } => contents.borrow().to_string(),
        _ => String::new(),
    }
}

/// Decoded text of every translatable node, in document order.
fn extract_texts(html: &str) -> Vec<String> {
    let dom = parse(html);
    fragment_root(&dom)
        .map(|root| text_nodes(&root).iter().map(text_of).collect())
        .unwrap_or_default()
}

/// Re-parse `html`, replace its text nodes with `texts` and serialize.
fn replace_texts(html: &str, texts: &[String]) -> Result<String, TranslateError> {
    let dom = parse(html);
    let Some(root) = fragment_root(&dom) else {
        return Ok(String::new());
    };

    let nodes = text_nodes(&root);
    if nodes.len() != texts.len() {
        return Err(TranslateError::Malformed(format!(
            "expected {} text nodes, got {}",
            nodes.len(),
            texts.len()
        )));
    }

    for (node, text) in nodes.iter().zip(texts) {
        if let NodeData::Text { ref contents } = node.data {
            *contents.borrow_mut() = StrTendril::from_slice(text);
        }
    }

    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..SerializeOpts::default()
    };
    serialize(&mut buf, &SerializableHandle::from(root), opts)
        .map_err(|e| TranslateError::Malformed(format!("serialize: {e}")))?;

    String::from_utf8(buf).map_err(|e| TranslateError::Malformed(format!("serialize: {e}")))
}

/// Translate one text node, keeping its surrounding whitespace.
async fn translate_text(
    translator: &dyn Translator,
    text: &str,
    to: &str,
) -> Result<String, TranslateError> {
    let core = text.trim();
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    let translated = translator.translate(core, to).await?;

    Ok(format!("{leading}{translated}{trailing}"))
}

/// Translate every text node of `html` into `to`, concurrently.
///
/// Fails as a whole if any text node fails, so callers never see a
/// half-translated answer.
pub async fn translate_rich_text(
    translator: &dyn Translator,
    html: &str,
    to: &str,
) -> Result<String, TranslateError> {
    let texts = extract_texts(html);

    let translated = try_join_all(
        texts
            .iter()
            .map(|text| translate_text(translator, text, to)),
    )
    .await?;

    replace_texts(html, &translated)
}
