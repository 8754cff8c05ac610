//! Preview extraction for listing pages.
//!
//! A preview is the first few top-level elements of a note's rendered HTML,
//! without the leading `<h1>` (listings print the title themselves).

use html5ever::{
  LocalName, Namespace, ParseOpts, QualName, parse_fragment,
  serialize::{SerializeOpts, TraversalScope, serialize},
  tendril::TendrilSink as _,
};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Number of elements kept when callers don't ask for a specific count.
pub const DEFAULT_PREVIEW_ELEMENTS: usize = 2;

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Extract up to `limit` top-level elements from `html`.
///
/// Text and comment nodes between elements are dropped and do not count
/// towards `limit`. When no element survives (a lone heading, plain text,
/// garbage markup) the input is returned unchanged so a listing never shows
/// an empty entry.
pub fn preview(html: &str, limit: usize) -> String {
  // The dom must outlive every handle taken from it: dropping an rcdom node
  // detaches the children of all its descendants.
  let dom = parse_body_fragment(html);

  // The fragment parser hangs everything under a synthetic `<html>` root.
  let Some(root) = dom.document.children.borrow().first().cloned() else {
    return html.to_owned();
  };
  let nodes = root.children.borrow();

  let mut out = String::new();
  let mut found = 0;

  for (idx, node) in nodes.iter().enumerate() {
    if idx == 0 && is_element(node, "h1") {
      continue;
    }
    if found >= limit {
      break;
    }
    if !matches!(node.data, NodeData::Element { .. }) {
      continue;
    }
    match outer_html(node) {
      Ok(s) => {
        out.push_str(&s);
        found += 1;
      }
      Err(e) => {
        tracing::warn!(error = %e, "skipping preview node that failed to serialise");
      }
    }
  }

  if found == 0 { html.to_owned() } else { out }
}

/// Parse `html` as the children of a `<body>` element.
fn parse_body_fragment(html: &str) -> RcDom {
  let context = QualName::new(None, Namespace::from(HTML_NS), LocalName::from("body"));
  parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![]).one(html)
}

fn is_element(node: &Handle, local: &str) -> bool {
  match &node.data {
    NodeData::Element { name, .. } => &*name.local == local,
    _ => false,
  }
}

fn outer_html(node: &Handle) -> Result<String, std::io::Error> {
  let mut buf = Vec::new();
  let opts = SerializeOpts {
    traversal_scope: TraversalScope::IncludeNode,
    ..Default::default()
  };
  serialize(&mut buf, &SerializableHandle::from(node.clone()), opts)?;
  String::from_utf8(buf)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
