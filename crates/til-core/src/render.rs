//! Markdown → HTML rendering.

use pulldown_cmark::{Options, Parser, html};

use crate::Result;

/// Converts a note body to HTML.
///
/// Implementations must be deterministic: the same markdown always yields the
/// same HTML, so a record's `html` stays a function of its `body`. An `Err`
/// is treated by the sync engine as fatal for the whole run.
pub trait Renderer {
  fn render(&self, path: &str, markdown: &str) -> Result<String>;
}

/// Plain CommonMark via `pulldown-cmark`, with no dialect extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

impl Renderer for CommonMark {
  fn render(&self, _path: &str, markdown: &str) -> Result<String> {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    Ok(out)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_heading_and_paragraphs() {
    let html = CommonMark
      .render("t/n.md", "# Title\n\nFirst.\n\nSecond.")
      .unwrap();
    assert_eq!(html, "<h1>Title</h1>\n<p>First.</p>\n<p>Second.</p>\n");
  }

  #[test]
  fn tables_are_not_enabled() {
    let html = CommonMark.render("t/n.md", "| a |\n|---|\n| b |").unwrap();
    assert!(!html.contains("<table>"), "{html}");
  }
}
