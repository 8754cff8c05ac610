//! HTML page templates.
//!
//! The stylesheet is a process-wide constant; every page shares the same
//! chrome via [`layout`]. Dynamic text is escaped by maud; only stored note
//! HTML is inserted verbatim.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use til_core::record::{Record, TopicCount};

use crate::Settings;

const STYLESHEET: &str = r#"
html {
  padding: 0;
  margin: 0;
}
body {
  font-family: sans-serif;
  margin: 0;
}
p.footer-actions {
  font-size: 0.8rem;
}
a.topic {
  font-size: 0.8rem;
  padding: 0.25rem;
  background-color: #FDB913;
  text-decoration: none;
  color: #000;
}
pre {
  white-space: pre-wrap;
}
pre[lang=wide] {
  white-space: pre;
  overflow: auto;
}
nav {
  text-align: left;
  background: #FDB913;
  color: black;
}
nav p {
  display: block;
  margin: 0;
  padding: 4px 0px 4px 2em;
}
nav a:link,
nav a:visited,
nav a:hover,
nav a:focus,
nav a:active {
  color: black;
  text-decoration: none;
}
section.body {
  padding: 0.5em 2em;
  max-width: 800px;
}
@media (max-width: 600px) {
  section.body {
    padding: 0em 1em;
  }
  nav p {
    padding: 4px 0px 4px 1em;
  }
}
a, pre, code {
  overflow-wrap: break-word;
}
table {
  border-collapse: collapse;
}
th, td {
  padding: 0.3em;
  border: 1px solid #D3D3D3;
  word-wrap: anywhere;
}
th {
  background-color: #eee;
}
ul.tils {
  padding-left: 0;
  list-style-type: none;
}
blockquote {
  margin: 1em 0;
  border-left: 0.75em solid #9e6bb52e;
  padding-left: 0.75em;
}
"#;

const LISTING_DATE: &str = "%Y-%m-%d";
const FOOTER_TIME: &str = "%Y-%m-%d %H:%M UTC";

fn layout(site: &Settings, title: &str, content: Markup) -> Markup {
  html! {
    (DOCTYPE)
    html {
      head {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        title { (title) }
        style { (PreEscaped(STYLESHEET)) }
      }
      body {
        nav {
          p { a href="/" { (site.site_title) } }
        }
        section.body { (content) }
      }
    }
  }
}

/// Notes with their (usually previewed) HTML and a link to the full page.
fn listing(notes: &[Record]) -> Markup {
  html! {
    ul.tils {
      @for note in notes {
        li {
          h3 {
            a.topic href=(format!("/{}", note.topic)) { (note.topic) }
            " "
            a href=(format!("/{}", note.href())) { (note.title) }
            " - "
            (note.created_at.format(LISTING_DATE))
          }
          (PreEscaped(&note.html))
          a style="font-size: 0.8rem;" href=(format!("/{}", note.href())) { "Continue reading" }
        }
      }
    }
  }
}

/// `/`: topic index and the most recent notes.
pub fn index(site: &Settings, counts: &[TopicCount], notes: &[Record]) -> Markup {
  layout(site, &site.site_title, html! {
    h1 { (site.site_title) }
    @if !site.repo_url.is_empty() {
      p {
        "A list of things I've learned and collected in "
        a href=(site.repo_url) { (site.repo_url) }
        "."
      }
    }
    p {
      strong { "Topics:" }
      " "
      @for (i, count) in counts.iter().enumerate() {
        @if i > 0 { " · " }
        a href=(format!("/{}", count.topic)) { (count.topic) }
        " "
        (count.count)
      }
    }
    h2 { "Recent TILs" }
    (listing(notes))
  })
}

/// `/{topic}`: the most recent notes in one topic.
pub fn topic(site: &Settings, topic: &str, notes: &[Record]) -> Markup {
  let title = format!("{}: {topic}", site.site_title);
  layout(site, &title, html! {
    h1 { (title) }
    @if notes.is_empty() {
      p { "Nothing here yet." }
    }
    (listing(notes))
  })
}

/// `/{topic}/{slug}`: a full note with edit and history links.
pub fn note(site: &Settings, note: &Record) -> Markup {
  layout(site, &note.title, html! {
    (PreEscaped(&note.html))
    hr;
    p."footer-actions" {
      "Created at " (note.created_at.format(FOOTER_TIME))
      " · Updated at " (note.updated_at.format(FOOTER_TIME))
      " · "
      a href=(note.url) { "Edit" }
      @if let Some(history) = site.history_url(&note.path) {
        " · "
        a href=(history) { "History" }
      }
    }
  })
}

pub fn not_found() -> Markup {
  html! {
    (DOCTYPE)
    html {
      head { title { "Not found" } }
      body { h1 { "Not found" } }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn site() -> Settings {
    Settings {
      repo_url: "https://github.com/someone/til".into(),
      ..Settings::default()
    }
  }

  fn record() -> Record {
    Record {
      created_at: Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap(),
      updated_at: Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
      path:       "git/rebase.md".into(),
      slug:       "rebase".into(),
      topic:      "git".into(),
      title:      "Rebase <onto>".into(),
      url:        "https://github.com/someone/til/blob/main/git/rebase.md".into(),
      body:       String::new(),
      html:       "<h1>Rebase</h1><p>Use <code>--onto</code>.</p>".into(),
    }
  }

  #[test]
  fn listing_escapes_title_and_keeps_html() {
    let page = index(&site(), &[], &[record()]).into_string();
    assert!(page.contains("Rebase &lt;onto&gt;"), "{page}");
    assert!(page.contains("<p>Use <code>--onto</code>.</p>"), "{page}");
    assert!(page.contains("href=\"/git/rebase\""), "{page}");
    assert!(page.contains("2024-03-09"), "{page}");
  }

  #[test]
  fn topics_are_separated() {
    let counts = [
      TopicCount { topic: "git".into(), count: 3 },
      TopicCount { topic: "sql".into(), count: 1 },
    ];
    let page = index(&site(), &counts, &[]).into_string();
    assert!(page.contains("<a href=\"/git\">git</a> 3 · <a href=\"/sql\">sql</a> 1"), "{page}");
  }

  #[test]
  fn note_footer_links() {
    let page = note(&site(), &record()).into_string();
    assert!(page.contains("Created at 2024-03-09 08:30 UTC"), "{page}");
    assert!(page.contains("Updated at 2024-04-01 12:00 UTC"), "{page}");
    assert!(page.contains("href=\"https://github.com/someone/til/blob/main/git/rebase.md\""));
    assert!(page.contains("href=\"https://github.com/someone/til/commits/main/git/rebase.md\""));
  }
}
