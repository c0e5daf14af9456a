// src/models/note.rs

//! Rich-text notes extracted from documentation comments.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// One classified unit of comment content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Note {
    /// Prose with whitespace collapsed to single spaces
    Paragraph(String),

    /// Preformatted block, kept verbatim
    Pre(String),

    /// Section heading inside a comment
    Heading(String),
}

impl Note {
    /// Plain text rendering.
    pub fn text(&self) -> String {
        match self {
            Note::Paragraph(s) | Note::Heading(s) => s.clone(),
            // Continuation lines are indented; the first follows the caller's indent
            Note::Pre(s) => s.replace('\n', "\n    "),
        }
    }

    /// HTML rendering, body escaped.
    pub fn html(&self) -> String {
        match self {
            Note::Paragraph(s) => format!("<p>{}</p>", escape_html(s)),
            Note::Pre(s) => format!("<pre>{}</pre>", escape_html(s)),
            Note::Heading(s) => format!("<h3>{}</h3>", escape_html(s)),
        }
    }

    /// Markdown rendering.
    pub fn markdown(&self) -> String {
        match self {
            Note::Paragraph(s) => s.clone(),
            Note::Pre(s) => format!("```\n{s}\n```"),
            Note::Heading(s) => format!("### {s}"),
        }
    }

    pub fn is_pre(&self) -> bool {
        matches!(self, Note::Pre(_))
    }
}

/// An ordered sequence of notes, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(pub Vec<Note>);

impl Comment {
    pub fn new(notes: Vec<Note>) -> Self {
        Self(notes)
    }

    /// Plain text rendering; notes separated by a blank line.
    pub fn text(&self) -> String {
        self.0
            .iter()
            .map(Note::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// HTML rendering; one note per line.
    pub fn html(&self) -> String {
        self.0
            .iter()
            .map(Note::html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markdown rendering.
    ///
    /// Notes are separated by a blank line, except on either side of a
    /// fenced block where a single newline is used.
    pub fn markdown(&self) -> String {
        match self.0.as_slice() {
            [] => String::new(),
            [only] => only.markdown(),
            notes => {
                let mut out = String::new();
                for (i, note) in notes.iter().enumerate() {
                    if i > 0 {
                        let sep = if notes[i - 1].is_pre() || note.is_pre() {
                            "\n"
                        } else {
                            "\n\n"
                        };
                        out.push_str(sep);
                    }
                    out.push_str(&note.markdown());
                }
                out
            }
        }
    }
}

impl Deref for Comment {
    type Target = [Note];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Note> for Comment {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Comment {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}
