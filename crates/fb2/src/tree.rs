//! Minimal element tree built from a quick-xml event stream.
//!
//! Element names are stored by their *local* name: any namespace prefix is
//! dropped while building the tree, so `<fb:description>` and
//! `<description>` are queried identically.

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    pub(crate) name: String,
    /// Text before the first child element (ElementTree's `.text`).
    text: String,
    pub(crate) children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Self::default()
        }
    }

    /// Trimmed text content, `None` when empty.
    pub(crate) fn text(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|t| !t.is_empty())
    }

    fn push_text(&mut self, text: &str) {
        // Anything after the first child is the child's tail, not our text.
        if self.children.is_empty() {
            self.text.push_str(text);
        }
    }

    /// Finds the first element, in document order, reached by following
    /// `path` through child names.
    pub(crate) fn find(&self, path: &[&str]) -> Option<&Element> {
        let Some((head, rest)) = path.split_first() else {
            return Some(self);
        };
        self.children.iter().filter(|child| child.name == *head).find_map(|child| child.find(rest))
    }
}

/// Parse a complete document and return its root element.
pub(crate) fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().or_raise(|| ErrorKind::MalformedXml(position))?;
        match event {
            Event::Start(start) => stack.push(Element::from_start(&start)),
            Event::Empty(start) => attach(&mut stack, &mut root, Element::from_start(&start), position)?,
            Event::End(_) => {
                let element = stack.pop().ok_or_raise(|| ErrorKind::MalformedXml(position))?;
                attach(&mut stack, &mut root, element, position)?;
            },
            Event::Text(text) => match stack.last_mut() {
                Some(current) => {
                    let text = text.unescape().or_raise(|| ErrorKind::MalformedXml(position))?;
                    current.push_text(&text);
                },
                // Junk after the document element.
                None if root.is_some() && !text.iter().all(u8::is_ascii_whitespace) => {
                    exn::bail!(ErrorKind::MalformedXml(position))
                },
                None => {},
            },
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&data));
                }
            },
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing we extract.
            _ => {},
        }
    }
    if !stack.is_empty() {
        exn::bail!(ErrorKind::MalformedXml(reader.buffer_position()));
    }
    root.ok_or_raise(|| ErrorKind::MalformedXml(reader.buffer_position()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element, position: usize) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        // A second top-level element.
        None => exn::bail!(ErrorKind::MalformedXml(position)),
    }
    Ok(())
}
