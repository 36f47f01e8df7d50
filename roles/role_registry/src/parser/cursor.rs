//! Depth-tracked cursor over a parsed element tree.
//!
//! The cursor flattens a document into a pre-order stream of element start
//! and end events, each tagged with its depth. Parsers never recurse into
//! the reader: a parser captures its starting depth on entry and loops on
//! [`ElementCursor::advance`] until it sees an end event at or above that
//! depth, which is its own closing boundary. Text and comment nodes are
//! not part of the stream.

use roxmltree::{Document, Node};

/// One step of the element stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The cursor moved onto the start of an element.
    Start,

    /// The cursor moved onto the end of an element.
    End,

    /// The input is exhausted.
    Eof,
}

/// Sequential, depth-aware reader over a document's elements.
pub struct ElementCursor<'a, 'input: 'a> {
    events: Vec<(Event, Option<Node<'a, 'input>>, usize)>,
    next: usize,
    current: Option<(Event, Option<Node<'a, 'input>>, usize)>,
}

impl<'a, 'input: 'a> ElementCursor<'a, 'input> {
    /// Create a cursor positioned before the document's first element.
    pub fn new(document: &'a Document<'input>) -> Self {
        let mut events = Vec::new();
        for child in document.root().children().filter(Node::is_element) {
            flatten(child, 1, &mut events);
        }
        Self {
            events,
            next: 0,
            current: None,
        }
    }

    /// Move to the next event and return its kind.
    ///
    /// Once the input is exhausted every further call returns
    /// [`Event::Eof`].
    pub fn advance(&mut self) -> Event {
        if self.next < self.events.len() {
            let event = self.events[self.next];
            self.current = Some(event);
            self.next += 1;
            event.0
        } else {
            self.current = Some((Event::Eof, None, 0));
            Event::Eof
        }
    }

    /// The name of the element the cursor rests on, or `""` when the
    /// cursor is before the first element or past the end.
    pub fn name(&self) -> &'a str {
        match self.current {
            Some((_, Some(node), _)) => node.tag_name().name(),
            _ => "",
        }
    }

    /// Look up an attribute of the element the cursor rests on.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        match self.current {
            Some((_, Some(node), _)) => node.attribute(name),
            _ => None,
        }
    }

    /// The depth of the current event. The root element is at depth 1;
    /// before the first [`advance`](Self::advance) and at
    /// [`Event::Eof`] the depth is 0.
    pub fn depth(&self) -> usize {
        match self.current {
            Some((_, _, depth)) => depth,
            None => 0,
        }
    }

    /// Advance past the end of the element the cursor currently rests on.
    pub fn skip_subtree(&mut self) {
        let outer_depth = self.depth();
        loop {
            match self.advance() {
                Event::Eof => break,
                Event::End if self.depth() <= outer_depth => break,
                _ => {}
            }
        }
    }
}

fn flatten<'a, 'input>(
    node: Node<'a, 'input>,
    depth: usize,
    events: &mut Vec<(Event, Option<Node<'a, 'input>>, usize)>,
) {
    events.push((Event::Start, Some(node), depth));
    for child in node.children().filter(Node::is_element) {
        flatten(child, depth + 1, events);
    }
    events.push((Event::End, Some(node), depth));
}
