//! Location tracking for error messages.
//!
//! A descent never mutates a shared trail: each step borrows its parent and
//! adds exactly one segment, so sibling branches cannot see each other's keys.
//! The owned [`Path`] is only materialized when an error is built.
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self { Segment::Key(key.to_string()) }
}

impl From<String> for Segment {
    fn from(key: String) -> Self { Segment::Key(key) }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self { Segment::Index(idx) }
}

/// Owned trail from the root, in descent order. Renders as `[a, 1, b]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path(pub Vec<Segment>);

impl Path {
    pub fn root() -> Self { Self::default() }

    pub fn segments(&self) -> &[Segment] { &self.0 }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            write!(f, "{seg}")?;
        }
        f.write_str("]")
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

// ------------------------------- Cursor ----------------------------------- //

#[derive(Debug, Clone, Copy)]
enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Borrowed, persistent view of the current location: a parent pointer plus
/// one segment. Cheap to copy; extending it never touches the parent.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    prefix: &'a [Segment],
    parent: Option<&'a Cursor<'a>>,
    step: Option<Step<'a>>,
}

impl Cursor<'static> {
    pub fn root() -> Self {
        Cursor { prefix: &[], parent: None, step: None }
    }
}

impl<'a> Cursor<'a> {
    /// Start a descent below an already-known location.
    pub fn with_prefix(prefix: &'a Path) -> Self {
        Cursor { prefix: prefix.segments(), parent: None, step: None }
    }

    pub fn key<'b>(&'b self, key: &'b str) -> Cursor<'b> {
        Cursor { prefix: self.prefix, parent: Some(self), step: Some(Step::Key(key)) }
    }

    pub fn index<'b>(&'b self, idx: usize) -> Cursor<'b> {
        Cursor { prefix: self.prefix, parent: Some(self), step: Some(Step::Index(idx)) }
    }

    pub fn to_path(&self) -> Path {
        let mut steps = Vec::new();
        let mut node = Some(self);
        while let Some(cur) = node {
            if let Some(step) = cur.step { steps.push(step); }
            node = cur.parent;
        }
        let mut out = self.prefix.to_vec();
        out.extend(steps.into_iter().rev().map(|s| match s {
            Step::Key(k) => Segment::Key(k.to_string()),
            Step::Index(i) => Segment::Index(i),
        }));
        Path(out)
    }
}

impl fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty_brackets() {
        assert_eq!(Cursor::root().to_string(), "[]");
        assert_eq!(Path::root().to_string(), "[]");
    }

    #[test]
    fn descent_order_is_preserved() {
        let root = Cursor::root();
        let a = root.key("a");
        let one = a.index(1);
        let b = one.key("b");
        assert_eq!(b.to_string(), "[a, 1, b]");
        assert_eq!(b.to_path().segments().len(), 3);
    }

    #[test]
    fn siblings_do_not_observe_each_other() {
        let root = Cursor::root();
        let parent = root.key("parent");
        let left = parent.key("left");
        let right = parent.key("right");
        assert_eq!(left.to_string(), "[parent, left]");
        assert_eq!(right.to_string(), "[parent, right]");
        assert_eq!(parent.to_string(), "[parent]");
    }

    #[test]
    fn prefix_comes_first() {
        let prefix: Path = ["outer", "inner"].into_iter().collect();
        let start = Cursor::with_prefix(&prefix);
        let leaf = start.key("leaf");
        assert_eq!(leaf.to_string(), "[outer, inner, leaf]");
    }
}
