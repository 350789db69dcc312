//! Bullet-relationship parser.
//!
//! Class descriptions embed one relationship per bullet:
//!
//! ```text
//! The properties that can be used with this class are:
//! - ex:hasPart -[1..*]-> ex:Component
//! - ex:label -[1]-> xsd:string
//! ```
//!
//! Parsing is two-staged. [`segments`] yields the text of each bullet (lazy,
//! restartable, no allocation), and [`match_line`] recognizes the grammar
//!
//! ```text
//! <property-qname> -[<min>(..<max>?)?]-> <target-qname>
//! ```
//!
//! where each bound is a non-negative integer or an unbounded marker (`*` or
//! `N`). Qualified names are returned unresolved.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::namespace::QName;

/// Characters that open a bullet when followed by whitespace.
pub const BULLET_MARKERS: &[char] = &['-', '*'];

/// Textual markers for an unbounded cardinality.
pub const UNBOUNDED_MARKERS: &[&str] = &["*", "N"];

/// One end of a cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// A concrete count.
    Count(u64),
    /// `*` or `N`.
    Unbounded,
}

impl Bound {
    fn parse(text: &str) -> Option<Self> {
        if UNBOUNDED_MARKERS.contains(&text) {
            Some(Bound::Unbounded)
        } else {
            text.parse().ok().map(Bound::Count)
        }
    }

    fn count(self) -> Option<u64> {
        match self {
            Bound::Count(n) => Some(n),
            Bound::Unbounded => None,
        }
    }
}

/// The bracketed part of a relationship, as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// The bound before `..`, or the only bound.
    pub lower: Bound,
    /// The bound after `..`; `None` when omitted.
    pub upper: Option<Bound>,
    /// Whether the `..` separator appeared.
    pub ranged: bool,
}

impl Cardinality {
    /// A single concrete bound with no separator: minimum equals maximum.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        !self.ranged && matches!(self.lower, Bound::Count(_))
    }

    /// The `sh:minCount` to emit, if any.
    ///
    /// An unbounded lower end carries no constraint, so `*..5` yields `None`
    /// rather than zero.
    #[must_use]
    pub fn min_count(&self) -> Option<u64> {
        self.lower.count()
    }

    /// The `sh:maxCount` to emit, if any.
    #[must_use]
    pub fn max_count(&self) -> Option<u64> {
        if self.ranged {
            self.upper.and_then(Bound::count)
        } else {
            self.lower.count()
        }
    }
}

/// A recognized relationship line. Lives only as long as the text it borrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship<'a> {
    /// The constrained property.
    pub property: QName<'a>,
    /// Permitted value count.
    pub cardinality: Cardinality,
    /// The value type: a class, `rdfs:Literal`, or an `xsd:` datatype.
    pub target: QName<'a>,
}

/// Outcome of matching one bullet segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch<'a> {
    /// The segment is a relationship.
    Matched(Relationship<'a>),
    /// The segment is commentary or malformed.
    Skipped,
}

impl<'a> LineMatch<'a> {
    /// Returns the relationship, discarding the skipped case.
    #[must_use]
    pub fn relationship(self) -> Option<Relationship<'a>> {
        match self {
            LineMatch::Matched(rel) => Some(rel),
            LineMatch::Skipped => None,
        }
    }
}

#[allow(clippy::unwrap_used)]
fn relationship_grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        let bound = std::iter::once(r"\d+".to_owned())
            .chain(UNBOUNDED_MARKERS.iter().map(|m| regex::escape(m)))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"(?x)
            ^(?P<property>(?:\w[\w-]*)?:\w[\w-]*)
            \s+-\[\s*
            (?P<min>{bound})
            \s*(?:(?P<range>\.\.)\s*(?P<max>{bound})?\s*)?
            \]->\s*
            (?P<target>(?:\w[\w-]*)?:\w[\w-]*)
            "
        ))
        .unwrap()
    })
}

/// Recognizes one bullet segment (marker already stripped).
///
/// Text after the target name is ignored. Anything that does not fit the
/// grammar, including counts too large for `u64`, is [`LineMatch::Skipped`].
#[must_use]
pub fn match_line(segment: &str) -> LineMatch<'_> {
    let segment = segment.trim();
    let Some(caps) = relationship_grammar().captures(segment) else {
        return LineMatch::Skipped;
    };

    relationship_from(&caps).map_or(LineMatch::Skipped, LineMatch::Matched)
}

fn relationship_from<'a>(caps: &Captures<'a>) -> Option<Relationship<'a>> {
    let upper = match caps.name("max") {
        Some(m) => Some(Bound::parse(m.as_str())?),
        None => None,
    };
    Some(Relationship {
        property: QName::parse(caps.name("property")?.as_str())?,
        cardinality: Cardinality {
            lower: Bound::parse(caps.name("min")?.as_str())?,
            upper,
            ranged: caps.name("range").is_some(),
        },
        target: QName::parse(caps.name("target")?.as_str())?,
    })
}

/// Byte offset of the bullet body within `line`, if `line` opens a bullet.
fn bullet_body(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    let mut chars = trimmed.chars();
    let marker = chars.next()?;
    let after = chars.next()?;
    (BULLET_MARKERS.contains(&marker) && after.is_whitespace())
        .then_some(indent + marker.len_utf8())
}

/// Iterator over the bullet segments of a description.
///
/// Cloning copies only the remaining slice, so the sequence can be walked
/// again from any point.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

/// Splits a description into bullet segments.
///
/// A segment starts on a line whose first non-blank character is a bullet
/// marker followed by whitespace, and runs until the next such line.
/// Continuation lines belong to the preceding bullet. Prose before the first
/// bullet is discarded and blank segments are skipped.
#[must_use]
pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let (start, body) = find_bullet(self.rest)?;
            let after_body = &self.rest[start + body..];
            let end = find_bullet(after_body).map_or(after_body.len(), |(next, _)| next);
            let segment = after_body[..end].trim();
            self.rest = &after_body[end..];
            if !segment.is_empty() {
                return Some(segment);
            }
        }
    }
}

/// Finds the first bullet line: (line start offset, body offset within line).
fn find_bullet(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if let Some(body) = bullet_body(line) {
            return Some((offset, body));
        }
        offset += line.len();
    }
    None
}

/// Parses every relationship in a description, skipping non-matching bullets.
pub fn parse_relationships(text: &str) -> impl Iterator<Item = Relationship<'_>> + Clone {
    segments(text).filter_map(|segment| match_line(segment).relationship())
}
