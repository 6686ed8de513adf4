//! Various blocks holding information and specifications about the
//! structure of a paragraph: the closed sum of box, glue and penalty that
//! the optimizer and tokenizer both speak.

use serde::{Deserialize, Serialize};

use crate::units::Pt;

/// Top abstraction of an item, which is a specification for a box, a glue
/// or a penalty.
///
/// `T` is the payload a box carries: whatever the caller's renderer needs
/// to know about that unbreakable run (a slice of source text, a shaped
/// glyph run, ...). The optimizer never inspects it, only the width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item<T> {
    /// The width of the item.
    pub width: Pt,

    /// The type of the item.
    pub content: Content<T>,
}

/// Possible available types for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Content<T> {
    /// A bounding box refers to something that is meant to be typeset.
    ///
    /// Though it holds the payload it's representing, this item is
    /// essentially a black box as the only relevant information about it
    /// for splitting a paragraph into lines is its width.
    Box(T),

    /// Glue is a blank space which can see its width altered in specified ways.
    ///
    /// It can either stretch or shrink up to a certain limit, and is used as
    /// mortar to leverage to reach a target column width.
    Glue {
        /// How inclined the glue is to stretch from its natural width.
        stretch: Pt,

        /// How inclined the glue is to shrink from its natural width.
        shrink: Pt,
    },

    /// Penalty is a potential place to end a line and step to another. It's
    /// helpful to cut a line in the middle of a word (hyphenation) or to
    /// enforce a break at the end of paragraphs.
    Penalty {
        /// The "cost" of the penalty. `+inf` forbids a break here, `-inf`
        /// forces one.
        penalty: f64,

        /// Whether or not the penalty is considered flagged, i.e. a
        /// hyphenation-style break that should not stack with another
        /// flagged break on the adjacent line.
        flagged: bool,
    },
}

impl<T> Item<T> {
    /// Creates a box holding the given content.
    pub fn bx(width: Pt, content: T) -> Item<T> {
        Item {
            width,
            content: Content::Box(content),
        }
    }

    /// Creates some glue.
    pub fn glue(width: Pt, stretch: Pt, shrink: Pt) -> Item<T> {
        Item {
            width,
            content: Content::Glue { stretch, shrink },
        }
    }

    /// Creates a penalty.
    pub fn penalty(width: Pt, penalty: f64, flagged: bool) -> Item<T> {
        Item {
            width,
            content: Content::Penalty { penalty, flagged },
        }
    }

    /// Whether this item is a penalty whose value is flagged.
    pub fn is_flagged(&self) -> bool {
        matches!(self.content, Content::Penalty { flagged: true, .. })
    }

    /// Whether this item is a penalty that forces a break (`penalty == -inf`).
    pub fn is_forced_break(&self) -> bool {
        matches!(self.content, Content::Penalty { penalty, .. } if penalty == f64::NEG_INFINITY)
    }

    /// Whether this item is a box.
    pub fn is_box(&self) -> bool {
        matches!(self.content, Content::Box(_))
    }
}

/// An ordered sequence of items describing a paragraph's layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph<T> {
    /// Sequence of items representing the structure of the paragraph.
    pub items: Vec<Item<T>>,
}

impl<T> Paragraph<T> {
    /// Instantiates a new, empty paragraph.
    pub fn new() -> Paragraph<T> {
        Paragraph { items: Vec::new() }
    }

    /// Pushes an item at the end of the paragraph.
    pub fn push(&mut self, item: Item<T>) {
        self.items.push(item)
    }

    /// Checks that the paragraph ends with the mandatory terminator trio:
    /// `Penalty(+inf)`, `Glue(0, +inf, 0)`, `Penalty(-inf, 0)`.
    pub fn has_terminator_trio(&self) -> bool {
        let n = self.items.len();
        if n < 3 {
            return false;
        }

        let forbids_break = matches!(
            self.items[n - 3].content,
            Content::Penalty { penalty, .. } if penalty == f64::INFINITY
        );
        let trailing_glue = matches!(
            self.items[n - 2].content,
            Content::Glue { stretch, shrink } if stretch == Pt::INFINITY && shrink == Pt::ZERO
        ) && self.items[n - 2].width == Pt::ZERO;
        let forced_break = matches!(
            self.items[n - 1].content,
            Content::Penalty { penalty, .. } if penalty == f64::NEG_INFINITY
        ) && self.items[n - 1].width == Pt::ZERO;

        forbids_break && trailing_glue && forced_break
    }
}
