//! Pure helper functions for the line-breaking dynamic program: adjustment
//! ratios, demerits, fitness classes, and legal-breakpoint detection.

use crate::items::{Content, Item, Paragraph};
use crate::units::Pt;

/// Minimum adjustment ratio for a breakpoint to stay feasible. Below this
/// a line could not shrink enough to reach the target width.
pub const MIN_ADJUSTMENT_RATIO: f64 = -1.0;

/// Computes the adjustment ratio of a line of items, based on their
/// combined width, stretchability and shrinkability. This tells how much
/// effort is needed to justify the line to the desired width.
pub fn compute_adjustment_ratio(
    actual_length: Pt,
    desired_length: Pt,
    total_stretch: Pt,
    total_shrink: Pt,
) -> f64 {
    if actual_length == desired_length {
        0.0
    } else if actual_length < desired_length {
        if total_stretch != Pt::ZERO {
            (desired_length - actual_length) / total_stretch
        } else {
            f64::INFINITY
        }
    } else if total_shrink != Pt::ZERO {
        (desired_length - actual_length) / total_shrink
    } else {
        f64::INFINITY
    }
}

/// Computes the fitness class of a line based on its adjustment ratio.
pub fn fitness_class(adjustment_ratio: f64) -> u8 {
    if adjustment_ratio < -0.5 {
        0
    } else if adjustment_ratio < 0.5 {
        1
    } else if adjustment_ratio < 1.0 {
        2
    } else {
        3
    }
}

/// Computes the base demerits of a break at `b_item`, for adjustment
/// ratio `r`. Does not include the flagged-penalty coupling or the
/// fitness-class jump penalty, both of which depend on the predecessor
/// node and are added by the caller.
pub fn compute_demerits<T>(r: f64, b_item: &Item<T>) -> f64 {
    let badness = 1.0 + 100.0 * r.abs().powi(3);

    match b_item.content {
        Content::Penalty { penalty, .. } if penalty >= 0.0 => (badness + penalty).powi(2),
        Content::Penalty { penalty, .. } if penalty > f64::NEG_INFINITY => {
            badness.powi(2) - penalty.powi(2)
        }
        _ => badness.powi(2),
    }
}

/// Checks whether or not a given item encodes a forced linebreak.
pub fn is_forced_break<T>(item: &Item<T>) -> bool {
    item.is_forced_break()
}

/// Finds all the legal breakpoints within a paragraph. A legal breakpoint
/// is an item index such that this item is either a penalty which isn't
/// `+inf`, or a glue immediately preceded by a box.
pub fn find_legal_breakpoints<T>(paragraph: &Paragraph<T>) -> Vec<usize> {
    let mut legal_breakpoints: Vec<usize> = Vec::new();
    let mut last_item_was_box = false;

    for (i, item) in paragraph.items.iter().enumerate() {
        match item.content {
            Content::Penalty { penalty, .. } => {
                if penalty < f64::INFINITY {
                    legal_breakpoints.push(i);
                }
                last_item_was_box = false;
            }
            Content::Glue { .. } => {
                if last_item_was_box {
                    legal_breakpoints.push(i)
                }
                last_item_was_box = false;
            }
            Content::Box(_) => last_item_was_box = true,
        }
    }

    legal_breakpoints
}
