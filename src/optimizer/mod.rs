//! Mathematical logic for finding the optimal sequence of breakpoints that
//! minimizes the amount of demerits while breaking a paragraph down into
//! lines (the Knuth-Plass total-fit algorithm).
//!
//! The algorithm couples a forward sweep over the item stream with an
//! active-set of candidate "active" break nodes whose membership changes
//! during the sweep. Nodes live in a grow-only arena (`Vec<Node>`); the
//! active set is a separate ordered list of arena indices, which sidesteps
//! the need for any shared-ownership machinery to represent the
//! breakpoint back-pointer DAG.

pub mod linebreak;

use std::collections::BTreeMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::items::{Content, Item, Paragraph};
use crate::units::Pt;

use self::linebreak::{
    compute_adjustment_ratio, compute_demerits, find_legal_breakpoints, fitness_class,
    is_forced_break, MIN_ADJUSTMENT_RATIO,
};

/// Parameters controlling the optimizer's search for a feasible and
/// optimal sequence of breakpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerOptions {
    /// The target width of every line.
    pub line_width: Pt,

    /// The maximum adjustment ratio (in absolute value, on the stretch
    /// side) a line may reach and still be considered feasible.
    pub threshold: f64,

    /// Extra demerits added when two consecutive chosen breaks are both
    /// flagged penalties (e.g. two hyphens in a row).
    pub flagged_penalty: f64,

    /// Extra demerits added when two consecutive lines' fitness classes
    /// differ by more than one.
    pub fitness_penalty: f64,

    /// Dominance-pruning parameter: among the best candidate per fitness
    /// class at a given breakpoint, drop any whose demerits exceed the
    /// minimum by more than `gamma`. `+inf` disables pruning.
    pub gamma: f64,
}

impl Default for OptimizerOptions {
    fn default() -> OptimizerOptions {
        OptimizerOptions {
            line_width: Pt(0.0),
            threshold: 5.0,
            flagged_penalty: 3000.0,
            fitness_penalty: 100.0,
            gamma: f64::INFINITY,
        }
    }
}

impl OptimizerOptions {
    /// Creates options targeting the given line width, with every other
    /// parameter left at its default.
    pub fn with_line_width(line_width: Pt) -> OptimizerOptions {
        OptimizerOptions {
            line_width,
            ..OptimizerOptions::default()
        }
    }
}

/// One candidate break in the returned chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// The index into the item stream this break ends at, already
    /// adjusted so that a break on a penalty item includes that penalty
    /// in the line it terminates (see `Self::position`'s doc).
    ///
    /// `None` only for the sentinel node preceding the first line.
    pub position: Option<usize>,

    /// The 1-based line number this break ends (0 for the sentinel).
    pub line: usize,

    /// The fitness class of the line this break terminates.
    pub fitness_class: u8,

    /// The adjustment ratio of the line this break terminates.
    pub ratio: f64,

    /// Total demerits accumulated over every line up to and including
    /// this one, on the path the optimizer chose.
    pub total_demerits: f64,
}

/// An arena-resident candidate breakpoint node. `previous` is an index
/// into the same arena; the sentinel (arena index 0) has `previous = None`.
#[derive(Debug, Clone, Copy)]
struct Node {
    position: Option<usize>,
    line: usize,
    fitness_class: u8,
    ratio: f64,
    total_width: Pt,
    total_stretch: Pt,
    total_shrink: Pt,
    total_demerits: f64,
    previous: Option<usize>,
}

impl Node {
    fn sentinel() -> Node {
        Node {
            position: None,
            line: 0,
            fitness_class: 1,
            ratio: 0.0,
            total_width: Pt::ZERO,
            total_stretch: Pt::ZERO,
            total_shrink: Pt::ZERO,
            total_demerits: 0.0,
            previous: None,
        }
    }
}

/// Best candidate seen so far for each of the four fitness classes, keyed
/// by the line the resulting node would terminate.
type ClassBuffer = [Option<(f64, usize, f64)>; 4];

/// Finds the optimal sequence of breakpoints that minimizes the total
/// demerits while breaking a paragraph down into lines.
///
/// Returns the chain of breakpoints from the sentinel (preceding the
/// first line) through the forced final break.
pub fn optimum_breakpoints<T>(
    paragraph: &Paragraph<T>,
    opts: &OptimizerOptions,
) -> Result<Vec<Breakpoint>> {
    let stream = &paragraph.items;

    if !paragraph.has_terminator_trio() {
        return Err(Error::InvariantViolation(
            "item stream is missing the mandatory terminator trio".into(),
        ));
    }

    trace!(
        "optimizing {} items against line width {:?}",
        stream.len(),
        opts.line_width
    );

    let mut arena: Vec<Node> = vec![Node::sentinel()];
    let mut active: Vec<usize> = vec![0];

    let legal_breakpoints = find_legal_breakpoints(paragraph);
    let mut legal = legal_breakpoints.iter().peekable();

    let (mut w, mut y, mut z) = (Pt::ZERO, Pt::ZERO, Pt::ZERO);

    for (b, item) in stream.iter().enumerate() {
        let can_break = legal.peek() == Some(&&b);
        if can_break {
            legal.next();
        }

        match &item.content {
            Content::Box(_) => w += item.width,
            Content::Glue { stretch, shrink } => {
                if !can_break {
                    w += item.width;
                    y += *stretch;
                    z += *shrink;
                }
            }
            Content::Penalty { .. } => {}
        }

        if !can_break {
            continue;
        }

        if active.is_empty() {
            warn!("active set emptied before item #{}", b);
            return Err(Error::NoFeasibleSolution);
        }

        let forced = is_forced_break(item);
        let mut to_remove = Vec::new();
        let mut best_by_line: BTreeMap<usize, ClassBuffer> = BTreeMap::new();

        for &a_idx in &active {
            let a = arena[a_idx];

            let mut actual_width = w - a.total_width;
            if let Content::Penalty { .. } = item.content {
                actual_width += item.width;
            }
            let line_stretch = y - a.total_stretch;
            let line_shrink = z - a.total_shrink;

            let r = compute_adjustment_ratio(actual_width, opts.line_width, line_stretch, line_shrink);

            if r < MIN_ADJUSTMENT_RATIO || (forced && a.position != Some(stream.len() - 1)) {
                to_remove.push(a_idx);
            }

            if r >= MIN_ADJUSTMENT_RATIO && r <= opts.threshold {
                let mut d = compute_demerits(r, item) + a.total_demerits;

                let a_flagged = a.position.map_or(false, |p| stream[p].is_flagged());
                if a_flagged && item.is_flagged() {
                    d += opts.flagged_penalty;
                }

                let c = fitness_class(r);
                if (i64::from(c) - i64::from(a.fitness_class)).abs() > 1 {
                    d += opts.fitness_penalty;
                }

                let j = a.line + 1;
                let slots = best_by_line.entry(j).or_insert([None; 4]);
                let slot = &mut slots[c as usize];
                let better = match slot {
                    None => true,
                    Some((cur_d, ..)) => d < *cur_d,
                };
                if better {
                    *slot = Some((d, a_idx, r));
                }
            }
        }

        to_remove.sort_unstable();
        to_remove.dedup();
        active.retain(|idx| to_remove.binary_search(idx).is_err());

        if !best_by_line.is_empty() {
            let (after_w, after_y, after_z) = sums_after(stream, b, w, y, z);

            for (&j, slots) in &best_by_line {
                let min_d = slots
                    .iter()
                    .filter_map(|s| s.map(|(d, ..)| d))
                    .fold(f64::INFINITY, f64::min);

                for slot in slots.iter() {
                    if let Some((d, parent_idx, r)) = slot {
                        if *d <= min_d + opts.gamma {
                            let node = Node {
                                position: Some(b),
                                line: j,
                                fitness_class: fitness_class(*r),
                                ratio: *r,
                                total_width: after_w,
                                total_stretch: after_y,
                                total_shrink: after_z,
                                total_demerits: *d,
                                previous: Some(*parent_idx),
                            };
                            let idx = arena.len();
                            arena.push(node);
                            active.push(idx);
                        }
                    }
                }
            }
        }

        // A glue that wasn't a legal breakpoint already had its width
        // folded into the running sums above; only a glue that *was*
        // considered (and thus withheld its contribution until now) still
        // needs adding.
        if can_break {
            if let Content::Glue { stretch, shrink } = item.content {
                w += item.width;
                y += stretch;
                z += shrink;
            }
        }
    }

    if active.is_empty() {
        return Err(Error::NoFeasibleSolution);
    }

    let best_idx = *active
        .iter()
        .min_by(|&&a, &&b| {
            let a = arena[a];
            let b = arena[b];
            a.total_demerits
                .partial_cmp(&b.total_demerits)
                .unwrap()
                .then(a.line.cmp(&b.line))
                .then(a.position.cmp(&b.position))
        })
        .expect("active set is non-empty");

    debug!(
        "chosen chain ends at arena node {} with {} total demerits",
        best_idx, arena[best_idx].total_demerits
    );

    let mut chain = Vec::new();
    let mut cursor = Some(best_idx);
    while let Some(idx) = cursor {
        chain.push(idx);
        cursor = arena[idx].previous;
    }
    chain.reverse();

    Ok(chain
        .into_iter()
        .map(|idx| {
            let node = arena[idx];
            let position = node.position.map(|p| {
                if matches!(stream[p].content, Content::Penalty { .. }) {
                    p + 1
                } else {
                    p
                }
            });
            Breakpoint {
                position,
                line: node.line,
                fitness_class: node.fitness_class,
                ratio: node.ratio,
                total_demerits: node.total_demerits,
            }
        })
        .collect())
}

/// Computes the running sums of width, stretch and shrink advanced past
/// any glue or penalty immediately following `b`, stopping at the next
/// box (or at a forced penalty that isn't `b` itself). This is the
/// baseline the *next* line's width measurement starts from, since
/// discardable items right after a break don't count against it.
fn sums_after<T>(stream: &[Item<T>], b: usize, w: Pt, y: Pt, z: Pt) -> (Pt, Pt, Pt) {
    let (mut tw, mut ty, mut tz) = (w, y, z);

    for (i, item) in stream.iter().enumerate().skip(b) {
        match item.content {
            Content::Box(_) => break,
            Content::Glue { stretch, shrink } => {
                tw += item.width;
                ty += stretch;
                tz += shrink;
            }
            Content::Penalty { penalty, .. } => {
                if penalty == f64::NEG_INFINITY && i > b {
                    break;
                }
            }
        }
    }

    (tw, ty, tz)
}

/// Splits an item stream into the items of each line, paired with the
/// breakpoint that terminates it.
///
/// `breakpoints` must be the chain returned by `optimum_breakpoints`
/// (sentinel first). Returns one entry per line, i.e. `breakpoints.len() - 1`
/// entries.
pub fn lines<'a, T>(
    stream: &'a [Item<T>],
    breakpoints: &'a [Breakpoint],
) -> Vec<(&'a [Item<T>], &'a Breakpoint)> {
    breakpoints
        .windows(2)
        .map(|pair| {
            let start = pair[0].position.map_or(0, |p| p + 1);
            let end = pair[1].position.unwrap_or(stream.len());
            (&stream[start..end], &pair[1])
        })
        .collect()
}
