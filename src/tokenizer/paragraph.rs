//! Turns a source string into a `Paragraph<String>` of boxes, glues and
//! penalties, ready for the optimizer.

use crate::items::{Item, Paragraph};
use crate::tokenizer::{check_width, Hyphenator, NoHyphenation, WidthOracle};
use crate::units::Pt;
use crate::Result;

/// Options controlling how a paragraph is tokenized.
#[derive(Debug, Clone, Copy)]
pub struct TokenizeOptions {
    /// Width of the first-line indent box. Zero means no indent.
    pub indent: Pt,

    /// Whether words without an explicit hyphen should be offered to the
    /// hyphenation oracle.
    pub hyphenation: bool,
}

impl Default for TokenizeOptions {
    fn default() -> TokenizeOptions {
        TokenizeOptions {
            indent: Pt::ZERO,
            hyphenation: false,
        }
    }
}

const FLAGGED_HYPHEN_PENALTY: f64 = 0.0;
const SENTENCE_GLUE_SCALE: f64 = 1.5;

/// Tokenizes `text` into an item stream, using `widths` to measure boxes
/// and glues and `hyphenator` to split words that need automatic
/// hyphenation.
///
/// `widths` is asked for the width of "-" once per automatically
/// hyphenated word; cache externally if that oracle is expensive.
pub fn paragraph<W, H>(
    text: &str,
    opts: TokenizeOptions,
    widths: &W,
    hyphenator: &H,
) -> Result<Paragraph<String>>
where
    W: WidthOracle,
    H: Hyphenator,
{
    let mut p = Paragraph::new();

    if opts.indent > Pt::ZERO {
        p.push(Item::bx(opts.indent, String::new()));
    }

    let mut words = text.split_whitespace().peekable();

    while let Some(word) = words.next() {
        push_word(&mut p, word, opts.hyphenation, widths, hyphenator)?;

        if words.peek().is_some() {
            p.push(inter_word_glue(word, widths)?);
        }
    }

    p.push(Item::penalty(Pt::ZERO, f64::INFINITY, false));
    p.push(Item::glue(Pt::ZERO, Pt::INFINITY, Pt::ZERO));
    p.push(Item::penalty(Pt::ZERO, f64::NEG_INFINITY, false));

    Ok(p)
}

fn push_word<W, H>(
    p: &mut Paragraph<String>,
    word: &str,
    hyphenation: bool,
    widths: &W,
    hyphenator: &H,
) -> Result<()>
where
    W: WidthOracle,
    H: Hyphenator,
{
    let mut syllables: Vec<&str> = word.split('-').collect();
    let has_explicit_hyphen = syllables.len() > 1;
    let last = syllables.pop().expect("split always yields >=1 piece");

    for syllable in syllables {
        let with_hyphen = format!("{}-", syllable);
        let w = widths.width_of(&with_hyphen);
        check_width(&with_hyphen, w)?;
        p.push(Item::bx(Pt(w), with_hyphen));
        p.push(Item::penalty(Pt::ZERO, FLAGGED_HYPHEN_PENALTY, true));
    }

    if hyphenation && !has_explicit_hyphen {
        push_auto_hyphenated(p, last, widths, hyphenator)?;
    } else {
        let w = widths.width_of(last);
        check_width(last, w)?;
        p.push(Item::bx(Pt(w), last.to_string()));
    }

    Ok(())
}

fn push_auto_hyphenated<W, H>(
    p: &mut Paragraph<String>,
    word: &str,
    widths: &W,
    hyphenator: &H,
) -> Result<()>
where
    W: WidthOracle,
    H: Hyphenator,
{
    let syllables = hyphenator.hyphenate(word);

    if syllables.len() <= 1 {
        let w = widths.width_of(word);
        check_width(word, w)?;
        p.push(Item::bx(Pt(w), word.to_string()));
        return Ok(());
    }

    let hyphen_width = widths.width_of("-");
    check_width("-", hyphen_width)?;

    for (i, syllable) in syllables.iter().enumerate() {
        if syllable.is_empty() {
            return Err(crate::error::TokenizationError::EmptySyllable {
                word: word.to_string(),
            }
            .into());
        }

        if i > 0 {
            p.push(Item::penalty(Pt(hyphen_width), 0.0, true));
        }

        let w = widths.width_of(syllable);
        check_width(syllable, w)?;
        p.push(Item::bx(Pt(w), syllable.clone()));
    }

    Ok(())
}

fn inter_word_glue<W>(previous_word: &str, widths: &W) -> Result<Item<String>>
where
    W: WidthOracle,
{
    let space = widths.width_of(" ");
    check_width(" ", space)?;

    let scale = if ends_sentence(previous_word) {
        SENTENCE_GLUE_SCALE
    } else {
        1.0
    };

    let width = Pt(space * scale);
    let stretch = width / 2.0;
    let shrink = width / 3.0;

    Ok(Item::glue(width, stretch, shrink))
}

fn ends_sentence(word: &str) -> bool {
    matches!(word.chars().last(), Some('.') | Some('?') | Some('!'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Content;

    struct FixedWidth;

    impl WidthOracle for FixedWidth {
        fn width_of(&self, text: &str) -> f64 {
            if text == " " {
                4.0
            } else if text == "-" {
                2.0
            } else {
                text.chars().count() as f64 * 6.0
            }
        }
    }

    #[test]
    fn single_word_is_box_then_terminator() {
        let p = paragraph("foo", TokenizeOptions::default(), &FixedWidth, &NoHyphenation).unwrap();
        assert_eq!(p.items.len(), 4);
        assert!(matches!(p.items[0].content, Content::Box(ref s) if s == "foo"));
        assert!(p.has_terminator_trio());
    }

    #[test]
    fn indent_prepends_a_box() {
        let opts = TokenizeOptions {
            indent: Pt(12.0),
            ..Default::default()
        };
        let p = paragraph("foo", opts, &FixedWidth, &NoHyphenation).unwrap();
        assert!(matches!(p.items[0].content, Content::Box(ref s) if s.is_empty()));
        assert_eq!(p.items[0].width, Pt(12.0));
    }

    #[test]
    fn words_are_separated_by_uniform_glue() {
        let p = paragraph(
            "this is a test.",
            TokenizeOptions::default(),
            &FixedWidth,
            &NoHyphenation,
        )
        .unwrap();

        let boxes: Vec<_> = p
            .items
            .iter()
            .filter_map(|i| match &i.content {
                Content::Box(s) if !s.is_empty() => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(boxes, vec!["this", "is", "a", "test."]);

        let glue_widths: Vec<Pt> = p
            .items
            .iter()
            .filter_map(|i| match i.content {
                Content::Glue { .. } if i.width != Pt::ZERO => Some(i.width),
                _ => None,
            })
            .collect();
        assert_eq!(glue_widths.len(), 3);
        assert!(glue_widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn sentence_end_glue_is_wider() {
        let p = paragraph(
            "bork bork bork. bork bork bork",
            TokenizeOptions::default(),
            &FixedWidth,
            &NoHyphenation,
        )
        .unwrap();

        let glue_widths: Vec<Pt> = p
            .items
            .iter()
            .filter_map(|i| match i.content {
                Content::Glue { .. } if i.width != Pt::ZERO => Some(i.width),
                _ => None,
            })
            .collect();

        assert_eq!(glue_widths.len(), 5);
        assert!(glue_widths[2] > glue_widths[0]);
        assert!(glue_widths[2] > glue_widths[1]);
    }

    #[test]
    fn explicit_hyphen_yields_flagged_zero_width_penalties() {
        let p = paragraph(
            "cul-de-sac",
            TokenizeOptions::default(),
            &FixedWidth,
            &NoHyphenation,
        )
        .unwrap();

        let boxes: Vec<_> = p
            .items
            .iter()
            .filter_map(|i| match &i.content {
                Content::Box(s) if !s.is_empty() => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(boxes, vec!["cul-", "de-", "sac"]);

        let penalties: Vec<_> = p
            .items
            .iter()
            .filter(|i| matches!(i.content, Content::Penalty { flagged: true, .. }))
            .collect();
        assert_eq!(penalties.len(), 2);
        for pen in penalties {
            assert_eq!(pen.width, Pt::ZERO);
        }
    }

    #[test]
    fn automatic_hyphenation_inserts_a_hyphen_width_penalty() {
        struct SplitTestIng;
        impl Hyphenator for SplitTestIng {
            fn hyphenate(&self, word: &str) -> Vec<String> {
                assert_eq!(word, "testing");
                vec!["test".to_string(), "ing".to_string()]
            }
        }

        let opts = TokenizeOptions {
            hyphenation: true,
            ..Default::default()
        };
        let p = paragraph("testing", opts, &FixedWidth, &SplitTestIng).unwrap();

        let boxes: Vec<_> = p
            .items
            .iter()
            .filter_map(|i| match &i.content {
                Content::Box(s) if !s.is_empty() => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(boxes, vec!["test", "ing"]);

        let hyphen_penalty = p
            .items
            .iter()
            .find(|i| matches!(i.content, Content::Penalty { flagged: true, .. }))
            .unwrap();
        assert_eq!(hyphen_penalty.width, Pt(2.0));
    }

    #[test]
    fn negative_width_is_an_error() {
        struct Negative;
        impl WidthOracle for Negative {
            fn width_of(&self, _text: &str) -> f64 {
                -1.0
            }
        }

        let err = paragraph("foo", TokenizeOptions::default(), &Negative, &NoHyphenation);
        assert!(err.is_err());
    }

    #[test]
    fn concatenating_boxes_reproduces_the_source_text() {
        let text = "this is a test.";
        let p = paragraph(text, TokenizeOptions::default(), &FixedWidth, &NoHyphenation).unwrap();

        let reconstructed = p
            .items
            .iter()
            .filter_map(|i| match &i.content {
                Content::Box(s) if !s.is_empty() => Some(s.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ");

        assert_eq!(reconstructed, text);
    }

    #[test]
    fn concatenating_boxes_reproduces_an_explicitly_hyphenated_word() {
        let text = "cul-de-sac";
        let p = paragraph(text, TokenizeOptions::default(), &FixedWidth, &NoHyphenation).unwrap();

        let reconstructed: String = p
            .items
            .iter()
            .filter_map(|i| match &i.content {
                Content::Box(s) if !s.is_empty() => Some(s.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(reconstructed, text);
    }
}
