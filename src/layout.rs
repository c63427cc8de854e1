use crate::line::{RenderedLine, StyledRun, StyledWord, TextLine};
use crate::markup;

/// Greedy, bold-aware word wrap.
///
/// `text` is split into paragraphs on `'\n'`, each paragraph is parsed
/// for `**bold**` markers and tokenized on whitespace, and the words
/// are packed left to right: a word moves to a fresh line when it no
/// longer fits, except that a single word wider than `max_width` is
/// placed alone and allowed to overflow. Words are never split.
///
/// `measure` returns the rendered width of a string in the same unit
/// as `max_width`, for the regular (`false`) or bold (`true`) face,
/// already bound to a font size. The separating space is always
/// measured in the regular face.
///
/// One `ParagraphBreak` is emitted between paragraphs (never after the
/// last), so the output holds exactly as many breaks as `text` holds
/// newlines. Empty input yields an empty output.
pub fn wrap<F>(text: &str, measure: F, max_width: f64) -> Vec<RenderedLine>
where
    F: Fn(&str, bool) -> f64,
{
    let paragraphs: Vec<&str> = text.split('\n').collect();
    let space_width = measure(" ", false);
    let mut lines = Vec::new();

    for (pi, paragraph) in paragraphs.iter().enumerate() {
        let mut line_words: Vec<StyledWord> = Vec::new();
        let mut line_width = 0.0;

        for word in tokenize(paragraph) {
            let word_width = measure(&word.word, word.bold);
            let extra = if line_words.is_empty() { 0.0 } else { space_width };
            if line_width + extra + word_width > max_width && !line_words.is_empty() {
                lines.push(RenderedLine::Text(merge_words(&line_words)));
                line_words.clear();
                line_width = word_width;
                line_words.push(word);
            } else {
                line_words.push(word);
                line_width += extra + word_width;
            }
        }
        if !line_words.is_empty() {
            lines.push(RenderedLine::Text(merge_words(&line_words)));
        }
        if pi + 1 < paragraphs.len() {
            lines.push(RenderedLine::ParagraphBreak);
        }
    }

    lines
}

/// Parse one paragraph's markup and split every segment on whitespace,
/// keeping each word's style and the overall left-to-right order.
fn tokenize(paragraph: &str) -> Vec<StyledWord> {
    let mut words = Vec::new();
    for segment in markup::parse(paragraph) {
        for word in segment.text.split_whitespace() {
            words.push(StyledWord {
                word: word.to_string(),
                bold: segment.bold,
            });
        }
    }
    words
}

/// Collapse a closed line's words into drawable runs: consecutive
/// same-style words merge with single-space separators, and every run
/// after the first gets a leading space so runs can be drawn back to
/// back at their measured widths.
fn merge_words(words: &[StyledWord]) -> TextLine {
    let mut runs: Vec<StyledRun> = Vec::new();
    for word in words {
        match runs.last_mut() {
            Some(run) if run.bold == word.bold => {
                run.text.push(' ');
                run.text.push_str(&word.word);
            }
            Some(_) => runs.push(StyledRun {
                text: format!(" {}", word.word),
                bold: word.bold,
            }),
            None => runs.push(StyledRun {
                text: word.word.clone(),
                bold: word.bold,
            }),
        }
    }
    TextLine::new(runs)
}

#[cfg(test)]
mod tests {
    use super::{tokenize, wrap};
    use crate::line::{RenderedLine, StyledRun, StyledWord};

    /// Every word is 10 wide, a space is 2, regardless of style.
    fn fixed(_text: &str, _bold: bool) -> f64 {
        10.0
    }

    fn fixed_measure(text: &str, bold: bool) -> f64 {
        if text == " " { 2.0 } else { fixed(text, bold) }
    }

    /// Width proportional to character count; bold counts double.
    fn char_measure(text: &str, bold: bool) -> f64 {
        let scale = if bold { 2.0 } else { 1.0 };
        text.chars().count() as f64 * scale
    }

    fn run(text: &str, bold: bool) -> StyledRun {
        StyledRun {
            text: text.to_string(),
            bold,
        }
    }

    fn runs_of(line: &RenderedLine) -> Vec<StyledRun> {
        match line {
            RenderedLine::Text(line) => line.runs().to_vec(),
            RenderedLine::ParagraphBreak => panic!("expected a text line"),
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(wrap("", fixed_measure, 100.0).is_empty());
    }

    #[test]
    fn single_line_merges_into_one_run() {
        let lines = wrap("a b", fixed_measure, 100.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(runs_of(&lines[0]), vec![run("a b", false)]);
    }

    #[test]
    fn breaks_when_the_next_word_would_overflow() {
        // a=10; " b" adds 12 (22 <= 23); " c" would make 34 > 23.
        let lines = wrap("a b c", fixed_measure, 23.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(runs_of(&lines[0]), vec![run("a b", false)]);
        assert_eq!(runs_of(&lines[1]), vec![run("c", false)]);
    }

    #[test]
    fn oversized_word_sits_alone_and_overflows() {
        let lines = wrap("ab c", char_measure, 1.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(runs_of(&lines[0]), vec![run("ab", false)]);
        assert_eq!(runs_of(&lines[1]), vec![run("c", false)]);
    }

    #[test]
    fn style_change_starts_a_new_run_with_leading_space() {
        let lines = wrap("one **two three** four", fixed_measure, 1000.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            runs_of(&lines[0]),
            vec![run("one", false), run(" two three", true), run(" four", false)]
        );
    }

    #[test]
    fn bold_words_use_the_bold_width() {
        // "bb" bold is 4 wide; regular it would be 2 and fit after "aa".
        let lines = wrap("aa **bb**", char_measure, 6.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(runs_of(&lines[0]), vec![run("aa", false)]);
        assert_eq!(runs_of(&lines[1]), vec![run("bb", true)]);
    }

    #[test]
    fn space_is_measured_in_the_regular_face() {
        let measured_bold_space = std::cell::Cell::new(false);
        wrap("**a b**", |text, bold| {
            if text == " " && bold {
                measured_bold_space.set(true);
            }
            1.0
        }, 100.0);
        assert!(!measured_bold_space.get());
    }

    #[test]
    fn paragraph_break_count_matches_newline_count() {
        for input in ["a\nb", "a\n\nb", "\n", "a\nb\nc\n", "no newline"] {
            let breaks = wrap(input, fixed_measure, 100.0)
                .iter()
                .filter(|l| matches!(l, RenderedLine::ParagraphBreak))
                .count();
            assert_eq!(breaks, input.matches('\n').count(), "input: {input:?}");
        }
    }

    #[test]
    fn empty_paragraph_contributes_no_lines() {
        let lines = wrap("Line one\n\nLine two", fixed_measure, 1000.0);
        assert_eq!(
            lines,
            vec![
                RenderedLine::Text(super::merge_words(&[StyledWord {
                    word: "Line".into(),
                    bold: false
                }, StyledWord {
                    word: "one".into(),
                    bold: false
                }])),
                RenderedLine::ParagraphBreak,
                RenderedLine::ParagraphBreak,
                RenderedLine::Text(super::merge_words(&[StyledWord {
                    word: "Line".into(),
                    bold: false
                }, StyledWord {
                    word: "two".into(),
                    bold: false
                }])),
            ]
        );
    }

    #[test]
    fn no_line_exceeds_max_width() {
        // The packed width of a line is its words in their own style
        // plus a regular-face space per gap; a run's leading space is
        // just that gap, not part of the styled text.
        let text = "The **quick** brown fox jumps over the **lazy dog** again and again";
        let max_width = 12.0;
        let space = char_measure(" ", false);
        for line in wrap(text, char_measure, max_width) {
            let RenderedLine::Text(line) = line else { continue };
            let words: Vec<(String, bool)> = line
                .runs()
                .iter()
                .flat_map(|r| {
                    r.text
                        .split_whitespace()
                        .map(|w| (w.to_string(), r.bold))
                        .collect::<Vec<_>>()
                })
                .collect();
            let width: f64 = words
                .iter()
                .map(|(w, bold)| char_measure(w, *bold))
                .sum::<f64>()
                + (words.len() - 1) as f64 * space;
            assert!(
                width <= max_width || words.len() == 1,
                "line too wide: {line:?} ({width})"
            );
        }
    }

    #[test]
    fn bold_run_after_a_regular_word_packs_at_regular_space_width() {
        // "the" (3) + regular space (1) + bold "lazy" (8) is exactly 12
        // and must stay on one line; the bold face never prices the gap.
        let lines = wrap("the **lazy**", char_measure, 12.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            runs_of(&lines[0]),
            vec![run("the", false), run(" lazy", true)]
        );
    }

    #[test]
    fn words_are_preserved_through_wrapping() {
        let text = "alpha **beta gamma** delta\nepsilon **zeta**";
        for paragraph in text.split('\n') {
            let expected = tokenize(paragraph);
            let mut actual = Vec::new();
            for line in wrap(paragraph, char_measure, 8.0) {
                let RenderedLine::Text(line) = line else { continue };
                for r in line.runs() {
                    for word in r.text.split_whitespace() {
                        actual.push(StyledWord {
                            word: word.to_string(),
                            bold: r.bold,
                        });
                    }
                }
            }
            assert_eq!(actual, expected, "paragraph: {paragraph:?}");
        }
    }

    #[test]
    fn adjacent_same_style_words_share_a_run() {
        for line in wrap("a b **c** d e f g", fixed_measure, 34.0) {
            let RenderedLine::Text(line) = line else { continue };
            for pair in line.runs().windows(2) {
                assert_ne!(pair[0].bold, pair[1].bold, "unmerged runs: {pair:?}");
            }
        }
    }

    #[test]
    fn tokenize_flattens_segments_in_order() {
        assert_eq!(
            tokenize("Hello **brave new** world"),
            vec![
                StyledWord { word: "Hello".into(), bold: false },
                StyledWord { word: "brave".into(), bold: true },
                StyledWord { word: "new".into(), bold: true },
                StyledWord { word: "world".into(), bold: false },
            ]
        );
    }
}
