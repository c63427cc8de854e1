/// A maximal stretch of text sharing one style, as produced by markup
/// parsing. `text` may contain interior whitespace; concatenating all
/// segments of a paragraph in order reconstructs the paragraph with the
/// markers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub bold: bool,
}

/// A single whitespace-free token with its style, the unit of wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledWord {
    pub word: String,
    pub bold: bool,
}

/// A drawable unit within one rendered line: one or more consecutive
/// same-style words joined by single spaces. Every run after the first
/// on a line carries a single leading space, so drawing runs back to
/// back at their measured widths reproduces inter-word spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
}

/// The runs of one laid-out line. The list is never empty; it can only
/// be built by the layout engine, which closes a line only when it
/// holds at least one word.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    runs: Vec<StyledRun>,
}

impl TextLine {
    pub(crate) fn new(runs: Vec<StyledRun>) -> Self {
        debug_assert!(!runs.is_empty());
        Self { runs }
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }
}

/// One element of the layout engine's output: either a line of runs or
/// a paragraph-break sentinel, which carries no content and signals
/// extra vertical spacing.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedLine {
    ParagraphBreak,
    Text(TextLine),
}
