use chumsky::error::SimpleReason;
use std::{
    fmt::{
        self,
        Display,
        Formatter,
    },
    ops::Range,
};

/// Why a hex pattern failed to parse.
#[derive(Clone, Debug)]
pub enum Reason {
    Unexpected,
    Unclosed,
    Custom(String),
}

impl Reason {
    pub(crate) fn new<I, S>(reason: &SimpleReason<I, S>) -> Self {
        match reason {
            SimpleReason::Unexpected => Self::Unexpected,
            SimpleReason::Unclosed { .. } => Self::Unclosed,
            SimpleReason::Custom(custom) => Self::Custom(custom.clone()),
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::Unexpected => "unexpected input",
            Self::Unclosed => "unclosed delimiter",
            Self::Custom(custom) => custom,
        };
        write!(f, "{what}")
    }
}

/// Describes errors encountered when parsing hex pattern syntax.
#[derive(Clone, Debug)]
pub struct Error<'a> {
    pub(crate) source: &'a str,
    pub(crate) span: Range<usize>,
    pub(crate) reason: Reason,
}

impl<'a> Error<'a> {
    /// The range of the offending input, relative to the source pattern.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// What went wrong at [`span`](Error::span).
    #[must_use]
    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let reason = &self.reason;
        let start = self.span.start;
        let end = self.span.end;
        let pattern = &self.source[start..end];
        write!(
            f,
            "'{reason}' while parsing pattern \"{pattern}\" in range [{start}, {end})",
        )
    }
}

impl std::error::Error for Error<'_> {}
