use core::{fmt, panic::Location};

use bstr::BStr;
use thiserror::Error;

/// Broad origin of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Raised by the facade or the decode engine.
    Parsing,
    /// Raised by the pre-validation pass.
    Validation,
    /// Raised by user `Decode` impls for conditions that are not JSON syntax
    /// errors, such as a missing record field.
    Runtime,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parsing => "parsing",
            Self::Validation => "validation",
            Self::Runtime => "runtime",
        })
    }
}

/// What went wrong.
///
/// The facade itself raises [`NoInput`](Self::NoInput),
/// [`ImbalancedObjectBraces`](Self::ImbalancedObjectBraces) and
/// [`ImbalancedArrayBrackets`](Self::ImbalancedArrayBrackets). The other kinds
/// come from decoding, validation or user code.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The buffer is empty, or does not start with `{` or `[`.
    #[error("no input: expected an object or array")]
    NoInput,
    /// Object depth was not zero when decoding stopped. Positive values count
    /// unclosed `{`, negative values count excess `}`.
    #[error("imbalanced object braces (depth {0})")]
    ImbalancedObjectBraces(i64),
    /// Array depth was not zero when decoding stopped. Positive values count
    /// unclosed `[`, negative values count excess `]`.
    #[error("imbalanced array brackets (depth {0})")]
    ImbalancedArrayBrackets(i64),
    /// Nesting went past the parser's depth limit.
    #[error("nesting deeper than {0} levels")]
    MaxNestingExceeded(usize),
    /// A byte that cannot start or continue the current token.
    #[error("unexpected character {:?}", char::from(*.0))]
    UnexpectedCharacter(u8),
    /// Input ended inside a token; raised by the validator.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A `t`, `f` or `n` that does not spell `true`, `false` or `null`.
    #[error("invalid literal")]
    InvalidLiteral,
    /// Malformed number, such as `1.` or `-x`.
    #[error("invalid number")]
    InvalidNumber,
    /// Well-formed number that does not fit the target type.
    #[error("number out of range")]
    NumberOutOfRange,
    /// Unescaped byte below `0x20` inside a string.
    #[error("control character in string")]
    ControlCharacterInString,
    /// String content that is not valid UTF-8.
    #[error("invalid utf-8 in string")]
    InvalidUtf8,
    /// Unknown escape, bad hex digit, or unpaired surrogate.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// An object member does not start with a string.
    #[error("expected a string key")]
    ExpectedKey,
    /// An object key is not followed by `:`.
    #[error("expected ':' after object key")]
    MissingColon,
    /// A value inside a container is followed by something other than `,`
    /// or the matching closer.
    #[error("expected ',' or a closing delimiter")]
    MissingComma,
    /// The value is well formed but of another type than the target.
    #[error("expected {expected}")]
    WrongType {
        /// Name of the JSON type the target accepts.
        expected: &'static str,
    },
    /// Bytes other than whitespace after the root value; raised by the
    /// validator.
    #[error("trailing characters after the root value")]
    TrailingCharacters,
    /// Free-form condition raised by a user `Decode` impl.
    #[error("{0}")]
    Custom(&'static str),
}

/// A diagnostic anchored to a byte offset of the parsed buffer.
///
/// Records are built once by [`ParseError::new`] and never mutated. The
/// detection site is kept only in debug builds and does not take part in
/// equality.
#[derive(Debug, Error, Clone, Copy)]
#[error("{kind} at line {line}, column {column} (offset {offset})")]
pub struct ParseError {
    /// Which part of the pipeline raised the error.
    pub class: ErrorClass,
    /// The condition that was detected.
    pub kind: ErrorKind,
    /// Read position relative to the start of the buffer.
    pub offset: usize,
    /// Length of the buffer, i.e. the end position relative to its start.
    pub end: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// 1-based byte column of `offset` within its line.
    pub column: usize,
    /// Where in this crate (or a user `Decode` impl) the error was raised.
    pub location: Option<&'static Location<'static>>,
}

impl ParseError {
    /// Builds a record for `kind` at `offset` into `root`.
    ///
    /// `offset` is clamped to `end`; `line` and `column` are derived from
    /// `root`.
    #[track_caller]
    #[must_use]
    pub fn new(class: ErrorClass, kind: ErrorKind, offset: usize, end: usize, root: &[u8]) -> Self {
        let offset = offset.min(end);
        let prefix = &root[..offset.min(root.len())];
        let line = 1 + prefix.iter().filter(|&&b| b == b'\n').count();
        let line_start = prefix.iter().rposition(|&b| b == b'\n').map_or(0, |nl| nl + 1);
        let location = if cfg!(debug_assertions) {
            Some(Location::caller())
        } else {
            None
        };
        Self {
            class,
            kind,
            offset,
            end,
            line,
            column: offset - line_start + 1,
            location,
        }
    }

    /// The line of `input` this error points into, without its newline.
    ///
    /// `input` must be the buffer the error was produced for.
    #[must_use]
    pub fn excerpt<'i>(&self, input: &'i [u8]) -> &'i BStr {
        let offset = self.offset.min(input.len());
        let start = input[..offset]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        let stop = input[offset..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .map_or(input.len(), |n| offset + n);
        BStr::new(&input[start..stop])
    }
}

impl PartialEq for ParseError {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.kind == other.kind
            && self.offset == other.offset
            && self.end == other.end
            && self.line == other.line
            && self.column == other.column
    }
}

impl Eq for ParseError {}
