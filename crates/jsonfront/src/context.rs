use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::{Cursor, DecodeResult, ErrorClass, ErrorKind, Halt, ParseConfig, ParseError, ParseOptions};

/// Default limit on combined object and array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Mutable state of one parse call, threaded by reference through every
/// [`Decode`](crate::Decode) step.
///
/// A context is built by [`Parser`](crate::Parser) at the start of a call and
/// dropped when it returns. It borrows the parser's error sink, so records
/// pushed by nested steps land in [`Parser::errors`](crate::Parser::errors).
///
/// Depth counters are signed: a closer for the wrong container kind drives
/// the other counter below zero, which the facade reports as an excess
/// closer.
pub struct ParseContext<'p, 'a, C: ParseConfig> {
    sink: &'p mut Vec<ParseError>,
    root: &'a [u8],
    object_depth: i64,
    array_depth: i64,
    max_depth: usize,
    validating: bool,
    config: PhantomData<C>,
}

impl<'p, 'a, C: ParseConfig> ParseContext<'p, 'a, C> {
    pub(crate) fn new(sink: &'p mut Vec<ParseError>, root: &'a [u8], max_depth: usize) -> Self {
        Self {
            sink,
            root,
            object_depth: 0,
            array_depth: 0,
            max_depth,
            validating: C::VALIDATE_JSON,
            config: PhantomData,
        }
    }

    /// The active configuration as runtime flags.
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        C::OPTIONS
    }

    /// Whether the buffer already passed the validation collaborator.
    #[must_use]
    pub fn validating(&self) -> bool {
        self.validating
    }

    /// The buffer this call parses; offsets are relative to its start.
    #[must_use]
    pub fn root(&self) -> &'a [u8] {
        self.root
    }

    /// Objects opened and not yet closed. Negative after excess `}`.
    #[must_use]
    pub fn object_depth(&self) -> i64 {
        self.object_depth
    }

    /// Arrays opened and not yet closed. Negative after excess `]`.
    #[must_use]
    pub fn array_depth(&self) -> i64 {
        self.array_depth
    }

    /// Skip whitespace before a token, unless the input is declared minified.
    #[inline]
    pub fn skip_whitespace(&self, cursor: &mut Cursor<'_>) {
        if !C::MINIFIED {
            cursor.skip_whitespace();
        }
    }

    /// Enter an object; the cursor is on the `{`.
    pub fn open_object(&mut self, cursor: &Cursor<'_>) -> DecodeResult {
        self.object_depth += 1;
        self.check_nesting(cursor)
    }

    /// Leave an object after its `}`.
    pub fn close_object(&mut self) {
        self.object_depth -= 1;
    }

    /// Enter an array; the cursor is on the `[`.
    pub fn open_array(&mut self, cursor: &Cursor<'_>) -> DecodeResult {
        self.array_depth += 1;
        self.check_nesting(cursor)
    }

    /// Leave an array after its `]`.
    pub fn close_array(&mut self) {
        self.array_depth -= 1;
    }

    fn check_nesting(&mut self, cursor: &Cursor<'_>) -> DecodeResult {
        let depth = self.object_depth.saturating_add(self.array_depth);
        if usize::try_from(depth).is_ok_and(|depth| depth > self.max_depth) {
            return Err(self.report(ErrorKind::MaxNestingExceeded(self.max_depth), cursor));
        }
        Ok(())
    }

    /// Record a parsing error at the cursor and return the halt marker to
    /// propagate.
    #[track_caller]
    pub fn report(&mut self, kind: ErrorKind, cursor: &Cursor<'_>) -> Halt {
        self.report_at(ErrorClass::Parsing, kind, cursor.position())
    }

    /// Record an error of any class at an explicit offset.
    #[track_caller]
    pub fn report_at(&mut self, class: ErrorClass, kind: ErrorKind, offset: usize) -> Halt {
        let err = ParseError::new(class, kind, offset, self.root.len(), self.root);
        tracing::debug!(%class, kind = %err.kind, offset = err.offset, "decode error");
        self.sink.push(err);
        Halt::Reported
    }
}
