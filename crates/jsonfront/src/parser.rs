//! The parse entry points.
//!
//! A call runs, in order: clear the error sink, reject empty input, run the
//! validator when the configuration asks for it, check that the first
//! significant byte opens an object or array, decode through a fresh
//! [`ParseContext`], and finally require both depth counters to be zero.
//!
//! The balance check runs once, after decoding returns, instead of on every
//! token. An imbalance is therefore reported at the offset where decoding
//! stopped, not at the token that caused it.

use alloc::vec::Vec;

use crate::{
    Config, Cursor, DEFAULT_MAX_DEPTH, Decode, ErrorClass, ErrorKind, Halt, ParseConfig,
    ParseContext, ParseError, ParseOptions, Validate, Validator,
};

/// Parsing facade that owns the error sink and the validation hook.
///
/// One instance serves many sequential calls; each call clears the errors
/// of the previous one. The type is intentionally not `Clone`: a copy would
/// carry a stale error sink that no call will ever clear. Use separate
/// instances on separate threads.
///
/// # Examples
///
/// ```rust
/// use jsonfront::{DefaultConfig, ErrorKind, Parser, Value};
///
/// let mut parser = Parser::new();
/// let mut value = Value::Null;
/// assert!(!parser.parse_into::<DefaultConfig, _>(&mut value, b"  42"));
/// assert_eq!(parser.errors().len(), 1);
/// assert_eq!(parser.errors()[0].kind, ErrorKind::NoInput);
/// ```
#[derive(Debug)]
pub struct Parser<V = Validator> {
    errors: Vec<ParseError>,
    validator: V,
    max_depth: usize,
}

impl Parser {
    /// A parser with the built-in [`Validator`] and [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_validator(Validator)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Validate> Parser<V> {
    /// A parser that runs `validator` for configurations with
    /// [`ParseConfig::VALIDATE_JSON`] set.
    pub fn with_validator(validator: V) -> Self {
        Self {
            errors: Vec::new(),
            validator,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit combined object and array nesting to `max_depth` levels.
    ///
    /// Deeper input fails with [`ErrorKind::MaxNestingExceeded`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Combined object and array nesting allowed per call.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Diagnostics of the most recent call. Empty after a successful call.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The validation hook, e.g. to read state it gathered.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Mutable access to the validation hook, e.g. to reconfigure it
    /// between calls.
    pub fn validator_mut(&mut self) -> &mut V {
        &mut self.validator
    }

    /// Decode `input` into `target`, returning whether the call succeeded.
    ///
    /// On failure `target` may be partially written and [`errors`](Self::errors)
    /// explains why.
    pub fn parse_into<C: ParseConfig, T: Decode>(
        &mut self,
        target: &mut T,
        input: impl AsRef<[u8]>,
    ) -> bool {
        let input = input.as_ref();
        self.errors.clear();
        tracing::trace!(
            len = input.len(),
            validate_json = C::VALIDATE_JSON,
            minified = C::MINIFIED,
            "parse"
        );

        if input.is_empty() {
            self.fail(ErrorKind::NoInput, 0, input);
            return false;
        }
        if C::VALIDATE_JSON && !self.validator.validate(input, &mut self.errors) {
            return false;
        }

        let mut cursor = Cursor::new(input);
        if !C::MINIFIED {
            cursor.skip_whitespace();
        }
        if !matches!(cursor.peek(), Some(b'{' | b'[')) {
            self.fail(ErrorKind::NoInput, 0, input);
            return false;
        }

        let mut cx = ParseContext::<C>::new(&mut self.errors, input, self.max_depth);
        match target.decode(&mut cx, &mut cursor) {
            Err(Halt::Reported) => return false,
            Err(Halt::Incomplete) => {}
            // An excess closer right after the root still counts against
            // balance; anything else trailing is left to the validator.
            Ok(()) => {
                cx.skip_whitespace(&mut cursor);
                match cursor.peek() {
                    Some(b'}') => {
                        cursor.bump();
                        cx.close_object();
                    }
                    Some(b']') => {
                        cursor.bump();
                        cx.close_array();
                    }
                    _ => {}
                }
            }
        }
        let (object_depth, array_depth) = (cx.object_depth(), cx.array_depth());

        if object_depth != 0 {
            self.fail(ErrorKind::ImbalancedObjectBraces(object_depth), cursor.position(), input);
            false
        } else if array_depth != 0 {
            self.fail(ErrorKind::ImbalancedArrayBrackets(array_depth), cursor.position(), input);
            false
        } else {
            true
        }
    }

    /// Decode `input` into a fresh `T`.
    ///
    /// Returns `T::default()` on failure; [`errors`](Self::errors) explains
    /// why.
    pub fn parse<T: Decode + Default, C: ParseConfig>(&mut self, input: impl AsRef<[u8]>) -> T {
        let mut value = T::default();
        if self.parse_into::<C, T>(&mut value, input) {
            value
        } else {
            T::default()
        }
    }

    /// [`parse_into`](Self::parse_into) with flags chosen at run time.
    pub fn parse_into_with<T: Decode>(
        &mut self,
        options: ParseOptions,
        target: &mut T,
        input: impl AsRef<[u8]>,
    ) -> bool {
        match (options.validate_json, options.minified) {
            (false, false) => self.parse_into::<Config<false, false>, T>(target, input),
            (false, true) => self.parse_into::<Config<false, true>, T>(target, input),
            (true, false) => self.parse_into::<Config<true, false>, T>(target, input),
            (true, true) => self.parse_into::<Config<true, true>, T>(target, input),
        }
    }

    /// [`parse`](Self::parse) with flags chosen at run time.
    pub fn parse_with<T: Decode + Default>(&mut self, options: ParseOptions, input: impl AsRef<[u8]>) -> T {
        let mut value = T::default();
        if self.parse_into_with(options, &mut value, input) {
            value
        } else {
            T::default()
        }
    }

    #[track_caller]
    fn fail(&mut self, kind: ErrorKind, offset: usize, input: &[u8]) {
        let err = ParseError::new(ErrorClass::Parsing, kind, offset, input.len(), input);
        tracing::debug!(kind = %err.kind, offset = err.offset, "parse failed");
        self.errors.push(err);
    }
}
