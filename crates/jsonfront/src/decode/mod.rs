//! Recursive, shape-specific decoding.
//!
//! Each [`Decode`] impl consumes exactly one JSON value from the cursor and
//! writes it into `self`. Objects and arrays go through [`decode_object`] and
//! [`decode_array`], which are the only places that move the context's depth
//! counters.
//!
//! Decoding never recovers: the first problem either records an error and
//! returns [`Halt::Reported`], or, when the input simply runs out, returns
//! [`Halt::Incomplete`] and leaves the depth counters as they are so the
//! facade can report which container was left open.

mod composite;
mod scalar;

use alloc::borrow::Cow;

use crate::{
    Cursor, ErrorClass, ErrorKind, ParseConfig, ParseContext,
    scan::{self, ScanError},
};

/// Why decoding stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Input ended, or a closer for a different container kind was consumed.
    /// Nothing was recorded; the depth counters tell what is unbalanced.
    Incomplete,
    /// An error was pushed to the sink.
    Reported,
}

/// Outcome of one decode step.
pub type DecodeResult = Result<(), Halt>;

/// A type that can be filled in from one JSON value.
///
/// User record types implement this with [`decode_object`], matching on keys
/// and skipping unknown ones with [`Ignored`]:
///
/// ```rust
/// use jsonfront::{
///     Cursor, Decode, DecodeResult, DefaultConfig, Ignored, ParseConfig, ParseContext, Parser,
///     decode_object,
/// };
///
/// #[derive(Default)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Decode for Point {
///     fn decode<C: ParseConfig>(
///         &mut self,
///         cx: &mut ParseContext<'_, '_, C>,
///         cursor: &mut Cursor<'_>,
///     ) -> DecodeResult {
///         decode_object(cx, cursor, |cx, cursor, key| match key {
///             "x" => self.x.decode(cx, cursor),
///             "y" => self.y.decode(cx, cursor),
///             _ => Ignored.decode(cx, cursor),
///         })
///     }
/// }
///
/// let mut parser = Parser::new();
/// let p: Point = parser.parse::<Point, DefaultConfig>(br#"{"x":1,"z":[],"y":-2}"#);
/// assert_eq!((p.x, p.y), (1, -2));
/// ```
pub trait Decode {
    /// Consume one value at the cursor into `self`.
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult;
}

/// Consumes and discards any JSON value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ignored;

impl Decode for Ignored {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        match peek_token(cx, cursor)? {
            b'{' => decode_object(cx, cursor, |cx, cursor, _| Ignored.decode(cx, cursor)),
            b'[' => decode_array(cx, cursor, |cx, cursor| Ignored.decode(cx, cursor)),
            b'"' => skip_str(cx, cursor),
            b't' => decode_literal(cx, cursor, b"true"),
            b'f' => decode_literal(cx, cursor, b"false"),
            b'n' => decode_literal(cx, cursor, b"null"),
            b'-' | b'0'..=b'9' => number_str(cx, cursor).map(drop),
            b => Err(cx.report(ErrorKind::UnexpectedCharacter(b), cursor)),
        }
    }
}

/// Decode an object, calling `entry` with the cursor on each member's value.
///
/// `entry` must consume exactly one value.
pub fn decode_object<'a, C, F>(
    cx: &mut ParseContext<'_, '_, C>,
    cursor: &mut Cursor<'a>,
    mut entry: F,
) -> DecodeResult
where
    C: ParseConfig,
    F: FnMut(&mut ParseContext<'_, '_, C>, &mut Cursor<'a>, &str) -> DecodeResult,
{
    let b = peek_token(cx, cursor)?;
    if b != b'{' {
        return Err(unexpected(cx, cursor, b, "object"));
    }
    cx.open_object(cursor)?;
    cursor.bump();
    match peek_token(cx, cursor)? {
        b'}' => {
            cursor.bump();
            cx.close_object();
            return Ok(());
        }
        b']' => return Err(stray_array_closer(cx, cursor)),
        _ => {}
    }
    loop {
        let key = decode_key(cx, cursor)?;
        if peek_token(cx, cursor)? != b':' {
            return Err(cx.report(ErrorKind::MissingColon, cursor));
        }
        cursor.bump();
        entry(cx, cursor, &key)?;
        match peek_token(cx, cursor)? {
            b',' => cursor.bump(),
            b'}' => {
                cursor.bump();
                cx.close_object();
                return Ok(());
            }
            b']' => return Err(stray_array_closer(cx, cursor)),
            _ => return Err(cx.report(ErrorKind::MissingComma, cursor)),
        }
    }
}

/// Decode an array, calling `element` with the cursor on each element.
///
/// `element` must consume exactly one value.
pub fn decode_array<'a, C, F>(
    cx: &mut ParseContext<'_, '_, C>,
    cursor: &mut Cursor<'a>,
    mut element: F,
) -> DecodeResult
where
    C: ParseConfig,
    F: FnMut(&mut ParseContext<'_, '_, C>, &mut Cursor<'a>) -> DecodeResult,
{
    let b = peek_token(cx, cursor)?;
    if b != b'[' {
        return Err(unexpected(cx, cursor, b, "array"));
    }
    cx.open_array(cursor)?;
    cursor.bump();
    match peek_token(cx, cursor)? {
        b']' => {
            cursor.bump();
            cx.close_array();
            return Ok(());
        }
        b'}' => return Err(stray_object_closer(cx, cursor)),
        _ => {}
    }
    loop {
        element(cx, cursor)?;
        match peek_token(cx, cursor)? {
            b',' => cursor.bump(),
            b']' => {
                cursor.bump();
                cx.close_array();
                return Ok(());
            }
            b'}' => return Err(stray_object_closer(cx, cursor)),
            _ => return Err(cx.report(ErrorKind::MissingComma, cursor)),
        }
    }
}

/// Decode an object key, borrowing from the input when it has no escapes.
pub fn decode_key<'a, C: ParseConfig>(
    cx: &mut ParseContext<'_, '_, C>,
    cursor: &mut Cursor<'a>,
) -> Result<Cow<'a, str>, Halt> {
    if peek_token(cx, cursor)? != b'"' {
        return Err(cx.report(ErrorKind::ExpectedKey, cursor));
    }
    decode_str(cx, cursor)
}

/// Skip whitespace and return the first byte of the next token.
pub(crate) fn peek_token<C: ParseConfig>(
    cx: &ParseContext<'_, '_, C>,
    cursor: &mut Cursor<'_>,
) -> Result<u8, Halt> {
    cx.skip_whitespace(cursor);
    cursor.peek().ok_or(Halt::Incomplete)
}

/// The cursor is on the opening quote.
pub(crate) fn decode_str<'a, C: ParseConfig>(
    cx: &mut ParseContext<'_, '_, C>,
    cursor: &mut Cursor<'a>,
) -> Result<Cow<'a, str>, Halt> {
    let input = cursor.input();
    let start = cursor.position() + 1;
    let span = scan::scan_string(input, start).map_err(|e| scan_failed(cx, e))?;
    cursor.seek(span.close + 1);
    let raw = &input[start..span.close];
    let text = if span.escaped {
        scan::unescape(raw).map(Cow::Owned)
    } else {
        core::str::from_utf8(raw).ok().map(Cow::Borrowed)
    };
    text.ok_or_else(|| cx.report_at(ErrorClass::Parsing, ErrorKind::InvalidEscape, start))
}

fn skip_str<C: ParseConfig>(cx: &mut ParseContext<'_, '_, C>, cursor: &mut Cursor<'_>) -> DecodeResult {
    let span = scan::scan_string(cursor.input(), cursor.position() + 1).map_err(|e| scan_failed(cx, e))?;
    cursor.seek(span.close + 1);
    Ok(())
}

/// The cursor is on the first byte of `word`.
pub(crate) fn decode_literal<C: ParseConfig>(
    cx: &mut ParseContext<'_, '_, C>,
    cursor: &mut Cursor<'_>,
    word: &[u8],
) -> DecodeResult {
    let end = scan::scan_literal(cursor.input(), cursor.position(), word).map_err(|e| scan_failed(cx, e))?;
    cursor.seek(end);
    Ok(())
}

/// The raw text of the number at the cursor.
pub(crate) fn number_str<'a, C: ParseConfig>(
    cx: &mut ParseContext<'_, '_, C>,
    cursor: &mut Cursor<'a>,
) -> Result<&'a str, Halt> {
    let input = cursor.input();
    let start = cursor.position();
    let end = if cx.validating() {
        scan::skip_number(input, start)
    } else {
        scan::scan_number(input, start).map_err(|e| scan_failed(cx, e))?
    };
    cursor.seek(end);
    core::str::from_utf8(&input[start..end])
        .map_err(|_| cx.report_at(ErrorClass::Parsing, ErrorKind::InvalidNumber, start))
}

#[track_caller]
pub(crate) fn scan_failed<C: ParseConfig>(cx: &mut ParseContext<'_, '_, C>, err: ScanError) -> Halt {
    match err {
        ScanError::Incomplete => Halt::Incomplete,
        ScanError::Invalid(kind, at) => cx.report_at(ErrorClass::Parsing, kind, at),
    }
}

/// `found` is not the start of a value of type `expected`.
#[track_caller]
pub(crate) fn unexpected<C: ParseConfig>(
    cx: &mut ParseContext<'_, '_, C>,
    cursor: &Cursor<'_>,
    found: u8,
    expected: &'static str,
) -> Halt {
    let kind = if matches!(found, b'{' | b'[' | b'"' | b't' | b'f' | b'n' | b'-' | b'0'..=b'9') {
        ErrorKind::WrongType { expected }
    } else {
        ErrorKind::UnexpectedCharacter(found)
    };
    cx.report(kind, cursor)
}

fn stray_array_closer<C: ParseConfig>(cx: &mut ParseContext<'_, '_, C>, cursor: &mut Cursor<'_>) -> Halt {
    cursor.bump();
    cx.close_array();
    Halt::Incomplete
}

fn stray_object_closer<C: ParseConfig>(cx: &mut ParseContext<'_, '_, C>, cursor: &mut Cursor<'_>) -> Halt {
    cursor.bump();
    cx.close_object();
    Halt::Incomplete
}
