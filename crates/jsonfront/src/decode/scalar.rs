use alloc::{boxed::Box, string::String};

use super::{Decode, DecodeResult, decode_literal, decode_str, number_str, peek_token, unexpected};
use crate::{Cursor, ErrorClass, ErrorKind, ParseConfig, ParseContext};

impl Decode for bool {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        match peek_token(cx, cursor)? {
            b't' => {
                decode_literal(cx, cursor, b"true")?;
                *self = true;
            }
            b'f' => {
                decode_literal(cx, cursor, b"false")?;
                *self = false;
            }
            b => return Err(unexpected(cx, cursor, b, "boolean")),
        }
        Ok(())
    }
}

/// `null`
impl Decode for () {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        match peek_token(cx, cursor)? {
            b'n' => decode_literal(cx, cursor, b"null"),
            b => Err(unexpected(cx, cursor, b, "null")),
        }
    }
}

macro_rules! decode_float {
    ($($ty:ty),*) => {$(
        impl Decode for $ty {
            fn decode<C: ParseConfig>(
                &mut self,
                cx: &mut ParseContext<'_, '_, C>,
                cursor: &mut Cursor<'_>,
            ) -> DecodeResult {
                let b = peek_token(cx, cursor)?;
                if !matches!(b, b'-' | b'0'..=b'9') {
                    return Err(unexpected(cx, cursor, b, "number"));
                }
                let start = cursor.position();
                let text = number_str(cx, cursor)?;
                match text.parse::<$ty>() {
                    Ok(n) if n.is_finite() => {
                        *self = n;
                        Ok(())
                    }
                    Ok(_) => Err(cx.report_at(ErrorClass::Parsing, ErrorKind::NumberOutOfRange, start)),
                    Err(_) => Err(cx.report_at(ErrorClass::Parsing, ErrorKind::InvalidNumber, start)),
                }
            }
        }
    )*};
}

decode_float!(f32, f64);

macro_rules! decode_int {
    ($($ty:ty),*) => {$(
        impl Decode for $ty {
            fn decode<C: ParseConfig>(
                &mut self,
                cx: &mut ParseContext<'_, '_, C>,
                cursor: &mut Cursor<'_>,
            ) -> DecodeResult {
                let b = peek_token(cx, cursor)?;
                if !matches!(b, b'-' | b'0'..=b'9') {
                    return Err(unexpected(cx, cursor, b, "integer"));
                }
                let start = cursor.position();
                let text = number_str(cx, cursor)?;
                if text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
                    return Err(cx.report_at(
                        ErrorClass::Parsing,
                        ErrorKind::WrongType { expected: "integer" },
                        start,
                    ));
                }
                // `-0` is a valid integer, but unsigned `parse` rejects the sign.
                let text = if text == "-0" { "0" } else { text };
                match text.parse::<$ty>() {
                    Ok(n) => {
                        *self = n;
                        Ok(())
                    }
                    Err(_) => Err(cx.report_at(ErrorClass::Parsing, ErrorKind::NumberOutOfRange, start)),
                }
            }
        }
    )*};
}

decode_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Decode for String {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        let b = peek_token(cx, cursor)?;
        if b != b'"' {
            return Err(unexpected(cx, cursor, b, "string"));
        }
        let text = decode_str(cx, cursor)?;
        self.clear();
        self.push_str(&text);
        Ok(())
    }
}

/// `null` decodes to `None`; anything else decodes into the inner value,
/// reusing it when already present.
impl<T: Decode + Default> Decode for Option<T> {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        if peek_token(cx, cursor)? == b'n' {
            decode_literal(cx, cursor, b"null")?;
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).decode(cx, cursor)
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        (**self).decode(cx, cursor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;
    use crate::{DefaultConfig, Halt, ParseError};

    fn run<T: Decode>(target: &mut T, input: &[u8]) -> (DecodeResult, Vec<ParseError>) {
        let mut sink = Vec::new();
        let mut cursor = Cursor::new(input);
        let mut cx = ParseContext::<DefaultConfig>::new(&mut sink, input, 16);
        let result = target.decode(&mut cx, &mut cursor);
        (result, sink)
    }

    #[rstest]
    #[case(b" 42", 42)]
    #[case(b"-7", -7)]
    #[case(b"0", 0)]
    fn integers(#[case] input: &[u8], #[case] expected: i64) {
        let mut n = 0i64;
        assert_eq!(run(&mut n, input).0, Ok(()));
        assert_eq!(n, expected);
    }

    #[rstest]
    #[case(b"1.5", ErrorKind::WrongType { expected: "integer" })]
    #[case(b"1e3", ErrorKind::WrongType { expected: "integer" })]
    #[case(b"300", ErrorKind::NumberOutOfRange)]
    #[case(b"-1", ErrorKind::NumberOutOfRange)]
    #[case(b"\"1\"", ErrorKind::WrongType { expected: "integer" })]
    #[case(b"x", ErrorKind::UnexpectedCharacter(b'x'))]
    fn u8_rejections(#[case] input: &[u8], #[case] kind: ErrorKind) {
        let mut n = 0u8;
        let (result, errors) = run(&mut n, input);
        assert_eq!(result, Err(Halt::Reported));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, kind);
        assert_eq!(errors[0].offset, 0);
    }

    #[test]
    fn negative_zero_fits_every_integer() {
        let mut n = 7u8;
        assert_eq!(run(&mut n, b"-0").0, Ok(()));
        assert_eq!(n, 0);
        let mut n = 7u64;
        assert_eq!(run(&mut n, b"-0").0, Ok(()));
        assert_eq!(n, 0);
        let mut n = 7i32;
        assert_eq!(run(&mut n, b"-0").0, Ok(()));
        assert_eq!(n, 0);

        let mut v: Vec<u16> = Vec::new();
        assert_eq!(run(&mut v, b"[-0, 0]").0, Ok(()));
        assert_eq!(v, [0, 0]);
    }

    #[test]
    fn floats_reject_overflow() {
        let mut x = 0.0f64;
        assert_eq!(run(&mut x, b"-12.5e1").0, Ok(()));
        assert!((x + 125.0).abs() < f64::EPSILON);

        let (result, errors) = run(&mut x, b"1e400");
        assert_eq!(result, Err(Halt::Reported));
        assert_eq!(errors[0].kind, ErrorKind::NumberOutOfRange);
    }

    #[test]
    fn truncated_scalars_are_incomplete() {
        let mut b = false;
        assert_eq!(run(&mut b, b"tru").0, Err(Halt::Incomplete));
        let mut s = String::new();
        assert_eq!(run(&mut s, b"\"abc").0, Err(Halt::Incomplete));
        let mut x = 0.0f64;
        assert_eq!(run(&mut x, b"1.").0, Err(Halt::Incomplete));
    }

    #[test]
    fn strings_replace_previous_contents() {
        let mut s = String::from("old");
        assert_eq!(run(&mut s, br#""a\tb""#).0, Ok(()));
        assert_eq!(s, "a\tb");
    }

    #[test]
    fn option_and_unit_take_null() {
        let mut v: Option<bool> = Some(true);
        assert_eq!(run(&mut v, b"null").0, Ok(()));
        assert_eq!(v, None);
        assert_eq!(run(&mut v, b"false").0, Ok(()));
        assert_eq!(v, Some(false));
        assert_eq!(run(&mut (), b"null").0, Ok(()));

        let (result, errors) = run(&mut (), b"nul!");
        assert_eq!(result, Err(Halt::Reported));
        assert_eq!(errors[0].kind, ErrorKind::InvalidLiteral);
    }
}
