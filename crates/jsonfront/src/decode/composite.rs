use alloc::{collections::BTreeMap, string::String, vec::Vec};

use super::{Decode, DecodeResult, decode_array, decode_literal, decode_object, decode_str, peek_token};
use crate::{Array, Cursor, ErrorKind, Map, ParseConfig, ParseContext, Value};

/// Replaces the vector's contents with the decoded elements.
impl<T: Decode + Default> Decode for Vec<T> {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        self.clear();
        decode_array(cx, cursor, |cx, cursor| {
            let mut item = T::default();
            item.decode(cx, cursor)?;
            self.push(item);
            Ok(())
        })
    }
}

/// Replaces the map's contents; a repeated key keeps its last value.
impl<T: Decode + Default> Decode for BTreeMap<String, T> {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        self.clear();
        decode_object(cx, cursor, |cx, cursor, key| {
            let mut item = T::default();
            item.decode(cx, cursor)?;
            self.insert(String::from(key), item);
            Ok(())
        })
    }
}

impl Decode for Value {
    fn decode<C: ParseConfig>(
        &mut self,
        cx: &mut ParseContext<'_, '_, C>,
        cursor: &mut Cursor<'_>,
    ) -> DecodeResult {
        *self = match peek_token(cx, cursor)? {
            b'{' => {
                let mut map = Map::new();
                map.decode(cx, cursor)?;
                Value::Object(map)
            }
            b'[' => {
                let mut array = Array::new();
                array.decode(cx, cursor)?;
                Value::Array(array)
            }
            b'"' => Value::String(decode_str(cx, cursor)?.into_owned()),
            b't' => {
                decode_literal(cx, cursor, b"true")?;
                Value::Boolean(true)
            }
            b'f' => {
                decode_literal(cx, cursor, b"false")?;
                Value::Boolean(false)
            }
            b'n' => {
                decode_literal(cx, cursor, b"null")?;
                Value::Null
            }
            b'-' | b'0'..=b'9' => {
                let mut n = 0.0f64;
                n.decode(cx, cursor)?;
                Value::Number(n)
            }
            b => return Err(cx.report(ErrorKind::UnexpectedCharacter(b), cursor)),
        };
        Ok(())
    }
}
