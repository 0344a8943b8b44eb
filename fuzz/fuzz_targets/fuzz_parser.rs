#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonfront::{DefaultConfig, ParseOptions, Parser, Value};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::Map;

const HEADER: usize = 1; // option flags

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Mostly byte-level mutation; every tenth run writes a fresh serialized
/// document, optionally cut short, so the corpus keeps deep and balanced
/// inputs around.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);
        let limit = max_size - HEADER;
        let mut len = HEADER;
        len += append_whitespace(&mut data[len..], limit);
        len += append_document(&mut data[len..], size, max_size - len);
        if with_rng(|rng| rng.random_bool(0.3)) && len > HEADER + 1 {
            len = with_rng(|rng| rng.random_range(HEADER + 1..len));
        }
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        let n = rng.random_range(0..=limit.min(4));
        let mut written = 0;
        for _ in 0..n {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_document(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2 + 1));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryDocument::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("serialize arbitrary value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => serde_json::Value::Null,
            1 => serde_json::Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                serde_json::Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => serde_json::Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                serde_json::Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                serde_json::Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// A value with an object or array at the root.
#[derive(Debug)]
struct ArbitraryDocument(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryDocument {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(match ArbitraryValue::arbitrary(u)?.0 {
            v @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => Self(v),
            v => Self(serde_json::Value::Array(vec![v])),
        })
    }
}

fn parse(data: &[u8]) {
    let Some((&flags, input)) = data.split_first() else {
        return;
    };
    let options = ParseOptions {
        validate_json: flags & 1 != 0,
        minified: flags & 2 != 0,
    };

    let mut parser = Parser::new();
    let mut value = Value::Null;
    let ok = parser.parse_into_with(options, &mut value, input);

    if !ok {
        assert_eq!(parser.errors().len(), 1, "{:?}", parser.errors());
        return;
    }
    assert!(parser.errors().is_empty());
    assert!(value.as_array().is_some() || value.as_object().is_some());

    if options.validate_json && value.depth() < 100 {
        assert!(serde_json::from_slice::<serde_json::Value>(input).is_ok());
    }

    let rendered = value.to_string();
    let reparsed: Value = parser.parse::<Value, DefaultConfig>(&rendered);
    assert!(parser.errors().is_empty(), "{rendered}: {:?}", parser.errors());
    assert_eq!(reparsed, value);
}

fuzz_target!(|data: &[u8]| parse(data));
