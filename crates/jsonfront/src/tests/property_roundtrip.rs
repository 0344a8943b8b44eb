use alloc::string::ToString;

use quickcheck::QuickCheck;

use super::arbitrary::Document;
use crate::{DefaultConfig, ParseOptions, Parser, Value};

/// Property: a serialized container document parses back to the same value
/// under every configuration.
#[test]
fn display_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, options: ParseOptions) -> bool {
        let src = doc.0.to_string();
        let mut parser = Parser::new();
        let mut value = Value::Null;
        parser.parse_into_with(options, &mut value, &src) && value == doc.0
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Document, ParseOptions) -> bool);
}

/// Property: parsing the same buffer twice gives the same outcome and
/// the same errors.
#[test]
fn repeated_calls_are_idempotent() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, cut: usize) -> bool {
        let src = doc.0.to_string();
        let cut = cut % (src.len() + 1);
        let input = &src.as_bytes()[..cut];

        let mut parser = Parser::new();
        let mut first = Value::Null;
        let ok = parser.parse_into::<DefaultConfig, _>(&mut first, input);
        let errors = parser.errors().to_vec();

        let mut second = Value::Null;
        ok == parser.parse_into::<DefaultConfig, _>(&mut second, input)
            && errors == parser.errors()
            && (!ok || first == second)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Document, usize) -> bool);
}

/// Property: a strict prefix of a document never parses successfully.
#[test]
fn truncated_documents_fail() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, cut: usize) -> bool {
        let src = doc.0.to_string();
        let cut = cut % src.len();
        let mut parser = Parser::new();
        let mut value = Value::Null;
        !parser.parse_into::<DefaultConfig, _>(&mut value, &src.as_bytes()[..cut])
            && parser.errors().len() == 1
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Document, usize) -> bool);
}
