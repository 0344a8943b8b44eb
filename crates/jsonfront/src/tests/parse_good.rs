use alloc::{collections::BTreeMap, string::String, string::ToString, vec, vec::Vec};

use rstest::rstest;

use crate::{
    DEFAULT_MAX_DEPTH, DefaultConfig, Minified, ParseOptions, Parser, Validated,
    ValidatedMinified, Value,
};

#[rstest]
#[case(b"{}", "{}")]
#[case(b"[]", "[]")]
#[case(b" \n\t{ } ", "{}")]
#[case(br#"{"k":[1,2,3]}"#, r#"{"k":[1,2,3]}"#)]
#[case(br#"[null,true,false,-0.5,"s"]"#, r#"[null,true,false,-0.5,"s"]"#)]
#[case(br#"{"a":{"b":{"c":[[],{}]}}}"#, r#"{"a":{"b":{"c":[[],{}]}}}"#)]
#[case(br#"["\u00e9\n"]"#, "[\"\u{e9}\\n\"]")]
fn balanced_documents_parse(#[case] input: &[u8], #[case] expected: &str) {
    let mut parser = Parser::new();
    let mut value = Value::Null;
    assert!(parser.parse_into::<DefaultConfig, _>(&mut value, input));
    assert!(parser.errors().is_empty());
    assert_eq!(value.to_string(), expected);
}

#[test]
fn every_config_accepts_minified_input() {
    let input = br#"{"a":[1,{"b":null}],"c":"d"}"#;
    let mut parser = Parser::new();
    let expected = parser.parse::<Value, DefaultConfig>(input);
    assert_eq!(parser.parse::<Value, Minified>(input), expected);
    assert_eq!(parser.parse::<Value, Validated>(input), expected);
    assert_eq!(parser.parse::<Value, ValidatedMinified>(input), expected);
    assert!(parser.errors().is_empty());
}

#[test]
fn typed_targets() {
    let mut parser = Parser::new();

    let v: Vec<u16> = parser.parse::<_, DefaultConfig>(b"[1, 2, 65535]");
    assert_eq!(v, vec![1, 2, 65535]);

    let m: BTreeMap<String, Option<bool>> =
        parser.parse::<_, DefaultConfig>(br#"{"x":true,"y":null}"#);
    assert_eq!(m["x"], Some(true));
    assert_eq!(m["y"], None);

    let nested: Vec<Vec<String>> = parser.parse::<_, DefaultConfig>(br#"[["a"],[],["b","c"]]"#);
    assert_eq!(nested, vec![vec!["a"], vec![], vec!["b", "c"]]);
}

#[test]
fn parse_into_reuses_the_target() {
    let mut parser = Parser::new();
    let mut v = vec![7u8; 5];
    assert!(parser.parse_into::<DefaultConfig, _>(&mut v, b"[1]"));
    assert_eq!(v, vec![1]);
}

#[test]
fn depth_limit_is_inclusive() {
    let mut parser = Parser::new();
    let depth = parser.max_depth();
    let mut input = "[".repeat(depth);
    input.push_str(&"]".repeat(depth));
    let mut value = Value::Null;
    assert!(parser.parse_into::<DefaultConfig, _>(&mut value, &input));
    assert_eq!(value.depth(), depth);
}

/// Alternating object and array levels around a number leaf, written the way
/// `Value`'s encoder writes them.
fn nested_document(depth: usize) -> String {
    let mut out = String::new();
    for level in 0..depth {
        out.push_str(if level % 2 == 0 { r#"{"k":"# } else { "[" });
    }
    out.push_str("-2.5");
    for level in (0..depth).rev() {
        out.push(if level % 2 == 0 { '}' } else { ']' });
    }
    out
}

#[rstest]
#[case(1)]
#[case(64)]
#[case(DEFAULT_MAX_DEPTH)]
fn deep_documents_roundtrip(#[case] depth: usize) {
    let input = nested_document(depth);
    let mut parser = Parser::new();
    let mut first = Value::Null;
    assert!(parser.parse_into::<DefaultConfig, _>(&mut first, &input));
    assert_eq!(first.depth(), depth);

    let rendered = first.to_string();
    assert_eq!(rendered, input);

    let mut reparsed = Value::Null;
    assert!(parser.parse_into::<Validated, _>(&mut reparsed, &rendered));
    assert!(parser.errors().is_empty());
    assert_eq!(reparsed, first);
}

#[test]
fn trailing_whitespace_after_root() {
    let mut parser = Parser::new();
    let mut value = Value::Null;
    assert!(parser.parse_into::<DefaultConfig, _>(&mut value, b"{} \r\n"));
    assert!(parser.parse_into::<Validated, _>(&mut value, b"[1] "));
}

#[test]
fn runtime_options_dispatch() {
    let mut parser = Parser::new();
    for (validate_json, minified) in [(false, false), (false, true), (true, false), (true, true)] {
        let options = ParseOptions { validate_json, minified };
        let v: Value = parser.parse_with(options, b"[1,[2]]");
        assert_eq!(v.to_string(), "[1,[2]]");
        assert!(parser.errors().is_empty());
    }
}

#[test]
fn trailing_bytes_pass_without_validation() {
    let mut parser = Parser::new();
    let mut value = Value::Null;
    assert!(parser.parse_into::<DefaultConfig, _>(&mut value, b"[] trailing"));
    assert!(!parser.parse_into::<Validated, _>(&mut value, b"[] trailing"));
}
