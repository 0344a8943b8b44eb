#![allow(missing_docs)]

use jsonfront::{Map, Parser, Validated, ValidatedMinified, Value};
use rstest::rstest;

fn from_serde(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().expect("finite number")),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(a) => Value::Array(a.into_iter().map(from_serde).collect()),
        serde_json::Value::Object(m) => {
            Value::Object(m.into_iter().map(|(k, v)| (k, from_serde(v))).collect::<Map>())
        }
    }
}

#[rstest]
#[case("{}")]
#[case("[]")]
#[case(r#"{"k":[1,2,3]}"#)]
#[case(" [ 1.5e3 , -0.25 , 0 , 1E-2 ] ")]
#[case(r#"{"a":{"b":[true,false,null]},"c":"d"}"#)]
#[case(r#"["A\n\t\\\/\"","😀"]"#)]
#[case(r#"{"dup":1,"dup":2}"#)]
#[case("[\"caf\u{e9}\",\"\u{4e2d}\u{6587}\"]")]
fn accepted_documents_agree(#[case] input: &str) {
    let expected = from_serde(serde_json::from_str(input).expect("serde_json accepts"));
    let mut parser = Parser::new();
    let value: Value = parser.parse::<Value, Validated>(input);
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
    assert_eq!(value, expected);
}

#[rstest]
#[case("[1,]")]
#[case(r#"{"a":1,}"#)]
#[case("[01]")]
#[case("[1.]")]
#[case("[.5]")]
#[case("[+1]")]
#[case("[tru]")]
#[case(r#"["\x"]"#)]
#[case(r#"["\ud800"]"#)]
#[case("[\"a\tb\"]")]
#[case("{} []")]
#[case("[1] x")]
#[case("{\"a\" 1}")]
#[case("[1 2]")]
#[case("[")]
fn rejected_documents_agree(#[case] input: &str) {
    assert!(serde_json::from_str::<serde_json::Value>(input).is_err());
    let mut parser = Parser::new();
    let mut value = Value::Null;
    assert!(!parser.parse_into::<Validated, _>(&mut value, input));
    assert_eq!(parser.errors().len(), 1);
}

#[test]
fn serde_json_output_parses_minified() {
    let doc = serde_json::json!({
        "moderation": { "decision": "allow", "reason": null },
        "snippets": ["fn main() {}", "println!(\"hi\")"],
        "scores": [0.5, 1, -3],
    });
    let compact = serde_json::to_string(&doc).expect("serialize");
    let mut parser = Parser::new();
    let value: Value = parser.parse::<Value, ValidatedMinified>(&compact);
    assert!(parser.errors().is_empty());
    assert_eq!(value, from_serde(doc));
}
