use weft::{ParseState, Parser};
use weft_grammars::json::{self, JsonObject, JsonValue};

fn object<const N: usize>(members: [(&str, JsonValue); N]) -> JsonValue {
    JsonValue::Object(
        members
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect::<JsonObject>(),
    )
}

#[test]
fn empty_object() {
    assert_eq!(
        json::parser().parse("{}"),
        Ok(ParseState::new(object([]), ""))
    );
}

#[test]
fn nested_document() {
    let document = r#"
   {
     "foo"   :    "bar"   ,
     "hello": {
        "world": true
     },
     "stuff":  [  "something" ,   true, null]
}
"#;

    let expected = object([
        ("foo", JsonValue::String("bar".into())),
        ("hello", object([("world", JsonValue::Bool(true))])),
        (
            "stuff",
            JsonValue::Array(vec![
                JsonValue::String("something".into()),
                JsonValue::Bool(true),
                JsonValue::Null,
            ]),
        ),
    ]);

    assert_eq!(
        json::parser().parse(document),
        Ok(ParseState::new(expected.clone(), ""))
    );
    assert_eq!(document.parse::<JsonValue>(), Ok(expected));
}

#[test]
fn parser_is_reusable() {
    let parser = json::parser();
    let copy = parser.clone();
    drop(parser);
    for input in ["[1]", "[[2]]", "{\"a\": [3]}"] {
        assert!(copy.parse_complete(input).is_ok(), "{input:?}");
    }
}

#[test]
fn deep_nesting() {
    let depth = 64;
    let input = "[".repeat(depth) + &"]".repeat(depth);
    let mut value = json::parse(&input).unwrap();
    let mut seen = 1;
    while let JsonValue::Array(mut items) = value {
        match items.pop() {
            Some(inner) => {
                value = inner;
                seen += 1;
            }
            None => break,
        }
    }
    assert_eq!(seen, depth);
}

#[test]
fn long_arrays() {
    let input = format!("[{}0]", "0,".repeat(50_000));
    let value = json::parse(&input).unwrap();
    assert_eq!(value.as_array().map(<[_]>::len), Some(50_001));
}

#[test]
fn rejection_is_a_diagnostic() {
    let error = json::parse("{\"a\": }").unwrap_err();
    assert!(matches!(error, weft::ParseError::Rejected(_)));
    assert!(error.to_string().contains("Invalid input"));
}
