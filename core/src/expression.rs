//! Grammar for raw token values: alias detection and `parseFloat`-style
//! numeric prefixes.

/// One piece of a raw string value.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    /// `{a.b.c}`, stored as its dotted path.
    Ref(Vec<String>),
}

/// A raw string split into literal text and aliases, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub segments: Vec<Segment>,
}
impl Expression {
    pub fn parse(raw: &str) -> Self {
        let segments = expr_parser::segments(raw)
            .unwrap_or_else(|_| vec![Segment::Literal(raw.to_string())]);
        Expression { segments }
    }
    pub fn has_refs(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Ref(_)))
    }
    pub fn refs(&self) -> impl Iterator<Item = &[String]> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Ref(path) => Some(path.as_slice()),
            Segment::Literal(_) => None,
        })
    }
}

/// `parseFloat`: skips leading whitespace, reads the longest numeric prefix,
/// `NaN` when there is none.
pub fn parse_float(raw: &str) -> f64 {
    expr_parser::float_prefix(raw).unwrap_or(f64::NAN)
}

peg::parser! {
  grammar expr_parser() for str {
    rule ws() = quiet!{[' ' | '\n' | '\t' | '\r']*}

    rule reference() -> Segment
        = "{" v:$((!"}" [_])+) "}" { Segment::Ref(v.split('.').map(|x| x.to_string()).collect()) }

    rule literal() -> Segment
        = v:$((!reference() [_])+) { Segment::Literal(v.to_string()) }

    pub(crate) rule segments() -> Vec<Segment> = (reference() / literal())*

    rule digits() = ['0'..='9']+
    rule mantissa() = digits() ("." ['0'..='9']*)? / "." digits()
    rule exponent() = ['e' | 'E'] ['+' | '-']? digits()

    pub(crate) rule float_prefix() -> f64
        = ws() n:$(['+' | '-']? ("Infinity" / mantissa() exponent()?)) [_]* {
            n.parse().unwrap_or(f64::NAN)
        }
  }
}

#[test]
fn test() {
    assert_eq!(
        Expression::parse("{color.white}").segments,
        vec![Segment::Ref(vec!["color".to_string(), "white".to_string()])]
    );
    assert_eq!(
        Expression::parse("#ff00ff").segments,
        vec![Segment::Literal("#ff00ff".to_string())]
    );
    assert_eq!(
        Expression::parse("{space.1} {space.2}").segments,
        vec![
            Segment::Ref(vec!["space".to_string(), "1".to_string()]),
            Segment::Literal(" ".to_string()),
            Segment::Ref(vec!["space".to_string(), "2".to_string()]),
        ]
    );
    assert!(!Expression::parse("{}").has_refs());
    assert!(!Expression::parse("a { b").has_refs());
    assert!(Expression::parse("calc({size.base} * 2)").has_refs());
    assert_eq!(Expression::parse("").segments, vec![]);
}

#[test]
fn float_prefixes() {
    assert_eq!(parse_float("32"), 32.0);
    assert_eq!(parse_float("  16px"), 16.0);
    assert_eq!(parse_float("1.5rem"), 1.5);
    assert_eq!(parse_float(".5"), 0.5);
    assert_eq!(parse_float("-4"), -4.0);
    assert_eq!(parse_float("2e3"), 2000.0);
    assert_eq!(parse_float("2e"), 2.0);
    assert_eq!(parse_float("Infinity"), f64::INFINITY);
    assert!(parse_float("abc").is_nan());
    assert!(parse_float("").is_nan());
    assert!(parse_float("%50").is_nan());
}
