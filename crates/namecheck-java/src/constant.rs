//! Compile-time constant folding for field initializers.
//!
//! A `final` field of primitive or `String` type whose initializer is a
//! constant expression gets a [`ConstantValue`]. Constant expressions are
//! literals, names of constants declared earlier in an enclosing type, and
//! unary, binary, cast, conditional and parenthesized expressions built from
//! them. Method calls, `new`, array access and the like are not constant.

use std::collections::HashMap;

use namecheck_core::ConstantValue;
use tree_sitter::Node;

/// Returns true if a field of this declared type can hold a constant.
pub(crate) fn is_constant_type(ty: Node<'_>, src: &[u8]) -> bool {
    match ty.kind() {
        "integral_type" | "floating_point_type" | "boolean_type" => true,
        "type_identifier" => ty.utf8_text(src).is_ok_and(|t| t == "String"),
        _ => false,
    }
}

/// A folded value carrying its Java type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Typed {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    /// Character literal body, escapes kept verbatim.
    Char(String),
    String(String),
}

impl From<Typed> for ConstantValue {
    fn from(value: Typed) -> Self {
        match value {
            Typed::Int(v) => Self::Integer(i64::from(v)),
            Typed::Long(v) => Self::Integer(v),
            Typed::Float(v) => Self::Float(f64::from(v)),
            Typed::Double(v) => Self::Float(v),
            Typed::Boolean(v) => Self::Boolean(v),
            Typed::Char(v) => Self::Char(v),
            Typed::String(v) => Self::String(v),
        }
    }
}

/// Constants visible while walking nested type bodies.
#[derive(Debug, Default)]
pub(crate) struct Constants {
    scopes: Vec<Scope>,
}

#[derive(Debug)]
struct Scope {
    type_name: String,
    values: HashMap<String, Option<Typed>>,
}

enum Task<'t> {
    Visit(Node<'t>),
    Combine(Node<'t>, usize),
}

impl Constants {
    /// Opens the body of the type named `type_name`.
    pub(crate) fn enter(&mut self, type_name: &str) {
        self.scopes.push(Scope {
            type_name: type_name.to_string(),
            values: HashMap::new(),
        });
    }

    /// Closes the innermost type body.
    pub(crate) fn leave(&mut self) {
        self.scopes.pop();
    }

    /// Folds the initializer `value` of a field declared with type `ty`.
    pub(crate) fn fold_field(&self, ty: Node<'_>, value: Node<'_>, src: &[u8]) -> Option<Typed> {
        cast(ty, src, self.evaluate(value, src)?)
    }

    /// Declares a field in the innermost type body. A field without a
    /// value still hides constants of the same name in outer types.
    pub(crate) fn define(&mut self, name: &str, value: Option<Typed>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.values.insert(name.to_string(), value);
        }
    }

    /// Folds `expr`, or returns `None` if it is not a constant expression.
    ///
    /// Operands are evaluated with an explicit stack, so long chains such as
    /// string concatenations cannot exhaust the call stack.
    pub(crate) fn evaluate(&self, expr: Node<'_>, src: &[u8]) -> Option<Typed> {
        let mut tasks = vec![Task::Visit(expr)];
        let mut values: Vec<Option<Typed>> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(node) => {
                    let operands = operands(node);
                    if operands.is_empty() {
                        values.push(self.leaf(node, src));
                    } else {
                        tasks.push(Task::Combine(node, operands.len()));
                        tasks.extend(operands.into_iter().rev().map(Task::Visit));
                    }
                }
                Task::Combine(node, arity) => {
                    let args = values.split_off(values.len().saturating_sub(arity));
                    let args: Option<Vec<Typed>> = args.into_iter().collect();
                    values.push(args.and_then(|args| combine(node, args, src)));
                }
            }
        }

        values.pop().flatten()
    }

    fn leaf(&self, node: Node<'_>, src: &[u8]) -> Option<Typed> {
        match node.kind() {
            "identifier" => {
                let name = node.utf8_text(src).ok()?;
                self.scopes
                    .iter()
                    .rev()
                    .find_map(|scope| scope.values.get(name))
                    .cloned()
                    .flatten()
            }
            "field_access" => {
                let object = node.child_by_field_name("object")?.utf8_text(src).ok()?;
                let field = node.child_by_field_name("field")?.utf8_text(src).ok()?;
                let type_name = object.rsplit('.').next()?;
                self.scopes
                    .iter()
                    .rev()
                    .filter(|scope| scope.type_name == type_name)
                    .find_map(|scope| scope.values.get(field))
                    .cloned()
                    .flatten()
            }
            _ => literal(node, src),
        }
    }
}

fn operands(node: Node<'_>) -> Vec<Node<'_>> {
    let fields: &[&str] = match node.kind() {
        "parenthesized_expression" => {
            let mut cursor = node.walk();
            return node
                .named_children(&mut cursor)
                .filter(|child| !child.kind().ends_with("comment"))
                .take(1)
                .collect();
        }
        "unary_expression" => &["operand"],
        "binary_expression" => &["left", "right"],
        "cast_expression" => &["value"],
        "ternary_expression" => &["condition", "consequence", "alternative"],
        _ => return Vec::new(),
    };
    fields
        .iter()
        .filter_map(|field| node.child_by_field_name(field))
        .collect()
}

fn combine(node: Node<'_>, args: Vec<Typed>, src: &[u8]) -> Option<Typed> {
    let operator = || node.child_by_field_name("operator").map(|op| op.kind());
    let mut args = args.into_iter();
    match node.kind() {
        "parenthesized_expression" => args.next(),
        "unary_expression" => unary(operator()?, args.next()?),
        "binary_expression" => {
            let (left, right) = (args.next()?, args.next()?);
            binary(operator()?, left, right)
        }
        "cast_expression" => cast(node.child_by_field_name("type")?, src, args.next()?),
        "ternary_expression" => {
            let (condition, consequence, alternative) = (args.next()?, args.next()?, args.next()?);
            let Typed::Boolean(condition) = condition else {
                return None;
            };
            let (consequence, alternative) = match promote(&consequence, &alternative) {
                Some((l, r)) => (l.into_typed(), r.into_typed()),
                None => (consequence, alternative),
            };
            Some(if condition { consequence } else { alternative })
        }
        _ => None,
    }
}

/// Numeric operand after promotion.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Num {
    /// Unary numeric promotion: `char` widens to `int`.
    fn of(value: &Typed) -> Option<Self> {
        match value {
            Typed::Int(v) => Some(Self::Int(*v)),
            Typed::Long(v) => Some(Self::Long(*v)),
            Typed::Float(v) => Some(Self::Float(*v)),
            Typed::Double(v) => Some(Self::Double(*v)),
            Typed::Char(body) => char_code(body).and_then(|c| i32::try_from(c).ok()).map(Self::Int),
            _ => None,
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Int(_) => 0,
            Self::Long(_) => 1,
            Self::Float(_) => 2,
            Self::Double(_) => 3,
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn widen(self, rank: u8) -> Self {
        let long = match self {
            Self::Int(v) => i64::from(v),
            Self::Long(v) => v,
            Self::Float(v) if rank == 3 => return Self::Double(f64::from(v)),
            Self::Float(_) | Self::Double(_) => return self,
        };
        match rank {
            0 => self,
            1 => Self::Long(long),
            2 => Self::Float(long as f32),
            _ => Self::Double(long as f64),
        }
    }

    fn into_typed(self) -> Typed {
        match self {
            Self::Int(v) => Typed::Int(v),
            Self::Long(v) => Typed::Long(v),
            Self::Float(v) => Typed::Float(v),
            Self::Double(v) => Typed::Double(v),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn as_long(self) -> i64 {
        match self {
            Self::Int(v) => i64::from(v),
            Self::Long(v) => v,
            Self::Float(v) => v as i64,
            Self::Double(v) => v as i64,
        }
    }

    fn as_double(self) -> f64 {
        match self.widen(3) {
            Self::Double(v) => v,
            _ => 0.0,
        }
    }
}

/// Binary numeric promotion.
fn promote(left: &Typed, right: &Typed) -> Option<(Num, Num)> {
    let (l, r) = (Num::of(left)?, Num::of(right)?);
    let rank = l.rank().max(r.rank());
    Some((l.widen(rank), r.widen(rank)))
}

fn unary(operator: &str, operand: Typed) -> Option<Typed> {
    if let Typed::Boolean(b) = operand {
        return (operator == "!").then_some(Typed::Boolean(!b));
    }
    let value = Num::of(&operand)?;
    match (operator, value) {
        ("+", _) => Some(value.into_typed()),
        ("-", Num::Int(v)) => Some(Typed::Int(v.wrapping_neg())),
        ("-", Num::Long(v)) => Some(Typed::Long(v.wrapping_neg())),
        ("-", Num::Float(v)) => Some(Typed::Float(-v)),
        ("-", Num::Double(v)) => Some(Typed::Double(-v)),
        ("~", Num::Int(v)) => Some(Typed::Int(!v)),
        ("~", Num::Long(v)) => Some(Typed::Long(!v)),
        _ => None,
    }
}

fn binary(operator: &str, left: Typed, right: Typed) -> Option<Typed> {
    let concatenates = matches!(left, Typed::String(_)) || matches!(right, Typed::String(_));
    if operator == "+" && concatenates {
        return Some(Typed::String(format!(
            "{}{}",
            to_java_string(&left),
            to_java_string(&right)
        )));
    }

    match (&left, &right) {
        (Typed::Boolean(l), Typed::Boolean(r)) => {
            let (l, r) = (*l, *r);
            return match operator {
                "&&" | "&" => Some(Typed::Boolean(l && r)),
                "||" | "|" => Some(Typed::Boolean(l || r)),
                "^" | "!=" => Some(Typed::Boolean(l != r)),
                "==" => Some(Typed::Boolean(l == r)),
                _ => None,
            };
        }
        (Typed::String(l), Typed::String(r)) => {
            return match operator {
                "==" => Some(Typed::Boolean(l == r)),
                "!=" => Some(Typed::Boolean(l != r)),
                _ => None,
            };
        }
        _ => {}
    }

    if matches!(operator, "<<" | ">>" | ">>>") {
        return shift(operator, Num::of(&left)?, Num::of(&right)?.as_long());
    }

    match promote(&left, &right)? {
        (Num::Int(l), Num::Int(r)) => integral(operator, l, r),
        (Num::Long(l), Num::Long(r)) => integral(operator, l, r),
        (Num::Float(l), Num::Float(r)) => floating(operator, l, r),
        (l, r) => floating(operator, l.as_double(), r.as_double()),
    }
}

/// Shared arithmetic for `int` and `long`.
trait Integral:
    Copy
    + Ord
    + std::ops::BitAnd<Output = Self>
    + std::ops::BitOr<Output = Self>
    + std::ops::BitXor<Output = Self>
{
    const ZERO: Self;
    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn mul(self, other: Self) -> Self;
    fn div(self, other: Self) -> Self;
    fn rem(self, other: Self) -> Self;
    fn typed(self) -> Typed;
}

macro_rules! integral {
    ($ty:ty, $variant:ident) => {
        impl Integral for $ty {
            const ZERO: Self = 0;
            fn add(self, other: Self) -> Self {
                self.wrapping_add(other)
            }
            fn sub(self, other: Self) -> Self {
                self.wrapping_sub(other)
            }
            fn mul(self, other: Self) -> Self {
                self.wrapping_mul(other)
            }
            fn div(self, other: Self) -> Self {
                self.wrapping_div(other)
            }
            fn rem(self, other: Self) -> Self {
                self.wrapping_rem(other)
            }
            fn typed(self) -> Typed {
                Typed::$variant(self)
            }
        }
    };
}

integral!(i32, Int);
integral!(i64, Long);

fn integral<T: Integral>(operator: &str, l: T, r: T) -> Option<Typed> {
    let value = match operator {
        "+" => l.add(r),
        "-" => l.sub(r),
        "*" => l.mul(r),
        "/" if r != T::ZERO => l.div(r),
        "%" if r != T::ZERO => l.rem(r),
        "&" => l & r,
        "|" => l | r,
        "^" => l ^ r,
        _ => return compare(operator, l.cmp(&r)),
    };
    Some(value.typed())
}

trait Floating:
    Copy
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Rem<Output = Self>
{
    fn typed(self) -> Typed;
}

impl Floating for f32 {
    fn typed(self) -> Typed {
        Typed::Float(self)
    }
}

impl Floating for f64 {
    fn typed(self) -> Typed {
        Typed::Double(self)
    }
}

fn floating<T: Floating>(operator: &str, l: T, r: T) -> Option<Typed> {
    let value = match operator {
        "+" => l + r,
        "-" => l - r,
        "*" => l * r,
        "/" => l / r,
        "%" => l % r,
        "==" => return Some(Typed::Boolean(l.partial_cmp(&r) == Some(std::cmp::Ordering::Equal))),
        "!=" => return Some(Typed::Boolean(l.partial_cmp(&r) != Some(std::cmp::Ordering::Equal))),
        _ => return compare(operator, l.partial_cmp(&r)?),
    };
    Some(value.typed())
}

fn compare(operator: &str, ordering: std::cmp::Ordering) -> Option<Typed> {
    use std::cmp::Ordering::{Equal, Greater, Less};
    let result = match operator {
        "==" => ordering == Equal,
        "!=" => ordering != Equal,
        "<" => ordering == Less,
        ">" => ordering == Greater,
        "<=" => ordering != Greater,
        ">=" => ordering != Less,
        _ => return None,
    };
    Some(Typed::Boolean(result))
}

/// Shifts take the promoted type of the left operand; the distance is
/// masked to its width.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shift(operator: &str, value: Num, distance: i64) -> Option<Typed> {
    match value {
        Num::Int(v) => {
            let s = (distance & 31) as u32;
            match operator {
                "<<" => Some(Typed::Int(v.wrapping_shl(s))),
                ">>" => Some(Typed::Int(v.wrapping_shr(s))),
                ">>>" => Some(Typed::Int(((v as u32) >> s) as i32)),
                _ => None,
            }
        }
        Num::Long(v) => {
            let s = (distance & 63) as u32;
            match operator {
                "<<" => Some(Typed::Long(v.wrapping_shl(s))),
                ">>" => Some(Typed::Long(v.wrapping_shr(s))),
                ">>>" => Some(Typed::Long(((v as u64) >> s) as i64)),
                _ => None,
            }
        }
        Num::Float(_) | Num::Double(_) => None,
    }
}

/// Converts `value` to the type named by `ty`, as a cast or an assignment
/// to a field of that type would.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
fn cast(ty: Node<'_>, src: &[u8], value: Typed) -> Option<Typed> {
    let name = ty.utf8_text(src).ok()?;
    match ty.kind() {
        "integral_type" => {
            if name == "char" && matches!(value, Typed::Char(_)) {
                return Some(value);
            }
            let v = Num::of(&value)?.as_long();
            match name {
                "byte" => Some(Typed::Int(i32::from(v as i8))),
                "short" => Some(Typed::Int(i32::from(v as i16))),
                "int" => Some(Typed::Int(v as i32)),
                "char" => char::from_u32(u32::from(v as u16)).map(|c| Typed::Char(c.to_string())),
                _ => Some(Typed::Long(v)),
            }
        }
        "floating_point_type" => {
            let v = Num::of(&value)?;
            if name == "float" {
                let widened = v.widen(2);
                Some(match widened {
                    Num::Double(d) => Typed::Float(d as f32),
                    other => other.into_typed(),
                })
            } else {
                Some(Typed::Double(v.as_double()))
            }
        }
        "boolean_type" => matches!(value, Typed::Boolean(_)).then_some(value),
        "type_identifier" if name == "String" => matches!(value, Typed::String(_)).then_some(value),
        _ => None,
    }
}

/// Evaluates a literal token.
fn literal(value: Node<'_>, src: &[u8]) -> Option<Typed> {
    let text = value.utf8_text(src).ok()?;
    match value.kind() {
        "true" => Some(Typed::Boolean(true)),
        "false" => Some(Typed::Boolean(false)),
        "decimal_integer_literal" => parse_integer(text, 10),
        "hex_integer_literal" => parse_integer(text.get(2..)?, 16),
        "binary_integer_literal" => parse_integer(text.get(2..)?, 2),
        "octal_integer_literal" => parse_integer(text.get(1..)?, 8),
        "decimal_floating_point_literal" => parse_float(text),
        "character_literal" => Some(Typed::Char(strip_quotes(text, "'").to_string())),
        "string_literal" => {
            let body = if text.starts_with("\"\"\"") {
                strip_quotes(text, "\"\"\"")
            } else {
                strip_quotes(text, "\"")
            };
            Some(Typed::String(body.to_string()))
        }
        _ => None,
    }
}

/// Integral literals keep their two's-complement bit pattern, so
/// `0xFFFFFFFF` is the `int` -1 and `0xFFFFFFFFFFFFFFFFL` the `long` -1.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn parse_integer(digits: &str, radix: u32) -> Option<Typed> {
    let long = digits.ends_with(['l', 'L']);
    let cleaned: String = digits
        .chars()
        .filter(|&c| c != '_' && c != 'l' && c != 'L')
        .collect();
    let bits = if cleaned.is_empty() {
        0
    } else {
        u64::from_str_radix(&cleaned, radix).ok()?
    };
    Some(if long {
        Typed::Long(bits as i64)
    } else {
        Typed::Int(bits as u32 as i32)
    })
}

#[allow(clippy::cast_possible_truncation)]
fn parse_float(text: &str) -> Option<Typed> {
    let single = text.ends_with(['f', 'F']);
    let cleaned: String = text
        .chars()
        .filter(|&c| !matches!(c, '_' | 'f' | 'F' | 'd' | 'D'))
        .collect();
    let value = cleaned.parse::<f64>().ok()?;
    Some(if single {
        Typed::Float(value as f32)
    } else {
        Typed::Double(value)
    })
}

fn strip_quotes<'a>(text: &'a str, quote: &str) -> &'a str {
    text.strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text)
}

/// Code point of a character literal body, resolving escapes.
fn char_code(body: &str) -> Option<u32> {
    let Some(escape) = body.strip_prefix('\\') else {
        let mut chars = body.chars();
        let c = chars.next()?;
        return chars.next().is_none().then_some(u32::from(c));
    };
    let simple = match escape {
        "b" => Some('\u{8}'),
        "t" => Some('\t'),
        "n" => Some('\n'),
        "f" => Some('\u{c}'),
        "r" => Some('\r'),
        "s" => Some(' '),
        "'" => Some('\''),
        "\"" => Some('"'),
        "\\" => Some('\\'),
        _ => None,
    };
    if let Some(c) = simple {
        return Some(u32::from(c));
    }
    if let Some(hex) = escape.strip_prefix('u') {
        return u32::from_str_radix(hex.trim_start_matches('u'), 16).ok();
    }
    u32::from_str_radix(escape, 8).ok()
}

/// Renders a value the way string concatenation does.
fn to_java_string(value: &Typed) -> String {
    match value {
        Typed::Boolean(b) => b.to_string(),
        Typed::Int(v) => v.to_string(),
        Typed::Long(v) => v.to_string(),
        Typed::Float(v) => java_floating(f64::from(*v), v.to_string()),
        Typed::Double(v) => java_floating(*v, v.to_string()),
        Typed::Char(body) | Typed::String(body) => body.clone(),
    }
}

#[allow(clippy::float_cmp)]
fn java_floating(v: f64, shortest: String) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let text = if v.is_sign_positive() { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e7 {
        format!("{v:.1}")
    } else {
        shortest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_in_every_radix() {
        assert_eq!(parse_integer("1_000", 10), Some(Typed::Int(1000)));
        assert_eq!(parse_integer("42L", 10), Some(Typed::Long(42)));
        assert_eq!(parse_integer("ff", 16), Some(Typed::Int(255)));
        assert_eq!(parse_integer("101", 2), Some(Typed::Int(5)));
        assert_eq!(parse_integer("17", 8), Some(Typed::Int(15)));
        assert_eq!(parse_integer("", 8), Some(Typed::Int(0)));
    }

    #[test]
    fn integer_bit_patterns_wrap() {
        assert_eq!(parse_integer("FFFFFFFF", 16), Some(Typed::Int(-1)));
        assert_eq!(parse_integer("FFFFFFFFFFFFFFFFL", 16), Some(Typed::Long(-1)));
        assert_eq!(parse_integer("2147483648", 10), Some(Typed::Int(i32::MIN)));
        assert_eq!(parse_integer("zz", 16), None);
    }

    #[test]
    fn floats_keep_their_width() {
        assert_eq!(parse_float("1.5f"), Some(Typed::Float(1.5)));
        assert_eq!(parse_float("2e3D"), Some(Typed::Double(2000.0)));
        assert_eq!(parse_float("1_0.0"), Some(Typed::Double(10.0)));
    }

    #[test]
    fn quotes_are_stripped_once() {
        assert_eq!(strip_quotes("\"a\\\"b\"", "\""), "a\\\"b");
        assert_eq!(strip_quotes("'x'", "'"), "x");
        assert_eq!(strip_quotes("bare", "\""), "bare");
    }

    #[test]
    fn char_codes_resolve_escapes() {
        assert_eq!(char_code("a"), Some(97));
        assert_eq!(char_code("\\n"), Some(10));
        assert_eq!(char_code("\\u0041"), Some(65));
        assert_eq!(char_code("\\uu0041"), Some(65));
        assert_eq!(char_code("\\101"), Some(65));
        assert_eq!(char_code("ab"), None);
    }

    #[test]
    fn int_arithmetic_wraps_at_32_bits() {
        assert_eq!(binary("*", Typed::Int(4), Typed::Int(1024)), Some(Typed::Int(4096)));
        assert_eq!(
            binary("+", Typed::Int(i32::MAX), Typed::Int(1)),
            Some(Typed::Int(i32::MIN))
        );
        assert_eq!(
            binary("+", Typed::Int(i32::MAX), Typed::Long(1)),
            Some(Typed::Long(i64::from(i32::MAX) + 1))
        );
        assert_eq!(binary("/", Typed::Int(7), Typed::Int(0)), None);
        assert_eq!(binary(">>>", Typed::Int(-1), Typed::Int(28)), Some(Typed::Int(15)));
        assert_eq!(binary(">>>", Typed::Long(-1), Typed::Int(60)), Some(Typed::Long(15)));
        assert_eq!(binary("<<", Typed::Int(1), Typed::Int(33)), Some(Typed::Int(2)));
    }

    #[test]
    fn mixed_operands_are_promoted() {
        assert_eq!(binary("+", Typed::Int(1), Typed::Double(0.5)), Some(Typed::Double(1.5)));
        assert_eq!(binary("/", Typed::Int(1), Typed::Float(4.0)), Some(Typed::Float(0.25)));
        assert_eq!(
            binary("+", Typed::Char("a".to_string()), Typed::Int(1)),
            Some(Typed::Int(98))
        );
        assert_eq!(binary("<", Typed::Int(1), Typed::Long(2)), Some(Typed::Boolean(true)));
        assert_eq!(
            binary("&&", Typed::Boolean(true), Typed::Boolean(false)),
            Some(Typed::Boolean(false))
        );
        assert_eq!(binary("-", Typed::Boolean(true), Typed::Int(1)), None);
    }

    #[test]
    fn concatenation_renders_operands() {
        let text = |s: &str| Typed::String(s.to_string());
        assert_eq!(binary("+", text("v"), Typed::Int(2)), Some(text("v2")));
        assert_eq!(binary("+", Typed::Double(1.0), text("x")), Some(text("1.0x")));
        assert_eq!(binary("+", text("r="), Typed::Float(0.25)), Some(text("r=0.25")));
        assert_eq!(binary("+", text("on="), Typed::Boolean(true)), Some(text("on=true")));
        assert_eq!(binary("-", text("a"), text("b")), None);
    }

    #[test]
    fn unary_operators() {
        assert_eq!(unary("~", Typed::Int(0)), Some(Typed::Int(-1)));
        assert_eq!(unary("-", Typed::Int(i32::MIN)), Some(Typed::Int(i32::MIN)));
        assert_eq!(unary("+", Typed::Char("a".to_string())), Some(Typed::Int(97)));
        assert_eq!(unary("!", Typed::Boolean(false)), Some(Typed::Boolean(true)));
        assert_eq!(unary("-", Typed::String("x".to_string())), None);
    }
}
