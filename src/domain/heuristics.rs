//! Text Heuristics
//!
//! Shape inference without a type system. Every predicate here works on raw
//! source text (plus, where noted, a node kind) so it can be swapped for real
//! type resolution later without changing the trace schema.

use crate::domain::node_kind::NodeKind;
use crate::domain::trace::ParsedInt;

/// A declaration is a pointer when its declarator text carries `*` or it sits
/// directly under a pointer declarator.
pub fn declares_pointer(declarator_text: &str, parent: NodeKind) -> bool {
    declarator_text.contains('*') || parent == NodeKind::PointerDeclarator
}

/// `{1, 2, 3}` style initializer.
pub fn is_brace_initializer(value: &str) -> bool {
    value.starts_with('{')
}

/// `(n + 1, -1)` style initializer, as used for container constructors.
pub fn is_call_style_initializer(value: &str) -> bool {
    value.contains('(')
}

/// Left-hand sides that write through a member access.
pub fn targets_member(kind: NodeKind, text: &str) -> bool {
    kind == NodeKind::FieldExpression || text.contains("->")
}

pub fn field_is_pointer(declarator_text: Option<&str>) -> bool {
    declarator_text.is_some_and(|t| t.contains('*'))
}

/// Lenient integer parsing.
///
/// Leading whitespace and one sign are accepted, `0x`/`0X` switches to base
/// 16, digits are consumed up to the first non-digit and the rest is ignored.
/// No digits at all yields `ParsedInt::NaN`. Values outside `i64` saturate.
pub fn parse_int(text: &str) -> ParsedInt {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    let mut saturated = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        if saturated {
            continue;
        }
        match value
            .checked_mul(radix as i64)
            .and_then(|v| v.checked_add(d as i64))
        {
            Some(v) => value = v,
            None => saturated = true,
        }
    }

    if !seen {
        return ParsedInt::NaN;
    }
    let value = match (saturated, negative) {
        (true, true) => i64::MIN,
        (true, false) => i64::MAX,
        (false, true) => -value,
        (false, false) => value,
    };
    ParsedInt::Number(value)
}

/// Parse a brace initializer body element by element.
///
/// The outer delimiters are dropped unconditionally and the interior is split
/// on every comma, so nested braces produce `NaN` entries rather than errors.
pub fn parse_int_list(initializer: &str) -> Vec<ParsedInt> {
    let mut chars = initializer.chars();
    chars.next();
    chars.next_back();
    chars
        .as_str()
        .split(',')
        .map(|part| parse_int(part.trim()))
        .collect()
}

/// Drop one pair of enclosing `()` or `{}` from an argument list.
pub fn strip_delimiters(text: &str) -> &str {
    let stripped = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .or_else(|| text.strip_prefix('{').and_then(|t| t.strip_suffix('}')));
    match stripped {
        Some(inner) => inner.trim(),
        None => text,
    }
}
