//! Bounded value rendering.
//!
//! Every value shown in a failure message goes through [`format`]. Output is
//! bounded in three directions: strings are cut after
//! [`MAX_STRING_LENGTH`] characters, collections and records after a fixed
//! number of items, and nested containers beyond [`MAX_OBJECT_DEPTH`] levels
//! collapse to an ellipsis. Cyclic graphs therefore always render finitely.
//!
//! ## Nesting levels
//!
//! A collection item is one level below its collection. A record member is
//! two levels below its record, so records collapse one level earlier:
//!
//! ```text
//! [42, [42, [42, [···]]]]
//! Looping { Me = Looping { Me = Looping { ··· } } }
//! ```

use crate::config::{
    ELLIPSIS, MAX_ENUMERABLE_LENGTH, MAX_OBJECT_DEPTH, MAX_OBJECT_MEMBER_COUNT, MAX_STRING_LENGTH,
};
use crate::value::{Collection, Dictionary, Grouping, Scalar, Structural, Value};

const ITEM_STEP: usize = 1;
const MEMBER_STEP: usize = 2;

/// Render a value for display in a failure message
pub fn format(value: &Value) -> String {
    format_at(value, 0)
}

/// Render one element of a collection at the nesting level it has inside
/// that collection
pub fn format_item(value: &Value) -> String {
    format_at(value, ITEM_STEP)
}

/// Render a dictionary entry as `[key] = value`
pub fn format_entry(key: &Value, value: &Value) -> String {
    format!("[{}] = {}", format_at(key, 1), format_at(value, 1))
}

/// Render loose values as a bracketed list, e.g. leftover collection items
pub fn format_items(items: &[Value]) -> String {
    let rendered = items.iter().map(|item| format_at(item, ITEM_STEP));
    bracketed(rendered, items.len())
}

/// Render member names as a list of quoted strings: `["x", "y"]`
pub fn format_names<S: AsRef<str>>(names: &[S]) -> String {
    let rendered: Vec<String> = names.iter().map(|n| quote_str(n.as_ref(), false)).collect();
    format!("[{}]", rendered.join(", "))
}

/// Quote and escape a string, optionally cutting it at the display limit
pub fn quote_str(s: &str, truncate: bool) -> String {
    let mut out = String::from("\"");
    for (taken, ch) in s.chars().enumerate() {
        if truncate && taken == MAX_STRING_LENGTH {
            out.push('"');
            out.push_str(ELLIPSIS);
            return out;
        }
        out.push_str(&escape_char(ch, '"'));
    }
    out.push('"');
    out
}

/// Escaped form of one character as it appears inside a quoted literal
pub fn escape_char(ch: char, quote: char) -> String {
    match ch {
        '\0' => "\\0".to_string(),
        '\u{7}' => "\\a".to_string(),
        '\u{8}' => "\\b".to_string(),
        '\t' => "\\t".to_string(),
        '\n' => "\\n".to_string(),
        '\u{b}' => "\\v".to_string(),
        '\u{c}' => "\\f".to_string(),
        '\r' => "\\r".to_string(),
        '\\' => "\\\\".to_string(),
        c if c == quote => format!("\\{}", c),
        c if c.is_control() || is_noncharacter(c) => format!("\\x{:02x}", c as u32),
        c => c.to_string(),
    }
}

fn is_noncharacter(ch: char) -> bool {
    matches!(ch as u32, 0xfffe | 0xffff)
}

fn format_char(ch: char) -> String {
    if is_noncharacter(ch) {
        return format!("0x{:04x}", ch as u32);
    }
    format!("'{}'", escape_char(ch, '\''))
}

fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Bool(b) => b.to_string(),
        Scalar::Char(c) => format_char(*c),
        Scalar::Int { value, .. } => value.to_string(),
        Scalar::F32(v) => v.to_string(),
        Scalar::F64(v) => v.to_string(),
        Scalar::Decimal(d) => d.to_string(),
        Scalar::Enum(e) => e.variant.clone(),
        Scalar::Guid(g) => g.hyphenated().to_string(),
    }
}

fn format_at(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Scalar(s) => format_scalar(s),
        Value::Str(s) => quote_str(s, true),
        Value::Special(s) => s.canonical(),
        Value::Seq(c) | Value::Set(c) => format_collection(c, depth),
        Value::Map(d) => format_dictionary(d, depth),
        Value::Grouping(g) => format_grouping(g, depth),
        Value::Lazy(lazy) => match lazy.peek() {
            Some(inner) => format_at(inner, depth),
            None => format!("{} {{ {} }}", lazy.type_name(), ELLIPSIS),
        },
        Value::Record(r) => format_record(r.as_ref(), depth),
    }
}

fn bracketed(rendered: impl Iterator<Item = String>, len: usize) -> String {
    let mut parts: Vec<String> = rendered.take(MAX_ENUMERABLE_LENGTH).collect();
    if len > MAX_ENUMERABLE_LENGTH {
        parts.push(ELLIPSIS.to_string());
    }
    format!("[{}]", parts.join(", "))
}

fn format_collection(collection: &Collection, depth: usize) -> String {
    if depth >= MAX_OBJECT_DEPTH {
        return format!("[{}]", ELLIPSIS);
    }
    let items = collection.items();
    bracketed(
        items.iter().map(|item| format_at(item, depth + ITEM_STEP)),
        items.len(),
    )
}

fn format_dictionary(dictionary: &Dictionary, depth: usize) -> String {
    if depth >= MAX_OBJECT_DEPTH {
        return format!("[{}]", ELLIPSIS);
    }
    let entries = dictionary.entries();
    bracketed(
        entries.iter().map(|(k, v)| {
            format!(
                "[{}] = {}",
                format_at(k, depth + ITEM_STEP),
                format_at(v, depth + ITEM_STEP)
            )
        }),
        entries.len(),
    )
}

fn format_grouping(grouping: &Grouping, depth: usize) -> String {
    if depth >= MAX_OBJECT_DEPTH {
        return format!("[{}]", ELLIPSIS);
    }
    format!(
        "[{}] = {}",
        format_at(&grouping.key, depth + ITEM_STEP),
        format_collection(&grouping.items, depth + ITEM_STEP)
    )
}

fn format_record(record: &dyn Structural, depth: usize) -> String {
    let type_name = record.type_name();
    let open = if type_name.is_empty() {
        "{".to_string()
    } else {
        format!("{} {{", type_name)
    };
    if depth >= MAX_OBJECT_DEPTH {
        return format!("{} {} }}", open, ELLIPSIS);
    }

    let mut members = record.members();
    members.retain(|m| !(m.attrs().is_static || m.attrs().indexer));
    if members.is_empty() {
        return format!("{} }}", open);
    }
    members.sort_by(|a, b| a.name().cmp(b.name()));

    let mut parts: Vec<String> = members
        .iter()
        .take(MAX_OBJECT_MEMBER_COUNT)
        .map(|m| {
            let rendered = match m.value() {
                Ok(v) => format_at(v, depth + MEMBER_STEP),
                Err(err) => format!("(throws: {})", err),
            };
            format!("{} = {}", m.name(), rendered)
        })
        .collect();
    if members.len() > MAX_OBJECT_MEMBER_COUNT {
        parts.push(ELLIPSIS.to_string());
    }
    format!("{} {} }}", open, parts.join(", "))
}
