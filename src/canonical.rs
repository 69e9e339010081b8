/*
 * C8 Coherence Benchmark.
 *
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! JSON text encoding for artefacts.
//!
//! Two layouts are produced from the same [`JsonNode`] tree:
//!
//! - **canonical**: keys sorted byte-wise at every level, `", "` and `": "`
//!   separators, no newlines. The artefact digest is computed over this form.
//! - **pretty**: insertion order, two-space indent. Written to disk.
//!
//! # Number format
//!
//! Finite floats use the shortest digits that round-trip, laid out in fixed
//! notation for decimal exponents in `[-4, 16)` (always with a fractional
//! part, e.g. `1.0`) and as `d.ddde±XX` otherwise. Non-finite values are
//! written as the bare tokens `NaN`, `Infinity` and `-Infinity`.
//!
//! # String format
//!
//! Output is pure ASCII: quotes, backslashes and control characters are
//! escaped, and every non-ASCII UTF-16 code unit becomes `\uXXXX`.
//!
//! Digests are stable for a given build. Equality with digests produced by
//! other runtimes additionally depends on their `sin`/`cos` agreeing to the
//! last bit.

/// Minimal JSON value tree covering what an artefact contains.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonNode<'a> {
    /// A string value.
    Str(&'a str),
    /// A floating-point number.
    Number(f64),
    /// An object, members in insertion order.
    Object(Vec<(&'a str, JsonNode<'a>)>),
}

impl<'a> JsonNode<'a> {
    /// Encode with sorted keys and single-line separators.
    pub fn to_canonical_string(&self) -> String {
        let mut out = String::new();
        write_canonical(&mut out, self);
        out
    }

    /// Encode in insertion order with a two-space indent.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        write_pretty(&mut out, self, 0);
        out
    }
}

fn write_canonical(out: &mut String, node: &JsonNode<'_>) {
    match node {
        JsonNode::Str(s) => write_string(out, s),
        JsonNode::Number(v) => out.push_str(&format_float(*v)),
        JsonNode::Object(members) => {
            let mut sorted: Vec<&(&str, JsonNode<'_>)> = members.iter().collect();
            // `str` ordering is byte-wise on UTF-8.
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, value)) in sorted.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_string(out, key);
                out.push_str(": ");
                write_canonical(out, value);
            }
            out.push('}');
        }
    }
}

fn write_pretty(out: &mut String, node: &JsonNode<'_>, depth: usize) {
    match node {
        JsonNode::Object(members) if !members.is_empty() => {
            out.push('{');
            for (i, (key, value)) in members.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                push_indent(out, depth + 1);
                write_string(out, key);
                out.push_str(": ");
                write_pretty(out, value, depth + 1);
            }
            out.push('\n');
            push_indent(out, depth);
            out.push('}');
        }
        other => write_canonical(out, other),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Quote and escape `s` as an ASCII-only JSON string.
pub fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Shortest round-trip text for `v` (see the module docs for the layout).
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e-7".
    let sci = format!("{:e}", v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::from(sign);
    if (-4..16).contains(&exp) {
        // Position of the decimal point relative to the digit string.
        let point = exp + 1;
        let len = digits.len() as i32;
        if point <= 0 {
            out.push_str("0.");
            out.extend(core::iter::repeat('0').take((-point) as usize));
            out.push_str(&digits);
        } else if point < len {
            out.push_str(&digits[..point as usize]);
            out.push('.');
            out.push_str(&digits[point as usize..]);
        } else {
            out.push_str(&digits);
            out.extend(core::iter::repeat('0').take((point - len) as usize));
            out.push_str(".0");
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let exp_sign = if exp < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", exp_sign, exp.unsigned_abs()));
    }
    out
}
