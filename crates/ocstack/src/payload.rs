//! PUT payload cleanup and parsing.
//!
//! Bodies arrive from transports that re-encode text unevenly: some client
//! encoders emit stray control bytes around otherwise-valid JSON, and
//! literal backslash escapes must survive intact rather than being
//! double-escaped. Cleanup is therefore conservative: recognized escape
//! pairs are copied through verbatim, control characters are dropped, and
//! only then is the text parsed as a single JSON object.

use serde_json::Value;

use ocstack_core::DispatchError;

/// Escape pairs preserved exactly as they arrived.
const KEPT_ESCAPES: &[char] = &['n', 'r', 't', 'b', 'f', '\'', '"', '&', '\\'];

/// Decode raw bytes into cleaned JSON text.
///
/// Control characters (U+0000..=U+0019) are stripped; recognized
/// backslash escape pairs pass through untouched.
fn clean(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) if KEPT_ESCAPES.contains(&next) => {
                    out.push(c);
                    out.push(next);
                }
                Some(next) => {
                    out.push(c);
                    if next as u32 > 0x19 {
                        out.push(next);
                    }
                }
                None => out.push(c),
            }
            continue;
        }
        if c as u32 > 0x19 {
            out.push(c);
        }
    }
    out
}

/// Parse a PUT body into its effective payload: the first element of the
/// envelope's `oc` array.
///
/// Every failure mode (empty body, decode noise, JSON syntax error,
/// missing or empty `oc` array) is reported uniformly as
/// [`DispatchError::PayloadRejected`].
pub(crate) fn parse_put_payload(raw: &[u8]) -> Result<Value, DispatchError> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(DispatchError::PayloadRejected("empty body".to_string()));
    }
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| DispatchError::PayloadRejected(e.to_string()))?;
    value
        .get("oc")
        .and_then(Value::as_array)
        .and_then(|oc| oc.first())
        .cloned()
        .ok_or_else(|| {
            DispatchError::PayloadRejected("missing or empty `oc` array".to_string())
        })
}

/// The representation carried by an effective payload: its `rep` field,
/// or JSON null when the entry carries none.
pub(crate) fn representation(entry: &Value) -> Value {
    entry.get("rep").cloned().unwrap_or(Value::Null)
}
