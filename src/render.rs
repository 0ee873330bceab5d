//! Value rendering for failure messages.
//!
//! Two modes: [`OutputMode::Json`] serializes through `serde_json` (object
//! keys come out sorted, non-finite floats become `null`); [`OutputMode::Pretty`]
//! is a structural rendering with `+Inf`/`-Inf`/`NaN` literal tokens for
//! non-finite numbers. Rendering never fails the host: a value that cannot be
//! serialized renders as the serializer's own error text.

use std::fmt::Display;

use serde::Serialize;

use crate::compare::Num;

/// How wrapped values and comparison targets are rendered inside a failure
/// block. Collection wrappers default to `Json`; scalar wrappers always use
/// the structural form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Structural rendering; numbers keep `+Inf`/`-Inf`/`NaN` tokens.
    Pretty,
    /// Compact JSON via `serde_json`, object keys sorted.
    Json,
}

/// JSON rendering that degrades instead of failing: a non-serializable value
/// renders as the error text itself.
pub(crate) fn render_json<T: Serialize + ?Sized>(v: &T) -> String {
    match serde_json::to_value(v) {
        Ok(value) => value.to_string(),
        Err(err) => err.to_string(),
    }
}

/// Structural rendering for numbers. `Display` already prints `5.0f64` as
/// `5`; only the non-finite tokens need pinning.
pub(crate) fn render_num<T: Num>(v: T) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_inf(1) {
        "+Inf".to_string()
    } else if v.is_inf(-1) {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

/// Structural rendering for an optional sequence; `None` is the nil slice.
pub(crate) fn render_items_pretty<T: Display>(items: Option<&[T]>) -> String {
    match items {
        None => "nil".to_string(),
        Some(items) => {
            let body = items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{body}]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn json_sorts_map_keys() {
        let mut m = HashMap::new();
        m.insert("b", 2);
        m.insert("a", 1);
        assert_eq!(render_json(&m), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn json_renders_nil_collections_as_null() {
        assert_eq!(render_json(&None::<Vec<i32>>), "null");
        assert_eq!(render_json(&Some(vec![1, 2])), "[1,2]");
    }

    #[test]
    fn json_has_no_non_finite_literal() {
        // Pinned behavior: serde_json maps non-finite floats to null.
        assert_eq!(render_json(&f64::INFINITY), "null");
        assert_eq!(render_json(&f64::NAN), "null");
    }

    #[test]
    fn pretty_numbers_use_literal_tokens() {
        assert_eq!(render_num(5.0f64), "5");
        assert_eq!(render_num(5.6f64), "5.6");
        assert_eq!(render_num(f64::INFINITY), "+Inf");
        assert_eq!(render_num(f64::NEG_INFINITY), "-Inf");
        assert_eq!(render_num(f64::NAN), "NaN");
        assert_eq!(render_num(-5i32), "-5");
    }

    #[test]
    fn pretty_slices_distinguish_nil() {
        assert_eq!(render_items_pretty::<i32>(None), "nil");
        assert_eq!(render_items_pretty(Some(&[1, 2][..])), "[1, 2]");
        assert_eq!(render_items_pretty::<i32>(Some(&[])), "[]");
    }
}
