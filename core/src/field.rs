use crate::Record;
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Number of leading records sampled when scoring candidate fields.
pub const SAMPLE_ROWS: usize = 50;

/// Text used for scoring and matching. Only JSON strings carry text.
pub fn text_of(value: Option<&Value>) -> &str {
    match value {
        Some(Value::String(s)) => s.as_str(),
        _ => "",
    }
}

/// Text used for column scoring. Unlike [`text_of`], falsy values read as empty and every
/// other value is stringified: `12` is `"12"`, `true` is `"true"`.
pub fn score_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Cow::Borrowed(""),
        Some(Value::Bool(true)) => Cow::Borrowed("true"),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(number_text(n)),
        Some(Value::Array(items)) => Cow::Owned(array_text(items)),
        Some(Value::Object(_)) => Cow::Borrowed("[object Object]"),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return if i == 0 { String::new() } else { i.to_string() };
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => String::new(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// Items join with ',' and null items read as empty, nested or not.
fn array_text(items: &[Value]) -> String {
    items
        .iter()
        .map(|v| match v {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) if n.as_f64() == Some(0.0) => "0".to_string(),
            Value::Array(inner) => array_text(inner),
            other => score_text(Some(other)).into_owned(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Pick the field whose sampled values hold the most text.
///
/// Candidates are the keys of the first record in their natural order. A later key only
/// wins with a strictly greater score, so ties (including all-zero) go to the earliest key.
/// Returns `None` when there is nothing to choose from.
pub fn detect_search_field(records: &[Record]) -> Option<String> {
    let first = records.first()?;
    let sample = &records[..records.len().min(SAMPLE_ROWS)];
    let mut best: Option<(&str, usize)> = None;
    for key in first.keys() {
        let score = field_score(sample, key);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((key.as_str(), score));
        }
    }
    best.map(|(key, _)| key.to_string())
}

fn field_score(sample: &[Record], key: &str) -> usize {
    sample.iter().map(|r| score_text(r.get(key)).trim().chars().count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(v: Value) -> Vec<Record> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn picks_longest_text() {
        let rs = records(json!([
            {"code": "CNSHA", "name": "Shanghai", "id": 1},
            {"code": "SGSIN", "name": "Singapore", "id": 2},
        ]));
        assert_eq!(detect_search_field(&rs).as_deref(), Some("name"));
    }

    #[test]
    fn ties_go_to_first_key() {
        let rs = records(json!([{"b": "abc", "a": "xyz"}]));
        assert_eq!(detect_search_field(&rs).as_deref(), Some("b"));
    }

    #[test]
    fn long_numbers_count_their_digits() {
        let rs = records(json!([{"name": "Lima", "id": 1234567890123u64}]));
        assert_eq!(detect_search_field(&rs).as_deref(), Some("id"));
    }

    #[test]
    fn falsy_values_score_zero() {
        let rs = records(json!([{"id": 0, "flag": false, "n": null, "tag": "x"}]));
        assert_eq!(detect_search_field(&rs).as_deref(), Some("tag"));
    }

    #[test]
    fn all_zero_falls_back_to_first_key() {
        let rs = records(json!([{"id": 0, "n": null}]));
        assert_eq!(detect_search_field(&rs).as_deref(), Some("id"));
    }

    #[test]
    fn scoring_text_of_non_strings() {
        assert_eq!(score_text(Some(&json!(42))), "42");
        assert_eq!(score_text(Some(&json!(2.5))), "2.5");
        assert_eq!(score_text(Some(&json!(3.0))), "3");
        assert_eq!(score_text(Some(&json!(0))), "");
        assert_eq!(score_text(Some(&json!(true))), "true");
        assert_eq!(score_text(Some(&json!(false))), "");
        assert_eq!(score_text(Some(&json!([1, null, "a"]))), "1,,a");
        assert_eq!(score_text(Some(&json!({"k": 1}))), "[object Object]");
        assert_eq!(score_text(None), "");
    }

    #[test]
    fn whitespace_is_trimmed_before_scoring() {
        let rs = records(json!([{"pad": "          a", "name": "Lima"}]));
        assert_eq!(detect_search_field(&rs).as_deref(), Some("name"));
    }

    #[test]
    fn only_first_fifty_rows_are_sampled() {
        let mut rows: Vec<Value> = (0..SAMPLE_ROWS).map(|_| json!({"a": "xx", "b": "x"})).collect();
        rows.extend((0..100).map(|_| json!({"a": "", "b": "a long trailing value"})));
        let rs = records(Value::Array(rows));
        assert_eq!(detect_search_field(&rs).as_deref(), Some("a"));
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(detect_search_field(&[]), None);
        let rs = records(json!([{}]));
        assert_eq!(detect_search_field(&rs), None);
    }
}
