//! Ambulance response-time summary on the hospital dashboard.

use std::rc::Rc;

use serde_json::Value;

use crate::page::{FetchError, Page, PageNode};

pub const TARGET_ID: &str = "emergency-avg-text";
pub const UNAVAILABLE_TEXT: &str = "Avg response: N/A";

/// Text shown for `value`, the `avg_response_time` field of the response.
///
/// Missing and `null` both mean "no data".
pub fn avg_response_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNAVAILABLE_TEXT.to_string(),
        Some(value) => format!("Avg response: {} min", display_value(value)),
    }
}

/// Text shown for a finished fetch.
pub fn render_response(response: &Result<Value, FetchError>) -> String {
    match response {
        Ok(Value::Object(body)) => avg_response_text(body.get("avg_response_time")),
        Ok(_) | Err(_) => UNAVAILABLE_TEXT.to_string(),
    }
}

/// `value` converted to text the way a browser template literal does.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.as_f64().map_or_else(|| number.to_string(), js_number),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => display_value(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Shortest round-trip form, exponent notation outside `1e-6..1e21`.
fn js_number(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }
    let magnitude = float.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return float.to_string();
    }
    let exponent_form = format!("{float:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

/// Fetch the summary once and render it into `#emergency-avg-text`.
pub fn install<P: Page>(page: &Rc<P>, url: &str) -> bool {
    let Some(target) = page.element_by_id(TARGET_ID) else {
        return false;
    };
    let fetch = page.fetch_json(url);
    page.spawn_local(Box::pin(async move {
        let response = fetch.await;
        match &response {
            Ok(body) => log::debug!(
                "Ambulance stats: {} emergencies",
                body.get("total_emergencies").unwrap_or(&Value::Null)
            ),
            Err(error) => log::warn!("Ambulance stats unavailable: {error}"),
        }
        target.set_text(&render_response(&response));
    }));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_render_like_the_browser() {
        assert_eq!(avg_response_text(Some(&json!(7))), "Avg response: 7 min");
        assert_eq!(avg_response_text(Some(&json!(7.5))), "Avg response: 7.5 min");
        assert_eq!(avg_response_text(Some(&json!(12.0))), "Avg response: 12 min");
        assert_eq!(avg_response_text(Some(&json!(0))), "Avg response: 0 min");
    }

    #[test]
    fn test_missing_or_null_is_unavailable() {
        assert_eq!(avg_response_text(None), UNAVAILABLE_TEXT);
        assert_eq!(avg_response_text(Some(&Value::Null)), UNAVAILABLE_TEXT);
    }

    #[test]
    fn test_render_response() {
        assert_eq!(
            render_response(&Ok(json!({"avg_response_time": 7, "total_emergencies": 3}))),
            "Avg response: 7 min"
        );
        assert_eq!(render_response(&Ok(json!({}))), UNAVAILABLE_TEXT);
        assert_eq!(render_response(&Ok(json!([1, 2]))), UNAVAILABLE_TEXT);
        assert_eq!(render_response(&Ok(Value::Null)), UNAVAILABLE_TEXT);
        assert_eq!(
            render_response(&Err(FetchError::Transport {
                url: "/analytics/ambulance".to_string(),
                reason: "offline".to_string(),
            })),
            UNAVAILABLE_TEXT
        );
    }

    #[test]
    fn test_extreme_numbers_use_exponent_form() {
        assert_eq!(avg_response_text(Some(&json!(1e21))), "Avg response: 1e+21 min");
        assert_eq!(avg_response_text(Some(&json!(2.5e22))), "Avg response: 2.5e+22 min");
        assert_eq!(avg_response_text(Some(&json!(1e-7))), "Avg response: 1e-7 min");
        assert_eq!(avg_response_text(Some(&json!(0.000001))), "Avg response: 0.000001 min");
        assert_eq!(
            avg_response_text(Some(&json!(1e20))),
            "Avg response: 100000000000000000000 min"
        );
        assert_eq!(avg_response_text(Some(&json!(-0.0))), "Avg response: 0 min");
    }

    #[test]
    fn test_structured_values_render_like_template_literals() {
        assert_eq!(
            avg_response_text(Some(&json!({"minutes": 4}))),
            "Avg response: [object Object] min"
        );
        assert_eq!(avg_response_text(Some(&json!([1, 2.5]))), "Avg response: 1,2.5 min");
        assert_eq!(avg_response_text(Some(&json!([1, null, [2, 3]]))), "Avg response: 1,,2,3 min");
        assert_eq!(avg_response_text(Some(&json!([]))), "Avg response:  min");
        assert_eq!(avg_response_text(Some(&json!(true))), "Avg response: true min");
    }

    #[test]
    fn test_string_values_render_verbatim() {
        assert_eq!(
            render_response(&Ok(json!({"avg_response_time": "8.2"}))),
            "Avg response: 8.2 min"
        );
    }
}
