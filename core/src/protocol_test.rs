use super::*;
use serde_json::json;

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_a_top_level_array_of_records() {
    let body = r#"[{"expr": "2+2", "result": "4", "assign": false}]"#;
    let parsed = parse_records(body).unwrap();
    assert!(!parsed.string_encoded);
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].expr, "2+2");
    assert_eq!(parsed.records[0].result_text(), "4");
    assert!(!parsed.records[0].assign);
}

#[test]
fn missing_fields_take_defaults() {
    let parsed = parse_records(r#"[{}]"#).unwrap();
    let record = &parsed.records[0];
    assert_eq!(record.expr, "");
    assert_eq!(record.result, Value::Null);
    assert_eq!(record.result_text(), "");
    assert!(!record.assign);
}

#[test]
fn string_encoded_body_is_parsed_but_flagged() {
    let body = r#""[{\"expr\": \"x\", \"result\": 2, \"assign\": true}]""#;
    let parsed = parse_records(body).unwrap();
    assert!(parsed.string_encoded);
    assert_eq!(parsed.records[0].expr, "x");
    assert!(parsed.records[0].assign);
}

#[test]
fn top_level_object_is_a_shape_error() {
    let err = parse_records(r#"{"expr": "2+2"}"#).unwrap_err();
    assert!(matches!(err, ParseError::Shape("an object")));
}

#[test]
fn string_wrapping_a_non_array_is_a_shape_error() {
    let err = parse_records(r#""{\"expr\": \"2+2\"}""#).unwrap_err();
    assert!(matches!(err, ParseError::Shape("an object")));
}

#[test]
fn garbage_is_a_syntax_error() {
    let err = parse_records("<html>502</html>").unwrap_err();
    assert!(matches!(err, ParseError::Syntax(_)));
}

#[test]
fn empty_array_parses_to_no_records() {
    let parsed = parse_records("[]").unwrap();
    assert!(parsed.records.is_empty());
}

#[test]
fn parse_errors_render_a_readable_message() {
    let err = parse_records("42").unwrap_err();
    assert_eq!(
        err.to_string(),
        "response is not an array of records (got a number)"
    );
}

// =============================================================
// Display mapping
// =============================================================

#[test]
fn first_calculation_takes_only_the_first_record() {
    let records = vec![
        ResultRecord {
            expr: "2+2".to_string(),
            result: json!(4),
            assign: false,
        },
        ResultRecord {
            expr: "3*3".to_string(),
            result: json!(9),
            assign: false,
        },
    ];
    let calc = first_calculation(&records).unwrap();
    assert_eq!(calc.expression, "2+2");
    assert_eq!(calc.result, "4");
}

#[test]
fn first_calculation_of_nothing_is_none() {
    assert_eq!(first_calculation(&[]), None);
}

#[test]
fn numeric_and_string_results_both_render_as_text() {
    let number = ResultRecord {
        expr: "x".to_string(),
        result: json!(2.5),
        assign: false,
    };
    let text = ResultRecord {
        expr: "y".to_string(),
        result: json!("love"),
        assign: false,
    };
    assert_eq!(number.result_text(), "2.5");
    assert_eq!(text.result_text(), "love");
}

#[test]
fn error_calculation_is_the_fixed_user_facing_record() {
    let calc = Calculation::error();
    assert_eq!(calc.expression, "Error");
    assert_eq!(calc.result, "Failed to process the image. Please try again.");
    assert!(!calc.is_empty());
}

#[test]
fn blank_calculation_counts_as_empty() {
    let calc = Calculation {
        expression: String::new(),
        result: String::new(),
    };
    assert!(calc.is_empty());
}

// =============================================================
// Bindings
// =============================================================

#[test]
fn assign_records_accumulate_into_the_binding_map() {
    let mut bindings = BTreeMap::new();
    let records = vec![
        ResultRecord {
            expr: "x".to_string(),
            result: json!(2),
            assign: true,
        },
        ResultRecord {
            expr: "2+2".to_string(),
            result: json!(4),
            assign: false,
        },
    ];
    apply_bindings(&mut bindings, &records);
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings["x"], json!(2));
}

#[test]
fn later_assignments_overwrite_earlier_ones() {
    let mut bindings = BTreeMap::new();
    let first = vec![ResultRecord {
        expr: "x".to_string(),
        result: json!(2),
        assign: true,
    }];
    let second = vec![ResultRecord {
        expr: "x".to_string(),
        result: json!(7),
        assign: true,
    }];
    apply_bindings(&mut bindings, &first);
    apply_bindings(&mut bindings, &second);
    assert_eq!(bindings["x"], json!(7));
}

#[test]
fn nameless_assignments_are_skipped() {
    let mut bindings = BTreeMap::new();
    apply_bindings(
        &mut bindings,
        &[ResultRecord {
            expr: String::new(),
            result: json!(1),
            assign: true,
        }],
    );
    assert!(bindings.is_empty());
}

// =============================================================
// Request shape and URL
// =============================================================

#[test]
fn request_serializes_with_the_service_field_names() {
    let mut bindings = BTreeMap::new();
    bindings.insert("x".to_string(), json!(2));
    let request = CalculateRequest {
        data: "data:image/png;base64,AAAA".to_string(),
        dict_of_vars: bindings,
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({
            "data": "data:image/png;base64,AAAA",
            "dict_of_vars": {"x": 2},
        })
    );
}

#[test]
fn calculate_url_joins_the_base_and_path() {
    assert_eq!(
        calculate_url("https://api.example.com"),
        "https://api.example.com/calculate"
    );
}

#[test]
fn calculate_url_tolerates_a_trailing_slash() {
    assert_eq!(
        calculate_url("https://api.example.com/"),
        "https://api.example.com/calculate"
    );
}
