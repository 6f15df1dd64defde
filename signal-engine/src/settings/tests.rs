use super::*;
use serde_json::json;
use std::io::Write;

fn base_value() -> Value {
    json!({
        "max_order_value": 600.0,
        "buy_limit_percent": 0.05,
        "stop_loss_percent": 0.2,
    })
}

#[test]
fn test_valid_settings() {
    let settings = settings_from_value(&base_value()).unwrap();
    assert_eq!(settings.max_order_value, 600.0);
    assert_eq!(settings.high_risk_order_value, None);
    assert_eq!(settings.buy_limit_percent, 0.05);
    assert_eq!(settings.stop_loss_percent, 0.2);
}

#[test]
fn test_high_risk_value_is_optional() {
    let mut value = base_value();
    value["high_risk_order_value"] = json!(250.0);
    let settings = settings_from_value(&value).unwrap();
    assert_eq!(settings.high_risk_order_value, Some(250.0));

    value["high_risk_order_value"] = Value::Null;
    let settings = settings_from_value(&value).unwrap();
    assert_eq!(settings.high_risk_order_value, None);
}

#[test]
fn test_boolean_rejected_as_type_error() {
    for key in [
        MAX_ORDER_VALUE_KEY,
        HIGH_RISK_ORDER_VALUE_KEY,
        BUY_LIMIT_PERCENT_KEY,
        STOP_LOSS_PERCENT_KEY,
    ] {
        let mut value = base_value();
        value[key] = json!(true);
        match settings_from_value(&value) {
            Err(SettingsError::Type { key: reported }) => assert_eq!(reported, key),
            other => panic!("{key}: expected type error, got {other:?}"),
        }
    }
}

#[test]
fn test_string_rejected_as_type_error() {
    let mut value = base_value();
    value[MAX_ORDER_VALUE_KEY] = json!("600");
    assert!(matches!(
        settings_from_value(&value),
        Err(SettingsError::Type { .. })
    ));
}

#[test]
fn test_missing_required_key() {
    let mut value = base_value();
    value.as_object_mut().unwrap().remove(STOP_LOSS_PERCENT_KEY);
    match settings_from_value(&value) {
        Err(SettingsError::Type { key }) => assert_eq!(key, STOP_LOSS_PERCENT_KEY),
        other => panic!("expected type error, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_values() {
    for (key, bad) in [
        (MAX_ORDER_VALUE_KEY, json!(0.0)),
        (MAX_ORDER_VALUE_KEY, json!(-100.0)),
        (HIGH_RISK_ORDER_VALUE_KEY, json!(-1.0)),
        (BUY_LIMIT_PERCENT_KEY, json!(-0.01)),
        (STOP_LOSS_PERCENT_KEY, json!(1.0)),
        (STOP_LOSS_PERCENT_KEY, json!(-0.1)),
    ] {
        let mut value = base_value();
        value[key] = bad.clone();
        match settings_from_value(&value) {
            Err(SettingsError::Range { key: reported }) => assert_eq!(reported, key),
            other => panic!("{key}={bad}: expected range error, got {other:?}"),
        }
    }
}

#[test]
fn test_boundary_values_accepted() {
    let mut value = base_value();
    value[HIGH_RISK_ORDER_VALUE_KEY] = json!(0.0);
    value[BUY_LIMIT_PERCENT_KEY] = json!(0.0);
    value[STOP_LOSS_PERCENT_KEY] = json!(0.0);
    let settings = settings_from_value(&value).unwrap();
    assert_eq!(settings.stop_loss_percent, 0.0);
}

#[test]
fn test_load_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"max_order_value": 600, "buy_limit_percent": 0.05, "stop_loss_percent": 0.2}}"#
    )
    .unwrap();
    let settings = load_settings(file.path()).unwrap();
    assert_eq!(settings.max_order_value, 600.0);
}

#[test]
fn test_load_settings_rejects_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(matches!(
        load_settings(file.path()),
        Err(SettingsError::Json(_))
    ));
}

#[test]
fn test_load_settings_missing_file() {
    assert!(matches!(
        load_settings("/nonexistent/settings.json"),
        Err(SettingsError::Io(_))
    ));
}
