use super::*;
use crate::{Error, field::FieldError};

#[test]
fn date_time_renders_utc_with_millis() {
    let dt = DateTime::parse("2016-03-04T12:30:00+02:00").expect("parse");

    assert_eq!(dt.to_string(), "2016-03-04T10:30:00.000Z");
}

#[test]
fn date_time_accepts_bare_dates_and_millis() {
    let from_date = DateTime::parse("1980-05-17").expect("parse");
    assert_eq!(from_date.to_string(), "1980-05-17T00:00:00.000Z");

    let from_millis = DateTime::from_unix_millis(1_500.0).expect("millis");
    assert_eq!(from_millis.to_string(), "1970-01-01T00:00:01.500Z");

    assert!(DateTime::from_unix_millis(f64::NAN).is_none());
    assert!(DateTime::parse("yesterday").is_none());
}

#[test]
fn date_time_type_constructs_from_text_number_and_self() {
    let ty = DateTime::field_type();

    let from_text = ty.construct(&Value::from("2020-02-29T23:59:59Z")).expect("text");
    let from_number = ty.construct(&Value::from(0)).expect("number");
    let from_self = ty.construct(&Value::Custom(from_text.clone())).expect("self");

    assert!(from_text.is::<DateTime>());
    assert_eq!(from_number.to_plain(), Some(Value::from("1970-01-01T00:00:00.000Z")));
    assert_eq!(from_self, from_text);
}

#[test]
fn date_time_type_rejects_other_input() {
    let ty = DateTime::field_type();

    let err = ty.construct(&Value::Bool(true)).expect_err("bool");
    assert!(matches!(err, Error::FieldError(FieldError::TypeMismatch { .. })));

    let err = ty.construct(&Value::from("not a date")).expect_err("junk");
    assert!(err.to_string().contains("'not a date'"), "{err}");
}

#[test]
fn local_date_time_keeps_wall_clock() {
    let ty = LocalDateTime::field_type();

    let value = ty.construct(&Value::from("1977-05-25T20:15:00")).expect("parse");
    assert_eq!(value.to_plain(), Some(Value::from("1977-05-25T20:15:00.000")));

    let date_only = LocalDateTime::parse("1977-05-25").expect("date");
    assert_eq!(date_only.to_string(), "1977-05-25T00:00:00.000");

    assert!(ty.construct(&Value::from(0)).is_err());
}

#[test]
fn custom_values_compare_by_content_and_type() {
    let a = CustomValue::new(DateTime::parse("2020-01-01").expect("a"));
    let b = CustomValue::new(DateTime::parse("2020-01-01T00:00:00Z").expect("b"));
    let c = CustomValue::new(LocalDateTime::parse("2020-01-01").expect("c"));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(c.downcast_ref::<DateTime>().is_none());
}
