use super::*;
use crate::{model::ModelClass, types::DateTime, validate::ValidateError};

fn descriptor(name: &str, field_type: FieldType) -> FieldDescriptor {
    FieldDescriptor::new(name, field_type, FieldOptions::default()).expect("descriptor")
}

fn convert(field: &FieldDescriptor, raw: impl Into<Value>) -> Value {
    field
        .convert(&raw.into(), &ConstructOptions::default())
        .expect("convert")
}

#[test]
fn field_type_parses_known_names() {
    assert!(matches!("boolean".parse::<FieldType>(), Ok(FieldType::Bool)));
    assert!(matches!("string".parse::<FieldType>(), Ok(FieldType::Text)));
    assert!(matches!("array".parse::<FieldType>(), Ok(FieldType::Array)));
    assert!(matches!(
        "".parse::<FieldType>(),
        Err(FieldError::MissingParameter("type"))
    ));
    assert!(matches!(
        "Symbol".parse::<FieldType>(),
        Err(FieldError::InvalidFieldType(name)) if name == "Symbol"
    ));
}

#[test]
fn empty_name_is_rejected() {
    let err = FieldDescriptor::new("", FieldType::Text, FieldOptions::default())
        .expect_err("empty name");

    assert!(matches!(
        err,
        Error::FieldError(FieldError::MissingParameter("name"))
    ));
}

#[test]
fn scalar_converters_are_loose() {
    let flag = descriptor("flag", FieldType::Bool);
    let count = descriptor("count", FieldType::Number);
    let label = descriptor("label", FieldType::Text);

    assert_eq!(convert(&flag, "yes"), Value::Bool(true));
    assert_eq!(convert(&flag, 0), Value::Bool(false));
    assert_eq!(convert(&count, "12.5"), Value::Number(12.5));
    assert!(convert(&count, "twelve").as_number().is_some_and(f64::is_nan));
    assert_eq!(convert(&label, 42), Value::from("42"));
    assert_eq!(convert(&label, true), Value::from("true"));
}

#[test]
fn array_converter_rejects_non_lists() {
    let tags = descriptor("tags", FieldType::Array);

    assert_eq!(convert(&tags, Value::list(["a"])), Value::list(["a"]));

    let err = tags
        .convert(&Value::from("a"), &ConstructOptions::default())
        .expect_err("text");
    assert!(matches!(
        err,
        Error::FieldError(FieldError::TypeMismatch { ref found, .. }) if found == "string"
    ));
}

#[test]
fn object_serializer_drops_nulls_recursively() {
    let meta = descriptor("meta", FieldType::Object);
    let raw = Value::map([
        ("a", Value::from(1)),
        ("b", Value::Null),
        (
            "nested",
            Value::map([("c", Value::Null), ("d", Value::list([Value::Null]))]),
        ),
    ]);

    let plain = meta.serialize(&convert(&meta, raw));

    assert_eq!(
        plain,
        Value::map([
            ("a", Value::from(1)),
            ("nested", Value::map([("d", Value::list([Value::Null]))])),
        ])
    );
}

#[test]
fn custom_type_serializes_through_plain_form() {
    let when = descriptor("when", FieldType::Custom(DateTime::field_type()));

    let typed = convert(&when, "2012-12-21");
    assert!(typed.as_custom().is_some_and(|c| c.is::<DateTime>()));
    assert_eq!(when.serialize(&typed), Value::from("2012-12-21T00:00:00.000Z"));
}

#[test]
fn model_converter_builds_nested_instance() {
    let address = ModelClass::builder("Address")
        .field("city", FieldType::Text)
        .and_then(|b| b.build())
        .expect("class");
    let field = descriptor("address", FieldType::from(&address));

    let typed = convert(&field, Value::map([("city", "Paris")]));
    let nested = typed.as_model().expect("model");

    assert!(nested.is_instance_of(&address));
    assert_eq!(field.serialize(&typed), Value::map([("city", "Paris")]));
}

#[test]
fn overrides_replace_type_behaviour() {
    let options = FieldOptions::new()
        .convert_with(|raw| Value::Text(raw.to_text().to_uppercase()))
        .serializer(|value| Value::Text(value.to_text().to_lowercase()));
    let name = FieldDescriptor::new("name", FieldType::Text, options).expect("descriptor");

    let typed = convert(&name, "Dupont");
    assert_eq!(typed, Value::from("DUPONT"));
    assert_eq!(name.serialize(&typed), Value::from("dupont"));
}

#[test]
fn plain_options_reject_unknown_keys() {
    let err = FieldOptions::from_plain(&Value::map([("defaultValeu", 1)])).expect_err("typo");
    assert!(matches!(
        err,
        Error::FieldError(FieldError::UnknownOption(ref key)) if key == "defaultValeu"
    ));

    // known, but only expressible through the builder
    let err = FieldOptions::from_plain(&Value::map([("converter", "upper")])).expect_err("fn");
    assert!(matches!(
        err,
        Error::FieldError(FieldError::TypeMismatch { ref expected, ref found })
            if expected.contains("'converter'") && found == "string"
    ));

    let options = FieldOptions::from_plain(&Value::map([
        ("defaultValue", Value::from("France")),
        ("validators", Value::list(["required", "minLength(2)"])),
    ]))
    .expect("options");
    let country = FieldDescriptor::new("country", FieldType::Text, options).expect("descriptor");

    assert_eq!(country.validators().len(), 2);
    assert!(matches!(
        country.default_value(),
        Some(DefaultValue::Value(Value::Text(text))) if text == "France"
    ));
}

#[test]
fn unknown_validator_fails_at_declaration() {
    let options = FieldOptions::new().validator("isPrime");
    let err = FieldDescriptor::new("n", FieldType::Number, options).expect_err("unknown");

    assert!(matches!(
        err,
        Error::ValidateError(ValidateError::UnknownValidator(ref name)) if name == "isPrime"
    ));
}

#[test]
fn field_check_reports_path() {
    let options = FieldOptions::new().validators(["required", "minLength(2)"]);
    let name = FieldDescriptor::new("name", FieldType::Text, options).expect("descriptor");

    let absent = name.check_validity(None, "name");
    assert_eq!(absent.reasons().len(), 2);

    let short = name.check_validity(Some(&Value::from("D")), "name");
    assert_eq!(short.reasons(), [crate::validate::Reason::new("minLength(2)", "name")]);

    assert!(name.check_validity(Some(&Value::from("Dupont")), "name").is_valid());
}

#[test]
fn construct_options_read_camel_case() {
    let options: ConstructOptions =
        serde_json::from_value(serde_json::json!({ "useDefaultValues": false })).expect("json");
    assert_eq!(options, ConstructOptions::without_defaults());

    let defaults: ConstructOptions =
        serde_json::from_value(serde_json::json!({})).expect("json");
    assert!(defaults.use_default_values);
}
