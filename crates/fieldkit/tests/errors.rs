use fieldkit::{Error, ErrorKind, ErrorOrigin, prelude::*, tracing::setup_tracing};

fn declare(field_type: &str, options: FieldOptions) -> Result<ModelClass, Error> {
    ModelClass::builder("Probe")
        .field_with("value", field_type, options)
        .and_then(ModelClassBuilder::build)
        .map_err(Error::from)
}

#[test]
fn declaration_errors_map_to_kinds() {
    setup_tracing();

    let err = declare("symbol", FieldOptions::new()).expect_err("type");
    assert_eq!((err.kind, err.origin), (ErrorKind::InvalidFieldType, ErrorOrigin::Field));

    let err = declare("", FieldOptions::new()).expect_err("missing");
    assert_eq!(err.kind, ErrorKind::MissingParameter);

    let err = declare("number", FieldOptions::new().validator("prime")).expect_err("rule");
    assert_eq!((err.kind, err.origin), (ErrorKind::UnknownValidator, ErrorOrigin::Validate));

    let err = FieldOptions::from_plain(&Value::map([("required", true)]))
        .map_err(Error::from)
        .expect_err("option");
    assert_eq!(err.kind, ErrorKind::UnknownOption);
}

#[test]
fn runtime_errors_map_to_kinds() {
    setup_tracing();

    let list = declare("array", FieldOptions::new()).expect("class");
    let err = Model::new(&list, &Value::map([("value", "x")]))
        .map_err(Error::from)
        .expect_err("mismatch");
    assert_eq!(err.kind, ErrorKind::TypeMismatch);

    let mut model = Model::empty(&list);
    let err = model
        .set_field("other", 1)
        .map_err(Error::from)
        .expect_err("undefined");
    assert_eq!((err.kind, err.origin), (ErrorKind::UndefinedField, ErrorOrigin::Model));

    let err = model
        .mutate_from_value(&Value::from(1), Retype::default())
        .map_err(Error::from)
        .expect_err("argument");
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    let err = model
        .specialize(&list, true)
        .map_err(Error::from)
        .expect_err("direction");
    assert_eq!(err.kind, ErrorKind::InvalidDirection);
}

#[test]
fn converter_failures_are_conversion_errors() {
    let options = FieldOptions::new().converter(|raw, _| match raw {
        Value::Text(text) if !text.is_empty() => Ok(raw.clone()),
        _ => Err(fieldkit::core::Error::custom("blank input")),
    });
    let class = declare("string", options).expect("class");

    let err = Model::new(&class, &Value::map([("value", "")]))
        .map_err(Error::from)
        .expect_err("blank");

    assert_eq!(err.kind, ErrorKind::Conversion);
    assert_eq!(err.to_string(), "conversion failed: blank input");
}

#[test]
fn validation_failure_carries_reasons() {
    let class = declare("string", FieldOptions::new().validator("required")).expect("class");
    let model = Model::empty(&class);

    let err = Error::from(model.validate().expect_err("invalid"));

    assert_eq!(err.kind, ErrorKind::ValidationFailed);
    assert_eq!(err.reasons, [Reason::new("required", "value")]);
    assert_eq!(
        serde_json::to_value(&err).expect("json"),
        serde_json::json!({
            "kind": "ValidationFailed",
            "origin": "Validate",
            "message": "validation failed (reasons=[{failedValidator: 'required', path: 'value'}])",
            "reasons": [{ "failedValidator": "required", "path": "value" }]
        })
    );
}
