use super::*;

fn check(source: &str, value: Option<Value>) -> bool {
    let validator = Validator::parse(source).expect("validator");

    matches!(
        validator.check(Subject::from(value.as_ref()), "field"),
        Verdict::Pass
    )
}

#[test]
fn standard_rules_resolve_by_name() {
    for source in [
        "required",
        "filled",
        "positive",
        "negative",
        "minLength(2)",
        "maxLength( 10 )",
        "match(/^[a-z]+$/i)",
        r#"match("^\\d+$")"#,
    ] {
        assert!(Validator::parse(source).is_ok(), "{source} should resolve");
    }
}

#[test]
fn unknown_or_malformed_rules_are_rejected() {
    for source in [
        "isPrime",
        "required(1)",
        "minLength",
        "minLength(-1)",
        "minLength(1.5)",
        "minLength(2",
        "match(/a/x)",
        "match(/[/)",
    ] {
        let err = Validator::parse(source).expect_err(source);
        assert!(
            matches!(err, ValidateError::UnknownValidator(ref name) if name == source),
            "{source}: {err}"
        );
    }
}

#[test]
fn required_and_filled() {
    assert!(!check("required", None));
    assert!(!check("required", Some(Value::Null)));
    assert!(check("required", Some(Value::from(""))));

    assert!(!check("filled", Some(Value::from(""))));
    assert!(!check("filled", Some(Value::from(0))));
    assert!(check("filled", Some(Value::from("x"))));
}

#[test]
fn sign_rules_cast_to_number() {
    assert!(check("positive", Some(Value::from("3"))));
    assert!(!check("positive", Some(Value::from(0))));
    assert!(!check("positive", None));
    assert!(check("negative", Some(Value::from(-0.5))));
    assert!(!check("negative", Some(Value::from("junk"))));
}

#[test]
fn length_rules_treat_absence_differently() {
    assert!(!check("minLength(2)", None));
    assert!(!check("minLength(2)", Some(Value::from("D"))));
    assert!(check("minLength(2)", Some(Value::list([1, 2]))));

    assert!(check("maxLength(3)", None));
    assert!(check("maxLength(3)", Some(Value::Null)));
    assert!(!check("maxLength(3)", Some(Value::from("four"))));
    assert!(!check("maxLength(3)", Some(Value::from(12))));
}

#[test]
fn match_applies_flags_and_casts() {
    assert!(check("match(/^[a-z]+$/i)", Some(Value::from("Dupont"))));
    assert!(!check("match(/^[a-z]+$/i)", Some(Value::from("R2D2"))));
    assert!(!check("match(/^[a-z]+$/i)", None));
    assert!(check("match(/^\\d+$/)", Some(Value::from(42))));
}

#[test]
fn rule_reports_its_source_text() {
    let validator = Validator::parse("  match(/^[a-z]+$/i) ").expect("validator");

    assert_eq!(validator.name(), "match(/^[a-z]+$/i)");
}

#[test]
fn function_results_are_interpreted() {
    let even = Validator::function("even", |subject: Subject<'_>, _: &str| {
        subject.to_number() % 2.0 == 0.0
    });
    let unknown = Validator::function("unknown", |_: Subject<'_>, _: &str| None::<bool>);
    let nested = Validator::function("nested", |_: Subject<'_>, path: &str| {
        Validity::from_reasons(vec![Reason::new("inner", format!("{path}.inner"))])
    });

    let four = Value::from(4);
    let three = Value::from(3);
    let mut reasons = Vec::new();

    check_chain(
        &[even.clone(), unknown, nested],
        Subject::from(&four),
        "n",
        &mut reasons,
    );
    check_chain(&[even], Subject::from(&three), "m", &mut reasons);

    assert_eq!(
        reasons,
        [
            Reason::new("unknown", "n"),
            Reason::new("inner", "n.inner"),
            Reason::new("even", "m"),
        ]
    );
}

#[test]
fn validity_serializes_camel_case() {
    let valid = serde_json::to_value(Validity::valid()).expect("json");
    assert_eq!(valid, serde_json::json!({ "valid": true }));

    let invalid = Validity::from_reasons(vec![Reason::new("required", "name")]);
    assert_eq!(
        serde_json::to_value(&invalid).expect("json"),
        serde_json::json!({
            "valid": false,
            "reasons": [{ "failedValidator": "required", "path": "name" }]
        })
    );
}

#[test]
fn validation_failed_lists_reasons() {
    let err = ValidateError::ValidationFailed(vec![
        Reason::new("required", "name"),
        Reason::new("minLength(2)", "nickname"),
    ]);

    assert_eq!(
        err.to_string(),
        "validation failed (reasons=[{failedValidator: 'required', path: 'name'}, \
         {failedValidator: 'minLength(2)', path: 'nickname'}])"
    );
}
