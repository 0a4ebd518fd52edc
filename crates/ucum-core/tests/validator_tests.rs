use ucum_core::{Config, Engine, ParseError};

fn validate(input: &str) -> Result<String, ParseError> {
    Engine::new().validate(input).map(|term| term.to_string())
}

#[test]
fn test_valid_expressions() {
    for input in [
        "m",
        "kg.m/s2",
        "/min",
        "mmol/l",
        "10*3/ul",
        "{cells}/ul",
        "mm[Hg]",
        "[in_i]2",
        "4.[pi].10*-7.N/A2",
        "(m/s){speed}",
        "5.Cel",
        "cB[SPL]",
    ] {
        assert_eq!(validate(input).as_deref(), Ok(input), "{input}");
    }
}

#[test]
fn test_unknown_and_misprefixed_units() {
    assert_eq!(validate("foo"), Err(ParseError::UnknownUnit("foo".into())));
    assert_eq!(
        validate("Xm"),
        Err(ParseError::InvalidPrefix {
            prefix: "X".into(),
            unit: "m".into()
        })
    );
}

#[test]
fn test_syntax_errors() {
    for input in ["", "m.", "(m/s", "m..s", "m s", "m{a"] {
        assert!(
            matches!(validate(input), Err(ParseError::Syntax(_))),
            "{input:?} should not parse"
        );
    }
}

#[test]
fn test_annotations_must_be_ascii() {
    assert!(matches!(
        validate("{Stück}"),
        Err(ParseError::InvalidAnnotation(_))
    ));
}

#[test]
fn test_special_unit_rules() {
    for input in ["Cel2", "m/Cel", "/Cel", "Cel.[degF]", "K/(2.Cel)"] {
        assert!(
            matches!(validate(input), Err(ParseError::InvalidSpecialUnitUsage(_))),
            "{input} should be rejected"
        );
    }
}

#[test]
fn test_prefix_on_non_metric_units() {
    assert!(validate("k[in_i]").is_ok());

    let strict = Engine::with_config(Config::default().with_prefix_on_non_metric_units(false));
    assert_eq!(
        strict.validate("k[in_i]"),
        Err(ParseError::PrefixOnNonMetricUnit {
            prefix: "k".into(),
            unit: "[in_i]".into()
        })
    );
    assert!(strict.validate("km").is_ok());
}

#[test]
fn test_annotation_after_parens() {
    let strict = Engine::with_config(Config::default().with_annot_after_parens(false));
    assert_eq!(
        strict.validate("(m/s){speed}"),
        Err(ParseError::AnnotationAfterParens)
    );
    assert!(strict.validate("m/s{speed}").is_ok());
}

#[test]
fn test_batch_validate() {
    let engine = Engine::new();
    let inputs = ["m", "foo", "kg/m3", "Cel2"];
    let results = engine.batch_validate(&inputs);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ParseError::UnknownUnit(_))));
    assert!(results[2].is_ok());
    assert!(matches!(results[3], Err(ParseError::InvalidSpecialUnitUsage(_))));
}

#[test]
fn test_print_round_trip() {
    let engine = Engine::new();
    for input in ["kg.m/s2", "/s.m", "(m/s){speed}", "10*-3.[in_i]2", "{rbc}"] {
        let printed = engine.print(input).unwrap();
        assert_eq!(engine.validate(&printed), engine.validate(input));
    }
}
