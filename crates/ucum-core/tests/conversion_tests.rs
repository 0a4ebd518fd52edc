use ucum_core::{ConversionError, Decimal, Dimension, Engine, EngineError};

fn d(text: &str) -> Decimal {
    text.parse().unwrap()
}

fn convert(factor: &str, from: &str, to: &str) -> Decimal {
    Engine::new()
        .convert(&d(factor), from, to)
        .unwrap_or_else(|err| panic!("{factor} {from} -> {to}: {err}"))
}

fn convert_mol(factor: &str, from: &str, to: &str, coefficient: &str) -> Decimal {
    Engine::new()
        .convert_with_mol_mass(&d(factor), from, to, &d(coefficient))
        .unwrap_or_else(|err| panic!("{factor} {from} -> {to}: {err}"))
}

#[test]
fn test_inch_conversions() {
    assert_eq!(convert("1", "[in_i]", "m").to_string(), "0.0254");
    assert_eq!(convert("1", "[in_i]", "cm").to_string(), "2.54");
    assert_eq!(convert("1", "[in_i]2", "cm2").to_string(), "6.4516");
}

#[test]
fn test_prefixed_inch_with_non_metric_prefixes_enabled() {
    assert_eq!(convert("1", "M[in_i]", "cm").to_string(), "2540000");
    assert_eq!(convert("1", "M[in_i]2", "dm2").to_string(), "64516000000");
}

#[test]
fn test_customary_units() {
    assert_eq!(convert("1", "[ft_i]", "m").to_string(), "0.3048");
    assert_eq!(convert("1", "[yd_i]", "[ft_i]").to_string(), "3");
    assert_eq!(convert("1", "[mi_i]", "km").to_string(), "1.609344");
}

#[test]
fn test_time_and_volume() {
    assert_eq!(convert("2", "h", "s").to_string(), "7200");
    assert_eq!(convert("1", "l", "cm3").to_string(), "1000");
    assert_eq!(convert("250", "ml", "l").to_string(), "0.25");
}

#[test]
fn test_compound_units() {
    assert_eq!(convert("1", "N", "kg.m/s2").to_string(), "1");
    assert_eq!(convert("1", "kPa", "N/m2").to_string(), "1000");
    assert_eq!(convert("36", "km/h", "m/s").to_string(), "10");
}

#[test]
fn test_measured_factor_keeps_precision() {
    // 2.0 has two significant digits
    assert_eq!(convert("2.0", "[in_i]", "cm").to_string(), "5.1");
}

#[test]
fn test_dimension_mismatch() {
    let result = Engine::new().convert(&d("1"), "m", "s");
    let Err(EngineError::Conversion(ConversionError::BaseDimensionMismatch(diff))) = result else {
        panic!("expected a dimension mismatch, got {result:?}");
    };
    assert_eq!(diff.get(&Dimension::Length), Some(&1));
    assert_eq!(diff.get(&Dimension::Time), Some(&-1));
}

#[test]
fn test_arbitrary_units_do_not_convert() {
    let result = Engine::new().convert(&d("1"), "[IU]", "[IU]");
    assert!(matches!(result, Err(EngineError::Conversion(ConversionError::FailedCanonicalization(_)))));
}

#[test]
fn test_mol_mass_conversion() {
    let cases = [
        ("1", "mol", "g", "5", "5"),
        ("3", "5.mol", "2.g", "10", "75"),
        ("1", "g", "mol", "5", "0.2"),
        ("3", "5.g", "2.mol", "10", "0.75"),
        ("1", "mol2", "g2", "5", "25"),
        ("3", "5.mol2", "2.g2", "10", "750"),
        ("3", "5.g2", "2.mol2", "10", "0.075"),
        ("1", "osm", "g", "5", "5"),
        ("1", "g", "osm", "5", "0.2"),
        ("1", "kat", "g/s", "5", "5"),
        ("1", "g/s", "kat", "5", "0.2"),
    ];
    for (factor, from, to, coefficient, expected) in cases {
        assert_eq!(
            convert_mol(factor, from, to, coefficient).to_string(),
            expected,
            "{factor} {from} -> {to} with {coefficient} g/mol"
        );
    }
}

#[test]
fn test_mol_without_coefficient_is_avogadro() {
    assert_eq!(convert("1", "mol", "1").to_string(), "602214076000000000000000");
}

#[test]
fn test_mol_mass_disabled() {
    let engine = Engine::with_config(ucum_core::Config::default().with_mol_mass_conversion(false));
    let result = engine.convert_with_mol_mass(&d("1"), "mol", "g", &d("5"));
    assert!(matches!(
        result,
        Err(EngineError::Conversion(ConversionError::BaseDimensionMismatch(_)))
    ));
}
