use ucum_core::{CanonicalizeError, ConversionError, Decimal, Engine, EngineError};

fn d(text: &str) -> Decimal {
    text.parse().unwrap()
}

/// Special unit results are rounded to a fixed scale, so compare numerically
fn convert(factor: &str, from: &str, to: &str) -> f64 {
    Engine::new()
        .convert(&d(factor), from, to)
        .unwrap_or_else(|err| panic!("{factor} {from} -> {to}: {err}"))
        .to_f64()
        .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_celsius_to_kelvin() {
    assert_close(convert("1", "Cel", "K"), 274.15);
    assert_close(convert("1", "5.Cel", "K"), 278.15);
    assert_close(convert("5", "Cel", "K"), 278.15);
    assert_close(convert("1", "Cel.5", "K"), 278.15);
}

#[test]
fn test_kelvin_to_celsius() {
    assert_close(convert("1", "K", "Cel"), -272.15);
    assert_close(convert("3", "K", "Cel"), -270.15);
    assert_close(convert("1", "5.K", "Cel"), -268.15);
    assert_close(convert("3", "5.K", "Cel"), -258.15);
    assert_close(convert("5", "K", "Cel"), -268.15);
}

#[test]
fn test_prefixed_special_unit() {
    assert_close(convert("1", "mCel", "K"), 273.151);
}

#[test]
fn test_fahrenheit() {
    assert!((convert("1", "[degF]", "K") - 255.93).abs() < 0.01);
    assert!((convert("32", "[degF]", "Cel") - 0.0).abs() < 1e-6);
    assert!((convert("100", "Cel", "[degF]") - 212.0).abs() < 1e-6);
}

#[test]
fn test_sound_pressure_level() {
    let result = convert("3", "cB[SPL].5", "g.m-1.s-2");
    assert!((result - 0.02377).abs() < 1e-5, "got {result}");
}

#[test]
fn test_ph() {
    let result = convert("7", "[pH]", "mol/l");
    assert!((result - 1e-7).abs() < 1e-10, "got {result}");
}

#[test]
fn test_special_results_are_measured() {
    let result = Engine::new().convert(&d("1"), "Cel", "K").unwrap();
    assert!(result.is_limited());
}

#[test]
fn test_special_unit_with_mol_mass() {
    let result = Engine::new().convert_with_mol_mass(&d("7"), "[pH]", "g/l", &d("18"));
    assert_eq!(
        result,
        Err(EngineError::Conversion(ConversionError::FailedCanonicalization(
            CanonicalizeError::MolInSpecialUnitToMass
        )))
    );
}
