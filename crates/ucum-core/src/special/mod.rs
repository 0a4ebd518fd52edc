//! Conversion functions for special (non-ratio) units
//!
//! Each special unit names a function pair. `from_canonical` maps a value in
//! the unit's base-unit reference term onto the special scale (kelvin to
//! degrees Celsius), `to_canonical` maps back. The pairs run on `f64`; results
//! re-enter decimal arithmetic rounded to a fixed number of fractional digits.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::DecimalError;
use crate::types::Decimal;

/// Fractional digits kept from a special function result
pub const DEFAULT_SCALE: u32 = 10;

type Transform = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A named pair of mutually inverse functions
#[derive(Clone)]
pub struct SpecialFunction {
    name: String,
    from_canonical: Transform,
    to_canonical: Transform,
}

impl SpecialFunction {
    pub fn new(
        name: impl Into<String>,
        from_canonical: impl Fn(f64) -> f64 + Send + Sync + 'static,
        to_canonical: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            from_canonical: Arc::new(from_canonical),
            to_canonical: Arc::new(to_canonical),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base-unit value to the special scale
    pub fn from_canonical(&self, value: &Decimal, scale: u32) -> Result<Decimal, DecimalError> {
        apply(&self.from_canonical, value, scale)
    }

    /// Special-scale value to the base-unit value
    pub fn to_canonical(&self, value: &Decimal, scale: u32) -> Result<Decimal, DecimalError> {
        apply(&self.to_canonical, value, scale)
    }
}

impl fmt::Debug for SpecialFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecialFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn apply(transform: &Transform, value: &Decimal, scale: u32) -> Result<Decimal, DecimalError> {
    let input = value.to_f64().ok_or(DecimalError::NonFinite)?;
    Decimal::from_f64_fixed_scale(transform(input), scale)
}

/// Built-in function pairs, by name
struct BuiltinDef {
    name: &'static str,
    from_canonical: fn(f64) -> f64,
    to_canonical: fn(f64) -> f64,
}

static BUILTINS: &[BuiltinDef] = &[
    BuiltinDef {
        name: "Cel",
        from_canonical: |x| x - 273.15,
        to_canonical: |x| x + 273.15,
    },
    BuiltinDef {
        name: "degF",
        from_canonical: |x| x - 459.67,
        to_canonical: |x| x + 459.67,
    },
    BuiltinDef {
        name: "degRe",
        from_canonical: |x| x - 218.52,
        to_canonical: |x| x + 218.52,
    },
    BuiltinDef {
        name: "pH",
        from_canonical: neg_log10,
        to_canonical: |x| 10f64.powf(-x),
    },
    BuiltinDef {
        name: "hpX",
        from_canonical: neg_log10,
        to_canonical: |x| 10f64.powf(-x),
    },
    BuiltinDef {
        name: "hpC",
        from_canonical: |x| neg_log(x, 100.0),
        to_canonical: |x| 100f64.powf(-x),
    },
    BuiltinDef {
        name: "hpM",
        from_canonical: |x| neg_log(x, 1000.0),
        to_canonical: |x| 1000f64.powf(-x),
    },
    BuiltinDef {
        name: "hpQ",
        from_canonical: |x| neg_log(x, 50000.0),
        to_canonical: |x| 50000f64.powf(-x),
    },
    BuiltinDef {
        name: "ln",
        from_canonical: f64::ln,
        to_canonical: f64::exp,
    },
    BuiltinDef {
        name: "lg",
        from_canonical: f64::log10,
        to_canonical: |x| 10f64.powf(x),
    },
    BuiltinDef {
        name: "lgTimes2",
        from_canonical: |x| 2.0 * x.log10(),
        to_canonical: |x| 10f64.powf(x / 2.0),
    },
    BuiltinDef {
        name: "ld",
        from_canonical: f64::log2,
        to_canonical: |x| 2f64.powf(x),
    },
    BuiltinDef {
        name: "tanTimes100",
        from_canonical: |x| 100.0 * x.tan(),
        to_canonical: |x| (x / 100.0).atan(),
    },
    BuiltinDef {
        name: "100tan",
        from_canonical: |x| 100.0 * x.tan(),
        to_canonical: |x| (x / 100.0).atan(),
    },
    BuiltinDef {
        name: "sqrt",
        from_canonical: f64::sqrt,
        to_canonical: |x| x * x,
    },
];

/// `-log10(x)`, with 0 mapping to 0
fn neg_log10(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        -x.log10()
    }
}

/// `-log_base(x)`, with 0 mapping to 0
fn neg_log(x: f64, base: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        -x.ln() / base.ln()
    }
}

/// Set of special functions available to the canonicalizer
#[derive(Debug, Clone)]
pub struct SpecialFunctions {
    functions: HashMap<String, SpecialFunction>,
    scale: u32,
}

impl SpecialFunctions {
    /// All built-in functions at the default scale
    pub fn builtin() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> SpecialFunctionsBuilder {
        SpecialFunctionsBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&SpecialFunction> {
        self.functions.get(name)
    }

    /// Fractional digits kept from function results
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl Default for SpecialFunctions {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for [`SpecialFunctions`]. Functions added later replace earlier
/// ones with the same name, built-ins included.
#[derive(Debug, Clone)]
pub struct SpecialFunctionsBuilder {
    include_builtins: bool,
    custom: Vec<SpecialFunction>,
    scale: u32,
}

impl Default for SpecialFunctionsBuilder {
    fn default() -> Self {
        Self {
            include_builtins: true,
            custom: Vec::new(),
            scale: DEFAULT_SCALE,
        }
    }
}

impl SpecialFunctionsBuilder {
    pub fn with(mut self, function: SpecialFunction) -> Self {
        self.custom.push(function);
        self
    }

    pub fn without_builtins(mut self) -> Self {
        self.include_builtins = false;
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn build(self) -> SpecialFunctions {
        let mut functions = HashMap::new();
        if self.include_builtins {
            for def in BUILTINS {
                functions.insert(
                    def.name.to_string(),
                    SpecialFunction::new(def.name, def.from_canonical, def.to_canonical),
                );
            }
        }
        for function in self.custom {
            functions.insert(function.name.clone(), function);
        }
        SpecialFunctions {
            functions,
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(name: &str, value: f64) -> f64 {
        let functions = SpecialFunctions::builtin();
        let function = functions.get(name).unwrap();
        let input = Decimal::from_f64_fixed_scale(value, 10).unwrap();
        let special = function.from_canonical(&input, 10).unwrap();
        function.to_canonical(&special, 10).unwrap().to_f64().unwrap()
    }

    #[test]
    fn test_celsius() {
        let functions = SpecialFunctions::builtin();
        let cel = functions.get("Cel").unwrap();
        let kelvin = cel.to_canonical(&Decimal::one(), 4).unwrap();
        assert_eq!(kelvin.to_string(), "274.1500");
        let celsius = cel.from_canonical(&Decimal::from(5u64), 4).unwrap();
        assert_eq!(celsius.to_string(), "-268.1500");
    }

    #[test]
    fn test_builtins_invert() {
        for (name, value) in [
            ("Cel", 300.0),
            ("degF", 300.0),
            ("degRe", 300.0),
            ("pH", 1e-3),
            ("hpX", 0.01),
            ("hpC", 0.01),
            ("ln", 2.5),
            ("lg", 250.0),
            ("lgTimes2", 0.5),
            ("ld", 64.0),
            ("tanTimes100", 0.25),
            ("100tan", 0.25),
            ("sqrt", 9.0),
        ] {
            let back = round_trip(name, value);
            assert!((back - value).abs() < 1e-6, "{name}: {back} != {value}");
        }
    }

    #[test]
    fn test_ph_of_zero() {
        let functions = SpecialFunctions::builtin();
        let ph = functions.get("pH").unwrap();
        assert!(ph.from_canonical(&Decimal::zero(), 4).unwrap().is_zero());
    }

    #[test]
    fn test_homeopathic_potency_of_zero() {
        let functions = SpecialFunctions::builtin();
        for name in ["hpX", "hpC", "hpM", "hpQ"] {
            let potency = functions.get(name).unwrap();
            let result = potency.from_canonical(&Decimal::zero(), 4).unwrap();
            assert!(result.is_zero(), "{name}");
        }
    }

    #[test]
    fn test_non_finite_result() {
        let functions = SpecialFunctions::builtin();
        let lg = functions.get("lg").unwrap();
        assert_eq!(lg.from_canonical(&Decimal::from(-1i64), 4), Err(DecimalError::NonFinite));
    }

    #[test]
    fn test_custom_function_overrides_builtin() {
        let functions = SpecialFunctions::builder()
            .with(SpecialFunction::new("Cel", |x| x - 273.0, |x| x + 273.0))
            .scale(2)
            .build();
        let cel = functions.get("Cel").unwrap();
        assert_eq!(cel.to_canonical(&Decimal::one(), functions.scale()).unwrap().to_string(), "274.00");
        assert!(functions.get("degF").is_some());
    }

    #[test]
    fn test_without_builtins() {
        let functions = SpecialFunctions::builder().without_builtins().build();
        assert_eq!(functions.names().count(), 0);
    }
}
