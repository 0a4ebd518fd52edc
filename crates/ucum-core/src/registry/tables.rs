//! Static UCUM concept tables
//!
//! To add a unit, add an entry to [`UNITS`]. Definitions are UCUM expressions
//! and are parsed on first use, so every definition must only reference codes
//! that are in these tables.

use crate::types::{BaseUnitDef, DefinedKind, Dimension, PrefixDef, UnitDef};

const fn prefix(code: &'static str, name: &'static str, factor: &'static str) -> PrefixDef {
    PrefixDef { code, name, factor }
}

const fn base(
    code: &'static str,
    name: &'static str,
    property: &'static str,
    dimension: Dimension,
) -> BaseUnitDef {
    BaseUnitDef {
        code,
        name,
        property,
        dimension,
    }
}

/// A unit equal to `factor` times `definition`
const fn derived(
    code: &'static str,
    name: &'static str,
    property: &'static str,
    metric: bool,
    factor: &'static str,
    definition: &'static str,
) -> UnitDef {
    UnitDef {
        code,
        name,
        property,
        metric,
        kind: DefinedKind::Derived { factor, definition },
    }
}

const fn dimless(
    code: &'static str,
    name: &'static str,
    property: &'static str,
    metric: bool,
    factor: &'static str,
    definition: &'static str,
) -> UnitDef {
    UnitDef {
        code,
        name,
        property,
        metric,
        kind: DefinedKind::Dimless { factor, definition },
    }
}

const fn special(
    code: &'static str,
    name: &'static str,
    property: &'static str,
    metric: bool,
    function: &'static str,
    factor: &'static str,
    definition: &'static str,
) -> UnitDef {
    UnitDef {
        code,
        name,
        property,
        metric,
        kind: DefinedKind::Special {
            function,
            factor,
            definition,
        },
    }
}

const fn arbitrary(code: &'static str, name: &'static str, property: &'static str) -> UnitDef {
    UnitDef {
        code,
        name,
        property,
        metric: false,
        kind: DefinedKind::Arbitrary,
    }
}

pub static PREFIXES: &[PrefixDef] = &[
    prefix("Y", "yotta", "1e24"),
    prefix("Z", "zetta", "1e21"),
    prefix("E", "exa", "1e18"),
    prefix("P", "peta", "1e15"),
    prefix("T", "tera", "1e12"),
    prefix("G", "giga", "1e9"),
    prefix("M", "mega", "1e6"),
    prefix("k", "kilo", "1e3"),
    prefix("h", "hecto", "1e2"),
    prefix("da", "deka", "1e1"),
    prefix("d", "deci", "1e-1"),
    prefix("c", "centi", "1e-2"),
    prefix("m", "milli", "1e-3"),
    prefix("u", "micro", "1e-6"),
    prefix("n", "nano", "1e-9"),
    prefix("p", "pico", "1e-12"),
    prefix("f", "femto", "1e-15"),
    prefix("a", "atto", "1e-18"),
    prefix("z", "zepto", "1e-21"),
    prefix("y", "yocto", "1e-24"),
    prefix("Ki", "kibi", "1024"),
    prefix("Mi", "mebi", "1048576"),
    prefix("Gi", "gibi", "1073741824"),
    prefix("Ti", "tebi", "1099511627776"),
];

pub static BASE_UNITS: &[BaseUnitDef] = &[
    base("m", "meter", "length", Dimension::Length),
    base("s", "second", "time", Dimension::Time),
    base("g", "gram", "mass", Dimension::Mass),
    base("rad", "radian", "plane angle", Dimension::PlaneAngle),
    base("K", "kelvin", "temperature", Dimension::Temperature),
    base("C", "coulomb", "electric charge", Dimension::ElectricCharge),
    base("cd", "candela", "luminous intensity", Dimension::LuminousIntensity),
];

pub static UNITS: &[UnitDef] = &[
    // Dimensionless
    dimless("10*", "the number ten for arbitrary powers", "number", false, "10", "1"),
    dimless("10^", "the number ten for arbitrary powers", "number", false, "10", "1"),
    dimless("[pi]", "the number pi", "number", false, "3.1415926535897932384626433832795028841971693993751058209749445923", "1"),
    dimless("%", "percent", "fraction", false, "1", "10*-2"),
    dimless("[ppth]", "parts per thousand", "fraction", false, "1", "10*-3"),
    dimless("[ppm]", "parts per million", "fraction", false, "1", "10*-6"),
    dimless("[ppb]", "parts per billion", "fraction", false, "1", "10*-9"),
    dimless("[pptr]", "parts per trillion", "fraction", false, "1", "10*-12"),
    // SI
    derived("mol", "mole", "amount of substance", true, "6.02214076", "10*23"),
    derived("sr", "steradian", "solid angle", true, "1", "rad2"),
    derived("Hz", "hertz", "frequency", true, "1", "s-1"),
    derived("N", "newton", "force", true, "1", "kg.m/s2"),
    derived("Pa", "pascal", "pressure", true, "1", "N/m2"),
    derived("J", "joule", "energy", true, "1", "N.m"),
    derived("W", "watt", "power", true, "1", "J/s"),
    derived("A", "ampere", "electric current", true, "1", "C/s"),
    derived("V", "volt", "electric potential", true, "1", "J/C"),
    derived("F", "farad", "electric capacitance", true, "1", "C/V"),
    derived("Ohm", "ohm", "electric resistance", true, "1", "V/A"),
    derived("S", "siemens", "electric conductance", true, "1", "Ohm-1"),
    derived("Wb", "weber", "magnetic flux", true, "1", "V.s"),
    derived("T", "tesla", "magnetic flux density", true, "1", "Wb/m2"),
    derived("H", "henry", "inductance", true, "1", "Wb/A"),
    derived("lm", "lumen", "luminous flux", true, "1", "cd.sr"),
    derived("lx", "lux", "illuminance", true, "1", "lm/m2"),
    derived("Bq", "becquerel", "radioactivity", true, "1", "s-1"),
    derived("Gy", "gray", "energy dose", true, "1", "J/kg"),
    derived("Sv", "sievert", "dose equivalent", true, "1", "J/kg"),
    // Angles
    derived("gon", "gon", "plane angle", false, "0.9", "deg"),
    derived("deg", "degree", "plane angle", false, "2", "[pi].rad/360"),
    derived("'", "minute", "plane angle", false, "1", "deg/60"),
    derived("''", "second", "plane angle", false, "1", "'/60"),
    // Accepted with SI
    derived("l", "liter", "volume", true, "1", "dm3"),
    derived("L", "liter", "volume", true, "1", "l"),
    derived("ar", "are", "area", true, "100", "m2"),
    derived("min", "minute", "time", false, "60", "s"),
    derived("h", "hour", "time", false, "60", "min"),
    derived("d", "day", "time", false, "24", "h"),
    derived("a_t", "tropical year", "time", false, "365.24219", "d"),
    derived("a_j", "mean Julian year", "time", false, "365.25", "d"),
    derived("a_g", "mean Gregorian year", "time", false, "365.2425", "d"),
    derived("a", "year", "time", false, "1", "a_j"),
    derived("wk", "week", "time", false, "7", "d"),
    derived("mo_j", "mean Julian month", "time", false, "1", "a_j/12"),
    derived("mo", "month", "time", false, "1", "mo_j"),
    derived("t", "tonne", "mass", true, "1e3", "kg"),
    derived("bar", "bar", "pressure", true, "1e5", "Pa"),
    derived("u", "unified atomic mass unit", "mass", true, "1.66053906660e-24", "g"),
    derived("eV", "electronvolt", "energy", true, "1", "[e].V"),
    derived("AU", "astronomic unit", "length", false, "149597.870691", "Mm"),
    derived("pc", "parsec", "length", true, "3.085678e16", "m"),
    // Natural constants
    derived("[c]", "velocity of light", "velocity", true, "299792458", "m/s"),
    derived("[h]", "Planck constant", "action", true, "6.62607015e-34", "J.s"),
    derived("[k]", "Boltzmann constant", "(unclassified)", true, "1.380649e-23", "J/K"),
    derived("[eps_0]", "permittivity of vacuum", "electric permittivity", true, "8.854187817e-12", "F/m"),
    derived("[mu_0]", "permeability of vacuum", "magnetic permeability", true, "1", "4.[pi].10*-7.N/A2"),
    derived("[e]", "elementary charge", "electric charge", true, "1.602176634e-19", "C"),
    derived("[m_e]", "electron mass", "mass", true, "9.1093837139e-31", "kg"),
    derived("[m_p]", "proton mass", "mass", true, "1.67262192595e-27", "kg"),
    derived("[G]", "Newtonian constant of gravitation", "(unclassified)", true, "6.67430e-11", "m3.kg-1.s-2"),
    derived("[g]", "standard acceleration of free fall", "acceleration", true, "9.80665", "m/s2"),
    derived("atm", "standard atmosphere", "pressure", false, "101325", "Pa"),
    derived("[ly]", "light-year", "length", true, "1", "[c].a_j"),
    derived("gf", "gram-force", "force", true, "1", "g.[g]"),
    // CGS
    derived("Ky", "Kayser", "lineic number", true, "1", "cm-1"),
    derived("Gal", "Gal", "acceleration", true, "1", "cm/s2"),
    derived("dyn", "dyne", "force", true, "1", "g.cm/s2"),
    derived("erg", "erg", "energy", true, "1", "dyn.cm"),
    derived("P", "Poise", "dynamic viscosity", true, "1", "dyn.s/cm2"),
    derived("St", "Stokes", "kinematic viscosity", true, "1", "cm2/s"),
    derived("Mx", "Maxwell", "flux of magnetic induction", true, "1e-8", "Wb"),
    derived("G", "Gauss", "magnetic flux density", true, "1e-4", "T"),
    derived("Oe", "Oersted", "magnetic field intensity", true, "250", "/[pi].A/m"),
    derived("Bi", "Biot", "electric current", true, "10", "A"),
    derived("Ci", "Curie", "radioactivity", true, "3.7e10", "Bq"),
    derived("R", "Roentgen", "ion dose", true, "2.58e-4", "C/kg"),
    derived("RAD", "radiation absorbed dose", "energy dose", true, "100", "erg/g"),
    derived("REM", "radiation equivalent man", "dose equivalent", true, "1", "RAD"),
    // International customary
    derived("[in_i]", "inch", "length", false, "2.54", "cm"),
    derived("[ft_i]", "foot", "length", false, "12", "[in_i]"),
    derived("[yd_i]", "yard", "length", false, "3", "[ft_i]"),
    derived("[mi_i]", "mile", "length", false, "5280", "[ft_i]"),
    derived("[nmi_i]", "nautical mile", "length", false, "1852", "m"),
    derived("[kn_i]", "knot", "velocity", false, "1", "[nmi_i]/h"),
    derived("[sin_i]", "square inch", "area", false, "1", "[in_i]2"),
    derived("[sft_i]", "square foot", "area", false, "1", "[ft_i]2"),
    derived("[cin_i]", "cubic inch", "volume", false, "1", "[in_i]3"),
    derived("[cft_i]", "cubic foot", "volume", false, "1", "[ft_i]3"),
    derived("[mil_i]", "mil", "length", false, "1e-3", "[in_i]"),
    // US volumes
    derived("[gal_us]", "Queen Anne's wine gallon", "fluid volume", false, "231", "[in_i]3"),
    derived("[qt_us]", "quart", "fluid volume", false, "1", "[gal_us]/4"),
    derived("[pt_us]", "pint", "fluid volume", false, "1", "[qt_us]/2"),
    derived("[foz_us]", "fluid ounce", "fluid volume", false, "1", "[pt_us]/16"),
    derived("[cup_us]", "cup", "volume", false, "8", "[foz_us]"),
    derived("[tbs_us]", "tablespoon", "volume", false, "1", "[foz_us]/2"),
    derived("[tsp_us]", "teaspoon", "volume", false, "1", "[tbs_us]/3"),
    // Avoirdupois
    derived("[gr]", "grain", "mass", false, "64.79891", "mg"),
    derived("[lb_av]", "pound", "mass", false, "7000", "[gr]"),
    derived("[oz_av]", "ounce", "mass", false, "1", "[lb_av]/16"),
    derived("[stone_av]", "stone", "mass", false, "14", "[lb_av]"),
    derived("[lbf_av]", "pound force", "force", false, "1", "[lb_av].[g]"),
    // Heat and power
    derived("[degR]", "degree Rankine", "temperature", false, "5", "K/9"),
    derived("cal", "calorie", "energy", true, "4.184", "J"),
    derived("[Cal]", "nutrition label Calories", "energy", false, "1", "kcal"),
    derived("[Btu_th]", "thermochemical British thermal unit", "energy", false, "1.05435", "kJ"),
    derived("[Btu]", "British thermal unit", "energy", false, "1", "[Btu_th]"),
    derived("[HP]", "horsepower", "power", false, "550", "[ft_i].[lbf_av]/s"),
    derived("[psi]", "pound per square inch", "pressure", false, "1", "[lbf_av]/[in_i]2"),
    // Clinical and chemical
    derived("eq", "equivalents", "amount of substance", true, "1", "mol"),
    derived("osm", "osmole", "amount of substance (dissolved particles)", true, "1", "mol"),
    derived("kat", "katal", "catalytic activity", true, "1", "mol/s"),
    derived("U", "Unit", "catalytic activity", true, "1", "umol/min"),
    derived("g%", "gram percent", "mass concentration", true, "1", "g/dl"),
    derived("[S]", "Svedberg unit", "sedimentation coefficient", false, "1", "10*-13.s"),
    derived("m[Hg]", "meter of mercury column", "pressure", true, "133.3220", "kPa"),
    derived("m[H2O]", "meter of water column", "pressure", true, "9.80665", "kPa"),
    derived("[in_i'Hg]", "inch of mercury column", "pressure", false, "1", "m[Hg].[in_i]/m"),
    derived("[diop]", "diopter", "refraction of a lens", false, "1", "/m"),
    derived("[drp]", "drop", "volume", false, "1", "ml/20"),
    derived("[mesh_i]", "mesh", "lineic number", false, "1", "/[in_i]"),
    derived("[Ch]", "Charriere", "gauge of catheters", false, "1", "mm/3"),
    // Information technology
    dimless("bit", "bit", "amount of information", true, "1", "1"),
    derived("By", "byte", "amount of information", true, "8", "bit"),
    derived("Bd", "baud", "signal transmission rate", true, "1", "/s"),
    // Special units
    special("Cel", "degree Celsius", "temperature", true, "Cel", "1", "K"),
    special("[degF]", "degree Fahrenheit", "temperature", false, "degF", "5", "K/9"),
    special("[degRe]", "degree Reaumur", "temperature", false, "degRe", "5", "K/4"),
    special("[pH]", "pH", "acidity", false, "pH", "1", "mol/l"),
    special("[p'diop]", "prism diopter", "refraction of a prism", false, "tanTimes100", "1", "rad"),
    special("%[slope]", "percent of slope", "slope", false, "100tan", "1", "deg"),
    special("[hp'_X]", "homeopathic potency of decimal series", "homeopathic potency", false, "hpX", "1", "1"),
    special("[hp'_C]", "homeopathic potency of centesimal series", "homeopathic potency", false, "hpC", "1", "1"),
    special("[hp'_M]", "homeopathic potency of millesimal series", "homeopathic potency", false, "hpM", "1", "1"),
    special("[hp'_Q]", "homeopathic potency of quintamillesimal series", "homeopathic potency", false, "hpQ", "1", "1"),
    special("Np", "neper", "level", true, "ln", "1", "1"),
    special("B", "bel", "level", true, "lg", "1", "1"),
    special("B[SPL]", "bel sound pressure", "pressure level", true, "lgTimes2", "2", "10*-5.Pa"),
    special("B[V]", "bel volt", "electric potential level", true, "lgTimes2", "1", "V"),
    special("B[mV]", "bel millivolt", "electric potential level", true, "lgTimes2", "1", "mV"),
    special("B[uV]", "bel microvolt", "electric potential level", true, "lgTimes2", "1", "uV"),
    special("B[10.nV]", "bel 10 nanovolt", "electric potential level", true, "lgTimes2", "10", "nV"),
    special("B[W]", "bel watt", "power level", true, "lg", "1", "W"),
    special("B[kW]", "bel kilowatt", "power level", true, "lg", "1", "kW"),
    special("bit_s", "bit", "amount of information", false, "ld", "1", "1"),
    special("[m/s2/Hz^(1/2)]", "meter per square seconds per square root of hertz", "amplitude spectral density", false, "sqrt", "1", "m2/s4/Hz"),
    // Arbitrary
    arbitrary("[IU]", "international unit", "arbitrary"),
    arbitrary("[iU]", "international unit", "arbitrary"),
    arbitrary("[arb'U]", "arbitrary unit", "arbitrary"),
    arbitrary("[USP'U]", "United States Pharmacopeia unit", "arbitrary"),
    arbitrary("[CFU]", "colony forming units", "number"),
    arbitrary("[PFU]", "plaque forming units", "amount of an infectious agent"),
    arbitrary("[FFU]", "focus forming units", "amount of an infectious agent"),
    arbitrary("[BAU]", "bioequivalent allergen unit", "amount of an allergen callibrated through in-vivo testing based on the ID50EAL method"),
    arbitrary("[AU]", "allergen unit", "procedure defined amount of an allergen using some reference standard"),
    arbitrary("[tb'U]", "tuberculin unit", "biologic activity of tuberculin"),
];
