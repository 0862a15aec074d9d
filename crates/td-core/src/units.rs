// td-core/src/units.rs

use uom::si::f64::{
    MolarMass as UomMolarMass, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type MolarMass = UomMolarMass;
pub type Temperature = UomThermodynamicTemperature;

/// Molar heat capacity / molar entropy [J/(mol·K)].
pub type MolarHeatCapacity = f64;

/// Molar enthalpy [J/mol].
pub type MolarEnthalpy = f64;

/// Specific heat capacity / specific entropy [J/(kg·K)].
pub type SpecHeatCapacity = f64;

/// Specific enthalpy [J/kg].
pub type SpecEnthalpy = f64;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

/// Temperature value in kelvin.
#[inline]
pub fn kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Molar mass from a relative molecular weight (g/mol, i.e. kg/kmol).
#[inline]
pub fn g_per_mol(v: f64) -> MolarMass {
    use uom::si::molar_mass::gram_per_mole;
    MolarMass::new::<gram_per_mole>(v)
}

/// Molar mass value in kg/mol.
#[inline]
pub fn kg_per_mol(m: MolarMass) -> f64 {
    use uom::si::molar_mass::kilogram_per_mole;
    m.get::<kilogram_per_mole>()
}

pub mod constants {
    /// Molar gas constant used by the NASA Glenn coefficients [J/(mol·K)].
    ///
    /// Gordon & McBride fit the polynomials with this value rather than the
    /// CODATA one; using anything else shifts every derived property.
    pub const R_MOLAR: f64 = 8.314_510;

    /// Reference temperature for standard-state data [K].
    pub const T_REF_K: f64 = 298.15;
}
