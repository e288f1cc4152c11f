//! Solid particulate emissions from burning coal, fuel oil and natural gas.

use crate::error::CalcResult;
use crate::input::FormInput;
use crate::numeric::round_to;
use crate::results::ResultMap;

/// Share of ash carried away with flue gas.
const FLY_ASH_SHARE_COAL: f64 = 0.8;
const FLY_ASH_SHARE_OIL: f64 = 1.0;
/// Ash content of fuel oil working mass (%).
const OIL_ASH_PERCENT: f64 = 0.15;

/// Fuel burned and fuel/plant properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionInputs {
    /// Coal burned (t).
    pub coal_t: f64,
    /// Fuel oil burned (t).
    pub oil_t: f64,
    /// Coal working-mass ash content (%).
    pub coal_ash: f64,
    /// Coal lower heating value (MJ/kg).
    pub coal_q: f64,
    /// Fuel oil combustible-mass lower heating value (MJ/kg).
    pub oil_q_combustible: f64,
    /// Fuel oil moisture (%).
    pub oil_moisture: f64,
    /// Combustible matter in fly ash (%).
    pub fly_ash_combustibles: f64,
    /// Ash collector efficiency (0..1).
    pub capture_efficiency: f64,
}

/// Emission factor (g/GJ) and gross emission (t) for one fuel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuelEmission {
    pub factor: f64,
    pub gross: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmissionReport {
    pub coal: FuelEmission,
    pub oil: FuelEmission,
    pub gas: FuelEmission,
}

impl EmissionInputs {
    pub fn from_form(form: &FormInput) -> CalcResult<Self> {
        Ok(Self {
            coal_t: form.scalar("coal")?,
            oil_t: form.scalar("oil")?,
            coal_ash: form.scalar("Ap")?,
            coal_q: form.scalar("Qpi")?,
            oil_q_combustible: form.scalar("Qgi_oil")?,
            oil_moisture: form.scalar("Wp_oil")?,
            fly_ash_combustibles: form.scalar("Gvun")?,
            capture_efficiency: form.scalar("nzu")?,
        })
    }

    pub fn compute(&self) -> EmissionReport {
        let uncaptured = 1.0 - self.capture_efficiency;

        let coal_factor = 1e6 / self.coal_q * FLY_ASH_SHARE_COAL * self.coal_ash
            / (100.0 - self.fly_ash_combustibles)
            * uncaptured;
        let coal = FuelEmission {
            factor: coal_factor,
            gross: 1e-6 * coal_factor * self.coal_q * self.coal_t,
        };

        let oil_q = self.oil_q_combustible * (100.0 - self.oil_moisture - OIL_ASH_PERCENT) / 100.0
            - 0.025 * self.oil_moisture;
        let oil_factor = 1e6 / oil_q * FLY_ASH_SHARE_OIL * OIL_ASH_PERCENT / 100.0 * uncaptured;
        let oil = FuelEmission {
            factor: oil_factor,
            gross: 1e-6 * oil_factor * oil_q * self.oil_t,
        };

        // Natural gas carries no ash.
        EmissionReport {
            coal,
            oil,
            gas: FuelEmission::default(),
        }
    }
}

impl EmissionReport {
    pub fn to_results(&self) -> ResultMap {
        ResultMap::new()
            .with("ktv_coal", round_to(self.coal.factor, 2))
            .with("Etv_coal", round_to(self.coal.gross, 2))
            .with("ktv_oil", round_to(self.oil.factor, 2))
            .with("Etv_oil", round_to(self.oil.gross, 2))
            .with("ktv_gas", self.gas.factor)
            .with("Etv_gas", self.gas.gross)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_example() -> EmissionInputs {
        EmissionInputs {
            coal_t: 1_096_363.0,
            oil_t: 70_945.0,
            coal_ash: 25.2,
            coal_q: 20.47,
            oil_q_combustible: 40.4,
            oil_moisture: 2.0,
            fly_ash_combustibles: 1.5,
            capture_efficiency: 0.985,
        }
    }

    #[test]
    fn coal_emission_control_example() {
        let report = control_example().compute();
        assert!((report.coal.factor - 150.0).abs() < 0.1, "{}", report.coal.factor);
        assert!((report.coal.gross - 3366.0).abs() < 1.0, "{}", report.coal.gross);
    }

    #[test]
    fn oil_emission_control_example() {
        let report = control_example().compute();
        assert!((report.oil.factor - 0.57).abs() < 0.005, "{}", report.oil.factor);
        assert!((report.oil.gross - 1.6).abs() < 0.01, "{}", report.oil.gross);
    }

    #[test]
    fn gas_has_no_particulates() {
        let results = control_example().compute().to_results();
        assert_eq!(results.number("ktv_gas"), Some(0.0));
        assert_eq!(results.number("Etv_gas"), Some(0.0));
    }
}
