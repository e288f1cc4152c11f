//! Profit of a solar plant under day-ahead forecast error, before and
//! after improving the forecast.
//!
//! Energy delivered within ±5 % of the declared average power is paid for;
//! energy outside that band is charged as imbalance at the same price. With
//! normally distributed forecast error the in-band share is
//! `erf(δ / (σ√2))`.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erf;

use crate::error::{CalcError, CalcResult};
use crate::input::FormInput;
use crate::numeric::round_to;
use crate::results::ResultMap;

/// Width of the imbalance-free band as a share of average power.
const TOLERANCE_BAND: f64 = 0.05;
const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastInputs {
    /// Declared average daily power (MW).
    pub average_power: f64,
    /// Forecast error standard deviation before improvement (MW).
    pub sigma_current: f64,
    /// Forecast error standard deviation after improvement (MW).
    pub sigma_improved: f64,
    /// Energy price (per MWh).
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastReport {
    pub profit_current: f64,
    pub profit_improved: f64,
}

impl ForecastInputs {
    /// # Errors
    ///
    /// `InvalidInput` for unparsable fields, `Domain` unless the improved
    /// deviation is smaller than the current one.
    pub fn from_form(form: &FormInput) -> CalcResult<Self> {
        let inputs = Self {
            average_power: form.scalar("Pc")?,
            sigma_current: form.scalar("Q1")?,
            sigma_improved: form.scalar("Q2")?,
            price: form.scalar("B")?,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.sigma_improved >= self.sigma_current {
            return Err(CalcError::Domain("σ2 must be less than σ1".to_string()));
        }
        Ok(())
    }

    /// Daily profit at forecast error deviation `sigma`.
    pub fn daily_profit(&self, sigma: f64) -> f64 {
        let delta = TOLERANCE_BAND * self.average_power;
        let in_band = erf(delta / (sigma * SQRT_2));

        let daily_energy = self.average_power * HOURS_PER_DAY;
        let revenue = daily_energy * in_band * self.price;
        let penalty = daily_energy * (1.0 - in_band) * self.price;
        revenue - penalty
    }

    pub fn compute(&self) -> ForecastReport {
        ForecastReport {
            profit_current: self.daily_profit(self.sigma_current),
            profit_improved: self.daily_profit(self.sigma_improved),
        }
    }
}

impl ForecastReport {
    pub fn to_results(&self, inputs: &ForecastInputs) -> ResultMap {
        ResultMap::new()
            .with("res1", round_to(self.profit_current, 2))
            .with("res2", round_to(self.profit_improved, 2))
            .with("q1", inputs.sigma_current)
            .with("q2", inputs.sigma_improved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_example() -> ForecastInputs {
        ForecastInputs {
            average_power: 5.0,
            sigma_current: 1.0,
            sigma_improved: 0.25,
            price: 7.0,
        }
    }

    #[test]
    fn profit_control_example() {
        let report = control_example().compute();
        assert!((report.profit_current - (-508.35)).abs() < 0.05, "{}", report.profit_current);
        assert!((report.profit_improved - 306.92).abs() < 0.05, "{}", report.profit_improved);
    }

    #[test]
    fn better_forecast_earns_more() {
        let report = control_example().compute();
        assert!(report.profit_improved > report.profit_current);
    }

    #[test]
    fn rejects_improvement_that_is_not_smaller() {
        let form = FormInput::from_pairs([("Pc", "5"), ("Q1", "1"), ("Q2", "1"), ("B", "7")]);
        let err = ForecastInputs::from_form(&form).unwrap_err();
        assert!(matches!(err, CalcError::Domain(_)));
    }
}
