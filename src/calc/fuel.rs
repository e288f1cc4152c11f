//! Fuel composition recalculation between working, dry and combustible
//! mass, and lower heating values.

use crate::error::CalcResult;
use crate::input::FormInput;
use crate::numeric::round_to;
use crate::results::ResultMap;

/// Working-mass composition of a solid fuel (percent by mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidFuel {
    pub hydrogen: f64,
    pub carbon: f64,
    pub sulphur: f64,
    pub nitrogen: f64,
    pub oxygen: f64,
    pub moisture: f64,
    pub ash: f64,
}

/// Mass conversions and heating values of a solid fuel.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidFuelReport {
    /// Working to dry mass factor.
    pub to_dry: f64,
    /// Working to combustible mass factor.
    pub to_combustible: f64,
    /// Lower heating value of working mass (MJ/kg).
    pub q_working: f64,
    /// Lower heating value of dry mass (MJ/kg).
    pub q_dry: f64,
    /// Lower heating value of combustible mass (MJ/kg).
    pub q_combustible: f64,
    /// Dry mass composition H, C, S, N, O, A.
    pub dry: [f64; 6],
    /// Combustible mass composition H, C, S, N, O.
    pub combustible: [f64; 5],
}

impl SolidFuel {
    pub fn from_form(form: &FormInput) -> CalcResult<Self> {
        Ok(Self {
            hydrogen: form.scalar("Hp")?,
            carbon: form.scalar("Cp")?,
            sulphur: form.scalar("Sp")?,
            nitrogen: form.scalar("Np")?,
            oxygen: form.scalar("Op")?,
            moisture: form.scalar("Wp")?,
            ash: form.scalar("Ap")?,
        })
    }

    pub fn compute(&self) -> SolidFuelReport {
        let to_dry = 100.0 / (100.0 - self.moisture);
        let to_combustible = 100.0 / (100.0 - self.moisture - self.ash);

        // Mendeleev's formula, kJ/kg -> MJ/kg
        let q_working = (339.0 * self.carbon + 1030.0 * self.hydrogen
            - 108.8 * (self.oxygen - self.sulphur)
            - 25.0 * self.moisture)
            / 1000.0;
        let q_dry = (q_working + 0.025 * self.moisture) * 100.0 / (100.0 - self.moisture);
        let q_combustible =
            (q_working + 0.025 * self.moisture) * 100.0 / (100.0 - self.moisture - self.ash);

        SolidFuelReport {
            to_dry,
            to_combustible,
            q_working,
            q_dry,
            q_combustible,
            dry: [
                self.hydrogen * to_dry,
                self.carbon * to_dry,
                self.sulphur * to_dry,
                self.nitrogen * to_dry,
                self.oxygen * to_dry,
                self.ash * to_dry,
            ],
            combustible: [
                self.hydrogen * to_combustible,
                self.carbon * to_combustible,
                self.sulphur * to_combustible,
                self.nitrogen * to_combustible,
                self.oxygen * to_combustible,
            ],
        }
    }
}

impl SolidFuelReport {
    pub fn to_results(&self) -> ResultMap {
        let [hc, cc, sc, nc, oc, ac] = self.dry;
        let [hg, cg, sg, ng, og] = self.combustible;
        ResultMap::new()
            .with("Kpc", round_to(self.to_dry, 2))
            .with("Kpg", round_to(self.to_combustible, 2))
            .with("Qph", round_to(self.q_working, 4))
            .with("Qch", round_to(self.q_dry, 4))
            .with("Qgh", round_to(self.q_combustible, 4))
            .with("Hc", round_to(hc, 2))
            .with("Cc", round_to(cc, 2))
            .with("Sc", round_to(sc, 2))
            .with("Nc", round_to(nc, 2))
            .with("Oc", round_to(oc, 2))
            .with("Ac", round_to(ac, 2))
            .with("Hg", round_to(hg, 2))
            .with("Cg", round_to(cg, 2))
            .with("Sg", round_to(sg, 2))
            .with("Ng", round_to(ng, 2))
            .with("Og", round_to(og, 2))
    }
}

/// Combustible-mass composition of fuel oil plus its moisture, ash and
/// heating value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelOil {
    pub hydrogen: f64,
    pub carbon: f64,
    pub sulphur: f64,
    /// Vanadium content (mg/kg).
    pub vanadium: f64,
    pub oxygen: f64,
    pub moisture: f64,
    pub ash: f64,
    /// Lower heating value of combustible mass (MJ/kg).
    pub q_combustible: f64,
}

/// Working-mass composition of fuel oil.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelOilReport {
    pub hydrogen: f64,
    pub carbon: f64,
    pub sulphur: f64,
    pub oxygen: f64,
    pub ash: f64,
    pub vanadium: f64,
    /// Lower heating value of working mass (MJ/kg).
    pub q_working: f64,
}

impl FuelOil {
    pub fn from_form(form: &FormInput) -> CalcResult<Self> {
        Ok(Self {
            hydrogen: form.scalar("Hg")?,
            carbon: form.scalar("Cg")?,
            sulphur: form.scalar("Sg")?,
            vanadium: form.scalar("Vg")?,
            oxygen: form.scalar("Og")?,
            moisture: form.scalar("Wg")?,
            ash: form.scalar("Ag")?,
            q_combustible: form.scalar("Qi")?,
        })
    }

    pub fn compute(&self) -> FuelOilReport {
        let working_share = (100.0 - self.moisture - self.ash) / 100.0;
        FuelOilReport {
            hydrogen: self.hydrogen * working_share,
            carbon: self.carbon * working_share,
            sulphur: self.sulphur * working_share,
            oxygen: self.oxygen * working_share,
            ash: self.ash * (100.0 - self.moisture) / 100.0,
            vanadium: self.vanadium * (100.0 - self.moisture) / 100.0,
            q_working: self.q_combustible * working_share - 0.025 * self.moisture,
        }
    }
}

impl FuelOilReport {
    pub fn to_results(&self) -> ResultMap {
        ResultMap::new()
            .with("Hp", round_to(self.hydrogen, 2))
            .with("Cp", round_to(self.carbon, 2))
            .with("Sp", round_to(self.sulphur, 2))
            .with("Op", round_to(self.oxygen, 2))
            .with("Ap", round_to(self.ash, 2))
            .with("Vp", round_to(self.vanadium, 2))
            .with("Qri", round_to(self.q_working, 4))
    }
}
