//! Cable selection for a 10 kV substation feeder and short-circuit currents
//! at the substation buses and at the end of the outgoing line.

use crate::error::{CalcError, CalcResult};
use crate::input::FormInput;
use crate::numeric::{STANDARD_CROSS_SECTIONS, round_to, snap_to_standard};
use crate::results::ResultMap;
use crate::tables::{ListTable, ReferenceTable, TableId, TableSource};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Rated voltage of the feeder (kV).
const FEEDER_KV: f64 = 10.0;
/// Average voltage of the 10 kV buses (kV).
const BUS_KV: f64 = 10.5;
/// Thermal stability constant of aluminium cable with paper insulation.
const THERMAL_CONSTANT: f64 = 92.0;
/// Supply transformer rating for the bus fault calculation (MVA).
const TRANSFORMER_MVA: f64 = 6.3;
/// Supply transformer short-circuit voltage (%).
const TRANSFORMER_UK_PERCENT: f64 = 10.5;

/// Parameters of the 110/10 kV substation supplied by the utility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstationData {
    /// System resistance and reactance, normal mode (Ω).
    pub r_normal: f64,
    pub x_normal: f64,
    /// System resistance and reactance, minimal mode (Ω).
    pub r_minimal: f64,
    pub x_minimal: f64,
    /// Transformer short-circuit voltage at the extreme tap (%).
    pub uk_max: f64,
    /// Transformer high and low side voltages (kV).
    pub u_high: f64,
    pub u_low: f64,
    /// Transformer rating (MVA).
    pub s_rated: f64,
    /// Outgoing line specific resistance and reactance (Ω/km).
    pub r0: f64,
    pub x0: f64,
    /// Lengths of the outgoing line sections (km).
    pub line_sections_km: [f64; 8],
}

impl Default for SubstationData {
    fn default() -> Self {
        Self {
            r_normal: 10.65,
            x_normal: 24.02,
            r_minimal: 34.88,
            x_minimal: 65.68,
            uk_max: 11.1,
            u_high: 115.0,
            u_low: 11.0,
            s_rated: 6.3,
            r0: 0.64,
            x0: 0.363,
            line_sections_km: [0.2, 0.35, 0.2, 0.6, 2.0, 2.55, 3.37, 3.1],
        }
    }
}

/// User inputs for the cable and bus calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableInputs {
    /// Column of the current-density table (conductor and insulation type).
    pub conductor: i64,
    /// Three-phase short-circuit current (A).
    pub fault_current: f64,
    /// Fault clearing time (s).
    pub clearing_time: f64,
    /// Design load of the two-transformer substation (kVA).
    pub design_load: f64,
    /// Annual peak-load utilisation time (h).
    pub peak_hours: f64,
    /// Short-circuit power of the supply system (MVA).
    pub system_power: f64,
}

impl Default for CableInputs {
    fn default() -> Self {
        Self {
            conductor: 0,
            fault_current: 2500.0,
            clearing_time: 2.5,
            design_load: 1300.0,
            peak_hours: 4000.0,
            system_power: 200.0,
        }
    }
}

/// Three- and two-phase fault currents at one point (A).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultCurrents {
    pub three_phase: f64,
    pub two_phase: f64,
}

impl FaultCurrents {
    fn at(voltage_kv: f64, resistance: f64, reactance: f64) -> Self {
        let impedance = resistance.hypot(reactance);
        let three_phase = voltage_kv * 1000.0 / (SQRT_3 * impedance);
        Self {
            three_phase,
            two_phase: three_phase * SQRT_3 / 2.0,
        }
    }
}

/// Fault currents in normal and minimal system modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeCurrents {
    pub normal: FaultCurrents,
    pub minimal: FaultCurrents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CableReport {
    /// Normal-mode design current (A).
    pub design_current: f64,
    /// Post-emergency design current (A).
    pub emergency_current: f64,
    /// Economic cross-section (mm²).
    pub economic_section: f64,
    /// Standard section closest to the thermal minimum (mm²).
    pub standard_section: f64,
    /// Initial three-phase fault current on the 10 kV buses (kA).
    pub bus_fault_ka: f64,
    /// Faults at the substation buses referred to the high side.
    pub high_side: ModeCurrents,
    /// Faults at the substation 10 kV buses.
    pub low_side: ModeCurrents,
    /// Faults at the end of the outgoing line.
    pub line_end: ModeCurrents,
}

impl CableInputs {
    pub fn from_form(form: &FormInput) -> CalcResult<Self> {
        Ok(Self {
            conductor: form.integer("cabel")?,
            fault_current: form.scalar("Ik")?,
            clearing_time: form.scalar("tf")?,
            design_load: form.scalar("Sm")?,
            peak_hours: form.scalar("Tm")?,
            system_power: form.scalar("Sk")?,
        })
    }

    /// Field values to pre-fill the form with.
    pub fn to_defaults(&self) -> ResultMap {
        ResultMap::new()
            .with("Ik", self.fault_current)
            .with("tf", self.clearing_time)
            .with("Sm", self.design_load)
            .with("Tm", self.peak_hours)
            .with("Sk", self.system_power)
    }

    /// Runs the calculation, reading current densities from `source`.
    ///
    /// # Errors
    ///
    /// Table errors propagate; `LookupFailed` if the utilisation time or
    /// conductor is not tabulated.
    pub fn compute(&self, source: &dyn TableSource) -> CalcResult<CableReport> {
        let densities = ReferenceTable::load_lists(source, TableId::CableCurrentDensity)?;
        let density = economic_current_density(&densities, self.conductor, self.peak_hours)?;
        self.compute_with_density(density, &SubstationData::default())
    }

    /// Runs the calculation with a known economic current density (A/mm²).
    pub fn compute_with_density(
        &self,
        density: f64,
        substation: &SubstationData,
    ) -> CalcResult<CableReport> {
        let design_current = (self.design_load / 2.0) / (SQRT_3 * FEEDER_KV);
        let emergency_current = 2.0 * design_current;
        let economic_section = design_current / density;

        let thermal_section = self.fault_current * self.clearing_time.sqrt() / THERMAL_CONSTANT;
        let standard_section = snap_to_standard(thermal_section, &STANDARD_CROSS_SECTIONS)?;

        let x_system = BUS_KV.powi(2) / self.system_power;
        let x_transformer = (TRANSFORMER_UK_PERCENT / 100.0) * (BUS_KV.powi(2) / TRANSFORMER_MVA);
        let bus_fault_ka = BUS_KV / (SQRT_3 * (x_system + x_transformer));

        Ok(CableReport {
            design_current,
            emergency_current,
            economic_section,
            standard_section,
            bus_fault_ka,
            ..substation_faults(substation)
        })
    }
}

/// Substation and line fault currents; cable fields are left at zero.
fn substation_faults(s: &SubstationData) -> CableReport {
    let x_transformer = s.uk_max * s.u_high.powi(2) / (100.0 * s.s_rated);

    let (r_n, x_n) = (s.r_normal, s.x_normal + x_transformer);
    let (r_m, x_m) = (s.r_minimal, s.x_minimal + x_transformer);
    let high_side = ModeCurrents {
        normal: FaultCurrents::at(s.u_high, r_n, x_n),
        minimal: FaultCurrents::at(s.u_high, r_m, x_m),
    };

    let reduction = s.u_low.powi(2) / s.u_high.powi(2);
    let (r_n, x_n) = (r_n * reduction, x_n * reduction);
    let (r_m, x_m) = (r_m * reduction, x_m * reduction);
    let low_side = ModeCurrents {
        normal: FaultCurrents::at(s.u_low, r_n, x_n),
        minimal: FaultCurrents::at(s.u_low, r_m, x_m),
    };

    let length: f64 = s.line_sections_km.iter().sum();
    let (r_line, x_line) = (length * s.r0, length * s.x0);
    let line_end = ModeCurrents {
        normal: FaultCurrents::at(s.u_low, r_line + r_n, x_line + x_n),
        minimal: FaultCurrents::at(s.u_low, r_line + r_m, x_line + x_m),
    };

    CableReport {
        design_current: 0.0,
        emergency_current: 0.0,
        economic_section: 0.0,
        standard_section: 0.0,
        bus_fault_ka: 0.0,
        high_side,
        low_side,
        line_end,
    }
}

/// Economic current density for `conductor` at `peak_hours` of utilisation.
///
/// # Errors
///
/// `LookupFailed` below 1000 h or for a conductor the table lacks.
pub fn economic_current_density(
    table: &ListTable,
    conductor: i64,
    peak_hours: f64,
) -> CalcResult<f64> {
    let band = if (1000.0..=3000.0).contains(&peak_hours) {
        "1000-3000"
    } else if peak_hours > 3000.0 && peak_hours <= 5000.0 {
        "3000-5000"
    } else if peak_hours > 5000.0 {
        "5000+"
    } else {
        return Err(CalcError::LookupFailed("Tm out of range".to_string()));
    };

    usize::try_from(conductor)
        .ok()
        .and_then(|index| table.get(band)?.get(index).copied())
        .ok_or_else(|| CalcError::LookupFailed(format!("data not found for index {conductor}")))
}

impl CableReport {
    pub fn to_results(&self) -> ResultMap {
        let modes = [
            ("Ish", &self.high_side),
            ("Ishn", &self.low_side),
            ("Iln", &self.line_end),
        ];
        let mut results = ResultMap::new()
            .with("sek", round_to(self.economic_section, 2))
            .with("s", self.standard_section)
            .with("Im", round_to(self.design_current, 2))
            .with("Im_pa", round_to(self.emergency_current, 2))
            .with("Ip0", round_to(self.bus_fault_ka, 2));
        for (prefix, mode) in modes {
            results = results
                .with(&format!("{prefix}_3"), round_to(mode.normal.three_phase, 2))
                .with(&format!("{prefix}_2"), round_to(mode.normal.two_phase, 2))
                .with(&format!("{prefix}_min_3"), round_to(mode.minimal.three_phase, 2))
                .with(&format!("{prefix}_min_2"), round_to(mode.minimal.two_phase, 2));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn densities() -> ListTable {
        ListTable::from([
            ("1000-3000".to_string(), vec![2.5, 1.3, 3.0, 1.6]),
            ("3000-5000".to_string(), vec![2.1, 1.1, 2.5, 1.4]),
            ("5000+".to_string(), vec![1.8, 1.0, 2.0, 1.2]),
        ])
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn density_bands_follow_utilisation_time() {
        let t = densities();
        assert_eq!(economic_current_density(&t, 3, 1000.0), Ok(1.6));
        assert_eq!(economic_current_density(&t, 3, 3000.0), Ok(1.6));
        assert_eq!(economic_current_density(&t, 3, 4000.0), Ok(1.4));
        assert_eq!(economic_current_density(&t, 3, 5000.0), Ok(1.4));
        assert_eq!(economic_current_density(&t, 3, 6000.0), Ok(1.2));
    }

    #[test]
    fn density_lookup_failures() {
        let t = densities();
        assert!(matches!(
            economic_current_density(&t, 0, 999.0),
            Err(CalcError::LookupFailed(_))
        ));
        assert!(matches!(
            economic_current_density(&t, 9, 4000.0),
            Err(CalcError::LookupFailed(_))
        ));
        assert!(matches!(
            economic_current_density(&t, -1, 4000.0),
            Err(CalcError::LookupFailed(_))
        ));
    }

    #[test]
    fn cable_control_example() {
        let inputs = CableInputs {
            conductor: 3,
            ..CableInputs::default()
        };
        let report = inputs
            .compute_with_density(1.4, &SubstationData::default())
            .unwrap();
        assert!(close(report.design_current, 37.53, 0.005));
        assert!(close(report.emergency_current, 75.06, 0.01));
        assert!(close(report.economic_section, 26.81, 0.005));
        // thermal minimum ≈ 42.96 mm², nearest standard is 50
        assert_eq!(report.standard_section, 50.0);
        assert!(close(report.bus_fault_ka, 2.54, 0.005));
    }

    #[test]
    fn substation_fault_currents() {
        let report = CableInputs::default()
            .compute_with_density(1.4, &SubstationData::default())
            .unwrap();
        assert!(close(report.high_side.normal.three_phase, 258.09, 0.1));
        assert!(report.high_side.minimal.three_phase < report.high_side.normal.three_phase);
        assert!(report.line_end.normal.three_phase < report.low_side.normal.three_phase);
        let ratio = report.low_side.normal.two_phase / report.low_side.normal.three_phase;
        assert!(close(ratio, SQRT_3 / 2.0, 1e-12));
    }

    #[test]
    fn results_cover_every_fault_point() {
        let results = CableInputs::default()
            .compute_with_density(1.4, &SubstationData::default())
            .unwrap()
            .to_results();
        for label in ["Ish_3", "Ish_min_2", "Ishn_3", "Ishn_min_3", "Iln_2", "Iln_min_2"] {
            assert!(results.get(label).is_some(), "missing {label}");
        }
        assert_eq!(results.len(), 17);
    }
}
