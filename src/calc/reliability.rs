//! Reliability of single- and double-circuit supply, and expected damages
//! from supply interruptions.

use tracing::debug;

use crate::error::CalcResult;
use crate::input::FormInput;
use crate::numeric::round_to;
use crate::results::ResultMap;
use crate::tables::{ListTable, ReferenceTable, TableId, TableSource};

const HOURS_PER_YEAR: f64 = 8760.0;
/// Planned outage coefficient margin.
const PLANNED_OUTAGE_MARGIN: f64 = 1.2;
/// Failure frequency of the sectional breaker (1/year).
const SECTIONAL_BREAKER_FAILURES: f64 = 0.02;

/// Load parameters of the supplied transformer used for damage estimation.
const FAILURE_RATE: f64 = 0.01;
const RESTORATION_YEARS: f64 = 0.045;
const PEAK_LOAD_KW: f64 = 5120.0;
const PEAK_HOURS: f64 = 6451.0;
const PLANNED_OUTAGE_SHARE: f64 = 0.004;

/// One line of the supply scheme: an element type and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeElement {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReliabilityInputs {
    pub elements: Vec<SchemeElement>,
    /// Unit damage from emergency interruption (per kWh).
    pub damage_emergency: f64,
    /// Unit damage from planned interruption (per kWh).
    pub damage_planned: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliabilityReport {
    /// Failure frequency of the single-circuit system (1/year).
    pub single_failures: f64,
    /// Mean restoration time of the single-circuit system (h).
    pub single_restoration: f64,
    /// Failure frequency of the double-circuit system with sectional breaker.
    pub double_failures: f64,
    /// How many times the double-circuit system is more reliable.
    pub ratio: f64,
    /// Expected damages from interruptions.
    pub damages: f64,
}

impl ReliabilityInputs {
    /// Pairs `element[]` with `quantity[]` up to the shorter array; entries
    /// whose quantity is not a whole number are dropped. Signed quantities
    /// are taken as given.
    pub fn from_form(form: &FormInput) -> CalcResult<Self> {
        let damage_emergency = form.scalar("Zpera")?;
        let damage_planned = form.scalar("Zperp")?;

        let elements = form
            .texts("element[]")
            .into_iter()
            .zip(form.texts("quantity[]"))
            .filter_map(|(name, quantity)| {
                let quantity = quantity.trim().parse().ok()?;
                Some(SchemeElement {
                    name: name.to_string(),
                    quantity,
                })
            })
            .collect();

        Ok(Self {
            elements,
            damage_emergency,
            damage_planned,
        })
    }

    pub fn compute(&self, source: &dyn TableSource) -> CalcResult<ReliabilityReport> {
        let elements = ReferenceTable::load_lists(source, TableId::ReliabilityElements)?;
        Ok(self.compute_with(&elements))
    }

    /// Elements missing from `elements`, or with fewer than three
    /// properties (ω, restoration time, planned outage time), are ignored.
    pub fn compute_with(&self, elements: &ListTable) -> ReliabilityReport {
        let mut failures = 0.0;
        let mut weighted_restoration = 0.0;
        let mut max_planned: f64 = 0.0;

        for element in &self.elements {
            let Some(&[omega, restoration, planned, ..]) =
                elements.get(&element.name).map(Vec::as_slice)
            else {
                debug!(element = %element.name, "skipping unknown element");
                continue;
            };
            let quantity = element.quantity as f64;
            failures += quantity * omega;
            weighted_restoration += quantity * omega * restoration;
            max_planned = max_planned.max(planned);
        }

        let single_restoration = if failures > 0.0 {
            weighted_restoration / failures
        } else {
            0.0
        };
        let emergency_idle = failures * single_restoration / HOURS_PER_YEAR;
        let planned_idle = PLANNED_OUTAGE_MARGIN * max_planned / HOURS_PER_YEAR;
        let both_circuits = 2.0 * failures * (emergency_idle + planned_idle);
        let double_failures = both_circuits + SECTIONAL_BREAKER_FAILURES;
        let ratio = if double_failures > 0.0 {
            failures / double_failures
        } else {
            0.0
        };

        let emergency_shortfall = FAILURE_RATE * RESTORATION_YEARS * PEAK_LOAD_KW * PEAK_HOURS;
        let planned_shortfall = PLANNED_OUTAGE_SHARE * PEAK_LOAD_KW * PEAK_HOURS;
        let damages =
            self.damage_emergency * emergency_shortfall + self.damage_planned * planned_shortfall;

        ReliabilityReport {
            single_failures: failures,
            single_restoration,
            double_failures,
            ratio,
            damages,
        }
    }
}

impl ReliabilityReport {
    pub fn to_results(&self) -> ResultMap {
        ResultMap::new()
            .with("woc", round_to(self.single_failures, 4))
            .with("wdc", round_to(self.double_failures, 4))
            .with("koef", self.ratio)
            .with("M", round_to(self.damages, 0))
    }
}

/// Names of the elements available for the scheme, sorted.
pub fn element_names(source: &dyn TableSource) -> CalcResult<Vec<String>> {
    Ok(ReferenceTable::load_lists(source, TableId::ReliabilityElements)?
        .into_keys()
        .collect())
}
