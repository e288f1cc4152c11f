//! Design electrical loads of a workshop: one distribution cabinet, the
//! large consumers fed directly from the buses, and the shop as a whole.
//!
//! Loads are estimated by the demand-coefficient method. Each group yields
//! a use coefficient and an effective consumer count, which select the
//! design coefficient `Kp` from a reference table.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CalcError, CalcResult};
use crate::input::FormInput;
use crate::numeric::round_to;
use crate::results::ResultMap;
use crate::tables::reference::load_json;
use crate::tables::{
    CoefficientQuery, CoefficientResolver, RangeKeyTable, SingleKeyTable, TableId, TableSource,
};

const SQRT_3: f64 = 1.732_050_807_568_877_2;
/// Bus voltage assumed when a group lists no consumers (kV).
const DEFAULT_VOLTAGE_KV: f64 = 0.38;

/// One line of the consumer table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consumer {
    /// Efficiency η.
    pub efficiency: f64,
    /// Power factor cos φ.
    pub power_factor: f64,
    /// Supply voltage (kV).
    pub voltage: f64,
    pub quantity: f64,
    /// Rated power of one unit (kW).
    pub rated_power: f64,
    /// Use coefficient Kv.
    pub use_factor: f64,
    /// Reactive power factor tg φ.
    pub reactive_factor: f64,
}

/// Per-line quantities derived from a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsumerLine {
    /// n·Pн (kW).
    pub rated: f64,
    /// Design current of the line (A).
    pub current: f64,
    /// n·Pн·Kv (kW).
    pub used: f64,
    /// n·Pн·Kv·tg φ (kvar).
    pub reactive: f64,
    /// n·Pн² (kW²).
    pub square: f64,
}

impl Consumer {
    pub fn line(&self) -> ConsumerLine {
        let rated = self.quantity * self.rated_power;
        let used = rated * self.use_factor;
        ConsumerLine {
            rated,
            current: rated / (SQRT_3 * self.voltage * self.power_factor * self.efficiency),
            used,
            reactive: used * self.reactive_factor,
            square: self.quantity * self.rated_power.powi(2),
        }
    }
}

/// Group totals feeding the demand-coefficient method.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupSums {
    pub count: f64,
    pub rated: f64,
    pub used: f64,
    pub reactive: f64,
    pub square: f64,
}

/// How the effective count is brought to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountRounding {
    /// Round up; used for distribution cabinets.
    Up,
    /// Round to nearest; used for whole-shop totals.
    Nearest,
}

impl GroupSums {
    pub fn from_consumers(consumers: &[Consumer]) -> Self {
        consumers.iter().fold(Self::default(), |sums, consumer| {
            let line = consumer.line();
            Self {
                count: sums.count + consumer.quantity,
                rated: sums.rated + line.rated,
                used: sums.used + line.used,
                reactive: sums.reactive + line.reactive,
                square: sums.square + line.square,
            }
        })
    }

    /// Σ n·Pн·Kv / Σ n·Pн, zero for an empty group.
    pub fn use_coefficient(&self) -> f64 {
        if self.rated > 0.0 {
            self.used / self.rated
        } else {
            0.0
        }
    }

    /// (Σ n·Pн)² / Σ n·Pн², zero for an empty group.
    pub fn effective_count(&self, rounding: CountRounding) -> u32 {
        if self.square <= 0.0 {
            return 0;
        }
        let raw = self.rated.powi(2) / self.square;
        let rounded = match rounding {
            CountRounding::Up => raw.ceil(),
            CountRounding::Nearest => raw.round(),
        };
        // saturating float-to-int cast
        rounded as u32
    }
}

/// Design loads of a group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DesignLoad {
    /// Demand coefficient Kp.
    pub coefficient: f64,
    /// Active load (kW).
    pub active: f64,
    /// Reactive load (kvar).
    pub reactive: f64,
    /// Apparent load (kVA).
    pub apparent: f64,
    /// Group current (A).
    pub current: f64,
}

impl DesignLoad {
    pub fn new(coefficient: f64, sums: &GroupSums, voltage: f64) -> Self {
        let active = coefficient * sums.used;
        let reactive = coefficient * sums.reactive;
        Self {
            coefficient,
            active,
            reactive,
            apparent: active.hypot(reactive),
            current: active / voltage,
        }
    }
}

/// Use coefficient, effective count and design loads of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEstimate {
    pub sums: GroupSums,
    pub use_coefficient: f64,
    pub effective_count: u32,
    pub load: DesignLoad,
    /// Why `Kp` fell back to zero, if it did.
    pub coefficient_error: Option<String>,
}

impl GroupEstimate {
    /// Resolves `Kp` for the group. A count the table does not cover yields
    /// a zero coefficient and keeps the lookup message; data errors
    /// propagate.
    pub fn resolve(
        sums: GroupSums,
        rounding: CountRounding,
        resolver: &dyn CoefficientResolver,
        voltage: f64,
    ) -> CalcResult<Self> {
        let use_coefficient = sums.use_coefficient();
        let effective_count = sums.effective_count(rounding);
        let query = CoefficientQuery::new(effective_count, use_coefficient);
        let (coefficient, coefficient_error) = match resolver.resolve(&query) {
            Ok(kp) => (kp, None),
            Err(err @ (CalcError::LookupFailed(_) | CalcError::RangeNotFound { .. })) => {
                warn!(
                    ne = effective_count,
                    kv = use_coefficient,
                    error = %err,
                    "using zero demand coefficient"
                );
                (0.0, Some(err.to_string()))
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            sums,
            use_coefficient,
            effective_count,
            load: DesignLoad::new(coefficient, &sums, voltage),
            coefficient_error,
        })
    }
}

/// Column-wise consumer table as submitted by the form (and as stored in
/// the defaults file).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupColumns {
    pub naming: Vec<String>,
    #[serde(rename = "nu[]")]
    pub efficiency: Vec<f64>,
    #[serde(rename = "cos[]")]
    pub power_factor: Vec<f64>,
    #[serde(rename = "Uh[]")]
    pub voltage: Vec<f64>,
    #[serde(rename = "n[]")]
    pub quantity: Vec<f64>,
    #[serde(rename = "Ph[]")]
    pub rated_power: Vec<f64>,
    #[serde(rename = "KB[]")]
    pub use_factor: Vec<f64>,
    #[serde(rename = "tg[]")]
    pub reactive_factor: Vec<f64>,
}

impl GroupColumns {
    /// Reads `nu{suffix}[]`, `cos{suffix}[]` and so on.
    pub fn from_form(form: &FormInput, suffix: &str) -> Self {
        let column = |name: &str| form.list(&format!("{name}{suffix}[]"));
        Self {
            naming: Vec::new(),
            efficiency: column("nu"),
            power_factor: column("cos"),
            voltage: column("Uh"),
            quantity: column("n"),
            rated_power: column("Ph"),
            use_factor: column("KB"),
            reactive_factor: column("tg"),
        }
    }

    /// Consumers up to the shortest column. With `pad_reactive`, a short
    /// `tg` column does not truncate and missing entries read as zero.
    pub fn consumers(&self, pad_reactive: bool) -> Vec<Consumer> {
        let mut len = [
            self.efficiency.len(),
            self.power_factor.len(),
            self.voltage.len(),
            self.quantity.len(),
            self.rated_power.len(),
            self.use_factor.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0);
        if !pad_reactive {
            len = len.min(self.reactive_factor.len());
        }

        (0..len)
            .map(|i| Consumer {
                efficiency: self.efficiency[i],
                power_factor: self.power_factor[i],
                voltage: self.voltage[i],
                quantity: self.quantity[i],
                rated_power: self.rated_power[i],
                use_factor: self.use_factor[i],
                reactive_factor: self.reactive_factor.get(i).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

/// Whole-shop totals entered directly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopColumns {
    pub n: f64,
    #[serde(rename = "nPh")]
    pub rated: f64,
    #[serde(rename = "nPhKB")]
    pub used: f64,
    #[serde(rename = "nPhKBtg")]
    pub reactive: f64,
    #[serde(rename = "nPh_square")]
    pub square: f64,
}

impl ShopColumns {
    /// Unparsable totals read as zero.
    pub fn from_form(form: &FormInput) -> Self {
        Self {
            n: form.scalar_or_zero("n"),
            rated: form.scalar_or_zero("nPh"),
            used: form.scalar_or_zero("nPhKB"),
            reactive: form.scalar_or_zero("nPhKBtg"),
            square: form.scalar_or_zero("nPh_square"),
        }
    }

    pub fn sums(&self) -> GroupSums {
        GroupSums {
            count: self.n,
            rated: self.rated,
            used: self.used,
            reactive: self.reactive,
            square: self.square,
        }
    }
}

/// Values the load form is pre-filled with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadDefaults {
    pub normal: GroupColumns,
    pub big: GroupColumns,
    pub all: ShopColumns,
}

impl LoadDefaults {
    pub fn load(source: &dyn TableSource) -> CalcResult<Self> {
        load_json(source, TableId::LoadDefaults)
    }
}

/// One submission of the load form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadInputs {
    pub cabinet: GroupColumns,
    pub large: GroupColumns,
    pub shop: ShopColumns,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub cabinet_lines: Vec<ConsumerLine>,
    pub cabinet: GroupEstimate,
    pub large_lines: Vec<ConsumerLine>,
    pub shop: GroupEstimate,
}

impl LoadInputs {
    pub fn from_form(form: &FormInput) -> Self {
        Self {
            cabinet: GroupColumns::from_form(form, ""),
            large: GroupColumns::from_form(form, "_big"),
            shop: ShopColumns::from_form(form),
        }
    }

    /// Starts from the stored control example.
    pub fn from_defaults(defaults: &LoadDefaults) -> Self {
        Self {
            cabinet: defaults.normal.clone(),
            large: defaults.big.clone(),
            shop: defaults.all,
        }
    }

    /// The submitted values as new form defaults, keeping the stored
    /// consumer names.
    pub fn echo(&self, defaults: &LoadDefaults) -> LoadDefaults {
        LoadDefaults {
            normal: GroupColumns {
                naming: defaults.normal.naming.clone(),
                ..self.cabinet.clone()
            },
            big: GroupColumns {
                naming: defaults.big.naming.clone(),
                ..self.large.clone()
            },
            all: self.shop,
        }
    }

    pub fn compute(&self, source: &dyn TableSource) -> CalcResult<LoadReport> {
        let cabinet_table = SingleKeyTable::load(source, TableId::DemandCoefficientsCabinet)?;
        let shop_table = RangeKeyTable::load(source, TableId::DemandCoefficientsShop)?;
        self.compute_with(&cabinet_table, &shop_table)
    }

    pub fn compute_with(
        &self,
        cabinet_table: &dyn CoefficientResolver,
        shop_table: &dyn CoefficientResolver,
    ) -> CalcResult<LoadReport> {
        let cabinet = self.cabinet.consumers(false);
        let large = self.large.consumers(true);

        let cabinet_estimate = GroupEstimate::resolve(
            GroupSums::from_consumers(&cabinet),
            CountRounding::Up,
            cabinet_table,
            mean_voltage(&self.cabinet.voltage),
        )?;
        let shop_estimate = GroupEstimate::resolve(
            self.shop.sums(),
            CountRounding::Nearest,
            shop_table,
            mean_voltage(&self.large.voltage),
        )?;

        Ok(LoadReport {
            cabinet_lines: cabinet.iter().map(Consumer::line).collect(),
            cabinet: cabinet_estimate,
            large_lines: large.iter().map(Consumer::line).collect(),
            shop: shop_estimate,
        })
    }
}

/// Mean of every submitted rated voltage, including entries past the
/// truncated consumer list.
fn mean_voltage(voltages: &[f64]) -> f64 {
    if voltages.is_empty() {
        return DEFAULT_VOLTAGE_KV;
    }
    voltages.iter().sum::<f64>() / voltages.len() as f64
}

fn column(
    lines: &[ConsumerLine],
    field: fn(&ConsumerLine) -> f64,
    digits: Option<i32>,
) -> Vec<f64> {
    lines
        .iter()
        .map(|line| match digits {
            Some(digits) => round_to(field(line), digits),
            None => field(line),
        })
        .collect()
}

impl LoadReport {
    /// Lookup failures that zeroed a group's `Kp`, joined for display.
    pub fn coefficient_errors(&self) -> Option<String> {
        let messages: Vec<String> = [("cabinet", &self.cabinet), ("shop", &self.shop)]
            .into_iter()
            .filter_map(|(label, group)| {
                let err = group.coefficient_error.as_ref()?;
                Some(format!("{label}: {err}; Kp taken as 0"))
            })
            .collect();
        (!messages.is_empty()).then(|| messages.join("; "))
    }

    pub fn to_results(&self) -> ResultMap {
        let mut results = ResultMap::new();
        for (lines, suffix) in [(&self.cabinet_lines, "_list"), (&self.large_lines, "_big_list")] {
            results = results
                .with(&format!("nPh{suffix}"), column(lines, |l| l.rated, None))
                .with(&format!("Ip{suffix}"), column(lines, |l| l.current, Some(2)))
                .with(&format!("nPhKB{suffix}"), column(lines, |l| l.used, Some(2)))
                .with(&format!("nPhKBtg{suffix}"), column(lines, |l| l.reactive, Some(2)))
                .with(&format!("nPh_square{suffix}"), column(lines, |l| l.square, Some(2)));
        }

        let cabinet = &self.cabinet;
        let shop = &self.shop;
        results
            .with("N", cabinet.sums.count as i64)
            .with("nPh_sum", cabinet.sums.rated as i64)
            .with("nPhKB_sum", round_to(cabinet.sums.used, 2))
            .with("nPhKBtg_sum", round_to(cabinet.sums.reactive, 2))
            .with("nPh_square_sum", round_to(cabinet.sums.square, 2))
            .with("group_use_coff", round_to(cabinet.use_coefficient, 1))
            .with("ne", cabinet.effective_count)
            .with("Kp", round_to(cabinet.load.coefficient, 2))
            .with("Pp", round_to(cabinet.load.active, 2))
            .with("Qp", round_to(cabinet.load.reactive, 2))
            .with("Sp", round_to(cabinet.load.apparent, 2))
            .with("Ip", round_to(cabinet.load.current, 2))
            .with("group_use_coff_all", round_to(shop.use_coefficient, 2))
            .with("ne_all", shop.effective_count)
            .with("Kp_all", round_to(shop.load.coefficient, 2))
            .with("Pp_all", round_to(shop.load.active, 2))
            .with("Qp_all", round_to(shop.load.reactive, 2))
            .with("Sp_all", round_to(shop.load.apparent, 2))
            .with("Ip_all", round_to(shop.load.current, 2))
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, group) in [("Cabinet", &self.cabinet), ("Shop", &self.shop)] {
            writeln!(
                f,
                "{label}: Kv={:.4} ne={} Kp={:.2}",
                group.use_coefficient, group.effective_count, group.load.coefficient
            )?;
            writeln!(
                f,
                "  Pp={:.2} kW  Qp={:.2} kvar  Sp={:.2} kVA  Ip={:.2} A",
                group.load.active, group.load.reactive, group.load.apparent, group.load.current
            )?;
            if let Some(err) = &group.coefficient_error {
                writeln!(f, "  warning: {err}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-value resolver for arithmetic checks.
    struct Fixed(CalcResult<f64>);

    impl CoefficientResolver for Fixed {
        fn resolve(&self, _query: &CoefficientQuery) -> CalcResult<f64> {
            self.0.clone()
        }
    }

    fn consumer(
        quantity: f64,
        rated_power: f64,
        use_factor: f64,
        reactive_factor: f64,
    ) -> Consumer {
        Consumer {
            efficiency: 0.92,
            power_factor: 0.9,
            voltage: 0.38,
            quantity,
            rated_power,
            use_factor,
            reactive_factor,
        }
    }

    fn cabinet() -> Vec<Consumer> {
        vec![
            consumer(4.0, 20.0, 0.15, 1.33),
            consumer(2.0, 14.0, 0.12, 1.0),
            consumer(4.0, 42.0, 0.15, 1.33),
            consumer(1.0, 36.0, 0.3, 1.52),
            consumer(1.0, 20.0, 0.5, 0.75),
            consumer(1.0, 40.0, 0.2, 1.0),
            consumer(2.0, 32.0, 0.2, 1.0),
            consumer(1.0, 20.0, 0.65, 0.75),
        ]
    }

    #[test]
    fn cabinet_sums_control_example() {
        let sums = GroupSums::from_consumers(&cabinet());
        assert_eq!(sums.count, 16.0);
        assert!((sums.rated - 456.0).abs() < 1e-9);
        assert!((sums.used - 95.16).abs() < 1e-9);
        assert!((sums.reactive - 107.302).abs() < 1e-9);
        assert!((sums.square - 14792.0).abs() < 1e-9);
        assert_eq!(round_to(sums.use_coefficient(), 4), 0.2087);
        assert_eq!(sums.effective_count(CountRounding::Up), 15);
    }

    #[test]
    fn rounding_modes_differ() {
        // 456² / 14792 ≈ 14.06
        let sums = GroupSums::from_consumers(&cabinet());
        assert_eq!(sums.effective_count(CountRounding::Up), 15);
        assert_eq!(sums.effective_count(CountRounding::Nearest), 14);
    }

    #[test]
    fn empty_group_is_zero() {
        let sums = GroupSums::default();
        assert_eq!(sums.use_coefficient(), 0.0);
        assert_eq!(sums.effective_count(CountRounding::Up), 0);
        assert_eq!(mean_voltage(&[]), DEFAULT_VOLTAGE_KV);
    }

    #[test]
    fn line_current() {
        let line = consumer(4.0, 20.0, 0.15, 1.33).line();
        // 80 / (√3 · 0.38 · 0.9 · 0.92)
        assert_eq!(round_to(line.current, 2), 146.8);
    }

    #[test]
    fn untabulated_count_uses_zero_coefficient() {
        let estimate = GroupEstimate::resolve(
            GroupSums::from_consumers(&cabinet()),
            CountRounding::Up,
            &Fixed(Err(CalcError::LookupFailed("Kp lookup failed for ne=15".into()))),
            0.38,
        )
        .unwrap();
        assert_eq!(estimate.load, DesignLoad::new(0.0, &estimate.sums, 0.38));
        assert_eq!(estimate.load.active, 0.0);
        assert_eq!(
            estimate.coefficient_error.as_deref(),
            Some("lookup failed: Kp lookup failed for ne=15")
        );
    }

    #[test]
    fn report_names_groups_with_zero_coefficient() {
        let inputs = LoadInputs {
            cabinet: GroupColumns {
                efficiency: vec![0.92],
                power_factor: vec![0.9],
                voltage: vec![0.38],
                quantity: vec![4.0],
                rated_power: vec![20.0],
                use_factor: vec![0.15],
                reactive_factor: vec![1.33],
                ..GroupColumns::default()
            },
            ..LoadInputs::default()
        };
        let report = inputs
            .compute_with(
                &Fixed(Err(CalcError::LookupFailed("no row".into()))),
                &Fixed(Ok(0.7)),
            )
            .unwrap();
        let message = report.coefficient_errors().unwrap();
        assert!(message.starts_with("cabinet: "), "{message}");
        assert!(!message.contains("shop"), "{message}");
        assert!(report.to_string().contains("warning: "));

        let clean = inputs.compute_with(&Fixed(Ok(1.0)), &Fixed(Ok(0.7))).unwrap();
        assert_eq!(clean.coefficient_errors(), None);
    }

    #[test]
    fn mean_voltage_counts_every_submitted_entry() {
        // the third voltage has no matching consumer
        assert!((mean_voltage(&[0.38, 0.38, 0.66]) - 1.42 / 3.0).abs() < 1e-12);
        let inputs = LoadInputs {
            cabinet: GroupColumns {
                efficiency: vec![1.0],
                power_factor: vec![1.0],
                voltage: vec![0.4, 0.2],
                quantity: vec![1.0],
                rated_power: vec![30.0],
                use_factor: vec![1.0],
                reactive_factor: vec![0.0],
                ..GroupColumns::default()
            },
            ..LoadInputs::default()
        };
        let report = inputs.compute_with(&Fixed(Ok(1.0)), &Fixed(Ok(1.0))).unwrap();
        assert_eq!(report.cabinet_lines.len(), 1);
        // 30 kW over the mean of 0.4 and 0.2 kV
        assert!((report.cabinet.load.current - 100.0).abs() < 1e-9);
    }

    #[test]
    fn corrupt_table_is_not_masked() {
        let err = GroupEstimate::resolve(
            GroupSums::from_consumers(&cabinet()),
            CountRounding::Up,
            &Fixed(Err(CalcError::corrupt("demand_coefficients_cabinet", "bad"))),
            0.38,
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::DataCorrupt { .. }));
    }

    #[test]
    fn design_loads_from_coefficient() {
        let sums = GroupSums::from_consumers(&cabinet());
        let load = DesignLoad::new(1.25, &sums, 0.38);
        assert_eq!(round_to(load.active, 2), 118.95);
        assert_eq!(round_to(load.reactive, 2), 134.13);
        assert_eq!(round_to(load.current, 2), 313.03);
    }

    #[test]
    fn columns_truncate_to_shortest() {
        let columns = GroupColumns {
            efficiency: vec![0.92, 0.92, 0.92],
            power_factor: vec![0.9, 0.9],
            voltage: vec![0.38, 0.38, 0.38],
            quantity: vec![1.0, 2.0, 3.0],
            rated_power: vec![10.0, 10.0, 10.0],
            use_factor: vec![0.2, 0.2, 0.2],
            reactive_factor: vec![1.0],
            ..GroupColumns::default()
        };
        assert_eq!(columns.consumers(false).len(), 1);
        let padded = columns.consumers(true);
        assert_eq!(padded.len(), 2);
        assert_eq!(padded[1].reactive_factor, 0.0);
    }

    #[test]
    fn shop_totals_control_example() {
        let shop = ShopColumns {
            n: 81.0,
            rated: 2330.0,
            used: 752.0,
            reactive: 657.0,
            square: 96388.0,
        };
        let estimate = GroupEstimate::resolve(
            shop.sums(),
            CountRounding::Nearest,
            &Fixed(Ok(0.7)),
            0.38,
        )
        .unwrap();
        assert_eq!(round_to(estimate.use_coefficient, 4), 0.3227);
        assert_eq!(estimate.effective_count, 56);
        assert_eq!(round_to(estimate.load.active, 2), 526.4);
        assert_eq!(round_to(estimate.load.reactive, 2), 459.9);
    }

    #[test]
    fn form_reads_both_groups_and_totals() {
        let form = FormInput::from_pairs([
            ("nu[]", "0,92"),
            ("cos[]", "0.9"),
            ("Uh[]", "0.38"),
            ("n[]", "4"),
            ("Ph[]", "20"),
            ("KB[]", "0.15"),
            ("tg[]", "1.33"),
            ("nu_big[]", "0.92"),
            ("n_big[]", "2"),
            ("nPh", "2330"),
            ("nPhKB", "oops"),
        ]);
        let inputs = LoadInputs::from_form(&form);
        assert_eq!(inputs.cabinet.consumers(false).len(), 1);
        assert_eq!(inputs.large.efficiency, vec![0.92]);
        assert_eq!(inputs.shop.rated, 2330.0);
        assert_eq!(inputs.shop.used, 0.0);
    }

    #[test]
    fn echo_keeps_stored_names() {
        let defaults = LoadDefaults {
            normal: GroupColumns {
                naming: vec!["Press".to_string()],
                ..GroupColumns::default()
            },
            ..LoadDefaults::default()
        };
        let inputs = LoadInputs {
            cabinet: GroupColumns {
                quantity: vec![3.0],
                ..GroupColumns::default()
            },
            ..LoadInputs::default()
        };
        let echoed = inputs.echo(&defaults);
        assert_eq!(echoed.normal.naming, vec!["Press"]);
        assert_eq!(echoed.normal.quantity, vec![3.0]);
    }

    #[test]
    fn defaults_use_form_field_names() {
        let json = serde_json::to_value(LoadDefaults::default()).unwrap();
        assert!(json["normal"]["nu[]"].is_array());
        assert!(json["all"]["nPh_square"].is_number());
    }
}
