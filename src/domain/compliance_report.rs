//! Compliance statistics over evaluation results.
//!
//! - `ComplianceScore`: share of a single trade's rules that passed
//! - `ViolationTally`: how often each rule type was violated across trades
//! - `DeviationComparison`: P&L of compliant trades against deviating ones
//! - `StrategySummary`: all of the above for one strategy

use crate::domain::compliance::ComplianceEvaluationResult;
use crate::domain::strategy::Strategy;
use crate::domain::trade::Trade;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceScore {
    pub passed: usize,
    pub total: usize,
    /// 0-100. A trade with no evaluated rules scores 100.
    pub percentage: f64,
}

impl ComplianceScore {
    pub fn from_result(result: &ComplianceEvaluationResult) -> Self {
        let total = result.rule_evaluations.len();
        let passed = total - result.violations.len();
        let percentage = if total > 0 {
            passed as f64 / total as f64 * 100.0
        } else {
            100.0
        };
        Self {
            passed,
            total,
            percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTally {
    pub rule_type: String,
    pub label: String,
    pub evaluations: usize,
    pub violations: usize,
}

impl RuleTally {
    pub fn violation_rate(&self) -> f64 {
        if self.evaluations > 0 {
            self.violations as f64 / self.evaluations as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationTally {
    pub trades: usize,
    pub compliant_trades: usize,
    /// One entry per rule type, ordered by rule type key.
    pub rules: Vec<RuleTally>,
}

impl ViolationTally {
    pub fn from_results<'a>(
        results: impl IntoIterator<Item = &'a ComplianceEvaluationResult>,
    ) -> Self {
        let mut trades = 0usize;
        let mut compliant_trades = 0usize;
        let mut by_type: BTreeMap<&str, RuleTally> = BTreeMap::new();

        for result in results {
            trades += 1;
            if result.overall_compliant {
                compliant_trades += 1;
            }
            for evaluation in &result.rule_evaluations {
                let tally = by_type
                    .entry(evaluation.rule_type.as_str())
                    .or_insert_with(|| RuleTally {
                        rule_type: evaluation.rule_type.clone(),
                        label: evaluation.rule_label.clone(),
                        evaluations: 0,
                        violations: 0,
                    });
                tally.evaluations += 1;
                if !evaluation.passed {
                    tally.violations += 1;
                }
            }
        }

        Self {
            trades,
            compliant_trades,
            rules: by_type.into_values().collect(),
        }
    }

    pub fn compliance_rate(&self) -> f64 {
        if self.trades > 0 {
            self.compliant_trades as f64 / self.trades as f64
        } else {
            0.0
        }
    }

    /// Rule types with at least one violation, most violated first.
    pub fn most_violated(&self) -> Vec<&RuleTally> {
        let mut violated: Vec<&RuleTally> =
            self.rules.iter().filter(|r| r.violations > 0).collect();
        violated.sort_by(|a, b| {
            b.violations
                .cmp(&a.violations)
                .then_with(|| a.rule_type.cmp(&b.rule_type))
        });
        violated
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlGroup {
    pub trades: usize,
    pub trades_with_pnl: usize,
    pub total_pnl: f64,
    pub average_pnl: f64,
}

impl PnlGroup {
    fn record(&mut self, pnl: Option<f64>) {
        self.trades += 1;
        if let Some(pnl) = pnl.filter(|p| p.is_finite()) {
            self.trades_with_pnl += 1;
            self.total_pnl += pnl;
        }
    }

    fn finish(&mut self) {
        self.average_pnl = if self.trades_with_pnl > 0 {
            self.total_pnl / self.trades_with_pnl as f64
        } else {
            0.0
        };
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviationComparison {
    pub compliant: PnlGroup,
    pub deviating: PnlGroup,
}

impl DeviationComparison {
    /// Trades without a realised P&L are counted but left out of the P&L figures.
    pub fn compute<'a>(
        entries: impl IntoIterator<Item = (&'a ComplianceEvaluationResult, Option<f64>)>,
    ) -> Self {
        let mut comparison = DeviationComparison::default();
        for (result, pnl) in entries {
            if result.overall_compliant {
                comparison.compliant.record(pnl);
            } else {
                comparison.deviating.record(pnl);
            }
        }
        comparison.compliant.finish();
        comparison.deviating.finish();
        comparison
    }

    /// Average P&L of compliant trades minus that of deviating trades.
    pub fn average_pnl_difference(&self) -> f64 {
        self.compliant.average_pnl - self.deviating.average_pnl
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySummary {
    pub strategy_id: String,
    pub strategy_name: String,
    pub average_score: f64,
    pub tally: ViolationTally,
    pub deviation: DeviationComparison,
}

impl StrategySummary {
    pub fn build(strategy: &Strategy, evaluations: &[(Trade, ComplianceEvaluationResult)]) -> Self {
        let average_score = if evaluations.is_empty() {
            0.0
        } else {
            evaluations
                .iter()
                .map(|(_, result)| ComplianceScore::from_result(result).percentage)
                .sum::<f64>()
                / evaluations.len() as f64
        };

        Self {
            strategy_id: strategy.id.clone(),
            strategy_name: strategy.name.clone(),
            average_score,
            tally: ViolationTally::from_results(evaluations.iter().map(|(_, result)| result)),
            deviation: DeviationComparison::compute(
                evaluations.iter().map(|(trade, result)| (result, trade.pnl)),
            ),
        }
    }
}
