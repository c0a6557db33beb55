// ABOUTME: Budget-versus-realization aggregation grouped by CSR pillar
// ABOUTME: Exact decimal summation with skip-and-count handling of malformed entries

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

use peduli_programs::{Pillar, ProgramStorage, ReportStorage, ENTRY_TYPE_EXPENDITURE};

use crate::error::OversightResult;

/// Aggregate financial position of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFinancials {
    pub category: Pillar,
    pub total_approved_budget: Decimal,
    pub total_realized: Decimal,
}

/// One record per distinct category among existing programs, plus the number
/// of financial entries that had to be skipped as malformed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    pub categories: Vec<CategoryFinancials>,
    pub skipped_entries: u64,
}

#[derive(Clone)]
pub struct FinancialAggregator {
    program_storage: Arc<ProgramStorage>,
    report_storage: Arc<ReportStorage>,
}

impl FinancialAggregator {
    pub fn new(program_storage: Arc<ProgramStorage>, report_storage: Arc<ReportStorage>) -> Self {
        Self {
            program_storage,
            report_storage,
        }
    }

    /// Budget vs realization per category, recomputed from scratch on every
    /// call. Summation is exact decimal arithmetic; one malformed stored
    /// entry contributes zero and is counted rather than poisoning the total.
    pub async fn budget_analysis(&self) -> OversightResult<FinancialOverview> {
        let programs = self.program_storage.list_programs().await?;

        let mut totals: HashMap<Pillar, (Decimal, Decimal)> = HashMap::new();
        for program in &programs {
            let entry = totals
                .entry(program.category)
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += program.final_budget;
        }

        let mut skipped_entries = 0u64;
        for (category, raw_payload) in self.report_storage.financial_payloads_by_category().await? {
            let entry = totals
                .entry(category)
                .or_insert((Decimal::ZERO, Decimal::ZERO));

            match realized_amount(&raw_payload) {
                Ok(Some(amount)) => entry.1 += amount,
                Ok(None) => {} // valid entry that is not an expenditure
                Err(reason) => {
                    skipped_entries += 1;
                    warn!(
                        "Skipping malformed financial entry in category {}: {}",
                        category.as_str(),
                        reason
                    );
                }
            }
        }

        let mut categories: Vec<CategoryFinancials> = totals
            .into_iter()
            .map(|(category, (budget, realized))| CategoryFinancials {
                category,
                total_approved_budget: budget,
                total_realized: realized,
            })
            .collect();
        categories.sort_by_key(|c| c.category.as_str());

        Ok(FinancialOverview {
            categories,
            skipped_entries,
        })
    }
}

/// Classify one stored financial payload.
///
/// `Ok(Some(amount))` for an expenditure, `Ok(None)` for any other valid
/// entry type, `Err(reason)` when the payload cannot be trusted.
fn realized_amount(raw_payload: &str) -> Result<Option<Decimal>, &'static str> {
    let value: Value = serde_json::from_str(raw_payload).map_err(|_| "payload is not JSON")?;

    let entry_type = value
        .get("entryType")
        .and_then(Value::as_str)
        .ok_or("missing entryType")?;

    let amount = coerce_amount(value.get("amount")).ok_or("missing or non-numeric amount")?;

    if entry_type == ENTRY_TYPE_EXPENDITURE {
        Ok(Some(amount))
    } else {
        Ok(None)
    }
}

/// Lenient numeric coercion used only on the read path. Accepts JSON numbers
/// and decimal strings; everything else is None.
fn coerce_amount(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}
