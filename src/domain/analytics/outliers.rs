use crate::domain::ledger::CategorizedEntry;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

pub const DEFAULT_OUTLIER_MULTIPLIER: Decimal = dec!(1.5);

#[derive(Debug, Clone, Serialize)]
pub struct Outlier {
    pub id: String,
    pub fund_id: String,
    pub category: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    /// `(amount / mean - 1) * 100`, one decimal place
    pub deviation_pct: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierSummary {
    pub count: usize,
    pub mean: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub threshold: Decimal,
    pub outliers: Vec<Outlier>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierReport {
    pub multiplier: Decimal,
    pub obligations: OutlierSummary,
    pub receivables: OutlierSummary,
}

/// Flag every entry whose amount is strictly above `multiplier * mean`.
///
/// An empty collection reports zeros and no outliers.
pub fn detect_outliers<E: CategorizedEntry>(entries: &[E], multiplier: Decimal) -> OutlierSummary {
    if entries.is_empty() {
        return OutlierSummary {
            count: 0,
            mean: Decimal::ZERO,
            min: Decimal::ZERO,
            max: Decimal::ZERO,
            threshold: Decimal::ZERO,
            outliers: Vec::new(),
        };
    }

    let amounts: Vec<Decimal> = entries.iter().map(|e| e.value()).collect();
    let sum: Decimal = amounts.iter().sum();
    let mean = sum / Decimal::from(amounts.len());
    let min = amounts.iter().copied().min().unwrap_or(Decimal::ZERO);
    let max = amounts.iter().copied().max().unwrap_or(Decimal::ZERO);
    let threshold = mean * multiplier;

    let mut outliers: Vec<Outlier> = if mean.is_zero() {
        Vec::new()
    } else {
        entries
            .iter()
            .filter(|e| e.value() > threshold)
            .map(|e| Outlier {
                id: e.id().to_string(),
                fund_id: e.fund_id().to_string(),
                category: e.category().to_string(),
                description: e.description().to_string(),
                due_date: e.due_date(),
                amount: e.value(),
                deviation_pct: ((e.value() / mean - Decimal::ONE) * dec!(100)).round_dp(1),
            })
            .collect()
    };
    outliers.sort_by(|a, b| b.amount.cmp(&a.amount));

    OutlierSummary {
        count: amounts.len(),
        mean,
        min,
        max,
        threshold,
        outliers,
    }
}
