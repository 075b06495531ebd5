//! Dated cash-flow records attached to a fund.
//!
//! Obligations leave the fund, receivables and subscriptions flow into it.
//! All three share the [`CashFlowEntry`] view so the analytics can filter and
//! sum them without caring which table they came from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Scheduled,
    Settled,
    Cancelled,
}

impl EntryStatus {
    /// Open entries still move cash in the future.
    pub fn is_open(self) -> bool {
        matches!(self, EntryStatus::Pending | EntryStatus::Scheduled)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Pending => write!(f, "pending"),
            EntryStatus::Scheduled => write!(f, "scheduled"),
            EntryStatus::Settled => write!(f, "settled"),
            EntryStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A payment owed by a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub id: String,
    pub fund_id: String,
    pub category: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: EntryStatus,
    pub description: String,
}

/// A payment owed to a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: String,
    pub fund_id: String,
    pub category: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: EntryStatus,
    pub description: String,
}

/// A capital call installment due from an investor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub fund_id: String,
    pub investor_name: String,
    pub investor_tax_id: String,
    pub quota_count: u32,
    pub installment_amount: Decimal,
    pub due_date: NaiveDate,
    pub status: EntryStatus,
    /// e.g. "1/3"
    pub installment: String,
}

pub trait CashFlowEntry {
    fn id(&self) -> &str;
    fn fund_id(&self) -> &str;
    /// The monetary field of the record.
    fn value(&self) -> Decimal;
    fn due_date(&self) -> NaiveDate;
    fn status(&self) -> EntryStatus;

    fn is_open(&self) -> bool {
        self.status().is_open()
    }
}

/// Entries that carry a category and free-text description.
pub trait CategorizedEntry: CashFlowEntry {
    fn category(&self) -> &str;
    fn description(&self) -> &str;
}

macro_rules! categorized_entry {
    ($ty:ty) => {
        impl CashFlowEntry for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn fund_id(&self) -> &str {
                &self.fund_id
            }
            fn value(&self) -> Decimal {
                self.amount
            }
            fn due_date(&self) -> NaiveDate {
                self.due_date
            }
            fn status(&self) -> EntryStatus {
                self.status
            }
        }

        impl CategorizedEntry for $ty {
            fn category(&self) -> &str {
                &self.category
            }
            fn description(&self) -> &str {
                &self.description
            }
        }
    };
}

categorized_entry!(Obligation);
categorized_entry!(Receivable);

impl CashFlowEntry for Subscription {
    fn id(&self) -> &str {
        &self.id
    }
    fn fund_id(&self) -> &str {
        &self.fund_id
    }
    fn value(&self) -> Decimal {
        self.installment_amount
    }
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
    fn status(&self) -> EntryStatus {
        self.status
    }
}

/// Entries of `fund_id`, or all entries when no fund is given.
pub fn filter_by_fund<E: CashFlowEntry + Clone>(entries: &[E], fund_id: Option<&str>) -> Vec<E> {
    entries
        .iter()
        .filter(|e| fund_id.is_none_or(|id| e.fund_id() == id))
        .cloned()
        .collect()
}

pub fn total<E: CashFlowEntry>(entries: &[E]) -> Decimal {
    entries.iter().map(CashFlowEntry::value).sum()
}

/// Sum of the open entries of one fund.
pub fn open_total_for<E: CashFlowEntry>(entries: &[E], fund_id: &str) -> Decimal {
    entries
        .iter()
        .filter(|e| e.fund_id() == fund_id && e.is_open())
        .map(CashFlowEntry::value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn obligation(id: &str, fund_id: &str, amount: Decimal, status: EntryStatus) -> Obligation {
        Obligation {
            id: id.to_string(),
            fund_id: fund_id.to_string(),
            category: "fees".to_string(),
            amount,
            due_date: NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            status,
            description: String::new(),
        }
    }

    #[test]
    fn test_filter_and_total() {
        let entries = vec![
            obligation("o1", "fund-001", dec!(100), EntryStatus::Pending),
            obligation("o2", "fund-002", dec!(250), EntryStatus::Pending),
            obligation("o3", "fund-001", dec!(50.5), EntryStatus::Settled),
        ];

        let only_first = filter_by_fund(&entries, Some("fund-001"));
        assert_eq!(only_first.len(), 2);
        assert_eq!(total(&only_first), dec!(150.5));

        let everything = filter_by_fund(&entries, None);
        assert_eq!(total(&everything), dec!(400.5));
    }

    #[test]
    fn test_open_total_skips_settled() {
        let entries = vec![
            obligation("o1", "fund-001", dec!(100), EntryStatus::Scheduled),
            obligation("o2", "fund-001", dec!(900), EntryStatus::Settled),
            obligation("o3", "fund-001", dec!(40), EntryStatus::Cancelled),
        ];
        assert_eq!(open_total_for(&entries, "fund-001"), dec!(100));
    }

    #[test]
    fn test_subscription_value_is_installment() {
        let sub = Subscription {
            id: "s1".to_string(),
            fund_id: "fund-001".to_string(),
            investor_name: "Maria Souza".to_string(),
            investor_tax_id: "123.456.789-00".to_string(),
            quota_count: 1000,
            installment_amount: dec!(33333.33),
            due_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            status: EntryStatus::Pending,
            installment: "1/3".to_string(),
        };
        assert_eq!(sub.value(), dec!(33333.33));
        assert!(sub.is_open());
    }
}
