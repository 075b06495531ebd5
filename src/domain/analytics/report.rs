//! Ad-hoc report assembly.

use crate::domain::fund::Fund;
use crate::domain::ledger::{CashFlowEntry, Obligation, Receivable, Subscription, total};
use crate::domain::repositories::TreasurySnapshot;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Complete,
    Funds,
    Obligations,
    Receivables,
    Subscriptions,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Complete,
        ReportType::Funds,
        ReportType::Obligations,
        ReportType::Receivables,
        ReportType::Subscriptions,
    ];

    fn includes(self, section: ReportType) -> bool {
        self == ReportType::Complete || self == section
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportType::Complete => "Complete treasury report",
            ReportType::Funds => "Funds overview",
            ReportType::Obligations => "Obligations",
            ReportType::Receivables => "Receivables",
            ReportType::Subscriptions => "Subscriptions",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReportType::Complete => {
                "Funds with asset and liquidity statistics plus every obligation, receivable and subscription"
            }
            ReportType::Funds => "Fund list with total and average assets and liquidity",
            ReportType::Obligations => "Payables of the selected funds and their total",
            ReportType::Receivables => "Expected inflows of the selected funds and their total",
            ReportType::Subscriptions => "Investor capital calls of the selected funds and their total",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub report_type: ReportType,
    /// All funds when absent or empty.
    #[serde(default)]
    pub fund_ids: Option<Vec<String>>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Requested period, echoed back as received.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPeriod {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FundStatistics {
    pub count: usize,
    pub total_assets: Decimal,
    pub average_assets: Decimal,
    pub total_liquidity: Decimal,
    pub average_liquidity: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FundSection {
    pub funds: Vec<Fund>,
    pub statistics: FundStatistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntrySection<T> {
    pub entries: Vec<T>,
    pub count: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub report_type: ReportType,
    pub generated_at: DateTime<Utc>,
    pub period: ReportPeriod,
    pub fund_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds: Option<FundSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obligations: Option<EntrySection<Obligation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receivables: Option<EntrySection<Receivable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<EntrySection<Subscription>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportTemplate {
    pub report_type: ReportType,
    pub title: &'static str,
    pub description: &'static str,
}

pub fn templates() -> Vec<ReportTemplate> {
    ReportType::ALL
        .iter()
        .map(|&report_type| ReportTemplate {
            report_type,
            title: report_type.title(),
            description: report_type.description(),
        })
        .collect()
}

pub fn generate_report(
    request: &ReportRequest,
    snapshot: &TreasurySnapshot,
    generated_at: DateTime<Utc>,
) -> GeneratedReport {
    let fund_ids: Vec<String> = match &request.fund_ids {
        Some(ids) if !ids.is_empty() => ids.clone(),
        _ => snapshot.funds.iter().map(|f| f.id.clone()).collect(),
    };
    let selected = |fund_id: &str| fund_ids.iter().any(|id| id == fund_id);
    let report_type = request.report_type;

    let funds = report_type.includes(ReportType::Funds).then(|| {
        let funds: Vec<Fund> = snapshot
            .funds
            .iter()
            .filter(|f| selected(&f.id))
            .cloned()
            .collect();
        let statistics = fund_statistics(&funds);
        FundSection { funds, statistics }
    });

    GeneratedReport {
        report_type,
        generated_at,
        period: ReportPeriod {
            start: request.start_date.clone(),
            end: request.end_date.clone(),
        },
        funds,
        obligations: report_type
            .includes(ReportType::Obligations)
            .then(|| section(&snapshot.obligations, &selected)),
        receivables: report_type
            .includes(ReportType::Receivables)
            .then(|| section(&snapshot.receivables, &selected)),
        subscriptions: report_type
            .includes(ReportType::Subscriptions)
            .then(|| section(&snapshot.subscriptions, &selected)),
        fund_ids,
    }
}

fn section<T, F>(entries: &[T], selected: &F) -> EntrySection<T>
where
    T: CashFlowEntry + Clone,
    F: Fn(&str) -> bool,
{
    let entries: Vec<T> = entries
        .iter()
        .filter(|e| selected(e.fund_id()))
        .cloned()
        .collect();
    EntrySection {
        count: entries.len(),
        total: total(&entries),
        entries,
    }
}

fn fund_statistics(funds: &[Fund]) -> FundStatistics {
    let total_assets: Decimal = funds.iter().map(|f| f.total_assets).sum();
    let total_liquidity: Decimal = funds.iter().map(|f| f.liquid_assets).sum();
    let (average_assets, average_liquidity) = if funds.is_empty() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let n = Decimal::from(funds.len());
        (
            (total_assets / n).round_dp(2),
            (total_liquidity / n).round_dp(2),
        )
    };

    FundStatistics {
        count: funds.len(),
        total_assets,
        average_assets,
        total_liquidity,
        average_liquidity,
    }
}
