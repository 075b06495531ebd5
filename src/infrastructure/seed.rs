//! Demo data loaded at startup when `SEED_DEMO_DATA` is enabled.
//!
//! Due dates are relative to the startup day so the dashboard always has
//! something inside its horizons and alert window.

use crate::domain::fund::{Fund, FundStatus, LiquidityPolicy};
use crate::domain::ledger::{EntryStatus, Obligation, Receivable, Subscription};
use crate::domain::repositories::{FundRepository, LedgerRepository};
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub funds: usize,
    pub obligations: usize,
    pub receivables: usize,
    pub subscriptions: usize,
}

struct FundSeed {
    name: &'static str,
    tax_id: &'static str,
    total_assets: Decimal,
    liquid_assets: Decimal,
    policy: LiquidityPolicy,
    redemption_notice_days: u32,
    manager: &'static str,
    admin_fee: Decimal,
}

const FUNDS: [FundSeed; 3] = [
    FundSeed {
        name: "Tomate Crédito Estruturado FIDC",
        tax_id: "12.345.678/0001-90",
        total_assets: dec!(85000000),
        liquid_assets: dec!(12500000),
        policy: LiquidityPolicy::Conservative,
        redemption_notice_days: 30,
        manager: "Tomate Asset Management",
        admin_fee: dec!(0.0150),
    },
    FundSeed {
        name: "Horizonte Imobiliário FII",
        tax_id: "23.456.789/0001-01",
        total_assets: dec!(142000000),
        liquid_assets: dec!(8300000),
        policy: LiquidityPolicy::Moderate,
        redemption_notice_days: 90,
        manager: "Horizonte Investimentos",
        admin_fee: dec!(0.0100),
    },
    FundSeed {
        name: "Vértice Infraestrutura FIP",
        tax_id: "34.567.890/0001-12",
        total_assets: dec!(56000000),
        liquid_assets: dec!(3100000),
        policy: LiquidityPolicy::Aggressive,
        redemption_notice_days: 180,
        manager: "Vértice Capital",
        admin_fee: dec!(0.0200),
    },
];

// (fund index, category, amount, days from today, description)
const OBLIGATIONS: [(usize, &str, Decimal, i64, &str); 8] = [
    (0, "Taxa de administração", dec!(106250), 2, "Monthly administration fee"),
    (0, "Resgate de cotas", dec!(2400000), 5, "Scheduled senior quota redemption"),
    (0, "Auditoria", dec!(48000), -1, "Annual audit invoice"),
    (1, "Taxa de administração", dec!(118333.33), 0, "Monthly administration fee"),
    (1, "Obras e benfeitorias", dec!(950000), 12, "Retrofit of logistics warehouse"),
    (1, "IPTU", dec!(132500), 20, "Property tax installment"),
    (2, "Chamada SPE", dec!(4200000), 8, "Capital injection into solar SPE"),
    (2, "Custódia", dec!(21000), 25, "Custody fee"),
];

const RECEIVABLES: [(usize, &str, Decimal, i64, &str); 6] = [
    (0, "Recebíveis comerciais", dec!(1850000), 1, "Receivables portfolio settlement"),
    (0, "Juros CCB", dec!(312000), 10, "CCB coupon"),
    (1, "Aluguéis", dec!(1420000), 4, "Monthly rent collection"),
    (1, "Multa contratual", dec!(75000), 18, "Early termination penalty"),
    (2, "Dividendos SPE", dec!(690000), 14, "Wind farm SPE dividends"),
    (2, "Venda de participação", dec!(9800000), 28, "Partial stake sale"),
];

// (fund index, investor, investor tax id, quotas, installment, days from today, label)
const SUBSCRIPTIONS: [(usize, &str, &str, u32, Decimal, i64, &str); 4] = [
    (0, "Fundação Previdência Azul", "45.678.901/0001-23", 50000, dec!(500000), 3, "1/3"),
    (1, "Maria Helena Costa", "123.456.789-09", 2000, dec!(200000), 9, "1/1"),
    (2, "Instituto Patrimônio Verde", "56.789.012/0001-34", 120000, dec!(1500000), 6, "2/4"),
    (2, "Carlos Eduardo Prado", "987.654.321-00", 8000, dec!(100000), 21, "1/2"),
];

/// Load the demo funds and their records, returning how many were created.
pub async fn load_demo_data<R>(repository: &R, today: NaiveDate) -> Result<SeedSummary>
where
    R: FundRepository + LedgerRepository,
{
    let mut fund_ids = Vec::with_capacity(FUNDS.len());
    for seed in &FUNDS {
        let fund = repository
            .insert_fund(Fund {
                id: String::new(),
                name: seed.name.to_string(),
                tax_id: seed.tax_id.to_string(),
                total_assets: seed.total_assets,
                liquid_assets: seed.liquid_assets,
                liquidity_policy: seed.policy,
                redemption_notice_days: seed.redemption_notice_days,
                manager: seed.manager.to_string(),
                admin_fee: seed.admin_fee,
                created_on: today - Duration::days(365),
                status: FundStatus::Active,
            })
            .await?;
        fund_ids.push(fund.id);
    }

    for (i, (fund, category, amount, offset, description)) in OBLIGATIONS.iter().enumerate() {
        repository
            .add_obligation(Obligation {
                id: format!("obl-{:03}", i + 1),
                fund_id: fund_ids[*fund].clone(),
                category: category.to_string(),
                amount: *amount,
                due_date: today + Duration::days(*offset),
                status: EntryStatus::Pending,
                description: description.to_string(),
            })
            .await?;
    }

    for (i, (fund, category, amount, offset, description)) in RECEIVABLES.iter().enumerate() {
        repository
            .add_receivable(Receivable {
                id: format!("rec-{:03}", i + 1),
                fund_id: fund_ids[*fund].clone(),
                category: category.to_string(),
                amount: *amount,
                due_date: today + Duration::days(*offset),
                status: EntryStatus::Pending,
                description: description.to_string(),
            })
            .await?;
    }

    for (i, (fund, investor, tax_id, quotas, installment_amount, offset, label)) in
        SUBSCRIPTIONS.iter().enumerate()
    {
        repository
            .add_subscription(Subscription {
                id: format!("sub-{:03}", i + 1),
                fund_id: fund_ids[*fund].clone(),
                investor_name: investor.to_string(),
                investor_tax_id: tax_id.to_string(),
                quota_count: *quotas,
                installment_amount: *installment_amount,
                due_date: today + Duration::days(*offset),
                status: EntryStatus::Pending,
                installment: label.to_string(),
            })
            .await?;
    }

    let summary = SeedSummary {
        funds: FUNDS.len(),
        obligations: OBLIGATIONS.len(),
        receivables: RECEIVABLES.len(),
        subscriptions: SUBSCRIPTIONS.len(),
    };
    info!(
        "Demo data loaded: {} funds, {} obligations, {} receivables, {} subscriptions",
        summary.funds, summary.obligations, summary.receivables, summary.subscriptions
    );
    Ok(summary)
}
