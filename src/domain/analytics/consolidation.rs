//! Cross-fund rollup.
//!
//! The projected balance here is `liquidity + receivables - obligations` with
//! no horizon and no subscriptions, unlike the dashboard projection. The two
//! are kept as separate operations on purpose.

use crate::domain::ledger::open_total_for;
use crate::domain::repositories::TreasurySnapshot;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FundPosition {
    pub fund_id: String,
    pub fund_name: String,
    pub total_assets: Decimal,
    pub liquidity: Decimal,
    pub obligations: Decimal,
    pub receivables: Decimal,
    pub subscriptions: Decimal,
    pub projected_balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsolidatedReport {
    pub fund_count: usize,
    pub total_assets: Decimal,
    pub total_liquidity: Decimal,
    pub total_obligations: Decimal,
    pub total_receivables: Decimal,
    pub total_subscriptions: Decimal,
    pub net_projected_balance: Decimal,
    pub funds: Vec<FundPosition>,
}

pub fn consolidate(snapshot: &TreasurySnapshot) -> ConsolidatedReport {
    let funds: Vec<FundPosition> = snapshot
        .funds
        .iter()
        .map(|fund| {
            let obligations = open_total_for(&snapshot.obligations, &fund.id);
            let receivables = open_total_for(&snapshot.receivables, &fund.id);
            let subscriptions = open_total_for(&snapshot.subscriptions, &fund.id);
            FundPosition {
                fund_id: fund.id.clone(),
                fund_name: fund.name.clone(),
                total_assets: fund.total_assets,
                liquidity: fund.liquid_assets,
                obligations,
                receivables,
                subscriptions,
                projected_balance: fund.liquid_assets + receivables - obligations,
            }
        })
        .collect();

    let total_assets: Decimal = funds.iter().map(|p| p.total_assets).sum();
    let total_liquidity: Decimal = funds.iter().map(|p| p.liquidity).sum();
    let total_obligations: Decimal = funds.iter().map(|p| p.obligations).sum();
    let total_receivables: Decimal = funds.iter().map(|p| p.receivables).sum();
    let total_subscriptions: Decimal = funds.iter().map(|p| p.subscriptions).sum();

    ConsolidatedReport {
        fund_count: funds.len(),
        total_assets,
        total_liquidity,
        total_obligations,
        total_receivables,
        total_subscriptions,
        net_projected_balance: total_liquidity + total_receivables - total_obligations,
        funds,
    }
}
