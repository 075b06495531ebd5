//! Per-fund cash-flow projection over rolling horizons.
//!
//! For every horizon `h` the projection sums open receivables, open
//! subscription installments and open obligations due on or before
//! `today + h` (overdue entries included) and adds the net to the fund's
//! liquid assets. D+0 is a snapshot: its flows are reported but its
//! projected balance is the current liquidity.

use crate::domain::fund::{Fund, FundStatus};
use crate::domain::ledger::{CashFlowEntry, CategorizedEntry, Obligation, Receivable, Subscription};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

pub const DEFAULT_HORIZONS: [u32; 6] = [0, 1, 3, 7, 15, 30];
pub const DEFAULT_ALERT_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionSettings {
    pub horizons: Vec<u32>,
    pub alert_window_days: i64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            horizons: DEFAULT_HORIZONS.to_vec(),
            alert_window_days: DEFAULT_ALERT_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HorizonProjection {
    /// "D+7"
    pub label: String,
    pub days: u32,
    pub horizon_date: NaiveDate,
    pub receivables_inflow: Decimal,
    pub subscriptions_inflow: Decimal,
    pub obligations_outflow: Decimal,
    pub projected_balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DueAlert {
    pub obligation_id: String,
    pub due_date: NaiveDate,
    /// Negative when overdue
    pub days_until_due: i64,
    pub amount: Decimal,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FundSummary {
    pub id: String,
    pub name: String,
    pub status: FundStatus,
    pub total_assets: Decimal,
    pub liquid_assets: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FundDashboard {
    pub fund: FundSummary,
    pub reference_date: NaiveDate,
    pub projections: Vec<HorizonProjection>,
    pub alerts: Vec<DueAlert>,
    pub open_obligations: usize,
    pub open_receivables: usize,
    pub open_subscriptions: usize,
}

pub fn project_cash_flow(
    fund: &Fund,
    obligations: &[Obligation],
    receivables: &[Receivable],
    subscriptions: &[Subscription],
    today: NaiveDate,
    settings: &ProjectionSettings,
) -> FundDashboard {
    let projections = settings
        .horizons
        .iter()
        .map(|&days| {
            let horizon_date = today
                .checked_add_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MAX);
            let receivables_inflow = cumulative_due(receivables, &fund.id, horizon_date);
            let subscriptions_inflow = cumulative_due(subscriptions, &fund.id, horizon_date);
            let obligations_outflow = cumulative_due(obligations, &fund.id, horizon_date);

            let projected_balance = if days == 0 {
                fund.liquid_assets
            } else {
                fund.liquid_assets + receivables_inflow + subscriptions_inflow
                    - obligations_outflow
            };

            HorizonProjection {
                label: format!("D+{}", days),
                days,
                horizon_date,
                receivables_inflow,
                subscriptions_inflow,
                obligations_outflow,
                projected_balance,
            }
        })
        .collect();

    FundDashboard {
        fund: FundSummary {
            id: fund.id.clone(),
            name: fund.name.clone(),
            status: fund.status,
            total_assets: fund.total_assets,
            liquid_assets: fund.liquid_assets,
        },
        reference_date: today,
        projections,
        alerts: due_alerts(obligations, &fund.id, today, settings.alert_window_days),
        open_obligations: count_open(obligations, &fund.id),
        open_receivables: count_open(receivables, &fund.id),
        open_subscriptions: count_open(subscriptions, &fund.id),
    }
}

/// Open obligations of `fund_id` due within `window_days` of `today`,
/// overdue ones included, earliest first.
pub fn due_alerts(
    obligations: &[Obligation],
    fund_id: &str,
    today: NaiveDate,
    window_days: i64,
) -> Vec<DueAlert> {
    let mut due: Vec<&Obligation> = obligations
        .iter()
        .filter(|o| o.fund_id == fund_id && o.is_open())
        .filter(|o| (o.due_date - today).num_days() <= window_days)
        .collect();
    due.sort_by_key(|o| o.due_date);

    due.into_iter()
        .map(|o| {
            let days_until_due = (o.due_date - today).num_days();
            DueAlert {
                obligation_id: o.id.clone(),
                due_date: o.due_date,
                days_until_due,
                amount: o.amount,
                message: format!(
                    "{}: {} - R$ {:.2} ({})",
                    o.category(),
                    o.description(),
                    o.amount,
                    describe_due_distance(days_until_due)
                ),
            }
        })
        .collect()
}

fn describe_due_distance(days: i64) -> String {
    match days {
        d if d < -1 => format!("overdue by {} days", -d),
        -1 => "overdue by 1 day".to_string(),
        0 => "due today".to_string(),
        1 => "due in 1 day".to_string(),
        d => format!("due in {} days", d),
    }
}

fn cumulative_due<E: CashFlowEntry>(entries: &[E], fund_id: &str, cutoff: NaiveDate) -> Decimal {
    entries
        .iter()
        .filter(|e| e.fund_id() == fund_id && e.is_open() && e.due_date() <= cutoff)
        .map(CashFlowEntry::value)
        .sum()
}

fn count_open<E: CashFlowEntry>(entries: &[E], fund_id: &str) -> usize {
    entries
        .iter()
        .filter(|e| e.fund_id() == fund_id && e.is_open())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fund::LiquidityPolicy;
    use crate::domain::ledger::EntryStatus;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn fund(liquid: Decimal) -> Fund {
        Fund {
            id: "fund-001".to_string(),
            name: "Aurora FIDC".to_string(),
            tax_id: "12.345.678/0001-90".to_string(),
            total_assets: dec!(10000000),
            liquid_assets: liquid,
            liquidity_policy: LiquidityPolicy::Moderate,
            redemption_notice_days: 30,
            manager: "Aurora Gestão".to_string(),
            admin_fee: dec!(0.015),
            created_on: today(),
            status: FundStatus::Active,
        }
    }

    fn obligation(id: &str, offset: i64, amount: Decimal) -> Obligation {
        Obligation {
            id: id.to_string(),
            fund_id: "fund-001".to_string(),
            category: "Taxa de administração".to_string(),
            amount,
            due_date: today() + chrono::Duration::days(offset),
            status: EntryStatus::Pending,
            description: "Monthly fee".to_string(),
        }
    }

    fn receivable(id: &str, offset: i64, amount: Decimal) -> Receivable {
        Receivable {
            id: id.to_string(),
            fund_id: "fund-001".to_string(),
            category: "Dividendos".to_string(),
            amount,
            due_date: today() + chrono::Duration::days(offset),
            status: EntryStatus::Pending,
            description: "Quarterly dividend".to_string(),
        }
    }

    fn projection_for(dashboard: &FundDashboard, days: u32) -> &HorizonProjection {
        dashboard
            .projections
            .iter()
            .find(|p| p.days == days)
            .expect("horizon present")
    }

    #[test]
    fn test_d0_balance_ignores_same_day_outflow() {
        let liquid = dec!(500000);
        let obligations = vec![obligation("o1", 0, dec!(120000))];

        let dashboard = project_cash_flow(
            &fund(liquid),
            &obligations,
            &[],
            &[],
            today(),
            &ProjectionSettings::default(),
        );

        let d0 = projection_for(&dashboard, 0);
        assert_eq!(d0.obligations_outflow, dec!(120000));
        assert_eq!(d0.projected_balance, liquid);

        let d1 = projection_for(&dashboard, 1);
        assert_eq!(d1.projected_balance, dec!(380000));
    }

    #[test]
    fn test_cumulative_horizons_include_overdue() {
        let obligations = vec![
            obligation("late", -4, dec!(10000)),
            obligation("o7", 7, dec!(20000)),
            obligation("o20", 20, dec!(40000)),
            obligation("o45", 45, dec!(99999)),
        ];
        let receivables = vec![receivable("r2", 2, dec!(15000)), receivable("r15", 15, dec!(5000))];
        let subscriptions = vec![Subscription {
            id: "s1".to_string(),
            fund_id: "fund-001".to_string(),
            investor_name: "Maria Souza".to_string(),
            investor_tax_id: "123.456.789-00".to_string(),
            quota_count: 500,
            installment_amount: dec!(25000),
            due_date: today() + chrono::Duration::days(3),
            status: EntryStatus::Pending,
            installment: "1/2".to_string(),
        }];

        let dashboard = project_cash_flow(
            &fund(dec!(100000)),
            &obligations,
            &receivables,
            &subscriptions,
            today(),
            &ProjectionSettings::default(),
        );

        let d1 = projection_for(&dashboard, 1);
        assert_eq!(d1.obligations_outflow, dec!(10000));
        assert_eq!(d1.projected_balance, dec!(90000));

        let d3 = projection_for(&dashboard, 3);
        assert_eq!(d3.receivables_inflow, dec!(15000));
        assert_eq!(d3.subscriptions_inflow, dec!(25000));
        assert_eq!(d3.projected_balance, dec!(130000));

        let d30 = projection_for(&dashboard, 30);
        assert_eq!(d30.obligations_outflow, dec!(70000));
        assert_eq!(d30.receivables_inflow, dec!(20000));
        assert_eq!(d30.projected_balance, dec!(75000));
        assert_eq!(d30.label, "D+30");
    }

    #[test]
    fn test_settled_and_foreign_entries_are_ignored() {
        let mut settled = obligation("paid", 1, dec!(70000));
        settled.status = EntryStatus::Settled;
        let mut other_fund = obligation("other", 1, dec!(1000));
        other_fund.fund_id = "fund-002".to_string();

        let dashboard = project_cash_flow(
            &fund(dec!(100000)),
            &[settled, other_fund],
            &[],
            &[],
            today(),
            &ProjectionSettings::default(),
        );

        assert!(
            dashboard
                .projections
                .iter()
                .all(|p| p.projected_balance == dec!(100000))
        );
        assert!(dashboard.alerts.is_empty());
        assert_eq!(dashboard.open_obligations, 0);
    }

    #[test]
    fn test_alert_window_and_messages() {
        let obligations = vec![
            obligation("in4", 4, dec!(1000)),
            obligation("in3", 3, dec!(3000)),
            obligation("today", 0, dec!(2000)),
            obligation("late", -2, dec!(1500)),
        ];

        let alerts = due_alerts(&obligations, "fund-001", today(), 3);
        let ids: Vec<&str> = alerts.iter().map(|a| a.obligation_id.as_str()).collect();
        assert_eq!(ids, vec!["late", "today", "in3"]);

        assert!(alerts[0].message.ends_with("(overdue by 2 days)"));
        assert!(alerts[1].message.ends_with("(due today)"));
        assert!(alerts[2].message.ends_with("(due in 3 days)"));
        assert!(alerts[2].message.contains("R$ 3000.00"));
    }

    #[test]
    fn test_custom_horizons() {
        let settings = ProjectionSettings {
            horizons: vec![2, 60],
            alert_window_days: 0,
        };
        let dashboard = project_cash_flow(
            &fund(dec!(1)),
            &[obligation("o", 1, dec!(1))],
            &[],
            &[],
            today(),
            &settings,
        );
        let labels: Vec<&str> = dashboard.projections.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["D+2", "D+60"]);
        assert!(dashboard.alerts.is_empty());
    }
}
