use crate::domain::errors::TreasuryError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Upper bound, in absolute value, for every monetary field of a fund.
/// Registry-wide sums stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

fn check_amount(field: &str, value: Decimal) -> Result<(), TreasuryError> {
    if value.abs() > MAX_AMOUNT {
        return Err(TreasuryError::validation(format!(
            "{} exceeds the maximum of {}",
            field, MAX_AMOUNT
        )));
    }
    Ok(())
}

/// How aggressively a fund is allowed to run down its liquid reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityPolicy {
    Conservative,
    Moderate,
    Aggressive,
}

impl fmt::Display for LiquidityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquidityPolicy::Conservative => write!(f, "conservative"),
            LiquidityPolicy::Moderate => write!(f, "moderate"),
            LiquidityPolicy::Aggressive => write!(f, "aggressive"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl fmt::Display for FundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FundStatus::Active => write!(f, "active"),
            FundStatus::Inactive => write!(f, "inactive"),
            FundStatus::Suspended => write!(f, "suspended"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub total_assets: Decimal,
    pub liquid_assets: Decimal,
    pub liquidity_policy: LiquidityPolicy,
    pub redemption_notice_days: u32,
    pub manager: String,
    pub admin_fee: Decimal,
    pub created_on: NaiveDate,
    pub status: FundStatus,
}

/// Payload accepted by fund creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFund {
    pub name: String,
    pub tax_id: String,
    pub total_assets: Decimal,
    pub liquid_assets: Decimal,
    pub liquidity_policy: LiquidityPolicy,
    #[serde(default)]
    pub redemption_notice_days: Option<u32>,
    pub manager: String,
    pub admin_fee: Decimal,
}

impl NewFund {
    /// Checked in this order; the first absent one is reported.
    pub const REQUIRED_FIELDS: [&'static str; 7] = [
        "name",
        "tax_id",
        "total_assets",
        "liquid_assets",
        "liquidity_policy",
        "manager",
        "admin_fee",
    ];

    /// Parse a raw JSON body, naming the first missing required field.
    ///
    /// A field set to `null` counts as missing.
    pub fn from_json(body: &Value) -> Result<Self, TreasuryError> {
        let object = body
            .as_object()
            .ok_or_else(|| TreasuryError::validation("request body must be a JSON object"))?;

        if let Some(field) = Self::REQUIRED_FIELDS
            .iter()
            .find(|field| object.get(**field).is_none_or(Value::is_null))
        {
            return Err(TreasuryError::missing_field(*field));
        }

        let new_fund: Self = serde_json::from_value(body.clone())
            .map_err(|e| TreasuryError::validation(e.to_string()))?;
        check_amount("total_assets", new_fund.total_assets)?;
        check_amount("liquid_assets", new_fund.liquid_assets)?;
        check_amount("admin_fee", new_fund.admin_fee)?;
        Ok(new_fund)
    }

    /// Build the stored record. The id is a placeholder until the repository
    /// allocates one.
    pub fn into_fund(self, created_on: NaiveDate, default_redemption_days: u32) -> Fund {
        Fund {
            id: String::new(),
            name: self.name,
            tax_id: self.tax_id,
            total_assets: self.total_assets,
            liquid_assets: self.liquid_assets,
            liquidity_policy: self.liquidity_policy,
            redemption_notice_days: self
                .redemption_notice_days
                .unwrap_or(default_redemption_days),
            manager: self.manager,
            admin_fee: self.admin_fee,
            created_on,
            status: FundStatus::Active,
        }
    }
}

/// Partial update of a fund. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_assets: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub liquid_assets: Option<Decimal>,
    #[serde(default)]
    pub liquidity_policy: Option<LiquidityPolicy>,
    #[serde(default, deserialize_with = "lenient::whole_days")]
    pub redemption_notice_days: Option<u32>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub admin_fee: Option<Decimal>,
    #[serde(default)]
    pub status: Option<FundStatus>,
}

impl FundPatch {
    pub fn from_json(body: &Value) -> Result<Self, TreasuryError> {
        if !body.is_object() {
            return Err(TreasuryError::validation("request body must be a JSON object"));
        }
        let patch: Self = serde_json::from_value(body.clone())
            .map_err(|e| TreasuryError::validation(e.to_string()))?;
        for (field, value) in [
            ("total_assets", patch.total_assets),
            ("liquid_assets", patch.liquid_assets),
            ("admin_fee", patch.admin_fee),
        ] {
            if let Some(value) = value {
                check_amount(field, value)?;
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tax_id.is_none()
            && self.total_assets.is_none()
            && self.liquid_assets.is_none()
            && self.liquidity_policy.is_none()
            && self.redemption_notice_days.is_none()
            && self.manager.is_none()
            && self.admin_fee.is_none()
            && self.status.is_none()
    }

    pub fn apply_to(self, fund: &mut Fund) {
        if let Some(name) = self.name {
            fund.name = name;
        }
        if let Some(tax_id) = self.tax_id {
            fund.tax_id = tax_id;
        }
        if let Some(total_assets) = self.total_assets {
            fund.total_assets = total_assets;
        }
        if let Some(liquid_assets) = self.liquid_assets {
            fund.liquid_assets = liquid_assets;
        }
        if let Some(policy) = self.liquidity_policy {
            fund.liquidity_policy = policy;
        }
        if let Some(days) = self.redemption_notice_days {
            fund.redemption_notice_days = days;
        }
        if let Some(manager) = self.manager {
            fund.manager = manager;
        }
        if let Some(admin_fee) = self.admin_fee {
            fund.admin_fee = admin_fee;
        }
        if let Some(status) = self.status {
            fund.status = status;
        }
    }
}

/// Next free sequential id: starts at `count + 1` and skips ids already taken.
pub fn next_fund_id(count: usize, is_taken: impl Fn(&str) -> bool) -> String {
    let mut sequence = count + 1;
    loop {
        let candidate = format!("fund-{:03}", sequence);
        if !is_taken(&candidate) {
            return candidate;
        }
        sequence += 1;
    }
}

/// Deserializers that accept numbers sent as strings.
mod lenient {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::FromPrimitive;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => {
                let parsed = match (n.as_i64(), n.as_f64()) {
                    (Some(i), _) => Some(Decimal::from(i)),
                    (None, Some(f)) => Decimal::from_f64(f),
                    _ => None,
                };
                parsed
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("number out of range: {}", n)))
            }
            Some(Value::String(s)) => s
                .trim()
                .parse::<Decimal>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a number, got '{}'", s))),
            Some(other) => Err(D::Error::custom(format!(
                "expected a number, got {}",
                other
            ))),
        }
    }

    pub fn whole_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let days = match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
                (Some(u), _) => u32::try_from(u).ok(),
                (None, Some(f)) if f >= 0.0 && f <= u32::MAX as f64 => Some(f.trunc() as u32),
                _ => None,
            },
            Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
            Some(_) => None,
        };
        days.map(Some)
            .ok_or_else(|| D::Error::custom("redemption_notice_days must be a non-negative integer"))
    }
}
