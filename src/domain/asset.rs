//! Registered portfolio assets.

use crate::domain::errors::TreasuryError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const GENERAL_INFO_MAX_CHARS: usize = 1000;

/// Asset classes accepted at registration.
pub const ASSET_KINDS: &[&str] = &[
    "Ações de companhias fechadas",
    "Quotas de sociedades limitadas",
    "Debêntures (inclusive conversíveis)",
    "Notas comerciais",
    "Cédulas de Crédito Bancário (CCB)",
    "Cédulas de Crédito Imobiliário (CCI)",
    "Certificados de Recebíveis Imobiliários (CRI)",
    "Certificados de Recebíveis do Agronegócio (CRA)",
    "Direitos creditórios Recebíveis comerciais",
    "Recebíveis financeiros",
    "Créditos inadimplentes (NPL)",
    "Créditos judiciais",
    "Precatórios",
    "Imóveis",
    "Terrenos",
    "Direitos reais sobre imóveis",
    "Participações em SPE",
    "Projetos de infraestrutura",
    "Concessões",
    "Parcerias Público-Privadas (PPP)",
    "Royalties",
    "Direitos econômicos",
    "Créditos de carbono",
    "Quotas de FIP",
    "Quotas de FII",
    "Quotas de FIDC",
    "Green Bonds",
    "Floating Rate Notes (FRN)",
    "Fixed Rate Bonds",
    "Portuguese Government Bonds (Portugal)",
    "Gilts (Reino Unido)",
    "OATs (França)",
    "Corporate Bonds Fixed rate",
    "Corporate Bonds Floating rates",
    "TIPS – Treasury Inflation-Protected Securities",
];

/// Floating-rate benchmark an asset is indexed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableRateIndex {
    #[serde(rename = "CDI")]
    Cdi,
    #[serde(rename = "Selic")]
    Selic,
    #[serde(rename = "Cambial")]
    Cambial,
    #[serde(rename = "IPCA")]
    Ipca,
    #[serde(rename = "IGPM")]
    Igpm,
}

impl VariableRateIndex {
    pub const ALL: [VariableRateIndex; 5] = [
        VariableRateIndex::Cdi,
        VariableRateIndex::Selic,
        VariableRateIndex::Cambial,
        VariableRateIndex::Ipca,
        VariableRateIndex::Igpm,
    ];
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAsset {
    #[serde(default)]
    pub asset_kind: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    /// Percent per year.
    #[serde(default)]
    pub fixed_rate: Option<Decimal>,
    #[serde(default)]
    pub variable_rate: Option<VariableRateIndex>,
    #[serde(default)]
    pub maturities: Vec<NaiveDate>,
    #[serde(default)]
    pub general_info: Option<String>,
    #[serde(default)]
    pub document_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredAsset {
    pub id: String,
    pub asset_kind: String,
    pub details: String,
    pub fixed_rate: Option<Decimal>,
    pub variable_rate: Option<VariableRateIndex>,
    pub maturities: Vec<NaiveDate>,
    pub general_info: String,
    pub document_name: String,
    pub registered_at: DateTime<Utc>,
}

impl NewAsset {
    pub fn validate(
        self,
        id: String,
        registered_at: DateTime<Utc>,
    ) -> Result<RegisteredAsset, TreasuryError> {
        let asset_kind = self
            .asset_kind
            .filter(|kind| !kind.trim().is_empty())
            .ok_or_else(|| TreasuryError::missing_field("asset_kind"))?;

        if !ASSET_KINDS.contains(&asset_kind.as_str()) {
            return Err(TreasuryError::validation(format!(
                "unknown asset kind: {}",
                asset_kind
            )));
        }

        let general_info = self.general_info.unwrap_or_default();
        if general_info.chars().count() > GENERAL_INFO_MAX_CHARS {
            return Err(TreasuryError::validation(format!(
                "general_info exceeds {} characters",
                GENERAL_INFO_MAX_CHARS
            )));
        }

        if self.fixed_rate.is_some_and(|rate| rate.is_sign_negative()) {
            return Err(TreasuryError::validation("fixed_rate cannot be negative"));
        }

        let mut maturities = self.maturities;
        maturities.sort();
        maturities.dedup();

        Ok(RegisteredAsset {
            id,
            asset_kind,
            details: self.details.unwrap_or_default(),
            fixed_rate: self.fixed_rate,
            variable_rate: self.variable_rate,
            maturities,
            general_info,
            document_name: self
                .document_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "no file".to_string()),
            registered_at,
        })
    }
}
