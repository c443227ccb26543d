//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use tally_core::budget::BudgetType as DomainBudgetType;

/// Stored record type. Persisted by name so new variants never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(100))")]
pub enum BudgetType {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<DomainBudgetType> for BudgetType {
    fn from(value: DomainBudgetType) -> Self {
        match value {
            DomainBudgetType::Income => Self::Income,
            DomainBudgetType::Expense => Self::Expense,
        }
    }
}

impl From<BudgetType> for DomainBudgetType {
    fn from(value: BudgetType) -> Self {
        match value {
            BudgetType::Income => Self::Income,
            BudgetType::Expense => Self::Expense,
        }
    }
}
