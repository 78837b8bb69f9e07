use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Line item pointing at an order owned by the external order service.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReference {
    pub order_id: i64,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "PENDING",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(InvoiceStatus::Pending),
            "PAID" => Ok(InvoiceStatus::Paid),
            "CANCELLED" => Ok(InvoiceStatus::Cancelled),
            other => Err(format!("unknown invoice status '{}'", other)),
        }
    }
}

/// Largest amount the NUMERIC(12, 2) money columns hold.
pub const MAX_AMOUNT: &str = "9999999999.99";

/// Whether `amount` fits in ten integer digits.
pub fn fits_amount_column(amount: &BigDecimal) -> bool {
    amount.abs() < BigDecimal::from(10_000_000_000i64)
}

/// Invoice ready to be written. Status and timestamp are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub supplier_id: i64,
    pub orders: Vec<OrderReference>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: i64,
    pub supplier_id: i64,
    pub orders: Vec<OrderReference>,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub status: InvoiceStatus,
}
