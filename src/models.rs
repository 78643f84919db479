use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// A sellable marmita size tier. Listed ascending by price everywhere.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Size {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSize {
    pub name: String,
    pub price: f64,
}

/// A delivery person. Deactivation keeps the record so old sales stay valid;
/// deletion removes it for good.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Courier {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCourier {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Dinheiro,
    Pix,
    CartaoCredito,
    CartaoDebito,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Dinheiro,
        PaymentMethod::Pix,
        PaymentMethod::CartaoCredito,
        PaymentMethod::CartaoDebito,
    ];

    /// Raw code as stored in the sales table.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "dinheiro",
            PaymentMethod::Pix => "pix",
            PaymentMethod::CartaoCredito => "cartao_credito",
            PaymentMethod::CartaoDebito => "cartao_debito",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "Dinheiro",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CartaoCredito => "Cartão Crédito",
            PaymentMethod::CartaoDebito => "Cartão Débito",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

impl ToSql for PaymentMethod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for PaymentMethod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        PaymentMethod::from_code(code)
            .ok_or_else(|| FromSqlError::Other(format!("unknown payment method: {code}").into()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    Retirada,
    Entrega,
}

impl DeliveryType {
    pub const ALL: [DeliveryType; 2] = [DeliveryType::Retirada, DeliveryType::Entrega];

    pub fn code(&self) -> &'static str {
        match self {
            DeliveryType::Retirada => "retirada",
            DeliveryType::Entrega => "entrega",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::Retirada => "Retirada",
            DeliveryType::Entrega => "Entrega",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

impl ToSql for DeliveryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for DeliveryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        DeliveryType::from_code(code)
            .ok_or_else(|| FromSqlError::Other(format!("unknown delivery type: {code}").into()))
    }
}

/// One completed sale. `size_id` is the legacy single-size reference kept for
/// sales recorded before itemized lines existed; aggregation still reads it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Sale {
    pub id: i64,
    pub size_id: Option<i64>,
    pub size_name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub courier_id: Option<i64>,
    pub courier_name: Option<String>,
    pub created_at: String,
}

/// One size/quantity line within a sale. The unit price is snapshotted at
/// sale time and never follows later price edits.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub size_id: i64,
    pub size_name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub size_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewSale {
    pub items: Vec<NewSaleItem>,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub courier_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// Derived summary shapes. Value objects only: recomputed from the sale list,
// never persisted and never mutated in place.

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SizeBreakdown {
    pub name: String,
    pub count: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentBreakdown {
    pub method: String,
    pub count: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeliveryBreakdown {
    #[serde(rename = "type")]
    pub delivery_type: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayBreakdown {
    pub date: String,
    pub count: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_sales: i64,
    pub total_revenue: f64,
    pub average_ticket: f64,
    pub sales_by_size: Vec<SizeBreakdown>,
    pub sales_by_payment: Vec<PaymentBreakdown>,
    pub sales_by_delivery: Vec<DeliveryBreakdown>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_sales: i64,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub average_ticket: f64,
    pub average_per_day: f64,
    pub sales_by_size: Vec<SizeBreakdown>,
    pub sales_by_payment: Vec<PaymentBreakdown>,
    pub sales_by_delivery: Vec<DeliveryBreakdown>,
    pub sales_by_day: Vec<DayBreakdown>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}
