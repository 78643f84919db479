//! Pure aggregation over fetched sale lists. Nothing here touches the
//! database; callers fetch, these functions fold.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    CsvExport, DailySummary, DayBreakdown, DeliveryBreakdown, DeliveryType, PaymentBreakdown,
    PaymentMethod, ReportSummary, Sale, Size, SizeBreakdown,
};

pub const CSV_HEADER: &str = "Data,Hora,Tamanho,Qtd,Valor,Pagamento,Tipo,Cliente,Telefone";

/// Dashboard summary for one day's sales.
///
/// Per-size counts are sale counts, not quantities: sales recorded before
/// itemized lines existed only carry the legacy header size, and the
/// dashboard has always counted them one-per-sale. Sizes with no sales stay
/// in the list at zero; payment and delivery entries at zero are dropped.
pub fn summarize(sales: &[Sale], sizes: &[Size]) -> DailySummary {
    let total_sales = sales.len() as i64;
    let total_revenue: f64 = sales.iter().map(|s| s.total_price).sum();
    let average_ticket = if total_sales > 0 {
        total_revenue / total_sales as f64
    } else {
        0.0
    };

    let sales_by_size = sizes
        .iter()
        .map(|size| {
            let matching: Vec<&Sale> = sales
                .iter()
                .filter(|s| s.size_id == Some(size.id))
                .collect();
            SizeBreakdown {
                name: size.name.clone(),
                count: matching.len() as i64,
                revenue: matching.iter().map(|s| s.total_price).sum(),
            }
        })
        .collect();

    DailySummary {
        total_sales,
        total_revenue,
        average_ticket,
        sales_by_size,
        sales_by_payment: payment_breakdown(sales),
        sales_by_delivery: delivery_breakdown(sales),
    }
}

/// Period report summary. Unlike the daily dashboard, per-size counts here
/// accumulate quantities, and the report carries a per-calendar-day series.
pub fn summarize_period(sales: &[Sale], sizes: &[Size]) -> ReportSummary {
    let total_sales = sales.len() as i64;
    let total_quantity: i64 = sales.iter().map(|s| s.quantity).sum();
    let total_revenue: f64 = sales.iter().map(|s| s.total_price).sum();
    let average_ticket = if total_sales > 0 {
        total_revenue / total_sales as f64
    } else {
        0.0
    };

    let sales_by_size = sizes
        .iter()
        .map(|size| {
            let matching: Vec<&Sale> = sales
                .iter()
                .filter(|s| s.size_id == Some(size.id))
                .collect();
            SizeBreakdown {
                name: size.name.clone(),
                count: matching.iter().map(|s| s.quantity).sum(),
                revenue: matching.iter().map(|s| s.total_price).sum(),
            }
        })
        .collect();

    let mut by_day: BTreeMap<NaiveDate, (i64, f64)> = BTreeMap::new();
    for sale in sales {
        if let Some(day) = sale_day(&sale.created_at) {
            let entry = by_day.entry(day).or_insert((0, 0.0));
            entry.0 += sale.quantity;
            entry.1 += sale.total_price;
        }
    }

    let day_count = by_day.len() as i64;
    let average_per_day = if day_count > 0 {
        total_revenue / day_count as f64
    } else {
        0.0
    };

    // Most recent day first, matching the sale ordering.
    let sales_by_day = by_day
        .iter()
        .rev()
        .map(|(day, (count, revenue))| DayBreakdown {
            date: day.format("%d/%m/%Y").to_string(),
            count: *count,
            revenue: *revenue,
        })
        .collect();

    ReportSummary {
        total_sales,
        total_quantity,
        total_revenue,
        average_ticket,
        average_per_day,
        sales_by_size,
        sales_by_payment: payment_breakdown(sales),
        sales_by_delivery: delivery_breakdown(sales),
        sales_by_day,
    }
}

fn payment_breakdown(sales: &[Sale]) -> Vec<PaymentBreakdown> {
    PaymentMethod::ALL
        .iter()
        .map(|method| {
            let matching: Vec<&Sale> = sales
                .iter()
                .filter(|s| s.payment_method == *method)
                .collect();
            PaymentBreakdown {
                method: method.label().to_string(),
                count: matching.len() as i64,
                revenue: matching.iter().map(|s| s.total_price).sum(),
            }
        })
        .filter(|p| p.count > 0)
        .collect()
}

fn delivery_breakdown(sales: &[Sale]) -> Vec<DeliveryBreakdown> {
    DeliveryType::ALL
        .iter()
        .map(|dt| DeliveryBreakdown {
            delivery_type: dt.label().to_string(),
            count: sales.iter().filter(|s| s.delivery_type == *dt).count() as i64,
        })
        .filter(|d| d.count > 0)
        .collect()
}

/// One CSV row per sale, column order fixed. Monetary values are rounded to
/// two decimals only here; fields are joined verbatim, so embedded commas in
/// customer data shift columns (known limitation, kept as-is).
pub fn csv_rows(sales: &[Sale]) -> Vec<Vec<String>> {
    sales
        .iter()
        .map(|sale| {
            let (date, time) = date_time_parts(&sale.created_at);
            vec![
                date,
                time,
                sale.size_name.clone().unwrap_or_default(),
                sale.quantity.to_string(),
                format!("{:.2}", sale.total_price),
                sale.payment_method.code().to_string(),
                sale.delivery_type.code().to_string(),
                sale.customer_name.clone().unwrap_or_default(),
                sale.customer_phone.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

pub fn export_csv(sales: &[Sale], start_date: &str, end_date: &str) -> CsvExport {
    let mut lines = vec![CSV_HEADER.to_string()];
    lines.extend(csv_rows(sales).iter().map(|row| row.join(",")));

    CsvExport {
        filename: format!("relatorio-marmitas-{start_date}-{end_date}.csv"),
        content: lines.join("\n"),
    }
}

fn sale_day(created_at: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(created_at.get(..10).unwrap_or(created_at), "%Y-%m-%d"))
        .ok()
}

fn date_time_parts(created_at: &str) -> (String, String) {
    match NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => (
            dt.format("%d/%m/%Y").to_string(),
            dt.format("%H:%M:%S").to_string(),
        ),
        Err(_) => (created_at.to_string(), String::new()),
    }
}
