use crate::db::DatabaseExt;
use crate::errors::AppError;
use crate::models::{CsvExport, DailySummary, ReportSummary};
use crate::store;
use crate::summary;
use chrono::{Datelike, Local, NaiveDate};
use tauri::AppHandle;

/// Dashboard summary over today's sales.
#[tauri::command]
pub fn get_daily_summary(app: AppHandle) -> Result<DailySummary, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let sales = store::sales_for_today(&conn)?;
    let sizes = store::list_sizes(&conn)?;

    Ok(summary::summarize(&sales, &sizes))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_period_report(
    app: AppHandle,
    startDate: Option<String>,
    endDate: Option<String>,
) -> Result<ReportSummary, String> {
    let (start, end) = period_range(startDate, endDate)?;

    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let sales = store::sales_between(&conn, &start, &end)?;
    let sizes = store::list_sizes(&conn)?;

    Ok(summary::summarize_period(&sales, &sizes))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn export_report_csv(
    app: AppHandle,
    startDate: Option<String>,
    endDate: Option<String>,
) -> Result<CsvExport, String> {
    let (start, end) = period_range(startDate, endDate)?;

    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let sales = store::sales_between(&conn, &start, &end)?;

    Ok(summary::export_csv(&sales, &start, &end))
}

/// Resolve the inclusive period filter. Defaults: first day of the current
/// month through today.
fn period_range(
    start: Option<String>,
    end: Option<String>,
) -> Result<(String, String), AppError> {
    let today = Local::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let start = match start {
        Some(s) => parse_date(&s)?,
        None => month_start,
    };
    let end = match end {
        Some(e) => parse_date(&e)?,
        None => today,
    };

    Ok((
        start.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
    ))
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Constraint(format!("data inválida: {value}")))
}
