mod cart;
mod commands;
mod db;
mod errors;
mod models;
mod store;
mod summary;


use commands::{couriers, reports, sales, sizes};
use db::Database;
use tauri::Manager;
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            // Initialize database
            let db = Database::new(&app.handle()).expect("Failed to create database");
            db.initialize().expect("Failed to initialize database");
            app.manage(db);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Sizes
            sizes::get_sizes,
            sizes::create_size,
            sizes::update_size_price,
            // Couriers
            couriers::get_couriers,
            couriers::get_active_couriers,
            couriers::create_courier,
            couriers::set_courier_active,
            couriers::delete_courier,
            // Sales
            sales::create_sale,
            sales::get_today_sales,
            sales::delete_sale,
            // Reports
            reports::get_daily_summary,
            reports::get_period_report,
            reports::export_report_csv,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
