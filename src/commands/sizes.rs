use crate::db::DatabaseExt;
use crate::models::{CreateSize, Size};
use crate::store;
use tauri::AppHandle;

#[tauri::command]
pub fn get_sizes(app: AppHandle) -> Result<Vec<Size>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::list_sizes(&conn).map_err(String::from)
}

#[tauri::command]
pub fn create_size(app: AppHandle, size: CreateSize) -> Result<Size, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::insert_size(&conn, size).map_err(String::from)
}

#[tauri::command]
pub fn update_size_price(app: AppHandle, id: i64, price: f64) -> Result<Size, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::update_size_price(&conn, id, price).map_err(String::from)
}
