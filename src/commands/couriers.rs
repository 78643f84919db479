use crate::db::DatabaseExt;
use crate::models::{Courier, CreateCourier};
use crate::store;
use tauri::AppHandle;

#[tauri::command]
pub fn get_couriers(app: AppHandle) -> Result<Vec<Courier>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::list_couriers(&conn).map_err(String::from)
}

#[tauri::command]
pub fn get_active_couriers(app: AppHandle) -> Result<Vec<Courier>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::active_couriers(&conn).map_err(String::from)
}

#[tauri::command]
pub fn create_courier(app: AppHandle, courier: CreateCourier) -> Result<Courier, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::insert_courier(&conn, courier).map_err(String::from)
}

#[tauri::command]
pub fn set_courier_active(app: AppHandle, id: i64, active: bool) -> Result<Courier, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::set_courier_active(&conn, id, active).map_err(String::from)
}

#[tauri::command]
pub fn delete_courier(app: AppHandle, id: i64) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::delete_courier(&conn, id).map_err(String::from)
}
