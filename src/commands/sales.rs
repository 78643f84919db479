use crate::cart::Cart;
use crate::db::DatabaseExt;
use crate::errors::AppError;
use crate::models::{NewSale, Sale, SaleWithItems};
use crate::store::{self, SaleDetails};
use tauri::AppHandle;

/// Submit a new sale assembled from the cart lines in the payload. The lines
/// go through the same cart rules the form enforces, so an invalid payload
/// (empty, zero quantities, more than three distinct sizes) is rejected
/// before anything is written.
#[tauri::command]
pub fn create_sale(app: AppHandle, sale: NewSale) -> Result<SaleWithItems, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let mut cart = Cart::new();
    for item in &sale.items {
        let size = store::get_size(&conn, item.size_id)?;
        if !cart.add(&size, item.quantity) {
            let reason = if item.quantity < 1 {
                "quantidade deve ser pelo menos 1"
            } else {
                "máximo de 3 tamanhos diferentes por venda"
            };
            return Err(AppError::Constraint(reason.into()).into());
        }
    }

    let details = SaleDetails {
        payment_method: sale.payment_method,
        delivery_type: sale.delivery_type,
        courier_id: sale.courier_id,
        customer_name: sale.customer_name,
        customer_phone: sale.customer_phone,
        delivery_address: sale.delivery_address,
        notes: sale.notes,
    };

    store::insert_sale(&conn, &cart, &details).map_err(String::from)
}

#[tauri::command]
pub fn get_today_sales(app: AppHandle) -> Result<Vec<Sale>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::sales_for_today(&conn).map_err(String::from)
}

#[tauri::command]
pub fn delete_sale(app: AppHandle, id: i64) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    store::delete_sale(&conn, id).map_err(String::from)
}
