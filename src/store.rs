//! Record-store layer over the SQLite connection. All SQL lives here; the
//! Tauri commands lock the connection and delegate.

use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use crate::cart::Cart;
use crate::errors::AppError;
use crate::models::{
    Courier, CreateCourier, CreateSize, DeliveryType, PaymentMethod, Sale, SaleItem,
    SaleWithItems, Size,
};

// ===== Sizes =====

pub fn list_sizes(conn: &Connection) -> Result<Vec<Size>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, price, created_at FROM marmita_sizes ORDER BY price ASC",
    )?;

    let sizes = stmt
        .query_map([], |row| {
            Ok(Size {
                id: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sizes)
}

pub fn get_size(conn: &Connection, id: i64) -> Result<Size, AppError> {
    conn.query_row(
        "SELECT id, name, price, created_at FROM marmita_sizes WHERE id = ?1",
        [id],
        |row| {
            Ok(Size {
                id: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .map_err(|_| AppError::NotFound(format!("tamanho {id}")))
}

pub fn insert_size(conn: &Connection, size: CreateSize) -> Result<Size, AppError> {
    let name = size.name.trim();
    if name.is_empty() {
        return Err(AppError::Constraint("nome do tamanho é obrigatório".into()));
    }
    if !size.price.is_finite() || size.price < 0.0 {
        return Err(AppError::Constraint("preço não pode ser negativo".into()));
    }

    conn.execute(
        "INSERT INTO marmita_sizes (name, price) VALUES (?1, ?2)",
        rusqlite::params![name, size.price],
    )?;

    get_size(conn, conn.last_insert_rowid())
}

pub fn update_size_price(conn: &Connection, id: i64, price: f64) -> Result<Size, AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Constraint("preço não pode ser negativo".into()));
    }

    conn.execute(
        "UPDATE marmita_sizes SET price = ?1 WHERE id = ?2",
        rusqlite::params![price, id],
    )?;

    if conn.changes() == 0 {
        return Err(AppError::NotFound(format!("tamanho {id}")));
    }

    get_size(conn, id)
}

// ===== Couriers =====

fn map_courier_row(row: &Row) -> rusqlite::Result<Courier> {
    Ok(Courier {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        active: row.get::<_, i64>(3)? != 0,
        created_at: row.get(4)?,
    })
}

pub fn list_couriers(conn: &Connection) -> Result<Vec<Courier>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone, active, created_at FROM delivery_persons ORDER BY name ASC",
    )?;

    let couriers = stmt
        .query_map([], |row| map_courier_row(row))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(couriers)
}

/// Only active couriers may be attached to new deliveries.
pub fn active_couriers(conn: &Connection) -> Result<Vec<Courier>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone, active, created_at FROM delivery_persons
         WHERE active = 1 ORDER BY name ASC",
    )?;

    let couriers = stmt
        .query_map([], |row| map_courier_row(row))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(couriers)
}

pub fn get_courier(conn: &Connection, id: i64) -> Result<Courier, AppError> {
    conn.query_row(
        "SELECT id, name, phone, active, created_at FROM delivery_persons WHERE id = ?1",
        [id],
        |row| map_courier_row(row),
    )
    .map_err(|_| AppError::NotFound(format!("entregador {id}")))
}

pub fn insert_courier(conn: &Connection, courier: CreateCourier) -> Result<Courier, AppError> {
    let name = courier.name.trim();
    if name.is_empty() {
        return Err(AppError::Constraint("nome do entregador é obrigatório".into()));
    }

    let phone = courier
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    conn.execute(
        "INSERT INTO delivery_persons (name, phone) VALUES (?1, ?2)",
        rusqlite::params![name, phone],
    )?;

    get_courier(conn, conn.last_insert_rowid())
}

pub fn set_courier_active(conn: &Connection, id: i64, active: bool) -> Result<Courier, AppError> {
    conn.execute(
        "UPDATE delivery_persons SET active = ?1 WHERE id = ?2",
        rusqlite::params![active as i64, id],
    )?;

    if conn.changes() == 0 {
        return Err(AppError::NotFound(format!("entregador {id}")));
    }

    get_courier(conn, id)
}

/// Hard delete, distinct from deactivation. Deleting an absent id is a no-op
/// success; callers drop the id from their lists unconditionally.
pub fn delete_courier(conn: &Connection, id: i64) -> Result<(), AppError> {
    conn.execute("DELETE FROM delivery_persons WHERE id = ?1", [id])?;
    Ok(())
}

// ===== Sales =====

#[derive(Debug)]
pub struct SaleDetails {
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub courier_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// created_at is stored in UTC; it leaves the store converted to localtime so
// day bucketing and CSV dates agree with the localtime day filters below.
const SALE_SELECT: &str = "
    SELECT s.id, s.size_id, ms.name, s.quantity, s.unit_price, s.total_price,
           s.payment_method, s.delivery_type, s.customer_name, s.customer_phone,
           s.delivery_address, s.notes, s.delivery_person_id, dp.name,
           datetime(s.created_at, 'localtime')
    FROM sales s
    LEFT JOIN marmita_sizes ms ON s.size_id = ms.id
    LEFT JOIN delivery_persons dp ON s.delivery_person_id = dp.id";

fn map_sale_row(row: &Row) -> rusqlite::Result<Sale> {
    Ok(Sale {
        id: row.get(0)?,
        size_id: row.get(1)?,
        size_name: row.get(2)?,
        quantity: row.get(3)?,
        unit_price: row.get(4)?,
        total_price: row.get(5)?,
        payment_method: row.get(6)?,
        delivery_type: row.get(7)?,
        customer_name: row.get(8)?,
        customer_phone: row.get(9)?,
        delivery_address: row.get(10)?,
        notes: row.get(11)?,
        courier_id: row.get(12)?,
        courier_name: row.get(13)?,
        created_at: row.get(14)?,
    })
}

/// Submit the assembled cart as one sale.
///
/// The header insert is the sole gate: if it fails, nothing is recorded and
/// the error propagates. The line-item batch that follows is best-effort.
/// Databases predating the sale_items table must still record sales, so a
/// "no such table" failure is swallowed; anything else is logged but does not
/// block confirmation either.
pub fn insert_sale(
    conn: &Connection,
    cart: &Cart,
    details: &SaleDetails,
) -> Result<SaleWithItems, AppError> {
    if cart.is_empty() {
        return Err(AppError::Constraint("a venda precisa de pelo menos um item".into()));
    }

    let is_delivery = details.delivery_type == DeliveryType::Entrega;
    let courier_id = if is_delivery { details.courier_id } else { None };
    let delivery_address = if is_delivery {
        none_if_blank(&details.delivery_address)
    } else {
        None
    };

    conn.execute(
        "INSERT INTO sales (size_id, quantity, unit_price, total_price, payment_method,
                            delivery_type, customer_name, customer_phone, delivery_address,
                            notes, delivery_person_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            cart.first_size_id(),
            cart.total_quantity(),
            cart.unit_price(),
            cart.total(),
            details.payment_method,
            details.delivery_type,
            none_if_blank(&details.customer_name),
            none_if_blank(&details.customer_phone),
            delivery_address,
            none_if_blank(&details.notes),
            courier_id,
        ],
    )?;

    let sale_id = conn.last_insert_rowid();

    // One statement for all lines: either every item lands or none does,
    // so recorded item sets always sum back to the sale total.
    let rows = vec!["(?, ?, ?, ?, ?)"; cart.lines().len()].join(", ");
    let mut values: Vec<Value> = Vec::with_capacity(cart.lines().len() * 5);
    for line in cart.lines() {
        values.push(sale_id.into());
        values.push(line.size.id.into());
        values.push(line.quantity.into());
        values.push(line.size.price.into());
        values.push(line.subtotal().into());
    }

    let result = conn.execute(
        &format!(
            "INSERT INTO sale_items (sale_id, size_id, quantity, unit_price, subtotal)
             VALUES {rows}"
        ),
        rusqlite::params_from_iter(values),
    );

    if let Err(e) = result {
        if e.to_string().contains("no such table") {
            tracing::debug!(sale_id, "sale_items table not provisioned, skipping lines");
        } else {
            tracing::error!(sale_id, error = %e, "failed to record sale items");
        }
    }

    let sale = get_sale(conn, sale_id)?;
    let items = sale_items(conn, sale_id).unwrap_or_default();

    Ok(SaleWithItems { sale, items })
}

pub fn get_sale(conn: &Connection, id: i64) -> Result<Sale, AppError> {
    conn.query_row(&format!("{SALE_SELECT} WHERE s.id = ?1"), [id], |row| {
        map_sale_row(row)
    })
    .map_err(|_| AppError::NotFound(format!("venda {id}")))
}

pub fn sale_items(conn: &Connection, sale_id: i64) -> Result<Vec<SaleItem>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT si.id, si.sale_id, si.size_id, ms.name, si.quantity, si.unit_price, si.subtotal
         FROM sale_items si
         LEFT JOIN marmita_sizes ms ON si.size_id = ms.id
         WHERE si.sale_id = ?1",
    )?;

    let items = stmt
        .query_map([sale_id], |row| {
            Ok(SaleItem {
                id: row.get(0)?,
                sale_id: row.get(1)?,
                size_id: row.get(2)?,
                size_name: row.get(3)?,
                quantity: row.get(4)?,
                unit_price: row.get(5)?,
                subtotal: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(items)
}

pub fn sales_for_today(conn: &Connection) -> Result<Vec<Sale>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "{SALE_SELECT}
         WHERE date(s.created_at, 'localtime') = date('now', 'localtime')
         ORDER BY s.created_at DESC"
    ))?;

    let sales = stmt
        .query_map([], |row| map_sale_row(row))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sales)
}

/// Sales whose local calendar day falls within the inclusive date range.
/// Dates are `YYYY-MM-DD` strings from the period filter.
pub fn sales_between(
    conn: &Connection,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<Sale>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "{SALE_SELECT}
         WHERE date(s.created_at, 'localtime') BETWEEN ?1 AND ?2
         ORDER BY s.created_at DESC"
    ))?;

    let sales = stmt
        .query_map([start_date, end_date], |row| map_sale_row(row))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sales)
}

/// Removes the sale and its items. Absent ids are a no-op success.
pub fn delete_sale(conn: &Connection, id: i64) -> Result<(), AppError> {
    conn.execute("DELETE FROM sale_items WHERE sale_id = ?1", [id])?;
    conn.execute("DELETE FROM sales WHERE id = ?1", [id])?;
    Ok(())
}
