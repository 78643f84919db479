use rusqlite::{Connection, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tauri::AppHandle;

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn new(app_handle: &AppHandle) -> Result<Self> {
        let app_dir = app_handle
            .path()
            .app_data_dir()
            .expect("Failed to get app data dir");

        std::fs::create_dir_all(&app_dir).expect("Failed to create app data directory");

        let db_path: PathBuf = app_dir.join("marmitas.db");
        Self::open(&db_path)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        init_schema(&conn)
    }
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Marmita size tiers
        CREATE TABLE IF NOT EXISTS marmita_sizes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            price REAL NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Delivery people, soft-deactivated via the active flag
        CREATE TABLE IF NOT EXISTS delivery_persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT,
            active INTEGER NOT NULL DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Sales headers. size_id is the legacy single-size reference.
        CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            size_id INTEGER,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            total_price REAL NOT NULL,
            payment_method TEXT NOT NULL,
            delivery_type TEXT NOT NULL,
            customer_name TEXT,
            customer_phone TEXT,
            delivery_address TEXT,
            notes TEXT,
            delivery_person_id INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (size_id) REFERENCES marmita_sizes(id),
            FOREIGN KEY (delivery_person_id) REFERENCES delivery_persons(id)
        );

        -- Itemized sale lines with a price snapshot at sale time
        CREATE TABLE IF NOT EXISTS sale_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sale_id INTEGER NOT NULL,
            size_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            subtotal REAL NOT NULL,
            FOREIGN KEY (sale_id) REFERENCES sales(id),
            FOREIGN KEY (size_id) REFERENCES marmita_sizes(id)
        );
        ",
    )?;

    // Run migrations for existing databases (pass connection to avoid deadlock)
    migrate_conn(conn)?;
    seed_default_sizes(conn)?;

    Ok(())
}

fn migrate_conn(conn: &Connection) -> Result<()> {
    // Sales recorded by the first release only carried the single-size shape.
    let columns: Vec<String> = conn
        .prepare("PRAGMA table_info(sales)")?
        .query_map([], |row| row.get::<_, String>(1))?
        .filter_map(|r| r.ok())
        .collect();

    if !columns.contains(&"customer_phone".to_string()) {
        conn.execute("ALTER TABLE sales ADD COLUMN customer_phone TEXT", [])?;
    }
    if !columns.contains(&"delivery_address".to_string()) {
        conn.execute("ALTER TABLE sales ADD COLUMN delivery_address TEXT", [])?;
    }
    if !columns.contains(&"notes".to_string()) {
        conn.execute("ALTER TABLE sales ADD COLUMN notes TEXT", [])?;
    }
    if !columns.contains(&"delivery_person_id".to_string()) {
        conn.execute("ALTER TABLE sales ADD COLUMN delivery_person_id INTEGER", [])?;
    }

    Ok(())
}

/// The three classic sizes ship with a fresh database so the operator can
/// sell right away; only the prices need adjusting.
fn seed_default_sizes(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM marmita_sizes", [], |row| row.get(0))?;
    if count == 0 {
        conn.execute_batch(
            "
            INSERT INTO marmita_sizes (name, price) VALUES ('P', 15.0);
            INSERT INTO marmita_sizes (name, price) VALUES ('M', 18.0);
            INSERT INTO marmita_sizes (name, price) VALUES ('G', 22.0);
            ",
        )?;
    }
    Ok(())
}

use tauri::Manager;

pub trait DatabaseExt {
    fn db(&self) -> &Database;
}

impl DatabaseExt for AppHandle {
    fn db(&self) -> &Database {
        self.state::<Database>().inner()
    }
}
