use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS subscribers (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'inactive',
            max_capital REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS holdings (
            subscriber_id TEXT NOT NULL,
            symbol TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            avg_price REAL NOT NULL,
            PRIMARY KEY (subscriber_id, symbol)
        );

        CREATE TABLE IF NOT EXISTS execution_records (
            id TEXT PRIMARY KEY,
            batch_id TEXT NOT NULL,
            subscriber_id TEXT NOT NULL,
            subscriber_email TEXT NOT NULL,
            symbol TEXT NOT NULL,
            side TEXT NOT NULL,
            order_type TEXT NOT NULL,
            product_type TEXT NOT NULL,
            requested_quantity INTEGER NOT NULL,
            executed_quantity INTEGER NOT NULL,
            reference_price REAL NOT NULL,
            outcome TEXT NOT NULL,
            failure_reason TEXT,
            broker_response TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_subscribers_status ON subscribers(status);
        CREATE INDEX IF NOT EXISTS idx_records_batch ON execution_records(batch_id);
        CREATE INDEX IF NOT EXISTS idx_records_subscriber ON execution_records(subscriber_id);
        CREATE INDEX IF NOT EXISTS idx_records_created ON execution_records(created_at);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
