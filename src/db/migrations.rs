use anyhow::Context;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS bookings (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            package TEXT NOT NULL,
            guests INTEGER NOT NULL CHECK (guests >= 1),
            event_date TEXT NOT NULL,
            event_time TEXT NOT NULL,
            special_requests TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            is_paid INTEGER NOT NULL DEFAULT 0,
            payment_status TEXT NOT NULL DEFAULT 'unpaid',
            payment_id TEXT,
            order_id TEXT,
            amount INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            approved_at TEXT,
            rejected_at TEXT,
            paid_at TEXT,
            UNIQUE (email, event_date, event_time)
        );

        CREATE TABLE IF NOT EXISTS packages (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            pricing_mode TEXT NOT NULL DEFAULT 'fixed',
            price INTEGER,
            price_tiers TEXT NOT NULL DEFAULT '[]',
            inclusions TEXT NOT NULL DEFAULT '[]',
            exclusions TEXT NOT NULL DEFAULT '[]',
            menu_sections TEXT NOT NULL DEFAULT '[]',
            terms TEXT NOT NULL DEFAULT '[]',
            images TEXT NOT NULL DEFAULT '[]',
            created_by TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contact (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            phone TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            map_url TEXT,
            socials TEXT NOT NULL DEFAULT '{}',
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS gallery_images (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            caption TEXT,
            category TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS admins (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL DEFAULT '',
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
    .context("failed to create tables")?;

    // One booking per calendar date. Concurrent submissions that pass the
    // admission pre-check land here; this index is the final arbiter.
    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_event_date
             ON bookings (event_date);",
    )
    .context("failed to create booking date index")?;

    Ok(())
}
