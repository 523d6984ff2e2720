use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    Admin, Booking, BookingStatus, Contact, GalleryImage, Package, PaymentStatus, PricingMode,
    SocialLinks,
};

const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FMT).to_string()
}

fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TS_FMT).unwrap_or_else(|_| Utc::now().naive_utc())
}

fn parse_opt_ts(s: Option<String>) -> Option<NaiveDateTime> {
    s.map(|v| parse_ts(&v))
}

// ── Bookings ──

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, name, email, phone, package, guests, event_date, event_time,
                               special_requests, status, is_paid, payment_status, payment_id,
                               order_id, amount, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            booking.id,
            booking.name,
            booking.email,
            booking.phone,
            booking.package,
            booking.guests,
            booking.event_date,
            booking.event_time,
            booking.special_requests,
            booking.status.as_str(),
            booking.is_paid as i32,
            booking.payment_status.as_str(),
            booking.payment_id,
            booking.order_id,
            booking.amount,
            format_ts(&booking.created_at),
            format_ts(&booking.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("{BOOKING_SELECT} WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn date_is_booked(conn: &Connection, day: &str) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE event_date = ?1",
        params![day],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn get_booked_dates(conn: &Connection) -> anyhow::Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT event_date FROM bookings ORDER BY event_date ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut dates = vec![];
    for row in rows {
        dates.push(row?);
    }
    Ok(dates)
}

pub fn get_all_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!("{BOOKING_SELECT} ORDER BY event_date ASC"))?;
    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn approve_booking(conn: &Connection, id: &str, amount: i64) -> anyhow::Result<bool> {
    let now = format_ts(&Utc::now().naive_utc());
    let count = conn.execute(
        "UPDATE bookings SET status = 'approved', amount = ?2, approved_at = ?3, updated_at = ?3
         WHERE id = ?1",
        params![id, amount, now],
    )?;
    Ok(count > 0)
}

pub fn set_payment_link(conn: &Connection, id: &str, order_id: &str) -> anyhow::Result<()> {
    let now = format_ts(&Utc::now().naive_utc());
    conn.execute(
        "UPDATE bookings SET order_id = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, order_id, now],
    )?;
    Ok(())
}

/// Marks a booking paid. The `is_paid = 0` guard makes webhook redelivery a
/// no-op: the first capture wins and `paid_at` is stamped exactly once.
pub fn mark_paid(conn: &Connection, id: &str, payment_id: &str) -> anyhow::Result<bool> {
    let now = format_ts(&Utc::now().naive_utc());
    let count = conn.execute(
        "UPDATE bookings SET is_paid = 1, payment_status = 'paid', payment_id = ?2,
                             paid_at = ?3, updated_at = ?3
         WHERE id = ?1 AND is_paid = 0",
        params![id, payment_id, now],
    )?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

pub fn delete_past_bookings(conn: &Connection, today: &str) -> anyhow::Result<usize> {
    let count = conn.execute(
        "DELETE FROM bookings WHERE event_date < ?1",
        params![today],
    )?;
    Ok(count)
}

const BOOKING_SELECT: &str =
    "SELECT id, name, email, phone, package, guests, event_date, event_time, special_requests,
            status, is_paid, payment_status, payment_id, order_id, amount, created_at,
            updated_at, approved_at, rejected_at, paid_at
     FROM bookings";

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let status_str: String = row.get(9)?;
    let payment_status_str: String = row.get(11)?;
    let created_at_str: String = row.get(15)?;
    let updated_at_str: String = row.get(16)?;

    Ok(Booking {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        package: row.get(4)?,
        guests: row.get(5)?,
        event_date: row.get(6)?,
        event_time: row.get(7)?,
        special_requests: row.get(8)?,
        status: BookingStatus::parse(&status_str),
        is_paid: row.get::<_, i32>(10)? != 0,
        payment_status: PaymentStatus::parse(&payment_status_str),
        payment_id: row.get(12)?,
        order_id: row.get(13)?,
        amount: row.get(14)?,
        created_at: parse_ts(&created_at_str),
        updated_at: parse_ts(&updated_at_str),
        approved_at: parse_opt_ts(row.get(17)?),
        rejected_at: parse_opt_ts(row.get(18)?),
        paid_at: parse_opt_ts(row.get(19)?),
    })
}

// ── Packages ──

pub fn save_package(conn: &Connection, package: &Package) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO packages (id, name, category, description, pricing_mode, price, price_tiers,
                               inclusions, exclusions, menu_sections, terms, images, created_by,
                               created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT(id) DO UPDATE SET
           name = excluded.name,
           category = excluded.category,
           description = excluded.description,
           pricing_mode = excluded.pricing_mode,
           price = excluded.price,
           price_tiers = excluded.price_tiers,
           inclusions = excluded.inclusions,
           exclusions = excluded.exclusions,
           menu_sections = excluded.menu_sections,
           terms = excluded.terms,
           images = excluded.images,
           updated_at = excluded.updated_at",
        params![
            package.id,
            package.name,
            package.category,
            package.description,
            package.pricing_mode.as_str(),
            package.price,
            serde_json::to_string(&package.price_tiers)?,
            serde_json::to_string(&package.inclusions)?,
            serde_json::to_string(&package.exclusions)?,
            serde_json::to_string(&package.menu_sections)?,
            serde_json::to_string(&package.terms)?,
            serde_json::to_string(&package.images)?,
            package.created_by,
            format_ts(&package.created_at),
            format_ts(&package.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_package_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Package>> {
    let result = conn.query_row(
        &format!("{PACKAGE_SELECT} WHERE id = ?1"),
        params![id],
        |row| Ok(parse_package_row(row)),
    );

    match result {
        Ok(package) => Ok(Some(package?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_packages(conn: &Connection) -> anyhow::Result<Vec<Package>> {
    let mut stmt = conn.prepare(&format!("{PACKAGE_SELECT} ORDER BY created_at ASC"))?;
    let rows = stmt.query_map([], |row| Ok(parse_package_row(row)))?;

    let mut packages = vec![];
    for row in rows {
        packages.push(row??);
    }
    Ok(packages)
}

pub fn delete_package(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM packages WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

const PACKAGE_SELECT: &str =
    "SELECT id, name, category, description, pricing_mode, price, price_tiers, inclusions,
            exclusions, menu_sections, terms, images, created_by, created_at, updated_at
     FROM packages";

fn parse_package_row(row: &rusqlite::Row) -> anyhow::Result<Package> {
    let pricing_mode_str: String = row.get(4)?;
    let price_tiers_json: String = row.get(6)?;
    let inclusions_json: String = row.get(7)?;
    let exclusions_json: String = row.get(8)?;
    let menu_sections_json: String = row.get(9)?;
    let terms_json: String = row.get(10)?;
    let images_json: String = row.get(11)?;
    let created_at_str: String = row.get(13)?;
    let updated_at_str: String = row.get(14)?;

    Ok(Package {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        pricing_mode: PricingMode::parse(&pricing_mode_str),
        price: row.get(5)?,
        price_tiers: serde_json::from_str(&price_tiers_json).unwrap_or_default(),
        inclusions: serde_json::from_str(&inclusions_json).unwrap_or_default(),
        exclusions: serde_json::from_str(&exclusions_json).unwrap_or_default(),
        menu_sections: serde_json::from_str(&menu_sections_json).unwrap_or_default(),
        terms: serde_json::from_str(&terms_json).unwrap_or_default(),
        images: serde_json::from_str(&images_json).unwrap_or_default(),
        created_by: row.get(12)?,
        created_at: parse_ts(&created_at_str),
        updated_at: parse_ts(&updated_at_str),
    })
}

// ── Contact ──

pub fn get_contact(conn: &Connection) -> anyhow::Result<Option<Contact>> {
    let result = conn.query_row(
        "SELECT phone, email, address, map_url, socials, updated_at FROM contact WHERE id = 1",
        [],
        |row| {
            let socials_json: String = row.get(4)?;
            let updated_at_str: String = row.get(5)?;
            Ok(Contact {
                phone: row.get(0)?,
                email: row.get(1)?,
                address: row.get(2)?,
                map_url: row.get(3)?,
                socials: serde_json::from_str::<SocialLinks>(&socials_json).unwrap_or_default(),
                updated_at: parse_ts(&updated_at_str),
            })
        },
    );

    match result {
        Ok(contact) => Ok(Some(contact)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_contact(conn: &Connection, contact: &Contact) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO contact (id, phone, email, address, map_url, socials, updated_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
           phone = excluded.phone,
           email = excluded.email,
           address = excluded.address,
           map_url = excluded.map_url,
           socials = excluded.socials,
           updated_at = excluded.updated_at",
        params![
            contact.phone,
            contact.email,
            contact.address,
            contact.map_url,
            serde_json::to_string(&contact.socials)?,
            format_ts(&contact.updated_at),
        ],
    )?;
    Ok(())
}

// ── Gallery ──

pub fn insert_gallery_image(conn: &Connection, image: &GalleryImage) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO gallery_images (id, url, caption, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            image.id,
            image.url,
            image.caption,
            image.category,
            format_ts(&image.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_gallery_images(conn: &Connection) -> anyhow::Result<Vec<GalleryImage>> {
    let mut stmt = conn.prepare(
        "SELECT id, url, caption, category, created_at
         FROM gallery_images ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        let created_at_str: String = row.get(4)?;
        Ok(GalleryImage {
            id: row.get(0)?,
            url: row.get(1)?,
            caption: row.get(2)?,
            category: row.get(3)?,
            created_at: parse_ts(&created_at_str),
        })
    })?;

    let mut images = vec![];
    for row in rows {
        images.push(row?);
    }
    Ok(images)
}

pub fn delete_gallery_image(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM gallery_images WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

// ── Admins ──

pub fn get_admin_by_email(conn: &Connection, email: &str) -> anyhow::Result<Option<Admin>> {
    get_admin_where(conn, "email = ?1", email)
}

pub fn get_admin_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Admin>> {
    get_admin_where(conn, "id = ?1", id)
}

fn get_admin_where(conn: &Connection, clause: &str, value: &str) -> anyhow::Result<Option<Admin>> {
    let sql = format!(
        "SELECT id, email, name, password_hash, created_at, updated_at FROM admins WHERE {clause}"
    );
    let result = conn.query_row(&sql, params![value], |row| {
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;
        Ok(Admin {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            password_hash: row.get(3)?,
            created_at: parse_ts(&created_at_str),
            updated_at: parse_ts(&updated_at_str),
        })
    });

    match result {
        Ok(admin) => Ok(Some(admin)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn insert_admin(conn: &Connection, admin: &Admin) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO admins (id, email, name, password_hash, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            admin.id,
            admin.email,
            admin.name,
            admin.password_hash,
            format_ts(&admin.created_at),
            format_ts(&admin.updated_at),
        ],
    )?;
    Ok(())
}

pub fn update_admin(conn: &Connection, admin: &Admin) -> anyhow::Result<()> {
    let now = format_ts(&Utc::now().naive_utc());
    conn.execute(
        "UPDATE admins SET email = ?2, name = ?3, password_hash = ?4, updated_at = ?5
         WHERE id = ?1",
        params![admin.id, admin.email, admin.name, admin.password_hash, now],
    )?;
    Ok(())
}

pub fn count_admins(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))?;
    Ok(count)
}
