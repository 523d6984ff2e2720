use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, LiveEvent, PaymentStatus};
use crate::services::{dates, events};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub guests: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub special_requests: Option<String>,
}

/// Public booking intake. Validates, checks the date for conflicts, persists
/// a pending booking and returns it with the refreshed booked-date list.
pub async fn submit_booking(
    state: &Arc<AppState>,
    req: BookingRequest,
) -> Result<(Booking, Vec<String>), AppError> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_string();
    let phone = req.phone.trim().to_string();
    let package = req.package.trim().to_string();
    let time = req.time.trim().to_string();
    let special_requests = req
        .special_requests
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if name.is_empty() || email.is_empty() || phone.is_empty() || package.is_empty() || time.is_empty()
    {
        return Err(AppError::Validation(
            "name, email, phone, package and time are required".to_string(),
        ));
    }
    if req.guests < 1 {
        return Err(AppError::Validation(
            "guests must be at least 1".to_string(),
        ));
    }

    let day = dates::normalize_day(&req.date)?;

    let booking = {
        let db = state.db.lock().unwrap();

        if queries::date_is_booked(&db, &day)? {
            return Err(AppError::Conflict(format!("{day} is already booked")));
        }

        let now = Utc::now().naive_utc();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            package,
            guests: req.guests,
            event_date: day.clone(),
            event_time: time,
            special_requests,
            status: BookingStatus::Pending,
            is_paid: false,
            payment_status: PaymentStatus::Unpaid,
            payment_id: None,
            order_id: None,
            amount: None,
            created_at: now,
            updated_at: now,
            approved_at: None,
            rejected_at: None,
            paid_at: None,
        };

        if let Err(e) = queries::create_booking(&db, &booking) {
            // Two submissions can pass the pre-check concurrently; the unique
            // date index is the final arbiter and its violation is the same
            // conflict the pre-check reports.
            if is_unique_violation(&e) {
                return Err(AppError::Conflict(format!("{day} is already booked")));
            }
            return Err(e.into());
        }

        booking
    };

    notify_new_booking(state, &booking).await;
    events::publish(
        state,
        LiveEvent::new(
            "booking_requested",
            format!("new booking request for {day}"),
        )
        .with_booking(&booking.id, &day),
    );

    let booked_dates = {
        let db = state.db.lock().unwrap();
        queries::get_booked_dates(&db)?
    };

    Ok((booking, booked_dates))
}

pub fn booked_dates(state: &Arc<AppState>) -> Result<Vec<String>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(queries::get_booked_dates(&db)?)
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

async fn notify_new_booking(state: &Arc<AppState>, booking: &Booking) {
    if state.config.notify_email.is_empty() {
        return;
    }

    let subject = format!("New booking request for {}", booking.event_date);
    let body = format!(
        "A new booking request was submitted.\n\n\
         Name: {}\nEmail: {}\nPhone: {}\nPackage: {}\nGuests: {}\n\
         Date: {}\nTime: {}\nSpecial requests: {}\n",
        booking.name,
        booking.email,
        booking.phone,
        booking.package,
        booking.guests,
        booking.event_date,
        booking.event_time,
        booking.special_requests.as_deref().unwrap_or("-"),
    );

    if let Err(e) = state
        .mailer
        .send(&state.config.notify_email, &subject, &body)
        .await
    {
        tracing::error!(error = %e, "failed to send booking notification");
    }
}
