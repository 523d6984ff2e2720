use std::sync::Arc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, LiveEvent};
use crate::services::events;
use crate::services::payments::{PaymentCustomer, PaymentLink};
use crate::state::AppState;

pub struct ApprovalOutcome {
    pub booking: Booking,
    pub payment_link: PaymentLink,
}

/// Approves a pending booking and mints a payment link for it.
///
/// The status transition commits before the gateway call: a gateway failure
/// leaves the booking approved with no link, and the admin retries the
/// approval to send a fresh one.
pub async fn approve(
    state: &Arc<AppState>,
    id: &str,
    amount: Option<i64>,
) -> Result<ApprovalOutcome, AppError> {
    let amount = match amount {
        Some(a) if a > 0 => a,
        _ => {
            return Err(AppError::Validation(
                "amount must be a positive number".to_string(),
            ))
        }
    };

    let booking = {
        let db = state.db.lock().unwrap();
        let booking = queries::get_booking_by_id(&db, id)?
            .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;
        queries::approve_booking(&db, id, amount)?;
        booking
    };

    let customer = PaymentCustomer {
        name: booking.name.clone(),
        email: booking.email.clone(),
        phone: booking.phone.clone(),
    };
    let link = match state
        .payments
        .create_payment_link(id, amount, &customer)
        .await
    {
        Ok(link) => link,
        Err(e) => {
            tracing::error!(error = %e, booking_id = %id, "payment link creation failed");
            return Err(AppError::Gateway(e.to_string()));
        }
    };

    {
        let db = state.db.lock().unwrap();
        queries::set_payment_link(&db, id, &link.id)?;
    }

    let subject = format!("Your booking for {} is approved", booking.event_date);
    let body = format!(
        "Hi {},\n\nYour booking for {} at {} has been approved.\n\
         Please complete the payment here: {}\n",
        booking.name, booking.event_date, booking.event_time, link.short_url,
    );
    if let Err(e) = state.mailer.send(&booking.email, &subject, &body).await {
        tracing::error!(error = %e, booking_id = %id, "failed to email payment link");
    }

    events::publish(
        state,
        LiveEvent::new(
            "booking_approved",
            format!("booking for {} approved", booking.event_date),
        )
        .with_booking(id, &booking.event_date),
    );

    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, id)?
            .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?
    };

    Ok(ApprovalOutcome {
        booking,
        payment_link: link,
    })
}

/// Rejects a booking by deleting it. Rejection is destructive: the contact
/// fields are captured for the rejection email before the row goes away.
pub async fn reject(state: &Arc<AppState>, id: &str) -> Result<String, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        let booking = queries::get_booking_by_id(&db, id)?
            .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;
        queries::delete_booking(&db, id)?;
        booking
    };

    let subject = format!("Your booking request for {}", booking.event_date);
    let body = format!(
        "Hi {},\n\nUnfortunately we cannot accommodate your booking for {}.\n\
         Please get in touch to find another date.\n",
        booking.name, booking.event_date,
    );
    if let Err(e) = state.mailer.send(&booking.email, &subject, &body).await {
        tracing::error!(error = %e, booking_id = %id, "failed to send rejection email");
    }

    events::publish(
        state,
        LiveEvent::new(
            "booking_rejected",
            format!("booking for {} rejected", booking.event_date),
        )
        .with_booking(id, &booking.event_date),
    );

    Ok(booking.id)
}

/// A verified payment-captured webhook event.
#[derive(Debug)]
pub struct PaymentCapture {
    pub booking_id: Option<String>,
    pub payment_id: String,
}

/// Applies a payment confirmation. Unknown or missing booking ids are
/// acknowledged no-ops so the provider's retry logic is never poisoned;
/// redelivery for an already-paid booking changes nothing.
pub async fn confirm_payment(
    state: &Arc<AppState>,
    capture: PaymentCapture,
) -> Result<Option<Booking>, AppError> {
    let Some(booking_id) = capture.booking_id else {
        tracing::warn!("payment capture without booking correlation, ignoring");
        return Ok(None);
    };

    let (changed, booking) = {
        let db = state.db.lock().unwrap();
        if queries::get_booking_by_id(&db, &booking_id)?.is_none() {
            tracing::info!(booking_id = %booking_id, "payment capture for unknown booking, ignoring");
            return Ok(None);
        }
        let changed = queries::mark_paid(&db, &booking_id, &capture.payment_id)?;
        let booking = queries::get_booking_by_id(&db, &booking_id)?;
        (changed, booking)
    };

    if changed {
        if let Some(b) = &booking {
            tracing::info!(booking_id = %booking_id, "payment captured");
            events::publish(
                state,
                LiveEvent::new(
                    "payment_captured",
                    format!("payment received for {}", b.event_date),
                )
                .with_booking(&booking_id, &b.event_date),
            );
        }
    }

    Ok(booking)
}
