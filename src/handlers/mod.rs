pub mod admin;
pub mod auth;
pub mod bookings;
pub mod contact;
pub mod events;
pub mod gallery;
pub mod health;
pub mod packages;
pub mod webhook;
