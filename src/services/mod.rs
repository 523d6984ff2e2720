pub mod admission;
pub mod auth;
pub mod dates;
pub mod events;
pub mod lifecycle;
pub mod mail;
pub mod payments;
pub mod retention;
