pub mod admin;
pub mod booking;
pub mod contact;
pub mod event;
pub mod gallery;
pub mod package;

pub use admin::Admin;
pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use contact::{Contact, SocialLinks};
pub use event::LiveEvent;
pub use gallery::GalleryImage;
pub use package::{MenuSection, Package, PriceTier, PricingMode};
