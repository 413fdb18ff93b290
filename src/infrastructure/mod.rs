pub mod clock;
pub mod notifications;
pub mod random;
pub mod summarizers;
