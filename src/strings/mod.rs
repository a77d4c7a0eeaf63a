//! Localized message tables. Only the en-ZA table exists today.

pub mod en_za;
