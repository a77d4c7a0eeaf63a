pub mod admin;
pub mod respond;
pub mod user;
pub mod validate;

pub use admin::*;
pub use respond::*;
pub use user::*;
pub use validate::*;
