pub mod common;
pub mod entities;
pub mod requests;
pub mod response;

pub use common::*;
pub use entities::*;
pub use requests::*;
pub use response::*;
