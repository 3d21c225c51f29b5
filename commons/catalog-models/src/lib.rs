pub mod enums;
pub mod product;
pub mod user;

pub use enums::*;
pub use product::*;
pub use user::*;
