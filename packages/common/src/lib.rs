pub mod error;
pub mod item;
pub mod key;
pub mod result;
pub mod schema;

pub use error::*;
pub use item::*;
pub use key::*;
pub use result::*;
pub use schema::*;
