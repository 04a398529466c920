pub mod collections;
pub mod id;
pub mod index;
pub mod profile;
pub mod user;

pub use collections::*;
pub use id::*;
pub use index::*;
pub use profile::*;
pub use user::*;
