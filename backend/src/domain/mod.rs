//! Domain entities and persistence ports.
//!
//! Entities are plain records owned by the persistence layer; the mapping
//! layer only ever holds a transient reference to the instance it is
//! currently serializing or producing.

pub mod company;
pub mod ports;
pub mod user;

pub use company::Company;
pub use user::User;
