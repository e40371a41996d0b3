pub mod argon2;
pub mod errors;
pub mod hasher;

pub use argon2::Argon2Hasher;
pub use errors::PasswordError;
pub use hasher::PasswordHasher;
