pub mod argon2;
pub mod errors;
pub mod generator;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use generator::PasswordGenerator;
pub use generator::PasswordStrength;
