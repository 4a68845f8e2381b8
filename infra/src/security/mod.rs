//! Security module - password hashing

pub mod bcrypt_encoder;

pub use bcrypt_encoder::BcryptPasswordEncoder;
