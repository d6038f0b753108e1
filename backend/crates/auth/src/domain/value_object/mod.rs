//! Value Object Module

pub mod email;
pub mod person_password;
pub mod person_role;
pub mod qr_code;
pub mod verification_token;
