//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Signed bearer tokens (JWT)
//! - Random tokens and identifiers
//! - Client identification from request headers
//! - Outbound email and object storage seams
//! - QR code rendering

pub mod client;
pub mod crypto;
pub mod mail;
pub mod password;
pub mod qr;
pub mod storage;
pub mod token;
