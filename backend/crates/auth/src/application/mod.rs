//! Application Layer
//!
//! Use cases and application services.

pub mod admin_users;
pub mod config;
pub mod email_verification;
pub mod login;
pub mod password_reset;
pub mod register;
pub mod seller_login;
pub mod seller_profile;

// Re-exports
pub use admin_users::{ManageUsersUseCase, UpdateUserInput};
pub use config::AuthConfig;
pub use email_verification::{EmailVerificationUseCase, SetPasswordInput, SetPasswordOutput};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use password_reset::PasswordResetUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use seller_login::{SellerLoginInput, SellerLoginOutput, SellerLoginUseCase};
pub use seller_profile::SellerProfileUseCase;
