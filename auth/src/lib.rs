//! Authentication core for the product-catalog service.
//!
//! Provides the building blocks the API gates are made of:
//! - Password hashing and verification (Argon2id, salted PHC strings)
//! - Signed, time-bound identity tokens (JWT, HS256)
//! - An [`Authenticator`] coordinating both for login flows
//!
//! The signing secret is injected at construction time and never read from
//! ambient state, so each test can run with its own secret.
//!
//! # Examples
//!
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify the password and issue a token
//! let claims = Claims::for_identity("user123", "customer", 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Every protected request: validate the presented token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! assert_eq!(decoded.role, "customer");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
