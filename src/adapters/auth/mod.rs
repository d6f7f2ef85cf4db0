//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 shared-secret tokens
//! - `mock` - Fixed token table for tests

mod jwt;
mod mock;

pub use jwt::{JwtClaims, JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
