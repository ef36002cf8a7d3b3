/// Authentication utilities
///
/// This module provides the authentication primitives for TaskFlow:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Token generation and validation
/// - [`middleware`]: Bearer-token middleware and the per-request auth context
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HS256-signed, time-bound; validity is signature + expiry
///   only (no revocation list)
/// - **Constant-time Comparison**: password verification uses constant-time
///   operations
///
/// # Example
///
/// ```
/// use taskflow_shared::auth::password::{hash_password, verify_password};
/// use taskflow_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let secret = "secret-key-that-is-at-least-32-bytes";
/// let token = create_token(&Claims::new(1, Duration::hours(24)), secret)?;
/// assert_eq!(validate_token(&token, secret)?.sub, 1);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
