//! Authentication for the LUXE storefront.
//!
//! Holds the access token returned by the login and signup endpoints,
//! persists it with cookie-like attributes, and validates the forms that
//! produce it. Token authenticity is the server's concern.

mod error;
mod forms;
mod response;
mod token;

pub use error::{AuthError, DEFAULT_REJECTION};
pub use forms::{is_valid_email, FormErrors, LoginForm, SignupForm, MIN_PASSWORD_LEN};
pub use response::AuthResponse;
pub use token::{
    token_lifetime, AccessToken, AuthState, TokenHolder, DEFAULT_EXPIRY_DAYS, TOKEN_KEY,
};
