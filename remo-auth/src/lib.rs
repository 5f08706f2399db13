pub mod basic;
pub mod middleware;
pub mod token;

pub use basic::basic_auth_router;
pub use middleware::{
    attach, attach_identity, has_roles, is_authenticated, owns, owns_or_has_roles, AuthAccount,
    AuthStore, JwtAuth,
};
pub use token::{header_token, sign_token, verify_token};

pub mod prelude {
    pub use crate::basic::basic_auth_router;
    pub use crate::middleware::{AuthAccount, AuthStore, JwtAuth};
    pub use crate::token::{header_token, sign_token, verify_token};
}
