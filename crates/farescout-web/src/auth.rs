//! Request authentication seam.
//!
//! Identity is an external collaborator: the route hands an opaque bearer
//! credential to the configured [`RequestAuthenticator`] and gets back a
//! user id or a rejection. The default implementation accepts everything,
//! standing in for the real identity provider in development and tests.

use std::future::Future;
use std::pin::Pin;

/// Opaque authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRejection;

pub trait RequestAuthenticator: Send + Sync {
    fn authenticate<'a>(
        &'a self,
        bearer: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<UserIdentity, AuthRejection>> + Send + 'a>>;
}

/// Accepts every request as an anonymous user.
pub struct AllowAllAuthenticator;

impl RequestAuthenticator for AllowAllAuthenticator {
    fn authenticate<'a>(
        &'a self,
        _bearer: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<UserIdentity, AuthRejection>> + Send + 'a>> {
        Box::pin(async {
            Ok(UserIdentity {
                user_id: String::from("anonymous"),
            })
        })
    }
}
