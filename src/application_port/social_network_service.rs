use crate::domain_model::Account;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SocialError {
    #[error("no account is logged in")]
    NotLoggedIn,
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("account already exists: {0}")]
    AccountExists(String),
}

/// Member-facing operations of the network.
///
/// Everything except `join`, `login` and `logout` acts on behalf of the
/// logged-in account and fails with [`SocialError::NotLoggedIn`] without one.
/// Failing calls never leave partial changes behind.
#[async_trait::async_trait]
pub trait SocialNetworkService: Send + Sync {
    async fn join(&self, username: &str) -> Result<Account, SocialError>;
    async fn login(&self, username: &str) -> Result<Account, SocialError>;
    async fn logout(&self);
    async fn current_account(&self) -> Result<Account, SocialError>;

    async fn has_member(&self, username: &str) -> Result<bool, SocialError>;
    async fn list_members(&self) -> Result<BTreeSet<String>, SocialError>;

    async fn send_friendship_to(&self, username: &str) -> Result<(), SocialError>;
    async fn send_friendship_cancellation_to(&self, username: &str) -> Result<(), SocialError>;
    async fn accept_friendship_from(&self, username: &str) -> Result<(), SocialError>;
    async fn reject_friendship_from(&self, username: &str) -> Result<(), SocialError>;
    async fn accept_all_friendships(&self) -> Result<(), SocialError>;
    async fn reject_all_friendships(&self) -> Result<(), SocialError>;
    async fn auto_accept_friendships(&self) -> Result<(), SocialError>;
    async fn cancel_auto_accept_friendships(&self) -> Result<(), SocialError>;

    async fn block(&self, username: &str) -> Result<(), SocialError>;
    async fn unblock(&self, username: &str) -> Result<(), SocialError>;

    /// Removes the logged-in account for good and returns it with its
    /// relationship sets cleared.
    async fn leave(&self) -> Result<Account, SocialError>;

    /// Friends of friends who are neither the caller, nor already friends,
    /// nor on either side of a block with the caller.
    async fn recommend_friends(&self) -> Result<BTreeSet<String>, SocialError>;
}
