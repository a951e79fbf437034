use crate::domain_model::Account;

/// Storage for account records, keyed by username.
///
/// Implementations store and hand out independent copies: mutating an
/// `Account` after `save`/`update`, or mutating a value returned by a lookup,
/// must never change what is stored.
#[async_trait::async_trait]
pub trait AccountRepo: Send + Sync {
    /// Insert, or overwrite the record with the same username.
    async fn save(&self, account: &Account);

    async fn find_by_username(&self, username: &str) -> Option<Account>;

    async fn find_all(&self) -> Vec<Account>;

    /// Replace the stored record for `account.username()`.
    async fn update(&self, account: &Account);

    async fn delete(&self, account: &Account);
}
