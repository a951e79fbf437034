use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    Save(String),
    FindByUsername(String),
    FindAll,
    Update(String),
    Delete(String),
}

/// Delegates to another repo and records every call it forwards.
///
/// Used to verify which records an operation persists, and how often, without
/// caring about the storage behind it.
pub struct SpyAccountRepo {
    inner: Arc<dyn AccountRepo>,
    calls: Mutex<Vec<RepoCall>>,
}

impl SpyAccountRepo {
    pub fn new(inner: Arc<dyn AccountRepo>) -> Self {
        SpyAccountRepo {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, call: &RepoCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn saves(&self) -> usize {
        self.count_matching(|c| matches!(c, RepoCall::Save(_)))
    }

    pub fn updates(&self) -> usize {
        self.count_matching(|c| matches!(c, RepoCall::Update(_)))
    }

    pub fn updates_of(&self, username: &str) -> usize {
        self.count(&RepoCall::Update(username.to_owned()))
    }

    pub fn deletes(&self) -> usize {
        self.count_matching(|c| matches!(c, RepoCall::Delete(_)))
    }

    pub fn deletes_of(&self, username: &str) -> usize {
        self.count(&RepoCall::Delete(username.to_owned()))
    }

    pub fn reset(&self) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn count_matching(&self, pred: impl Fn(&RepoCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: RepoCall) {
        tracing::trace!(?call, "account repo call");
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

#[async_trait::async_trait]
impl AccountRepo for SpyAccountRepo {
    async fn save(&self, account: &Account) {
        self.record(RepoCall::Save(account.username().to_owned()));
        self.inner.save(account).await
    }

    async fn find_by_username(&self, username: &str) -> Option<Account> {
        self.record(RepoCall::FindByUsername(username.to_owned()));
        self.inner.find_by_username(username).await
    }

    async fn find_all(&self) -> Vec<Account> {
        self.record(RepoCall::FindAll);
        self.inner.find_all().await
    }

    async fn update(&self, account: &Account) {
        self.record(RepoCall::Update(account.username().to_owned()));
        self.inner.update(account).await
    }

    async fn delete(&self, account: &Account) {
        self.record(RepoCall::Delete(account.username().to_owned()));
        self.inner.delete(account).await
    }
}
