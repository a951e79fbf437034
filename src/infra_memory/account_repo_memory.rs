use crate::domain_model::*;
use crate::domain_port::*;
use anyhow::{Context, Result, anyhow};
use dashmap::DashMap;
use std::path::Path;

/// In-process account store. Values are cloned on the way in and on the way
/// out, so nothing outside the map ever aliases a stored record.
#[derive(Debug, Default)]
pub struct MemoryAccountRepo {
    accounts: DashMap<String, Account>,
}

impl MemoryAccountRepo {
    pub fn new() -> Self {
        MemoryAccountRepo {
            accounts: DashMap::new(),
        }
    }

    /// Builds a store preloaded from a JSON array of accounts.
    pub fn from_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read account snapshot {}", path.display()))?;
        let accounts: Vec<Account> = serde_json::from_str(&raw)
            .with_context(|| format!("parse account snapshot {}", path.display()))?;

        let repo = Self::new();
        for account in accounts {
            if account.username().trim().is_empty() {
                return Err(anyhow!("account snapshot contains an empty username"));
            }
            if repo.accounts.contains_key(account.username()) {
                return Err(anyhow!(
                    "account snapshot contains {} twice",
                    account.username()
                ));
            }
            repo.accounts.insert(account.username().to_owned(), account);
        }
        tracing::info!(count = repo.accounts.len(), "account snapshot loaded");
        Ok(repo)
    }
}

#[async_trait::async_trait]
impl AccountRepo for MemoryAccountRepo {
    async fn save(&self, account: &Account) {
        self.accounts
            .insert(account.username().to_owned(), account.clone());
    }

    async fn find_by_username(&self, username: &str) -> Option<Account> {
        self.accounts.get(username).map(|entry| entry.value().clone())
    }

    async fn find_all(&self) -> Vec<Account> {
        let mut all: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.username().cmp(b.username()));
        all
    }

    async fn update(&self, account: &Account) {
        self.accounts
            .insert(account.username().to_owned(), account.clone());
    }

    async fn delete(&self, account: &Account) {
        self.accounts.remove(account.username());
    }
}
