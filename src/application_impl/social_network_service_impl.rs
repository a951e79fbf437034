use crate::application_port::*;
use crate::domain_model::Account;
use crate::domain_port::AccountRepo;
use crate::logger::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct RealSocialNetworkService {
    account_repo: Arc<dyn AccountRepo>,
    // Held for the whole of every operation, so calls on one instance never
    // interleave their read-modify-write cycles.
    session: Mutex<Option<Account>>,
}

impl RealSocialNetworkService {
    pub fn new(account_repo: Arc<dyn AccountRepo>) -> RealSocialNetworkService {
        RealSocialNetworkService {
            account_repo,
            session: Mutex::new(None),
        }
    }

    async fn resolve(&self, username: &str) -> Result<Account, SocialError> {
        if username.trim().is_empty() {
            return Err(SocialError::AccountNotFound(username.to_owned()));
        }
        self.account_repo
            .find_by_username(username)
            .await
            .ok_or_else(|| SocialError::AccountNotFound(username.to_owned()))
    }

    /// Reloads the logged-in account from storage and hands it out for
    /// mutation. A session whose record has vanished is dropped.
    async fn session_account<'s>(
        &self,
        session: &'s mut Option<Account>,
    ) -> Result<&'s mut Account, SocialError> {
        let username = match session.as_ref() {
            Some(account) => account.username().to_owned(),
            None => return Err(SocialError::NotLoggedIn),
        };
        match self.account_repo.find_by_username(&username).await {
            Some(fresh) => *session = Some(fresh),
            None => {
                warn!(%username, "session account no longer stored, logging out");
                *session = None;
            }
        }
        session.as_mut().ok_or(SocialError::NotLoggedIn)
    }

    async fn settle_all_requests(&self, accept: bool) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;

        // The walk below shrinks the incoming set, so iterate a copy.
        let pending: Vec<String> = me.incoming_requests().iter().cloned().collect();
        let mut me_dirty = false;
        for name in pending {
            let Some(mut requester) = self.account_repo.find_by_username(&name).await else {
                warn!(requester = %name, "dropping request from missing account");
                me_dirty |= me.forget(&name);
                continue;
            };
            let settled = if accept {
                me.accept_friendship(&mut requester)
            } else {
                me.reject_friendship(&mut requester)
            };
            if settled {
                self.account_repo.update(me).await;
                self.account_repo.update(&requester).await;
                me_dirty = false;
            }
        }
        if me_dirty {
            self.account_repo.update(me).await;
        }

        debug!(username = %me.username(), accept, "settled all pending requests");
        Ok(())
    }
}

#[async_trait::async_trait]
impl SocialNetworkService for RealSocialNetworkService {
    async fn join(&self, username: &str) -> Result<Account, SocialError> {
        let _session = self.session.lock().await;

        if username.trim().is_empty() {
            return Err(SocialError::AccountNotFound(username.to_owned()));
        }
        if self.account_repo.find_by_username(username).await.is_some() {
            return Err(SocialError::AccountExists(username.to_owned()));
        }

        let account = Account::new(username);
        self.account_repo.save(&account).await;
        info!(%username, "account joined");
        Ok(account)
    }

    async fn login(&self, username: &str) -> Result<Account, SocialError> {
        let mut session = self.session.lock().await;
        let account = self.resolve(username).await?;
        *session = Some(account.clone());
        debug!(%username, "logged in");
        Ok(account)
    }

    async fn logout(&self) {
        let mut session = self.session.lock().await;
        if let Some(account) = session.take() {
            debug!(username = %account.username(), "logged out");
        }
    }

    async fn current_account(&self) -> Result<Account, SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        Ok(me.clone())
    }

    async fn has_member(&self, username: &str) -> Result<bool, SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;

        if username == me.username() {
            return Ok(true);
        }
        if username.trim().is_empty() {
            return Ok(false);
        }
        let visible = match self.account_repo.find_by_username(username).await {
            Some(other) => !me.is_blocked_either_way(&other),
            None => false,
        };
        Ok(visible)
    }

    async fn list_members(&self) -> Result<BTreeSet<String>, SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;

        let members = self
            .account_repo
            .find_all()
            .await
            .into_iter()
            .filter(|other| other.username() != me.username())
            .filter(|other| !me.is_blocked_either_way(other))
            .map(|other| other.username().to_owned())
            .collect();
        Ok(members)
    }

    async fn send_friendship_to(&self, username: &str) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        let mut target = self.resolve(username).await?;

        if target.username() == me.username() {
            debug!(%username, "ignoring friend request to self");
            return Ok(());
        }

        let changed = target.request_friendship(me);
        self.account_repo.update(me).await;
        self.account_repo.update(&target).await;

        debug!(
            username = %me.username(),
            target = %username,
            changed,
            befriended = me.is_friend_of(username),
            "friend request sent"
        );
        Ok(())
    }

    async fn send_friendship_cancellation_to(&self, username: &str) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        let mut target = self.resolve(username).await?;

        if !me.cancel_friendship_request(&mut target) {
            debug!(username = %me.username(), target = %username, "no pending request to cancel");
            return Ok(());
        }
        self.account_repo.update(me).await;
        self.account_repo.update(&target).await;

        debug!(username = %me.username(), target = %username, "friend request cancelled");
        Ok(())
    }

    async fn accept_friendship_from(&self, username: &str) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        let mut requester = self.resolve(username).await?;

        if !me.accept_friendship(&mut requester) {
            debug!(username = %me.username(), requester = %username, "no pending request to accept");
            return Ok(());
        }
        self.account_repo.update(me).await;
        self.account_repo.update(&requester).await;

        debug!(username = %me.username(), requester = %username, "friend request accepted");
        Ok(())
    }

    async fn reject_friendship_from(&self, username: &str) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        let mut requester = self.resolve(username).await?;

        if !me.reject_friendship(&mut requester) {
            debug!(username = %me.username(), requester = %username, "no pending request to reject");
            return Ok(());
        }
        self.account_repo.update(me).await;
        self.account_repo.update(&requester).await;

        debug!(username = %me.username(), requester = %username, "friend request rejected");
        Ok(())
    }

    async fn accept_all_friendships(&self) -> Result<(), SocialError> {
        self.settle_all_requests(true).await
    }

    async fn reject_all_friendships(&self) -> Result<(), SocialError> {
        self.settle_all_requests(false).await
    }

    async fn auto_accept_friendships(&self) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        me.auto_accept_friendships();
        self.account_repo.update(me).await;
        debug!(username = %me.username(), "auto-accept enabled");
        Ok(())
    }

    async fn cancel_auto_accept_friendships(&self) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        me.cancel_auto_accept_friendships();
        self.account_repo.update(me).await;
        debug!(username = %me.username(), "auto-accept disabled");
        Ok(())
    }

    async fn block(&self, username: &str) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        let target = self.resolve(username).await?;

        if target.username() == me.username() {
            debug!(%username, "ignoring block of self");
            return Ok(());
        }

        me.block(username);
        // The target's record is written too so the block is visible from
        // either stored side.
        self.account_repo.update(me).await;
        self.account_repo.update(&target).await;

        debug!(username = %me.username(), target = %username, "blocked");
        Ok(())
    }

    async fn unblock(&self, username: &str) -> Result<(), SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;
        let target = self.resolve(username).await?;

        if target.username() == me.username() {
            return Ok(());
        }

        me.unblock(username);
        self.account_repo.update(me).await;
        self.account_repo.update(&target).await;

        debug!(username = %me.username(), target = %username, "unblocked");
        Ok(())
    }

    async fn leave(&self) -> Result<Account, SocialError> {
        let mut session = self.session.lock().await;
        self.session_account(&mut session).await?;
        let mut departing = session.take().ok_or(SocialError::NotLoggedIn)?;
        let username = departing.username().to_owned();

        self.account_repo.delete(&departing).await;

        let mut purged = 0usize;
        for mut other in self.account_repo.find_all().await {
            if other.forget(&username) {
                self.account_repo.update(&other).await;
                purged += 1;
            }
        }
        departing.clear_relationships();

        info!(%username, purged, "account left");
        Ok(departing)
    }

    async fn recommend_friends(&self) -> Result<BTreeSet<String>, SocialError> {
        let mut session = self.session.lock().await;
        let me = self.session_account(&mut session).await?;

        let mut recommendations = BTreeSet::new();
        let mut seen = BTreeSet::new();
        for friend_name in me.friends() {
            let Some(friend) = self.account_repo.find_by_username(friend_name).await else {
                warn!(friend = %friend_name, "skipping friend with no stored account");
                continue;
            };
            for candidate in friend.friends() {
                if candidate == me.username()
                    || me.is_friend_of(candidate)
                    || me.has_blocked(candidate)
                    || !seen.insert(candidate.clone())
                {
                    continue;
                }
                let Some(other) = self.account_repo.find_by_username(candidate).await else {
                    continue;
                };
                if !other.has_blocked(me.username()) {
                    recommendations.insert(candidate.clone());
                }
            }
        }

        debug!(
            username = %me.username(),
            count = recommendations.len(),
            "friend recommendations computed"
        );
        Ok(recommendations)
    }
}
