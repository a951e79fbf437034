use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// A member of the network and the relationship sets it owns.
///
/// Every set holds usernames, never `Account` values, so an account can be
/// cloned, stored and reloaded without dragging its neighbours along.
/// `Clone` is a deep copy: the clone owns its own sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    username: String,
    #[serde(default)]
    friends: BTreeSet<String>,
    #[serde(default)]
    incoming_requests: BTreeSet<String>,
    #[serde(default)]
    outgoing_requests: BTreeSet<String>,
    #[serde(default)]
    blocked: BTreeSet<String>,
    #[serde(default)]
    auto_accept: bool,
}

impl Account {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Only meaningful before the account has been persisted; the username is
    /// the storage key afterwards.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn friends(&self) -> &BTreeSet<String> {
        &self.friends
    }

    pub fn incoming_requests(&self) -> &BTreeSet<String> {
        &self.incoming_requests
    }

    pub fn outgoing_requests(&self) -> &BTreeSet<String> {
        &self.outgoing_requests
    }

    pub fn blocked(&self) -> &BTreeSet<String> {
        &self.blocked
    }

    pub fn is_auto_accept(&self) -> bool {
        self.auto_accept
    }

    pub fn is_friend_of(&self, username: &str) -> bool {
        self.friends.contains(username)
    }

    pub fn has_blocked(&self, username: &str) -> bool {
        self.blocked.contains(username)
    }

    /// True when either side has blocked the other.
    pub fn is_blocked_either_way(&self, other: &Account) -> bool {
        self.has_blocked(&other.username) || other.has_blocked(&self.username)
    }

    /// `from` asks `self` for friendship.
    ///
    /// Nothing happens when the two are already friends or a request is
    /// already pending in either direction. With auto-accept on, the request
    /// resolves straight to friendship.
    pub fn request_friendship(&mut self, from: &mut Account) -> bool {
        if from.username == self.username
            || self.friends.contains(&from.username)
            || self.incoming_requests.contains(&from.username)
            || self.outgoing_requests.contains(&from.username)
        {
            return false;
        }

        if self.auto_accept {
            self.befriend(from);
        } else {
            self.incoming_requests.insert(from.username.clone());
            from.outgoing_requests.insert(self.username.clone());
        }
        true
    }

    /// Resolves a pending request from `from` into friendship.
    pub fn accept_friendship(&mut self, from: &mut Account) -> bool {
        if !self.take_pending_from(from) {
            return false;
        }
        self.befriend(from);
        true
    }

    /// Drops a pending request from `from` without befriending.
    pub fn reject_friendship(&mut self, from: &mut Account) -> bool {
        self.take_pending_from(from)
    }

    /// Withdraws the request `self` sent to `to`.
    pub fn cancel_friendship_request(&mut self, to: &mut Account) -> bool {
        to.take_pending_from(self)
    }

    pub fn block(&mut self, username: &str) -> bool {
        if username == self.username {
            return false;
        }
        self.blocked.insert(username.to_owned())
    }

    pub fn unblock(&mut self, username: &str) -> bool {
        self.blocked.remove(username)
    }

    pub fn auto_accept_friendships(&mut self) {
        self.auto_accept = true;
    }

    pub fn cancel_auto_accept_friendships(&mut self) {
        self.auto_accept = false;
    }

    /// Removes every trace of `username` from this account's sets.
    pub fn forget(&mut self, username: &str) -> bool {
        let mut changed = self.friends.remove(username);
        changed |= self.incoming_requests.remove(username);
        changed |= self.outgoing_requests.remove(username);
        changed |= self.blocked.remove(username);
        changed
    }

    pub fn clear_relationships(&mut self) {
        self.friends.clear();
        self.incoming_requests.clear();
        self.outgoing_requests.clear();
        self.blocked.clear();
    }

    fn take_pending_from(&mut self, from: &mut Account) -> bool {
        if !self.incoming_requests.remove(&from.username) {
            return false;
        }
        from.outgoing_requests.remove(&self.username);
        true
    }

    fn befriend(&mut self, other: &mut Account) {
        self.friends.insert(other.username.clone());
        other.friends.insert(self.username.clone());
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.username.hash(state);
    }
}
