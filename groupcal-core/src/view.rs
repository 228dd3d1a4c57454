//! View state for one group, guarded against out-of-order responses.
//!
//! Each load takes a ticket before it starts. Only the holder of the most
//! recently issued ticket may store its result, so a slow response for an
//! older request (or for a group the user has since left) is dropped
//! instead of overwriting newer data.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::GroupId;
use crate::api::ApiClient;
use crate::error::{GroupCalError, GroupCalResult};
use crate::members::{self, MemberList};
use crate::session::{Session, is_admin};
use crate::task::Task;

/// Proof that a load was started; see [`Latest::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// The most recent value of a re-fetched resource.
#[derive(Debug, Default)]
pub struct Latest<T> {
    issued: AtomicU64,
    value: Mutex<Option<T>>,
}

impl<T: Clone> Latest<T> {
    pub fn new() -> Self {
        Latest {
            issued: AtomicU64::new(0),
            value: Mutex::new(None),
        }
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `value` if `ticket` is still the newest. Returns whether it
    /// was stored.
    pub fn commit(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.lock();
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "discarding stale response");
            return false;
        }
        *slot = Some(value);
        true
    }

    /// Drop the stored value and make every outstanding ticket stale.
    pub fn invalidate(&self) {
        let mut slot = self.lock();
        self.issued.fetch_add(1, Ordering::SeqCst);
        *slot = None;
    }

    pub fn get(&self) -> Option<T> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Session, members and tasks of the group currently being viewed.
pub struct GroupView {
    api: ApiClient,
    group_id: AtomicI64,
    session: Latest<Session>,
    members: Latest<MemberList>,
    tasks: Latest<Vec<Task>>,
}

impl GroupView {
    pub fn new(api: ApiClient, group_id: GroupId) -> Self {
        GroupView {
            api,
            group_id: AtomicI64::new(group_id),
            session: Latest::new(),
            members: Latest::new(),
            tasks: Latest::new(),
        }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id.load(Ordering::SeqCst)
    }

    /// Point the view at another group. Loads still in flight for the old
    /// group will not be stored.
    pub fn switch_group(&self, group_id: GroupId) {
        self.group_id.store(group_id, Ordering::SeqCst);
        self.session.invalidate();
        self.members.invalidate();
        self.tasks.invalidate();
    }

    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    /// Administrator status; false until a session has been resolved.
    pub fn is_admin(&self) -> bool {
        is_admin(self.session.get().as_ref())
    }

    pub fn members(&self) -> Option<MemberList> {
        self.members.get()
    }

    pub fn tasks(&self) -> Option<Vec<Task>> {
        self.tasks.get()
    }

    /// Resolve who is acting and whether they administer the group.
    ///
    /// On failure the stored session is cleared, so `is_admin` is false.
    /// Returns [`GroupCalError::Superseded`] if the view moved on while
    /// the request was in flight.
    pub async fn refresh_session(&self) -> GroupCalResult<Session> {
        let ticket = self.session.begin();

        match Session::resolve(&self.api, self.group_id()).await {
            Ok(session) => {
                if !self.session.commit(ticket, session.clone()) {
                    return Err(GroupCalError::Superseded);
                }
                Ok(session)
            }
            Err(e) => {
                if !self.session.is_current(ticket) {
                    return Err(GroupCalError::Superseded);
                }
                self.session.invalidate();
                Err(e)
            }
        }
    }

    /// Load members and join requests, resolving the session from the
    /// same responses.
    pub async fn refresh_members(&self) -> GroupCalResult<MemberList> {
        let session_ticket = self.session.begin();
        let members_ticket = self.members.begin();

        let (session, list) = match members::load(&self.api, self.group_id()).await {
            Ok(loaded) => loaded,
            Err(e) => {
                if !self.members.is_current(members_ticket) {
                    return Err(GroupCalError::Superseded);
                }
                if self.session.is_current(session_ticket) {
                    self.session.invalidate();
                }
                return Err(e);
            }
        };

        // A newer session from refresh_session may win; the list is still ours.
        self.session.commit(session_ticket, session);
        if !self.members.commit(members_ticket, list.clone()) {
            return Err(GroupCalError::Superseded);
        }
        Ok(list)
    }

    pub async fn refresh_tasks(&self) -> GroupCalResult<Vec<Task>> {
        let ticket = self.tasks.begin();

        let result = self.api.tasks(self.group_id()).await;
        if !self.tasks.is_current(ticket) {
            return Err(GroupCalError::Superseded);
        }
        let tasks = result?;
        if !self.tasks.commit(ticket, tasks.clone()) {
            return Err(GroupCalError::Superseded);
        }
        Ok(tasks)
    }

    /// Store a task list returned by a mutation.
    pub fn replace_tasks(&self, tasks: Vec<Task>) {
        let ticket = self.tasks.begin();
        self.tasks.commit(ticket, tasks);
    }
}
