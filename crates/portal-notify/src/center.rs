//! The role-parametrized notification mailbox.

use crate::{Navigator, NotifyError};
use portal_gateway::CredentialGateway;
use portal_types::{Notification, Role};
use std::sync::Mutex;

/// Fixed page size of every mailbox.
pub const PAGE_SIZE: usize = 5;

/// Supplies the access token for mailbox requests. Returning `None` means
/// there is no authenticated session to fetch for.
pub type TokenProvider = Box<dyn Fn() -> Option<String> + Send + Sync>;

struct MailboxState {
    /// Latest fetched list, sorted by the mailbox sort rule.
    items: Vec<Notification>,
    /// 1-based current page.
    page: usize,
    /// Fetch generation counter; completions from older generations are
    /// discarded.
    epoch: u64,
    /// Whether a fetch for the current generation is in flight.
    in_flight: bool,
}

/// One role's mailbox: fetched on open, sorted and paginated client-side,
/// mutated only through mark-as-read.
///
/// Role-specific wiring stops at the constructor; read and pagination
/// semantics are identical for all four roles.
pub struct NotificationCenter<G, N> {
    role: Role,
    gateway: G,
    navigator: N,
    token: TokenProvider,
    state: Mutex<MailboxState>,
}

/// Unread first, then most recent first within each group. Recomputed on
/// every fetch; the sort is stable, so equal keys keep their fetched order.
fn sort_notifications(items: &mut [Notification]) {
    items.sort_by(|a, b| {
        a.is_read
            .cmp(&b.is_read)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

impl<G: CredentialGateway, N: Navigator> NotificationCenter<G, N> {
    /// Create the mailbox for `role`.
    pub fn new(role: Role, gateway: G, navigator: N, token: TokenProvider) -> Self {
        Self {
            role,
            gateway,
            navigator,
            token,
            state: Mutex::new(MailboxState {
                items: Vec::new(),
                page: 1,
                epoch: 0,
                in_flight: false,
            }),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Fetch the mailbox. A no-op while a fetch for this mailbox is already
    /// in flight, so opening the surface twice cannot duplicate requests.
    pub async fn open(&self) -> Result<(), NotifyError> {
        let epoch = {
            let mut state = self.state.lock().unwrap();
            if state.in_flight {
                tracing::debug!(role = %self.role, "Mailbox fetch already in flight");
                return Ok(());
            }
            state.in_flight = true;
            state.epoch += 1;
            state.epoch
        };
        self.fetch(epoch).await
    }

    /// Discard the mailbox: cached items are dropped and any in-flight
    /// fetch becomes stale. Called when the surface closes, the role
    /// changes, or the user logs out.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.epoch += 1;
        state.in_flight = false;
        state.items.clear();
        state.page = 1;
    }

    /// Refetch unconditionally, superseding any in-flight fetch.
    async fn refetch(&self) -> Result<(), NotifyError> {
        let epoch = {
            let mut state = self.state.lock().unwrap();
            state.in_flight = true;
            state.epoch += 1;
            state.epoch
        };
        self.fetch(epoch).await
    }

    async fn fetch(&self, epoch: u64) -> Result<(), NotifyError> {
        let Some(token) = (self.token)() else {
            let mut state = self.state.lock().unwrap();
            if state.epoch == epoch {
                state.in_flight = false;
            }
            return Err(NotifyError::NoSession);
        };

        let result = self.gateway.notifications(self.role, &token).await;

        let mut state = self.state.lock().unwrap();
        if state.epoch != epoch {
            tracing::debug!(role = %self.role, "Discarding stale mailbox fetch");
            return Ok(());
        }
        state.in_flight = false;

        let mut items = result?;
        sort_notifications(&mut items);
        state.items = items;
        Ok(())
    }

    /// Mark one notification read.
    ///
    /// On success, a `redirect` differing from the current path triggers
    /// navigation and no refetch (the destination page owns its own state);
    /// otherwise the mailbox refetches. On failure local state is left
    /// untouched and the error is surfaced for display.
    pub async fn mark_read(
        &self,
        notification_id: i64,
        redirect: Option<&str>,
    ) -> Result<(), NotifyError> {
        let token = (self.token)().ok_or(NotifyError::NoSession)?;

        self.gateway
            .mark_read(self.role, &token, notification_id)
            .await?;

        match redirect {
            Some(path) if path != self.navigator.current_path() => {
                tracing::debug!(role = %self.role, path, "Navigating after mark-read");
                self.navigator.navigate(path);
                Ok(())
            }
            _ => self.refetch().await,
        }
    }

    /// 1-based current page.
    pub fn page(&self) -> usize {
        self.state.lock().unwrap().page
    }

    /// Move to `page` (1-based; 0 is treated as 1). Out-of-range pages are
    /// allowed and simply show nothing.
    pub fn set_page(&self, page: usize) {
        self.state.lock().unwrap().page = page.max(1);
    }

    /// The current page of the sorted mailbox: at most `PAGE_SIZE` items,
    /// empty beyond the last page.
    pub fn page_items(&self) -> Vec<Notification> {
        let state = self.state.lock().unwrap();
        state
            .items
            .iter()
            .skip((state.page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .cloned()
            .collect()
    }

    /// Number of pages in the current list (at least 1).
    pub fn page_count(&self) -> usize {
        let len = self.state.lock().unwrap().items.len();
        len.div_ceil(PAGE_SIZE).max(1)
    }

    /// The whole sorted mailbox, unread first, newest first within each
    /// group.
    pub fn items(&self) -> Vec<Notification> {
        self.state.lock().unwrap().items.clone()
    }

    /// Total item count across all pages.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any fetched item is unread, across the whole list rather
    /// than the current page.
    pub fn has_unread(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .any(|item| !item.is_read)
    }
}
