//! Synchronization and pagination controller for the user list.

use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{Notify, watch};
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::traits::{UserCache, UserSource};
use crate::types::{UserId, UserRecord};

use super::state::{ListState, PaginationCursor};

/// Page size used when the caller has no preference.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Result of a [`UserListController::load_more`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cursor advanced and this many users were appended. Zero when
    /// every row of the page was already showing.
    Appended(usize),
    /// Nothing left to load.
    Exhausted,
    /// Another load was in flight; this call was ignored.
    Busy,
    /// A search filter is active; pagination is suspended.
    Filtered,
    /// The list was reset while the page was being read; the page was dropped.
    Discarded,
}

/// Result of a remote seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The batch was fetched and this many records were upserted.
    Seeded(usize),
    /// The cache already holds users.
    NotNeeded,
    /// A fetch was already attempted this session.
    AlreadyAttempted,
    /// The remote fetch failed; the session continues from cache.
    Failed,
}

/// Paginated browse state saved while a search filter replaces it.
#[derive(Debug)]
struct Browse {
    users: Vec<UserRecord>,
    cursor: PaginationCursor,
}

#[derive(Debug)]
struct Inner {
    users: Vec<UserRecord>,
    cursor: PaginationCursor,
    query: String,
    stashed: Option<Browse>,
    last_seed_failed: bool,
    /// Bumped whenever the visible list is replaced wholesale.
    epoch: u64,
}

impl Inner {
    fn reset(&mut self) {
        self.users.clear();
        self.cursor.reset();
        self.query.clear();
        self.stashed = None;
        self.epoch += 1;
    }
}

/// Clears the in-flight flag when a load finishes, including on error, and
/// wakes anyone waiting for the loader to go idle.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    idle: &'a Notify,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, idle: &'a Notify) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, idle })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.idle.notify_waiters();
    }
}

/// Keeps an observable user list consistent with a local cache and a
/// remote source.
///
/// The visible list only ever grows during paginated browsing, ordered by
/// user id. A search temporarily replaces it with the full match set; clearing
/// the search brings the browse state back untouched. The remote source is
/// only consulted to seed an empty cache (at most once per controller) or on
/// an explicit [`resynchronize`](Self::resynchronize).
///
/// Methods take `&self` so the controller can be shared behind an `Arc`
/// between the UI and, for example, a connectivity observer. State changes
/// are published through a [`watch`] channel; see [`subscribe`](Self::subscribe).
///
/// # Example
///
/// ```no_run
/// # use roster_core::{UserCache, UserSource, UserListController, ListState};
/// # async fn example(cache: impl UserCache, source: impl UserSource) -> roster_core::Result<()> {
/// let controller = UserListController::new(cache, source, 25)?;
/// controller.initialize(true).await?;
/// if let ListState::Ready(users) = controller.state() {
///     println!("{} users", users.len());
/// }
/// controller.load_more().await?;
/// # Ok(())
/// # }
/// ```
pub struct UserListController<C, S> {
    pub(super) cache: C,
    source: S,
    inner: Mutex<Inner>,
    state: watch::Sender<ListState>,
    loading: AtomicBool,
    idle: Notify,
    fetch_attempted: AtomicBool,
}

impl<C, S> UserListController<C, S>
where
    C: UserCache,
    S: UserSource,
{
    /// Create a controller in the `Loading` state.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero.
    pub fn new(cache: C, source: S, page_size: usize) -> Result<Self> {
        let (state, _) = watch::channel(ListState::Loading);
        Ok(Self {
            cache,
            source,
            inner: Mutex::new(Inner {
                users: Vec::new(),
                cursor: PaginationCursor::new(page_size)?,
                query: String::new(),
                stashed: None,
                last_seed_failed: false,
                epoch: 0,
            }),
            state,
            loading: AtomicBool::new(false),
            idle: Notify::new(),
            fetch_attempted: AtomicBool::new(false),
        })
    }

    /// The current list state.
    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// Receive every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    /// The visible users, in display order.
    pub fn users(&self) -> Vec<UserRecord> {
        self.inner().users.clone()
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.inner().cursor
    }

    /// The active search filter; empty when browsing.
    pub fn query(&self) -> String {
        self.inner().query.clone()
    }

    /// Look up a single user for a detail view.
    pub async fn user(&self, id: &UserId) -> Result<Option<UserRecord>> {
        self.cache.get(id).await
    }

    /// Start a screen session.
    ///
    /// With an empty cache and no network this settles on
    /// [`ListState::NoNetworkNoData`] without touching the remote source.
    /// Otherwise the list and cursor are reset, the cache is seeded if it is
    /// empty, and the first page is loaded. Each call starts a new session, so
    /// the remote fetch guard is re-armed.
    #[instrument(skip(self))]
    pub async fn initialize(&self, network_available: bool) -> Result<()> {
        self.fetch_attempted.store(false, Ordering::Release);
        let total = self.cache.count().await?;
        if total == 0 && !network_available {
            debug!("Empty cache and no network");
            self.publish(ListState::NoNetworkNoData);
            return Ok(());
        }

        self.inner().reset();
        self.publish(ListState::Loading);

        if total == 0 {
            match self.ensure_seeded().await? {
                SeedOutcome::Seeded(_) | SeedOutcome::Failed => return Ok(()),
                SeedOutcome::NotNeeded | SeedOutcome::AlreadyAttempted => {}
            }
        }

        self.load_first_page().await?;
        Ok(())
    }

    /// Fetch one remote batch into an empty cache, once per session.
    ///
    /// The attempt flag is set before the request goes out, so overlapping
    /// triggers cause a single remote call. A load that was already reading
    /// the empty cache is discarded and the first page is read again once it
    /// finishes. Remote failures are logged and absorbed; only cache failures
    /// are returned as errors.
    #[instrument(skip(self))]
    pub async fn ensure_seeded(&self) -> Result<SeedOutcome> {
        if self.cache.count().await? > 0 {
            return Ok(SeedOutcome::NotNeeded);
        }

        if self.fetch_attempted.swap(true, Ordering::AcqRel) {
            debug!("Remote fetch already attempted this session");
            return Ok(SeedOutcome::AlreadyAttempted);
        }

        match self.source.fetch_batch().await {
            Ok(batch) => {
                self.cache.upsert_all(&batch).await?;
                info!(count = batch.len(), "Seeded cache from remote source");
                {
                    let mut inner = self.inner();
                    inner.last_seed_failed = false;
                    if inner.users.is_empty() {
                        inner.cursor.reset();
                        inner.epoch += 1;
                    }
                }
                self.load_first_page().await?;
                Ok(SeedOutcome::Seeded(batch.len()))
            }
            Err(err) if err.is_remote() => {
                warn!(error = %err, "Remote fetch failed, continuing from cache");
                self.inner().last_seed_failed = true;
                if self.cache.count().await? == 0 {
                    self.publish(ListState::NoNetworkNoData);
                }
                Ok(SeedOutcome::Failed)
            }
            Err(err) => Err(err),
        }
    }

    /// Append the next page from the cache.
    ///
    /// Ignored while another load is in flight, once the listing is exhausted,
    /// or while a search filter is active.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let Some(_in_flight) = InFlight::acquire(&self.loading, &self.idle) else {
            debug!("Load already in flight");
            return Ok(LoadOutcome::Busy);
        };

        let (cursor, epoch) = {
            let inner = self.inner();
            if !inner.query.is_empty() {
                return Ok(LoadOutcome::Filtered);
            }
            if inner.cursor.is_exhausted() {
                return Ok(LoadOutcome::Exhausted);
            }
            (inner.cursor, inner.epoch)
        };

        let total = self.cache.count().await?;
        let offset = cursor.offset();
        let page = if offset < total {
            self.cache.range(offset, cursor.page_size()).await?
        } else {
            Vec::new()
        };
        let fetched = page.len();

        let (outcome, state) = {
            let mut inner = self.inner();
            if inner.epoch != epoch {
                return Ok(LoadOutcome::Discarded);
            }

            // Ids inserted below the offset shift the window; drop repeats.
            let last = inner.users.last().map(|u| u.id.clone());
            let fresh: Vec<_> = page
                .into_iter()
                .filter(|u| last.as_ref().is_none_or(|last| &u.id > last))
                .collect();
            let appended = fresh.len();

            if fetched > 0 {
                inner.users.extend(fresh);
                inner.cursor.advance();
            }
            if fetched < cursor.page_size() {
                inner.cursor.mark_exhausted();
            }

            debug!(
                offset,
                appended,
                total,
                exhausted = inner.cursor.is_exhausted(),
                "Loaded page"
            );

            let outcome = if fetched > 0 {
                LoadOutcome::Appended(appended)
            } else {
                LoadOutcome::Exhausted
            };
            (outcome, ListState::from_users(inner.users.clone()))
        };

        self.publish(state);
        Ok(outcome)
    }

    /// Apply a search filter, or clear it with an empty query.
    ///
    /// Callers are expected to debounce keystrokes first (see
    /// [`SearchDebouncer`](super::SearchDebouncer)). A non-empty query
    /// replaces the visible list with every cached user whose full name
    /// contains it, ignoring case. The empty query restores the browse state
    /// that was showing before the filter was applied.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<()> {
        if query.is_empty() {
            return self.clear_search().await;
        }

        let epoch = {
            let mut inner = self.inner();
            if inner.query.is_empty() {
                let users = std::mem::take(&mut inner.users);
                let cursor = inner.cursor;
                inner.stashed = Some(Browse { users, cursor });
            }
            inner.query = query.to_string();
            inner.users.clear();
            inner.epoch += 1;
            inner.epoch
        };
        self.publish(ListState::Loading);

        let matches = self.cache.search(query).await?;
        debug!(matches = matches.len(), "Search complete");

        let state = {
            let mut inner = self.inner();
            if inner.epoch != epoch {
                return Ok(());
            }
            inner.users = matches.clone();
            ListState::from_users(matches)
        };
        self.publish(state);
        Ok(())
    }

    async fn clear_search(&self) -> Result<()> {
        let restored = {
            let mut inner = self.inner();
            let stashed = inner.stashed.take();
            inner.query.clear();
            inner.epoch += 1;
            match stashed {
                Some(browse) if !browse.users.is_empty() => {
                    inner.users = browse.users;
                    inner.cursor = browse.cursor;
                    Some(ListState::from_users(inner.users.clone()))
                }
                _ => {
                    inner.users.clear();
                    inner.cursor.reset();
                    None
                }
            }
        };

        self.publish(ListState::Loading);
        match restored {
            Some(state) => self.publish(state),
            None => {
                self.load_more().await?;
            }
        }
        Ok(())
    }

    /// React to the network coming back.
    ///
    /// Only acts when nothing is showing: already-loaded data is never
    /// replaced under the user. A previously failed seed is re-armed so the
    /// restored connection gets one more attempt.
    #[instrument(skip(self))]
    pub async fn connectivity_restored(&self) -> Result<()> {
        {
            let inner = self.inner();
            if !inner.users.is_empty() || !inner.query.is_empty() {
                debug!("List already populated; ignoring connectivity change");
                return Ok(());
            }
            if inner.last_seed_failed {
                self.fetch_attempted.store(false, Ordering::Release);
            }
        }

        if let SeedOutcome::Seeded(_) = self.ensure_seeded().await? {
            return Ok(());
        }
        self.load_more().await?;
        Ok(())
    }

    /// Refetch from the remote source and reload from page 0.
    ///
    /// This is the only operation that clears an exhausted cursor mid-session.
    /// The remote batch is upserted regardless of how much is cached; if the
    /// fetch fails the list is reloaded from whatever the cache holds.
    #[instrument(skip(self))]
    pub async fn resynchronize(&self) -> Result<SeedOutcome> {
        self.fetch_attempted.store(true, Ordering::Release);
        self.inner().reset();
        self.publish(ListState::Loading);

        let outcome = match self.source.fetch_batch().await {
            Ok(batch) => {
                self.cache.upsert_all(&batch).await?;
                info!(count = batch.len(), "Resynchronized from remote source");
                self.inner().last_seed_failed = false;
                SeedOutcome::Seeded(batch.len())
            }
            Err(err) if err.is_remote() => {
                warn!(error = %err, "Resynchronization fetch failed, reloading cache");
                self.inner().last_seed_failed = true;
                if self.cache.count().await? == 0 {
                    self.publish(ListState::NoNetworkNoData);
                    return Ok(SeedOutcome::Failed);
                }
                SeedOutcome::Failed
            }
            Err(err) => return Err(err),
        };

        self.load_first_page().await?;
        Ok(outcome)
    }

    /// Like [`load_more`](Self::load_more), but waits out a load that is
    /// already in flight instead of returning [`LoadOutcome::Busy`].
    ///
    /// Used after the list was reset, where the in-flight load belongs to the
    /// previous epoch and will be discarded.
    async fn load_first_page(&self) -> Result<LoadOutcome> {
        loop {
            let mut idle = pin!(self.idle.notified());
            idle.as_mut().enable();
            match self.load_more().await? {
                LoadOutcome::Busy => idle.await,
                outcome => return Ok(outcome),
            }
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, next: ListState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                debug!(state = next.label(), "List state changed");
                *current = next;
                true
            }
        });
    }
}
