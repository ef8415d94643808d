//! Commits: caller-supplied operations that may settle now or later
//!
//! A controlled component hands every value change to its host through a
//! commit callback. The callback may finish on the spot (a plain store
//! update) or hand back work that finishes later (fetching the next page).
//! Both shapes are normalized into a [`Commit`]: zero or more actions for the
//! host store plus a [`Settling`] that is either ready or pending.
//!
//! [`CommitTracker`] turns every tracked commit into exactly one
//! [`Settlement`], delivered through a queue owned by the component:
//!
//! - ready commits are queued immediately
//! - pending commits run on a spawned tokio task and are queued when they finish
//! - each commit gets a generation number so a component can ignore
//!   settlements that no longer match what it is waiting for
//! - dropping the tracker drops the queue, so late settlements go nowhere
//!
//! # Example
//!
//! ```ignore
//! use tui_controls::commit::{Commit, CommitTracker, Settling};
//!
//! let set_page = |page: i64| {
//!     let tx = action_tx.clone();
//!     Commit::action(Action::PageSet(page)).then(async move {
//!         fetch_rows(page).await?;
//!         Ok::<(), std::io::Error>(())
//!     })
//! };
//!
//! let mut tracker = CommitTracker::new();
//! let (actions, settling) = set_page(2).into_parts();
//! let ticket = tracker.track(2, settling);
//! // ... later, in the host loop
//! let settlement = tracker.next().await;
//! assert_eq!(settlement.generation, ticket.generation());
//! ```

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tracing::debug;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A commit future that has not settled yet
pub type PendingCommit = Pin<Box<dyn Future<Output = Result<(), CommitError>> + Send + 'static>>;

/// The failure a commit settled with
///
/// Wraps whatever error the caller produced without changing its message.
/// Converting a `CommitError` into another `CommitError` keeps the original.
pub struct CommitError {
    inner: BoxError,
}

impl CommitError {
    /// Wrap an error or a message
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        match error.into().downcast::<CommitError>() {
            Ok(commit_error) => *commit_error,
            Err(inner) => Self { inner },
        }
    }

    /// Borrow the caller's error
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Take the caller's error back
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl fmt::Debug for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for CommitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// How a commit settles
pub enum Settling {
    /// Already settled when the callback returned
    Ready(Result<(), CommitError>),
    /// Settles when the future completes
    Pending(PendingCommit),
}

impl Settling {
    /// Whether this commit still has work in flight
    pub fn is_pending(&self) -> bool {
        matches!(self, Settling::Pending(_))
    }
}

impl fmt::Debug for Settling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Settling::Ready(outcome) => f.debug_tuple("Ready").field(outcome).finish(),
            Settling::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// What a commit callback hands back to a component
///
/// `A` is the host's action type. The actions are returned from the
/// component's `handle_event` so the host store applies them; the settling
/// part drives the component's busy state.
#[derive(Debug)]
pub struct Commit<A> {
    actions: Vec<A>,
    settling: Settling,
}

impl<A> Commit<A> {
    /// Settled successfully, nothing for the store
    pub fn done() -> Self {
        Self {
            actions: Vec::new(),
            settling: Settling::Ready(Ok(())),
        }
    }

    /// Settled successfully with one action for the store
    pub fn action(action: A) -> Self {
        Self::actions([action])
    }

    /// Settled successfully with several actions for the store
    pub fn actions(actions: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            settling: Settling::Ready(Ok(())),
        }
    }

    /// Failed before returning
    pub fn failed<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            actions: Vec::new(),
            settling: Settling::Ready(Err(CommitError::new(error))),
        }
    }

    /// Settles when a fallible future completes
    pub fn pending<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError>,
    {
        Self::done().then(future)
    }

    /// Settles when an infallible future completes
    pub fn waiting<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self::done().then_wait(future)
    }

    /// Add an action for the store
    pub fn with_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Keep the actions, but settle when `future` completes
    pub fn then<F, E>(mut self, future: F) -> Self
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError>,
    {
        self.settling = Settling::Pending(Box::pin(async move {
            future.await.map_err(CommitError::new)
        }));
        self
    }

    /// Keep the actions, but settle when an infallible `future` completes
    pub fn then_wait<F>(mut self, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.settling = Settling::Pending(Box::pin(async move {
            future.await;
            Ok(())
        }));
        self
    }

    /// Whether this commit still has work in flight
    pub fn is_pending(&self) -> bool {
        self.settling.is_pending()
    }

    /// Actions queued for the store
    pub fn pending_actions(&self) -> &[A] {
        &self.actions
    }

    /// Split into store actions and the settling half
    pub fn into_parts(self) -> (Vec<A>, Settling) {
        (self.actions, self.settling)
    }
}

/// The outcome of one tracked commit
#[derive(Debug)]
pub struct Settlement<K> {
    /// What the commit was for (a page number, an item id, ...)
    pub key: K,
    /// Generation assigned when the commit was tracked
    pub generation: u64,
    /// How the commit ended
    pub outcome: Result<(), CommitError>,
}

impl<K> Settlement<K> {
    /// Whether the commit succeeded
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&CommitError> {
        self.outcome.as_ref().err()
    }
}

/// Receipt for a tracked commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticket {
    /// Settled before `track` returned; its settlement is already queued
    Settled { generation: u64 },
    /// Running on a spawned task
    Pending { generation: u64 },
}

impl Ticket {
    /// Generation assigned to the commit
    pub fn generation(self) -> u64 {
        match self {
            Ticket::Settled { generation } | Ticket::Pending { generation } => generation,
        }
    }

    /// Whether the commit is still in flight
    pub fn is_pending(self) -> bool {
        matches!(self, Ticket::Pending { .. })
    }
}

/// Turns commits into settlements, one per commit
///
/// Owned by the component that dispatches the commits. Tracking a pending
/// commit requires a tokio runtime; ready commits do not.
///
/// The settlement queue is unbounded and ready commits are queued too, so
/// the owner has to drain it with [`CommitTracker::next`] or
/// [`CommitTracker::try_next`]. An undrained queue grows by one entry per
/// commit.
pub struct CommitTracker<K> {
    generation: u64,
    tx: mpsc::UnboundedSender<Settlement<K>>,
    rx: mpsc::UnboundedReceiver<Settlement<K>>,
}

impl<K> fmt::Debug for CommitTracker<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitTracker")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<K> Default for CommitTracker<K>
where
    K: fmt::Debug + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> CommitTracker<K>
where
    K: fmt::Debug + Send + 'static,
{
    /// Create a tracker with an empty settlement queue
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            generation: 0,
            tx,
            rx,
        }
    }

    /// Generation of the most recently tracked commit (0 before the first)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Track a commit for `key`
    ///
    /// A pending future runs on its own tokio task. If it panics the commit
    /// settles with the panic as its error. The caller's future always runs
    /// to completion, even if this tracker is dropped first.
    pub fn track(&mut self, key: K, settling: Settling) -> Ticket {
        self.generation += 1;
        let generation = self.generation;

        match settling {
            Settling::Ready(outcome) => {
                debug!(?key, generation, ok = outcome.is_ok(), "Commit settled immediately");
                let _ = self.tx.send(Settlement {
                    key,
                    generation,
                    outcome,
                });
                Ticket::Settled { generation }
            }
            Settling::Pending(future) => {
                debug!(?key, generation, "Commit pending");
                let tx = self.tx.clone();
                let work = tokio::spawn(future);
                tokio::spawn(async move {
                    let outcome = match work.await {
                        Ok(outcome) => outcome,
                        Err(join_error) => Err(CommitError::new(join_error)),
                    };
                    if tx
                        .send(Settlement {
                            key,
                            generation,
                            outcome,
                        })
                        .is_err()
                    {
                        debug!(generation, "Commit settled after its owner was dropped");
                    }
                });
                Ticket::Pending { generation }
            }
        }
    }

    /// Take the next queued settlement without waiting
    pub fn try_next(&mut self) -> Option<Settlement<K>> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next settlement
    ///
    /// Never resolves while nothing is in flight, which makes it safe to use
    /// as a `tokio::select!` branch.
    pub async fn next(&mut self) -> Settlement<K> {
        match self.rx.recv().await {
            Some(settlement) => settlement,
            None => std::future::pending().await,
        }
    }
}
