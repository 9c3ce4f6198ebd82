//! One-shot memoizing suspensions.
//!
//! A [`Suspension`] holds a deferred computation and evaluates it at most
//! once. The first call to [`Suspension::force`] runs the computation and
//! stores the result; the computation itself is dropped and every later
//! call returns the stored value.
//!
//! The deferred computation is any value implementing [`Deferred`]. Finger
//! trees describe their postponed middle subtrees as plain data (push a
//! node, concatenate two spines) rather than as boxed closures, which keeps
//! them `Send`/`Sync` whenever their elements are. Closures can still be
//! suspended through [`Thunk`].
//!
//! # Thread Safety
//!
//! Without the `arc` feature the value lives in a [`std::cell::OnceCell`]
//! and the type is neither `Send` nor `Sync`. With the `arc` feature the
//! value lives in a [`std::sync::OnceLock`] and the pending computation
//! behind a `parking_lot::Mutex`; concurrent first calls to `force`
//! evaluate exactly once and every caller observes the same value.
//!
//! # Re-entry
//!
//! Forcing a suspension from inside its own evaluation is forbidden. The
//! single-threaded build panics with a re-entry message, which also
//! unwinds the interrupted evaluation and so poisons the suspension; the
//! `arc` build would deadlock.
//!
//! # Poisoning
//!
//! If the evaluation panics, the computation is lost and the suspension is
//! poisoned: every later `force` panics as well.
//!
//! # Examples
//!
//! ```rust
//! use finger_collections::control::Suspension;
//! use std::cell::Cell;
//!
//! let evaluations = Cell::new(0);
//! let suspension = Suspension::from_fn(|| {
//!     evaluations.set(evaluations.get() + 1);
//!     6 * 7
//! });
//!
//! assert!(!suspension.is_evaluated());
//! assert_eq!(*suspension.force(), 42);
//! assert_eq!(*suspension.force(), 42);
//! assert_eq!(evaluations.get(), 1);
//! ```

use std::fmt;

#[cfg(not(feature = "arc"))]
use std::cell::{Cell, OnceCell};

#[cfg(feature = "arc")]
use parking_lot::Mutex;
#[cfg(feature = "arc")]
use std::sync::OnceLock;

#[cfg(not(feature = "arc"))]
type ValueCell<T> = OnceCell<T>;
#[cfg(not(feature = "arc"))]
type StageCell<D> = Cell<Stage<D>>;

#[cfg(feature = "arc")]
type ValueCell<T> = OnceLock<T>;
#[cfg(feature = "arc")]
type StageCell<D> = Mutex<Stage<D>>;

/// Progress of the deferred computation while no value is stored.
enum Stage<D> {
    Pending(D),
    Evaluating,
    Poisoned,
}

/// A computation that can be run once to produce a `T`.
pub trait Deferred<T> {
    /// Runs the computation.
    fn evaluate(self) -> T;
}

/// Adapts a closure into a [`Deferred`] computation.
pub struct Thunk<F>(F);

impl<F> Thunk<F> {
    /// Wraps the closure.
    #[inline]
    pub const fn new(function: F) -> Self {
        Self(function)
    }
}

impl<T, F: FnOnce() -> T> Deferred<T> for Thunk<F> {
    fn evaluate(self) -> T {
        (self.0)()
    }
}

/// A value computed at most once, on first demand.
///
/// # Type Parameters
///
/// * `T` - The type of the computed value
/// * `D` - The deferred computation producing it
pub struct Suspension<T, D> {
    value: ValueCell<T>,
    stage: StageCell<D>,
}

impl<T, D> Suspension<T, D> {
    /// Creates a suspension that will evaluate `deferred` on first force.
    #[inline]
    pub fn new(deferred: D) -> Self {
        Self {
            value: ValueCell::new(),
            stage: StageCell::new(Stage::Pending(deferred)),
        }
    }

    /// Creates a suspension that is already evaluated.
    ///
    /// Forcing it never runs anything.
    #[inline]
    pub fn evaluated(value: T) -> Self {
        Self {
            value: ValueCell::from(value),
            stage: StageCell::new(Stage::Evaluating),
        }
    }

    /// Returns `true` once the value has been computed.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns the value if it has already been computed, without forcing.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns `true` if a previous evaluation panicked.
    ///
    /// An evaluation still running on another thread is not a poisoning.
    pub fn is_poisoned(&self) -> bool {
        !self.is_evaluated() && self.inspect_stage(|stage| matches!(stage, Stage::Poisoned))
    }

    fn is_evaluating(&self) -> bool {
        !self.is_evaluated() && self.inspect_stage(|stage| matches!(stage, Stage::Evaluating))
    }

    #[cfg(not(feature = "arc"))]
    fn replace_stage(&self, stage: Stage<D>) -> Stage<D> {
        self.stage.replace(stage)
    }

    #[cfg(feature = "arc")]
    fn replace_stage(&self, stage: Stage<D>) -> Stage<D> {
        std::mem::replace(&mut *self.stage.lock(), stage)
    }

    #[cfg(not(feature = "arc"))]
    fn inspect_stage<R>(&self, inspect: impl FnOnce(&Stage<D>) -> R) -> R {
        let stage = self.stage.replace(Stage::Poisoned);
        let result = inspect(&stage);
        self.stage.set(stage);
        result
    }

    #[cfg(feature = "arc")]
    fn inspect_stage<R>(&self, inspect: impl FnOnce(&Stage<D>) -> R) -> R {
        inspect(&self.stage.lock())
    }
}

/// Marks the suspension poisoned if the evaluation unwinds.
struct PoisonOnUnwind<'a, T, D> {
    suspension: &'a Suspension<T, D>,
}

impl<T, D> Drop for PoisonOnUnwind<'_, T, D> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.suspension.replace_stage(Stage::Poisoned);
        }
    }
}

impl<T, D: Deferred<T>> Suspension<T, D> {
    /// Forces evaluation and returns a reference to the value.
    ///
    /// # Panics
    ///
    /// - If the suspension is poisoned by an earlier panicking evaluation.
    /// - If the evaluation panics (the suspension becomes poisoned).
    /// - If called re-entrantly from inside the evaluation (single-threaded
    ///   build).
    pub fn force(&self) -> &T {
        self.value.get_or_init(|| {
            let deferred = match self.replace_stage(Stage::Evaluating) {
                Stage::Pending(deferred) => deferred,
                Stage::Evaluating => panic!("Suspension forced re-entrantly during its own evaluation"),
                Stage::Poisoned => {
                    self.replace_stage(Stage::Poisoned);
                    panic!("Suspension instance has been poisoned")
                }
            };
            let _guard = PoisonOnUnwind { suspension: self };
            tracing::trace!("evaluating suspended computation");
            deferred.evaluate()
        })
    }

    /// Consumes the suspension and returns the value, evaluating it if needed.
    ///
    /// # Panics
    ///
    /// Panics if the suspension is poisoned.
    pub fn into_inner(self) -> T {
        let Self { value, stage } = self;
        if let Some(value) = value.into_inner() {
            return value;
        }
        match stage.into_inner() {
            Stage::Pending(deferred) => deferred.evaluate(),
            Stage::Evaluating | Stage::Poisoned => panic!("Suspension instance has been poisoned"),
        }
    }
}

impl<T, F: FnOnce() -> T> Suspension<T, Thunk<F>> {
    /// Suspends a closure.
    #[inline]
    pub fn from_fn(function: F) -> Self {
        Self::new(Thunk::new(function))
    }
}

impl<T: fmt::Debug, D> fmt::Debug for Suspension<T, D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => formatter.debug_tuple("Suspension").field(value).finish(),
            None if self.is_poisoned() => formatter.write_str("Suspension(<poisoned>)"),
            None if self.is_evaluating() => formatter.write_str("Suspension(<evaluating>)"),
            None => formatter.write_str("Suspension(<pending>)"),
        }
    }
}
