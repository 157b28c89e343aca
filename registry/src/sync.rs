//! Named lock helpers
//!
//! Every lock in the registry is taken through one of these functions so that
//! acquisition and release show up in `trace` level logs. A poisoned lock is
//! recovered rather than propagated: the map operations guarded here cannot
//! leave the data half-written, and callers of the registry expect it to be
//! infallible.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub(crate) fn with_lock<T, F, R>(name: &str, lock: &Mutex<T>, f: F) -> R
where
    F: FnOnce(MutexGuard<'_, T>) -> R,
{
    tracing::trace!(%name, "taking lock");
    let inner = lock.lock().unwrap_or_else(PoisonError::into_inner);
    let res = f(inner);
    tracing::trace!(%name, "releasing lock");
    res
}

pub(crate) fn with_read<T, F, R>(name: &str, lock: &RwLock<T>, f: F) -> R
where
    F: FnOnce(RwLockReadGuard<'_, T>) -> R,
{
    tracing::trace!(%name, "taking read lock");
    let inner = lock.read().unwrap_or_else(PoisonError::into_inner);
    let res = f(inner);
    tracing::trace!(%name, "releasing read lock");
    res
}

pub(crate) fn with_write<T, F, R>(name: &str, lock: &RwLock<T>, f: F) -> R
where
    F: FnOnce(RwLockWriteGuard<'_, T>) -> R,
{
    tracing::trace!(%name, "taking write lock");
    let inner = lock.write().unwrap_or_else(PoisonError::into_inner);
    let res = f(inner);
    tracing::trace!(%name, "releasing write lock");
    res
}
