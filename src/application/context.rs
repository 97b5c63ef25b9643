//! Scoped access to the bus for code that cannot take it as a parameter.
//!
//! [`scope`] makes a bus reachable on the current thread for the duration of
//! a closure. Scopes nest; the innermost one wins and the outer bus comes
//! back when it ends, including on unwind. Reaching for the bus outside any
//! scope is a wiring bug: [`try_current`] reports it as
//! [`DomainError::ScopeMisuse`] and [`use_bus`] panics.
//!
//! The scope is thread-local. A task started with `tokio::spawn` inside a
//! scope may run on another worker and will not see the bus; async code
//! should take a cloned [`NotificationBus`] handle instead.

use super::notification_bus::NotificationBus;
use crate::domain::error::{DomainError, DomainResult};
use std::cell::RefCell;

thread_local! {
    static SCOPES: RefCell<Vec<NotificationBus>> = const { RefCell::new(Vec::new()) };
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| {
            scopes.borrow_mut().pop();
        });
    }
}

pub fn scope<R>(bus: &NotificationBus, f: impl FnOnce() -> R) -> R {
    SCOPES.with(|scopes| scopes.borrow_mut().push(bus.clone()));
    let _guard = ScopeGuard;
    f()
}

pub fn try_current() -> DomainResult<NotificationBus> {
    SCOPES
        .with(|scopes| scopes.borrow().last().cloned())
        .ok_or_else(|| {
            DomainError::ScopeMisuse(
                "notification bus accessed outside of a bus scope".to_string(),
            )
        })
}

pub fn with_bus<R>(f: impl FnOnce(&NotificationBus) -> R) -> DomainResult<R> {
    let bus = try_current()?;
    Ok(f(&bus))
}

/// Like [`try_current`], but panics on misuse.
pub fn use_bus() -> NotificationBus {
    match try_current() {
        Ok(bus) => bus,
        Err(error) => panic!("{}", error),
    }
}
