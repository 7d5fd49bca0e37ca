use std::fmt;
use std::rc::Rc;

/// Handle returned by `subscribe` and `watch`.
///
/// Dropping a `Subscription` does **not** remove the observer; call
/// [`unsubscribe`](Self::unsubscribe), or convert it with
/// [`guard`](Self::guard) to tie the observer to a scope.
#[derive(Clone)]
#[must_use = "dropping a Subscription keeps the observer registered; call `unsubscribe` to remove it"]
pub struct Subscription {
    remove: Rc<dyn Fn()>,
}

impl Subscription {
    pub(crate) fn new(remove: impl Fn() + 'static) -> Self {
        Self {
            remove: Rc::new(remove),
        }
    }

    /// Remove the observer. Calling this more than once is harmless.
    pub fn unsubscribe(&self) {
        (self.remove)();
    }

    /// Turn this handle into a guard that unsubscribes when dropped.
    pub fn guard(self) -> SubscriptionGuard {
        SubscriptionGuard { subscription: self }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// RAII guard for a [`Subscription`].
#[must_use = "the observer is removed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SubscriptionGuard {
    subscription: Subscription,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting() -> (Subscription, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        (Subscription::new(move || seen.set(seen.get() + 1)), calls)
    }

    #[test]
    fn drop_does_not_unsubscribe() {
        let (subscription, calls) = counting();
        drop(subscription);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn guard_unsubscribes_on_drop() {
        let (subscription, calls) = counting();
        {
            let _guard = subscription.guard();
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unsubscribe_through_clone() {
        let (subscription, calls) = counting();
        let copy = subscription.clone();
        copy.unsubscribe();
        subscription.unsubscribe();
        assert_eq!(calls.get(), 2);
    }
}
