//=========================================================================
// Event Bus
//=========================================================================
//
// Synchronous publish/subscribe channel for zero-payload notifications.
//
// Architecture:
//   Subscriber ──subscribe()──> [(id, handler), ...]  (registration order)
//                                      ↓
//   Publisher  ──publish(ctx)──> handler(ctx) for each, in order
//                                      ↓
//   Subscriber ──unsubscribe(id)──> entry removed (unknown id: no-op)
//
// Handlers receive the shared context at publish time instead of holding
// references to it, so the bus never owns the state it mutates.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::error::{HandlerResult, RuntimeError};

//=== Public API ==========================================================

/// Handle identifying one subscription on an [`EventBus`].
///
/// Returned by [`EventBus::subscribe`] and required to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Boxed handler stored by the bus.
pub type Handler<C> = Box<dyn FnMut(&mut C) -> HandlerResult + Send>;

//=========================================================================

/// Publish/subscribe channel carrying a single notification kind.
///
/// Delivery is synchronous and follows registration order. A failing
/// handler stops delivery and its error is returned from [`publish`].
///
/// [`publish`]: EventBus::publish
pub struct EventBus<C> {
    handlers: Vec<(SubscriptionId, Handler<C>)>,
    next_id: u64,
}

impl<C> EventBus<C> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Registers a handler and returns the id needed to remove it.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C) -> HandlerResult + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        debug!("Subscribed handler {:?} ({} total)", id, self.handlers.len());
        id
    }

    /// Removes a subscription.
    ///
    /// Returns `false` when the id is not registered; that is not an error.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.handlers.iter().position(|(sub, _)| *sub == id) {
            Some(pos) => {
                self.handlers.remove(pos);
                debug!("Unsubscribed handler {:?} ({} left)", id, self.handlers.len());
                true
            }
            None => {
                trace!("Unsubscribe of unknown handler {:?} ignored", id);
                false
            }
        }
    }

    //--- Delivery ---------------------------------------------------------

    /// Invokes every subscribed handler with `ctx`, in registration order.
    ///
    /// Publishing with no subscribers does nothing.
    pub fn publish(&mut self, ctx: &mut C) -> Result<(), RuntimeError> {
        trace!("Publishing to {} handler(s)", self.handlers.len());
        for (_, handler) in self.handlers.iter_mut() {
            handler(ctx)?;
        }
        Ok(())
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if `id` is currently subscribed.
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.handlers.iter().any(|(sub, _)| *sub == id)
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_noop() {
        let mut bus: EventBus<Vec<u32>> = EventBus::new();
        let mut log = Vec::new();

        assert!(bus.publish(&mut log).is_ok());
        assert!(log.is_empty());
        assert!(bus.is_empty());
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let mut bus: EventBus<Vec<u32>> = EventBus::new();
        bus.subscribe(|log: &mut Vec<u32>| {
            log.push(1);
            Ok(())
        });
        bus.subscribe(|log: &mut Vec<u32>| {
            log.push(2);
            Ok(())
        });
        bus.subscribe(|log: &mut Vec<u32>| {
            log.push(3);
            Ok(())
        });

        let mut log = Vec::new();
        bus.publish(&mut log).unwrap();

        assert_eq!(log, vec![1, 2, 3]);
    }

    #[test]
    fn each_publish_invokes_each_handler_once() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.subscribe(|count: &mut u32| {
            *count += 1;
            Ok(())
        });

        let mut count = 0;
        bus.publish(&mut count).unwrap();
        bus.publish(&mut count).unwrap();

        assert_eq!(count, 2);
    }

    #[test]
    fn unsubscribed_handler_is_not_invoked() {
        let mut bus: EventBus<u32> = EventBus::new();
        let id = bus.subscribe(|count: &mut u32| {
            *count += 1;
            Ok(())
        });

        assert!(bus.unsubscribe(id));

        let mut count = 0;
        bus.publish(&mut count).unwrap();
        assert_eq!(count, 0);
        assert!(!bus.is_subscribed(id));
    }

    #[test]
    fn unsubscribing_unknown_id_is_noop() {
        let mut bus: EventBus<u32> = EventBus::new();
        let id = bus.subscribe(|_: &mut u32| Ok(()));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.len(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_unsubscribe() {
        let mut bus: EventBus<u32> = EventBus::new();
        let first = bus.subscribe(|_: &mut u32| Ok(()));
        bus.unsubscribe(first);
        let second = bus.subscribe(|_: &mut u32| Ok(()));

        assert_ne!(first, second);
        assert!(!bus.unsubscribe(first));
        assert!(bus.is_subscribed(second));
    }

    #[test]
    fn handler_error_propagates_and_stops_delivery() {
        let mut bus: EventBus<Vec<u32>> = EventBus::new();
        bus.subscribe(|log: &mut Vec<u32>| {
            log.push(1);
            Ok(())
        });
        bus.subscribe(|_: &mut Vec<u32>| Err(RuntimeError::Handler("boom".into())));
        bus.subscribe(|log: &mut Vec<u32>| {
            log.push(3);
            Ok(())
        });

        let mut log = Vec::new();
        let result = bus.publish(&mut log);

        assert_eq!(result, Err(RuntimeError::Handler("boom".into())));
        assert_eq!(log, vec![1]);
    }
}
