//! Synchronous event emission with scoped subscriptions.
//!
//! An [`EventEmitter`] delivers events to its listeners in subscription order.
//! Every [`EventEmitter::subscribe`] call returns a [`Subscription`] guard; the
//! listener stays registered exactly as long as the guard is alive.
//!
//! # Reentrancy
//!
//! [`EventEmitter::emit`] snapshots the listener list before dispatch and
//! releases its lock, so a listener may subscribe, unsubscribe, or emit on the
//! same emitter. A listener removed during a dispatch still receives the event
//! being dispatched.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Shared listener callback.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Listeners<E> {
	next_id: u64,
	entries: Vec<(u64, Listener<E>)>,
}

/// Fan-out point for one kind of event.
pub struct EventEmitter<E> {
	listeners: Arc<Mutex<Listeners<E>>>,
}

impl<E> Default for EventEmitter<E> {
	fn default() -> Self {
		Self {
			listeners: Arc::new(Mutex::new(Listeners {
				next_id: 0,
				entries: Vec::new(),
			})),
		}
	}
}

impl<E> fmt::Debug for EventEmitter<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventEmitter")
			.field("listeners", &self.listeners.lock().entries.len())
			.finish()
	}
}

impl<E: 'static> EventEmitter<E> {
	/// Creates an emitter with no listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` until the returned guard is dropped or cancelled.
	pub fn subscribe(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
		self.subscribe_shared(Arc::new(listener))
	}

	/// Registers an already shared listener.
	pub fn subscribe_shared(&self, listener: Listener<E>) -> Subscription {
		let id = {
			let mut listeners = self.listeners.lock();
			let id = listeners.next_id;
			listeners.next_id += 1;
			listeners.entries.push((id, listener));
			id
		};

		let weak: Weak<Mutex<Listeners<E>>> = Arc::downgrade(&self.listeners);
		Subscription::new(move || {
			if let Some(listeners) = weak.upgrade() {
				listeners.lock().entries.retain(|(entry_id, _)| *entry_id != id);
			}
		})
	}

	/// Delivers `event` to every listener registered at the time of the call.
	pub fn emit(&self, event: &E) {
		let snapshot: Vec<Listener<E>> = self
			.listeners
			.lock()
			.entries
			.iter()
			.map(|(_, listener)| listener.clone())
			.collect();
		for listener in snapshot {
			listener(event);
		}
	}

	/// Returns the number of live listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.lock().entries.len()
	}
}

/// Guard keeping a listener registered.
///
/// Dropping the guard removes the listener. A guard that outlives its emitter
/// does nothing when dropped.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
	cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
	fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}

	/// Returns a guard that is not attached to any emitter.
	pub fn detached() -> Self {
		Self { cancel: None }
	}

	/// Returns true while the guard still owns a registration.
	pub fn is_active(&self) -> bool {
		self.cancel.is_some()
	}

	/// Removes the listener now.
	pub fn cancel(mut self) {
		self.run_cancel();
	}

	fn run_cancel(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.run_cancel();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.is_active())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn listeners_receive_events_in_subscription_order() {
		let emitter = EventEmitter::<u32>::new();
		let seen = Arc::new(Mutex::new(Vec::new()));

		let a = {
			let seen = seen.clone();
			emitter.subscribe(move |value| seen.lock().push(("a", *value)))
		};
		let b = {
			let seen = seen.clone();
			emitter.subscribe(move |value| seen.lock().push(("b", *value)))
		};

		emitter.emit(&7);

		assert_eq!(*seen.lock(), vec![("a", 7), ("b", 7)]);
		drop((a, b));
	}

	#[test]
	fn dropping_subscription_unsubscribes() {
		let emitter = EventEmitter::<()>::new();
		let hits = Arc::new(AtomicUsize::new(0));

		let sub = {
			let hits = hits.clone();
			emitter.subscribe(move |_| {
				hits.fetch_add(1, Ordering::SeqCst);
			})
		};
		emitter.emit(&());
		assert_eq!(emitter.listener_count(), 1);

		drop(sub);
		emitter.emit(&());

		assert_eq!(hits.load(Ordering::SeqCst), 1);
		assert_eq!(emitter.listener_count(), 0);
	}

	#[test]
	fn cancel_is_explicit_unsubscribe() {
		let emitter = EventEmitter::<()>::new();
		let sub = emitter.subscribe(|_| {});
		assert!(sub.is_active());
		sub.cancel();
		assert_eq!(emitter.listener_count(), 0);
	}

	#[test]
	fn subscription_outliving_emitter_is_inert() {
		let emitter = EventEmitter::<()>::new();
		let sub = emitter.subscribe(|_| {});
		drop(emitter);
		drop(sub);
	}

	#[test]
	fn listener_may_unsubscribe_during_dispatch() {
		let emitter = Arc::new(EventEmitter::<()>::new());
		let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
		let hits = Arc::new(AtomicUsize::new(0));

		let sub = {
			let slot = slot.clone();
			let hits = hits.clone();
			emitter.subscribe(move |_| {
				hits.fetch_add(1, Ordering::SeqCst);
				drop(slot.lock().take());
			})
		};
		*slot.lock() = Some(sub);

		emitter.emit(&());
		emitter.emit(&());

		assert_eq!(hits.load(Ordering::SeqCst), 1);
		assert_eq!(emitter.listener_count(), 0);
	}

	#[test]
	fn detached_subscription_is_inactive() {
		assert!(!Subscription::detached().is_active());
	}
}
