//! Live broadcast of navigation destinations to subscribers.

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Broadcasts values to every current subscriber, in the order they are sent.
///
/// Subscribers registered after a value was sent never see it. An optional
/// gate suppresses emission entirely while it reads `true`.
pub struct Navigator<T> {
	subscribers: Mutex<Vec<mpsc::UnboundedSender<T>>>,
	gate: Option<Arc<AtomicBool>>,
}

impl<T: Clone> Navigator<T> {
	/// Creates a navigator that always emits.
	pub fn new() -> Self {
		Self {
			subscribers: Mutex::new(Vec::new()),
			gate: None,
		}
	}

	/// Creates a navigator that drops values while `suppressed` is `true`.
	pub fn gated(suppressed: Arc<AtomicBool>) -> Self {
		Self {
			subscribers: Mutex::new(Vec::new()),
			gate: Some(suppressed),
		}
	}

	/// Registers a new subscriber, first removing those whose stream was dropped.
	pub fn subscribe(&self) -> NavigationStream<T> {
		let (tx, rx) = mpsc::unbounded_channel();
		let mut subscribers = self.subscribers.lock();
		subscribers.retain(|sender| !sender.is_closed());
		subscribers.push(tx);
		NavigationStream { rx }
	}

	/// Sends `value` to all live subscribers and returns how many received it.
	///
	/// Returns 0 without touching subscribers when the gate is closed.
	/// Subscribers whose stream was dropped are removed.
	pub fn next(&self, value: T) -> usize {
		if self.is_suppressed() {
			tracing::debug!("navigation suppressed by gate");
			return 0;
		}

		let mut subscribers = self.subscribers.lock();
		subscribers.retain(|tx| tx.send(value.clone()).is_ok());
		subscribers.len()
	}

	/// Number of registered subscribers, including ones not yet pruned.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.lock().len()
	}

	fn is_suppressed(&self) -> bool {
		self.gate
			.as_ref()
			.is_some_and(|gate| gate.load(Ordering::Acquire))
	}
}

impl<T: Clone> Default for Navigator<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Subscriber side of a [`Navigator`].
///
/// The stream only ends once the navigator itself is dropped.
#[derive(Debug)]
pub struct NavigationStream<T> {
	rx: mpsc::UnboundedReceiver<T>,
}

impl<T> NavigationStream<T> {
	/// Waits for the next value.
	pub async fn recv(&mut self) -> Option<T> {
		self.rx.recv().await
	}

	/// Returns the next value if one is already queued.
	pub fn try_next(&mut self) -> Option<T> {
		self.rx.try_recv().ok()
	}

	/// Drains every queued value without waiting.
	pub fn drain(&mut self) -> Vec<T> {
		std::iter::from_fn(|| self.try_next()).collect()
	}
}

impl<T> Stream for NavigationStream<T> {
	type Item = T;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		self.rx.poll_recv(cx)
	}
}
