//! Inbound stream primitives.
//!
//! The spec describes two interchangeable backings for an inbound parameter
//! slot: a single-subscription proxy, or a subject that queues emissions
//! until its first subscriber attaches. This module picks the queued
//! variant (the design notes recommend it as the safer default, since a
//! method that subscribes asynchronously would otherwise lose early peer
//! frames).
//!
//! An unbounded `mpsc` channel already has queued-until-subscribed
//! semantics for free: `send` never waits on a receiver, so frames that
//! arrive before the controller method starts polling its stream are
//! simply buffered and drained in order once it does. There is no separate
//! "future yielding the observer" to model, since a channel send doesn't
//! need one; method-initiated disposal (dropping the receiving stream)
//! surfaces as a failed `send`, which is exactly the cancellation signal
//! the demux pump needs to stop forwarding frames for that name.

use std::collections::HashMap;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::{BoxStream, Stream, StreamExt};
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

/// One event delivered to a named inbound slot by the demux pump.
pub(crate) enum SlotEvent {
    Next(String),
    Error(String),
    Complete,
}

pin_project! {
    /// A [`Stream`] adapter over an unbounded `mpsc` receiver.
    struct ChannelStream<T> {
        #[pin]
        rx: mpsc::UnboundedReceiver<T>,
    }
}

impl<T> Stream for ChannelStream<T> {
    type Item = T;

    #[inline]
    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.project().rx.poll_recv(cx)
    }
}

/// The sending half of an inbound slot, held by the connection's demux pump.
pub(crate) type SlotSender = mpsc::UnboundedSender<SlotEvent>;

/// Creates a fresh named inbound slot: a sender for the demux pump and the
/// receiving stream of raw string events.
pub(crate) fn new_slot() -> (SlotSender, BoxStream<'static, SlotEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, ChannelStream { rx }.boxed())
}

/// The set of named inbound proxies handed to one invocation.
///
/// Populated with real channel-backed slots for a WebSocket connection
/// (one per declared stream parameter); empty for the HTTP driver, since
/// a single HTTP request carries no named peer-pushed streams.
#[derive(Default)]
pub struct InboundSlots {
    slots: HashMap<&'static str, BoxStream<'static, SlotEvent>>,
}

impl InboundSlots {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &'static str, stream: BoxStream<'static, SlotEvent>) {
        self.slots.insert(name, stream);
    }

    /// Takes the named proxy, mapping each buffered payload through
    /// JSON-decode into `T`. A name with no live slot yields an empty
    /// sequence, matching the "absent name" rule for `getInbound`.
    ///
    /// Payloads that fail to decode are dropped rather than propagated:
    /// the wire protocol has no channel for per-item inbound decode errors
    /// distinct from a slot-level `e` frame. An `e` frame, though, is a
    /// distinct outcome from plain completion (`spec.md` §4.4: "`e` ->
    /// observer.error(payload)"), so it surfaces as one `Err(payload)` item
    /// immediately before the stream ends, instead of being silently
    /// folded into "no more values" the way a `c` frame is.
    pub fn take<T>(&mut self, name: &str) -> BoxStream<'static, Result<T, String>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match self.slots.remove(name) {
            Some(stream) => futures_util::stream::unfold((stream, false), |(mut stream, done)| async move {
                if done {
                    return None;
                }
                loop {
                    match stream.next().await {
                        None | Some(SlotEvent::Complete) => return None,
                        Some(SlotEvent::Error(message)) => return Some((Err(message), (stream, true))),
                        Some(SlotEvent::Next(payload)) => match serde_json::from_str::<T>(&payload) {
                            Ok(value) => return Some((Ok(value), (stream, false))),
                            Err(_) => continue,
                        },
                    }
                }
            })
            .boxed(),
            None => futures_util::stream::empty().boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_queues_frames_sent_before_the_method_subscribes() {
        let (tx, stream) = new_slot();
        tx.send(SlotEvent::Next("1".to_owned())).unwrap();
        tx.send(SlotEvent::Next("2".to_owned())).unwrap();
        drop(tx);

        let mut slots = InboundSlots::new();
        slots.insert("n", stream);
        let values: Vec<Result<i32, String>> = slots.take("n").collect().await;

        assert_eq!(values, vec![Ok(1), Ok(2)]);
    }

    #[tokio::test]
    async fn it_stops_at_complete_and_drops_undecodable_payloads() {
        let (tx, stream) = new_slot();
        tx.send(SlotEvent::Next("1".to_owned())).unwrap();
        tx.send(SlotEvent::Next("not-a-number".to_owned())).unwrap();
        tx.send(SlotEvent::Complete).unwrap();
        tx.send(SlotEvent::Next("3".to_owned())).unwrap();

        let mut slots = InboundSlots::new();
        slots.insert("n", stream);
        let values: Vec<Result<i32, String>> = slots.take("n").collect().await;

        assert_eq!(values, vec![Ok(1)]);
    }

    #[tokio::test]
    async fn it_yields_an_error_item_then_ends_on_an_error_frame() {
        let (tx, stream) = new_slot();
        tx.send(SlotEvent::Next("1".to_owned())).unwrap();
        tx.send(SlotEvent::Error("nope".to_owned())).unwrap();
        tx.send(SlotEvent::Next("3".to_owned())).unwrap();

        let mut slots = InboundSlots::new();
        slots.insert("n", stream);
        let values: Vec<Result<i32, String>> = slots.take("n").collect().await;

        assert_eq!(values, vec![Ok(1), Err("nope".to_owned())]);
    }

    #[tokio::test]
    async fn it_yields_an_empty_stream_for_an_absent_name() {
        let mut slots = InboundSlots::new();
        let values: Vec<Result<i32, String>> = slots.take("missing").collect().await;
        assert!(values.is_empty());
    }
}
