//! WebSocket bidirectional stream driver.
//!
//! Runs two concurrent pumps over one upgraded connection: the outbound
//! pump drains the controller method's sequence and writes `n`/`e`/`c`
//! frames; the inbound pump parses peer frames and demultiplexes them
//! onto the named [`InboundSlots`] the method is reading from. Neither
//! half of the split socket exposes an `is_closed` query, so whichever
//! pump notices the connection is done cancels a shared token the other
//! is also waiting on, instead of polling a flag.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_util::sync::CancellationToken;

use crate::ws::websocket::{WebSocket, WsEvent};

use super::param::ScalarMap;
use super::registry::Route;
use super::slot::{new_slot, InboundSlots, SlotEvent};
use super::wire::{self, InboundFrame, InboundKind};

/// Drives one established WebSocket connection to completion.
pub(crate) async fn drive(ws: WebSocket, route: Arc<Route>, scalars: ScalarMap, cancel: CancellationToken) {
    let (mut sink, mut stream) = ws.split();

    let mut inbound = InboundSlots::new();
    let mut senders: HashMap<&'static str, super::slot::SlotSender> = HashMap::new();
    for name in route.inbound_names {
        let (tx, rx) = new_slot();
        senders.insert(name, tx);
        inbound.insert(name, rx);
    }

    let mut outbound = (route.invoke)(scalars, inbound);
    let done = CancellationToken::new();

    let outbound_task = {
        let done = done.clone();
        let cancel = cancel.clone();
        async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => { done.cancel(); break; }
                    () = done.cancelled() => break,
                    item = outbound.next() => match item {
                        None => {
                            let _ = sink.send(wire::COMPLETE_FRAME.to_owned()).await;
                            let _ = sink.send_close(Some(CloseFrame {
                                code: CloseCode::Normal,
                                reason: wire::CLOSE_REASON.into(),
                            })).await;
                            let _ = sink.close().await;
                            done.cancel();
                            break;
                        }
                        Some(Ok(payload)) => {
                            if sink.send(wire::value_frame(&payload)).await.is_err() {
                                done.cancel();
                                break;
                            }
                        }
                        Some(Err(err)) => {
                            let _ = sink.send(wire::error_frame(&err.to_string())).await;
                            let _ = sink.send_close(None).await;
                            let _ = sink.close().await;
                            done.cancel();
                            break;
                        }
                    }
                }
            }
        }
    };

    let inbound_task = {
        let done = done.clone();
        async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => { done.cancel(); break; }
                    () = done.cancelled() => break,
                    event = stream.recv::<String>() => match event {
                        None | Some(Err(_)) | Some(Ok(WsEvent::Close(_))) => {
                            done.cancel();
                            break;
                        }
                        Some(Ok(WsEvent::Data(text))) => {
                            let Some(frame) = InboundFrame::parse(&text) else { continue };
                            let Some(sender) = senders.get(frame.name.as_str()) else { continue };
                            match frame.kind {
                                InboundKind::Value => {
                                    let _ = sender.send(SlotEvent::Next(frame.payload));
                                }
                                InboundKind::Error => {
                                    let _ = sender.send(SlotEvent::Error(frame.payload));
                                }
                                InboundKind::Complete => {
                                    let _ = sender.send(SlotEvent::Complete);
                                }
                                InboundKind::Final => {
                                    let _ = sender.send(SlotEvent::Next(frame.payload));
                                    let _ = sender.send(SlotEvent::Complete);
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    tokio::join!(outbound_task, inbound_task);
}
