//! Outbound signal plumbing between the page-side engine and its host.
//!
//! The engine only ever talks to a [`Notify`] capability. Delivery is
//! fire-and-forget: a host that has gone away drops signals silently.

use core_types::Signal;
use serde_json::{Value, json};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Capability exposed by the host collaborator.
pub trait Notify {
    fn notify(&mut self, signal: Signal);
}

impl<N: Notify + ?Sized> Notify for &mut N {
    fn notify(&mut self, signal: Signal) {
        (**self).notify(signal);
    }
}

/// Wire form of a signal: `["show", text]` or `["hide"]`.
pub fn to_message(signal: &Signal) -> Value {
    match signal {
        Signal::Show(text) => json!([signal.kind(), text]),
        Signal::Hide => json!([signal.kind()]),
    }
}

/// Host end backed by an in-process channel; messages are already in wire form.
pub struct ChannelHost {
    tx: Sender<Value>,
}

impl ChannelHost {
    pub fn new(tx: Sender<Value>) -> Self {
        Self { tx }
    }
}

impl Notify for ChannelHost {
    fn notify(&mut self, signal: Signal) {
        if self.tx.send(to_message(&signal)).is_err() {
            log::debug!(target: "bus", "host receiver gone; dropped {} signal", signal.kind());
        }
    }
}

pub struct Bus {
    pub host: ChannelHost,
    pub rx: Receiver<Value>,
}

impl Bus {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            host: ChannelHost::new(tx),
            rx,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps every signal in order. Used by tests and by the CLI's hover replay.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub signals: Vec<Signal>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notify for RecordingHost {
    fn notify(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}
