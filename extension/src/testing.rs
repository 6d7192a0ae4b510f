// In-memory stand-ins for chrome.storage, chrome messaging and the counter display

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use async_trait::async_trait;

use crate::counter::CounterDisplay;
use crate::error::{SendError, StorageError};
use crate::messages::{MessageResponse, PopupMessage};
use crate::services::{CounterStore, Messenger};

/// Holds writes back until opened.
#[derive(Clone, Default)]
pub struct Gate {
    inner: Rc<RefCell<GateState>>,
}

#[derive(Default)]
struct GateState {
    open: bool,
    waiters: Vec<Waker>,
}

impl Gate {
    pub fn open(&self) {
        let mut state = self.inner.borrow_mut();
        state.open = true;
        for waker in state.waiters.drain(..) {
            waker.wake();
        }
    }

    fn wait(&self) -> GateWait {
        GateWait { gate: self.clone() }
    }
}

struct GateWait {
    gate: Gate,
}

impl Future for GateWait {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.gate.inner.borrow_mut();
        if state.open {
            Poll::Ready(())
        } else {
            state.waiters.push(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    value: Cell<Option<i64>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
    read_error: RefCell<Option<String>>,
    write_gate: Option<Gate>,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_value(value: i64) -> Self {
        Self {
            value: Cell::new(Some(value)),
            ..Self::default()
        }
    }

    /// Writes block until the returned gate is opened.
    pub fn gated(value: i64) -> (Self, Gate) {
        let gate = Gate::default();
        let store = Self {
            write_gate: Some(gate.clone()),
            ..Self::with_value(value)
        };
        (store, gate)
    }

    pub fn fail_reads(&self, reason: &str) {
        *self.read_error.borrow_mut() = Some(reason.to_string());
    }

    pub fn value(&self) -> Option<i64> {
        self.value.get()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

#[async_trait(?Send)]
impl CounterStore for MemoryStore {
    async fn get(&self) -> Result<Option<i64>, StorageError> {
        if let Some(reason) = self.read_error.borrow().clone() {
            return Err(StorageError::Unavailable(reason));
        }
        self.reads.set(self.reads.get() + 1);
        Ok(self.value.get())
    }

    async fn set(&self, value: i64) -> Result<(), StorageError> {
        if let Some(gate) = &self.write_gate {
            gate.wait().await;
        }
        self.writes.set(self.writes.get() + 1);
        self.value.set(Some(value));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMessenger {
    tab: RefCell<Vec<PopupMessage>>,
    runtime: RefCell<Vec<PopupMessage>>,
    reply: String,
    fail: bool,
    hang_first: bool,
    sent: Cell<usize>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::replying("ok")
    }

    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::default()
        }
    }

    /// Records every message, then reports that no receiver exists.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// The first tab message is recorded but its response never arrives.
    pub fn hanging_first() -> Self {
        Self {
            hang_first: true,
            ..Self::new()
        }
    }

    pub fn tab_messages(&self) -> Vec<PopupMessage> {
        self.tab.borrow().clone()
    }

    pub fn runtime_messages(&self) -> Vec<PopupMessage> {
        self.runtime.borrow().clone()
    }

    fn respond(&self) -> Result<MessageResponse, SendError> {
        if self.fail {
            return Err(SendError::Rejected(
                "Could not establish connection. Receiving end does not exist.".to_string(),
            ));
        }
        Ok(MessageResponse {
            message: self.reply.clone(),
        })
    }
}

#[async_trait(?Send)]
impl Messenger for RecordingMessenger {
    async fn send_to_active_tab(
        &self,
        message: &PopupMessage,
    ) -> Result<MessageResponse, SendError> {
        self.tab.borrow_mut().push(message.clone());
        let sent = self.sent.get();
        self.sent.set(sent + 1);
        if self.hang_first && sent == 0 {
            futures::future::pending::<()>().await;
        }
        self.respond()
    }

    async fn send_to_runtime(&self, message: &PopupMessage) -> Result<MessageResponse, SendError> {
        self.runtime.borrow_mut().push(message.clone());
        self.respond()
    }
}

#[derive(Clone, Default)]
pub struct RecordingDisplay {
    rendered: Rc<RefCell<Vec<i64>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<i64> {
        self.rendered.borrow().clone()
    }
}

impl CounterDisplay for RecordingDisplay {
    fn render(&self, value: i64) {
        self.rendered.borrow_mut().push(value);
    }
}
