use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::topics::topic_matches;
use crate::foundation::error::{StimflowError, StimflowResult};

/// One message received from or sent to the broker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Concrete topic.
    pub topic: String,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

impl Message {
    /// Message on `topic` carrying `payload`.
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Why [`Inbound::deliver`] did not queue a message.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The queue is at capacity; the message was dropped and counted.
    #[error("inbound queue full, message dropped")]
    Full,
    /// The consumer is gone.
    #[error("inbound queue closed")]
    Closed,
}

/// Sending half of the client's inbound queue, handed to the transport on connect.
#[derive(Clone, Debug)]
pub struct Inbound {
    tx: mpsc::Sender<Message>,
    dropped: Arc<AtomicU64>,
}

impl Inbound {
    pub(crate) fn new(tx: mpsc::Sender<Message>, dropped: Arc<AtomicU64>) -> Self {
        Self { tx, dropped }
    }

    /// Queue `msg` for the consumer task. Never blocks the calling transport thread.
    pub fn deliver(&self, msg: Message) -> Result<(), DeliveryError> {
        match self.tx.try_send(msg) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(msg)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(topic = %msg.topic, "telemetry queue full, dropping message");
                Err(DeliveryError::Full)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(DeliveryError::Closed),
        }
    }
}

/// Broker connection used by [`TelemetryClient`].
///
/// Implementations push received messages into the [`Inbound`] given to `connect`, from whatever
/// thread their network loop runs on.
pub trait Transport: Send {
    /// Open the connection; received messages go to `inbound`.
    fn connect(&mut self, inbound: Inbound) -> StimflowResult<()>;
    /// Close the connection. Must be safe to call when not connected.
    fn disconnect(&mut self) -> StimflowResult<()>;
    /// Send `payload` on `topic`.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> StimflowResult<()>;
    /// Ask the broker for messages matching `filter`.
    fn subscribe(&mut self, filter: &str) -> StimflowResult<()>;
}

type Handler = Arc<dyn Fn(&Message) + Send + Sync>;

struct Subscription {
    filter: String,
    handler: Handler,
}

struct Running {
    shutdown: oneshot::Sender<()>,
    consumer: JoinHandle<()>,
}

enum State {
    Idle,
    Running(Running),
    Stopped,
}

/// Device telemetry client with an explicit `start`/`stop` lifecycle.
///
/// Handlers run only on the client's consumer task, never on the transport's thread.
pub struct TelemetryClient<T: Transport> {
    transport: T,
    capacity: usize,
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
    dropped: Arc<AtomicU64>,
    state: State,
}

impl<T: Transport> TelemetryClient<T> {
    /// Client over `transport` with an inbound queue of `capacity` messages.
    pub fn new(transport: T, capacity: usize) -> StimflowResult<Self> {
        if capacity == 0 {
            return Err(StimflowError::telemetry("queue capacity must be > 0"));
        }
        Ok(Self {
            transport,
            capacity,
            subscriptions: Arc::new(Mutex::new(Vec::new())),
            dropped: Arc::new(AtomicU64::new(0)),
            state: State::Idle,
        })
    }

    /// Register `handler` for topics matching `filter`.
    ///
    /// Before `start` the filter is subscribed on connect; while running it is subscribed
    /// immediately.
    pub fn subscribe<F>(&mut self, filter: impl Into<String>, handler: F) -> StimflowResult<()>
    where
        F: Fn(&Message) + Send + Sync + 'static,
    {
        let filter = filter.into();
        match self.state {
            State::Stopped => return Err(StimflowError::telemetry("client is stopped")),
            State::Running(_) => self.transport.subscribe(&filter)?,
            State::Idle => {}
        }
        lock(&self.subscriptions).push(Subscription {
            filter,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Connect the transport and spawn the consumer task. Requires a tokio runtime.
    pub fn start(&mut self) -> StimflowResult<()> {
        match self.state {
            State::Idle => {}
            State::Running(_) => return Err(StimflowError::telemetry("client already started")),
            State::Stopped => return Err(StimflowError::telemetry("client is stopped")),
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| StimflowError::telemetry(format!("no tokio runtime: {e}")))?;

        let (tx, rx) = mpsc::channel(self.capacity);
        self.transport
            .connect(Inbound::new(tx, Arc::clone(&self.dropped)))?;
        let filters: Vec<String> = lock(&self.subscriptions)
            .iter()
            .map(|s| s.filter.clone())
            .collect();
        for filter in &filters {
            self.transport.subscribe(filter)?;
        }

        let (shutdown, shutdown_rx) = oneshot::channel();
        let consumer = runtime.spawn(consume(rx, shutdown_rx, Arc::clone(&self.subscriptions)));
        self.state = State::Running(Running { shutdown, consumer });
        tracing::info!(capacity = self.capacity, filters = filters.len(), "telemetry client started");
        Ok(())
    }

    /// Publish `payload` on `topic`.
    pub fn publish(&mut self, topic: &str, payload: &[u8]) -> StimflowResult<()> {
        if !matches!(self.state, State::Running(_)) {
            return Err(StimflowError::telemetry("client is not running"));
        }
        self.transport.publish(topic, payload)
    }

    /// Disconnect, let the consumer finish the messages already queued, and wait for it.
    ///
    /// Stopping an idle client just marks it stopped; stopping twice is a no-op.
    pub async fn stop(&mut self) -> StimflowResult<()> {
        let state = std::mem::replace(&mut self.state, State::Stopped);
        let State::Running(running) = state else {
            return Ok(());
        };
        let disconnected = self.transport.disconnect();
        let _ = running.shutdown.send(());
        running
            .consumer
            .await
            .map_err(|e| StimflowError::telemetry(format!("consumer task failed: {e}")))?;
        tracing::info!(dropped = self.dropped(), "telemetry client stopped");
        disconnected
    }

    /// Whether the client is between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Messages dropped because the inbound queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

async fn consume(
    mut rx: mpsc::Receiver<Message>,
    mut shutdown: oneshot::Receiver<()>,
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
) {
    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(msg) => dispatch(&subscriptions, &msg),
                None => return,
            },
            _ = &mut shutdown => break,
        }
    }
    rx.close();
    while let Ok(msg) = rx.try_recv() {
        dispatch(&subscriptions, &msg);
    }
}

fn dispatch(subscriptions: &Mutex<Vec<Subscription>>, msg: &Message) {
    // Handlers are called without holding the lock so they may not deadlock on it.
    let handlers: Vec<Handler> = lock(subscriptions)
        .iter()
        .filter(|s| topic_matches(&s.filter, &msg.topic))
        .map(|s| Arc::clone(&s.handler))
        .collect();
    if handlers.is_empty() {
        tracing::debug!(topic = %msg.topic, "no handler for message");
    }
    for handler in handlers {
        handler(msg);
    }
}

fn lock<V>(m: &Mutex<V>) -> std::sync::MutexGuard<'_, V> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-process transport: published messages matching a subscribed filter come straight back in.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    inbound: Option<Inbound>,
    filters: Vec<String>,
    published: Vec<Message>,
}

impl LoopbackTransport {
    /// Disconnected transport with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message published so far, in order.
    pub fn published(&self) -> &[Message] {
        &self.published
    }

    /// Whether `connect` was called without a later `disconnect`.
    pub fn is_connected(&self) -> bool {
        self.inbound.is_some()
    }

    /// Inject `msg` as if it came from the broker, subject to the subscribed filters.
    pub fn inject(&self, msg: Message) -> Result<(), DeliveryError> {
        let Some(inbound) = &self.inbound else {
            return Err(DeliveryError::Closed);
        };
        if self.filters.iter().any(|f| topic_matches(f, &msg.topic)) {
            inbound.deliver(msg)?;
        }
        Ok(())
    }
}

impl Transport for LoopbackTransport {
    fn connect(&mut self, inbound: Inbound) -> StimflowResult<()> {
        self.inbound = Some(inbound);
        Ok(())
    }

    fn disconnect(&mut self) -> StimflowResult<()> {
        self.inbound = None;
        self.filters.clear();
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> StimflowResult<()> {
        if self.inbound.is_none() {
            return Err(StimflowError::telemetry("loopback transport not connected"));
        }
        let msg = Message::new(topic, payload);
        self.published.push(msg.clone());
        match self.inject(msg) {
            // A full queue drops on receive, not on send.
            Ok(()) | Err(DeliveryError::Full) => Ok(()),
            Err(DeliveryError::Closed) => Err(StimflowError::telemetry("inbound queue closed")),
        }
    }

    fn subscribe(&mut self, filter: &str) -> StimflowResult<()> {
        if !self.filters.iter().any(|f| f == filter) {
            self.filters.push(filter.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/telemetry/client.rs"]
mod tests;
