//! Message transports
//!
//! The scheduler only ever polls: [`Transport::try_receive`] must return
//! promptly whether or not a message is pending.

mod udp;

pub use udp::{UdpListener, UdpPublisher};

use core::fmt;
use std::io;

use crate::channel::MessageReceiver;
use crate::message::ControlMessage;

#[derive(Debug)]
pub enum TransportError {
    Io(io::Error),
    /// The inbound queue was full and the message was dropped
    QueueFull,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "transport i/o failed: {err}"),
            Self::QueueFull => write!(f, "inbound message queue is full"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::QueueFull => None,
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Source of control messages and sink for published frames
pub trait Transport {
    /// Next pending message, without blocking
    fn try_receive(&mut self) -> Option<ControlMessage>;

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), TransportError>;
}

/// Transport that never receives and discards everything published
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn try_receive(&mut self) -> Option<ControlMessage> {
        None
    }

    fn publish(&mut self, _topic: &str, _payload: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Scheduler side of a channel fed by a listener thread
pub struct QueueTransport<'a> {
    messages: MessageReceiver<'a>,
    publisher: Option<UdpPublisher>,
}

impl<'a> QueueTransport<'a> {
    pub const fn new(messages: MessageReceiver<'a>) -> Self {
        Self {
            messages,
            publisher: None,
        }
    }

    #[must_use]
    pub fn with_publisher(mut self, publisher: UdpPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }
}

impl Transport for QueueTransport<'_> {
    fn try_receive(&mut self) -> Option<ControlMessage> {
        self.messages.try_receive()
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), TransportError> {
        match &self.publisher {
            Some(publisher) => publisher.send(topic, payload),
            None => Ok(()),
        }
    }
}
