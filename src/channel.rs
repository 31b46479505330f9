//! Bounded inbound queue between the transport thread and the scheduler.
//!
//! Built on `critical-section` and a fixed-capacity `heapless::Deque`, so
//! the storage can live in a `static` and no allocation happens per message.
//! The listener thread is the only producer and the frame scheduler the only
//! consumer; neither side ever blocks.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::message::ControlMessage;

/// Default inbound queue depth
pub const MESSAGE_QUEUE_SIZE: usize = 32;

/// Returned by [`Channel::try_send`] when the queue is full; holds the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Bounded FIFO guarded by a critical section
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Append a value, handing it back if the queue is full
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(TrySendError)
        })
    }

    /// Pop the oldest value, if any
    pub fn try_receive(&self) -> Option<T> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        SIZE
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// Consumer handle of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Option<T> {
        self.channel.try_receive()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

/// Queue of decoded control messages
pub type MessageChannel<const SIZE: usize = MESSAGE_QUEUE_SIZE> = Channel<ControlMessage, SIZE>;

pub type MessageSender<'a, const SIZE: usize = MESSAGE_QUEUE_SIZE> =
    Sender<'a, ControlMessage, SIZE>;

pub type MessageReceiver<'a, const SIZE: usize = MESSAGE_QUEUE_SIZE> =
    Receiver<'a, ControlMessage, SIZE>;
