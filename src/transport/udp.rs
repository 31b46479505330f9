//! JSON over UDP: one control message per datagram

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::TransportError;
use crate::channel::{MessageSender, TrySendError};
use crate::message::ControlMessage;

/// Largest datagram accepted; a full `pixels` frame of a long strip fits
const MAX_DATAGRAM_SIZE: usize = 65_507;
/// How often the listener re-checks the shutdown flag while idle
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Background thread decoding datagrams into the message channel
pub struct UdpListener {
    local_addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl UdpListener {
    /// Bind `addr` and start forwarding decoded messages into `messages`
    ///
    /// Invalid datagrams are logged and dropped. The thread exits once
    /// `shutdown` is set.
    pub fn spawn(
        addr: SocketAddr,
        messages: MessageSender<'static>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(POLL_INTERVAL))?;
        let local_addr = socket.local_addr()?;

        let handle = thread::Builder::new()
            .name("udp-listener".into())
            .spawn(move || listen(&socket, messages, &shutdown))?;

        debug!(%local_addr, "listening for control messages");
        Ok(Self { local_addr, handle })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait for the thread to exit; the shutdown flag must already be set
    pub fn join(self) {
        if self.handle.join().is_err() {
            warn!("udp listener thread panicked");
        }
    }
}

fn listen(socket: &UdpSocket, messages: MessageSender<'static>, shutdown: &AtomicBool) {
    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
    while !shutdown.load(Ordering::Relaxed) {
        let (len, from) = match socket.recv_from(&mut buf) {
            Ok(received) => received,
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                continue;
            }
            Err(err) => {
                warn!(%err, "udp receive failed");
                continue;
            }
        };
        trace!(%from, len, "datagram");

        match ControlMessage::decode(&buf[..len]) {
            Ok(message) => {
                if let Err(TrySendError(message)) = messages.try_send(message) {
                    warn!(kind = message.kind(), "{}", TransportError::QueueFull);
                }
            }
            Err(err) => warn!(%from, %err, "dropping control message"),
        }
    }
}

/// Sends published payloads to a single peer
#[derive(Debug)]
pub struct UdpPublisher {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpPublisher {
    pub fn connect(peer: SocketAddr) -> Result<Self, TransportError> {
        let local: SocketAddr = if peer.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(local)?;
        Ok(Self { socket, peer })
    }

    pub const fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Send one payload; the topic is implied by the payload's `type`
    pub fn send(&self, topic: &str, payload: &[u8]) -> Result<(), TransportError> {
        trace!(topic, len = payload.len(), peer = %self.peer, "publish");
        self.socket.send_to(payload, self.peer)?;
        Ok(())
    }
}
