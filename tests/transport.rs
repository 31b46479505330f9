mod tests {
    use std::net::{SocketAddr, UdpSocket};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    use tree_lights::transport::{NullTransport, QueueTransport, UdpListener, UdpPublisher};
    use tree_lights::{Action, ControlMessage, MessageChannel, Transport};

    fn loopback() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    fn receive_within(transport: &mut impl Transport, timeout: Duration) -> Option<ControlMessage> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(message) = transport.try_receive() {
                return Some(message);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_listener_forwards_valid_messages_only() {
        static MESSAGES: MessageChannel = MessageChannel::new();
        let shutdown = Arc::new(AtomicBool::new(false));
        let listener =
            UdpListener::spawn(loopback(), MESSAGES.sender(), Arc::clone(&shutdown)).unwrap();

        let client = UdpSocket::bind(loopback()).unwrap();
        client
            .send_to(br#"{"type": "action", "action": "explode"}"#, listener.local_addr())
            .unwrap();
        client.send_to(b"garbage", listener.local_addr()).unwrap();
        client
            .send_to(br#"{"type": "action", "action": "spin"}"#, listener.local_addr())
            .unwrap();

        let mut transport = QueueTransport::new(MESSAGES.receiver());
        assert_eq!(
            receive_within(&mut transport, Duration::from_secs(2)),
            Some(ControlMessage::Action(Action::Spin))
        );
        assert_eq!(transport.try_receive(), None);

        shutdown.store(true, Ordering::Relaxed);
        listener.join();
    }

    #[test]
    fn test_listener_drops_messages_while_the_queue_is_full() {
        static MESSAGES: MessageChannel = MessageChannel::new();
        let shutdown = Arc::new(AtomicBool::new(false));
        let listener =
            UdpListener::spawn(loopback(), MESSAGES.sender(), Arc::clone(&shutdown)).unwrap();
        while MESSAGES.try_send(ControlMessage::Ping).is_ok() {}

        let client = UdpSocket::bind(loopback()).unwrap();
        client
            .send_to(br#"{"type": "pixels", "leds": [255, 255]}"#, listener.local_addr())
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));

        let mut transport = QueueTransport::new(MESSAGES.receiver());
        let mut drained = 0;
        while let Some(message) = transport.try_receive() {
            assert_eq!(message, ControlMessage::Ping);
            drained += 1;
        }
        assert_eq!(drained, MESSAGES.capacity());

        client
            .send_to(br#"{"type": "action", "action": "next"}"#, listener.local_addr())
            .unwrap();
        assert_eq!(
            receive_within(&mut transport, Duration::from_secs(2)),
            Some(ControlMessage::Action(Action::Next))
        );

        shutdown.store(true, Ordering::Relaxed);
        listener.join();
    }

    #[test]
    fn test_publisher_sends_payload_to_peer() {
        static MESSAGES: MessageChannel = MessageChannel::new();
        let peer = UdpSocket::bind(loopback()).unwrap();
        peer.set_read_timeout(Some(Duration::from_secs(2))).unwrap();

        let publisher = UdpPublisher::connect(peer.local_addr().unwrap()).unwrap();
        let mut transport = QueueTransport::new(MESSAGES.receiver()).with_publisher(publisher);
        transport.publish("pixels", b"{\"type\":\"ping\"}").unwrap();

        let mut buf = [0u8; 64];
        let (len, _) = peer.recv_from(&mut buf).unwrap();
        assert_eq!(
            ControlMessage::decode(&buf[..len]).unwrap(),
            ControlMessage::Ping
        );
    }

    #[test]
    fn test_null_transport_is_silent() {
        let mut transport = NullTransport;
        assert_eq!(transport.try_receive(), None);
        assert!(transport.publish("pixels", b"[]").is_ok());
    }
}
