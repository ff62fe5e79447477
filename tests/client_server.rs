//! End-to-end tests: the client against the in-process PLC simulator.

use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

use fins_udp::{FinsError, MemoryArea, UdpClient, UdpEndpoint, UdpServer, WordOrder};

/// Starts a simulator on an OS-assigned port and a client pointed at it.
fn pair() -> (UdpClient, UdpServer) {
    let server = UdpServer::new(UdpEndpoint::new(
        "127.0.0.1:0".parse().unwrap(),
        0,
        10,
        0,
    ))
    .unwrap();
    let client = UdpClient::new(
        UdpEndpoint::any(0, 2, 0),
        UdpEndpoint::new(server.local_addr(), 0, 10, 0),
    )
    .unwrap();
    client.set_timeout_ms(2000);
    (client, server)
}

fn teardown(client: UdpClient, server: UdpServer) {
    client.close();
    server.close();
    let _ = server.done().recv();
}

/// A bound socket that never answers, for timeout and cancellation tests.
fn black_hole() -> (UdpSocket, UdpEndpoint) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let endpoint = UdpEndpoint::new(socket.local_addr().unwrap(), 0, 10, 0);
    (socket, endpoint)
}

#[test]
fn words_round_trip() {
    let (client, server) = pair();
    let to_write = vec![5u16, 4, 3, 2, 1];

    client
        .write_words(MemoryArea::DmWord, 100, &to_write)
        .unwrap();
    let values = client.read_words(MemoryArea::DmWord, 100, 5).unwrap();
    assert_eq!(values, to_write);

    teardown(client, server);
}

#[test]
fn string_round_trip_and_truncation() {
    let (client, server) = pair();

    client
        .write_string(MemoryArea::DmWord, 10, "ф1234")
        .unwrap();

    assert_eq!(client.read_string(MemoryArea::DmWord, 12, 1).unwrap(), "12");
    assert_eq!(
        client.read_string(MemoryArea::DmWord, 10, 3).unwrap(),
        "ф1234"
    );
    // Trailing NULs beyond the written bytes are truncated.
    assert_eq!(
        client.read_string(MemoryArea::DmWord, 10, 5).unwrap(),
        "ф1234"
    );

    teardown(client, server);
}

#[test]
fn bytes_round_trip_little_endian_float() {
    let (client, server) = pair();

    client
        .write_bytes(MemoryArea::DmWord, 10, &[0x00, 0x00, 0xC1, 0xA0])
        .unwrap();
    assert_eq!(
        client.read_bytes(MemoryArea::DmWord, 10, 2).unwrap(),
        vec![0x00, 0x00, 0xC1, 0xA0]
    );

    let buf = (-20.0f64).to_bits().to_le_bytes();
    client.write_bytes(MemoryArea::DmWord, 10, &buf).unwrap();
    assert_eq!(
        client.read_bytes(MemoryArea::DmWord, 10, 4).unwrap(),
        vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x34, 0xC0]
    );

    teardown(client, server);
}

#[test]
fn bits_round_trip_with_offsets() {
    let (client, server) = pair();

    client
        .write_bits(MemoryArea::DmBit, 10, 2, &[true, false, true])
        .unwrap();

    assert_eq!(
        client.read_bits(MemoryArea::DmBit, 10, 2, 3).unwrap(),
        vec![true, false, true]
    );
    assert_eq!(
        client.read_bits(MemoryArea::DmBit, 10, 1, 5).unwrap(),
        vec![false, true, false, true, false]
    );

    teardown(client, server);
}

#[test]
fn set_reset_toggle_bit() {
    let (client, server) = pair();

    client.set_bit(MemoryArea::DmBit, 20, 3).unwrap();
    assert_eq!(
        client.read_bits(MemoryArea::DmBit, 20, 3, 1).unwrap(),
        vec![true]
    );

    client.reset_bit(MemoryArea::DmBit, 20, 3).unwrap();
    assert_eq!(
        client.read_bits(MemoryArea::DmBit, 20, 3, 1).unwrap(),
        vec![false]
    );

    client.toggle_bit(MemoryArea::DmBit, 20, 3).unwrap();
    assert_eq!(
        client.read_bits(MemoryArea::DmBit, 20, 3, 1).unwrap(),
        vec![true]
    );
    client.toggle_bit(MemoryArea::DmBit, 20, 3).unwrap();
    assert_eq!(
        client.read_bits(MemoryArea::DmBit, 20, 3, 1).unwrap(),
        vec![false]
    );

    teardown(client, server);
}

#[test]
fn odd_length_write_pads_with_zero() {
    let (client, server) = pair();

    client
        .write_bytes(MemoryArea::DmWord, 200, &[0x01, 0x02, 0x01])
        .unwrap();
    assert_eq!(
        client.read_bytes(MemoryArea::DmWord, 200, 2).unwrap(),
        vec![0x01, 0x02, 0x01, 0x00]
    );

    teardown(client, server);
}

#[test]
fn configured_byte_order_changes_views() {
    let (client, server) = pair();

    client.set_byte_order(WordOrder::LittleEndian);
    client
        .write_words(MemoryArea::DmWord, 500, &[0x1234])
        .unwrap();
    assert_eq!(
        client.read_bytes(MemoryArea::DmWord, 500, 1).unwrap(),
        vec![0x34, 0x12]
    );
    assert_eq!(
        client.read_words(MemoryArea::DmWord, 500, 1).unwrap(),
        vec![0x1234]
    );

    client.set_byte_order(WordOrder::BigEndian);
    assert_eq!(
        client.read_words(MemoryArea::DmWord, 500, 1).unwrap(),
        vec![0x3412]
    );

    teardown(client, server);
}

#[test]
fn incompatible_memory_area_is_rejected() {
    let (client, server) = pair();

    assert!(matches!(
        client.read_words(MemoryArea::DmBit, 0, 1),
        Err(FinsError::IncompatibleMemoryArea(_))
    ));
    assert!(matches!(
        client.read_bits(MemoryArea::DmWord, 0, 0, 1),
        Err(FinsError::IncompatibleMemoryArea(_))
    ));
    assert!(matches!(
        client.write_bytes(MemoryArea::DmWord, 0, &[]),
        Err(FinsError::EmptyWriteRequest)
    ));

    teardown(client, server);
}

#[test]
fn address_range_exceeded_reports_end_code() {
    let (client, server) = pair();

    let err = client
        .read_words(MemoryArea::DmWord, 32767, 1)
        .expect_err("read beyond the DM boundary");
    assert_eq!(err.end_code(), Some(0x1104));

    teardown(client, server);
}

#[test]
fn unsupported_area_end_code_can_be_ignored() {
    let (client, server) = pair();

    let err = client
        .write_words(MemoryArea::HrWord, 0, &[1])
        .expect_err("simulator only serves DM");
    assert_eq!(err.end_code(), Some(0x0402));

    client.set_ignore_end_codes(&[0x0402]);
    client.write_words(MemoryArea::HrWord, 0, &[1]).unwrap();

    client.set_ignore_end_codes(&[]);
    assert!(client.write_words(MemoryArea::HrWord, 0, &[1]).is_err());

    teardown(client, server);
}

#[test]
fn clock_read_is_unsupported_by_simulator() {
    let (client, server) = pair();

    let err = client.read_clock().expect_err("simulator has no clock");
    assert_eq!(err.end_code(), Some(0x0402));

    teardown(client, server);
}

#[test]
fn concurrent_reads_share_one_socket() {
    let (client, server) = pair();

    client
        .write_words(MemoryArea::DmWord, 100, &[9, 8, 7, 6, 5, 4, 3, 2, 1, 0])
        .unwrap();

    thread::scope(|s| {
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let client = &client;
                s.spawn(move || client.read_words(MemoryArea::DmWord, 100, 10))
            })
            .collect();
        for handle in handles {
            let words = handle.join().unwrap().unwrap();
            assert_eq!(words, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        }
    });

    teardown(client, server);
}

#[test]
fn close_wakes_every_pending_read() {
    let (_hole, endpoint) = black_hole();
    let client = UdpClient::new(UdpEndpoint::any(0, 2, 0), endpoint).unwrap();
    // No timeout: the readers wait until cancelled.
    client.set_timeout_ms(0);

    thread::scope(|s| {
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let client = &client;
                s.spawn(move || client.read_words(MemoryArea::DmWord, 100, 10))
            })
            .collect();

        // Let every reader reach its wait before tearing down.
        thread::sleep(Duration::from_millis(200));
        client.close();

        for handle in handles {
            let err = handle.join().unwrap().expect_err("cancelled by close");
            assert!(
                err.is_closed() || matches!(err, FinsError::Closing),
                "unexpected error: {err}"
            );
        }
    });
}

#[test]
fn concurrent_close_is_single_flight_and_reopens() {
    let (client, server) = pair();

    client.write_words(MemoryArea::DmWord, 0, &[42]).unwrap();

    thread::scope(|s| {
        for _ in 0..4 {
            let client = &client;
            s.spawn(move || client.close());
        }
    });

    // Closed and drained; the next operation re-opens lazily.
    assert_eq!(
        client.read_words(MemoryArea::DmWord, 0, 1).unwrap(),
        vec![42]
    );

    teardown(client, server);
}

#[test]
fn response_timeout_is_transient() {
    let (_hole, endpoint) = black_hole();
    let client = UdpClient::new(UdpEndpoint::any(0, 2, 0), endpoint).unwrap();
    client.set_timeout_ms(50);

    let err = client
        .read_words(MemoryArea::DmWord, 0, 1)
        .expect_err("nobody answers");
    assert!(err.is_timeout(), "unexpected error: {err}");

    client.close();
}

#[test]
fn zero_timeout_waits_for_late_reply() {
    let (client, server) = pair();
    client.set_timeout_ms(0);

    client.write_words(MemoryArea::DmWord, 300, &[7]).unwrap();
    assert_eq!(
        client.read_words(MemoryArea::DmWord, 300, 1).unwrap(),
        vec![7]
    );

    teardown(client, server);
}
