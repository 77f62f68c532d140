//! UDP discovery against a running server

use anyhow::Result;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tokio::net::UdpSocket;

use test_helpers::{loopback_config, spawn_test_server, spawn_test_server_with};

#[tokio::test]
async fn test_probe_gets_exactly_one_reply() -> Result<()> {
    let server = spawn_test_server().await?;

    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    socket.send_to(b"CCS DISCOVER", server.addr).await?;

    let mut buf = [0u8; 64];
    let (len, from) =
        tokio::time::timeout(Duration::from_secs(2), socket.recv_from(&mut buf)).await??;
    assert_eq!(&buf[..len], b"CCS FOUND");
    assert_eq!(from.port(), server.addr.port());

    // No second datagram follows
    let extra = tokio::time::timeout(Duration::from_millis(200), socket.recv_from(&mut buf)).await;
    assert!(extra.is_err());

    server.shutdown().await
}

#[tokio::test]
async fn test_unrecognized_payload_is_ignored() -> Result<()> {
    let server = spawn_test_server().await?;

    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    socket.send_to(b"WHO IS THERE", server.addr).await?;

    let mut buf = [0u8; 64];
    let reply = tokio::time::timeout(Duration::from_millis(200), socket.recv_from(&mut buf)).await;
    assert!(reply.is_err());

    // Responder is still alive afterwards
    socket.send_to(b"CCS DISCOVER\n", server.addr).await?;
    let (len, _) =
        tokio::time::timeout(Duration::from_secs(2), socket.recv_from(&mut buf)).await??;
    assert_eq!(&buf[..len], b"CCS FOUND");

    server.shutdown().await
}

#[tokio::test]
async fn test_client_discovery_then_connect() -> Result<()> {
    let server = spawn_test_server().await?;

    let found = ccs::discover_server_at(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        server.addr.port(),
        Duration::from_secs(2),
    )
    .await?
    .expect("server should answer");
    assert_eq!(found, server.addr);

    let mut client = ccs::CalculatorClient::connect(found).await?;
    assert_eq!(client.request("SUB 3 5").await?, "-2");

    server.shutdown().await
}

#[tokio::test]
async fn test_discovery_does_not_touch_statistics() -> Result<()> {
    let server = spawn_test_server().await?;

    let found = ccs::discover_server_at(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        server.addr.port(),
        Duration::from_secs(2),
    )
    .await?;
    assert!(found.is_some());
    assert!(server.stats.lifetime().is_empty());

    server.shutdown().await
}

#[tokio::test]
async fn test_discovery_disabled_in_config() -> Result<()> {
    let mut config = loopback_config(Duration::from_secs(10));
    config.discovery.enabled = false;
    let server = spawn_test_server_with(config).await?;

    let found = ccs::discover_server_at(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        server.addr.port(),
        Duration::from_millis(200),
    )
    .await?;
    assert!(found.is_none());

    server.shutdown().await
}
