use std::{
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};

use spotscreen_auth::{
    management::MailboxState,
    server::{CallbackServer, ServerError},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time::Instant,
};

async fn start_server() -> CallbackServer {
    let mut server = CallbackServer::new();
    server
        .begin_on(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .unwrap();
    server
}

// Sends a raw request and keeps polling until the server has answered it.
async fn roundtrip(server: &mut CallbackServer, raw: &str) -> String {
    let addr = server.local_addr().unwrap();
    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(raw.as_bytes()).await.unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !server.poll().await.unwrap() {
        assert!(Instant::now() < deadline, "request was never served");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let mut response = String::new();
    client.read_to_string(&mut response).await.unwrap();
    response
}

async fn get(server: &mut CallbackServer, target: &str) -> String {
    roundtrip(
        server,
        &format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
    )
    .await
}

#[tokio::test]
async fn test_poll_before_begin_fails() {
    let mut server = CallbackServer::new();

    assert!(matches!(server.poll().await, Err(ServerError::NotStarted)));
    assert!(server.local_addr().is_none());
}

#[tokio::test]
async fn test_poll_without_pending_request_returns_immediately() {
    let mut server = start_server().await;

    let served = tokio::time::timeout(Duration::from_secs(1), server.poll())
        .await
        .expect("poll must not block")
        .unwrap();

    assert!(!served);
    assert_eq!(server.mailbox_state(), MailboxState::Idle);
}

#[tokio::test]
async fn test_root_serves_landing_page() {
    let mut server = start_server().await;

    let response = get(&mut server, "/").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/html\r\n"));
    assert!(response.contains("Spotify Authorization"));
}

#[tokio::test]
async fn test_callback_end_to_end() {
    let mut server = start_server().await;

    let response = get(&mut server, "/callback?code=ABC123").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Authorization Successful"));
    assert!(server.is_authorization_received());
    assert_eq!(server.authorization_code(), "ABC123");

    let response = get(&mut server, "/callback").await;
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Authorization Failed"));
    assert!(server.is_authorization_received());
    assert_eq!(server.authorization_code(), "ABC123");
}

#[tokio::test]
async fn test_clear_then_new_callback() {
    let mut server = start_server().await;

    get(&mut server, "/callback?code=first").await;
    server.clear_authorization_received();
    assert!(!server.is_authorization_received());
    assert_eq!(server.authorization_code(), "first");
    assert_eq!(server.mailbox_state(), MailboxState::Cleared);

    get(&mut server, "/callback?code=second").await;
    assert!(server.is_authorization_received());
    assert_eq!(server.authorization_code(), "second");
}

#[tokio::test]
async fn test_unknown_path_and_method_are_not_found() {
    let mut server = start_server().await;

    let response = get(&mut server, "/settings").await;
    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.contains("404 Not Found"));

    let response = roundtrip(
        &mut server,
        "POST /callback?code=X HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert_eq!(server.mailbox_state(), MailboxState::Idle);
}

#[tokio::test]
async fn test_one_request_per_poll() {
    let mut server = start_server().await;
    let addr = server.local_addr().unwrap();

    let mut first = TcpStream::connect(addr).await.unwrap();
    let mut second = TcpStream::connect(addr).await.unwrap();
    first
        .write_all(b"GET /callback?code=one HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    second
        .write_all(b"GET /callback?code=two HTTP/1.1\r\n\r\n")
        .await
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !server.poll().await.unwrap() {
        assert!(Instant::now() < deadline, "request was never served");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(server.is_authorization_received());
    let after_first = server.authorization_code().to_string();

    while !server.poll().await.unwrap() {
        assert!(Instant::now() < deadline, "request was never served");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_ne!(server.authorization_code(), after_first);

    let mut response = String::new();
    first.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    response.clear();
    second.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_malformed_request_is_dropped() {
    let mut server = start_server().await;

    let response = roundtrip(&mut server, "\r\n\r\n").await;

    assert!(response.is_empty());
    assert_eq!(server.mailbox_state(), MailboxState::Idle);

    // The server keeps serving after a bad client.
    let response = get(&mut server, "/").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_oversized_request_is_dropped() {
    let mut server = start_server().await;
    let addr = server.local_addr().unwrap();

    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(&[b'a'; 9000]).await.unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !server.poll().await.unwrap() {
        assert!(Instant::now() < deadline, "request was never served");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let mut response = Vec::new();
    let _ = client.read_to_end(&mut response).await;
    assert!(response.is_empty());
    assert_eq!(server.mailbox_state(), MailboxState::Idle);

    let response = get(&mut server, "/").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_silent_client_does_not_stall_poll() {
    let mut server = CallbackServer::new().with_read_timeout(Duration::from_millis(100));
    server
        .begin_on(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();

    let mut client = TcpStream::connect(addr).await.unwrap();

    tokio::time::timeout(Duration::from_secs(2), async {
        while !server.poll().await.unwrap() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("poll must give up on a silent client");

    let mut response = Vec::new();
    let _ = client.read_to_end(&mut response).await;
    assert!(response.is_empty());

    let response = get(&mut server, "/").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_undecodable_target_gets_failure_page() {
    let mut server = start_server().await;

    let response = get(&mut server, "/callback?code=<x>").await;

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Authorization Failed"));
    assert_eq!(server.mailbox_state(), MailboxState::Idle);
}

#[test]
fn test_close_error_is_not_reported_as_dropped_request() {
    let err = ServerError::Close(std::io::Error::other("reset by peer"));

    let message = err.to_string();

    assert!(message.contains("closing the connection failed"));
    assert!(message.contains("reset by peer"));
}
