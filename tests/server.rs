use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use trellis::middleware::Trace;
use trellis::{Request, Router, Server};

async fn get_product(req: Request) -> String {
    format!("product {}", req.var("pid").unwrap_or("?"))
}

async fn raw_request(addr: std::net::SocketAddr, head: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(head.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn serves_routes_over_tcp_and_shuts_down() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let router = Router::new()
        .middleware(Trace::new())
        .get("/products/:pid", get_product);

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(Server::from_listener(listener).serve_with_shutdown(router, async {
        let _ = stopped.await;
    }));

    let res = raw_request(
        addr,
        "GET /products/999 HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(res.starts_with("HTTP/1.1 200 OK"), "{res}");
    assert!(res.ends_with("product 999"), "{res}");

    let res = raw_request(
        addr,
        "DELETE /products/1 HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(res.starts_with("HTTP/1.1 405 Method Not Allowed"), "{res}");

    let res = raw_request(
        addr,
        "GET /nowhere HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(res.starts_with("HTTP/1.1 404 Not Found"), "{res}");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().get("/products/:pid", get_product);

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(Server::from_listener(listener).serve_with_shutdown(router, async {
        let _ = stopped.await;
    }));

    // HTTP/1.1 keeps the connection open after the response by default.
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /products/7 HTTP/1.1\r\nhost: localhost\r\n\r\n")
        .await
        .unwrap();

    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.ends_with(b"product 7") {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the response arrived");
        buf.extend_from_slice(&chunk[..n]);
    }
    assert!(buf.starts_with(b"HTTP/1.1 200 OK"));

    stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server kept waiting on an idle connection")
        .unwrap()
        .unwrap();

    // The server hung up on its side.
    let n = stream.read(&mut chunk).await.unwrap_or(0);
    assert_eq!(n, 0);
}

#[tokio::test]
async fn bind_failure_is_reported() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap();

    let result = Server::bind(addr.to_string())
        .serve_with_shutdown(Router::new(), std::future::pending())
        .await;
    assert!(matches!(result, Err(trellis::Error::Io(_))));
}
