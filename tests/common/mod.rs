//! Fake HTTP endpoints for integration tests.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};
use url::Url;

use genum::config::{Config, Settings};

/// A canned HTTP response.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn text(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/plain; charset=utf-8",
            body: body.to_owned(),
            delay: Duration::ZERO,
        }
    }

    pub fn json(body: &str) -> Self {
        Self {
            content_type: "application/json; charset=utf-8",
            ..Self::text(body)
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            ..Self::json(body)
        }
    }

    pub fn not_found() -> Self {
        Self::status(404, r#"{"title":"No Definitions Found"}"#)
    }

    pub fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

/// Serves `routes` on a local port until the test ends.
///
/// `routes` receives the request target, path and query, like
/// `/api?words=1&length=5`.
pub async fn serve<F>(routes: F) -> Url
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let _ = respond(stream, routes.as_ref()).await;
            });
        }
    });

    Url::parse(&format!("http://{addr}/")).unwrap()
}

async fn respond<F>(mut stream: TcpStream, routes: &F) -> std::io::Result<()>
where
    F: Fn(&str) -> Reply,
{
    let mut request = Vec::new();
    let mut buf = [0; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&request);
    let target = head.split_whitespace().nth(1).unwrap_or("/").to_owned();
    let reply = routes(&target);

    tokio::time::sleep(reply.delay).await;

    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.content_type,
        reply.body.len(),
        reply.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Configuration pointing every endpoint at `base`.
pub fn config(base: &Url) -> Config {
    let mut settings = Settings::default();
    settings.endpoints.trivia = base.join("trivia").unwrap();
    settings.endpoints.random_word = base.join("api").unwrap();
    settings.endpoints.dictionary = base.join("api/v2/entries/en").unwrap();
    settings.request_timeout_secs = 5;
    Config::new(settings)
}

/// A base URL where nothing listens.
pub async fn unreachable() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}

pub const DOG: &str = r#"[{
    "word": "dog",
    "meanings": [{
        "partOfSpeech": "noun",
        "definitions": [{ "definition": "a domesticated carnivorous mammal" }]
    }]
}]"#;
