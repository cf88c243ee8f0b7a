use crate::config::ResolvedConfig;
use crate::error::{CliError, Result};
use crate::request::ApiRequest;
use log::{debug, trace};

pub struct PixelaClient {
    http: reqwest::Client,
    config: ResolvedConfig,
}

impl PixelaClient {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Send the request once and return the raw response body. Any status
    /// above 299 becomes [`CliError::Remote`] carrying the body bytes as-is.
    pub async fn send(&self, req: &ApiRequest) -> Result<Vec<u8>> {
        debug!("{} {}", req.method, req.url);
        if let Some(body) = req.body_str() {
            trace!("request body: {body}");
        }

        let mut builder = self
            .http
            .request(req.method.clone(), &req.url)
            .headers(req.headers.clone());
        if let Some(ref body) = req.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await.map_err(CliError::Transport)?;
        let status = resp.status().as_u16();
        debug!("response status: {status}");

        let body = resp.bytes().await.map_err(CliError::ResponseRead)?.to_vec();

        if status > 299 {
            return Err(CliError::Remote { status, body });
        }

        Ok(body)
    }

    /// Send the request and print the response body on success.
    pub async fn execute(&self, req: &ApiRequest) -> Result<()> {
        let body = self.send(req).await?;
        crate::output::print_body(&body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use crate::request::USER_TOKEN_HEADER;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use reqwest::Method;

    fn client() -> PixelaClient {
        PixelaClient::new(ResolvedConfig {
            api_base: "pixe.la".into(),
            token: Some("thisissecret".into()),
            username: None,
        })
    }

    fn request(method: Method, url: String, body: Option<&str>) -> ApiRequest {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_TOKEN_HEADER, HeaderValue::from_static("thisissecret"));
        ApiRequest {
            method,
            url,
            headers,
            body: body.map(|b| b.as_bytes().to_vec()),
        }
    }

    #[tokio::test]
    async fn test_send_returns_body_on_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/users/c-know/graphs/g1")
                .header("x-user-token", "thisissecret")
                .header("content-type", "application/json")
                .body(r#"{"date":"20190101","quantity":"5"}"#);
            then.status(200)
                .body(r#"{"message":"Success.","isSuccess":true}"#);
        });

        let req = request(
            Method::POST,
            server.url("/v1/users/c-know/graphs/g1"),
            Some(r#"{"date":"20190101","quantity":"5"}"#),
        );
        let body = client().send(&req).await.unwrap();

        assert_eq!(body, br#"{"message":"Success.","isSuccess":true}"#);
        mock.assert();
    }

    #[tokio::test]
    async fn test_send_accepts_non_200_success_codes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/v1/users/c-know/graphs/g1/increment");
            then.status(201).body("created");
        });

        let req = request(
            Method::PUT,
            server.url("/v1/users/c-know/graphs/g1/increment"),
            None,
        );
        assert_eq!(client().send(&req).await.unwrap(), b"created");
    }

    #[tokio::test]
    async fn test_send_surfaces_error_body_verbatim() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/users/c-know/graphs");
            then.status(404)
                .body(r#"{"message":"User `c-know` does not exist.","isSuccess":false}"#);
        });

        let req = request(Method::GET, server.url("/v1/users/c-know/graphs"), None);
        let err = client().send(&req).await.unwrap_err();

        match &err {
            CliError::Remote { status, body } => {
                assert_eq!(*status, 404);
                assert_eq!(
                    body,
                    br#"{"message":"User `c-know` does not exist.","isSuccess":false}"#
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            r#"{"message":"User `c-know` does not exist.","isSuccess":false}"#
        );
    }

    #[tokio::test]
    async fn test_send_server_error_is_remote_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/v1/users/c-know");
            then.status(503).body("unavailable");
        });

        let req = request(Method::DELETE, server.url("/v1/users/c-know"), None);
        let err = client().send(&req).await.unwrap_err();
        assert!(matches!(err, CliError::Remote { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_send_unreachable_host_is_transport_error() {
        let req = request(Method::GET, "http://127.0.0.1:1/v1/users".into(), None);
        let err = client().send(&req).await.unwrap_err();
        assert!(matches!(err, CliError::Transport(_)));
    }

    #[tokio::test]
    async fn test_execute_returns_ok_on_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/users/c-know/webhooks/hash");
            then.status(200).body(r#"{"isSuccess":true}"#);
        });

        let req = request(
            Method::POST,
            server.url("/v1/users/c-know/webhooks/hash"),
            None,
        );
        client().execute(&req).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_send_keeps_non_utf8_body_bytes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/users/c-know/graphs/g1/stats");
            then.status(200).body(vec![0xff, b'A']);
        });

        let req = request(Method::GET, server.url("/v1/users/c-know/graphs/g1/stats"), None);
        assert_eq!(client().send(&req).await.unwrap(), vec![0xff, b'A']);
    }

    #[tokio::test]
    async fn test_send_keeps_non_utf8_error_body_bytes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/users/c-know/graphs");
            then.status(400).body(vec![b'x', 0xfe]);
        });

        let req = request(Method::GET, server.url("/v1/users/c-know/graphs"), None);
        match client().send(&req).await.unwrap_err() {
            CliError::Remote { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, vec![b'x', 0xfe]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_truncated_body_is_response_read_error() {
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = tokio::io::AsyncReadExt::read(&mut socket, &mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let req = request(Method::GET, format!("http://{addr}/v1/users"), None);
        let err = client().send(&req).await.unwrap_err();
        assert!(matches!(err, CliError::ResponseRead(_)), "got {err:?}");
    }
}
