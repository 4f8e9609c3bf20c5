/*!
ref: components/resolver/forward.rs (`ForwardOperation`/`DefaultForward`)

Sends a single query to an upstream server and returns its response.
Boxed behind a trait so the resolver can be driven by a real socket in
production and by a canned in-memory transport in tests, the way
`ForwardOperation` separated the forwarding contract from
`DefaultForward`'s UDP socket.
*/

use crate::dns::message::Message;
use anyhow::{anyhow, Error};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, query: &Message, server: &str) -> Result<Message, Error>;
}

/// UDP with fallback to TCP on a truncated (TC=1) response, per RFC 1035 §4.2.1/§4.2.2.
pub struct UdpTransport {
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(timeout: Duration) -> Self {
        UdpTransport { timeout }
    }

    async fn send_udp(&self, query: &Message, server: &str) -> Result<Message, Error> {
        let sock = UdpSocket::bind("0.0.0.0:0").await?;
        sock.connect(server).await?;
        sock.send(&query.encode()?).await?;

        let mut buf = [0u8; 4096];
        let n = timeout(self.timeout, sock.recv(&mut buf)).await.map_err(|_| anyhow!("upstream query timed out"))??;
        Message::parse(&buf[..n])
    }

    async fn send_tcp(&self, query: &Message, server: &str) -> Result<Message, Error> {
        let mut stream =
            timeout(self.timeout, TcpStream::connect(server)).await.map_err(|_| anyhow!("upstream connect timed out"))??;
        let wire = query.encode()?;
        let mut framed = Vec::with_capacity(2 + wire.len());
        framed.extend_from_slice(&(wire.len() as u16).to_be_bytes());
        framed.extend_from_slice(&wire);
        timeout(self.timeout, stream.write_all(&framed)).await.map_err(|_| anyhow!("upstream write timed out"))??;

        let mut len_buf = [0u8; 2];
        timeout(self.timeout, stream.read_exact(&mut len_buf)).await.map_err(|_| anyhow!("upstream read timed out"))??;
        let len = u16::from_be_bytes(len_buf) as usize;
        let mut resp = vec![0u8; len];
        timeout(self.timeout, stream.read_exact(&mut resp)).await.map_err(|_| anyhow!("upstream read timed out"))??;
        Message::parse(&resp)
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, query: &Message, server: &str) -> Result<Message, Error> {
        let resp = self.send_udp(query, server).await?;
        if resp.header.tc() {
            return self.send_tcp(query, server).await;
        }
        Ok(resp)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned transport keyed by (qname, qtype) for tests that drive the
    /// resolver without a real socket.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<HashMap<(String, u16), Message>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            MockTransport { responses: Mutex::new(HashMap::new()) }
        }

        pub fn stub(&self, qname: &str, qtype: u16, response: Message) {
            self.responses.lock().unwrap().insert((qname.to_string(), qtype), response);
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, query: &Message, _server: &str) -> Result<Message, Error> {
            let q = query.questions.first().ok_or_else(|| anyhow!("no question in query"))?;
            let key = (q.qname().to_string(), q.qtype());
            self.responses.lock().unwrap().get(&key).cloned().ok_or_else(|| anyhow!("no stub for {:?}", key))
        }
    }
}
