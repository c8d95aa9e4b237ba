use async_trait::async_trait;
use ferrous_whois_application::ports::WhoisTransport;
use ferrous_whois_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// WHOIS over plain TCP (RFC 3912).
///
/// Each query opens its own connection and drops it before returning. One
/// deadline covers dial, write and read; dropping the returned future closes
/// the socket immediately.
#[derive(Debug, Clone, Default)]
pub struct TcpWhoisTransport;

impl TcpWhoisTransport {
    pub fn new() -> Self {
        Self
    }

    async fn connect(endpoint: &str, local_addr: Option<SocketAddr>) -> io::Result<TcpStream> {
        let mut last_err = None;

        for addr in lookup_host(endpoint).await? {
            if let Some(local) = local_addr {
                if local.is_ipv4() != addr.is_ipv4() {
                    continue;
                }
            }

            let socket = if addr.is_ipv4() {
                TcpSocket::new_v4()?
            } else {
                TcpSocket::new_v6()?
            };
            if let Some(local) = local_addr {
                socket.bind(local)?;
            }

            match socket.connect(addr).await {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no address matching the local address family",
            )
        }))
    }
}

#[async_trait]
impl WhoisTransport for TcpWhoisTransport {
    async fn query(
        &self,
        endpoint: &str,
        query: &str,
        timeout: Duration,
        local_addr: Option<SocketAddr>,
    ) -> Result<String, DomainError> {
        let deadline = Instant::now() + timeout;

        let mut stream = timeout_at(deadline, Self::connect(endpoint, local_addr))
            .await
            .map_err(|_| DomainError::DialFailed {
                server: endpoint.to_string(),
                message: format!("timed out after {:?}", timeout),
            })?
            .map_err(|e| DomainError::DialFailed {
                server: endpoint.to_string(),
                message: e.to_string(),
            })?;

        debug!(server = %endpoint, local = ?local_addr, "WHOIS connection established");

        let line = format!("{}\r\n", query);
        timeout_at(deadline, stream.write_all(line.as_bytes()))
            .await
            .map_err(|_| DomainError::WriteFailed {
                server: endpoint.to_string(),
                message: format!("timed out after {:?}", timeout),
            })?
            .map_err(|e| DomainError::WriteFailed {
                server: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let mut buf = Vec::new();
        timeout_at(deadline, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| DomainError::ReadFailed {
                server: endpoint.to_string(),
                message: format!("timed out after {:?}", timeout),
            })?
            .map_err(|e| DomainError::ReadFailed {
                server: endpoint.to_string(),
                message: e.to_string(),
            })?;

        debug!(server = %endpoint, bytes_received = buf.len(), "WHOIS response read");

        Ok(join_lines(&buf))
    }
}

/// Re-joins the response line by line with `\n`, dropping CR terminators.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn join_lines(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut response = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        response.push_str(line);
        response.push('\n');
    }
    response
}
