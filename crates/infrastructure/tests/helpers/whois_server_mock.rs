#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Mutex};

#[derive(Clone)]
enum Behavior {
    /// Answer connections with these responses in order; the last one repeats.
    Sequence(Arc<Vec<String>>),
    /// Read the query, then hold the connection open without answering.
    Stall,
}

/// Local WHOIS server for tests.
///
/// Records every raw query line (including its terminator) it receives.
pub struct MockWhoisServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockWhoisServer {
    /// Server answering every connection with `response`.
    pub async fn start(response: &str) -> std::io::Result<Self> {
        Self::start_sequence(vec![response.to_string()]).await
    }

    /// Server answering the n-th connection with `responses[n]`.
    pub async fn start_sequence(responses: Vec<String>) -> std::io::Result<Self> {
        Self::spawn(Behavior::Sequence(Arc::new(responses))).await
    }

    /// Server that never answers.
    pub async fn stalled() -> std::io::Result<Self> {
        Self::spawn(Behavior::Stall).await
    }

    async fn spawn(behavior: Behavior) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let queries = Arc::new(Mutex::new(Vec::new()));
        let served = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_queries = queries.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = listener.accept() => {
                        if let Ok((stream, _peer)) = result {
                            let behavior = behavior.clone();
                            let queries = task_queries.clone();
                            let served = served.clone();
                            tokio::spawn(async move {
                                let _ = Self::serve(stream, behavior, queries, served).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn serve(
        stream: TcpStream,
        behavior: Behavior,
        queries: Arc<Mutex<Vec<String>>>,
        served: Arc<AtomicUsize>,
    ) -> std::io::Result<()> {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).await?;
        queries.lock().await.push(line);

        let mut stream = reader.into_inner();
        match behavior {
            Behavior::Sequence(responses) => {
                let n = served.fetch_add(1, Ordering::SeqCst);
                let response = responses
                    .get(n)
                    .or_else(|| responses.last())
                    .cloned()
                    .unwrap_or_default();
                stream.write_all(response.as_bytes()).await?;
                stream.shutdown().await?;
            }
            Behavior::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn endpoint(&self) -> String {
        self.addr.to_string()
    }

    /// Query lines with their CRLF terminator.
    pub async fn raw_queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    /// Query lines without their terminator.
    pub async fn queries(&self) -> Vec<String> {
        self.raw_queries()
            .await
            .into_iter()
            .map(|q| q.trim_end_matches(['\r', '\n']).to_string())
            .collect()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockWhoisServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Root directory answer in the layout whois.iana.org uses.
pub fn iana_response(tld: &str, server: &str) -> String {
    format!(
        "% IANA WHOIS server\r\n% for more information on IANA, visit http://www.iana.org\r\n% This query returned 1 object\r\n\r\ndomain:       {}\r\n\r\norganisation: Example Registry Services\r\n\r\nwhois:        {}\r\n\r\nstatus:       ACTIVE\r\nremarks:      Registration information: http://www.example.net\r\n\r\ncreated:      1985-01-01\r\nchanged:      2023-12-07\r\nsource:       IANA\r\n",
        tld.to_uppercase(),
        server
    )
}

/// Thin registry record as printed by Verisign.
pub fn thin_registry_response(domain: &str, registrar_whois: &str) -> String {
    format!(
        "   Domain Name: {}\r\n   Registry Domain ID: 1264983250_DOMAIN_COM-VRSN\r\n   Registrar WHOIS Server: {}\r\n   Registrar URL: http://www.markmonitor.com\r\n   Updated Date: 2024-09-07T09:16:33Z\r\n   Creation Date: 2007-10-09T18:20:50Z\r\n   Registry Expiry Date: 2026-10-09T18:20:50Z\r\n   Registrar: MarkMonitor Inc.\r\n   Registrar IANA ID: 292\r\n   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited\r\n   Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited\r\n   Name Server: DNS1.P08.NSONE.NET\r\n   Name Server: NS-1283.AWSDNS-32.ORG\r\n   DNSSEC: unsigned\r\n>>> Last update of whois database: 2025-01-01T00:00:00Z <<<\r\n\r\nNOTICE: The expiration date displayed in this record is the date the\r\nregistrar's sponsorship of the domain name registration in the registry is\r\ncurrently set to expire.\r\n",
        domain.to_uppercase(),
        registrar_whois
    )
}

/// Full registrar record with contacts.
pub fn registrar_response(domain: &str) -> String {
    format!(
        "Domain Name: {}\nRegistry Domain ID: 1264983250_DOMAIN_COM-VRSN\nRegistrar WHOIS Server: whois.markmonitor.com\nRegistrar URL: http://www.markmonitor.com\nUpdated Date: 2024-09-07T09:16:32+0000\nCreation Date: 2007-10-09T18:20:50+0000\nRegistrar Registration Expiration Date: 2026-10-09T07:00:00+0000\nRegistrar: MarkMonitor, Inc.\nRegistrar IANA ID: 292\nRegistrar Abuse Contact Email: abusecomplaints@markmonitor.com\nRegistrar Abuse Contact Phone: +1.2086851750\nRegistrant Organization: GitHub, Inc.\nRegistrant State/Province: CA\nRegistrant Country: US\nRegistrant Email: Select Request Email Form at https://domains.markmonitor.com/whois/github.com\nAdmin Organization: GitHub, Inc.\nAdmin Country: US\nTech Organization: GitHub, Inc.\nTech Country: US\nName Server: dns1.p08.nsone.net\nDNSSEC: unsigned\n",
        domain
    )
}
