//! TCP accept loop
//!
//! - One task per connection, each with its own parser
//! - SO_REUSEADDR and TCP_NODELAY on the listening socket
//! - Ctrl-C stops accepting; tasks already running finish on their own

use std::fmt;
use std::future::Future;
use std::io;
use std::net::SocketAddr;

use h1wire_core::{parse_from_async_reader_with, ParserConfig, Request};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Bind and serve until Ctrl-C
pub async fn run(config: &ServerConfig) -> io::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::from_std(create_optimized_socket(&addr)?.into())?;
    info!(%addr, "server listening");

    serve(listener, config.parser.clone(), async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for shutdown signal");
        }
    })
    .await;
    Ok(())
}

/// Accept connections until `shutdown` completes
pub async fn serve<F>(listener: TcpListener, parser: ParserConfig, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutting down server");
                return;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tokio::spawn(handle_connection(stream, peer, parser.clone()));
                }
                Err(e) => warn!(error = %e, "failed to accept connection"),
            },
        }
    }
}

/// Create a TCP listening socket with optimizations
pub fn create_optimized_socket(addr: &SocketAddr) -> io::Result<Socket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // SO_REUSEADDR - allow binding to address in TIME_WAIT
    socket.set_reuse_address(true)?;

    // TCP_NODELAY - disable Nagle's algorithm for lower latency
    socket.set_nodelay(true)?;

    // Required by tokio's from_std
    socket.set_nonblocking(true)?;

    socket.bind(&(*addr).into())?;
    socket.listen(1024)?;

    Ok(socket)
}

async fn handle_connection<S>(mut stream: S, peer: SocketAddr, parser: ParserConfig)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match parse_from_async_reader_with(&mut stream, &parser).await {
        Ok(request) => print!("{}", RequestDump(&request)),
        Err(e) => warn!(%peer, error = %e, "failed to read request"),
    }

    if let Err(e) = stream.shutdown().await {
        warn!(%peer, error = %e, "failed to close connection");
    }
    info!(%peer, "connection closed");
}

/// Human-readable dump of a parsed request; headers sorted by name
struct RequestDump<'a>(&'a Request);

impl fmt::Display for RequestDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = self.0;
        let line = &request.request_line;

        writeln!(f, "Request Line:")?;
        writeln!(f, " - Method: {}", line.method)?;
        writeln!(f, " - Target: {}", line.target)?;
        writeln!(f, " - Version: {}", line.version)?;

        let mut headers: Vec<_> = request.headers.iter().collect();
        headers.sort_unstable();
        writeln!(f, "Headers:")?;
        for (name, value) in headers {
            writeln!(f, " - {name}: {value}")?;
        }

        writeln!(f, "Body:")?;
        writeln!(f, " {}", String::from_utf8_lossy(&request.body))
    }
}
