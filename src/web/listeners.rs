use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::TcpListener;

// Pending-connection backlog for the wildcard sockets
const LISTEN_BACKLOG: i32 = 1024;

/// Binds the host listener. `*` means every interface: an IPv6 dual-stack
/// socket when the system allows it, IPv4 otherwise.
pub async fn create_listener(host: &str, port: u16) -> std::io::Result<(String, TcpListener)> {
    if host != "*" {
        let addr = format!("{}:{}", host, port);
        tracing::info!("Binding gateway to {}...", addr);
        let listener = TcpListener::bind(&addr).await?;
        return Ok((addr, listener));
    }

    let ipv6 = SocketAddr::from((Ipv6Addr::UNSPECIFIED, port));
    match bind_wildcard(Domain::IPV6, ipv6) {
        Ok(listener) => return Ok((ipv6.to_string(), listener)),
        Err(e) => tracing::warn!("IPv6 wildcard bind failed ({}), falling back to IPv4", e),
    }

    let ipv4 = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = bind_wildcard(Domain::IPV4, ipv4)?;
    Ok((ipv4.to_string(), listener))
}

fn bind_wildcard(domain: Domain, addr: SocketAddr) -> std::io::Result<TcpListener> {
    tracing::info!("Binding gateway to {}...", addr);

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if domain == Domain::IPV6 {
        // Some systems refuse dual-stack; IPv6-only still serves.
        if let Err(e) = socket.set_only_v6(false) {
            tracing::warn!("Could not enable dual-stack mode: {}", e);
        }
    }

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    socket.set_nonblocking(true)?;

    TcpListener::from_std(socket.into())
}
