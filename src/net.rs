use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{SocketAddr, UdpSocket};

/// Binds a UDP socket ready to hand to tokio: nonblocking, with
/// address reuse so a restarted responder can rebind immediately.
pub fn bind_udp(addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = Domain::for_address(addr);
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    let addr: SockAddr = addr.into();
    socket.bind(&addr)?;
    Ok(socket.into())
}
