//! A stub DNS responder: every question in a query datagram is echoed
//! back together with one fabricated A record (8.8.8.8). Nothing is
//! resolved, stored, or cached.
//!
//! The wire codec lives in [`dns_parser`] and the request-to-response
//! transform is [`handle`]; both are pure and keep no state between
//! datagrams. [`Responder`] owns the UDP transport on a background
//! thread and shuts it down on drop.

pub mod dns_parser;

mod fsm;
mod net;

use std::io;
use std::net::SocketAddr;
use std::thread;

use tokio::sync::mpsc::UnboundedSender;

use crate::fsm::{Command, FSM};

pub use crate::dns_parser::Error;
pub use crate::fsm::handle;

/// Default listening port.
pub const DNS_PORT: u16 = 2053;
/// TTL stamped on every fabricated answer.
pub const DEFAULT_TTL: u32 = 60;

/// Handle to a running responder. Dropping it stops the background
/// thread.
pub struct Responder {
    handle: Option<thread::JoinHandle<()>>,
    commands: UnboundedSender<Command>,
    local_addr: SocketAddr,
}

impl Responder {
    /// Binds 127.0.0.1:2053 and starts responding.
    pub fn new() -> io::Result<Responder> {
        Self::bind(SocketAddr::from(([127, 0, 0, 1], DNS_PORT)))
    }

    /// Binds `addr` and starts responding on a background thread.
    ///
    /// Bind and socket-registration failures are returned before any
    /// thread is spawned.
    pub fn bind(addr: SocketAddr) -> io::Result<Responder> {
        let socket = net::bind_udp(addr)?;
        let local_addr = socket.local_addr()?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()?;
        let (fsm, commands) = {
            // UdpSocket::from_std needs the reactor in scope
            let _guard = rt.enter();
            FSM::new(socket)?
        };

        let handle = thread::Builder::new()
            .name("dns-responder".to_owned())
            .spawn(move || rt.block_on(fsm))?;

        Ok(Responder {
            handle: Some(handle),
            commands,
            local_addr,
        })
    }

    /// The bound address, useful when binding port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
