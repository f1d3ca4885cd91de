use std::collections::VecDeque;
use std::io;
use std::io::ErrorKind::WouldBlock;
use std::net::{Ipv4Addr, SocketAddr};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use log::{error, trace, warn};
use tokio::{net::UdpSocket, sync::mpsc};

use crate::dns_parser::{self, Builder, Packet, RRData, CLASS_IN};
use crate::DEFAULT_TTL;

/// The fixed answer payload. Nothing is resolved, every question gets
/// this address back.
const PLACEHOLDER_ADDR: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

#[derive(Clone, Debug)]
pub enum Command {
    Shutdown,
}

/// The receive/respond loop for one UDP socket.
///
/// Each datagram is handled to completion before the next: decode the
/// request, build the response, queue it for the originating address.
/// Nothing is carried over between datagrams.
pub struct FSM {
    socket: UdpSocket,
    commands: mpsc::UnboundedReceiver<Command>,
    outgoing: VecDeque<(Vec<u8>, SocketAddr)>,
}

/// Transforms one request datagram into one response datagram.
///
/// The response carries the request's id and flags with the response bit
/// set, echoes every question, and appends one placeholder A record per
/// question. Any decode error aborts the whole transform; the caller
/// must send nothing for that datagram.
pub fn handle(buffer: &[u8]) -> Result<Vec<u8>, dns_parser::Error> {
    let packet = Packet::parse(buffer)?;

    let mut builder = Builder::respond_to(&packet.header);
    for question in &packet.questions {
        builder = builder.add_question(question);
    }

    let mut builder = builder.move_to::<dns_parser::Answers>();
    for question in &packet.questions {
        builder = builder.add_answer(
            &question.qname,
            CLASS_IN,
            DEFAULT_TTL,
            &RRData::A(PLACEHOLDER_ADDR),
        );
    }

    Ok(builder.build())
}

impl FSM {
    // Will panic if called from outside the context of a runtime
    pub fn new(
        std_socket: std::net::UdpSocket,
    ) -> io::Result<(FSM, mpsc::UnboundedSender<Command>)> {
        let socket = UdpSocket::from_std(std_socket)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let fsm = FSM {
            socket,
            commands: rx,
            outgoing: VecDeque::new(),
        };

        Ok((fsm, tx))
    }

    fn recv_packets(&mut self, cx: &mut Context) -> io::Result<()> {
        let mut recv_buf = [0u8; 65536];
        loop {
            let mut buf = tokio::io::ReadBuf::new(&mut recv_buf);
            let addr = match self.socket.poll_recv_from(cx, &mut buf) {
                Poll::Ready(Ok(addr)) => addr,
                Poll::Ready(Err(err)) => return Err(err),
                Poll::Pending => break,
            };
            self.handle_packet(buf.filled(), addr);
        }

        Ok(())
    }

    fn handle_packet(&mut self, buffer: &[u8], addr: SocketAddr) {
        trace!("received packet from {:?}", addr);

        match handle(buffer) {
            Ok(response) => self.outgoing.push_back((response, addr)),
            Err(error) => warn!("dropping malformed packet from {:?}: {}", addr, error),
        }
    }
}

impl Future for FSM {
    type Output = ();
    fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<()> {
        let pinned = Pin::get_mut(self);
        while let Poll::Ready(cmd) = Pin::new(&mut pinned.commands).poll_recv(cx) {
            match cmd {
                Some(Command::Shutdown) => return Poll::Ready(()),
                None => {
                    warn!("responder disconnected without shutdown");
                    return Poll::Ready(());
                }
            }
        }

        match pinned.recv_packets(cx) {
            Ok(_) => (),
            Err(e) => error!("ResponderRecvPacket Error: {:?}", e),
        }

        while let Some((ref response, addr)) = pinned.outgoing.pop_front() {
            trace!("sending packet to {:?}", addr);

            match pinned.socket.poll_send_to(cx, response, addr) {
                Poll::Ready(Ok(bytes_sent)) if bytes_sent == response.len() => (),
                Poll::Ready(Ok(_)) => warn!("failed to send entire packet"),
                Poll::Ready(Err(ref ioerr)) if ioerr.kind() == WouldBlock => (),
                Poll::Ready(Err(err)) => warn!("error sending packet {:?}", err),
                Poll::Pending => (),
            }
        }

        Poll::Pending
    }
}
