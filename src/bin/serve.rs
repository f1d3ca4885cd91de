use std::net::SocketAddr;
use std::thread;

use log::info;

use stubdns::{Responder, DNS_PORT};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let addr = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<SocketAddr>().expect("invalid listen address"),
        None => SocketAddr::from(([127, 0, 0, 1], DNS_PORT)),
    };

    let responder = Responder::bind(addr)?;
    info!("listening on {}", responder.local_addr());

    loop {
        thread::park();
    }
}
