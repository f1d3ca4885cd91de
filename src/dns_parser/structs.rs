use super::{Header, Name};

/// Parsed DNS packet: the header plus the question section.
///
/// Answer, nameserver and additional records in a request are irrelevant
/// to a responder that fabricates every answer, so any bytes after the
/// question section are left untouched.
#[derive(Debug)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
}

/// A parsed chunk of data in the Query section of the packet
///
/// qtype and qclass stay raw 16-bit values so questions the responder
/// does not understand are still echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: Name,
    pub qtype: u16,
    pub qclass: u16,
}
