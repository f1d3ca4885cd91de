use std::io;
use std::net::Ipv4Addr;

use byteorder::{BigEndian, WriteBytesExt};

/// Resource record payload.
///
/// The responder only ever synthesizes IPv4 address records, so this
/// covers exactly that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRData {
    A(Ipv4Addr),
}

impl RRData {
    pub fn typ(&self) -> u16 {
        match *self {
            RRData::A(..) => super::TYPE_A,
        }
    }

    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        match *self {
            RRData::A(ip) => writer.write_u32::<BigEndian>(ip.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::RRData;
    use std::net::Ipv4Addr;

    #[test]
    fn a_record_payload_is_the_address_bytes() {
        let mut buf = Vec::new();
        RRData::A(Ipv4Addr::new(8, 8, 8, 8)).write_to(&mut buf).unwrap();
        assert_eq!(&buf[..], &[8, 8, 8, 8]);
        assert_eq!(RRData::A(Ipv4Addr::new(8, 8, 8, 8)).typ(), 1);
    }
}
