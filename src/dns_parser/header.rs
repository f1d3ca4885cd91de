use byteorder::{BigEndian, ByteOrder};

use super::{Error, ResponseCode};

/// Fixed 12-byte header of a DNS message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub query: bool,
    /// Raw 4-bit opcode. Kept as an integer so unknown values survive a
    /// decode/encode round trip.
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// The 3 reserved bits.
    pub reserved: u8,
    pub response_code: ResponseCode,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

mod flag {
    pub const RESPONSE: u16 = 0x8000;
    pub const OPCODE_MASK: u16 = 0x7800;
    pub const OPCODE_SHIFT: u16 = 11;
    pub const AUTHORITATIVE: u16 = 0x0400;
    pub const TRUNCATED: u16 = 0x0200;
    pub const RECURSION_DESIRED: u16 = 0x0100;
    pub const RECURSION_AVAILABLE: u16 = 0x0080;
    pub const RESERVED_MASK: u16 = 0x0070;
    pub const RESERVED_SHIFT: u16 = 4;
    pub const RESPONSE_CODE_MASK: u16 = 0x000F;
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < Self::size() {
            return Err(Error::HeaderTooShort);
        }
        let flags = BigEndian::read_u16(&data[2..4]);
        Ok(Header {
            id: BigEndian::read_u16(&data[..2]),
            query: flags & flag::RESPONSE == 0,
            opcode: ((flags & flag::OPCODE_MASK) >> flag::OPCODE_SHIFT) as u8,
            authoritative: flags & flag::AUTHORITATIVE != 0,
            truncated: flags & flag::TRUNCATED != 0,
            recursion_desired: flags & flag::RECURSION_DESIRED != 0,
            recursion_available: flags & flag::RECURSION_AVAILABLE != 0,
            reserved: ((flags & flag::RESERVED_MASK) >> flag::RESERVED_SHIFT) as u8,
            response_code: ResponseCode::from((flags & flag::RESPONSE_CODE_MASK) as u8),
            questions: BigEndian::read_u16(&data[4..6]),
            answers: BigEndian::read_u16(&data[6..8]),
            nameservers: BigEndian::read_u16(&data[8..10]),
            additional: BigEndian::read_u16(&data[10..12]),
        })
    }

    /// Packs the header into the first 12 bytes of `data`.
    ///
    /// # Panics
    ///
    /// When `data` is shorter than 12 bytes.
    pub fn write(&self, data: &mut [u8]) {
        BigEndian::write_u16(&mut data[..2], self.id);
        let mut flags = 0;
        if !self.query {
            flags |= flag::RESPONSE;
        }
        flags |= (self.opcode as u16) << flag::OPCODE_SHIFT & flag::OPCODE_MASK;
        if self.authoritative {
            flags |= flag::AUTHORITATIVE;
        }
        if self.truncated {
            flags |= flag::TRUNCATED;
        }
        if self.recursion_desired {
            flags |= flag::RECURSION_DESIRED;
        }
        if self.recursion_available {
            flags |= flag::RECURSION_AVAILABLE;
        }
        flags |= (self.reserved as u16) << flag::RESERVED_SHIFT & flag::RESERVED_MASK;
        flags |= u8::from(self.response_code) as u16 & flag::RESPONSE_CODE_MASK;
        BigEndian::write_u16(&mut data[2..4], flags);
        BigEndian::write_u16(&mut data[4..6], self.questions);
        BigEndian::write_u16(&mut data[6..8], self.answers);
        BigEndian::write_u16(&mut data[8..10], self.nameservers);
        BigEndian::write_u16(&mut data[10..12], self.additional);
    }

    /// Response header for a request: same id and request flags, the
    /// response bit set, and a fixed NotImplemented code since nothing is
    /// actually resolved. Counts start at zero and are bumped by the
    /// builder as records are serialized.
    pub fn response_to(&self) -> Header {
        Header {
            id: self.id,
            query: false,
            opcode: self.opcode,
            authoritative: self.authoritative,
            truncated: self.truncated,
            recursion_desired: self.recursion_desired,
            recursion_available: self.recursion_available,
            reserved: self.reserved,
            response_code: ResponseCode::NotImplemented,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        }
    }

    pub fn question_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[4..6])
    }

    pub fn answer_count(data: &[u8]) -> u16 {
        BigEndian::read_u16(&data[6..8])
    }

    pub fn inc_questions(data: &mut [u8]) -> Result<(), ()> {
        let count = Self::question_count(data).checked_add(1).ok_or(())?;
        BigEndian::write_u16(&mut data[4..6], count);
        Ok(())
    }

    pub fn inc_answers(data: &mut [u8]) -> Result<(), ()> {
        let count = Self::answer_count(data).checked_add(1).ok_or(())?;
        BigEndian::write_u16(&mut data[6..8], count);
        Ok(())
    }

    pub const fn size() -> usize {
        12
    }
}

#[cfg(test)]
mod test {
    use super::{Error, Header, ResponseCode};

    #[test]
    fn parse_query_header() {
        let data = b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00";
        let header = Header::parse(data).unwrap();
        assert_eq!(
            header,
            Header {
                id: 0x1234,
                query: true,
                opcode: 0,
                authoritative: false,
                truncated: false,
                recursion_desired: true,
                recursion_available: false,
                reserved: 0,
                response_code: ResponseCode::NoError,
                questions: 1,
                answers: 0,
                nameservers: 0,
                additional: 0,
            }
        );
    }

    #[test]
    fn parse_unpacks_every_flag_field() {
        // qr=1 opcode=9 aa=1 tc=1 rd=1 ra=1 z=5 rcode=13
        let data = b"\xbe\xef\xcf\xdd\x00\x02\x00\x03\x00\x04\x00\x05";
        let header = Header::parse(data).unwrap();
        assert!(!header.query);
        assert_eq!(header.opcode, 9);
        assert!(header.authoritative);
        assert!(header.truncated);
        assert!(header.recursion_desired);
        assert!(header.recursion_available);
        assert_eq!(header.reserved, 5);
        assert_eq!(header.response_code, ResponseCode::Reserved(13));
        assert_eq!(header.questions, 2);
        assert_eq!(header.answers, 3);
        assert_eq!(header.nameservers, 4);
        assert_eq!(header.additional, 5);
    }

    #[test]
    fn write_round_trips() {
        let data = b"\xbe\xef\xcf\xdd\x00\x02\x00\x03\x00\x04\x00\x05";
        let header = Header::parse(data).unwrap();
        let mut buf = [0u8; 12];
        header.write(&mut buf);
        assert_eq!(&buf, data);
    }

    #[test]
    fn short_buffer_is_an_error() {
        assert_eq!(Header::parse(b"\x12\x34\x00"), Err(Error::HeaderTooShort));
    }

    #[test]
    fn response_preserves_id_and_sets_response_bit() {
        let data = b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00";
        let response = Header::parse(data).unwrap().response_to();
        assert_eq!(response.id, 0x1234);
        assert!(!response.query);
        assert!(response.recursion_desired);
        assert_eq!(response.response_code, ResponseCode::NotImplemented);
        assert_eq!(response.questions, 0);
        assert_eq!(response.answers, 0);

        // qr=1 in the request still encodes as a response
        let data = b"\x12\x34\x81\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        assert!(!Header::parse(data).unwrap().response_to().query);
    }

    #[test]
    fn count_mutators_edit_header_bytes() {
        let mut buf = [0u8; 12];
        Header::inc_questions(&mut buf).unwrap();
        Header::inc_questions(&mut buf).unwrap();
        Header::inc_answers(&mut buf).unwrap();
        assert_eq!(Header::question_count(&buf), 2);
        assert_eq!(Header::answer_count(&buf), 1);
    }
}
