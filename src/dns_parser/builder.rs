use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::{Header, Name, Question, RRData};

pub enum Questions {}
pub enum Answers {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}

impl MoveTo<Answers> for Questions {}

/// Serializes a response packet section by section.
///
/// The typestate parameter keeps questions ahead of answers in the
/// buffer, and the section counts live in the header bytes themselves:
/// they are incremented only when a record is actually written, so the
/// encoded counts always match the encoded sections.
pub struct Builder<S> {
    buf: Vec<u8>,
    _state: PhantomData<S>,
}

impl Builder<Questions> {
    /// Starts a response to `request`: same id and flags, response bit
    /// set, zeroed counts.
    pub fn respond_to(request: &Header) -> Builder<Questions> {
        let mut buf = vec![0u8; Header::size()];
        request.response_to().write(&mut buf);
        Builder {
            buf,
            _state: PhantomData,
        }
    }
}

impl<T> Builder<T> {
    fn write_rr(&mut self, name: &Name, cls: u16, ttl: u32, data: &RRData) {
        name.write_to(&mut self.buf).unwrap();
        self.buf.write_u16::<BigEndian>(data.typ()).unwrap();
        self.buf.write_u16::<BigEndian>(cls).unwrap();
        self.buf.write_u32::<BigEndian>(ttl).unwrap();

        let size_offset = self.buf.len();
        self.buf.write_u16::<BigEndian>(0).unwrap();

        let data_offset = self.buf.len();
        data.write_to(&mut self.buf).unwrap();
        let data_size = self.buf.len() - data_offset;

        BigEndian::write_u16(
            &mut self.buf[size_offset..size_offset + 2],
            data_size as u16,
        );
    }

    /// Returns the final packet
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            _state: PhantomData,
        }
    }
}

impl<T: MoveTo<Questions>> Builder<T> {
    /// Echoes a question into the packet
    ///
    /// # Panics
    ///
    /// * There are already 65535 questions in the buffer.
    pub fn add_question(self, question: &Question) -> Builder<Questions> {
        let mut builder = self.move_to::<Questions>();

        question.qname.write_to(&mut builder.buf).unwrap();
        builder.buf.write_u16::<BigEndian>(question.qtype).unwrap();
        builder.buf.write_u16::<BigEndian>(question.qclass).unwrap();
        Header::inc_questions(&mut builder.buf).expect("Too many questions");
        builder
    }
}

impl<T: MoveTo<Answers>> Builder<T> {
    /// Appends one answer record
    ///
    /// # Panics
    ///
    /// * There are already 65535 answers in the buffer.
    pub fn add_answer(self, name: &Name, cls: u16, ttl: u32, data: &RRData) -> Builder<Answers> {
        let mut builder = self.move_to::<Answers>();

        builder.write_rr(name, cls, ttl, data);
        Header::inc_answers(&mut builder.buf).expect("Too many answers");

        builder
    }
}

#[cfg(test)]
mod test {
    use super::Builder;
    use crate::dns_parser::{Header, Name, Packet, Question, RRData, CLASS_IN};
    use std::net::Ipv4Addr;

    fn request_header(data: &[u8]) -> Header {
        Header::parse(data).unwrap()
    }

    #[test]
    fn build_response_with_question_and_answer() {
        let request = request_header(b"\x06%\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00");
        let question = Question {
            qname: Name::from_str("example.com").unwrap(),
            qtype: 1,
            qclass: 1,
        };
        let bld = Builder::respond_to(&request)
            .add_question(&question)
            .add_answer(
                &question.qname,
                CLASS_IN,
                60,
                &RRData::A(Ipv4Addr::new(8, 8, 8, 8)),
            );
        let result = b"\x06%\x81\x04\x00\x01\x00\x01\x00\x00\x00\x00\
                       \x07example\x03com\x00\x00\x01\x00\x01\
                       \x07example\x03com\x00\x00\x01\x00\x01\
                       \x00\x00\x00\x3c\x00\x04\x08\x08\x08\x08";
        assert_eq!(&bld.build()[..], &result[..]);
    }

    #[test]
    fn rdlength_matches_payload() {
        let request = request_header(&[0u8; 12]);
        let name = Name::from_str("a").unwrap();
        let packet = Builder::respond_to(&request)
            .add_answer(&name, CLASS_IN, 60, &RRData::A(Ipv4Addr::new(1, 2, 3, 4)))
            .build();
        // name(3) + type(2) + class(2) + ttl(4) = 11 bytes after the header
        assert_eq!(&packet[23..25], &[0, 4]);
        assert_eq!(&packet[25..29], &[1, 2, 3, 4]);
    }

    #[test]
    fn counts_reflect_what_was_written() {
        let request = request_header(&[0u8; 12]);
        let question = Question {
            qname: Name::from_str("example.com").unwrap(),
            qtype: 1,
            qclass: 1,
        };
        let packet = Builder::respond_to(&request)
            .add_question(&question)
            .add_question(&question)
            .add_answer(&question.qname, CLASS_IN, 60, &RRData::A(Ipv4Addr::new(8, 8, 8, 8)))
            .build();
        assert_eq!(Header::question_count(&packet), 2);
        assert_eq!(Header::answer_count(&packet), 1);

        let parsed = Packet::parse(&packet).unwrap();
        assert_eq!(parsed.questions.len(), 2);
        assert_eq!(parsed.header.answers, 1);
    }
}
