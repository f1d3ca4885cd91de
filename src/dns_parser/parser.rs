use byteorder::{BigEndian, ByteOrder};

use super::{Error, Header, Name, Packet, Question};

impl Packet {
    /// Parses the header and exactly `qdcount` questions.
    ///
    /// Running out of buffer before the advertised question count is met
    /// is an error; a partial question list is never returned.
    pub fn parse(data: &[u8]) -> Result<Packet, Error> {
        let header = Header::parse(data)?;
        let mut offset = Header::size();
        let mut questions = Vec::with_capacity(header.questions as usize);
        for _ in 0..header.questions {
            let (question, next) = Question::scan(data, offset)?;
            questions.push(question);
            offset = next;
        }
        Ok(Packet { header, questions })
    }
}

impl Question {
    /// Decodes one question at `offset`: a name followed by qtype and
    /// qclass as big-endian 16-bit fields.
    pub fn scan(packet: &[u8], offset: usize) -> Result<(Question, usize), Error> {
        let (qname, offset) = Name::scan(packet, offset)?;
        let fields = packet.get(offset..offset + 4).ok_or(Error::UnexpectedEof)?;
        Ok((
            Question {
                qname,
                qtype: BigEndian::read_u16(&fields[..2]),
                qclass: BigEndian::read_u16(&fields[2..4]),
            },
            offset + 4,
        ))
    }
}
