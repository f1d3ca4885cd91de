//! DNS wire format: the 12-byte header, length-prefixed domain names with
//! backward compression pointers, the question section, and A answer
//! records. Decoding threads an explicit `(packet, offset)` cursor;
//! encoding goes through the typestate [`Builder`].

mod builder;
mod enums;
mod error;
mod header;
mod name;
mod parser;
mod rrdata;
mod structs;

pub use self::builder::{Answers, Builder, Questions};
pub use self::enums::ResponseCode;
pub use self::error::Error;
pub use self::header::Header;
pub use self::name::{Name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use self::rrdata::RRData;
pub use self::structs::{Packet, Question};

/// RR type of an IPv4 host address record.
pub const TYPE_A: u16 = 1;
/// The Internet class.
pub const CLASS_IN: u16 = 1;
