use thiserror::Error;

/// Error parsing DNS packet
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("packet is smaller than header size")]
    HeaderTooShort,
    #[error("packet has incomplete data")]
    UnexpectedEof,
    #[error("label in domain name has unknown label format")]
    UnknownLabelFormat,
    #[error("invalid characters encountered while reading label")]
    LabelIsNotAscii,
    #[error("label is longer than 63 bytes")]
    LabelTooLong,
    #[error("domain name is longer than 255 bytes")]
    NameTooLong,
    #[error("compression pointer at offset {at} targets offset {target} which is not earlier in the packet")]
    PointerNotBackward { at: usize, target: usize },
}
