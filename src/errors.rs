use thiserror::Error;

/// Error codes shared by the parser, the encoder and the conversion drivers.
///
/// A single error aborts the whole conversion; no partial output is surfaced.
/// For parser-side errors the failing byte offset is available from
/// [`crate::parser::WbxmlReader::byte_index`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WbxmlError {
    /* Generic */
    #[error("bad parameter")]
    BadParameter,
    #[error("not enough memory")]
    NotEnoughMemory,
    #[error("internal error")]
    Internal,

    /* Parser: framing */
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("invalid multi-byte unsigned integer")]
    InvalidMbUint,
    #[error("string table length overflows the document")]
    StrtblLength,
    #[error("string table reference out of range")]
    InvalidStrtblIndex,
    #[error("literal is not NUL terminated in the string table")]
    LiteralNotNullTerminated,
    #[error("inline string is not NUL terminated")]
    NotNullTerminatedString,
    #[error("opaque length overflows the document")]
    BadOpaqueLength,
    #[error("empty WBXML document")]
    EmptyDocument,
    #[error("entity code point out of range")]
    EntityCodeOverflow,
    #[error("attribute value found before any attribute name")]
    StringExpected,

    /* Parser: semantic */
    #[error("unknown public identifier")]
    UnknownPublicId,
    #[error("unknown tag in current code page")]
    UnknownTag,
    #[error("unknown attribute in current code page")]
    UnknownAttr,
    #[error("unknown attribute value token")]
    UnknownAttrValue,
    #[error("unknown extension token")]
    UnknownExtensionToken,
    #[error("unknown extension value")]
    UnknownExtensionValue,

    /* Charset */
    #[error("unknown charset")]
    CharsetUnknown,
    #[error("charset not found")]
    CharsetNotFound,
    #[error("no charset conversion available")]
    NoCharsetConv,
    #[error("charset conversion failed")]
    CharsetConv,

    /* Encoder */
    #[error("failed to append encoded data")]
    EncoderAppend,
    #[error("string table disabled but required for a literal")]
    StrtblDisabled,
    #[error("unknown XML language")]
    UnknownXmlLanguage,
    #[error("XML parsing failed: {0}")]
    XmlParsingFailed(String),
    #[error("base64 decoding failed")]
    Base64Decode,
    #[error("base64 encoding failed")]
    Base64Encode,
}

pub type Result<T> = std::result::Result<T, WbxmlError>;
