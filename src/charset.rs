use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, WbxmlError};

/// Character sets a WBXML header can declare, by IANA MIBEnum.
///
/// The tree keeps everything in UTF-8 internally; these values only matter
/// at the document boundary (header field, XML declaration, inline string
/// conversion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    UsAscii,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    ShiftJis,
    Utf8,
    Ucs2,
    Utf16,
    Big5,
}

impl Charset {
    pub fn mib_enum(self) -> u32 {
        match self {
            Charset::UsAscii => 3,
            Charset::Iso8859_1 => 4,
            Charset::Iso8859_2 => 5,
            Charset::Iso8859_3 => 6,
            Charset::Iso8859_4 => 7,
            Charset::Iso8859_5 => 8,
            Charset::Iso8859_6 => 9,
            Charset::Iso8859_7 => 10,
            Charset::Iso8859_8 => 11,
            Charset::Iso8859_9 => 12,
            Charset::ShiftJis => 17,
            Charset::Utf8 => 106,
            Charset::Ucs2 => 1000,
            Charset::Utf16 => 1015,
            Charset::Big5 => 2026,
        }
    }

    /// MIBEnum 0 means "unspecified" and is represented as `None`.
    pub fn from_mib_enum(mib: u32) -> Result<Option<Charset>> {
        Ok(Some(match mib {
            0 => return Ok(None),
            3 => Charset::UsAscii,
            4 => Charset::Iso8859_1,
            5 => Charset::Iso8859_2,
            6 => Charset::Iso8859_3,
            7 => Charset::Iso8859_4,
            8 => Charset::Iso8859_5,
            9 => Charset::Iso8859_6,
            10 => Charset::Iso8859_7,
            11 => Charset::Iso8859_8,
            12 => Charset::Iso8859_9,
            17 => Charset::ShiftJis,
            106 => Charset::Utf8,
            1000 => Charset::Ucs2,
            1015 => Charset::Utf16,
            2026 => Charset::Big5,
            _ => return Err(WbxmlError::CharsetUnknown),
        }))
    }

    /// IANA name, as written into the XML declaration.
    pub fn name(self) -> &'static str {
        match self {
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Iso8859_2 => "ISO-8859-2",
            Charset::Iso8859_3 => "ISO-8859-3",
            Charset::Iso8859_4 => "ISO-8859-4",
            Charset::Iso8859_5 => "ISO-8859-5",
            Charset::Iso8859_6 => "ISO-8859-6",
            Charset::Iso8859_7 => "ISO-8859-7",
            Charset::Iso8859_8 => "ISO-8859-8",
            Charset::Iso8859_9 => "ISO-8859-9",
            Charset::ShiftJis => "Shift_JIS",
            Charset::Utf8 => "UTF-8",
            Charset::Ucs2 => "ISO-10646-UCS-2",
            Charset::Utf16 => "UTF-16",
            Charset::Big5 => "Big5",
        }
    }

    /// Resolve a charset name from an XML declaration (case-insensitive).
    pub fn from_name(name: &str) -> Option<Charset> {
        let lowered = name.to_ascii_lowercase();
        [
            Charset::UsAscii,
            Charset::Iso8859_1,
            Charset::Iso8859_2,
            Charset::Iso8859_3,
            Charset::Iso8859_4,
            Charset::Iso8859_5,
            Charset::Iso8859_6,
            Charset::Iso8859_7,
            Charset::Iso8859_8,
            Charset::Iso8859_9,
            Charset::ShiftJis,
            Charset::Utf8,
            Charset::Ucs2,
            Charset::Utf16,
            Charset::Big5,
        ]
        .into_iter()
        .find(|cs| cs.name().to_ascii_lowercase() == lowered || (lowered == "utf8" && *cs == Charset::Utf8))
    }

    fn encoding(self) -> Result<&'static Encoding> {
        let label: &[u8] = match self {
            // encoding_rs has no dedicated US-ASCII encoding; windows-1252
            // is a byte-for-byte superset for the 7-bit range.
            Charset::UsAscii | Charset::Iso8859_1 => b"windows-1252",
            Charset::Iso8859_2 => b"iso-8859-2",
            Charset::Iso8859_3 => b"iso-8859-3",
            Charset::Iso8859_4 => b"iso-8859-4",
            Charset::Iso8859_5 => b"iso-8859-5",
            Charset::Iso8859_6 => b"iso-8859-6",
            Charset::Iso8859_7 => b"iso-8859-7",
            Charset::Iso8859_8 => b"iso-8859-8",
            Charset::Iso8859_9 => b"windows-1254",
            Charset::ShiftJis => b"shift_jis",
            Charset::Utf8 => b"utf-8",
            Charset::Utf16 | Charset::Ucs2 => b"utf-16le",
            Charset::Big5 => b"big5",
        };
        Encoding::for_label(label).ok_or(WbxmlError::CharsetNotFound)
    }

    /// Convert document bytes in this charset to a UTF-8 string.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        if self == Charset::Utf8 {
            return String::from_utf8(bytes.to_vec()).map_err(|_| WbxmlError::CharsetConv);
        }
        let (text, _, had_errors) = self.encoding()?.decode(bytes);
        if had_errors {
            return Err(WbxmlError::CharsetConv);
        }
        Ok(text.into_owned())
    }

    /// Convert an internal UTF-8 string to document bytes in this charset.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        if self == Charset::Utf8 {
            return Ok(text.as_bytes().to_vec());
        }
        if matches!(self, Charset::Utf16 | Charset::Ucs2) {
            // encoding_rs decodes UTF-16 but does not encode to it.
            return Err(WbxmlError::NoCharsetConv);
        }
        let (bytes, _, unmappable) = self.encoding()?.encode(text);
        if unmappable {
            return Err(WbxmlError::CharsetConv);
        }
        Ok(bytes.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mib_enum_roundtrip() {
        for cs in [Charset::UsAscii, Charset::Iso8859_1, Charset::Utf8, Charset::Big5] {
            assert_eq!(Charset::from_mib_enum(cs.mib_enum()).unwrap(), Some(cs));
        }
        assert_eq!(Charset::from_mib_enum(0).unwrap(), None);
        assert_eq!(Charset::from_mib_enum(9999), Err(WbxmlError::CharsetUnknown));
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(Charset::from_name("utf-8"), Some(Charset::Utf8));
        assert_eq!(Charset::from_name("UTF-8"), Some(Charset::Utf8));
        assert_eq!(Charset::from_name("iso-8859-1"), Some(Charset::Iso8859_1));
        assert_eq!(Charset::from_name("klingon"), None);
    }

    #[test]
    fn latin1_decodes_to_utf8() {
        let text = Charset::Iso8859_1.decode(&[0x63, 0x61, 0x66, 0xE9]).unwrap();
        assert_eq!(text, "café");
        let bytes = Charset::Iso8859_1.encode("café").unwrap();
        assert_eq!(bytes, vec![0x63, 0x61, 0x66, 0xE9]);
    }

    #[test]
    fn invalid_utf8_is_a_conversion_error() {
        assert_eq!(Charset::Utf8.decode(&[0xFF, 0xFE]), Err(WbxmlError::CharsetConv));
    }
}
