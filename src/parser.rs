use std::collections::VecDeque;
use std::ops::Range;

use tracing::debug;

use crate::buffer::read_mb_u32;
use crate::charset::Charset;
use crate::elt::{AttrName, Attribute, Tag};
use crate::errors::{Result, WbxmlError};
use crate::tables::{self, LanguageId, LanguageRecord};

/* Global tokens, WBXML 1.3 §7 */
const SWITCH_PAGE: u8 = 0x00;
const END: u8 = 0x01;
const ENTITY: u8 = 0x02;
const STR_I: u8 = 0x03;
const LITERAL: u8 = 0x04;
const EXT_I_0: u8 = 0x40;
const EXT_I_2: u8 = 0x42;
const PI: u8 = 0x43;
const LITERAL_C: u8 = 0x44;
const EXT_T_0: u8 = 0x80;
const EXT_T_2: u8 = 0x82;
const STR_T: u8 = 0x83;
const LITERAL_A: u8 = 0x84;
const EXT_0: u8 = 0xC0;
const EXT_2: u8 = 0xC2;
const OPAQUE: u8 = 0xC3;
const LITERAL_AC: u8 = 0xC4;

/* Tag byte composition */
pub(crate) const TAG_WITH_CONTENT: u8 = 0x40;
pub(crate) const TAG_WITH_ATTRS: u8 = 0x80;
pub(crate) const TAG_MASK: u8 = 0x3F;

/// SAX-style events pulled out of a WBXML document.
#[derive(Debug, Clone, PartialEq)]
pub enum WbxmlEvent {
    StartDocument { version: u8, charset: Charset, lang: &'static LanguageRecord },
    StartElement { tag: Tag, attributes: Vec<Attribute>, empty: bool },
    /// Inline strings, string-table references, entities, extension values
    /// and opaque payloads all surface here; strings arrive as UTF-8,
    /// opaques as their raw bytes.
    Characters(Vec<u8>),
    Pi { target: String, data: Option<String> },
    EndElement { tag: Tag, empty: bool },
    EndDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Body,
    Done,
}

/// Pull parser over a complete WBXML byte document.
///
/// Drive it with [`read_event`](Self::read_event) until `EndDocument`. On
/// failure, [`byte_index`](Self::byte_index) is the offset of the byte that
/// stopped the parser.
pub struct WbxmlReader<'a> {
    data: &'a [u8],
    pos: usize,
    token_start: usize,
    state: State,
    lang: Option<&'static LanguageRecord>,
    forced_lang: Option<&'static LanguageRecord>,
    forced_charset: Option<Charset>,
    charset: Charset,
    strtbl: Range<usize>,
    page: u8,
    stack: Vec<Tag>,
    pending: VecDeque<WbxmlEvent>,
}

impl<'a> WbxmlReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        WbxmlReader {
            data,
            pos: 0,
            token_start: 0,
            state: State::Header,
            lang: None,
            forced_lang: None,
            forced_charset: None,
            charset: Charset::Utf8,
            strtbl: 0..0,
            page: 0,
            stack: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Force the document language, overriding the public id in the header.
    pub fn set_language(&mut self, lang: LanguageId) {
        self.forced_lang = Some(tables::get_language(lang));
    }

    /// Force the charset used for inline and string-table strings,
    /// overriding the one declared in the header.
    pub fn set_charset(&mut self, charset: Charset) {
        self.forced_charset = Some(charset);
    }

    /// Offset of the byte the parser stopped at.
    pub fn byte_index(&self) -> usize {
        self.token_start
    }

    pub fn read_event(&mut self) -> Result<WbxmlEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }
        match self.state {
            State::Header => {
                let event = self.parse_header()?;
                self.state = State::Body;
                Ok(event)
            }
            State::Body => loop {
                if self.pos >= self.data.len() {
                    if self.stack.is_empty() {
                        self.state = State::Done;
                        return Ok(WbxmlEvent::EndDocument);
                    }
                    self.token_start = self.pos;
                    return Err(WbxmlError::EndOfBuffer);
                }
                if let Some(event) = self.parse_body_token()? {
                    return Ok(event);
                }
            },
            State::Done => Ok(WbxmlEvent::EndDocument),
        }
    }

    fn lang(&self) -> Result<&'static LanguageRecord> {
        self.lang.ok_or(WbxmlError::Internal)
    }

    fn next_byte(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or(WbxmlError::EndOfBuffer)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u32(&mut self) -> Result<u32> {
        read_mb_u32(self.data, &mut self.pos)
    }

    fn parse_header(&mut self) -> Result<WbxmlEvent> {
        if self.data.is_empty() {
            return Err(WbxmlError::EmptyDocument);
        }
        let version = self.next_byte()?;
        let public_id = self.read_u32()?;
        let literal_offset = if public_id == 0 { Some(self.read_u32()?) } else { None };
        let declared = Charset::from_mib_enum(self.read_u32()?)?;
        self.charset = self.forced_charset.or(declared).unwrap_or(Charset::Utf8);

        let strtbl_len = self.read_u32()? as usize;
        if strtbl_len > self.data.len() - self.pos {
            return Err(WbxmlError::StrtblLength);
        }
        self.strtbl = self.pos..self.pos + strtbl_len;
        self.pos += strtbl_len;

        let lang = if let Some(forced) = self.forced_lang {
            forced
        } else if public_id > 1 {
            tables::language_from_numeric_public_id(public_id).ok_or(WbxmlError::UnknownPublicId)?
        } else if let Some(offset) = literal_offset {
            let name = self.strtbl_string(offset)?;
            tables::language_from_public_id(&name).ok_or(WbxmlError::UnknownPublicId)?
        } else {
            // 0x01: anonymous document, nothing to resolve against.
            return Err(WbxmlError::UnknownPublicId);
        };
        self.lang = Some(lang);

        debug!(
            version,
            public_id,
            charset = ?self.charset,
            strtbl_len,
            lang = ?lang.id,
            "parsed WBXML header"
        );

        Ok(WbxmlEvent::StartDocument { version, charset: self.charset, lang })
    }

    fn strtbl_bytes(&self) -> &'a [u8] {
        &self.data[self.strtbl.clone()]
    }

    /// NUL-terminated string starting at `offset` inside the string table.
    fn strtbl_string(&self, offset: u32) -> Result<String> {
        let table = self.strtbl_bytes();
        let offset = offset as usize;
        if offset >= table.len() {
            return Err(WbxmlError::InvalidStrtblIndex);
        }
        let rest = &table[offset..];
        let nul = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or(WbxmlError::LiteralNotNullTerminated)?;
        self.charset.decode(&rest[..nul])
    }

    fn read_inline_string(&mut self) -> Result<String> {
        let start = self.pos;
        let nul = self.data[start..]
            .iter()
            .position(|b| *b == 0)
            .ok_or(WbxmlError::NotNullTerminatedString)?;
        let text = self.charset.decode(&self.data[start..start + nul])?;
        self.pos = start + nul + 1;
        Ok(text)
    }

    fn read_opaque(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32()? as usize;
        if len > self.data.len() - self.pos {
            return Err(WbxmlError::BadOpaqueLength);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Resolve an extension through the language's extension-value table.
    fn ext_value(&self, index: u32) -> Result<String> {
        let lang = self.lang()?;
        if lang.ext_values.is_empty() {
            return Err(WbxmlError::UnknownExtensionToken);
        }
        let index = u8::try_from(index).map_err(|_| WbxmlError::UnknownExtensionValue)?;
        let entry = lang
            .ext_value(self.page, index)
            .ok_or(WbxmlError::UnknownExtensionValue)?;
        Ok(entry.value.to_string())
    }

    fn parse_body_token(&mut self) -> Result<Option<WbxmlEvent>> {
        self.token_start = self.pos;
        let byte = self.next_byte()?;
        let event = match byte {
            SWITCH_PAGE => {
                self.page = self.next_byte()?;
                debug!(page = self.page, "switch code page");
                None
            }
            END => {
                let tag = self.stack.pop().ok_or(WbxmlError::Internal)?;
                Some(WbxmlEvent::EndElement { tag, empty: false })
            }
            ENTITY => {
                let code = self.read_u32()?;
                let ch = char::from_u32(code).ok_or(WbxmlError::EntityCodeOverflow)?;
                Some(WbxmlEvent::Characters(ch.to_string().into_bytes()))
            }
            STR_I => Some(WbxmlEvent::Characters(self.read_inline_string()?.into_bytes())),
            STR_T => {
                let offset = self.read_u32()?;
                Some(WbxmlEvent::Characters(self.strtbl_string(offset)?.into_bytes()))
            }
            OPAQUE => Some(WbxmlEvent::Characters(self.read_opaque()?.to_vec())),
            PI => Some(self.parse_pi()?),
            EXT_I_0..=EXT_I_2 => {
                Some(WbxmlEvent::Characters(self.read_inline_string()?.into_bytes()))
            }
            EXT_T_0..=EXT_T_2 => {
                let index = self.read_u32()?;
                Some(WbxmlEvent::Characters(self.ext_value(index)?.into_bytes()))
            }
            EXT_0..=EXT_2 => {
                Some(WbxmlEvent::Characters(self.ext_value(u32::from(byte - EXT_0))?.into_bytes()))
            }
            _ => Some(self.parse_element(byte)?),
        };
        Ok(event)
    }

    fn parse_element(&mut self, byte: u8) -> Result<WbxmlEvent> {
        let identity = byte & TAG_MASK;
        let has_attrs = byte & TAG_WITH_ATTRS != 0;
        let has_content = byte & TAG_WITH_CONTENT != 0;

        let tag = if identity == LITERAL {
            let offset = self.read_u32()?;
            Tag::Literal(self.strtbl_string(offset)?)
        } else {
            match self.lang()?.tag_from_token(self.page, identity) {
                Some(entry) => Tag::Known(entry),
                // token_start still points at the tag byte here
                None => return Err(WbxmlError::UnknownTag),
            }
        };

        let attributes = if has_attrs { self.parse_attributes()? } else { Vec::new() };

        if has_content {
            self.stack.push(tag.clone());
            Ok(WbxmlEvent::StartElement { tag, attributes, empty: false })
        } else {
            self.pending
                .push_back(WbxmlEvent::EndElement { tag: tag.clone(), empty: true });
            Ok(WbxmlEvent::StartElement { tag, attributes, empty: true })
        }
    }

    /// Attribute list: a name token (carrying an optional built-in value
    /// prefix) followed by value tokens that concatenate until the next
    /// name token or END.
    fn parse_attributes(&mut self) -> Result<Vec<Attribute>> {
        let mut attrs = Vec::new();
        let mut current: Option<(AttrName, String)> = None;

        fn flush(attrs: &mut Vec<Attribute>, current: &mut Option<(AttrName, String)>) {
            if let Some((name, value)) = current.take() {
                attrs.push(Attribute::new(name, value));
            }
        }

        fn append(current: &mut Option<(AttrName, String)>, text: &str) -> Result<()> {
            match current {
                Some((_, value)) => {
                    value.push_str(text);
                    Ok(())
                }
                None => Err(WbxmlError::StringExpected),
            }
        }

        loop {
            self.token_start = self.pos;
            let byte = self.next_byte()?;
            match byte {
                END => {
                    flush(&mut attrs, &mut current);
                    break;
                }
                SWITCH_PAGE => self.page = self.next_byte()?,
                LITERAL => {
                    flush(&mut attrs, &mut current);
                    let offset = self.read_u32()?;
                    current = Some((AttrName::Literal(self.strtbl_string(offset)?), String::new()));
                }
                ENTITY => {
                    let code = self.read_u32()?;
                    let ch = char::from_u32(code).ok_or(WbxmlError::EntityCodeOverflow)?;
                    append(&mut current, &ch.to_string())?;
                }
                STR_I => {
                    let text = self.read_inline_string()?;
                    append(&mut current, &text)?;
                }
                STR_T => {
                    let offset = self.read_u32()?;
                    let text = self.strtbl_string(offset)?;
                    append(&mut current, &text)?;
                }
                OPAQUE => {
                    let bytes = self.read_opaque()?.to_vec();
                    let text = self.charset.decode(&bytes)?;
                    append(&mut current, &text)?;
                }
                EXT_I_0..=EXT_I_2 => {
                    let text = self.read_inline_string()?;
                    append(&mut current, &text)?;
                }
                EXT_T_0..=EXT_T_2 => {
                    let index = self.read_u32()?;
                    let text = self.ext_value(index)?;
                    append(&mut current, &text)?;
                }
                EXT_0..=EXT_2 => {
                    let text = self.ext_value(u32::from(byte - EXT_0))?;
                    append(&mut current, &text)?;
                }
                PI | LITERAL_C => return Err(WbxmlError::UnknownAttr),
                LITERAL_A | LITERAL_AC => return Err(WbxmlError::UnknownAttrValue),
                token if token < 0x80 => {
                    flush(&mut attrs, &mut current);
                    let entry = self
                        .lang()?
                        .attr_from_token(self.page, token)
                        .ok_or(WbxmlError::UnknownAttr)?;
                    let value = entry.value_prefix.unwrap_or("").to_string();
                    current = Some((AttrName::Known(entry), value));
                }
                token => {
                    let entry = self
                        .lang()?
                        .attr_value_from_token(self.page, token)
                        .ok_or(WbxmlError::UnknownAttrValue)?;
                    append(&mut current, entry.value)?;
                }
            }
        }
        Ok(attrs)
    }

    /// PI body: an attribute-start token naming the target, value tokens
    /// forming the data, then END.
    fn parse_pi(&mut self) -> Result<WbxmlEvent> {
        let mut target: Option<String> = None;
        let mut data = String::new();

        loop {
            self.token_start = self.pos;
            let byte = self.next_byte()?;
            match byte {
                END => break,
                SWITCH_PAGE => self.page = self.next_byte()?,
                LITERAL if target.is_none() => {
                    let offset = self.read_u32()?;
                    target = Some(self.strtbl_string(offset)?);
                }
                STR_I => data.push_str(&self.read_inline_string()?),
                STR_T => {
                    let offset = self.read_u32()?;
                    data.push_str(&self.strtbl_string(offset)?);
                }
                ENTITY => {
                    let code = self.read_u32()?;
                    let ch = char::from_u32(code).ok_or(WbxmlError::EntityCodeOverflow)?;
                    data.push(ch);
                }
                EXT_I_0..=EXT_I_2 => data.push_str(&self.read_inline_string()?),
                EXT_T_0..=EXT_T_2 => {
                    let index = self.read_u32()?;
                    data.push_str(&self.ext_value(index)?);
                }
                EXT_0..=EXT_2 => data.push_str(&self.ext_value(u32::from(byte - EXT_0))?),
                OPAQUE => {
                    let bytes = self.read_opaque()?.to_vec();
                    data.push_str(&self.charset.decode(&bytes)?);
                }
                token if token < 0x80 && target.is_none() => {
                    let entry = self
                        .lang()?
                        .attr_from_token(self.page, token)
                        .ok_or(WbxmlError::UnknownAttr)?;
                    target = Some(entry.name.to_string());
                    if let Some(prefix) = entry.value_prefix {
                        data.push_str(prefix);
                    }
                }
                token if token >= 0x85 => {
                    let entry = self
                        .lang()?
                        .attr_value_from_token(self.page, token)
                        .ok_or(WbxmlError::UnknownAttrValue)?;
                    data.push_str(entry.value);
                }
                _ => return Err(WbxmlError::StringExpected),
            }
        }

        let target = target.ok_or(WbxmlError::StringExpected)?;
        let data = if data.is_empty() { None } else { Some(data) };
        Ok(WbxmlEvent::Pi { target, data })
    }
}
