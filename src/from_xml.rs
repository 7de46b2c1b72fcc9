use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::charset::Charset;
use crate::elt::{AttrName, Attribute, Tag};
use crate::errors::{Result, WbxmlError};
use crate::tables::{self, LanguageId};
use crate::tree::{NodeId, NodeKind, SyncmlDataType, Tree};

/// Separator between the namespace name and the local name in qualified
/// input names; stripped before anything reaches the tree.
const NS_SEPARATOR: char = '^';

/// Binary-tag payloads may carry sloppy padding; accept both.
const B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parse an XML document (UTF-8 bytes) into a [`Tree`].
pub fn tree_from_xml(xml: &[u8], assume_vobject: bool) -> Result<Tree> {
    let text = std::str::from_utf8(xml)
        .map_err(|_| WbxmlError::XmlParsingFailed("document is not valid UTF-8".into()))?;
    let mut reader = Reader::from_str(text);
    let mut builder = XmlTreeBuilder::new(assume_vobject);

    loop {
        match reader.read_event() {
            Err(err) => return Err(WbxmlError::XmlParsingFailed(err.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Decl(decl)) => {
                if let Some(Ok(encoding)) = decl.encoding() {
                    let name = String::from_utf8_lossy(&encoding).into_owned();
                    match Charset::from_name(&name) {
                        Some(charset) => builder.outer_mut().tree.orig_charset = Some(charset),
                        None => warn!(encoding = %name, "charset not supported, assuming UTF-8"),
                    }
                }
            }
            Ok(Event::DocType(doctype)) => {
                let raw = String::from_utf8_lossy(doctype.as_ref()).into_owned();
                builder.doctype(&raw);
            }
            Ok(Event::Start(start)) => builder.start_element(&start)?,
            Ok(Event::Empty(start)) => {
                builder.start_element(&start)?;
                builder.end_element()?;
            }
            Ok(Event::End(_)) => builder.end_element()?,
            Ok(Event::Text(text)) => {
                let decoded = text
                    .decode()
                    .map_err(|err| WbxmlError::XmlParsingFailed(err.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|err| WbxmlError::XmlParsingFailed(err.to_string()))?;
                builder.characters(&unescaped)?;
            }
            Ok(Event::GeneralRef(reference)) => {
                let resolved = resolve_reference(reference.as_ref())?;
                builder.characters(&resolved)?;
            }
            Ok(Event::CData(cdata)) => builder.cdata(cdata.as_ref())?,
            Ok(Event::PI(pi)) => {
                let target = String::from_utf8_lossy(pi.target()).into_owned();
                let content = String::from_utf8_lossy(pi.content()).into_owned();
                let data = if content.is_empty() { None } else { Some(content) };
                builder.pi(target, data)?;
            }
            Ok(Event::Comment(_)) => {}
        }
    }

    builder.finish()
}

/// Resolve a general entity reference: numeric character references plus
/// the five predefined XML entities.
fn resolve_reference(raw: &[u8]) -> Result<String> {
    let name = std::str::from_utf8(raw)
        .map_err(|_| WbxmlError::XmlParsingFailed("malformed entity reference".into()))?;
    if let Some(num) = name.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
        } else {
            num.parse::<u32>()
        }
        .map_err(|_| WbxmlError::XmlParsingFailed(format!("bad character reference &{name};")))?;
        let ch = char::from_u32(code).ok_or(WbxmlError::EntityCodeOverflow)?;
        return Ok(ch.to_string());
    }
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "apos" => "'",
        "quot" => "\"",
        _ => {
            return Err(WbxmlError::XmlParsingFailed(format!("unknown entity &{name};")));
        }
    };
    Ok(resolved.to_string())
}

fn split_ns(name: &str) -> (Option<&str>, &str) {
    match name.rfind(NS_SEPARATOR) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

struct Ctx {
    tree: Tree,
    current: Option<NodeId>,
    depth: usize,
}

/// Event consumer that assembles one outer tree plus, while inside a
/// `DevInf` / `MgmtTree` subtree, a nested tree that will be attached as an
/// embedded document.
struct XmlTreeBuilder {
    stack: Vec<Ctx>,
    assume_vobject: bool,
    /// Open binary-option element and the base64 text collected for it.
    binary: Option<(NodeId, Vec<u8>)>,
}

impl XmlTreeBuilder {
    fn new(assume_vobject: bool) -> Self {
        XmlTreeBuilder {
            stack: vec![Ctx { tree: Tree::new(None, None), current: None, depth: 0 }],
            assume_vobject,
            binary: None,
        }
    }

    fn outer_mut(&mut self) -> &mut Ctx {
        self.stack.first_mut().expect("builder always holds the outer context")
    }

    fn ctx_mut(&mut self) -> &mut Ctx {
        self.stack.last_mut().expect("builder always holds a context")
    }

    fn doctype(&mut self, raw: &str) {
        let (public_id, system_id) = parse_doctype_ids(raw);
        let lang = public_id
            .as_deref()
            .and_then(tables::language_from_public_id)
            .or_else(|| system_id.as_deref().and_then(tables::language_from_system_id));
        match lang {
            Some(lang) => self.outer_mut().tree.set_language(lang),
            None => warn!("no language matches the DOCTYPE public/system id"),
        }
    }

    fn start_element(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let raw_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let (ns, local) = split_ns(&raw_name);

        if self.ctx_mut().tree.language().is_none() {
            // No usable DOCTYPE: the root element name decides the language.
            let lang = tables::language_from_root_elt(local)
                .ok_or(WbxmlError::UnknownXmlLanguage)?;
            self.ctx_mut().tree.set_language(lang);
        }

        // DevInf and DM DDF subtrees below the root become embedded
        // documents with their own language.
        if matches!(local, "DevInf" | "MgmtTree") && self.ctx_mut().current.is_some() {
            let outer_lang =
                self.ctx_mut().tree.language().ok_or(WbxmlError::UnknownXmlLanguage)?;
            let nested = match (outer_lang.id, local) {
                (LanguageId::SyncMl10, "DevInf") => LanguageId::DevInf10,
                (LanguageId::SyncMl11, "DevInf") => LanguageId::DevInf11,
                (LanguageId::SyncMl12, "DevInf") => LanguageId::DevInf12,
                (LanguageId::SyncMl12, "MgmtTree") => LanguageId::DmDdf12,
                _ => return Err(WbxmlError::UnknownXmlLanguage),
            };
            debug!(lang = ?nested, "opening embedded document");
            let charset = self.ctx_mut().tree.orig_charset;
            self.stack.push(Ctx {
                tree: Tree::new(Some(tables::get_language(nested)), charset),
                current: None,
                depth: 0,
            });
        }

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| WbxmlError::XmlParsingFailed(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if key == "xmlns" || key.starts_with("xmlns:") {
                // consumed by code-page dispatch, never stored
                continue;
            }
            let value = attr
                .unescape_value()
                .map_err(|err| WbxmlError::XmlParsingFailed(err.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        let ctx = self.ctx_mut();
        let lang = ctx.tree.language().ok_or(WbxmlError::UnknownXmlLanguage)?;

        if let Some(ns) = ns {
            if let Some(page) = lang.page_from_namespace(ns) {
                ctx.tree.cur_code_page = page;
            }
        }
        let tag = match lang.tag_from_name(Some(ctx.tree.cur_code_page), local) {
            Some(entry) => {
                ctx.tree.cur_code_page = entry.page;
                Tag::Known(entry)
            }
            None => Tag::Literal(local.to_string()),
        };

        let attributes = attributes
            .into_iter()
            .map(|(key, value)| {
                let (_, attr_local) = split_ns(&key);
                let name = match lang.attr_from_name(attr_local, &value) {
                    Some(entry) => AttrName::Known(entry),
                    None => AttrName::Literal(attr_local.to_string()),
                };
                Attribute::new(name, value)
            })
            .collect();

        let is_binary = tag.is_binary();
        let id = ctx.tree.add_element(ctx.current, tag, attributes)?;
        ctx.current = Some(id);
        ctx.depth += 1;
        if is_binary {
            self.binary = Some((id, Vec::new()));
        }
        Ok(())
    }

    fn end_element(&mut self) -> Result<()> {
        // Base64 text cached for a binary element decodes in one step now
        // that the whole content has been seen.
        let current = self.stack.last().and_then(|c| c.current);
        if let Some((binary_id, b64)) = self.binary.take_if(|(id, _)| Some(*id) == current) {
            let filtered: Vec<u8> =
                b64.iter().copied().filter(|b| !b.is_ascii_whitespace()).collect();
            if !filtered.is_empty() {
                let decoded = B64.decode(&filtered).map_err(|_| WbxmlError::Base64Decode)?;
                self.ctx_mut().tree.add_text(Some(binary_id), &decoded)?;
            }
        }

        let ctx = self.ctx_mut();

        // A synthesized CDATA section ends with its element.
        if let Some(cur) = ctx.current {
            if matches!(ctx.tree.node(cur).kind, NodeKind::CData(_)) {
                ctx.current = ctx.tree.parent(cur);
            }
        }

        let Some(cur) = ctx.current else {
            return Err(WbxmlError::Internal);
        };
        ctx.current = ctx.tree.parent(cur);
        ctx.depth -= 1;

        if ctx.depth == 0 && self.stack.len() > 1 {
            // embedded document complete
            let done = self.stack.pop().expect("nested context present");
            let outer = self.ctx_mut();
            outer.tree.add_subtree(outer.current, done.tree)?;
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        // Binary tags cache their base64 text for the end-element decode.
        if let Some((binary_id, buf)) = &mut self.binary {
            if self.stack.last().and_then(|c| c.current) == Some(*binary_id) {
                buf.extend_from_slice(text.as_bytes());
                return Ok(());
            }
        }

        let assume_vobject = self.assume_vobject;
        let ctx = self.ctx_mut();
        let Some(cur) = ctx.current else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(WbxmlError::XmlParsingFailed("text outside the root element".into()));
        };

        let data_type = ctx.tree.syncml_data_type(cur, assume_vobject);
        if data_type.is_vobject_like() || data_type == SyncmlDataType::Clear {
            let payload = if data_type.is_vobject_like() {
                // vFormat line breaks must survive as CRLF
                text.replace("\r\n", "\n").replace('\n', "\r\n")
            } else {
                text.to_string()
            };

            if let NodeKind::CData(content) = &mut ctx.tree.node_mut(cur).kind {
                content.extend_from_slice(payload.as_bytes());
            } else if ctx
                .tree
                .first_child(cur)
                .is_some_and(|c| matches!(ctx.tree.node(c).kind, NodeKind::CData(_)))
            {
                // an explicit CDATA section already holds the payload; this
                // is the whitespace between "]]>" and the end tag
                ctx.tree.add_text(Some(cur), payload.as_bytes())?;
            } else {
                let id = ctx.tree.add_cdata(Some(cur), payload.as_bytes())?;
                ctx.current = Some(id);
            }
            return Ok(());
        }

        ctx.tree.add_text(Some(cur), text.as_bytes())?;
        Ok(())
    }

    fn cdata(&mut self, content: &[u8]) -> Result<()> {
        let ctx = self.ctx_mut();
        let Some(cur) = ctx.current else {
            return Err(WbxmlError::XmlParsingFailed("CDATA outside the root element".into()));
        };
        ctx.tree.add_cdata(Some(cur), content)?;
        Ok(())
    }

    fn pi(&mut self, target: String, data: Option<String>) -> Result<()> {
        let ctx = self.ctx_mut();
        if ctx.current.is_none() {
            debug!(%target, "ignoring processing instruction outside the root element");
            return Ok(());
        }
        ctx.tree.add_pi(ctx.current, target, data)?;
        Ok(())
    }

    fn finish(mut self) -> Result<Tree> {
        if self.stack.len() != 1 {
            return Err(WbxmlError::XmlParsingFailed("unterminated embedded document".into()));
        }
        let ctx = self.stack.pop().expect("outer context present");
        if ctx.tree.root().is_none() {
            return Err(WbxmlError::XmlParsingFailed("no root element".into()));
        }
        Ok(ctx.tree)
    }
}

/// Pull the PUBLIC / SYSTEM identifiers out of a DOCTYPE declaration body.
fn parse_doctype_ids(raw: &str) -> (Option<String>, Option<String>) {
    let quoted = quoted_strings(raw);
    if raw.contains("PUBLIC") {
        (quoted.first().cloned(), quoted.get(1).cloned())
    } else if raw.contains("SYSTEM") {
        (None, quoted.first().cloned())
    } else {
        (None, None)
    }
}

fn quoted_strings(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '"' || ch == '\'' {
            let quote = ch;
            let mut value = String::new();
            for inner in chars.by_ref() {
                if inner == quote {
                    break;
                }
                value.push(inner);
            }
            out.push(value);
        }
    }
    out
}
