use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::ByteBuffer;
use crate::charset::Charset;
use crate::elt::{Attribute, Tag};
use crate::errors::{Result, WbxmlError};
use crate::parser::{TAG_WITH_ATTRS, TAG_WITH_CONTENT};
use crate::tables::{AttrEntry, AttrValueEntry, LanguageRecord};
use crate::tree::{NodeId, NodeKind, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WbxmlVersion {
    V10,
    V11,
    V12,
    #[default]
    V13,
}

impl WbxmlVersion {
    pub fn token(self) -> u8 {
        match self {
            WbxmlVersion::V10 => 0x00,
            WbxmlVersion::V11 => 0x01,
            WbxmlVersion::V12 => 0x02,
            WbxmlVersion::V13 => 0x03,
        }
    }
}

/// Parameters for generating a WBXML document from a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WbxmlGenParams {
    pub version: WbxmlVersion,
    /// Keep whitespace-only text nodes and leading/trailing text blanks.
    pub keep_ignorable_ws: bool,
    pub use_strtbl: bool,
    /// Write public id 0x01 and no literal identifier.
    pub produce_anonymous: bool,
    /// Minimum length for a string to be considered for the string table.
    pub strtbl_threshold: usize,
}

impl Default for WbxmlGenParams {
    fn default() -> Self {
        WbxmlGenParams {
            version: WbxmlVersion::default(),
            keep_ignorable_ws: false,
            use_strtbl: true,
            produce_anonymous: false,
            strtbl_threshold: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XmlGenType {
    Compact,
    #[default]
    Indent,
    Canonical,
}

/// Parameters for generating an XML document from a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlGenParams {
    pub gen_type: XmlGenType,
    /// Spaces per depth level in `Indent` mode.
    pub indent: u8,
    pub keep_ignorable_ws: bool,
}

impl Default for XmlGenParams {
    fn default() -> Self {
        XmlGenParams { gen_type: XmlGenType::default(), indent: 1, keep_ignorable_ws: false }
    }
}

fn encode_text(charset: Charset, bytes: &[u8]) -> Result<Vec<u8>> {
    if charset == Charset::Utf8 {
        return Ok(bytes.to_vec());
    }
    let text = std::str::from_utf8(bytes).map_err(|_| WbxmlError::CharsetConv)?;
    charset.encode(text)
}

fn trim_blanks(bytes: &[u8]) -> &[u8] {
    let is_blank = |b: &u8| matches!(b, b' ' | b'\t' | b'\r' | b'\n');
    let start = bytes.iter().take_while(|b| is_blank(b)).count();
    let end = bytes.len() - bytes.iter().rev().take_while(|b| is_blank(b)).count();
    if start >= end { &[] } else { &bytes[start..end] }
}

/// Attribute value split into known value tokens and string runs, greedy
/// left to right. Shared by the string-table pre-pass and body emission so
/// both see identical string segments.
enum ValueSegment {
    Token(&'static AttrValueEntry),
    Str(String),
}

fn attr_segments(
    lang: &'static LanguageRecord,
    attr: &Attribute,
) -> (Option<&'static AttrEntry>, Vec<ValueSegment>) {
    let entry = attr.name.entry();
    let mut rest: &str = &attr.value;
    if let Some(prefix) = entry.and_then(|e| e.value_prefix) {
        rest = rest.strip_prefix(prefix).unwrap_or(rest);
    }

    let mut segments = Vec::new();
    while !rest.is_empty() {
        match lang.attr_value_match(rest) {
            Some((0, entry)) => {
                segments.push(ValueSegment::Token(entry));
                rest = &rest[entry.value.len()..];
            }
            Some((pos, entry)) => {
                segments.push(ValueSegment::Str(rest[..pos].to_string()));
                segments.push(ValueSegment::Token(entry));
                rest = &rest[pos + entry.value.len()..];
            }
            None => {
                segments.push(ValueSegment::Str(rest.to_string()));
                break;
            }
        }
    }
    (entry, segments)
}

/// Encoder-side string table: literal names are mandatory entries, other
/// strings are admitted when they recur. Offsets follow first-seen order,
/// which keeps the output deterministic.
struct StrTbl {
    enabled: bool,
    threshold: usize,
    order: Vec<Vec<u8>>,
    required: HashMap<Vec<u8>, bool>,
    counts: HashMap<Vec<u8>, usize>,
    offsets: HashMap<Vec<u8>, u32>,
    blob: Vec<u8>,
}

impl StrTbl {
    fn new(enabled: bool, threshold: usize) -> Self {
        StrTbl {
            enabled,
            threshold,
            order: Vec::new(),
            required: HashMap::new(),
            counts: HashMap::new(),
            offsets: HashMap::new(),
            blob: Vec::new(),
        }
    }

    fn touch(&mut self, bytes: &[u8], required: bool) {
        if !self.enabled {
            return;
        }
        if !self.counts.contains_key(bytes) {
            self.order.push(bytes.to_vec());
        }
        *self.counts.entry(bytes.to_vec()).or_insert(0) += 1;
        if required {
            self.required.insert(bytes.to_vec(), true);
        }
    }

    /// A literal name; always emitted into the table.
    fn require(&mut self, bytes: &[u8]) {
        self.touch(bytes, true);
    }

    /// A text or attribute-value string; admitted when seen twice.
    fn consider(&mut self, bytes: &[u8]) {
        if bytes.len() >= self.threshold {
            self.touch(bytes, false);
        }
    }

    fn seal(&mut self) {
        for entry in &self.order {
            let keep = self.required.get(entry).copied().unwrap_or(false)
                || self.counts.get(entry).copied().unwrap_or(0) >= 2;
            if keep {
                self.offsets.insert(entry.clone(), self.blob.len() as u32);
                self.blob.extend_from_slice(entry);
                self.blob.push(0);
            }
        }
    }

    fn offset(&self, bytes: &[u8]) -> Option<u32> {
        self.offsets.get(bytes).copied()
    }
}

/// Serialise a tree to a WBXML byte document.
pub fn tree_to_wbxml(tree: &Tree, params: &WbxmlGenParams) -> Result<Bytes> {
    let lang = tree.language().ok_or(WbxmlError::UnknownXmlLanguage)?;
    let root = tree.root().ok_or(WbxmlError::BadParameter)?;
    let charset = tree.orig_charset.unwrap_or(Charset::Utf8);

    let mut emitter = WbxmlEmitter {
        tree,
        lang,
        params,
        charset,
        ignore_empty_text: !params.keep_ignorable_ws,
        remove_text_blanks: !params.keep_ignorable_ws,
        strtbl: StrTbl::new(params.use_strtbl, params.strtbl_threshold),
        page: 0,
        out: ByteBuffer::new(),
    };

    if !params.produce_anonymous && lang.public_id.value.is_none() {
        let pubid = encode_text(charset, lang.public_id.xml_public_id.as_bytes())?;
        emitter.strtbl.require(&pubid);
    }
    emitter.collect_strings(root)?;
    emitter.strtbl.seal();

    emitter.emit_header()?;
    emitter.emit_element(root)?;
    Ok(emitter.out.freeze())
}

struct WbxmlEmitter<'a> {
    tree: &'a Tree,
    lang: &'static LanguageRecord,
    params: &'a WbxmlGenParams,
    charset: Charset,
    ignore_empty_text: bool,
    remove_text_blanks: bool,
    strtbl: StrTbl,
    page: u8,
    out: ByteBuffer,
}

impl WbxmlEmitter<'_> {
    fn text_payload<'t>(&self, content: &'t [u8]) -> &'t [u8] {
        if self.remove_text_blanks { trim_blanks(content) } else { content }
    }

    /// Children that will produce output, with empty text and CData
    /// dropped according to the whitespace settings.
    fn emittable_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .children(id)
            .into_iter()
            .filter(|child| match &self.tree.node(*child).kind {
                NodeKind::Text(content) => {
                    !(self.ignore_empty_text && self.text_payload(content).is_empty())
                }
                NodeKind::CData(content) => !content.is_empty(),
                _ => true,
            })
            .collect()
    }

    /// String-table pre-pass; mirrors emission exactly.
    fn collect_strings(&mut self, id: NodeId) -> Result<()> {
        let tree = self.tree;
        match &tree.node(id).kind {
            NodeKind::Element { tag, attributes } => {
                if let Tag::Literal(name) = tag {
                    let encoded = encode_text(self.charset, name.as_bytes())?;
                    self.strtbl.require(&encoded);
                }
                for attr in attributes {
                    let (entry, segments) = attr_segments(self.lang, attr);
                    if entry.is_none() {
                        let encoded = encode_text(self.charset, attr.xml_name().as_bytes())?;
                        self.strtbl.require(&encoded);
                    }
                    for segment in segments {
                        if let ValueSegment::Str(text) = segment {
                            let encoded = encode_text(self.charset, text.as_bytes())?;
                            self.strtbl.consider(&encoded);
                        }
                    }
                }
                // binary content goes out as one opaque block; nothing to collect
                if !tag.is_binary() {
                    for child in self.emittable_children(id) {
                        self.collect_strings(child)?;
                    }
                }
            }
            NodeKind::Text(content) => {
                let payload = self.text_payload(content).to_vec();
                let encoded = encode_text(self.charset, &payload)?;
                self.strtbl.consider(&encoded);
            }
            NodeKind::Pi { target, data } => {
                if self.lang.attr_from_name(target, data.as_deref().unwrap_or("")).is_none() {
                    let encoded = encode_text(self.charset, target.as_bytes())?;
                    self.strtbl.require(&encoded);
                }
                if let Some(data) = data {
                    let encoded = encode_text(self.charset, data.as_bytes())?;
                    self.strtbl.consider(&encoded);
                }
            }
            NodeKind::CData(_) | NodeKind::SubTree(_) => {}
        }
        Ok(())
    }

    fn emit_header(&mut self) -> Result<()> {
        self.out.push(self.params.version.token());

        if self.params.produce_anonymous {
            self.out.push_mb_u32(0x01);
        } else if let Some(value) = self.lang.public_id.value {
            self.out.push_mb_u32(value);
        } else {
            let encoded = encode_text(self.charset, self.lang.public_id.xml_public_id.as_bytes())?;
            let offset = self.strtbl_offset(&encoded)?;
            self.out.push_mb_u32(0x00);
            self.out.push_mb_u32(offset);
        }

        self.out.push_mb_u32(self.charset.mib_enum());
        self.out.push_mb_u32(self.strtbl.blob.len() as u32);
        self.out.extend(&self.strtbl.blob);
        Ok(())
    }

    fn strtbl_offset(&self, encoded: &[u8]) -> Result<u32> {
        if !self.strtbl.enabled {
            return Err(WbxmlError::StrtblDisabled);
        }
        self.strtbl.offset(encoded).ok_or(WbxmlError::Internal)
    }

    fn switch_page(&mut self, page: u8) {
        if page != self.page {
            debug!(from = self.page, to = page, "switch code page");
            self.out.push(0x00);
            self.out.push(page);
            self.page = page;
        }
    }

    fn emit_element(&mut self, id: NodeId) -> Result<()> {
        let tree = self.tree;
        let NodeKind::Element { tag, attributes } = &tree.node(id).kind else {
            return Err(WbxmlError::Internal);
        };

        let binary = tag.is_binary();
        let binary_content = if binary { tree.text_content(id) } else { Vec::new() };
        let children = if binary { Vec::new() } else { self.emittable_children(id) };
        let has_content = if binary { !binary_content.is_empty() } else { !children.is_empty() };
        let has_attrs = !attributes.is_empty();

        // literal tags stay on whatever page is current
        if let Some(page) = tag.code_page() {
            self.switch_page(page);
        }

        let mut token = match tag {
            Tag::Known(entry) => entry.token,
            Tag::Literal(_) => 0x04,
        };
        if has_content {
            token |= TAG_WITH_CONTENT;
        }
        if has_attrs {
            token |= TAG_WITH_ATTRS;
        }
        self.out.push(token);

        if let Tag::Literal(name) = tag {
            let encoded = encode_text(self.charset, name.as_bytes())?;
            let offset = self.strtbl_offset(&encoded)?;
            self.out.push_mb_u32(offset);
        }

        if has_attrs {
            for attr in attributes {
                self.emit_attribute(attr)?;
            }
            self.out.push(0x01);
        }

        if has_content {
            if binary {
                // raw bytes, already base64-decoded on the XML side
                self.emit_opaque(&binary_content);
            } else {
                for child in children {
                    match &tree.node(child).kind {
                        NodeKind::Element { .. } => self.emit_element(child)?,
                        NodeKind::Text(content) => {
                            let payload = self.text_payload(content);
                            self.emit_text(payload)?;
                        }
                        NodeKind::CData(content) => self.emit_opaque(content),
                        NodeKind::SubTree(sub) => {
                            debug!("encoding embedded sub-document");
                            let doc = tree_to_wbxml(sub, self.params)?;
                            self.emit_opaque(&doc);
                        }
                        NodeKind::Pi { target, data } => {
                            self.emit_pi(target, data.as_deref())?;
                        }
                    }
                }
            }
            self.out.push(0x01);
        }
        Ok(())
    }

    fn emit_text(&mut self, content: &[u8]) -> Result<()> {
        let encoded = encode_text(self.charset, content)?;
        if let Some(offset) = self.strtbl.offset(&encoded) {
            self.out.push(0x83);
            self.out.push_mb_u32(offset);
        } else {
            self.out.push(0x03);
            self.out.extend(&encoded);
            self.out.push(0x00);
        }
        Ok(())
    }

    fn emit_opaque(&mut self, bytes: &[u8]) {
        self.out.push(0xC3);
        self.out.push_mb_u32(bytes.len() as u32);
        self.out.extend(bytes);
    }

    fn emit_attribute(&mut self, attr: &Attribute) -> Result<()> {
        let (entry, segments) = attr_segments(self.lang, attr);
        match entry {
            Some(entry) => {
                self.switch_page(entry.page);
                self.out.push(entry.token);
            }
            None => {
                let encoded = encode_text(self.charset, attr.xml_name().as_bytes())?;
                let offset = self.strtbl_offset(&encoded)?;
                self.out.push(0x04);
                self.out.push_mb_u32(offset);
            }
        }
        for segment in segments {
            match segment {
                ValueSegment::Token(entry) => {
                    self.switch_page(entry.page);
                    self.out.push(entry.token);
                }
                ValueSegment::Str(text) => self.emit_text(text.as_bytes())?,
            }
        }
        Ok(())
    }

    fn emit_pi(&mut self, target: &str, data: Option<&str>) -> Result<()> {
        self.out.push(0x43);
        let data_text = data.unwrap_or("");
        match self.lang.attr_from_name(target, data_text) {
            Some(entry) => {
                self.switch_page(entry.page);
                self.out.push(entry.token);
                let rest = entry
                    .value_prefix
                    .and_then(|p| data_text.strip_prefix(p))
                    .unwrap_or(data_text);
                if !rest.is_empty() {
                    self.emit_text(rest.as_bytes())?;
                }
            }
            None => {
                let encoded = encode_text(self.charset, target.as_bytes())?;
                let offset = self.strtbl_offset(&encoded)?;
                self.out.push(0x04);
                self.out.push_mb_u32(offset);
                if !data_text.is_empty() {
                    self.emit_text(data_text.as_bytes())?;
                }
            }
        }
        self.out.push(0x01);
        Ok(())
    }
}

/// Serialise a tree to XML text (always UTF-8).
pub fn tree_to_xml(tree: &Tree, params: &XmlGenParams) -> Result<String> {
    let lang = tree.language().ok_or(WbxmlError::UnknownXmlLanguage)?;
    let root = tree.root().ok_or(WbxmlError::BadParameter)?;

    let mut emitter = XmlEmitter {
        params,
        ignore_empty_text: !params.keep_ignorable_ws,
        remove_text_blanks: !params.keep_ignorable_ws,
        out: String::new(),
    };

    if params.gen_type != XmlGenType::Canonical {
        emitter.out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        emitter.out.push_str(&format!(
            "<!DOCTYPE {} PUBLIC \"{}\" \"{}\">\n",
            lang.public_id.xml_root_elt, lang.public_id.xml_public_id, lang.public_id.xml_dtd
        ));
    }

    emitter.emit_element(tree, root, 0, false)?;
    Ok(emitter.out)
}

struct XmlEmitter<'a> {
    params: &'a XmlGenParams,
    ignore_empty_text: bool,
    remove_text_blanks: bool,
    out: String,
}

impl XmlEmitter<'_> {
    fn text_payload<'t>(&self, content: &'t [u8]) -> &'t [u8] {
        if self.remove_text_blanks { trim_blanks(content) } else { content }
    }

    fn emittable_children(&self, tree: &Tree, id: NodeId) -> Vec<NodeId> {
        tree.children(id)
            .into_iter()
            .filter(|child| match &tree.node(*child).kind {
                NodeKind::Text(content) => {
                    !(self.ignore_empty_text && self.text_payload(content).is_empty())
                }
                NodeKind::CData(content) => !content.is_empty(),
                _ => true,
            })
            .collect()
    }

    fn canonical(&self) -> bool {
        self.params.gen_type == XmlGenType::Canonical
    }

    fn indent_for(&self, depth: usize, in_mixed: bool) -> String {
        if self.params.gen_type == XmlGenType::Indent && !in_mixed {
            " ".repeat(depth * self.params.indent as usize)
        } else {
            String::new()
        }
    }

    fn newline(&self, in_mixed: bool) -> &'static str {
        if self.params.gen_type == XmlGenType::Indent && !in_mixed { "\n" } else { "" }
    }

    fn emit_element(&mut self, tree: &Tree, id: NodeId, depth: usize, in_mixed: bool) -> Result<()> {
        let node = tree.node(id);
        let NodeKind::Element { tag, attributes } = &node.kind else {
            return Err(WbxmlError::Internal);
        };
        let name = tag.xml_name();
        let binary = tag.is_binary();
        let binary_content = if binary { tree.text_content(id) } else { Vec::new() };
        let children = if binary { Vec::new() } else { self.emittable_children(tree, id) };
        let has_content = if binary { !binary_content.is_empty() } else { !children.is_empty() };

        self.out.push_str(&self.indent_for(depth, in_mixed));
        self.out.push('<');
        self.out.push_str(name);

        let mut ordered: Vec<&Attribute> = attributes.iter().collect();
        if self.canonical() {
            ordered.sort_by_key(|a| a.xml_name().to_string());
        }
        for attr in ordered {
            self.out.push(' ');
            self.out.push_str(attr.xml_name());
            self.out.push_str("=\"");
            self.out.push_str(&self.escape_attr(&attr.value));
            self.out.push('"');
        }

        if !has_content {
            // canonical form has no empty-element syntax
            if self.canonical() {
                self.out.push_str("></");
                self.out.push_str(name);
                self.out.push('>');
            } else {
                self.out.push_str("/>");
            }
            self.out.push_str(self.newline(in_mixed));
            return Ok(());
        }

        self.out.push('>');

        if binary {
            self.out.push_str(&B64.encode(&binary_content));
        } else {
            // elements mixing text and markup are printed compactly so the
            // character data keeps its meaning
            let mixed = children.iter().any(|c| {
                matches!(tree.node(*c).kind, NodeKind::Text(_) | NodeKind::CData(_))
            });
            if !mixed {
                self.out.push_str(self.newline(in_mixed));
            }
            for child in &children {
                match &tree.node(*child).kind {
                    NodeKind::Element { .. } => {
                        self.emit_element(tree, *child, depth + 1, in_mixed || mixed)?;
                    }
                    NodeKind::Text(content) => {
                        let payload = self.text_payload(content);
                        self.out.push_str(&self.escape_text(&String::from_utf8_lossy(payload)));
                    }
                    NodeKind::CData(content) => {
                        self.out.push_str("<![CDATA[");
                        self.out.push_str(&String::from_utf8_lossy(content));
                        self.out.push_str("]]>");
                    }
                    NodeKind::SubTree(sub) => {
                        let sub_root = sub.root().ok_or(WbxmlError::Internal)?;
                        self.emit_element(sub, sub_root, depth + 1, in_mixed || mixed)?;
                    }
                    NodeKind::Pi { target, data } => {
                        self.out.push_str(&self.indent_for(depth + 1, in_mixed || mixed));
                        self.out.push_str("<?");
                        self.out.push_str(target);
                        if let Some(data) = data {
                            self.out.push(' ');
                            self.out.push_str(data);
                        }
                        self.out.push_str("?>");
                        self.out.push_str(self.newline(in_mixed || mixed));
                    }
                }
            }
            if !mixed {
                self.out.push_str(&self.indent_for(depth, in_mixed));
            }
        }

        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
        self.out.push_str(self.newline(in_mixed));
        Ok(())
    }

    fn escape_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '\r' if self.canonical() => out.push_str("&#xD;"),
                other => out.push(other),
            }
        }
        out
    }

    fn escape_attr(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\t' => out.push_str("&#x9;"),
                '\n' => out.push_str("&#xA;"),
                '\r' => out.push_str("&#xD;"),
                other => out.push(other),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_xml::tree_from_xml;
    use crate::tables::LanguageId;

    const SI_XML: &str = concat!(
        r#"<?xml version="1.0"?>"#,
        r#"<!DOCTYPE si PUBLIC "-//WAPFORUM//DTD SI 1.0//EN" "http://www.wapforum.org/DTD/si.dtd">"#,
        r#"<si><indication href="http://a/"/></si>"#,
    );

    fn si_tree() -> Tree {
        tree_from_xml(SI_XML.as_bytes(), true).unwrap()
    }

    #[test]
    fn si_seed_document_is_bit_exact() {
        let params =
            WbxmlGenParams { version: WbxmlVersion::V11, ..WbxmlGenParams::default() };
        let wbxml = tree_to_wbxml(&si_tree(), &params).unwrap();
        assert_eq!(
            &wbxml[..],
            &[
                0x01, 0x05, 0x6A, 0x00, // version 1.1, SI, UTF-8, empty strtbl
                0x45, // si, with content
                0x86, // indication, with attributes
                0x0C, // href="http://
                0x03, b'a', b'/', 0x00, // STR_I "a/"
                0x01, // END of attributes
                0x01, // END of si
            ]
        );
    }

    #[test]
    fn anonymous_mode_writes_unknown_public_id() {
        let params =
            WbxmlGenParams { produce_anonymous: true, ..WbxmlGenParams::default() };
        let wbxml = tree_to_wbxml(&si_tree(), &params).unwrap();
        assert_eq!(wbxml[1], 0x01);
        // no string table either: nothing literal in this document
        assert_eq!(wbxml[3], 0x00);
    }

    #[test]
    fn literal_needs_the_string_table() {
        let xml = br#"<si><oddball/></si>"#;
        let tree = tree_from_xml(xml, true).unwrap();

        let params = WbxmlGenParams { use_strtbl: false, ..WbxmlGenParams::default() };
        assert_eq!(tree_to_wbxml(&tree, &params), Err(WbxmlError::StrtblDisabled));

        let wbxml = tree_to_wbxml(&tree, &WbxmlGenParams::default()).unwrap();
        // strtbl holds "oddball\0"
        assert_eq!(wbxml[3], 0x08);
        assert_eq!(&wbxml[4..12], b"oddball\0");
        // si with content, then LITERAL at offset 0
        assert_eq!(&wbxml[12..15], &[0x45, 0x04, 0x00]);
    }

    #[test]
    fn attr_value_tokens_are_used() {
        let xml = br#"<si><indication href="http://www.x.org/p"/></si>"#;
        let tree = tree_from_xml(xml, true).unwrap();
        let wbxml = tree_to_wbxml(&tree, &WbxmlGenParams::default()).unwrap();
        // 0x0D = href="http://www.", then STR_I "x", 0x88 = ".org/", STR_I "p"
        let body = &wbxml[4..];
        assert_eq!(
            body,
            &[
                0x45, 0x86, 0x0D, //
                0x03, b'x', 0x00, //
                0x88, //
                0x03, b'p', 0x00, //
                0x01, 0x01,
            ]
        );
    }

    #[test]
    fn code_page_switches_are_minimal() {
        let xml = concat!(
            r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.2//EN" "x">"#,
            "<SyncML><Meta><Type>a</Type><Format>b</Format></Meta><Final/></SyncML>",
        );
        let tree = tree_from_xml(xml.as_bytes(), true).unwrap();
        let wbxml = tree_to_wbxml(&tree, &WbxmlGenParams::default()).unwrap();
        let body = &wbxml[5..]; // version, mb_u32 pubid (2 bytes), charset, strtbl len
        // SyncML { Meta { SWITCH(1) Type "a" Format "b" } SWITCH(0) Final }
        assert_eq!(
            body,
            &[
                0x6D, // SyncML, with content
                0x5A, // Meta, with content
                0x00, 0x01, // SWITCH_PAGE 1 (once, not per element)
                0x53, 0x03, b'a', 0x00, 0x01, // Type
                0x47, 0x03, b'b', 0x00, 0x01, // Format, no switch needed
                0x01, // END Meta
                0x00, 0x00, // SWITCH_PAGE back to 0
                0x12, // Final, empty
                0x01, // END SyncML
            ]
        );
    }

    #[test]
    fn repeated_text_lands_in_the_string_table() {
        let xml = concat!(
            r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.1//EN" "x">"#,
            "<SyncML><SyncHdr><SessionID>identical-text</SessionID>",
            "<MsgID>identical-text</MsgID></SyncHdr></SyncML>",
        );
        let tree = tree_from_xml(xml.as_bytes(), true).unwrap();
        let wbxml = tree_to_wbxml(&tree, &WbxmlGenParams::default()).unwrap();

        // table holds the string once
        let strtbl_len = wbxml[4] as usize;
        assert_eq!(strtbl_len, "identical-text".len() + 1);
        // both occurrences are STR_T references to offset 0
        let body = &wbxml[5 + strtbl_len..];
        let refs = body.windows(2).filter(|w| w == &[0x83, 0x00]).count();
        assert_eq!(refs, 2);
    }

    #[test]
    fn binary_tag_content_becomes_raw_opaque() {
        let xml = concat!(
            r#"<!DOCTYPE AirSync PUBLIC "-//AIRSYNC//DTD AirSync//EN" "http://www.microsoft.com/">"#,
            "<Sync><ApplicationData>",
            "<Email2^ConversationId>dGVzdA==</Email2^ConversationId>",
            "</ApplicationData></Sync>",
        );
        let tree = tree_from_xml(xml.as_bytes(), true).unwrap();
        let params =
            WbxmlGenParams { produce_anonymous: true, ..WbxmlGenParams::default() };
        let wbxml = tree_to_wbxml(&tree, &params).unwrap();
        // 8 base64 chars decode to 4 raw bytes in a single opaque block
        let needle: &[u8] = &[0xC3, 0x04, b't', b'e', b's', b't'];
        assert!(wbxml.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn xml_indent_and_compact_modes() {
        let tree = si_tree();

        let compact = tree_to_xml(
            &tree,
            &XmlGenParams { gen_type: XmlGenType::Compact, ..XmlGenParams::default() },
        )
        .unwrap();
        assert!(compact.ends_with(r#"<si><indication href="http://a/"/></si>"#));
        assert!(compact.starts_with("<?xml"));
        assert!(compact.contains("<!DOCTYPE si PUBLIC \"-//WAPFORUM//DTD SI 1.0//EN\""));

        let indented = tree_to_xml(
            &tree,
            &XmlGenParams { gen_type: XmlGenType::Indent, indent: 2, ..XmlGenParams::default() },
        )
        .unwrap();
        assert!(indented.contains("<si>\n  <indication href=\"http://a/\"/>\n</si>"));
    }

    #[test]
    fn canonical_mode_has_no_prolog_and_sorts_attributes() {
        let xml = br#"<si><indication si-id="i" href="http://a/" class="c">t</indication></si>"#;
        let tree = tree_from_xml(xml, true).unwrap();
        let canonical = tree_to_xml(
            &tree,
            &XmlGenParams { gen_type: XmlGenType::Canonical, ..XmlGenParams::default() },
        )
        .unwrap();
        assert_eq!(
            canonical,
            r#"<si><indication class="c" href="http://a/" si-id="i">t</indication></si>"#
        );
    }

    #[test]
    fn mixed_content_is_printed_compactly() {
        let xml = concat!(
            r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.1//EN" "x">"#,
            "<SyncML><Status>before<Final/>after</Status></SyncML>",
        );
        let tree = tree_from_xml(xml.as_bytes(), true).unwrap();
        let indented =
            tree_to_xml(&tree, &XmlGenParams::default()).unwrap();
        assert!(indented.contains("<Status>before<Final/>after</Status>"));
    }

    #[test]
    fn wbxml_gen_params_load_from_toml() {
        let params: WbxmlGenParams =
            toml::from_str("version = \"V12\"\nproduce_anonymous = true\n").unwrap();
        assert_eq!(params.version, WbxmlVersion::V12);
        assert!(params.produce_anonymous);
        assert!(params.use_strtbl);
    }
}
