use tracing::{debug, error, warn};

use crate::charset::Charset;
use crate::errors::{Result, WbxmlError};
use crate::parser::{WbxmlEvent, WbxmlReader};
use crate::tables::LanguageId;
use crate::tree::{NodeId, NodeKind, SyncmlDataType, Tree};

/// Parse a WBXML document into a [`Tree`].
///
/// `lang` and `charset` override the header's public id and charset field.
pub fn tree_from_wbxml(
    wbxml: &[u8],
    lang: Option<LanguageId>,
    charset: Option<Charset>,
    assume_vobject: bool,
) -> Result<Tree> {
    let mut reader = WbxmlReader::new(wbxml);
    if let Some(lang) = lang {
        reader.set_language(lang);
    }
    if let Some(charset) = charset {
        reader.set_charset(charset);
    }
    match build(&mut reader, assume_vobject) {
        Ok(tree) => Ok(tree),
        Err(err) => {
            error!(byte_index = reader.byte_index(), %err, "WBXML parsing failed");
            Err(err)
        }
    }
}

fn build(reader: &mut WbxmlReader<'_>, assume_vobject: bool) -> Result<Tree> {
    let mut tree = Tree::new(None, None);
    let mut current: Option<NodeId> = None;

    loop {
        match reader.read_event()? {
            WbxmlEvent::StartDocument { charset, lang, .. } => {
                tree.set_language(lang);
                tree.orig_charset = Some(charset);
            }
            WbxmlEvent::StartElement { tag, attributes, .. } => {
                let id = tree.add_element(current, tag, attributes)?;
                current = Some(id);
            }
            WbxmlEvent::EndElement { .. } => {
                let Some(mut id) = current else {
                    return Err(WbxmlError::Internal);
                };
                // A synthesized CDATA section ends with its element.
                if matches!(tree.node(id).kind, NodeKind::CData(_)) {
                    id = tree.parent(id).ok_or(WbxmlError::Internal)?;
                }
                current = tree.parent(id);
            }
            WbxmlEvent::Characters(data) => {
                characters(&mut tree, &mut current, data, assume_vobject)?;
            }
            WbxmlEvent::Pi { target, data } => {
                if current.is_some() {
                    tree.add_pi(current, target, data)?;
                } else {
                    debug!("ignoring processing instruction outside the root element");
                }
            }
            WbxmlEvent::EndDocument => break,
        }
    }

    if tree.root().is_none() {
        return Err(WbxmlError::EmptyDocument);
    }
    Ok(tree)
}

fn characters(
    tree: &mut Tree,
    current: &mut Option<NodeId>,
    data: Vec<u8>,
    assume_vobject: bool,
) -> Result<()> {
    let Some(cur) = *current else {
        return Err(WbxmlError::Internal);
    };

    match tree.syncml_data_type(cur, assume_vobject) {
        SyncmlDataType::Wbxml => {
            // SyncML carries DevInf / DM DDF documents as opaque payloads.
            debug!(len = data.len(), "parsing embedded WBXML sub-document");
            match tree_from_wbxml(&data, None, tree.orig_charset, assume_vobject) {
                Ok(sub) => {
                    tree.add_subtree(Some(cur), sub)?;
                }
                Err(err) => {
                    warn!(%err, "embedded document not parsable, keeping it as text");
                    tree.add_text(Some(cur), &data)?;
                }
            }
        }
        dt if dt.is_vobject_like() || dt == SyncmlDataType::Clear => {
            // vObject payloads travel in a CDATA section that is closed when
            // the enclosing element ends.
            if let NodeKind::CData(content) = &mut tree.node_mut(cur).kind {
                content.extend_from_slice(&data);
            } else {
                let id = tree.add_cdata(Some(cur), &data)?;
                *current = Some(id);
            }
        }
        _ => {
            tree.add_text(Some(cur), &data)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elt::Tag;

    const SI_PUSH: &[u8] = &[
        0x01, 0x05, 0x6A, 0x00, //
        0x45, 0x86, 0x0C, 0x03, b'a', b'/', 0x00, 0x01, 0x01,
    ];

    #[test]
    fn builds_tree_from_si_document() {
        let tree = tree_from_wbxml(SI_PUSH, None, None, true).unwrap();
        assert_eq!(tree.language().unwrap().id, LanguageId::Si10);
        assert_eq!(tree.orig_charset, Some(Charset::Utf8));

        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).tag().unwrap().xml_name(), "si");
        let children = tree.children(root);
        assert_eq!(children.len(), 1);
        let indication = tree.node(children[0]);
        assert_eq!(indication.tag().unwrap().xml_name(), "indication");
        assert_eq!(indication.attributes()[0].value, "http://a/");
    }

    #[test]
    fn forced_language_overrides_public_id() {
        // Anonymous document with an SI body.
        let doc = [0x03, 0x01, 0x6A, 0x00, 0x45, 0x86, 0x0C, 0x01, 0x01];
        assert_eq!(
            tree_from_wbxml(&doc, None, None, true).unwrap_err(),
            WbxmlError::UnknownPublicId
        );
        let tree = tree_from_wbxml(&doc, Some(LanguageId::Si10), None, true).unwrap();
        assert_eq!(tree.language().unwrap().id, LanguageId::Si10);
    }

    #[test]
    fn adjacent_characters_events_coalesce_in_tree() {
        // <si><info>... two inline strings ...</info></si>
        let doc = [
            0x01, 0x05, 0x6A, 0x00, //
            0x45, // si
            0x47, // info, with content
            0x03, b'a', b'b', 0x00, // STR_I "ab"
            0x03, b'c', b'd', 0x00, // STR_I "cd"
            0x01, // END info
            0x01, // END si
        ];
        let tree = tree_from_wbxml(&doc, None, None, true).unwrap();
        let root = tree.root().unwrap();
        let info = tree.children(root)[0];
        let children = tree.children(info);
        assert_eq!(children.len(), 1);
        assert!(matches!(&tree.node(children[0]).kind, NodeKind::Text(t) if t == b"abcd"));
    }

    #[test]
    fn vobject_data_becomes_cdata() {
        // SyncML 1.2: SyncML > Replace > Item > Data with text and no Meta.
        let doc = [
            0x02, 0xA4, 0x01, 0x6A, 0x00, //
            0x6D, // SyncML
            0x60, // Replace, with content
            0x54, // Item, with content
            0x4F, // Data, with content
            0x03, b'B', b'E', b'G', b'I', b'N', 0x00, // STR_I
            0x01, // END Data
            0x01, // END Item
            0x01, // END Replace
            0x01, // END SyncML
        ];
        let tree = tree_from_wbxml(&doc, None, None, true).unwrap();
        let root = tree.root().unwrap();
        let replace = tree.children(root)[0];
        let item = tree.children(replace)[0];
        let data = tree.children(item)[0];
        assert_eq!(tree.node(data).tag().map(Tag::xml_name), Some("Data"));
        let payload = tree.children(data);
        assert_eq!(payload.len(), 1);
        assert!(matches!(&tree.node(payload[0]).kind, NodeKind::CData(c) if c == b"BEGIN"));

        // Heuristic off: plain text node instead.
        let tree = tree_from_wbxml(&doc, None, None, false).unwrap();
        let root = tree.root().unwrap();
        let data = tree.children(tree.children(tree.children(root)[0])[0])[0];
        let payload = tree.children(data);
        assert!(matches!(&tree.node(payload[0]).kind, NodeKind::Text(t) if t == b"BEGIN"));
    }
}
