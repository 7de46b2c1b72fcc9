use tracing::debug;

use crate::charset::Charset;
use crate::elt::{Attribute, Tag};
use crate::errors::{Result, WbxmlError};
use crate::tables::LanguageRecord;

/// Index of a node inside its [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub enum NodeKind {
    Element { tag: Tag, attributes: Vec<Attribute> },
    Text(Vec<u8>),
    CData(Vec<u8>),
    Pi { target: String, data: Option<String> },
    /// An embedded document with its own language (SyncML DevInf / DM DDF).
    SubTree(Box<Tree>),
}

#[derive(Debug)]
pub struct TreeNode {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next: Option<NodeId>,
    prev: Option<NodeId>,
}

impl TreeNode {
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    pub fn tag(&self) -> Option<&Tag> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }
}

/// Content classification of a SyncML `<Data>` element, decided from the
/// sibling `<Meta><Type>` declaration (or, as a last resort, from the
/// enclosing command).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncmlDataType {
    Normal,
    /// application/vnd.syncml-devinf+wbxml or dmtnds+wbxml: an embedded
    /// WBXML document.
    Wbxml,
    Clear,
    DirectoryVcard,
    Vcard,
    Vcalendar,
    /// No Meta/Type present but the Item sits in an Add/Replace command;
    /// assumed to be a vObject.
    Vobject,
}

impl SyncmlDataType {
    pub fn is_vobject_like(self) -> bool {
        matches!(
            self,
            SyncmlDataType::DirectoryVcard
                | SyncmlDataType::Vcard
                | SyncmlDataType::Vcalendar
                | SyncmlDataType::Vobject
        )
    }
}

/// The hinge between XML and WBXML: both directions build this labelled
/// n-ary tree first, then serialise it. Nodes live in an arena and address
/// each other through [`NodeId`]; sibling links form a doubly-linked list.
#[derive(Debug)]
pub struct Tree {
    lang: Option<&'static LanguageRecord>,
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    pub orig_charset: Option<Charset>,
    /// Last code page selected while building from XML.
    pub cur_code_page: u8,
}

impl Tree {
    pub fn new(lang: Option<&'static LanguageRecord>, orig_charset: Option<Charset>) -> Self {
        Tree { lang, nodes: Vec::new(), root: None, orig_charset, cur_code_page: 0 }
    }

    pub fn language(&self) -> Option<&'static LanguageRecord> {
        self.lang
    }

    pub fn set_language(&mut self, lang: &'static LanguageRecord) {
        self.lang = Some(lang);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    /// Create a detached node.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next: None,
            prev: None,
        });
        id
    }

    /// Link `node` as the last child of `parent`, or as the document root
    /// when `parent` is `None` (an existing root is never replaced).
    ///
    /// Consecutive text children are coalesced: appending a text node after
    /// a text node folds the new content into the existing node and returns
    /// its id. XML parsers split character runs arbitrarily, so downstream
    /// code relies on this.
    pub fn add_child(&mut self, parent: Option<NodeId>, node: NodeId) -> Result<NodeId> {
        let Some(parent) = parent else {
            if self.root.is_some() {
                return Err(WbxmlError::Internal);
            }
            self.root = Some(node);
            return Ok(node);
        };

        if let Some(last) = self.node(parent).last_child {
            let both_text = matches!(self.node(last).kind, NodeKind::Text(_))
                && matches!(self.node(node).kind, NodeKind::Text(_));
            if both_text {
                let appended = match &self.node(node).kind {
                    NodeKind::Text(content) => content.clone(),
                    _ => unreachable!(),
                };
                if let NodeKind::Text(existing) = &mut self.node_mut(last).kind {
                    existing.extend_from_slice(&appended);
                }
                return Ok(last);
            }
            self.node_mut(last).next = Some(node);
            self.node_mut(node).prev = Some(last);
        } else {
            self.node_mut(parent).first_child = Some(node);
        }
        self.node_mut(parent).last_child = Some(node);
        self.node_mut(node).parent = Some(parent);
        Ok(node)
    }

    pub fn add_element(
        &mut self,
        parent: Option<NodeId>,
        tag: Tag,
        attributes: Vec<Attribute>,
    ) -> Result<NodeId> {
        let node = self.create_node(NodeKind::Element { tag, attributes });
        self.add_child(parent, node)
    }

    pub fn add_text(&mut self, parent: Option<NodeId>, content: &[u8]) -> Result<NodeId> {
        let node = self.create_node(NodeKind::Text(content.to_vec()));
        self.add_child(parent, node)
    }

    pub fn add_cdata(&mut self, parent: Option<NodeId>, content: &[u8]) -> Result<NodeId> {
        let node = self.create_node(NodeKind::CData(content.to_vec()));
        self.add_child(parent, node)
    }

    pub fn add_pi(
        &mut self,
        parent: Option<NodeId>,
        target: String,
        data: Option<String>,
    ) -> Result<NodeId> {
        let node = self.create_node(NodeKind::Pi { target, data });
        self.add_child(parent, node)
    }

    pub fn add_subtree(&mut self, parent: Option<NodeId>, subtree: Tree) -> Result<NodeId> {
        let node = self.create_node(NodeKind::SubTree(Box::new(subtree)));
        self.add_child(parent, node)
    }

    /// Unlink a node from its parent and siblings without destroying it.
    pub fn extract(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let n = self.node(id);
            (n.parent, n.prev, n.next)
        };
        match parent {
            Some(parent) => {
                if self.node(parent).first_child == Some(id) {
                    self.node_mut(parent).first_child = next;
                }
                if self.node(parent).last_child == Some(id) {
                    self.node_mut(parent).last_child = prev;
                }
            }
            None => {
                if self.root == Some(id) {
                    self.root = next;
                }
            }
        }
        if let Some(prev) = prev {
            self.node_mut(prev).next = next;
        }
        if let Some(next) = next {
            self.node_mut(next).prev = prev;
        }
        let n = self.node_mut(id);
        n.parent = None;
        n.prev = None;
        n.next = None;
    }

    /// Direct children of a node, in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.node(id).first_child;
        while let Some(child) = cursor {
            out.push(child);
            cursor = self.node(child).next;
        }
        out
    }

    /// Search an element by XML name, starting at `from` and walking its
    /// following siblings; with `recurs` the children are searched too.
    pub fn find_element(&self, from: NodeId, name: &str, recurs: bool) -> Option<NodeId> {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let node = self.node(id);
            if let NodeKind::Element { tag, .. } = &node.kind {
                if tag.xml_name() == name {
                    return Some(id);
                }
                if recurs {
                    if let Some(first) = node.first_child {
                        if let Some(found) = self.find_element(first, name, true) {
                            return Some(found);
                        }
                    }
                }
            }
            cursor = node.next;
        }
        None
    }

    pub fn has_element_child(&self, id: NodeId) -> bool {
        self.children(id).iter().any(|c| self.node(*c).is_element())
    }

    /// Concatenated content of the direct text children of an element.
    pub fn text_content(&self, id: NodeId) -> Vec<u8> {
        let mut out = Vec::new();
        for child in self.children(id) {
            if let NodeKind::Text(content) = &self.node(child).kind {
                out.extend_from_slice(content);
            }
        }
        out
    }

    /// Classify the content of a SyncML `<Data>` node.
    ///
    /// The declared type comes from a `<Meta><Type>` next to the `<Data>`
    /// (inside the same `<Item>`) or next to the `<Item>` (inside the
    /// command). Without a declaration, `<Data>` inside an `<Add>` or
    /// `<Replace>` item is assumed to hold a vObject when
    /// `assume_vobject` is set: split vObjects arrive without any Meta
    /// information, and their payload still needs CDATA treatment.
    pub fn syncml_data_type(&self, id: NodeId, assume_vobject: bool) -> SyncmlDataType {
        let mut node_id = id;
        if matches!(self.node(node_id).kind, NodeKind::CData(_)) {
            match self.parent(node_id) {
                Some(parent) => node_id = parent,
                None => return SyncmlDataType::Normal,
            }
        }

        let node = self.node(node_id);
        let is_data = matches!(&node.kind, NodeKind::Element { tag, .. } if tag.xml_name() == "Data");
        if !is_data {
            return SyncmlDataType::Normal;
        }

        let type_text = self
            .meta_type_node(node_id)
            .map(|type_id| String::from_utf8_lossy(&self.text_content(type_id)).into_owned());

        if let Some(content_type) = type_text {
            let data_type = match content_type.as_str() {
                "application/vnd.syncml-devinf+wbxml" => SyncmlDataType::Wbxml,
                "application/vnd.syncml.dmtnds+wbxml" => SyncmlDataType::Wbxml,
                "application/vnd.syncml-devinf+xml" => SyncmlDataType::Normal,
                "application/vnd.syncml.dmtnds+xml" => SyncmlDataType::Normal,
                "text/clear" => SyncmlDataType::Clear,
                "text/directory;profile=vCard" => SyncmlDataType::DirectoryVcard,
                "text/x-vcard" => SyncmlDataType::Vcard,
                "text/x-vcalendar" => SyncmlDataType::Vcalendar,
                _ => SyncmlDataType::Normal,
            };
            if data_type != SyncmlDataType::Normal {
                debug!(content_type = %content_type, "classified SyncML <Data> content");
                return data_type;
            }
        }

        if assume_vobject {
            // Data -> Item -> Add/Replace
            if let Some(command) = self.parent(node_id).and_then(|item| self.parent(item)) {
                if let NodeKind::Element { tag, .. } = &self.node(command).kind {
                    if matches!(tag.xml_name(), "Add" | "Replace") {
                        return SyncmlDataType::Vobject;
                    }
                }
            }
        }

        SyncmlDataType::Normal
    }

    /// `<Meta><Type>` sibling lookup for a `<Data>` node: first inside the
    /// same `<Item>`, then one level up inside the command.
    fn meta_type_node(&self, data_id: NodeId) -> Option<NodeId> {
        for scope in [self.parent(data_id), self.parent(data_id).and_then(|p| self.parent(p))] {
            let Some(scope) = scope else { continue };
            let Some(first) = self.first_child(scope) else { continue };
            if let Some(meta) = self.find_element(first, "Meta", false) {
                if let Some(meta_first) = self.first_child(meta) {
                    if let Some(ty) = self.find_element(meta_first, "Type", false) {
                        return Some(ty);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{self, LanguageId};

    fn syncml_tree() -> Tree {
        Tree::new(Some(tables::get_language(LanguageId::SyncMl12)), None)
    }

    fn elt(tree: &mut Tree, parent: Option<NodeId>, name: &str) -> NodeId {
        let lang = tree.language().unwrap();
        let tag = match lang.tag_from_name(Some(0), name) {
            Some(entry) => Tag::Known(entry),
            None => Tag::Literal(name.to_string()),
        };
        tree.add_element(parent, tag, Vec::new()).unwrap()
    }

    #[test]
    fn adjacent_text_children_coalesce() {
        let mut tree = syncml_tree();
        let root = elt(&mut tree, None, "SyncML");
        let a = tree.add_text(Some(root), b"one ").unwrap();
        let b = tree.add_text(Some(root), b"two ").unwrap();
        let c = tree.add_text(Some(root), b"three").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.text_content(root), b"one two three");
    }

    #[test]
    fn text_element_text_does_not_coalesce() {
        let mut tree = syncml_tree();
        let root = elt(&mut tree, None, "SyncML");
        tree.add_text(Some(root), b"left").unwrap();
        elt(&mut tree, Some(root), "Final");
        tree.add_text(Some(root), b"right").unwrap();
        assert_eq!(tree.children(root).len(), 3);
    }

    #[test]
    fn extract_relinks_siblings() {
        let mut tree = syncml_tree();
        let root = elt(&mut tree, None, "SyncML");
        let hdr = elt(&mut tree, Some(root), "SyncHdr");
        let body = elt(&mut tree, Some(root), "SyncBody");
        let fin = elt(&mut tree, Some(root), "Final");
        tree.extract(body);
        assert_eq!(tree.children(root), vec![hdr, fin]);
        assert_eq!(tree.parent(body), None);
        assert_eq!(tree.next_sibling(hdr), Some(fin));
    }

    #[test]
    fn second_root_is_rejected() {
        let mut tree = syncml_tree();
        elt(&mut tree, None, "SyncML");
        let stray = tree.create_node(NodeKind::Text(b"x".to_vec()));
        assert_eq!(tree.add_child(None, stray), Err(WbxmlError::Internal));
    }

    #[test]
    fn find_element_with_and_without_recursion() {
        let mut tree = syncml_tree();
        let root = elt(&mut tree, None, "SyncML");
        let body = elt(&mut tree, Some(root), "SyncBody");
        let add = elt(&mut tree, Some(body), "Add");
        let item = elt(&mut tree, Some(add), "Item");
        let first = tree.first_child(root).unwrap();
        assert_eq!(tree.find_element(first, "Item", true), Some(item));
        assert_eq!(tree.find_element(first, "Item", false), None);
        assert_eq!(tree.find_element(first, "SyncBody", false), Some(body));

        assert!(tree.has_element_child(body));
        assert!(!tree.has_element_child(item));
        tree.add_text(Some(item), b"payload").unwrap();
        assert!(!tree.has_element_child(item));
    }

    fn data_with_meta(content_type: Option<&str>, command: &str) -> (Tree, NodeId) {
        let mut tree = syncml_tree();
        let root = elt(&mut tree, None, "SyncML");
        let body = elt(&mut tree, Some(root), "SyncBody");
        let cmd = elt(&mut tree, Some(body), command);
        let item = elt(&mut tree, Some(cmd), "Item");
        if let Some(ty) = content_type {
            let meta = elt(&mut tree, Some(item), "Meta");
            let type_elt = elt(&mut tree, Some(meta), "Type");
            tree.add_text(Some(type_elt), ty.as_bytes()).unwrap();
        }
        let data = elt(&mut tree, Some(item), "Data");
        (tree, data)
    }

    #[test]
    fn data_type_follows_meta_type() {
        let (tree, data) = data_with_meta(Some("application/vnd.syncml-devinf+wbxml"), "Results");
        assert_eq!(tree.syncml_data_type(data, true), SyncmlDataType::Wbxml);

        let (tree, data) = data_with_meta(Some("text/x-vcard"), "Results");
        assert_eq!(tree.syncml_data_type(data, true), SyncmlDataType::Vcard);

        let (tree, data) = data_with_meta(Some("text/plain"), "Results");
        assert_eq!(tree.syncml_data_type(data, true), SyncmlDataType::Normal);
    }

    #[test]
    fn vobject_heuristic_is_gated() {
        let (tree, data) = data_with_meta(None, "Replace");
        assert_eq!(tree.syncml_data_type(data, true), SyncmlDataType::Vobject);
        assert_eq!(tree.syncml_data_type(data, false), SyncmlDataType::Normal);

        let (tree, data) = data_with_meta(None, "Results");
        assert_eq!(tree.syncml_data_type(data, true), SyncmlDataType::Normal);
    }
}
