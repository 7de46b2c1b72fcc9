//! Static language tables and their lookup logic.
//!
//! The per-dialect token data lives in the sibling modules and is copied
//! verbatim from the WAP / OMA / MS-ASWBXML token assignments; this module
//! defines the table shapes and the dispatch rules over them.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

mod airsync;
mod si;
mod sl;
mod syncml;

/// Tag option: the element's XML text content is base64 and its WBXML
/// content is a raw opaque block.
pub const TAG_OPT_BINARY: u8 = 0x01;

/// Supported document languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageId {
    Si10,
    Sl10,
    SyncMl10,
    DevInf10,
    SyncMl11,
    DevInf11,
    SyncMl12,
    DevInf12,
    DmDdf12,
    AirSync,
}

/// Public identifier record: the numeric OMNA-assigned value (when one
/// exists), the identifier string, the DTD and the document root element.
#[derive(Debug)]
pub struct PublicIdEntry {
    pub value: Option<u32>,
    pub xml_public_id: &'static str,
    pub xml_root_elt: &'static str,
    pub xml_dtd: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TagEntry {
    pub page: u8,
    pub token: u8,
    pub name: &'static str,
    pub options: u8,
}

#[derive(Debug, PartialEq, Eq)]
pub struct AttrEntry {
    pub page: u8,
    pub token: u8,
    pub name: &'static str,
    /// Built-in start of the XML attribute value, e.g. `"http://"`.
    pub value_prefix: Option<&'static str>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct AttrValueEntry {
    pub page: u8,
    pub token: u8,
    pub value: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ExtValueEntry {
    pub page: u8,
    pub index: u8,
    pub value: &'static str,
}

/// Maps a code page to the namespace name used for dispatch on the XML side.
#[derive(Debug, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub page: u8,
    pub name: &'static str,
}

pub struct LanguageRecord {
    pub id: LanguageId,
    pub public_id: PublicIdEntry,
    pub tags: &'static [TagEntry],
    pub attrs: &'static [AttrEntry],
    pub attr_values: &'static [AttrValueEntry],
    pub ext_values: &'static [ExtValueEntry],
    pub namespaces: &'static [NamespaceEntry],
}

impl LanguageRecord {
    pub fn tag_from_token(&self, page: u8, token: u8) -> Option<&'static TagEntry> {
        self.tags.iter().find(|t| t.page == page && t.token == token)
    }

    /// Resolve a tag by XML name. Entries on `page` win; when none matches,
    /// fall back to a name-only search across all pages (first match in
    /// table order). WBXML packs several orthogonal sub-dialects into the
    /// token space, so a name is only unambiguous once a page is chosen.
    pub fn tag_from_name(&self, page: Option<u8>, name: &str) -> Option<&'static TagEntry> {
        if let Some(page) = page {
            if let Some(entry) = self.tags.iter().find(|t| t.page == page && t.name == name) {
                return Some(entry);
            }
        }
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn attr_from_token(&self, page: u8, token: u8) -> Option<&'static AttrEntry> {
        self.attrs.iter().find(|a| a.page == page && a.token == token)
    }

    /// Resolve an attribute-name entry by XML name and runtime value: the
    /// entry's name must match and its value prefix (when present) must
    /// prefix the value. Among candidates, the longest prefix wins; ties go
    /// to table order.
    pub fn attr_from_name(&self, name: &str, value: &str) -> Option<&'static AttrEntry> {
        let mut best: Option<&'static AttrEntry> = None;
        for entry in self.attrs.iter().filter(|a| a.name == name) {
            match entry.value_prefix {
                Some(prefix) if !value.starts_with(prefix) => continue,
                _ => {}
            }
            let len = entry.value_prefix.map_or(0, str::len);
            if best.is_none_or(|b| len > b.value_prefix.map_or(0, str::len)) {
                best = Some(entry);
            }
        }
        best
    }

    pub fn attr_value_from_token(&self, page: u8, token: u8) -> Option<&'static AttrValueEntry> {
        self.attr_values.iter().find(|v| v.page == page && v.token == token)
    }

    /// Find the attribute-value entry with the earliest occurrence in
    /// `value` (ties broken by longest match, then table order). Used by the
    /// encoder's greedy left-to-right value tokenization.
    pub fn attr_value_match(&self, value: &str) -> Option<(usize, &'static AttrValueEntry)> {
        let mut best: Option<(usize, &'static AttrValueEntry)> = None;
        for entry in self.attr_values {
            if let Some(pos) = value.find(entry.value) {
                let better = match best {
                    None => true,
                    Some((bpos, bentry)) => {
                        pos < bpos || (pos == bpos && entry.value.len() > bentry.value.len())
                    }
                };
                if better {
                    best = Some((pos, entry));
                }
            }
        }
        best
    }

    pub fn ext_value(&self, page: u8, index: u8) -> Option<&'static ExtValueEntry> {
        self.ext_values.iter().find(|e| e.page == page && e.index == index)
    }

    pub fn page_from_namespace(&self, name: &str) -> Option<u8> {
        self.namespaces.iter().find(|n| n.name == name).map(|n| n.page)
    }

    pub fn namespace_for_page(&self, page: u8) -> Option<&'static str> {
        self.namespaces.iter().find(|n| n.page == page).map(|n| n.name)
    }
}

impl std::fmt::Debug for LanguageRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageRecord").field("id", &self.id).finish()
    }
}

impl PartialEq for LanguageRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LanguageRecord {}

static LANGUAGES: &[&LanguageRecord] = &[
    &si::SI10,
    &sl::SL10,
    &syncml::SYNCML10,
    &syncml::DEVINF10,
    &syncml::SYNCML11,
    &syncml::DEVINF11,
    &syncml::SYNCML12,
    &syncml::DEVINF12,
    &syncml::DMDDF12,
    &airsync::AIRSYNC,
];

lazy_static! {
    static ref BY_ID: HashMap<LanguageId, &'static LanguageRecord> =
        LANGUAGES.iter().map(|l| (l.id, *l)).collect();
    static ref BY_NUMERIC_PUBLIC_ID: HashMap<u32, &'static LanguageRecord> = LANGUAGES
        .iter()
        .filter_map(|l| l.public_id.value.map(|v| (v, *l)))
        .collect();
}

pub fn get_language(id: LanguageId) -> &'static LanguageRecord {
    BY_ID.get(&id).copied().expect("every language id is registered")
}

pub fn all_languages() -> &'static [&'static LanguageRecord] {
    LANGUAGES
}

pub fn language_from_numeric_public_id(value: u32) -> Option<&'static LanguageRecord> {
    BY_NUMERIC_PUBLIC_ID.get(&value).copied()
}

pub fn language_from_public_id(public_id: &str) -> Option<&'static LanguageRecord> {
    LANGUAGES.iter().find(|l| l.public_id.xml_public_id == public_id).copied()
}

pub fn language_from_system_id(system_id: &str) -> Option<&'static LanguageRecord> {
    LANGUAGES.iter().find(|l| l.public_id.xml_dtd == system_id).copied()
}

pub fn language_from_root_elt(root: &str) -> Option<&'static LanguageRecord> {
    LANGUAGES.iter().find(|l| l.public_id.xml_root_elt == root).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_public_id_lookup() {
        assert_eq!(language_from_numeric_public_id(0x05).unwrap().id, LanguageId::Si10);
        assert_eq!(language_from_numeric_public_id(0x0FD3).unwrap().id, LanguageId::SyncMl11);
        assert_eq!(language_from_numeric_public_id(0x1201).unwrap().id, LanguageId::SyncMl12);
        assert!(language_from_numeric_public_id(0xDEAD).is_none());
    }

    #[test]
    fn string_public_id_and_root_lookup() {
        let si = language_from_public_id("-//WAPFORUM//DTD SI 1.0//EN").unwrap();
        assert_eq!(si.id, LanguageId::Si10);
        assert_eq!(language_from_root_elt("SyncML").unwrap().id, LanguageId::SyncMl10);
        assert_eq!(language_from_root_elt("MgmtTree").unwrap().id, LanguageId::DmDdf12);
        assert_eq!(
            language_from_system_id("http://www.wapforum.org/DTD/sl.dtd").unwrap().id,
            LanguageId::Sl10
        );
    }

    #[test]
    fn tag_lookup_prefers_requested_page() {
        let syncml = get_language(LanguageId::SyncMl12);
        // "Type" only exists on the MetInf page.
        let ty = syncml.tag_from_name(Some(0), "Type").unwrap();
        assert_eq!(ty.page, 1);
        // "Add" exists on page 0.
        let add = syncml.tag_from_name(Some(0), "Add").unwrap();
        assert_eq!((add.page, add.token), (0, 0x05));
    }

    #[test]
    fn attr_prefix_matching_picks_longest() {
        let si = get_language(LanguageId::Si10);
        let plain = si.attr_from_name("href", "ftp://x/").unwrap();
        assert_eq!(plain.value_prefix, None);
        let http = si.attr_from_name("href", "http://a/").unwrap();
        assert_eq!(http.value_prefix, Some("http://"));
        let www = si.attr_from_name("href", "http://www.a.org/").unwrap();
        assert_eq!(www.value_prefix, Some("http://www."));
        assert!(si.attr_from_name("hreff", "x").is_none());
    }

    #[test]
    fn attr_value_match_is_earliest_then_longest() {
        let si = get_language(LanguageId::Si10);
        let (pos, entry) = si.attr_value_match("a.org/b.com/").unwrap();
        assert_eq!((pos, entry.value), (1, ".org/"));
        assert!(si.attr_value_match("nothing here").is_none());
    }

    #[test]
    fn root_lookup_first_match_wins_in_table_order() {
        // SyncML 1.1 is registered before 1.2, so a bare root-element search
        // resolves to the first.
        let first = LANGUAGES
            .iter()
            .find(|l| l.public_id.xml_root_elt == "SyncML")
            .unwrap();
        assert_eq!(language_from_root_elt("SyncML").unwrap().id, first.id);
    }
}
