//! SL 1.0 (Service Loading, WAP-168).

use super::{AttrEntry, AttrValueEntry, LanguageId, LanguageRecord, PublicIdEntry, TagEntry};

static TAGS: &[TagEntry] = &[TagEntry { page: 0x00, token: 0x05, name: "sl", options: 0 }];

static ATTRS: &[AttrEntry] = &[
    AttrEntry { page: 0x00, token: 0x05, name: "action", value_prefix: Some("execute-low") },
    AttrEntry { page: 0x00, token: 0x06, name: "action", value_prefix: Some("execute-high") },
    AttrEntry { page: 0x00, token: 0x07, name: "action", value_prefix: Some("cache") },
    AttrEntry { page: 0x00, token: 0x08, name: "href", value_prefix: None },
    AttrEntry { page: 0x00, token: 0x09, name: "href", value_prefix: Some("http://") },
    AttrEntry { page: 0x00, token: 0x0A, name: "href", value_prefix: Some("http://www.") },
    AttrEntry { page: 0x00, token: 0x0B, name: "href", value_prefix: Some("https://") },
    AttrEntry { page: 0x00, token: 0x0C, name: "href", value_prefix: Some("https://www.") },
];

static ATTR_VALUES: &[AttrValueEntry] = &[
    AttrValueEntry { page: 0x00, token: 0x85, value: ".com/" },
    AttrValueEntry { page: 0x00, token: 0x86, value: ".edu/" },
    AttrValueEntry { page: 0x00, token: 0x87, value: ".net/" },
    AttrValueEntry { page: 0x00, token: 0x88, value: ".org/" },
];

pub static SL10: LanguageRecord = LanguageRecord {
    id: LanguageId::Sl10,
    public_id: PublicIdEntry {
        value: Some(0x06),
        xml_public_id: "-//WAPFORUM//DTD SL 1.0//EN",
        xml_root_elt: "sl",
        xml_dtd: "http://www.wapforum.org/DTD/sl.dtd",
    },
    tags: TAGS,
    attrs: ATTRS,
    attr_values: ATTR_VALUES,
    ext_values: &[],
    namespaces: &[],
};
