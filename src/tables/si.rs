//! SI 1.0 (Service Indication, WAP-167).

use super::{AttrEntry, AttrValueEntry, LanguageId, LanguageRecord, PublicIdEntry, TagEntry};

static TAGS: &[TagEntry] = &[
    TagEntry { page: 0x00, token: 0x05, name: "si", options: 0 },
    TagEntry { page: 0x00, token: 0x06, name: "indication", options: 0 },
    TagEntry { page: 0x00, token: 0x07, name: "info", options: 0 },
    TagEntry { page: 0x00, token: 0x08, name: "item", options: 0 },
];

static ATTRS: &[AttrEntry] = &[
    AttrEntry { page: 0x00, token: 0x05, name: "action", value_prefix: Some("signal-none") },
    AttrEntry { page: 0x00, token: 0x06, name: "action", value_prefix: Some("signal-low") },
    AttrEntry { page: 0x00, token: 0x07, name: "action", value_prefix: Some("signal-medium") },
    AttrEntry { page: 0x00, token: 0x08, name: "action", value_prefix: Some("signal-high") },
    AttrEntry { page: 0x00, token: 0x09, name: "action", value_prefix: Some("delete") },
    AttrEntry { page: 0x00, token: 0x0A, name: "created", value_prefix: None },
    AttrEntry { page: 0x00, token: 0x0B, name: "href", value_prefix: None },
    AttrEntry { page: 0x00, token: 0x0C, name: "href", value_prefix: Some("http://") },
    AttrEntry { page: 0x00, token: 0x0D, name: "href", value_prefix: Some("http://www.") },
    AttrEntry { page: 0x00, token: 0x0E, name: "href", value_prefix: Some("https://") },
    AttrEntry { page: 0x00, token: 0x0F, name: "href", value_prefix: Some("https://www.") },
    AttrEntry { page: 0x00, token: 0x10, name: "si-expires", value_prefix: None },
    AttrEntry { page: 0x00, token: 0x11, name: "si-id", value_prefix: None },
    AttrEntry { page: 0x00, token: 0x12, name: "class", value_prefix: None },
];

static ATTR_VALUES: &[AttrValueEntry] = &[
    AttrValueEntry { page: 0x00, token: 0x85, value: ".com/" },
    AttrValueEntry { page: 0x00, token: 0x86, value: ".edu/" },
    AttrValueEntry { page: 0x00, token: 0x87, value: ".net/" },
    AttrValueEntry { page: 0x00, token: 0x88, value: ".org/" },
];

pub static SI10: LanguageRecord = LanguageRecord {
    id: LanguageId::Si10,
    public_id: PublicIdEntry {
        value: Some(0x05),
        xml_public_id: "-//WAPFORUM//DTD SI 1.0//EN",
        xml_root_elt: "si",
        xml_dtd: "http://www.wapforum.org/DTD/si.dtd",
    },
    tags: TAGS,
    attrs: ATTRS,
    attr_values: ATTR_VALUES,
    ext_values: &[],
    namespaces: &[],
};
