//! SyncML representation protocol 1.0 / 1.1 / 1.2 with MetInf on code
//! page 1, the DevInf device-information dialects, and the OMA DM DDF tree
//! dialect.

use super::{LanguageId, LanguageRecord, PublicIdEntry, TagEntry};

macro_rules! tags {
    ($($page:literal : $token:literal $name:literal),* $(,)?) => {
        &[$(TagEntry { page: $page, token: $token, name: $name, options: 0 }),*]
    };
}

static SYNCML10_TAGS: &[TagEntry] = tags![
    0x00: 0x05 "Add",
    0x00: 0x06 "Alert",
    0x00: 0x07 "Archive",
    0x00: 0x08 "Atomic",
    0x00: 0x09 "Chal",
    0x00: 0x0A "Cmd",
    0x00: 0x0B "CmdID",
    0x00: 0x0C "CmdRef",
    0x00: 0x0D "Copy",
    0x00: 0x0E "Cred",
    0x00: 0x0F "Data",
    0x00: 0x10 "Delete",
    0x00: 0x11 "Exec",
    0x00: 0x12 "Final",
    0x00: 0x13 "Get",
    0x00: 0x14 "Item",
    0x00: 0x15 "Lang",
    0x00: 0x16 "LocName",
    0x00: 0x17 "LocURI",
    0x00: 0x18 "Map",
    0x00: 0x19 "MapItem",
    0x00: 0x1A "Meta",
    0x00: 0x1B "MsgID",
    0x00: 0x1C "MsgRef",
    0x00: 0x1D "NoResp",
    0x00: 0x1E "NoResults",
    0x00: 0x1F "Put",
    0x00: 0x20 "Replace",
    0x00: 0x21 "RespURI",
    0x00: 0x22 "Results",
    0x00: 0x23 "Search",
    0x00: 0x24 "Sequence",
    0x00: 0x25 "SessionID",
    0x00: 0x26 "SftDel",
    0x00: 0x27 "Source",
    0x00: 0x28 "SourceRef",
    0x00: 0x29 "Status",
    0x00: 0x2A "Sync",
    0x00: 0x2B "SyncBody",
    0x00: 0x2C "SyncHdr",
    0x00: 0x2D "SyncML",
    0x00: 0x2E "Target",
    0x00: 0x2F "TargetRef",
    0x00: 0x31 "VerDTD",
    0x00: 0x32 "VerProto",
    // MetInf
    0x01: 0x05 "Anchor",
    0x01: 0x06 "EMI",
    0x01: 0x07 "Format",
    0x01: 0x08 "FreeID",
    0x01: 0x09 "FreeMem",
    0x01: 0x0A "Last",
    0x01: 0x0B "Mark",
    0x01: 0x0C "MaxMsgSize",
    0x01: 0x0D "Mem",
    0x01: 0x0E "MetInf",
    0x01: 0x0F "Next",
    0x01: 0x10 "NextNonce",
    0x01: 0x11 "SharedMem",
    0x01: 0x12 "Size",
    0x01: 0x13 "Type",
    0x01: 0x14 "Version",
];

static SYNCML11_TAGS: &[TagEntry] = tags![
    0x00: 0x05 "Add",
    0x00: 0x06 "Alert",
    0x00: 0x07 "Archive",
    0x00: 0x08 "Atomic",
    0x00: 0x09 "Chal",
    0x00: 0x0A "Cmd",
    0x00: 0x0B "CmdID",
    0x00: 0x0C "CmdRef",
    0x00: 0x0D "Copy",
    0x00: 0x0E "Cred",
    0x00: 0x0F "Data",
    0x00: 0x10 "Delete",
    0x00: 0x11 "Exec",
    0x00: 0x12 "Final",
    0x00: 0x13 "Get",
    0x00: 0x14 "Item",
    0x00: 0x15 "Lang",
    0x00: 0x16 "LocName",
    0x00: 0x17 "LocURI",
    0x00: 0x18 "Map",
    0x00: 0x19 "MapItem",
    0x00: 0x1A "Meta",
    0x00: 0x1B "MsgID",
    0x00: 0x1C "MsgRef",
    0x00: 0x1D "NoResp",
    0x00: 0x1E "NoResults",
    0x00: 0x1F "Put",
    0x00: 0x20 "Replace",
    0x00: 0x21 "RespURI",
    0x00: 0x22 "Results",
    0x00: 0x23 "Search",
    0x00: 0x24 "Sequence",
    0x00: 0x25 "SessionID",
    0x00: 0x26 "SftDel",
    0x00: 0x27 "Source",
    0x00: 0x28 "SourceRef",
    0x00: 0x29 "Status",
    0x00: 0x2A "Sync",
    0x00: 0x2B "SyncBody",
    0x00: 0x2C "SyncHdr",
    0x00: 0x2D "SyncML",
    0x00: 0x2E "Target",
    0x00: 0x2F "TargetRef",
    0x00: 0x31 "VerDTD",
    0x00: 0x32 "VerProto",
    0x00: 0x33 "NumberOfChanges",
    0x00: 0x34 "MoreData",
    // MetInf
    0x01: 0x05 "Anchor",
    0x01: 0x06 "EMI",
    0x01: 0x07 "Format",
    0x01: 0x08 "FreeID",
    0x01: 0x09 "FreeMem",
    0x01: 0x0A "Last",
    0x01: 0x0B "Mark",
    0x01: 0x0C "MaxMsgSize",
    0x01: 0x0D "Mem",
    0x01: 0x0E "MetInf",
    0x01: 0x0F "Next",
    0x01: 0x10 "NextNonce",
    0x01: 0x11 "SharedMem",
    0x01: 0x12 "Size",
    0x01: 0x13 "Type",
    0x01: 0x14 "Version",
    0x01: 0x15 "MaxObjSize",
];

static SYNCML12_TAGS: &[TagEntry] = tags![
    0x00: 0x05 "Add",
    0x00: 0x06 "Alert",
    0x00: 0x07 "Archive",
    0x00: 0x08 "Atomic",
    0x00: 0x09 "Chal",
    0x00: 0x0A "Cmd",
    0x00: 0x0B "CmdID",
    0x00: 0x0C "CmdRef",
    0x00: 0x0D "Copy",
    0x00: 0x0E "Cred",
    0x00: 0x0F "Data",
    0x00: 0x10 "Delete",
    0x00: 0x11 "Exec",
    0x00: 0x12 "Final",
    0x00: 0x13 "Get",
    0x00: 0x14 "Item",
    0x00: 0x15 "Lang",
    0x00: 0x16 "LocName",
    0x00: 0x17 "LocURI",
    0x00: 0x18 "Map",
    0x00: 0x19 "MapItem",
    0x00: 0x1A "Meta",
    0x00: 0x1B "MsgID",
    0x00: 0x1C "MsgRef",
    0x00: 0x1D "NoResp",
    0x00: 0x1E "NoResults",
    0x00: 0x1F "Put",
    0x00: 0x20 "Replace",
    0x00: 0x21 "RespURI",
    0x00: 0x22 "Results",
    0x00: 0x23 "Search",
    0x00: 0x24 "Sequence",
    0x00: 0x25 "SessionID",
    0x00: 0x26 "SftDel",
    0x00: 0x27 "Source",
    0x00: 0x28 "SourceRef",
    0x00: 0x29 "Status",
    0x00: 0x2A "Sync",
    0x00: 0x2B "SyncBody",
    0x00: 0x2C "SyncHdr",
    0x00: 0x2D "SyncML",
    0x00: 0x2E "Target",
    0x00: 0x2F "TargetRef",
    0x00: 0x31 "VerDTD",
    0x00: 0x32 "VerProto",
    0x00: 0x33 "NumberOfChanges",
    0x00: 0x34 "MoreData",
    0x00: 0x35 "Field",
    0x00: 0x36 "Filter",
    0x00: 0x37 "Record",
    0x00: 0x38 "FilterType",
    0x00: 0x39 "SourceParent",
    0x00: 0x3A "TargetParent",
    0x00: 0x3B "Move",
    0x00: 0x3C "Correlator",
    // MetInf
    0x01: 0x05 "Anchor",
    0x01: 0x06 "EMI",
    0x01: 0x07 "Format",
    0x01: 0x08 "FreeID",
    0x01: 0x09 "FreeMem",
    0x01: 0x0A "Last",
    0x01: 0x0B "Mark",
    0x01: 0x0C "MaxMsgSize",
    0x01: 0x0D "Mem",
    0x01: 0x0E "MetInf",
    0x01: 0x0F "Next",
    0x01: 0x10 "NextNonce",
    0x01: 0x11 "SharedMem",
    0x01: 0x12 "Size",
    0x01: 0x13 "Type",
    0x01: 0x14 "Version",
    0x01: 0x15 "MaxObjSize",
    0x01: 0x16 "FieldLevel",
];

static DEVINF10_TAGS: &[TagEntry] = tags![
    0x00: 0x05 "CTCap",
    0x00: 0x06 "CTType",
    0x00: 0x07 "DataStore",
    0x00: 0x08 "DataType",
    0x00: 0x09 "DevID",
    0x00: 0x0A "DevInf",
    0x00: 0x0B "DevTyp",
    0x00: 0x0C "DisplayName",
    0x00: 0x0D "DSMem",
    0x00: 0x0E "Ext",
    0x00: 0x0F "FwV",
    0x00: 0x10 "HwV",
    0x00: 0x11 "Man",
    0x00: 0x12 "MaxGUIDSize",
    0x00: 0x13 "MaxID",
    0x00: 0x14 "MaxMem",
    0x00: 0x15 "Mod",
    0x00: 0x16 "OEM",
    0x00: 0x17 "ParamName",
    0x00: 0x18 "PropName",
    0x00: 0x19 "Rx",
    0x00: 0x1A "Rx-Pref",
    0x00: 0x1B "SharedMem",
    0x00: 0x1C "Size",
    0x00: 0x1D "SourceRef",
    0x00: 0x1E "SwV",
    0x00: 0x1F "SyncCap",
    0x00: 0x20 "SyncType",
    0x00: 0x21 "Tx",
    0x00: 0x22 "Tx-Pref",
    0x00: 0x23 "ValEnum",
    0x00: 0x24 "VerCT",
    0x00: 0x25 "VerDTD",
    0x00: 0x26 "Xnam",
    0x00: 0x27 "Xval",
];

static DEVINF11_TAGS: &[TagEntry] = tags![
    0x00: 0x05 "CTCap",
    0x00: 0x06 "CTType",
    0x00: 0x07 "DataStore",
    0x00: 0x08 "DataType",
    0x00: 0x09 "DevID",
    0x00: 0x0A "DevInf",
    0x00: 0x0B "DevTyp",
    0x00: 0x0C "DisplayName",
    0x00: 0x0D "DSMem",
    0x00: 0x0E "Ext",
    0x00: 0x0F "FwV",
    0x00: 0x10 "HwV",
    0x00: 0x11 "Man",
    0x00: 0x12 "MaxGUIDSize",
    0x00: 0x13 "MaxID",
    0x00: 0x14 "MaxMem",
    0x00: 0x15 "Mod",
    0x00: 0x16 "OEM",
    0x00: 0x17 "ParamName",
    0x00: 0x18 "PropName",
    0x00: 0x19 "Rx",
    0x00: 0x1A "Rx-Pref",
    0x00: 0x1B "SharedMem",
    0x00: 0x1C "Size",
    0x00: 0x1D "SourceRef",
    0x00: 0x1E "SwV",
    0x00: 0x1F "SyncCap",
    0x00: 0x20 "SyncType",
    0x00: 0x21 "Tx",
    0x00: 0x22 "Tx-Pref",
    0x00: 0x23 "ValEnum",
    0x00: 0x24 "VerCT",
    0x00: 0x25 "VerDTD",
    0x00: 0x26 "Xnam",
    0x00: 0x27 "Xval",
    0x00: 0x28 "UTC",
    0x00: 0x29 "SupportNumberOfChanges",
    0x00: 0x2A "SupportLargeObjs",
];

static DEVINF12_TAGS: &[TagEntry] = tags![
    0x00: 0x05 "CTCap",
    0x00: 0x06 "CTType",
    0x00: 0x07 "DataStore",
    0x00: 0x08 "DataType",
    0x00: 0x09 "DevID",
    0x00: 0x0A "DevInf",
    0x00: 0x0B "DevTyp",
    0x00: 0x0C "DisplayName",
    0x00: 0x0D "DSMem",
    0x00: 0x0E "Ext",
    0x00: 0x0F "FwV",
    0x00: 0x10 "HwV",
    0x00: 0x11 "Man",
    0x00: 0x12 "MaxGUIDSize",
    0x00: 0x13 "MaxID",
    0x00: 0x14 "MaxMem",
    0x00: 0x15 "Mod",
    0x00: 0x16 "OEM",
    0x00: 0x17 "ParamName",
    0x00: 0x18 "PropName",
    0x00: 0x19 "Rx",
    0x00: 0x1A "Rx-Pref",
    0x00: 0x1B "SharedMem",
    0x00: 0x1C "Size",
    0x00: 0x1D "SourceRef",
    0x00: 0x1E "SwV",
    0x00: 0x1F "SyncCap",
    0x00: 0x20 "SyncType",
    0x00: 0x21 "Tx",
    0x00: 0x22 "Tx-Pref",
    0x00: 0x23 "ValEnum",
    0x00: 0x24 "VerCT",
    0x00: 0x25 "VerDTD",
    0x00: 0x26 "Xnam",
    0x00: 0x27 "Xval",
    0x00: 0x28 "UTC",
    0x00: 0x29 "SupportNumberOfChanges",
    0x00: 0x2A "SupportLargeObjs",
    0x00: 0x2B "Property",
    0x00: 0x2C "PropParam",
    0x00: 0x2D "MaxOccur",
    0x00: 0x2E "NoTruncate",
    0x00: 0x30 "Filter-Rx",
    0x00: 0x31 "FilterCap",
    0x00: 0x32 "FilterKeyword",
    0x00: 0x33 "FieldLevel",
    0x00: 0x34 "SupportHierarchicalSync",
];

static DMDDF12_TAGS: &[TagEntry] = tags![
    0x00: 0x05 "AccessType",
    0x00: 0x06 "ACL",
    0x00: 0x07 "Add",
    0x00: 0x08 "b64",
    0x00: 0x09 "bin",
    0x00: 0x0A "bool",
    0x00: 0x0B "chr",
    0x00: 0x0C "CaseSense",
    0x00: 0x0D "CIS",
    0x00: 0x0E "Copy",
    0x00: 0x0F "CS",
    0x00: 0x10 "date",
    0x00: 0x11 "DDFName",
    0x00: 0x12 "DefaultValue",
    0x00: 0x13 "Delete",
    0x00: 0x14 "Description",
    0x00: 0x15 "DFFormat",
    0x00: 0x16 "DFProperties",
    0x00: 0x17 "DFTitle",
    0x00: 0x18 "DFType",
    0x00: 0x19 "Dynamic",
    0x00: 0x1A "Exec",
    0x00: 0x1B "float",
    0x00: 0x1C "Format",
    0x00: 0x1D "Get",
    0x00: 0x1E "int",
    0x00: 0x1F "Man",
    0x00: 0x20 "MgmtTree",
    0x00: 0x21 "MIME",
    0x00: 0x22 "Mod",
    0x00: 0x23 "Name",
    0x00: 0x24 "Node",
    0x00: 0x25 "node",
    0x00: 0x26 "NodeName",
    0x00: 0x27 "null",
    0x00: 0x28 "Occurrence",
    0x00: 0x29 "One",
    0x00: 0x2A "OneOrMore",
    0x00: 0x2B "OneOrN",
    0x00: 0x2C "Path",
    0x00: 0x2D "Permanent",
    0x00: 0x2E "Replace",
    0x00: 0x2F "RTProperties",
    0x00: 0x30 "Scope",
    0x00: 0x31 "Size",
    0x00: 0x32 "time",
    0x00: 0x33 "Title",
    0x00: 0x34 "TStamp",
    0x00: 0x35 "Type",
    0x00: 0x36 "Value",
    0x00: 0x37 "VerDTD",
    0x00: 0x38 "VerNo",
    0x00: 0x39 "xml",
    0x00: 0x3A "ZeroOrMore",
    0x00: 0x3B "ZeroOrN",
    0x00: 0x3C "ZeroOrOne",
];

pub static SYNCML10: LanguageRecord = LanguageRecord {
    id: LanguageId::SyncMl10,
    public_id: PublicIdEntry {
        value: Some(0x0FD1),
        xml_public_id: "-//SYNCML//DTD SyncML 1.0//EN",
        xml_root_elt: "SyncML",
        xml_dtd: "http://www.syncml.org/docs/syncml_represent_v10_20001207.dtd",
    },
    tags: SYNCML10_TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: &[],
};

pub static DEVINF10: LanguageRecord = LanguageRecord {
    id: LanguageId::DevInf10,
    public_id: PublicIdEntry {
        value: Some(0x0FD2),
        xml_public_id: "-//SYNCML//DTD DevInf 1.0//EN",
        xml_root_elt: "DevInf",
        xml_dtd: "http://www.syncml.org/docs/syncml_devinf_v10_20001207.dtd",
    },
    tags: DEVINF10_TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: &[],
};

pub static SYNCML11: LanguageRecord = LanguageRecord {
    id: LanguageId::SyncMl11,
    public_id: PublicIdEntry {
        value: Some(0x0FD3),
        xml_public_id: "-//SYNCML//DTD SyncML 1.1//EN",
        xml_root_elt: "SyncML",
        xml_dtd: "http://www.syncml.org/docs/syncml_represent_v11_20020213.dtd",
    },
    tags: SYNCML11_TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: &[],
};

pub static DEVINF11: LanguageRecord = LanguageRecord {
    id: LanguageId::DevInf11,
    public_id: PublicIdEntry {
        value: Some(0x0FD4),
        xml_public_id: "-//SYNCML//DTD DevInf 1.1//EN",
        xml_root_elt: "DevInf",
        xml_dtd: "http://www.syncml.org/docs/devinf_v11_20020215.dtd",
    },
    tags: DEVINF11_TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: &[],
};

pub static SYNCML12: LanguageRecord = LanguageRecord {
    id: LanguageId::SyncMl12,
    public_id: PublicIdEntry {
        value: Some(0x1201),
        xml_public_id: "-//SYNCML//DTD SyncML 1.2//EN",
        xml_root_elt: "SyncML",
        xml_dtd: "http://www.openmobilealliance.org/tech/DTD/OMA-TS-SyncML_RepPro_DTD-V1_2.dtd",
    },
    tags: SYNCML12_TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: &[],
};

pub static DEVINF12: LanguageRecord = LanguageRecord {
    id: LanguageId::DevInf12,
    public_id: PublicIdEntry {
        value: Some(0x1203),
        xml_public_id: "-//SYNCML//DTD DevInf 1.2//EN",
        xml_root_elt: "DevInf",
        xml_dtd: "http://www.openmobilealliance.org/tech/DTD/OMA-TS-DevInf_DTD-V1_2.dtd",
    },
    tags: DEVINF12_TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: &[],
};

pub static DMDDF12: LanguageRecord = LanguageRecord {
    id: LanguageId::DmDdf12,
    public_id: PublicIdEntry {
        // The DM DDF dialect has no OMNA-assigned token; documents carry the
        // identifier string through the string table.
        value: None,
        xml_public_id: "-//OMA//DTD-DM-DDF 1.2//EN",
        xml_root_elt: "MgmtTree",
        xml_dtd: "http://www.openmobilealliance.org/tech/DTD/dm_ddf-v1_2.dtd",
    },
    tags: DMDDF12_TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: &[],
};
