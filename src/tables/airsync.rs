//! Microsoft ActiveSync (AirSync) token pages, per MS-ASWBXML.
//!
//! The document is always anonymous on the wire; decoding requires the
//! language to be forced. Pages carried here: 0 (AirSync), 2 (Email),
//! 4 (Calendar), 7 (FolderHierarchy), 17 (AirSyncBase), 22 (Email2 — the
//! page with binary-content tags).

use super::{
    LanguageId, LanguageRecord, NamespaceEntry, PublicIdEntry, TagEntry, TAG_OPT_BINARY,
};

macro_rules! tags {
    ($($page:literal : $token:literal $name:literal $(@ $options:expr)?),* $(,)?) => {
        &[$(TagEntry { page: $page, token: $token, name: $name, options: 0 $(| $options)? }),*]
    };
}

static TAGS: &[TagEntry] = tags![
    // Code page 0: AirSync
    0x00: 0x05 "Sync",
    0x00: 0x06 "Responses",
    0x00: 0x07 "Add",
    0x00: 0x08 "Change",
    0x00: 0x09 "Delete",
    0x00: 0x0A "Fetch",
    0x00: 0x0B "SyncKey",
    0x00: 0x0C "ClientId",
    0x00: 0x0D "ServerId",
    0x00: 0x0E "Status",
    0x00: 0x0F "Collection",
    0x00: 0x10 "Class",
    0x00: 0x12 "CollectionId",
    0x00: 0x13 "GetChanges",
    0x00: 0x14 "MoreAvailable",
    0x00: 0x15 "WindowSize",
    0x00: 0x16 "Commands",
    0x00: 0x17 "Options",
    0x00: 0x18 "FilterType",
    0x00: 0x1B "Conflict",
    0x00: 0x1C "Collections",
    0x00: 0x1D "ApplicationData",
    0x00: 0x1E "DeletesAsMoves",
    0x00: 0x20 "Supported",
    0x00: 0x21 "SoftDelete",
    0x00: 0x22 "MIMESupport",
    0x00: 0x23 "MIMETruncation",
    0x00: 0x24 "Wait",
    0x00: 0x25 "Limit",
    0x00: 0x26 "Partial",
    0x00: 0x27 "ConversationMode",
    0x00: 0x28 "MaxItems",
    0x00: 0x29 "HeartbeatInterval",
    // Code page 2: Email
    0x02: 0x05 "Attachment",
    0x02: 0x06 "Attachments",
    0x02: 0x07 "AttName",
    0x02: 0x08 "AttSize",
    0x02: 0x09 "Att0Id",
    0x02: 0x0A "AttMethod",
    0x02: 0x0B "AttRemoved",
    0x02: 0x0C "Body",
    0x02: 0x0D "BodySize",
    0x02: 0x0E "BodyTruncated",
    0x02: 0x0F "DateReceived",
    0x02: 0x10 "DisplayName",
    0x02: 0x11 "DisplayTo",
    0x02: 0x12 "FlagStatus",
    0x02: 0x13 "Importance",
    0x02: 0x14 "MessageClass",
    0x02: 0x15 "Subject",
    0x02: 0x16 "Read",
    0x02: 0x17 "To",
    0x02: 0x18 "Cc",
    0x02: 0x19 "From",
    0x02: 0x1A "ReplyTo",
    0x02: 0x1B "AllDayEvent",
    0x02: 0x1C "Categories",
    0x02: 0x1D "Category",
    0x02: 0x1E "DtStamp",
    0x02: 0x1F "EndTime",
    0x02: 0x20 "InstanceType",
    0x02: 0x21 "BusyStatus",
    0x02: 0x22 "Location",
    0x02: 0x23 "MeetingRequest",
    0x02: 0x24 "Organizer",
    0x02: 0x25 "RecurrenceId",
    0x02: 0x26 "Reminder",
    0x02: 0x27 "ResponseRequested",
    0x02: 0x28 "Recurrences",
    0x02: 0x29 "Recurrence",
    0x02: 0x2A "Type",
    0x02: 0x2B "Until",
    0x02: 0x2C "Occurrences",
    0x02: 0x2D "Interval",
    0x02: 0x2E "DayOfWeek",
    0x02: 0x2F "DayOfMonth",
    0x02: 0x30 "WeekOfMonth",
    0x02: 0x31 "MonthOfYear",
    0x02: 0x32 "StartTime",
    0x02: 0x33 "Sensitivity",
    0x02: 0x34 "TimeZone",
    0x02: 0x35 "GlobalObjId",
    0x02: 0x36 "ThreadTopic",
    0x02: 0x37 "MIMEData",
    0x02: 0x38 "MIMETruncated",
    0x02: 0x39 "MIMESize",
    0x02: 0x3A "InternetCPID",
    0x02: 0x3B "Flag",
    0x02: 0x3C "Status",
    0x02: 0x3D "ContentClass",
    0x02: 0x3E "FlagType",
    0x02: 0x3F "CompleteTime",
    // Code page 4: Calendar
    0x04: 0x05 "Timezone",
    0x04: 0x06 "AllDayEvent",
    0x04: 0x07 "Attendees",
    0x04: 0x08 "Attendee",
    0x04: 0x09 "Email",
    0x04: 0x0A "Name",
    0x04: 0x0B "Body",
    0x04: 0x0C "BodyTruncated",
    0x04: 0x0D "BusyStatus",
    0x04: 0x0E "Categories",
    0x04: 0x0F "Category",
    0x04: 0x11 "DtStamp",
    0x04: 0x12 "EndTime",
    0x04: 0x13 "Exception",
    0x04: 0x14 "Exceptions",
    0x04: 0x15 "Deleted",
    0x04: 0x16 "ExceptionStartTime",
    0x04: 0x17 "Location",
    0x04: 0x18 "MeetingStatus",
    0x04: 0x19 "OrganizerEmail",
    0x04: 0x1A "OrganizerName",
    0x04: 0x1B "Recurrence",
    0x04: 0x1C "Type",
    0x04: 0x1D "Until",
    0x04: 0x1E "Occurrences",
    0x04: 0x1F "Interval",
    0x04: 0x20 "DayOfWeek",
    0x04: 0x21 "DayOfMonth",
    0x04: 0x22 "WeekOfMonth",
    0x04: 0x23 "MonthOfYear",
    0x04: 0x24 "Reminder",
    0x04: 0x25 "Sensitivity",
    0x04: 0x26 "Subject",
    0x04: 0x27 "StartTime",
    0x04: 0x28 "UID",
    0x04: 0x29 "AttendeeStatus",
    0x04: 0x2A "AttendeeType",
    0x04: 0x33 "DisallowNewTimeProposal",
    0x04: 0x34 "ResponseRequested",
    0x04: 0x35 "AppointmentReplyTime",
    0x04: 0x36 "ResponseType",
    0x04: 0x37 "CalendarType",
    0x04: 0x38 "IsLeapMonth",
    0x04: 0x39 "FirstDayOfWeek",
    0x04: 0x3A "OnlineMeetingConfLink",
    0x04: 0x3B "OnlineMeetingExternalLink",
    // Code page 7: FolderHierarchy
    0x07: 0x06 "Folder",
    0x07: 0x07 "DisplayName",
    0x07: 0x08 "ServerId",
    0x07: 0x09 "ParentId",
    0x07: 0x0A "Type",
    0x07: 0x0C "Status",
    0x07: 0x0E "Changes",
    0x07: 0x0F "Add",
    0x07: 0x10 "Delete",
    0x07: 0x11 "Update",
    0x07: 0x12 "SyncKey",
    0x07: 0x13 "FolderCreate",
    0x07: 0x14 "FolderDelete",
    0x07: 0x15 "FolderUpdate",
    0x07: 0x16 "FolderSync",
    0x07: 0x17 "Count",
    // Code page 17: AirSyncBase
    0x11: 0x05 "BodyPreference",
    0x11: 0x06 "Type",
    0x11: 0x07 "TruncationSize",
    0x11: 0x08 "AllOrNone",
    0x11: 0x0A "Body",
    0x11: 0x0B "Data",
    0x11: 0x0C "EstimatedDataSize",
    0x11: 0x0D "Truncated",
    0x11: 0x0E "Attachments",
    0x11: 0x0F "Attachment",
    0x11: 0x10 "DisplayName",
    0x11: 0x11 "FileReference",
    0x11: 0x12 "Method",
    0x11: 0x13 "ContentId",
    0x11: 0x14 "ContentLocation",
    0x11: 0x15 "IsInline",
    0x11: 0x16 "NativeBodyType",
    0x11: 0x17 "ContentType",
    0x11: 0x18 "Preview",
    0x11: 0x19 "BodyPartPreference",
    0x11: 0x1A "BodyPart",
    0x11: 0x1B "Status",
    // Code page 22: Email2
    0x16: 0x05 "UmCallerID",
    0x16: 0x06 "UmUserNotes",
    0x16: 0x07 "UmAttDuration",
    0x16: 0x08 "UmAttOrder",
    0x16: 0x09 "ConversationId" @ TAG_OPT_BINARY,
    0x16: 0x0A "ConversationIndex" @ TAG_OPT_BINARY,
    0x16: 0x0B "LastVerbExecuted",
    0x16: 0x0C "LastVerbExecutionTime",
    0x16: 0x0D "ReceivedAsBcc",
    0x16: 0x0E "Sender",
    0x16: 0x0F "CalendarType",
    0x16: 0x10 "IsLeapMonth",
    0x16: 0x11 "AccountId",
    0x16: 0x12 "FirstDayOfWeek",
    0x16: 0x13 "MeetingMessageType",
];

static NAMESPACES: &[NamespaceEntry] = &[
    NamespaceEntry { page: 0x00, name: "AirSync" },
    NamespaceEntry { page: 0x02, name: "Email" },
    NamespaceEntry { page: 0x04, name: "Calendar" },
    NamespaceEntry { page: 0x07, name: "FolderHierarchy" },
    NamespaceEntry { page: 0x11, name: "AirSyncBase" },
    NamespaceEntry { page: 0x16, name: "Email2" },
];

pub static AIRSYNC: LanguageRecord = LanguageRecord {
    id: LanguageId::AirSync,
    public_id: PublicIdEntry {
        value: None,
        xml_public_id: "-//AIRSYNC//DTD AirSync//EN",
        xml_root_elt: "AirSync",
        xml_dtd: "http://www.microsoft.com/",
    },
    tags: TAGS,
    attrs: &[],
    attr_values: &[],
    ext_values: &[],
    namespaces: NAMESPACES,
};
