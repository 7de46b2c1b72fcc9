//! Bidirectional codec between WBXML (the compact tokenized binary XML
//! encoding defined by the WAP Forum / Open Mobile Alliance) and XML.
//!
//! Both directions go through an intermediate tree: WBXML parses into a
//! [`tree::Tree`] which serialises to XML, and vice versa. Supported
//! dialects are SI, SL, SyncML 1.1/1.2 (with embedded DevInf / DM DDF
//! sub-documents) and ActiveSync AirSync.
//!
//! The usual entry points are the two conversion drivers:
//!
//! ```
//! use wbxml_codec::{WbxmlToXml, XmlToWbxml};
//!
//! let xml = br#"<si><indication href="http://a/">hi</indication></si>"#;
//! let wbxml = XmlToWbxml::new().run(xml).unwrap();
//! let back = WbxmlToXml::new().run(&wbxml).unwrap();
//! assert!(back.contains(r#"href="http://a/""#));
//! ```

pub mod buffer;
pub mod charset;
pub mod convert;
pub mod elt;
pub mod encoder;
pub mod errors;
pub mod from_wbxml;
pub mod from_xml;
pub mod parser;
pub mod tables;
pub mod tree;

pub use charset::Charset;
pub use convert::{WbxmlToXml, XmlToWbxml};
pub use encoder::{WbxmlGenParams, WbxmlVersion, XmlGenParams, XmlGenType};
pub use errors::{Result, WbxmlError};
pub use tables::LanguageId;
