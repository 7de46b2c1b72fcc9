use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::encoder::{
    tree_to_wbxml, tree_to_xml, WbxmlGenParams, WbxmlVersion, XmlGenParams, XmlGenType,
};
use crate::errors::{Result, WbxmlError};
use crate::from_wbxml::tree_from_wbxml;
use crate::from_xml::tree_from_xml;
use crate::tables::LanguageId;

/// WBXML → XML conversion driver.
///
/// Parameter object with setters and a one-shot [`run`](Self::run); each run
/// parses to a tree, serialises it and drops everything it allocated.
///
/// ```
/// use wbxml_codec::WbxmlToXml;
///
/// let wbxml = [0x01, 0x05, 0x6A, 0x00, 0x45, 0x06, 0x01];
/// let xml = WbxmlToXml::new().run(&wbxml).unwrap();
/// assert!(xml.contains("<indication/>"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WbxmlToXml {
    pub gen_type: XmlGenType,
    /// Force the document language, overriding the header public id.
    pub language: Option<LanguageId>,
    /// Force the charset, overriding the header charset field.
    pub charset: Option<Charset>,
    pub indent: u8,
    pub keep_ignorable_ws: bool,
    /// SyncML: treat `<Data>` inside `<Add>`/`<Replace>` items without a
    /// `Meta/Type` as a vObject.
    pub assume_vobject_data: bool,
}

impl Default for WbxmlToXml {
    fn default() -> Self {
        WbxmlToXml {
            gen_type: XmlGenType::Indent,
            language: None,
            charset: None,
            indent: 1,
            keep_ignorable_ws: false,
            assume_vobject_data: true,
        }
    }
}

impl WbxmlToXml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_gen_type(&mut self, gen_type: XmlGenType) -> &mut Self {
        self.gen_type = gen_type;
        self
    }

    pub fn set_language(&mut self, language: LanguageId) -> &mut Self {
        self.language = Some(language);
        self
    }

    pub fn set_charset(&mut self, charset: Charset) -> &mut Self {
        self.charset = Some(charset);
        self
    }

    pub fn set_indent(&mut self, indent: u8) -> &mut Self {
        self.indent = indent;
        self
    }

    pub fn enable_preserve_whitespaces(&mut self) -> &mut Self {
        self.keep_ignorable_ws = true;
        self
    }

    pub fn set_assume_vobject_data(&mut self, assume: bool) -> &mut Self {
        self.assume_vobject_data = assume;
        self
    }

    pub fn run(&self, wbxml: &[u8]) -> Result<String> {
        if wbxml.is_empty() {
            return Err(WbxmlError::BadParameter);
        }
        let tree =
            tree_from_wbxml(wbxml, self.language, self.charset, self.assume_vobject_data)?;
        tree_to_xml(
            &tree,
            &XmlGenParams {
                gen_type: self.gen_type,
                indent: self.indent,
                keep_ignorable_ws: self.keep_ignorable_ws,
            },
        )
    }
}

/// XML → WBXML conversion driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlToWbxml {
    pub version: WbxmlVersion,
    pub keep_ignorable_ws: bool,
    pub use_strtbl: bool,
    pub produce_anonymous: bool,
    pub strtbl_threshold: usize,
    pub assume_vobject_data: bool,
}

impl Default for XmlToWbxml {
    fn default() -> Self {
        let params = WbxmlGenParams::default();
        XmlToWbxml {
            version: params.version,
            keep_ignorable_ws: params.keep_ignorable_ws,
            use_strtbl: params.use_strtbl,
            produce_anonymous: params.produce_anonymous,
            strtbl_threshold: params.strtbl_threshold,
            assume_vobject_data: true,
        }
    }
}

impl XmlToWbxml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_version(&mut self, version: WbxmlVersion) -> &mut Self {
        self.version = version;
        self
    }

    pub fn enable_preserve_whitespaces(&mut self) -> &mut Self {
        self.keep_ignorable_ws = true;
        self
    }

    pub fn disable_string_table(&mut self) -> &mut Self {
        self.use_strtbl = false;
        self
    }

    /// ActiveSync requires fully anonymous documents; this drops the public
    /// id from the header.
    pub fn disable_public_id(&mut self) -> &mut Self {
        self.produce_anonymous = true;
        self
    }

    pub fn set_assume_vobject_data(&mut self, assume: bool) -> &mut Self {
        self.assume_vobject_data = assume;
        self
    }

    pub fn run(&self, xml: &[u8]) -> Result<Bytes> {
        if xml.is_empty() {
            return Err(WbxmlError::BadParameter);
        }
        let tree = tree_from_xml(xml, self.assume_vobject_data)?;
        tree_to_wbxml(
            &tree,
            &WbxmlGenParams {
                version: self.version,
                keep_ignorable_ws: self.keep_ignorable_ws,
                use_strtbl: self.use_strtbl,
                produce_anonymous: self.produce_anonymous,
                strtbl_threshold: self.strtbl_threshold,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_bad_parameter() {
        assert_eq!(WbxmlToXml::new().run(&[]), Err(WbxmlError::BadParameter));
        assert_eq!(XmlToWbxml::new().run(&[]), Err(WbxmlError::BadParameter));
    }

    #[test]
    fn parser_errors_propagate_through_the_driver() {
        assert_eq!(
            WbxmlToXml::new().run(&[0x03, 0x01, 0x6A, 0x00, 0x45, 0x01]),
            Err(WbxmlError::UnknownPublicId)
        );
    }

    #[test]
    fn drivers_load_from_toml_config() {
        let conv: WbxmlToXml = toml::from_str(
            "gen_type = \"Compact\"\nlanguage = \"AirSync\"\nindent = 4\n",
        )
        .unwrap();
        assert_eq!(conv.gen_type, XmlGenType::Compact);
        assert_eq!(conv.language, Some(LanguageId::AirSync));
        assert_eq!(conv.indent, 4);
        assert!(conv.assume_vobject_data);

        let conv: XmlToWbxml =
            toml::from_str("version = \"V11\"\nuse_strtbl = false\n").unwrap();
        assert_eq!(conv.version, WbxmlVersion::V11);
        assert!(!conv.use_strtbl);
    }
}
