use anyhow::Result;
use wbxml_codec::encoder::{tree_to_xml, XmlGenParams, XmlGenType};
use wbxml_codec::from_xml::tree_from_xml;
use wbxml_codec::{LanguageId, WbxmlError, WbxmlToXml, WbxmlVersion, XmlToWbxml};

fn init_logs() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Canonical form of an XML document, used to compare documents whose
/// formatting differs.
fn canon(xml: &[u8]) -> Result<String> {
    let tree = tree_from_xml(xml, true)?;
    let params = XmlGenParams { gen_type: XmlGenType::Canonical, ..XmlGenParams::default() };
    Ok(tree_to_xml(&tree, &params)?)
}

fn xml_roundtrip(xml: &str) -> Result<()> {
    let wbxml = XmlToWbxml::new().run(xml.as_bytes())?;
    let back = WbxmlToXml::new().run(&wbxml)?;
    assert_eq!(canon(xml.as_bytes())?, canon(back.as_bytes())?, "for input: {xml}");
    Ok(())
}

#[test]
fn xml_to_wbxml_to_xml_is_canonically_stable() -> Result<()> {
    init_logs();
    xml_roundtrip(concat!(
        r#"<?xml version="1.0"?>"#,
        r#"<!DOCTYPE si PUBLIC "-//WAPFORUM//DTD SI 1.0//EN" "http://www.wapforum.org/DTD/si.dtd">"#,
        r#"<si><indication href="http://www.example.org/alert" si-id="a1">"#,
        "Mail waiting</indication></si>",
    ))?;
    xml_roundtrip(r#"<sl href="https://www.shop.net/catalog" action="execute-high"/>"#)?;
    xml_roundtrip(concat!(
        r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.2//EN" "x.dtd">"#,
        "<SyncML><SyncHdr><VerDTD>1.2</VerDTD><VerProto>SyncML/1.2</VerProto>",
        "<SessionID>4</SessionID><MsgID>1</MsgID></SyncHdr>",
        "<SyncBody><Status><CmdID>1</CmdID><Data>200</Data></Status>",
        "<Final/></SyncBody></SyncML>",
    ))?;
    Ok(())
}

#[test]
fn wbxml_to_xml_to_wbxml_is_byte_identical() -> Result<()> {
    init_logs();
    for xml in [
        concat!(
            r#"<!DOCTYPE si PUBLIC "-//WAPFORUM//DTD SI 1.0//EN" "http://www.wapforum.org/DTD/si.dtd">"#,
            r#"<si><indication href="http://a/" action="delete">x</indication></si>"#,
        ),
        concat!(
            r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.1//EN" "x.dtd">"#,
            "<SyncML><SyncHdr><SessionID>identical-text</SessionID>",
            "<MsgID>identical-text</MsgID></SyncHdr></SyncML>",
        ),
    ] {
        let first = XmlToWbxml::new().run(xml.as_bytes())?;
        let xml_back = WbxmlToXml::new().run(&first)?;
        let second = XmlToWbxml::new().run(xml_back.as_bytes())?;
        assert_eq!(&first[..], &second[..], "for input: {xml}");
    }
    Ok(())
}

#[test]
fn si_seed_document_bytes() -> Result<()> {
    init_logs();
    let xml = concat!(
        r#"<?xml version="1.0"?>"#,
        r#"<!DOCTYPE si PUBLIC "-//WAPFORUM//DTD SI 1.0//EN" "http://www.wapforum.org/DTD/si.dtd">"#,
        r#"<si><indication href="http://a/" /></si>"#,
    );
    let mut conv = XmlToWbxml::new();
    conv.set_version(WbxmlVersion::V11);
    let wbxml = conv.run(xml.as_bytes())?;
    assert_eq!(&wbxml[..4], &[0x01, 0x05, 0x6A, 0x00]);
    assert_eq!(
        &wbxml[4..],
        &[0x45, 0x86, 0x0C, 0x03, b'a', b'/', 0x00, 0x01, 0x01]
    );
    Ok(())
}

#[test]
fn anonymous_documents_need_a_forced_language() -> Result<()> {
    init_logs();
    let xml = r#"<si><indication href="http://a/">x</indication></si>"#;
    let mut conv = XmlToWbxml::new();
    conv.disable_public_id();
    let wbxml = conv.run(xml.as_bytes())?;
    assert_eq!(wbxml[1], 0x01);

    assert_eq!(
        WbxmlToXml::new().run(&wbxml),
        Err(WbxmlError::UnknownPublicId)
    );

    let mut back = WbxmlToXml::new();
    back.set_language(LanguageId::Si10);
    let xml_back = back.run(&wbxml)?;
    assert_eq!(canon(xml.as_bytes())?, canon(xml_back.as_bytes())?);
    Ok(())
}

#[test]
fn embedded_devinf_roundtrips() -> Result<()> {
    init_logs();
    let xml = concat!(
        r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.2//EN" "x.dtd">"#,
        "<SyncML><SyncBody><Results><CmdID>2</CmdID>",
        "<Meta><Type>application/vnd.syncml-devinf+wbxml</Type></Meta>",
        "<Item><Source><LocURI>./devinf12</LocURI></Source>",
        "<Data><DevInf><VerDTD>1.2</VerDTD><Man>Acme</Man><Mod>X1</Mod></DevInf></Data>",
        "</Item></Results></SyncBody></SyncML>",
    );
    let wbxml = XmlToWbxml::new().run(xml.as_bytes())?;

    // the embedded document travels as an opaque block holding a complete
    // WBXML document: version 1.3, DevInf 1.2 public id, UTF-8, no strtbl
    let nested_header: &[u8] = &[0x03, 0xA4, 0x03, 0x6A, 0x00];
    assert!(
        wbxml.windows(nested_header.len()).any(|w| w == nested_header),
        "no embedded document found"
    );

    let back = WbxmlToXml::new().run(&wbxml)?;
    assert!(back.contains("<DevInf>"));
    assert_eq!(canon(xml.as_bytes())?, canon(back.as_bytes())?);
    Ok(())
}

#[test]
fn embedded_mgmt_tree_roundtrips() -> Result<()> {
    init_logs();
    let xml = concat!(
        r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.2//EN" "x.dtd">"#,
        "<SyncML><SyncBody><Results><CmdID>3</CmdID>",
        "<Meta><Type>application/vnd.syncml.dmtnds+wbxml</Type></Meta>",
        "<Item><Data><MgmtTree><VerDTD>1.2</VerDTD>",
        "<Node><NodeName>DevId</NodeName></Node></MgmtTree></Data>",
        "</Item></Results></SyncBody></SyncML>",
    );
    let wbxml = XmlToWbxml::new().run(xml.as_bytes())?;
    let back = WbxmlToXml::new().run(&wbxml)?;
    assert!(back.contains("<MgmtTree>"));
    assert_eq!(canon(xml.as_bytes())?, canon(back.as_bytes())?);
    Ok(())
}

#[test]
fn binary_tags_carry_raw_opaque_bytes() -> Result<()> {
    init_logs();
    let b64 = "dGVzdA=="; // 8 chars -> 4 raw bytes
    let xml = format!(
        concat!(
            r#"<!DOCTYPE AirSync PUBLIC "-//AIRSYNC//DTD AirSync//EN" "http://www.microsoft.com/">"#,
            "<Sync><ApplicationData><Email2^ConversationId>{}</Email2^ConversationId>",
            "</ApplicationData></Sync>",
        ),
        b64
    );
    let wbxml = XmlToWbxml::new().run(xml.as_bytes())?;
    let needle: &[u8] = &[0xC3, 0x04, b't', b'e', b's', b't'];
    assert!(wbxml.windows(needle.len()).any(|w| w == needle));

    let back = WbxmlToXml::new().run(&wbxml)?;
    let start = back.find("<ConversationId>").expect("element missing") + "<ConversationId>".len();
    let end = back.find("</ConversationId>").expect("end tag missing");
    assert_eq!(&back[start..end], b64);
    Ok(())
}

#[test]
fn vobject_data_roundtrips_as_cdata() -> Result<()> {
    init_logs();
    let xml = concat!(
        r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.1//EN" "x.dtd">"#,
        "<SyncML><SyncBody><Add><CmdID>6</CmdID><Item>",
        "<Data>BEGIN:VCARD\nVERSION:2.1\nEND:VCARD</Data>",
        "</Item></Add></SyncBody></SyncML>",
    );
    let wbxml = XmlToWbxml::new().run(xml.as_bytes())?;
    let back = WbxmlToXml::new().run(&wbxml)?;
    assert!(back.contains("<![CDATA[BEGIN:VCARD\r\nVERSION:2.1\r\nEND:VCARD]]>"));
    assert_eq!(canon(xml.as_bytes())?, canon(back.as_bytes())?);
    Ok(())
}

#[test]
fn whitespace_preservation_is_optional() -> Result<()> {
    init_logs();
    let xml = concat!(
        r#"<!DOCTYPE SyncML PUBLIC "-//SYNCML//DTD SyncML 1.1//EN" "x.dtd">"#,
        "<SyncML><SyncHdr><SessionID>  7  </SessionID></SyncHdr></SyncML>",
    );

    let stripped = XmlToWbxml::new().run(xml.as_bytes())?;
    assert!(stripped.windows(5).any(|w| w == [0x03, b'7', 0x00, 0x01, 0x01]));

    let mut conv = XmlToWbxml::new();
    conv.enable_preserve_whitespaces();
    let kept = conv.run(xml.as_bytes())?;
    assert!(kept.windows(7).any(|w| w == [0x03, b' ', b' ', b'7', b' ', b' ', 0x00]));
    Ok(())
}

#[test]
fn disabled_string_table_rejects_literals() -> Result<()> {
    init_logs();
    let xml = r#"<si><made-up-element/></si>"#;
    let mut conv = XmlToWbxml::new();
    conv.disable_string_table();
    assert_eq!(conv.run(xml.as_bytes()), Err(WbxmlError::StrtblDisabled));

    // with the table enabled the literal roundtrips
    let wbxml = XmlToWbxml::new().run(xml.as_bytes())?;
    let back = WbxmlToXml::new().run(&wbxml)?;
    assert!(back.contains("<made-up-element/>"));
    Ok(())
}

#[test]
fn processing_instructions_roundtrip() -> Result<()> {
    init_logs();
    let xml = r#"<si><info><?app checkpoint?></info></si>"#;
    let wbxml = XmlToWbxml::new().run(xml.as_bytes())?;
    let back = WbxmlToXml::new().run(&wbxml)?;
    assert!(back.contains("<?app checkpoint?>"));
    Ok(())
}

#[test]
fn forced_charset_overrides_the_header() -> Result<()> {
    init_logs();
    // header claims ISO-8859-1 (0x04); 0xE9 is 'é' there
    let wbxml = [
        0x01, 0x05, 0x04, 0x00, //
        0x45, // si
        0x47, // info
        0x03, 0xE9, 0x00, // STR_I
        0x01, 0x01,
    ];
    let latin = WbxmlToXml::new().run(&wbxml)?;
    assert!(latin.contains("é"));

    let mut forced = WbxmlToXml::new();
    forced.set_charset(wbxml_codec::Charset::Utf8);
    // 0xE9 alone is not valid UTF-8
    assert_eq!(forced.run(&wbxml), Err(WbxmlError::CharsetConv));
    Ok(())
}
