//! Thin XML string renderer over `quick-xml`.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::SerializeError;

use super::{XmlContent, XmlElement};

/// Render an element tree to an XML string with a standard declaration.
pub fn render_string(root: &XmlElement) -> Result<String, SerializeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(quick_xml::Error::from)?;
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner();
    // the writer only ever emits UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), SerializeError> {
    let mut start = BytesStart::new(element.name.as_str());
    if let Some(namespace) = &element.namespace {
        start.push_attribute(("xmlns", namespace.as_str()));
    }
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    match &element.children {
        XmlContent::Empty => {
            writer
                .write_event(Event::Empty(start))
                .map_err(quick_xml::Error::from)?;
        }
        XmlContent::Text(text) => {
            writer
                .write_event(Event::Start(start))
                .map_err(quick_xml::Error::from)?;
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(quick_xml::Error::from)?;
            writer
                .write_event(Event::End(BytesEnd::new(element.name.as_str())))
                .map_err(quick_xml::Error::from)?;
        }
        XmlContent::Elements(children) => {
            writer
                .write_event(Event::Start(start))
                .map_err(quick_xml::Error::from)?;
            for child in children {
                write_element(writer, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(element.name.as_str())))
                .map_err(quick_xml::Error::from)?;
        }
    }
    Ok(())
}
