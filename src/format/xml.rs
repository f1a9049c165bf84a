//! Structural XML rendering.
//!
//! The document mirrors the JSON rendering element for element: object
//! keys become child elements, arrays become `<item>` children of an
//! element typed `array`, and non-string scalars carry a `type` attribute.
//!
//! ```xml
//! <occi>
//!   <resources type="array">
//!     <item>
//!       <kind>http://schemas.ogf.org/occi/infrastructure#compute</kind>
//!       <attributes>
//!         <occi.compute.cores type="number">2</occi.compute.cores>
//!       </attributes>
//!     </item>
//!   </resources>
//! </occi>
//! ```

use super::Format;
use super::json::{reader, writer};
use crate::collection::{Collection, Model};
use crate::entity::{ActionInstance, InstanceBuilder};
use crate::error::Result;

/// Name of the document element.
pub const ROOT_ELEMENT: &str = "occi";
/// Name of array entries.
pub const ITEM_ELEMENT: &str = "item";

/// `application/xml` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml;

impl Format for Xml {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn media_types(&self) -> &'static [&'static str] {
        &["application/xml", "application/occi+xml"]
    }

    fn parse_categories(&self, input: &str, model: &Model) -> Result<Collection> {
        reader::categories_from_value(&document::read(input)?, model)
    }

    fn parse_entities(
        &self,
        input: &str,
        model: &Model,
        builder: &dyn InstanceBuilder,
    ) -> Result<Collection> {
        reader::entities_from_value(&document::read(input)?, model, builder)
    }

    fn parse_action(&self, input: &str, model: &Model) -> Result<ActionInstance> {
        reader::action_from_value(&document::read(input)?, model)
    }

    fn render(&self, collection: &Collection) -> Result<String> {
        document::write(&writer::to_value(collection))
    }
}

// ============================================================================
// DOCUMENT MAPPING (requires xml feature)
// ============================================================================

#[cfg(feature = "xml")]
mod document {
    use std::io::Cursor;

    use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
    use quick_xml::{Reader, Writer};
    use serde_json::{Map, Number, Value};
    use tracing::debug;

    use super::{ITEM_ELEMENT, ROOT_ELEMENT};
    use crate::error::{OcciError, Result};

    /// An element still being read.
    struct Node {
        name: String,
        value_type: Option<String>,
        text: String,
        children: Vec<(String, Value)>,
    }

    impl Node {
        fn open(e: &BytesStart<'_>) -> Result<Self> {
            let name = std::str::from_utf8(e.name().as_ref())
                .map_err(|e| OcciError::parsing(format!("element name error: {e}")))?
                .to_string();
            let mut value_type = None;
            for attr_result in e.attributes() {
                let attr = attr_result
                    .map_err(|e| OcciError::parsing(format!("attribute error: {e}")))?;
                if attr.key.as_ref() == b"type" {
                    let value = attr
                        .unescape_value()
                        .map_err(|e| OcciError::parsing(format!("attribute value error: {e}")))?;
                    value_type = Some(value.to_string());
                }
            }
            Ok(Self {
                name,
                value_type,
                text: String::new(),
                children: Vec::new(),
            })
        }

        fn finish(self, root: bool) -> Result<Value> {
            let Node {
                name,
                value_type,
                text,
                children,
            } = self;
            match value_type.as_deref() {
                Some("array") => Ok(Value::Array(children.into_iter().map(|(_, v)| v).collect())),
                Some("object") => object(&name, children),
                None if root || !children.is_empty() => object(&name, children),
                None | Some("string") => Ok(Value::String(text)),
                Some("number") => text
                    .trim()
                    .parse::<Number>()
                    .map(Value::Number)
                    .map_err(|_| OcciError::parsing(format!("<{name}> is not a number: {text:?}"))),
                Some("boolean") => match text.trim() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    other => Err(OcciError::parsing(format!(
                        "<{name}> is not a boolean: {other:?}"
                    ))),
                },
                Some("null") => Ok(Value::Null),
                Some(other) => Err(OcciError::parsing(format!(
                    "unknown type {other:?} on <{name}>"
                ))),
            }
        }
    }

    fn object(name: &str, children: Vec<(String, Value)>) -> Result<Value> {
        let mut map = Map::new();
        for (key, value) in children {
            if map.contains_key(&key) {
                return Err(OcciError::parsing(format!(
                    "duplicate element <{key}> in <{name}>"
                )));
            }
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    /// Decode a document into the equivalent JSON value.
    pub fn read(input: &str) -> Result<Value> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<Node> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(Node::open(e)?),
                Ok(Event::Empty(ref e)) => close(Node::open(e)?, &mut stack, &mut root)?,
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| OcciError::parsing("unbalanced closing element"))?;
                    close(node, &mut stack, &mut root)?;
                }
                Ok(Event::Text(ref t)) => {
                    if let Some(node) = stack.last_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| OcciError::parsing(format!("text error: {e}")))?;
                        node.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref c)) => {
                    if let Some(node) = stack.last_mut() {
                        let text = std::str::from_utf8(c)
                            .map_err(|e| OcciError::parsing(format!("CDATA error: {e}")))?;
                        node.text.push_str(text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OcciError::parsing(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(OcciError::parsing("unexpected end of XML document"));
        }
        root.ok_or_else(|| OcciError::parsing("empty XML document"))
    }

    fn close(node: Node, stack: &mut [Node], root: &mut Option<Value>) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => {
                let name = node.name.clone();
                parent.children.push((name, node.finish(false)?));
            }
            None => {
                if node.name != ROOT_ELEMENT {
                    return Err(OcciError::parsing(format!(
                        "expected <{ROOT_ELEMENT}> document element, found <{}>",
                        node.name
                    )));
                }
                if root.is_some() {
                    return Err(OcciError::parsing("more than one document element"));
                }
                *root = Some(node.finish(true)?);
            }
        }
        Ok(())
    }

    fn write_error(e: impl std::fmt::Display) -> OcciError {
        OcciError::rendering(format!("XML write error: {e}"))
    }

    fn is_element_name(name: &str) -> bool {
        let mut chars = name.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }

    /// Encode a JSON value as a document.
    pub fn write(value: &Value) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;

        match value {
            Value::Object(map) if map.is_empty() => writer
                .write_event(Event::Empty(BytesStart::new(ROOT_ELEMENT)))
                .map_err(write_error)?,
            Value::Object(map) => {
                writer
                    .write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
                    .map_err(write_error)?;
                for (key, child) in map {
                    write_value(&mut writer, key, child)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
                    .map_err(write_error)?;
            }
            _ => return Err(OcciError::rendering("XML document must be an object")),
        }

        let mut output = writer.into_inner().into_inner();
        output.push(b'\n');
        debug!(bytes = output.len(), "rendered XML");
        String::from_utf8(output).map_err(write_error)
    }

    fn write_value<W: std::io::Write>(
        writer: &mut Writer<W>,
        name: &str,
        value: &Value,
    ) -> Result<()> {
        if !is_element_name(name) {
            return Err(OcciError::rendering(format!(
                "{name:?} is not a valid XML element name"
            )));
        }
        let mut start = BytesStart::new(name);
        match value {
            Value::Object(map) if map.is_empty() => {
                start.push_attribute(("type", "object"));
                writer.write_event(Event::Empty(start)).map_err(write_error)?;
            }
            Value::Object(map) => {
                writer.write_event(Event::Start(start)).map_err(write_error)?;
                for (key, child) in map {
                    write_value(writer, key, child)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(name)))
                    .map_err(write_error)?;
            }
            Value::Array(items) => {
                start.push_attribute(("type", "array"));
                if items.is_empty() {
                    writer.write_event(Event::Empty(start)).map_err(write_error)?;
                } else {
                    writer.write_event(Event::Start(start)).map_err(write_error)?;
                    for item in items {
                        write_value(writer, ITEM_ELEMENT, item)?;
                    }
                    writer
                        .write_event(Event::End(BytesEnd::new(name)))
                        .map_err(write_error)?;
                }
            }
            Value::Null => {
                start.push_attribute(("type", "null"));
                writer.write_event(Event::Empty(start)).map_err(write_error)?;
            }
            Value::String(text) if text.is_empty() => {
                writer.write_event(Event::Empty(start)).map_err(write_error)?;
            }
            scalar => {
                let text = match scalar {
                    Value::String(text) => text.clone(),
                    Value::Number(n) => {
                        start.push_attribute(("type", "number"));
                        n.to_string()
                    }
                    Value::Bool(b) => {
                        start.push_attribute(("type", "boolean"));
                        b.to_string()
                    }
                    _ => String::new(),
                };
                writer.write_event(Event::Start(start)).map_err(write_error)?;
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(write_error)?;
                writer
                    .write_event(Event::End(BytesEnd::new(name)))
                    .map_err(write_error)?;
            }
        }
        Ok(())
    }
}

// Stub implementations when feature is disabled
#[cfg(not(feature = "xml"))]
mod document {
    use serde_json::Value;

    use crate::error::{OcciError, Result};

    pub fn read(_input: &str) -> Result<Value> {
        Err(OcciError::parsing(
            "XML parsing requires the 'xml' feature",
        ))
    }

    pub fn write(_value: &Value) -> Result<String> {
        Err(OcciError::rendering(
            "XML rendering requires the 'xml' feature",
        ))
    }
}

#[cfg(all(test, feature = "xml"))]
mod tests {
    use super::*;
    use crate::base::TypeIdentifier;
    use crate::base::constants::INFRASTRUCTURE_SCHEME;
    use crate::entity::ModelInstanceBuilder;
    use serde_json::json;

    #[test]
    fn test_document_mapping() {
        let value = json!({
            "kinds": [],
            "title": "a <b> & c",
            "count": 3,
            "flag": false,
            "nested": { "empty": {}, "blank": "" }
        });
        let text = document::write(&value).unwrap();
        assert!(text.contains("<count type=\"number\">3</count>"));
        assert!(text.contains("a &lt;b&gt; &amp; c"));
        assert_eq!(document::read(&text).unwrap(), value);
    }

    #[test]
    fn test_categories_round_trip() {
        let model = Model::infrastructure().unwrap();
        let rendered = Xml.render(model.collection()).unwrap();
        assert!(rendered.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        let parsed = Xml.parse_categories(&rendered, &model).unwrap();
        assert_eq!(parsed.kinds.len(), 8);
        assert_eq!(parsed.mixins.len(), 4);
        assert_eq!(parsed.actions.len(), 11);
        let compute = TypeIdentifier::new(INFRASTRUCTURE_SCHEME, "compute").unwrap();
        assert_eq!(parsed.kinds[&compute].location, "/compute/");
    }

    #[test]
    fn test_parse_resource() {
        let model = Model::infrastructure().unwrap();
        let input = format!(
            "<occi>\
               <kind>{INFRASTRUCTURE_SCHEME}compute</kind>\
               <id>vm-1</id>\
               <attributes><occi.compute.cores type=\"number\">2</occi.compute.cores></attributes>\
             </occi>"
        );
        let parsed = Xml
            .parse_entities(&input, &model, &ModelInstanceBuilder)
            .unwrap();
        let resource = &parsed.resources["vm-1"];
        assert_eq!(
            resource.entity.attributes.to_flat_json()["occi.compute.cores"],
            json!(2)
        );
    }

    #[test]
    fn test_malformed() {
        let model = Model::core().unwrap();
        assert!(Xml.parse_categories("<occi><kinds>", &model).unwrap_err().is_parsing());
        assert!(Xml.parse_categories("<other/>", &model).unwrap_err().is_parsing());
        assert!(Xml.parse_categories("", &model).unwrap_err().is_parsing());
        assert!(Xml.parse_categories("<occi/>", &model).unwrap().is_empty());
    }
}
