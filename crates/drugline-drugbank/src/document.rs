//! In-memory XML document tree with namespace-aware lookups
//!
//! The export is parsed once with quick-xml into an owned [`Element`] tree.
//! Lookups match on (namespace URI, local name), so callers bind the
//! export's namespace once via [`Namespace`] and never deal with prefixes.
//! Element text follows the usual tree-API convention: the character data
//! before the first child element, `None` when there is none. Character data
//! after a child is that child's tail.

use std::io::{Read, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Writer};

use crate::error::{ExtractError, Result};

/// Namespace binding used to locate elements of the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    uri: String,
}

impl Namespace {
    pub const DRUGBANK_URI: &'static str = "http://www.drugbank.ca";

    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn drugbank() -> Self {
        Self::new(Self::DRUGBANK_URI)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::drugbank()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Qualified name as written in the source (prefix included)
    name: String,
    namespace: Option<String>,
    local: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    /// Character data following this element inside its parent
    tail: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// New empty element sharing the prefix and namespace of `self`
    pub fn named_like(&self, local: &str) -> Element {
        let name = match self.name.split_once(':') {
            Some((prefix, _)) => format!("{prefix}:{local}"),
            None => local.to_string(),
        };
        Element {
            name,
            namespace: self.namespace.clone(),
            local: local.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn is(&self, ns: &Namespace, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == Some(ns.uri())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn child_at(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    /// First direct child with the given name
    pub fn find(&self, ns: &Namespace, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(ns, local))
    }

    /// First direct child with the given name, or `MissingField`
    pub fn require(&self, ns: &Namespace, local: &str) -> Result<&Element> {
        self.find(ns, local)
            .ok_or_else(|| ExtractError::missing(format!("{}/{}", self.local, local)))
    }

    /// Text of a required child; the child must exist, its text may not
    pub fn child_text(&self, ns: &Namespace, local: &str) -> Result<Option<String>> {
        Ok(self.require(ns, local)?.text().map(str::to_string))
    }

    /// Child by position, or `MissingField`
    pub fn require_at(&self, index: usize) -> Result<&Element> {
        self.child_at(index)
            .ok_or_else(|| ExtractError::missing(format!("{}[{}]", self.local, index)))
    }

    /// Self followed by every descendant, depth-first in document order
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// All descendants (self excluded) with the given name, in document order
    pub fn descendants_named<'a>(
        &'a self,
        ns: &'a Namespace,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.iter().skip(1).filter(move |e| e.is(ns, local))
    }

}

/// Pre-order iterator over an element subtree
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// A parsed export: one root element
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse XML content
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            let namespace = match resolved {
                ResolveResult::Bound(ns) => Some(utf8(ns.as_ref())),
                _ => None,
            };

            match event {
                Event::Start(e) => stack.push(open_element(&e, namespace)?),
                Event::Empty(e) => {
                    let element = open_element(&e, namespace)?;
                    close_element(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        close_element(&mut stack, &mut root, element);
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(quick_xml::Error::from)?;
                    push_text(&mut stack, &text);
                }
                Event::CData(e) => push_text(&mut stack, &utf8(&e)),
                Event::Eof => break,
                _ => {}
            }
        }

        root.map(Self::new).ok_or(ExtractError::EmptyDocument)
    }

    /// Load from a file; `.gz` files are decompressed on the fly
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;

        let mut xml = String::new();
        if path.extension().is_some_and(|ext| ext == "gz") {
            let mut decoder = flate2::read::GzDecoder::new(file);
            decoder.read_to_string(&mut xml)?;
        } else {
            std::io::BufReader::new(file).read_to_string(&mut xml)?;
        }

        log::debug!("Read {} bytes from {}", xml.len(), path.display());
        Self::parse(&xml)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serialise with an XML declaration and two-space indentation
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, &self.root)?;
        writer.into_inner().flush()?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_to(std::io::BufWriter::new(file))
    }
}

fn utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn open_element(e: &BytesStart<'_>, namespace: Option<String>) -> Result<Element> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = utf8(attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name: utf8(e.name().as_ref()),
        namespace,
        local: utf8(e.local_name().as_ref()),
        attributes,
        text: None,
        tail: None,
        children: Vec::new(),
    })
}

fn close_element(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None => *root = Some(element),
    }
}

/// Character data goes to the open element's text until its first child,
/// then to the tail of its last child
fn push_text(stack: &mut [Element], text: &str) {
    let Some(current) = stack.last_mut() else {
        return;
    };
    let slot = match current.children.last_mut() {
        Some(last) => &mut last.tail,
        None => &mut current.text,
    };
    slot.get_or_insert_with(String::new).push_str(text);
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let attributes = element
        .attributes
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()));
    let start = BytesStart::new(element.name.as_str()).with_attributes(attributes);

    // Whitespace between children is regenerated by the indenting writer
    let text = element
        .text
        .as_deref()
        .filter(|t| element.children.is_empty() || !t.trim().is_empty());

    if element.children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
        if let Some(tail) = child.tail.as_deref().filter(|t| !t.trim().is_empty()) {
            writer.write_event(Event::Text(BytesText::new(tail)))?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
