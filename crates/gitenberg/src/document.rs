//! Namespace-aware element tree for a single catalog document.
//!
//! Every member of the catalog archive is a small, standalone RDF/XML document
//! describing one ebook. The parser in [`record`](crate::record) needs to search such
//! a document by fully-qualified name, so this module reads the XML with
//! [`quick_xml::NsReader`] and keeps each element and attribute name as a
//! `(namespace, local name)` pair.
//!
//! Text is stored the way the catalog tooling has always read it: an element's
//! [`text`](Element::text) is the character data preceding its first child, with
//! entities unescaped. Line ends are normalized as XML 1.0 requires: `\r\n` and a lone
//! `\r` become `\n` in text, and every line end or tab becomes a space in attribute
//! values. Other whitespace is left untouched.
//!
//! # Examples
//!
//! ```
//! use gitenberg::document::{namespace, Document};
//!
//! let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!                       xmlns:pgterms="http://www.gutenberg.org/2009/pgterms/">
//!   <pgterms:ebook rdf:about="ebooks/123"/>
//! </rdf:RDF>"#;
//!
//! let document: Document = xml.parse().unwrap();
//! let ebook = document.ebook().unwrap();
//! assert_eq!(ebook.attribute(namespace::RDF, "about"), Some("ebooks/123"));
//! ```

use std::borrow::Cow;

use quick_xml::{
  events::{BytesStart, Event},
  name::{Namespace, ResolveResult},
  NsReader,
};

use super::*;

/// The fixed namespaces used by the Project Gutenberg catalog.
pub mod namespace {
  /// Project Gutenberg bibliographic terms (`pgterms:`)
  pub const PG: &str = "http://www.gutenberg.org/2009/pgterms/";
  /// Dublin Core terms (`dcterms:`)
  pub const DC: &str = "http://purl.org/dc/terms/";
  /// Dublin Core abstract model, home of the `memberOf` relation (`dcam:`)
  pub const DCAM: &str = "http://purl.org/dc/dcam/";
  /// The base RDF syntax namespace (`rdf:`)
  pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

  /// Resource identifying the Library of Congress Subject Headings vocabulary
  pub const LCSH: &str = "http://purl.org/dc/terms/LCSH";
  /// Resource identifying the Library of Congress Classification vocabulary
  pub const LCC: &str = "http://purl.org/dc/terms/LCC";
}

/// A namespace-qualified element or attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
  /// The resolved namespace URI, if the name was bound to one
  pub namespace: Option<String>,
  /// The local part of the name
  pub local:     String,
}

impl Name {
  /// Whether this name is `local` in namespace `ns`.
  pub fn is(&self, ns: &str, local: &str) -> bool {
    self.local == local && self.namespace.as_deref() == Some(ns)
  }

  /// Builds a name from the raw results of namespace resolution.
  fn resolved(ns: ResolveResult, local: &[u8]) -> Self {
    let namespace = match ns {
      ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
      _ => None,
    };
    Self { namespace, local: String::from_utf8_lossy(local).into_owned() }
  }
}

/// One element of a parsed catalog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  /// The element's qualified name
  pub name:   Name,
  /// Attributes in source order
  attributes: Vec<(Name, String)>,
  /// Child elements in source order
  children:   Vec<Element>,
  /// Character data before the first child
  text:       Option<String>,
}

impl Element {
  /// Whether this element is `local` in namespace `ns`.
  pub fn is(&self, ns: &str, local: &str) -> bool { self.name.is(ns, local) }

  /// Value of the attribute `local` in namespace `ns`.
  pub fn attribute(&self, ns: &str, local: &str) -> Option<&str> {
    self.attributes.iter().find(|(name, _)| name.is(ns, local)).map(|(_, value)| value.as_str())
  }

  /// Character data preceding the first child element, if any.
  pub fn text(&self) -> Option<&str> { self.text.as_deref() }

  /// Direct children in document order.
  pub fn children(&self) -> impl Iterator<Item = &Element> { self.children.iter() }

  /// First direct child named `local` in namespace `ns`.
  pub fn child(&self, ns: &str, local: &str) -> Option<&Element> {
    self.children.iter().find(|child| child.is(ns, local))
  }

  /// All descendants (not including `self`) in document order.
  pub fn descendants(&self) -> Descendants<'_> { Descendants { stack: vec![self.children.iter()] } }

  /// First descendant named `local` in namespace `ns`.
  pub fn find(&self, ns: &str, local: &str) -> Option<&Element> {
    self.descendants().find(|element| element.is(ns, local))
  }

  /// Every descendant named `local` in namespace `ns`, in document order.
  pub fn find_all<'a>(&'a self, ns: &'a str, local: &'a str) -> impl Iterator<Item = &'a Element> {
    self.descendants().filter(move |element| element.is(ns, local))
  }

  /// Creates an empty element from a start tag, resolving its attribute names.
  fn open<R>(reader: &NsReader<R>, start: &BytesStart) -> Result<Self> {
    let (ns, local) = reader.resolve_element(start.name());
    let name = Name::resolved(ns, local.as_ref());

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
      let attribute = attribute?;
      let (ns, local) = reader.resolve_attribute(attribute.key);
      let value = normalize_attribute(&attribute.unescape_value()?);
      attributes.push((Name::resolved(ns, local.as_ref()), value));
    }

    Ok(Self { name, attributes, children: Vec::new(), text: None })
  }

  /// Appends character data if no child element has been seen yet.
  fn push_text(&mut self, data: &str) {
    if self.children.is_empty() {
      self.text.get_or_insert_with(String::new).push_str(&normalize_line_ends(data));
    }
  }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
  /// One child cursor per level of the walk
  stack: Vec<std::slice::Iter<'a, Element>>,
}

impl<'a> Iterator for Descendants<'a> {
  type Item = &'a Element;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let level = self.stack.last_mut()?;
      match level.next() {
        Some(element) => {
          self.stack.push(element.children.iter());
          return Some(element);
        },
        None => {
          self.stack.pop();
        },
      }
    }
  }
}

/// A fully parsed catalog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  /// The document element, `rdf:RDF` for catalog members
  root: Element,
}

impl Document {
  /// Parses a complete document from a buffered reader.
  ///
  /// # Errors
  ///
  /// - [`GitenbergError::Xml`] / [`GitenbergError::XmlAttribute`] for malformed XML
  /// - [`GitenbergError::MalformedDocument`] when there is no root element or the input
  ///   ends with elements left open
  pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
    let mut reader = NsReader::from_reader(reader);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
      match reader.read_event_into(&mut buf)? {
        Event::Start(ref start) => stack.push(Element::open(&reader, start)?),
        Event::Empty(ref start) => {
          let element = Element::open(&reader, start)?;
          attach(&mut stack, &mut root, element);
        },
        Event::End(_) =>
          if let Some(element) = stack.pop() {
            attach(&mut stack, &mut root, element);
          },
        Event::Text(ref text) =>
          if let Some(parent) = stack.last_mut() {
            parent.push_text(&text.unescape()?);
          },
        Event::CData(cdata) =>
          if let Some(parent) = stack.last_mut() {
            parent.push_text(&String::from_utf8_lossy(&cdata.into_inner()));
          },
        Event::Eof => break,
        _ => (),
      }
      buf.clear();
    }

    if let Some(open) = stack.last() {
      return Err(GitenbergError::MalformedDocument(format!(
        "element {} is never closed",
        open.name.local
      )));
    }
    root
      .map(|root| Self { root })
      .ok_or_else(|| GitenbergError::MalformedDocument("no root element".to_string()))
  }

  /// The document element.
  pub fn root(&self) -> &Element { &self.root }

  /// The `pgterms:ebook` element directly under the root, if this document has one.
  ///
  /// Auxiliary archive members carry no ebook element; callers skip them.
  pub fn ebook(&self) -> Option<&Element> { self.root.child(namespace::PG, "ebook") }
}

impl FromStr for Document {
  type Err = GitenbergError;

  /// Parses a complete document held in memory.
  fn from_str(xml: &str) -> Result<Self> { Self::parse(xml.as_bytes()) }
}

/// Collapses `\r\n` and lone `\r` line ends into `\n`.
fn normalize_line_ends(text: &str) -> Cow<'_, str> {
  if !text.contains('\r') {
    return Cow::Borrowed(text);
  }
  Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Attribute values additionally turn every line end and tab into a space.
fn normalize_attribute(value: &str) -> String {
  normalize_line_ends(value).replace(|c: char| c == '\n' || c == '\t', " ")
}

/// Hands a closed element to its parent, or makes it the root at top level.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
  match stack.last_mut() {
    Some(parent) => parent.children.push(element),
    None =>
      if root.is_none() {
        *root = Some(element);
      },
  }
}
