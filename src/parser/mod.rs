//! Doxygen XML record parsing.
//!
//! Doxygen writes one `index.xml` listing every compound plus one file per
//! compound (`<refid>.xml`) describing it in detail. Only the parts that the
//! dependency rules look at are extracted; everything else is skipped while
//! streaming through the document with `quick_xml`.
use crate::errors::ParseError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One `<compound>` entry of `index.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub refid: String,
    pub kind: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRecord {
    pub compounds: Vec<IndexEntry>,
}

/// A `<basecompoundref>`. External bases (e.g. from the standard library) carry no refid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRef {
    pub refid: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Variable,
    Function,
    Other,
}

impl MemberKind {
    fn from_attr(kind: Option<&str>) -> Self {
        match kind {
            Some("variable") => Self::Variable,
            Some("function") => Self::Function,
            _ => Self::Other,
        }
    }
}

/// A `<memberdef>` inside one of the compound's `<sectiondef>`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDef {
    pub kind: MemberKind,
    pub id: Option<String>,
    /// First `<ref>` found in the member's `<type>`.
    pub type_ref: Option<String>,
    /// One entry per `<param>`, holding the first `<ref>` of its `<type>`.
    pub params: Vec<Option<String>>,
    /// Refids of the members listed in `<referencedby>`.
    pub referenced_by: Vec<String>,
}

impl MemberDef {
    fn new(kind: MemberKind, id: Option<String>) -> Self {
        Self { kind, id, type_ref: None, params: Vec::new(), referenced_by: Vec::new() }
    }
}

/// The parts of a `<compounddef>` used for dependency inference.
///
/// For a group, `inner_classes` lists the group's members; for a class it
/// lists the classes nested inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub bases: Vec<BaseRef>,
    pub inner_classes: Vec<String>,
    pub members: Vec<MemberDef>,
}

/// Parse the contents of `index.xml`.
///
/// # Errors
/// Returns `ParseError` if the text is not well-formed XML or contains no root element.
pub fn parse_index(xml: &str) -> Result<IndexRecord, ParseError> {
    let mut visitor = IndexVisitor::default();
    walk(xml, &mut visitor)?;
    Ok(IndexRecord { compounds: visitor.compounds })
}

/// Parse the contents of a compound file (`<refid>.xml`).
///
/// # Errors
/// Returns `ParseError` if the text is not well-formed XML or has no `<compounddef>`.
pub fn parse_compound(xml: &str) -> Result<CompoundRecord, ParseError> {
    let mut visitor = CompoundVisitor::default();
    walk(xml, &mut visitor)?;
    if !visitor.seen_compounddef {
        return Err(ParseError::MissingElement("compounddef"));
    }
    Ok(visitor.record)
}

// Receives elements with the full element path from the root; path[0] is the root.
trait Visitor {
    fn open(&mut self, path: &[String], element: &BytesStart<'_>) -> Result<(), ParseError>;
    fn text(&mut self, path: &[String], text: &str);
    fn close(&mut self, path: &[String]);
}

fn walk<V: Visitor>(xml: &str, visitor: &mut V) -> Result<(), ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut path: Vec<String> = Vec::new();
    let mut saw_root = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(element_name(&e));
                saw_root = true;
                visitor.open(&path, &e)?;
            }
            Event::Empty(e) => {
                path.push(element_name(&e));
                saw_root = true;
                visitor.open(&path, &e)?;
                visitor.close(&path);
                path.pop();
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                visitor.text(&path, &text);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c);
                visitor.text(&path, &text);
            }
            Event::End(_) => {
                visitor.close(&path);
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !saw_root {
        return Err(ParseError::NoRoot);
    }
    if let Some(open) = path.last() {
        return Err(ParseError::Truncated(open.clone()));
    }
    Ok(())
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, ParseError> {
    match e.try_get_attribute(name)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// `pattern[0]` matches any root element.
fn at(path: &[String], pattern: &[&str]) -> bool {
    path.len() == pattern.len() && path.iter().zip(pattern).skip(1).all(|(p, q)| p == q)
}

#[derive(Default)]
struct IndexVisitor {
    compounds: Vec<IndexEntry>,
    current: Option<IndexEntry>,
}

impl Visitor for IndexVisitor {
    fn open(&mut self, path: &[String], element: &BytesStart<'_>) -> Result<(), ParseError> {
        if at(path, &["*", "compound"]) {
            self.current = match (attr(element, "refid")?, attr(element, "kind")?) {
                (Some(refid), Some(kind)) => Some(IndexEntry { refid, kind, name: None }),
                _ => None,
            };
        }
        Ok(())
    }

    fn text(&mut self, path: &[String], text: &str) {
        if at(path, &["*", "compound", "name"]) {
            if let Some(cur) = self.current.as_mut() {
                cur.name.get_or_insert_with(String::new).push_str(text);
            }
        }
    }

    fn close(&mut self, path: &[String]) {
        if at(path, &["*", "compound"]) {
            if let Some(done) = self.current.take() {
                self.compounds.push(done);
            }
        }
    }
}

#[derive(Default)]
struct CompoundVisitor {
    record: CompoundRecord,
    seen_compounddef: bool,
    base: Option<BaseRef>,
    member: Option<MemberDef>,
}

const MEMBERDEF: [&str; 4] = ["*", "compounddef", "sectiondef", "memberdef"];

impl Visitor for CompoundVisitor {
    fn open(&mut self, path: &[String], element: &BytesStart<'_>) -> Result<(), ParseError> {
        if at(path, &["*", "compounddef"]) {
            self.seen_compounddef = true;
            self.record.id = attr(element, "id")?;
        } else if at(path, &["*", "compounddef", "basecompoundref"]) {
            self.base = Some(BaseRef { refid: attr(element, "refid")?, name: String::new() });
        } else if at(path, &["*", "compounddef", "innerclass"]) {
            if let Some(refid) = attr(element, "refid")? {
                self.record.inner_classes.push(refid);
            }
        } else if at(path, &MEMBERDEF) {
            let kind = MemberKind::from_attr(attr(element, "kind")?.as_deref());
            self.member = Some(MemberDef::new(kind, attr(element, "id")?));
        } else if let Some(member) = self.member.as_mut() {
            let rest = path.get(MEMBERDEF.len()..).unwrap_or(&[]);
            if rest == ["type", "ref"] {
                if member.type_ref.is_none() {
                    member.type_ref = attr(element, "refid")?;
                }
            } else if rest == ["param"] {
                member.params.push(None);
            } else if rest == ["param", "type", "ref"] {
                if let Some(slot) = member.params.last_mut() {
                    if slot.is_none() {
                        *slot = attr(element, "refid")?;
                    }
                }
            } else if rest == ["referencedby"] {
                if let Some(refid) = attr(element, "refid")? {
                    member.referenced_by.push(refid);
                }
            }
        }
        Ok(())
    }

    fn text(&mut self, path: &[String], text: &str) {
        if at(path, &["*", "compounddef", "compoundname"]) {
            self.record.name.get_or_insert_with(String::new).push_str(text);
        } else if at(path, &["*", "compounddef", "basecompoundref"]) {
            if let Some(base) = self.base.as_mut() {
                base.name.push_str(text);
            }
        }
    }

    fn close(&mut self, path: &[String]) {
        if at(path, &["*", "compounddef", "basecompoundref"]) {
            if let Some(base) = self.base.take() {
                self.record.bases.push(base);
            }
        } else if at(path, &MEMBERDEF) {
            if let Some(member) = self.member.take() {
                self.record.members.push(member);
            }
        }
    }
}
