#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub fn index_xml(entries: &[(&str, &str, &str)]) -> String {
    let mut s = String::from("<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n<doxygenindex version=\"1.9.8\">\n");
    for (refid, kind, name) in entries {
        s.push_str(&format!("  <compound refid=\"{refid}\" kind=\"{kind}\"><name>{name}</name></compound>\n"));
    }
    s.push_str("</doxygenindex>\n");
    s
}

pub fn compound_xml(id: &str, body: &str) -> String {
    format!("<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n<doxygen version=\"1.9.8\">\n  <compounddef id=\"{id}\" kind=\"class\">\n{body}\n  </compounddef>\n</doxygen>\n")
}

pub fn base(refid: &str, name: &str) -> String {
    format!("    <basecompoundref refid=\"{refid}\" prot=\"public\" virt=\"non-virtual\">{name}</basecompoundref>")
}

pub fn inner(refid: &str, name: &str) -> String {
    format!("    <innerclass refid=\"{refid}\" prot=\"public\">{name}</innerclass>")
}

pub fn variable(owner: &str, n: usize, type_refid: &str) -> String {
    format!(
        "    <sectiondef kind=\"private-attrib\"><memberdef kind=\"variable\" id=\"{owner}_1v{n}\"><type><ref refid=\"{type_refid}\" kindref=\"compound\">T</ref></type></memberdef></sectiondef>"
    )
}

pub fn function_called_by(owner: &str, n: usize, caller_member: &str) -> String {
    format!(
        "    <sectiondef kind=\"public-func\"><memberdef kind=\"function\" id=\"{owner}_1f{n}\"><type>void</type><referencedby refid=\"{caller_member}\">caller</referencedby></memberdef></sectiondef>"
    )
}

pub fn write_record(dir: &Path, key: &str, xml: &str) {
    fs::write(dir.join(format!("{key}.xml")), xml).unwrap();
}

/// Two classes, `Foo` deriving from `Bar`.
pub fn write_base_class_fixture(dir: &Path) {
    write_record(dir, "index", &index_xml(&[("class_foo", "class", "Foo"), ("class_bar", "class", "Bar")]));
    write_record(dir, "class_foo", &compound_xml("class_foo", &base("class_bar", "Bar")));
    write_record(dir, "class_bar", &compound_xml("class_bar", ""));
}

/// Two classes whose members call each other.
pub fn write_mutual_fixture(dir: &Path) {
    write_record(dir, "index", &index_xml(&[("class_a", "class", "N::A"), ("class_b", "class", "N::B")]));
    write_record(dir, "class_a", &compound_xml("class_a", &variable("class_a", 1, "class_b")));
    write_record(dir, "class_b", &compound_xml("class_b", &variable("class_b", 1, "class_a")));
}
