//! Walks a SOAP response and prints every element of its Body.
//!
//! `cargo run -p ironsoap-xml --example parse`

use ironsoap_xml::parser::{element_children, find_child, outer_xml, parse};

const SOAP: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <getSupportProvinceResponse xmlns="http://WebXml.com.cn/">
      <getSupportProvinceResult>
        <string>直辖市</string>
        <string>特别行政区</string>
      </getSupportProvinceResult>
    </getSupportProvinceResponse>
  </soap:Body>
</soap:Envelope>
"#;

pub fn main() {
    let parsed = parse(SOAP).expect("Failed to parse XML");
    let envelope = parsed.root_element();
    let body = find_child(envelope, "Body").expect("no Body");

    for child in element_children(body) {
        println!(
            "{{{}}}{}",
            child.tag_name().namespace().unwrap_or_default(),
            child.tag_name().name()
        );
        println!("{}", outer_xml(child));
    }
}
