use std::fmt;

use ironsoap_xml::parser::{self, Node};
use serde::Serialize;

/// A SOAP 1.1 `Fault`: the peer's report of a protocol or application error.
///
/// Every field is optional on the wire. `detail` keeps the inner markup of the
/// `<detail>` element as received, so application-specific detail elements can
/// be parsed by whoever understands them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, typed_builder::TypedBuilder)]
#[serde(rename = "soap:Fault")]
pub struct Fault {
    #[builder(default, setter(into, strip_option))]
    #[serde(rename = "faultcode", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[builder(default, setter(into, strip_option))]
    #[serde(rename = "faultstring", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[builder(default, setter(into, strip_option))]
    #[serde(rename = "faultactor", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    #[builder(default, setter(into, strip_option))]
    #[serde(rename = "detail", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Fault {
    /// Reads a fault from its `Fault` element. Children are matched on local
    /// name only: SOAP 1.1 leaves them unqualified but some stacks qualify
    /// them anyway.
    pub(crate) fn from_node(node: Node<'_, '_>) -> Self {
        let text_of = |name: &str| {
            parser::find_child(node, name)
                .and_then(parser::text_content)
                .map(|text| text.trim().to_owned())
        };

        let detail = parser::find_child(node, "detail")
            .map(|detail| parser::inner_xml(detail).trim().to_owned())
            .filter(|detail| !detail.is_empty());

        Self {
            code: text_of("faultcode"),
            message: text_of("faultstring"),
            actor: text_of("faultactor"),
            detail,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.code) {
            (Some(message), _) => f.write_str(message),
            (None, Some(code)) => write!(f, "SOAP fault {code}"),
            (None, None) => f.write_str("SOAP fault"),
        }
    }
}

impl std::error::Error for Fault {}
