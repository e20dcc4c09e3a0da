//! Token classification for reference discovery.
//!
//! Only two element names matter while collecting references: `import` and
//! `include`, matched on their local name so `xs:import`, `xsd:import` and an
//! unprefixed `import` are all the same directive. Every other markup event is
//! ignored, and the end of input or a tokenizer failure stops the scan.

use quick_xml::events::{BytesStart, Event};

/// Directive kinds that reference another schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Import,
    Include,
}

impl DirectiveKind {
    /// Match an element's local name (namespace prefix already stripped).
    pub fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"import" => Some(Self::Import),
            b"include" => Some(Self::Include),
            _ => None,
        }
    }

    /// Element local name, as logged.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Include => "include",
        }
    }
}

/// A markup event as seen by the reference collector.
#[derive(Debug)]
pub enum Token<'a> {
    /// A start tag (or self-closing tag) naming a reference directive
    Directive(DirectiveKind, BytesStart<'a>),
    /// Anything else in the stream
    Other,
    /// The tokenizer gave up; treated as end of input
    Malformed(quick_xml::Error),
    /// End of input
    End,
}

impl<'a> Token<'a> {
    /// Classify the result of one tokenizer step.
    ///
    /// Tokenizer errors become [`Token::Malformed`], which callers treat like
    /// [`Token::End`]: a malformed document stops discovery for that file
    /// without failing the traversal.
    pub fn classify(event: quick_xml::Result<Event<'a>>) -> Self {
        match event {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                match DirectiveKind::from_local_name(start.local_name().as_ref()) {
                    Some(kind) => Token::Directive(kind, start),
                    None => Token::Other,
                }
            }
            Ok(Event::Eof) => Token::End,
            Err(e) => Token::Malformed(e),
            Ok(_) => Token::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;

    fn tokens(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut seen = Vec::new();
        loop {
            match Token::classify(reader.read_event()) {
                Token::Directive(kind, _) => seen.push(kind.as_str().to_string()),
                Token::Other => seen.push("other".to_string()),
                Token::Malformed(_) => {
                    seen.push("malformed".to_string());
                    break;
                }
                Token::End => break,
            }
        }
        seen
    }

    #[test]
    fn test_local_name_matching() {
        assert_eq!(DirectiveKind::from_local_name(b"import"), Some(DirectiveKind::Import));
        assert_eq!(DirectiveKind::from_local_name(b"include"), Some(DirectiveKind::Include));
        assert_eq!(DirectiveKind::from_local_name(b"redefine"), None);
        assert_eq!(DirectiveKind::from_local_name(b"Import"), None);
    }

    #[test]
    fn test_prefixed_and_self_closing_directives() {
        let seen = tokens(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
<xs:import namespace="urn:a" schemaLocation="a.xsd"/>
<include schemaLocation="b.xsd"></include>
</xs:schema>"#,
        );
        let directives: Vec<_> = seen.iter().filter(|t| *t != "other").collect();
        assert_eq!(directives, vec!["import", "include"]);
    }

    #[test]
    fn test_tokenizer_error_ends_stream() {
        let seen = tokens(r#"<schema><import schemaLocation="a.xsd"/></wrong><include/>"#);
        assert_eq!(seen, vec!["other", "import", "malformed"]);
    }
}
