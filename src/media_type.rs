use std::fmt;

/// Media types understood by the Graphstore HTTP API.
///
/// Used in per-call [`HeaderOptions`](crate::HeaderOptions) for content
/// negotiation: RDF serializations for data endpoints, SPARQL result
/// formats for query endpoints, and the text formats used by
/// status-style endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    /// `application/json`
    Json,
    /// `application/ld+json`
    JsonLd,
    /// `text/turtle`
    Turtle,
    /// `application/trig`
    Trig,
    /// `application/n-triples`
    NTriples,
    /// `application/n-quads`
    NQuads,
    /// `application/rdf+xml`
    RdfXml,
    /// `application/sparql-results+json`
    SparqlResultsJson,
    /// `application/sparql-results+xml`
    SparqlResultsXml,
    /// `application/sparql-query`
    SparqlQuery,
    /// `application/sparql-update`
    SparqlUpdate,
    /// `text/csv`
    Csv,
    /// `text/tab-separated-values`
    Tsv,
    /// `text/plain`
    PlainText,
    /// `text/boolean`
    Boolean,
}

impl MediaType {
    /// Returns the media-type string sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::JsonLd => "application/ld+json",
            Self::Turtle => "text/turtle",
            Self::Trig => "application/trig",
            Self::NTriples => "application/n-triples",
            Self::NQuads => "application/n-quads",
            Self::RdfXml => "application/rdf+xml",
            Self::SparqlResultsJson => "application/sparql-results+json",
            Self::SparqlResultsXml => "application/sparql-results+xml",
            Self::SparqlQuery => "application/sparql-query",
            Self::SparqlUpdate => "application/sparql-update",
            Self::Csv => "text/csv",
            Self::Tsv => "text/tab-separated-values",
            Self::PlainText => "text/plain",
            Self::Boolean => "text/boolean",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::MediaType;

    #[test]
    fn wire_strings_match_registered_types() {
        assert_eq!(MediaType::Turtle.as_str(), "text/turtle");
        assert_eq!(
            MediaType::SparqlResultsJson.as_str(),
            "application/sparql-results+json"
        );
        assert_eq!(MediaType::Boolean.as_str(), "text/boolean");
    }

    #[test]
    fn display_delegates_to_as_str() {
        assert_eq!(MediaType::NQuads.to_string(), "application/n-quads");
    }
}
