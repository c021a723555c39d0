//! Identifier resolution.
//!
//! An element names its widget through one of several attributes, tried in
//! order. The default order is the `id` attribute, then a JSON encoded
//! `data-id`. Decoding failures are reported, never raised: the element is
//! still rendered, its controller just stays unpublished.

use senaite_widgets_core::{ElementData, IdentityError, Identifier};
use serde_json::Value;

/// One place an identifier can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentitySource {
    /// The `id` attribute, used verbatim when non-empty.
    IdAttribute,
    /// The `data-id` attribute, JSON decoded.
    DataId,
}

impl IdentitySource {
    /// Read an identifier from `element`.
    ///
    /// `Ok(None)` means this source has nothing to offer and the next one
    /// should be tried.
    pub fn read(self, element: &ElementData) -> Result<Option<Identifier>, IdentityError> {
        match self {
            IdentitySource::IdAttribute => Ok(element
                .id()
                .filter(|id| !id.is_empty())
                .map(Identifier::from)),
            IdentitySource::DataId => match element.data("id") {
                Some(raw) if !raw.is_empty() => decode_data_id(raw),
                _ => Ok(None),
            },
        }
    }
}

fn decode_data_id(raw: &str) -> Result<Option<Identifier>, IdentityError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| IdentityError::MalformedDataId {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;

    match value {
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(Identifier::from(s))),
        Value::Number(n) => Ok(Some(Identifier::from(n.to_string()))),
        _ => Err(IdentityError::UnsupportedDataId {
            raw: raw.to_string(),
        }),
    }
}

/// Ordered identifier resolution strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityResolver {
    sources: Vec<IdentitySource>,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new([IdentitySource::IdAttribute, IdentitySource::DataId])
    }
}

impl IdentityResolver {
    /// Resolve through `sources`, first hit wins.
    pub fn new(sources: impl IntoIterator<Item = IdentitySource>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
        }
    }

    /// The sources in resolution order.
    pub fn sources(&self) -> &[IdentitySource] {
        &self.sources
    }

    /// Resolve the identifier of `element`.
    ///
    /// A decoding error from a source stops the resolution; later sources are
    /// not consulted.
    pub fn resolve(&self, element: &ElementData) -> Result<Option<Identifier>, IdentityError> {
        for source in &self.sources {
            if let Some(id) = source.read(element)? {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(attrs: &[(&str, &str)]) -> ElementData {
        let mut data = ElementData::new("div");
        for (name, value) in attrs {
            data.set_attribute(*name, *value);
        }
        data
    }

    #[test]
    fn test_id_wins_over_data_id() {
        let el = element(&[("id", "a"), ("data-id", "\"b\"")]);
        let id = IdentityResolver::default().resolve(&el).unwrap();
        assert_eq!(id.unwrap(), "a");
    }

    #[test]
    fn test_data_id_is_json_decoded() {
        let el = element(&[("data-id", "\"x\"")]);
        let id = IdentityResolver::default().resolve(&el).unwrap();
        assert_eq!(id.unwrap(), "x");
    }

    #[test]
    fn test_numeric_data_id() {
        let el = element(&[("data-id", "42")]);
        let id = IdentityResolver::default().resolve(&el).unwrap();
        assert_eq!(id.unwrap(), "42");
    }

    #[test]
    fn test_empty_id_falls_through() {
        let el = element(&[("id", ""), ("data-id", "\"fallback\"")]);
        let id = IdentityResolver::default().resolve(&el).unwrap();
        assert_eq!(id.unwrap(), "fallback");
    }

    #[test]
    fn test_no_identifier() {
        let el = element(&[("class", "senaite-phone-widget-input")]);
        assert_eq!(IdentityResolver::default().resolve(&el), Ok(None));

        let el = element(&[("data-id", "")]);
        assert_eq!(IdentityResolver::default().resolve(&el), Ok(None));
    }

    #[test]
    fn test_malformed_data_id() {
        let el = element(&[("data-id", "not json")]);
        let err = IdentityResolver::default().resolve(&el).unwrap_err();
        assert!(matches!(err, IdentityError::MalformedDataId { ref raw, .. } if raw == "not json"));
    }

    #[test]
    fn test_unsupported_data_id() {
        let el = element(&[("data-id", "{\"a\": 1}")]);
        let err = IdentityResolver::default().resolve(&el).unwrap_err();
        assert!(matches!(err, IdentityError::UnsupportedDataId { .. }));
    }

    #[test]
    fn test_custom_order() {
        let el = element(&[("id", "a"), ("data-id", "\"b\"")]);
        let resolver = IdentityResolver::new([IdentitySource::DataId, IdentitySource::IdAttribute]);
        assert_eq!(resolver.resolve(&el).unwrap().unwrap(), "b");
    }
}
