// src/models/photo.rs
// DOCUMENTATION: Photo identifiers and the photo proxy request
// PURPOSE: Decide which upstream photo endpoint an identifier belongs to

use crate::config::UpstreamApiVersion;
use crate::errors::PlacesError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string accepted by the photo proxy
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhotoQuery {
    /// Legacy photo_reference token
    pub reference: Option<String>,

    /// v1 photo resource name (places/{place}/photos/{photo})
    pub uri: Option<String>,

    /// Pixels
    #[validate(range(min = 1, max = 4800))]
    pub max_width: Option<u32>,
}

/// Opaque photo identifier emitted by the search proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoIdentifier {
    /// Legacy photo_reference token
    Reference(String),
    /// v1 resource name
    Resource(String),
}

impl PhotoIdentifier {
    /// Classify an identifier by its shape
    /// DOCUMENTATION: v1 names always start with "places/", legacy tokens never contain '/'
    pub fn classify(raw: &str) -> Self {
        if raw.starts_with("places/") {
            PhotoIdentifier::Resource(raw.to_string())
        } else {
            PhotoIdentifier::Reference(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PhotoIdentifier::Reference(s) | PhotoIdentifier::Resource(s) => s,
        }
    }

    /// Resource name checked against places/{place}/photos/{photo}
    pub fn resource_name(&self) -> Result<&str, PlacesError> {
        let name = match self {
            PhotoIdentifier::Resource(name) => name.trim_matches('/'),
            PhotoIdentifier::Reference(_) => {
                return Err(PlacesError::InternalError(
                    "Legacy photo reference used as a resource name".to_string(),
                ))
            }
        };

        let segments: Vec<&str> = name.split('/').collect();
        let well_formed = segments.len() == 4
            && segments[0] == "places"
            && segments[2] == "photos"
            && segments.iter().all(|s| {
                !s.is_empty()
                    && !is_dot_segment(s)
                    && !s.contains(|c: char| c.is_whitespace() || c == '?' || c == '#')
            });

        if well_formed {
            Ok(name)
        } else {
            Err(PlacesError::InternalError(format!(
                "Malformed photo resource name: {}",
                name
            )))
        }
    }
}

impl PhotoQuery {
    /// Pick the identifier to fetch
    /// DOCUMENTATION: `uri` goes to the v1 media endpoint, `reference` to the legacy one.
    /// When both are present the configured API version decides.
    pub fn identifier(&self, preferred: UpstreamApiVersion) -> Result<PhotoIdentifier, PlacesError> {
        let reference = present(&self.reference).map(|r| PhotoIdentifier::Reference(r.to_string()));
        let resource = present(&self.uri).map(|u| PhotoIdentifier::Resource(u.to_string()));

        match (reference, resource) {
            (Some(reference), Some(resource)) => Ok(match preferred {
                UpstreamApiVersion::Legacy => reference,
                UpstreamApiVersion::V1 => resource,
            }),
            (Some(reference), None) => Ok(reference),
            (None, Some(resource)) => Ok(resource),
            (None, None) => Err(PlacesError::BadRequest(
                "Missing photo reference or uri".to_string(),
            )),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `.` or `..`, literal or percent-encoded
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            PhotoIdentifier::classify("AUc7tXW-token"),
            PhotoIdentifier::Reference("AUc7tXW-token".to_string())
        );
        assert_eq!(
            PhotoIdentifier::classify("places/ChIJ1/photos/AbC"),
            PhotoIdentifier::Resource("places/ChIJ1/photos/AbC".to_string())
        );
    }

    #[test]
    fn test_resource_name_validation() {
        let ok = PhotoIdentifier::Resource("places/ChIJ1/photos/AbC".to_string());
        assert_eq!(ok.resource_name().unwrap(), "places/ChIJ1/photos/AbC");

        let bad = PhotoIdentifier::Resource("places/ChIJ1".to_string());
        assert!(matches!(bad.resource_name(), Err(PlacesError::InternalError(_))));

        let bad = PhotoIdentifier::Resource("places/ChIJ1/photos/a b".to_string());
        assert!(bad.resource_name().is_err());
    }

    #[test]
    fn test_resource_name_rejects_dot_segments() {
        for name in [
            "places/../photos/x",
            "places/./photos/x",
            "places/p/photos/..",
            "places/%2e%2e/photos/x",
            "places/%2E/photos/x",
            "places/p/photos/.%2E",
        ] {
            let id = PhotoIdentifier::Resource(name.to_string());
            assert!(
                matches!(id.resource_name(), Err(PlacesError::InternalError(_))),
                "{} was accepted",
                name
            );
        }

        let ok = PhotoIdentifier::Resource("places/p.1/photos/..abc".to_string());
        assert!(ok.resource_name().is_ok());
    }

    #[test]
    fn test_identifier_selection() {
        let query = PhotoQuery::default();
        assert!(matches!(
            query.identifier(UpstreamApiVersion::Legacy),
            Err(PlacesError::BadRequest(_))
        ));

        let query = PhotoQuery {
            reference: Some("  ".to_string()),
            ..PhotoQuery::default()
        };
        assert!(query.identifier(UpstreamApiVersion::Legacy).is_err());

        let both = PhotoQuery {
            reference: Some("tok".to_string()),
            uri: Some("places/p/photos/q".to_string()),
            max_width: None,
        };
        assert_eq!(
            both.identifier(UpstreamApiVersion::Legacy).unwrap(),
            PhotoIdentifier::Reference("tok".to_string())
        );
        assert_eq!(
            both.identifier(UpstreamApiVersion::V1).unwrap(),
            PhotoIdentifier::Resource("places/p/photos/q".to_string())
        );
    }
}
