//! Query-string parameters of a Subsonic request.

use crate::browse::BrowseError;
use crate::subsonic::{ErrorCode, SubsonicResponse};
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::str::FromStr;

/// All query parameters, with typed accessors that fail as Subsonic client errors.
#[derive(Debug, Default, Clone)]
pub struct Params(pub HashMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The value if present and non-empty.
    pub fn string(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// Parses the value if present; an empty value counts as absent.
    pub fn parse<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, BrowseError> {
        match self.get(name).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| BrowseError::InvalidParameter {
                    param: name,
                    value: raw.to_string(),
                }),
        }
    }

    pub fn parse_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, BrowseError> {
        Ok(self.parse(name)?.unwrap_or(default))
    }

    pub fn required<T: FromStr>(&self, name: &'static str) -> Result<T, BrowseError> {
        self.parse(name)?.ok_or(BrowseError::MissingParameter(name))
    }
}

impl<S> FromRequestParts<S> for Params
where
    S: Send + Sync,
{
    type Rejection = SubsonicResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(params)| Params(params))
            .map_err(|e| {
                SubsonicResponse::error(
                    ErrorCode::MissingParameter,
                    format!("malformed query string: {}", e),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        Params(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn absent_and_empty_values_fall_back() {
        let p = params(&[("size", "")]);
        assert_eq!(p.parse_or::<usize>("size", 10).unwrap(), 10);
        assert_eq!(p.parse_or::<usize>("offset", 0).unwrap(), 0);
        assert_eq!(p.string("size"), None);
    }

    #[test]
    fn malformed_numbers_are_invalid_parameters() {
        let p = params(&[("size", "ten"), ("offset", "-1")]);
        assert!(matches!(
            p.parse::<usize>("size"),
            Err(BrowseError::InvalidParameter { param: "size", .. })
        ));
        assert!(p.parse::<usize>("offset").is_err());
    }

    #[test]
    fn required_reports_missing_parameter() {
        let p = params(&[("id", "42")]);
        assert_eq!(p.required::<i64>("id").unwrap(), 42);
        assert!(matches!(
            params(&[]).required::<i64>("id"),
            Err(BrowseError::MissingParameter("id"))
        ));
    }
}
