//! # Overview
//!
//! This crate builds imgix rendering URLs from a strongly-typed description
//! of an image transformation, with optional request signing.
//!
//! Construction is a pure, synchronous pipeline: the [`UrlParams`] value is
//! serialized to an ordered set of query pairs, absent fields are dropped,
//! the result is optionally signed against the base URL's path with a shared
//! secret [`Token`], and the pairs are merged into the base URL's query
//! string. Equal inputs always produce byte-identical URLs.
//!
//! # Usage
//!
//! ```rust
//! use imgix_url::{Auto, UrlBuilder, UrlParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let builder = UrlBuilder::new("https://foo.com".parse()?);
//!
//! let url = builder.build_url(&UrlParams {
//!     auto: Some(Auto {
//!         format: true,
//!         ..Default::default()
//!     }),
//!     w: Some(300.0),
//!     min_h: Some(300.0),
//!     ..Default::default()
//! })?;
//!
//! assert_eq!(url.as_str(), "https://foo.com/?auto=format&w=300&min-h=300");
//! # Ok(())
//! # }
//! ```
//!
//! # Signed URLs
//!
//! A builder holding a [`Token`] appends the `s` signature parameter, an MD5
//! digest over the secret, the resource path, and the serialized query:
//!
//! ```rust
//! use imgix_url::{Auto, Token, UrlBuilder, UrlParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let builder = UrlBuilder::new("https://foo.com".parse()?).with_token(Token::new("token"));
//!
//! let url = builder.build_url(&UrlParams {
//!     auto: Some(Auto {
//!         format: true,
//!         ..Default::default()
//!     }),
//!     w: Some(300.0),
//!     ..Default::default()
//! })?;
//!
//! assert_eq!(
//!     url.as_str(),
//!     "https://foo.com/?auto=format&w=300&s=d82d76f9f31379083b452f98bcd7f670"
//! );
//! # Ok(())
//! # }
//! ```
#![warn(
    clippy::all,
    nonstandard_style,
    future_incompatible,
    missing_docs,
    missing_debug_implementations
)]
#![forbid(unsafe_code)]

mod params;
mod signed;
mod token;
mod values;

use url::Url;

pub use params::{Error, SerializedQuery, UrlParams};
pub use signed::Signer;
pub use token::Token;
pub use values::{
    Align, Auto, Base64Uri, BlendMode, ClientHints, ColorSpace, Crop, Fit, Format, HAlign, Ratio,
    Rect, TextClip, VAlign, XAnchor, YAnchor,
};

/// Builder of imgix rendering URLs for a fixed base URL.
///
/// The builder itself is cheap to clone and may be reused across any number
/// of [`build_url`](UrlBuilder::build_url) calls; no state is shared between
/// calls.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
    signer: Option<Signer>,
}

impl UrlBuilder {
    /// Create a new [`UrlBuilder`] for the given base URL.
    ///
    /// Any query parameters already present on the base URL are preserved in
    /// built URLs, except where a transformation parameter collides with one
    /// of them, in which case the transformation parameter wins.
    pub const fn new(base: Url) -> Self {
        Self { base, signer: None }
    }

    /// Configure a signing [`Token`].
    ///
    /// Built URLs will carry the `s` signature parameter, unless the caller
    /// supplied one of their own via [`UrlParams::s`].
    pub fn with_token(self, token: Token) -> Self {
        Self {
            signer: Some(Signer::new(token)),
            ..self
        }
    }

    /// Build the final URL for the given parameters.
    ///
    /// With no parameters set and no token configured the base URL is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if any numeric parameter is not a
    /// finite number; no URL is produced in that case.
    pub fn build_url(&self, params: &UrlParams) -> Result<Url, Error> {
        let mut query = params.to_query()?;

        if let Some(signer) = &self.signer {
            signer.sign(self.base.path(), &mut query);
        }

        if query.is_empty() {
            return Ok(self.base.clone());
        }

        let mut url = self.base.clone();
        let existing: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();

            for (key, value) in existing
                .iter()
                .filter(|(key, _)| !query.iter().any(|(new_key, _)| new_key == key))
            {
                pairs.append_pair(key, value);
            }

            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> UrlBuilder {
        UrlBuilder::new("https://foo.com".parse().unwrap())
    }

    #[test]
    fn empty_params_return_the_base_url_unchanged() {
        let url = builder().build_url(&UrlParams::default()).unwrap();
        assert_eq!(url.as_str(), "https://foo.com/");

        let base: Url = "https://foo.com/photo.jpg?cache=1".parse().unwrap();
        let url = UrlBuilder::new(base.clone())
            .build_url(&UrlParams::default())
            .unwrap();
        assert_eq!(url, base);
    }

    #[test]
    fn serializes_in_canonical_order() {
        let url = builder()
            .build_url(&UrlParams {
                auto: Some(Auto {
                    format: true,
                    ..Default::default()
                }),
                w: Some(300.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(url.as_str(), "https://foo.com/?auto=format&w=300");
    }

    #[test]
    fn preserves_unrelated_base_query_parameters() {
        let url = UrlBuilder::new("https://foo.com/img.png?cache=1&w=50".parse().unwrap())
            .build_url(&UrlParams {
                w: Some(300.0),
                h: Some(100.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(url.as_str(), "https://foo.com/img.png?cache=1&w=300&h=100");
    }

    #[test]
    fn composite_values_are_percent_encoded() {
        let url = builder()
            .build_url(&UrlParams {
                ar: Some(Ratio::new(3.0, 4.0)),
                crop: Some(Crop {
                    top: true,
                    left: true,
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(url.as_str(), "https://foo.com/?crop=top%2Cleft&ar=3%3A4");
    }

    #[test]
    fn signs_against_the_base_path() {
        let url = builder()
            .with_token(Token::new("token"))
            .build_url(&UrlParams {
                auto: Some(Auto {
                    format: true,
                    ..Default::default()
                }),
                w: Some(300.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://foo.com/?auto=format&w=300&s=d82d76f9f31379083b452f98bcd7f670"
        );
    }

    #[test]
    fn caller_signature_wins_over_the_token() {
        let url = builder()
            .with_token(Token::new("token"))
            .build_url(&UrlParams {
                w: Some(300.0),
                s: Some("cafebabe".to_owned()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(url.as_str(), "https://foo.com/?w=300&s=cafebabe");
    }

    #[test]
    fn non_finite_numbers_produce_no_url() {
        let err = builder()
            .build_url(&UrlParams {
                w: Some(f64::INFINITY),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { param: "w", .. }));
    }

    #[test]
    fn repeated_builds_are_byte_identical() {
        let params = UrlParams {
            dpr: Some(2.0),
            fit: Some(Fit::Crop),
            ch: Some(ClientHints {
                save_data: true,
                ..Default::default()
            }),
            ..Default::default()
        };

        let builder = builder().with_token(Token::new("token"));
        let first = builder.build_url(&params).unwrap();
        let second = builder.build_url(&params).unwrap();
        assert_eq!(first.as_str(), second.as_str());
    }
}
