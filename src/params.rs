//! Transformation parameters and their query serialization.
use crate::values::{
    Align, Auto, Base64Uri, BlendMode, ClientHints, ColorSpace, Crop, Fit, Format, Ratio, Rect,
    TextClip, XAnchor, YAnchor,
};

/// Errors which can occur while serializing [`UrlParams`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A numeric parameter was not a finite number.
    ///
    /// Only finite numbers have a decimal query representation; NaN and the
    /// infinities abort serialization before any URL is produced.
    #[error("expected a finite number for `{param}`, got `{value}`")]
    InvalidValue {
        /// Wire name of the offending parameter.
        param: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// An ordered set of serialized query pairs.
///
/// Keys are the wire parameter names; ordering follows the canonical field
/// table of [`UrlParams`], so equal inputs always produce byte-identical
/// query strings.
pub type SerializedQuery = Vec<(&'static str, String)>;

/// The full set of imgix rendering parameters.
///
/// Every field is optional; an absent field contributes nothing to the
/// query. Field names follow the wire parameter names (kebab-case on the
/// wire, snake_case here), so constructing a value reads like the URL it
/// produces:
///
/// ```rust
/// use imgix_url::{Auto, Fit, UrlParams};
///
/// let params = UrlParams {
///     w: Some(640.0),
///     h: Some(480.0),
///     fit: Some(Fit::Crop),
///     auto: Some(Auto {
///         format: true,
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// ```
///
/// See <https://docs.imgix.com/apis/rendering>.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct UrlParams {
    /// Device pixel ratio.
    pub dpr: Option<f64>,
    /// Automatic optimization flags.
    pub auto: Option<Auto>,
    /// Resize fit mode.
    pub fit: Option<Fit>,
    /// Output width in pixels.
    pub w: Option<f64>,
    /// Output height in pixels.
    pub h: Option<f64>,
    /// Minimum output height in pixels.
    pub min_h: Option<f64>,
    /// Output quality, 0-100.
    pub q: Option<f64>,
    /// Output color space.
    pub cs: Option<ColorSpace>,
    /// Crop alignment flags.
    pub crop: Option<Crop>,
    /// Background color.
    pub bg: Option<String>,
    /// Client hints.
    pub ch: Option<ClientHints>,
    /// Gaussian blur radius, 0-2000.
    pub blur: Option<f64>,
    /// Which detected face to use for face cropping.
    pub face_index: Option<f64>,
    /// Padding around a cropped face.
    pub face_pad: Option<f64>,
    /// Output format.
    pub fm: Option<Format>,
    /// Target aspect ratio.
    pub ar: Option<Ratio>,
    /// Source sub-rectangle.
    pub rect: Option<Rect>,
    /// Blend image URL or color.
    pub blend: Option<String>,
    /// Base64 variant of `blend`.
    pub blend64: Option<Base64Uri>,
    /// Blend mode.
    pub bm: Option<BlendMode>,
    pub blend_x: Option<f64>,
    pub blend_y: Option<f64>,
    pub blend_w: Option<f64>,
    pub blend_h: Option<f64>,
    /// Blend alignment.
    pub ba: Option<Align>,
    /// Watermark image URL.
    pub mark: Option<String>,
    /// Base64 variant of `mark`.
    pub mark64: Option<Base64Uri>,
    pub mark_x: Option<f64>,
    pub mark_y: Option<f64>,
    pub mark_w: Option<f64>,
    pub mark_h: Option<f64>,
    /// Padding around the watermark.
    pub mark_pad: Option<f64>,
    /// Watermark alignment.
    pub mark_align: Option<Align>,
    /// Overlay text.
    pub txt: Option<String>,
    /// Base64 variant of `txt`.
    pub txt64: Option<Base64Uri>,
    /// Overlay text font size.
    pub txt_size: Option<f64>,
    /// Overlay text color.
    pub txt_color: Option<String>,
    /// Padding around the overlay text.
    pub txt_pad: Option<f64>,
    /// Overlay text outline width.
    pub txt_line: Option<f64>,
    /// Overlay text outline color.
    pub txt_line_color: Option<String>,
    /// Overlay text font.
    pub txt_font: Option<String>,
    /// Where overlong overlay text is clipped.
    pub txt_clip: Option<TextClip>,
    /// Overlay text alignment.
    pub txt_align: Option<Align>,
    /// Pre-computed signature.
    ///
    /// A caller-supplied signature is passed through verbatim and is never
    /// overwritten, even when the builder holds a signing token.
    pub s: Option<String>,
}

impl UrlParams {
    /// Serialize into an ordered set of query pairs.
    ///
    /// Fields are visited in the canonical table order regardless of how the
    /// caller constructed the value, absent fields and all-false flag-sets
    /// are dropped, and every value is rendered to its final wire string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if any numeric field holds a
    /// non-finite number. Nothing is returned in that case; there is no
    /// partial output.
    pub fn to_query(&self) -> Result<SerializedQuery, Error> {
        let mut query = SerializedQuery::new();

        push_num(&mut query, "dpr", self.dpr)?;
        push_value(&mut query, "auto", self.auto.as_ref().and_then(Auto::serialize));
        push_tag(&mut query, "fit", self.fit.map(Fit::as_str));
        push_num(&mut query, "w", self.w)?;
        push_num(&mut query, "h", self.h)?;
        push_num(&mut query, "min-h", self.min_h)?;
        push_num(&mut query, "q", self.q)?;
        push_tag(&mut query, "cs", self.cs.map(ColorSpace::as_str));
        push_value(&mut query, "crop", self.crop.as_ref().and_then(Crop::serialize));
        push_str(&mut query, "bg", self.bg.as_deref());
        push_value(
            &mut query,
            "ch",
            self.ch.as_ref().and_then(ClientHints::serialize),
        );
        push_num(&mut query, "blur", self.blur)?;
        push_num(&mut query, "faceindex", self.face_index)?;
        push_num(&mut query, "facepad", self.face_pad)?;
        push_tag(&mut query, "fm", self.fm.map(Format::as_str));
        if let Some(ar) = self.ar {
            query.push(("ar", ratio_value("ar", ar)?));
        }
        if let Some(rect) = self.rect {
            query.push(("rect", rect_value("rect", rect)?));
        }
        push_str(&mut query, "blend", self.blend.as_deref());
        push_str(&mut query, "blend64", self.blend64.as_ref().map(Base64Uri::as_str));
        push_tag(&mut query, "bm", self.bm.map(BlendMode::as_str));
        push_num(&mut query, "blend-x", self.blend_x)?;
        push_num(&mut query, "blend-y", self.blend_y)?;
        push_num(&mut query, "blend-w", self.blend_w)?;
        push_num(&mut query, "blend-h", self.blend_h)?;
        push_value(&mut query, "ba", self.ba.map(Align::serialize));
        push_str(&mut query, "mark", self.mark.as_deref());
        push_str(&mut query, "mark64", self.mark64.as_ref().map(Base64Uri::as_str));
        push_num(&mut query, "mark-x", self.mark_x)?;
        push_num(&mut query, "mark-y", self.mark_y)?;
        push_num(&mut query, "mark-w", self.mark_w)?;
        push_num(&mut query, "mark-h", self.mark_h)?;
        push_num(&mut query, "mark-pad", self.mark_pad)?;
        push_value(&mut query, "mark-align", self.mark_align.map(Align::serialize));
        push_str(&mut query, "txt", self.txt.as_deref());
        push_str(&mut query, "txt64", self.txt64.as_ref().map(Base64Uri::as_str));
        push_num(&mut query, "txt-size", self.txt_size)?;
        push_str(&mut query, "txt-color", self.txt_color.as_deref());
        push_num(&mut query, "txt-pad", self.txt_pad)?;
        push_num(&mut query, "txt-line", self.txt_line)?;
        push_str(&mut query, "txt-line-color", self.txt_line_color.as_deref());
        push_str(&mut query, "txt-font", self.txt_font.as_deref());
        push_tag(&mut query, "txt-clip", self.txt_clip.map(TextClip::as_str));
        push_value(&mut query, "txt-align", self.txt_align.map(Align::serialize));
        push_str(&mut query, "s", self.s.as_deref());

        Ok(query)
    }
}

fn finite(param: &'static str, value: f64) -> Result<String, Error> {
    if value.is_finite() {
        Ok(value.to_string())
    } else {
        Err(Error::InvalidValue { param, value })
    }
}

fn push_num(
    query: &mut SerializedQuery,
    key: &'static str,
    value: Option<f64>,
) -> Result<(), Error> {
    if let Some(value) = value {
        query.push((key, finite(key, value)?));
    }
    Ok(())
}

fn push_str(query: &mut SerializedQuery, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        query.push((key, value.to_owned()));
    }
}

fn push_tag(query: &mut SerializedQuery, key: &'static str, value: Option<&'static str>) {
    if let Some(value) = value {
        query.push((key, value.to_owned()));
    }
}

fn push_value(query: &mut SerializedQuery, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        query.push((key, value));
    }
}

fn ratio_value(param: &'static str, ratio: Ratio) -> Result<String, Error> {
    Ok(format!(
        "{}:{}",
        finite(param, ratio.w)?,
        finite(param, ratio.h)?
    ))
}

fn rect_value(param: &'static str, rect: Rect) -> Result<String, Error> {
    let x = match rect.x {
        XAnchor::Offset(offset) => finite(param, offset)?,
        XAnchor::Left => "left".to_owned(),
        XAnchor::Center => "center".to_owned(),
        XAnchor::Right => "right".to_owned(),
    };
    let y = match rect.y {
        YAnchor::Offset(offset) => finite(param, offset)?,
        YAnchor::Top => "top".to_owned(),
        YAnchor::Middle => "middle".to_owned(),
        YAnchor::Bottom => "bottom".to_owned(),
    };

    Ok(format!(
        "{},{},{},{}",
        x,
        y,
        finite(param, rect.w)?,
        finite(param, rect.h)?
    ))
}
