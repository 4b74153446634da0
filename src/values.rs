//! Value types for the imgix URL parameters.
//!
//! Enum parameters serialize to the exact tag the imgix rendering API
//! expects; flag-sets serialize to a comma-joined list of their enabled
//! flags; composite values (ratios, rectangles, alignment) each render to a
//! single query value.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Resize fit mode.
///
/// See <https://docs.imgix.com/apis/rendering/size/fit>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Resize within the dimensions without cropping, padding to fill.
    Clamp,
    /// Resize within the dimensions, trimming to fit.
    Clip,
    /// Resize and crop to fill the dimensions exactly.
    Crop,
    /// Find a face and zoom the crop to it.
    FaceArea,
    /// Stretch to fill the dimensions exactly.
    Fill,
    /// Like `fill`, but never upscales.
    FillMax,
    /// Resize to fit within the dimensions, never upscaling.
    Max,
    /// Like `max`, but allows upscaling.
    Min,
    /// Scale ignoring the source aspect ratio.
    Scale,
}

impl Fit {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Clip => "clip",
            Self::Crop => "crop",
            Self::FaceArea => "facearea",
            Self::Fill => "fill",
            Self::FillMax => "fillmax",
            Self::Max => "max",
            Self::Min => "min",
            Self::Scale => "scale",
        }
    }
}

/// Output color space.
///
/// See <https://docs.imgix.com/apis/rendering/format/cs>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Standard RGB.
    Srgb,
    /// Adobe RGB (1998).
    AdobeRgb1998,
    /// A reduced-footprint sRGB profile.
    TinySrgb,
    /// Strip all color profile metadata.
    Strip,
}

impl ColorSpace {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::AdobeRgb1998 => "adobergb1998",
            Self::TinySrgb => "tinysrgb",
            Self::Strip => "strip",
        }
    }
}

/// Output image format.
///
/// See <https://docs.imgix.com/apis/rendering/format/fm>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Format {
    Avif,
    Gif,
    Jp2,
    Jpg,
    Json,
    Jxr,
    Mp4,
    Pjpg,
    Png,
    Png8,
    Png32,
    Webm,
    Webp,
}

impl Format {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Gif => "gif",
            Self::Jp2 => "jp2",
            Self::Jpg => "jpg",
            Self::Json => "json",
            Self::Jxr => "jxr",
            Self::Mp4 => "mp4",
            Self::Pjpg => "pjpg",
            Self::Png => "png",
            Self::Png8 => "png8",
            Self::Png32 => "png32",
            Self::Webm => "webm",
            Self::Webp => "webp",
        }
    }
}

/// Blend mode for compositing a blend image or color.
///
/// See <https://docs.imgix.com/apis/rendering/blending/bm>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BlendMode {
    Normal,
    Color,
    Burn,
    Darken,
    Difference,
    Exclusion,
    HardLight,
    Hue,
    Lighten,
    Luminosity,
    Multiply,
    Overlay,
    Saturation,
    Screen,
    SoftLight,
}

impl BlendMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Color => "color",
            Self::Burn => "burn",
            Self::Darken => "darken",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::HardLight => "hardlight",
            Self::Hue => "hue",
            Self::Lighten => "lighten",
            Self::Luminosity => "luminosity",
            Self::Multiply => "multiply",
            Self::Overlay => "overlay",
            Self::Saturation => "saturation",
            Self::Screen => "screen",
            Self::SoftLight => "softlight",
        }
    }
}

/// Where overlong overlay text is clipped.
///
/// See <https://docs.imgix.com/apis/rendering/text/txt-clip>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextClip {
    Start,
    Middle,
    End,
    Ellipsis,
}

impl TextClip {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
            Self::Ellipsis => "ellipsis",
        }
    }
}

/// Automatic optimization flags.
///
/// Only flags set to `true` are serialized; an all-false value is omitted
/// from the query entirely.
///
/// See <https://docs.imgix.com/apis/rendering/auto>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Auto {
    /// Apply best-effort lossy compression.
    pub compress: bool,
    /// Apply automatic image enhancement.
    pub enhance: bool,
    /// Negotiate the best output format for the requesting client.
    pub format: bool,
    /// Remove red-eye from detected faces.
    pub redeye: bool,
}

impl Auto {
    pub(crate) fn serialize(&self) -> Option<String> {
        let flags = [
            ("compress", self.compress),
            ("enhance", self.enhance),
            ("format", self.format),
            ("redeye", self.redeye),
        ];

        join_enabled(&flags)
    }
}

/// Crop alignment flags, used when [`Fit::Crop`] is active.
///
/// See <https://docs.imgix.com/apis/rendering/size/crop>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Crop {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub faces: bool,
    pub focalpoint: bool,
    pub edges: bool,
    pub entropy: bool,
}

impl Crop {
    pub(crate) fn serialize(&self) -> Option<String> {
        let flags = [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
            ("faces", self.faces),
            ("focalpoint", self.focalpoint),
            ("edges", self.edges),
            ("entropy", self.entropy),
        ];

        join_enabled(&flags)
    }
}

/// Client hints the server may honor when choosing output parameters.
///
/// See <https://docs.imgix.com/apis/rendering/format/ch>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientHints {
    /// Honor the `Width` request header.
    pub width: bool,
    /// Honor the `DPR` request header.
    pub dpr: bool,
    /// Honor the `Save-Data` request header.
    pub save_data: bool,
}

impl ClientHints {
    pub(crate) fn serialize(&self) -> Option<String> {
        let flags = [
            ("width", self.width),
            ("dpr", self.dpr),
            ("save-data", self.save_data),
        ];

        join_enabled(&flags)
    }
}

// Flags are joined in their declared order, not the caller's construction
// order, so output is stable.
fn join_enabled(flags: &[(&'static str, bool)]) -> Option<String> {
    let value = flags
        .iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(",");

    (!value.is_empty()).then_some(value)
}

/// Target aspect ratio, serialized as `w:h`.
///
/// See <https://docs.imgix.com/apis/rendering/size/ar>.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio {
    /// Width component.
    pub w: f64,
    /// Height component.
    pub h: f64,
}

impl Ratio {
    /// Create a new [`Ratio`].
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Horizontal coordinate of a source rectangle: a pixel offset or a named
/// anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XAnchor {
    /// Pixel offset from the left edge.
    Offset(f64),
    /// Anchor to the left edge.
    Left,
    /// Anchor to the horizontal center.
    Center,
    /// Anchor to the right edge.
    Right,
}

impl From<f64> for XAnchor {
    fn from(offset: f64) -> Self {
        Self::Offset(offset)
    }
}

/// Vertical coordinate of a source rectangle: a pixel offset or a named
/// anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YAnchor {
    /// Pixel offset from the top edge.
    Offset(f64),
    /// Anchor to the top edge.
    Top,
    /// Anchor to the vertical middle.
    Middle,
    /// Anchor to the bottom edge.
    Bottom,
}

impl From<f64> for YAnchor {
    fn from(offset: f64) -> Self {
        Self::Offset(offset)
    }
}

/// Source sub-rectangle to extract before any other transformation,
/// serialized as `x,y,w,h`.
///
/// See <https://docs.imgix.com/apis/rendering/size/rect>.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Horizontal origin.
    pub x: XAnchor,
    /// Vertical origin.
    pub y: YAnchor,
    /// Width in pixels.
    pub w: f64,
    /// Height in pixels.
    pub h: f64,
}

impl Rect {
    /// Create a new [`Rect`].
    pub fn new(x: impl Into<XAnchor>, y: impl Into<YAnchor>, w: f64, h: f64) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            w,
            h,
        }
    }
}

/// Vertical alignment anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

impl VAlign {
    fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Horizontal alignment anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

impl HAlign {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Alignment of an overlay: one or both axes.
///
/// The shape rules out degenerate values such as a doubled token or an empty
/// alignment; `Both` always renders the vertical token first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Align on the vertical axis only.
    Vertical(VAlign),
    /// Align on the horizontal axis only.
    Horizontal(HAlign),
    /// Align on both axes, e.g. `bottom,right`.
    Both(VAlign, HAlign),
}

impl Align {
    pub(crate) fn serialize(self) -> String {
        match self {
            Self::Vertical(v) => v.as_str().to_owned(),
            Self::Horizontal(h) => h.as_str().to_owned(),
            Self::Both(v, h) => format!("{},{}", v.as_str(), h.as_str()),
        }
    }
}

/// An already-base64url-encoded payload value.
///
/// Base64 variants of the imgix parameters (`mark64`, `blend64`, `txt64`)
/// require their value to arrive encoded. This wrapper can only be produced
/// by [`Base64Uri::encode`] (or [`Base64Uri::encode_with`] for a custom
/// encoder), so an unencoded string cannot end up on the wire and an encoded
/// one cannot be encoded twice.
///
/// # Example
///
/// ```rust
/// use imgix_url::Base64Uri;
///
/// let payload = Base64Uri::encode("Hello, World!");
/// assert_eq!(payload.as_str(), "SGVsbG8sIFdvcmxkIQ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Uri(String);

impl Base64Uri {
    /// Encode a plain string with the URL-safe, unpadded base64 alphabet.
    pub fn encode(value: &str) -> Self {
        Self(URL_SAFE_NO_PAD.encode(value))
    }

    /// Encode a plain string with a caller-supplied encoder.
    ///
    /// The encoder must produce URL-safe base64; this constructor does not
    /// inspect its output.
    pub fn encode_with(value: &str, encoder: impl FnOnce(&str) -> String) -> Self {
        Self(encoder(value))
    }

    /// The underlying encoded string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Base64Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_sets_join_in_declared_order() {
        let auto = Auto {
            redeye: true,
            compress: true,
            ..Default::default()
        };
        assert_eq!(auto.serialize().as_deref(), Some("compress,redeye"));

        let crop = Crop {
            entropy: true,
            top: true,
            faces: true,
            ..Default::default()
        };
        assert_eq!(crop.serialize().as_deref(), Some("top,faces,entropy"));
    }

    #[test]
    fn empty_flag_set_is_omitted() {
        assert_eq!(Auto::default().serialize(), None);
        assert_eq!(Crop::default().serialize(), None);
        assert_eq!(ClientHints::default().serialize(), None);
    }

    #[test]
    fn client_hints_use_kebab_case_flag_names() {
        let ch = ClientHints {
            save_data: true,
            dpr: true,
            ..Default::default()
        };
        assert_eq!(ch.serialize().as_deref(), Some("dpr,save-data"));
    }

    #[test]
    fn align_renders_vertical_before_horizontal() {
        assert_eq!(Align::Vertical(VAlign::Top).serialize(), "top");
        assert_eq!(Align::Horizontal(HAlign::Right).serialize(), "right");
        assert_eq!(
            Align::Both(VAlign::Bottom, HAlign::Left).serialize(),
            "bottom,left"
        );
    }

    #[test]
    fn base64_uri_is_url_safe_and_unpadded() {
        let payload = Base64Uri::encode("Hello,+World!");
        assert_eq!(payload.as_str(), "SGVsbG8sK1dvcmxkIQ");
        assert!(!payload.as_str().contains('='));
    }

    #[test]
    fn base64_uri_with_custom_encoder() {
        let payload = Base64Uri::encode_with("abc", |s| s.chars().rev().collect());
        assert_eq!(payload.as_str(), "cba");
    }
}
