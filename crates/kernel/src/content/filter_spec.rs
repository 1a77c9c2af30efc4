//! Rendition filter specifications.
//!
//! A filter spec is the pipe-separated string that names a rendition, e.g.
//! `fill-1920x1080|format-webp`. Parsing validates it once, at profile load
//! time, so a typo fails at startup instead of on the first request.
//!
//! The spec also predicts the output of the rendition backend: dimensions
//! (never upscaled) and file extension.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest width or height a spec may request.
const MAX_DIMENSION: u32 = 8192;

/// Errors from parsing a filter spec string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterSpecError {
    #[error("filter spec is empty")]
    Empty,

    #[error("unknown filter operation: {0}")]
    UnknownOperation(String),

    #[error("invalid argument for {op}: {value}")]
    InvalidArgument { op: String, value: String },

    #[error("filter spec {0} has more than one resize operation")]
    MultipleResize(String),
}

/// The geometric part of a spec. At most one per spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOp {
    Original,
    /// Crop to the target aspect ratio, then scale down to fit.
    /// `closeness` controls how tightly the crop hugs the focal point; it
    /// does not change output dimensions.
    Fill {
        width: u32,
        height: u32,
        closeness: Option<u32>,
    },
    Width(u32),
    Height(u32),
    /// Fit inside the box.
    Max { width: u32, height: u32 },
    /// Cover the box.
    Min { width: u32, height: u32 },
    /// Percentage of the source size.
    Scale(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
    Avif,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Avif => "avif",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FilterSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            "gif" => Ok(Self::Gif),
            "avif" => Ok(Self::Avif),
            other => Err(FilterSpecError::InvalidArgument {
                op: "format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A parsed, validated filter spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilterSpec {
    raw: String,
    resize: ResizeOp,
    format: Option<OutputFormat>,
    jpeg_quality: Option<u8>,
    webp_quality: Option<u8>,
    background: Option<String>,
}

impl FilterSpec {
    /// The spec exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn resize(&self) -> ResizeOp {
        self.resize
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.format
    }

    pub fn jpeg_quality(&self) -> Option<u8> {
        self.jpeg_quality
    }

    pub fn webp_quality(&self) -> Option<u8> {
        self.webp_quality
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// File-name-safe form of the spec, used in rendition paths.
    pub fn file_suffix(&self) -> String {
        self.raw.replace('|', ".")
    }

    /// Extension of the rendered file: the requested format, else the
    /// source's own extension.
    pub fn output_extension(&self, source_file: &str) -> String {
        if let Some(format) = self.format {
            return format.extension().to_string();
        }
        let ext = source_file
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "jpg".to_string());
        if ext == "jpeg" { "jpg".to_string() } else { ext }
    }

    /// Dimensions of the rendition produced from a `width` x `height` source.
    pub fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        let (w, h) = (width.max(1), height.max(1));
        match self.resize {
            ResizeOp::Original => (w, h),
            ResizeOp::Fill {
                width: tw,
                height: th,
                ..
            } => {
                let (crop_w, crop_h) = if u64::from(w) * u64::from(th) > u64::from(h) * u64::from(tw) {
                    (scaled(h, tw, th), h)
                } else {
                    (w, scaled(w, th, tw))
                };
                if crop_w > tw { (tw, th) } else { (crop_w, crop_h) }
            }
            ResizeOp::Width(tw) => {
                if w <= tw {
                    (w, h)
                } else {
                    (tw, scaled(h, tw, w))
                }
            }
            ResizeOp::Height(th) => {
                if h <= th {
                    (w, h)
                } else {
                    (scaled(w, th, h), th)
                }
            }
            ResizeOp::Max {
                width: tw,
                height: th,
            } => {
                if w <= tw && h <= th {
                    (w, h)
                } else if u64::from(w) * u64::from(th) > u64::from(h) * u64::from(tw) {
                    (tw, scaled(h, tw, w))
                } else {
                    (scaled(w, th, h), th)
                }
            }
            ResizeOp::Min {
                width: tw,
                height: th,
            } => {
                if w <= tw || h <= th {
                    (w, h)
                } else if u64::from(w) * u64::from(th) > u64::from(h) * u64::from(tw) {
                    (scaled(w, th, h), th)
                } else {
                    (tw, scaled(h, tw, w))
                }
            }
            ResizeOp::Scale(percent) => (scaled(w, percent, 100), scaled(h, percent, 100)),
        }
    }
}

/// `value * num / den`, rounded, never below one pixel.
fn scaled(value: u32, num: u32, den: u32) -> u32 {
    let den = u64::from(den.max(1));
    let result = (u64::from(value) * u64::from(num) + den / 2) / den;
    u32::try_from(result).unwrap_or(u32::MAX).max(1)
}

fn dimension(op: &str, value: &str) -> Result<u32, FilterSpecError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|v| (1..=MAX_DIMENSION).contains(v))
        .ok_or_else(|| FilterSpecError::InvalidArgument {
            op: op.to_string(),
            value: value.to_string(),
        })
}

fn size(op: &str, value: &str) -> Result<(u32, u32), FilterSpecError> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| FilterSpecError::InvalidArgument {
            op: op.to_string(),
            value: value.to_string(),
        })?;
    Ok((dimension(op, w)?, dimension(op, h)?))
}

fn quality(op: &str, value: &str) -> Result<u8, FilterSpecError> {
    value
        .parse::<u8>()
        .ok()
        .filter(|q| (1..=100).contains(q))
        .ok_or_else(|| FilterSpecError::InvalidArgument {
            op: op.to_string(),
            value: value.to_string(),
        })
}

impl FromStr for FilterSpec {
    type Err = FilterSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(FilterSpecError::Empty);
        }

        let mut resize: Option<ResizeOp> = None;
        let mut format = None;
        let mut jpeg_quality = None;
        let mut webp_quality = None;
        let mut background = None;

        for part in raw.split('|') {
            let (op, arg) = part.split_once('-').unwrap_or((part, ""));
            let parsed_resize = match op {
                "original" if arg.is_empty() => Some(ResizeOp::Original),
                "fill" => {
                    let (dims, closeness) = match arg.split_once("-c") {
                        Some((dims, c)) => {
                            let closeness = c.parse::<u32>().ok().filter(|c| *c <= 100).ok_or_else(
                                || FilterSpecError::InvalidArgument {
                                    op: op.to_string(),
                                    value: arg.to_string(),
                                },
                            )?;
                            (dims, Some(closeness))
                        }
                        None => (arg, None),
                    };
                    let (width, height) = size(op, dims)?;
                    Some(ResizeOp::Fill {
                        width,
                        height,
                        closeness,
                    })
                }
                "width" => Some(ResizeOp::Width(dimension(op, arg)?)),
                "height" => Some(ResizeOp::Height(dimension(op, arg)?)),
                "max" => {
                    let (width, height) = size(op, arg)?;
                    Some(ResizeOp::Max { width, height })
                }
                "min" => {
                    let (width, height) = size(op, arg)?;
                    Some(ResizeOp::Min { width, height })
                }
                "scale" => {
                    let percent = arg.parse::<u32>().ok().filter(|p| (1..=100).contains(p));
                    Some(ResizeOp::Scale(percent.ok_or_else(|| {
                        FilterSpecError::InvalidArgument {
                            op: op.to_string(),
                            value: arg.to_string(),
                        }
                    })?))
                }
                "format" => {
                    format = Some(arg.parse()?);
                    None
                }
                "jpegquality" => {
                    jpeg_quality = Some(quality(op, arg)?);
                    None
                }
                "webpquality" => {
                    webp_quality = Some(quality(op, arg)?);
                    None
                }
                "bgcolor" => {
                    let valid = matches!(arg.len(), 3 | 6) && arg.chars().all(|c| c.is_ascii_hexdigit());
                    if !valid {
                        return Err(FilterSpecError::InvalidArgument {
                            op: op.to_string(),
                            value: arg.to_string(),
                        });
                    }
                    background = Some(arg.to_ascii_lowercase());
                    None
                }
                _ => return Err(FilterSpecError::UnknownOperation(part.to_string())),
            };

            if let Some(op) = parsed_resize {
                if resize.is_some() {
                    return Err(FilterSpecError::MultipleResize(raw.to_string()));
                }
                resize = Some(op);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            resize: resize.unwrap_or(ResizeOp::Original),
            format,
            jpeg_quality,
            webp_quality,
            background,
        })
    }
}

impl TryFrom<String> for FilterSpec {
    type Error = FilterSpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterSpec> for String {
    fn from(spec: FilterSpec) -> Self {
        spec.raw
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn spec(s: &str) -> FilterSpec {
        s.parse().unwrap()
    }

    #[test]
    fn parses_fill_with_format() {
        let s = spec("fill-1920x1080|format-webp");
        assert_eq!(
            s.resize(),
            ResizeOp::Fill {
                width: 1920,
                height: 1080,
                closeness: None
            }
        );
        assert_eq!(s.format(), Some(OutputFormat::Webp));
        assert_eq!(s.as_str(), "fill-1920x1080|format-webp");
        assert_eq!(s.file_suffix(), "fill-1920x1080.format-webp");
    }

    #[test]
    fn parses_fill_closeness() {
        assert_eq!(
            spec("fill-400x300-c50").resize(),
            ResizeOp::Fill {
                width: 400,
                height: 300,
                closeness: Some(50)
            }
        );
    }

    #[test]
    fn parses_modifiers() {
        let s = spec("width-800|jpegquality-70|webpquality-60|bgcolor-FFF");
        assert_eq!(s.resize(), ResizeOp::Width(800));
        assert_eq!(s.jpeg_quality(), Some(70));
        assert_eq!(s.webp_quality(), Some(60));
        assert_eq!(s.background(), Some("fff"));
    }

    #[test]
    fn format_only_keeps_original_size() {
        let s = spec("format-png");
        assert_eq!(s.resize(), ResizeOp::Original);
        assert_eq!(s.output_size(640, 480), (640, 480));
    }

    #[test]
    fn rejects_bad_specs() {
        assert_eq!("".parse::<FilterSpec>(), Err(FilterSpecError::Empty));
        assert!(matches!(
            "blur-5".parse::<FilterSpec>(),
            Err(FilterSpecError::UnknownOperation(_))
        ));
        assert!(matches!(
            "fill-100".parse::<FilterSpec>(),
            Err(FilterSpecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "width-0".parse::<FilterSpec>(),
            Err(FilterSpecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "format-bmp".parse::<FilterSpec>(),
            Err(FilterSpecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "jpegquality-101".parse::<FilterSpec>(),
            Err(FilterSpecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "fill-10x10|width-5".parse::<FilterSpec>(),
            Err(FilterSpecError::MultipleResize(_))
        ));
    }

    #[test]
    fn fill_crops_then_scales_down() {
        let s = spec("fill-1920x1080");
        assert_eq!(s.output_size(4000, 3000), (1920, 1080));
        assert_eq!(s.output_size(3000, 4000), (1920, 1080));
    }

    #[test]
    fn fill_never_upscales() {
        // 1000x1000 cropped to 16:9 is 1000x563, smaller than the target
        assert_eq!(spec("fill-1920x1080").output_size(1000, 1000), (1000, 563));
    }

    #[test]
    fn width_and_height_keep_aspect() {
        assert_eq!(spec("width-1000").output_size(4000, 3000), (1000, 750));
        assert_eq!(spec("width-1000").output_size(800, 600), (800, 600));
        assert_eq!(spec("height-300").output_size(4000, 3000), (400, 300));
    }

    #[test]
    fn max_fits_inside() {
        assert_eq!(spec("max-1000x1000").output_size(4000, 2000), (1000, 500));
        assert_eq!(spec("max-1000x1000").output_size(2000, 4000), (500, 1000));
        assert_eq!(spec("max-1000x1000").output_size(900, 900), (900, 900));
    }

    #[test]
    fn min_covers_box() {
        assert_eq!(spec("min-1000x1000").output_size(4000, 2000), (2000, 1000));
        assert_eq!(spec("min-1000x1000").output_size(800, 4000), (800, 4000));
    }

    #[test]
    fn scale_is_percentage() {
        assert_eq!(spec("scale-50").output_size(801, 600), (401, 300));
        assert_eq!(spec("scale-1").output_size(10, 10), (1, 1));
    }

    #[test]
    fn extension_follows_format() {
        assert_eq!(spec("fill-10x10|format-jpeg").output_extension("a.png"), "jpg");
        assert_eq!(spec("fill-10x10").output_extension("photos/A.JPEG"), "jpg");
        assert_eq!(spec("fill-10x10").output_extension("photos/a.png"), "png");
        assert_eq!(spec("fill-10x10").output_extension("noext"), "jpg");
    }

    #[test]
    fn serde_uses_string_form() {
        let s: FilterSpec = serde_json::from_str("\"max-400x400|format-avif\"").unwrap();
        assert_eq!(s.format(), Some(OutputFormat::Avif));
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"max-400x400|format-avif\"");
        assert!(serde_json::from_str::<FilterSpec>("\"nope-1\"").is_err());
    }
}
