//! Shared page body blocks: rich text, buttons, media, layout sections,
//! accordions, tables and card grids.
//!
//! Purely scalar blocks (`html_source`, `space`, `divider`, `lead_text`,
//! `quote`) have no builder here; the generic fallback already keeps every
//! field they carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::common::opt_text;
use crate::content::ListValue;
use crate::content::block::{ContentBlock, lenient, non_empty};
use crate::content::image::ResponsiveImage;
use crate::content::link::ResolvedLink;
use crate::content::registry::{BuildResult, run};
use crate::content::serializer::{BlockContext, SerializedBlock};
use crate::error::SerializeResult;
use crate::models::{ImageId, PageId};

const BUTTON_THEME: &str = "btn-primary";
const BUTTON_SIZE: &str = "btn-md";
const CTA_BACKGROUND: &str = "bg-accent";
const GALLERY_LAYOUT: &str = "slider";
const CARD_COLUMNS: &str = "3";
const COLUMN_WIDTH: &str = "col-lg-12";
const HALF_COLUMN_WIDTH: &str = "col-lg-6";
const IMAGE_ALIGNMENT: &str = "left";

// ============================================================================
// Links
// ============================================================================

/// A multi-target link: internal page, external URL, document or free text
/// (`mailto:`, `tel:`, `#anchor`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HrefValue {
    #[serde(deserialize_with = "lenient::opt_id")]
    page_link: Option<PageId>,
    external_link: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    document_link: Option<u64>,
    free_link: Option<String>,
}

/// First filled target wins: page, external URL, free link, then `"#"`.
///
/// Documents are not part of the content store, so a document-only link
/// resolves to the placeholder.
fn href(ctx: &BlockContext<'_>, value: &HrefValue) -> ResolvedLink {
    if let Some(page) = ctx.page_link(value.page_link) {
        return ResolvedLink {
            url: page.url,
            is_external: false,
        };
    }
    if let Some(url) = non_empty(&value.external_link) {
        return ResolvedLink {
            url: url.trim().to_string(),
            is_external: true,
        };
    }
    if let Some(url) = non_empty(&value.free_link) {
        return ResolvedLink {
            url: url.trim().to_string(),
            is_external: false,
        };
    }
    if let Some(document) = value.document_link {
        debug!(document_id = document, "document links are not resolvable, using placeholder");
    }
    ResolvedLink::none()
}

// ============================================================================
// Text
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentValue {
    content: Option<String>,
    list_style: Option<String>,
    css_class: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContentPayload {
    content: String,
    list_style: String,
    css_class: Option<String>,
}

pub fn build_content(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: ContentValue| {
        Ok(ContentPayload {
            content: ctx.rich_text(value.content.as_deref().unwrap_or_default()),
            list_style: opt_text(&value.list_style).unwrap_or_else(|| "default".to_string()),
            css_class: opt_text(&value.css_class),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeadingValue {
    heading: Option<String>,
    alignment: Option<String>,
    css_class: Option<String>,
}

#[derive(Debug, Serialize)]
struct HeadingPayload {
    heading: String,
    alignment: String,
    css_class: Option<String>,
}

pub fn build_heading(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: HeadingValue| {
        Ok(HeadingPayload {
            heading: ctx.rich_text(value.heading.as_deref().unwrap_or_default()),
            alignment: opt_text(&value.alignment).unwrap_or_else(|| "left".to_string()),
            css_class: opt_text(&value.css_class),
        })
    })
}

// ============================================================================
// Buttons
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ButtonValue {
    #[serde(alias = "button_text")]
    text: Option<String>,
    href: HrefValue,
    theme: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Serialize)]
struct ButtonPayload {
    text: String,
    url: String,
    is_external: bool,
    theme: String,
    size: String,
}

fn button(ctx: &BlockContext<'_>, value: &ButtonValue) -> ButtonPayload {
    let ResolvedLink { url, is_external } = href(ctx, &value.href);
    ButtonPayload {
        text: value.text.clone().unwrap_or_default(),
        url,
        is_external,
        theme: opt_text(&value.theme).unwrap_or_else(|| BUTTON_THEME.to_string()),
        size: opt_text(&value.size).unwrap_or_else(|| BUTTON_SIZE.to_string()),
    }
}

pub fn build_button(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: ButtonValue| Ok(button(ctx, &value)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MultipleButtonsValue {
    buttons: ListValue<ButtonValue>,
    alignment: Option<String>,
}

#[derive(Debug, Serialize)]
struct MultipleButtonsPayload {
    buttons: Vec<ButtonPayload>,
    alignment: String,
}

pub fn build_multiple_buttons(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: MultipleButtonsValue| {
        Ok(MultipleButtonsPayload {
            buttons: value.buttons.iter().map(|b| button(ctx, b)).collect(),
            alignment: opt_text(&value.alignment).unwrap_or_else(|| "left".to_string()),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CtaButtonValue {
    title: Option<String>,
    text: Option<String>,
    button: ButtonValue,
    background: Option<String>,
}

#[derive(Debug, Serialize)]
struct CtaButtonPayload {
    title: Option<String>,
    text: Option<String>,
    button: ButtonPayload,
    background: String,
}

pub fn build_cta_button(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: CtaButtonValue| {
        Ok(CtaButtonPayload {
            title: opt_text(&value.title),
            text: opt_text(&value.text),
            button: button(ctx, &value.button),
            background: opt_text(&value.background).unwrap_or_else(|| CTA_BACKGROUND.to_string()),
        })
    })
}

// ============================================================================
// Media
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageValue {
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    alt_text: Option<String>,
    caption: Option<String>,
    attribution: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImagePayload {
    image: Option<ResponsiveImage>,
    caption: Option<String>,
    attribution: Option<String>,
}

fn image(ctx: &BlockContext<'_>, value: &ImageValue) -> SerializeResult<ImagePayload> {
    Ok(ImagePayload {
        image: ctx.image(value.image, value.alt_text.as_deref(), "image")?,
        caption: opt_text(&value.caption),
        attribution: opt_text(&value.attribution),
    })
}

/// `image` and `fullwidth_image` share one shape; the size profile differs
/// by variant.
pub fn build_image(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: ImageValue| image(ctx, &value))
}

/// Where a video URL is hosted, as the player needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    Youtube,
    Vimeo,
    Html5,
    Unknown,
}

const HTML5_EXTENSIONS: [&str; 4] = [".mp4", ".webm", ".ogg", ".mov"];

/// Classify a video URL by host, then by file extension.
pub fn video_kind(raw: &str) -> VideoKind {
    let host = Url::parse(raw.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase));
    if let Some(host) = host.as_deref() {
        if ["youtube.com", "youtu.be", "youtube-nocookie.com"]
            .iter()
            .any(|domain| host.contains(domain))
        {
            return VideoKind::Youtube;
        }
        if host.contains("vimeo.com") {
            return VideoKind::Vimeo;
        }
    }
    let lowered = raw.to_ascii_lowercase();
    if HTML5_EXTENSIONS.iter().any(|ext| lowered.contains(ext)) {
        return VideoKind::Html5;
    }
    VideoKind::Unknown
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VideoValue {
    video_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    poster_image: Option<ImageId>,
    is_autoplay: Option<bool>,
    caption: Option<String>,
}

#[derive(Debug, Serialize)]
struct VideoPayload {
    video_url: String,
    video_type: VideoKind,
    poster_image: Option<ResponsiveImage>,
    is_autoplay: bool,
    caption: Option<String>,
}

pub fn build_video(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: VideoValue| {
        let video_url = value.video_url.as_deref().map(str::trim).unwrap_or_default();
        Ok(VideoPayload {
            video_type: video_kind(video_url),
            video_url: video_url.to_string(),
            poster_image: ctx.image(value.poster_image, None, "poster_image")?,
            is_autoplay: value.is_autoplay.unwrap_or(false),
            caption: opt_text(&value.caption),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GalleryItemValue {
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    caption: Option<String>,
}

#[derive(Debug, Serialize)]
struct GalleryItemPayload {
    image: ResponsiveImage,
    caption: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GalleryValue {
    title: Option<String>,
    images: ListValue<GalleryItemValue>,
    layout: Option<String>,
}

#[derive(Debug, Serialize)]
struct GalleryPayload {
    title: Option<String>,
    layout: String,
    images: Vec<GalleryItemPayload>,
}

pub fn build_gallery(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: GalleryValue| {
        let mut images = Vec::with_capacity(value.images.len());
        for item in value.images.iter() {
            if let Some(image) = ctx.image(item.image, None, "images.image")? {
                images.push(GalleryItemPayload {
                    image,
                    caption: opt_text(&item.caption),
                });
            }
        }
        Ok(GalleryPayload {
            title: opt_text(&value.title),
            layout: opt_text(&value.layout).unwrap_or_else(|| GALLERY_LAYOUT.to_string()),
            images,
        })
    })
}

// ============================================================================
// Layout sections
// ============================================================================

/// Padding and background choices repeated on every layout section.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct SectionStyle {
    top_padding: Option<String>,
    bottom_padding: Option<String>,
    background: Option<String>,
    css_class: Option<String>,
}

impl SectionStyle {
    fn cleaned(&self) -> Self {
        Self {
            top_padding: opt_text(&self.top_padding),
            bottom_padding: opt_text(&self.bottom_padding),
            background: opt_text(&self.background),
            css_class: opt_text(&self.css_class),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VariableWidthValue {
    #[serde(flatten)]
    style: SectionStyle,
    column_width: Option<String>,
    column_offset: Option<String>,
    content_blocks: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Serialize)]
struct VariableWidthPayload {
    #[serde(flatten)]
    style: SectionStyle,
    column_width: String,
    column_offset: Option<String>,
    content_blocks: Vec<SerializedBlock>,
}

pub fn build_content_with_width(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: VariableWidthValue| {
        Ok(VariableWidthPayload {
            style: value.style.cleaned(),
            column_width: opt_text(&value.column_width).unwrap_or_else(|| COLUMN_WIDTH.to_string()),
            column_offset: opt_text(&value.column_offset),
            content_blocks: ctx.nested(&value.content_blocks.unwrap_or_default())?,
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TwoColumnValue {
    #[serde(flatten)]
    style: SectionStyle,
    left_column_width: Option<String>,
    left_column_offset: Option<String>,
    left_column: Option<Vec<ContentBlock>>,
    right_column_width: Option<String>,
    right_column_offset: Option<String>,
    right_column: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Serialize)]
struct ColumnPayload {
    width: String,
    offset: Option<String>,
    blocks: Vec<SerializedBlock>,
}

#[derive(Debug, Serialize)]
struct TwoColumnPayload {
    #[serde(flatten)]
    style: SectionStyle,
    left_column: ColumnPayload,
    right_column: ColumnPayload,
}

fn column(
    ctx: &BlockContext<'_>,
    width: &Option<String>,
    offset: &Option<String>,
    blocks: Option<Vec<ContentBlock>>,
) -> SerializeResult<ColumnPayload> {
    Ok(ColumnPayload {
        width: opt_text(width).unwrap_or_else(|| HALF_COLUMN_WIDTH.to_string()),
        offset: opt_text(offset),
        blocks: ctx.nested(&blocks.unwrap_or_default())?,
    })
}

pub fn build_two_columns(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: TwoColumnValue| {
        Ok(TwoColumnPayload {
            style: value.style.cleaned(),
            left_column: column(
                ctx,
                &value.left_column_width,
                &value.left_column_offset,
                value.left_column,
            )?,
            right_column: column(
                ctx,
                &value.right_column_width,
                &value.right_column_offset,
                value.right_column,
            )?,
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentWithImageValue {
    #[serde(flatten)]
    style: SectionStyle,
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    alignment: Option<String>,
    content: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Serialize)]
struct ContentWithImagePayload {
    #[serde(flatten)]
    style: SectionStyle,
    image: Option<ResponsiveImage>,
    alignment: String,
    content: Vec<SerializedBlock>,
}

pub fn build_content_with_image(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: ContentWithImageValue| {
        Ok(ContentWithImagePayload {
            style: value.style.cleaned(),
            image: ctx.image(value.image, None, "image")?,
            alignment: opt_text(&value.alignment).unwrap_or_else(|| IMAGE_ALIGNMENT.to_string()),
            content: ctx.nested(&value.content.unwrap_or_default())?,
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AccordionItemValue {
    title: Option<String>,
    content: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Serialize)]
struct AccordionItemPayload {
    title: String,
    content: Vec<SerializedBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AccordionValue {
    items: ListValue<AccordionItemValue>,
}

#[derive(Debug, Serialize)]
struct AccordionPayload {
    items: Vec<AccordionItemPayload>,
}

pub fn build_accordion(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: AccordionValue| {
        let items = value
            .items
            .0
            .into_iter()
            .map(|item| -> SerializeResult<AccordionItemPayload> {
                Ok(AccordionItemPayload {
                    title: item.value.title.unwrap_or_default(),
                    content: ctx.nested(&item.value.content.unwrap_or_default())?,
                })
            })
            .collect::<SerializeResult<Vec<_>>>()?;
        Ok(AccordionPayload { items })
    })
}

// ============================================================================
// Tables and cards
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TableData {
    data: Vec<Vec<Value>>,
    first_row_is_table_header: Option<bool>,
    first_col_is_header: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TableValue {
    table: TableData,
    caption: Option<String>,
    css_class: Option<String>,
}

#[derive(Debug, Serialize)]
struct TablePayload {
    caption: Option<String>,
    css_class: Option<String>,
    first_row_is_header: bool,
    first_col_is_header: bool,
    /// Cells as text; empty cells are `""`.
    rows: Vec<Vec<String>>,
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn build_table(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |_, value: TableValue| {
        Ok(TablePayload {
            caption: opt_text(&value.caption),
            css_class: opt_text(&value.css_class),
            first_row_is_header: value.table.first_row_is_table_header.unwrap_or(false),
            first_col_is_header: value.table.first_col_is_header.unwrap_or(false),
            rows: value
                .table
                .data
                .iter()
                .map(|row| row.iter().map(cell_text).collect())
                .collect(),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CardValue {
    title: Option<String>,
    text: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    link: HrefValue,
}

#[derive(Debug, Serialize)]
struct CardPayload {
    title: String,
    text: Option<String>,
    image: Option<ResponsiveImage>,
    link: ResolvedLink,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CardGridValue {
    top_padding: Option<String>,
    bottom_padding: Option<String>,
    title: Option<String>,
    cards: ListValue<CardValue>,
    columns: Option<String>,
}

#[derive(Debug, Serialize)]
struct CardGridPayload {
    top_padding: Option<String>,
    bottom_padding: Option<String>,
    title: Option<String>,
    columns: String,
    cards: Vec<CardPayload>,
}

pub fn build_card_grid(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: CardGridValue| {
        let mut cards = Vec::with_capacity(value.cards.len());
        for card in value.cards.iter() {
            cards.push(CardPayload {
                title: card.title.clone().unwrap_or_default(),
                text: opt_text(&card.text),
                image: ctx.image(card.image, None, "cards.image")?,
                link: href(ctx, &card.link),
            });
        }
        Ok(CardGridPayload {
            top_padding: opt_text(&value.top_padding),
            bottom_padding: opt_text(&value.bottom_padding),
            title: opt_text(&value.title),
            columns: opt_text(&value.columns).unwrap_or_else(|| CARD_COLUMNS.to_string()),
            cards,
        })
    })
}
