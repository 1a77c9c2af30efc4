//! `blog_section`: one featured post beside a short list of posts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::common::{CTA_BUTTON_TEXT, CtaValue, LinkFields, text_or};
use crate::content::ListValue;
use crate::content::block::lenient;
use crate::content::image::ResponsiveImage;
use crate::content::link::ResolvedLink;
use crate::content::registry::{BuildResult, run};
use crate::content::serializer::BlockContext;
use crate::error::SerializeResult;
use crate::models::ImageId;

const SECTION_TITLE: &str = "Design and building tips from our blog";
const POST_DATE: &str = "14 Oct, 2025";
const POST_CATEGORY: &str = "Design Tips";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BlogSectionValue {
    section_title: Option<String>,
    featured_post: Option<PostValue>,
    sidebar_posts: ListValue<PostValue>,
    cta: Option<CtaValue>,
}

/// Shared by featured and sidebar posts; sidebar posts never carry the
/// `additional_*` fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PostValue {
    title: Option<String>,
    date: Option<String>,
    category: Option<String>,
    excerpt: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    additional_text: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    additional_image: Option<ImageId>,
    #[serde(flatten)]
    link: LinkFields,
}

#[derive(Debug, Serialize)]
struct BlogSectionPayload {
    section_title: String,
    posts: Vec<PostPayload>,
    cta: Option<SectionCta>,
}

#[derive(Debug, Serialize)]
struct PostPayload {
    id: u32,
    title: String,
    date: String,
    category: String,
    excerpt: String,
    #[serde(rename = "imageSrc")]
    image_src: String,
    #[serde(rename = "imageAlt")]
    image_alt: String,
    image: Option<ResponsiveImage>,
    link: String,
    is_external: bool,
    featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_image: Option<AdditionalImage>,
}

#[derive(Debug, Serialize)]
struct AdditionalImage {
    src: String,
    alt: String,
}

#[derive(Debug, Serialize)]
struct SectionCta {
    text: String,
    link: String,
    is_external: bool,
}

/// Stable numeric id for a post, derived from its title and date.
///
/// Posts have no stored identity of their own; hashing keeps the id
/// identical across requests and processes.
pub fn post_id(title: &str, date: &str) -> u32 {
    let digest = Sha256::digest(format!("{title}|{date}").as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) & 0x7fff_ffff
}

pub fn build(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, blog_section)
}

fn post(
    ctx: &BlockContext<'_>,
    value: &PostValue,
    featured: bool,
) -> SerializeResult<PostPayload> {
    let title = value.title.clone().unwrap_or_default();
    let date = text_or(&value.date, POST_DATE);
    let field = if featured { "blog_featured.image" } else { "blog_post.image" };
    let image = ctx.image(value.image, None, field)?;
    let ResolvedLink { url, is_external } = ctx.link(&value.link.link_ref());

    let (additional_text, additional_image) = if featured {
        let text = value
            .additional_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let image = ctx
            .image(value.additional_image, None, "blog_additional.image")?
            .map(|img| AdditionalImage {
                src: img.src,
                alt: img.alt,
            });
        (text, image)
    } else {
        (None, None)
    };

    Ok(PostPayload {
        id: post_id(&title, &date),
        image_src: image.as_ref().map(|img| img.src.clone()).unwrap_or_default(),
        image_alt: image
            .as_ref()
            .map_or_else(|| title.clone(), |img| img.alt.clone()),
        image,
        category: text_or(&value.category, POST_CATEGORY),
        excerpt: value.excerpt.clone().unwrap_or_default(),
        title,
        date,
        link: url,
        is_external,
        featured,
        additional_text,
        additional_image,
    })
}

fn blog_section(ctx: &BlockContext<'_>, value: BlogSectionValue) -> SerializeResult<BlogSectionPayload> {
    let mut posts = Vec::with_capacity(value.sidebar_posts.len() + 1);
    if let Some(featured) = &value.featured_post {
        posts.push(post(ctx, featured, true)?);
    }
    for sidebar in value.sidebar_posts.iter() {
        posts.push(post(ctx, sidebar, false)?);
    }

    let cta = value.cta.as_ref().filter(|c| !c.is_blank()).map(|c| {
        let ResolvedLink { url, is_external } = ctx.link(&c.link.link_ref());
        SectionCta {
            text: text_or(&c.button_text, CTA_BUTTON_TEXT),
            link: url,
            is_external,
        }
    });

    Ok(BlogSectionPayload {
        section_title: text_or(&value.section_title, SECTION_TITLE),
        posts,
        cta,
    })
}
