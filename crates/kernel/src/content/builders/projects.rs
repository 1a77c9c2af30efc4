//! `residential_projects` and `commercial_projects`: horizontally scrolling
//! project galleries. Both variants share one payload shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{LinkFields, opt_text, text_or};
use crate::content::ListValue;
use crate::content::block::lenient;
use crate::content::image::ResponsiveImage;
use crate::content::link::ResolvedLink;
use crate::content::registry::{BuildResult, run};
use crate::content::serializer::BlockContext;
use crate::error::SerializeResult;
use crate::models::ImageId;

const RESIDENTIAL_TITLE: &str = "Featured Residential Projects";
const COMMERCIAL_TITLE: &str = "Commercial & Community Projects";
const PROJECT_BUTTON_TEXT: &str = "Learn More";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectsValue {
    title: Option<String>,
    subtitle: Option<String>,
    projects: ListValue<ProjectValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectValue {
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    button_text: Option<String>,
    #[serde(flatten)]
    link: LinkFields,
}

#[derive(Debug, Serialize)]
struct ProjectsPayload {
    title: String,
    subtitle: Option<String>,
    projects: Vec<ProjectPayload>,
}

#[derive(Debug, Serialize)]
struct ProjectPayload {
    /// 1-based position in the list.
    id: usize,
    title: String,
    description: String,
    image: Option<ResponsiveImage>,
    button_text: String,
    link: ResolvedLink,
}

pub fn build_residential(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, v| projects(ctx, v, RESIDENTIAL_TITLE))
}

pub fn build_commercial(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, v| projects(ctx, v, COMMERCIAL_TITLE))
}

fn projects(
    ctx: &BlockContext<'_>,
    value: ProjectsValue,
    default_title: &str,
) -> SerializeResult<ProjectsPayload> {
    let projects = value
        .projects
        .iter()
        .enumerate()
        .map(|(index, project)| {
            Ok(ProjectPayload {
                id: index + 1,
                title: project.title.clone().unwrap_or_default(),
                description: project.description.clone().unwrap_or_default(),
                image: ctx.image(project.image, None, "projects.image")?,
                button_text: text_or(&project.button_text, PROJECT_BUTTON_TEXT),
                link: ctx.link(&project.link.link_ref()),
            })
        })
        .collect::<SerializeResult<Vec<_>>>()?;

    Ok(ProjectsPayload {
        title: text_or(&value.title, default_title),
        subtitle: opt_text(&value.subtitle),
        projects,
    })
}
