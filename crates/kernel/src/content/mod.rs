//! Content block serialization.
//!
//! This module provides:
//! - ContentBlock / ListValue: stored stream and list shapes
//! - VariantRegistry: per-variant payload builders, one registry for page
//!   bodies and one for house design content
//! - TreeSerializer: recursive `{type, id, value}` serialization
//! - SizeProfileRegistry: responsive image profiles per component field
//! - FilterSpec: parsed rendition specification strings
//! - Link resolution and rich text expansion

pub mod block;
pub mod builders;
pub mod filter_spec;
pub mod image;
pub mod link;
pub mod registry;
pub mod rich_text;
pub mod serializer;
pub mod size_profile;

pub use block::{ContentBlock, ListItem, ListValue};
pub use filter_spec::{FilterSpec, FilterSpecError, OutputFormat, ResizeOp};
pub use image::ResponsiveImage;
pub use link::{LinkRef, ResolvedLink};
pub use registry::{HOUSE_DESIGN_SCOPE, VariantDefinition, VariantRegistry};
pub use serializer::{BlockContext, PageLink, SerializedBlock, SerializerSettings, TreeSerializer};
pub use size_profile::{SizeProfile, SizeProfileRegistry};
