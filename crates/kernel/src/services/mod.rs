//! Page-level services.
//!
//! Each service turns one kind of record into the document the frontend
//! fetches, delegating block streams to the tree serializer. Image
//! derivatives come from a `RenditionService`.

pub mod home_page;
pub mod house_designs;
pub mod page;
pub mod rendition;
pub mod site_settings;

pub use home_page::{HomePagePayload, home_page};
pub use house_designs::{HouseDesignsListing, listing};
pub use page::{PagePayload, page};
pub use rendition::{MediaRenditions, Rendition, RenditionError, RenditionService, RetryingRenditions};
pub use site_settings::{SiteSettingsPayload, site_settings};
