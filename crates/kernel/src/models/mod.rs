//! Records handed over by the persistence layer.

pub mod decimal;
pub mod home_page;
pub mod house_design;
pub mod image;
pub mod page;
pub mod site_settings;
mod store;

pub use decimal::Decimal;
pub use home_page::{HomePageRecord, ServiceBox};
pub use house_design::{BuildLocation, HouseCategory, HouseDesignRecord, HouseDesignsIndexRecord};
pub use image::{ImageAsset, ImageData, ImageId};
pub use page::{HeroRecord, PageId, PageKind, PageRecord, PageSummary, SeoRecord};
pub use site_settings::SiteSettingsRecord;
pub use store::{ContentStore, InMemoryStore, SiteSnapshot};
