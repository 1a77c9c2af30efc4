//! Responsive image size profiles.
//!
//! Provides:
//! - `SizeProfile`: desktop/tablet/mobile filter specs for one kind of image
//! - `SizeProfileRegistry`: named profiles plus the `(component, field)`
//!   mapping that picks one for each image slot
//! - `ProfileOverlay`: TOML document that overrides or extends the built-ins
//!
//! The registry is built once at startup and shared read-only behind an `Arc`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter_spec::FilterSpec;

/// Profile used when nothing else matches.
pub const FALLBACK_PROFILE: &str = "content_image";

/// Component key consulted after the component's own mapping.
pub const DEFAULT_COMPONENT: &str = "default";

/// Field key used as a per-component catch-all.
const GENERIC_FIELD: &str = "image";

/// Filter specs for the three breakpoints the frontend serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeProfile {
    pub desktop: FilterSpec,
    pub tablet: FilterSpec,
    pub mobile: FilterSpec,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("component {component} field {field} maps to unknown profile {profile}")]
    UnknownProfile {
        component: String,
        field: String,
        profile: String,
    },

    #[error("fallback profile {FALLBACK_PROFILE} is not defined")]
    MissingFallback,

    #[error("invalid size profile document: {0}")]
    Parse(String),
}

/// Overrides loaded from a TOML file.
///
/// ```toml
/// [profiles.hero_background]
/// desktop = "fill-2560x1440|format-webp"
/// tablet = "fill-1440x900|format-webp"
/// mobile = "fill-1080x1920|format-webp"
///
/// [components.hero]
/// "slides.image" = "hero_slide"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileOverlay {
    pub profiles: BTreeMap<String, SizeProfile>,
    pub components: BTreeMap<String, BTreeMap<String, String>>,
}

/// Immutable lookup from image slots to size profiles.
#[derive(Debug, Clone)]
pub struct SizeProfileRegistry {
    profiles: BTreeMap<String, SizeProfile>,
    components: BTreeMap<String, BTreeMap<String, String>>,
    fallback: SizeProfile,
}

#[allow(clippy::expect_used)]
fn builtin(spec: &'static str) -> FilterSpec {
    // Literals below are covered by `defaults_are_valid`.
    spec.parse().expect("built-in filter spec")
}

fn webp_fill(desktop: &'static str, tablet: &'static str, mobile: &'static str) -> SizeProfile {
    SizeProfile {
        desktop: builtin(desktop),
        tablet: builtin(tablet),
        mobile: builtin(mobile),
    }
}

impl Default for SizeProfileRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SizeProfileRegistry {
    /// The site's built-in profiles and component mapping.
    pub fn with_defaults() -> Self {
        let fallback = webp_fill(
            "fill-1200x800|format-webp",
            "fill-1000x700|format-webp",
            "fill-700x500|format-webp",
        );
        let mut profiles = BTreeMap::new();
        let standard = [
            (
                "hero_background",
                webp_fill(
                    "fill-1920x1080|format-webp",
                    "fill-1440x900|format-webp",
                    "fill-1080x1920|format-webp",
                ),
            ),
            (
                "hero_slide",
                webp_fill(
                    "fill-1200x480|format-webp",
                    "fill-1000x400|format-webp",
                    "fill-700x280|format-webp",
                ),
            ),
            (
                "hero_slide_full",
                webp_fill(
                    "width-3840|format-webp",
                    "width-2048|format-webp",
                    "width-1080|format-webp",
                ),
            ),
            (
                "studio_section",
                webp_fill(
                    "fill-3000x2000|format-webp",
                    "fill-2000x1500|format-webp",
                    "fill-1500x1000|format-webp",
                ),
            ),
            (
                "media_comparator",
                webp_fill(
                    "fill-1600x1200|format-webp",
                    "fill-1200x900|format-webp",
                    "fill-800x600|format-webp",
                ),
            ),
            (FALLBACK_PROFILE, fallback.clone()),
            (
                "video_poster",
                webp_fill(
                    "fill-1920x1080|format-webp",
                    "fill-1440x900|format-webp",
                    "fill-1080x720|format-webp",
                ),
            ),
        ];
        for (name, profile) in standard {
            profiles.insert(name.to_string(), profile);
        }

        let mapping: &[(&str, &[(&str, &str)])] = &[
            (
                "hero",
                &[
                    ("background_image", "hero_background"),
                    ("slides.image", "hero_slide"),
                    ("slides.full_image", "hero_slide_full"),
                ],
            ),
            ("multi_image_content", &[("images.image", "studio_section")]),
            ("residential_projects", &[("projects.image", "media_comparator")]),
            ("commercial_projects", &[("projects.image", "media_comparator")]),
            ("horizontal_slider", &[("slides.image", "media_comparator")]),
            ("quality_homes", &[("features.image", FALLBACK_PROFILE)]),
            ("dream_home_journey", &[("background_image", "hero_background")]),
            ("fullwidth_image", &[("image", "hero_slide_full")]),
            ("video", &[("poster_image", "video_poster")]),
            (
                "blog_section",
                &[
                    ("blog_featured.image", "media_comparator"),
                    ("blog_post.image", FALLBACK_PROFILE),
                    ("blog_additional.image", FALLBACK_PROFILE),
                ],
            ),
            (DEFAULT_COMPONENT, &[(GENERIC_FIELD, FALLBACK_PROFILE)]),
        ];
        let mut components = BTreeMap::new();
        for (component, fields) in mapping {
            let fields: BTreeMap<String, String> = fields
                .iter()
                .map(|(field, profile)| (field.to_string(), profile.to_string()))
                .collect();
            components.insert(component.to_string(), fields);
        }

        Self {
            profiles,
            components,
            fallback,
        }
    }

    /// Built-in profiles with a TOML overlay applied on top.
    pub fn from_toml_str(source: &str) -> Result<Self, ProfileError> {
        let overlay: ProfileOverlay =
            toml::from_str(source).map_err(|e| ProfileError::Parse(e.to_string()))?;
        let mut registry = Self::with_defaults();
        registry.merge(overlay)?;
        Ok(registry)
    }

    /// Apply an overlay. Entries with the same name replace the existing ones;
    /// the registry is left unchanged if the result would be invalid.
    pub fn merge(&mut self, overlay: ProfileOverlay) -> Result<(), ProfileError> {
        let mut merged = self.clone();
        merged.profiles.extend(overlay.profiles);
        for (component, fields) in overlay.components {
            merged.components.entry(component).or_default().extend(fields);
        }
        merged.validate()?;
        merged.fallback = merged
            .profiles
            .get(FALLBACK_PROFILE)
            .cloned()
            .ok_or(ProfileError::MissingFallback)?;
        *self = merged;
        Ok(())
    }

    /// Check that every mapping points at a defined profile.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !self.profiles.contains_key(FALLBACK_PROFILE) {
            return Err(ProfileError::MissingFallback);
        }
        for (component, fields) in &self.components {
            for (field, profile) in fields {
                if !self.profiles.contains_key(profile) {
                    return Err(ProfileError::UnknownProfile {
                        component: component.clone(),
                        field: field.clone(),
                        profile: profile.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<&SizeProfile> {
        self.profiles.get(name)
    }

    /// Return the number of defined profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the registry has no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Names of all defined profiles, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    /// Name of the profile for an image slot.
    ///
    /// Lookup order: the exact `(component, field_path)` entry, the
    /// component's generic `image` entry, the same two keys under `scope`
    /// (the component type a whole tree was serialized for), the `default`
    /// component, then the fallback profile.
    pub fn profile_name_for<'a>(
        &'a self,
        component: &str,
        field_path: &str,
        scope: Option<&str>,
    ) -> &'a str {
        let mut candidates = vec![(component, field_path), (component, GENERIC_FIELD)];
        if let Some(scope) = scope.filter(|s| *s != component) {
            candidates.push((scope, field_path));
            candidates.push((scope, GENERIC_FIELD));
        }
        candidates.push((DEFAULT_COMPONENT, GENERIC_FIELD));

        candidates
            .into_iter()
            .find_map(|(component, field)| {
                self.components
                    .get(component)
                    .and_then(|fields| fields.get(field))
                    .filter(|name| self.profiles.contains_key(name.as_str()))
            })
            .map_or(FALLBACK_PROFILE, String::as_str)
    }

    /// Profile for an image slot; see [`Self::profile_name_for`].
    pub fn profile_for(&self, component: &str, field_path: &str, scope: Option<&str>) -> &SizeProfile {
        let name = self.profile_name_for(component, field_path, scope);
        self.profiles.get(name).unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let registry = SizeProfileRegistry::with_defaults();
        registry.validate().unwrap();
        assert_eq!(registry.len(), 7);
        assert!(registry.get("video_poster").is_some());
    }

    #[test]
    fn exact_mapping_wins() {
        let registry = SizeProfileRegistry::with_defaults();
        assert_eq!(registry.profile_name_for("hero", "background_image", None), "hero_background");
        assert_eq!(registry.profile_name_for("hero", "slides.full_image", None), "hero_slide_full");
        assert_eq!(
            registry.profile_for("hero", "background_image", None).desktop.as_str(),
            "fill-1920x1080|format-webp"
        );
    }

    #[test]
    fn unknown_slot_uses_fallback() {
        let registry = SizeProfileRegistry::with_defaults();
        assert_eq!(registry.profile_name_for("unknown", "whatever", None), FALLBACK_PROFILE);
        assert_eq!(registry.profile_name_for("hero", "nope", None), FALLBACK_PROFILE);
    }

    #[test]
    fn generic_field_before_scope() {
        let registry = SizeProfileRegistry::from_toml_str(
            r#"
            [components.hero]
            image = "video_poster"
            "#,
        )
        .unwrap();
        assert_eq!(registry.profile_name_for("hero", "nope", Some("blog_section")), "video_poster");
    }

    #[test]
    fn scope_consulted_for_unmapped_component() {
        let registry = SizeProfileRegistry::with_defaults();
        assert_eq!(
            registry.profile_name_for("image", "background_image", Some("hero")),
            "hero_background"
        );
    }

    #[test]
    fn overlay_replaces_and_extends() {
        let registry = SizeProfileRegistry::from_toml_str(
            r#"
            [profiles.hero_background]
            desktop = "fill-2560x1440|format-avif"
            tablet = "fill-1440x900|format-webp"
            mobile = "fill-1080x1920|format-webp"

            [profiles.house_card]
            desktop = "fill-800x600"
            tablet = "fill-600x450"
            mobile = "fill-400x300"

            [components.house_design]
            image = "house_card"
            "#,
        )
        .unwrap();
        assert_eq!(
            registry.profile_for("hero", "background_image", None).desktop.as_str(),
            "fill-2560x1440|format-avif"
        );
        assert_eq!(registry.profile_name_for("house_design", "image", None), "house_card");
        // Built-in mapping for hero slides survives the overlay
        assert_eq!(registry.profile_name_for("hero", "slides.image", None), "hero_slide");
    }

    #[test]
    fn overlay_with_unknown_profile_is_rejected() {
        let err = SizeProfileRegistry::from_toml_str(
            r#"
            [components.hero]
            background_image = "missing"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::UnknownProfile { profile, .. } if profile == "missing"));
    }

    #[test]
    fn overlay_with_bad_spec_is_rejected() {
        let err = SizeProfileRegistry::from_toml_str(
            r#"
            [profiles.broken]
            desktop = "blur-3"
            tablet = "fill-10x10"
            mobile = "fill-10x10"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn failed_merge_leaves_registry_unchanged() {
        let mut registry = SizeProfileRegistry::with_defaults();
        let mut overlay = ProfileOverlay::default();
        overlay
            .components
            .insert("hero".to_string(), BTreeMap::from([("background_image".to_string(), "nope".to_string())]));
        assert!(registry.merge(overlay).is_err());
        assert_eq!(registry.profile_name_for("hero", "background_image", None), "hero_background");
    }
}
