//! Resource metadata and the profile assertion list.
//!
//! `Meta.profile` is an ordered list of canonical profile URLs declaring the
//! conformance claims of a resource. The URLs are opaque tokens here: this
//! module only guarantees idempotent add/remove and that unrelated entries
//! are preserved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata attached to every resource.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Meta {
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profile: Vec<String>,
}

/// A resource that carries [`Meta`] and can assert profile conformance.
pub trait Resource {
    /// The metadata container, `None` when never populated.
    fn meta(&self) -> Option<&Meta>;

    /// Mutable access to the metadata slot.
    fn meta_mut(&mut self) -> &mut Option<Meta>;

    /// Whether the profile assertion list contains the given URL.
    fn has_profile(&self, url: &str) -> bool {
        self.meta()
            .map(|meta| meta.profile.iter().any(|p| p == url))
            .unwrap_or(false)
    }

    /// Idempotently assert conformance to a profile.
    ///
    /// Creates the metadata container on demand; appends the URL unless it is
    /// already present. Pre-existing, unrelated profile entries are preserved.
    fn assert_profile(&mut self, url: &str) {
        let meta = self.meta_mut().get_or_insert_with(Meta::default);

        if meta.profile.iter().any(|p| p == url) {
            return;
        }

        meta.profile.push(url.to_string());
    }

    /// Idempotently retract a profile conformance assertion.
    ///
    /// No-op when the metadata container is absent. When it exists,
    /// `lastUpdated` is touched before the removal so a surviving container is
    /// never structurally empty — even when the URL turns out not to be
    /// present. Removes the first matching entry only.
    fn retract_profile(&mut self, url: &str) {
        let Some(meta) = self.meta_mut().as_mut() else {
            return;
        };

        meta.last_updated = Some(Utc::now());

        if let Some(index) = meta.profile.iter().position(|p| p == url) {
            meta.profile.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_A: &str = "http://example.org/StructureDefinition/profile-a";
    const PROFILE_B: &str = "http://example.org/StructureDefinition/profile-b";

    #[derive(Default)]
    struct Doc {
        meta: Option<Meta>,
    }

    impl Resource for Doc {
        fn meta(&self) -> Option<&Meta> {
            self.meta.as_ref()
        }

        fn meta_mut(&mut self) -> &mut Option<Meta> {
            &mut self.meta
        }
    }

    #[test]
    fn assert_profile_creates_meta_on_demand() {
        let mut doc = Doc::default();
        doc.assert_profile(PROFILE_A);
        assert!(doc.has_profile(PROFILE_A));
        assert_eq!(doc.meta.as_ref().expect("meta").profile, vec![PROFILE_A]);
    }

    #[test]
    fn assert_profile_is_idempotent() {
        let mut doc = Doc::default();
        doc.assert_profile(PROFILE_A);
        doc.assert_profile(PROFILE_A);
        assert_eq!(doc.meta.as_ref().expect("meta").profile, vec![PROFILE_A]);
    }

    #[test]
    fn assert_profile_preserves_unrelated_entries() {
        let mut doc = Doc::default();
        doc.assert_profile(PROFILE_B);
        doc.assert_profile(PROFILE_A);
        assert_eq!(
            doc.meta.as_ref().expect("meta").profile,
            vec![PROFILE_B, PROFILE_A]
        );
    }

    #[test]
    fn retract_profile_without_meta_is_noop() {
        let mut doc = Doc::default();
        doc.retract_profile(PROFILE_A);
        assert!(doc.meta.is_none());
    }

    #[test]
    fn retract_profile_removes_entry_and_touches_last_updated() {
        let mut doc = Doc::default();
        doc.assert_profile(PROFILE_A);
        doc.assert_profile(PROFILE_B);

        doc.retract_profile(PROFILE_A);

        let meta = doc.meta.as_ref().expect("meta");
        assert_eq!(meta.profile, vec![PROFILE_B]);
        assert!(meta.last_updated.is_some());
    }

    #[test]
    fn retract_of_absent_url_still_touches_last_updated() {
        let mut doc = Doc::default();
        doc.assert_profile(PROFILE_A);

        doc.retract_profile(PROFILE_B);

        let meta = doc.meta.as_ref().expect("meta");
        assert_eq!(meta.profile, vec![PROFILE_A]);
        assert!(meta.last_updated.is_some());
    }
}
