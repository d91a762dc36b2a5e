use crate::context::PageMeta;

/// How a single page adjusts the site-wide annotation default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationOverride {
    Inherit,
    ForceOn,
    ForceOff,
}

impl AnnotationOverride {
    /// Read the override a page carries relative to the global default.
    ///
    /// With annotations on site-wide only the `noannotations` marker matters, and with them off
    /// only the `annotations` marker does. A page carrying both markers therefore always
    /// flips the global default.
    pub fn for_page(page: &PageMeta, globally_enabled: bool) -> Self {
        if globally_enabled {
            if page.noannotations {
                AnnotationOverride::ForceOff
            } else {
                AnnotationOverride::Inherit
            }
        } else if page.annotations {
            AnnotationOverride::ForceOn
        } else {
            AnnotationOverride::Inherit
        }
    }

    pub fn resolve(self, globally_enabled: bool) -> bool {
        match self {
            AnnotationOverride::Inherit => globally_enabled,
            AnnotationOverride::ForceOn => true,
            AnnotationOverride::ForceOff => false,
        }
    }
}

/// Whether the annotation widget belongs on the page being rendered.
///
/// Without a current page (indexes, listings) the widget never renders.
pub fn annotations_visible(globally_enabled: bool, page: Option<&PageMeta>) -> bool {
    page.map_or(false, |page| {
        AnnotationOverride::for_page(page, globally_enabled).resolve(globally_enabled)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(annotations: bool, noannotations: bool) -> PageMeta {
        PageMeta {
            annotations,
            noannotations,
            ..PageMeta::new("A page", "/a-page/")
        }
    }

    #[test]
    fn global_on_respects_opt_out() {
        assert!(!annotations_visible(true, Some(&page(false, true))));
        assert!(annotations_visible(true, Some(&page(false, false))));
    }

    #[test]
    fn global_off_respects_opt_in() {
        assert!(annotations_visible(false, Some(&page(true, false))));
        assert!(!annotations_visible(false, Some(&page(false, false))));
    }

    #[test]
    fn markers_only_count_against_the_default() {
        // opting in while already on, or out while already off, changes nothing
        assert!(annotations_visible(true, Some(&page(true, false))));
        assert!(!annotations_visible(false, Some(&page(false, true))));

        assert_eq!(
            AnnotationOverride::for_page(&page(true, true), true),
            AnnotationOverride::ForceOff
        );
        assert_eq!(
            AnnotationOverride::for_page(&page(true, true), false),
            AnnotationOverride::ForceOn
        );
    }

    #[test]
    fn no_page_no_widget() {
        assert!(!annotations_visible(true, None));
        assert!(!annotations_visible(false, None));
    }
}
