//! Section visibility tracking.
//!
//! A section counts as visible while its container overlaps a vertical band
//! of the viewport biased toward the upper third. The host measures
//! container geometry and reports it here; the observer only decides
//! membership in the band.

/// Vertical viewport band, expressed as fractional insets from the top and
/// bottom edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    pub top_inset: f32,
    pub bottom_inset: f32,
}

impl Default for ViewportBand {
    /// The highlight band: top 35% and bottom 60% of the viewport are
    /// excluded, leaving a narrow strip just above the vertical center.
    fn default() -> Self {
        Self {
            top_inset: 0.35,
            bottom_inset: 0.60,
        }
    }
}

impl ViewportBand {
    /// Whether a container rect overlaps the band for the given viewport
    /// height.
    pub fn intersects(&self, viewport_height: f32, rect: SectionRect) -> bool {
        let band_top = viewport_height * self.top_inset;
        let band_bottom = viewport_height * (1.0 - self.bottom_inset);

        rect.top < band_bottom && rect.bottom > band_top
    }
}

/// Measured position of a section container, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f32,
    pub bottom: f32,
}

/// One watched section container.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionWatch {
    pub container_id: String,
    pub visible: bool,
}

/// Tracks which of the active route's section containers sit inside the
/// highlight band. Targets are replaced wholesale when the route changes.
#[derive(Debug, Default)]
pub struct SectionObserver {
    band: ViewportBand,
    watches: Vec<SectionWatch>,
}

impl SectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_band(band: ViewportBand) -> Self {
        Self {
            band,
            watches: Vec::new(),
        }
    }

    /// Replace the watched containers. All targets start out not visible
    /// until geometry is reported.
    pub fn retarget(&mut self, container_ids: impl IntoIterator<Item = String>) {
        self.watches = container_ids
            .into_iter()
            .map(|container_id| SectionWatch {
                container_id,
                visible: false,
            })
            .collect();
    }

    pub fn is_watching(&self, container_id: &str) -> bool {
        self.watches.iter().any(|w| w.container_id == container_id)
    }

    /// Report measured geometry for one container. Returns the new
    /// visibility when the container is watched and its state changed.
    pub fn update(
        &mut self,
        container_id: &str,
        viewport_height: f32,
        rect: SectionRect,
    ) -> Option<bool> {
        let watch = self
            .watches
            .iter_mut()
            .find(|w| w.container_id == container_id)?;

        let visible = self.band.intersects(viewport_height, rect);
        if visible == watch.visible {
            return None;
        }

        watch.visible = visible;
        Some(visible)
    }

    /// Container ids currently inside the band, in watch order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.watches
            .iter()
            .filter(|w| w.visible)
            .map(|w| w.container_id.as_str())
    }

    pub fn watches(&self) -> &[SectionWatch] {
        &self.watches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f32 = 1000.0;

    // Default band on a 1000px viewport: [350, 400].

    #[test]
    fn band_excludes_top_and_bottom_margins() {
        let band = ViewportBand::default();

        // Entirely above the band.
        assert!(!band.intersects(VH, SectionRect { top: 0.0, bottom: 340.0 }));
        // Entirely below the band.
        assert!(!band.intersects(VH, SectionRect { top: 410.0, bottom: 900.0 }));
        // Straddles the band's top edge.
        assert!(band.intersects(VH, SectionRect { top: 300.0, bottom: 360.0 }));
        // Covers the whole band.
        assert!(band.intersects(VH, SectionRect { top: 100.0, bottom: 900.0 }));
    }

    #[test]
    fn retarget_resets_visibility() {
        let mut observer = SectionObserver::new();
        observer.retarget(vec!["setup-container".to_string()]);
        observer.update(
            "setup-container",
            VH,
            SectionRect { top: 300.0, bottom: 500.0 },
        );
        assert_eq!(observer.visible().count(), 1);

        observer.retarget(vec!["usage-container".to_string()]);

        assert!(!observer.is_watching("setup-container"));
        assert_eq!(observer.visible().count(), 0);
    }

    #[test]
    fn update_reports_only_state_changes() {
        let mut observer = SectionObserver::new();
        observer.retarget(vec!["setup-container".to_string()]);

        let inside = SectionRect { top: 360.0, bottom: 390.0 };
        let outside = SectionRect { top: 500.0, bottom: 700.0 };

        assert_eq!(observer.update("setup-container", VH, inside), Some(true));
        assert_eq!(observer.update("setup-container", VH, inside), None);
        assert_eq!(observer.update("setup-container", VH, outside), Some(false));
        // Unwatched containers are ignored.
        assert_eq!(observer.update("ghost-container", VH, inside), None);
    }
}
