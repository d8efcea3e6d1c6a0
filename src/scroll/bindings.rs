//! The declarative scroll/pointer binding table.
//!
//! All five scroll-linked behaviors of the page (hero exit, editorial
//! reveal, editorial parallax, pinned gallery, virtual tour) plus the
//! pointer-driven menu card tilt, resolved once against the validated page
//! model. Each frame, `apply` reads the smoothed scroll position and writes
//! element styles and dish state; `refresh` recomputes every range after a
//! layout or viewport change.

use std::time::Instant;

use super::trigger::{OnceTrigger, ScrollTrigger, Scrub};
use crate::animation::{Channel, EasingFunction, Timeline, Tween};
use crate::input::Viewport;
use crate::options::{ScrollOptions, TiltOptions};
use crate::page::{ElementRef, Page, Property, Rect};
use crate::scene::DishGroup;

/// Total horizontal travel of the gallery track: the off-screen content
/// width plus an overshoot fraction of the viewport.
#[inline]
#[must_use]
pub fn pin_distance(
    track_width: f32,
    viewport_width: f32,
    overshoot: f32,
) -> f32 {
    track_width - viewport_width + viewport_width * overshoot
}

/// Discrete tour scene index for a progress value in [0, 1].
///
/// A step function: `floor(p * n)` clamped so `p = 1.0` stays on the last
/// scene.
#[inline]
#[must_use]
pub fn scene_index(progress: f32, scene_count: usize) -> usize {
    if scene_count == 0 {
        return 0;
    }
    let idx = (progress.clamp(0.0, 1.0) * scene_count as f32) as usize;
    idx.min(scene_count - 1)
}

/// Pointer position relative to a card as percentages in [-0.5, 0.5] per
/// axis (0 at the card center).
#[inline]
#[must_use]
pub fn card_percentages(rect: &Rect, x: f32, y: f32) -> (f32, f32) {
    let x_pct = ((x - rect.left) / rect.width.max(1.0) - 0.5).clamp(-0.5, 0.5);
    let y_pct = ((y - rect.top) / rect.height.max(1.0) - 0.5).clamp(-0.5, 0.5);
    (x_pct, y_pct)
}

/// Tilt rotation targets for a pointer offset: the card leans away from
/// the cursor vertically and toward it horizontally.
#[inline]
#[must_use]
pub fn tilt_rotation(x_pct: f32, y_pct: f32, strength: f32) -> (f32, f32) {
    (y_pct * -strength, x_pct * strength)
}

struct Ranges {
    hero: (f32, f32),
    reveal: f32,
    parallax: (f32, f32),
    gallery: (f32, f32),
    gallery_distance: f32,
    tour: (f32, f32),
}

fn compute_ranges(
    page: &Page,
    viewport: Viewport,
    options: &ScrollOptions,
) -> Ranges {
    let vh = viewport.height_f();
    let vw = viewport.width_f();

    let distance = pin_distance(
        page.gallery_track_width,
        vw,
        options.gallery_overshoot,
    );
    // Engage the pin slightly early so the hand-off is not visible.
    let gallery_start =
        page.gallery_section.rect.top - options.anticipate_pin;

    Ranges {
        hero: (0.0, options.hero_exit_end),
        reveal: page.editorial_text.top - vh * options.reveal_viewport_fraction,
        parallax: (
            page.editorial_image_wrapper.top - vh,
            page.editorial_image_wrapper.bottom(),
        ),
        gallery: (gallery_start, gallery_start + distance),
        gallery_distance: distance,
        tour: (page.tour_section.top, page.tour_section.bottom() - vh),
    }
}

/// Resolved scroll and tilt bindings.
pub struct ScrollBindings {
    options: ScrollOptions,
    tilt: TiltOptions,
    hero_exit: ScrollTrigger,
    reveal: OnceTrigger,
    parallax: ScrollTrigger,
    gallery: ScrollTrigger,
    gallery_distance: f32,
    tour: ScrollTrigger,
    hovered_card: Option<usize>,
}

impl ScrollBindings {
    /// Resolve the binding table against a validated page model.
    ///
    /// Also applies the bindings' initial styles: editorial children start
    /// at their pre-reveal offset and only the first tour scene is visible.
    pub fn resolve(
        page: &mut Page,
        viewport: Viewport,
        options: &ScrollOptions,
        tilt: &TiltOptions,
    ) -> Self {
        let ranges = compute_ranges(page, viewport, options);
        let damping = Scrub::Damped(options.scrub_damping);

        for child in &mut page.editorial_children {
            child.style.opacity = 0.0;
            child.style.translate_y = options.reveal_offset;
        }
        for (i, scene) in page.tour_scenes.iter_mut().enumerate() {
            scene.style.opacity = if i == 0 { 1.0 } else { 0.0 };
        }

        Self {
            options: options.clone(),
            tilt: tilt.clone(),
            hero_exit: ScrollTrigger::new(
                ranges.hero.0,
                ranges.hero.1,
                Scrub::Immediate,
            ),
            reveal: OnceTrigger::new(ranges.reveal),
            parallax: ScrollTrigger::new(
                ranges.parallax.0,
                ranges.parallax.1,
                damping,
            ),
            gallery: ScrollTrigger::new(
                ranges.gallery.0,
                ranges.gallery.1,
                damping,
            ),
            gallery_distance: ranges.gallery_distance,
            tour: ScrollTrigger::new(
                ranges.tour.0,
                ranges.tour.1,
                Scrub::Immediate,
            ),
            hovered_card: None,
        }
    }

    /// Recompute every scroll range after a viewport or layout change.
    pub fn refresh(&mut self, page: &Page, viewport: Viewport) {
        let ranges = compute_ranges(page, viewport, &self.options);
        self.hero_exit.refresh(ranges.hero.0, ranges.hero.1);
        self.reveal.refresh(ranges.reveal);
        self.parallax.refresh(ranges.parallax.0, ranges.parallax.1);
        self.gallery.refresh(ranges.gallery.0, ranges.gallery.1);
        self.gallery_distance = ranges.gallery_distance;
        self.tour.refresh(ranges.tour.0, ranges.tour.1);
    }

    /// Evaluate every scroll binding for this frame.
    ///
    /// `scroll` must be the smoothed position, already advanced this frame.
    pub fn apply(
        &mut self,
        scroll: f32,
        dt: f32,
        now: Instant,
        page: &mut Page,
        dish: &mut DishGroup,
        timeline: &mut Timeline,
    ) {
        // 1. Hero exit: scrubbed dish slide toward (y, z). Ignored while
        // the entrance animation still owns the position.
        let p = self.hero_exit.update(scroll, dt);
        let [target_y, target_z] = self.options.hero_exit_target;
        let _ = dish.scroll_exit(p, target_y, target_z);

        // 2. Editorial reveal: staggered child entrance, played once.
        if self.reveal.update(scroll) {
            self.queue_reveal(page, timeline, now);
        }

        // 3. Editorial parallax: damped percentage offset on the image.
        let p = self.parallax.update(scroll, dt);
        page.apply(
            ElementRef::EditorialImage,
            Property::TranslateYPercent,
            self.options.parallax_percent * p,
        );

        // 4. Gallery: section pinned while the track translates through the
        // full distance. The pin offset follows the raw scroll (a pinned
        // section must track the viewport exactly); the track is damped.
        let pin = (scroll - page.gallery_section.rect.top)
            .clamp(0.0, self.gallery_distance);
        page.apply(ElementRef::GallerySection, Property::TranslateY, pin);
        let p = self.gallery.update(scroll, dt);
        page.apply(
            ElementRef::GalleryTrack,
            Property::TranslateX,
            -self.gallery_distance * p,
        );

        // 5. Virtual tour: hard-cut scene switching, forward and backward.
        let p = self.tour.update(scroll, dt);
        let active = scene_index(p, page.tour_scenes.len());
        for i in 0..page.tour_scenes.len() {
            let opacity = if i == active { 1.0 } else { 0.0 };
            page.apply(ElementRef::TourScene(i), Property::Opacity, opacity);
        }
    }

    fn queue_reveal(
        &self,
        page: &Page,
        timeline: &mut Timeline,
        now: Instant,
    ) {
        let mut tweens = Vec::with_capacity(page.editorial_children.len() * 2);
        for i in 0..page.editorial_children.len() {
            tweens.push(
                Tween::new(
                    Channel::Element(
                        ElementRef::EditorialChild(i),
                        Property::TranslateY,
                    ),
                    self.options.reveal_offset,
                    0.0,
                    self.options.reveal_duration,
                )
                .with_delay(self.options.reveal_stagger * i as f32)
                .with_easing(EasingFunction::QuartOut),
            );
            tweens.push(
                Tween::new(
                    Channel::Element(
                        ElementRef::EditorialChild(i),
                        Property::Opacity,
                    ),
                    0.0,
                    1.0,
                    self.options.reveal_duration,
                )
                .with_delay(self.options.reveal_stagger * i as f32)
                .with_easing(EasingFunction::QuartOut),
            );
        }
        timeline.add_all(tweens, now);
    }

    /// React to a pointer move in document coordinates: tilt the hovered
    /// card toward the cursor, releasing any previously hovered card.
    pub fn pointer_move(
        &mut self,
        doc_x: f32,
        doc_y: f32,
        page: &Page,
        timeline: &mut Timeline,
        now: Instant,
    ) {
        let hit = page.card_at(doc_x, doc_y);

        if self.hovered_card != hit {
            if let Some(previous) = self.hovered_card {
                self.release_card(previous, page, timeline, now);
            }
            self.hovered_card = hit;
        }

        if let Some(i) = hit {
            let Some(card) = page.cards.get(i) else {
                return;
            };
            let (x_pct, y_pct) = card_percentages(&card.rect, doc_x, doc_y);
            let (rot_x, rot_y) =
                tilt_rotation(x_pct, y_pct, self.tilt.strength);
            let style = card.inner.style;
            timeline.add(
                Tween::new(
                    Channel::Element(
                        ElementRef::CardInner(i),
                        Property::RotationX,
                    ),
                    style.rotation_x,
                    rot_x,
                    self.tilt.follow_duration,
                )
                .with_easing(EasingFunction::QuadraticOut),
                now,
            );
            timeline.add(
                Tween::new(
                    Channel::Element(
                        ElementRef::CardInner(i),
                        Property::RotationY,
                    ),
                    style.rotation_y,
                    rot_y,
                    self.tilt.follow_duration,
                )
                .with_easing(EasingFunction::QuadraticOut),
                now,
            );
        }
    }

    /// React to the pointer leaving the window.
    pub fn pointer_leave(
        &mut self,
        page: &Page,
        timeline: &mut Timeline,
        now: Instant,
    ) {
        if let Some(i) = self.hovered_card.take() {
            self.release_card(i, page, timeline, now);
        }
    }

    fn release_card(
        &self,
        index: usize,
        page: &Page,
        timeline: &mut Timeline,
        now: Instant,
    ) {
        let Some(card) = page.cards.get(index) else {
            return;
        };
        let style = card.inner.style;
        for (prop, from) in [
            (Property::RotationX, style.rotation_x),
            (Property::RotationY, style.rotation_y),
        ] {
            timeline.add(
                Tween::new(
                    Channel::Element(ElementRef::CardInner(index), prop),
                    from,
                    0.0,
                    self.tilt.release_duration,
                )
                .with_easing(EasingFunction::TILT_RELEASE),
                now,
            );
        }
    }

    /// Total horizontal travel of the gallery track, as resolved.
    #[inline]
    pub fn gallery_distance(&self) -> f32 {
        self.gallery_distance
    }

    /// The gallery trigger's scroll span, for pin-range checks.
    pub fn gallery_span(&self) -> f32 {
        self.gallery.end() - self.gallery.start()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::page::PageLayout;
    use crate::scene::DishPhase;

    fn test_layout() -> PageLayout {
        PageLayout {
            gallery_section: Rect::new(0.0, 3000.0, 1000.0, 1000.0),
            gallery_track_width: 5000.0,
            tour_section: Rect::new(0.0, 4000.0, 1000.0, 5000.0),
            content_height: 12_000.0,
            ..PageLayout::default()
        }
    }

    fn setup() -> (Page, ScrollBindings) {
        let mut page = Page::new(test_layout()).unwrap();
        let bindings = ScrollBindings::resolve(
            &mut page,
            Viewport::new(1000, 1000),
            &ScrollOptions::default(),
            &TiltOptions::default(),
        );
        (page, bindings)
    }

    #[test]
    fn gallery_distance_is_deterministic() {
        assert_eq!(pin_distance(5000.0, 1000.0, 0.2), 4200.0);

        let (_, bindings) = setup();
        assert_eq!(bindings.gallery_distance(), 4200.0);
        // The trigger spans exactly the travel distance.
        assert_eq!(bindings.gallery_span(), 4200.0);
    }

    #[test]
    fn tour_index_is_a_clamped_step_function() {
        assert_eq!(scene_index(0.0, 5), 0);
        assert_eq!(scene_index(0.45, 5), 2);
        assert_eq!(scene_index(0.999, 5), 4);
        assert_eq!(scene_index(1.0, 5), 4);
    }

    #[test]
    fn exactly_one_tour_scene_is_visible() {
        let (mut page, mut bindings) = setup();
        let mut dish = DishGroup::new();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        // Tour range is [4000, 8000]; land in the middle of scene 3.
        for scroll in [0.0, 4000.0, 6100.0, 7999.0, 9000.0] {
            bindings.apply(
                scroll,
                1.0 / 60.0,
                now,
                &mut page,
                &mut dish,
                &mut timeline,
            );
            let visible = page
                .tour_scenes
                .iter()
                .filter(|s| s.style.opacity == 1.0)
                .count();
            assert_eq!(visible, 1, "at scroll {scroll}");
        }
    }

    #[test]
    fn tour_switches_backward_too() {
        let (mut page, mut bindings) = setup();
        let mut dish = DishGroup::new();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        let scene_at = |page: &Page| {
            page.tour_scenes
                .iter()
                .position(|s| s.style.opacity == 1.0)
                .unwrap()
        };

        bindings.apply(7900.0, 0.016, now, &mut page, &mut dish, &mut timeline);
        assert_eq!(scene_at(&page), 4);
        bindings.apply(4100.0, 0.016, now, &mut page, &mut dish, &mut timeline);
        assert_eq!(scene_at(&page), 0);
    }

    #[test]
    fn hero_exit_waits_for_the_entrance() {
        let (mut page, mut bindings) = setup();
        let mut dish = DishGroup::new();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        bindings.apply(500.0, 0.016, now, &mut page, &mut dish, &mut timeline);
        assert_eq!(dish.position.y, 0.0, "moved during entrance");

        dish.finish_entrance();
        bindings.apply(500.0, 0.016, now, &mut page, &mut dish, &mut timeline);
        assert_eq!(dish.position.y, -2.5);
        assert_eq!(dish.position.z, -2.5);
        assert_eq!(dish.phase, DishPhase::ScrollDriven);
    }

    #[test]
    fn reveal_fires_once_and_staggers_all_children() {
        let (mut page, mut bindings) = setup();
        let mut dish = DishGroup::new();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        // Threshold: text top 1160 - 750 = 410.
        bindings.apply(100.0, 0.016, now, &mut page, &mut dish, &mut timeline);
        assert!(!timeline.is_animating());

        bindings.apply(500.0, 0.016, now, &mut page, &mut dish, &mut timeline);
        assert!(timeline.is_animating());

        // Two tweens per child, all running once the last stagger elapses.
        let _ = timeline.update(now + Duration::from_millis(900));
        assert_eq!(timeline.samples().len(), page.editorial_children.len() * 2);

        // Crossing again must not re-queue.
        let mut second = Timeline::new();
        bindings.apply(600.0, 0.016, now, &mut page, &mut dish, &mut second);
        assert!(!second.is_animating());
    }

    #[test]
    fn parallax_maps_progress_to_percent_offset() {
        let (mut page, mut bindings) = setup();
        let mut dish = DishGroup::new();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        // Let the damped scrub settle at the end of the wrapper range.
        for _ in 0..600 {
            bindings.apply(
                2500.0,
                1.0 / 60.0,
                now,
                &mut page,
                &mut dish,
                &mut timeline,
            );
        }
        let offset = page.editorial_image.style.translate_y_percent;
        assert!(offset > 19.0 && offset <= 20.0, "offset {offset}");
    }

    #[test]
    fn gallery_pins_the_section_and_drives_the_track() {
        let (mut page, mut bindings) = setup();
        let mut dish = DishGroup::new();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        // Scroll deep into the pin range and let the damping settle.
        for _ in 0..900 {
            bindings.apply(
                7200.0, // section top 3000 + distance 4200
                1.0 / 60.0,
                now,
                &mut page,
                &mut dish,
                &mut timeline,
            );
        }
        assert_eq!(page.gallery_section.style.translate_y, 4200.0);
        let x = page.gallery_track.style.translate_x;
        assert!(x < -4150.0 && x >= -4200.0, "track at {x}");
    }

    #[test]
    fn tilt_center_is_flat_and_corner_matches_the_mapping() {
        assert_eq!(tilt_rotation(0.0, 0.0, 15.0), (0.0, 0.0));
        assert_eq!(tilt_rotation(-0.5, -0.5, 15.0), (7.5, -7.5));
    }

    #[test]
    fn hovering_a_card_tweens_its_rotation() {
        let (page, mut bindings) = setup();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        // Top-left corner of card 0 (rect 80,7560 340x480).
        bindings.pointer_move(80.0, 7560.0, &page, &mut timeline, now);
        assert!(timeline.is_animating());

        let _ = timeline.update(now + Duration::from_secs(1));
        let rx = timeline
            .samples()
            .iter()
            .find(|(c, _)| {
                *c == Channel::Element(
                    ElementRef::CardInner(0),
                    Property::RotationX,
                )
            })
            .map(|(_, v)| *v)
            .unwrap();
        assert!((rx - 7.5).abs() < 1e-4);
    }

    #[test]
    fn leaving_a_card_springs_back_to_rest() {
        let (mut page, mut bindings) = setup();
        let mut timeline = Timeline::new();
        let now = Instant::now();

        bindings.pointer_move(250.0, 7800.0, &page, &mut timeline, now);
        // Simulate the follow having moved the card.
        page.apply(
            ElementRef::CardInner(0),
            Property::RotationX,
            -5.0,
        );

        bindings.pointer_leave(&page, &mut timeline, now);
        let _ = timeline.update(now + Duration::from_secs(2));
        let rx = timeline
            .samples()
            .iter()
            .find(|(c, _)| {
                *c == Channel::Element(
                    ElementRef::CardInner(0),
                    Property::RotationX,
                )
            })
            .map(|(_, v)| *v);
        assert_eq!(rx, Some(0.0));
    }

    #[test]
    fn refresh_recomputes_the_gallery_distance() {
        let (mut page, mut bindings) = setup();
        page.gallery_track_width = 7000.0;
        bindings.refresh(&page, Viewport::new(1000, 1000));
        assert_eq!(bindings.gallery_distance(), 6200.0);
    }

    #[test]
    fn resolve_applies_initial_reveal_and_tour_styles() {
        let (page, _) = setup();
        for child in &page.editorial_children {
            assert_eq!(child.style.opacity, 0.0);
            assert_eq!(child.style.translate_y, 50.0);
        }
        assert_eq!(page.tour_scenes[0].style.opacity, 1.0);
        assert!(page.tour_scenes[1..]
            .iter()
            .all(|s| s.style.opacity == 0.0));
    }
}
