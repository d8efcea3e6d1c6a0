//! The page document model.
//!
//! The animated surfaces of the experience (loader overlay, hero title,
//! editorial block, gallery, virtual tour, menu cards) are an explicit
//! layout: element rectangles in document coordinates plus a style slot per
//! element. Scroll and tween bindings resolve against this
//! model once at startup, and a missing element is a configuration error,
//! never a silent no-op.

use serde::{Deserialize, Serialize};

use crate::error::PlumeError;

/// Axis-aligned rectangle in document coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge, measured from the document top.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a rect from its edges and size.
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Whether a document-space point lies inside the rect.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Animatable visual properties of a page element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Horizontal translation in document units.
    pub translate_x: f32,
    /// Vertical translation in document units.
    pub translate_y: f32,
    /// Vertical translation as a percentage of the element's own height.
    pub translate_y_percent: f32,
    /// Tilt around the horizontal axis, degrees.
    pub rotation_x: f32,
    /// Tilt around the vertical axis, degrees.
    pub rotation_y: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            translate_y_percent: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
        }
    }
}

/// A styled page element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Layout rectangle in document coordinates.
    pub rect: Rect,
    /// Current animated style.
    pub style: Style,
}

impl Element {
    fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            style: Style::default(),
        }
    }
}

/// A menu card: a hit-test rect plus the inner element that tilts.
#[derive(Debug, Clone)]
pub struct MenuCard {
    /// Card bounds used for pointer hit-testing and tilt percentages.
    pub rect: Rect,
    /// The inner element whose rotation animates.
    pub inner: Element,
}

/// Stable reference to an animatable element in the page model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// The loading overlay.
    Loader,
    /// The hero title.
    HeroTitle,
    /// One child of the editorial text block.
    EditorialChild(usize),
    /// The parallax image inside its wrapper.
    EditorialImage,
    /// The horizontally-scrolling gallery track.
    GalleryTrack,
    /// The gallery section itself (moved while pinned).
    GallerySection,
    /// One scene of the virtual tour.
    TourScene(usize),
    /// The inner tilt element of one menu card.
    CardInner(usize),
}

/// Animatable property of a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// [`Style::opacity`]
    Opacity,
    /// [`Style::translate_x`]
    TranslateX,
    /// [`Style::translate_y`]
    TranslateY,
    /// [`Style::translate_y_percent`]
    TranslateYPercent,
    /// [`Style::rotation_x`]
    RotationX,
    /// [`Style::rotation_y`]
    RotationY,
}

/// Declarative page layout: every rect and count the bindings resolve
/// against. Loadable from TOML; the default is a representative single-page
/// layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Loader overlay rect.
    pub loader: Rect,
    /// Hero title rect.
    pub hero_title: Rect,
    /// Editorial text block rect.
    pub editorial_text: Rect,
    /// Rects of the text block's children (revealed with a stagger).
    pub editorial_children: Vec<Rect>,
    /// Wrapper rect of the parallax image.
    pub editorial_image_wrapper: Rect,
    /// Gallery section rect.
    pub gallery_section: Rect,
    /// Total content width of the gallery track.
    pub gallery_track_width: f32,
    /// Virtual tour section rect.
    pub tour_section: Rect,
    /// Number of tour scenes.
    pub tour_scene_count: usize,
    /// Menu card rects (zero or more).
    pub cards: Vec<Rect>,
    /// Total scrollable document height.
    pub content_height: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        let child = |i: f32| Rect::new(140.0, 1180.0 + i * 110.0, 1000.0, 90.0);
        Self {
            loader: Rect::new(0.0, 0.0, 1280.0, 800.0),
            hero_title: Rect::new(140.0, 320.0, 1000.0, 160.0),
            editorial_text: Rect::new(140.0, 1160.0, 1000.0, 460.0),
            editorial_children: vec![child(0.0), child(1.0), child(2.0), child(3.0)],
            editorial_image_wrapper: Rect::new(0.0, 1800.0, 1280.0, 700.0),
            gallery_section: Rect::new(0.0, 2600.0, 1280.0, 800.0),
            gallery_track_width: 5000.0,
            tour_section: Rect::new(0.0, 3400.0, 1280.0, 4000.0),
            tour_scene_count: 5,
            cards: vec![
                Rect::new(80.0, 7560.0, 340.0, 480.0),
                Rect::new(470.0, 7560.0, 340.0, 480.0),
                Rect::new(860.0, 7560.0, 340.0, 480.0),
            ],
            content_height: 8400.0,
        }
    }
}

impl PageLayout {
    /// Load a layout from a TOML file. Missing fields use the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PlumeError::Io`] on read failure or
    /// [`PlumeError::OptionsParse`] on malformed TOML.
    pub fn load(path: &std::path::Path) -> Result<Self, PlumeError> {
        let content = std::fs::read_to_string(path).map_err(PlumeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| PlumeError::OptionsParse(e.to_string()))
    }
}

/// The live page model: resolved elements with animatable styles.
#[derive(Debug)]
pub struct Page {
    /// Loader overlay; `None` once its fade-out completes.
    pub loader: Option<Element>,
    /// Hero title (starts invisible, faded in by the intro).
    pub hero_title: Element,
    /// Editorial text block bounds.
    pub editorial_text: Rect,
    /// The block's children.
    pub editorial_children: Vec<Element>,
    /// Parallax image wrapper bounds.
    pub editorial_image_wrapper: Rect,
    /// The parallax image.
    pub editorial_image: Element,
    /// Gallery section (translated while pinned).
    pub gallery_section: Element,
    /// Gallery track (translated horizontally).
    pub gallery_track: Element,
    /// Content width of the gallery track.
    pub gallery_track_width: f32,
    /// Virtual tour section bounds.
    pub tour_section: Rect,
    /// Tour scenes; exactly one is visible at a time.
    pub tour_scenes: Vec<Element>,
    /// Menu cards.
    pub cards: Vec<MenuCard>,
    /// Total scrollable document height.
    pub content_height: f32,
}

impl Page {
    /// Resolve a layout into a live page model.
    ///
    /// # Errors
    ///
    /// Returns [`PlumeError::MissingElement`] when a required element is
    /// absent (empty child list, zero tour scenes, zero-width track, or a
    /// content height shorter than the sections it must contain).
    pub fn new(layout: PageLayout) -> Result<Self, PlumeError> {
        if layout.editorial_children.is_empty() {
            return Err(PlumeError::MissingElement("editorial-text children"));
        }
        if layout.tour_scene_count == 0 {
            return Err(PlumeError::MissingElement("tour-scene"));
        }
        if layout.gallery_track_width <= 0.0 {
            return Err(PlumeError::MissingElement("gallery-track"));
        }
        if layout.content_height < layout.tour_section.bottom() {
            return Err(PlumeError::MissingElement("content height"));
        }

        let mut hero_title = Element::from_rect(layout.hero_title);
        hero_title.style.opacity = 0.0; // faded in by the intro

        let track_rect = Rect::new(
            0.0,
            layout.gallery_section.top,
            layout.gallery_track_width,
            layout.gallery_section.height,
        );

        Ok(Self {
            loader: Some(Element::from_rect(layout.loader)),
            hero_title,
            editorial_text: layout.editorial_text,
            editorial_children: layout
                .editorial_children
                .into_iter()
                .map(Element::from_rect)
                .collect(),
            editorial_image_wrapper: layout.editorial_image_wrapper,
            editorial_image: Element::from_rect(layout.editorial_image_wrapper),
            gallery_section: Element::from_rect(layout.gallery_section),
            gallery_track: Element::from_rect(track_rect),
            gallery_track_width: layout.gallery_track_width,
            tour_section: layout.tour_section,
            tour_scenes: (0..layout.tour_scene_count)
                .map(|_| Element::from_rect(layout.tour_section))
                .collect(),
            cards: layout
                .cards
                .into_iter()
                .map(|rect| MenuCard {
                    rect,
                    inner: Element::from_rect(rect),
                })
                .collect(),
            content_height: layout.content_height,
        })
    }

    /// Mutable style slot for an element, `None` if the element is gone
    /// (removed loader) or the index is out of range.
    pub fn style_mut(&mut self, element: ElementRef) -> Option<&mut Style> {
        match element {
            ElementRef::Loader => {
                self.loader.as_mut().map(|e| &mut e.style)
            }
            ElementRef::HeroTitle => Some(&mut self.hero_title.style),
            ElementRef::EditorialChild(i) => {
                self.editorial_children.get_mut(i).map(|e| &mut e.style)
            }
            ElementRef::EditorialImage => {
                Some(&mut self.editorial_image.style)
            }
            ElementRef::GalleryTrack => Some(&mut self.gallery_track.style),
            ElementRef::GallerySection => {
                Some(&mut self.gallery_section.style)
            }
            ElementRef::TourScene(i) => {
                self.tour_scenes.get_mut(i).map(|e| &mut e.style)
            }
            ElementRef::CardInner(i) => {
                self.cards.get_mut(i).map(|c| &mut c.inner.style)
            }
        }
    }

    /// Write one animated property value to an element's style slot.
    pub fn apply(&mut self, element: ElementRef, prop: Property, value: f32) {
        if let Some(style) = self.style_mut(element) {
            match prop {
                Property::Opacity => style.opacity = value,
                Property::TranslateX => style.translate_x = value,
                Property::TranslateY => style.translate_y = value,
                Property::TranslateYPercent => {
                    style.translate_y_percent = value;
                }
                Property::RotationX => style.rotation_x = value,
                Property::RotationY => style.rotation_y = value,
            }
        }
    }

    /// Remove the loader overlay from the document. Called only after its
    /// fade-out completes.
    pub fn remove_loader(&mut self) {
        self.loader = None;
    }

    /// Index of the card under a document-space point, if any.
    pub fn card_at(&self, x: f32, y: f32) -> Option<usize> {
        self.cards.iter().position(|c| c.rect.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_resolves() {
        let page = Page::new(PageLayout::default()).unwrap();
        assert_eq!(page.tour_scenes.len(), 5);
        assert_eq!(page.editorial_children.len(), 4);
        assert_eq!(page.hero_title.style.opacity, 0.0);
        assert!(page.loader.is_some());
    }

    #[test]
    fn empty_tour_is_a_configuration_error() {
        let layout = PageLayout {
            tour_scene_count: 0,
            ..PageLayout::default()
        };
        match Page::new(layout) {
            Err(PlumeError::MissingElement(name)) => {
                assert_eq!(name, "tour-scene");
            }
            other => panic!("expected MissingElement, got {other:?}"),
        }
    }

    #[test]
    fn zero_width_track_is_a_configuration_error() {
        let layout = PageLayout {
            gallery_track_width: 0.0,
            ..PageLayout::default()
        };
        assert!(matches!(
            Page::new(layout),
            Err(PlumeError::MissingElement("gallery-track"))
        ));
    }

    #[test]
    fn loader_removal_drops_its_style_slot() {
        let mut page = Page::new(PageLayout::default()).unwrap();
        assert!(page.style_mut(ElementRef::Loader).is_some());
        page.remove_loader();
        assert!(page.style_mut(ElementRef::Loader).is_none());
        // Writes to the removed loader are dropped, not panics.
        page.apply(ElementRef::Loader, Property::Opacity, 0.5);
    }

    #[test]
    fn card_hit_testing_uses_document_coordinates() {
        let page = Page::new(PageLayout::default()).unwrap();
        assert_eq!(page.card_at(250.0, 7800.0), Some(0));
        assert_eq!(page.card_at(640.0, 7800.0), Some(1));
        assert_eq!(page.card_at(640.0, 100.0), None);
    }

    #[test]
    fn layout_round_trips_through_toml() {
        let layout = PageLayout::default();
        let toml_str = toml::to_string_pretty(&layout).unwrap();
        let parsed: PageLayout = toml::from_str(&toml_str).unwrap();
        assert_eq!(layout, parsed);
    }
}
