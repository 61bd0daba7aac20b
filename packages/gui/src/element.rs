//! Element state block and the polymorphic element trait.


use crate::{
    event::{
        MouseButton,
        KeyCode,
    },
    set::ElementId,
};
use std::fmt::Debug;
use vek::*;


// ==== common state block ====

/// State every GUI element carries.
///
/// Embed one of these in a concrete element and hand it out through
/// `GuiElement::common`/`common_mut`; all the trait's provided accessors
/// route through it. A bare `ElementCommon` is itself a minimal element
/// with entirely default behavior.
#[derive(Debug, Clone)]
pub struct ElementCommon {
    position: Vec2<i32>,
    dimensions: Extent2<i32>,
    visible: bool,
    enabled: bool,
    focused: bool,
    next_focusable: Option<ElementId>,
}

impl ElementCommon {
    /// Element at the origin with zero size, all flags false, no focus
    /// successor.
    pub fn new() -> Self {
        ElementCommon {
            position: Vec2::new(0, 0),
            dimensions: Extent2::new(0, 0),
            visible: false,
            enabled: false,
            focused: false,
            next_focusable: None,
        }
    }

    /// Element with the given bounds. Flags still default to false and
    /// there is still no focus successor. Dimensions go through the same
    /// clamping as `set_dimensions`.
    pub fn with_bounds(position: Vec2<i32>, dimensions: Extent2<i32>) -> Self {
        let mut common = Self::new();
        common.set_position(position);
        common.set_dimensions(dimensions);
        common
    }

    pub fn position(&self) -> Vec2<i32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2<i32>) {
        self.position = position;
    }

    pub fn dimensions(&self) -> Extent2<i32> {
        self.dimensions
    }

    /// Set the element's width and height.
    ///
    /// Negative components are clamped to zero, so stored dimensions are
    /// always non-negative and a rectangle degenerate along either axis
    /// contains no point at all.
    pub fn set_dimensions(&mut self, dimensions: Extent2<i32>) {
        let mut dimensions = dimensions;
        if dimensions.w < 0 || dimensions.h < 0 {
            warn!(
                w = dimensions.w,
                h = dimensions.h,
                "clamping negative element dimensions to zero",
            );
            dimensions.w = dimensions.w.max(0);
            dimensions.h = dimensions.h.max(0);
        }
        self.dimensions = dimensions;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set or clear this element's focus flag.
    ///
    /// This does not clear focus anywhere else. Keeping at most one element
    /// focused across a chain is the chain owner's job, see
    /// `ElementSet::focus`.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn next_focusable(&self) -> Option<ElementId> {
        self.next_focusable
    }

    /// Set or clear the focus chain successor link.
    ///
    /// Pure link storage. The id is not validated against any collection
    /// and may form a cycle with other elements' links.
    pub fn set_next_focusable(&mut self, next: Option<ElementId>) {
        self.next_focusable = next;
    }

    /// Axis-aligned containment test, half-open: points on the top or left
    /// edge are inside, points on the bottom or right edge are out. Zero
    /// dimensions along either axis contain nothing.
    pub fn contains(&self, point: Vec2<i32>) -> bool {
        // far edges computed in i64 so corners near i32::MAX don't wrap
        point.x >= self.position.x
            && point.y >= self.position.y
            && (point.x as i64) < self.position.x as i64 + self.dimensions.w as i64
            && (point.y as i64) < self.position.y as i64 + self.dimensions.h as i64
    }
}

impl Default for ElementCommon {
    fn default() -> Self {
        ElementCommon::new()
    }
}

impl GuiElement for ElementCommon {
    fn common(&self) -> &ElementCommon {
        self
    }

    fn common_mut(&mut self) -> &mut ElementCommon {
        self
    }
}


// ==== element trait ====

/// Polymorphic unit of GUI state. Object safe.
///
/// Implementors embed an `ElementCommon` and expose it through
/// `common`/`common_mut`; everything else is provided. Concrete controls
/// override the event hooks they care about and, for composites, the
/// `element_at` pair.
///
/// All operations are total. Nothing here fails, panics, or blocks; hooks
/// that do nothing are the contract, not a stub.
pub trait GuiElement: AsElement + Debug {
    fn common(&self) -> &ElementCommon;

    fn common_mut(&mut self) -> &mut ElementCommon;

    /// Whether a collaborator renderer should draw this element. Does not
    /// affect hit-testing or focus by itself.
    fn is_visible(&self) -> bool {
        self.common().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.common_mut().set_visible(visible);
    }

    /// Whether this element accepts interaction. Hit-testing ignores this;
    /// whether to deliver events to a disabled element is the input
    /// dispatcher's decision.
    fn is_enabled(&self) -> bool {
        self.common().is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.common_mut().set_enabled(enabled);
    }

    fn is_focused(&self) -> bool {
        self.common().is_focused()
    }

    /// See `ElementCommon::set_focused`. At most one element per chain
    /// should be focused, enforced by the chain owner, not here.
    fn set_focused(&mut self, focused: bool) {
        self.common_mut().set_focused(focused);
    }

    fn position(&self) -> Vec2<i32> {
        self.common().position()
    }

    fn set_position(&mut self, position: Vec2<i32>) {
        self.common_mut().set_position(position);
    }

    fn dimensions(&self) -> Extent2<i32> {
        self.common().dimensions()
    }

    /// See `ElementCommon::set_dimensions`. Negative components clamp to
    /// zero.
    fn set_dimensions(&mut self, dimensions: Extent2<i32>) {
        self.common_mut().set_dimensions(dimensions);
    }

    fn next_focusable(&self) -> Option<ElementId> {
        self.common().next_focusable()
    }

    fn set_next_focusable(&mut self, next: Option<ElementId>) {
        self.common_mut().set_next_focusable(next);
    }

    /// Half-open containment test against this element's rectangle. See
    /// `ElementCommon::contains`.
    fn contains(&self, point: Vec2<i32>) -> bool {
        self.common().contains(point)
    }

    /// Resolve the element under `point`.
    ///
    /// Leaf behavior, which this default provides: this element if `point`
    /// is contained in its rectangle, no match otherwise. Composites
    /// override to recurse into children first and fall back to themselves,
    /// preserving the first-containing-node-found contract so nesting
    /// composes.
    fn element_at(&self, point: Vec2<i32>) -> Option<&dyn GuiElement> {
        if self.common().contains(point) {
            Some(self.as_element())
        } else {
            None
        }
    }

    /// `element_at`, mutably. Must resolve the same element for the same
    /// point.
    fn element_at_mut(&mut self, point: Vec2<i32>) -> Option<&mut dyn GuiElement> {
        if self.common().contains(point) {
            Some(self.as_element_mut())
        } else {
            None
        }
    }

    /// Called upon the cursor entering this element's rectangle. `pos` is
    /// in the same coordinate space as the element's bounds.
    #[allow(unused_variables)]
    fn on_mouse_in(&mut self, pos: Vec2<i32>) {}

    /// Called upon the cursor moving while over this element.
    #[allow(unused_variables)]
    fn on_mouse_move(&mut self, pos: Vec2<i32>) {}

    /// Called upon the cursor leaving this element's rectangle. `pos` is
    /// the first position outside.
    #[allow(unused_variables)]
    fn on_mouse_out(&mut self, pos: Vec2<i32>) {}

    /// Called upon a mouse button being pressed over this element.
    #[allow(unused_variables)]
    fn on_mouse_down(&mut self, button: MouseButton) {}

    /// Called upon a mouse button being released over this element.
    ///
    /// Releases happening after the cursor has left never arrive here.
    /// **This means that, if one is putting logic in `on_mouse_up`, they
    /// often should also put logic in `on_mouse_out` to handle
    /// "cancellations."**
    #[allow(unused_variables)]
    fn on_mouse_up(&mut self, button: MouseButton) {}

    /// Called upon a full press-and-release on this element. What counts
    /// as a click is the input dispatcher's decision.
    #[allow(unused_variables)]
    fn on_mouse_click(&mut self, button: MouseButton) {}

    /// Called upon two clicks within the input dispatcher's double-click
    /// window.
    #[allow(unused_variables)]
    fn on_mouse_dbl_click(&mut self, button: MouseButton) {}

    /// Called upon a key going down while this element is focused. Edge
    /// only, see `on_key_pressed` for auto-repeat.
    #[allow(unused_variables)]
    fn on_key_down(&mut self, key: KeyCode) {}

    /// Called upon a key going up while this element is focused.
    #[allow(unused_variables)]
    fn on_key_up(&mut self, key: KeyCode) {}

    /// Called upon a key press, repeatedly while held if the input
    /// dispatcher delivers auto-repeat.
    #[allow(unused_variables)]
    fn on_key_pressed(&mut self, key: KeyCode) {}

    /// Called upon a character being typed while this element is focused.
    #[allow(unused_variables)]
    fn on_character(&mut self, c: char) {}
}


// ==== upcast bridge ====

/// Object-safe upcast to `&dyn GuiElement`. Blanket-impl'd for all sized
/// `GuiElement`.
///
/// `GuiElement::element_at`'s provided body needs to return `self` as a
/// trait object, and a provided method cannot coerce `&Self` while `Self`
/// may be unsized. Routing the coercion through this supertrait keeps
/// `element_at` overridable and `GuiElement` object safe.
pub trait AsElement {
    fn as_element(&self) -> &dyn GuiElement;

    fn as_element_mut(&mut self) -> &mut dyn GuiElement;
}

impl<E: GuiElement> AsElement for E {
    fn as_element(&self) -> &dyn GuiElement {
        self
    }

    fn as_element_mut(&mut self) -> &mut dyn GuiElement {
        self
    }
}


#[test]
fn containment_is_half_open() {
    let e = ElementCommon::with_bounds(Vec2::new(10, 10), Extent2::new(20, 20));
    assert!(e.contains(Vec2::new(10, 10)));
    assert!(e.contains(Vec2::new(29, 29)));
    assert!(e.contains(Vec2::new(10, 29)));
    assert!(e.contains(Vec2::new(29, 10)));
    assert!(!e.contains(Vec2::new(30, 30)));
    assert!(!e.contains(Vec2::new(9, 15)));
    assert!(!e.contains(Vec2::new(30, 15)));
    assert!(!e.contains(Vec2::new(15, 30)));
    assert!(!e.contains(Vec2::new(9, 9)));
}

#[test]
fn corner_in_far_corner_out() {
    for (px, py) in [(0, 0), (-35, 12), (1000, -4)] {
        for (w, h) in [(1, 1), (3, 17), (20, 20)] {
            let pos = Vec2::new(px, py);
            let dim = Extent2::new(w, h);
            let e = ElementCommon::with_bounds(pos, dim);
            assert!(e.contains(pos));
            assert!(!e.contains(Vec2::new(px + w, py + h)));
        }
    }
}

#[test]
fn zero_dimensions_contain_nothing() {
    let e = ElementCommon::with_bounds(Vec2::new(5, 5), Extent2::new(0, 0));
    assert!(!e.contains(Vec2::new(5, 5)));
    assert!(!e.contains(Vec2::new(0, 0)));
    assert!(!e.contains(Vec2::new(6, 6)));

    // degenerate along one axis only is just as empty
    let e = ElementCommon::with_bounds(Vec2::new(5, 5), Extent2::new(0, 10));
    for y in 0..20 {
        assert!(!e.contains(Vec2::new(5, y)));
    }
}

#[test]
fn negative_dimensions_clamp_to_zero() {
    let mut e = ElementCommon::with_bounds(Vec2::new(0, 0), Extent2::new(4, 4));
    e.set_dimensions(Extent2::new(-5, 10));
    assert_eq!(e.dimensions(), Extent2::new(0, 10));
    for x in -6..6 {
        for y in 0..10 {
            assert!(!e.contains(Vec2::new(x, y)));
        }
    }

    let mut e = ElementCommon::new();
    e.set_dimensions(Extent2::new(-1, -1));
    assert_eq!(e.dimensions(), Extent2::new(0, 0));

    assert_eq!(
        ElementCommon::with_bounds(Vec2::new(2, 2), Extent2::new(3, -8)).dimensions(),
        Extent2::new(3, 0),
    );
}

#[test]
fn flags_default_false_and_round_trip() {
    let mut e = ElementCommon::new();
    assert!(!e.is_visible());
    assert!(!e.is_enabled());
    assert!(!e.is_focused());

    e.set_visible(true);
    e.set_visible(true);
    assert!(e.is_visible());
    e.set_visible(false);
    assert!(!e.is_visible());

    e.set_enabled(true);
    e.set_enabled(true);
    assert!(e.is_enabled());

    e.set_focused(true);
    e.set_focused(true);
    assert!(e.is_focused());
    e.set_focused(false);
    e.set_focused(false);
    assert!(!e.is_focused());
}

#[test]
fn flags_are_independent() {
    for v in [false, true] {
        for en in [false, true] {
            for f in [false, true] {
                let mut e = ElementCommon::new();
                e.set_visible(v);
                e.set_enabled(en);
                e.set_focused(f);
                assert_eq!(e.is_visible(), v);
                assert_eq!(e.is_enabled(), en);
                assert_eq!(e.is_focused(), f);

                // toggling one leaves the other two alone
                e.set_visible(!v);
                assert_eq!(e.is_enabled(), en);
                assert_eq!(e.is_focused(), f);
                e.set_visible(v);
                e.set_enabled(!en);
                assert_eq!(e.is_visible(), v);
                assert_eq!(e.is_focused(), f);
            }
        }
    }
}

#[test]
fn position_and_dimensions_round_trip() {
    let mut e = ElementCommon::new();
    for (x, y) in [(0, 0), (7, -3), (-120, 45), (i32::MAX, i32::MIN)] {
        e.set_position(Vec2::new(x, y));
        assert_eq!(e.position(), Vec2::new(x, y));
    }
    for (w, h) in [(0, 0), (1, 1), (640, 480)] {
        e.set_dimensions(Extent2::new(w, h));
        assert_eq!(e.dimensions(), Extent2::new(w, h));
    }
}

#[test]
fn focus_link_round_trip() {
    let mut e = ElementCommon::new();
    assert_eq!(e.next_focusable(), None);
    e.set_next_focusable(Some(ElementId(3)));
    assert_eq!(e.next_focusable(), Some(ElementId(3)));
    e.set_next_focusable(None);
    assert_eq!(e.next_focusable(), None);
}

#[test]
fn element_at_leaf_behavior() {
    let e = ElementCommon::with_bounds(Vec2::new(10, 10), Extent2::new(20, 20));
    let e: &dyn GuiElement = &e;
    let hit = e.element_at(Vec2::new(15, 15)).unwrap();
    assert_eq!(hit.position(), Vec2::new(10, 10));
    assert_eq!(hit.dimensions(), Extent2::new(20, 20));
    assert!(e.element_at(Vec2::new(30, 30)).is_none());
    assert!(e.element_at(Vec2::new(9, 15)).is_none());
}

#[test]
fn hooks_are_noop_by_default() {
    let mut e = ElementCommon::with_bounds(Vec2::new(0, 0), Extent2::new(5, 5));
    let before = e.clone();
    let dyn_e: &mut dyn GuiElement = &mut e;
    dyn_e.on_mouse_in(Vec2::new(1, 1));
    dyn_e.on_mouse_move(Vec2::new(2, 2));
    dyn_e.on_mouse_out(Vec2::new(9, 9));
    dyn_e.on_mouse_down(MouseButton::Left);
    dyn_e.on_mouse_up(MouseButton::Left);
    dyn_e.on_mouse_click(MouseButton::Right);
    dyn_e.on_mouse_dbl_click(MouseButton::Middle);
    dyn_e.on_key_down(17);
    dyn_e.on_key_up(17);
    dyn_e.on_key_pressed(17);
    dyn_e.on_character('q');
    assert_eq!(e.position(), before.position());
    assert_eq!(e.dimensions(), before.dimensions());
    assert_eq!(e.is_visible(), before.is_visible());
    assert_eq!(e.is_enabled(), before.is_enabled());
    assert_eq!(e.is_focused(), before.is_focused());
    assert_eq!(e.next_focusable(), before.next_focusable());
}

#[test]
fn hooks_dispatch_dynamically() {
    #[derive(Debug, Default)]
    struct Recorder {
        common: ElementCommon,
        downs: u32,
        chars: String,
    }

    impl GuiElement for Recorder {
        fn common(&self) -> &ElementCommon {
            &self.common
        }

        fn common_mut(&mut self) -> &mut ElementCommon {
            &mut self.common
        }

        fn on_mouse_down(&mut self, _button: MouseButton) {
            self.downs += 1;
        }

        fn on_character(&mut self, c: char) {
            self.chars.push(c);
        }
    }

    let mut recorder = Recorder::default();
    let e: &mut dyn GuiElement = &mut recorder;
    e.on_mouse_down(MouseButton::Left);
    e.on_mouse_down(MouseButton::Right);
    e.on_character('h');
    e.on_character('i');
    // un-overridden hooks still default to no-ops
    e.on_key_down(1);
    assert_eq!(recorder.downs, 2);
    assert_eq!(recorder.chars, "hi");
}

#[test]
fn hit_testing_ignores_visible_and_enabled() {
    let mut e = ElementCommon::with_bounds(Vec2::new(0, 0), Extent2::new(10, 10));
    e.set_enabled(false);
    e.set_visible(false);
    assert!(e.element_at(Vec2::new(5, 5)).is_some());
    assert!(e.contains(Vec2::new(5, 5)));
}
