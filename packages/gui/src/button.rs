//! Clickable leaf element.


use crate::{
    element::{
        ElementCommon,
        GuiElement,
    },
    event::MouseButton,
};
use vek::*;


/// Push button.
///
/// Tracks hover and held state from the mouse hooks and counts left
/// clicks for its owner to poll. Drawing the highlight is a renderer
/// concern; honoring `enabled` before delivering events is the input
/// dispatcher's.
#[derive(Debug)]
pub struct Button {
    common: ElementCommon,
    label: String,
    hovered: bool,
    held: bool,
    clicks: u32,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Button {
            common: ElementCommon::new(),
            label: label.into(),
            hovered: false,
            held: false,
            clicks: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the cursor is currently over the button.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the left mouse button is currently down on the button.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Number of left clicks since the last call, resetting the count.
    pub fn take_clicks(&mut self) -> u32 {
        let clicks = self.clicks;
        self.clicks = 0;
        clicks
    }
}

impl GuiElement for Button {
    fn common(&self) -> &ElementCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ElementCommon {
        &mut self.common
    }

    fn on_mouse_in(&mut self, _pos: Vec2<i32>) {
        self.hovered = true;
    }

    fn on_mouse_out(&mut self, _pos: Vec2<i32>) {
        // a release outside the button never arrives as on_mouse_up
        self.hovered = false;
        self.held = false;
    }

    fn on_mouse_down(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.held = true;
        }
    }

    fn on_mouse_up(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.held = false;
        }
    }

    fn on_mouse_click(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.clicks = self.clicks.saturating_add(1);
            debug!(label = %self.label, "button clicked");
        }
    }
}


#[test]
fn hover_and_held_follow_mouse_hooks() {
    let mut button = Button::new("Singleplayer");
    button.set_dimensions(Extent2::new(100, 20));
    assert_eq!(button.label(), "Singleplayer");
    assert!(!button.is_hovered());
    assert!(!button.is_held());

    button.on_mouse_in(Vec2::new(3, 3));
    assert!(button.is_hovered());

    button.on_mouse_down(MouseButton::Left);
    assert!(button.is_held());
    button.on_mouse_up(MouseButton::Left);
    assert!(!button.is_held());

    button.on_mouse_out(Vec2::new(200, 3));
    assert!(!button.is_hovered());
}

#[test]
fn mouse_out_cancels_held() {
    let mut button = Button::new("Quit");
    button.on_mouse_in(Vec2::new(0, 0));
    button.on_mouse_down(MouseButton::Left);
    assert!(button.is_held());
    button.on_mouse_out(Vec2::new(-1, 0));
    assert!(!button.is_held());
}

#[test]
fn counts_left_clicks_only() {
    let mut button = Button::new("Options...");
    button.on_mouse_click(MouseButton::Left);
    button.on_mouse_click(MouseButton::Right);
    button.on_mouse_click(MouseButton::Left);
    button.on_mouse_click(MouseButton::Middle);
    assert_eq!(button.take_clicks(), 2);
    assert_eq!(button.take_clicks(), 0);

    button.on_mouse_click(MouseButton::Left);
    assert_eq!(button.take_clicks(), 1);
}

#[test]
fn right_and_middle_do_not_hold() {
    let mut button = Button::new("Mods and Texture Packs");
    button.on_mouse_down(MouseButton::Right);
    assert!(!button.is_held());
    button.on_mouse_down(MouseButton::Other(4));
    assert!(!button.is_held());
}

#[test]
fn button_is_an_element() {
    let mut button = Button::new("Back");
    button.set_position(Vec2::new(10, 10));
    button.set_dimensions(Extent2::new(20, 20));
    let e: &dyn GuiElement = &button;
    assert!(e.element_at(Vec2::new(10, 10)).is_some());
    assert!(e.element_at(Vec2::new(30, 30)).is_none());
    assert_eq!(e.dimensions(), Extent2::new(20, 20));
}
