//! Composite element owning child elements.


use crate::element::{
    AsElement,
    ElementCommon,
    GuiElement,
};
use vek::*;


/// Element that owns an ordered stack of child elements.
///
/// Children are positioned in panel-local coordinates, so moving the panel
/// moves its whole subtree. For hit-testing, children are consulted before
/// the panel itself, topmost (last added) first, which keeps nested panels
/// composing: the innermost element under the point wins, and the panel's
/// own rectangle is the fallback.
///
/// Panel children are owned directly rather than living in an
/// `ElementSet`, so they have no `ElementId` and cannot be focus chain
/// targets. Chain-participating controls belong in a set.
#[derive(Debug, Default)]
pub struct Panel {
    common: ElementCommon,
    children: Vec<Box<dyn GuiElement>>,
}

impl Panel {
    pub fn new(position: Vec2<i32>, dimensions: Extent2<i32>) -> Self {
        Panel {
            common: ElementCommon::with_bounds(position, dimensions),
            children: Vec::new(),
        }
    }

    /// Append a child on top of the existing children, returning its slot.
    /// The child's position is interpreted relative to the panel's top-left
    /// corner.
    pub fn add_child(&mut self, child: Box<dyn GuiElement>) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub fn children(&self) -> &[Box<dyn GuiElement>] {
        &self.children
    }

    pub fn child_mut(&mut self, slot: usize) -> Option<&mut dyn GuiElement> {
        match self.children.get_mut(slot) {
            Some(child) => Some(&mut **child),
            None => None,
        }
    }

    /// Query point translated into child coordinates. `None` when the
    /// difference leaves i32 range; such a point lies outside the panel
    /// rectangle and out of reach of any child query.
    fn local_point(&self, point: Vec2<i32>) -> Option<Vec2<i32>> {
        let position = self.common.position();
        Some(Vec2::new(
            point.x.checked_sub(position.x)?,
            point.y.checked_sub(position.y)?,
        ))
    }
}

impl GuiElement for Panel {
    fn common(&self) -> &ElementCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ElementCommon {
        &mut self.common
    }

    fn element_at(&self, point: Vec2<i32>) -> Option<&dyn GuiElement> {
        self.local_point(point)
            .and_then(|local| {
                self.children.iter().rev()
                    .find_map(|child| child.element_at(local))
            })
            .or_else(|| {
                if self.common.contains(point) {
                    Some(self.as_element())
                } else {
                    None
                }
            })
    }

    fn element_at_mut(&mut self, point: Vec2<i32>) -> Option<&mut dyn GuiElement> {
        let hit = self.local_point(point)
            .and_then(|local| {
                self.children.iter()
                    .rposition(|child| child.element_at(local).is_some())
                    .map(|slot| (slot, local))
            });
        match hit {
            Some((slot, local)) => self.children[slot].element_at_mut(local),
            None => {
                if self.common.contains(point) {
                    Some(self.as_element_mut())
                } else {
                    None
                }
            }
        }
    }
}


#[cfg(test)]
fn leaf(x: i32, y: i32, w: i32, h: i32) -> Box<dyn GuiElement> {
    Box::new(ElementCommon::with_bounds(Vec2::new(x, y), Extent2::new(w, h)))
}

#[test]
fn hits_child_before_self() {
    let mut panel = Panel::new(Vec2::new(100, 100), Extent2::new(50, 50));
    // child occupies (110,110)..(120,120) in parent space
    panel.add_child(leaf(10, 10, 10, 10));

    let hit = panel.element_at(Vec2::new(115, 115)).unwrap();
    assert_eq!(hit.dimensions(), Extent2::new(10, 10));

    // inside the panel but off the child falls back to the panel
    let hit = panel.element_at(Vec2::new(105, 105)).unwrap();
    assert_eq!(hit.dimensions(), Extent2::new(50, 50));

    // outside everything
    assert!(panel.element_at(Vec2::new(99, 99)).is_none());
    assert!(panel.element_at(Vec2::new(150, 150)).is_none());
}

#[test]
fn last_added_child_wins_overlap() {
    let mut panel = Panel::new(Vec2::new(0, 0), Extent2::new(100, 100));
    let under = panel.add_child(leaf(0, 0, 40, 40));
    let over = panel.add_child(leaf(20, 20, 40, 40));

    let hit = panel.element_at_mut(Vec2::new(30, 30)).unwrap();
    hit.set_visible(true);
    assert!(!panel.children()[under].is_visible());
    assert!(panel.children()[over].is_visible());
}

#[test]
fn nested_panels_translate_coordinates() {
    let mut inner = Panel::new(Vec2::new(10, 10), Extent2::new(20, 20));
    inner.add_child(leaf(5, 5, 4, 4));
    let mut outer = Panel::new(Vec2::new(100, 100), Extent2::new(50, 50));
    outer.add_child(Box::new(inner));

    // leaf sits at (115,115)..(119,119) in screen space
    let hit = outer.element_at(Vec2::new(116, 118)).unwrap();
    assert_eq!(hit.dimensions(), Extent2::new(4, 4));

    // inner panel but not leaf
    let hit = outer.element_at(Vec2::new(111, 111)).unwrap();
    assert_eq!(hit.dimensions(), Extent2::new(20, 20));

    // outer panel only
    let hit = outer.element_at(Vec2::new(140, 140)).unwrap();
    assert_eq!(hit.dimensions(), Extent2::new(50, 50));
}

#[test]
fn element_at_and_element_at_mut_agree() {
    let mut panel = Panel::new(Vec2::new(0, 0), Extent2::new(100, 100));
    panel.add_child(leaf(10, 10, 10, 10));
    panel.add_child(leaf(50, 50, 10, 10));

    for point in [
        Vec2::new(15, 15),
        Vec2::new(55, 55),
        Vec2::new(5, 5),
        Vec2::new(200, 200),
        Vec2::new(i32::MAX, i32::MIN),
    ] {
        let immutable = panel.element_at(point).map(|e| (e.position(), e.dimensions()));
        let mutable = panel.element_at_mut(point).map(|e| (e.position(), e.dimensions()));
        assert_eq!(immutable, mutable);
    }
}

#[test]
fn zero_size_panel_still_exposes_children() {
    // children are not clipped by the panel rectangle
    let mut panel = Panel::new(Vec2::new(0, 0), Extent2::new(0, 0));
    panel.add_child(leaf(10, 10, 5, 5));
    assert!(panel.element_at(Vec2::new(12, 12)).is_some());
    assert!(panel.element_at(Vec2::new(0, 0)).is_none());
}

#[test]
fn child_mut_reaches_into_the_stack() {
    let mut panel = Panel::new(Vec2::new(0, 0), Extent2::new(100, 100));
    let slot = panel.add_child(leaf(10, 10, 10, 10));
    assert!(panel.child_mut(slot + 1).is_none());

    let child = panel.child_mut(slot).unwrap();
    child.set_enabled(true);
    child.set_position(Vec2::new(30, 30));

    // the mutation lands on the owned child
    assert!(panel.children()[slot].is_enabled());
    assert!(panel.element_at(Vec2::new(35, 35)).unwrap().is_enabled());
    assert!(!panel.element_at(Vec2::new(15, 15)).unwrap().is_enabled());
}

#[test]
fn extreme_points_hit_test_without_wrapping() {
    let mut panel = Panel::new(Vec2::new(1, 1), Extent2::new(10, 10));
    panel.add_child(leaf(2, 2, 4, 4));
    assert!(panel.element_at(Vec2::new(i32::MIN, 0)).is_none());
    assert!(panel.element_at(Vec2::new(i32::MAX, i32::MAX)).is_none());
    assert!(panel.element_at_mut(Vec2::new(0, i32::MIN)).is_none());

    // translation stays exact with the panel at the negative extreme
    let mut panel = Panel::new(Vec2::new(i32::MIN, i32::MIN), Extent2::new(10, 10));
    panel.add_child(leaf(2, 2, 4, 4));
    let hit = panel.element_at(Vec2::new(i32::MIN + 3, i32::MIN + 3)).unwrap();
    assert_eq!(hit.dimensions(), Extent2::new(4, 4));
    assert!(panel.element_at(Vec2::new(i32::MAX, i32::MIN)).is_none());
}
