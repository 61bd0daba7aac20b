//! Externally owned element collection keyed by stable ids.
//!
//! `next_focusable` links refer to elements by `ElementId` into one of
//! these sets, modeling the focus chain as a relation over the set rather
//! than ownership between elements. The set is also the focus chain owner:
//! the `focus*` operations below are the one place the at-most-one-focused
//! invariant is maintained.


use crate::element::GuiElement;
use slab::Slab;


/// Key of an element within an `ElementSet`.
///
/// Plain index, no liveness guarantee. A stored id whose element has been
/// removed dangles; operations resolving ids treat a dangling id as no
/// element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(pub usize);

/// Id-keyed set of boxed elements.
#[derive(Debug, Default)]
pub struct ElementSet(Slab<Box<dyn GuiElement>>);

impl ElementSet {
    pub fn new() -> Self {
        ElementSet(Slab::new())
    }

    /// Add an element, returning the id that now keys it. Ids of removed
    /// elements may be reused.
    pub fn insert(&mut self, element: Box<dyn GuiElement>) -> ElementId {
        let id = ElementId(self.0.insert(element));
        debug!(id = id.0, "inserted gui element");
        id
    }

    /// Remove and return an element.
    ///
    /// `next_focusable` links in other elements pointing at `id` are left
    /// in place and dangle; scrubbing them, or not creating them, is the
    /// chain owner's responsibility.
    pub fn remove(&mut self, id: ElementId) -> Option<Box<dyn GuiElement>> {
        let element = self.0.try_remove(id.0);
        if element.is_some() {
            debug!(id = id.0, "removed gui element");
        }
        element
    }

    pub fn get(&self, id: ElementId) -> Option<&dyn GuiElement> {
        self.0.get(id.0).map(|element| &**element)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut dyn GuiElement> {
        // match rather than Option::map so the &mut coerces at the Some site
        match self.0.get_mut(id.0) {
            Some(element) => Some(&mut **element),
            None => None,
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.0.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &dyn GuiElement)> + '_ {
        self.0.iter().map(|(i, element)| (ElementId(i), &**element))
    }

    /// Id of the focused element, if any. If focus flags were toggled
    /// directly on elements rather than through `focus`, this returns the
    /// lowest-id focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.0.iter()
            .find(|&(_, element)| element.is_focused())
            .map(|(i, _)| ElementId(i))
    }

    /// Focus one element, unfocusing every other element in the set.
    ///
    /// Returns whether `id` named a live element; on false the set is left
    /// untouched.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.0.contains(id.0) {
            return false;
        }
        for (i, element) in self.0.iter_mut() {
            element.set_focused(i == id.0);
        }
        true
    }

    /// Unfocus every element in the set.
    pub fn clear_focus(&mut self) {
        for (_, element) in self.0.iter_mut() {
            element.set_focused(false);
        }
    }

    /// Advance focus one step along the focused element's `next_focusable`
    /// link, returning the id that now holds focus.
    ///
    /// Returns `None` and leaves focus untouched when nothing is focused,
    /// the focused element has no successor link, or the link dangles.
    ///
    /// Chains may be cyclic and one call is exactly one step, so callers
    /// walking a chain bound the walk themselves.
    pub fn focus_next(&mut self) -> Option<ElementId> {
        let current = self.focused()?;
        let next = self.get(current)?.next_focusable()?;
        if !self.0.contains(next.0) {
            return None;
        }
        self.focus(next);
        Some(next)
    }
}


#[cfg(test)]
fn plain(x: i32, y: i32, w: i32, h: i32) -> Box<dyn GuiElement> {
    use crate::element::ElementCommon;
    use vek::{Vec2, Extent2};

    Box::new(ElementCommon::with_bounds(Vec2::new(x, y), Extent2::new(w, h)))
}

#[test]
fn insert_get_remove() {
    let mut set = ElementSet::new();
    assert!(set.is_empty());

    let a = set.insert(plain(0, 0, 10, 10));
    let b = set.insert(plain(20, 0, 10, 10));
    assert_eq!(set.len(), 2);
    assert!(set.contains(a));
    assert!(set.contains(b));
    assert_ne!(a, b);
    assert_eq!(set.get(a).unwrap().position().x, 0);
    assert_eq!(set.get(b).unwrap().position().x, 20);

    set.get_mut(b).unwrap().set_visible(true);
    assert!(set.get(b).unwrap().is_visible());
    assert!(!set.get(a).unwrap().is_visible());

    let removed = set.remove(a).unwrap();
    assert_eq!(removed.position().x, 0);
    assert!(!set.contains(a));
    assert!(set.get(a).is_none());
    assert_eq!(set.len(), 1);
    assert!(set.remove(a).is_none());
}

#[test]
fn focus_keeps_at_most_one_focused() {
    let mut set = ElementSet::new();
    let a = set.insert(plain(0, 0, 1, 1));
    let b = set.insert(plain(1, 0, 1, 1));
    let c = set.insert(plain(2, 0, 1, 1));

    assert_eq!(set.focused(), None);

    assert!(set.focus(a));
    assert_eq!(set.focused(), Some(a));

    assert!(set.focus(b));
    assert_eq!(set.focused(), Some(b));
    assert!(!set.get(a).unwrap().is_focused());
    assert!(set.get(b).unwrap().is_focused());
    assert!(!set.get(c).unwrap().is_focused());

    set.clear_focus();
    assert_eq!(set.focused(), None);

    // focusing a dead id changes nothing
    set.remove(c);
    assert!(set.focus(b));
    assert!(!set.focus(c));
    assert_eq!(set.focused(), Some(b));
}

#[test]
fn focus_chain_cycle_walks_three_steps() {
    let mut set = ElementSet::new();
    let a = set.insert(plain(0, 0, 1, 1));
    let b = set.insert(plain(1, 0, 1, 1));
    let c = set.insert(plain(2, 0, 1, 1));
    set.get_mut(a).unwrap().set_next_focusable(Some(b));
    set.get_mut(b).unwrap().set_next_focusable(Some(c));
    set.get_mut(c).unwrap().set_next_focusable(Some(a));

    set.focus(a);
    let mut visited = Vec::new();
    for _ in 0..3 {
        visited.push(set.focus_next().unwrap());
    }
    assert_eq!(visited, vec![b, c, a]);
    assert_eq!(set.focused(), Some(a));
}

#[test]
fn focus_next_without_focus_or_link_is_none() {
    let mut set = ElementSet::new();
    let a = set.insert(plain(0, 0, 1, 1));

    // nothing focused
    assert_eq!(set.focus_next(), None);
    assert_eq!(set.focused(), None);

    // focused but no successor link
    set.focus(a);
    assert_eq!(set.focus_next(), None);
    assert_eq!(set.focused(), Some(a));
}

#[test]
fn focus_next_over_dangling_link_is_none() {
    let mut set = ElementSet::new();
    let a = set.insert(plain(0, 0, 1, 1));
    let b = set.insert(plain(1, 0, 1, 1));
    set.get_mut(a).unwrap().set_next_focusable(Some(b));
    set.focus(a);

    set.remove(b);
    // the link in a still points at b, which no longer lives
    assert_eq!(set.get(a).unwrap().next_focusable(), Some(b));
    assert_eq!(set.focus_next(), None);
    assert_eq!(set.focused(), Some(a));
}

#[test]
fn self_link_cycles_in_place() {
    let mut set = ElementSet::new();
    let a = set.insert(plain(0, 0, 1, 1));
    set.get_mut(a).unwrap().set_next_focusable(Some(a));
    set.focus(a);
    assert_eq!(set.focus_next(), Some(a));
    assert_eq!(set.focused(), Some(a));
}
