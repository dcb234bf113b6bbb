// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interactive selection abstracted behind a provider trait.
//!
//! Picks are prompt-driven and cancellable: `None` means the user backed
//! out, and workflows surface that as a cancelled outcome rather than an
//! error. [`ScriptedSelection`] replays a fixed pick sequence in tests.

use std::collections::VecDeque;

use nalgebra::Point3;

use crate::element::{Category, ElementRef};

type ElementPredicate = Box<dyn Fn(&ElementRef) -> bool>;

/// Composable pick filter over element and reference candidates.
pub struct SelectionFilter {
    allow_element: ElementPredicate,
    allow_reference: Option<ElementPredicate>,
}

impl SelectionFilter {
    pub fn new(allow_element: impl Fn(&ElementRef) -> bool + 'static) -> Self {
        Self {
            allow_element: Box::new(allow_element),
            allow_reference: None,
        }
    }

    /// Adds a reference-level predicate on top of the element one.
    pub fn with_reference(
        mut self,
        allow_reference: impl Fn(&ElementRef) -> bool + 'static,
    ) -> Self {
        self.allow_reference = Some(Box::new(allow_reference));
        self
    }

    /// Filter that admits a single category.
    pub fn category(category: Category) -> Self {
        Self::new(move |e| e.category == category)
    }

    pub fn allows_element(&self, element: &ElementRef) -> bool {
        (self.allow_element)(element)
    }

    /// Reference checks default to permissive when no predicate is set.
    pub fn allows_reference(&self, element: &ElementRef) -> bool {
        self.allow_reference
            .as_ref()
            .map_or(true, |allow| allow(element))
    }
}

/// Source of interactive picks.
pub trait SelectionProvider {
    /// Prompts for an element pick. `None` when the user cancels.
    fn pick_element(&mut self, filter: &SelectionFilter, prompt: &str) -> Option<ElementRef>;

    /// Prompts for a point pick. `None` when the user cancels.
    fn pick_point(&mut self, prompt: &str) -> Option<Point3<f64>>;
}

/// Replays a scripted sequence of picks.
#[derive(Default)]
pub struct ScriptedSelection {
    elements: VecDeque<ElementRef>,
    points: VecDeque<Point3<f64>>,
}

impl ScriptedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: ElementRef) -> Self {
        self.elements.push_back(element);
        self
    }

    pub fn with_point(mut self, point: Point3<f64>) -> Self {
        self.points.push_back(point);
        self
    }
}

impl SelectionProvider for ScriptedSelection {
    fn pick_element(&mut self, filter: &SelectionFilter, prompt: &str) -> Option<ElementRef> {
        let element = self.elements.pop_front()?;
        tracing::trace!(%prompt, id = %element.id, "scripted element pick");
        filter.allows_element(&element).then_some(element)
    }

    fn pick_point(&mut self, prompt: &str) -> Option<Point3<f64>> {
        tracing::trace!(%prompt, "scripted point pick");
        self.points.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;

    fn wall_ref(id: u64) -> ElementRef {
        ElementRef {
            id: ElementId(id),
            category: Category::Wall,
        }
    }

    #[test]
    fn test_category_filter() {
        let filter = SelectionFilter::category(Category::Wall);
        assert!(filter.allows_element(&wall_ref(1)));
        assert!(!filter.allows_element(&ElementRef {
            id: ElementId(2),
            category: Category::Floor,
        }));
        // No reference predicate: everything passes
        assert!(filter.allows_reference(&wall_ref(1)));
    }

    #[test]
    fn test_reference_predicate_layers_on() {
        let filter = SelectionFilter::category(Category::Wall)
            .with_reference(|e| e.id == ElementId(7));
        assert!(filter.allows_reference(&wall_ref(7)));
        assert!(!filter.allows_reference(&wall_ref(8)));
    }

    #[test]
    fn test_scripted_picks_drain_in_order() {
        let filter = SelectionFilter::category(Category::Wall);
        let mut picks = ScriptedSelection::new()
            .with_element(wall_ref(3))
            .with_point(Point3::new(1.0, 2.0, 0.0));

        assert_eq!(picks.pick_element(&filter, "pick a wall").unwrap().id, ElementId(3));
        assert_eq!(picks.pick_point("pick a point").unwrap().x, 1.0);
        // Drained: further picks read as cancellation
        assert!(picks.pick_element(&filter, "pick a wall").is_none());
        assert!(picks.pick_point("pick a point").is_none());
    }

    #[test]
    fn test_filtered_out_pick_cancels() {
        let filter = SelectionFilter::category(Category::Wall);
        let mut picks = ScriptedSelection::new().with_element(ElementRef {
            id: ElementId(9),
            category: Category::Room,
        });
        assert!(picks.pick_element(&filter, "pick a wall").is_none());
    }
}
