//! The deck store - sole mutator of the document, selection, and clipboard.
//!
//! All edits flow through this type; the renderer, toolbars, and panels are
//! read-only observers that call back into the operation API. Missing IDs
//! and invariant-guard rejections (deleting the last slide, pasting with an
//! empty clipboard) are silent no-ops rather than errors.

use crate::document::{Document, Slide, Transition};
use crate::element::{Element, ElementId, ElementPatch, ElementType};
use crate::error::DeckResult;
use crate::schema;

/// Offset applied to pasted elements per paste, in slide coordinates.
pub const PASTE_OFFSET: f32 = 20.0;

/// Owns the document plus all transient editing state.
///
/// Construct one per editing session and pass it explicitly; there is no
/// global instance.
#[derive(Debug, Clone)]
pub struct DeckStore {
    document: Document,
    current_slide: usize,
    selected_id: Option<ElementId>,
    selected_ids: Vec<ElementId>,
    clipboard: Option<Vec<Element>>,
}

impl DeckStore {
    /// Create a store around a fresh single-slide document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            current_slide: 0,
            selected_id: None,
            selected_ids: Vec::new(),
            clipboard: None,
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The whole document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Presentation title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.document.title
    }

    /// All slides in order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.document.slides
    }

    /// Index of the slide being edited.
    #[must_use]
    pub const fn current_slide_index(&self) -> usize {
        self.current_slide
    }

    /// The slide being edited.
    #[must_use]
    pub fn current_slide(&self) -> &Slide {
        &self.document.slides[self.current_slide]
    }

    /// Primary (anchor) selected element, if any.
    #[must_use]
    pub const fn selected_id(&self) -> Option<ElementId> {
        self.selected_id
    }

    /// All selected element IDs, in selection order.
    #[must_use]
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected_ids
    }

    /// Whether the clipboard holds anything to paste.
    #[must_use]
    pub const fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Look up an element on the current slide.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.current_slide().elements.iter().find(|el| el.id == id)
    }

    fn current_slide_mut(&mut self) -> &mut Slide {
        &mut self.document.slides[self.current_slide]
    }

    // -----------------------------------------------------------------------
    // Slide management
    // -----------------------------------------------------------------------

    /// Switch to another slide, clearing the selection. Out-of-range is a
    /// no-op.
    pub fn set_current_slide(&mut self, index: usize) {
        if index < self.document.slides.len() {
            self.current_slide = index;
            self.clear_selection();
        }
    }

    /// Insert a new empty slide after `after` (default: after the current
    /// slide), make it current, and clear the selection.
    pub fn add_slide(&mut self, after: Option<usize>) {
        let insert_at = (after.unwrap_or(self.current_slide) + 1).min(self.document.slides.len());
        self.document.slides.insert(insert_at, Slide::new());
        self.current_slide = insert_at;
        self.clear_selection();
    }

    /// Delete the slide at `index`. No-op when it is the last remaining
    /// slide or the index is out of range.
    pub fn delete_slide(&mut self, index: usize) {
        if self.document.slides.len() <= 1 || index >= self.document.slides.len() {
            return;
        }
        self.document.slides.remove(index);
        self.current_slide = self.current_slide.min(self.document.slides.len() - 1);
        self.clear_selection();
    }

    /// Deep-copy the slide at `index` (fresh IDs throughout), insert the
    /// copy right after it, and make the copy current.
    pub fn duplicate_slide(&mut self, index: usize) {
        let Some(slide) = self.document.slides.get(index) else {
            tracing::debug!("duplicate_slide: no slide at {index}");
            return;
        };
        let copy = slide.duplicated();
        self.document.slides.insert(index + 1, copy);
        self.current_slide = index + 1;
    }

    /// Move the slide at `from` to position `to` (splice semantics: `to`
    /// indexes the list after removal) and make `to` current.
    pub fn reorder_slides(&mut self, from: usize, to: usize) {
        if from >= self.document.slides.len() {
            return;
        }
        let slide = self.document.slides.remove(from);
        let to = to.min(self.document.slides.len());
        self.document.slides.insert(to, slide);
        self.current_slide = to;
    }

    /// Set the current slide's background color.
    pub fn set_slide_background(&mut self, color: impl Into<String>) {
        self.current_slide_mut().background = color.into();
    }

    /// Set the current slide's playback transition.
    pub fn set_slide_transition(&mut self, transition: Transition) {
        self.current_slide_mut().transition = transition;
    }

    // -----------------------------------------------------------------------
    // Element management
    // -----------------------------------------------------------------------

    /// Append a new element of `ty` with default attributes to the current
    /// slide and select it. Returns a copy of the created element.
    pub fn add_element(&mut self, ty: ElementType) -> Element {
        self.add_element_with(ty, |_| {})
    }

    /// Like [`Self::add_element`], but `overrides` runs on the defaulted
    /// element before insertion, so overrides win over defaults.
    pub fn add_element_with(
        &mut self,
        ty: ElementType,
        overrides: impl FnOnce(&mut Element),
    ) -> Element {
        let mut element = Element::with_defaults(ty);
        overrides(&mut element);
        let created = element.clone();
        self.current_slide_mut().elements.push(element);
        self.select_element(created.id);
        created
    }

    /// Mutate the matching element on the current slide through a closure.
    /// Missing IDs are a silent no-op; no field validation happens here.
    pub fn update_element(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) {
        let slide = self.current_slide_mut();
        match slide.elements.iter_mut().find(|el| el.id == id) {
            Some(element) => f(element),
            None => tracing::debug!("update_element: no element {id} on current slide"),
        }
    }

    /// Apply a reconciliation patch to the matching element.
    pub fn apply_patch(&mut self, id: ElementId, patch: &ElementPatch) {
        self.update_element(id, |element| patch.apply_to(element));
    }

    /// Remove an element from the current slide, dropping it from the
    /// selection as well.
    pub fn delete_element(&mut self, id: ElementId) {
        self.current_slide_mut().elements.retain(|el| el.id != id);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        self.selected_ids.retain(|&sid| sid != id);
    }

    /// Remove every selected element; no-op when nothing is selected.
    pub fn delete_selected(&mut self) {
        let targets = self.selection_targets();
        if targets.is_empty() {
            return;
        }
        self.current_slide_mut()
            .elements
            .retain(|el| !targets.contains(&el.id));
        self.clear_selection();
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// IDs the selection-wide operations act on: the multi-selection when
    /// non-empty, otherwise the single anchor.
    #[must_use]
    pub fn selection_targets(&self) -> Vec<ElementId> {
        if self.selected_ids.is_empty() {
            self.selected_id.into_iter().collect()
        } else {
            self.selected_ids.clone()
        }
    }

    /// Select a single element.
    pub fn select_element(&mut self, id: ElementId) {
        self.selected_id = Some(id);
        self.selected_ids = vec![id];
    }

    /// Add or remove an element from the multi-selection (shift-click),
    /// re-deriving the anchor from the resulting set.
    pub fn toggle_select_element(&mut self, id: ElementId) {
        if self.selected_ids.contains(&id) {
            self.selected_ids.retain(|&sid| sid != id);
            self.selected_id = self.selected_ids.first().copied();
        } else {
            self.selected_ids.push(id);
            self.selected_id = Some(id);
        }
    }

    /// Replace the selection with the given set; the first entry becomes
    /// the anchor.
    pub fn select_multiple(&mut self, ids: Vec<ElementId>) {
        self.selected_id = ids.first().copied();
        self.selected_ids = ids;
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.selected_ids.clear();
    }

    // -----------------------------------------------------------------------
    // Clipboard
    // -----------------------------------------------------------------------

    /// Snapshot the selected elements into the clipboard (detached copies).
    /// No-op when nothing is selected.
    pub fn copy_selected(&mut self) {
        let targets = self.selection_targets();
        let snapshots: Vec<Element> = self
            .current_slide()
            .elements
            .iter()
            .filter(|el| targets.contains(&el.id))
            .cloned()
            .collect();
        if !snapshots.is_empty() {
            self.clipboard = Some(snapshots);
        }
    }

    /// Clone the clipboard onto the current slide with fresh IDs and a
    /// +20/+20 offset, and select the pasted set. The clipboard is kept so
    /// repeated pastes work; no-op when it is empty.
    pub fn paste(&mut self) {
        let Some(clipboard) = &self.clipboard else {
            return;
        };
        let pasted: Vec<Element> = clipboard
            .iter()
            .map(|el| {
                let mut copy = el.duplicated();
                copy.x += PASTE_OFFSET;
                copy.y += PASTE_OFFSET;
                copy
            })
            .collect();
        let ids: Vec<ElementId> = pasted.iter().map(|el| el.id).collect();
        self.current_slide_mut().elements.extend(pasted);
        self.select_multiple(ids);
    }

    // -----------------------------------------------------------------------
    // Z-order and nudge
    // -----------------------------------------------------------------------

    /// Move an element to the end of the z-order (on top). Missing IDs are
    /// a no-op.
    pub fn bring_to_front(&mut self, id: ElementId) {
        let slide = self.current_slide_mut();
        if let Some(index) = slide.element_index(id) {
            let element = slide.elements.remove(index);
            slide.elements.push(element);
        }
    }

    /// Move an element to the start of the z-order (behind everything).
    pub fn send_to_back(&mut self, id: ElementId) {
        let slide = self.current_slide_mut();
        if let Some(index) = slide.element_index(id) {
            let element = slide.elements.remove(index);
            slide.elements.insert(0, element);
        }
    }

    /// Shift every selected element by `(dx, dy)`; no-op when nothing is
    /// selected.
    pub fn nudge_selected(&mut self, dx: f32, dy: f32) {
        let targets = self.selection_targets();
        if targets.is_empty() {
            return;
        }
        for element in &mut self.current_slide_mut().elements {
            if targets.contains(&element.id) {
                element.x += dx;
                element.y += dy;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Title, serialization, reset
    // -----------------------------------------------------------------------

    /// Set the presentation title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.title = title.into();
    }

    /// Export the document as a plain `{title, slides}` JSON tree.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_to_json(&self) -> DeckResult<serde_json::Value> {
        schema::export_document(&self.document)
    }

    /// Replace the document from a JSON tree, accepting the current
    /// `{title, slides}` shape or the legacy flat `{title, elements}`
    /// shape. Resets the current slide to 0 and clears the selection.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the store untouched when the data has
    /// neither `slides` nor `elements`, or fails to deserialize.
    pub fn load_from_json(&mut self, data: serde_json::Value) -> DeckResult<()> {
        let document = schema::parse_document(data)?;
        self.document = document;
        self.current_slide = 0;
        self.clear_selection();
        Ok(())
    }

    /// Reset to a fresh single-slide document, dropping selection and
    /// clipboard.
    pub fn clear_canvas(&mut self) {
        self.document = Document::new();
        self.current_slide = 0;
        self.clear_selection();
        self.clipboard = None;
    }

    /// Replace the document wholesale (history restore path). Clamps the
    /// slide index and prunes selection entries that no longer resolve.
    pub(crate) fn restore_document(&mut self, document: Document, current_slide: usize) {
        self.document = document;
        self.current_slide = current_slide.min(self.document.slides.len() - 1);
        let slide = &self.document.slides[self.current_slide];
        self.selected_ids
            .retain(|&id| slide.element_index(id).is_some());
        self.selected_id = match self.selected_id {
            Some(id) if self.selected_ids.contains(&id) => Some(id),
            _ => self.selected_ids.first().copied(),
        };
    }
}

impl Default for DeckStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_add_slide_inserts_after_current() {
        let mut store = DeckStore::new();
        store.add_slide(None);
        assert_eq!(store.slides().len(), 2);
        assert_eq!(store.current_slide_index(), 1);

        store.set_current_slide(0);
        store.add_slide(None);
        assert_eq!(store.slides().len(), 3);
        assert_eq!(store.current_slide_index(), 1);
    }

    #[test]
    fn test_delete_slide_keeps_at_least_one() {
        let mut store = DeckStore::new();
        store.delete_slide(0);
        assert_eq!(store.slides().len(), 1);

        store.add_slide(None);
        store.delete_slide(1);
        assert_eq!(store.slides().len(), 1);
        assert_eq!(store.current_slide_index(), 0);
    }

    #[test]
    fn test_delete_slide_clamps_current_index() {
        let mut store = DeckStore::new();
        store.add_slide(None);
        store.add_slide(None);
        assert_eq!(store.current_slide_index(), 2);
        store.delete_slide(2);
        assert_eq!(store.current_slide_index(), 1);
    }

    #[test]
    fn test_duplicate_slide_copies_elements_with_fresh_ids() {
        let mut store = DeckStore::new();
        let original = store.add_element(ElementType::Rect);
        store.duplicate_slide(0);

        assert_eq!(store.slides().len(), 2);
        assert_eq!(store.current_slide_index(), 1);
        let copy = &store.current_slide().elements[0];
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.kind, original.kind);
    }

    #[test]
    fn test_reorder_slides_splice_semantics() {
        let mut store = DeckStore::new();
        store.add_slide(None);
        store.add_slide(None);
        let ids: Vec<_> = store.slides().iter().map(|s| s.id).collect();

        store.reorder_slides(0, 2);
        let after: Vec<_> = store.slides().iter().map(|s| s.id).collect();
        assert_eq!(after, vec![ids[1], ids[2], ids[0]]);
        assert_eq!(store.current_slide_index(), 2);
    }

    #[test]
    fn test_add_element_selects_it() {
        let mut store = DeckStore::new();
        let element = store.add_element(ElementType::Circle);
        assert_eq!(store.selected_id(), Some(element.id));
        assert_eq!(store.selected_ids(), [element.id]);
    }

    #[test]
    fn test_add_element_with_overrides_win() {
        let mut store = DeckStore::new();
        let element = store.add_element_with(ElementType::Rect, |el| {
            el.x = 300.0;
            if let ElementKind::Rect { width, .. } = &mut el.kind {
                *width = 50.0;
            }
        });
        assert!((element.x - 300.0).abs() < f32::EPSILON);
        let ElementKind::Rect { width, height, .. } = element.kind else {
            panic!("expected rect");
        };
        assert!((width - 50.0).abs() < f32::EPSILON);
        // Untouched default survives.
        assert!((height - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_update_element_missing_id_is_noop() {
        let mut store = DeckStore::new();
        store.add_element(ElementType::Rect);
        let before = store.document().clone();
        store.update_element(ElementId::new(), |el| el.x = 999.0);
        assert_eq!(*store.document(), before);
    }

    #[test]
    fn test_delete_element_clears_its_selection_entry() {
        let mut store = DeckStore::new();
        let a = store.add_element(ElementType::Rect);
        let b = store.add_element(ElementType::Circle);
        store.select_multiple(vec![a.id, b.id]);

        store.delete_element(a.id);
        assert_eq!(store.selected_ids(), [b.id]);
        assert_eq!(store.current_slide().elements.len(), 1);
    }

    #[test]
    fn test_delete_selected_falls_back_to_anchor() {
        let mut store = DeckStore::new();
        let element = store.add_element(ElementType::Text);
        assert_eq!(store.selected_id(), Some(element.id));

        store.delete_selected();
        assert!(store.current_slide().elements.is_empty());
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_toggle_select_rederives_anchor() {
        let mut store = DeckStore::new();
        let a = store.add_element(ElementType::Rect);
        let b = store.add_element(ElementType::Circle);

        store.select_element(a.id);
        store.toggle_select_element(b.id);
        assert_eq!(store.selected_ids(), [a.id, b.id]);
        assert_eq!(store.selected_id(), Some(b.id));

        store.toggle_select_element(b.id);
        assert_eq!(store.selected_ids(), [a.id]);
        assert_eq!(store.selected_id(), Some(a.id));

        store.toggle_select_element(a.id);
        assert!(store.selected_ids().is_empty());
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_copy_paste_offsets_and_mints_ids() {
        let mut store = DeckStore::new();
        let element = store.add_element_with(ElementType::Rect, |el| {
            el.x = 100.0;
            el.y = 100.0;
        });

        store.copy_selected();
        store.paste();

        let elements = &store.current_slide().elements;
        assert_eq!(elements.len(), 2);
        let pasted = &elements[1];
        assert_ne!(pasted.id, element.id);
        assert!((pasted.x - 120.0).abs() < f32::EPSILON);
        assert!((pasted.y - 120.0).abs() < f32::EPSILON);
        assert_eq!(store.selected_ids(), [pasted.id]);

        // Clipboard is non-destructive: paste again.
        store.paste();
        assert_eq!(store.current_slide().elements.len(), 3);
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut store = DeckStore::new();
        store.paste();
        assert!(store.current_slide().elements.is_empty());
    }

    #[test]
    fn test_copy_with_no_selection_is_noop() {
        let mut store = DeckStore::new();
        store.add_element(ElementType::Rect);
        store.clear_selection();
        store.copy_selected();
        assert!(!store.has_clipboard());
    }

    #[test]
    fn test_z_order_operations() {
        let mut store = DeckStore::new();
        let a = store.add_element(ElementType::Rect);
        let b = store.add_element(ElementType::Circle);
        let c = store.add_element(ElementType::Line);

        store.bring_to_front(a.id);
        let order: Vec<_> = store.current_slide().elements.iter().map(|el| el.id).collect();
        assert_eq!(order, vec![b.id, c.id, a.id]);

        store.send_to_back(a.id);
        let order: Vec<_> = store.current_slide().elements.iter().map(|el| el.id).collect();
        assert_eq!(order, vec![a.id, b.id, c.id]);

        // Missing ID is a no-op.
        store.bring_to_front(ElementId::new());
        assert_eq!(store.current_slide().elements.len(), 3);
    }

    #[test]
    fn test_nudge_moves_whole_selection() {
        let mut store = DeckStore::new();
        let a = store.add_element(ElementType::Rect);
        let b = store.add_element(ElementType::Circle);
        store.select_multiple(vec![a.id, b.id]);

        store.nudge_selected(5.0, -3.0);
        for element in &store.current_slide().elements {
            assert!((element.x - 105.0).abs() < f32::EPSILON);
            assert!((element.y - 97.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_clear_canvas_resets_everything() {
        let mut store = DeckStore::new();
        store.set_title("My Deck");
        store.add_element(ElementType::Rect);
        store.copy_selected();
        store.add_slide(None);

        store.clear_canvas();
        assert_eq!(store.slides().len(), 1);
        assert!(store.current_slide().elements.is_empty());
        assert_eq!(store.title(), crate::document::DEFAULT_TITLE);
        assert!(store.selected_id().is_none());
        assert!(!store.has_clipboard());
    }

    #[test]
    fn test_switching_slides_clears_selection() {
        let mut store = DeckStore::new();
        store.add_slide(None);
        store.set_current_slide(0);
        store.add_element(ElementType::Rect);
        assert!(store.selected_id().is_some());

        store.set_current_slide(1);
        assert!(store.selected_id().is_none());

        // Out of range leaves everything alone.
        store.set_current_slide(10);
        assert_eq!(store.current_slide_index(), 1);
    }
}
