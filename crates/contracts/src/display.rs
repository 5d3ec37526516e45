//! DisplaySurface trait - screen output interface

use crate::SlotId;

/// Set of static, pre-declared text widgets
///
/// Only the UI-owning context writes to a surface.
pub trait DisplaySurface {
    /// Whether the layout declares this slot
    fn has_slot(&self, slot: SlotId) -> bool;

    /// Replace the text shown in a slot
    fn set_text(&mut self, slot: SlotId, text: &str);
}
