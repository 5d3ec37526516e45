//! TextPanel - in-memory display surface
//!
//! One text widget per declared slot. The terminal host renders it as a
//! name/value table; tests inspect it directly.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use contracts::{DisplaySurface, SensorKind, SlotId};

/// Width of the name column in `render`
const NAME_WIDTH: usize = 44;

#[derive(Debug, Clone, Default)]
struct TextWidget {
    text: String,
    writes: u64,
}

/// Static layout of text widgets
#[derive(Debug, Clone, Default)]
pub struct TextPanel {
    widgets: BTreeMap<SlotId, TextWidget>,
}

impl TextPanel {
    /// Layout with one slot per supported sensor kind
    pub fn sensor_layout() -> Self {
        Self::with_slots(SensorKind::ALL.iter().map(|k| k.slot()))
    }

    /// Layout declaring exactly the given slots
    pub fn with_slots(slots: impl IntoIterator<Item = SlotId>) -> Self {
        Self {
            widgets: slots
                .into_iter()
                .map(|slot| (slot, TextWidget::default()))
                .collect(),
        }
    }

    /// Current text of a slot
    pub fn text(&self, slot: SlotId) -> Option<&str> {
        self.widgets.get(&slot).map(|w| w.text.as_str())
    }

    /// Current text of a kind's slot
    pub fn text_for(&self, kind: SensorKind) -> Option<&str> {
        self.text(kind.slot())
    }

    /// How many times a slot has been written
    pub fn writes(&self, slot: SlotId) -> u64 {
        self.widgets.get(&slot).map_or(0, |w| w.writes)
    }

    /// Number of declared slots
    pub fn slot_count(&self) -> usize {
        self.widgets.len()
    }

    /// Name/value table in sensor table order
    pub fn render(&self) -> String {
        let mut out = String::new();
        for kind in SensorKind::ALL {
            if let Some(text) = self.text_for(*kind) {
                let _ = writeln!(out, "{:<NAME_WIDTH$}{}", kind.display_name(), text);
            }
        }
        out
    }
}

impl DisplaySurface for TextPanel {
    fn has_slot(&self, slot: SlotId) -> bool {
        self.widgets.contains_key(&slot)
    }

    fn set_text(&mut self, slot: SlotId, text: &str) {
        if let Some(widget) = self.widgets.get_mut(&slot) {
            widget.text.clear();
            widget.text.push_str(text);
            widget.writes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_layout_declares_all_slots() {
        let panel = TextPanel::sensor_layout();
        assert_eq!(panel.slot_count(), 19);
        assert!(panel.has_slot(SensorKind::StepDetector.slot()));
        assert_eq!(panel.text_for(SensorKind::Light), Some(""));
    }

    #[test]
    fn test_set_text_replaces() {
        let mut panel = TextPanel::sensor_layout();
        let slot = SensorKind::Light.slot();
        panel.set_text(slot, "10.0");
        panel.set_text(slot, "11.0");
        assert_eq!(panel.text(slot), Some("11.0"));
        assert_eq!(panel.writes(slot), 2);
    }

    #[test]
    fn test_undeclared_slot_ignored() {
        let mut panel = TextPanel::with_slots([SensorKind::Light.slot()]);
        panel.set_text(SensorKind::Gravity.slot(), "1.0");
        assert!(panel.text_for(SensorKind::Gravity).is_none());
        assert_eq!(panel.writes(SensorKind::Gravity.slot()), 0);
    }

    #[test]
    fn test_render_lists_names_in_table_order() {
        let mut panel = TextPanel::with_slots([
            SensorKind::StepCounter.slot(),
            SensorKind::Accelerometer.slot(),
        ]);
        panel.set_text(SensorKind::StepCounter.slot(), "12.0");
        let rendered = panel.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("android.sensor.accelerometer"));
        assert!(lines[1].starts_with("android.sensor.step_counter"));
        assert!(lines[1].ends_with("12.0"));
    }
}
