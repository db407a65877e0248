use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;

/// Header glyphs. One per state, fixed for the lifetime of the widget.
const EXPANDED_ICON: &str = "▼";
const COLLAPSED_ICON: &str = "▶";

const HEADER_HEIGHT: f32 = 24.0;
const HEADER_BG: egui::Color32 = egui::Color32::from_rgb(93, 93, 93);
const HEADER_BG_HOVER: egui::Color32 = egui::Color32::from_rgb(110, 110, 110);
const PANEL_BG: egui::Color32 = egui::Color32::from_rgb(73, 73, 73);

/// Shared handle to a content panel. The section that wraps the panel is the
/// only writer of its visibility; everyone else just reads or populates it.
pub type PanelHandle = Rc<RefCell<ContentPanel>>;

/* =========================
   Content panel
   ========================= */

/// A togglable container. Children are supplied per frame by the caller and
/// are only added to the layout while the panel is visible.
pub struct ContentPanel {
    visible: bool,
    styled: bool,
}

impl ContentPanel {
    pub fn new(styled: bool) -> PanelHandle {
        Rc::new(RefCell::new(Self {
            visible: true,
            styled,
        }))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn show(&self, ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
        if !self.visible {
            return;
        }

        if self.styled {
            egui::Frame::none()
                .fill(PANEL_BG)
                .rounding(egui::Rounding::same(2.0))
                .inner_margin(egui::Margin::symmetric(8.0, 6.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    add_contents(ui);
                });
        } else {
            add_contents(ui);
        }
    }
}

/* =========================
   Collapsible section
   ========================= */

/// Clickable header that shows or hides an externally-owned content panel.
///
/// Two states, Collapsed and Expanded, starting collapsed. The first
/// transition into Expanded fires every registered observer exactly once for
/// the lifetime of the section; later expansions never re-fire.
pub struct CollapsibleSection {
    title: String,
    expanded: bool,
    has_expanded_once: bool,
    content: PanelHandle,
    observers: Vec<Box<dyn FnMut()>>,
}

impl CollapsibleSection {
    pub fn new(title: impl Into<String>, content: PanelHandle) -> Self {
        content.borrow_mut().set_visible(false);
        Self {
            title: title.into(),
            expanded: false,
            has_expanded_once: false,
            content,
            observers: Vec::new(),
        }
    }

    /// Register a callback for the one-time first-expansion notification.
    pub fn on_first_expansion(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn has_expanded_once(&self) -> bool {
        self.has_expanded_once
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The header glyph for the current state.
    pub fn icon(&self) -> &'static str {
        if self.expanded {
            EXPANDED_ICON
        } else {
            COLLAPSED_ICON
        }
    }

    /// Activate event: expand a hidden panel, collapse a visible one.
    pub fn on_activate(&mut self) {
        let hidden = !self.content.borrow().is_visible();
        if hidden {
            self.expand();
        } else {
            self.collapse();
        }
    }

    pub fn expand(&mut self) {
        if !self.has_expanded_once {
            self.has_expanded_once = true;
            for observer in &mut self.observers {
                observer();
            }
        }
        self.expanded = true;
        self.content.borrow_mut().set_visible(true);
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
        self.content.borrow_mut().set_visible(false);
    }

    /// Draws the header row; a click anywhere on it is the Activate event.
    pub fn header_ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let desired = egui::vec2(ui.available_width(), HEADER_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let fill = if response.hovered() {
                HEADER_BG_HOVER
            } else {
                HEADER_BG
            };
            ui.painter()
                .rect_filled(rect, egui::Rounding::same(2.0), fill);
            ui.painter().text(
                rect.left_center() + egui::vec2(8.0, 0.0),
                egui::Align2::LEFT_CENTER,
                format!("{} {}", self.icon(), self.title),
                egui::FontId::proportional(14.0),
                egui::Color32::WHITE,
            );
        }

        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            self.on_activate();
        }
        response
    }

    /// Header plus content in one call, for standalone use of the section.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) -> egui::Response {
        let response = self.header_ui(ui);
        let panel = Rc::clone(&self.content);
        panel.borrow().show(ui, add_contents);
        response
    }
}

/* =========================
   Section host
   ========================= */

type Observers = Rc<RefCell<Vec<Box<dyn FnMut()>>>>;

/// Owns a content panel and the section wrapping it, and re-exposes the
/// section's control surface. The host's first-expansion notification is a
/// pass-through of the section's own, one re-emission per underlying event.
pub struct SectionHost {
    section: CollapsibleSection,
    panel: PanelHandle,
    observers: Observers,
}

impl SectionHost {
    pub fn new(title: impl Into<String>, styled_background: bool) -> Self {
        let panel = ContentPanel::new(styled_background);
        let mut section = CollapsibleSection::new(title, Rc::clone(&panel));

        let observers: Observers = Rc::new(RefCell::new(Vec::new()));
        let relay = Rc::clone(&observers);
        section.on_first_expansion(move || {
            for observer in relay.borrow_mut().iter_mut() {
                observer();
            }
        });

        Self {
            section,
            panel,
            observers,
        }
    }

    /// The owned panel, for callers that populate or inspect it.
    pub fn content_panel(&self) -> PanelHandle {
        Rc::clone(&self.panel)
    }

    pub fn on_first_expansion(&mut self, observer: impl FnMut() + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn expand(&mut self) {
        self.section.expand();
    }

    pub fn collapse(&mut self) {
        self.section.collapse();
    }

    /// Programmatic Activate, same bookkeeping as a header click.
    pub fn toggle(&mut self) {
        self.section.on_activate();
    }

    pub fn is_expanded(&self) -> bool {
        self.section.is_expanded()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.section.set_title(title);
    }

    pub fn show(&mut self, ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
        let _ = self.section.header_ui(ui);
        let panel = Rc::clone(&self.panel);
        panel.borrow().show(ui, add_contents);
        ui.add_space(4.0);
    }
}

/* =========================
   Tests
   ========================= */

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counting_section() -> (CollapsibleSection, PanelHandle, Rc<Cell<u32>>) {
        let panel = ContentPanel::new(false);
        let mut section = CollapsibleSection::new("Group A", Rc::clone(&panel));
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        section.on_first_expansion(move || seen.set(seen.get() + 1));
        (section, panel, count)
    }

    #[test]
    fn starts_collapsed_with_hidden_panel() {
        let (section, panel, count) = counting_section();
        assert!(!section.is_expanded());
        assert!(!section.has_expanded_once());
        assert!(!panel.borrow().is_visible());
        assert_eq!(section.icon(), COLLAPSED_ICON);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn toggle_parity_over_many_activations() {
        let (mut section, panel, _count) = counting_section();
        for n in 1..=7 {
            section.on_activate();
            let expect_expanded = n % 2 == 1;
            assert_eq!(section.is_expanded(), expect_expanded, "after {n} toggles");
            assert_eq!(panel.borrow().is_visible(), expect_expanded);
        }
    }

    #[test]
    fn first_expansion_fires_exactly_once() {
        let (mut section, _panel, count) = counting_section();
        section.expand();
        assert_eq!(count.get(), 1);

        section.collapse();
        section.expand();
        section.on_activate(); // collapse
        section.on_activate(); // expand again
        assert_eq!(count.get(), 1);
        assert!(section.has_expanded_once());
    }

    #[test]
    fn collapse_never_notifies() {
        let (mut section, panel, count) = counting_section();
        section.collapse();
        section.collapse();
        assert_eq!(count.get(), 0);
        assert!(!panel.borrow().is_visible());
        assert!(!section.has_expanded_once());
    }

    #[test]
    fn double_expand_is_idempotent() {
        let (mut section, panel, count) = counting_section();
        section.expand();
        section.expand();
        assert!(section.is_expanded());
        assert!(panel.borrow().is_visible());
        assert_eq!(section.icon(), EXPANDED_ICON);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn expand_collapse_scenario() {
        let (mut section, panel, count) = counting_section();
        assert!(!panel.borrow().is_visible());
        assert_eq!(section.icon(), COLLAPSED_ICON);

        section.expand();
        assert!(panel.borrow().is_visible());
        assert_eq!(section.icon(), EXPANDED_ICON);
        assert_eq!(count.get(), 1);

        section.collapse();
        assert!(!panel.borrow().is_visible());
        assert_eq!(section.icon(), COLLAPSED_ICON);
        assert_eq!(count.get(), 1);

        section.expand();
        assert!(panel.borrow().is_visible());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn notification_fires_before_panel_becomes_visible() {
        let panel = ContentPanel::new(false);
        let mut section = CollapsibleSection::new("Group A", Rc::clone(&panel));

        // Observers run after the flag flips but before the panel is shown.
        let panel_visible_during_callback = Rc::new(Cell::new(true));
        let seen = Rc::clone(&panel_visible_during_callback);
        let probe = Rc::clone(&panel);
        section.on_first_expansion(move || seen.set(probe.borrow().is_visible()));

        section.expand();
        assert!(!panel_visible_during_callback.get());
    }

    #[test]
    fn multiple_observers_each_called_once() {
        let panel = ContentPanel::new(false);
        let mut section = CollapsibleSection::new("Group A", panel);
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        for count in [&first, &second] {
            let seen = Rc::clone(count);
            section.on_first_expansion(move || seen.set(seen.get() + 1));
        }

        section.expand();
        section.collapse();
        section.expand();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn set_title_leaves_state_alone() {
        let (mut section, _panel, count) = counting_section();
        section.expand();
        section.set_title("Group B");
        assert_eq!(section.title(), "Group B");
        assert!(section.is_expanded());
        assert!(section.has_expanded_once());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn host_toggle_reaches_panel_and_subscriber() {
        let mut host = SectionHost::new("Styled", true);
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        host.on_first_expansion(move || seen.set(seen.get() + 1));

        assert!(!host.content_panel().borrow().is_visible());
        host.toggle();
        assert_eq!(count.get(), 1);
        assert!(host.content_panel().borrow().is_visible());

        host.toggle();
        host.toggle();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn host_passes_through_once_per_instance() {
        let mut host = SectionHost::new("Plain", false);
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        host.on_first_expansion(move || seen.set(seen.get() + 1));

        host.expand();
        host.collapse();
        host.expand();
        assert_eq!(count.get(), 1);

        // A fresh host starts its own lifetime.
        let mut other = SectionHost::new("Plain", false);
        let seen = Rc::clone(&count);
        other.on_first_expansion(move || seen.set(seen.get() + 1));
        other.expand();
        assert_eq!(count.get(), 2);
    }
}
