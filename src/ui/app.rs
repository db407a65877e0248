use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use eframe::egui;

use crate::config::{loader, profile_io};
use crate::model::profile::ProfileModel;
use crate::ui::affixes_tab::AffixesTab;
use crate::ui::collapsible::{CollapsibleSection, ContentPanel, SectionHost};
use crate::ui::settings::UiSettings;
use crate::ui::settings_io;
use crate::ui::sigils_tab::SigilsTab;
use crate::ui::tributes_tab::TributesTab;
use crate::ui::uniques_tab::UniquesTab;

/* =========================
   Tabs
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTab {
    Affixes,
    Sigils,
    Tributes,
    Uniques,
}

impl Default for EditorTab {
    fn default() -> Self {
        EditorTab::Affixes
    }
}

/* =========================
   Dialogs
   ========================= */

enum Dialog {
    ConfirmSave { issues: Vec<String> },
    Notice { text: String },
}

enum DialogAction {
    KeepOpen,
    SaveAnyway,
    Discard,
    Dismiss,
}

/* =========================
   App
   ========================= */

pub struct ProfileEditorApp {
    profile: ProfileModel,
    tab: EditorTab,
    dialog: Option<Dialog>,
    settings: UiSettings,

    affixes_tab: AffixesTab,
    sigils_tab: SigilsTab,
    tributes_tab: TributesTab,
    uniques_tab: UniquesTab,

    /// Bare section over a caller-owned panel, no host styling.
    validation_section: CollapsibleSection,
}

impl ProfileEditorApp {
    pub fn new() -> Self {
        let settings = settings_io::load_settings();
        let validation_section = CollapsibleSection::new("Validation", ContentPanel::new(false));

        let mut app = Self {
            profile: ProfileModel {
                name: "new_profile".to_string(),
                ..Default::default()
            },
            tab: EditorTab::default(),
            dialog: None,
            settings,
            affixes_tab: AffixesTab::new(),
            sigils_tab: SigilsTab::new(),
            tributes_tab: TributesTab::new(),
            uniques_tab: UniquesTab::new(),
            validation_section,
        };

        if let Some(path) = app.settings.last_profile.clone() {
            if path.is_file() {
                app.load_from(&path);
            }
        }
        app.reload_tabs();
        app
    }

    fn reload_tabs(&mut self) {
        self.affixes_tab.reload(&self.profile);
        self.sigils_tab.reload(&self.profile);
        self.tributes_tab.reload(&self.profile);
        self.uniques_tab.reload(&self.profile);
    }

    fn reload_current_tab(&mut self) {
        match self.tab {
            EditorTab::Affixes => self.affixes_tab.reload(&self.profile),
            EditorTab::Sigils => self.sigils_tab.reload(&self.profile),
            EditorTab::Tributes => self.tributes_tab.reload(&self.profile),
            EditorTab::Uniques => self.uniques_tab.reload(&self.profile),
        }
    }

    /* ---------- Save flow ---------- */

    fn request_save(&mut self) {
        let issues = self.profile.validate();
        if issues.is_empty() {
            self.do_save();
        } else {
            log::warn!("profile failed validation with {} issue(s)", issues.len());
            self.dialog = Some(Dialog::ConfirmSave { issues });
        }
    }

    fn do_save(&mut self) {
        match profile_io::save_profile(&loader::profiles_dir(), &self.profile, "custom") {
            Ok(path) => {
                self.settings.last_profile = Some(path.clone());
                settings_io::save_settings(&self.settings);
                self.dialog = Some(Dialog::Notice {
                    text: format!("Profile saved successfully to {}", path.display()),
                });
            }
            Err(err) => {
                log::error!("failed to save profile: {err:#}");
                self.dialog = Some(Dialog::Notice {
                    text: format!("Failed to save profile: {err:#}"),
                });
            }
        }
    }

    /* ---------- Load flow ---------- */

    fn open_profile(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("YAML profile", &["yaml", "yml"])
            .set_directory(loader::profiles_dir())
            .pick_file();

        if let Some(path) = picked {
            self.load_from(&path);
            self.reload_tabs();
        }
    }

    fn load_from(&mut self, path: &Path) {
        match profile_io::load_profile(path) {
            Ok(profile) => {
                log::info!("loaded profile {}", path.display());
                self.profile = profile;
                self.settings.last_profile = Some(path.to_path_buf());
                settings_io::save_settings(&self.settings);
            }
            Err(err) => {
                log::error!("failed to load profile: {err:#}");
                self.dialog = Some(Dialog::Notice {
                    text: format!("Failed to load profile: {err:#}"),
                });
            }
        }
    }

    /* ---------- Dialogs ---------- */

    fn draw_dialogs(&mut self, ctx: &egui::Context) {
        let mut action = DialogAction::KeepOpen;

        match &self.dialog {
            None => return,
            Some(Dialog::ConfirmSave { issues }) => {
                egui::Window::new("Warning")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                    .show(ctx, |ui| {
                        ui.label(
                            "The profile model might not be valid. \
                             Do you still want to save your changes?",
                        );
                        ui.add_space(4.0);
                        for issue in issues {
                            ui.label(format!("• {issue}"));
                        }
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("Save").clicked() {
                                action = DialogAction::SaveAnyway;
                            }
                            if ui.button("Discard").clicked() {
                                action = DialogAction::Discard;
                            }
                        });
                    });
            }
            Some(Dialog::Notice { text }) => {
                egui::Window::new("Info")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                    .show(ctx, |ui| {
                        ui.label(text);
                        ui.add_space(8.0);
                        if ui.button("OK").clicked() {
                            action = DialogAction::Dismiss;
                        }
                    });
            }
        }

        match action {
            DialogAction::KeepOpen => {}
            DialogAction::SaveAnyway => {
                self.dialog = None;
                self.do_save();
            }
            DialogAction::Discard => {
                self.dialog = Some(Dialog::Notice {
                    text: "Profile not saved.".to_string(),
                });
            }
            DialogAction::Dismiss => self.dialog = None,
        }
    }
}

impl eframe::App for ProfileEditorApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        /* TOOLBAR */
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Profile");
                ui.add_sized(
                    [200.0, 20.0],
                    egui::TextEdit::singleline(&mut self.profile.name),
                );

                if ui.button("Open…").clicked() {
                    self.open_profile();
                }
                if ui.button("Save").clicked() {
                    self.request_save();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let response = ui.add(
                        egui::Slider::new(&mut self.settings.ui_scale, 0.75..=2.0)
                            .text("UI scale"),
                    );
                    if response.drag_stopped() {
                        settings_io::save_settings(&self.settings);
                    }
                });
            });
        });

        /* VALIDATION */
        egui::TopBottomPanel::bottom("validation").show(ctx, |ui| {
            let issues = self.profile.validate();
            self.validation_section
                .set_title(format!("Validation ({} issue(s))", issues.len()));
            // Surface the first problems automatically; after that the user
            // decides what stays open.
            if !issues.is_empty() && !self.validation_section.has_expanded_once() {
                self.validation_section.expand();
            }
            let _ = self.validation_section.show(ui, |ui| {
                if issues.is_empty() {
                    ui.label("No issues.");
                } else {
                    for issue in &issues {
                        ui.label(format!("• {issue}"));
                    }
                }
            });
        });

        /* CENTER */
        egui::CentralPanel::default().show(ctx, |ui| {
            let previous = self.tab;
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, EditorTab::Affixes, "Affixes");
                ui.selectable_value(&mut self.tab, EditorTab::Sigils, "Sigils");
                ui.selectable_value(&mut self.tab, EditorTab::Tributes, "Tributes");
                ui.selectable_value(&mut self.tab, EditorTab::Uniques, "Uniques");
            });
            if self.tab != previous {
                self.reload_current_tab();
            }

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                EditorTab::Affixes => self.affixes_tab.ui(ui, &mut self.profile),
                EditorTab::Sigils => self.sigils_tab.ui(ui, &mut self.profile),
                EditorTab::Tributes => self.tributes_tab.ui(ui, &mut self.profile),
                EditorTab::Uniques => self.uniques_tab.ui(ui, &mut self.profile),
            });
        });

        self.draw_dialogs(ctx);
    }
}

/* =========================
   UI Helpers
   ========================= */

/// A section host plus the flag its first-expansion callback sets. The owning
/// tab checks the flag on the next frame it draws and does its one-time work
/// with full access to the model.
pub(crate) struct LazySection {
    pub host: SectionHost,
    pending: Rc<Cell<bool>>,
}

impl LazySection {
    pub fn new(title: &str, styled: bool) -> Self {
        let mut host = SectionHost::new(title, styled);
        let pending = Rc::new(Cell::new(false));
        let flag = Rc::clone(&pending);
        host.on_first_expansion(move || flag.set(true));
        Self { host, pending }
    }

    /// True exactly once, after the host's first expansion.
    pub fn take_first_expansion(&mut self) -> bool {
        self.pending.replace(false)
    }
}

pub(crate) fn editable_list<T: std::hash::Hash>(
    ui: &mut egui::Ui,
    items: &mut Vec<String>,
    hint: &str,
    id_key: T,
) {
    let mut remove_index: Option<usize> = None;
    for i in 0..items.len() {
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut items[i]);
            if ui.small_button("❌").clicked() {
                remove_index = Some(i);
            }
        });
    }
    if let Some(i) = remove_index {
        items.remove(i);
    }

    ui.horizontal(|ui| {
        let id = ui.make_persistent_id(id_key);
        let mut new_item = ui
            .data_mut(|d| d.get_persisted::<String>(id))
            .unwrap_or_default();
        ui.add(egui::TextEdit::singleline(&mut new_item).hint_text(hint));
        if ui.button("➕").clicked() {
            let trimmed = new_item.trim();
            if !trimmed.is_empty() {
                items.push(trimmed.to_string());
                new_item.clear();
            }
        }
        ui.data_mut(|d| d.insert_persisted(id, new_item));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_section_reports_first_expansion_once() {
        let mut section = LazySection::new("Group", false);
        assert!(!section.take_first_expansion());

        section.host.toggle();
        assert!(section.take_first_expansion());
        assert!(!section.take_first_expansion());

        section.host.toggle();
        section.host.toggle();
        assert!(!section.take_first_expansion());
    }
}
