use eframe::egui;

use super::app::{editable_list, LazySection};
use crate::model::profile::ProfileModel;

const SIGIL_CATALOG: &[&str] = &[
    "Avarice",
    "Blood Blister",
    "Drifting Shade",
    "Lightning Storm",
    "Monster Cold Resist",
    "Quick Killer",
    "Reduce Cooldowns",
    "Shadow Damage",
    "Volcanic",
];

pub struct SigilsTab {
    blacklist: LazySection,
    whitelist: LazySection,
    suggestions: Vec<&'static str>,
}

impl SigilsTab {
    pub fn new() -> Self {
        Self {
            blacklist: LazySection::new("Blacklist", true),
            whitelist: LazySection::new("Whitelist", true),
            suggestions: Vec::new(),
        }
    }

    pub fn reload(&mut self, _profile: &ProfileModel) {
        *self = Self::new();
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, profile: &mut ProfileModel) {
        ui.heading("Sigil Filters");

        let overlap = profile.sigils.overlap();
        if !overlap.is_empty() {
            ui.colored_label(
                egui::Color32::YELLOW,
                format!("Listed in both directions: {}", overlap.join(", ")),
            );
        }

        ui.separator();

        let blacklist_opened = self.blacklist.take_first_expansion();
        let whitelist_opened = self.whitelist.take_first_expansion();
        if (blacklist_opened || whitelist_opened) && self.suggestions.is_empty() {
            self.suggestions = SIGIL_CATALOG.to_vec();
            log::debug!("built sigil suggestion cache");
        }

        let suggestions = &self.suggestions;
        self.blacklist.host.show(ui, |ui| {
            list_section(
                ui,
                &mut profile.sigils.blacklist,
                suggestions,
                "Add sigil to avoid",
                "sigil_blacklist",
            );
        });
        self.whitelist.host.show(ui, |ui| {
            list_section(
                ui,
                &mut profile.sigils.whitelist,
                suggestions,
                "Only run these",
                "sigil_whitelist",
            );
        });
    }
}

/// Editable name list plus quick-add buttons, shared with the tributes tab.
pub(crate) fn list_section(
    ui: &mut egui::Ui,
    items: &mut Vec<String>,
    suggestions: &[&'static str],
    hint: &str,
    id_source: &str,
) {
    editable_list(ui, items, hint, id_source);

    if !suggestions.is_empty() {
        ui.label("Quick add");
        ui.horizontal_wrapped(|ui| {
            for name in suggestions {
                let already = items.iter().any(|s| s.eq_ignore_ascii_case(name));
                if ui
                    .add_enabled(!already, egui::Button::new(*name).small())
                    .clicked()
                {
                    items.push((*name).to_string());
                }
            }
        });
    }
}
