use eframe::egui;

use super::app::LazySection;
use super::sigils_tab::list_section;
use crate::model::profile::ProfileModel;

const TRIBUTE_CATALOG: &[&str] = &[
    "Tribute of Ascendance",
    "Tribute of Craftsmanship",
    "Tribute of Growth",
    "Tribute of Harmony",
    "Tribute of Mastery",
    "Tribute of Pride",
    "Tribute of Radiance",
    "Tribute of Titans",
];

pub struct TributesTab {
    favored: LazySection,
    suggestions: Vec<&'static str>,
}

impl TributesTab {
    pub fn new() -> Self {
        Self {
            favored: LazySection::new("Favored Tributes", true),
            suggestions: Vec::new(),
        }
    }

    pub fn reload(&mut self, _profile: &ProfileModel) {
        *self = Self::new();
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, profile: &mut ProfileModel) {
        ui.heading("Tributes");

        ui.horizontal(|ui| {
            ui.label("Minimum tier");
            ui.add(
                egui::DragValue::new(&mut profile.tributes.min_tier)
                    .speed(1)
                    .clamp_range(0..=10),
            );
        });

        ui.separator();

        if self.favored.take_first_expansion() {
            self.suggestions = TRIBUTE_CATALOG.to_vec();
            log::debug!("built tribute suggestion cache");
        }

        let suggestions = &self.suggestions;
        self.favored.host.show(ui, |ui| {
            list_section(
                ui,
                &mut profile.tributes.favored,
                suggestions,
                "Add tribute",
                "tribute_favored",
            );
        });
    }
}
