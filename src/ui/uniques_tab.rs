use eframe::egui;

use super::affixes_tab::affix_pool_editor;
use super::app::LazySection;
use crate::model::profile::{ProfileModel, UniqueFilter};

const UNIQUE_CATALOG: &[&str] = &[
    "Andariel's Visage",
    "Doombringer",
    "Harlequin Crest",
    "Ring of Starless Skies",
    "Shroud of False Death",
    "The Grandfather",
];

pub struct UniquesTab {
    tracked: LazySection,
    suggestions: Vec<&'static str>,
}

impl UniquesTab {
    pub fn new() -> Self {
        Self {
            tracked: LazySection::new("Tracked Uniques", true),
            suggestions: Vec::new(),
        }
    }

    pub fn reload(&mut self, _profile: &ProfileModel) {
        *self = Self::new();
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, profile: &mut ProfileModel) {
        ui.heading("Uniques");

        if ui.button("➕ Track Unique").clicked() {
            profile.uniques.push(UniqueFilter {
                name: "New Unique".to_string(),
                ..Default::default()
            });
            if !self.tracked.host.is_expanded() {
                self.tracked.host.expand();
            }
        }

        ui.separator();

        if self.tracked.take_first_expansion() {
            self.suggestions = UNIQUE_CATALOG.to_vec();
            log::debug!("built unique suggestion cache");
        }

        let suggestions = &self.suggestions;
        self.tracked.host.show(ui, |ui| {
            let mut remove_index: Option<usize> = None;

            for (i, unique) in profile.uniques.iter_mut().enumerate() {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut unique.name);
                        ui.label("Min power");
                        ui.add(
                            egui::DragValue::new(&mut unique.min_power)
                                .speed(5)
                                .clamp_range(0..=1000),
                        );
                        if ui.small_button("❌").clicked() {
                            remove_index = Some(i);
                        }
                    });

                    ui.label("Required affixes");
                    affix_pool_editor(ui, &mut unique.affix_pool);
                });
                ui.add_space(6.0);
            }

            if let Some(i) = remove_index {
                profile.uniques.remove(i);
            }

            if !suggestions.is_empty() {
                ui.label("Quick add");
                ui.horizontal_wrapped(|ui| {
                    for name in suggestions {
                        let already = profile
                            .uniques
                            .iter()
                            .any(|u| u.name.eq_ignore_ascii_case(name));
                        if ui
                            .add_enabled(!already, egui::Button::new(*name).small())
                            .clicked()
                        {
                            profile.uniques.push(UniqueFilter {
                                name: (*name).to_string(),
                                ..Default::default()
                            });
                        }
                    }
                });
            }
        });
    }
}
