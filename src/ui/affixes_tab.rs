use eframe::egui;

use super::app::{editable_list, LazySection};
use crate::model::profile::{AffixEntry, AffixGroup, ProfileModel};

/// Affixes the quick-add row offers before the user types anything.
const AFFIX_CATALOG: &[&str] = &[
    "Attack Speed",
    "Cooldown Reduction",
    "Critical Strike Chance",
    "Critical Strike Damage",
    "Damage to Close Enemies",
    "Lucky Hit Chance",
    "Maximum Life",
    "Movement Speed",
    "Resource Generation",
    "Vulnerable Damage",
];

struct GroupSection {
    section: LazySection,
    suggestions: Vec<&'static str>,
}

impl GroupSection {
    fn new(title: &str) -> Self {
        Self {
            section: LazySection::new(title, true),
            suggestions: Vec::new(),
        }
    }
}

pub struct AffixesTab {
    sections: Vec<GroupSection>,
}

impl AffixesTab {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Fresh section state for the current model, all groups collapsed again.
    pub fn reload(&mut self, profile: &ProfileModel) {
        self.sections = profile
            .affixes
            .iter()
            .map(|group| GroupSection::new(&group.name))
            .collect();
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, profile: &mut ProfileModel) {
        ui.heading("Affix Groups");

        ui.horizontal(|ui| {
            if ui.button("➕ Add Group").clicked() {
                let name = format!("Group {}", profile.affixes.len() + 1);
                profile.affixes.push(AffixGroup {
                    name: name.clone(),
                    ..Default::default()
                });
                self.sections.push(GroupSection::new(&name));
            }
            if ui.button("Expand all").clicked() {
                for entry in &mut self.sections {
                    entry.section.host.expand();
                }
            }
            if ui.button("Collapse all").clicked() {
                for entry in &mut self.sections {
                    entry.section.host.collapse();
                }
            }
        });

        ui.separator();

        // Edits outside this tab can leave the hosts out of step.
        while self.sections.len() < profile.affixes.len() {
            let name = &profile.affixes[self.sections.len()].name;
            self.sections.push(GroupSection::new(name));
        }
        self.sections.truncate(profile.affixes.len());

        let mut remove_index: Option<usize> = None;

        for (i, group) in profile.affixes.iter_mut().enumerate() {
            let entry = &mut self.sections[i];

            if entry.section.take_first_expansion() {
                entry.suggestions = AFFIX_CATALOG
                    .iter()
                    .copied()
                    .filter(|name| !group.affix_pool.iter().any(|a| a.name == *name))
                    .collect();
                log::debug!("built suggestion cache for affix group '{}'", group.name);
            }

            entry.section.host.set_title(group.name.clone());
            let suggestions = &entry.suggestions;
            entry.section.host.show(ui, |ui| {
                if group_editor(ui, group, suggestions, i) {
                    remove_index = Some(i);
                }
            });
        }

        if let Some(i) = remove_index {
            profile.affixes.remove(i);
            self.sections.remove(i);
        }
    }
}

/// Returns true when the user asked to remove the group.
fn group_editor(
    ui: &mut egui::Ui,
    group: &mut AffixGroup,
    suggestions: &[&'static str],
    index: usize,
) -> bool {
    let mut remove = false;

    ui.horizontal(|ui| {
        ui.label("Name");
        ui.text_edit_singleline(&mut group.name);
        if ui.small_button("❌").clicked() {
            remove = true;
        }
    });

    ui.horizontal(|ui| {
        ui.label("Min item power");
        ui.add(
            egui::DragValue::new(&mut group.min_power)
                .speed(5)
                .clamp_range(0..=1000),
        );
        ui.label("Min matching affixes");
        ui.add(
            egui::DragValue::new(&mut group.min_count)
                .speed(1)
                .clamp_range(0..=8),
        );
    });

    ui.label("Item types");
    editable_list(
        ui,
        &mut group.item_types,
        "Add item type",
        ("affix_item_types", index),
    );

    ui.label("Affix pool");
    affix_pool_editor(ui, &mut group.affix_pool);

    if !suggestions.is_empty() {
        ui.label("Quick add");
        ui.horizontal_wrapped(|ui| {
            for name in suggestions {
                let already = group.affix_pool.iter().any(|a| a.name == *name);
                if ui
                    .add_enabled(!already, egui::Button::new(*name).small())
                    .clicked()
                {
                    group.affix_pool.push(AffixEntry {
                        name: (*name).to_string(),
                        min_value: None,
                    });
                }
            }
        });
    }

    remove
}

/// Rows of affix name + optional minimum roll, shared with the uniques tab.
pub(crate) fn affix_pool_editor(ui: &mut egui::Ui, pool: &mut Vec<AffixEntry>) {
    let mut remove_index: Option<usize> = None;

    for (i, entry) in pool.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut entry.name);

            let mut wants_min = entry.min_value.is_some();
            if ui.checkbox(&mut wants_min, "min roll").changed() {
                entry.min_value = wants_min.then_some(0.0);
            }
            if let Some(value) = entry.min_value.as_mut() {
                ui.add(
                    egui::DragValue::new(value)
                        .speed(0.5)
                        .clamp_range(0.0..=10_000.0),
                );
            }

            if ui.small_button("❌").clicked() {
                remove_index = Some(i);
            }
        });
    }

    if let Some(i) = remove_index {
        pool.remove(i);
    }

    if ui.button("➕ Add affix").clicked() {
        pool.push(AffixEntry::default());
    }
}
