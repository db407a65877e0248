use serde::{Deserialize, Serialize};

/// An editable loot-filter profile. The name lives in the file stem, not the
/// serialized body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileModel {
    #[serde(skip)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affixes: Vec<AffixGroup>,

    #[serde(default, skip_serializing_if = "SigilFilter::is_empty")]
    pub sigils: SigilFilter,

    #[serde(default, skip_serializing_if = "TributeFilter::is_empty")]
    pub tributes: TributeFilter,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uniques: Vec<UniqueFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffixGroup {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_types: Vec<String>,

    /// Minimum item power before the group applies at all.
    #[serde(default)]
    pub min_power: u32,

    /// How many affixes from the pool an item must carry.
    #[serde(default)]
    pub min_count: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affix_pool: Vec<AffixEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffixEntry {
    pub name: String,

    /// Minimum roll, if the user cares about the value at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SigilFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blacklist: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub whitelist: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TributeFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub favored: Vec<String>,

    #[serde(default)]
    pub min_tier: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueFilter {
    pub name: String,

    #[serde(default)]
    pub min_power: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affix_pool: Vec<AffixEntry>,
}

impl SigilFilter {
    pub fn is_empty(&self) -> bool {
        self.blacklist.is_empty() && self.whitelist.is_empty()
    }

    /// Sigils listed as both blacklisted and whitelisted.
    pub fn overlap(&self) -> Vec<String> {
        self.blacklist
            .iter()
            .filter(|name| {
                self.whitelist
                    .iter()
                    .any(|other| other.eq_ignore_ascii_case(name))
            })
            .cloned()
            .collect()
    }
}

impl TributeFilter {
    pub fn is_empty(&self) -> bool {
        self.favored.is_empty() && self.min_tier == 0
    }
}

impl ProfileModel {
    /// Checks the model before a save. An empty result means valid; anything
    /// else is a human-readable problem for the confirmation prompt.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push("profile name is empty".to_string());
        }

        for (i, group) in self.affixes.iter().enumerate() {
            let label = if group.name.trim().is_empty() {
                issues.push(format!("affix group #{} has no name", i + 1));
                format!("#{}", i + 1)
            } else {
                group.name.clone()
            };

            if !group.name.trim().is_empty()
                && self.affixes[..i]
                    .iter()
                    .any(|other| other.name.eq_ignore_ascii_case(&group.name))
            {
                issues.push(format!("duplicate affix group name '{}'", group.name));
            }

            if group.affix_pool.iter().any(|a| a.name.trim().is_empty()) {
                issues.push(format!("affix group '{label}' contains an unnamed affix"));
            }

            if group.min_count as usize > group.affix_pool.len() {
                issues.push(format!(
                    "affix group '{label}' requires {} matches from a pool of {}",
                    group.min_count,
                    group.affix_pool.len()
                ));
            }
        }

        for sigil in self.sigils.overlap() {
            issues.push(format!("sigil '{sigil}' is both blacklisted and whitelisted"));
        }

        for (i, unique) in self.uniques.iter().enumerate() {
            if unique.name.trim().is_empty() {
                issues.push(format!("unique #{} has no name", i + 1));
            } else if self.uniques[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&unique.name))
            {
                issues.push(format!("duplicate unique '{}'", unique.name));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> ProfileModel {
        ProfileModel {
            name: "push build".to_string(),
            affixes: vec![AffixGroup {
                name: "Helm".to_string(),
                item_types: vec!["Helm".to_string()],
                min_power: 700,
                min_count: 2,
                affix_pool: vec![
                    AffixEntry {
                        name: "Maximum Life".to_string(),
                        min_value: Some(500.0),
                    },
                    AffixEntry {
                        name: "Cooldown Reduction".to_string(),
                        min_value: None,
                    },
                ],
            }],
            sigils: SigilFilter {
                blacklist: vec!["Drifting Shade".to_string()],
                whitelist: vec![],
            },
            tributes: TributeFilter::default(),
            uniques: vec![UniqueFilter {
                name: "Harlequin Crest".to_string(),
                min_power: 900,
                affix_pool: vec![],
            }],
        }
    }

    #[test]
    fn valid_profile_has_no_issues() {
        assert!(valid_profile().validate().is_empty());
    }

    #[test]
    fn empty_name_and_unnamed_group_are_flagged() {
        let mut profile = valid_profile();
        profile.name.clear();
        profile.affixes[0].name = "  ".to_string();

        let issues = profile.validate();
        assert!(issues.iter().any(|i| i.contains("profile name")));
        assert!(issues.iter().any(|i| i.contains("has no name")));
    }

    #[test]
    fn min_count_beyond_pool_is_flagged() {
        let mut profile = valid_profile();
        profile.affixes[0].min_count = 5;

        let issues = profile.validate();
        assert!(issues.iter().any(|i| i.contains("requires 5 matches")));
    }

    #[test]
    fn sigil_overlap_is_flagged_case_insensitively() {
        let mut profile = valid_profile();
        profile.sigils.whitelist.push("drifting shade".to_string());

        let issues = profile.validate();
        assert!(issues.iter().any(|i| i.contains("both blacklisted")));
    }

    #[test]
    fn duplicate_groups_and_uniques_are_flagged() {
        let mut profile = valid_profile();
        let group = profile.affixes[0].clone();
        profile.affixes.push(group);
        let unique = profile.uniques[0].clone();
        profile.uniques.push(unique);

        let issues = profile.validate();
        assert!(issues.iter().any(|i| i.contains("duplicate affix group")));
        assert!(issues.iter().any(|i| i.contains("duplicate unique")));
    }

    #[test]
    fn name_is_not_serialized() {
        let profile = valid_profile();
        let yaml = serde_yaml::to_string(&profile).unwrap();
        assert!(!yaml.contains("push build"));
        assert!(yaml.contains("Harlequin Crest"));
    }

    #[test]
    fn empty_sections_are_omitted_from_yaml() {
        let profile = ProfileModel {
            name: "bare".to_string(),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&profile).unwrap();
        assert!(!yaml.contains("sigils"));
        assert!(!yaml.contains("tributes"));
        assert!(!yaml.contains("uniques"));
    }
}
