use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::profile::ProfileModel;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("literal pattern"));
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").expect("literal pattern"));

/// Turns a human-provided profile name into a filesystem-safe stem:
/// quotes stripped, every other non-word character becomes an underscore,
/// runs of underscores collapse, trailing underscores go.
pub fn sanitize_file_name(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !matches!(c, '\'' | '"')).collect();
    let replaced = NON_WORD.replace_all(&stripped, "_");
    let collapsed = UNDERSCORE_RUN.replace_all(&replaced, "_");
    collapsed.trim_end_matches('_').to_string()
}

/// Writes the profile as `<sanitized name>_custom.yaml` under `dir`, with a
/// provenance header (source tag, UTC timestamp, crate version) ahead of the
/// YAML body. Returns the path written.
pub fn save_profile(dir: &Path, profile: &ProfileModel, source: &str) -> Result<PathBuf> {
    let stem = sanitize_file_name(&format!("{}_custom", profile.name));
    let path = dir.join(format!("{stem}.yaml"));

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let body = serde_yaml::to_string(profile).context("serializing profile")?;
    let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
    let contents = format!(
        "# {source}\n# {stamp} (v{})\n{body}",
        env!("CARGO_PKG_VERSION")
    );

    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    log::info!("created profile {}", path.display());
    Ok(path)
}

/// Reads a profile back; the name comes from the file stem.
pub fn load_profile(path: &Path) -> Result<ProfileModel> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut profile: ProfileModel =
        serde_yaml::from_str(&text).context("parsing profile YAML")?;
    profile.name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("profile")
        .to_string();
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profile::{AffixEntry, AffixGroup};

    #[test]
    fn sanitize_replaces_and_collapses() {
        assert_eq!(sanitize_file_name("My Profile!"), "My_Profile");
        assert_eq!(sanitize_file_name("rogue's \"push\" #2"), "rogues_push_2");
        assert_eq!(sanitize_file_name("already_fine"), "already_fine");
    }

    #[test]
    fn sanitize_trims_trailing_underscores() {
        assert_eq!(sanitize_file_name("name??"), "name");
        assert_eq!(sanitize_file_name("a - b - "), "a_b");
    }

    #[test]
    fn sanitize_keeps_unicode_word_characters() {
        assert_eq!(sanitize_file_name("büild zwei"), "büild_zwei");
    }

    #[test]
    fn save_then_load_preserves_model_and_names_from_stem() {
        let dir = tempfile::tempdir().unwrap();
        let profile = ProfileModel {
            name: "sorc: season 9!".to_string(),
            affixes: vec![AffixGroup {
                name: "Boots".to_string(),
                item_types: vec!["Boots".to_string()],
                min_power: 800,
                min_count: 1,
                affix_pool: vec![AffixEntry {
                    name: "Movement Speed".to_string(),
                    min_value: Some(12.5),
                }],
            }],
            ..Default::default()
        };

        let path = save_profile(dir.path(), &profile, "custom").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "sorc_season_9_custom.yaml"
        );

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "# custom");
        assert!(lines.next().unwrap().starts_with("# "));

        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded.name, "sorc_season_9_custom");
        assert_eq!(loaded.affixes, profile.affixes);
    }

    #[test]
    fn load_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "affixes: [not, a, mapping").unwrap();
        assert!(load_profile(&path).is_err());
    }
}
