use std::path::PathBuf;

/// Root of the per-user configuration tree.
pub fn user_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("loot-profile-editor");
    path
}

/// Where saved profiles land. Created on demand by the save path.
pub fn profiles_dir() -> PathBuf {
    user_dir().join("profiles")
}
