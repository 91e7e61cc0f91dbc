pub mod schema;

use anyhow::{Context, Result};
use schema::RigProfile;

/// Parse and validate a rig profile.
pub fn load_from_yaml_str(s: &str) -> Result<RigProfile> {
    let profile: RigProfile = serde_yaml::from_str(s)?;
    profile.validate().with_context(|| format!("invalid profile '{}'", profile.id))?;
    Ok(profile)
}

pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<RigProfile> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    load_from_yaml_str(&data).with_context(|| format!("loading {}", path.display()))
}

pub fn to_yaml_string(profile: &RigProfile) -> Result<String> {
    Ok(serde_yaml::to_string(profile)?)
}
