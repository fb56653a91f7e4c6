use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::PlannerResult;

const TMP_SUFFIX: &str = "tmp";

pub fn ensure_dir(path: &Path) -> PlannerResult<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `value` as pretty JSON by staging to a sibling temporary file and
/// renaming it over `path`.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> PlannerResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> PlannerResult<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn save_json_creates_parents_and_leaves_no_tmp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("value.json");
        let mut value = BTreeMap::new();
        value.insert("rooms", 3);

        save_json(&value, &path).unwrap();

        let loaded: BTreeMap<String, u32> = load_json(&path).unwrap();
        assert_eq!(loaded.get("rooms"), Some(&3));
        assert!(!path.with_extension("json.tmp").exists());
    }
}
