use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const DATA_FILE: &str = "expenses.json";
const CONFIG_FILE: &str = "config.json";

pub const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";
pub const FILE_ENV: &str = "EXPENSE_TRACKER_FILE";

/// Returns the application data directory, defaulting to `~/.expense_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default location of the expense file inside `base`.
pub fn data_file_in(base: &Path) -> PathBuf {
    base.join(DATA_FILE)
}

/// Location of the configuration file inside `base`.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Per-run override for the expense file, if `EXPENSE_TRACKER_FILE` is set.
pub fn data_file_override() -> Option<PathBuf> {
    env::var_os(FILE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Sibling path used for staged writes (`expenses.json` -> `expenses.json.tmp`).
pub fn tmp_path(path: &Path) -> PathBuf {
    with_suffix(path, "tmp")
}

/// Appends `.suffix` to the file extension, keeping the original one.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    out.set_extension(ext);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_keeps_original_extension() {
        let path = Path::new("/data/expenses.json");
        assert_eq!(tmp_path(path), PathBuf::from("/data/expenses.json.tmp"));
    }

    #[test]
    fn suffix_without_extension() {
        let path = Path::new("/data/expenses");
        assert_eq!(
            with_suffix(path, "corrupt-20240101_000000"),
            PathBuf::from("/data/expenses.corrupt-20240101_000000")
        );
    }

    #[test]
    fn files_live_under_base() {
        let base = Path::new("/tmp/et");
        assert_eq!(data_file_in(base), base.join("expenses.json"));
        assert_eq!(config_file_in(base), base.join("config.json"));
    }
}
