use crate::batch::ScheduleMode;
use crate::lister::DEFAULT_IGNORED_NAMES;
use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the positional argument is resolved against. Desktop when unset.
    pub base_dir: Option<PathBuf>,
    pub mode: ScheduleMode,
    pub jobs: Option<usize>,
    pub apply: bool,
    pub skip_duplicates: bool,
    pub ignored_names: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            mode: ScheduleMode::Sequential,
            jobs: None,
            apply: false,
            skip_duplicates: false,
            ignored_names: DEFAULT_IGNORED_NAMES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "kelly", "exif-stamp")
        .context("OS標準設定ディレクトリを取得できませんでした")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    load_config_from(&paths.config_path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("設定ファイルを読めませんでした: {}", path.display()))?;

    let config = toml::from_str::<AppConfig>(&raw)
        .with_context(|| format!("設定ファイルのパースに失敗しました: {}", path.display()))?;
    Ok(config)
}

pub fn resolve_base_dir(config: &AppConfig) -> Result<PathBuf> {
    if let Some(base) = config.base_dir.as_ref() {
        return Ok(base.clone());
    }

    if let Some(desktop) = UserDirs::new().and_then(|dirs| dirs.desktop_dir().map(Path::to_path_buf))
    {
        return Ok(desktop);
    }

    let base = BaseDirs::new().context("ホームディレクトリを取得できませんでした")?;
    Ok(base.home_dir().join("Desktop"))
}
