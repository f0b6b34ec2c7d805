// ==========================================
// 饲料配方优化系统 - 配置管理器
// ==========================================
// 职责: 配方方案文件的定位、读取、保存
// 优先级: 显式路径 > 环境变量 FEED_RATION_PROFILE > 用户配置目录 > 内置预设
// ==========================================

use crate::config::formulation_profile::FormulationProfile;
use crate::domain::error::ConfigurationError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const PROFILE_ENV_VAR: &str = "FEED_RATION_PROFILE";

const APP_CONFIG_DIR: &str = "feed-ration";
const PROFILE_FILE_NAME: &str = "profile.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置取值非法: {0}")]
    Invalid(#[from] ConfigurationError),

    #[error("无法确定用户配置目录")]
    NoConfigDir,
}

/// 方案来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    File(PathBuf),
    BuiltIn,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    override_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定方案文件（优先于环境变量与默认目录）
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: Some(path.into()),
        }
    }

    /// 用户配置目录下的默认方案路径
    pub fn default_profile_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(PROFILE_FILE_NAME))
    }

    /// 解析方案路径（不检查文件是否存在）
    pub fn profile_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.override_path {
            return Some(path.clone());
        }
        if let Some(path) = std::env::var_os(PROFILE_ENV_VAR).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }
        Self::default_profile_path()
    }

    /// 读取方案
    ///
    /// # 规则
    /// - 显式指定路径时文件必须存在
    /// - 未显式指定且文件不存在 → 内置兔用预设
    pub fn load(&self) -> Result<(FormulationProfile, ProfileSource), ConfigError> {
        match self.profile_path() {
            Some(path) if path.exists() || self.override_path.is_some() => {
                let profile = Self::load_from(&path)?;
                info!(path = %path.display(), species = %profile.species, "已加载配方方案");
                Ok((profile, ProfileSource::File(path)))
            }
            _ => {
                debug!("未找到配方方案文件,使用内置预设");
                Ok((FormulationProfile::default(), ProfileSource::BuiltIn))
            }
        }
    }

    /// 从指定文件读取并校验
    pub fn load_from(path: &Path) -> Result<FormulationProfile, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let profile: FormulationProfile =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.display().to_string(),
                source,
            })?;
        profile.validate()?;
        Ok(profile)
    }

    /// 保存方案（自动创建父目录）
    pub fn save(&self, profile: &FormulationProfile) -> Result<PathBuf, ConfigError> {
        profile.validate()?;
        let path = self.profile_path().ok_or(ConfigError::NoConfigDir)?;
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(profile).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(&path, text).map_err(io_err)?;

        info!(path = %path.display(), "配方方案已保存");
        Ok(path)
    }
}
