use crate::tree::{TreeError, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH, DEFAULT_WIDE_ENTRY_WARN};
use serde::{Deserialize, Serialize};

/// 最大深度上限
pub const MAX_DEPTH_LIMIT: usize = 64;

/// 索引配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// 树参数
    #[serde(default)]
    pub tree: TreeSettings,
}

/// 树参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSettings {
    /// 叶子节点分裂前可容纳的最大条目数
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// 最大深度
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// 跨界条目警告阈值，0 表示不警告
    #[serde(default = "default_wide_entry_warn")]
    pub wide_entry_warn: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_wide_entry_warn() -> usize {
    DEFAULT_WIDE_ENTRY_WARN
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_depth: default_max_depth(),
            wide_entry_warn: default_wide_entry_warn(),
        }
    }
}

impl IndexConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（ORTHTREE__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use orthtree::config::IndexConfig;
    ///
    /// // 文件不存在时使用默认配置
    /// let config = IndexConfig::from_file("orthtree.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("ORTHTREE").separator("__"))
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 验证配置
    ///
    /// - 容量至少为 1
    /// - 最大深度不超过 64
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.tree.capacity == 0 {
            return Err(TreeError::InvalidConfig(
                "tree.capacity must be at least 1".to_string(),
            ));
        }
        if self.tree.max_depth > MAX_DEPTH_LIMIT {
            return Err(TreeError::InvalidConfig(format!(
                "tree.max_depth {} exceeds the limit of {}",
                self.tree.max_depth, MAX_DEPTH_LIMIT
            )));
        }
        Ok(())
    }
}
