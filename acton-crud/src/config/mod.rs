//! Configuration management for acton-crud
//!
//! Presentation defaults and registry behavior, loaded with figment from
//! multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `ACTON_CRUD_` prefix, `__`
//!    between section and key)
//! 2. An explicit TOML file
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # crud.toml
//! [forms]
//! create_label = "Save"
//! update_label = "Save changes"
//!
//! [table]
//! image_height = 64
//! default_per_page = 50
//!
//! [actions]
//! strict_registration = true
//! ```
//!
//! ```bash
//! ACTON_CRUD_TABLE__IMAGE_HEIGHT=32
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CrudError, Result};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ACTON_CRUD_";

/// Form presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Submit button label of the create dialog
    pub create_label: String,

    /// Submit button label of the edit dialog
    pub update_label: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            create_label: "Create".to_string(),
            update_label: "Update".to_string(),
        }
    }
}

/// Table presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Height in pixels of image cells
    pub image_height: u32,

    /// Page size used when the caller has none
    pub default_per_page: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            image_height: 44,
            default_per_page: 20,
        }
    }
}

/// Action registry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// Reject a different schema registered under an existing title
    pub strict_registration: bool,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            strict_registration: true,
        }
    }
}

/// Complete acton-crud configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CrudConfig {
    /// Form settings
    #[serde(default)]
    pub forms: FormSettings,

    /// Table settings
    #[serde(default)]
    pub table: TableSettings,

    /// Action registry settings
    #[serde(default)]
    pub actions: ActionSettings,
}

impl CrudConfig {
    /// Load configuration from defaults and the environment
    pub fn load() -> Result<Self> {
        Self::extract(Self::figment())
    }

    /// Load configuration from a TOML file, then the environment
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use acton_crud::config::CrudConfig;
    ///
    /// # fn example() -> acton_crud::error::Result<()> {
    /// let config = CrudConfig::load_from("./crud.toml")?;
    /// assert!(config.table.default_per_page > 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    /// Base figment: defaults overlaid with the environment
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and check a configuration from any figment
    pub fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.table.default_per_page == 0 {
            return Err(CrudError::Config(
                "table.default_per_page must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = CrudConfig::default();
        assert_eq!(config.forms.create_label, "Create");
        assert_eq!(config.forms.update_label, "Update");
        assert_eq!(config.table.image_height, 44);
        assert_eq!(config.table.default_per_page, 20);
        assert!(config.actions.strict_registration);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(CrudConfig::default())).merge(
            Toml::string(
                r#"
                [forms]
                create_label = "Add"

                [table]
                image_height = 64
                "#,
            ),
        );
        let config = CrudConfig::extract(figment).unwrap();
        assert_eq!(config.forms.create_label, "Add");
        assert_eq!(config.forms.update_label, "Update");
        assert_eq!(config.table.image_height, 64);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let figment = Figment::from(Serialized::defaults(CrudConfig::default()))
            .merge(Toml::string("[table]\ndefault_per_page = 0"));
        assert!(matches!(
            CrudConfig::extract(figment),
            Err(CrudError::Config(_))
        ));
    }

    #[test]
    fn test_env_beats_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "crud.toml",
                r#"
                [table]
                image_height = 64

                [actions]
                strict_registration = false
                "#,
            )?;
            jail.set_env("ACTON_CRUD_TABLE__IMAGE_HEIGHT", "32");

            let config = CrudConfig::load_from("crud.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.table.image_height, 32);
            assert!(!config.actions.strict_registration);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = CrudConfig::load_from("absent.toml").map_err(|e| e.to_string())?;
            assert_eq!(config, CrudConfig::default());
            Ok(())
        });
    }
}
