//! Output configuration.

use std::path::PathBuf;
use typescriptify_schema::Settings;

/// Default indentation unit.
pub const DEFAULT_INDENT: &str = "    ";

/// Options controlling the generated TypeScript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Prefix for every generated entity name.
    pub prefix: String,
    /// Suffix for every generated entity name.
    pub suffix: String,
    /// Indentation unit.
    pub indent: String,
    /// Prefix definitions with `export`.
    pub export: bool,
    /// Emit interfaces instead of classes.
    pub interface: bool,
    /// Emit the instance constructor.
    pub create_constructor: bool,
    /// Emit the deprecated static `createFrom` method. Forces the constructor on.
    pub create_from_method: bool,
    /// Directory receiving a copy of the previous output before it is replaced.
    pub backup_dir: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            indent: DEFAULT_INDENT.to_string(),
            export: true,
            interface: false,
            create_constructor: true,
            create_from_method: true,
            backup_dir: None,
        }
    }
}

impl Options {
    /// Returns the generated entity name for a host type name.
    #[must_use]
    pub fn entity_name(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }

    /// Returns true if the constructor is emitted.
    #[must_use]
    pub const fn emits_constructor(&self) -> bool {
        self.create_constructor || self.create_from_method
    }

    /// Overrides these options with the attributes set in a schema document.
    pub fn apply(&mut self, settings: &Settings) {
        if let Some(prefix) = &settings.prefix {
            self.prefix.clone_from(prefix);
        }
        if let Some(suffix) = &settings.suffix {
            self.suffix.clone_from(suffix);
        }
        if let Some(indent) = &settings.indent {
            self.indent.clone_from(indent);
        }
        if let Some(interface) = settings.interface {
            self.interface = interface;
        }
        if let Some(export) = settings.export {
            self.export = export;
        }
        if let Some(constructor) = settings.constructor {
            self.create_constructor = constructor;
        }
        if let Some(create_from) = settings.create_from {
            self.create_from_method = create_from;
        }
        if let Some(dir) = &settings.backup_dir {
            self.backup_dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.indent, "    ");
        assert!(options.export);
        assert!(!options.interface);
        assert!(options.create_constructor);
        assert!(options.create_from_method);
        assert!(options.backup_dir.is_none());
    }

    #[test]
    fn test_create_from_forces_constructor() {
        let options = Options {
            create_constructor: false,
            ..Options::default()
        };
        assert!(options.emits_constructor());

        let options = Options {
            create_constructor: false,
            create_from_method: false,
            ..Options::default()
        };
        assert!(!options.emits_constructor());
    }

    #[test]
    fn test_apply_settings() {
        let settings = Settings {
            prefix: Some("Api".to_string()),
            indent: Some("\t".to_string()),
            interface: Some(true),
            backup_dir: Some(String::new()),
            ..Settings::default()
        };

        let mut options = Options {
            backup_dir: Some(PathBuf::from("old")),
            ..Options::default()
        };
        options.apply(&settings);

        assert_eq!(options.entity_name("Person"), "ApiPerson");
        assert_eq!(options.indent, "\t");
        assert!(options.interface);
        assert!(options.export);
        assert!(options.backup_dir.is_none());
    }
}
