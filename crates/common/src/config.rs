// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::runtime;
use serde::{Deserialize, Serialize};

/// Knobs for a translation run. Loaded by the tools from defaults, a YAML file, and command
/// line overrides, in that order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Appended to a package's name to form the class name of its specification.
    pub spec_suffix: String,
    /// Register a routine's own name before translating its body, so that recursive calls
    /// resolve to the routine rather than to an external package.
    pub preregister_routines: bool,
    /// Extra names to treat as exported by the global builtin namespace.
    pub extra_globals: Vec<String>,
    pub runtime: RuntimeModules,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            spec_suffix: "_SPEC".to_string(),
            preregister_routines: true,
            extra_globals: vec![],
            runtime: RuntimeModules::default(),
        }
    }
}

impl TranslateConfig {
    /// Class name of the specification counterpart of package `name`.
    pub fn spec_class_name(&self, name: &str) -> String {
        format!("{name}{}", self.spec_suffix)
    }
}

/// Module names of the runtime support library.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeModules {
    pub globals: String,
    pub helper: String,
    pub cursor: String,
    pub table: String,
    pub record: String,
}

impl Default for RuntimeModules {
    fn default() -> Self {
        Self {
            globals: runtime::GLOBALS_MODULE.to_string(),
            helper: runtime::HELPER_MODULE.to_string(),
            cursor: runtime::CURSOR_MODULE.to_string(),
            table: runtime::TABLE_MODULE.to_string(),
            record: runtime::RECORD_MODULE.to_string(),
        }
    }
}

impl RuntimeModules {
    /// The modules every translated program imports, referenced or not.
    pub fn always_imported(&self) -> [&str; 3] {
        [&self.globals, &self.helper, &self.cursor]
    }

    /// Constructor for a collection of a named element type, exported by the table module.
    pub fn table_of(&self) -> String {
        format!("{}{}", self.table, runtime::TABLE_OF_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslateConfig::default();
        assert_eq!(config.spec_class_name("PKG"), "PKG_SPEC");
        assert!(config.preregister_routines);
        assert_eq!(
            config.runtime.always_imported(),
            ["PLGLOBALS", "PLHELPER", "PLCURSOR"]
        );
        assert_eq!(config.runtime.table_of(), "PLTABLE_OF");
    }

    #[test]
    fn test_table_of_follows_table_module() {
        let runtime = RuntimeModules {
            table: "TABLES".to_string(),
            ..RuntimeModules::default()
        };
        assert_eq!(runtime.table_of(), "TABLES_OF");
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: TranslateConfig = serde_json::from_str(
            r#"{"spec_suffix": "Spec", "runtime": {"cursor": "cursors"}}"#,
        )
        .unwrap();
        assert_eq!(config.spec_class_name("PKG"), "PKGSpec");
        assert_eq!(config.runtime.cursor, "cursors");
        assert_eq!(config.runtime.globals, "PLGLOBALS");
        assert!(config.extra_globals.is_empty());
    }
}
