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

use clap::ValueHint;
use clap_derive::Parser;
use eyre::eyre;
use figment::Figment;
use figment::providers::{Format as ProviderFormat, Serialized, Yaml};
use plpy_common::TranslateConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(
        value_name = "tree",
        help = "JSON parse tree to translate, rooted at sql_script. Reads stdin when omitted or '-'.",
        value_hint = ValueHint::FilePath
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "output",
        help = "Where to write the translated module as JSON. Writes stdout when omitted.",
        value_hint = ValueHint::FilePath
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "config",
        help = "Path to configuration (YAML) file to use, if any. If not specified, defaults are used.\
                Configuration file values can be overridden by command line arguments.",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "suffix",
        help = "Suffix appended to a package name to name the class of its specification"
    )]
    pub spec_suffix: Option<String>,

    #[arg(
        long,
        help = "Register routines only after their body is translated, so recursive calls become imports"
    )]
    pub no_preregister_routines: bool,

    #[arg(
        long,
        value_name = "name",
        help = "Additional name exported by the global builtin namespace. May be repeated."
    )]
    pub extra_global: Vec<String>,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

impl Args {
    fn merge_config(&self, config: &mut TranslateConfig) {
        if let Some(suffix) = &self.spec_suffix {
            config.spec_suffix = suffix.clone();
        }
        if self.no_preregister_routines {
            config.preregister_routines = false;
        }
        config.extra_globals.extend(self.extra_global.iter().cloned());
    }

    /// Load the configuration file if we have it, and then merge the arguments into it.
    pub fn load_config(&self) -> Result<TranslateConfig, eyre::Report> {
        let mut config = match &self.config_file {
            Some(config_path) => Figment::new()
                .merge(Serialized::defaults(TranslateConfig::default()))
                .merge(Yaml::file(config_path))
                .extract::<TranslateConfig>()
                .map_err(|e| {
                    eyre!(
                        "Failed to parse configuration from {:?}: {}",
                        config_path,
                        e
                    )
                })?,
            None => TranslateConfig::default(),
        };
        self.merge_config(&mut config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use unindent::unindent;

    #[test]
    fn test_defaults_without_config_file() {
        let args = Args::parse_from(["plpyc"]);
        assert_eq!(args.load_config().unwrap(), TranslateConfig::default());
    }

    #[test]
    fn test_file_then_arguments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            unindent(
                r#"
                spec_suffix: Spec
                extra_globals:
                  - MY_FN
                runtime:
                  cursor: cursors
                "#,
            )
            .as_bytes(),
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let args = Args::parse_from([
            "plpyc",
            "--config-file",
            path.as_str(),
            "--no-preregister-routines",
            "--extra-global",
            "other_fn",
        ]);
        let config = args.load_config().unwrap();
        assert_eq!(config.spec_suffix, "Spec");
        assert!(!config.preregister_routines);
        assert_eq!(config.extra_globals, vec!["MY_FN", "other_fn"]);
        assert_eq!(config.runtime.cursor, "cursors");
        assert_eq!(config.runtime.globals, "PLGLOBALS");

        let args = Args::parse_from([
            "plpyc",
            "--config-file",
            path.as_str(),
            "--spec-suffix",
            "_S",
        ]);
        assert_eq!(args.load_config().unwrap().spec_suffix, "_S");
    }

    #[test]
    fn test_bad_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"preregister_routines: [not, a, bool]\n").unwrap();
        let args = Args::parse_from([
            "plpyc",
            "--config-file",
            file.path().to_str().unwrap(),
        ]);
        assert!(args.load_config().is_err());
    }
}
