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

mod args;

use crate::args::Args;
use clap::Parser;
use eyre::{WrapErr, eyre};
use plpy_common::TranslateConfig;
use plpy_common::tracing::init_tracing;
use plpy_compiler::{ParseNode, translate_program};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Translates one JSON parse tree into the JSON form of its Python module.
fn translate_source(source: &str, config: &TranslateConfig) -> Result<String, eyre::Report> {
    let tree: ParseNode =
        serde_json::from_str(source).wrap_err("Input is not a JSON parse tree")?;
    let module = translate_program(&tree, config)?;
    debug!(statements = module.body.len(), "translated module");
    let json = serde_json::to_string_pretty(&module)?;
    Ok(json)
}

fn read_input(input: Option<&Path>) -> Result<String, eyre::Report> {
    let mut source = String::new();
    match input {
        Some(path) if path != Path::new("-") => {
            source = std::fs::read_to_string(path)
                .map_err(|e| eyre!("Unable to read {:?}: {}", path, e))?;
        }
        _ => {
            std::io::stdin()
                .read_to_string(&mut source)
                .wrap_err("Unable to read stdin")?;
        }
    }
    Ok(source)
}

fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.debug)?;

    let config = args.load_config()?;
    debug!(?config, "loaded configuration");

    let source = read_input(args.input.as_deref())?;
    let json = translate_source(&source, &config)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .map_err(|e| eyre!("Unable to write {:?}: {}", path, e))?;
            info!("Wrote translated module to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plpy_compiler::testing::{anonymous_block, call_stmt, num, script};
    use std::io::Write;

    #[test]
    fn test_translate_source() {
        let tree = script(vec![anonymous_block(
            vec![],
            vec![call_stmt("audit.log", Some(vec![num("1")]))],
            vec![],
        )]);
        let source = serde_json::to_string(&tree).unwrap();
        let json = translate_source(&source, &TranslateConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["body"][0]["Import"]["module"], "AUDIT");
        assert_eq!(value["body"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_translation_errors_surface() {
        let source = serde_json::to_string(&script(vec![anonymous_block(
            vec![],
            vec![call_stmt("f", Some(vec![num("1.2.3")]))],
            vec![],
        )]))
        .unwrap();
        let err = translate_source(&source, &TranslateConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid numeric literal: 1.2.3");
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"kind\": \"sql_script\"}").unwrap();
        let source = read_input(Some(file.path())).unwrap();
        assert_eq!(source, "{\"kind\": \"sql_script\"}");
        assert!(read_input(Some(Path::new("/nonexistent/tree.json"))).is_err());
    }
}
