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

//! Registry of the names exported by the runtime's global builtin namespace.

use GlobalKind::{Constant, Exception, Function, Package, Type};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use strum::Display;

lazy_static! {
    static ref GLOBAL_DESCRIPTORS: Vec<Global> = mk_global_table();
    pub static ref GLOBALS: Globals = Globals::new();
}

/// What sort of thing the runtime exports under a global name.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GlobalKind {
    Function,
    Exception,
    Type,
    Constant,
    Package,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Global {
    pub name: String,
    pub kind: GlobalKind,
}

fn mk_global(name: &str, kind: GlobalKind) -> Global {
    Global {
        name: name.to_string(),
        kind,
    }
}

// Mirrors the public attributes of the runtime's globals class. Keep in step with the runtime
// when it grows new members, otherwise references to them are imported as external packages.
fn mk_global_table() -> Vec<Global> {
    vec![
        // String functions
        mk_global("SUBSTR", Function),
        mk_global("NVL", Function),
        mk_global("NVL2", Function),
        mk_global("TO_CHAR", Function),
        mk_global("TRIM", Function),
        mk_global("LTRIM", Function),
        mk_global("RTRIM", Function),
        mk_global("UPPER", Function),
        mk_global("LOWER", Function),
        mk_global("LENGTH", Function),
        mk_global("INSTR", Function),
        mk_global("REPLACE", Function),
        mk_global("LPAD", Function),
        mk_global("RPAD", Function),
        mk_global("CHR", Function),
        mk_global("DECODE", Function),
        // Numeric and date functions
        mk_global("TO_NUMBER", Function),
        mk_global("TO_DATE", Function),
        mk_global("ROUND", Function),
        mk_global("TRUNC", Function),
        mk_global("ABS", Function),
        mk_global("MOD", Function),
        mk_global("GREATEST", Function),
        mk_global("LEAST", Function),
        mk_global("COALESCE", Function),
        mk_global("ADD_MONTHS", Function),
        mk_global("LAST_DAY", Function),
        mk_global("RAISE_APPLICATION_ERROR", Function),
        // Session values
        mk_global("SYSDATE", Constant),
        mk_global("SYSTIMESTAMP", Constant),
        mk_global("USER", Constant),
        mk_global("SQLCODE", Constant),
        mk_global("SQLERRM", Constant),
        // Predefined exceptions
        mk_global("OTHERS", Exception),
        mk_global("NO_DATA_FOUND", Exception),
        mk_global("TOO_MANY_ROWS", Exception),
        mk_global("ZERO_DIVIDE", Exception),
        mk_global("VALUE_ERROR", Exception),
        mk_global("INVALID_NUMBER", Exception),
        mk_global("INVALID_CURSOR", Exception),
        mk_global("CURSOR_ALREADY_OPEN", Exception),
        mk_global("DUP_VAL_ON_INDEX", Exception),
        // Scalar types
        mk_global("VARCHAR2", Type),
        mk_global("VARCHAR", Type),
        mk_global("CHAR", Type),
        mk_global("NUMBER", Type),
        mk_global("INTEGER", Type),
        mk_global("PLS_INTEGER", Type),
        mk_global("BINARY_INTEGER", Type),
        mk_global("FLOAT", Type),
        mk_global("BOOLEAN", Type),
        mk_global("DATE", Type),
        mk_global("TIMESTAMP", Type),
        mk_global("CLOB", Type),
        mk_global("BLOB", Type),
        mk_global("LONG", Type),
        // Supplied packages
        mk_global("DBMS_OUTPUT", Package),
    ]
}

/// Lookup table over the global namespace, optionally extended with site-specific names.
#[derive(Debug, Clone)]
pub struct Globals {
    names: IndexMap<String, GlobalKind>,
}

impl Default for Globals {
    fn default() -> Self {
        Self::new()
    }
}

impl Globals {
    pub fn new() -> Self {
        let names = GLOBAL_DESCRIPTORS
            .iter()
            .map(|g| (g.name.clone(), g.kind))
            .collect();
        Self { names }
    }

    /// The standard table plus `extra` names (treated as functions unless already known).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut globals = Self::new();
        for name in extra {
            let name = name.as_ref().to_uppercase();
            globals.names.entry(name).or_insert(Function);
        }
        globals
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<GlobalKind> {
        self.names.get(name).copied()
    }

    pub fn number_of(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}
