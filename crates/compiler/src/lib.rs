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

//! Translation of PL/SQL parse trees into Python syntax trees.
//!
//! The input is a parse tree from an external PL/SQL parser, seen through [`TreeNode`]. The
//! output is a [`ast::Module`] whose code runs against a small runtime support library
//! (value boxes, cursors, collection and record types, builtins).

pub mod ast;
mod control_flow;
mod decls;
mod errors;
mod exprs;
pub mod fragment;
mod names;
mod numeric;
pub mod scope;
mod sql;
mod stmts;
pub mod testing;
mod translate;
mod tree;
mod units;

pub use crate::control_flow::{rebuild_if, rebuild_searched_case, rebuild_simple_case};
pub use crate::errors::TranslateError;
pub use crate::names::{Binding, Resolver, normalize_identifier};
pub use crate::numeric::{Number, to_number};
pub use crate::sql::{EmbeddedSql, SqlTranslator};
pub use crate::translate::{Translator, translate_program, translate_program_with};
pub use crate::tree::{ParseNode, TreeNode};
