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

//! Translation driver: dispatch from parse-tree node kinds to handlers.
//!
//! Every handler returns the list of [`Fragment`]s its node produced; nodes without a handler
//! splice their children's results, terminals produce nothing. A nested translation unit
//! (package, routine, cursor, anonymous block) runs in its own [`Translator`] over a child
//! [`Scope`] and only hands its dependency set back.

use crate::ast::{Expr, Module, Stmt};
use crate::errors::TranslateError;
use crate::fragment::Fragment;
use crate::names::Resolver;
use crate::scope::Scope;
use crate::sql::{EmbeddedSql, SqlTranslator};
use crate::tree::TreeNode;
use indexmap::{IndexMap, IndexSet};
use plpy_common::{Globals, TranslateConfig};
use tracing::debug;

pub struct Translator<'a, N: TreeNode> {
    pub(crate) scope: Scope,
    pub(crate) config: &'a TranslateConfig,
    pub(crate) globals: &'a Globals,
    pub(crate) sql: &'a dyn SqlTranslator<N>,
    /// Members of each package specification translated so far, by package name.
    pub(crate) spec_members: IndexMap<String, IndexSet<String>>,
}

impl<'a, N: TreeNode> Translator<'a, N> {
    pub fn new(
        config: &'a TranslateConfig,
        globals: &'a Globals,
        sql: &'a dyn SqlTranslator<N>,
    ) -> Self {
        Self {
            scope: Scope::new(),
            config,
            globals,
            sql,
            spec_members: IndexMap::new(),
        }
    }

    /// Translator for a nested unit, sharing configuration with this one.
    pub(crate) fn nested(&self, scope: Scope) -> Self {
        Self {
            scope,
            config: self.config,
            globals: self.globals,
            sql: self.sql,
            spec_members: IndexMap::new(),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn into_scope(self) -> Scope {
        self.scope
    }

    /// Translates a whole `sql_script` into a module.
    pub fn program(&mut self, root: &N) -> Result<Module, TranslateError> {
        if root.node_kind() != "sql_script" {
            return Err(TranslateError::malformed(root, "expected a sql_script root"));
        }
        let fragments = self.visit_children(root)?;
        let units = self.statements(root, fragments)?;

        for module in self.config.runtime.always_imported() {
            self.scope.record_dependency(module);
        }
        let mut body: Vec<Stmt> = self
            .scope
            .dependencies()
            .iter()
            .map(|module| Stmt::Import {
                module: module.clone(),
            })
            .collect();
        debug!(imports = body.len(), units = units.len(), "translated script");
        body.extend(units);
        Ok(Module { body })
    }

    pub fn visit(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        match node.node_kind() {
            // Units
            "unit_statement" => self.unit_statement(node),
            "anonymous_block" => self.anonymous_block(node),
            "create_package" => self.create_package(node),
            "create_package_body" => self.create_package_body(node),
            "create_procedure_body" | "create_function_body" | "procedure_body"
            | "function_body" => self.routine(node),
            "procedure_spec" | "function_spec" => Ok(vec![]),
            "parameter" => self.parameter(node),

            // Declarations
            "seq_of_declare_specs" => self.seq_of_declare_specs(node),
            "variable_declaration" => self.variable_declaration(node),
            "subtype_declaration" => self.subtype_declaration(node),
            "type_declaration" => self.type_declaration(node),
            "cursor_declaration" => self.cursor_declaration(node),
            "pragma_declaration" => self.pragma_declaration(node),
            "type_spec" => self.type_spec(node),
            "type_name" => self.type_name(node),
            "field_spec" => Ok(vec![]),

            // Statements
            "body" => self.body(node),
            "statement" => self.statement(node),
            "assignment_statement" => self.assignment_statement(node),
            "null_statement" => Ok(vec![Stmt::Pass.into()]),
            "return_statement" => self.return_statement(node),
            "raise_statement" => self.raise_statement(node),
            "exception_handler" => self.exception_handler(node),
            "exception_name" => self.exception_name(node),
            "transaction_control_statements" => self.transaction_control(node),
            "execute_immediate" => self.execute_immediate(node),
            "open_statement" => self.open_statement(node),
            "fetch_statement" => self.fetch_statement(node),
            "close_statement" => self.close_statement(node),
            "select_statement" | "data_manipulation_language_statements" => {
                self.sql.translate(node, &self.scope, &self.config.runtime)
            }

            // Control flow
            "if_statement" => self.if_statement(node),
            "simple_case_statement" => self.simple_case_statement(node),
            "searched_case_statement" => self.searched_case_statement(node),
            "elsif_part" | "simple_case_when_part" | "searched_case_when_part" => {
                self.branch(node, crate::fragment::Branch::ElseIf)
            }
            "else_part" | "case_else_part" => self.branch(node, crate::fragment::Branch::Else),
            "loop_statement" => self.loop_statement(node),
            "cursor_loop_param" => self.cursor_loop_param(node),
            "exit_statement" => self.exit_statement(node),
            "continue_statement" => self.continue_statement(node),

            // Expressions
            "constant" => self.constant(node),
            "numeric" => self.numeric(node),
            "quoted_string" => self.quoted_string(node),
            "regular_id" => self.regular_id(node),
            "id_expression" => self.id_expression(node),
            "general_element" => Ok(vec![self.general_element(node)?.into()]),
            "general_element_part" => Ok(vec![self.element_part(node)?.into()]),
            "function_call" => self.function_call(node),
            "routine_name" => self.routine_name(node),
            "variable_name" => self.variable_name(node),
            "argument" => self.argument(node),
            "concatenation" => self.concatenation(node),
            "compound_expression" => self.compound_expression(node),
            "relational_expression" => self.relational_expression(node),
            "relational_operator" => self.relational_operator(node),
            "logical_expression" => self.logical_expression(node),
            "unary_expression" => self.unary_expression(node),
            "string_function" => self.string_function(node),
            "other_function" => self.other_function(node),

            _ => self.visit_children(node),
        }
    }

    /// Visits each child in order and splices their fragments.
    pub fn visit_children(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments = vec![];
        for child in node.children() {
            fragments.extend(self.visit(child)?);
        }
        Ok(fragments)
    }

    pub(crate) fn resolve(&mut self, name: &str) -> Expr {
        let config = self.config;
        Resolver::new(self.globals, &config.runtime.globals).resolve(&mut self.scope, name)
    }

    pub(crate) fn resolve_path(
        &mut self,
        node: &N,
        segments: &[String],
    ) -> Result<Expr, TranslateError> {
        let config = self.config;
        Resolver::new(self.globals, &config.runtime.globals)
            .resolve_path(&mut self.scope, segments)
            .ok_or_else(|| TranslateError::malformed(node, "empty name"))
    }

    /// Fragments that must all be expressions.
    pub(crate) fn expressions(
        &self,
        node: &N,
        fragments: Vec<Fragment>,
    ) -> Result<Vec<Expr>, TranslateError> {
        fragments
            .into_iter()
            .map(|f| {
                f.into_expr()
                    .ok_or_else(|| TranslateError::malformed(node, "expected an expression"))
            })
            .collect()
    }

    /// Exactly one expression.
    pub(crate) fn expression(&mut self, node: &N) -> Result<Expr, TranslateError> {
        let fragments = self.visit(node)?;
        let mut exprs = self.expressions(node, fragments)?;
        match (exprs.pop(), exprs.is_empty()) {
            (Some(e), true) => Ok(e),
            _ => Err(TranslateError::malformed(node, "expected a single expression")),
        }
    }

    /// Fragments that must all have a statement form.
    pub(crate) fn statements(
        &self,
        node: &N,
        fragments: Vec<Fragment>,
    ) -> Result<Vec<Stmt>, TranslateError> {
        fragments
            .into_iter()
            .map(|f| {
                f.into_stmt()
                    .ok_or_else(|| TranslateError::malformed(node, "expected a statement"))
            })
            .collect()
    }
}

/// Translates a parse tree rooted at `sql_script` using the built-in SQL translation.
pub fn translate_program<N: TreeNode>(
    root: &N,
    config: &TranslateConfig,
) -> Result<Module, TranslateError> {
    translate_program_with(root, config, &EmbeddedSql)
}

/// Translates with a caller-supplied translator for embedded SQL.
pub fn translate_program_with<N: TreeNode>(
    root: &N,
    config: &TranslateConfig,
    sql: &dyn SqlTranslator<N>,
) -> Result<Module, TranslateError> {
    let globals = Globals::with_extra(&config.extra_globals);
    let mut translator = Translator::new(config, &globals, sql);
    translator.program(root)
}
