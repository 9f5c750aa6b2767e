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

//! Declaration handlers: variables, types, cursors, pragmas and parameters.

use crate::ast::{Expr, Stmt};
use crate::errors::TranslateError;
use crate::fragment::{Fragment, TypeRef};
use crate::names::normalize_identifier;
use crate::translate::Translator;
use crate::tree::TreeNode;
use plpy_common::runtime;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Leading identifier of a declaration, as produced by its `identifier` child.
fn declared_name<N: TreeNode>(
    node: &N,
    fragments: &mut VecDeque<Fragment>,
) -> Result<String, TranslateError> {
    match fragments.pop_front() {
        Some(Fragment::Expr(Expr::Name(name))) => Ok(name),
        _ => Err(TranslateError::malformed(node, "declaration without a name")),
    }
}

fn assign(name: String, value: Expr) -> Vec<Fragment> {
    vec![Fragment::Stmt(Stmt::Assign {
        target: Expr::Name(name),
        value,
    })]
}

impl<N: TreeNode> Translator<'_, N> {
    /// Registers every name a declaration section binds, so later sections see them.
    pub(crate) fn seq_of_declare_specs(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        for fragment in &fragments {
            match fragment {
                Fragment::Stmt(Stmt::Assign {
                    target: Expr::Name(name),
                    ..
                }) => self.scope.declare(name.as_str()),
                Fragment::Stmt(Stmt::FunctionDef { name, .. }) => {
                    self.scope.declare(name.as_str())
                }
                _ => {}
            }
        }
        Ok(fragments)
    }

    /// `x T := v` binds `X` to `v`, else to a fresh `T()`, else to an empty box.
    pub(crate) fn variable_declaration(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments: VecDeque<Fragment> = self.visit_children(node)?.into();
        let name = declared_name(node, &mut fragments)?;
        self.scope.declare(name.as_str());

        let mut value = Expr::call(Expr::name(runtime::BOX), vec![]);
        if let Some(Fragment::Type(_)) = fragments.front() {
            if let Some(Fragment::Type(TypeRef(ty))) = fragments.pop_front() {
                value = Expr::call(ty, vec![]);
            }
        }
        if let Some(fragment) = fragments.pop_front() {
            value = fragment
                .into_expr()
                .ok_or_else(|| TranslateError::malformed(node, "expected a default value"))?;
        }
        Ok(assign(name, value))
    }

    pub(crate) fn subtype_declaration(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments: VecDeque<Fragment> = self.visit_children(node)?.into();
        let name = declared_name(node, &mut fragments)?;
        let ty = match fragments.pop_front() {
            Some(Fragment::Type(TypeRef(ty))) => ty,
            _ => {
                // Native datatypes carry no type marker; use the runtime's type of that name.
                let native = node
                    .child("type_spec")
                    .and_then(|t| t.child("datatype"))
                    .and_then(|d| d.tokens().first().map(|t| t.to_uppercase()))
                    .ok_or_else(|| TranslateError::unsupported(node))?;
                self.resolve(&native)
            }
        };
        self.scope.declare(name.as_str());
        Ok(assign(name, ty))
    }

    /// Collection and record types map onto the runtime's table and record classes.
    pub(crate) fn type_declaration(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments: VecDeque<Fragment> = self.visit_children(node)?.into();
        let name = declared_name(node, &mut fragments)?;
        self.scope.declare(name.as_str());

        let config = self.config;
        let value = if node.has("table_type_def") {
            let value = match fragments.pop_front() {
                Some(Fragment::Type(TypeRef(element))) => {
                    self.scope.record_dependency(config.runtime.record.as_str());
                    Expr::call(Expr::name(config.runtime.table_of()), vec![element])
                }
                _ => Expr::name(config.runtime.table.as_str()),
            };
            self.scope.record_dependency(config.runtime.table.as_str());
            value
        } else if node.has("record_type_def") {
            self.scope.record_dependency(config.runtime.record.as_str());
            Expr::name(config.runtime.record.as_str())
        } else {
            return Err(TranslateError::unsupported(node));
        };
        Ok(assign(name, value))
    }

    /// `%TYPE` carries no type; `%ROWTYPE` is a record; named types resolve like any name.
    /// Native datatypes carry no type either.
    pub(crate) fn type_spec(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        if node.has("PERCENT_TYPE") {
            return Ok(vec![]);
        }
        let config = self.config;
        if node.has("PERCENT_ROWTYPE") {
            self.scope.record_dependency(config.runtime.record.as_str());
            let record = Expr::name(config.runtime.record.as_str());
            return Ok(vec![Fragment::Type(TypeRef(record))]);
        }
        match node.child("type_name") {
            Some(name) => Ok(vec![Fragment::Type(TypeRef(self.expression(name)?))]),
            None => Ok(vec![]),
        }
    }

    pub(crate) fn type_name(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let segments = self.segments(node);
        Ok(vec![self.resolve_path(node, &segments)?.into()])
    }

    pub(crate) fn parameter(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        match fragments.into_iter().next() {
            Some(Fragment::Expr(Expr::Name(name))) => Ok(vec![Fragment::Param(name)]),
            _ => Err(TranslateError::malformed(node, "parameter without a name")),
        }
    }

    /// `CURSOR c(p) IS SELECT ...` translates its query in a scope where the cursor
    /// parameters are visible, then binds `C` to a runtime cursor.
    pub(crate) fn cursor_declaration(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let name = node
            .child("identifier")
            .map(|id| normalize_identifier(&id.source_text()))
            .ok_or_else(|| TranslateError::malformed(node, "cursor without a name"))?;
        let params: Vec<String> = node
            .children_of("parameter_spec")
            .filter_map(|p| p.child("parameter_name"))
            .map(|p| normalize_identifier(&p.source_text()))
            .collect();

        let mut inner = self.nested(self.scope.enter_cursor(&params));
        let fragments = inner.visit_children(node)?;
        let mut sql = None;
        let mut binds = vec![];
        for fragment in fragments {
            match fragment {
                Fragment::Sql(text) if sql.is_none() => sql = Some(text.0),
                Fragment::BindVar(var) => binds.push(Expr::str(var.0)),
                _ => {}
            }
        }
        // Query-less cursor specifications have no translation.
        let sql = sql.ok_or_else(|| TranslateError::unsupported(node))?;
        let inner = inner.into_scope();
        debug!(
            cursor = %name,
            dependencies = inner.dependencies().len(),
            "translated cursor"
        );
        self.scope.merge_dependencies(inner);
        self.scope.declare(name.as_str());

        let params = params.into_iter().map(Expr::str).collect();
        let value = Expr::method(
            &self.config.runtime.cursor,
            runtime::CURSOR_NEW,
            vec![Expr::str(sql), Expr::List(binds), Expr::List(params)],
        );
        Ok(assign(name, value))
    }

    pub(crate) fn pragma_declaration(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        if node.has("AUTONOMOUS_TRANSACTION") {
            let call = Expr::method(
                &self.config.runtime.cursor,
                runtime::AUTONOMOUS_TRANSACTION,
                vec![],
            );
            return Ok(vec![call.into()]);
        }
        let (line, column) = node.line_col();
        warn!(line, column, pragma = %node.spaced_text(), "dropping pragma");
        Ok(vec![])
    }
}
