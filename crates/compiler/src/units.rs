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

//! Translation units: anonymous blocks, package specifications and bodies, routines.
//!
//! Each unit is translated by a nested [`Translator`] over its own scope. Once it returns, the
//! only state that survives is its dependency set, merged into the parent.

use crate::ast::{Expr, Stmt};
use crate::errors::TranslateError;
use crate::fragment::Fragment;
use crate::names::normalize_identifier;
use crate::scope::ScopeKind;
use crate::translate::Translator;
use crate::tree::TreeNode;
use indexmap::IndexSet;
use tracing::debug;

impl<N: TreeNode> Translator<'_, N> {
    pub(crate) fn unit_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        Ok(self
            .statements(node, fragments)?
            .into_iter()
            .map(Fragment::Stmt)
            .collect())
    }

    pub(crate) fn anonymous_block(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut inner = self.nested(self.scope.enter_block());
        let fragments = inner.body(node)?;
        let inner = inner.into_scope();
        debug!(dependencies = inner.dependencies().len(), "translated anonymous block");
        self.scope.merge_dependencies(inner);
        Ok(fragments)
    }

    fn package_name(&self, node: &N) -> Result<String, TranslateError> {
        node.child("package_name")
            .map(|n| normalize_identifier(&n.source_text()))
            .ok_or_else(|| TranslateError::malformed(node, "package without a name"))
    }

    /// `CREATE PACKAGE p AS ... END p;` becomes `class P_SPEC` holding the declarations.
    pub(crate) fn create_package(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let name = self.package_name(node)?;
        let mut inner = self.nested(self.scope.enter_package_spec());
        let fragments: Vec<Fragment> = inner
            .visit_children(node)?
            .into_iter()
            .filter(|f| !f.is_bare_name())
            .collect();
        let mut body = inner.statements(node, fragments)?;
        for stmt in &body {
            if let Stmt::Assign {
                target: Expr::Name(member),
                ..
            } = stmt
            {
                inner.scope.declare(member.as_str());
            }
        }
        if body.is_empty() {
            body.push(Stmt::Pass);
        }

        let inner = inner.into_scope();
        let members: IndexSet<String> = inner.package_vars().clone();
        debug!(
            package = %name,
            members = members.len(),
            dependencies = inner.dependencies().len(),
            "translated package specification"
        );
        self.scope.merge_dependencies(inner);
        self.spec_members.insert(name.clone(), members);

        Ok(vec![
            Stmt::ClassDef {
                name: self.config.spec_class_name(&name),
                bases: vec![],
                body,
            }
            .into(),
        ])
    }

    /// `CREATE PACKAGE BODY p AS ... END p;` becomes `class P(P_SPEC)` with every routine a
    /// static method.
    pub(crate) fn create_package_body(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let name = self.package_name(node)?;
        let members = self.spec_members.get(&name).cloned().unwrap_or_default();
        let mut inner = self.nested(self.scope.enter_package_body(&name, members));
        let fragments: Vec<Fragment> = inner
            .visit_children(node)?
            .into_iter()
            .filter(|f| !f.is_bare_name())
            .collect();
        let mut body = inner.statements(node, fragments)?;
        if body.is_empty() {
            body.push(Stmt::Pass);
        }

        let inner = inner.into_scope();
        debug!(
            package = %name,
            dependencies = inner.dependencies().len(),
            "translated package body"
        );
        self.scope.merge_dependencies(inner);
        self.scope.declare(name.as_str());

        let spec = self.config.spec_class_name(&name);
        Ok(vec![
            Stmt::ClassDef {
                name,
                bases: vec![Expr::name(spec)],
                body,
            }
            .into(),
        ])
    }

    fn routine_name_of(&self, node: &N) -> Result<String, TranslateError> {
        let name = node
            .children()
            .find(|c| {
                matches!(
                    c.node_kind(),
                    "identifier" | "procedure_name" | "function_name"
                )
            })
            .ok_or_else(|| TranslateError::malformed(node, "routine without a name"))?;
        if name.node_kind() == "identifier" {
            return Ok(normalize_identifier(&name.source_text()));
        }
        // `schema.name`: only the last segment names the routine.
        self.segments(name)
            .pop()
            .ok_or_else(|| TranslateError::malformed(node, "routine without a name"))
    }

    /// Procedures and functions, standalone or inside a package body or another routine.
    pub(crate) fn routine(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let name = self.routine_name_of(node)?;
        let params: Vec<String> = node
            .children_of("parameter")
            .filter_map(|p| p.child("parameter_name"))
            .map(|p| normalize_identifier(&p.source_text()))
            .collect();

        // Registered up front, recursive calls resolve to the routine itself. Inside a package
        // body that makes it a package member.
        if self.config.preregister_routines {
            self.scope.declare(name.as_str());
        }

        let mut inner = self.nested(self.scope.enter_routine(&params));
        let mut args = vec![];
        let mut rest = vec![];
        for fragment in inner.visit_children(node)? {
            match fragment {
                Fragment::Param(p) => args.push(p),
                // The return type, and the routine name itself.
                Fragment::Type(_) => {}
                f if f.is_bare_name() => {}
                f => rest.push(f),
            }
        }
        let mut body = inner.statements(node, rest)?;
        if body.is_empty() {
            body.push(Stmt::Pass);
        }

        let inner = inner.into_scope();
        debug!(
            routine = %name,
            params = args.len(),
            dependencies = inner.dependencies().len(),
            "translated routine"
        );
        self.scope.merge_dependencies(inner);
        self.scope.declare(name.as_str());

        Ok(vec![
            Stmt::FunctionDef {
                name,
                params: args,
                body,
                is_static: self.scope.kind() == ScopeKind::PackageBody,
            }
            .into(),
        ])
    }
}
