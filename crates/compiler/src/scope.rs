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

use indexmap::IndexSet;
use strum::Display;

/// What kind of translation unit a scope belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display)]
pub enum ScopeKind {
    Module,
    PackageSpec,
    PackageBody,
    Routine,
    Cursor,
    AnonymousBlock,
}

/// Name environment of one translation unit.
///
/// Child scopes are created by copying what they inherit at entry. After the child completes
/// the only thing that flows back to the parent is its dependency set.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Scope {
    kind: ScopeKind,
    /// Names that resolve bare.
    declared: IndexSet<String>,
    /// Members of the enclosing package, which resolve qualified by the package name.
    package_vars: IndexSet<String>,
    package_name: Option<String>,
    /// Unresolved names, each becoming a module import. First-occurrence order.
    dependencies: IndexSet<String>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            kind: ScopeKind::Module,
            declared: IndexSet::new(),
            package_vars: IndexSet::new(),
            package_name: None,
            dependencies: IndexSet::new(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Declares a name in this scope. Inside a package specification or body the name is also a
    /// package member.
    pub fn declare(&mut self, name: impl Into<String>) {
        let name = name.into();
        if matches!(self.kind, ScopeKind::PackageSpec | ScopeKind::PackageBody) {
            self.package_vars.insert(name.clone());
        }
        self.declared.insert(name);
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name) || self.package_name.as_deref() == Some(name)
    }

    pub fn is_package_var(&self, name: &str) -> bool {
        self.package_vars.contains(name)
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    pub fn package_vars(&self) -> &IndexSet<String> {
        &self.package_vars
    }

    pub fn record_dependency(&mut self, name: impl Into<String>) {
        self.dependencies.insert(name.into());
    }

    pub fn dependencies(&self) -> &IndexSet<String> {
        &self.dependencies
    }

    /// Folds a finished child's dependencies into this scope, keeping first-occurrence order.
    pub fn merge_dependencies(&mut self, child: Scope) {
        self.dependencies.extend(child.dependencies);
    }

    fn child(&self, kind: ScopeKind, declared: IndexSet<String>) -> Scope {
        Scope {
            kind,
            declared,
            package_vars: self.package_vars.clone(),
            package_name: self.package_name.clone(),
            dependencies: IndexSet::new(),
        }
    }

    pub fn enter_package_spec(&self) -> Scope {
        let mut scope = self.child(ScopeKind::PackageSpec, self.declared.clone());
        scope.package_vars.clear();
        scope.package_name = None;
        scope
    }

    /// The package's own name and the members of its specification are visible bare inside
    /// the body.
    pub fn enter_package_body<I>(&self, name: &str, spec_members: I) -> Scope
    where
        I: IntoIterator<Item = String>,
    {
        let mut scope = self.child(ScopeKind::PackageBody, self.declared.clone());
        scope.package_vars.clear();
        scope.package_name = Some(name.to_string());
        scope.declared.insert(name.to_string());
        for member in spec_members {
            scope.declare(member);
        }
        scope
    }

    /// A routine sees its parameters bare. Directly inside a package body it starts with the
    /// names from outside the package only, so package members resolve qualified. Nested
    /// anywhere else it inherits the parent's locals.
    pub fn enter_routine(&self, params: &[String]) -> Scope {
        let mut declared: IndexSet<String> = match self.kind {
            ScopeKind::PackageBody => self
                .declared
                .iter()
                .filter(|n| !self.package_vars.contains(*n))
                .cloned()
                .collect(),
            _ => self.declared.clone(),
        };
        declared.extend(params.iter().cloned());
        let mut scope = self.child(ScopeKind::Routine, declared);
        if self.kind == ScopeKind::PackageBody {
            scope.package_vars = self.package_vars.clone();
        }
        scope
    }

    pub fn enter_cursor(&self, params: &[String]) -> Scope {
        let mut declared = self.declared.clone();
        declared.extend(params.iter().cloned());
        self.child(ScopeKind::Cursor, declared)
    }

    pub fn enter_block(&self) -> Scope {
        self.child(ScopeKind::AnonymousBlock, self.declared.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut scope = Scope::new();
        scope.declare("X");
        scope.declare("X");
        assert!(scope.is_declared("X"));
        assert!(!scope.is_declared("Y"));
        assert!(!scope.is_package_var("X"));
    }

    #[test]
    fn test_dependencies_keep_first_occurrence_order() {
        let mut parent = Scope::new();
        parent.record_dependency("B");
        let mut child = parent.enter_block();
        assert!(child.dependencies().is_empty());
        child.record_dependency("A");
        child.record_dependency("B");
        child.record_dependency("A");
        parent.merge_dependencies(child);
        assert_eq!(
            parent.dependencies().iter().cloned().collect::<Vec<_>>(),
            strings(&["B", "A"])
        );
    }

    #[test]
    fn test_package_body_members_qualify_in_routines() {
        let mut module = Scope::new();
        module.declare("HELPER");
        let mut body = module.enter_package_body("PKG", strings(&["COUNTER"]));
        body.declare("CACHE");
        assert_eq!(body.package_name(), Some("PKG"));
        assert!(body.is_declared("COUNTER"));

        let routine = body.enter_routine(&strings(&["P"]));
        assert_eq!(routine.kind(), ScopeKind::Routine);
        assert!(routine.is_declared("P"));
        assert!(routine.is_declared("HELPER"));
        assert!(routine.is_declared("PKG"));
        assert!(!routine.is_declared("COUNTER"));
        assert!(!routine.is_declared("CACHE"));
        assert!(routine.is_package_var("COUNTER"));
        assert!(routine.is_package_var("CACHE"));
    }

    #[test]
    fn test_nested_routine_inherits_locals() {
        let module = Scope::new();
        let mut outer = module.enter_routine(&strings(&["A"]));
        outer.declare("LOCAL");
        let inner = outer.enter_routine(&strings(&["B"]));
        assert!(inner.is_declared("A"));
        assert!(inner.is_declared("LOCAL"));
        assert!(inner.is_declared("B"));

        let mut sibling = module.enter_routine(&[]);
        sibling.declare("ONLY_HERE");
        assert!(!module.enter_routine(&[]).is_declared("ONLY_HERE"));
    }

    #[test]
    fn test_cursor_and_block_scopes() {
        let mut routine = Scope::new().enter_routine(&strings(&["P"]));
        routine.declare("V");
        let cursor = routine.enter_cursor(&strings(&["C_ARG"]));
        assert_eq!(cursor.kind(), ScopeKind::Cursor);
        assert!(cursor.is_declared("V"));
        assert!(cursor.is_declared("C_ARG"));
        assert!(!routine.is_declared("C_ARG"));

        let block = routine.enter_block();
        assert_eq!(block.kind().to_string(), "AnonymousBlock");
        assert!(block.is_declared("P"));
    }

    #[test]
    fn test_package_spec_starts_without_package_context() {
        let body = Scope::new().enter_package_body("PKG", vec![]);
        let mut spec = body.enter_package_spec();
        assert_eq!(spec.package_name(), None);
        spec.declare("FIELD");
        assert_eq!(
            spec.package_vars().iter().cloned().collect::<Vec<_>>(),
            strings(&["FIELD"])
        );
    }
}
