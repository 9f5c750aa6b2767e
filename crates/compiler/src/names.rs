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

use crate::ast::Expr;
use crate::scope::Scope;
use plpy_common::Globals;
use strum::Display;
use tracing::trace;

/// How an identifier is bound, in order of precedence.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display)]
pub enum Binding {
    Local,
    PackageMember,
    Global,
    External,
}

/// Identifier text as a lookup key: quoted identifiers keep their case, everything else is
/// uppercased.
pub fn normalize_identifier(text: &str) -> String {
    let text = text.trim();
    match text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(quoted) => quoted.to_string(),
        None => text.to_uppercase(),
    }
}

/// Maps identifiers to references against a scope and the builtin namespace.
pub struct Resolver<'a> {
    globals: &'a Globals,
    globals_module: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(globals: &'a Globals, globals_module: &'a str) -> Self {
        Self {
            globals,
            globals_module,
        }
    }

    pub fn binding(&self, scope: &Scope, name: &str) -> Binding {
        if scope.is_declared(name) {
            Binding::Local
        } else if scope.is_package_var(name) && scope.package_name().is_some() {
            Binding::PackageMember
        } else if self.globals.contains(name) {
            Binding::Global
        } else {
            Binding::External
        }
    }

    /// Reference for a single normalized identifier. External names are recorded as
    /// dependencies of the scope.
    pub fn resolve(&self, scope: &mut Scope, name: &str) -> Expr {
        let binding = self.binding(scope, name);
        trace!(identifier = name, %binding, "resolved identifier");
        match binding {
            Binding::Local => Expr::name(name),
            Binding::PackageMember => {
                let package = scope.package_name().unwrap_or_default().to_string();
                Expr::attr(Expr::name(package), name)
            }
            Binding::Global => Expr::attr(Expr::name(self.globals_module), name),
            Binding::External => {
                scope.record_dependency(name);
                Expr::name(name)
            }
        }
    }

    /// `a.b.c`: the head resolves through [`Resolver::resolve`], the rest are attributes.
    pub fn resolve_path(&self, scope: &mut Scope, segments: &[String]) -> Option<Expr> {
        let (head, rest) = segments.split_first()?;
        let head = self.resolve(scope, head);
        Some(
            rest.iter()
                .fold(head, |value, segment| Expr::attr(value, segment.as_str())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("foo", "FOO"; "regular is uppercased")]
    #[test_case("Foo_Bar$", "FOO_BAR$"; "mixed case")]
    #[test_case("\"MixedCase\"", "MixedCase"; "quoted keeps case")]
    #[test_case(" x ", "X"; "surrounding space")]
    fn test_normalize(text: &str, expected: &str) {
        assert_eq!(normalize_identifier(text), expected);
    }

    fn package_routine_scope() -> Scope {
        let body = Scope::new().enter_package_body("PKG", vec!["COUNTER".to_string()]);
        body.enter_routine(&["COUNTER_IN".to_string()])
    }

    #[test]
    fn test_precedence() {
        let globals = Globals::new();
        let resolver = Resolver::new(&globals, "PLGLOBALS");
        let mut scope = package_routine_scope();

        assert_eq!(resolver.resolve(&mut scope, "COUNTER_IN"), Expr::name("COUNTER_IN"));
        assert_eq!(resolver.resolve(&mut scope, "PKG"), Expr::name("PKG"));
        assert_eq!(
            resolver.resolve(&mut scope, "COUNTER"),
            Expr::attr(Expr::name("PKG"), "COUNTER")
        );
        assert_eq!(
            resolver.resolve(&mut scope, "SUBSTR"),
            Expr::attr(Expr::name("PLGLOBALS"), "SUBSTR")
        );
        assert!(scope.dependencies().is_empty());

        assert_eq!(resolver.resolve(&mut scope, "OTHER_PKG"), Expr::name("OTHER_PKG"));
        assert_eq!(
            scope.dependencies().iter().collect::<Vec<_>>(),
            vec!["OTHER_PKG"]
        );
    }

    #[test]
    fn test_parameter_shadows_package_member() {
        let globals = Globals::new();
        let resolver = Resolver::new(&globals, "PLGLOBALS");
        let body = Scope::new().enter_package_body("PKG", vec!["LIMIT_VALUE".to_string()]);
        let scope = body.enter_routine(&["LIMIT_VALUE".to_string()]);
        assert_eq!(resolver.binding(&scope, "LIMIT_VALUE"), Binding::Local);
    }

    #[test]
    fn test_local_shadows_global() {
        let globals = Globals::new();
        let resolver = Resolver::new(&globals, "PLGLOBALS");
        let mut scope = Scope::new();
        scope.declare("SUBSTR");
        assert_eq!(resolver.binding(&scope, "SUBSTR"), Binding::Local);
    }

    #[test]
    fn test_dotted_path() {
        let globals = Globals::new();
        let resolver = Resolver::new(&globals, "PLGLOBALS");
        let mut scope = Scope::new();
        let segments = vec!["DBMS_OUTPUT".to_string(), "PUT_LINE".to_string()];
        assert_eq!(
            resolver.resolve_path(&mut scope, &segments),
            Some(Expr::attr(
                Expr::attr(Expr::name("PLGLOBALS"), "DBMS_OUTPUT"),
                "PUT_LINE"
            ))
        );
        assert_eq!(resolver.resolve_path(&mut scope, &[]), None);

        let segments = vec!["FOO".to_string(), "BAR".to_string()];
        resolver.resolve_path(&mut scope, &segments);
        resolver.resolve_path(&mut scope, &segments);
        assert_eq!(scope.dependencies().len(), 1);
    }
}
