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

use crate::ast::{CmpOp, ExceptHandler, Expr, Stmt};

/// Which arm of a conditional ladder follows.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Branch {
    ElseIf,
    Else,
}

/// Type expression produced by a type specification, consumed by the declaration around it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TypeRef(pub Expr);

/// Rendered SQL text from the embedded SQL translator.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SqlText(pub String);

/// Name of a host variable bound into embedded SQL.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BindVar(pub String);

/// What a handler hands back to its parent. Expressions and statements end up in the output;
/// everything else is a marker a parent handler consumes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Fragment {
    Expr(Expr),
    Stmt(Stmt),
    Param(String),
    Handler(ExceptHandler),
    CmpOp(CmpOp),
    Branch(Branch),
    Type(TypeRef),
    Sql(SqlText),
    BindVar(BindVar),
}

impl Fragment {
    pub fn into_expr(self) -> Option<Expr> {
        match self {
            Fragment::Expr(e) => Some(e),
            _ => None,
        }
    }

    /// Expressions become expression statements. Markers have no statement form.
    pub fn into_stmt(self) -> Option<Stmt> {
        match self {
            Fragment::Expr(e) => Some(Stmt::Expr(e)),
            Fragment::Stmt(s) => Some(s),
            _ => None,
        }
    }

    /// Bare name, as produced by identifiers and labels.
    pub fn is_bare_name(&self) -> bool {
        matches!(self, Fragment::Expr(Expr::Name(_)))
    }

    /// Output of the embedded SQL translator that only matters to cursor declarations.
    pub fn is_sql_marker(&self) -> bool {
        matches!(self, Fragment::Sql(_) | Fragment::BindVar(_))
    }
}

impl From<Expr> for Fragment {
    fn from(e: Expr) -> Self {
        Fragment::Expr(e)
    }
}

impl From<Stmt> for Fragment {
    fn from(s: Stmt) -> Self {
        Fragment::Stmt(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_conversion() {
        assert_eq!(
            Fragment::from(Expr::name("X")).into_stmt(),
            Some(Stmt::Expr(Expr::name("X")))
        );
        assert_eq!(Fragment::from(Stmt::Pass).into_stmt(), Some(Stmt::Pass));
        assert_eq!(Fragment::Branch(Branch::Else).into_stmt(), None);
        assert_eq!(Fragment::Param("P".into()).into_expr(), None);
    }

    #[test]
    fn test_classification() {
        assert!(Fragment::from(Expr::name("L")).is_bare_name());
        assert!(!Fragment::from(Expr::str("L")).is_bare_name());
        assert!(Fragment::Sql(SqlText("SELECT 1".into())).is_sql_marker());
        assert!(Fragment::BindVar(BindVar("X".into())).is_sql_marker());
        assert!(!Fragment::CmpOp(CmpOp::Eq).is_sql_marker());
    }
}
