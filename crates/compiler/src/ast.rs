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

//! Python syntax tree produced by the translator.
//!
//! Only the subset of Python the translation emits is modelled. Every declared PL/SQL scalar is
//! a single-slot box, so updates go through [`Stmt::BoxMutate`] rather than rebinding a name.

use crate::numeric::Number;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub enum Stmt {
    /// `from <module> import *`
    Import { module: String },
    ClassDef {
        name: String,
        bases: Vec<Expr>,
        body: Vec<Stmt>,
    },
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        is_static: bool,
    },
    /// Binds a fresh name. Used for declarations only.
    Assign { target: Expr, value: Expr },
    /// `target.set(value)`: replaces the contents of a declared box.
    BoxMutate { target: Expr, value: Expr },
    /// `target[index] = value`
    SubscriptAssign {
        target: Expr,
        index: Expr,
        value: Expr,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    For {
        target: String,
        iter: Expr,
        body: Vec<Stmt>,
    },
    While { test: Expr, body: Vec<Stmt> },
    Try {
        body: Vec<Stmt>,
        handlers: Vec<ExceptHandler>,
    },
    Return(Option<Expr>),
    Raise(Option<Expr>),
    Break,
    Continue,
    Pass,
    Expr(Expr),
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ExceptHandler {
    pub exceptions: Vec<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub enum Expr {
    Name(String),
    Attribute { value: Box<Expr>, attr: String },
    Call { func: Box<Expr>, args: Vec<Expr> },
    Constant(Constant),
    List(Vec<Expr>),
    UnaryOp { op: UnaryOp, operand: Box<Expr> },
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    BoolOp { op: BoolOp, values: Vec<Expr> },
    Compare {
        left: Box<Expr>,
        op: CmpOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn attr(value: Expr, attr: impl Into<String>) -> Self {
        Self::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Self::Call {
            func: Box::new(func),
            args,
        }
    }

    /// `<module>.<member>(args)`
    pub fn method(module: &str, member: &str, args: Vec<Expr>) -> Self {
        Self::call(Self::attr(Self::name(module), member), args)
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Constant(Constant::Str(value.into()))
    }

    pub fn compare(left: Expr, op: CmpOp, right: Expr) -> Self {
        Self::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub enum Constant {
    Bool(bool),
    Null,
    Number(Number),
    Str(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum UnaryOp {
    USub,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mult,
    Div,
}

impl BinOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mult),
            "/" => Some(Self::Div),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
}

impl CmpOp {
    /// PL/SQL relational operator to comparison. Spacing inside the operator is ignored, so
    /// `< =` and `<=` are the same.
    pub fn from_token(token: &str) -> Option<Self> {
        let op: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        match op.as_str() {
            "=" => Some(Self::Eq),
            "!=" | "<>" | "^=" | "~=" => Some(Self::NotEq),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::LtE),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::GtE),
            _ => None,
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::USub => write!(f, "-"),
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mult => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

impl Display for BoolOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

impl Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::LtE => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtE => write!(f, ">="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("=", Some(CmpOp::Eq); "equals")]
    #[test_case("<>", Some(CmpOp::NotEq); "angle not equal")]
    #[test_case("!=", Some(CmpOp::NotEq); "bang not equal")]
    #[test_case("< =", Some(CmpOp::LtE); "spaced less or equal")]
    #[test_case(">=", Some(CmpOp::GtE); "greater or equal")]
    #[test_case("LIKE", None; "not relational")]
    fn test_relational_tokens(token: &str, expected: Option<CmpOp>) {
        assert_eq!(CmpOp::from_token(token), expected);
    }

    #[test]
    fn test_arithmetic_tokens() {
        assert_eq!(BinOp::from_token("*"), Some(BinOp::Mult));
        assert_eq!(BinOp::from_token("**"), None);
        assert_eq!(BinOp::Div.to_string(), "/");
    }

    #[test]
    fn test_serialized_shape() {
        let expr = Expr::method("PLCURSOR", "commit", vec![]);
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Call": {"func": {"Attribute": {"value": {"Name": "PLCURSOR"}, "attr": "commit"}}, "args": []}})
        );
    }
}
