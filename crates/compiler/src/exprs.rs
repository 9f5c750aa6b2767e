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

//! Expression handlers.

use crate::ast::{BinOp, BoolOp, CmpOp, Constant, Expr, UnaryOp};
use crate::errors::TranslateError;
use crate::fragment::Fragment;
use crate::names::normalize_identifier;
use crate::numeric::to_number;
use crate::translate::Translator;
use crate::tree::TreeNode;
use plpy_common::runtime;

/// Builtins that translate to a call into the global namespace.
const STRING_FUNCTIONS: &[&str] = &["SUBSTR", "NVL", "TO_CHAR", "TRIM"];

/// Cursor attribute tokens and the cursor method each becomes.
const CURSOR_ATTRIBUTES: &[(&str, &str)] = &[
    ("PERCENT_ISOPEN", runtime::CURSOR_ISOPEN),
    ("PERCENT_ROWCOUNT", runtime::CURSOR_ROWCOUNT),
    ("PERCENT_FOUND", runtime::CURSOR_FOUND),
    ("PERCENT_NOTFOUND", runtime::CURSOR_NOTFOUND),
];

fn one(e: Expr) -> Vec<Fragment> {
    vec![Fragment::Expr(e)]
}

impl<N: TreeNode> Translator<'_, N> {
    /// Literal in a fresh value box.
    pub(crate) fn boxed(&self, constant: Constant) -> Expr {
        Expr::call(Expr::name(runtime::BOX), vec![Expr::Constant(constant)])
    }

    pub(crate) fn constant(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let literal = if node.has("TRUE") {
            Constant::Bool(true)
        } else if node.has("FALSE") {
            Constant::Bool(false)
        } else if node.has("NULL") {
            Constant::Null
        } else {
            return self.visit_children(node);
        };
        Ok(one(self.boxed(literal)))
    }

    pub(crate) fn numeric(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let value = to_number(&node.source_text())?;
        Ok(one(self.boxed(Constant::Number(value))))
    }

    pub(crate) fn quoted_string(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let Some(literal) = node.child("CHAR_STRING").and_then(|c| c.text()) else {
            return Err(TranslateError::unsupported(node));
        };
        let inner = literal
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .ok_or_else(|| TranslateError::malformed(node, "unterminated string literal"))?;
        Ok(one(self.boxed(Constant::Str(inner.replace("''", "'")))))
    }

    pub(crate) fn regular_id(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        Ok(one(Expr::name(node.source_text().to_uppercase())))
    }

    /// Delimited identifiers have no `regular_id` below them.
    pub(crate) fn id_expression(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        if node.has("regular_id") {
            return self.visit_children(node);
        }
        Ok(one(Expr::name(normalize_identifier(&node.source_text()))))
    }

    /// Normalized names of the identifier segments directly below `node`.
    pub(crate) fn segments(&self, node: &N) -> Vec<String> {
        node.children()
            .filter(|c| matches!(c.node_kind(), "id_expression" | "identifier"))
            .map(|c| normalize_identifier(&c.source_text()))
            .collect()
    }

    /// Arguments of a `function_argument` list.
    pub(crate) fn arguments(&mut self, node: &N) -> Result<Vec<Expr>, TranslateError> {
        let fragments = self.visit_children(node)?;
        self.expressions(node, fragments)
    }

    pub(crate) fn argument(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        if node.has("identifier") {
            return Err(TranslateError::unsupported(node));
        }
        self.visit_children(node)
    }

    /// The leading part of an element reference. A reference is always a call: with its argument
    /// list if it has one, with no arguments otherwise. Assignment targets unwrap it again.
    pub(crate) fn element_part(&mut self, node: &N) -> Result<Expr, TranslateError> {
        let segments = self.segments(node);
        let target = self.resolve_path(node, &segments)?;
        let args = match node.child("function_argument") {
            Some(list) => self.arguments(list)?,
            None => vec![],
        };
        Ok(Expr::call(target, args))
    }

    /// `head.part(args).part`: trailing parts are attributes of the head, not names.
    pub(crate) fn general_element(&mut self, node: &N) -> Result<Expr, TranslateError> {
        let mut value: Option<Expr> = None;
        for child in node.children() {
            value = match (child.node_kind(), value) {
                ("general_element", None) => Some(self.general_element(child)?),
                ("general_element_part", None) => Some(self.element_part(child)?),
                ("general_element_part", Some(head)) => {
                    let mut head = self
                        .segments(child)
                        .into_iter()
                        .fold(head, Expr::attr);
                    if let Some(list) = child.child("function_argument") {
                        head = Expr::call(head, self.arguments(list)?);
                    }
                    Some(head)
                }
                (_, value) => value,
            };
        }
        value.ok_or_else(|| TranslateError::malformed(node, "element without a name"))
    }

    /// `INTO` targets are the boxes themselves, never their contents.
    pub(crate) fn variable_name(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let segments = self.segments(node);
        if segments.is_empty() {
            return self.visit_children(node);
        }
        Ok(one(self.resolve_path(node, &segments)?))
    }

    pub(crate) fn routine_name(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let segments = self.segments(node);
        Ok(one(self.resolve_path(node, &segments)?))
    }

    pub(crate) fn function_call(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let Some(name) = node.child("routine_name") else {
            return Err(TranslateError::malformed(node, "call without a routine name"));
        };
        let func = self.expression(name)?;
        let args = match node.child("function_argument") {
            Some(list) => self.arguments(list)?,
            None => vec![],
        };
        Ok(one(Expr::call(func, args)))
    }

    pub(crate) fn concatenation(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        let mut operands = self.expressions(node, fragments)?;
        if node.count("BAR") == 2 {
            return Ok(one(Expr::call(Expr::name(runtime::CONCAT), operands)));
        }
        match operands.len() {
            1 => Ok(operands.into_iter().map(Fragment::Expr).collect()),
            2 => {
                let op = node
                    .children()
                    .find_map(|c| c.text())
                    .and_then(BinOp::from_token)
                    .ok_or_else(|| TranslateError::unsupported(node))?;
                let right = operands.pop();
                let left = operands.pop();
                match (left, right) {
                    (Some(left), Some(right)) => Ok(one(Expr::BinOp {
                        left: Box::new(left),
                        op,
                        right: Box::new(right),
                    })),
                    _ => Err(TranslateError::malformed(node, "missing operand")),
                }
            }
            _ => Err(TranslateError::unsupported(node)),
        }
    }

    /// `IN`, `LIKE` and `BETWEEN` predicates have no translation.
    pub(crate) fn compound_expression(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        if ["IN", "LIKE", "BETWEEN", "LIKEC", "LIKE2", "LIKE4"]
            .iter()
            .any(|k| node.has(k))
        {
            return Err(TranslateError::unsupported(node));
        }
        self.visit_children(node)
    }

    pub(crate) fn relational_operator(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        CmpOp::from_token(&node.source_text())
            .map(|op| vec![Fragment::CmpOp(op)])
            .ok_or_else(|| TranslateError::unsupported(node))
    }

    pub(crate) fn relational_expression(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        match <[Fragment; 3]>::try_from(fragments) {
            Ok([Fragment::Expr(left), Fragment::CmpOp(op), Fragment::Expr(right)]) => {
                Ok(one(Expr::compare(left, op, right)))
            }
            Ok(_) => Err(TranslateError::unsupported(node)),
            Err(fragments) if fragments.len() == 1 => Ok(fragments),
            Err(_) => Err(TranslateError::unsupported(node)),
        }
    }

    pub(crate) fn logical_expression(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        // IS NAN, IS INFINITE, IS EMPTY, IS OF TYPE ...
        if node.has("IS") && !node.has("NULL") {
            return Err(TranslateError::unsupported(node));
        }
        let fragments = self.visit_children(node)?;
        let operands = self.expressions(node, fragments)?;
        let helper = |name: &str, operand: Expr| Expr::call(Expr::name(name), vec![operand]);

        if node.has("IS") && node.has("NULL") {
            let [operand] = <[Expr; 1]>::try_from(operands)
                .map_err(|_| TranslateError::malformed(node, "IS NULL takes one operand"))?;
            let test = helper(runtime::IS_NULL, operand);
            let test = if node.has("NOT") {
                helper(runtime::NOT, test)
            } else {
                test
            };
            return Ok(one(test));
        }
        if node.has("NOT") {
            let [operand] = <[Expr; 1]>::try_from(operands)
                .map_err(|_| TranslateError::malformed(node, "NOT takes one operand"))?;
            return Ok(one(helper(runtime::NOT, operand)));
        }
        let op = if node.has("AND") {
            BoolOp::And
        } else if node.has("OR") {
            BoolOp::Or
        } else {
            return Ok(operands.into_iter().map(Fragment::Expr).collect());
        };
        if operands.len() < 2 {
            return Err(TranslateError::malformed(node, "missing operand"));
        }
        Ok(one(Expr::BoolOp {
            op,
            values: operands,
        }))
    }

    pub(crate) fn unary_expression(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let sign = node.children().next().and_then(|c| c.text());
        if !matches!(sign, Some("-") | Some("+")) {
            return self.visit_children(node);
        }
        let fragments = self.visit_children(node)?;
        let [operand] = <[Expr; 1]>::try_from(self.expressions(node, fragments)?)
            .map_err(|_| TranslateError::malformed(node, "sign takes one operand"))?;
        if sign == Some("+") {
            return Ok(one(operand));
        }
        Ok(one(Expr::UnaryOp {
            op: UnaryOp::USub,
            operand: Box::new(operand),
        }))
    }

    pub(crate) fn string_function(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let Some(function) = STRING_FUNCTIONS.iter().find(|f| node.has(f)) else {
            return Err(TranslateError::unsupported(node));
        };
        let fragments = self.visit_children(node)?;
        let args = self.expressions(node, fragments)?;
        Ok(one(Expr::method(&self.config.runtime.globals, function, args)))
    }

    /// Cursor attributes. Every other builtin in this production is unsupported.
    pub(crate) fn other_function(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let Some((_, attribute)) = CURSOR_ATTRIBUTES.iter().find(|(token, _)| node.has(token))
        else {
            return Err(TranslateError::unsupported(node));
        };
        let fragments = self.visit_children(node)?;
        let cursor = self
            .expressions(node, fragments)?
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::malformed(node, "cursor attribute without a cursor"))?;
        Ok(one(Expr::call(Expr::attr(cursor, *attribute), vec![])))
    }
}
