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

//! Conditionals and loops.
//!
//! A conditional arrives flattened, with [`Branch`] markers where each `ELSIF`/`WHEN` and
//! `ELSE` arm started:
//!
//! ```text
//! [topcond, s.., ElseIf, c1, s.., ElseIf, c2, s.., Else, s..]
//! ```
//!
//! and is rebuilt into right-nested `If`s by scanning from the end.

use crate::ast::{CmpOp, Constant, Expr, Stmt};
use crate::errors::TranslateError;
use crate::fragment::{Branch, Fragment};
use crate::names::normalize_identifier;
use crate::translate::Translator;
use crate::tree::TreeNode;
use plpy_common::runtime;
use std::collections::VecDeque;

/// Rebuilds a flattened conditional ladder.
pub fn rebuild_if<N: TreeNode>(node: &N, fragments: Vec<Fragment>) -> Result<Stmt, TranslateError> {
    let mut pending: VecDeque<Fragment> = VecDeque::new();
    let mut orelse: Vec<Stmt> = vec![];
    let mut fragments = fragments;
    while let Some(fragment) = fragments.pop() {
        match fragment {
            Fragment::Branch(Branch::Else) => {
                orelse = arm_body(node, pending.drain(..))?;
            }
            Fragment::Branch(Branch::ElseIf) => {
                let (test, body) = arm(node, &mut pending)?;
                orelse = vec![Stmt::If {
                    test,
                    body,
                    orelse: std::mem::take(&mut orelse),
                }];
            }
            other => pending.push_front(other),
        }
    }
    let (test, body) = arm(node, &mut pending)?;
    Ok(Stmt::If { test, body, orelse })
}

/// `CASE selector WHEN v ...`: each arm value becomes `selector == v`.
pub fn rebuild_simple_case<N: TreeNode>(
    node: &N,
    fragments: Vec<Fragment>,
) -> Result<Stmt, TranslateError> {
    let mut fragments: VecDeque<Fragment> = fragments.into();
    let selector = fragments
        .pop_front()
        .and_then(Fragment::into_expr)
        .ok_or_else(|| TranslateError::malformed(node, "CASE without a selector"))?;

    let mut rewritten = Vec::with_capacity(fragments.len());
    let mut after_when = false;
    for fragment in fragments {
        let fragment = match fragment {
            Fragment::Expr(value) if after_when => {
                Fragment::Expr(Expr::compare(selector.clone(), CmpOp::Eq, value))
            }
            other => other,
        };
        after_when = fragment == Fragment::Branch(Branch::ElseIf);
        rewritten.push(fragment);
    }
    rebuild_if(node, drop_leading_when(node, rewritten)?)
}

/// `CASE WHEN c ...`
pub fn rebuild_searched_case<N: TreeNode>(
    node: &N,
    fragments: Vec<Fragment>,
) -> Result<Stmt, TranslateError> {
    rebuild_if(node, drop_leading_when(node, fragments)?)
}

fn drop_leading_when<N: TreeNode>(
    node: &N,
    mut fragments: Vec<Fragment>,
) -> Result<Vec<Fragment>, TranslateError> {
    if fragments.first() != Some(&Fragment::Branch(Branch::ElseIf)) {
        return Err(TranslateError::malformed(node, "CASE without a WHEN arm"));
    }
    fragments.remove(0);
    Ok(fragments)
}

fn arm<N: TreeNode>(
    node: &N,
    pending: &mut VecDeque<Fragment>,
) -> Result<(Expr, Vec<Stmt>), TranslateError> {
    let test = pending
        .pop_front()
        .ok_or_else(|| TranslateError::malformed(node, "empty branch"))?
        .into_expr()
        .ok_or_else(|| TranslateError::malformed(node, "branch without a condition"))?;
    let body = arm_body(node, pending.drain(..))?;
    Ok((test, body))
}

fn arm_body<N: TreeNode>(
    node: &N,
    fragments: impl Iterator<Item = Fragment>,
) -> Result<Vec<Stmt>, TranslateError> {
    fragments
        .map(|f| {
            f.into_stmt()
                .ok_or_else(|| TranslateError::malformed(node, "expected a statement"))
        })
        .collect()
}

/// Drops the names contributed by `<<label>> ... END LOOP label` and
/// `label CASE ... END CASE label`. Either end is only touched when the node starts or ends with
/// a label child.
fn strip_labels<N: TreeNode>(node: &N, fragments: &mut VecDeque<Fragment>) {
    let kinds: Vec<&str> = node.children().map(TreeNode::node_kind).collect();
    let leading = matches!(kinds.first(), Some(&"label_declaration" | &"label_name"));
    let trailing = kinds.len() > 1 && kinds.last() == Some(&"label_name");
    if leading && fragments.front().is_some_and(Fragment::is_bare_name) {
        fragments.pop_front();
    }
    if trailing && fragments.back().is_some_and(Fragment::is_bare_name) {
        fragments.pop_back();
    }
}

impl<N: TreeNode> Translator<'_, N> {
    pub(crate) fn branch(
        &mut self,
        node: &N,
        branch: Branch,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments = vec![Fragment::Branch(branch)];
        fragments.extend(self.visit_children(node)?);
        Ok(fragments)
    }

    pub(crate) fn if_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        Ok(vec![rebuild_if(node, fragments)?.into()])
    }

    pub(crate) fn simple_case_statement(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments: VecDeque<Fragment> = self.visit_children(node)?.into();
        strip_labels(node, &mut fragments);
        Ok(vec![rebuild_simple_case(node, fragments.into())?.into()])
    }

    pub(crate) fn searched_case_statement(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments: VecDeque<Fragment> = self.visit_children(node)?.into();
        strip_labels(node, &mut fragments);
        Ok(vec![rebuild_searched_case(node, fragments.into())?.into()])
    }

    /// Plain `LOOP`, `WHILE` and `FOR` loops. A `FOR` header arrives from
    /// [`Translator::cursor_loop_param`] as a `For` with an empty body.
    pub(crate) fn loop_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments: VecDeque<Fragment> = self.visit_children(node)?.into();
        strip_labels(node, &mut fragments);

        let stmt = if node.has("WHILE") {
            let test = fragments
                .pop_front()
                .and_then(Fragment::into_expr)
                .ok_or_else(|| TranslateError::malformed(node, "WHILE without a condition"))?;
            let body = self.statements(node, fragments.into())?;
            Stmt::While { test, body }
        } else if node.has("FOR") {
            let Some(Fragment::Stmt(Stmt::For { target, iter, .. })) = fragments.pop_front() else {
                return Err(TranslateError::malformed(node, "FOR without a loop header"));
            };
            let body = self.statements(node, fragments.into())?;
            Stmt::For { target, iter, body }
        } else {
            let body = self.statements(node, fragments.into())?;
            Stmt::While {
                test: Expr::Constant(Constant::Bool(true)),
                body,
            }
        };
        Ok(vec![stmt.into()])
    }

    /// `i IN [REVERSE] lo..hi` or `r IN cursor` / `r IN (SELECT ...)`. The index is declared
    /// before anything below it is visited.
    pub(crate) fn cursor_loop_param(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let index = node
            .child("index_name")
            .or_else(|| node.child("record_name"))
            .map(|n| normalize_identifier(&n.source_text()))
            .ok_or_else(|| TranslateError::malformed(node, "loop without an index"))?;
        self.scope.declare(index.as_str());

        let mut fragments: VecDeque<Fragment> = self
            .visit_children(node)?
            .into_iter()
            .filter(|f| !f.is_sql_marker())
            .collect();
        fragments.pop_front();
        let mut bounds = self.expressions(node, fragments.into())?.into_iter();

        let iter = if node.has("lower_bound") {
            let (Some(lower), Some(upper)) = (bounds.next(), bounds.next()) else {
                return Err(TranslateError::malformed(node, "range without bounds"));
            };
            let range = Expr::call(Expr::name(runtime::RANGE), vec![lower, upper]);
            if node.has("REVERSE") {
                Expr::call(Expr::name(runtime::REVERSED), vec![range])
            } else {
                range
            }
        } else {
            let source = bounds
                .next()
                .ok_or_else(|| TranslateError::malformed(node, "loop without a source"))?;
            let args: Vec<Expr> = bounds.collect();
            match source {
                Expr::Call { func, args: none } if none.is_empty() && !args.is_empty() => {
                    Expr::call(*func, args)
                }
                source => source,
            }
        };
        Ok(vec![
            Stmt::For {
                target: index,
                iter,
                body: vec![],
            }
            .into(),
        ])
    }

    /// `EXIT [label] [WHEN c]`
    pub(crate) fn exit_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        self.guarded(node, Stmt::Break)
    }

    pub(crate) fn continue_statement(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        self.guarded(node, Stmt::Continue)
    }

    fn guarded(&mut self, node: &N, stmt: Stmt) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        if !node.has("condition") {
            return Ok(vec![stmt.into()]);
        }
        let test = fragments
            .into_iter()
            .last()
            .and_then(Fragment::into_expr)
            .ok_or_else(|| TranslateError::malformed(node, "WHEN without a condition"))?;
        Ok(vec![
            Stmt::If {
                test,
                body: vec![stmt],
                orelse: vec![],
            }
            .into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ParseNode;
    use pretty_assertions::assert_eq;

    fn cond(name: &str) -> Fragment {
        Expr::name(name).into()
    }

    fn stmt(name: &str) -> Fragment {
        Stmt::Expr(Expr::name(name)).into()
    }

    fn s(name: &str) -> Stmt {
        Stmt::Expr(Expr::name(name))
    }

    fn node() -> ParseNode {
        ParseNode::rule("if_statement", vec![])
    }

    #[test]
    fn test_ladder() {
        let fragments = vec![
            cond("TOPCOND"),
            stmt("S1"),
            Fragment::Branch(Branch::ElseIf),
            cond("C1"),
            stmt("S2"),
            Fragment::Branch(Branch::ElseIf),
            cond("C2"),
            stmt("S3"),
            Fragment::Branch(Branch::Else),
            stmt("S4"),
        ];
        assert_eq!(
            rebuild_if(&node(), fragments).unwrap(),
            Stmt::If {
                test: Expr::name("TOPCOND"),
                body: vec![s("S1")],
                orelse: vec![Stmt::If {
                    test: Expr::name("C1"),
                    body: vec![s("S2")],
                    orelse: vec![Stmt::If {
                        test: Expr::name("C2"),
                        body: vec![s("S3")],
                        orelse: vec![s("S4")],
                    }],
                }],
            }
        );
    }

    #[test]
    fn test_plain_if() {
        let fragments = vec![cond("C"), stmt("A"), stmt("B")];
        assert_eq!(
            rebuild_if(&node(), fragments).unwrap(),
            Stmt::If {
                test: Expr::name("C"),
                body: vec![s("A"), s("B")],
                orelse: vec![],
            }
        );
    }

    #[test]
    fn test_empty_branch_is_malformed() {
        let fragments = vec![cond("C"), stmt("A"), Fragment::Branch(Branch::ElseIf)];
        assert!(matches!(
            rebuild_if(&node(), fragments),
            Err(TranslateError::MalformedTree { .. })
        ));
        assert!(matches!(
            rebuild_if(&node(), vec![]),
            Err(TranslateError::MalformedTree { .. })
        ));
    }

    #[test]
    fn test_simple_case() {
        let fragments = vec![
            cond("SEL"),
            Fragment::Branch(Branch::ElseIf),
            cond("V1"),
            stmt("A"),
            Fragment::Branch(Branch::ElseIf),
            cond("V2"),
            stmt("B"),
            Fragment::Branch(Branch::Else),
            stmt("C"),
        ];
        let eq = |v: &str| Expr::compare(Expr::name("SEL"), CmpOp::Eq, Expr::name(v));
        assert_eq!(
            rebuild_simple_case(&node(), fragments).unwrap(),
            Stmt::If {
                test: eq("V1"),
                body: vec![s("A")],
                orelse: vec![Stmt::If {
                    test: eq("V2"),
                    body: vec![s("B")],
                    orelse: vec![s("C")],
                }],
            }
        );
    }

    #[test]
    fn test_searched_case_requires_when() {
        let fragments = vec![Fragment::Branch(Branch::Else), stmt("A")];
        assert!(rebuild_searched_case(&node(), fragments).is_err());

        let fragments = vec![Fragment::Branch(Branch::ElseIf), cond("C"), stmt("A")];
        assert_eq!(
            rebuild_searched_case(&node(), fragments).unwrap(),
            Stmt::If {
                test: Expr::name("C"),
                body: vec![s("A")],
                orelse: vec![],
            }
        );
    }
}
