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

//! Statement handlers, including exception handling and cursor operations.

use crate::ast::{ExceptHandler, Expr, Stmt};
use crate::errors::TranslateError;
use crate::fragment::Fragment;
use crate::translate::Translator;
use crate::tree::TreeNode;
use plpy_common::runtime;

fn one(s: Stmt) -> Vec<Fragment> {
    vec![Fragment::Stmt(s)]
}

impl<N: TreeNode> Translator<'_, N> {
    /// Statement boundary: expressions become expression statements, embedded SQL markers are
    /// dropped.
    pub(crate) fn statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self
            .visit_children(node)?
            .into_iter()
            .filter(|f| !f.is_sql_marker())
            .collect();
        Ok(self
            .statements(node, fragments)?
            .into_iter()
            .map(Fragment::Stmt)
            .collect())
    }

    /// `BEGIN ... EXCEPTION ... END label`. With handlers present the statements are wrapped
    /// in a `Try`.
    pub(crate) fn body(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let mut handlers = vec![];
        let mut rest = vec![];
        for fragment in self.visit_children(node)? {
            match fragment {
                Fragment::Handler(h) => handlers.push(h),
                other => rest.push(other),
            }
        }
        if rest.last().is_some_and(Fragment::is_bare_name) {
            rest.pop();
        }
        if handlers.is_empty() {
            return Ok(rest);
        }
        let body = self.statements(node, rest)?;
        Ok(one(Stmt::Try { body, handlers }))
    }

    /// The target is translated first. A reference with arguments is an element of a
    /// collection; anything else is a declared box.
    pub(crate) fn assignment_statement(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        let [target, value] = <[Expr; 2]>::try_from(self.expressions(node, fragments)?)
            .map_err(|_| TranslateError::malformed(node, "expected a target and a value"))?;
        let stmt = match target {
            Expr::Call { func, mut args } if !args.is_empty() => Stmt::SubscriptAssign {
                target: *func,
                index: args.swap_remove(0),
                value,
            },
            Expr::Call { func, .. } => Stmt::BoxMutate {
                target: *func,
                value,
            },
            target => Stmt::BoxMutate { target, value },
        };
        Ok(one(stmt))
    }

    pub(crate) fn return_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        let value = self.expressions(node, fragments)?.into_iter().next();
        Ok(one(Stmt::Return(value)))
    }

    pub(crate) fn raise_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        let exception = self.expressions(node, fragments)?.into_iter().next();
        Ok(one(Stmt::Raise(exception)))
    }

    /// `WHEN a OR b THEN ...`
    pub(crate) fn exception_handler(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let names = node.count("exception_name");
        if names == 0 {
            return Err(TranslateError::malformed(node, "handler without an exception"));
        }
        let mut fragments = self.visit_children(node)?;
        if fragments.len() < names {
            return Err(TranslateError::malformed(node, "missing exception name"));
        }
        let body = fragments.split_off(names);
        let exceptions = self.expressions(node, fragments)?;
        let body = self.statements(node, body)?;
        Ok(vec![Fragment::Handler(ExceptHandler { exceptions, body })])
    }

    pub(crate) fn exception_name(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let segments = self.segments(node);
        Ok(vec![self.resolve_path(node, &segments)?.into()])
    }

    pub(crate) fn transaction_control(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let operation = if node.has("commit_statement") {
            runtime::COMMIT
        } else if node.has("rollback_statement") {
            runtime::ROLLBACK
        } else {
            return Err(TranslateError::unsupported(node));
        };
        Ok(vec![
            Expr::method(&self.config.runtime.cursor, operation, vec![]).into(),
        ])
    }

    /// `EXECUTE IMMEDIATE sql [INTO a, b]`
    pub(crate) fn execute_immediate(
        &mut self,
        node: &N,
    ) -> Result<Vec<Fragment>, TranslateError> {
        if node.has("using_clause") || node.has("dynamic_returning_clause") {
            return Err(TranslateError::unsupported(node));
        }
        let fragments = self.visit_children(node)?;
        let args = self.expressions(node, fragments)?;
        if args.is_empty() {
            return Err(TranslateError::malformed(node, "missing dynamic SQL text"));
        }
        Ok(vec![
            Expr::call(Expr::name(runtime::EXECUTE_IMMEDIATE), args).into(),
        ])
    }

    /// `OPEN c(args)` passes the arguments and the visible locals to the cursor. The cursor
    /// itself stays a zero-argument reference like everywhere else.
    pub(crate) fn open_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        if node.has("FOR") {
            return Err(TranslateError::unsupported(node));
        }
        let fragments = self.visit_children(node)?;
        let mut exprs = self.expressions(node, fragments)?.into_iter();
        let (cursor, mut args) = match exprs.next() {
            Some(Expr::Call { func, args }) => (Expr::call(*func, vec![]), args),
            Some(other) => (other, vec![]),
            None => return Err(TranslateError::malformed(node, "OPEN without a cursor")),
        };
        args.extend(exprs);
        let locals = Expr::call(Expr::name(runtime::LOCALS), vec![]);
        Ok(vec![
            Expr::call(
                Expr::attr(cursor, runtime::CURSOR_OPEN),
                vec![Expr::List(args), locals],
            )
            .into(),
        ])
    }

    /// `FETCH c INTO a, b`
    pub(crate) fn fetch_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        if node.has("LIMIT") {
            return Err(TranslateError::unsupported(node));
        }
        let fragments = self.visit_children(node)?;
        let mut exprs = self.expressions(node, fragments)?.into_iter();
        let cursor = exprs
            .next()
            .ok_or_else(|| TranslateError::malformed(node, "FETCH without a cursor"))?;
        Ok(vec![
            Expr::call(Expr::attr(cursor, runtime::CURSOR_FETCH), exprs.collect()).into(),
        ])
    }

    pub(crate) fn close_statement(&mut self, node: &N) -> Result<Vec<Fragment>, TranslateError> {
        let fragments = self.visit_children(node)?;
        let cursor = self
            .expressions(node, fragments)?
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::malformed(node, "CLOSE without a cursor"))?;
        Ok(vec![
            Expr::call(Expr::attr(cursor, runtime::CURSOR_CLOSE), vec![]).into(),
        ])
    }
}
