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

//! Translation of embedded SQL statements.

use crate::ast::Expr;
use crate::errors::TranslateError;
use crate::fragment::{BindVar, Fragment, SqlText};
use crate::names::normalize_identifier;
use crate::scope::Scope;
use crate::tree::TreeNode;
use indexmap::IndexSet;
use plpy_common::RuntimeModules;
use plpy_common::runtime;

/// Turns an embedded SQL statement (`select_statement` or
/// `data_manipulation_language_statements`) into fragments.
///
/// The first fragment is the expression that runs the statement. It is followed by one
/// [`Fragment::Sql`] with the rendered SQL text and one [`Fragment::BindVar`] per host
/// variable, in first-occurrence order.
pub trait SqlTranslator<N: TreeNode> {
    fn translate(
        &self,
        node: &N,
        scope: &Scope,
        runtime: &RuntimeModules,
    ) -> Result<Vec<Fragment>, TranslateError>;
}

/// Passes SQL through as text, turning references to visible variables into named binds.
///
/// `SELECT ... INTO` becomes `PLCURSOR.SELECT(sql, [binds], locals(), [into])`, anything else
/// `PLCURSOR.EXECUTE(sql, [binds], locals())`. Bind values are looked up by name in the
/// `locals()` snapshot at run time.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSql;

#[derive(Default)]
struct Rendered {
    words: Vec<String>,
    binds: IndexSet<String>,
    into: Vec<String>,
}

impl Rendered {
    fn render<N: TreeNode>(&mut self, node: &N, scope: &Scope) {
        match node.node_kind() {
            "into_clause" => {
                self.into.extend(
                    node.children()
                        .filter(|c| !c.is_token())
                        .map(|c| normalize_identifier(&c.source_text())),
                );
                return;
            }
            "bind_variable" => {
                let text = node.source_text();
                self.binds
                    .insert(normalize_identifier(text.trim_start_matches(':')));
                self.words.push(text);
                return;
            }
            "general_element" | "variable_name" => {
                if let [single] = node.tokens().as_slice() {
                    let name = normalize_identifier(single);
                    if scope.is_declared(&name) {
                        self.words.push(format!(":{name}"));
                        self.binds.insert(name);
                        return;
                    }
                }
            }
            _ => {}
        }
        if let Some(text) = node.text() {
            self.words.push(text.to_string());
            return;
        }
        for child in node.children() {
            self.render(child, scope);
        }
    }
}

impl<N: TreeNode> SqlTranslator<N> for EmbeddedSql {
    fn translate(
        &self,
        node: &N,
        scope: &Scope,
        runtime: &RuntimeModules,
    ) -> Result<Vec<Fragment>, TranslateError> {
        let mut rendered = Rendered::default();
        rendered.render(node, scope);
        if rendered.words.is_empty() {
            return Err(TranslateError::malformed(node, "empty SQL statement"));
        }
        let sql = rendered.words.join(" ");
        let binds: Vec<Expr> = rendered.binds.iter().map(Expr::str).collect();
        let locals = Expr::call(Expr::name(runtime::LOCALS), vec![]);

        let call = if node.node_kind() == "select_statement" {
            let into = rendered.into.iter().map(Expr::str).collect();
            Expr::method(
                &runtime.cursor,
                runtime::CURSOR_SELECT,
                vec![Expr::str(sql.as_str()), Expr::List(binds), locals, Expr::List(into)],
            )
        } else {
            Expr::method(
                &runtime.cursor,
                runtime::CURSOR_EXECUTE,
                vec![Expr::str(sql.as_str()), Expr::List(binds), locals],
            )
        };

        let mut fragments = vec![call.into(), Fragment::Sql(SqlText(sql))];
        fragments.extend(
            rendered
                .binds
                .into_iter()
                .map(|b| Fragment::BindVar(BindVar(b))),
        );
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ParseNode;
    use pretty_assertions::assert_eq;

    fn tok(text: &str) -> ParseNode {
        ParseNode::token(&text.to_uppercase(), text)
    }

    fn element(name: &str) -> ParseNode {
        ParseNode::rule("general_element", vec![ParseNode::token("REGULAR_ID", name)])
    }

    fn select_into() -> ParseNode {
        // SELECT sal INTO v_sal FROM emp WHERE id = p_id AND dept = :d
        ParseNode::rule(
            "select_statement",
            vec![
                tok("SELECT"),
                element("sal"),
                ParseNode::rule("into_clause", vec![tok("INTO"), element("v_sal")]),
                tok("FROM"),
                element("emp"),
                tok("WHERE"),
                element("id"),
                ParseNode::token("EQUALS_OP", "="),
                element("p_id"),
                tok("AND"),
                element("dept"),
                ParseNode::token("EQUALS_OP", "="),
                ParseNode::rule("bind_variable", vec![ParseNode::token("BINDVAR", ":d")]),
            ],
        )
    }

    #[test]
    fn test_select_into() {
        let mut scope = Scope::new();
        scope.declare("P_ID");
        scope.declare("V_SAL");
        let runtime = RuntimeModules::default();
        let fragments = EmbeddedSql.translate(&select_into(), &scope, &runtime).unwrap();
        let sql = "SELECT sal FROM emp WHERE id = :P_ID AND dept = :d";
        assert_eq!(
            fragments,
            vec![
                Fragment::Expr(Expr::method(
                    "PLCURSOR",
                    "SELECT",
                    vec![
                        Expr::str(sql),
                        Expr::List(vec![Expr::str("P_ID"), Expr::str("D")]),
                        Expr::call(Expr::name("locals"), vec![]),
                        Expr::List(vec![Expr::str("V_SAL")]),
                    ]
                )),
                Fragment::Sql(SqlText(sql.to_string())),
                Fragment::BindVar(BindVar("P_ID".to_string())),
                Fragment::BindVar(BindVar("D".to_string())),
            ]
        );
    }

    #[test]
    fn test_dml_executes() {
        // DELETE FROM emp WHERE id = x
        let node = ParseNode::rule(
            "data_manipulation_language_statements",
            vec![ParseNode::rule(
                "delete_statement",
                vec![
                    tok("DELETE"),
                    tok("FROM"),
                    element("emp"),
                    tok("WHERE"),
                    element("id"),
                    ParseNode::token("EQUALS_OP", "="),
                    element("x"),
                ],
            )],
        );
        let mut scope = Scope::new();
        scope.declare("X");
        let fragments = EmbeddedSql
            .translate(&node, &scope, &RuntimeModules::default())
            .unwrap();
        assert_eq!(
            fragments[0],
            Fragment::Expr(Expr::method(
                "PLCURSOR",
                "EXECUTE",
                vec![
                    Expr::str("DELETE FROM emp WHERE id = :X"),
                    Expr::List(vec![Expr::str("X")]),
                    Expr::call(Expr::name("locals"), vec![]),
                ]
            ))
        );
        assert_eq!(fragments.len(), 3);
    }

    #[test]
    fn test_empty_statement_is_malformed() {
        let node = ParseNode::rule("select_statement", vec![]);
        let result = EmbeddedSql.translate(&node, &Scope::new(), &RuntimeModules::default());
        assert!(matches!(result, Err(TranslateError::MalformedTree { .. })));
    }
}
