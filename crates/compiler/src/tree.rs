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

//! Generic parse-tree interface consumed by the translator.
//!
//! Trees come from an external PL/SQL parser. Rule nodes are named after the grammar's
//! productions (`if_statement`, `general_element_part`, ...) and terminal nodes after their
//! token types (`REGULAR_ID`, `CHAR_STRING`, keyword tokens such as `WHILE` or `REVERSE`).

use serde::{Deserialize, Serialize};

/// Uniform view over any parse-tree implementation.
pub trait TreeNode {
    /// Grammar rule name for interior nodes, token type for terminals.
    fn node_kind(&self) -> &str;

    /// Lexeme of a terminal node. `None` for rule nodes.
    fn text(&self) -> Option<&str>;

    /// All direct children, in source order.
    fn children(&self) -> Box<dyn Iterator<Item = &Self> + '_>;

    /// Source position, 1-based line and 0-based column.
    fn line_col(&self) -> (usize, usize);

    fn is_token(&self) -> bool {
        self.text().is_some()
    }

    /// First direct child of the given kind.
    fn child(&self, kind: &str) -> Option<&Self> {
        self.children().find(|c| c.node_kind() == kind)
    }

    /// Direct children of the given kind, in source order.
    fn children_of<'a>(&'a self, kind: &'a str) -> Box<dyn Iterator<Item = &'a Self> + 'a> {
        Box::new(self.children().filter(move |c| c.node_kind() == kind))
    }

    /// Presence check for an optional clause or token.
    fn has(&self, kind: &str) -> bool {
        self.child(kind).is_some()
    }

    fn count(&self, kind: &str) -> usize {
        self.children_of(kind).count()
    }

    /// Lexemes of every terminal below this node, in source order.
    fn tokens(&self) -> Vec<&str> {
        let mut out = vec![];
        collect_tokens(self, &mut out);
        out
    }

    /// Token texts concatenated without separators.
    fn source_text(&self) -> String {
        self.tokens().concat()
    }

    /// Token texts joined by single spaces.
    fn spaced_text(&self) -> String {
        self.tokens().join(" ")
    }
}

fn collect_tokens<'a, N: TreeNode + ?Sized>(node: &'a N, out: &mut Vec<&'a str>) {
    if let Some(text) = node.text() {
        out.push(text);
    }
    for child in node.children() {
        collect_tokens(child, out);
    }
}

/// Owned parse tree, the shape external parsers hand over as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseNode {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParseNode>,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

impl ParseNode {
    pub fn rule(kind: &str, children: Vec<ParseNode>) -> Self {
        Self {
            kind: kind.to_string(),
            text: None,
            children,
            line: 0,
            column: 0,
        }
    }

    pub fn token(kind: &str, text: &str) -> Self {
        Self {
            kind: kind.to_string(),
            text: Some(text.to_string()),
            children: vec![],
            line: 0,
            column: 0,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

impl TreeNode for ParseNode {
    fn node_kind(&self) -> &str {
        &self.kind
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn children(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        Box::new(self.children.iter())
    }

    /// Rule nodes without a recorded position report their first child's.
    fn line_col(&self) -> (usize, usize) {
        if self.line == 0 {
            if let Some(first) = self.children.first() {
                return first.line_col();
            }
        }
        (self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ParseNode {
        ParseNode::rule(
            "assignment_statement",
            vec![
                ParseNode::rule(
                    "general_element",
                    vec![ParseNode::token("REGULAR_ID", "x").at(3, 4)],
                ),
                ParseNode::token("ASSIGN_OP", ":="),
                ParseNode::rule(
                    "numeric",
                    vec![ParseNode::token("UNSIGNED_INTEGER", "1")],
                ),
            ],
        )
    }

    #[test]
    fn test_child_lookup() {
        let node = sample();
        assert!(node.has("ASSIGN_OP"));
        assert!(!node.has("BAR"));
        assert_eq!(node.count("numeric"), 1);
        assert_eq!(
            node.child("general_element").map(|c| c.source_text()),
            Some("x".to_string())
        );
        assert_eq!(node.children_of("numeric").count(), 1);
    }

    #[test]
    fn test_text_rendering() {
        let node = sample();
        assert_eq!(node.source_text(), "x:=1");
        assert_eq!(node.spaced_text(), "x := 1");
    }

    #[test]
    fn test_position_falls_back_to_first_token() {
        assert_eq!(sample().line_col(), (3, 4));
        assert_eq!(ParseNode::rule("body", vec![]).line_col(), (0, 0));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"kind": "null_statement", "children": [{"kind": "NULL", "text": "NULL", "line": 2}]}"#;
        let node: ParseNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, "null_statement");
        assert_eq!(node.children[0].text(), Some("NULL"));
        assert_eq!(node.line_col(), (2, 0));
    }
}
