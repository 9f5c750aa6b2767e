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

//! Parse-tree builders for tests.
//!
//! These produce the shapes a PL/SQL parser emits for the constructs the translator handles,
//! using the grammar's rule and token names. Expression builders return the expression node
//! itself; statement builders return a `statement` node ready to go into [`seq`].

use crate::tree::ParseNode;

pub fn rule(kind: &str, children: Vec<ParseNode>) -> ParseNode {
    ParseNode::rule(kind, children)
}

pub fn tok(kind: &str, text: &str) -> ParseNode {
    ParseNode::token(kind, text)
}

/// Keyword token, whose kind is the keyword itself.
pub fn kw(word: &str) -> ParseNode {
    tok(&word.to_uppercase(), word)
}

fn punct(text: &str) -> ParseNode {
    let kind = match text {
        ";" => "SEMICOLON",
        "(" => "LEFT_PAREN",
        ")" => "RIGHT_PAREN",
        "," => "COMMA",
        "." => "PERIOD",
        ":=" => "ASSIGN_OP",
        "|" => "BAR",
        ".." => "DOUBLE_PERIOD",
        "<<" => "LESS_THAN_OP",
        ">>" => "GREATER_THAN_OP",
        "+" => "PLUS_SIGN",
        "-" => "MINUS_SIGN",
        "*" => "ASTERISK",
        "/" => "SOLIDUS",
        "=" => "EQUALS_OP",
        "<>" | "!=" => "NOT_EQUAL_OP",
        "<" => "LESS_THAN_OP",
        ">" => "GREATER_THAN_OP",
        "<=" => "LESS_THAN_OR_EQUALS_OP",
        ">=" => "GREATER_THAN_OR_EQUALS_OP",
        _ => "PUNCT",
    };
    tok(kind, text)
}

// Names

pub fn id_expr(name: &str) -> ParseNode {
    if name.starts_with('"') {
        return rule("id_expression", vec![tok("DELIMITED_ID", name)]);
    }
    rule(
        "id_expression",
        vec![rule("regular_id", vec![tok("REGULAR_ID", name)])],
    )
}

pub fn ident(name: &str) -> ParseNode {
    rule("identifier", vec![id_expr(name)])
}

/// `a.b.c` as `identifier` followed by `.id_expression`s, the shape of routine, exception
/// and schema-qualified names.
fn dotted(path: &str) -> Vec<ParseNode> {
    let mut children = vec![];
    for (i, segment) in path.split('.').enumerate() {
        if i == 0 {
            children.push(ident(segment));
        } else {
            children.push(punct("."));
            children.push(id_expr(segment));
        }
    }
    children
}

fn dotted_ids(path: &str) -> Vec<ParseNode> {
    let mut children = vec![];
    for (i, segment) in path.split('.').enumerate() {
        if i > 0 {
            children.push(punct("."));
        }
        children.push(id_expr(segment));
    }
    children
}

// Expressions

pub fn expression(e: ParseNode) -> ParseNode {
    rule("expression", vec![e])
}

pub fn condition(e: ParseNode) -> ParseNode {
    rule("condition", vec![expression(e)])
}

pub fn argument(e: ParseNode) -> ParseNode {
    rule("argument", vec![expression(e)])
}

/// Target of an `INTO` clause.
pub fn variable_name(path: &str) -> ParseNode {
    rule("variable_name", dotted_ids(path))
}

pub fn named_argument(name: &str, e: ParseNode) -> ParseNode {
    rule(
        "argument",
        vec![ident(name), punct("="), punct(">"), expression(e)],
    )
}

pub fn function_argument(args: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![punct("(")];
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            children.push(punct(","));
        }
        children.push(if arg.kind == "argument" {
            arg
        } else {
            argument(arg)
        });
    }
    children.push(punct(")"));
    rule("function_argument", children)
}

/// One `general_element_part`: a dotted name with an optional argument list.
pub fn part(path: &str, args: Option<Vec<ParseNode>>) -> ParseNode {
    let mut children = dotted_ids(path);
    if let Some(args) = args {
        children.push(function_argument(args));
    }
    rule("general_element_part", children)
}

/// `part.part.part`
pub fn element(parts: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![];
    for (i, p) in parts.into_iter().enumerate() {
        if i > 0 {
            children.push(punct("."));
        }
        children.push(p);
    }
    rule("general_element", children)
}

/// Reference without an argument list.
pub fn var(path: &str) -> ParseNode {
    element(vec![part(path, None)])
}

/// Reference with an argument list, possibly empty.
pub fn call(path: &str, args: Vec<ParseNode>) -> ParseNode {
    element(vec![part(path, Some(args))])
}

pub fn num(text: &str) -> ParseNode {
    let kind = if text.contains(['.', 'e', 'E']) {
        "APPROXIMATE_NUM_LIT"
    } else {
        "UNSIGNED_INTEGER"
    };
    rule("constant", vec![rule("numeric", vec![tok(kind, text)])])
}

pub fn string(value: &str) -> ParseNode {
    let literal = format!("'{}'", value.replace('\'', "''"));
    rule(
        "constant",
        vec![rule("quoted_string", vec![tok("CHAR_STRING", &literal)])],
    )
}

pub fn null() -> ParseNode {
    rule("constant", vec![kw("NULL")])
}

pub fn boolean(value: bool) -> ParseNode {
    rule("constant", vec![kw(if value { "TRUE" } else { "FALSE" })])
}

/// `l op r` for the arithmetic operators.
pub fn arith(l: ParseNode, op: &str, r: ParseNode) -> ParseNode {
    rule("concatenation", vec![l, punct(op), r])
}

pub fn concat(l: ParseNode, r: ParseNode) -> ParseNode {
    rule("concatenation", vec![l, punct("|"), punct("|"), r])
}

pub fn compare(l: ParseNode, op: &str, r: ParseNode) -> ParseNode {
    rule(
        "relational_expression",
        vec![l, rule("relational_operator", vec![punct(op)]), r],
    )
}

pub fn and(l: ParseNode, r: ParseNode) -> ParseNode {
    rule("logical_expression", vec![l, kw("AND"), r])
}

pub fn or(l: ParseNode, r: ParseNode) -> ParseNode {
    rule("logical_expression", vec![l, kw("OR"), r])
}

pub fn not(e: ParseNode) -> ParseNode {
    rule("logical_expression", vec![kw("NOT"), e])
}

pub fn is_null(e: ParseNode) -> ParseNode {
    rule("logical_expression", vec![e, kw("IS"), kw("NULL")])
}

pub fn is_not_null(e: ParseNode) -> ParseNode {
    rule("logical_expression", vec![e, kw("IS"), kw("NOT"), kw("NULL")])
}

pub fn neg(e: ParseNode) -> ParseNode {
    rule("unary_expression", vec![punct("-"), e])
}

/// `SUBSTR(...)` and friends.
pub fn string_function(name: &str, args: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![kw(name), punct("(")];
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            children.push(punct(","));
        }
        children.push(expression(arg));
    }
    children.push(punct(")"));
    rule("string_function", children)
}

/// `c%NOTFOUND` and friends; `attribute` is the token kind, e.g. `PERCENT_NOTFOUND`.
pub fn cursor_attribute(cursor: &str, attribute: &str) -> ParseNode {
    let text = format!("%{}", attribute.trim_start_matches("PERCENT_"));
    rule(
        "other_function",
        vec![rule("cursor_name", vec![var(cursor)]), tok(attribute, &text)],
    )
}

// Statements

pub fn stmt(inner: ParseNode) -> ParseNode {
    rule("statement", vec![inner])
}

pub fn seq(stmts: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![];
    for s in stmts {
        children.push(s);
        children.push(punct(";"));
    }
    rule("seq_of_statements", children)
}

pub fn assign(target: ParseNode, value: ParseNode) -> ParseNode {
    stmt(rule(
        "assignment_statement",
        vec![target, punct(":="), expression(value)],
    ))
}

pub fn call_stmt(path: &str, args: Option<Vec<ParseNode>>) -> ParseNode {
    let mut children = vec![rule("routine_name", dotted(path))];
    if let Some(args) = args {
        children.push(function_argument(args));
    }
    stmt(rule("function_call", children))
}

pub fn null_stmt() -> ParseNode {
    stmt(rule("null_statement", vec![kw("NULL")]))
}

pub fn return_stmt(value: Option<ParseNode>) -> ParseNode {
    let mut children = vec![kw("RETURN")];
    children.extend(value.map(expression));
    stmt(rule("return_statement", children))
}

pub fn raise(exception: Option<&str>) -> ParseNode {
    let mut children = vec![kw("RAISE")];
    children.extend(exception.map(|e| rule("exception_name", dotted(e))));
    stmt(rule("raise_statement", children))
}

pub fn if_stmt(
    test: ParseNode,
    then: Vec<ParseNode>,
    elsifs: Vec<(ParseNode, Vec<ParseNode>)>,
    otherwise: Option<Vec<ParseNode>>,
) -> ParseNode {
    let mut children = vec![kw("IF"), condition(test), kw("THEN"), seq(then)];
    for (c, body) in elsifs {
        children.push(rule(
            "elsif_part",
            vec![kw("ELSIF"), condition(c), kw("THEN"), seq(body)],
        ));
    }
    if let Some(body) = otherwise {
        children.push(rule("else_part", vec![kw("ELSE"), seq(body)]));
    }
    children.extend([kw("END"), kw("IF")]);
    stmt(rule("if_statement", children))
}

/// `[label] CASE selector WHEN ... END CASE [label]`
pub fn simple_case(
    label: Option<&str>,
    selector: ParseNode,
    arms: Vec<(ParseNode, Vec<ParseNode>)>,
    otherwise: Option<Vec<ParseNode>>,
) -> ParseNode {
    let mut children = vec![];
    if let Some(label) = label {
        children.push(rule("label_name", vec![id_expr(label)]));
    }
    children.extend([kw("CASE"), expression(selector)]);
    for (value, body) in arms {
        children.push(rule(
            "simple_case_when_part",
            vec![kw("WHEN"), expression(value), kw("THEN"), seq(body)],
        ));
    }
    if let Some(body) = otherwise {
        children.push(rule("case_else_part", vec![kw("ELSE"), seq(body)]));
    }
    children.extend([kw("END"), kw("CASE")]);
    if let Some(label) = label {
        children.push(rule("label_name", vec![id_expr(label)]));
    }
    stmt(rule(
        "case_statement",
        vec![rule("simple_case_statement", children)],
    ))
}

pub fn searched_case(
    label: Option<&str>,
    arms: Vec<(ParseNode, Vec<ParseNode>)>,
    otherwise: Option<Vec<ParseNode>>,
) -> ParseNode {
    let mut children = vec![];
    if let Some(label) = label {
        children.push(rule("label_name", vec![id_expr(label)]));
    }
    children.push(kw("CASE"));
    for (test, body) in arms {
        children.push(rule(
            "searched_case_when_part",
            vec![kw("WHEN"), condition(test), kw("THEN"), seq(body)],
        ));
    }
    if let Some(body) = otherwise {
        children.push(rule("case_else_part", vec![kw("ELSE"), seq(body)]));
    }
    children.extend([kw("END"), kw("CASE")]);
    if let Some(label) = label {
        children.push(rule("label_name", vec![id_expr(label)]));
    }
    stmt(rule(
        "case_statement",
        vec![rule("searched_case_statement", children)],
    ))
}

/// How a loop is introduced.
pub enum LoopHeader {
    Plain,
    While(ParseNode),
    Range {
        index: String,
        lower: ParseNode,
        upper: ParseNode,
        reverse: bool,
    },
    /// `FOR r IN cursor` or `FOR r IN (SELECT ...)`
    Cursor { record: String, source: ParseNode },
}

pub fn loop_stmt(label: Option<&str>, header: LoopHeader, body: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![];
    if let Some(label) = label {
        children.push(rule(
            "label_declaration",
            vec![
                punct("<<"),
                rule("label_name", vec![id_expr(label)]),
                punct(">>"),
            ],
        ));
    }
    match header {
        LoopHeader::Plain => {}
        LoopHeader::While(test) => {
            children.push(kw("WHILE"));
            children.push(condition(test));
        }
        LoopHeader::Range {
            index,
            lower,
            upper,
            reverse,
        } => {
            let mut param = vec![rule("index_name", vec![ident(&index)]), kw("IN")];
            if reverse {
                param.push(kw("REVERSE"));
            }
            param.extend([
                rule("lower_bound", vec![lower]),
                punct(".."),
                rule("upper_bound", vec![upper]),
            ]);
            children.push(kw("FOR"));
            children.push(rule("cursor_loop_param", param));
        }
        LoopHeader::Cursor { record, source } => {
            children.push(kw("FOR"));
            children.push(rule(
                "cursor_loop_param",
                vec![rule("record_name", vec![ident(&record)]), kw("IN"), source],
            ));
        }
    }
    children.extend([kw("LOOP"), seq(body), kw("END"), kw("LOOP")]);
    if let Some(label) = label {
        children.push(rule("label_name", vec![id_expr(label)]));
    }
    stmt(rule("loop_statement", children))
}

pub fn exit(when: Option<ParseNode>) -> ParseNode {
    let mut children = vec![kw("EXIT")];
    if let Some(test) = when {
        children.extend([kw("WHEN"), condition(test)]);
    }
    stmt(rule("exit_statement", children))
}

pub fn continue_stmt(when: Option<ParseNode>) -> ParseNode {
    let mut children = vec![kw("CONTINUE")];
    if let Some(test) = when {
        children.extend([kw("WHEN"), condition(test)]);
    }
    stmt(rule("continue_statement", children))
}

/// `WHEN a OR b THEN ...`
pub fn handler(exceptions: &[&str], body: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![kw("WHEN")];
    for (i, e) in exceptions.iter().enumerate() {
        if i > 0 {
            children.push(kw("OR"));
        }
        children.push(rule("exception_name", dotted(e)));
    }
    children.extend([kw("THEN"), seq(body)]);
    rule("exception_handler", children)
}

/// `BEGIN ... [EXCEPTION ...] END [label]`
pub fn body(stmts: Vec<ParseNode>, handlers: Vec<ParseNode>, label: Option<&str>) -> ParseNode {
    let mut children = vec![kw("BEGIN"), seq(stmts)];
    if !handlers.is_empty() {
        children.push(kw("EXCEPTION"));
        children.extend(handlers);
    }
    children.push(kw("END"));
    if let Some(label) = label {
        children.push(rule("label_name", vec![id_expr(label)]));
    }
    rule("body", children)
}

/// Nested `BEGIN ... END` used as a statement.
pub fn block(stmts: Vec<ParseNode>, handlers: Vec<ParseNode>) -> ParseNode {
    stmt(body(stmts, handlers, None))
}

pub fn open(cursor: &str, args: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![kw("OPEN"), rule("cursor_name", vec![var(cursor)])];
    if !args.is_empty() {
        children.push(punct("("));
        let mut exprs = vec![];
        for (i, a) in args.into_iter().enumerate() {
            if i > 0 {
                exprs.push(punct(","));
            }
            exprs.push(expression(a));
        }
        children.push(rule("expressions", exprs));
        children.push(punct(")"));
    }
    stmt(rule("open_statement", children))
}

pub fn fetch(cursor: &str, into: &[&str]) -> ParseNode {
    let mut targets = vec![kw("INTO")];
    for (i, t) in into.iter().enumerate() {
        if i > 0 {
            targets.push(punct(","));
        }
        targets.push(variable_name(t));
    }
    stmt(rule(
        "fetch_statement",
        vec![
            kw("FETCH"),
            rule("cursor_name", vec![var(cursor)]),
            rule("into_clause", targets),
        ],
    ))
}

pub fn close(cursor: &str) -> ParseNode {
    stmt(rule(
        "close_statement",
        vec![kw("CLOSE"), rule("cursor_name", vec![var(cursor)])],
    ))
}

pub fn commit() -> ParseNode {
    stmt(rule(
        "transaction_control_statements",
        vec![rule("commit_statement", vec![kw("COMMIT")])],
    ))
}

pub fn rollback() -> ParseNode {
    stmt(rule(
        "transaction_control_statements",
        vec![rule("rollback_statement", vec![kw("ROLLBACK")])],
    ))
}

pub fn savepoint(name: &str) -> ParseNode {
    stmt(rule(
        "transaction_control_statements",
        vec![rule("savepoint_statement", vec![kw("SAVEPOINT"), ident(name)])],
    ))
}

pub fn execute_immediate(sql: ParseNode, into: &[&str], using: Option<ParseNode>) -> ParseNode {
    let mut children = vec![kw("EXECUTE"), kw("IMMEDIATE"), expression(sql)];
    if !into.is_empty() {
        let mut targets = vec![kw("INTO")];
        for (i, t) in into.iter().enumerate() {
            if i > 0 {
                targets.push(punct(","));
            }
            targets.push(variable_name(t));
        }
        children.push(rule("into_clause", targets));
    }
    if let Some(arg) = using {
        children.push(rule("using_clause", vec![kw("USING"), argument(arg)]));
    }
    stmt(rule("execute_immediate", children))
}

/// SQL statement from raw pieces: keywords are passed as tokens, references as `var`.
pub fn select(parts: Vec<ParseNode>) -> ParseNode {
    rule("select_statement", parts)
}

pub fn into(targets: &[&str]) -> ParseNode {
    let mut children = vec![kw("INTO")];
    for (i, t) in targets.iter().enumerate() {
        if i > 0 {
            children.push(punct(","));
        }
        children.push(rule("variable_name", vec![tok("REGULAR_ID", t)]));
    }
    rule("into_clause", children)
}

pub fn sql_op(text: &str) -> ParseNode {
    punct(text)
}

pub fn dml(parts: Vec<ParseNode>) -> ParseNode {
    stmt(rule("data_manipulation_language_statements", parts))
}

// Declarations

/// `VARCHAR2`, `NUMBER`, ...
pub fn native_type(name: &str) -> ParseNode {
    rule(
        "type_spec",
        vec![rule(
            "datatype",
            vec![rule("native_datatype_element", vec![kw(name)])],
        )],
    )
}

pub fn named_type(path: &str) -> ParseNode {
    rule("type_spec", vec![rule("type_name", dotted_ids(path))])
}

pub fn rowtype(path: &str) -> ParseNode {
    rule(
        "type_spec",
        vec![
            rule("type_name", dotted_ids(path)),
            tok("PERCENT_ROWTYPE", "%ROWTYPE"),
        ],
    )
}

pub fn anchored_type(path: &str) -> ParseNode {
    rule(
        "type_spec",
        vec![
            rule("type_name", dotted_ids(path)),
            tok("PERCENT_TYPE", "%TYPE"),
        ],
    )
}

pub fn var_decl(name: &str, ty: Option<ParseNode>, default: Option<ParseNode>) -> ParseNode {
    let mut children = vec![ident(name)];
    children.extend(ty);
    if let Some(value) = default {
        children.push(rule(
            "default_value_part",
            vec![punct(":="), expression(value)],
        ));
    }
    children.push(punct(";"));
    rule("variable_declaration", children)
}

pub fn table_type(name: &str, element: Option<ParseNode>) -> ParseNode {
    let mut def = vec![kw("TABLE")];
    if let Some(element) = element {
        def.push(kw("OF"));
        def.push(element);
    }
    rule(
        "type_declaration",
        vec![
            kw("TYPE"),
            ident(name),
            kw("IS"),
            rule("table_type_def", def),
            punct(";"),
        ],
    )
}

pub fn record_type(name: &str, fields: &[(&str, &str)]) -> ParseNode {
    let mut def = vec![kw("RECORD"), punct("(")];
    for (i, (field, ty)) in fields.iter().enumerate() {
        if i > 0 {
            def.push(punct(","));
        }
        def.push(rule(
            "field_spec",
            vec![rule("column_name", vec![ident(field)]), named_type(ty)],
        ));
    }
    def.push(punct(")"));
    rule(
        "type_declaration",
        vec![
            kw("TYPE"),
            ident(name),
            kw("IS"),
            rule("record_type_def", def),
            punct(";"),
        ],
    )
}

pub fn varray_type(name: &str, element: ParseNode) -> ParseNode {
    rule(
        "type_declaration",
        vec![
            kw("TYPE"),
            ident(name),
            kw("IS"),
            rule("varray_type_def", vec![kw("VARRAY"), kw("OF"), element]),
            punct(";"),
        ],
    )
}

pub fn subtype(name: &str, ty: ParseNode) -> ParseNode {
    rule(
        "subtype_declaration",
        vec![kw("SUBTYPE"), ident(name), kw("IS"), ty, punct(";")],
    )
}

pub fn cursor_decl(name: &str, params: &[&str], query: ParseNode) -> ParseNode {
    let mut children = vec![kw("CURSOR"), ident(name)];
    if !params.is_empty() {
        children.push(punct("("));
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                children.push(punct(","));
            }
            children.push(rule(
                "parameter_spec",
                vec![rule("parameter_name", vec![ident(p)]), native_type("NUMBER")],
            ));
        }
        children.push(punct(")"));
    }
    children.extend([kw("IS"), query, punct(";")]);
    rule("cursor_declaration", children)
}

pub fn pragma(words: &[&str]) -> ParseNode {
    let mut children = vec![kw("PRAGMA")];
    children.extend(words.iter().map(|w| kw(w)));
    children.push(punct(";"));
    rule("pragma_declaration", children)
}

/// `DECLARE` section items.
pub fn declare_specs(items: Vec<ParseNode>) -> ParseNode {
    rule(
        "seq_of_declare_specs",
        items
            .into_iter()
            .map(|i| rule("declare_spec", vec![i]))
            .collect(),
    )
}

// Units

pub fn param(name: &str, ty: ParseNode) -> ParseNode {
    rule(
        "parameter",
        vec![rule("parameter_name", vec![ident(name)]), kw("IN"), ty],
    )
}

fn routine_children(
    params: Vec<ParseNode>,
    returns: Option<ParseNode>,
    decls: Vec<ParseNode>,
    body: ParseNode,
) -> Vec<ParseNode> {
    let mut children = vec![];
    if !params.is_empty() {
        children.push(punct("("));
        for (i, p) in params.into_iter().enumerate() {
            if i > 0 {
                children.push(punct(","));
            }
            children.push(p);
        }
        children.push(punct(")"));
    }
    if let Some(ty) = returns {
        children.push(kw("RETURN"));
        children.push(ty);
    }
    children.push(kw("IS"));
    if !decls.is_empty() {
        children.push(declare_specs(decls));
    }
    children.push(body);
    children.push(punct(";"));
    children
}

/// `PROCEDURE p(...) IS ... BEGIN ... END;` inside a package body or a declaration section.
pub fn procedure(
    name: &str,
    params: Vec<ParseNode>,
    decls: Vec<ParseNode>,
    body: ParseNode,
) -> ParseNode {
    let mut children = vec![kw("PROCEDURE"), ident(name)];
    children.extend(routine_children(params, None, decls, body));
    rule("procedure_body", children)
}

pub fn function(
    name: &str,
    params: Vec<ParseNode>,
    returns: ParseNode,
    decls: Vec<ParseNode>,
    body: ParseNode,
) -> ParseNode {
    let mut children = vec![kw("FUNCTION"), ident(name)];
    children.extend(routine_children(params, Some(returns), decls, body));
    rule("function_body", children)
}

/// `CREATE PROCEDURE` as a top-level unit.
pub fn create_procedure(
    name: &str,
    params: Vec<ParseNode>,
    decls: Vec<ParseNode>,
    body: ParseNode,
) -> ParseNode {
    let mut children = vec![
        kw("CREATE"),
        kw("PROCEDURE"),
        rule("procedure_name", dotted(name)),
    ];
    children.extend(routine_children(params, None, decls, body));
    rule("unit_statement", vec![rule("create_procedure_body", children)])
}

pub fn create_function(
    name: &str,
    params: Vec<ParseNode>,
    returns: ParseNode,
    decls: Vec<ParseNode>,
    body: ParseNode,
) -> ParseNode {
    let mut children = vec![
        kw("CREATE"),
        kw("FUNCTION"),
        rule("function_name", dotted(name)),
    ];
    children.extend(routine_children(params, Some(returns), decls, body));
    rule("unit_statement", vec![rule("create_function_body", children)])
}

pub fn procedure_spec(name: &str, params: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![kw("PROCEDURE"), ident(name)];
    children.extend(params);
    children.push(punct(";"));
    rule("procedure_spec", children)
}

pub fn package_spec(name: &str, items: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![
        kw("CREATE"),
        kw("PACKAGE"),
        rule("package_name", vec![ident(name)]),
        kw("AS"),
    ];
    children.extend(
        items
            .into_iter()
            .map(|i| rule("package_obj_spec", vec![i])),
    );
    children.extend([
        kw("END"),
        rule("package_name", vec![ident(name)]),
        punct(";"),
    ]);
    rule("unit_statement", vec![rule("create_package", children)])
}

pub fn package_body(name: &str, items: Vec<ParseNode>, init: Option<Vec<ParseNode>>) -> ParseNode {
    let mut children = vec![
        kw("CREATE"),
        kw("PACKAGE"),
        kw("BODY"),
        rule("package_name", vec![ident(name)]),
        kw("AS"),
    ];
    children.extend(
        items
            .into_iter()
            .map(|i| rule("package_obj_body", vec![i])),
    );
    if let Some(stmts) = init {
        children.extend([kw("BEGIN"), seq(stmts)]);
    }
    children.extend([
        kw("END"),
        rule("package_name", vec![ident(name)]),
        punct(";"),
    ]);
    rule("unit_statement", vec![rule("create_package_body", children)])
}

pub fn anonymous_block(
    decls: Vec<ParseNode>,
    stmts: Vec<ParseNode>,
    handlers: Vec<ParseNode>,
) -> ParseNode {
    let mut children = vec![];
    if !decls.is_empty() {
        children.push(kw("DECLARE"));
        children.push(declare_specs(decls));
    }
    children.extend([kw("BEGIN"), seq(stmts)]);
    if !handlers.is_empty() {
        children.push(kw("EXCEPTION"));
        children.extend(handlers);
    }
    children.extend([kw("END"), punct(";")]);
    rule("unit_statement", vec![rule("anonymous_block", children)])
}

pub fn script(units: Vec<ParseNode>) -> ParseNode {
    let mut children = units;
    children.push(tok("EOF", "<EOF>"));
    rule("sql_script", children)
}
