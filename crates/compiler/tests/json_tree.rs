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

//! Parse trees handed over as JSON by an external parser.

use plpy_common::TranslateConfig;
use plpy_compiler::{ParseNode, TranslateError, translate_program};
use pretty_assertions::assert_eq;
use serde_json::json;
use unindent::unindent;

fn parse(source: &str) -> ParseNode {
    serde_json::from_str(&unindent(source)).unwrap()
}

fn id(kind: &str, text: &str) -> String {
    format!(
        r#"{{"kind": "{kind}", "children": [{{"kind": "id_expression", "children": [
            {{"kind": "regular_id", "children": [{{"kind": "REGULAR_ID", "text": "{text}"}}]}}]}}]}}"#
    )
}

#[test]
fn test_block_from_json() {
    // DECLARE v NUMBER := 3.0; BEGIN dbms_output.put_line(v); END;
    let ident_v = id("identifier", "v");
    let ident_pkg = id("identifier", "dbms_output");
    let part_v = id("general_element_part", "v");
    let source = format!(
        r#"
        {{"kind": "sql_script", "children": [
          {{"kind": "unit_statement", "children": [
            {{"kind": "anonymous_block", "line": 1, "children": [
              {{"kind": "DECLARE", "text": "DECLARE"}},
              {{"kind": "seq_of_declare_specs", "children": [
                {{"kind": "declare_spec", "children": [
                  {{"kind": "variable_declaration", "children": [
                    {ident_v},
                    {{"kind": "type_spec", "children": [
                      {{"kind": "datatype", "children": [
                        {{"kind": "native_datatype_element", "children": [
                          {{"kind": "NUMBER", "text": "NUMBER"}}]}}]}}]}},
                    {{"kind": "default_value_part", "children": [
                      {{"kind": "ASSIGN_OP", "text": ":="}},
                      {{"kind": "expression", "children": [
                        {{"kind": "constant", "children": [
                          {{"kind": "numeric", "children": [
                            {{"kind": "APPROXIMATE_NUM_LIT", "text": "3.0"}}]}}]}}]}}]}},
                    {{"kind": "SEMICOLON", "text": ";"}}]}}]}}]}},
              {{"kind": "BEGIN", "text": "BEGIN"}},
              {{"kind": "seq_of_statements", "children": [
                {{"kind": "statement", "children": [
                  {{"kind": "function_call", "children": [
                    {{"kind": "routine_name", "children": [
                      {ident_pkg},
                      {{"kind": "PERIOD", "text": "."}},
                      {{"kind": "id_expression", "children": [
                        {{"kind": "regular_id", "children": [
                          {{"kind": "REGULAR_ID", "text": "put_line"}}]}}]}}]}},
                    {{"kind": "function_argument", "children": [
                      {{"kind": "LEFT_PAREN", "text": "("}},
                      {{"kind": "argument", "children": [
                        {{"kind": "expression", "children": [
                          {{"kind": "general_element", "children": [{part_v}]}}]}}]}},
                      {{"kind": "RIGHT_PAREN", "text": ")"}}]}}]}}]}},
                {{"kind": "SEMICOLON", "text": ";"}}]}},
              {{"kind": "END", "text": "END"}},
              {{"kind": "SEMICOLON", "text": ";"}}]}}]}},
          {{"kind": "EOF", "text": "<EOF>"}}]}}
        "#
    );
    let tree = parse(&source);
    let module = translate_program(&tree, &TranslateConfig::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&module).unwrap(),
        json!({"body": [
            {"Import": {"module": "PLGLOBALS"}},
            {"Import": {"module": "PLHELPER"}},
            {"Import": {"module": "PLCURSOR"}},
            {"Assign": {
                "target": {"Name": "V"},
                "value": {"Call": {"func": {"Name": "m"}, "args": [{"Constant": {"Number": "3"}}]}}
            }},
            {"Expr": {"Call": {
                "func": {"Attribute": {
                    "value": {"Attribute": {"value": {"Name": "PLGLOBALS"}, "attr": "DBMS_OUTPUT"}},
                    "attr": "PUT_LINE"
                }},
                "args": [{"Call": {"func": {"Name": "V"}, "args": []}}]
            }}}
        ]})
    );
}

#[test]
fn test_error_reports_position() {
    let tree = parse(
        r#"
        {"kind": "sql_script", "children": [
          {"kind": "unit_statement", "children": [
            {"kind": "anonymous_block", "children": [
              {"kind": "BEGIN", "text": "BEGIN", "line": 3, "column": 0},
              {"kind": "seq_of_statements", "children": [
                {"kind": "statement", "children": [
                  {"kind": "transaction_control_statements", "children": [
                    {"kind": "savepoint_statement", "children": [
                      {"kind": "SAVEPOINT", "text": "SAVEPOINT", "line": 4, "column": 2},
                      {"kind": "identifier", "children": [
                        {"kind": "id_expression", "children": [
                          {"kind": "regular_id", "children": [
                            {"kind": "REGULAR_ID", "text": "sp1", "line": 4, "column": 12}]}]}]}]}]}]},
                {"kind": "SEMICOLON", "text": ";"}]},
              {"kind": "END", "text": "END"},
              {"kind": "SEMICOLON", "text": ";"}]}]}]}
        "#,
    );
    let err = translate_program(&tree, &TranslateConfig::default()).unwrap_err();
    assert_eq!(
        err,
        TranslateError::UnsupportedConstruct {
            line: 4,
            column: 2,
            text: "SAVEPOINT sp1".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "Unsupported construct @ 4/2: SAVEPOINT sp1"
    );
}
