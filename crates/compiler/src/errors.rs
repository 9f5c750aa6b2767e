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

use crate::tree::TreeNode;
use thiserror::Error;

/// Why a translation pass was abandoned. There is no partial output: the first error aborts the
/// whole module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Unsupported construct @ {line}/{column}: {text}")]
    UnsupportedConstruct {
        line: usize,
        column: usize,
        text: String,
    },
    #[error("Malformed {construct} @ {line}/{column}: {message}")]
    MalformedTree {
        construct: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Invalid numeric literal: {0}")]
    InvalidNumber(String),
}

impl TranslateError {
    pub fn unsupported<N: TreeNode>(node: &N) -> Self {
        let (line, column) = node.line_col();
        Self::UnsupportedConstruct {
            line,
            column,
            text: node.spaced_text(),
        }
    }

    pub fn malformed<N: TreeNode>(node: &N, message: impl Into<String>) -> Self {
        let (line, column) = node.line_col();
        Self::MalformedTree {
            construct: node.node_kind().to_string(),
            line,
            column,
            message: message.into(),
        }
    }
}
