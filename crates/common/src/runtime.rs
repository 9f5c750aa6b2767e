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

//! Names the generated code uses to reach into the runtime support library.
//!
//! The translator never calls these; it only emits references to them.

/// Module (and class) exporting the global builtins.
pub const GLOBALS_MODULE: &str = "PLGLOBALS";
/// Module exporting the free helper functions below.
pub const HELPER_MODULE: &str = "PLHELPER";
/// Module (and class) exporting the cursor abstraction and transaction control.
pub const CURSOR_MODULE: &str = "PLCURSOR";
pub const TABLE_MODULE: &str = "PLTABLE";
pub const RECORD_MODULE: &str = "PLRECORD";

/// Value-box constructor; every declared scalar lives in one of these.
pub const BOX: &str = "m";
pub const CONCAT: &str = "CONCAT";
/// Inclusive integer range iteration.
pub const RANGE: &str = "mrange";
pub const EXECUTE_IMMEDIATE: &str = "execute_immediate_into";
pub const IS_NULL: &str = "ISNULL";
pub const NOT: &str = "NOT";
/// Snapshot of the currently visible local bindings, used for bind-variable lookup.
pub const LOCALS: &str = "locals";
pub const REVERSED: &str = "reversed";

/// Appended to the table module name to get its typed-collection constructor.
pub const TABLE_OF_SUFFIX: &str = "_OF";

// Cursor-side operations.
pub const CURSOR_NEW: &str = "CURSOR";
pub const CURSOR_OPEN: &str = "OPEN";
pub const CURSOR_FETCH: &str = "FETCH";
pub const CURSOR_CLOSE: &str = "CLOSE";
pub const CURSOR_ISOPEN: &str = "ISOPEN";
pub const CURSOR_ROWCOUNT: &str = "ROWCOUNT";
pub const CURSOR_FOUND: &str = "FOUND";
pub const CURSOR_NOTFOUND: &str = "NOTFOUND";
pub const CURSOR_SELECT: &str = "SELECT";
pub const CURSOR_EXECUTE: &str = "EXECUTE";
pub const COMMIT: &str = "commit";
pub const ROLLBACK: &str = "rollback";
pub const AUTONOMOUS_TRANSACTION: &str = "AUTONOMOUS_TRANSACTION";
