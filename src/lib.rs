// Copyright (C) 2024 Jelmer Vernooij <jelmer@samba.org>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub mod config;
pub mod core;
pub mod deprecated_members;
pub mod driver;
pub mod imports;
pub mod late_fields;
pub mod lines;
pub mod patcher;
pub mod todo_comments;
pub mod unawaited;

pub use config::{Config, Target, DEFAULT_ROOT};
pub use crate::core::*;
pub use deprecated_members::annotate_deprecated_members;
pub use driver::{apply_fixer, run, Modification, RunReport};
pub use late_fields::make_fields_late;
pub use patcher::{patch_file, PatchOutcome};
pub use todo_comments::normalize_todo_comments;
pub use unawaited::wrap_unawaited_calls;

#[cfg(test)]
mod tests;
