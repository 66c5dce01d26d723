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

//! The fixed set of files each fixer runs on.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::core::{Category, LineWindow};

/// Base directory of the mobile app the target paths are relative to.
pub const DEFAULT_ROOT: &str = "/workspaces/college-communication-app/apps/mobile";

const TODO_FILES: &[&str] = &[
    "lib/screens/qr/qr_scanner_screen.dart",
    "lib/screens/tools/assignment_tracker_screen.dart",
    "lib/screens/tools/events_screen.dart",
    "lib/services/chat_service.dart",
    "lib/services/mesh_network_service.dart",
    "lib/services/notification_service.dart",
    "lib/services/onesignal_service.dart",
    "lib/services/security_service.dart",
];

const LATE_FIELD_FILES: &[&str] = &["lib/screens/tools/ip_calculator_screen.dart"];

const DEPRECATED_MEMBER_FILES: &[&str] = &["lib/screens/tools/color_picker_screen.dart"];

// The IP calculator is left out: an inserted import would shift its fields
// into the late-field window on the next run.
const UNAWAITED_FILES: &[&str] = &[
    "lib/screens/qr/qr_scanner_screen.dart",
    "lib/screens/tools/assignment_tracker_screen.dart",
    "lib/screens/tools/events_screen.dart",
    "lib/screens/tools/color_picker_screen.dart",
];

/// One file a fixer runs on, relative to [`Config::root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub category: Category,
    pub path: PathBuf,
}

impl Target {
    pub fn new(category: Category, path: impl Into<PathBuf>) -> Self {
        Self {
            category,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    /// Targets in the order they are processed.
    pub targets: Vec<Target>,
    /// Lines the late-field fixer may rewrite.
    pub late_field_window: LineWindow,
}

impl Config {
    /// The built-in target lists, rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let lists = [
            (Category::TodoComments, TODO_FILES),
            (Category::LateFields, LATE_FIELD_FILES),
            (Category::DeprecatedMembers, DEPRECATED_MEMBER_FILES),
            (Category::UnawaitedFutures, UNAWAITED_FILES),
        ];
        let targets = lists
            .iter()
            .flat_map(|(category, paths)| {
                paths
                    .iter()
                    .map(move |path| Target::new(*category, *path))
            })
            .collect();

        Self {
            root: root.into(),
            targets,
            late_field_window: LineWindow::default(),
        }
    }

    /// Targets grouped by category, categories in first-seen order.
    pub fn targets_by_category(&self) -> IndexMap<Category, Vec<&Path>> {
        let mut grouped: IndexMap<Category, Vec<&Path>> = IndexMap::new();
        for target in &self.targets {
            grouped
                .entry(target.category)
                .or_default()
                .push(target.path.as_path());
        }
        grouped
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_root(DEFAULT_ROOT)
    }
}
