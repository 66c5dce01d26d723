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

//! Applying a transform to a file on disk.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::{FixError, Rewrite};

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The file does not exist; nothing was done.
    Missing,
    /// The transform matched nothing.
    Unchanged,
    /// The file was rewritten.
    Modified { changes: usize },
}

/// Read `path`, run `transform` over its content and write the result back if
/// it differs from what was read.
pub fn patch_file<F>(path: &Path, transform: F) -> Result<PatchOutcome, FixError>
where
    F: FnOnce(&str) -> Rewrite,
{
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("Skipping missing file {}", path.display());
            return Ok(PatchOutcome::Missing);
        }
        Err(source) => {
            return Err(FixError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let rewrite = transform(&source);
    if !rewrite.is_changed() || rewrite.content == source {
        return Ok(PatchOutcome::Unchanged);
    }

    fs::write(path, &rewrite.content).map_err(|source| FixError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Rewrote {} ({} change(s))", path.display(), rewrite.changes);

    Ok(PatchOutcome::Modified {
        changes: rewrite.changes,
    })
}
