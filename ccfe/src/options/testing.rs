// SPDX-License-Identifier: GPL-3.0-or-later

//! Test doubles for switch-processing tests.

use super::expand::SourceProvider;
use std::collections::HashMap;
use std::io;

/// An in-memory [`SourceProvider`].
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    env: HashMap<String, String>,
    files: HashMap<String, String>,
}

impl FakeSource {
    pub(crate) fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }
}

impl SourceProvider for FakeSource {
    fn env(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn read_file(&self, path: &str) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}
