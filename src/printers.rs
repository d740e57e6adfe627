// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting information.

use std::{borrow::Cow, sync::Mutex};

const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNINGS: Mutex<Vec<Cow<'static, str>>> = Mutex::new(vec![]);
}

fn tree_symbol(i_line: usize, num_lines: usize) -> char {
    if i_line + 1 == num_lines {
        UP_AND_RIGHT
    } else {
        VERTICAL_AND_RIGHT
    }
}

/// Collects lines under a bold title, and logs them at info level as a tree.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    lines: Vec<Cow<'static, str>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            lines: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.lines.push(line);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let num_lines = self.lines.len();
        for (i_line, line) in self.lines.into_iter().enumerate() {
            log::info!("{} {line}", tree_symbol(i_line, num_lines));
        }
        log::info!("");
    }
}

/// Defer a warning until [`display_warnings`] is called, so that warnings
/// aren't lost among other output.
pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for &'static str {
    fn warn(self) {
        WARNINGS.lock().unwrap().push(self.into());
    }
}

impl Warn for String {
    fn warn(self) {
        WARNINGS.lock().unwrap().push(self.into());
    }
}

/// Log all deferred warnings and forget them.
pub fn display_warnings() {
    let mut warnings = WARNINGS.lock().unwrap();
    log::debug!("Displaying {} warnings", warnings.len());
    if warnings.is_empty() {
        return;
    }

    log::warn!("{}", console::style("Warnings").bold());
    let num_lines = warnings.len();
    for (i_line, line) in warnings.drain(..).enumerate() {
        log::warn!("{} {line}", tree_symbol(i_line, num_lines));
    }
    log::warn!("");
}


#[cfg(test)]
pub(crate) fn take_warnings() -> Vec<Cow<'static, str>> {
    WARNINGS.lock().unwrap().drain(..).collect()
}
