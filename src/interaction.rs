// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User-facing alerts and confirmation prompts.

use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

pub trait Notifier {
    fn notify(&self, level: Level, title: &str, text: &str);

    fn success(&self, title: &str, text: &str) {
        self.notify(Level::Success, title, text);
    }

    fn warning(&self, title: &str, text: &str) {
        self.notify(Level::Warning, title, text);
    }

    fn error(&self, title: &str, text: &str) {
        self.notify(Level::Error, title, text);
    }
}

/// Asks before a destructive action. `false` means do nothing.
pub trait Confirm {
    fn confirm(&self, title: &str, text: &str) -> bool;
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, level: Level, title: &str, text: &str) {
        match level {
            Level::Success => println!("✅ {}: {}", title, text),
            Level::Warning => eprintln!("⚠️  {}: {}", title, text),
            Level::Error => eprintln!("❌ {}: {}", title, text),
        }
    }
}

pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, title: &str, text: &str) -> bool {
        eprint!("{} {} [y/N]: ", title, text);
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        is_yes(&line)
    }
}

/// Backs `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _title: &str, _text: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}
