// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Front-end error types.
//!
//! Every stage fails fast: the first violation aborts the whole pipeline
//! and surfaces to the caller as a [`CompileError`]. There is no recovery
//! or partial-result mode: a program is either fully valid or rejected.

use ecow::EcoString;

/// An error raised by the scanner, parser, or semantic analyser.
///
/// Lexical and syntax errors always carry the 1-based source line at which
/// they were detected. Semantic errors operate on tree structure rather
/// than token positions, so their line is carried only when the offending
/// node recorded one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A character matched none of the scanner's token-forming rules.
    #[error("lexical error: unknown character '{character}' (ordinal {ordinal}), line {line}")]
    Lexical {
        /// The offending character.
        character: char,
        /// Its code point, for characters that do not print usefully.
        ordinal: u32,
        /// 1-based source line.
        line: u32,
    },

    /// The token stream did not match the grammar.
    #[error("syntax error: {message}, line {line}")]
    Syntax {
        /// What the parser expected or found.
        message: EcoString,
        /// 1-based source line.
        line: u32,
    },

    /// A type rule was violated.
    #[error("semantic error: {message}{}", fmt_line(.line))]
    Semantic {
        /// The violated rule.
        message: EcoString,
        /// 1-based source line, when the offending node carried one.
        line: Option<u32>,
    },
}

impl CompileError {
    /// Creates a lexical error for a character the scanner cannot place.
    pub(crate) fn lexical(character: char, line: u32) -> Self {
        Self::Lexical {
            character,
            ordinal: character as u32,
            line,
        }
    }

    /// Creates a syntax error at the given line.
    pub(crate) fn syntax(message: impl Into<EcoString>, line: u32) -> Self {
        Self::Syntax {
            message: message.into(),
            line,
        }
    }

    /// Creates a semantic error, with a line when one is known.
    pub(crate) fn semantic(message: impl Into<EcoString>, line: Option<u32>) -> Self {
        Self::Semantic {
            message: message.into(),
            line,
        }
    }

    /// Returns the source line the error was detected at, when known.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        match self {
            Self::Lexical { line, .. } | Self::Syntax { line, .. } => Some(*line),
            Self::Semantic { line, .. } => *line,
        }
    }
}

fn fmt_line(line: &Option<u32>) -> String {
    match line {
        Some(line) => format!(", line {line}"),
        None => String::new(),
    }
}
