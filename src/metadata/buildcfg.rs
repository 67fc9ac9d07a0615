//! Reader and writer for `.spalcfg` build configuration files.
//!
//! A build configuration is a flat sequence of sections:
//!
//! ```text
//! [PACKAGE-MANAGER]
//! apt
//! [END]
//!
//! [SHELLSCRIPT]
//! #!/bin/sh
//! exec /usr/lib/foo/main.sh "$@"
//! [END]
//! ```
//!
//! Single-value sections (`PACKAGE-MANAGER`, `DISTRIBUTION`, `COMPONENT`)
//! take the line right after the marker. Block sections (`SHELLSCRIPT`,
//! `SOURCES`, `CONTROL`, `MAN`, `COPYRIGHT`) take every following line up to
//! an `[END]` line. Decoding is lenient: a marker on the last line is
//! ignored, a block without `[END]` runs to the end of input, and lines
//! outside any section are skipped.

use crate::bundler::{Bundle, Error, ErrorExt, Result};
use std::{fs, path::Path};

/// Conventional file extension of build configuration files
pub const EXTENSION: &str = "spalcfg";

const END: &str = "[END]";

/// Sections holding a single trimmed line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    PackageManager,
    Distribution,
    Component,
}

impl Field {
    const fn marker(self) -> &'static str {
        match self {
            Field::PackageManager => "[PACKAGE-MANAGER]",
            Field::Distribution => "[DISTRIBUTION]",
            Field::Component => "[COMPONENT]",
        }
    }
}

/// Sections terminated by `[END]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Block {
    ShellScript,
    Sources,
    Control,
    Man,
    Copyright,
}

impl Block {
    const fn marker(self) -> &'static str {
        match self {
            Block::ShellScript => "[SHELLSCRIPT]",
            Block::Sources => "[SOURCES]",
            Block::Control => "[CONTROL]",
            Block::Man => "[MAN]",
            Block::Copyright => "[COPYRIGHT]",
        }
    }
}

enum Marker {
    Value(Field),
    Block(Block),
}

impl Marker {
    fn parse(line: &str) -> Option<Self> {
        let marker = match line.trim() {
            "[PACKAGE-MANAGER]" => Marker::Value(Field::PackageManager),
            "[DISTRIBUTION]" => Marker::Value(Field::Distribution),
            "[COMPONENT]" => Marker::Value(Field::Component),
            "[SHELLSCRIPT]" => Marker::Block(Block::ShellScript),
            "[SOURCES]" => Marker::Block(Block::Sources),
            "[CONTROL]" => Marker::Block(Block::Control),
            "[MAN]" => Marker::Block(Block::Man),
            "[COPYRIGHT]" => Marker::Block(Block::Copyright),
            _ => return None,
        };
        Some(marker)
    }
}

/// Scanner position relative to the section structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Between,
    AwaitingValue(Field),
    InBlock(Block),
}

/// Reads and decodes a build configuration file.
///
/// Fails with [`Error::FileNotFound`] when `path` is not a regular file.
pub fn load(path: &Path) -> Result<Bundle> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            kind: "File",
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).fs_context("reading build configuration", path)?;
    log::debug!("Decoding build configuration {}", path.display());
    Ok(decode(&text))
}

/// Decodes build configuration text. Never fails; see the module docs for
/// the leniency rules.
///
/// Repeated single-value sections overwrite each other, repeated block
/// sections accumulate.
pub fn decode(text: &str) -> Bundle {
    let mut bundle = Bundle::default();
    let mut state = State::Between;

    for line in text.split_inclusive('\n') {
        state = match state {
            State::Between => match Marker::parse(line) {
                Some(Marker::Value(field)) => State::AwaitingValue(field),
                Some(Marker::Block(block)) => State::InBlock(block),
                None => State::Between,
            },
            State::AwaitingValue(field) => {
                set_value(&mut bundle, field, line.trim());
                State::Between
            }
            State::InBlock(_) if line.trim() == END => State::Between,
            State::InBlock(block) => {
                push_line(&mut bundle, block, line);
                State::InBlock(block)
            }
        };
    }

    match state {
        State::AwaitingValue(field) => {
            log::debug!("{} has no value line; ignored", field.marker());
        }
        State::InBlock(block) => {
            log::debug!("{} is not terminated by {END}", block.marker());
        }
        State::Between => {}
    }

    bundle.man = bundle.man.filter(|man| !man.is_empty());
    bundle.copyright = bundle.copyright.filter(|copyright| !copyright.is_empty());
    bundle
}

fn set_value(bundle: &mut Bundle, field: Field, value: &str) {
    let slot = match field {
        Field::PackageManager => &mut bundle.package_manager,
        Field::Distribution => &mut bundle.distribution,
        Field::Component => &mut bundle.component,
    };
    *slot = value.to_string();
}

fn push_line(bundle: &mut Bundle, block: Block, line: &str) {
    let text = match block {
        Block::Sources => {
            let path = line.trim();
            if !path.is_empty() {
                bundle.sources.push(path.into());
            }
            return;
        }
        Block::ShellScript => &mut bundle.wrapper_script,
        Block::Control => &mut bundle.control,
        Block::Man => bundle.man.get_or_insert_with(String::new),
        Block::Copyright => bundle.copyright.get_or_insert_with(String::new),
    };
    text.push_str(line);
}

/// Encodes a bundle as build configuration text.
///
/// Sections are written in a fixed order: package manager, distribution,
/// component, shell script, control, then sources, man page and copyright
/// when present.
pub fn encode(bundle: &Bundle) -> String {
    let mut out = String::new();

    write_section(&mut out, Field::PackageManager.marker(), &bundle.package_manager);
    write_section(&mut out, Field::Distribution.marker(), &bundle.distribution);
    write_section(&mut out, Field::Component.marker(), &bundle.component);
    write_section(&mut out, Block::ShellScript.marker(), &bundle.wrapper_script);
    write_section(&mut out, Block::Control.marker(), &bundle.control);

    if !bundle.sources.is_empty() {
        let sources: String = bundle
            .sources
            .iter()
            .map(|source| format!("{}\n", source.display()))
            .collect();
        write_section(&mut out, Block::Sources.marker(), &sources);
    }
    if let Some(man) = &bundle.man {
        write_section(&mut out, Block::Man.marker(), man);
    }
    if let Some(copyright) = &bundle.copyright {
        write_section(&mut out, Block::Copyright.marker(), copyright);
    }

    out
}

fn write_section(out: &mut String, marker: &str, content: &str) {
    out.push_str(marker);
    out.push('\n');
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(END);
    out.push_str("\n\n\n");
}
