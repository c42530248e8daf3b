//! Plain-text deck format
//!
//! ```text
//! ::: main
//! {#intro}
//! Welcome
//! ---
//! Second section
//! ```
//!
//! `::: name` opens a container (text before the first one belongs to
//! `main`), a `---` line separates sections, and a leading `{#id}` line names
//! a section.

use std::collections::HashSet;

use crate::{Error, Result};

/// Container used for text before any `:::` line
pub const DEFAULT_CONTAINER: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSection {
    pub anchor: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub sections: Vec<DeckSection>,
}

impl Container {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sections: Vec::new(),
        }
    }

    fn push_section(&mut self, lines: &[&str]) {
        let mut lines = lines;
        while let Some((first, rest)) = lines.split_first() {
            if first.trim().is_empty() {
                lines = rest;
            } else {
                break;
            }
        }

        let mut anchor = None;
        if let Some((first, rest)) = lines.split_first() {
            if let Some(id) = parse_anchor(first) {
                anchor = Some(id.to_string());
                lines = rest;
            }
        }

        let body = lines.join("\n").trim_matches('\n').trim_end().to_string();
        if body.trim().is_empty() && anchor.is_none() {
            return;
        }
        self.sections.push(DeckSection { anchor, body });
    }
}

fn parse_anchor(line: &str) -> Option<&str> {
    let id = line.trim().strip_prefix("{#")?.strip_suffix('}')?.trim();
    (!id.is_empty()).then_some(id)
}

/// Strip a leading `#` or `.` so `#main`, `.main` and `main` all match
pub fn selector_name(selector: &str) -> &str {
    let selector = selector.trim();
    selector
        .strip_prefix('#')
        .or_else(|| selector.strip_prefix('.'))
        .unwrap_or(selector)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    containers: Vec<Container>,
}

impl Deck {
    pub fn parse(text: &str) -> Result<Self> {
        let mut containers: Vec<Container> = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Container::new(DEFAULT_CONTAINER);
        let mut implicit = true;
        let mut lines: Vec<&str> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();

            if let Some(name) = trimmed.strip_prefix(":::") {
                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::DeckParse(format!(
                        "line {}: container name missing after ':::'",
                        line_no + 1
                    )));
                }

                current.push_section(&lines);
                lines.clear();
                // An implicit `main` with nothing in it is not a container
                if !(implicit && current.sections.is_empty()) {
                    seen.insert(current.name.clone());
                    containers.push(current);
                }
                if !seen.insert(name.to_string()) {
                    return Err(Error::DeckParse(format!(
                        "line {}: duplicate container '{}'",
                        line_no + 1,
                        name
                    )));
                }
                current = Container::new(name);
                implicit = false;
                continue;
            }

            if trimmed == "---" {
                current.push_section(&lines);
                lines.clear();
                continue;
            }

            lines.push(line);
        }

        current.push_section(&lines);
        if !(implicit && current.sections.is_empty()) || containers.is_empty() {
            containers.push(current);
        }

        Ok(Self { containers })
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Container matching a selector (`main`, `#main` or `.main`)
    pub fn container(&self, selector: &str) -> Option<&Container> {
        let name = selector_name(selector);
        self.containers.iter().find(|c| c.name == name)
    }
}
