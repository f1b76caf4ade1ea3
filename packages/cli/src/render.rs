//! Text layout for materialized subtrees.
//!
//! ```text
//! /stucco/name=demo
//! /stucco/hosts:
//!   [0]=a.example
//!   [1]=b.example
//! ```

use std::fmt::Write;

use nu_ansi_term::{Color, Style};

use kvtree_core::{Value, ValueMap};

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub color: bool,
}

impl RenderOptions {
    fn key_style(&self) -> Style {
        if self.color {
            Style::new().fg(Color::Cyan)
        } else {
            Style::new()
        }
    }

    fn container_style(&self) -> Style {
        if self.color {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new()
        }
    }
}

/// Render one directory level and everything below it.
pub fn render_map(map: &ValueMap, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_map(&mut out, "", map, options);
    out
}

fn write_map(out: &mut String, indent: &str, map: &ValueMap, options: &RenderOptions) {
    for (key, value) in map {
        write_entry(out, indent, key, value, options);
    }
}

fn write_list(out: &mut String, indent: &str, items: &[Value], options: &RenderOptions) {
    for (i, value) in items.iter().enumerate() {
        write_entry(out, indent, &format!("[{}]", i), value, options);
    }
}

fn write_entry(out: &mut String, indent: &str, label: &str, value: &Value, options: &RenderOptions) {
    // Writing into a String cannot fail.
    let _ = match value {
        Value::Leaf(s) => writeln!(out, "{}{}={}", indent, options.key_style().paint(label), s),
        Value::Directory(_) | Value::List(_) => {
            writeln!(out, "{}{}:", indent, options.container_style().paint(label))
        }
    };

    let child_indent = format!("{}{}", indent, INDENT);
    match value {
        Value::Leaf(_) => {}
        Value::Directory(map) => write_map(out, &child_indent, map, options),
        Value::List(items) => write_list(out, &child_indent, items, options),
    }
}
