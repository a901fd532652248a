//! Static help tables and the `help` listing renderer.
//!
//! Descriptions are keyed by the exact command token. The listing groups the
//! Befunge instruction set and the auxiliary shell commands under separate
//! subheaders, columnized to the width of the header line.

use std::io::{self, Write};

pub const DOC_HEADER: &str = "List of all available commands (type \"help <command>\")";

const BEFUNGE_GROUP: &str = "Befunge Commands";
const HELPER_GROUP: &str = "Additional helper functions";

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// One-line descriptions for every non-digit Befunge instruction, in the
/// order they appear in the listing.
const INSTRUCTION_HELP: &[(&str, &str)] = &[
    ("+", "Addition: Pop a and b, then push a+b"),
    ("-", "Subtraction: Pop a and b, then push b-a"),
    ("*", "Multiplication: Pop a and b, then push a*b"),
    (
        "/",
        "Integer division: Pop a and b, then push b/a, rounded down. \
         If a is zero, ask the user what result they want.",
    ),
    (
        "%",
        "Modulo: Pop a and b, then push the remainder of the integer \
         division of b/a. If a is zero, ask the user what result they want.",
    ),
    (
        "!",
        "Logical NOT: Pop a value. If the value is zero, push 1; \
         otherwise, push zero.",
    ),
    ("`", "Greater than: Pop a and b, then push 1 if b>a, otherwise zero."),
    (">", "Change PC (Program Counter) to the direction \"right\""),
    ("<", "Change PC (Program Counter) to the direction \"left\""),
    ("^", "Change PC (Program Counter) to the direction \"up\""),
    ("v", "Change PC (Program Counter) to the direction \"down\""),
    (
        "?",
        "Set PC (Program Counter) to a random direction (that means, the \
         direction can be the same after this command!)",
    ),
    (
        "_",
        "Pop a value; set PC direction to right if value equals 0, left otherwise",
    ),
    (
        "|",
        "Pop a value; set PC direction to down if value equals 0, up otherwise",
    ),
    (
        "\"",
        "Start string mode: push each character's ASCII value all the way \
         up to the next \"",
    ),
    (":", "Duplicate value on top of the stack"),
    ("\\", "Swap two values on top of the stack"),
    ("$", "Pop value from the stack"),
    (".", "Pop value and output as an integer"),
    (",", "Pop value and output as ASCII character"),
    ("#", "Skip the following command"),
    ("&", "Ask user for a number and push it"),
    ("~", "Ask user for a character and push its ASCII value"),
    ("@", "End program"),
];

/// Auxiliary shell commands and their descriptions.
const HELPER_HELP: &[(&str, &str)] = &[
    ("show_stack", "print the content of the stack"),
    ("show_pc", "print the direction of the PC (Program Counter)"),
    (
        "quit",
        "exit the shell with the command \"exit\", \"quit\", or by typing Ctrl+D",
    ),
    (
        "exit",
        "exit the shell with the command \"exit\", \"quit\", or by typing Ctrl+D",
    ),
    (
        "help",
        "Use the command \"help\" to get a list of all available commands. \
         Or type \"help <command>\" to get specific help about this command.",
    ),
];

/// The helpers shown in the listing (aliases are collapsed).
const LISTED_HELPERS: [&str; 4] = ["show_stack", "show_pc", "quit", "help"];

/// Look up the description of a Befunge instruction, including digits.
pub fn instruction_help(cmd: &str) -> Option<String> {
    if let [digit @ b'0'..=b'9'] = cmd.as_bytes() {
        return Some(format!("Push the number {} on the stack", *digit - b'0'));
    }
    INSTRUCTION_HELP
        .iter()
        .find(|(token, _)| *token == cmd)
        .map(|(_, text)| (*text).to_string())
}

/// Look up the description of an auxiliary shell command.
pub fn helper_help(name: &str) -> Option<&'static str> {
    HELPER_HELP
        .iter()
        .find(|(token, _)| *token == name)
        .map(|(_, text)| *text)
}

/// Write the full listing: header, `ruler` underline, then both command
/// groups underlined with `subruler`.
pub fn write_listing<W: Write>(out: &mut W, ruler: char, subruler: char) -> io::Result<()> {
    let width = DOC_HEADER.len();

    writeln!(out, "{DOC_HEADER}")?;
    writeln!(out, "{}\n", repeat(ruler, width))?;

    writeln!(out, "{BEFUNGE_GROUP}")?;
    writeln!(out, "{}", repeat(subruler, BEFUNGE_GROUP.len()))?;
    let befunge: Vec<&str> = DIGITS
        .iter()
        .copied()
        .chain(INSTRUCTION_HELP.iter().map(|(token, _)| *token))
        .collect();
    columnize(out, &befunge, width)?;

    writeln!(out, "\n{HELPER_GROUP}")?;
    writeln!(out, "{}", repeat(subruler, HELPER_GROUP.len()))?;
    columnize(out, &LISTED_HELPERS, width)?;
    writeln!(out)?;

    Ok(())
}

fn repeat(ch: char, count: usize) -> String {
    std::iter::repeat(ch).take(count).collect()
}

/// Lay `items` out in columns filled top to bottom, fitting `displaywidth`
/// where possible; falls back to one item per line.
fn columnize<W: Write>(out: &mut W, items: &[&str], displaywidth: usize) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    let size = items.len();
    let mut layout: Option<(usize, Vec<usize>)> = None;
    for nrows in 1..size {
        let ncols = size.div_ceil(nrows);
        let mut colwidths = vec![0usize; ncols];
        for (i, item) in items.iter().enumerate() {
            let col = i / nrows;
            colwidths[col] = colwidths[col].max(item.chars().count());
        }
        let total: usize = colwidths.iter().sum::<usize>() + 2 * (ncols - 1);
        if total <= displaywidth {
            layout = Some((nrows, colwidths));
            break;
        }
    }
    let (nrows, colwidths) = match layout {
        Some(found) => found,
        None => (size, vec![0]),
    };

    for row in 0..nrows {
        let mut cells: Vec<String> = Vec::new();
        for (col, colwidth) in colwidths.iter().enumerate() {
            let i = nrows * col + row;
            if i < size {
                cells.push(format!("{:<width$}", items[i], width = colwidth));
            }
        }
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_help_is_exact() {
        assert_eq!(
            instruction_help("+").as_deref(),
            Some("Addition: Pop a and b, then push a+b")
        );
    }

    #[test]
    fn digit_help_names_the_digit() {
        assert_eq!(
            instruction_help("7").as_deref(),
            Some("Push the number 7 on the stack")
        );
    }

    #[test]
    fn every_instruction_has_help() {
        for token in ["+", "-", "*", "/", "%", "!", "`", ">", "<", "^", "v",
                      "?", "_", "|", "\"", ":", "\\", "$", ".", ",", "#",
                      "&", "~", "@"] {
            assert!(instruction_help(token).is_some(), "missing help for {token:?}");
        }
    }

    #[test]
    fn unknown_tokens_have_no_help() {
        assert!(instruction_help("frobnicate").is_none());
        assert!(instruction_help("42").is_none());
        assert!(helper_help("frobnicate").is_none());
    }

    #[test]
    fn helper_help_covers_listed_commands() {
        for name in LISTED_HELPERS {
            assert!(helper_help(name).is_some(), "missing help for {name}");
        }
        assert_eq!(helper_help("exit"), helper_help("quit"));
    }

    #[test]
    fn listing_contains_headers_and_rulers() {
        let mut buf = Vec::new();
        write_listing(&mut buf, '=', '-').expect("write to Vec cannot fail");
        let text = String::from_utf8(buf).expect("listing is valid UTF-8");

        assert!(text.starts_with(DOC_HEADER));
        assert!(text.contains(&"=".repeat(DOC_HEADER.len())));
        assert!(text.contains("Befunge Commands\n----------------"));
        assert!(text.contains("Additional helper functions\n---------------------------"));
        assert!(text.contains("show_stack"));
        assert!(text.contains('@'));
    }

    #[test]
    fn listing_uses_configured_subruler() {
        let mut buf = Vec::new();
        write_listing(&mut buf, '=', '~').expect("write to Vec cannot fail");
        let text = String::from_utf8(buf).expect("listing is valid UTF-8");
        assert!(text.contains("Befunge Commands\n~~~~~~~~~~~~~~~~"));
    }

    #[test]
    fn columnize_fits_rows_within_width() {
        let mut buf = Vec::new();
        columnize(&mut buf, &["aa", "b", "ccc", "d"], 20).expect("write to Vec");
        let text = String::from_utf8(buf).expect("utf8");
        // All four items fit on a single row within 20 columns.
        assert_eq!(text.lines().count(), 1);
        for item in ["aa", "b", "ccc", "d"] {
            assert!(text.contains(item));
        }
    }
}
