//! Interactive collection of the four chain inputs.
//!
//! Titles are read as single lines. The job description and resume are
//! multi-line blocks ended by a blank line (once something has been typed) or
//! by EOF.

use std::io::{BufRead, Write};

use crate::models::{InputBundle, InputError};

const RULE: &str = "--------------------------------------------------------------------------------";

pub fn collect_inputs<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
) -> Result<InputBundle, InputError> {
    let job_title = prompt_line(reader, out, "Step 1 — Enter Job Title: ")?;
    let interviewer_title = prompt_line(
        reader,
        out,
        "Step 1 — Enter Interviewer Title (Hiring Manager or Recruiter): ",
    )?;
    let job_description = prompt_multiline(reader, out, "Step 2 — Job Description")?;
    let resume = prompt_multiline(reader, out, "Step 3 — Resume")?;

    InputBundle::new(&job_title, &interviewer_title, &job_description, &resume)
}

fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    label: &str,
) -> Result<String, InputError> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_multiline<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    label: &str,
) -> Result<String, InputError> {
    writeln!(
        out,
        "\nEnter {label}. End with an empty line, or press Ctrl+D (macOS/Linux) to finish:"
    )?;
    writeln!(out, "{RULE}")?;
    out.flush()?;

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            if lines.is_empty() {
                continue;
            }
            break;
        }
        lines.push(content.to_string());
    }

    writeln!(out, "{RULE}")?;
    Ok(lines.join("\n").trim().to_string())
}
