//! Line-oriented prompts for the text front-end.
//!
//! Both helpers re-prompt until the answer is acceptable. End of input is
//! reported as `UnexpectedEof` so callers can stop cleanly.

use std::io::{self, BufRead, Write};

use crate::t;

/// Ask `prompt` until the trimmed, lower-cased answer is one of `choices`.
pub fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    choices: &[&str],
) -> io::Result<String> {
    loop {
        let answer = read_answer(input, output, prompt)?.to_lowercase();
        if choices.contains(&answer.as_str()) {
            return Ok(answer);
        }
        writeln!(output, "{}", t!("cli-invalid-choice", "choices" => choices.join(", ")))?;
    }
}

/// Ask `prompt` until the answer is a non-negative integer within the bounds.
pub fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    min: Option<u32>,
    max: Option<u32>,
) -> io::Result<u32> {
    loop {
        let answer = read_answer(input, output, prompt)?;
        if let Ok(value) = answer.parse::<u32>() {
            if min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m) {
                return Ok(value);
            }
        }
        writeln!(output, "{} {}", t!("cli-invalid-number"), bounds_hint(min, max))?;
    }
}

/// Show `prompt` and wait for Enter.
pub fn wait_for_enter<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<()> {
    read_answer(input, output, prompt).map(|_| ())
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<String> {
    write!(output, "{} ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

fn bounds_hint(min: Option<u32>, max: Option<u32>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => t!("cli-number-between", "min" => min, "max" => max),
        (Some(min), None) => t!("cli-number-min", "min" => min),
        (None, Some(max)) => t!("cli-number-max", "max" => max),
        (None, None) => t!("cli-number-any"),
    }
}
