use regex::Regex;
use std::io::{self, BufRead, Write};
use std::sync::OnceLock;

use super::board::{Point, MIN_SIDE, MAX_SIDE};
use super::error::InputError;
use super::game::Action;

const FIELD_SIZE_OPTIONS: usize = MAX_SIDE - MIN_SIDE + 1;

fn cell_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(!)?([1-9a-fA-F])([1-9a-fA-F])$").unwrap())
}

/// Parses a move such as `A1` (reveal column 10, row 1) or `!3c` (toggle the
/// flag on column 3, row 12). Coordinates are one-based hex digits on screen
/// and come back zero-based.
pub fn action_from_string(input: &str, side: usize) -> Result<Action, InputError> {
    let cap = cell_pattern().captures(input.trim()).ok_or(InputError::Malformed)?;
    let x = coordinate(&cap[2], side)?;
    let y = coordinate(&cap[3], side)?;
    let point = Point(x, y);
    if cap.get(1).is_some() {
        Ok(Action::ToggleFlag(point))
    } else {
        Ok(Action::Reveal(point))
    }
}

fn coordinate(digit: &str, side: usize) -> Result<usize, InputError> {
    let value = usize::from_str_radix(digit, 16).map_err(|_| InputError::Malformed)?;
    if value == 0 || value > side {
        return Err(InputError::OutOfRange{side})
    }
    Ok(value - 1)
}

/// Maps a menu choice `1..=7` to a field side `9..=15`.
pub fn side_from_menu_choice(input: &str) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(choice) if (1..=FIELD_SIZE_OPTIONS).contains(&choice) => Some(choice + MIN_SIDE - 1),
        _ => None
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None)
    }
    Ok(Some(line))
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed during setup")
}

pub fn prompt_field_size<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<usize> {
    loop {
        writeln!(output, "Please select the field size:")?;
        for choice in 1..=FIELD_SIZE_OPTIONS {
            let side = choice + MIN_SIDE - 1;
            writeln!(output, "\t{} - {}x{}", choice, side, side)?;
        }
        output.flush()?;
        let line = read_line(input)?.ok_or_else(closed)?;
        match side_from_menu_choice(&line) {
            Some(side) => return Ok(side),
            None => writeln!(output, "Invalid input! Please type a number from 1 to {}.", FIELD_SIZE_OPTIONS)?
        }
    }
}

pub fn prompt_mine_count<R: BufRead, W: Write>(input: &mut R, output: &mut W, max: usize) -> io::Result<usize> {
    loop {
        writeln!(output, "Please select the number of mines (1 - {}):", max)?;
        output.flush()?;
        let line = read_line(input)?.ok_or_else(closed)?;
        match line.trim().parse::<usize>() {
            Ok(mines) if mines >= 1 && mines <= max => return Ok(mines),
            _ => writeln!(output, "Invalid input! Please enter a number between 1 and {}.", max)?
        }
    }
}

/// Asks until a well-formed move arrives. `None` means the input ended.
pub fn prompt_action<R: BufRead, W: Write>(input: &mut R, output: &mut W, side: usize) -> io::Result<Option<Action>> {
    loop {
        write!(output, "Enter the XY coordinates (e.g., A1, B2), '!' prefix will toggle flag on the cell: ")?;
        output.flush()?;
        let line = match read_line(input)? {
            None => return Ok(None),
            Some(line) => line
        };
        match action_from_string(&line, side) {
            Ok(action) => return Ok(Some(action)),
            Err(err) => writeln!(output, "{}", err)?
        }
    }
}

#[cfg(test)]
mod interaction_tests {
    use super::*;

    #[test]
    fn parses_reveal_and_flag() {
        assert_eq!(action_from_string("11", 9), Ok(Action::Reveal(Point(0, 0))));
        assert_eq!(action_from_string("A1\n", 15), Ok(Action::Reveal(Point(9, 0))));
        assert_eq!(action_from_string("!3c", 15), Ok(Action::ToggleFlag(Point(2, 11))));
        assert_eq!(action_from_string("  !F f ", 15), Err(InputError::Malformed));
        assert_eq!(action_from_string("!ff", 15), Ok(Action::ToggleFlag(Point(14, 14))));
    }

    #[test]
    fn rejects_malformed() {
        for input in ["", "1", "123", "01", "G1", "?11", "!!11", "1 1"] {
            assert_eq!(action_from_string(input, 15), Err(InputError::Malformed), "{:?}", input);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(action_from_string("A1", 9), Err(InputError::OutOfRange{side: 9}));
        assert_eq!(action_from_string("!1a", 9), Err(InputError::OutOfRange{side: 9}));
        assert_eq!(action_from_string("99", 9), Ok(Action::Reveal(Point(8, 8))));
    }

    #[test]
    fn menu_choices_map_to_sides() {
        assert_eq!(side_from_menu_choice("1\n"), Some(9));
        assert_eq!(side_from_menu_choice("7"), Some(15));
        assert_eq!(side_from_menu_choice("0"), None);
        assert_eq!(side_from_menu_choice("8"), None);
        assert_eq!(side_from_menu_choice("big"), None);
    }

    #[test]
    fn field_size_prompt_retries() {
        let mut input = "x\n9\n3\n".as_bytes();
        let mut output = Vec::new();
        assert_eq!(prompt_field_size(&mut input, &mut output).unwrap(), 11);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid input!").count(), 2);
        assert!(text.contains("\t7 - 15x15"));
    }

    #[test]
    fn mine_prompt_respects_cap() {
        let mut input = "0\n62\n61\n".as_bytes();
        let mut output = Vec::new();
        assert_eq!(prompt_mine_count(&mut input, &mut output, 61).unwrap(), 61);
        assert!(String::from_utf8(output).unwrap().contains("(1 - 61)"));
    }

    #[test]
    fn setup_prompt_fails_on_eof() {
        let mut input = "".as_bytes();
        let err = prompt_mine_count(&mut input, &mut Vec::new(), 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn action_prompt_skips_bad_lines() {
        let mut input = "zz\nA1\n!22\n".as_bytes();
        let mut output = Vec::new();
        assert_eq!(prompt_action(&mut input, &mut output, 9).unwrap(), Some(Action::ToggleFlag(Point(1, 1))));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("hexadecimal digits"));
        assert!(text.contains("Invalid cell range"));
        assert_eq!(prompt_action(&mut input, &mut Vec::new(), 9).unwrap(), None);
    }
}
