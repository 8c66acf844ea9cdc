//! Line-based console prompts. Input and output are passed in, so every menu
//! can be driven from a byte buffer in tests.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Prints `prompt` and reads one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads a number in `0..=max`, asking again until one arrives.
    pub fn read_choice(&mut self, prompt: &str, max: u32) -> io::Result<Option<u32>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<u32>() {
                Ok(choice) if choice <= max => return Ok(Some(choice)),
                _ => self.say(&format!("Invalid option, pick 0-{}.", max))?,
            }
        }
    }

    /// Reads a non-negative number, asking again until one arrives.
    pub fn read_number(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.replace(',', ".").parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => return Ok(Some(value)),
                _ => self.say("Please enter a non-negative number.")?,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    NewGame,
    Editor,
    Exit,
}

pub fn main_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<MainChoice> {
    console.say("\nMain menu")?;
    console.say("1. New game")?;
    console.say("2. Map editor")?;
    console.say("0. Exit")?;
    let choice = match console.read_choice("\nChoose an option: ", 2)? {
        Some(1) => MainChoice::NewGame,
        Some(2) => MainChoice::Editor,
        _ => MainChoice::Exit,
    };
    Ok(choice)
}

/// Lists `maps` plus a custom-file entry. Returns the chosen path, or `None`
/// when the player backs out.
pub fn choose_map<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    maps: &[PathBuf],
    maps_dir: &Path,
) -> io::Result<Option<PathBuf>> {
    console.say("\nMap selection")?;
    for (i, map) in maps.iter().enumerate() {
        let label = map.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        console.say(&format!("{}. {}", i + 1, label))?;
    }
    let custom = maps.len() as u32 + 1;
    console.say(&format!("{}. Load a custom map file", custom))?;
    console.say("0. Back")?;

    match console.read_choice("\nChoose a map: ", custom)? {
        None | Some(0) => Ok(None),
        Some(n) if n == custom => {
            let Some(name) = console.read_line("Map file (.json): ")? else {
                return Ok(None);
            };
            if name.is_empty() {
                return Ok(None);
            }
            let mut path = PathBuf::from(&name);
            if path.extension().is_none() {
                path.set_extension("json");
            }
            if path.is_relative() && !path.exists() {
                path = maps_dir.join(path);
            }
            Ok(Some(path))
        }
        Some(n) => Ok(maps.get(n as usize - 1).cloned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn invalid_choices_are_reprompted() {
        let mut console = console("abc\n7\n\n2\n");
        assert_eq!(console.read_choice("> ", 2).unwrap(), Some(2));
        let printed = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(printed.matches("Invalid option").count(), 3);
    }

    #[test]
    fn end_of_input_exits() {
        assert_eq!(main_menu(&mut console("")).unwrap(), MainChoice::Exit);
        let mut stubborn = console("9\n");
        assert_eq!(stubborn.read_choice("> ", 2).unwrap(), None);
    }

    #[test]
    fn main_menu_options() {
        assert_eq!(main_menu(&mut console("1\n")).unwrap(), MainChoice::NewGame);
        assert_eq!(main_menu(&mut console("2\n")).unwrap(), MainChoice::Editor);
        assert_eq!(main_menu(&mut console("0\n")).unwrap(), MainChoice::Exit);
    }

    #[test]
    fn numbers_accept_decimal_comma() {
        let mut console = console("-1\nx\n2,5\n");
        assert_eq!(console.read_number("cost: ").unwrap(), Some(2.5));
    }

    #[test]
    fn map_choice_by_number_or_custom_name() {
        let maps = vec![PathBuf::from("maps/a.json"), PathBuf::from("maps/b.json")];
        let dir = Path::new("maps");
        assert_eq!(
            choose_map(&mut console("2\n"), &maps, dir).unwrap(),
            Some(PathBuf::from("maps/b.json"))
        );
        assert_eq!(
            choose_map(&mut console("3\nmine\n"), &maps, dir).unwrap(),
            Some(PathBuf::from("maps/mine.json"))
        );
        assert_eq!(choose_map(&mut console("0\n"), &maps, dir).unwrap(), None);
    }
}
