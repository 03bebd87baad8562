use crate::search::{ItemFilter, Scope};
use std::error::Error;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a single tag from -t/--tag flag
    pub fn extract_tag(&mut self) -> Result<String, Box<dyn Error>> {
        match self.iter.next() {
            Some(v) => {
                let tag = crate::tags::normalize_tag(&v);
                if tag.is_empty() {
                    Err(format!("Invalid tag provided to {}", self.command_name).into())
                } else {
                    Ok(tag)
                }
            }
            None => Err(format!("Provide a tag after -t/--tag for {}", self.command_name).into()),
        }
    }

    /// Extract a comma-separated tag list from -t/--tag, as in `-t rust,tools`.
    pub fn extract_tags(&mut self) -> Result<Vec<String>, Box<dyn Error>> {
        let raw = self.iter.next().ok_or_else(|| {
            format!("Provide tags after -t/--tag for {}", self.command_name)
        })?;
        let tags = crate::tags::split_tag_input(&raw);
        if tags.is_empty() {
            return Err(format!("Invalid tag provided to {}", self.command_name).into());
        }
        Ok(tags)
    }

    /// Extract a string value for a flag
    pub fn extract_value(&mut self, flag: &str) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name).into()
        })
    }

    pub fn unknown_flag(&self, flag: &str) -> Box<dyn Error> {
        format!("Unknown flag for {}: {flag}", self.command_name).into()
    }

    /// Get next positional argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }
}

/// Flags accepted by `list`.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct ListFlags {
    pub filter: ItemFilter,
    pub absolute_time: bool,
    pub show_all: bool,
}

impl ListFlags {
    pub fn parse(args: Vec<String>, command_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut flags = Self::default();
        let mut parser = ArgParser::new(args, command_name);
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-s" | "--search" => flags.filter.query = Some(parser.extract_value(&arg)?),
                "-t" | "--tag" => flags.filter.tag = Some(parser.extract_tag()?),
                "--pinned" => flags.filter.scope = Scope::Pinned,
                "--unpinned" => flags.filter.scope = Scope::Unpinned,
                "--favorites" | "--fav" => flags.filter.scope = Scope::Favorites,
                "--scope" => {
                    let raw = parser.extract_value(&arg)?;
                    flags.filter.scope = Scope::parse(&raw)
                        .ok_or_else(|| format!("Unknown scope: {raw} (all|pinned|unpinned|favorites)"))?;
                }
                "--absolute" => flags.absolute_time = true,
                "-a" | "--all" => flags.show_all = true,
                other => return Err(parser.unknown_flag(other)),
            }
        }
        Ok(flags)
    }
}

/// Split a shell line into words. Single and double quotes group words and
/// a backslash escapes the next character.
pub fn split_command_line(line: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quote.is_some() {
        return Err("Unterminated quote".into());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arg_parser_extract_tag() {
        let mut parser = ArgParser::new(strings(&["-t", "#Todo"]), "test");
        assert_eq!(parser.next().unwrap(), "-t");
        assert_eq!(parser.extract_tag().unwrap(), "todo");
    }

    #[test]
    fn test_arg_parser_extract_tags_splits_commas() {
        let mut parser = ArgParser::new(strings(&["#Rust, tools,,rust", ","]), "test");
        assert_eq!(parser.extract_tags().unwrap(), vec!["rust", "tools"]);
        assert!(parser.extract_tags().is_err());
        assert!(parser.extract_tags().is_err());
    }

    #[test]
    fn test_arg_parser_extract_value() {
        let mut parser = ArgParser::new(strings(&["--title"]), "test");
        let flag = parser.next().unwrap();
        assert!(parser.extract_value(&flag).is_err());
    }

    #[test]
    fn list_flags_parse() {
        let flags =
            ListFlags::parse(strings(&["-s", "milk", "-t", "Home", "--favorites"]), "list").unwrap();
        assert_eq!(flags.filter.query.as_deref(), Some("milk"));
        assert_eq!(flags.filter.tag.as_deref(), Some("home"));
        assert_eq!(flags.filter.scope, Scope::Favorites);
        assert!(ListFlags::parse(strings(&["--bogus"]), "list").is_err());
        assert!(ListFlags::parse(strings(&["--scope", "weird"]), "list").is_err());
    }

    #[test]
    fn split_respects_quotes() {
        assert_eq!(
            split_command_line(r#"note add "Buy milk" it's\ fine -t 'home'"#).unwrap_err().to_string(),
            "Unterminated quote"
        );
        assert_eq!(
            split_command_line(r#"note add "Buy milk" now\ please -t 'home'"#).unwrap(),
            strings(&["note", "add", "Buy milk", "now please", "-t", "home"])
        );
        assert_eq!(split_command_line("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_command_line(r#"add "" x"#).unwrap(), strings(&["add", "", "x"]));
    }
}
