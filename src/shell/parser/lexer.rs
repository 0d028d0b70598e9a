/// Characters that end a token. There is no quoting: a delimiter always splits.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Separator {
    Redirect, // >
    Pipe,     // |
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token<'a> {
    Literal(&'a str),
    Separator(Separator),
}

/// Lazy whitespace tokenizer over a borrowed line.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    /// Rewind to the start of the line.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Next token with separators classified.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.next_raw().map(classify)
    }

    /// Next delimiter-bounded word, taken verbatim. Used for redirection
    /// targets, so `> |` names a file called `|`.
    pub fn next_raw(&mut self) -> Option<&'a str> {
        let rest = &self.input[self.cursor..];
        let start = rest.find(|c: char| !is_delimiter(c))?;
        let word = &rest[start..];
        let len = word.find(is_delimiter).unwrap_or(word.len());

        self.cursor += start + len;
        Some(&word[..len])
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

fn classify(word: &str) -> Token<'_> {
    match word.len() {
        1 => match word {
            ">" => Token::Separator(Separator::Redirect),
            "|" => Token::Separator(Separator::Pipe),
            _ => Token::Literal(word),
        },
        // two-character operators (>>, 2>, ||) are not recognised yet
        2 => Token::Literal(word),
        _ => Token::Literal(word),
    }
}
