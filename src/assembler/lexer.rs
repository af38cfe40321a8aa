//! This lexer tokenizes Hack assembly.

// Tokens are the raw command text and the 1-based line they appear on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, line: usize) -> Self {
        Token { text: text.into(), line }
    }
}

/// Splits the source into whitespace-delimited tokens, dropping
/// everything from `//` to the end of each line.
/// Classifying the tokens is the parser's job, not the lexer's.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(256);

    for (index, line) in source.lines().enumerate() {
        let code = match line.find("//") {
            Some(start) => &line[..start],
            None => line,
        };

        tokens.extend(code.split_whitespace().map(|text| Token::new(text, index + 1)));
    }

    trace!("lexer produced {} token(s)", tokens.len());
    tokens
}
