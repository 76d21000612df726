/// Splits one command line into words, resolving quotes and backslash escapes.
///
/// The scan never fails. An unterminated quote keeps its context until the end
/// of the line, so `echo 'foo` yields `["echo", "foo"]`.
pub struct Lexer<'a> {
    input: &'a str,
    buf: String,
    in_single_quote: bool,
    in_double_quote: bool,
    escaped: bool,
}

// Characters a backslash may escape inside double quotes.
const DOUBLE_QUOTE_ESCAPABLE: [char; 5] = ['$', '`', '"', '\\', '\n'];

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            buf: String::new(),
            in_single_quote: false,
            in_double_quote: false,
            escaped: false,
        }
    }

    pub fn tokenize(mut self) -> Vec<String> {
        let mut tokens = Vec::new();

        for ch in self.input.chars() {
            if self.escaped {
                if self.in_double_quote && !DOUBLE_QUOTE_ESCAPABLE.contains(&ch) {
                    self.buf.push('\\');
                }
                self.buf.push(ch);
                self.escaped = false;
                continue;
            }

            match ch {
                '\\' if self.in_single_quote => self.buf.push(ch),
                '\\' => self.escaped = true,
                '\'' if !self.in_double_quote => self.in_single_quote = !self.in_single_quote,
                '"' if !self.in_single_quote => self.in_double_quote = !self.in_double_quote,
                ' ' | '\t' if !self.in_single_quote && !self.in_double_quote => {
                    if !self.buf.is_empty() {
                        tokens.push(std::mem::take(&mut self.buf));
                    }
                }
                _ => self.buf.push(ch),
            }
        }

        if !self.buf.is_empty() {
            tokens.push(self.buf);
        }

        tokens
    }
}

pub fn tokenize(line: &str) -> Vec<String> {
    Lexer::new(line).tokenize()
}
